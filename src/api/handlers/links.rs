//! Handlers for link listings.

use axum::{
    Json,
    extract::{Query, State},
};

use crate::api::dto::link::{LinkMap, ListQuery};
use crate::error::AppError;
use crate::state::AppState;

/// Lists stored links keyed by hash.
///
/// # Endpoint
///
/// `GET /list` - every link (expired ones included)
/// `GET /list?top=true` - most clicked links, highest first
pub async fn list_handler(
    State(state): State<AppState>,
    Query(params): Query<ListQuery>,
) -> Result<Json<LinkMap>, AppError> {
    let links = state.listing_service.list(params.top).await?;

    Ok(Json(links.into_iter().collect()))
}

/// Lists the most clicked links, ties broken by ascending hash.
///
/// # Endpoint
///
/// `GET /clicks`
pub async fn top_clicked_handler(State(state): State<AppState>) -> Result<Json<LinkMap>, AppError> {
    let links = state.listing_service.top_clicked().await?;

    Ok(Json(links.into_iter().collect()))
}
