//! Handler for short URL redirect.

use axum::{
    extract::{Path, State},
    http::{Method, StatusCode, header},
    response::IntoResponse,
};

use crate::error::AppError;
use crate::state::AppState;

/// Redirects a shortcode to its target URL.
///
/// # Endpoint
///
/// `GET /{hash}`
///
/// A successful `GET` counts one click. `HEAD` answers the same way without
/// counting, and failed lookups change nothing.
///
/// # Errors
///
/// Returns 404 Not Found for unknown codes.
/// Returns 410 Gone for expired links.
/// Returns 503 Service Unavailable on store failures.
pub async fn redirect_handler(
    method: Method,
    Path(hash): Path<String>,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let target = if method == Method::HEAD {
        state.redirect_service.peek(&hash).await?
    } else {
        state.redirect_service.resolve(&hash).await?
    };

    Ok((StatusCode::FOUND, [(header::LOCATION, target)]))
}
