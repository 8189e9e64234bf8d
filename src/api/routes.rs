//! API route configuration.

use crate::api::handlers::{
    health_handler, list_handler, redirect_handler, shorten_handler, top_clicked_handler,
};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

/// All service routes.
///
/// # Endpoints
///
/// - `POST /shorten` - Create a short link
/// - `GET  /list`    - All links (`?top=true` for the most clicked)
/// - `GET  /clicks`  - Most clicked links
/// - `GET  /health`  - Store health
/// - `GET  /{hash}`  - Redirect to the target
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/shorten", post(shorten_handler))
        .route("/list", get(list_handler))
        .route("/clicks", get(top_clicked_handler))
        .route("/health", get(health_handler))
        .route("/{hash}", get(redirect_handler))
}
