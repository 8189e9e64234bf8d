//! Handler for link shortening endpoint.

use axum::{Json, extract::State};
use serde_json::json;
use validator::Validate;

use crate::api::dto::shorten::{ShortenRequest, ShortenResponse};
use crate::error::AppError;
use crate::state::AppState;
use crate::utils::duration::parse_duration;

/// Creates (or returns the existing) short link for a URL.
///
/// # Endpoint
///
/// `POST /shorten`
///
/// # Request Body
///
/// ```json
/// { "url": "example.com/page", "expires_in": "24h" }
/// ```
///
/// # Response
///
/// ```json
/// {
///   "hash": "v7TN5e",
///   "link": "http://example.com/page",
///   "created_at": "2025-01-01T00:00:00Z",
///   "expires_at": "2025-01-02T00:00:00Z",
///   "click_counts": 0,
///   "short_url": "http://localhost:8080/v7TN5e"
/// }
/// ```
///
/// # Errors
///
/// Returns 400 Bad Request for an invalid URL or lifetime.
/// Returns 409 Conflict if the code is already used by a different URL.
/// Returns 503 Service Unavailable on store failures.
pub async fn shorten_handler(
    State(state): State<AppState>,
    Json(payload): Json<ShortenRequest>,
) -> Result<Json<ShortenResponse>, AppError> {
    payload.validate()?;

    let expires_in = parse_duration(&payload.expires_in).map_err(|e| {
        AppError::bad_request(
            "Invalid expiration duration",
            json!({ "expires_in": payload.expires_in, "reason": e.to_string() }),
        )
    })?;

    let link = state.link_service.shorten(&payload.url, expires_in).await?;
    let short_url = state.link_service.get_short_url(&state.base_url, &link.hash);

    Ok(Json(ShortenResponse {
        link: link.into(),
        short_url,
    }))
}
