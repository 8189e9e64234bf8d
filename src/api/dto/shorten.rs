//! DTOs for the shortening endpoint.

use serde::{Deserialize, Serialize};
use validator::Validate;

use super::link::LinkResponse;

/// Request to shorten a URL.
///
/// ```json
/// { "url": "example.com/page", "expires_in": "24h" }
/// ```
#[derive(Debug, Deserialize, Validate)]
pub struct ShortenRequest {
    /// The URL to shorten. A missing scheme defaults to `http://`.
    #[validate(length(min = 1, max = 2048, message = "URL must be 1-2048 characters"))]
    pub url: String,

    /// Link lifetime such as `"90s"`, `"1h30m"` or `"1.5h"`.
    #[validate(length(min = 1, max = 64, message = "expires_in must not be empty"))]
    pub expires_in: String,
}

/// The stored link plus its public short URL.
#[derive(Debug, Serialize)]
pub struct ShortenResponse {
    #[serde(flatten)]
    pub link: LinkResponse,
    pub short_url: String,
}
