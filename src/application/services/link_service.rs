//! Short link creation service.

use std::sync::Arc;

use chrono::{DateTime, TimeDelta, Utc};
use serde_json::json;
use tracing::info;

use crate::domain::entities::{NewShortLink, ShortLink};
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;
use crate::utils::shortcode::generate_shortcode;
use crate::utils::url_normalizer::normalize_url;

/// Service for creating short links.
///
/// Normalizes the target, derives its shortcode and hands the record to the
/// store, which applies the collision policy: shortening the same URL twice
/// returns the original record (its lifetime is not extended), while a
/// different URL hashing to a taken code fails with [`AppError::Collision`].
pub struct LinkService<L: LinkRepository + ?Sized> {
    link_repository: Arc<L>,
}

impl<L: LinkRepository + ?Sized> LinkService<L> {
    /// Creates a new link service.
    pub fn new(link_repository: Arc<L>) -> Self {
        Self { link_repository }
    }

    /// Shortens `long_url` with a lifetime of `expires_in`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the URL is invalid or the lifetime is
    /// not positive.
    /// Returns [`AppError::Collision`] if the code belongs to another URL.
    /// Returns [`AppError::Store`] on persistence failures.
    pub async fn shorten(
        &self,
        long_url: &str,
        expires_in: TimeDelta,
    ) -> Result<ShortLink, AppError> {
        self.shorten_at(long_url, expires_in, Utc::now()).await
    }

    /// Same as [`Self::shorten`] with an explicit creation time.
    pub async fn shorten_at(
        &self,
        long_url: &str,
        expires_in: TimeDelta,
        now: DateTime<Utc>,
    ) -> Result<ShortLink, AppError> {
        let target = normalize_url(long_url)?;

        if expires_in <= TimeDelta::zero() {
            return Err(AppError::bad_request(
                "Expiration must be a positive duration",
                json!({ "expires_in_ms": expires_in.num_milliseconds() }),
            ));
        }

        let hash = generate_shortcode(&target);

        let new_link = NewShortLink::new(hash, target, now, expires_in).ok_or_else(|| {
            AppError::bad_request(
                "Expiration is out of range",
                json!({ "expires_in_ms": expires_in.num_milliseconds() }),
            )
        })?;

        let link = self.link_repository.save(new_link).await?;
        info!("Short link {} -> {}", link.hash, link.target);

        Ok(link)
    }

    /// Retrieves a link by hash without touching its counter.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no link has this hash.
    pub async fn get_link(&self, hash: &str) -> Result<ShortLink, AppError> {
        self.link_repository
            .find_by_hash(hash)
            .await?
            .ok_or_else(|| AppError::not_found("Short link not found", json!({ "hash": hash })))
    }

    /// Constructs the full short URL for a hash.
    pub fn get_short_url(&self, base_url: &str, hash: &str) -> String {
        format!("{}/{}", base_url.trim_end_matches('/'), hash)
    }
}
