//! Short link resolution with click tracking.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde_json::json;
use tracing::{debug, warn};

use crate::domain::repositories::LinkRepository;
use crate::error::AppError;
use crate::utils::shortcode::is_valid_shortcode;

/// Resolves shortcodes to their targets.
///
/// # Resolution order
///
/// 1. Load the link; a missing link fails with [`AppError::NotFound`]
/// 2. A link with `now > expires_at` fails with [`AppError::Expired`]
/// 3. Otherwise the click counter is incremented and the target returned
///
/// The counter is touched only in step 3, so failed resolutions never mutate
/// state. Every successful resolution increments exactly once.
pub struct RedirectService<L: LinkRepository + ?Sized> {
    link_repository: Arc<L>,
}

impl<L: LinkRepository + ?Sized> RedirectService<L> {
    pub fn new(link_repository: Arc<L>) -> Self {
        Self { link_repository }
    }

    /// Resolves `hash` to its target URL, counting the click.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] for unknown hashes.
    /// Returns [`AppError::Expired`] for links past their expiry.
    /// Returns [`AppError::Store`] on persistence failures.
    pub async fn resolve(&self, hash: &str) -> Result<String, AppError> {
        self.resolve_at(hash, Utc::now()).await
    }

    /// Same as [`Self::resolve`] with an explicit clock reading.
    pub async fn resolve_at(&self, hash: &str, now: DateTime<Utc>) -> Result<String, AppError> {
        let target = self.active_target(hash, now).await?;

        let clicks = self.link_repository.increment_clicks(hash).await?;
        debug!("Resolved {} -> {} (clicks: {})", hash, target, clicks);

        Ok(target)
    }

    /// Resolves `hash` like [`Self::resolve`] without counting a click.
    ///
    /// Used for `HEAD` requests, which link previewers send without a visit.
    pub async fn peek(&self, hash: &str) -> Result<String, AppError> {
        self.active_target(hash, Utc::now()).await
    }

    async fn active_target(&self, hash: &str, now: DateTime<Utc>) -> Result<String, AppError> {
        let not_found = || AppError::not_found("Short link not found", json!({ "hash": hash }));

        // Malformed codes can never be stored.
        if !is_valid_shortcode(hash) {
            return Err(not_found());
        }

        let link = self
            .link_repository
            .find_by_hash(hash)
            .await?
            .ok_or_else(not_found)?;

        if link.is_expired_at(now) {
            warn!("Short link {} expired at {}", link.hash, link.expires_at);
            return Err(AppError::expired(
                "Short link has expired",
                json!({ "hash": hash, "expires_at": link.expires_at }),
            ));
        }

        Ok(link.target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::ShortLink;
    use crate::domain::repositories::MockLinkRepository;
    use chrono::Duration;
    use mockall::Sequence;

    fn link_expiring_at(expires_at: DateTime<Utc>) -> ShortLink {
        ShortLink::new(
            "v7TN5e".to_string(),
            "http://example.com/page".to_string(),
            expires_at - Duration::hours(1),
            expires_at,
            3,
        )
    }

    #[tokio::test]
    async fn test_resolve_loads_then_increments() {
        let mut mock_repo = MockLinkRepository::new();
        let mut seq = Sequence::new();
        let link = link_expiring_at(Utc::now() + Duration::hours(1));

        mock_repo
            .expect_find_by_hash()
            .withf(|hash| hash == "v7TN5e")
            .times(1)
            .in_sequence(&mut seq)
            .returning(move |_| Ok(Some(link.clone())));
        mock_repo
            .expect_increment_clicks()
            .withf(|hash| hash == "v7TN5e")
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(4));

        let service = RedirectService::new(Arc::new(mock_repo));
        let target = service.resolve("v7TN5e").await.unwrap();

        assert_eq!(target, "http://example.com/page");
    }

    #[tokio::test]
    async fn test_resolve_not_found_does_not_increment() {
        let mut mock_repo = MockLinkRepository::new();
        mock_repo
            .expect_find_by_hash()
            .times(1)
            .returning(|_| Ok(None));
        mock_repo.expect_increment_clicks().times(0);

        let service = RedirectService::new(Arc::new(mock_repo));
        let result = service.resolve("abc123").await;

        assert!(matches!(result, Err(AppError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_resolve_expired_does_not_increment() {
        let mut mock_repo = MockLinkRepository::new();
        let link = link_expiring_at(Utc::now() - Duration::seconds(1));
        mock_repo
            .expect_find_by_hash()
            .times(1)
            .returning(move |_| Ok(Some(link.clone())));
        mock_repo.expect_increment_clicks().times(0);

        let service = RedirectService::new(Arc::new(mock_repo));
        let result = service.resolve("v7TN5e").await;

        assert!(matches!(result, Err(AppError::Expired { .. })));
    }

    #[tokio::test]
    async fn test_resolve_exactly_at_expiry_succeeds() {
        let expires_at = Utc::now();
        let mut mock_repo = MockLinkRepository::new();
        let link = link_expiring_at(expires_at);
        mock_repo
            .expect_find_by_hash()
            .times(1)
            .returning(move |_| Ok(Some(link.clone())));
        mock_repo
            .expect_increment_clicks()
            .times(1)
            .returning(|_| Ok(4));

        let service = RedirectService::new(Arc::new(mock_repo));

        assert!(service.resolve_at("v7TN5e", expires_at).await.is_ok());
    }

    #[tokio::test]
    async fn test_resolve_just_after_expiry_fails() {
        let expires_at = Utc::now();
        let mut mock_repo = MockLinkRepository::new();
        let link = link_expiring_at(expires_at);
        mock_repo
            .expect_find_by_hash()
            .times(1)
            .returning(move |_| Ok(Some(link.clone())));
        mock_repo.expect_increment_clicks().times(0);

        let service = RedirectService::new(Arc::new(mock_repo));
        let result = service
            .resolve_at("v7TN5e", expires_at + Duration::microseconds(1))
            .await;

        assert!(matches!(result, Err(AppError::Expired { .. })));
    }

    #[tokio::test]
    async fn test_resolve_malformed_hash_skips_store() {
        let mut mock_repo = MockLinkRepository::new();
        mock_repo.expect_find_by_hash().times(0);
        mock_repo.expect_increment_clicks().times(0);

        let service = RedirectService::new(Arc::new(mock_repo));

        for hash in ["", "abc", "toolong1", "ab-c12", "favicon.ico"] {
            let result = service.resolve(hash).await;
            assert!(matches!(result, Err(AppError::NotFound { .. })));
        }
    }

    #[tokio::test]
    async fn test_peek_does_not_increment() {
        let mut mock_repo = MockLinkRepository::new();
        let link = link_expiring_at(Utc::now() + Duration::hours(1));
        mock_repo
            .expect_find_by_hash()
            .times(1)
            .returning(move |_| Ok(Some(link.clone())));
        mock_repo.expect_increment_clicks().times(0);

        let service = RedirectService::new(Arc::new(mock_repo));

        assert_eq!(service.peek("v7TN5e").await.unwrap(), "http://example.com/page");
    }

    #[tokio::test]
    async fn test_peek_expired_link() {
        let mut mock_repo = MockLinkRepository::new();
        let link = link_expiring_at(Utc::now() - Duration::seconds(1));
        mock_repo
            .expect_find_by_hash()
            .times(1)
            .returning(move |_| Ok(Some(link.clone())));
        mock_repo.expect_increment_clicks().times(0);

        let service = RedirectService::new(Arc::new(mock_repo));

        assert!(matches!(service.peek("v7TN5e").await, Err(AppError::Expired { .. })));
    }

    #[tokio::test]
    async fn test_resolve_propagates_store_error() {
        let mut mock_repo = MockLinkRepository::new();
        mock_repo
            .expect_find_by_hash()
            .times(1)
            .returning(|_| Err(AppError::store("Database error", json!({}))));
        mock_repo.expect_increment_clicks().times(0);

        let service = RedirectService::new(Arc::new(mock_repo));
        let result = service.resolve("v7TN5e").await;

        assert!(matches!(result, Err(AppError::Store { .. })));
    }

    #[tokio::test]
    async fn test_resolve_increment_failure_surfaces() {
        let mut mock_repo = MockLinkRepository::new();
        let link = link_expiring_at(Utc::now() + Duration::hours(1));
        mock_repo
            .expect_find_by_hash()
            .times(1)
            .returning(move |_| Ok(Some(link.clone())));
        mock_repo
            .expect_increment_clicks()
            .times(1)
            .returning(|_| Err(AppError::store("Store operation timed out", json!({}))));

        let service = RedirectService::new(Arc::new(mock_repo));
        let result = service.resolve("v7TN5e").await;

        assert!(matches!(result, Err(AppError::Store { .. })));
    }
}
