//! Repository trait for short link storage.

use crate::domain::entities::{NewShortLink, ShortLink};
use crate::error::AppError;
use async_trait::async_trait;

/// Default number of links returned by the top-clicked listing.
pub const DEFAULT_TOP_LIMIT: i64 = 5;

/// Durable storage for short links.
///
/// Cross-request safety is the store's job: implementations must enforce hash
/// uniqueness and perform click increments atomically, so that callers never
/// need in-process locks.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgLinkRepository`] - PostgreSQL implementation
/// - [`crate::infrastructure::persistence::MemoryLinkRepository`] - in-process store
/// - [`crate::infrastructure::persistence::TimeoutLinkRepository`] - bounds another store's calls
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LinkRepository: Send + Sync {
    /// Inserts a short link, applying the collision policy atomically.
    ///
    /// If a record with the same hash exists and points at the same target, the
    /// existing record is returned unchanged. Nothing is overwritten.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Collision`] if the hash is taken by a different target.
    /// Returns [`AppError::Store`] on storage failures.
    async fn save(&self, new_link: NewShortLink) -> Result<ShortLink, AppError>;

    /// Finds a link by its hash.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Store`] on storage failures.
    async fn find_by_hash(&self, hash: &str) -> Result<Option<ShortLink>, AppError>;

    /// Atomically adds one to the click counter and returns the new value.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no record has this hash.
    /// Returns [`AppError::Store`] on storage failures.
    async fn increment_clicks(&self, hash: &str) -> Result<i64, AppError>;

    /// Lists stored links.
    ///
    /// With `top_clicked_only`, returns at most `limit` links ordered by click
    /// count descending, ties broken by hash ascending. Otherwise returns every
    /// link and ignores `limit`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Store`] on storage failures.
    async fn list(&self, top_clicked_only: bool, limit: i64) -> Result<Vec<ShortLink>, AppError>;

    /// Checks that the store is reachable.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Store`] if it is not.
    async fn ping(&self) -> Result<(), AppError>;
}
