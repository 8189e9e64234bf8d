//! Read-only listing of stored links.

use std::sync::Arc;

use crate::domain::entities::ShortLink;
use crate::domain::repositories::{DEFAULT_TOP_LIMIT, LinkRepository};
use crate::error::AppError;

/// Read-only facade over the link store.
pub struct ListingService<L: LinkRepository + ?Sized> {
    link_repository: Arc<L>,
    top_limit: i64,
}

impl<L: LinkRepository + ?Sized> ListingService<L> {
    /// Creates a listing service returning the default top five.
    pub fn new(link_repository: Arc<L>) -> Self {
        Self::with_top_limit(link_repository, DEFAULT_TOP_LIMIT)
    }

    pub fn with_top_limit(link_repository: Arc<L>, top_limit: i64) -> Self {
        Self {
            link_repository,
            top_limit,
        }
    }

    pub fn top_limit(&self) -> i64 {
        self.top_limit
    }

    /// Every stored link, expired ones included.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Store`] on persistence failures.
    pub async fn list_all(&self) -> Result<Vec<ShortLink>, AppError> {
        self.link_repository.list(false, self.top_limit).await
    }

    /// The most clicked links, highest first, ties by ascending hash.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Store`] on persistence failures.
    pub async fn top_clicked(&self) -> Result<Vec<ShortLink>, AppError> {
        self.link_repository.list(true, self.top_limit).await
    }

    pub async fn list(&self, top_only: bool) -> Result<Vec<ShortLink>, AppError> {
        if top_only {
            self.top_clicked().await
        } else {
            self.list_all().await
        }
    }
}
