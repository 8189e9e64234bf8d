//! Store decorator that bounds every call with a timeout.

use async_trait::async_trait;
use serde_json::json;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tracing::warn;

use crate::domain::entities::{NewShortLink, ShortLink};
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;

/// Wraps a [`LinkRepository`] so that no call blocks longer than `timeout`.
///
/// An elapsed call surfaces as [`AppError::Store`] marked retryable. The inner
/// operation is dropped, not retried.
pub struct TimeoutLinkRepository<R: LinkRepository + ?Sized> {
    inner: Arc<R>,
    timeout: Duration,
}

impl<R: LinkRepository + ?Sized> TimeoutLinkRepository<R> {
    pub fn new(inner: Arc<R>, timeout: Duration) -> Self {
        Self { inner, timeout }
    }

    async fn bounded<T, F>(&self, operation: &'static str, fut: F) -> Result<T, AppError>
    where
        F: Future<Output = Result<T, AppError>> + Send,
    {
        match tokio::time::timeout(self.timeout, fut).await {
            Ok(result) => result,
            Err(_) => {
                warn!(
                    "Store operation '{}' timed out after {:?}",
                    operation, self.timeout
                );
                Err(AppError::store(
                    "Store operation timed out",
                    json!({
                        "operation": operation,
                        "timeout_ms": u64::try_from(self.timeout.as_millis()).unwrap_or(u64::MAX),
                        "retryable": true,
                    }),
                ))
            }
        }
    }
}

#[async_trait]
impl<R: LinkRepository + ?Sized> LinkRepository for TimeoutLinkRepository<R> {
    async fn save(&self, new_link: NewShortLink) -> Result<ShortLink, AppError> {
        self.bounded("save", self.inner.save(new_link)).await
    }

    async fn find_by_hash(&self, hash: &str) -> Result<Option<ShortLink>, AppError> {
        self.bounded("find_by_hash", self.inner.find_by_hash(hash))
            .await
    }

    async fn increment_clicks(&self, hash: &str) -> Result<i64, AppError> {
        self.bounded("increment_clicks", self.inner.increment_clicks(hash))
            .await
    }

    async fn list(&self, top_clicked_only: bool, limit: i64) -> Result<Vec<ShortLink>, AppError> {
        self.bounded("list", self.inner.list(top_clicked_only, limit))
            .await
    }

    async fn ping(&self) -> Result<(), AppError> {
        self.bounded("ping", self.inner.ping()).await
    }
}
