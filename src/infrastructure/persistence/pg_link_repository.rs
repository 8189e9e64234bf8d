//! PostgreSQL implementation of link repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::json;
use sqlx::PgPool;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::domain::entities::{NewShortLink, ShortLink};
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;

/// Row shape of the `urls` table.
#[derive(Debug, sqlx::FromRow)]
struct UrlRow {
    hash: String,
    link: String,
    created_at: DateTime<Utc>,
    expires_at: DateTime<Utc>,
    click_counts: i64,
}

impl From<UrlRow> for ShortLink {
    fn from(row: UrlRow) -> Self {
        ShortLink::new(
            row.hash,
            row.link,
            row.created_at,
            row.expires_at,
            row.click_counts,
        )
    }
}

/// PostgreSQL repository for short links.
///
/// Uniqueness of `hash` comes from the primary key and click increments are a
/// single `UPDATE`, so any number of service instances can share one database.
pub struct PgLinkRepository {
    pool: Arc<PgPool>,
}

impl PgLinkRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }

    async fn fetch_by_hash(&self, hash: &str) -> Result<Option<UrlRow>, sqlx::Error> {
        sqlx::query_as::<_, UrlRow>(
            r#"
            SELECT hash, link, created_at, expires_at, click_counts
            FROM urls
            WHERE hash = $1
            "#,
        )
        .bind(hash)
        .fetch_optional(self.pool.as_ref())
        .await
    }
}

#[async_trait]
impl LinkRepository for PgLinkRepository {
    async fn save(&self, new_link: NewShortLink) -> Result<ShortLink, AppError> {
        let inserted = sqlx::query_as::<_, UrlRow>(
            r#"
            INSERT INTO urls (hash, link, created_at, expires_at, click_counts)
            VALUES ($1, $2, $3, $4, 0)
            ON CONFLICT (hash) DO NOTHING
            RETURNING hash, link, created_at, expires_at, click_counts
            "#,
        )
        .bind(&new_link.hash)
        .bind(&new_link.target)
        .bind(new_link.created_at)
        .bind(new_link.expires_at)
        .fetch_optional(self.pool.as_ref())
        .await?;

        if let Some(row) = inserted {
            return Ok(row.into());
        }

        // The key is taken: whoever won the insert decides the outcome.
        let existing = self.fetch_by_hash(&new_link.hash).await?.ok_or_else(|| {
            AppError::store(
                "Short link vanished after conflicting insert",
                json!({ "hash": new_link.hash, "retryable": true }),
            )
        })?;

        if existing.link == new_link.target {
            debug!("Hash {} already maps to {}", existing.hash, existing.link);
            Ok(existing.into())
        } else {
            warn!(
                "Shortcode collision on {}: stored {} vs requested {}",
                existing.hash, existing.link, new_link.target
            );
            Err(AppError::collision(
                "Shortcode already used by a different URL",
                json!({ "hash": new_link.hash }),
            ))
        }
    }

    async fn find_by_hash(&self, hash: &str) -> Result<Option<ShortLink>, AppError> {
        Ok(self.fetch_by_hash(hash).await?.map(ShortLink::from))
    }

    async fn increment_clicks(&self, hash: &str) -> Result<i64, AppError> {
        let count = sqlx::query_scalar::<_, i64>(
            r#"
            UPDATE urls
            SET click_counts = click_counts + 1
            WHERE hash = $1
            RETURNING click_counts
            "#,
        )
        .bind(hash)
        .fetch_optional(self.pool.as_ref())
        .await?;

        count.ok_or_else(|| AppError::not_found("Short link not found", json!({ "hash": hash })))
    }

    async fn list(&self, top_clicked_only: bool, limit: i64) -> Result<Vec<ShortLink>, AppError> {
        let rows = if top_clicked_only {
            sqlx::query_as::<_, UrlRow>(
                r#"
                SELECT hash, link, created_at, expires_at, click_counts
                FROM urls
                ORDER BY click_counts DESC, hash COLLATE "C" ASC
                LIMIT $1
                "#,
            )
            .bind(limit.max(0))
            .fetch_all(self.pool.as_ref())
            .await?
        } else {
            sqlx::query_as::<_, UrlRow>(
                r#"
                SELECT hash, link, created_at, expires_at, click_counts
                FROM urls
                ORDER BY hash COLLATE "C" ASC
                "#,
            )
            .fetch_all(self.pool.as_ref())
            .await?
        };

        Ok(rows.into_iter().map(ShortLink::from).collect())
    }

    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query_scalar::<_, i32>("SELECT 1")
            .fetch_one(self.pool.as_ref())
            .await?;
        Ok(())
    }
}
