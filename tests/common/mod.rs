#![allow(dead_code)]

use axum_test::TestServer;
use chrono::{Duration, Utc};
use shortlink::api::routes::routes;
use shortlink::domain::entities::ShortLink;
use shortlink::infrastructure::persistence::MemoryLinkRepository;
use shortlink::state::AppState;
use sqlx::PgPool;
use std::sync::Arc;

pub const BASE_URL: &str = "http://localhost:8080";

pub fn create_test_state(repo: MemoryLinkRepository) -> AppState {
    AppState::new(Arc::new(repo), BASE_URL.to_string(), 5)
}

/// Test server over a fresh in-memory store, plus a handle to that store.
pub fn create_test_server() -> (TestServer, MemoryLinkRepository) {
    let repo = MemoryLinkRepository::new();
    let app = routes().with_state(create_test_state(repo.clone()));

    (TestServer::new(app).unwrap(), repo)
}

pub fn test_link(hash: &str, target: &str, clicks: i64) -> ShortLink {
    let created_at = Utc::now() - Duration::minutes(5);
    ShortLink::new(
        hash.to_string(),
        target.to_string(),
        created_at,
        created_at + Duration::hours(1),
        clicks,
    )
}

pub fn expired_link(hash: &str, target: &str) -> ShortLink {
    let created_at = Utc::now() - Duration::hours(2);
    ShortLink::new(
        hash.to_string(),
        target.to_string(),
        created_at,
        created_at + Duration::hours(1),
        0,
    )
}

pub async fn create_test_link(pool: &PgPool, hash: &str, url: &str, clicks: i64) {
    sqlx::query(
        "INSERT INTO urls (hash, link, created_at, expires_at, click_counts) \
         VALUES ($1, $2, NOW(), NOW() + INTERVAL '1 hour', $3)",
    )
    .bind(hash)
    .bind(url)
    .bind(clicks)
    .execute(pool)
    .await
    .unwrap();
}

pub async fn click_count(pool: &PgPool, hash: &str) -> i64 {
    sqlx::query_scalar("SELECT click_counts FROM urls WHERE hash = $1")
        .bind(hash)
        .fetch_one(pool)
        .await
        .unwrap()
}
