//! In-memory link repository.
//!
//! Will be destroyed on process shutdown. Intended for development and tests;
//! it offers the same atomicity guarantees as the PostgreSQL store within a
//! single process.

use async_trait::async_trait;
use serde_json::json;
use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::domain::entities::{NewShortLink, ShortLink};
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;

/// An in-memory short link store keyed by hash.
#[derive(Clone, Debug, Default)]
pub struct MemoryLinkRepository {
    links: Arc<Mutex<HashMap<String, ShortLink>>>,
}

impl MemoryLinkRepository {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored links.
    pub async fn len(&self) -> usize {
        self.links.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.links.lock().await.is_empty()
    }

    /// Inserts a record as-is, bypassing the collision policy.
    ///
    /// Useful for seeding fixtures such as already-expired links.
    pub async fn insert_raw(&self, link: ShortLink) {
        self.links.lock().await.insert(link.hash.clone(), link);
    }
}

#[async_trait]
impl LinkRepository for MemoryLinkRepository {
    async fn save(&self, new_link: NewShortLink) -> Result<ShortLink, AppError> {
        let mut links = self.links.lock().await;

        match links.entry(new_link.hash.clone()) {
            Entry::Vacant(slot) => Ok(slot.insert(new_link.into_link()).clone()),
            Entry::Occupied(existing) if existing.get().target == new_link.target => {
                Ok(existing.get().clone())
            }
            Entry::Occupied(_) => Err(AppError::collision(
                "Shortcode already used by a different URL",
                json!({ "hash": new_link.hash }),
            )),
        }
    }

    async fn find_by_hash(&self, hash: &str) -> Result<Option<ShortLink>, AppError> {
        Ok(self.links.lock().await.get(hash).cloned())
    }

    async fn increment_clicks(&self, hash: &str) -> Result<i64, AppError> {
        let mut links = self.links.lock().await;

        let link = links
            .get_mut(hash)
            .ok_or_else(|| AppError::not_found("Short link not found", json!({ "hash": hash })))?;
        link.click_count += 1;

        Ok(link.click_count)
    }

    async fn list(&self, top_clicked_only: bool, limit: i64) -> Result<Vec<ShortLink>, AppError> {
        let mut links: Vec<ShortLink> = self.links.lock().await.values().cloned().collect();

        if top_clicked_only {
            links.sort_by(|a, b| {
                b.click_count
                    .cmp(&a.click_count)
                    .then_with(|| a.hash.cmp(&b.hash))
            });
            links.truncate(usize::try_from(limit).unwrap_or(0));
        } else {
            links.sort_by(|a, b| a.hash.cmp(&b.hash));
        }

        Ok(links)
    }

    async fn ping(&self) -> Result<(), AppError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    fn new_link(hash: &str, target: &str) -> NewShortLink {
        NewShortLink::new(
            hash.to_string(),
            target.to_string(),
            Utc::now(),
            Duration::hours(1),
        )
        .unwrap()
    }

    fn link_with_clicks(hash: &str, clicks: i64) -> ShortLink {
        let mut link = new_link(hash, &format!("https://example.com/{}", hash)).into_link();
        link.click_count = clicks;
        link
    }

    #[tokio::test]
    async fn test_save_and_find_round_trip() {
        let repo = MemoryLinkRepository::new();
        let request = new_link("abc123", "https://example.com/");

        let saved = repo.save(request.clone()).await.unwrap();
        let loaded = repo.find_by_hash("abc123").await.unwrap().unwrap();

        assert_eq!(saved, loaded);
        assert!(loaded.same_mapping(&request.into_link()));
        assert_eq!(loaded.click_count, 0);
    }

    #[tokio::test]
    async fn test_find_missing() {
        let repo = MemoryLinkRepository::new();
        assert!(repo.find_by_hash("nope00").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_save_same_target_is_idempotent() {
        let repo = MemoryLinkRepository::new();
        let first = repo
            .save(new_link("abc123", "https://example.com/"))
            .await
            .unwrap();
        repo.increment_clicks("abc123").await.unwrap();

        let later = NewShortLink::new(
            "abc123".to_string(),
            "https://example.com/".to_string(),
            Utc::now() + Duration::days(1),
            Duration::days(30),
        )
        .unwrap();
        let second = repo.save(later).await.unwrap();

        assert!(second.same_mapping(&first));
        assert_eq!(second.expires_at, first.expires_at);
        assert_eq!(second.click_count, 1);
        assert_eq!(repo.len().await, 1);
    }

    #[tokio::test]
    async fn test_save_different_target_collides() {
        let repo = MemoryLinkRepository::new();
        repo.save(new_link("abc123", "https://example.com/x"))
            .await
            .unwrap();

        let result = repo.save(new_link("abc123", "https://example.com/y")).await;

        assert!(matches!(result, Err(AppError::Collision { .. })));
        let stored = repo.find_by_hash("abc123").await.unwrap().unwrap();
        assert_eq!(stored.target, "https://example.com/x");
    }

    #[tokio::test]
    async fn test_increment_missing_is_not_found() {
        let repo = MemoryLinkRepository::new();
        let result = repo.increment_clicks("nope00").await;
        assert!(matches!(result, Err(AppError::NotFound { .. })));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_increments_are_not_lost() {
        let repo = MemoryLinkRepository::new();
        repo.save(new_link("abc123", "https://example.com/"))
            .await
            .unwrap();

        let handles: Vec<_> = (0..200)
            .map(|_| {
                let repo = repo.clone();
                tokio::spawn(async move { repo.increment_clicks("abc123").await })
            })
            .collect();

        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        let link = repo.find_by_hash("abc123").await.unwrap().unwrap();
        assert_eq!(link.click_count, 200);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_conflicting_saves_have_one_winner() {
        let repo = MemoryLinkRepository::new();

        let handles: Vec<_> = (0..20)
            .map(|i| {
                let repo = repo.clone();
                tokio::spawn(async move {
                    repo.save(new_link("abc123", &format!("https://example.com/{}", i)))
                        .await
                })
            })
            .collect();

        let mut successes = 0;
        for handle in handles {
            match handle.await.unwrap() {
                Ok(_) => successes += 1,
                Err(AppError::Collision { .. }) => {}
                Err(other) => panic!("unexpected error: {:?}", other),
            }
        }

        assert_eq!(successes, 1);
        assert_eq!(repo.len().await, 1);
    }

    #[tokio::test]
    async fn test_list_top_orders_by_clicks_then_hash() {
        let repo = MemoryLinkRepository::new();
        for (hash, clicks) in [
            ("aaaaaa", 3),
            ("bbbbbb", 10),
            ("cccccc", 3),
            ("Aaaaaa", 3),
            ("dddddd", 0),
            ("eeeeee", 7),
            ("ffffff", 1),
        ] {
            repo.insert_raw(link_with_clicks(hash, clicks)).await;
        }

        let top = repo.list(true, 5).await.unwrap();
        let hashes: Vec<&str> = top.iter().map(|l| l.hash.as_str()).collect();

        assert_eq!(hashes, vec!["bbbbbb", "eeeeee", "Aaaaaa", "aaaaaa", "cccccc"]);
    }

    #[tokio::test]
    async fn test_list_top_respects_limit() {
        let repo = MemoryLinkRepository::new();
        for i in 0..3 {
            repo.insert_raw(link_with_clicks(&format!("hash0{}", i), i))
                .await;
        }

        assert_eq!(repo.list(true, 5).await.unwrap().len(), 3);
        assert_eq!(repo.list(true, 2).await.unwrap().len(), 2);
        assert!(repo.list(true, 0).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_list_all_returns_everything() {
        let repo = MemoryLinkRepository::new();
        for i in 0..8 {
            repo.insert_raw(link_with_clicks(&format!("hash0{}", i), i))
                .await;
        }

        let all = repo.list(false, 5).await.unwrap();
        assert_eq!(all.len(), 8);
    }
}
