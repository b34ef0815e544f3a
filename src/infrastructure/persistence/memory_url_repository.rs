//! In-process implementation of the URL mapping store.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::json;
use tokio::sync::RwLock;

use crate::domain::entities::Mapping;
use crate::domain::repositories::UrlRepository;
use crate::error::AppError;

struct StoredEntry {
    original_url: String,
    expires_at: DateTime<Utc>,
}

impl StoredEntry {
    fn is_live_at(&self, now: DateTime<Utc>) -> bool {
        now < self.expires_at
    }
}

/// In-memory mapping store for tests and Redis-less development.
///
/// Has no native TTL mechanism, so expired entries are filtered at read time;
/// a write over an expired code reclaims it. All state lives behind this
/// instance - there is no module-level shared map - and the conditional write
/// holds the lock across the check and the insert, which keeps racing writers
/// mutually exclusive.
#[derive(Default)]
pub struct MemoryUrlRepository {
    entries: RwLock<HashMap<String, StoredEntry>>,
}

impl MemoryUrlRepository {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UrlRepository for MemoryUrlRepository {
    async fn exists(&self, code: &str) -> Result<bool, AppError> {
        let now = Utc::now();
        let entries = self.entries.read().await;
        Ok(entries.get(code).is_some_and(|e| e.is_live_at(now)))
    }

    async fn put_if_absent(&self, mapping: Mapping) -> Result<bool, AppError> {
        let now = Utc::now();
        if mapping.ttl_from(now).is_none() {
            return Err(AppError::expiry_in_past(
                "Mapping expiry is not strictly in the future",
                json!({ "code": mapping.code, "expires_at": mapping.expires_at }),
            ));
        }

        let mut entries = self.entries.write().await;
        if entries.get(&mapping.code).is_some_and(|e| e.is_live_at(now)) {
            return Ok(false);
        }

        entries.insert(
            mapping.code,
            StoredEntry {
                original_url: mapping.original_url,
                expires_at: mapping.expires_at,
            },
        );
        Ok(true)
    }

    async fn get(&self, code: &str) -> Result<Option<Mapping>, AppError> {
        let now = Utc::now();
        let entries = self.entries.read().await;
        Ok(entries
            .get(code)
            .filter(|e| e.is_live_at(now))
            .map(|e| Mapping::new(code.to_string(), e.original_url.clone(), e.expires_at)))
    }

    async fn list_all(&self) -> Result<Vec<Mapping>, AppError> {
        let now = Utc::now();
        let entries = self.entries.read().await;
        Ok(entries
            .iter()
            .filter(|(_, e)| e.is_live_at(now))
            .map(|(code, e)| Mapping::new(code.clone(), e.original_url.clone(), e.expires_at))
            .collect())
    }

    async fn health_check(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn mapping(code: &str, url: &str, expires_at: DateTime<Utc>) -> Mapping {
        Mapping::new(code.to_string(), url.to_string(), expires_at)
    }

    #[tokio::test]
    async fn test_put_then_get_round_trip() {
        let repo = MemoryUrlRepository::new();
        let expires = Utc::now() + Duration::days(1);

        let stored = repo
            .put_if_absent(mapping("abc12345", "https://example.com", expires))
            .await
            .unwrap();
        assert!(stored);

        let found = repo.get("abc12345").await.unwrap().unwrap();
        assert_eq!(found.original_url, "https://example.com");
        assert_eq!(found.expires_at, expires);
        assert!(repo.exists("abc12345").await.unwrap());
    }

    #[tokio::test]
    async fn test_put_if_absent_rejects_live_duplicate() {
        let repo = MemoryUrlRepository::new();
        let expires = Utc::now() + Duration::days(1);

        assert!(
            repo.put_if_absent(mapping("abc12345", "https://a.com", expires))
                .await
                .unwrap()
        );
        assert!(
            !repo
                .put_if_absent(mapping("abc12345", "https://b.com", expires))
                .await
                .unwrap()
        );

        // The first writer's mapping survives.
        let found = repo.get("abc12345").await.unwrap().unwrap();
        assert_eq!(found.original_url, "https://a.com");
    }

    #[tokio::test]
    async fn test_put_if_absent_rejects_past_expiry() {
        let repo = MemoryUrlRepository::new();

        let result = repo
            .put_if_absent(mapping(
                "abc12345",
                "https://a.com",
                Utc::now() - Duration::seconds(1),
            ))
            .await;

        assert!(matches!(result.unwrap_err(), AppError::ExpiryInPast { .. }));
    }

    #[tokio::test]
    async fn test_expired_entry_invisible_to_reads() {
        let repo = MemoryUrlRepository::new();
        repo.put_if_absent(mapping(
            "abc12345",
            "https://a.com",
            Utc::now() + Duration::milliseconds(20),
        ))
        .await
        .unwrap();

        tokio::time::sleep(std::time::Duration::from_millis(40)).await;

        assert!(!repo.exists("abc12345").await.unwrap());
        assert!(repo.get("abc12345").await.unwrap().is_none());
        assert!(repo.list_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_expired_code_can_be_reclaimed() {
        let repo = MemoryUrlRepository::new();
        repo.put_if_absent(mapping(
            "abc12345",
            "https://old.com",
            Utc::now() + Duration::milliseconds(20),
        ))
        .await
        .unwrap();

        tokio::time::sleep(std::time::Duration::from_millis(40)).await;

        let stored = repo
            .put_if_absent(mapping(
                "abc12345",
                "https://new.com",
                Utc::now() + Duration::days(1),
            ))
            .await
            .unwrap();
        assert!(stored);

        let found = repo.get("abc12345").await.unwrap().unwrap();
        assert_eq!(found.original_url, "https://new.com");
    }

    #[tokio::test]
    async fn test_list_all_returns_live_mappings() {
        let repo = MemoryUrlRepository::new();
        let expires = Utc::now() + Duration::days(1);

        repo.put_if_absent(mapping("code0001", "https://a.com", expires))
            .await
            .unwrap();
        repo.put_if_absent(mapping("code0002", "https://b.com", expires))
            .await
            .unwrap();

        let mut codes: Vec<String> = repo
            .list_all()
            .await
            .unwrap()
            .into_iter()
            .map(|m| m.code)
            .collect();
        codes.sort();
        assert_eq!(codes, vec!["code0001", "code0002"]);
    }
}
