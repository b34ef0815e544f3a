//! Repository trait for short URL mapping storage.

use crate::domain::entities::Mapping;
use crate::error::AppError;
use async_trait::async_trait;

/// Uniqueness-checked key-value store for URL mappings.
///
/// The store owns expiry semantics: expired mappings must be invisible to
/// `exists`, `get`, and `list_all`, either through native key TTLs or by
/// filtering expired entries at read time.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::RedisUrlRepository`] - Redis backend
/// - [`crate::infrastructure::persistence::MemoryUrlRepository`] - in-process backend
///   for tests and Redis-less development
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UrlRepository: Send + Sync {
    /// Returns true iff a live mapping for `code` is currently stored.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unavailable`] on transport failure or timeout.
    async fn exists(&self, code: &str) -> Result<bool, AppError>;

    /// Atomically persists the mapping iff no live mapping holds its code.
    ///
    /// This is the uniqueness contract of the system: two writers racing on
    /// the same code must resolve to exactly one stored mapping, so the
    /// conditional write happens in a single store operation rather than a
    /// separate check followed by a write. The losing writer observes
    /// `Ok(false)` and retries with a different candidate.
    ///
    /// The entry is stored with a TTL of `expires_at - now`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::ExpiryInPast`] when the mapping's remaining
    /// lifetime is not strictly positive, and [`AppError::Unavailable`] on
    /// transport failure or timeout.
    async fn put_if_absent(&self, mapping: Mapping) -> Result<bool, AppError>;

    /// Retrieves the live mapping for `code`.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(Mapping))` if a live mapping exists
    /// - `Ok(None)` if the code is absent or expired
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unavailable`] on transport failure or timeout.
    async fn get(&self, code: &str) -> Result<Option<Mapping>, AppError>;

    /// Enumerates every currently live mapping.
    ///
    /// The result is a point-in-time snapshot with unspecified ordering and
    /// is not transactionally consistent against concurrent writers.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unavailable`] on transport failure or timeout.
    async fn list_all(&self) -> Result<Vec<Mapping>, AppError>;

    /// Checks if the store backend is reachable.
    ///
    /// Used by the health endpoint to report store status.
    async fn health_check(&self) -> bool;
}
