//! Short code assignment and resolution service.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use serde_json::json;

use crate::domain::entities::Mapping;
use crate::domain::repositories::UrlRepository;
use crate::error::AppError;
use crate::utils::code_generator::{generate_code, validate_custom_code};
use crate::utils::url_validator::validate_target_url;

/// Default mapping lifetime applied when the caller supplies no usable expiry.
pub const DEFAULT_EXPIRY_DAYS: i64 = 30;

/// Default ceiling for the collision retry loop.
///
/// In a 62^8 code space collisions are practically negligible, so the loop is
/// expected to terminate on the first attempt. The ceiling exists to fail
/// fast with an explicit error when the backing store is degraded instead of
/// spinning indefinitely.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 256;

/// Service for assigning short codes and resolving them back to URLs.
///
/// Stateless and safe to share across concurrent requests: the only mutable
/// state lives behind the repository. Uniqueness under concurrent writers is
/// delegated to [`UrlRepository::put_if_absent`]; this service only decides
/// which candidate to try next.
pub struct UrlService {
    repository: Arc<dyn UrlRepository>,
    default_expiry: Duration,
    max_attempts: u32,
}

impl UrlService {
    /// Creates a service with the default expiry and retry ceiling.
    pub fn new(repository: Arc<dyn UrlRepository>) -> Self {
        Self::with_limits(repository, DEFAULT_EXPIRY_DAYS, DEFAULT_MAX_ATTEMPTS)
    }

    /// Creates a service with explicit expiry and retry limits.
    pub fn with_limits(
        repository: Arc<dyn UrlRepository>,
        default_expiry_days: i64,
        max_attempts: u32,
    ) -> Self {
        Self {
            repository,
            default_expiry: Duration::days(default_expiry_days),
            max_attempts,
        }
    }

    /// Creates and stores a mapping for `original_url`.
    ///
    /// With `custom_code` the caller-supplied code is used as-is (after shape
    /// validation); otherwise a code is derived from the URL with a
    /// disambiguation sequence and retried on collision.
    ///
    /// # Errors
    ///
    /// - [`AppError::Validation`] - malformed URL or custom code
    /// - [`AppError::Conflict`] - custom code already live
    /// - [`AppError::ExhaustedRetries`] - collision loop exceeded its ceiling
    /// - [`AppError::Unavailable`] - store transport failure
    pub async fn shorten(
        &self,
        original_url: &str,
        requested_expiry: Option<DateTime<Utc>>,
        custom_code: Option<String>,
    ) -> Result<Mapping, AppError> {
        let url = validate_target_url(original_url).map_err(|e| {
            AppError::bad_request("Invalid URL", json!({ "reason": e.to_string() }))
        })?;

        let expires_at = self.resolve_expiry(requested_expiry, Utc::now());

        match custom_code {
            Some(code) => self.store_custom_code(url, code, expires_at).await,
            None => self.assign_generated_code(url, expires_at).await,
        }
    }

    /// Retrieves the live mapping for `code`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] when the code is absent or expired.
    pub async fn resolve(&self, code: &str) -> Result<Mapping, AppError> {
        self.repository.get(code).await?.ok_or_else(|| {
            AppError::not_found(
                "No mapping exists for the given short code",
                json!({ "code": code }),
            )
        })
    }

    /// Enumerates all currently live mappings.
    pub async fn list_mappings(&self) -> Result<Vec<Mapping>, AppError> {
        self.repository.list_all().await
    }

    /// Resolves the effective expiry for a new mapping.
    ///
    /// A missing or non-future requested expiry is replaced with the default
    /// lifetime; a strictly future timestamp is used verbatim.
    fn resolve_expiry(
        &self,
        requested: Option<DateTime<Utc>>,
        now: DateTime<Utc>,
    ) -> DateTime<Utc> {
        requested
            .filter(|t| *t > now)
            .unwrap_or(now + self.default_expiry)
    }

    /// Stores a mapping under a caller-supplied code.
    ///
    /// A lost conditional-write race reports the same conflict as an upfront
    /// existence hit; the caller picked this exact code, so there is nothing
    /// to retry.
    async fn store_custom_code(
        &self,
        url: String,
        code: String,
        expires_at: DateTime<Utc>,
    ) -> Result<Mapping, AppError> {
        validate_custom_code(&code)?;

        if self.repository.exists(&code).await? {
            return Err(AppError::conflict(
                "Custom code is already taken",
                json!({ "code": code }),
            ));
        }

        let mapping = Mapping::new(code, url, expires_at);
        if !self.repository.put_if_absent(mapping.clone()).await? {
            return Err(AppError::conflict(
                "Custom code is already taken",
                json!({ "code": mapping.code }),
            ));
        }

        Ok(mapping)
    }

    /// Derives a code from the URL and stores the mapping, retrying with an
    /// incremented sequence on collision.
    ///
    /// A candidate can fail twice: the existence probe sees a live mapping,
    /// or the conditional write loses a race against a concurrent writer that
    /// derived the same candidate. Both paths advance to the next sequence.
    async fn assign_generated_code(
        &self,
        url: String,
        expires_at: DateTime<Utc>,
    ) -> Result<Mapping, AppError> {
        for sequence in 1..=self.max_attempts {
            let code = generate_code(&url, sequence);

            if self.repository.exists(&code).await? {
                tracing::debug!(code = %code, sequence, "candidate collision, retrying");
                continue;
            }

            let mapping = Mapping::new(code, url.clone(), expires_at);
            if self.repository.put_if_absent(mapping.clone()).await? {
                return Ok(mapping);
            }

            tracing::debug!(
                code = %mapping.code,
                sequence,
                "lost conditional write race, retrying"
            );
        }

        Err(AppError::exhausted_retries(
            "Could not assign a unique short code",
            json!({ "attempts": self.max_attempts }),
        ))
    }
}
