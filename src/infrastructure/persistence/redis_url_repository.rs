//! Redis implementation of the URL mapping store.

use std::future::Future;
use std::time::Duration as StdDuration;

use async_trait::async_trait;
use chrono::{Duration, Utc};
use redis::{AsyncCommands, Client, ExistenceCheck, SetExpiry, SetOptions, aio::ConnectionManager};
use serde_json::json;
use tracing::{error, info};

use crate::domain::entities::Mapping;
use crate::domain::repositories::UrlRepository;
use crate::error::AppError;

/// Key namespace for stored mappings. One entry per mapping:
/// key = `"short:" + code`, value = original URL, TTL = remaining lifetime.
const KEY_PREFIX: &str = "short:";

/// Batch size hint for SCAN during enumeration.
const SCAN_COUNT: usize = 100;

/// Redis-backed mapping store.
///
/// Uses `ConnectionManager` for connection reuse and reconnects. Uniqueness
/// is enforced by Redis itself: writes go through `SET NX PX`, so exactly one
/// of two racing writers for the same code succeeds. Expiry is native key
/// TTL; expired entries are invisible to all reads without any filtering
/// here.
///
/// Every operation is bounded by `op_timeout`; an elapsed timeout or
/// transport error surfaces as [`AppError::Unavailable`].
pub struct RedisUrlRepository {
    client: ConnectionManager,
    op_timeout: StdDuration,
}

impl RedisUrlRepository {
    /// Connects to Redis and validates the connection with a PING.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unavailable`] if the URL is invalid, the
    /// connection cannot be established, or the PING fails.
    pub async fn connect(redis_url: &str, op_timeout: StdDuration) -> Result<Self, AppError> {
        info!("Connecting to Redis at {}", redis_url);

        let client = Client::open(redis_url).map_err(|e| {
            AppError::unavailable(
                format!("Failed to create Redis client: {}", e),
                json!({}),
            )
        })?;

        let manager = ConnectionManager::new(client).await.map_err(|e| {
            AppError::unavailable(format!("Failed to connect to Redis: {}", e), json!({}))
        })?;

        let mut test_conn = manager.clone();
        test_conn
            .ping::<()>()
            .await
            .map_err(|e| AppError::unavailable(format!("Redis PING failed: {}", e), json!({})))?;

        info!("✓ Connected to Redis");

        Ok(Self {
            client: manager,
            op_timeout,
        })
    }

    /// Constructs the full Redis key with namespace prefix.
    fn build_key(code: &str) -> String {
        format!("{}{}", KEY_PREFIX, code)
    }

    /// Runs a store operation under the configured timeout.
    async fn bounded<T, F>(&self, op: &'static str, fut: F) -> Result<T, AppError>
    where
        F: Future<Output = redis::RedisResult<T>>,
    {
        match tokio::time::timeout(self.op_timeout, fut).await {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(e)) => {
                error!("Redis {} error: {}", op, e);
                Err(AppError::unavailable(
                    format!("Store operation {} failed", op),
                    json!({ "op": op }),
                ))
            }
            Err(_) => {
                error!("Redis {} timed out after {:?}", op, self.op_timeout);
                Err(AppError::unavailable(
                    format!("Store operation {} timed out", op),
                    json!({ "op": op, "timeout_ms": self.op_timeout.as_millis() as u64 }),
                ))
            }
        }
    }
}

#[async_trait]
impl UrlRepository for RedisUrlRepository {
    async fn exists(&self, code: &str) -> Result<bool, AppError> {
        let key = Self::build_key(code);
        let mut conn = self.client.clone();

        self.bounded("EXISTS", conn.exists(&key)).await
    }

    async fn put_if_absent(&self, mapping: Mapping) -> Result<bool, AppError> {
        let ttl = mapping.ttl_from(Utc::now()).ok_or_else(|| {
            AppError::expiry_in_past(
                "Mapping expiry is not strictly in the future",
                json!({ "code": mapping.code, "expires_at": mapping.expires_at }),
            )
        })?;
        let ttl_ms = ttl.num_milliseconds().max(1) as u64;

        let key = Self::build_key(&mapping.code);
        let options = SetOptions::default()
            .conditional_set(ExistenceCheck::NX)
            .with_expiration(SetExpiry::PX(ttl_ms));

        let mut conn = self.client.clone();
        // SET NX replies OK when the key was written and Nil when it was
        // already held, which is how the losing side of a race finds out.
        let reply: Option<String> = self
            .bounded(
                "SET",
                conn.set_options(&key, &mapping.original_url, options),
            )
            .await?;

        Ok(reply.is_some())
    }

    async fn get(&self, code: &str) -> Result<Option<Mapping>, AppError> {
        let key = Self::build_key(code);
        let mut conn = self.client.clone();

        // The expiry is reconstructed from the key's remaining TTL; both
        // commands run in one pipeline on the same connection.
        let (value, pttl_ms): (Option<String>, i64) = self
            .bounded("GET", async {
                redis::pipe()
                    .get(&key)
                    .cmd("PTTL")
                    .arg(&key)
                    .query_async(&mut conn)
                    .await
            })
            .await?;

        match value {
            Some(original_url) if pttl_ms > 0 => Ok(Some(Mapping::new(
                code.to_string(),
                original_url,
                Utc::now() + Duration::milliseconds(pttl_ms),
            ))),
            // Key expired between the two commands, or carries no TTL.
            _ => Ok(None),
        }
    }

    async fn list_all(&self) -> Result<Vec<Mapping>, AppError> {
        let pattern = format!("{}*", KEY_PREFIX);
        let mut conn = self.client.clone();

        let mut keys: Vec<String> = Vec::new();
        let mut cursor: u64 = 0;
        loop {
            let (next, batch): (u64, Vec<String>) = self
                .bounded("SCAN", async {
                    redis::cmd("SCAN")
                        .arg(cursor)
                        .arg("MATCH")
                        .arg(&pattern)
                        .arg("COUNT")
                        .arg(SCAN_COUNT)
                        .query_async(&mut conn)
                        .await
                })
                .await?;

            keys.extend(batch);
            cursor = next;
            if cursor == 0 {
                break;
            }
        }

        let mut mappings = Vec::with_capacity(keys.len());
        for key in keys {
            let Some(code) = key.strip_prefix(KEY_PREFIX) else {
                continue;
            };
            // Keys observed by SCAN may expire before the read; skip them.
            if let Some(mapping) = self.get(code).await? {
                mappings.push(mapping);
            }
        }

        Ok(mappings)
    }

    async fn health_check(&self) -> bool {
        let mut conn = self.client.clone();
        tokio::time::timeout(self.op_timeout, conn.ping::<()>())
            .await
            .is_ok_and(|r| r.is_ok())
    }
}
