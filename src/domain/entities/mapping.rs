//! Mapping entity representing a short code to URL association.

use chrono::{DateTime, Duration, Utc};

/// A short code to original URL mapping with an absolute expiry.
///
/// Mappings are immutable once stored: the only lifecycle operations are
/// creation and passive, time-driven expiry. A mapping is live iff the current
/// time is strictly before `expires_at`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mapping {
    pub code: String,
    pub original_url: String,
    pub expires_at: DateTime<Utc>,
}

impl Mapping {
    /// Creates a new Mapping instance.
    pub fn new(code: String, original_url: String, expires_at: DateTime<Utc>) -> Self {
        Self {
            code,
            original_url,
            expires_at,
        }
    }

    /// Returns true if the mapping has passed its expiry time.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }

    /// Remaining lifetime relative to `now`, or `None` when already expired.
    ///
    /// The store uses this as the entry TTL at write time and must reject
    /// mappings for which it is `None`.
    pub fn ttl_from(&self, now: DateTime<Utc>) -> Option<Duration> {
        let remaining = self.expires_at - now;
        (remaining > Duration::zero()).then_some(remaining)
    }
}
