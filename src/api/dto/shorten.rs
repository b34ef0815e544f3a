//! DTOs for the shorten endpoint.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Request to shorten a single URL.
#[derive(Debug, Deserialize, Validate)]
pub struct ShortenRequest {
    /// The original URL to shorten. Scheme validation happens in the service
    /// after trimming, so the only structural requirement here is presence.
    #[validate(length(min = 1, message = "url must not be empty"))]
    pub url: String,

    /// Optional absolute expiry. Missing or non-future values fall back to
    /// the default lifetime.
    pub expires_at: Option<DateTime<Utc>>,

    /// Optional caller-supplied short code.
    pub custom_code: Option<String>,
}

/// Response for a stored mapping.
#[derive(Debug, Serialize)]
pub struct ShortenResponse {
    pub code: String,
    pub short_url: String,
    pub long_url: String,
    pub expires_at: DateTime<Utc>,
}
