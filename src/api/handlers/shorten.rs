//! Handler for the shorten endpoint.

use axum::{Json, extract::State};
use validator::Validate;

use crate::api::dto::shorten::{ShortenRequest, ShortenResponse};
use crate::error::AppError;
use crate::state::AppState;

/// Creates a short code for a long URL.
///
/// # Endpoint
///
/// `POST /api/shorten`
///
/// # Request Body
///
/// ```json
/// {
///   "url": "https://example.com",
///   "expires_at": "2026-09-22T00:00:00Z",  // optional
///   "custom_code": "my-code"                // optional
/// }
/// ```
///
/// # Response
///
/// ```json
/// {
///   "code": "2IR5Y9CK",
///   "short_url": "http://localhost:3000/2IR5Y9CK",
///   "long_url": "https://example.com",
///   "expires_at": "2026-09-22T00:00:00Z"
/// }
/// ```
///
/// # Errors
///
/// - 400 Bad Request - missing/invalid URL or malformed custom code
/// - 409 Conflict - custom code already live
/// - 503 Service Unavailable - store unreachable or retry ceiling exceeded
pub async fn shorten_handler(
    State(state): State<AppState>,
    Json(payload): Json<ShortenRequest>,
) -> Result<Json<ShortenResponse>, AppError> {
    payload.validate()?;

    let mapping = state
        .url_service
        .shorten(&payload.url, payload.expires_at, payload.custom_code)
        .await?;

    let short_url = state.short_url(&mapping.code);

    Ok(Json(ShortenResponse {
        short_url,
        code: mapping.code,
        long_url: mapping.original_url,
        expires_at: mapping.expires_at,
    }))
}
