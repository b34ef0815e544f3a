//! Application error taxonomy and HTTP response mapping.
//!
//! Every error carries a machine-readable wire code, a human-readable message,
//! and a JSON details object. Handlers return [`AppError`] directly; the
//! [`IntoResponse`] impl maps each variant to its status code.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::{Value, json};

#[derive(Serialize)]
struct ErrorBody {
    error: ErrorInfo,
}

/// Wire representation of an error, embedded in the response body.
#[derive(Debug, Serialize)]
pub struct ErrorInfo {
    pub code: &'static str,
    pub message: String,
    pub details: Value,
}

/// Application-level error taxonomy.
///
/// # Variants
///
/// - `Validation` - malformed or missing input (400)
/// - `NotFound` - absent or expired short code (404)
/// - `Conflict` - custom code already live (409)
/// - `ExpiryInPast` - mapping expiry not strictly in the future (400);
///   defended against at the store boundary even though expiry resolution
///   should never produce one
/// - `ExhaustedRetries` - collision retry loop exceeded its bound (503)
/// - `Unavailable` - backing store transport failure or timeout (503)
/// - `Internal` - unexpected failure (500)
#[derive(Debug)]
pub enum AppError {
    Validation { message: String, details: Value },
    NotFound { message: String, details: Value },
    Conflict { message: String, details: Value },
    ExpiryInPast { message: String, details: Value },
    ExhaustedRetries { message: String, details: Value },
    Unavailable { message: String, details: Value },
    Internal { message: String, details: Value },
}

impl AppError {
    pub fn bad_request(message: impl Into<String>, details: Value) -> Self {
        Self::Validation {
            message: message.into(),
            details,
        }
    }
    pub fn not_found(message: impl Into<String>, details: Value) -> Self {
        Self::NotFound {
            message: message.into(),
            details,
        }
    }
    pub fn conflict(message: impl Into<String>, details: Value) -> Self {
        Self::Conflict {
            message: message.into(),
            details,
        }
    }
    pub fn expiry_in_past(message: impl Into<String>, details: Value) -> Self {
        Self::ExpiryInPast {
            message: message.into(),
            details,
        }
    }
    pub fn exhausted_retries(message: impl Into<String>, details: Value) -> Self {
        Self::ExhaustedRetries {
            message: message.into(),
            details,
        }
    }
    pub fn unavailable(message: impl Into<String>, details: Value) -> Self {
        Self::Unavailable {
            message: message.into(),
            details,
        }
    }
    pub fn internal(message: impl Into<String>, details: Value) -> Self {
        Self::Internal {
            message: message.into(),
            details,
        }
    }

    /// Status code and wire code for this error.
    fn parts(&self) -> (StatusCode, &'static str) {
        match self {
            AppError::Validation { .. } => (StatusCode::BAD_REQUEST, "validation_error"),
            AppError::NotFound { .. } => (StatusCode::NOT_FOUND, "not_found"),
            AppError::Conflict { .. } => (StatusCode::CONFLICT, "conflict"),
            AppError::ExpiryInPast { .. } => (StatusCode::BAD_REQUEST, "expiry_in_past"),
            AppError::ExhaustedRetries { .. } => {
                (StatusCode::SERVICE_UNAVAILABLE, "exhausted_retries")
            }
            AppError::Unavailable { .. } => (StatusCode::SERVICE_UNAVAILABLE, "store_unavailable"),
            AppError::Internal { .. } => (StatusCode::INTERNAL_SERVER_ERROR, "internal_error"),
        }
    }

    /// Converts the error into its wire representation, consuming it.
    pub fn to_error_info(self) -> ErrorInfo {
        let (_, code) = self.parts();
        let (message, details) = match self {
            AppError::Validation { message, details }
            | AppError::NotFound { message, details }
            | AppError::Conflict { message, details }
            | AppError::ExpiryInPast { message, details }
            | AppError::ExhaustedRetries { message, details }
            | AppError::Unavailable { message, details }
            | AppError::Internal { message, details } => (message, details),
        };
        ErrorInfo {
            code,
            message,
            details,
        }
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let (_, code) = self.parts();
        let message = match self {
            AppError::Validation { message, .. }
            | AppError::NotFound { message, .. }
            | AppError::Conflict { message, .. }
            | AppError::ExpiryInPast { message, .. }
            | AppError::ExhaustedRetries { message, .. }
            | AppError::Unavailable { message, .. }
            | AppError::Internal { message, .. } => message,
        };
        write!(f, "{}: {}", code, message)
    }
}

impl std::error::Error for AppError {}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        AppError::bad_request(
            "Request validation failed",
            serde_json::to_value(&errors).unwrap_or_else(|_| json!({})),
        )
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, _) = self.parts();
        let body = ErrorBody {
            error: self.to_error_info(),
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (
                AppError::bad_request("bad", json!({})).into_response(),
                StatusCode::BAD_REQUEST,
            ),
            (
                AppError::not_found("missing", json!({})).into_response(),
                StatusCode::NOT_FOUND,
            ),
            (
                AppError::conflict("taken", json!({})).into_response(),
                StatusCode::CONFLICT,
            ),
            (
                AppError::expiry_in_past("past", json!({})).into_response(),
                StatusCode::BAD_REQUEST,
            ),
            (
                AppError::exhausted_retries("worn out", json!({})).into_response(),
                StatusCode::SERVICE_UNAVAILABLE,
            ),
            (
                AppError::unavailable("down", json!({})).into_response(),
                StatusCode::SERVICE_UNAVAILABLE,
            ),
            (
                AppError::internal("boom", json!({})).into_response(),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (response, expected) in cases {
            assert_eq!(response.status(), expected);
        }
    }

    #[test]
    fn test_error_info_wire_codes() {
        let info = AppError::conflict("taken", json!({ "code": "mycode" })).to_error_info();
        assert_eq!(info.code, "conflict");
        assert_eq!(info.message, "taken");
        assert_eq!(info.details["code"], "mycode");

        let info = AppError::unavailable("down", json!({})).to_error_info();
        assert_eq!(info.code, "store_unavailable");
    }

    #[test]
    fn test_display_includes_wire_code() {
        let err = AppError::not_found("No mapping for code", json!({}));
        let rendered = err.to_string();
        assert!(rendered.contains("not_found"));
        assert!(rendered.contains("No mapping for code"));
    }
}
