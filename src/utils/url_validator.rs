//! Target URL validation.
//!
//! A URL is accepted iff, after trimming surrounding whitespace, it starts
//! with `http://` or `https://`. No deeper parsing is performed: the service
//! redirects to the stored string verbatim, and stricter canonicalization
//! would change which inputs map to which codes.

use regex::Regex;
use std::sync::LazyLock;

/// Compiled scheme check, anchored at the start of the trimmed input.
static SCHEME_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new("^(http|https)://").unwrap());

/// Errors that can occur while validating a target URL.
#[derive(Debug, thiserror::Error)]
pub enum UrlValidationError {
    #[error("URL must not be empty")]
    Empty,

    #[error("URL must start with http:// or https://")]
    MissingScheme,
}

/// Validates a target URL and returns its trimmed form.
///
/// # Errors
///
/// Returns [`UrlValidationError::Empty`] for blank input and
/// [`UrlValidationError::MissingScheme`] for any other scheme
/// (`ftp://`, `javascript:`, scheme-less hosts, ...).
pub fn validate_target_url(input: &str) -> Result<String, UrlValidationError> {
    let trimmed = input.trim();

    if trimmed.is_empty() {
        return Err(UrlValidationError::Empty);
    }

    if !SCHEME_REGEX.is_match(trimmed) {
        return Err(UrlValidationError::MissingScheme);
    }

    Ok(trimmed.to_string())
}
