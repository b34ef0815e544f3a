//! Deterministic short code derivation and custom code validation.
//!
//! Codes are derived from a SHA-256 digest of the seed text concatenated with
//! a decimal sequence number. The first 10 digest bytes are interpreted as a
//! big unsigned integer and rendered in base 62, most-significant digit first,
//! left-padded with `'0'` to exactly [`CODE_LENGTH`] characters and truncated
//! to the [`CODE_LENGTH`] most-significant digits when longer.
//!
//! The truncation is lossy but deterministic. Changing it would change the
//! codes produced for already-shortened URLs, so the encoding must stay
//! byte-for-byte stable (see the golden vector tests below).

use crate::error::AppError;
use serde_json::json;
use sha2::{Digest, Sha256};

/// Base-62 alphabet: digits first, then uppercase, then lowercase.
pub const BASE62_ALPHABET: &[u8; 62] =
    b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";

/// Length of every generated short code.
pub const CODE_LENGTH: usize = 8;

/// Number of digest bytes fed into the base-62 conversion.
const DIGEST_PREFIX_BYTES: usize = 10;

/// Reserved codes that cannot be used as custom short codes.
///
/// These collide with service routes and would shadow them on redirect.
const RESERVED_CODES: &[&str] = &["api", "health"];

/// Derives the short code for `(seed_text, sequence)`.
///
/// Deterministic and side-effect free: the same pair always yields the same
/// 8-character code. Collisions between distinct inputs are possible (both
/// from the hash itself and from truncation) and are handled by the caller's
/// retry loop, not here.
pub fn generate_code(seed_text: &str, sequence: u32) -> String {
    let mut hasher = Sha256::new();
    hasher.update(seed_text.as_bytes());
    hasher.update(sequence.to_string().as_bytes());
    let digest = hasher.finalize();

    encode_base62(&digest[..DIGEST_PREFIX_BYTES])
}

/// Encodes a byte prefix as a fixed-length base-62 string.
///
/// The prefix is at most 10 bytes (80 bits), so the value fits in a `u128`.
/// Digits are extracted least-significant first and the buffer is padded with
/// `'0'` before reversal, which left-pads short encodings; longer encodings
/// are truncated to their most-significant digits.
fn encode_base62(prefix: &[u8]) -> String {
    debug_assert!(prefix.len() <= 16);

    let mut number: u128 = 0;
    for &byte in prefix {
        number = (number << 8) | u128::from(byte);
    }

    // An all-zero prefix yields no digits here; padding fills the code.
    let mut digits = Vec::with_capacity(14);
    while number != 0 {
        digits.push(BASE62_ALPHABET[(number % 62) as usize]);
        number /= 62;
    }

    while digits.len() < CODE_LENGTH {
        digits.push(b'0');
    }

    digits.reverse();
    digits.truncate(CODE_LENGTH);

    // Alphabet bytes are ASCII.
    String::from_utf8(digits).expect("base62 digits are ASCII")
}

/// Validates a caller-supplied custom short code.
///
/// # Rules
///
/// - Length: 4-32 characters
/// - Allowed characters: ASCII letters, digits, hyphens, underscores
/// - Cannot be a reserved route name
///
/// # Errors
///
/// Returns [`AppError::Validation`] if any rule is violated.
pub fn validate_custom_code(code: &str) -> Result<(), AppError> {
    if code.len() < 4 || code.len() > 32 {
        return Err(AppError::bad_request(
            "Custom code must be 4-32 characters",
            json!({ "provided_length": code.len() }),
        ));
    }

    if !code
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return Err(AppError::bad_request(
            "Custom code can only contain letters, digits, hyphens, and underscores",
            json!({ "code": code }),
        ));
    }

    if RESERVED_CODES.contains(&code) {
        return Err(AppError::bad_request(
            "This code is reserved",
            json!({ "code": code }),
        ));
    }

    Ok(())
}
