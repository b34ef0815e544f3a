//! Utility functions for code derivation and URL validation.
//!
//! - [`code_generator`] - Deterministic short code derivation and custom code validation
//! - [`url_validator`] - Target URL scheme checks

pub mod code_generator;
pub mod url_validator;
