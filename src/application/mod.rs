//! Application layer services implementing business logic.
//!
//! This layer orchestrates domain operations by coordinating repository
//! calls, validation, and expiry resolution. Services consume repository
//! traits and provide a clean API for HTTP handlers.
//!
//! - [`services::url_service::UrlService`] - Short code assignment and resolution

pub mod services;
