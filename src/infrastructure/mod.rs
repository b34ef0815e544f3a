//! Infrastructure layer for external integrations.
//!
//! Implements the store contracts defined by the domain layer.
//!
//! - [`persistence`] - Redis and in-memory mapping stores

pub mod persistence;
