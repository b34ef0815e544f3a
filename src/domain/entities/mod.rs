//! Core domain entities representing the business data model.
//!
//! The service persists a single entity: the short code to URL [`Mapping`].
//! Entities are plain data structures without business logic.

pub mod mapping;

pub use mapping::Mapping;
