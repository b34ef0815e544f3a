//! DTOs for the mapping list endpoint.

use crate::domain::entities::Mapping;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Wire representation of a single live mapping.
#[derive(Debug, Serialize)]
pub struct MappingDto {
    pub code: String,
    pub long_url: String,
    pub expires_at: DateTime<Utc>,
}

impl From<Mapping> for MappingDto {
    fn from(mapping: Mapping) -> Self {
        Self {
            code: mapping.code,
            long_url: mapping.original_url,
            expires_at: mapping.expires_at,
        }
    }
}

/// Response containing the point-in-time snapshot of live mappings.
#[derive(Debug, Serialize)]
pub struct ListMappingsResponse {
    pub total: usize,
    pub mappings: Vec<MappingDto>,
}
