//! Handler for the mapping list endpoint.

use axum::{Json, extract::State};

use crate::api::dto::mapping::{ListMappingsResponse, MappingDto};
use crate::error::AppError;
use crate::state::AppState;

/// Lists every currently live mapping.
///
/// # Endpoint
///
/// `GET /api/links`
///
/// The result is a point-in-time snapshot: ordering is unspecified and
/// entries expiring during enumeration may or may not appear.
pub async fn list_links_handler(
    State(state): State<AppState>,
) -> Result<Json<ListMappingsResponse>, AppError> {
    let mappings: Vec<MappingDto> = state
        .url_service
        .list_mappings()
        .await?
        .into_iter()
        .map(MappingDto::from)
        .collect();

    Ok(Json(ListMappingsResponse {
        total: mappings.len(),
        mappings,
    }))
}
