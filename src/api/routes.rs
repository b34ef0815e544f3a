//! API route configuration.

use crate::api::handlers::{list_links_handler, shorten_handler};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

/// API routes mounted under `/api`.
///
/// # Endpoints
///
/// - `POST /shorten` - Create a short code for a URL
/// - `GET  /links`   - List all live mappings
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/shorten", post(shorten_handler))
        .route("/links", get(list_links_handler))
}
