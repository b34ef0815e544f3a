//! Shared application state injected into all handlers.

use std::sync::Arc;

use crate::application::services::UrlService;
use crate::domain::repositories::UrlRepository;

/// Application state shared across requests.
///
/// Handlers hold no state of their own; everything mutable lives behind the
/// repository inside the service.
#[derive(Clone)]
pub struct AppState {
    pub url_service: Arc<UrlService>,
    pub store: Arc<dyn UrlRepository>,
    /// External base used to render full short URLs in responses.
    pub base_url: String,
}

impl AppState {
    /// Builds the state from a store, wiring the service on top of it.
    pub fn new(
        store: Arc<dyn UrlRepository>,
        base_url: String,
        default_expiry_days: i64,
        max_code_attempts: u32,
    ) -> Self {
        let url_service = Arc::new(UrlService::with_limits(
            store.clone(),
            default_expiry_days,
            max_code_attempts,
        ));
        Self {
            url_service,
            store,
            base_url,
        }
    }

    /// Renders the public short URL for a code.
    pub fn short_url(&self, code: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), code)
    }
}
