#![allow(dead_code)]

use std::sync::Arc;

use chrono::{DateTime, Utc};
use shortlink::domain::entities::Mapping;
use shortlink::domain::repositories::UrlRepository;
use shortlink::infrastructure::persistence::MemoryUrlRepository;
use shortlink::state::AppState;

pub const TEST_BASE_URL: &str = "http://localhost:3000";

pub fn create_test_state() -> (AppState, Arc<MemoryUrlRepository>) {
    let store = Arc::new(MemoryUrlRepository::new());
    let state = AppState::new(store.clone(), TEST_BASE_URL.to_string(), 30, 256);
    (state, store)
}

pub async fn seed_mapping(
    store: &MemoryUrlRepository,
    code: &str,
    url: &str,
    expires_at: DateTime<Utc>,
) {
    let stored = store
        .put_if_absent(Mapping::new(code.to_string(), url.to_string(), expires_at))
        .await
        .unwrap();
    assert!(stored, "seed mapping for {} collided", code);
}
