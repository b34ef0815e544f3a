//! HTTP server initialization and runtime setup.
//!
//! Handles the backing store connection, router assembly, and Axum server
//! lifecycle.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use axum::ServiceExt;
use axum::extract::Request;

use crate::config::Config;
use crate::infrastructure::persistence::RedisUrlRepository;
use crate::routes::app_router;
use crate::state::AppState;

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - Redis connection (validated with a PING; the store is the system of
///   record, so a failed connection is fatal rather than degraded)
/// - Application state and router
/// - Axum HTTP server with graceful shutdown on ctrl-c
///
/// # Errors
///
/// Returns an error if the store connection, server bind, or server runtime
/// fails.
pub async fn run(config: Config) -> Result<()> {
    let store = RedisUrlRepository::connect(
        &config.redis_url,
        Duration::from_millis(config.store_timeout_ms),
    )
    .await
    .map_err(|e| anyhow::anyhow!("store connection failed: {}", e))?;

    let state = AppState::new(
        Arc::new(store),
        config.base_url.clone(),
        config.default_expiry_days,
        config.max_code_attempts,
    );

    let app = app_router(state);

    let addr: SocketAddr = config.listen_addr.parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(
        listener,
        ServiceExt::<Request>::into_make_service(app),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    Ok(())
}

/// Resolves when the process receives ctrl-c.
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to install ctrl-c handler: {}", e);
        return;
    }
    tracing::info!("Shutdown signal received");
}
