//! HTTP server initialization and runtime setup.
//!
//! Handles link store selection, state assembly, and Axum server lifecycle.

use crate::api::middleware::rate_limit::CreationRateLimiter;
use crate::application::services::LinkService;
use crate::config::Config;
use crate::domain::repositories::LinkStore;
use crate::infrastructure::qr::QrCodeGenerator;
use crate::infrastructure::store::{MemoryLinkStore, RedisLinkStore};
use crate::routes::app_router;
use crate::state::AppState;

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::signal;

/// Selects the link store from configuration.
///
/// Redis when a URL is configured, the in-memory store otherwise.
///
/// # Errors
///
/// Returns an error if Redis is configured but unreachable after the
/// configured number of retries. Falling back to memory here would silently
/// drop every link on restart.
pub async fn build_link_store(config: &Config) -> Result<Arc<dyn LinkStore>> {
    match &config.redis_url {
        Some(redis_url) => {
            let store = RedisLinkStore::connect(redis_url, config.redis_connect_retries)
                .await
                .context("Failed to connect to Redis")?;
            tracing::info!("Link store: Redis");
            Ok(Arc::new(store))
        }
        None => {
            tracing::warn!("REDIS_URL not set, links are kept in memory and lost on restart");
            Ok(Arc::new(MemoryLinkStore::new()))
        }
    }
}

/// Assembles the shared application state.
pub fn build_state(config: &Config, store: Arc<dyn LinkStore>) -> AppState {
    let link_service = LinkService::new(store, config.base_url.clone())
        .with_max_code_attempts(config.code_max_attempts);

    let rate_limiter = CreationRateLimiter::new(
        Duration::from_secs(config.rate_limit_window_seconds),
        config.rate_limit_max_clients,
    );

    AppState::new(
        Arc::new(link_service),
        Arc::new(QrCodeGenerator::new(config.qr_code_size)),
        Arc::new(rate_limiter),
        config.behind_proxy,
    )
}

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - Link store (Redis or in-memory)
/// - Link service, QR generator and rate limiter
/// - Axum HTTP server with graceful shutdown
///
/// # Errors
///
/// Returns an error if:
/// - Redis is configured and the connection fails
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let store = build_link_store(&config).await?;
    let state = build_state(&config, store);

    let app = app_router(state);

    let addr: SocketAddr = config.listen_addr.parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(
        listener,
        ServiceExt::<Request>::into_make_service_with_connect_info::<SocketAddr>(app),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    tracing::info!("Server stopped");
    Ok(())
}

/// Resolves on Ctrl-C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => tracing::error!("Failed to install SIGTERM handler: {}", e),
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!("Received SIGINT, shutting down"),
        _ = terminate => tracing::info!("Received SIGTERM, shutting down"),
    }
}
