//! API server setup

use std::net::SocketAddr;

use anyhow::{Context, Result};
use axum::Router;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;

use crate::api::router::create_router;
use crate::api::state::AppState;
use crate::config::ServerConfig;
use crate::registry::ReceiptRegistry;

/// Router with a fresh registry, configured from `config`
pub fn build_app(config: &ServerConfig) -> Router {
    let state = AppState::new(ReceiptRegistry::new(), config.rate_limit());
    let router = create_router(state);

    if config.cors {
        router.layer(CorsLayer::permissive())
    } else {
        router
    }
}

/// Bind and serve until Ctrl+C
pub async fn run_server(config: ServerConfig) -> Result<()> {
    let addr = config.socket_addr()?;
    let app = build_app(&config);

    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;

    tracing::info!(
        %addr,
        rate_limit_max = config.rate_limit_max,
        rate_limit_window_secs = config.rate_limit_window_secs,
        "receipt server listening"
    );

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await
    .context("Server error")?;

    tracing::info!("receipt server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
