//! cmdcast server entry point.
//!
//! Starts the Axum HTTP server with the viewer page, command endpoints and
//! the WebSocket feed.

use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use cmdcast::config::{CmdcastConfig, LogFormat};
use cmdcast::server::{build_app, build_state, shutdown_signal};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    let config = CmdcastConfig::from_env().context("invalid HOST")?;

    // Initialize tracing
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    match config.log_format {
        LogFormat::Json => tracing_subscriber::fmt().json().with_env_filter(filter).init(),
        LogFormat::Text => tracing_subscriber::fmt().with_env_filter(filter).init(),
    }

    tracing::info!(addr = %config.listen_addr, "starting cmdcast");

    // Build hub, relay and lookup
    let state = build_state(&config).await;
    let hub = Arc::clone(&state.hub);

    // Start server
    let listener = tokio::net::TcpListener::bind(config.listen_addr)
        .await
        .with_context(|| format!("binding to {}", config.listen_addr))?;
    tracing::info!(addr = %config.listen_addr, "server listening");

    axum::serve(listener, build_app(state))
        .with_graceful_shutdown(shutdown_signal(hub))
        .await
        .context("running server")?;

    Ok(())
}
