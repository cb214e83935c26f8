//! Router assembly and process-level wiring.
//!
//! [`build_app`] is shared by `main` and the integration tests;
//! [`build_state`] turns a [`CmdcastConfig`] into a running hub, attaching
//! the Redis relay and terminal URL lookup only when Redis answers.

use std::sync::Arc;

use axum::Router;
use axum::routing::get;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::api;
use crate::app_state::AppState;
use crate::config::CmdcastConfig;
use crate::domain::BroadcastHub;
use crate::relay::RedisRelay;
use crate::store::{self, RedisTerminalUrls};
use crate::ws::handler::ws_handler;

/// Builds the complete application router.
pub fn build_app(state: AppState) -> Router {
    Router::new()
        .merge(api::build_router())
        .route("/ws", get(ws_handler))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Builds the hub and its optional collaborators from configuration.
///
/// A Redis outage at startup is not an error: the service logs it and
/// runs local-only for the rest of its life.
pub async fn build_state(config: &CmdcastConfig) -> AppState {
    let hub = BroadcastHub::new(config.hub);

    let Some(redis) = &config.redis else {
        tracing::info!("redis disabled; broadcasting locally only");
        return AppState::new(Arc::new(hub));
    };

    match store::connect(redis).await {
        Ok(conn) => {
            let relay = RedisRelay::new(conn.clone(), config.relay_channel.clone());
            tracing::info!(channel = relay.channel(), "redis relay enabled");
            let lookup = RedisTerminalUrls::new(
                conn,
                config.tmate_urls_key.clone(),
                redis.command_timeout,
            );
            AppState::new(Arc::new(hub.with_relay(Arc::new(relay))))
                .with_terminal_urls(Arc::new(lookup))
        }
        Err(err) => {
            tracing::warn!(error = %err, url = %redis.url(), "redis unavailable; broadcasting locally only");
            AppState::new(Arc::new(hub))
        }
    }
}

/// Resolves on Ctrl+C or SIGTERM, then releases every subscriber so open
/// WebSocket connections close and graceful shutdown can finish.
pub async fn shutdown_signal(hub: Arc<BroadcastHub>) {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %err, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("shutdown signal received");
    hub.shutdown();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn redis_disabled_builds_local_only_state() {
        let config = CmdcastConfig {
            redis: None,
            ..CmdcastConfig::default()
        };
        let state = build_state(&config).await;
        assert!(!state.hub.relay_enabled());
        assert!(state.terminal_urls.is_none());
    }

    #[tokio::test]
    async fn unreachable_redis_degrades_to_local_only() {
        let config = CmdcastConfig {
            redis: Some(crate::config::RedisSettings {
                host: "127.0.0.1".to_string(),
                port: 1,
                db: 0,
                connect_timeout: std::time::Duration::from_millis(200),
                command_timeout: std::time::Duration::from_millis(200),
            }),
            ..CmdcastConfig::default()
        };
        let state = build_state(&config).await;
        assert!(!state.hub.relay_enabled());
        assert!(state.terminal_urls.is_none());

        let outcome = state.hub.publish("date").await;
        assert_eq!(outcome.delivered, 0);
        assert_eq!(state.hub.current_value().await, "date");
    }
}
