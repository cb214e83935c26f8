//! System endpoints: health check and hub status.

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use chrono::Utc;

use crate::api::dto::{HealthResponse, StatusResponse};
use crate::app_state::AppState;

/// `GET /health` — Service health status.
#[utoipa::path(
    get,
    path = "/health",
    tag = "System",
    summary = "Health check",
    description = "Returns service health status, version, and current timestamp.",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse),
    )
)]
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        timestamp: Utc::now().to_rfc3339(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// `GET /status` — Viewer count and current command.
#[utoipa::path(
    get,
    path = "/status",
    tag = "System",
    summary = "Hub status",
    description = "Read-only snapshot of the number of connected viewers, the current command, and whether the Redis relay is active.",
    responses(
        (status = 200, description = "Hub status", body = StatusResponse),
    )
)]
pub async fn status_handler(State(state): State<AppState>) -> Json<StatusResponse> {
    Json(StatusResponse {
        subscribers: state.hub.subscriber_count(),
        current_command: state.hub.current_value().await,
        relay_enabled: state.hub.relay_enabled(),
    })
}

/// System routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health_handler))
        .route("/status", get(status_handler))
}
