//! DTOs for service observability endpoints.

use serde::Serialize;
use utoipa::ToSchema;

/// Response body for `GET /status`.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct StatusResponse {
    /// Number of live viewer connections.
    pub subscribers: usize,
    /// The most recently published command.
    pub current_command: String,
    /// Whether published commands are also relayed to Redis.
    pub relay_enabled: bool,
}

/// Response body for `GET /health`.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct HealthResponse {
    /// Always `"healthy"`.
    pub status: String,
    /// RFC 3339 server time.
    pub timestamp: String,
    /// Crate version.
    pub version: String,
}
