//! DTOs for reading and publishing the current command.

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

/// Query parameters for `POST /command`.
#[derive(Debug, Clone, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PublishParams {
    /// Command text to publish. May be empty but must be present.
    pub command: Option<String>,
}

/// Response body for `POST /command`.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PublishResponse {
    /// Always `"success"` once the value is stored and a sweep ran.
    pub status: String,
    /// Number of viewers the command was delivered to.
    pub delivered: usize,
}

/// Response body for `GET /command`.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CommandResponse {
    /// The most recently published command.
    pub command: String,
}
