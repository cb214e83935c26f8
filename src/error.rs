//! Service error types with HTTP status code mapping.
//!
//! [`CmdcastError`] is the error type of the HTTP surface. The hub itself
//! never returns one: delivery and relay failures are absorbed inside
//! [`crate::domain::BroadcastHub::publish`].

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use utoipa::ToSchema;

use crate::store::StoreError;

/// Structured JSON error response body.
///
/// All error responses follow this shape:
/// ```json
/// {
///   "error": {
///     "code": 1001,
///     "message": "missing query parameter: command"
///   }
/// }
/// ```
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Structured error payload.
    pub error: ErrorBody,
}

/// Inner error body with numeric code and human-readable message.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
    /// Numeric error code.
    pub code: u32,
    /// Human-readable error message.
    pub message: String,
}

/// Server-side error enum with HTTP status code mapping.
///
/// # Error Code Ranges
///
/// | Range     | Category        | HTTP Status               |
/// |-----------|-----------------|---------------------------|
/// | 1000–1999 | Validation      | 400 Bad Request           |
/// | 2000–2999 | Not Found       | 404 Not Found             |
/// | 3000–3999 | Upstream        | 503 Service Unavailable   |
#[derive(Debug, thiserror::Error)]
pub enum CmdcastError {
    /// A required query parameter was absent.
    #[error("missing query parameter: {0}")]
    MissingParameter(&'static str),

    /// No valid terminal URL record exists, or no store is configured.
    #[error("tmate urls not available: {0}")]
    TerminalUrlsUnavailable(String),

    /// The external store failed while serving a lookup.
    #[error("store unavailable: {0}")]
    StoreUnavailable(String),
}

impl CmdcastError {
    /// Returns the numeric error code for this variant.
    #[must_use]
    pub const fn error_code(&self) -> u32 {
        match self {
            Self::MissingParameter(_) => 1001,
            Self::TerminalUrlsUnavailable(_) => 2001,
            Self::StoreUnavailable(_) => 3001,
        }
    }

    /// Returns the HTTP status code for this variant.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::MissingParameter(_) => StatusCode::BAD_REQUEST,
            Self::TerminalUrlsUnavailable(_) => StatusCode::NOT_FOUND,
            Self::StoreUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        }
    }
}

impl From<StoreError> for CmdcastError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotAvailable(reason) => Self::TerminalUrlsUnavailable(reason),
            other => Self::StoreUnavailable(other.to_string()),
        }
    }
}

impl IntoResponse for CmdcastError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }
        let body = ErrorResponse {
            error: ErrorBody {
                code: self.error_code(),
                message: self.to_string(),
            },
        };
        let mut response = axum::Json(body).into_response();
        *response.status_mut() = status;
        response
    }
}
