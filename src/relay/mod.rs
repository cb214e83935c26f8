//! Optional forwarding of published commands to an external pub/sub bus.
//!
//! The hub holds at most one [`CommandRelay`] and calls
//! [`CommandRelay::forward`] once per publish. The hub bounds every call
//! with a timeout and only logs failures, so a relay can never block or
//! fail a publish.

pub mod pubsub;

use async_trait::async_trait;

pub use pubsub::RedisRelay;

/// Failure reported by a relay implementation.
#[derive(Debug, thiserror::Error)]
pub enum RelayError {
    /// The Redis command failed or the connection is down.
    #[error("redis relay error: {0}")]
    Redis(#[from] redis::RedisError),
}

/// A best-effort sink receiving a copy of every published command.
#[async_trait]
pub trait CommandRelay: Send + Sync + std::fmt::Debug {
    /// Short backend name used in log lines (e.g. `"redis"`).
    fn name(&self) -> &'static str;

    /// Makes a single, non-retrying attempt to deliver `value`.
    ///
    /// # Errors
    ///
    /// Returns a [`RelayError`] if the backend rejected the value or was
    /// unreachable. Callers log and discard it.
    async fn forward(&self, value: &str) -> Result<(), RelayError>;
}
