//! External key/value store: Redis connection setup and typed lookups.
//!
//! The store is optional. [`connect`] is attempted once at startup; if it
//! fails the service runs without a relay and without terminal URL lookups.

pub mod terminal_urls;

use std::future::Future;
use std::time::Duration;

use redis::aio::ConnectionManager;

use crate::config::RedisSettings;

pub use terminal_urls::{RedisTerminalUrls, TerminalUrlSource, TerminalUrls};

/// Store error types.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The record is missing or does not match its schema.
    #[error("record not available: {0}")]
    NotAvailable(String),

    /// The Redis command or connection failed.
    #[error("redis error: {0}")]
    Redis(#[from] redis::RedisError),

    /// The initial connection did not complete in time.
    #[error("redis connection timed out after {0} ms")]
    ConnectTimeout(u128),

    /// A command on an established connection did not answer in time.
    #[error("redis command timed out after {0} ms")]
    Timeout(u128),
}

/// Opens a multiplexed Redis connection.
///
/// `ConnectionManager` is `Clone`; callers clone it per operation.
///
/// # Errors
///
/// Returns [`StoreError::Redis`] if the URL is invalid or the server
/// refuses the connection, and [`StoreError::ConnectTimeout`] if it does
/// not answer within the configured connect timeout.
pub async fn connect(settings: &RedisSettings) -> Result<ConnectionManager, StoreError> {
    let client = redis::Client::open(settings.url())?;
    let manager = tokio::time::timeout(settings.connect_timeout, ConnectionManager::new(client))
        .await
        .map_err(|_| StoreError::ConnectTimeout(settings.connect_timeout.as_millis()))??;
    tracing::info!(url = %settings.url(), "connected to redis");
    Ok(manager)
}

/// Runs one Redis command, giving up after `timeout`.
///
/// Keeps a half-open server from stalling the caller.
///
/// # Errors
///
/// Returns [`StoreError::Timeout`] if `command` does not finish in time and
/// [`StoreError::Redis`] if it fails.
pub async fn bounded<T, F>(timeout: Duration, command: F) -> Result<T, StoreError>
where
    F: Future<Output = redis::RedisResult<T>>,
{
    tokio::time::timeout(timeout, command)
        .await
        .map_err(|_| StoreError::Timeout(timeout.as_millis()))?
        .map_err(StoreError::from)
}
