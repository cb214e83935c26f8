//! Redis pub/sub relay.

use async_trait::async_trait;
use redis::AsyncCommands;
use redis::aio::ConnectionManager;

use super::{CommandRelay, RelayError};

/// Publishes every command on a fixed Redis channel.
///
/// `ConnectionManager` multiplexes a single connection and is cheap to
/// clone, so each forward clones it to get a mutable handle.
#[derive(Clone)]
pub struct RedisRelay {
    conn: ConnectionManager,
    channel: String,
}

impl RedisRelay {
    /// Creates a relay publishing on `channel` through `conn`.
    #[must_use]
    pub fn new(conn: ConnectionManager, channel: impl Into<String>) -> Self {
        Self {
            conn,
            channel: channel.into(),
        }
    }

    /// Returns the channel name values are published on.
    #[must_use]
    pub fn channel(&self) -> &str {
        &self.channel
    }
}

impl std::fmt::Debug for RedisRelay {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisRelay")
            .field("channel", &self.channel)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl CommandRelay for RedisRelay {
    fn name(&self) -> &'static str {
        "redis"
    }

    async fn forward(&self, value: &str) -> Result<(), RelayError> {
        let mut conn = self.conn.clone();
        let receivers: i64 = conn.publish(&self.channel, value).await?;
        tracing::debug!(channel = %self.channel, receivers, "command relayed");
        Ok(())
    }
}
