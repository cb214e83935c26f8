//! A single subscriber and its bounded delivery queue.
//!
//! The hub never writes to a socket directly. Each [`Subscriber`] holds the
//! sending half of a bounded `mpsc` queue whose receiving half is drained by
//! the connection's write loop, so a send fails exactly when that loop is
//! gone or has stopped draining.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::sync::mpsc::error::SendTimeoutError;

use super::SubscriberId;

/// Reason a single delivery attempt failed.
///
/// Every variant is treated the same way by the hub: the subscriber is
/// pruned. The distinction only shows up in logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum DeliveryError {
    /// The connection side of the queue has been dropped.
    #[error("subscriber queue closed")]
    Closed,

    /// The queue stayed full for the whole delivery timeout.
    #[error("subscriber queue full past delivery timeout")]
    TimedOut,
}

/// Registry entry for one live connection.
///
/// Cloning is cheap: it clones the queue sender, not the connection.
#[derive(Debug, Clone)]
pub struct Subscriber {
    id: SubscriberId,
    sender: mpsc::Sender<String>,
}

impl Subscriber {
    /// Wraps an existing queue sender under the given identity.
    #[must_use]
    pub fn new(id: SubscriberId, sender: mpsc::Sender<String>) -> Self {
        Self { id, sender }
    }

    /// Returns this subscriber's identity.
    #[must_use]
    pub const fn id(&self) -> SubscriberId {
        self.id
    }

    /// Enqueues `value` for this subscriber, waiting at most `timeout` for
    /// queue capacity.
    ///
    /// # Errors
    ///
    /// Returns [`DeliveryError::Closed`] if the connection has gone away and
    /// [`DeliveryError::TimedOut`] if the queue stayed full.
    pub async fn send(&self, value: String, timeout: Duration) -> Result<(), DeliveryError> {
        self.sender
            .send_timeout(value, timeout)
            .await
            .map_err(|err| match err {
                SendTimeoutError::Closed(_) => DeliveryError::Closed,
                SendTimeoutError::Timeout(_) => DeliveryError::TimedOut,
            })
    }
}
