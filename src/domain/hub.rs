//! Broadcast hub: current command state plus subscriber fan-out.
//!
//! [`BroadcastHub`] owns the single current command value and the
//! [`ConnectionRegistry`]. A publish follows snapshot-then-prune:
//!
//! 1. store the new value,
//! 2. copy the registry,
//! 3. attempt a bounded send to every copied subscriber concurrently,
//! 4. remove every subscriber whose send failed,
//! 5. hand the value to the relay, if one is installed.
//!
//! Publishes are serialized by an internal gate, which is what gives each
//! subscriber its values in publish order. Registry mutation never waits on
//! that gate.
//!
//! Each publish runs as its own task. Dropping the caller's future (a client
//! hanging up mid-request) does not cut a sweep short: the value is still
//! delivered, failed subscribers are still pruned, and the relay still sees
//! it.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use futures_util::future::join_all;
use tokio::sync::{Mutex, RwLock, mpsc};

use super::{ConnectionRegistry, Subscriber, SubscriberId};
use crate::relay::CommandRelay;

/// Tunables for delivery and relay behavior.
#[derive(Debug, Clone, Copy)]
pub struct HubSettings {
    /// Longest a single subscriber send may wait for queue capacity.
    pub delivery_timeout: Duration,
    /// Longest a single relay forward may take.
    pub relay_timeout: Duration,
    /// Capacity of each subscriber's delivery queue (minimum 1).
    pub subscriber_buffer: usize,
}

impl Default for HubSettings {
    fn default() -> Self {
        Self {
            delivery_timeout: Duration::from_millis(1_000),
            relay_timeout: Duration::from_millis(500),
            subscriber_buffer: 64,
        }
    }
}

/// Result of one publish sweep.
///
/// A publish never fails; this only reports how the sweep went.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PublishOutcome {
    /// Subscribers the value was enqueued for.
    pub delivered: usize,
    /// Subscribers whose send failed and that were pruned.
    pub failed: usize,
}

/// Holds the current command and fans every update out to subscribers.
///
/// Constructed once at startup and shared behind an `Arc`.
#[derive(Debug)]
pub struct BroadcastHub {
    current: Arc<RwLock<String>>,
    registry: Arc<ConnectionRegistry>,
    publish_gate: Arc<Mutex<()>>,
    relay: Option<Arc<dyn CommandRelay>>,
    settings: HubSettings,
    closed: AtomicBool,
}

impl BroadcastHub {
    /// Creates a hub with an empty current value and no relay.
    #[must_use]
    pub fn new(settings: HubSettings) -> Self {
        Self {
            current: Arc::new(RwLock::new(String::new())),
            registry: Arc::new(ConnectionRegistry::new()),
            publish_gate: Arc::new(Mutex::new(())),
            relay: None,
            settings,
            closed: AtomicBool::new(false),
        }
    }

    /// Installs a relay that receives a copy of every published value.
    #[must_use]
    pub fn with_relay(mut self, relay: Arc<dyn CommandRelay>) -> Self {
        self.relay = Some(relay);
        self
    }

    /// Returns `true` if a relay is installed.
    #[must_use]
    pub fn relay_enabled(&self) -> bool {
        self.relay.is_some()
    }

    /// Sets the current value and delivers it to every live subscriber.
    ///
    /// Failed deliveries prune the subscriber and never fail the call, nor
    /// does an empty registry or a relay failure. The sweep keeps running
    /// to completion even if the returned future is dropped.
    pub async fn publish(&self, value: impl Into<String>) -> PublishOutcome {
        let sweep = PublishSweep {
            current: Arc::clone(&self.current),
            registry: Arc::clone(&self.registry),
            publish_gate: Arc::clone(&self.publish_gate),
            relay: self.relay.as_ref().map(Arc::clone),
            settings: self.settings,
        };

        match tokio::spawn(sweep.run(value.into())).await {
            Ok(outcome) => outcome,
            Err(err) => {
                tracing::error!(error = %err, "publish task failed");
                PublishOutcome::default()
            }
        }
    }

    /// Returns the most recently published value.
    pub async fn current_value(&self) -> String {
        self.current.read().await.clone()
    }

    /// Registers a new subscriber and returns its handle.
    ///
    /// The subscriber only receives values published after this call. After
    /// [`shutdown`](Self::shutdown) the handle comes back already closed and
    /// nothing is registered.
    #[must_use]
    pub fn subscribe(&self) -> SubscriptionHandle {
        let (sender, receiver) = mpsc::channel(self.settings.subscriber_buffer.max(1));
        let id = SubscriberId::new();

        if self.closed.load(Ordering::SeqCst) {
            drop(sender);
            tracing::debug!(subscriber = %id, "subscribe after shutdown refused");
        } else {
            self.registry.add(Subscriber::new(id, sender));
            // A shutdown that cleared the registry between the check and the add.
            if self.closed.load(Ordering::SeqCst) {
                self.registry.remove(id);
            } else {
                tracing::debug!(subscriber = %id, total = self.registry.len(), "subscriber added");
            }
        }

        SubscriptionHandle {
            id,
            receiver,
            registry: Arc::clone(&self.registry),
        }
    }

    /// Removes a subscriber. Unknown or already-removed ids are ignored.
    pub fn unsubscribe(&self, id: SubscriberId) {
        if self.registry.remove(id) {
            tracing::debug!(subscriber = %id, total = self.registry.len(), "subscriber removed");
        }
    }

    /// Returns the number of registered subscribers.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.registry.len()
    }

    /// Drops every subscriber so their connections wind down, and refuses
    /// new subscriptions from then on.
    ///
    /// Returns how many subscribers were released.
    pub fn shutdown(&self) -> usize {
        self.closed.store(true, Ordering::SeqCst);
        let released = self.registry.clear();
        tracing::info!(released, "hub shut down");
        released
    }
}

/// Everything one publish needs, owned so it can run as a detached task.
struct PublishSweep {
    current: Arc<RwLock<String>>,
    registry: Arc<ConnectionRegistry>,
    publish_gate: Arc<Mutex<()>>,
    relay: Option<Arc<dyn CommandRelay>>,
    settings: HubSettings,
}

impl PublishSweep {
    async fn run(self, value: String) -> PublishOutcome {
        let _gate = self.publish_gate.lock().await;

        self.current.write().await.clone_from(&value);

        let timeout = self.settings.delivery_timeout;
        let snapshot = self.registry.snapshot();
        let attempts = snapshot.iter().map(|subscriber| {
            let value = value.clone();
            async move { (subscriber.id(), subscriber.send(value, timeout).await) }
        });

        let mut outcome = PublishOutcome::default();
        for (id, result) in join_all(attempts).await {
            match result {
                Ok(()) => outcome.delivered += 1,
                Err(err) => {
                    outcome.failed += 1;
                    if self.registry.remove(id) {
                        tracing::warn!(subscriber = %id, error = %err, "pruned subscriber");
                    }
                }
            }
        }

        self.forward_to_relay(&value).await;

        tracing::info!(
            delivered = outcome.delivered,
            failed = outcome.failed,
            len = value.len(),
            "command published"
        );
        outcome
    }

    async fn forward_to_relay(&self, value: &str) {
        let Some(relay) = &self.relay else {
            return;
        };

        match tokio::time::timeout(self.settings.relay_timeout, relay.forward(value)).await {
            Ok(Ok(())) => {}
            Ok(Err(err)) => {
                tracing::warn!(relay = relay.name(), error = %err, "relay forward failed");
            }
            Err(_) => {
                tracing::warn!(
                    relay = relay.name(),
                    timeout_ms = self.settings.relay_timeout.as_millis(),
                    "relay forward timed out"
                );
            }
        }
    }
}

impl Default for BroadcastHub {
    fn default() -> Self {
        Self::new(HubSettings::default())
    }
}

/// A subscriber's receiving end.
///
/// Dropping the handle removes the subscriber from the registry, so a
/// connection task releases its slot on every exit path.
#[derive(Debug)]
pub struct SubscriptionHandle {
    id: SubscriberId,
    receiver: mpsc::Receiver<String>,
    registry: Arc<ConnectionRegistry>,
}

impl SubscriptionHandle {
    /// Returns the subscriber's identity.
    #[must_use]
    pub const fn id(&self) -> SubscriberId {
        self.id
    }

    /// Waits for the next published value.
    ///
    /// Returns `None` once the hub has dropped this subscriber (pruned or
    /// shut down) and every queued value has been received.
    pub async fn recv(&mut self) -> Option<String> {
        self.receiver.recv().await
    }

    /// Stops accepting values. The hub's next delivery attempt fails and
    /// prunes this subscriber.
    pub fn close(&mut self) {
        self.receiver.close();
    }
}

impl Drop for SubscriptionHandle {
    fn drop(&mut self) {
        self.registry.remove(self.id);
    }
}
