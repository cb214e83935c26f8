//! Concurrent set of live subscribers.
//!
//! [`ConnectionRegistry`] stores subscribers in a sharded [`DashMap`] keyed
//! by [`SubscriberId`]. Every operation is a short synchronous critical
//! section, so it is safe to call from `Drop` and from inside a fan-out
//! sweep without ever holding a lock across an `.await`.

use dashmap::DashMap;
use dashmap::mapref::entry::Entry;

use super::{Subscriber, SubscriberId};

/// Authoritative set of currently-known-live subscribers.
///
/// # Concurrency
///
/// - `add` and `remove` may race freely from any number of tasks.
/// - `remove` of an absent id is a no-op, so the fan-out pruning path and
///   the connection close path can both remove the same subscriber.
/// - `snapshot` copies the set; deliveries iterate the copy.
#[derive(Debug, Default)]
pub struct ConnectionRegistry {
    subscribers: DashMap<SubscriberId, Subscriber>,
}

impl ConnectionRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a subscriber. Re-adding an id that is already present keeps
    /// the existing entry.
    pub fn add(&self, subscriber: Subscriber) {
        if let Entry::Vacant(slot) = self.subscribers.entry(subscriber.id()) {
            slot.insert(subscriber);
        }
    }

    /// Removes the subscriber with the given id, if present.
    ///
    /// Returns `true` if this call performed the removal.
    pub fn remove(&self, id: SubscriberId) -> bool {
        self.subscribers.remove(&id).is_some()
    }

    /// Returns a point-in-time copy of every subscriber.
    #[must_use]
    pub fn snapshot(&self) -> Vec<Subscriber> {
        self.subscribers
            .iter()
            .map(|entry| entry.value().clone())
            .collect()
    }

    /// Removes every subscriber, returning how many were dropped.
    pub fn clear(&self) -> usize {
        let mut dropped = 0;
        self.subscribers.retain(|_, _| {
            dropped += 1;
            false
        });
        dropped
    }

    /// Returns the number of registered subscribers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.subscribers.len()
    }

    /// Returns `true` if no subscriber is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.subscribers.is_empty()
    }
}
