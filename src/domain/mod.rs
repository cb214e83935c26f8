//! Domain layer: subscriber identity, connection registry, and the hub.
//!
//! This module contains the concurrency core of the service: the
//! [`ConnectionRegistry`] of live subscribers and the [`BroadcastHub`] that
//! owns the current command and fans every update out to them.

pub mod hub;
pub mod registry;
pub mod subscriber;
pub mod subscriber_id;

pub use hub::{BroadcastHub, HubSettings, PublishOutcome, SubscriptionHandle};
pub use registry::ConnectionRegistry;
pub use subscriber::{DeliveryError, Subscriber};
pub use subscriber_id::SubscriberId;
