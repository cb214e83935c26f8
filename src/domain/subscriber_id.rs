//! Type-safe subscriber identifier.
//!
//! [`SubscriberId`] is a newtype wrapper around [`uuid::Uuid`] (v4) so that a
//! registry key can never be confused with any other UUID in the process.

use std::fmt;

/// Unique identifier for one live subscriber connection.
///
/// Generated when the connection subscribes and never reused. Used as the
/// key in [`super::ConnectionRegistry`] and in connection log lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriberId(uuid::Uuid);

impl SubscriberId {
    /// Creates a new random `SubscriberId` (UUID v4).
    #[must_use]
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4())
    }
}

impl Default for SubscriberId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SubscriberId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<uuid::Uuid> for SubscriberId {
    fn from(uuid: uuid::Uuid) -> Self {
        Self(uuid)
    }
}
