//! Terminal-session URL record.
//!
//! The record lives in a Redis hash with exactly these fields:
//!
//! | Field       | Meaning                                  |
//! |-------------|------------------------------------------|
//! | `web`       | browser URL of the shared terminal       |
//! | `ssh`       | ssh connection string for the same session |
//! | `timestamp` | RFC 3339 time the session was registered |
//!
//! A hash with a missing or empty field, or a timestamp that does not
//! parse, is reported as not available rather than partially returned.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use redis::AsyncCommands;
use redis::aio::ConnectionManager;
use serde::Serialize;
use utoipa::ToSchema;

use super::StoreError;

/// Validated terminal-session URLs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct TerminalUrls {
    /// Browser URL of the shared terminal session.
    pub web: String,
    /// SSH connection string for the same session.
    pub ssh: String,
    /// When the session was registered.
    pub timestamp: DateTime<Utc>,
}

impl TerminalUrls {
    /// Builds a record from raw hash fields.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotAvailable`] if any field is missing or
    /// empty, or if `timestamp` is not RFC 3339.
    pub fn from_fields(fields: &HashMap<String, String>) -> Result<Self, StoreError> {
        let web = required(fields, "web")?;
        let ssh = required(fields, "ssh")?;
        let raw_timestamp = required(fields, "timestamp")?;
        let timestamp = DateTime::parse_from_rfc3339(&raw_timestamp)
            .map_err(|e| StoreError::NotAvailable(format!("invalid timestamp: {e}")))?
            .with_timezone(&Utc);

        Ok(Self {
            web,
            ssh,
            timestamp,
        })
    }
}

fn required(fields: &HashMap<String, String>, name: &str) -> Result<String, StoreError> {
    match fields.get(name).map(|v| v.trim()) {
        Some(value) if !value.is_empty() => Ok(value.to_string()),
        _ => Err(StoreError::NotAvailable(format!("missing field `{name}`"))),
    }
}

/// Source of the current terminal-session URLs.
#[async_trait]
pub trait TerminalUrlSource: Send + Sync + std::fmt::Debug {
    /// Fetches and validates the current record.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotAvailable`] when no valid record exists,
    /// [`StoreError::Redis`] when the store itself fails and
    /// [`StoreError::Timeout`] when it does not answer in time.
    async fn fetch(&self) -> Result<TerminalUrls, StoreError>;
}

/// Reads the record from a Redis hash.
#[derive(Clone)]
pub struct RedisTerminalUrls {
    conn: ConnectionManager,
    key: String,
    timeout: Duration,
}

impl RedisTerminalUrls {
    /// Creates a lookup reading the hash stored at `key`, giving up on the
    /// server after `timeout`.
    #[must_use]
    pub fn new(conn: ConnectionManager, key: impl Into<String>, timeout: Duration) -> Self {
        Self {
            conn,
            key: key.into(),
            timeout,
        }
    }
}

impl std::fmt::Debug for RedisTerminalUrls {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisTerminalUrls")
            .field("key", &self.key)
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl TerminalUrlSource for RedisTerminalUrls {
    async fn fetch(&self) -> Result<TerminalUrls, StoreError> {
        let mut conn = self.conn.clone();
        let fields: HashMap<String, String> =
            super::bounded(self.timeout, conn.hgetall(&self.key)).await?;
        if fields.is_empty() {
            return Err(StoreError::NotAvailable(format!("key `{}` not set", self.key)));
        }
        TerminalUrls::from_fields(&fields)
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    fn fields(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn complete_record_parses() {
        let raw = fields(&[
            ("web", "https://tmate.io/t/abc"),
            ("ssh", "ssh abc@nyc1.tmate.io"),
            ("timestamp", "2026-10-16T08:30:00Z"),
        ]);
        let Ok(urls) = TerminalUrls::from_fields(&raw) else {
            panic!("expected a valid record");
        };
        assert_eq!(urls.web, "https://tmate.io/t/abc");
        assert_eq!(urls.ssh, "ssh abc@nyc1.tmate.io");
        assert_eq!(urls.timestamp.to_rfc3339(), "2026-10-16T08:30:00+00:00");
    }

    #[test]
    fn offset_timestamp_is_normalized_to_utc() {
        let raw = fields(&[
            ("web", "w"),
            ("ssh", "s"),
            ("timestamp", "2026-10-16T10:30:00+02:00"),
        ]);
        let Ok(urls) = TerminalUrls::from_fields(&raw) else {
            panic!("expected a valid record");
        };
        assert_eq!(urls.timestamp.to_rfc3339(), "2026-10-16T08:30:00+00:00");
    }

    #[test]
    fn missing_field_is_not_available() {
        let raw = fields(&[("web", "w"), ("timestamp", "2026-10-16T08:30:00Z")]);
        assert!(matches!(
            TerminalUrls::from_fields(&raw),
            Err(StoreError::NotAvailable(_))
        ));
    }

    #[test]
    fn blank_field_is_not_available() {
        let raw = fields(&[
            ("web", "w"),
            ("ssh", "   "),
            ("timestamp", "2026-10-16T08:30:00Z"),
        ]);
        assert!(matches!(
            TerminalUrls::from_fields(&raw),
            Err(StoreError::NotAvailable(_))
        ));
    }

    #[test]
    fn malformed_timestamp_is_not_available() {
        let raw = fields(&[("web", "w"), ("ssh", "s"), ("timestamp", "yesterday")]);
        assert!(matches!(
            TerminalUrls::from_fields(&raw),
            Err(StoreError::NotAvailable(_))
        ));
    }

    #[test]
    fn serializes_with_schema_field_names() {
        let raw = fields(&[
            ("web", "w"),
            ("ssh", "s"),
            ("timestamp", "2026-10-16T08:30:00Z"),
        ]);
        let Ok(urls) = TerminalUrls::from_fields(&raw) else {
            panic!("expected a valid record");
        };
        let json = serde_json::to_value(&urls).unwrap_or_default();
        assert_eq!(json["web"], "w");
        assert_eq!(json["ssh"], "s");
        assert!(json["timestamp"].is_string());
    }
}
