//! Service configuration loaded from environment variables.
//!
//! Follows 12-factor style: all settings come from environment variables
//! (or a `.env` file via `dotenvy`). Every key has a local default, so the
//! service runs standalone with no environment at all.

use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

use crate::domain::HubSettings;

/// Output format for log lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable lines.
    Text,
    /// One JSON object per line.
    Json,
}

/// Connection parameters for the optional Redis store.
#[derive(Debug, Clone)]
pub struct RedisSettings {
    /// Host name or address of the Redis server.
    pub host: String,
    /// TCP port of the Redis server.
    pub port: u16,
    /// Logical database index.
    pub db: u32,
    /// How long to wait for the initial connection.
    pub connect_timeout: Duration,
    /// How long a single lookup command may take.
    pub command_timeout: Duration,
}

impl RedisSettings {
    /// Returns the `redis://host:port/db` connection URL.
    #[must_use]
    pub fn url(&self) -> String {
        format!("redis://{}:{}/{}", self.host, self.port, self.db)
    }
}

impl Default for RedisSettings {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 6379,
            db: 0,
            connect_timeout: Duration::from_millis(2_000),
            command_timeout: Duration::from_millis(500),
        }
    }
}

/// Top-level service configuration.
///
/// Loaded once at startup via [`CmdcastConfig::from_env`].
#[derive(Debug, Clone)]
pub struct CmdcastConfig {
    /// Socket address to bind the HTTP server to.
    pub listen_addr: SocketAddr,

    /// Redis connection parameters, or `None` when `REDIS_ENABLED=false`.
    pub redis: Option<RedisSettings>,

    /// Redis channel every published command is relayed to.
    pub relay_channel: String,

    /// Redis hash key holding the terminal-session URLs.
    pub tmate_urls_key: String,

    /// Delivery and relay tunables for the hub.
    pub hub: HubSettings,

    /// Log output format.
    pub log_format: LogFormat,
}

impl Default for CmdcastConfig {
    fn default() -> Self {
        Self {
            listen_addr: SocketAddr::from(([0, 0, 0, 0], 51753)),
            redis: Some(RedisSettings::default()),
            relay_channel: "command_updates".to_string(),
            tmate_urls_key: "tmate_urls".to_string(),
            hub: HubSettings::default(),
            log_format: LogFormat::Text,
        }
    }
}

impl CmdcastConfig {
    /// Loads configuration from environment variables.
    ///
    /// Falls back to defaults when a variable is not set or does not parse.
    /// Calls `dotenvy::dotenv().ok()` to optionally load a `.env` file.
    ///
    /// # Errors
    ///
    /// Returns an error if `HOST` is set but is not an IP address.
    pub fn from_env() -> Result<Self, std::net::AddrParseError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds configuration from an arbitrary key lookup.
    ///
    /// # Errors
    ///
    /// Returns an error if `HOST` is set but is not an IP address.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, std::net::AddrParseError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let redis_defaults = RedisSettings::default();

        let host: IpAddr = match lookup("HOST") {
            Some(raw) => raw.trim().parse()?,
            None => defaults.listen_addr.ip(),
        };
        let port = parse_or(&lookup, "PORT", defaults.listen_addr.port());

        let redis = parse_bool_or(&lookup, "REDIS_ENABLED", true).then(|| RedisSettings {
            host: lookup("REDIS_HOST").unwrap_or(redis_defaults.host),
            port: parse_or(&lookup, "REDIS_PORT", redis_defaults.port),
            db: parse_or(&lookup, "REDIS_DB", redis_defaults.db),
            connect_timeout: Duration::from_millis(parse_or(
                &lookup,
                "REDIS_CONNECT_TIMEOUT_MS",
                2_000,
            )),
            command_timeout: Duration::from_millis(parse_or(
                &lookup,
                "REDIS_COMMAND_TIMEOUT_MS",
                500,
            )),
        });

        let hub = HubSettings {
            delivery_timeout: Duration::from_millis(parse_or(&lookup, "DELIVERY_TIMEOUT_MS", 1_000)),
            relay_timeout: Duration::from_millis(parse_or(&lookup, "RELAY_TIMEOUT_MS", 500)),
            subscriber_buffer: parse_or(&lookup, "SUBSCRIBER_BUFFER", defaults.hub.subscriber_buffer)
                .max(1),
        };

        let log_format = match lookup("LOG_FORMAT").as_deref().map(str::trim) {
            Some(f) if f.eq_ignore_ascii_case("json") => LogFormat::Json,
            _ => LogFormat::Text,
        };

        Ok(Self {
            listen_addr: SocketAddr::new(host, port),
            redis,
            relay_channel: lookup("RELAY_CHANNEL").unwrap_or(defaults.relay_channel),
            tmate_urls_key: lookup("TMATE_URLS_KEY").unwrap_or(defaults.tmate_urls_key),
            hub,
            log_format,
        })
    }
}

/// Parses a variable as `T`, returning `default` on missing or invalid
/// values.
fn parse_or<T, F>(lookup: &F, key: &str, default: T) -> T
where
    T: std::str::FromStr,
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

/// Parses a variable as a boolean. Accepts `"true"`, `"1"`, `"false"`,
/// `"0"` (case-insensitive). Returns `default` otherwise.
fn parse_bool_or<F>(lookup: &F, key: &str, default: bool) -> bool
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key).map(|v| v.trim().to_ascii_lowercase()).as_deref() {
        Some("true") | Some("1") => true,
        Some("false") | Some("0") => false,
        _ => default,
    }
}
