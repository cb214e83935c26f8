//! # cmdcast
//!
//! Relays a single "current command" string from a producer to every live
//! viewer, and optionally republishes it on a Redis pub/sub channel.
//!
//! ## Architecture
//!
//! ```text
//! Producer (POST /command)        Viewers (GET /ws)
//!     │                               │
//!     ├── REST Handlers (api/)        ├── WS Handler (ws/)
//!     │                               │
//!     └──────────► BroadcastHub (domain/) ◄──┘
//!                     │
//!                     ├── ConnectionRegistry (domain/)
//!                     └── CommandRelay (relay/) ──► Redis PUBLISH
//!
//! GET /tmate-urls ──► TerminalUrlSource (store/) ──► Redis HGETALL
//! ```

pub mod api;
pub mod app_state;
pub mod config;
pub mod domain;
pub mod error;
pub mod relay;
pub mod server;
pub mod store;
pub mod ws;
