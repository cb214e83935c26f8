//! WebSocket layer: upgrade handling and the per-connection loop.
//!
//! The endpoint at `/ws` turns every connection into a hub subscriber and
//! streams each published command to it as a text frame.

pub mod connection;
pub mod handler;
