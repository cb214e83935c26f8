//! Shared application state injected into all Axum handlers.

use std::sync::Arc;

use crate::domain::BroadcastHub;
use crate::store::TerminalUrlSource;

/// Shared application state available to all handlers via Axum's
/// `State` extractor.
#[derive(Debug, Clone)]
pub struct AppState {
    /// The single broadcast hub for this process.
    pub hub: Arc<BroadcastHub>,
    /// Terminal URL lookup, absent when no store is reachable.
    pub terminal_urls: Option<Arc<dyn TerminalUrlSource>>,
}

impl AppState {
    /// Creates state around `hub` with no terminal URL lookup.
    #[must_use]
    pub fn new(hub: Arc<BroadcastHub>) -> Self {
        Self {
            hub,
            terminal_urls: None,
        }
    }

    /// Installs a terminal URL lookup.
    #[must_use]
    pub fn with_terminal_urls(mut self, source: Arc<dyn TerminalUrlSource>) -> Self {
        self.terminal_urls = Some(source);
        self
    }
}
