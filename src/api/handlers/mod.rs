//! HTTP endpoint handlers organized by resource.

pub mod command;
pub mod page;
pub mod system;
pub mod terminal;

use axum::Router;

use crate::app_state::AppState;

/// Composes all resource routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .merge(page::routes())
        .merge(command::routes())
        .merge(terminal::routes())
        .merge(system::routes())
}
