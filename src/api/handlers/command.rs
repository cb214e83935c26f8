//! Command endpoints: publish a new command, read the current one.

use axum::extract::{Query, State};
use axum::routing::get;
use axum::{Json, Router};

use crate::api::dto::{CommandResponse, PublishParams, PublishResponse};
use crate::app_state::AppState;
use crate::error::{CmdcastError, ErrorResponse};

/// `POST /command?command=<text>` — Publish a command to every viewer.
///
/// # Errors
///
/// Returns [`CmdcastError::MissingParameter`] if `command` is absent.
#[utoipa::path(
    post,
    path = "/command",
    tag = "Command",
    summary = "Publish a command",
    description = "Stores the command as the current value and pushes it to every connected viewer. Succeeds regardless of how many viewers are connected.",
    params(PublishParams),
    responses(
        (status = 200, description = "Command stored and broadcast", body = PublishResponse),
        (status = 400, description = "Missing `command` parameter", body = ErrorResponse),
    )
)]
pub async fn publish_command(
    State(state): State<AppState>,
    Query(params): Query<PublishParams>,
) -> Result<Json<PublishResponse>, CmdcastError> {
    let command = params
        .command
        .ok_or(CmdcastError::MissingParameter("command"))?;

    let outcome = state.hub.publish(command).await;

    Ok(Json(PublishResponse {
        status: "success".to_string(),
        delivered: outcome.delivered,
    }))
}

/// `GET /command` — Current command.
#[utoipa::path(
    get,
    path = "/command",
    tag = "Command",
    summary = "Read the current command",
    responses(
        (status = 200, description = "Most recently published command", body = CommandResponse),
    )
)]
pub async fn get_command(State(state): State<AppState>) -> Json<CommandResponse> {
    Json(CommandResponse {
        command: state.hub.current_value().await,
    })
}

/// Command routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/command", get(get_command).post(publish_command))
}
