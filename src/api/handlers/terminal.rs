//! Terminal-session URL lookup.

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};

use crate::app_state::AppState;
use crate::error::{CmdcastError, ErrorResponse};
use crate::store::TerminalUrls;

/// `GET /tmate-urls` — Current terminal-session URLs.
///
/// # Errors
///
/// Returns [`CmdcastError::TerminalUrlsUnavailable`] when no store is
/// configured or no valid record exists, and
/// [`CmdcastError::StoreUnavailable`] when the store fails.
#[utoipa::path(
    get,
    path = "/tmate-urls",
    tag = "Terminal",
    summary = "Terminal session URLs",
    description = "Returns the web and ssh URLs of the shared terminal session, read from the external store.",
    responses(
        (status = 200, description = "Terminal URLs", body = TerminalUrls),
        (status = 404, description = "No valid record", body = ErrorResponse),
        (status = 503, description = "Store failure", body = ErrorResponse),
    )
)]
pub async fn tmate_urls_handler(
    State(state): State<AppState>,
) -> Result<Json<TerminalUrls>, CmdcastError> {
    let Some(source) = &state.terminal_urls else {
        return Err(CmdcastError::TerminalUrlsUnavailable(
            "no store configured".to_string(),
        ));
    };
    let urls = source.fetch().await?;
    Ok(Json(urls))
}

/// Terminal routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/tmate-urls", get(tmate_urls_handler))
}
