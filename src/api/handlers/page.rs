//! Viewer page.

use axum::Router;
use axum::response::Html;
use axum::routing::get;

use crate::app_state::AppState;

const INDEX_HTML: &str = include_str!("../../../assets/index.html");

/// `GET /` — Static viewer page.
#[utoipa::path(
    get,
    path = "/",
    tag = "Viewer",
    summary = "Viewer page",
    responses(
        (status = 200, description = "HTML page", content_type = "text/html", body = String),
    )
)]
pub async fn index_handler() -> Html<&'static str> {
    Html(INDEX_HTML)
}

/// Page routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/", get(index_handler))
}
