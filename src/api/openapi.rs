//! OpenAPI document for the HTTP surface.

use utoipa::OpenApi;

use super::dto::{CommandResponse, HealthResponse, PublishResponse, StatusResponse};
use super::handlers::{command, page, system, terminal};
use crate::error::{ErrorBody, ErrorResponse};
use crate::store::TerminalUrls;

/// Generated OpenAPI specification, served at `/api-docs/openapi.json`
/// when the `swagger-ui` feature is enabled.
#[derive(Debug, OpenApi)]
#[openapi(
    info(
        title = "cmdcast",
        description = "Relays the current command to live viewers over WebSocket (`GET /ws`)."
    ),
    paths(
        page::index_handler,
        command::publish_command,
        command::get_command,
        terminal::tmate_urls_handler,
        system::health_handler,
        system::status_handler,
    ),
    components(schemas(
        PublishResponse,
        CommandResponse,
        StatusResponse,
        HealthResponse,
        TerminalUrls,
        ErrorResponse,
        ErrorBody,
    )),
    tags(
        (name = "Viewer", description = "Static viewer page"),
        (name = "Command", description = "Publish and read the current command"),
        (name = "Terminal", description = "Shared terminal session lookup"),
        (name = "System", description = "Health and hub status"),
    )
)]
pub struct ApiDoc;
