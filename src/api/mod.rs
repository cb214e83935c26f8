//! HTTP layer: route handlers, DTOs, router composition, OpenAPI.
//!
//! Routes live at the root: `/`, `/command`, `/status`, `/tmate-urls`,
//! `/health`. The WebSocket endpoint is mounted by [`crate::server`].

pub mod dto;
pub mod handlers;
pub mod openapi;

use axum::Router;

use crate::app_state::AppState;

/// Builds the router with every HTTP endpoint.
pub fn build_router() -> Router<AppState> {
    let router = handlers::routes();

    #[cfg(feature = "swagger-ui")]
    let router = {
        use utoipa::OpenApi;
        router.merge(
            utoipa_swagger_ui::SwaggerUi::new("/swagger-ui")
                .url("/api-docs/openapi.json", openapi::ApiDoc::openapi()),
        )
    };

    router
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use std::collections::HashMap;
    use std::sync::Arc;

    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::{Method, Request, StatusCode};
    use serde_json::Value;
    use tower::ServiceExt;

    use super::*;
    use crate::domain::BroadcastHub;
    use crate::store::{StoreError, TerminalUrlSource, TerminalUrls};

    #[derive(Debug)]
    struct FixedUrls(HashMap<String, String>);

    #[async_trait]
    impl TerminalUrlSource for FixedUrls {
        async fn fetch(&self) -> Result<TerminalUrls, StoreError> {
            TerminalUrls::from_fields(&self.0)
        }
    }

    #[derive(Debug)]
    struct BrokenStore;

    #[async_trait]
    impl TerminalUrlSource for BrokenStore {
        async fn fetch(&self) -> Result<TerminalUrls, StoreError> {
            Err(StoreError::Timeout(10))
        }
    }

    fn make_state() -> AppState {
        AppState::new(Arc::new(BroadcastHub::default()))
    }

    async fn call(state: AppState, method: Method, uri: &str) -> (StatusCode, Value) {
        let app = build_router().with_state(state);
        let Ok(request) = Request::builder().method(method).uri(uri).body(Body::empty()) else {
            panic!("valid request");
        };
        let Ok(response) = app.oneshot(request).await else {
            panic!("router is infallible");
        };
        let status = response.status();
        let Ok(bytes) = axum::body::to_bytes(response.into_body(), 1024 * 1024).await else {
            panic!("readable body");
        };
        let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, json)
    }

    #[tokio::test]
    async fn post_command_publishes_and_get_reads_back() {
        let state = make_state();
        let mut viewer = state.hub.subscribe();

        let (status, body) = call(state.clone(), Method::POST, "/command?command=ls%20-la").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "success");
        assert_eq!(body["delivered"], 1);
        assert_eq!(viewer.recv().await.as_deref(), Some("ls -la"));

        let (status, body) = call(state, Method::GET, "/command").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["command"], "ls -la");
    }

    #[tokio::test]
    async fn post_without_command_is_rejected_before_the_hub() {
        let state = make_state();
        state.hub.publish("keep me").await;

        let (status, body) = call(state.clone(), Method::POST, "/command").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], 1001);
        assert_eq!(state.hub.current_value().await, "keep me");
    }

    #[tokio::test]
    async fn post_empty_command_is_accepted() {
        let state = make_state();
        state.hub.publish("old").await;

        let (status, _) = call(state.clone(), Method::POST, "/command?command=").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(state.hub.current_value().await, "");
    }

    #[tokio::test]
    async fn status_reports_subscribers_and_value() {
        let state = make_state();
        let _viewer = state.hub.subscribe();
        state.hub.publish("pwd").await;

        let (status, body) = call(state, Method::GET, "/status").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["subscribers"], 1);
        assert_eq!(body["current_command"], "pwd");
        assert_eq!(body["relay_enabled"], false);
    }

    #[tokio::test]
    async fn health_reports_version() {
        let (status, body) = call(make_state(), Method::GET, "/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
    }

    #[tokio::test]
    async fn index_serves_html() {
        let app = build_router().with_state(make_state());
        let Ok(request) = Request::builder().uri("/").body(Body::empty()) else {
            panic!("valid request");
        };
        let Ok(response) = app.oneshot(request).await else {
            panic!("router is infallible");
        };
        assert_eq!(response.status(), StatusCode::OK);
        let content_type = response
            .headers()
            .get(axum::http::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default();
        assert!(content_type.starts_with("text/html"));
    }

    #[tokio::test]
    async fn tmate_urls_without_store_is_not_found() {
        let (status, body) = call(make_state(), Method::GET, "/tmate-urls").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"]["code"], 2001);
    }

    #[tokio::test]
    async fn tmate_urls_returns_record() {
        let fields = HashMap::from([
            ("web".to_string(), "https://tmate.io/t/abc".to_string()),
            ("ssh".to_string(), "ssh abc@nyc1.tmate.io".to_string()),
            ("timestamp".to_string(), "2026-10-16T08:30:00Z".to_string()),
        ]);
        let state = make_state().with_terminal_urls(Arc::new(FixedUrls(fields)));

        let (status, body) = call(state, Method::GET, "/tmate-urls").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["web"], "https://tmate.io/t/abc");
        assert_eq!(body["ssh"], "ssh abc@nyc1.tmate.io");
    }

    #[tokio::test]
    async fn tmate_urls_malformed_record_is_not_found() {
        let fields = HashMap::from([("web".to_string(), "w".to_string())]);
        let state = make_state().with_terminal_urls(Arc::new(FixedUrls(fields)));

        let (status, _) = call(state, Method::GET, "/tmate-urls").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn tmate_urls_store_failure_is_unavailable() {
        let state = make_state().with_terminal_urls(Arc::new(BrokenStore));

        let (status, body) = call(state, Method::GET, "/tmate-urls").await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body["error"]["code"], 3001);
    }
}
