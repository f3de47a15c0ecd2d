use crate::config::{AppState, ServerConfig};
use anyhow::Result;
use axum::{
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use std::sync::Arc;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};

mod handlers;

/// Start the API server
pub async fn serve(addr: &str, config: ServerConfig) -> Result<()> {
    let state = AppState::new(&config)?;

    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("MCP endpoint listening on http://{}/mcp", addr);

    axum::serve(listener, app).await?;

    Ok(())
}

/// Create the API router
fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/mcp", post(handlers::mcp_message))
        // Middleware
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().include_headers(true))
                .on_response(DefaultOnResponse::new().include_headers(true)),
        )
        .layer(CorsLayer::permissive())
        .with_state(Arc::new(state))
}

/// Health check endpoint
async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "service": meal_planner_mcp::server::SERVER_NAME,
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{header, Method, Request, StatusCode};
    use meal_planner_client::testing::FakeJsonServer;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    async fn router_for(backend: &FakeJsonServer) -> (Router, wiremock::MockServer) {
        let mock = backend.start().await;
        let config = ServerConfig::default().with_backend_url(Some(mock.uri()));
        (create_router(AppState::new(&config).unwrap()), mock)
    }

    fn post_mcp(body: Value) -> Request<Body> {
        Request::builder()
            .method(Method::POST)
            .uri("/mcp")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn json_body(response: axum::response::Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let (app, _mock) = router_for(&FakeJsonServer::new()).await;

        let response = app
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await["status"], "ok");
    }

    #[tokio::test]
    async fn test_tools_list_over_http() {
        let (app, _mock) = router_for(&FakeJsonServer::new()).await;

        let response = app
            .oneshot(post_mcp(json!({ "jsonrpc": "2.0", "id": 1, "method": "tools/list" })))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["id"], 1);
        assert_eq!(body["result"]["tools"].as_array().map(Vec::len), Some(9));
    }

    #[tokio::test]
    async fn test_notification_is_accepted() {
        let (app, _mock) = router_for(&FakeJsonServer::new()).await;

        let response = app
            .oneshot(post_mcp(json!({ "jsonrpc": "2.0", "method": "notifications/initialized" })))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::ACCEPTED);
    }

    #[tokio::test]
    async fn test_tool_call_reaches_backend() {
        let backend = FakeJsonServer::new();
        let (app, _mock) = router_for(&backend).await;

        let response = app
            .oneshot(post_mcp(json!({
                "jsonrpc": "2.0",
                "id": "add",
                "method": "tools/call",
                "params": {
                    "name": "add-ingredient",
                    "arguments": { "id": "egg", "name": "Egg", "unit": "pcs" }
                }
            })))
            .await
            .unwrap();

        let body = json_body(response).await;
        assert_eq!(body["result"]["structuredContent"]["id"], "egg");
        assert_eq!(backend.items("ingredients").len(), 1);
    }

    #[tokio::test]
    async fn test_malformed_body_is_parse_error() {
        let (app, _mock) = router_for(&FakeJsonServer::new()).await;

        let request = Request::post("/mcp")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{oops"))
            .unwrap();
        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await["error"]["code"], -32700);
    }

    #[tokio::test]
    async fn test_get_mcp_not_allowed() {
        let (app, _mock) = router_for(&FakeJsonServer::new()).await;

        let response = app
            .oneshot(Request::get("/mcp").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    }
}
