use crate::config::AppState;
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use meal_planner_mcp::McpSession;
use std::sync::Arc;

/// Handle one JSON-RPC message in a session scoped to this request
pub async fn mcp_message(State(state): State<Arc<AppState>>, body: String) -> Response {
    let mut session = McpSession::new(state.mcp.clone());

    match session.handle_text(&body).await {
        Some(response) => Json(response).into_response(),
        None => StatusCode::ACCEPTED.into_response(),
    }
}
