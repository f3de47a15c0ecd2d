// Protocol session: decodes raw JSON-RPC messages for one transport scope

use crate::protocol::{JsonRpcError, JsonRpcRequest, JsonRpcResponse};
use crate::server::McpServer;
use serde_json::Value;
use std::sync::Arc;
use uuid::Uuid;

/// A protocol session.
///
/// The HTTP transport opens one per request; the stdio transport keeps one for the
/// life of the stream. Dropping the session closes it.
pub struct McpSession {
    id: Uuid,
    server: Arc<McpServer>,
    handled: u64,
}

impl McpSession {
    pub fn new(server: Arc<McpServer>) -> Self {
        let id = Uuid::new_v4();
        tracing::debug!(session = %id, "Session opened");
        Self {
            id,
            server,
            handled: 0,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Handle one raw message. `None` means nothing should be written back.
    pub async fn handle_text(&mut self, text: &str) -> Option<JsonRpcResponse> {
        match serde_json::from_str::<Value>(text) {
            Ok(value) => self.handle_value(value).await,
            Err(e) => {
                tracing::warn!(session = %self.id, error = %e, "Malformed JSON-RPC message");
                Some(JsonRpcResponse::error(Value::Null, JsonRpcError::parse_error()))
            }
        }
    }

    /// Handle one decoded message.
    pub async fn handle_value(&mut self, value: Value) -> Option<JsonRpcResponse> {
        let id = value.get("id").cloned();

        let request = match serde_json::from_value::<JsonRpcRequest>(value) {
            Ok(request) => request,
            Err(e) => {
                tracing::warn!(session = %self.id, error = %e, "Invalid JSON-RPC request");
                return Some(JsonRpcResponse::error(
                    id.unwrap_or(Value::Null),
                    JsonRpcError::invalid_request(),
                ));
            }
        };

        self.handled += 1;
        tracing::debug!(session = %self.id, method = %request.method, "Handling request");
        self.server.handle_request(request).await
    }
}

impl Drop for McpSession {
    fn drop(&mut self) {
        tracing::debug!(session = %self.id, handled = self.handled, "Session closed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use meal_planner_client::MealPlannerClient;
    use serde_json::json;

    fn session() -> McpSession {
        let client = MealPlannerClient::builder()
            .base_url("http://localhost:3001")
            .build()
            .unwrap();
        McpSession::new(Arc::new(McpServer::from_client(Arc::new(client))))
    }

    #[tokio::test]
    async fn test_malformed_json_is_parse_error() {
        let mut session = session();
        let response = session.handle_text("{not json").await.unwrap();
        assert_eq!(response.id, Value::Null);
        assert_eq!(response.error.unwrap().code, JsonRpcError::PARSE_ERROR);
    }

    #[tokio::test]
    async fn test_invalid_envelope_keeps_id() {
        let mut session = session();
        let response = session
            .handle_value(json!({ "jsonrpc": "2.0", "id": 7, "params": {} }))
            .await
            .unwrap();
        assert_eq!(response.id, json!(7));
        assert_eq!(response.error.unwrap().code, JsonRpcError::INVALID_REQUEST);
    }

    #[tokio::test]
    async fn test_ping() {
        let mut session = session();
        let response = session
            .handle_text(r#"{"jsonrpc":"2.0","id":"a","method":"ping"}"#)
            .await
            .unwrap();
        assert_eq!(response.id, json!("a"));
        assert_eq!(response.result, Some(json!({})));
    }

    #[tokio::test]
    async fn test_null_id_still_gets_response() {
        let mut session = session();
        let response = session
            .handle_text(r#"{"jsonrpc":"2.0","id":null,"method":"ping"}"#)
            .await
            .unwrap();
        assert_eq!(response.id, Value::Null);
        assert_eq!(response.result, Some(json!({})));

        let ack = session
            .handle_text(r#"{"jsonrpc":"2.0","method":"notifications/initialized"}"#)
            .await;
        assert!(ack.is_none());
    }

    #[tokio::test]
    async fn test_sessions_have_distinct_ids() {
        assert_ne!(session().id(), session().id());
    }
}
