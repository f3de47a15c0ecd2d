// Newline-delimited JSON-RPC over a byte stream (stdin/stdout)

use crate::server::McpServer;
use crate::session::McpSession;
use anyhow::Result;
use std::sync::Arc;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::{debug, info};

/// Serve one session until `reader` reaches end of stream.
pub async fn serve<R, W>(server: Arc<McpServer>, reader: R, mut writer: W) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut session = McpSession::new(server);
    let mut lines = reader.lines();
    info!(session = %session.id(), "Stdio transport ready");

    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let Some(response) = session.handle_text(line).await else {
            continue;
        };

        let response_json = serde_json::to_string(&response)?;
        debug!(response = %response_json, "Sending response");

        writer.write_all(response_json.as_bytes()).await?;
        writer.write_all(b"\n").await?;
        writer.flush().await?;
    }

    info!("Stdio transport shutting down");
    Ok(())
}

/// Serve the process's stdin/stdout.
pub async fn serve_stdio(server: Arc<McpServer>) -> Result<()> {
    let stdin = tokio::io::BufReader::new(tokio::io::stdin());
    serve(server, stdin, tokio::io::stdout()).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use meal_planner_client::MealPlannerClient;
    use serde_json::Value;

    #[tokio::test]
    async fn test_one_response_per_request_line() {
        let client = MealPlannerClient::builder()
            .base_url("http://localhost:3001")
            .build()
            .unwrap();
        let server = Arc::new(McpServer::from_client(Arc::new(client)));

        let input = concat!(
            r#"{"jsonrpc":"2.0","id":1,"method":"ping"}"#,
            "\n\n",
            r#"{"jsonrpc":"2.0","method":"notifications/initialized"}"#,
            "\n",
            "garbage\n",
            r#"{"jsonrpc":"2.0","id":2,"method":"prompts/list"}"#,
            "\n",
        );
        let mut output = Vec::new();
        serve(server, input.as_bytes(), &mut output).await.unwrap();

        let responses: Vec<Value> = String::from_utf8(output)
            .unwrap()
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect();

        assert_eq!(responses.len(), 3);
        assert_eq!(responses[0]["id"], 1);
        assert_eq!(responses[1]["error"]["code"], -32700);
        assert_eq!(responses[2]["result"]["prompts"][0]["name"], "suggest-ingredients");
    }
}
