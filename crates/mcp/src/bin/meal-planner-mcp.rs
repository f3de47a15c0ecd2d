// Standalone MCP server binary speaking JSON-RPC over stdio

use anyhow::{Context, Result};
use meal_planner_client::MealPlannerClient;
use meal_planner_mcp::McpServer;
use std::sync::Arc;

const DEFAULT_BACKEND_URL: &str = "http://localhost:3001";

#[tokio::main]
async fn main() -> Result<()> {
    // stdout carries the protocol; logs go to stderr
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    tracing::info!("Meal Planner MCP server starting...");

    let backend_url = std::env::var("MEAL_PLANNER_BACKEND_URL")
        .unwrap_or_else(|_| DEFAULT_BACKEND_URL.to_string());

    let client = MealPlannerClient::builder()
        .base_url(&backend_url)
        .build()
        .with_context(|| format!("Invalid backend URL: {}", backend_url))?;

    tracing::info!(backend = %backend_url, "Using backend store");

    let server = Arc::new(McpServer::from_client(Arc::new(client)));
    meal_planner_mcp::stdio::serve_stdio(server).await?;

    Ok(())
}
