use anyhow::{Context, Result};
use meal_planner_client::{ClientConfig, MealPlannerClient};
use meal_planner_mcp::McpServer;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default)]
    pub backend: BackendConfig,
}

/// Where the json-server store lives
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    meal_planner_client::config::DEFAULT_BASE_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    meal_planner_client::config::DEFAULT_TIMEOUT.as_secs()
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl ServerConfig {
    pub fn load(config_path: &Path) -> Result<Self> {
        // Load config file if it exists, otherwise use defaults
        if !config_path.exists() {
            tracing::info!("Configuration file not found, using defaults");
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(config_path)
            .context("Failed to read configuration file")?;
        toml::from_str(&content).context("Failed to parse configuration file")
    }

    /// Command-line values win over the file
    pub fn with_backend_url(mut self, base_url: Option<String>) -> Self {
        if let Some(base_url) = base_url {
            self.backend.base_url = base_url;
        }
        self
    }

    pub fn client_config(&self) -> Result<ClientConfig> {
        let base_url = url::Url::parse(&self.backend.base_url)
            .with_context(|| format!("Invalid backend URL: {}", self.backend.base_url))?;

        Ok(ClientConfig {
            base_url,
            timeout: Duration::from_secs(self.backend.timeout_secs),
        })
    }
}

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub mcp: Arc<McpServer>,
}

impl AppState {
    pub fn new(config: &ServerConfig) -> Result<Self> {
        let client = MealPlannerClient::from_config(config.client_config()?)
            .context("Failed to create backend client")?;

        Ok(Self {
            mcp: Arc::new(McpServer::from_client(Arc::new(client))),
        })
    }
}
