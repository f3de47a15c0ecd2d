// MCP server: JSON-RPC method routing over the tool, resource and prompt directories

use crate::completion::Suggester;
use crate::error::DirectoryError;
use crate::prompts::PromptDirectory;
use crate::protocol::*;
use crate::resources::ResourceDirectory;
use crate::tools::{meal_planner_tools, ToolRegistry};
use meal_planner_client::MealPlannerClient;
use meal_planner_core::SchemaValidationError;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, info, warn};

pub const SERVER_NAME: &str = "meal-planner-mcp";
pub const SERVER_TITLE: &str = "Meal Planner MCP";

pub const INSTRUCTIONS: &str = "This MCP server provides a fully automated weekly meal planning system for a family.\n\
You can generate meal plans, adjust individual days, create shopping lists, and manage custom recipes.";

type MethodResult = Result<Value, JsonRpcError>;

fn parse_params<T: DeserializeOwned>(params: Option<Value>) -> Result<T, JsonRpcError> {
    serde_json::from_value(params.unwrap_or(Value::Null))
        .map_err(|e| JsonRpcError::invalid_params(format!("Invalid params: {}", e)))
}

fn to_result(value: impl Serialize) -> MethodResult {
    serde_json::to_value(value).map_err(|e| JsonRpcError::internal_error(e.to_string()))
}

fn directory_error(method: &str, error: DirectoryError) -> JsonRpcError {
    if error.is_not_found() {
        debug!(method, error = %error, "Not found");
    } else {
        warn!(method, error = %error, "Request failed");
    }
    error.to_jsonrpc()
}

/// Request router holding the directories.
///
/// Built once from a backend client; read-only afterwards.
pub struct McpServer {
    tools: ToolRegistry,
    resources: ResourceDirectory,
    prompts: PromptDirectory,
}

impl McpServer {
    pub fn new(tools: ToolRegistry, resources: ResourceDirectory, prompts: PromptDirectory) -> Self {
        Self {
            tools,
            resources,
            prompts,
        }
    }

    /// Wire every directory to `client`, sharing a single suggester.
    pub fn from_client(client: Arc<MealPlannerClient>) -> Self {
        let suggester = Suggester::new(client.clone());
        let resources = ResourceDirectory::new(client.clone(), suggester.clone());
        let prompts = PromptDirectory::new(client.clone(), suggester);
        let tools = meal_planner_tools(client);

        info!(tools = tools.len(), "MCP server ready");
        Self::new(tools, resources, prompts)
    }

    /// Handle one request. Notifications produce no response.
    pub async fn handle_request(&self, request: JsonRpcRequest) -> Option<JsonRpcResponse> {
        if request.is_notification() {
            debug!(method = %request.method, "Notification received");
            return None;
        }
        let id = request.id.clone().unwrap_or_default();

        if request.jsonrpc != JSONRPC_VERSION {
            return Some(JsonRpcResponse::error(id, JsonRpcError::invalid_request()));
        }

        let method = request.method.as_str();
        let result = match method {
            "initialize" => self.initialize(request.params),
            "ping" => Ok(serde_json::json!({})),
            "tools/list" => to_result(ListToolsResult {
                tools: self.tools.list_schemas(),
            }),
            "tools/call" => self.call_tool(request.params).await,
            "resources/list" => self.list_resources().await,
            "resources/templates/list" => to_result(ListResourceTemplatesResult {
                resource_templates: self.resources.templates(),
            }),
            "resources/read" => self.read_resource(request.params).await,
            "prompts/list" => to_result(ListPromptsResult {
                prompts: self.prompts.list(),
            }),
            "prompts/get" => self.get_prompt(request.params).await,
            "completion/complete" => self.complete(request.params).await,
            other => Err(JsonRpcError::method_not_found(other)),
        };

        Some(match result {
            Ok(value) => JsonRpcResponse::success(id, value),
            Err(error) => JsonRpcResponse::error(id, error),
        })
    }

    fn initialize(&self, params: Option<Value>) -> MethodResult {
        let params: InitializeParams = parse_params(params)?;
        info!(
            client = %params.client_info.name,
            client_version = %params.client_info.version,
            protocol = %params.protocol_version,
            "Client initializing"
        );

        to_result(InitializeResult {
            protocol_version: PROTOCOL_VERSION.to_string(),
            capabilities: ServerCapabilities {
                tools: Some(ListChangedCapability { list_changed: false }),
                resources: Some(ResourcesCapability {
                    subscribe: false,
                    list_changed: false,
                }),
                prompts: Some(ListChangedCapability { list_changed: false }),
                completions: Some(serde_json::json!({})),
            },
            server_info: ServerInfo {
                name: SERVER_NAME.to_string(),
                title: Some(SERVER_TITLE.to_string()),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            instructions: Some(INSTRUCTIONS.to_string()),
        })
    }

    async fn call_tool(&self, params: Option<Value>) -> MethodResult {
        let params: CallToolParams = parse_params(params)?;
        let tool = self
            .tools
            .get(&params.name)
            .ok_or_else(|| JsonRpcError::invalid_params(format!("Unknown tool: {}", params.name)))?;

        info!(tool = %params.name, "Calling tool");
        let result = match tool.execute(params.arguments).await {
            Ok(result) => result,
            Err(e) => match e.downcast_ref::<SchemaValidationError>() {
                Some(invalid) => {
                    debug!(tool = %params.name, error = %invalid, "Rejected tool arguments");
                    return Err(JsonRpcError::invalid_params(invalid.to_string()));
                }
                None => {
                    warn!(tool = %params.name, error = %e, "Tool failed");
                    CallToolResult::error(e.to_string())
                }
            },
        };

        to_result(result)
    }

    async fn list_resources(&self) -> MethodResult {
        let resources = self
            .resources
            .list()
            .await
            .map_err(|e| directory_error("resources/list", e))?;
        to_result(ListResourcesResult { resources })
    }

    async fn read_resource(&self, params: Option<Value>) -> MethodResult {
        let params: ReadResourceParams = parse_params(params)?;
        let result = self
            .resources
            .read(&params.uri)
            .await
            .map_err(|e| directory_error("resources/read", e))?;
        to_result(result)
    }

    async fn get_prompt(&self, params: Option<Value>) -> MethodResult {
        let params: GetPromptParams = parse_params(params)?;
        let result = self
            .prompts
            .get(&params.name, &params.arguments)
            .await
            .map_err(|e| directory_error("prompts/get", e))?;
        to_result(result)
    }

    async fn complete(&self, params: Option<Value>) -> MethodResult {
        let params: CompleteParams = parse_params(params)?;
        let argument = &params.argument;

        let completion = match &params.reference {
            CompletionReference::Resource { uri } => {
                self.resources
                    .complete(uri, &argument.name, &argument.value)
                    .await
            }
            CompletionReference::Prompt { name } => {
                self.prompts
                    .complete(name, &argument.name, &argument.value)
                    .await
            }
        }
        .map_err(|e| directory_error("completion/complete", e))?;

        to_result(CompleteResult { completion })
    }
}
