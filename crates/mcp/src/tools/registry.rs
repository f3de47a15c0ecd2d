// Tool trait and the registry the server dispatches through

use crate::protocol::{CallToolResult, ToolAnnotations, ToolSchema};
use anyhow::Result;
use std::collections::HashMap;
use std::sync::Arc;

/// Tool executor trait
///
/// Implementations parse their arguments before doing anything else. A
/// [`meal_planner_core::SchemaValidationError`] returned from `execute` is reported as
/// invalid params; every other error becomes an `isError` tool result.
#[async_trait::async_trait]
pub trait Tool: Send + Sync {
    /// Get the tool schema for MCP
    fn schema(&self) -> ToolSchema;

    /// Execute the tool with given arguments
    async fn execute(&self, arguments: serde_json::Value) -> Result<CallToolResult>;

    /// Get the tool's tier (published as annotations)
    fn tier(&self) -> ToolTier {
        ToolTier::ReadOnly
    }
}

/// What a tool does to the backend store
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ToolTier {
    /// Reads only
    ReadOnly,
    /// Creates or modifies records
    Write,
    /// Removes records
    Destructive,
}

impl ToolTier {
    pub fn annotations(self) -> ToolAnnotations {
        ToolAnnotations {
            read_only_hint: self == Self::ReadOnly,
            destructive_hint: self == Self::Destructive,
        }
    }
}

/// Tool registry for managing available tools
///
/// Listing follows registration order.
pub struct ToolRegistry {
    tools: HashMap<String, Arc<dyn Tool>>,
    order: Vec<String>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self {
            tools: HashMap::new(),
            order: Vec::new(),
        }
    }

    /// Register a tool, replacing any earlier tool with the same name
    pub fn register(&mut self, tool: Arc<dyn Tool>) {
        let name = tool.schema().name;
        if self.tools.insert(name.clone(), tool).is_none() {
            self.order.push(name);
        }
    }

    /// Get a tool by name
    pub fn get(&self, name: &str) -> Option<Arc<dyn Tool>> {
        self.tools.get(name).cloned()
    }

    /// List all tool schemas
    pub fn list_schemas(&self) -> Vec<ToolSchema> {
        self.order
            .iter()
            .filter_map(|name| self.tools.get(name))
            .map(|tool| {
                let mut schema = tool.schema();
                schema.annotations = Some(tool.tier().annotations());
                schema
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    struct Echo {
        name: &'static str,
        tier: ToolTier,
    }

    #[async_trait::async_trait]
    impl Tool for Echo {
        fn schema(&self) -> ToolSchema {
            ToolSchema {
                name: self.name.to_string(),
                title: None,
                description: "Echo the arguments".to_string(),
                input_schema: json!({ "type": "object" }),
                output_schema: None,
                annotations: None,
            }
        }

        async fn execute(&self, arguments: Value) -> Result<CallToolResult> {
            Ok(CallToolResult::structured("echo", arguments))
        }

        fn tier(&self) -> ToolTier {
            self.tier
        }
    }

    #[test]
    fn test_list_follows_registration_order() {
        let mut registry = ToolRegistry::new();
        for name in ["zeta", "alpha", "mid"] {
            registry.register(Arc::new(Echo { name, tier: ToolTier::ReadOnly }));
        }

        let names: Vec<_> = registry.list_schemas().into_iter().map(|s| s.name).collect();
        assert_eq!(names, vec!["zeta", "alpha", "mid"]);
    }

    #[test]
    fn test_reregister_replaces_without_duplicating() {
        let mut registry = ToolRegistry::new();
        registry.register(Arc::new(Echo { name: "echo", tier: ToolTier::ReadOnly }));
        registry.register(Arc::new(Echo { name: "echo", tier: ToolTier::Destructive }));

        assert_eq!(registry.len(), 1);
        let schemas = registry.list_schemas();
        assert_eq!(schemas[0].annotations, Some(ToolTier::Destructive.annotations()));
    }

    #[test]
    fn test_tier_annotations() {
        let read = ToolTier::ReadOnly.annotations();
        assert!(read.read_only_hint && !read.destructive_hint);

        let write = ToolTier::Write.annotations();
        assert!(!write.read_only_hint && !write.destructive_hint);

        let delete = ToolTier::Destructive.annotations();
        assert!(!delete.read_only_hint && delete.destructive_hint);
    }

    #[tokio::test]
    async fn test_get_and_execute() {
        let mut registry = ToolRegistry::new();
        registry.register(Arc::new(Echo { name: "echo", tier: ToolTier::ReadOnly }));

        assert!(registry.get("missing").is_none());

        let tool = registry.get("echo").unwrap();
        let result = tool.execute(json!({ "a": 1 })).await.unwrap();
        assert_eq!(result.structured_content, Some(json!({ "a": 1 })));
    }
}
