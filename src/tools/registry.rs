use crate::types::{AppError, Result, ToolDefinition};
use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;

/// A capability the model can invoke by name.
#[async_trait]
pub trait Tool: Send + Sync {
    /// Unique tool name, the key the model refers to it by.
    fn name(&self) -> &str;
    /// Description consumed by the model to decide applicability.
    fn description(&self) -> &str;
    /// JSON-schema specification of the expected arguments.
    fn parameters_schema(&self) -> Value;
    /// Perform the tool's work with the model-supplied arguments.
    async fn execute(&self, args: Value) -> Result<Value>;
}

/// Fixed, process-wide mapping from tool name to implementation.
///
/// The set is established at startup and never changes at runtime; dispatch
/// is resolved once per call through the name map.
pub struct ToolRegistry {
    tools: HashMap<String, Arc<dyn Tool>>,
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ToolRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            tools: HashMap::new(),
        }
    }

    /// Register a tool under its name.
    pub fn register(&mut self, tool: Arc<dyn Tool>) {
        self.tools.insert(tool.name().to_string(), tool);
    }

    /// Declarations for every registered tool, for attaching to inference
    /// requests.
    pub fn definitions(&self) -> Vec<ToolDefinition> {
        self.tools
            .values()
            .map(|tool| ToolDefinition {
                name: tool.name().to_string(),
                description: tool.description().to_string(),
                parameters: tool.parameters_schema(),
            })
            .collect()
    }

    /// Execute a registered tool by name.
    ///
    /// An unregistered name is rejected with [`AppError::UnknownTool`]
    /// rather than ignored.
    pub async fn execute(&self, name: &str, args: Value) -> Result<Value> {
        match self.tools.get(name) {
            Some(tool) => tool.execute(args).await,
            None => Err(AppError::UnknownTool(name.to_string())),
        }
    }

    /// Names of all registered tools.
    pub fn tool_names(&self) -> Vec<String> {
        self.tools.keys().cloned().collect()
    }

    /// Check if a tool is registered.
    pub fn has_tool(&self, name: &str) -> bool {
        self.tools.contains_key(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    struct EchoTool;

    #[async_trait]
    impl Tool for EchoTool {
        fn name(&self) -> &str {
            "echo"
        }

        fn description(&self) -> &str {
            "Echoes back the input"
        }

        fn parameters_schema(&self) -> Value {
            json!({
                "type": "object",
                "properties": {
                    "message": { "type": "string" }
                },
                "required": ["message"]
            })
        }

        async fn execute(&self, args: Value) -> Result<Value> {
            Ok(json!({ "echo": args["message"] }))
        }
    }

    #[test]
    fn test_registry_starts_empty() {
        let registry = ToolRegistry::new();
        assert!(registry.tool_names().is_empty());
        assert!(registry.definitions().is_empty());
    }

    #[test]
    fn test_registration_and_definitions() {
        let mut registry = ToolRegistry::new();
        registry.register(Arc::new(EchoTool));

        assert!(registry.has_tool("echo"));
        let definitions = registry.definitions();
        assert_eq!(definitions.len(), 1);
        assert_eq!(definitions[0].name, "echo");
        assert!(!definitions[0].description.is_empty());
        assert_eq!(definitions[0].parameters["type"], "object");
    }

    #[tokio::test]
    async fn test_execute_dispatches_by_name() {
        let mut registry = ToolRegistry::new();
        registry.register(Arc::new(EchoTool));

        let result = registry
            .execute("echo", json!({"message": "hello"}))
            .await
            .unwrap();
        assert_eq!(result["echo"], "hello");
    }

    #[tokio::test]
    async fn test_execute_rejects_unknown_tool() {
        let registry = ToolRegistry::new();
        let err = registry.execute("nonexistent", json!({})).await.unwrap_err();
        assert!(matches!(err, AppError::UnknownTool(name) if name == "nonexistent"));
    }
}
