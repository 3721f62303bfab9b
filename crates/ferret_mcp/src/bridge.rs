//! Remote MCP tools as [`Tool`]s.

use crate::client::McpClient;
use crate::error::McpError;
use crate::protocol::McpToolDefinition;
use core::future::Future;
use core::pin::Pin;
use ferret_models::llm::ToolDefinition;
use ferret_tools::{Tool, ToolError, ToolRegistry};
use serde_json::Value;
use std::sync::Arc;

/// One tool of a remote MCP server.
///
/// Runs through the [`ToolRegistry`] like any local tool, so arguments are
/// validated against the server's input schema and the call is bounded by
/// the registry timeout.
#[derive(Debug)]
pub struct McpTool {
    client: Arc<McpClient>,
    definition: McpToolDefinition,
}

impl McpTool {
    /// Wraps the tool described by `definition`.
    #[must_use]
    pub fn new(client: Arc<McpClient>, definition: McpToolDefinition) -> Self {
        Self { client, definition }
    }
}

impl Tool for McpTool {
    fn definition(&self) -> ToolDefinition {
        ToolDefinition {
            name: self.definition.name.clone(),
            description: self.definition.description.clone().unwrap_or_default(),
            parameters: self.definition.input_schema.clone(),
        }
    }

    fn execute(
        &self,
        args: Value,
    ) -> Pin<Box<dyn Future<Output = Result<Value, ToolError>> + Send + '_>> {
        Box::pin(async move {
            let result = self
                .client
                .call_tool(&self.definition.name, args)
                .await
                .map_err(|err| ToolError::execution(err.to_string()))?;
            let text = result.text();
            if result.is_error {
                return Err(ToolError::execution(text));
            }
            Ok(Value::String(text))
        })
    }
}

/// Registers every tool offered by `client` and returns the names added.
///
/// Tools whose name is already taken, or whose schema does not compile, are
/// skipped with a warning.
///
/// # Errors
///
/// Returns [`McpError`] if the tools cannot be listed.
pub async fn register_mcp_tools(
    registry: &mut ToolRegistry,
    client: Arc<McpClient>,
) -> Result<Vec<String>, McpError> {
    let mut added = Vec::new();
    for definition in client.list_tools().await? {
        let name = definition.name.clone();
        match registry.try_register(McpTool::new(Arc::clone(&client), definition)) {
            Ok(()) => added.push(name),
            Err(err) => {
                tracing::warn!(
                    server = %client.server_info().name,
                    tool = %name,
                    error = %err,
                    "skipping MCP tool"
                );
            }
        }
    }
    tracing::info!(server = %client.server_info().name, tools = ?added, "registered MCP tools");
    Ok(added)
}
