//! Tool registry.
//!
//! The [`ToolRegistry`] stores registered tools and provides lookup and
//! execution. Each tool's input schema is compiled once at registration;
//! [`ToolRegistry::execute`] validates arguments against it before the tool
//! runs and bounds the run with the registry timeout.
//!
//! # Usage
//!
//! ```ignore
//! use ferret_tools::ToolRegistry;
//!
//! let mut registry = ToolRegistry::new().with_timeout(Duration::from_secs(10));
//! registry.register(my_tool);
//!
//! let output = registry.execute(&invocation).await?;
//! ```

use crate::error::ToolError;
use crate::invocation::ToolInvocation;
use crate::tool::Tool;
use core::time::Duration;
use ferret_models::llm::ToolDefinition;
use indexmap::IndexMap;
use std::sync::Arc;

/// Default upper bound on a single tool execution.
pub const DEFAULT_TOOL_TIMEOUT: Duration = Duration::from_secs(30);

struct RegisteredTool {
    tool: Arc<dyn Tool>,
    validator: jsonschema::Validator,
}

/// Registry of available tools.
///
/// Stores tools by name and provides lookup, execution, and definition listing.
/// Registration order is preserved in [`definitions`](Self::definitions).
pub struct ToolRegistry {
    tools: IndexMap<String, RegisteredTool>,
    timeout: Duration,
}

impl core::fmt::Debug for ToolRegistry {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ToolRegistry")
            .field("tools", &self.names())
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ToolRegistry {
    /// Creates an empty registry with the [default timeout](DEFAULT_TOOL_TIMEOUT).
    #[must_use]
    pub fn new() -> Self {
        Self {
            tools: IndexMap::new(),
            timeout: DEFAULT_TOOL_TIMEOUT,
        }
    }

    /// Sets the per-execution timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Returns the per-execution timeout.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Registers a tool.
    ///
    /// # Panics
    ///
    /// Panics if a tool with the same name is already registered, or if the
    /// tool's parameter schema is not a valid JSON schema.
    pub fn register(&mut self, tool: impl Tool) {
        if let Err(err) = self.try_register(tool) {
            panic!("{err}");
        }
    }

    /// Registers a tool whose definition is not known at compile time.
    ///
    /// # Errors
    ///
    /// Returns [`ToolError::InvalidDefinition`] if the name is taken or the
    /// parameter schema does not compile. The registry is left unchanged.
    pub fn try_register(&mut self, tool: impl Tool) -> Result<(), ToolError> {
        let definition = tool.definition();
        let name = definition.name;
        if self.tools.contains_key(&name) {
            return Err(ToolError::InvalidDefinition(format!(
                "Tool '{name}' is already registered"
            )));
        }
        let validator = jsonschema::validator_for(&definition.parameters).map_err(|err| {
            ToolError::InvalidDefinition(format!(
                "Tool '{name}' has an invalid parameter schema: {err}"
            ))
        })?;
        self.tools.insert(
            name,
            RegisteredTool {
                tool: Arc::new(tool),
                validator,
            },
        );
        Ok(())
    }

    /// Executes a tool invocation.
    ///
    /// # Errors
    ///
    /// - [`ToolError::UnknownTool`] if no tool has the invocation's name.
    /// - [`ToolError::InvalidArguments`] if the arguments violate the schema;
    ///   the tool is not run.
    /// - [`ToolError::Timeout`] if the tool does not finish in time.
    /// - Any error returned by the tool itself.
    pub async fn execute(
        &self,
        invocation: &ToolInvocation,
    ) -> Result<serde_json::Value, ToolError> {
        let entry = self
            .tools
            .get(&invocation.name)
            .ok_or_else(|| ToolError::UnknownTool(invocation.name.clone()))?;

        let args = invocation.arguments_value();
        let violations: Vec<String> = entry
            .validator
            .iter_errors(&args)
            .map(|err| err.to_string())
            .collect();
        if !violations.is_empty() {
            return Err(ToolError::invalid_arguments(violations.join("; ")));
        }

        tracing::debug!(tool = %invocation.name, id = %invocation.id, "executing tool");
        match tokio::time::timeout(self.timeout, entry.tool.execute(args)).await {
            Ok(result) => result,
            Err(_) => {
                tracing::warn!(tool = %invocation.name, timeout = ?self.timeout, "tool timed out");
                Err(ToolError::Timeout {
                    tool: invocation.name.clone(),
                    after: self.timeout,
                })
            }
        }
    }

    /// Returns tool definitions for all registered tools.
    #[must_use]
    pub fn definitions(&self) -> Vec<ToolDefinition> {
        self.tools
            .values()
            .map(|entry| entry.tool.definition())
            .collect()
    }

    /// Returns a reference to a tool by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&dyn Tool> {
        self.tools.get(name).map(|entry| entry.tool.as_ref())
    }

    /// Returns whether a tool with the given name is registered.
    #[must_use]
    pub fn has(&self, name: &str) -> bool {
        self.tools.contains_key(name)
    }

    /// Returns the names of all registered tools.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        self.tools.keys().map(String::as_str).collect()
    }
}
