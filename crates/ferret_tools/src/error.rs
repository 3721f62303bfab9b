//! Error types for tool execution.

use core::time::Duration;
use thiserror::Error;

/// Errors that can occur during tool execution.
///
/// Every variant is reported back to the model as the content of an error
/// tool result, so messages are written for that audience.
#[derive(Debug, Error)]
pub enum ToolError {
    /// No tool with this name is registered.
    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    /// The arguments do not match the tool's declared input schema.
    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),

    /// The tool ran and failed.
    #[error("Execution error: {0}")]
    Execution(String),

    /// The tool did not finish within the registry timeout.
    #[error("Tool '{tool}' timed out after {after:?}")]
    Timeout {
        /// Name of the tool.
        tool: String,
        /// The timeout that elapsed.
        after: Duration,
    },

    /// A tool definition was rejected at registration.
    #[error("Invalid tool definition: {0}")]
    InvalidDefinition(String),

    /// JSON serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ToolError {
    /// Creates an [`InvalidArguments`](Self::InvalidArguments) error.
    pub fn invalid_arguments(msg: impl Into<String>) -> Self {
        Self::InvalidArguments(msg.into())
    }

    /// Creates an [`Execution`](Self::Execution) error.
    pub fn execution(msg: impl Into<String>) -> Self {
        Self::Execution(msg.into())
    }
}
