//! Error types for MCP sessions.

use thiserror::Error;

/// Errors from talking to an MCP server.
#[derive(Debug, Error)]
pub enum McpError {
    /// The request could not be sent or the response body not read.
    #[error("MCP transport error: {0}")]
    Http(String),

    /// The server answered with a non-success HTTP status.
    #[error("MCP server returned HTTP {status}: {message}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Response body, if any.
        message: String,
    },

    /// The server answered with a JSON-RPC error object.
    #[error("MCP error {code}: {message}")]
    Rpc {
        /// JSON-RPC error code.
        code: i64,
        /// Error message from the server.
        message: String,
    },

    /// The response did not have the expected shape.
    #[error("Invalid MCP response: {0}")]
    InvalidResponse(String),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
