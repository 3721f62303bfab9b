//! Model Context Protocol client for Ferret.
//!
//! Connects to a remote MCP server (for example a documentation search
//! service) over the streamable HTTP transport and exposes its tools through
//! the ordinary [`ToolRegistry`](ferret_tools::ToolRegistry), next to the
//! sandboxed file tools.
//!
//! # Example
//!
//! ```no_run
//! # async fn run() -> Result<(), ferret_mcp::McpError> {
//! use ferret_mcp::{HttpTransport, McpClient, register_mcp_tools};
//! use ferret_tools::ToolRegistry;
//! use std::sync::Arc;
//!
//! let transport = Arc::new(HttpTransport::new("https://docs.example.com/mcp"));
//! let client = Arc::new(McpClient::connect(transport).await?);
//!
//! let mut registry = ToolRegistry::new();
//! let names = register_mcp_tools(&mut registry, client).await?;
//! # let _ = names;
//! # Ok(())
//! # }
//! ```

mod bridge;
mod client;
mod error;
pub mod protocol;
mod transport;

pub use bridge::{McpTool, register_mcp_tools};
pub use client::McpClient;
pub use error::McpError;
pub use protocol::{McpToolCallResult, McpToolDefinition, ServerInfo};
pub use transport::{HttpTransport, McpTransport, SESSION_HEADER};
