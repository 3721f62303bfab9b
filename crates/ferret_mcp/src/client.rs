//! MCP client session.

use crate::error::McpError;
use crate::protocol::{
    InitializeResult, McpToolCallResult, McpToolDefinition, PROTOCOL_VERSION, ServerInfo,
    ToolCallParams, ToolsListResult,
};
use crate::transport::McpTransport;
use serde_json::{Value, json};
use std::sync::Arc;

/// Upper bound on `tools/list` pages fetched by [`McpClient::list_tools`].
const MAX_TOOL_PAGES: usize = 32;

/// An initialized session with one MCP server.
pub struct McpClient {
    transport: Arc<dyn McpTransport>,
    server: ServerInfo,
}

impl core::fmt::Debug for McpClient {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("McpClient")
            .field("server", &self.server)
            .finish_non_exhaustive()
    }
}

impl McpClient {
    /// Performs the `initialize` handshake over `transport`.
    ///
    /// # Errors
    ///
    /// Returns [`McpError`] if the server rejects or does not answer the
    /// handshake.
    pub async fn connect(transport: Arc<dyn McpTransport>) -> Result<Self, McpError> {
        let params = json!({
            "protocolVersion": PROTOCOL_VERSION,
            "capabilities": {},
            "clientInfo": {
                "name": "ferret",
                "version": env!("CARGO_PKG_VERSION"),
            },
        });
        let result = transport.request("initialize", Some(params)).await?;
        let result: InitializeResult = serde_json::from_value(result)?;
        transport.notify("notifications/initialized", None).await?;

        tracing::info!(
            server = %result.server_info.name,
            protocol = %result.protocol_version,
            "MCP session initialized"
        );
        Ok(Self {
            transport,
            server: result.server_info,
        })
    }

    /// The server's self-description from the handshake.
    #[must_use]
    pub fn server_info(&self) -> &ServerInfo {
        &self.server
    }

    /// Lists every tool the server offers, following pagination cursors.
    ///
    /// # Errors
    ///
    /// Returns [`McpError`] if any page fails.
    pub async fn list_tools(&self) -> Result<Vec<McpToolDefinition>, McpError> {
        let mut tools = Vec::new();
        let mut cursor: Option<String> = None;
        for _ in 0..MAX_TOOL_PAGES {
            let params = cursor.as_ref().map(|cursor| json!({ "cursor": cursor }));
            let page: ToolsListResult =
                serde_json::from_value(self.transport.request("tools/list", params).await?)?;
            tools.extend(page.tools);
            match page.next_cursor {
                Some(next) if !next.is_empty() => cursor = Some(next),
                _ => return Ok(tools),
            }
        }
        tracing::warn!(pages = MAX_TOOL_PAGES, "MCP tool listing truncated");
        Ok(tools)
    }

    /// Calls the tool `name` with `arguments`.
    ///
    /// A tool that runs and fails is not an `Err`: it comes back with
    /// [`is_error`](McpToolCallResult::is_error) set.
    ///
    /// # Errors
    ///
    /// Returns [`McpError`] if the call itself fails.
    pub async fn call_tool(&self, name: &str, arguments: Value) -> Result<McpToolCallResult, McpError> {
        let params = serde_json::to_value(ToolCallParams {
            name: name.to_string(),
            arguments,
        })?;
        let result = self.transport.request("tools/call", Some(params)).await?;
        Ok(serde_json::from_value(result)?)
    }
}
