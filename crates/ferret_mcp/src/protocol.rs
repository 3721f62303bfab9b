//! MCP JSON-RPC message types.

use crate::error::McpError;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// JSON-RPC version string.
pub const JSONRPC_VERSION: &str = "2.0";

/// MCP protocol revision requested during initialization.
pub const PROTOCOL_VERSION: &str = "2025-03-26";

/// JSON-RPC request.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct JsonRpcRequest {
    /// JSON-RPC version (always "2.0").
    pub jsonrpc: String,
    /// Request method name.
    pub method: String,
    /// Request parameters.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub params: Option<Value>,
    /// Request ID.
    pub id: RequestId,
}

impl JsonRpcRequest {
    /// Creates a request.
    #[must_use]
    pub fn new(method: impl Into<String>, params: Option<Value>, id: u64) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            method: method.into(),
            params,
            id: RequestId::Number(id),
        }
    }
}

/// JSON-RPC notification: a request without an id, never answered.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct JsonRpcNotification {
    /// JSON-RPC version (always "2.0").
    pub jsonrpc: String,
    /// Notification method name.
    pub method: String,
    /// Notification parameters.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub params: Option<Value>,
}

impl JsonRpcNotification {
    /// Creates a notification.
    #[must_use]
    pub fn new(method: impl Into<String>, params: Option<Value>) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            method: method.into(),
            params,
        }
    }
}

/// JSON-RPC request ID.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(untagged)]
pub enum RequestId {
    /// Numeric ID.
    Number(u64),
    /// String ID.
    String(String),
}

/// JSON-RPC response.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct JsonRpcResponse {
    /// JSON-RPC version (always "2.0").
    #[serde(default)]
    pub jsonrpc: String,
    /// Response result (success case).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    /// Response error (error case).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<JsonRpcError>,
    /// Request ID this response corresponds to.
    pub id: RequestId,
}

impl JsonRpcResponse {
    /// Returns the result, or the error object as [`McpError::Rpc`].
    ///
    /// # Errors
    ///
    /// [`McpError::Rpc`] for error responses, [`McpError::InvalidResponse`]
    /// when neither field is present.
    pub fn into_result(self) -> Result<Value, McpError> {
        match (self.result, self.error) {
            (_, Some(error)) => Err(McpError::Rpc {
                code: error.code,
                message: error.message,
            }),
            (Some(result), None) => Ok(result),
            (None, None) => Err(McpError::InvalidResponse(
                "response has neither result nor error".to_string(),
            )),
        }
    }
}

/// JSON-RPC error object.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct JsonRpcError {
    /// Error code.
    pub code: i64,
    /// Error message.
    pub message: String,
    /// Additional error data.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

/// Result of `initialize`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct InitializeResult {
    /// Protocol revision chosen by the server.
    #[serde(rename = "protocolVersion")]
    pub protocol_version: String,
    /// Server capabilities, kept opaque.
    #[serde(default)]
    pub capabilities: Value,
    /// Server identification.
    #[serde(rename = "serverInfo")]
    pub server_info: ServerInfo,
}

/// Server identification from `initialize`.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ServerInfo {
    /// Server name.
    pub name: String,
    /// Server version.
    #[serde(default)]
    pub version: Option<String>,
}

fn empty_object_schema() -> Value {
    serde_json::json!({ "type": "object" })
}

/// A tool offered by the server.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct McpToolDefinition {
    /// Tool name.
    pub name: String,
    /// Tool description.
    #[serde(default)]
    pub description: Option<String>,
    /// Input schema (JSON Schema).
    #[serde(rename = "inputSchema", default = "empty_object_schema")]
    pub input_schema: Value,
}

/// One page of `tools/list`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ToolsListResult {
    /// Tools on this page.
    pub tools: Vec<McpToolDefinition>,
    /// Cursor for the next page, absent on the last one.
    #[serde(default, rename = "nextCursor", skip_serializing_if = "Option::is_none")]
    pub next_cursor: Option<String>,
}

/// Parameters of `tools/call`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ToolCallParams {
    /// Tool name.
    pub name: String,
    /// Tool arguments.
    pub arguments: Value,
}

/// Result of `tools/call`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct McpToolCallResult {
    /// Content items returned by the tool.
    #[serde(default)]
    pub content: Vec<McpContent>,
    /// Whether the tool reported a failure.
    #[serde(default, rename = "isError")]
    pub is_error: bool,
}

impl McpToolCallResult {
    /// Flattens the content into text, one item per line.
    ///
    /// Non-text items are shown as a short placeholder.
    #[must_use]
    pub fn text(&self) -> String {
        self.content
            .iter()
            .filter_map(|item| match item {
                McpContent::Text { text } => Some(text.clone()),
                McpContent::Image { mime_type } => Some(format!("[image: {mime_type}]")),
                McpContent::Resource { resource } => Some(
                    resource
                        .text
                        .clone()
                        .unwrap_or_else(|| format!("[resource: {}]", resource.uri)),
                ),
                McpContent::Unsupported => None,
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// MCP content item.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum McpContent {
    /// Text content.
    Text {
        /// The text content.
        text: String,
    },
    /// Image content; the data itself is not kept.
    Image {
        /// MIME type of the image.
        #[serde(rename = "mimeType")]
        mime_type: String,
    },
    /// Embedded resource.
    Resource {
        /// The resource.
        resource: EmbeddedResource,
    },
    /// Content types this client does not display.
    #[serde(other)]
    Unsupported,
}

/// Resource embedded in tool output.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct EmbeddedResource {
    /// Resource URI.
    pub uri: String,
    /// Text body, for text resources.
    #[serde(default)]
    pub text: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn notification_has_no_id() {
        let value =
            serde_json::to_value(JsonRpcNotification::new("notifications/initialized", None))
                .unwrap();
        assert_eq!(
            value,
            json!({ "jsonrpc": "2.0", "method": "notifications/initialized" })
        );
    }

    #[test]
    fn error_response_becomes_rpc_error() {
        let response: JsonRpcResponse = serde_json::from_value(json!({
            "jsonrpc": "2.0",
            "id": 3,
            "error": { "code": -32601, "message": "Method not found" }
        }))
        .unwrap();
        assert_eq!(response.id, RequestId::Number(3));
        let err = response.into_result().unwrap_err();
        assert!(matches!(err, McpError::Rpc { code: -32601, .. }), "{err}");
    }

    #[test]
    fn tool_definition_without_schema_gets_an_object_schema() {
        let tool: McpToolDefinition =
            serde_json::from_value(json!({ "name": "ping" })).unwrap();
        assert_eq!(tool.input_schema, json!({ "type": "object" }));
        assert!(tool.description.is_none());
    }

    #[test]
    fn call_result_text_joins_items() {
        let result: McpToolCallResult = serde_json::from_value(json!({
            "content": [
                { "type": "text", "text": "first" },
                { "type": "image", "mimeType": "image/png", "data": "AAAA" },
                { "type": "resource", "resource": { "uri": "docs://a", "text": "body" } },
                { "type": "resource", "resource": { "uri": "docs://b", "blob": "AAAA" } },
                { "type": "audio", "mimeType": "audio/wav", "data": "AAAA" }
            ]
        }))
        .unwrap();
        assert!(!result.is_error);
        assert_eq!(
            result.text(),
            "first\n[image: image/png]\nbody\n[resource: docs://b]"
        );
    }
}
