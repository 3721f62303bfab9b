//! Integration tests for the `ferret_mcp` crate.

use async_trait::async_trait;
use core::time::Duration;
use ferret_mcp::{McpClient, McpError, McpTransport, register_mcp_tools};
use ferret_models::llm::ToolCall;
use ferret_tools::{ToolError, ToolInvocation, ToolRegistry};
use parking_lot::Mutex;
use serde_json::{Value, json};
use std::sync::Arc;

// ─────────────────────────────────────────────────────────────────────
// Fixtures
// ─────────────────────────────────────────────────────────────────────

type Handler = Box<dyn Fn(&str, Option<&Value>) -> Result<Value, McpError> + Send + Sync>;

/// In-memory server: answers requests with `handler` and records traffic.
struct ScriptedTransport {
    handler: Handler,
    delay: Option<Duration>,
    requests: Mutex<Vec<(String, Option<Value>)>>,
    notifications: Mutex<Vec<String>>,
}

impl ScriptedTransport {
    fn new(
        handler: impl Fn(&str, Option<&Value>) -> Result<Value, McpError> + Send + Sync + 'static,
    ) -> Self {
        Self {
            handler: Box::new(handler),
            delay: None,
            requests: Mutex::default(),
            notifications: Mutex::default(),
        }
    }

    fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    fn methods(&self) -> Vec<String> {
        self.requests
            .lock()
            .iter()
            .map(|(method, _)| method.clone())
            .collect()
    }
}

#[async_trait]
impl McpTransport for ScriptedTransport {
    async fn request(&self, method: &str, params: Option<Value>) -> Result<Value, McpError> {
        self.requests
            .lock()
            .push((method.to_string(), params.clone()));
        if let Some(delay) = self.delay
            && method == "tools/call"
        {
            tokio::time::sleep(delay).await;
        }
        (self.handler)(method, params.as_ref())
    }

    async fn notify(&self, method: &str, _params: Option<Value>) -> Result<(), McpError> {
        self.notifications.lock().push(method.to_string());
        Ok(())
    }
}

/// A documentation server with a `search_docs` tool and a failing `broken` tool.
fn docs_server(method: &str, params: Option<&Value>) -> Result<Value, McpError> {
    match method {
        "initialize" => Ok(json!({
            "protocolVersion": "2025-03-26",
            "capabilities": { "tools": {} },
            "serverInfo": { "name": "docs", "version": "1.0.0" }
        })),
        "tools/list" => Ok(json!({
            "tools": [
                {
                    "name": "search_docs",
                    "description": "Search the documentation.",
                    "inputSchema": {
                        "type": "object",
                        "properties": { "query": { "type": "string" } },
                        "required": ["query"]
                    }
                },
                {
                    "name": "broken",
                    "inputSchema": { "type": "object" }
                }
            ]
        })),
        "tools/call" => {
            let params = params.cloned().unwrap_or_default();
            match params["name"].as_str() {
                Some("search_docs") => Ok(json!({
                    "content": [
                        { "type": "text", "text": format!("results for {}", params["arguments"]["query"]) }
                    ]
                })),
                Some("broken") => Ok(json!({
                    "content": [{ "type": "text", "text": "index unavailable" }],
                    "isError": true
                })),
                _ => Err(McpError::Rpc {
                    code: -32602,
                    message: "Unknown tool".to_string(),
                }),
            }
        }
        other => Err(McpError::Rpc {
            code: -32601,
            message: format!("Method not found: {other}"),
        }),
    }
}

fn invocation(name: &str, args: Value) -> ToolInvocation {
    ToolInvocation::from_call(&ToolCall::new("call_1", name, args)).unwrap()
}

async fn registry_with(transport: Arc<ScriptedTransport>) -> (ToolRegistry, Vec<String>) {
    let client = Arc::new(McpClient::connect(transport).await.unwrap());
    let mut registry = ToolRegistry::new();
    let added = register_mcp_tools(&mut registry, client).await.unwrap();
    (registry, added)
}

// ─────────────────────────────────────────────────────────────────────
// 1. Session
// ─────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn connect_performs_the_handshake() {
    let transport = Arc::new(ScriptedTransport::new(docs_server));
    let client = McpClient::connect(transport.clone()).await.unwrap();

    assert_eq!(client.server_info().name, "docs");
    assert_eq!(transport.methods(), vec!["initialize"]);
    assert_eq!(
        *transport.notifications.lock(),
        vec!["notifications/initialized"]
    );

    let (_, params) = transport.requests.lock()[0].clone();
    let params = params.unwrap();
    assert_eq!(params["clientInfo"]["name"], "ferret");
    assert!(params["protocolVersion"].is_string());
}

#[tokio::test]
async fn connect_fails_when_the_server_refuses() {
    let transport = Arc::new(ScriptedTransport::new(|_, _| {
        Err(McpError::Status {
            status: 503,
            message: "unavailable".to_string(),
        })
    }));
    let err = McpClient::connect(transport).await.unwrap_err();
    assert!(matches!(err, McpError::Status { status: 503, .. }), "{err}");
}

#[tokio::test]
async fn list_tools_follows_cursors() {
    let transport = Arc::new(ScriptedTransport::new(|method, params| match method {
        "tools/list" => match params.and_then(|p| p["cursor"].as_str()) {
            None => Ok(json!({ "tools": [{ "name": "a" }], "nextCursor": "page-2" })),
            Some("page-2") => Ok(json!({ "tools": [{ "name": "b" }] })),
            Some(other) => panic!("unexpected cursor {other}"),
        },
        _ => docs_server(method, params),
    }));
    let client = McpClient::connect(transport.clone()).await.unwrap();

    let names: Vec<String> = client
        .list_tools()
        .await
        .unwrap()
        .into_iter()
        .map(|tool| tool.name)
        .collect();
    assert_eq!(names, vec!["a", "b"]);
    assert_eq!(transport.methods(), vec!["initialize", "tools/list", "tools/list"]);
}

// ─────────────────────────────────────────────────────────────────────
// 2. Tools in the registry
// ─────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn remote_tools_are_registered() {
    let (registry, added) = registry_with(Arc::new(ScriptedTransport::new(docs_server))).await;

    assert_eq!(added, vec!["search_docs", "broken"]);
    let definitions = registry.definitions();
    assert_eq!(definitions[0].description, "Search the documentation.");
    assert_eq!(definitions[1].description, "");
}

#[tokio::test]
async fn name_clashes_are_skipped() {
    let transport = Arc::new(ScriptedTransport::new(docs_server));
    let client = Arc::new(McpClient::connect(transport).await.unwrap());
    let mut registry = ToolRegistry::new();
    register_mcp_tools(&mut registry, client.clone()).await.unwrap();

    let added = register_mcp_tools(&mut registry, client).await.unwrap();
    assert!(added.is_empty());
    assert_eq!(registry.names(), vec!["search_docs", "broken"]);
}

#[tokio::test]
async fn remote_tool_returns_text() {
    let (registry, _) = registry_with(Arc::new(ScriptedTransport::new(docs_server))).await;

    let output = registry
        .execute(&invocation("search_docs", json!({ "query": "agents" })))
        .await
        .unwrap();
    assert_eq!(output, json!("results for \"agents\""));
}

#[tokio::test]
async fn remote_tool_failure_is_an_execution_error() {
    let (registry, _) = registry_with(Arc::new(ScriptedTransport::new(docs_server))).await;

    let err = registry
        .execute(&invocation("broken", json!({})))
        .await
        .unwrap_err();
    match err {
        ToolError::Execution(message) => assert_eq!(message, "index unavailable"),
        other => panic!("expected execution error, got {other}"),
    }
}

#[tokio::test]
async fn arguments_are_validated_before_the_server_is_called() {
    let transport = Arc::new(ScriptedTransport::new(docs_server));
    let (registry, _) = registry_with(transport.clone()).await;

    let err = registry
        .execute(&invocation("search_docs", json!({ "query": 42 })))
        .await
        .unwrap_err();
    assert!(matches!(err, ToolError::InvalidArguments(_)), "{err}");
    assert!(!transport.methods().contains(&"tools/call".to_string()));
}

#[tokio::test]
async fn slow_remote_tool_times_out() {
    let transport =
        Arc::new(ScriptedTransport::new(docs_server).with_delay(Duration::from_secs(30)));
    let client = Arc::new(McpClient::connect(transport).await.unwrap());
    let mut registry = ToolRegistry::new().with_timeout(Duration::from_millis(50));
    register_mcp_tools(&mut registry, client).await.unwrap();

    let err = registry
        .execute(&invocation("search_docs", json!({ "query": "x" })))
        .await
        .unwrap_err();
    assert!(matches!(err, ToolError::Timeout { .. }), "{err}");
}
