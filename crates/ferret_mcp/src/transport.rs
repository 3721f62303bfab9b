//! MCP transports.
//!
//! [`HttpTransport`] speaks the streamable HTTP transport: every message is
//! a `POST` to one endpoint, and the server answers either with a JSON body
//! or with a short `text/event-stream` carrying the response.

use crate::error::McpError;
use crate::protocol::{JsonRpcNotification, JsonRpcRequest, JsonRpcResponse, RequestId};
use async_trait::async_trait;
use core::sync::atomic::{AtomicU64, Ordering};
use parking_lot::Mutex;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use serde::Serialize;
use serde_json::Value;

/// Header carrying the session id assigned by the server.
pub const SESSION_HEADER: &str = "mcp-session-id";

/// A channel to one MCP server.
#[async_trait]
pub trait McpTransport: Send + Sync {
    /// Sends a request and returns its `result`.
    ///
    /// # Errors
    ///
    /// Transport failures, HTTP errors, or the server's JSON-RPC error.
    async fn request(&self, method: &str, params: Option<Value>) -> Result<Value, McpError>;

    /// Sends a notification. No response is expected.
    ///
    /// # Errors
    ///
    /// Transport failures or HTTP errors.
    async fn notify(&self, method: &str, params: Option<Value>) -> Result<(), McpError>;
}

/// Streamable HTTP transport.
#[derive(Debug)]
pub struct HttpTransport {
    client: reqwest::Client,
    url: String,
    next_id: AtomicU64,
    session_id: Mutex<Option<String>>,
}

impl HttpTransport {
    /// Creates a transport for the endpoint at `url`, e.g. `https://docs.example.com/mcp`.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            url: url.into(),
            next_id: AtomicU64::new(1),
            session_id: Mutex::new(None),
        }
    }

    /// The endpoint messages are posted to.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    async fn post(&self, body: &impl Serialize) -> Result<reqwest::Response, McpError> {
        let mut request = self
            .client
            .post(&self.url)
            .header(ACCEPT, "application/json, text/event-stream")
            .json(body);
        let session = self.session_id.lock().clone();
        if let Some(session) = session {
            request = request.header(SESSION_HEADER, session);
        }

        let response = request
            .send()
            .await
            .map_err(|err| McpError::Http(err.to_string()))?;

        if let Some(session) = response
            .headers()
            .get(SESSION_HEADER)
            .and_then(|value| value.to_str().ok())
        {
            *self.session_id.lock() = Some(session.to_string());
        }
        Ok(response)
    }
}

#[async_trait]
impl McpTransport for HttpTransport {
    async fn request(&self, method: &str, params: Option<Value>) -> Result<Value, McpError> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        tracing::debug!(url = %self.url, method, id, "sending MCP request");

        let response = self.post(&JsonRpcRequest::new(method, params, id)).await?;
        let status = response.status();
        let is_stream = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .is_some_and(|value| value.starts_with("text/event-stream"));
        let body = response
            .text()
            .await
            .map_err(|err| McpError::Http(err.to_string()))?;

        if !status.is_success() {
            return Err(McpError::Status {
                status: status.as_u16(),
                message: body,
            });
        }

        let response = if is_stream {
            find_event_response(&body, &RequestId::Number(id))?
        } else {
            serde_json::from_str::<JsonRpcResponse>(&body)?
        };
        response.into_result()
    }

    async fn notify(&self, method: &str, params: Option<Value>) -> Result<(), McpError> {
        tracing::debug!(url = %self.url, method, "sending MCP notification");
        let response = self.post(&JsonRpcNotification::new(method, params)).await?;
        let status = response.status();
        if status.is_success() {
            return Ok(());
        }
        let message = response.text().await.unwrap_or_default();
        Err(McpError::Status {
            status: status.as_u16(),
            message,
        })
    }
}

/// Finds the response to `id` in a server-sent event stream.
///
/// Events are separated by blank lines; the `data:` lines of one event form
/// one JSON-RPC message. Server requests and notifications are skipped.
fn find_event_response(stream: &str, id: &RequestId) -> Result<JsonRpcResponse, McpError> {
    let normalized = stream.replace("\r\n", "\n");
    normalized
        .split("\n\n")
        .filter_map(|event| {
            let data: Vec<&str> = event
                .lines()
                .filter_map(|line| line.strip_prefix("data:"))
                .map(|data| data.strip_prefix(' ').unwrap_or(data))
                .collect();
            (!data.is_empty()).then(|| data.join("\n"))
        })
        .filter_map(|data| serde_json::from_str::<JsonRpcResponse>(&data).ok())
        .find(|response| &response.id == id)
        .ok_or_else(|| {
            McpError::InvalidResponse(format!("event stream has no response to request {id:?}"))
        })
}
