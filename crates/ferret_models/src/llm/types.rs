//! Core types for LLM generation requests and responses.

use serde::{Deserialize, Serialize};
use serde_json::Value;

// ─────────────────────
// Request / Response
// ─────────────────────

/// A generation request to a model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationRequest {
    /// The messages to send to the model, system prompt included.
    pub messages: Vec<Message>,
    /// Available tools the model can call.
    pub tools: Option<Vec<ToolDefinition>>,
    /// How the model should choose tools.
    pub tool_choice: Option<ToolChoice>,
    /// Sampling temperature. Providers fall back to their own default when unset.
    pub temperature: Option<f32>,
}

impl GenerationRequest {
    /// Creates a new generation request with a user message.
    ///
    /// # Example
    ///
    /// ```rust
    /// use ferret_models::llm::GenerationRequest;
    ///
    /// let request = GenerationRequest::new("What changed in the last commit?");
    /// assert_eq!(request.messages.len(), 1);
    /// ```
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self::from_messages(vec![Message::user(message)])
    }

    /// Creates a new generation request with a system prompt and user message.
    ///
    /// # Example
    ///
    /// ```rust
    /// use ferret_models::llm::{GenerationRequest, Message};
    ///
    /// let request = GenerationRequest::with_system(
    ///     "You are a helpful coding assistant",
    ///     "List the files in the project"
    /// );
    /// assert!(matches!(request.messages[0], Message::System { .. }));
    /// ```
    #[must_use]
    pub fn with_system(system: impl Into<String>, message: impl Into<String>) -> Self {
        Self::from_messages(vec![Message::system(system), Message::user(message)])
    }

    /// Creates a request from an existing conversation.
    #[must_use]
    pub fn from_messages(messages: Vec<Message>) -> Self {
        Self {
            messages,
            tools: None,
            tool_choice: None,
            temperature: None,
        }
    }

    /// Adds conversation history before the current messages.
    ///
    /// The messages provided will be prepended to the existing messages.
    #[must_use]
    pub fn history(mut self, mut messages: Vec<Message>) -> Self {
        messages.append(&mut self.messages);
        self.messages = messages;
        self
    }

    /// Adds a single tool to the request.
    ///
    /// This can be called multiple times to add multiple tools.
    #[must_use]
    pub fn tool(mut self, tool: ToolDefinition) -> Self {
        self.tools.get_or_insert_with(Vec::new).push(tool);
        self
    }

    /// Sets all available tools, replacing any previously added tools.
    #[must_use]
    pub fn tools(mut self, tools: Vec<ToolDefinition>) -> Self {
        self.tools = Some(tools);
        self
    }

    /// Sets how the model should choose tools.
    #[must_use]
    pub fn tool_choice(mut self, choice: ToolChoice) -> Self {
        self.tool_choice = Some(choice);
        self
    }

    /// Allows the model to decide whether to call tools.
    ///
    /// Shorthand for `.tool_choice(ToolChoice::Auto)`.
    #[must_use]
    pub fn auto_tool(mut self) -> Self {
        self.tool_choice = Some(ToolChoice::Auto);
        self
    }

    /// Sets the sampling temperature.
    #[must_use]
    pub fn temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }
}

/// A generation response from a model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationResponse {
    /// The generated content blocks.
    pub content: Vec<AssistantBlock>,
    /// Token usage information.
    pub usage: Usage,
}

impl GenerationResponse {
    /// Returns all text content blocks concatenated into a single string.
    ///
    /// Returns an empty string if no text content is found.
    #[must_use]
    pub fn text(&self) -> String {
        join_text(&self.content)
    }

    /// Returns the tool calls requested by the model, in order.
    #[must_use]
    pub fn tool_calls(&self) -> Vec<&ToolCall> {
        self.content
            .iter()
            .filter_map(|block| match block {
                AssistantBlock::ToolCall(call) => Some(call),
                _ => None,
            })
            .collect()
    }

    /// Converts the response into an assistant message for the history.
    #[must_use]
    pub fn into_message(self) -> Message {
        Message::Assistant {
            id: None,
            content: self.content,
        }
    }
}

/// Token usage information.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Usage {
    /// Number of tokens in the input.
    pub input_tokens: Option<u64>,
    /// Number of tokens in the output.
    pub output_tokens: Option<u64>,
    /// Total tokens (input + output).
    pub total_tokens: Option<u64>,
}

// ─────────────────────
// Messages
// ─────────────────────

/// A message in a conversation.
///
/// The conversation history is an ordered sequence of messages. Tool results
/// carry the correlation id of the [`ToolCall`] they answer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "role", rename_all = "lowercase")]
pub enum Message {
    /// Instructions for the model.
    System {
        /// The system prompt.
        content: String,
    },
    /// A message from the user.
    User {
        /// The user's text.
        content: String,
    },
    /// A message from the assistant.
    Assistant {
        /// Optional identifier for this assistant message.
        id: Option<String>,
        /// The content blocks of the assistant message.
        content: Vec<AssistantBlock>,
    },
    /// The result of a tool invocation.
    Tool(ToolResult),
}

impl Message {
    /// Creates a system message.
    #[must_use]
    pub fn system(text: impl Into<String>) -> Self {
        Self::System {
            content: text.into(),
        }
    }

    /// Creates a user message with text content.
    #[must_use]
    pub fn user(text: impl Into<String>) -> Self {
        Self::User {
            content: text.into(),
        }
    }

    /// Creates an assistant message with text content.
    #[must_use]
    pub fn assistant(text: impl Into<String>) -> Self {
        Self::Assistant {
            id: None,
            content: vec![AssistantBlock::text(text)],
        }
    }

    /// Creates a successful tool result message.
    #[must_use]
    pub fn tool_result(
        id: impl Into<String>,
        tool_name: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self::Tool(ToolResult {
            id: id.into(),
            tool_name: tool_name.into(),
            content: content.into(),
            status: ToolResultStatus::Success,
        })
    }

    /// Creates a failed tool result message.
    #[must_use]
    pub fn tool_error(
        id: impl Into<String>,
        tool_name: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self::Tool(ToolResult {
            id: id.into(),
            tool_name: tool_name.into(),
            content: content.into(),
            status: ToolResultStatus::Error,
        })
    }

    /// Returns `true` for assistant messages.
    #[must_use]
    pub fn is_assistant(&self) -> bool {
        matches!(self, Self::Assistant { .. })
    }

    /// Returns the text of an assistant message, or `None` for other roles.
    ///
    /// Tool calls and reasoning blocks are skipped.
    #[must_use]
    pub fn assistant_text(&self) -> Option<String> {
        match self {
            Self::Assistant { content, .. } => Some(join_text(content)),
            _ => None,
        }
    }
}

fn join_text(blocks: &[AssistantBlock]) -> String {
    blocks
        .iter()
        .filter_map(|block| match block {
            AssistantBlock::Text { text } => Some(text.as_str()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("")
}

// ─────────────────────
// Content Blocks
// ─────────────────────

/// Content that can appear in an assistant message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AssistantBlock {
    /// Plain text content.
    Text {
        /// The text.
        text: String,
    },
    /// A tool call request from the model.
    ToolCall(ToolCall),
    /// Reasoning/thinking content from the model.
    Reasoning(ReasoningBlock),
}

impl AssistantBlock {
    /// Creates a text content block.
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text { text: text.into() }
    }

    /// Creates a tool call content block.
    #[must_use]
    pub fn tool_call(call: ToolCall) -> Self {
        Self::ToolCall(call)
    }

    /// Creates a reasoning content block.
    #[must_use]
    pub fn reasoning(reasoning: impl Into<String>) -> Self {
        Self::Reasoning(ReasoningBlock {
            reasoning: reasoning.into(),
        })
    }
}

/// Reasoning/thinking content from thinking models.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReasoningBlock {
    /// The reasoning text.
    pub reasoning: String,
}

// ─────────────────────
// Tool Calling
// ─────────────────────

/// Definition of a tool that can be called by the model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolDefinition {
    /// Name of the tool (e.g., `read_text_file`).
    pub name: String,
    /// Human-readable description of what the tool does.
    pub description: String,
    /// JSON Schema defining the tool's parameters.
    ///
    /// This should be an object schema with properties defining each parameter.
    /// Example:
    /// ```json
    /// {
    ///   "type": "object",
    ///   "properties": {
    ///     "path": {"type": "string", "description": "Absolute file path"}
    ///   },
    ///   "required": ["path"]
    /// }
    /// ```
    pub parameters: Value,
}

/// Controls how the model should select tools.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToolChoice {
    /// Model decides whether to call tools or respond with text.
    Auto,
    /// Model must call at least one tool.
    Required,
    /// Model must not call any tools.
    None,
}

/// A tool call request from the model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolCall {
    /// Correlation id linking this call to its [`ToolResult`].
    pub id: String,
    /// The function to call.
    pub function: ToolFunction,
}

impl ToolCall {
    /// Creates a tool call.
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>, arguments: Value) -> Self {
        Self {
            id: id.into(),
            function: ToolFunction {
                name: name.into(),
                arguments,
            },
        }
    }
}

/// A tool function to be called.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolFunction {
    /// The name of the function to call.
    pub name: String,
    /// The arguments to pass to the function.
    pub arguments: Value,
}

/// Status of a tool result.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToolResultStatus {
    /// The tool executed successfully.
    #[default]
    Success,
    /// The tool encountered an error.
    Error,
}

/// Result of a tool call execution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolResult {
    /// Identifier linking this result to the original tool call.
    pub id: String,
    /// Name of the tool that produced the result.
    ///
    /// Some providers correlate results by tool name rather than by id.
    pub tool_name: String,
    /// The result content, as text.
    pub content: String,
    /// Whether this result represents a success or error.
    #[serde(default)]
    pub status: ToolResultStatus,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn history_is_prepended() {
        let request = GenerationRequest::new("second")
            .history(vec![Message::system("sys"), Message::user("first")]);

        assert_eq!(
            request.messages,
            vec![
                Message::system("sys"),
                Message::user("first"),
                Message::user("second"),
            ]
        );
    }

    #[test]
    fn response_text_skips_tool_calls() {
        let response = GenerationResponse {
            content: vec![
                AssistantBlock::text("Looking"),
                AssistantBlock::tool_call(ToolCall::new("c1", "read_text_file", Value::Null)),
                AssistantBlock::text(" now."),
            ],
            usage: Usage::default(),
        };

        assert_eq!(response.text(), "Looking now.");
        assert_eq!(response.tool_calls().len(), 1);
        assert_eq!(response.tool_calls()[0].function.name, "read_text_file");
    }

    #[test]
    fn assistant_text_only_for_assistant_messages() {
        assert_eq!(
            Message::assistant("hi").assistant_text().as_deref(),
            Some("hi")
        );
        assert_eq!(Message::user("hi").assistant_text(), None);
        assert!(Message::assistant("").is_assistant());
        assert!(!Message::system("x").is_assistant());
    }

    #[test]
    fn messages_serialize_with_role_tag() {
        let value = serde_json::to_value(Message::tool_error("c1", "read_text_file", "nope"))
            .unwrap();
        assert_eq!(value["role"], "tool");
        assert_eq!(value["id"], "c1");
        assert_eq!(value["status"], "error");

        let value = serde_json::to_value(Message::user("hello")).unwrap();
        assert_eq!(value, serde_json::json!({"role": "user", "content": "hello"}));
    }
}
