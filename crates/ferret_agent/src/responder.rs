//! Turn responders.

use async_trait::async_trait;
use ferret_models::llm::{GenerationError, GenerationRequest, Llm, Message, ToolCall};
use ferret_tools::{ToolInvocation, ToolRegistry};
use serde_json::Value;
use std::sync::Arc;
use thiserror::Error;

/// Model rounds allowed per turn before giving up.
pub const DEFAULT_MAX_TOOL_ROUNDS: usize = 10;

/// Errors that end a turn without a reply.
#[derive(Debug, Error)]
pub enum ResponderError {
    /// The model request failed.
    #[error("model request failed: {0}")]
    Generation(#[from] GenerationError),

    /// The model kept requesting tools past the round limit.
    #[error("no answer after {max_rounds} tool rounds")]
    TooManyToolRounds {
        /// The configured limit.
        max_rounds: usize,
    },

    /// The responder finished without an assistant message.
    #[error("responder returned no assistant reply")]
    MissingReply,
}

/// Produces the messages of one turn from the conversation so far.
///
/// `history` ends with the user message that started the turn. The returned
/// messages are appended to the history in order and must end with an
/// assistant message.
#[async_trait]
pub trait Responder: Send + Sync + 'static {
    /// Runs one turn.
    async fn respond(&self, history: &[Message]) -> Result<Vec<Message>, ResponderError>;
}

/// Responder that alternates between a model and a tool registry.
///
/// Each round sends the history, the turn so far, and all tool definitions
/// to the model. Every tool call in the reply is executed in order and
/// answered by a tool result with the same id; tool failures become
/// error-status results so the model can react to them. The turn ends when
/// the model replies without tool calls.
#[derive(Debug, Clone)]
pub struct ToolLoopResponder {
    llm: Llm,
    tools: Arc<ToolRegistry>,
    temperature: Option<f32>,
    max_rounds: usize,
}

impl ToolLoopResponder {
    /// Creates a responder over `llm` and `tools`.
    #[must_use]
    pub fn new(llm: Llm, tools: Arc<ToolRegistry>) -> Self {
        Self {
            llm,
            tools,
            temperature: None,
            max_rounds: DEFAULT_MAX_TOOL_ROUNDS,
        }
    }

    /// Sets the sampling temperature sent with every request.
    #[must_use]
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Sets the maximum number of model rounds per turn.
    #[must_use]
    pub fn with_max_rounds(mut self, max_rounds: usize) -> Self {
        self.max_rounds = max_rounds;
        self
    }

    fn request(&self, history: &[Message], turn: &[Message]) -> GenerationRequest {
        let messages = history.iter().chain(turn).cloned().collect();
        let mut request = GenerationRequest::from_messages(messages);
        let definitions = self.tools.definitions();
        if !definitions.is_empty() {
            request = request.tools(definitions).auto_tool();
        }
        if let Some(temperature) = self.temperature {
            request = request.temperature(temperature);
        }
        request
    }

    async fn run_tool(&self, call: &ToolCall) -> Message {
        let name = &call.function.name;
        tracing::info!(tool = %name, id = %call.id, args = %call.function.arguments, "calling tool");

        let result = match ToolInvocation::from_call(call) {
            Ok(invocation) => self.tools.execute(&invocation).await,
            Err(err) => Err(err),
        };

        match result {
            Ok(Value::String(text)) => Message::tool_result(&call.id, name, text),
            Ok(value) => Message::tool_result(&call.id, name, value.to_string()),
            Err(err) => {
                tracing::warn!(tool = %name, id = %call.id, error = %err, "tool call failed");
                Message::tool_error(&call.id, name, err.to_string())
            }
        }
    }
}

#[async_trait]
impl Responder for ToolLoopResponder {
    async fn respond(&self, history: &[Message]) -> Result<Vec<Message>, ResponderError> {
        let mut turn = Vec::new();

        for round in 1..=self.max_rounds {
            let response = self.llm.generate(self.request(history, &turn)).await?;
            let calls: Vec<ToolCall> = response.tool_calls().into_iter().cloned().collect();
            tracing::debug!(
                round,
                model = self.llm.model_name(),
                tool_calls = calls.len(),
                "model responded"
            );
            turn.push(response.into_message());

            if calls.is_empty() {
                return Ok(turn);
            }
            for call in &calls {
                let result = self.run_tool(call).await;
                turn.push(result);
            }
        }

        Err(ResponderError::TooManyToolRounds {
            max_rounds: self.max_rounds,
        })
    }
}
