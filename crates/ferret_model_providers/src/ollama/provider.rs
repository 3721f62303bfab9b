//! Ollama [`LlmProvider`] implementation.

use super::client::OllamaClient;
use super::types::{
    ChatMessage, ChatOptions, ChatRequest, ChatResponse, FunctionCall, FunctionDef, Role,
    ToolCallParam, ToolDef,
};
use async_trait::async_trait;
use ferret_models::llm::{
    AssistantBlock, GenerationError, GenerationRequest, GenerationResponse, LlmProvider, Message,
    ToolCall, ToolChoice, ToolResultStatus, Usage,
};

/// Ollama [`LlmProvider`] implementation.
#[derive(Debug, Clone)]
pub struct OllamaProvider {
    client: OllamaClient,
}

impl OllamaProvider {
    /// Creates a provider for the Ollama server at `base_url`.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: OllamaClient::new(base_url),
        }
    }

    /// The underlying HTTP client.
    #[must_use]
    pub fn client(&self) -> &OllamaClient {
        &self.client
    }
}

#[async_trait]
impl LlmProvider for OllamaProvider {
    async fn generate(
        &self,
        model: &str,
        request: GenerationRequest,
    ) -> Result<GenerationResponse, GenerationError> {
        let ollama_request = convert_request(model, &request)?;

        let response = self.client.chat(&ollama_request).await?;

        Ok(convert_response(response))
    }
}

fn convert_request(
    model: &str,
    request: &GenerationRequest,
) -> Result<ChatRequest, GenerationError> {
    if request.messages.is_empty() {
        return Err(GenerationError::InvalidRequest(
            "request has no messages".to_string(),
        ));
    }

    let messages = request.messages.iter().map(convert_message).collect();

    // Ollama has no tool choice parameter; "none" is expressed by sending no tools.
    let tools = match request.tool_choice {
        Some(ToolChoice::None) => None,
        _ => request.tools.as_ref().map(|tools| {
            tools
                .iter()
                .map(|tool| ToolDef {
                    kind: "function",
                    function: FunctionDef {
                        name: tool.name.clone(),
                        description: tool.description.clone(),
                        parameters: tool.parameters.clone(),
                    },
                })
                .collect()
        }),
    };

    let options = request.temperature.map(|temperature| ChatOptions {
        temperature: Some(temperature),
    });

    Ok(ChatRequest {
        model: model.to_string(),
        messages,
        tools,
        stream: false,
        options,
    })
}

fn convert_message(message: &Message) -> ChatMessage {
    match message {
        Message::System { content } => ChatMessage::text(Role::System, content.clone()),
        Message::User { content } => ChatMessage::text(Role::User, content.clone()),
        Message::Assistant { content, .. } => {
            let mut text = String::new();
            let mut thinking = Vec::new();
            let mut tool_calls = Vec::new();
            for block in content {
                match block {
                    AssistantBlock::Text { text: part } => text.push_str(part),
                    AssistantBlock::Reasoning(reasoning) => {
                        thinking.push(reasoning.reasoning.as_str());
                    }
                    AssistantBlock::ToolCall(call) => tool_calls.push(ToolCallParam {
                        id: Some(call.id.clone()),
                        function: FunctionCall {
                            name: call.function.name.clone(),
                            arguments: call.function.arguments.clone(),
                        },
                    }),
                }
            }
            ChatMessage {
                role: Role::Assistant,
                content: text,
                thinking: (!thinking.is_empty()).then(|| thinking.join("\n")),
                tool_calls,
                tool_name: None,
            }
        }
        Message::Tool(result) => {
            let content = match result.status {
                ToolResultStatus::Success => result.content.clone(),
                ToolResultStatus::Error => format!("Error: {}", result.content),
            };
            ChatMessage {
                tool_name: Some(result.tool_name.clone()),
                ..ChatMessage::text(Role::Tool, content)
            }
        }
    }
}

fn convert_response(response: ChatResponse) -> GenerationResponse {
    tracing::debug!(
        done_reason = response.done_reason.as_deref().unwrap_or("unknown"),
        "chat response received"
    );

    let message = response.message;
    let mut content = Vec::new();
    if let Some(thinking) = message.thinking.filter(|t| !t.is_empty()) {
        content.push(AssistantBlock::reasoning(thinking));
    }
    if !message.content.is_empty() {
        content.push(AssistantBlock::text(message.content));
    }
    content.extend(message.tool_calls.into_iter().map(|call| {
        // Older servers omit call ids; results are matched by id downstream.
        let id = call
            .id
            .filter(|id| !id.is_empty())
            .unwrap_or_else(|| format!("call_{}", nanoid::nanoid!(12)));
        AssistantBlock::tool_call(ToolCall::new(id, call.function.name, call.function.arguments))
    }));

    let usage = Usage {
        input_tokens: response.prompt_eval_count,
        output_tokens: response.eval_count,
        total_tokens: response
            .prompt_eval_count
            .zip(response.eval_count)
            .map(|(input, output)| input + output),
    };

    GenerationResponse { content, usage }
}
