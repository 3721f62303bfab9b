//! LLM (Large Language Model) generation capabilities.
//!
//! This module provides the core traits and types for text generation
//! with tool calling.

mod error;
mod model;
mod provider;
mod types;

pub use error::GenerationError;
pub use model::Llm;
pub use provider::LlmProvider;
pub use types::{
    AssistantBlock, GenerationRequest, GenerationResponse, Message, ReasoningBlock, ToolCall,
    ToolChoice, ToolDefinition, ToolFunction, ToolResult, ToolResultStatus, Usage,
};
