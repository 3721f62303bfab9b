//! A terminal coding assistant whose model can only read inside one sandboxed
//! directory.
//!
//! This crate re-exports the Ferret workspace crates:
//!
//! | Crate | Contents |
//! |-------|----------|
//! | [`models`] | messages, the `LlmProvider` trait, `ModelRegistry` |
//! | [`tools`] | the `Tool` trait and the validating `ToolRegistry` |
//! | [`sandbox`] | root-confined directory, file and git tools |
//! | [`agent`] | the conversation loop and tool-calling responder |
//! | [`providers`] | model server backends (Ollama) |
//! | [`mcp`] | remote MCP tools (documentation search) |
//! | [`logging`] | tracing subscriber setup |
//!
//! The `ferret` binary lives in the `ferret_cli` crate.

pub use ferret_agent as agent;
pub use ferret_core as logging;
pub use ferret_mcp as mcp;
pub use ferret_model_providers as providers;
pub use ferret_models as models;
pub use ferret_sandbox as sandbox;
pub use ferret_tools as tools;

/// Re-export all common types for easy access.
pub mod prelude {
    pub use ferret_agent::{
        Conversation, History, IOProvider, LoopState, OutputMessage, QuitWords, Responder,
        ResponderError, TerminalIO, ToolLoopResponder, UserIO,
    };
    pub use ferret_models::ModelRegistry;
    pub use ferret_models::llm::{GenerationRequest, Llm, LlmProvider, Message};
    pub use ferret_sandbox::{Sandbox, SandboxError, SandboxRoot, register_sandbox_tools};
    pub use ferret_tools::{Tool, ToolError, ToolInvocation, ToolRegistry};
}
