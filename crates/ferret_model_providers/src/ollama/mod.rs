//! Ollama provider backend.
//!
//! Uses the non-streaming Ollama chat API (`POST /api/chat`).

mod client;
mod provider;
mod types;

pub use client::OllamaClient;
pub use provider::OllamaProvider;

/// Name under which the provider is registered.
pub const PROVIDER_NAME: &str = "ollama";

/// Address of a locally running Ollama server.
pub const DEFAULT_BASE_URL: &str = "http://localhost:11434";
