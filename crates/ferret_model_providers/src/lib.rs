//! Model provider backends for Ferret.
//!
//! Each backend implements [`LlmProvider`](ferret_models::llm::LlmProvider)
//! and registers itself with a [`ModelRegistry`](ferret_models::ModelRegistry)
//! under its provider name, so models are addressed as `"provider/model"`.
//!
//! # Supported Providers
//!
//! | Provider | Feature Flag | Description |
//! |----------|--------------|-------------|
//! | Ollama | `ollama` (default) | Local Ollama server, `/api/chat` endpoint |
//!
//! # Usage
//!
//! ```no_run
//! # #[cfg(feature = "ollama")]
//! # {
//! use ferret_model_providers::ollama::{self, OllamaProvider};
//! use ferret_models::ModelRegistry;
//! use std::sync::Arc;
//!
//! let mut registry = ModelRegistry::new();
//! registry.register_llm_provider(
//!     ollama::PROVIDER_NAME,
//!     Arc::new(OllamaProvider::new(ollama::DEFAULT_BASE_URL)),
//! );
//! let llm = registry.llm("ollama/devstral").unwrap();
//! # }
//! ```

#[cfg(feature = "ollama")]
pub mod ollama;

#[cfg(feature = "ollama")]
pub use ollama::OllamaProvider;
