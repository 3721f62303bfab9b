//! Model provider interface and registry for Ferret.
//!
//! Provides a unified interface for language model access, decoupling the
//! conversation loop from any particular model server.
//!
//! # Overview
//!
//! - Provider-agnostic: consumers depend only on this crate, not on a
//!   specific provider crate.
//! - Runtime registration: providers are registered by name in a
//!   [`ModelRegistry`] and resolved from `"provider/model"` identifiers, so the
//!   model can be swapped via configuration.
//!
//! # Example
//!
//! ```ignore
//! use ferret_models::ModelRegistry;
//! use ferret_models::llm::{GenerationRequest, Message};
//!
//! let mut registry = ModelRegistry::new();
//! registry.register_llm_provider("ollama", Arc::new(provider));
//!
//! let llm = registry.llm("ollama/devstral")?;
//! let request = GenerationRequest::with_system("You are helpful", "Hello!");
//! let response = llm.generate(request).await?;
//! ```

pub mod error;
pub mod llm;
mod registry;

pub use registry::ModelRegistry;
