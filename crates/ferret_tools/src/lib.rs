//! Tool framework for Ferret agents.
//!
//! This crate provides the infrastructure for defining, registering, and
//! executing tools that LLM agents can call. A tool declares a JSON schema for
//! its input; the [`ToolRegistry`] validates every invocation against that
//! schema before running it, and bounds each run with a timeout.
//!
//! # Quick Start
//!
//! ```ignore
//! use ferret_tools::{Tool, ToolError, ToolInvocation, ToolRegistry, parse_arguments, tool_definition};
//!
//! #[derive(Deserialize, JsonSchema)]
//! struct EchoParams {
//!     /// Text to echo back.
//!     text: String,
//! }
//!
//! struct Echo;
//!
//! impl Tool for Echo {
//!     fn definition(&self) -> ToolDefinition {
//!         tool_definition::<EchoParams>("echo", "Echo the input back.")
//!     }
//!
//!     fn execute(&self, args: Value) -> Pin<Box<dyn Future<Output = Result<Value, ToolError>> + Send + '_>> {
//!         Box::pin(async move {
//!             let params: EchoParams = parse_arguments(args)?;
//!             Ok(Value::String(params.text))
//!         })
//!     }
//! }
//!
//! let mut registry = ToolRegistry::new();
//! registry.register(Echo);
//! let output = registry.execute(&invocation).await?;
//! ```
//!
//! # Architecture
//!
//! - [`Tool`]: trait for executable tools with JSON schema
//! - [`ToolRegistry`]: stores, validates and dispatches tools
//! - [`ToolInvocation`]: a correlated request to run one tool
//! - [`tool_definition`]: schema derivation from a parameter struct

pub mod error;
pub mod invocation;
pub mod registry;
pub mod schema;
pub mod tool;

// Re-export core types at crate root.
pub use error::ToolError;
pub use invocation::{ToolInvocation, parse_arguments};
pub use registry::{DEFAULT_TOOL_TIMEOUT, ToolRegistry};
pub use schema::tool_definition;
pub use tool::Tool;
