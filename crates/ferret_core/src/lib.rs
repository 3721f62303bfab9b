//! Shared infrastructure for Ferret binaries.
//!
//! Currently this is the logging setup: [`TracingConfig`] describes the
//! subscriber and [`init_tracing`] installs it. Log output always goes to
//! stderr because stdout carries the conversation.

mod logging;

pub use logging::{ParseFormatError, TracingConfig, TracingFormat, init_tracing};
