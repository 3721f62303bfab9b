//! Interactive conversation loop for Ferret.
//!
//! A [`Conversation`] is an explicit state machine over [`LoopState`]:
//!
//! ```text
//!       blank line / unreadable input
//!              ┌─────────┐
//!              ▼         │
//! ──► AwaitingInput ─────┘ ──── quit word / end of input ───► Done
//!        │     ▲
//!   text │     │ reply printed (or error printed)
//!        ▼     │
//!       Responding
//! ```
//!
//! The model and tool cycle is hidden behind the narrow [`Responder`] trait.
//! [`ToolLoopResponder`] is the production implementation: it alternates
//! between an [`Llm`](ferret_models::llm::Llm) and a
//! [`ToolRegistry`](ferret_tools::ToolRegistry) until the model answers
//! without requesting tools.
//!
//! User interaction goes through an [`IOProvider`], so the loop runs the same
//! against a terminal ([`TerminalIO`]) or a scripted provider in tests.

mod conversation;
mod history;
pub mod io;
mod quit;
mod responder;

pub use conversation::{Conversation, LoopState, MAX_INPUT_FAILURES};
pub use history::History;
#[cfg(any(test, feature = "test-utils"))]
pub use io::MockIOProvider;
pub use io::{IOError, IOProvider, OutputKind, OutputMessage, TerminalIO, UserIO};
pub use quit::{DEFAULT_QUIT_WORDS, QuitWords};
pub use responder::{DEFAULT_MAX_TOOL_ROUNDS, Responder, ResponderError, ToolLoopResponder};
