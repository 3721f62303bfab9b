//! The conversation state machine.

use crate::history::History;
use crate::io::{IOError, OutputMessage, UserIO};
use crate::quit::QuitWords;
use crate::responder::{Responder, ResponderError};
use ferret_models::llm::Message;
use std::sync::Arc;
use std::time::Instant;

/// Consecutive input failures after which the session gives up.
pub const MAX_INPUT_FAILURES: usize = 3;

/// State of a [`Conversation`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    /// Waiting for the next line of user input.
    AwaitingInput,
    /// A user message was recorded and the responder has not run yet.
    Responding,
    /// The session is over. Terminal.
    Done,
}

/// One interactive session.
///
/// Owns the history exclusively. Each [`step`](Self::step) performs exactly
/// one state transition:
///
/// - **AwaitingInput**: reads a line. Blank lines are ignored. A quit word or
///   end of input moves to `Done` without calling the responder. A failed
///   read is reported and the loop keeps waiting. Anything else is recorded
///   as a user message and moves to `Responding`.
/// - **Responding**: calls the responder with the full history. On success
///   the turn's messages are appended and the reply text is shown; on
///   failure the error is shown and the history keeps the user message. Both
///   return to `AwaitingInput`.
/// - **Done**: stays `Done`.
pub struct Conversation {
    session_id: String,
    responder: Arc<dyn Responder>,
    io: UserIO,
    quit_words: QuitWords,
    history: History,
    state: LoopState,
    input_failures: usize,
}

impl core::fmt::Debug for Conversation {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Conversation")
            .field("session_id", &self.session_id)
            .field("state", &self.state)
            .field("messages", &self.history.len())
            .finish_non_exhaustive()
    }
}

impl Conversation {
    /// Creates a session that starts in [`LoopState::AwaitingInput`].
    #[must_use]
    pub fn new(responder: Arc<dyn Responder>, io: UserIO, history: History) -> Self {
        Self {
            session_id: nanoid::nanoid!(),
            responder,
            io,
            quit_words: QuitWords::default(),
            history,
            state: LoopState::AwaitingInput,
            input_failures: 0,
        }
    }

    /// Replaces the quit words.
    #[must_use]
    pub fn with_quit_words(mut self, quit_words: QuitWords) -> Self {
        self.quit_words = quit_words;
        self
    }

    /// Identifier used to correlate log events of this session.
    #[must_use]
    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    /// The current state.
    #[must_use]
    pub fn state(&self) -> LoopState {
        self.state
    }

    /// The history so far.
    #[must_use]
    pub fn history(&self) -> &History {
        &self.history
    }

    /// Performs one state transition and returns the new state.
    ///
    /// # Errors
    ///
    /// Returns [`IOError`] if output cannot be delivered, or if input fails
    /// [`MAX_INPUT_FAILURES`] times in a row.
    pub async fn step(&mut self) -> Result<LoopState, IOError> {
        self.state = match self.state {
            LoopState::AwaitingInput => self.await_input().await?,
            LoopState::Responding => self.respond().await?,
            LoopState::Done => LoopState::Done,
        };
        Ok(self.state)
    }

    /// Steps until the session is [`LoopState::Done`].
    ///
    /// # Errors
    ///
    /// Same as [`step`](Self::step).
    pub async fn run(&mut self) -> Result<(), IOError> {
        tracing::info!(session = %self.session_id, "session started");
        while self.step().await? != LoopState::Done {}
        tracing::info!(
            session = %self.session_id,
            messages = self.history.len(),
            "session ended"
        );
        Ok(())
    }

    async fn await_input(&mut self) -> Result<LoopState, IOError> {
        let line = match self.io.receive().await {
            Ok(line) => line,
            Err(IOError::Closed) => {
                tracing::debug!(session = %self.session_id, "end of input");
                return Ok(LoopState::Done);
            }
            Err(err) => {
                self.input_failures += 1;
                tracing::warn!(
                    session = %self.session_id,
                    error = %err,
                    failures = self.input_failures,
                    "failed to read input"
                );
                if self.input_failures >= MAX_INPUT_FAILURES {
                    return Err(err);
                }
                self.io.send(OutputMessage::error(format!("Error: {err}"))).await?;
                return Ok(LoopState::AwaitingInput);
            }
        };
        self.input_failures = 0;

        if line.trim().is_empty() {
            return Ok(LoopState::AwaitingInput);
        }
        if self.quit_words.matches(&line) {
            tracing::debug!(session = %self.session_id, "quit word received");
            return Ok(LoopState::Done);
        }

        self.history.push(Message::user(line));
        Ok(LoopState::Responding)
    }

    async fn respond(&mut self) -> Result<LoopState, IOError> {
        let started = Instant::now();
        let outcome = self
            .responder
            .respond(self.history.messages())
            .await
            .and_then(|turn| {
                let reply = turn.last().and_then(Message::assistant_text);
                reply
                    .map(|reply| (turn, reply))
                    .ok_or(ResponderError::MissingReply)
            });

        match outcome {
            Ok((turn, reply)) => {
                tracing::info!(
                    session = %self.session_id,
                    messages = turn.len(),
                    elapsed_ms = started.elapsed().as_millis(),
                    "turn completed"
                );
                self.history.extend(turn);
                if !reply.trim().is_empty() {
                    self.io.send(OutputMessage::reply(reply)).await?;
                }
            }
            Err(err) => {
                tracing::warn!(
                    session = %self.session_id,
                    error = %err,
                    elapsed_ms = started.elapsed().as_millis(),
                    "turn failed"
                );
                self.io.send(OutputMessage::error(format!("Error: {err}"))).await?;
            }
        }
        Ok(LoopState::AwaitingInput)
    }
}
