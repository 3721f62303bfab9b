//! User-facing input and output.
//!
//! [`IOProvider`] is the contract for a concrete channel: receive one line of
//! user input, send one [`OutputMessage`]. It uses return-position `impl
//! Future`, which is not object safe, so [`UserIO`] erases it behind boxed
//! futures for storage in a [`Conversation`](crate::Conversation).
//!
//! | Provider | Input | Output |
//! |----------|-------|--------|
//! | [`TerminalIO`] | stdin, one line per read | replies on stdout, notices and errors on stderr |
//! | [`MockIOProvider`] | scripted queue | recorded in memory |

use core::future::Future;
use core::pin::Pin;
use std::io::{BufRead as _, IsTerminal as _, Write as _};
use std::sync::Arc;
use thiserror::Error;

// ─────────────────────────────────────────────────────────────────────────────
// Errors
// ─────────────────────────────────────────────────────────────────────────────

/// Errors from an [`IOProvider`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IOError {
    /// The input channel is closed (end of input).
    #[error("I/O channel closed")]
    Closed,
    /// A provider-specific error.
    #[error("I/O provider error: {0}")]
    Provider(String),
}

// ─────────────────────────────────────────────────────────────────────────────
// Output messages
// ─────────────────────────────────────────────────────────────────────────────

/// What an [`OutputMessage`] carries, so providers can route it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputKind {
    /// The assistant's answer.
    Reply,
    /// Informational text from the application itself.
    Notice,
    /// A failed turn or other error the user should see.
    Error,
}

/// A message for the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputMessage {
    /// Routing category.
    pub kind: OutputKind,
    /// The text to show.
    pub text: String,
}

impl OutputMessage {
    /// An assistant reply.
    #[must_use]
    pub fn reply(text: impl Into<String>) -> Self {
        Self {
            kind: OutputKind::Reply,
            text: text.into(),
        }
    }

    /// An application notice.
    #[must_use]
    pub fn notice(text: impl Into<String>) -> Self {
        Self {
            kind: OutputKind::Notice,
            text: text.into(),
        }
    }

    /// An error report.
    #[must_use]
    pub fn error(text: impl Into<String>) -> Self {
        Self {
            kind: OutputKind::Error,
            text: text.into(),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Provider trait
// ─────────────────────────────────────────────────────────────────────────────

/// A concrete user channel.
pub trait IOProvider: Send + Sync + 'static {
    /// Shows a message to the user.
    fn send(&self, message: OutputMessage)
    -> impl Future<Output = Result<(), IOError>> + Send + '_;

    /// Waits for the next line of user input, without its line terminator.
    ///
    /// Returns [`IOError::Closed`] at end of input.
    fn receive(&self) -> impl Future<Output = Result<String, IOError>> + Send + '_;
}

type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

trait ErasedProvider: Send + Sync + 'static {
    fn send_erased(&self, message: OutputMessage) -> BoxFuture<'_, Result<(), IOError>>;
    fn receive_erased(&self) -> BoxFuture<'_, Result<String, IOError>>;
}

impl<T: IOProvider> ErasedProvider for T {
    fn send_erased(&self, message: OutputMessage) -> BoxFuture<'_, Result<(), IOError>> {
        Box::pin(self.send(message))
    }

    fn receive_erased(&self) -> BoxFuture<'_, Result<String, IOError>> {
        Box::pin(self.receive())
    }
}

/// Type-erased handle to an [`IOProvider`].
///
/// Cloning is cheap; clones share the provider.
#[derive(Clone)]
pub struct UserIO {
    provider: Arc<dyn ErasedProvider>,
}

impl core::fmt::Debug for UserIO {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("UserIO").finish_non_exhaustive()
    }
}

impl UserIO {
    /// Wraps `provider`.
    #[must_use]
    pub fn new<P: IOProvider>(provider: Arc<P>) -> Self {
        Self { provider }
    }

    /// Sends a message through the underlying provider.
    ///
    /// # Errors
    ///
    /// Returns [`IOError`] if the provider fails to deliver the message.
    pub async fn send(&self, message: OutputMessage) -> Result<(), IOError> {
        self.provider.send_erased(message).await
    }

    /// Receives a line from the underlying provider.
    ///
    /// # Errors
    ///
    /// Returns [`IOError::Closed`] at end of input, or a provider error.
    pub async fn receive(&self) -> Result<String, IOError> {
        self.provider.receive_erased().await
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Terminal
// ─────────────────────────────────────────────────────────────────────────────

const STYLE_DIM: &str = "\x1b[2m";
const STYLE_RED: &str = "\x1b[31m";
const STYLE_RESET: &str = "\x1b[0m";

/// Prompt shown before each line of input.
pub const DEFAULT_PROMPT: &str = "User: ";

/// Reads from stdin and writes to stdout/stderr.
///
/// Replies go to stdout. Notices and errors go to stderr so that stdout
/// carries only the conversation; when stderr is a terminal they are dimmed
/// and red respectively.
///
/// Input is decoded leniently: invalid UTF-8 is replaced, not rejected.
#[derive(Debug, Clone)]
pub struct TerminalIO {
    prompt: String,
    styled: bool,
}

impl Default for TerminalIO {
    fn default() -> Self {
        Self::new()
    }
}

impl TerminalIO {
    /// Creates a terminal provider with the default prompt.
    #[must_use]
    pub fn new() -> Self {
        Self {
            prompt: DEFAULT_PROMPT.to_string(),
            styled: std::io::stderr().is_terminal(),
        }
    }

    /// Replaces the input prompt.
    #[must_use]
    pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = prompt.into();
        self
    }

    /// Forces ANSI styling of notices and errors on or off.
    #[must_use]
    pub fn with_styles(mut self, styled: bool) -> Self {
        self.styled = styled;
        self
    }

    fn style(&self, kind: OutputKind, text: &str) -> String {
        let style = match kind {
            OutputKind::Reply => return text.to_string(),
            OutputKind::Notice => STYLE_DIM,
            OutputKind::Error => STYLE_RED,
        };
        if self.styled {
            format!("{style}{text}{STYLE_RESET}")
        } else {
            text.to_string()
        }
    }
}

/// Strips the line terminator from raw input and replaces invalid UTF-8.
fn decode_line(raw: &[u8]) -> String {
    let line = raw.strip_suffix(b"\n").unwrap_or(raw);
    let line = line.strip_suffix(b"\r").unwrap_or(line);
    String::from_utf8_lossy(line).into_owned()
}

#[expect(
    clippy::print_stdout,
    clippy::print_stderr,
    reason = "the terminal provider is the user-facing console"
)]
impl IOProvider for TerminalIO {
    async fn send(&self, message: OutputMessage) -> Result<(), IOError> {
        let text = self.style(message.kind, &message.text);
        match message.kind {
            OutputKind::Reply => println!("{text}"),
            OutputKind::Notice | OutputKind::Error => eprintln!("{text}"),
        }
        Ok(())
    }

    async fn receive(&self) -> Result<String, IOError> {
        let prompt = self.prompt.clone();
        tokio::task::spawn_blocking(move || {
            let mut stdout = std::io::stdout();
            print!("\n{prompt}");
            stdout
                .flush()
                .map_err(|err| IOError::Provider(err.to_string()))?;

            let mut raw = Vec::new();
            let read = std::io::stdin()
                .lock()
                .read_until(b'\n', &mut raw)
                .map_err(|err| IOError::Provider(err.to_string()))?;
            if read == 0 {
                return Err(IOError::Closed);
            }
            Ok(decode_line(&raw))
        })
        .await
        .map_err(|err| IOError::Provider(err.to_string()))?
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Mock
// ─────────────────────────────────────────────────────────────────────────────

/// Scripted provider for tests.
///
/// Each [`receive`](IOProvider::receive) pops the next queued line (or
/// queued error) and returns [`IOError::Closed`] once the queue is empty.
/// Sent messages are recorded for inspection.
#[cfg(any(test, feature = "test-utils"))]
#[derive(Debug, Default)]
pub struct MockIOProvider {
    sent: parking_lot::Mutex<Vec<OutputMessage>>,
    receive_queue: parking_lot::Mutex<std::collections::VecDeque<Result<String, IOError>>>,
}

#[cfg(any(test, feature = "test-utils"))]
impl MockIOProvider {
    /// Creates a provider that will return `lines` in order.
    #[must_use]
    pub fn with_input<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let provider = Self::default();
        provider
            .receive_queue
            .lock()
            .extend(lines.into_iter().map(|line| Ok(line.into())));
        provider
    }

    /// Enqueues a line for a later [`receive`](IOProvider::receive).
    pub fn enqueue_receive(&self, line: impl Into<String>) {
        self.receive_queue.lock().push_back(Ok(line.into()));
    }

    /// Enqueues a failure for a later [`receive`](IOProvider::receive).
    pub fn enqueue_error(&self, error: IOError) {
        self.receive_queue.lock().push_back(Err(error));
    }

    /// Takes all sent messages, clearing the record.
    pub fn take_sent(&self) -> Vec<OutputMessage> {
        std::mem::take(&mut *self.sent.lock())
    }

    /// Number of queued lines and errors not yet received.
    #[must_use]
    pub fn receive_queue_len(&self) -> usize {
        self.receive_queue.lock().len()
    }
}

#[cfg(any(test, feature = "test-utils"))]
impl IOProvider for MockIOProvider {
    async fn send(&self, message: OutputMessage) -> Result<(), IOError> {
        self.sent.lock().push(message);
        Ok(())
    }

    async fn receive(&self) -> Result<String, IOError> {
        self.receive_queue
            .lock()
            .pop_front()
            .unwrap_or(Err(IOError::Closed))
    }
}
