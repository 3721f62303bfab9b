//! Quit keyword matching.

use std::collections::BTreeSet;

/// Words that end a session when no custom set is configured.
pub const DEFAULT_QUIT_WORDS: &[&str] = &["quit", "exit", "q"];

/// Case-insensitive set of words that end the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuitWords {
    words: BTreeSet<String>,
}

impl QuitWords {
    /// Creates a set from `words`. Blank words are ignored.
    pub fn new<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let words = words
            .into_iter()
            .map(|word| word.as_ref().trim().to_lowercase())
            .filter(|word| !word.is_empty())
            .collect();
        Self { words }
    }

    /// Returns `true` if `input`, trimmed, is one of the quit words in any case.
    #[must_use]
    pub fn matches(&self, input: &str) -> bool {
        self.words.contains(&input.trim().to_lowercase())
    }

    /// The configured words, lowercase and sorted.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.words.iter().map(String::as_str)
    }
}

impl Default for QuitWords {
    fn default() -> Self {
        Self::new(DEFAULT_QUIT_WORDS)
    }
}
