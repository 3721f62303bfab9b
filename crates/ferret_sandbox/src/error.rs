//! Error types for sandboxed operations.

use std::path::PathBuf;
use thiserror::Error;

/// Errors returned by [`Sandbox`](crate::Sandbox) operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SandboxError {
    /// The requested path is relative.
    #[error("Path must be absolute: {}", path.display())]
    PathNotAbsolute {
        /// The rejected path.
        path: PathBuf,
    },

    /// The requested path is not contained in the sandbox root.
    #[error("Path must be within {}: {}", root.display(), path.display())]
    OutsideSandbox {
        /// The rejected path.
        path: PathBuf,
        /// The sandbox root.
        root: PathBuf,
    },

    /// The requested file does not exist.
    #[error("File not found: {}", path.display())]
    FileNotFound {
        /// The missing path.
        path: PathBuf,
    },

    /// Any other filesystem failure (permissions, encoding, not a directory, ...).
    #[error("I/O error: {message}")]
    Io {
        /// Description of the failure.
        message: String,
    },

    /// Any git-layer failure (not a repository, unknown branch, git unavailable, ...).
    #[error("Repository error: {message}")]
    Repo {
        /// Description of the failure.
        message: String,
    },
}

impl SandboxError {
    pub(crate) fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
        }
    }

    pub(crate) fn repo(message: impl Into<String>) -> Self {
        Self::Repo {
            message: message.into(),
        }
    }
}
