//! The three sandboxed operations.

use crate::error::SandboxError;
use crate::git::{self, CommitRecord};
use crate::root::SandboxRoot;
use crate::tree::{self, DirectoryTree};
use std::io::ErrorKind;
use std::path::Path;

/// Read-only view of the filesystem below a [`SandboxRoot`].
///
/// Every operation first validates its path argument; nothing is read
/// unless the path is absolute and inside the root.
#[derive(Debug, Clone)]
pub struct Sandbox {
    root: SandboxRoot,
}

impl Sandbox {
    /// Creates a sandbox over `root`.
    #[must_use]
    pub fn new(root: SandboxRoot) -> Self {
        Self { root }
    }

    /// Returns the sandbox root.
    #[must_use]
    pub fn root(&self) -> &SandboxRoot {
        &self.root
    }

    /// Recursively lists the directory at `path`.
    ///
    /// Entries whose name starts with `.` are skipped unless
    /// `include_hidden` is set. Hidden directories are skipped whole.
    ///
    /// # Errors
    ///
    /// Path validation errors, or [`SandboxError::Io`] if `path` (or any
    /// directory below it) cannot be read.
    pub fn list_tree(
        &self,
        path: impl AsRef<Path>,
        include_hidden: bool,
    ) -> Result<DirectoryTree, SandboxError> {
        let dir = self.root.resolve(path.as_ref())?;
        tracing::debug!(path = %dir.display(), include_hidden, "listing directory tree");
        tree::walk(&dir, include_hidden)
    }

    /// Lists up to `limit` commits of `branch` in the repository at
    /// `repo_path`, newest first. `limit` is capped at
    /// [`MAX_COMMITS`](crate::MAX_COMMITS).
    ///
    /// # Errors
    ///
    /// Path validation errors (including a `.git` that leads outside the
    /// root), or [`SandboxError::Repo`] if the path is not a repository, the
    /// branch does not exist, or git is unavailable.
    pub fn list_commits(
        &self,
        repo_path: impl AsRef<Path>,
        branch: &str,
        limit: usize,
    ) -> Result<Vec<CommitRecord>, SandboxError> {
        let repo = self.root.resolve(repo_path.as_ref())?;
        tracing::debug!(repo = %repo.display(), branch, limit, "listing commits");
        git::log(&self.root, &repo, branch, limit)
    }

    /// Reads the file at `path` as UTF-8 text.
    ///
    /// # Errors
    ///
    /// Path validation errors, [`SandboxError::FileNotFound`] if nothing
    /// exists at `path`, or [`SandboxError::Io`] for unreadable or non-UTF-8
    /// content.
    pub fn read_file(&self, path: impl AsRef<Path>) -> Result<String, SandboxError> {
        let requested = path.as_ref();
        let file = self.root.resolve(requested)?;
        tracing::debug!(path = %file.display(), "reading file");

        let bytes = std::fs::read(&file).map_err(|err| match err.kind() {
            ErrorKind::NotFound => SandboxError::FileNotFound {
                path: requested.to_path_buf(),
            },
            _ => SandboxError::io(format!("{}: {err}", requested.display())),
        })?;

        String::from_utf8(bytes).map_err(|_| {
            SandboxError::io(format!("{} is not valid UTF-8 text", requested.display()))
        })
    }
}
