//! Sandboxed, read-only introspection tools.
//!
//! Everything in this crate is confined to a single [`SandboxRoot`] chosen at
//! startup. The [`Sandbox`] operations are plain synchronous functions of the
//! root and their arguments:
//!
//! - [`Sandbox::list_tree`]: recursive directory listing as a [`DirectoryTree`]
//! - [`Sandbox::list_commits`]: newest-first [`CommitRecord`]s of one branch
//! - [`Sandbox::read_file`]: UTF-8 text file contents
//!
//! Failures are returned as [`SandboxError`] values, never panics, so they
//! can be handed back to a model as tool output. [`register_sandbox_tools`]
//! exposes the three operations as [`Tool`](ferret_tools::Tool)s.
//!
//! # Example
//!
//! ```no_run
//! use ferret_sandbox::{Sandbox, SandboxRoot};
//!
//! let sandbox = Sandbox::new(SandboxRoot::new("/home/me/project").unwrap());
//! let readme = sandbox.read_file("/home/me/project/README.md").unwrap();
//! let outside = sandbox.read_file("/etc/passwd");
//! assert!(outside.is_err());
//! ```

mod error;
mod git;
mod root;
mod sandbox;
mod tools;
mod tree;

pub use error::SandboxError;
pub use git::{CommitRecord, DEFAULT_BRANCH, MAX_COMMITS};
pub use root::SandboxRoot;
pub use sandbox::Sandbox;
pub use tools::{GetGitCommits, ListFilesAndDirectories, ReadTextFile, register_sandbox_tools};
pub use tree::{DirectoryTree, TreeNode};
