//! [`Tool`] adapters over [`Sandbox`] operations.
//!
//! Sandbox operations block on the filesystem and on `git`, so each adapter
//! runs its operation on the blocking pool. Operation failures are turned
//! into [`ToolError::Execution`] carrying the [`SandboxError`] message, which
//! the conversation loop hands back to the model as tool output.

use crate::error::SandboxError;
use crate::git::{DEFAULT_BRANCH, MAX_COMMITS};
use crate::sandbox::Sandbox;
use core::future::Future;
use core::pin::Pin;
use ferret_models::llm::ToolDefinition;
use ferret_tools::{Tool, ToolError, ToolRegistry, parse_arguments, tool_definition};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;

type ToolFuture<'a> = Pin<Box<dyn Future<Output = Result<Value, ToolError>> + Send + 'a>>;

/// Registers all sandbox tools on `registry`.
///
/// # Panics
///
/// Panics if a tool with one of the sandbox tool names is already registered.
pub fn register_sandbox_tools(registry: &mut ToolRegistry, sandbox: &Sandbox) {
    registry.register(ListFilesAndDirectories::new(sandbox.clone()));
    registry.register(GetGitCommits::new(sandbox.clone()));
    registry.register(ReadTextFile::new(sandbox.clone()));
}

async fn run_blocking<T, F>(op: F) -> Result<T, ToolError>
where
    F: FnOnce() -> Result<T, SandboxError> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(op)
        .await
        .map_err(|err| ToolError::execution(format!("sandbox task failed: {err}")))?
        .map_err(|err| ToolError::execution(err.to_string()))
}

// ─────────────────────────────────────────────────────────────────────
// list_files_and_directories
// ─────────────────────────────────────────────────────────────────────

/// Parameters for [`ListFilesAndDirectories`].
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ListTreeParams {
    /// Absolute path of the directory to list.
    pub path: String,
    /// Include entries whose name starts with a dot.
    #[serde(default)]
    pub hidden_files: bool,
}

/// Recursively lists a directory inside the sandbox.
#[derive(Debug, Clone)]
pub struct ListFilesAndDirectories {
    sandbox: Sandbox,
}

impl ListFilesAndDirectories {
    /// Creates the tool over `sandbox`.
    #[must_use]
    pub fn new(sandbox: Sandbox) -> Self {
        Self { sandbox }
    }
}

impl Tool for ListFilesAndDirectories {
    fn definition(&self) -> ToolDefinition {
        tool_definition::<ListTreeParams>(
            "list_files_and_directories",
            "Recursively list the files and directories under an absolute path. \
             Returns a nested JSON object: directories map to objects, files to null. \
             Hidden entries are skipped unless hidden_files is true.",
        )
    }

    fn execute(&self, args: Value) -> ToolFuture<'_> {
        Box::pin(async move {
            let params: ListTreeParams = parse_arguments(args)?;
            let sandbox = self.sandbox.clone();
            let tree =
                run_blocking(move || sandbox.list_tree(&params.path, params.hidden_files)).await?;
            Ok(serde_json::to_value(tree)?)
        })
    }
}

// ─────────────────────────────────────────────────────────────────────
// get_git_commits
// ─────────────────────────────────────────────────────────────────────

/// Parameters for [`GetGitCommits`].
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct CommitsParams {
    /// Absolute path of the repository (the directory containing `.git`).
    pub repo_path: String,
    /// Branch to list; defaults to `main`.
    #[serde(default)]
    pub branch: Option<String>,
    /// Maximum number of commits to return, newest first (default and maximum 100).
    #[serde(default)]
    pub limit: Option<usize>,
}

/// Lists recent commits of a branch in a repository inside the sandbox.
#[derive(Debug, Clone)]
pub struct GetGitCommits {
    sandbox: Sandbox,
}

impl GetGitCommits {
    /// Creates the tool over `sandbox`.
    #[must_use]
    pub fn new(sandbox: Sandbox) -> Self {
        Self { sandbox }
    }
}

impl Tool for GetGitCommits {
    fn definition(&self) -> ToolDefinition {
        tool_definition::<CommitsParams>(
            "get_git_commits",
            "List recent commits of a branch in a git repository, newest first. \
             Each commit has hash, message, author and date.",
        )
    }

    fn execute(&self, args: Value) -> ToolFuture<'_> {
        Box::pin(async move {
            let params: CommitsParams = parse_arguments(args)?;
            let branch = params.branch.unwrap_or_else(|| DEFAULT_BRANCH.to_string());
            let limit = params.limit.unwrap_or(MAX_COMMITS).min(MAX_COMMITS);
            let sandbox = self.sandbox.clone();
            let commits =
                run_blocking(move || sandbox.list_commits(&params.repo_path, &branch, limit))
                    .await?;
            Ok(serde_json::to_value(commits)?)
        })
    }
}

// ─────────────────────────────────────────────────────────────────────
// read_text_file
// ─────────────────────────────────────────────────────────────────────

/// Parameters for [`ReadTextFile`].
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ReadFileParams {
    /// Absolute path of the file to read.
    pub path: String,
}

/// Reads a UTF-8 text file inside the sandbox.
#[derive(Debug, Clone)]
pub struct ReadTextFile {
    sandbox: Sandbox,
}

impl ReadTextFile {
    /// Creates the tool over `sandbox`.
    #[must_use]
    pub fn new(sandbox: Sandbox) -> Self {
        Self { sandbox }
    }
}

impl Tool for ReadTextFile {
    fn definition(&self) -> ToolDefinition {
        tool_definition::<ReadFileParams>(
            "read_text_file",
            "Read the full contents of a UTF-8 text file at an absolute path.",
        )
    }

    fn execute(&self, args: Value) -> ToolFuture<'_> {
        Box::pin(async move {
            let params: ReadFileParams = parse_arguments(args)?;
            let sandbox = self.sandbox.clone();
            let contents = run_blocking(move || sandbox.read_file(&params.path)).await?;
            Ok(Value::String(contents))
        })
    }
}
