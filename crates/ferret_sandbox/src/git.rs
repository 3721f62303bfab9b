//! Commit history via the `git` command line.

use crate::error::SandboxError;
use crate::root::SandboxRoot;
use serde::{Deserialize, Serialize};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Branch listed when the caller does not name one.
pub const DEFAULT_BRANCH: &str = "main";

/// Upper bound on commits returned by a single listing.
pub const MAX_COMMITS: usize = 100;

const FIELD_SEP: char = '\x1f';
const RECORD_SEP: char = '\x1e';

// hash, author name, strict ISO 8601 committer date, raw message
const LOG_FORMAT: &str = "--format=%H%x1f%an%x1f%cI%x1f%B%x1e";

/// One commit on a branch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitRecord {
    /// Full hexadecimal commit id.
    pub hash: String,
    /// Full commit message with trailing whitespace removed.
    pub message: String,
    /// Author name, if recorded.
    pub author: Option<String>,
    /// Committer date as ISO 8601 with offset.
    pub date: String,
}

/// Variables that would let the environment point git at another repository.
const REPOSITORY_ENV: [&str; 6] = [
    "GIT_DIR",
    "GIT_WORK_TREE",
    "GIT_COMMON_DIR",
    "GIT_OBJECT_DIRECTORY",
    "GIT_ALTERNATE_OBJECT_DIRECTORIES",
    "GIT_NAMESPACE",
];

/// Lists up to `limit` commits reachable from `branch`, newest first.
///
/// `repo` must already be resolved against `root`. Its git directory, and
/// every directory that git directory refers to, must also be inside `root`.
pub(crate) fn log(
    root: &SandboxRoot,
    repo: &Path,
    branch: &str,
    limit: usize,
) -> Result<Vec<CommitRecord>, SandboxError> {
    if branch.is_empty() || branch.starts_with('-') {
        return Err(SandboxError::repo(format!("invalid branch name: {branch:?}")));
    }
    let git_dir = locate_git_dir(root, repo)?;

    let limit = limit.min(MAX_COMMITS);
    if limit == 0 {
        return Ok(Vec::new());
    }

    let mut command = Command::new("git");
    command
        .arg("-C")
        .arg(repo)
        .arg(format!("--git-dir={}", git_dir.display()))
        .arg("log")
        .arg("--no-color")
        .arg(format!("--max-count={limit}"))
        .arg(LOG_FORMAT)
        .arg(branch)
        .arg("--")
        .env("GIT_TERMINAL_PROMPT", "0");
    for var in REPOSITORY_ENV {
        command.env_remove(var);
    }
    let output = command
        .output()
        .map_err(|err| SandboxError::repo(format!("failed to run git: {err}")))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(SandboxError::repo(stderr.trim().to_string()));
    }

    Ok(parse_log(&String::from_utf8_lossy(&output.stdout)))
}

/// Finds the git directory of `repo` and checks that it stays inside `root`.
///
/// `.git` may be a directory, a symlink, or a `gitdir:` file (worktrees and
/// submodules). The shared `commondir` and any object `alternates` are
/// checked as well.
fn locate_git_dir(root: &SandboxRoot, repo: &Path) -> Result<PathBuf, SandboxError> {
    let not_a_repository =
        || SandboxError::repo(format!("not a git repository: {}", repo.display()));

    let dot_git = repo.join(".git");
    let metadata = std::fs::symlink_metadata(&dot_git).map_err(|_| not_a_repository())?;
    let git_dir = if metadata.is_file() {
        let contents = std::fs::read_to_string(&dot_git)
            .map_err(|err| SandboxError::io(format!("{}: {err}", dot_git.display())))?;
        let target = contents
            .lines()
            .find_map(|line| line.strip_prefix("gitdir:"))
            .map(str::trim)
            .filter(|target| !target.is_empty())
            .ok_or_else(not_a_repository)?;
        repo.join(target)
    } else {
        dot_git
    };

    let git_dir = root.resolve(&git_dir)?;
    if !git_dir.is_dir() {
        return Err(not_a_repository());
    }

    let mut object_dirs = vec![git_dir.join("objects")];
    if let Some(common) = read_pointer(&git_dir.join("commondir"))? {
        let common = root.resolve(&git_dir.join(common))?;
        object_dirs.push(common.join("objects"));
    }
    for objects in object_dirs {
        let alternates = objects.join("info").join("alternates");
        let Some(contents) = read_optional(&alternates)? else {
            continue;
        };
        for alternate in contents
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
        {
            root.resolve(&objects.join(alternate))?;
        }
    }
    Ok(git_dir)
}

/// Reads a one-line path file such as `commondir`, if present.
fn read_pointer(path: &Path) -> Result<Option<String>, SandboxError> {
    Ok(read_optional(path)?
        .map(|contents| contents.trim().to_string())
        .filter(|target| !target.is_empty()))
}

fn read_optional(path: &Path) -> Result<Option<String>, SandboxError> {
    match std::fs::read_to_string(path) {
        Ok(contents) => Ok(Some(contents)),
        Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
        Err(err) => Err(SandboxError::io(format!("{}: {err}", path.display()))),
    }
}

fn parse_log(stdout: &str) -> Vec<CommitRecord> {
    stdout
        .split(RECORD_SEP)
        .map(|record| record.trim_start_matches(['\n', '\r']))
        .filter(|record| !record.is_empty())
        .filter_map(|record| {
            let mut fields = record.splitn(4, FIELD_SEP);
            let hash = fields.next()?.to_string();
            let author = fields.next()?;
            let date = fields.next()?.to_string();
            let message = fields.next().unwrap_or_default().trim_end().to_string();
            Some(CommitRecord {
                hash,
                message,
                author: (!author.is_empty()).then(|| author.to_string()),
                date,
            })
        })
        .collect()
}
