//! The sandbox root and path containment.

use crate::error::SandboxError;
use std::path::{Component, Path, PathBuf};

/// The single absolute directory outside of which no operation may read.
///
/// Containment is decided on whole path components, so `/sandbox-evil` is
/// not inside `/sandbox`. Checking happens in two steps:
///
/// 1. a lexical check on the normalized path (`.` and `..` resolved), which
///    touches no filesystem state;
/// 2. the canonical form of the path, or of its deepest existing ancestor
///    when the path does not exist, must also lie under the canonical root,
///    so symlinks cannot lead outside.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SandboxRoot {
    /// Normalized root as configured.
    path: PathBuf,
    /// Root with symlinks resolved; equal to `path` when it cannot be resolved.
    canonical: PathBuf,
}

impl SandboxRoot {
    /// Creates a sandbox root.
    ///
    /// # Errors
    ///
    /// Returns [`SandboxError::PathNotAbsolute`] if `path` is relative.
    pub fn new(path: impl Into<PathBuf>) -> Result<Self, SandboxError> {
        let path = path.into();
        if !path.is_absolute() {
            return Err(SandboxError::PathNotAbsolute { path });
        }
        let path = normalize(&path);
        let canonical = std::fs::canonicalize(&path).unwrap_or_else(|_| path.clone());
        Ok(Self { path, canonical })
    }

    /// Returns the root path as configured (normalized).
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Validates that `path` is absolute and contained in the root.
    ///
    /// Returns the path to operate on: the canonical path when it exists,
    /// otherwise the normalized one.
    ///
    /// # Errors
    ///
    /// - [`SandboxError::PathNotAbsolute`] for relative paths.
    /// - [`SandboxError::OutsideSandbox`] when the path, or the target it
    ///   resolves to, lies outside the root.
    pub fn resolve(&self, path: &Path) -> Result<PathBuf, SandboxError> {
        if !path.is_absolute() {
            return Err(SandboxError::PathNotAbsolute {
                path: path.to_path_buf(),
            });
        }

        let normalized = normalize(path);
        if !self.contains_lexically(&normalized) {
            return Err(self.outside(path));
        }

        match std::fs::canonicalize(&normalized) {
            Ok(real) if real.starts_with(&self.canonical) => Ok(real),
            Ok(real) => {
                tracing::warn!(
                    requested = %path.display(),
                    resolved = %real.display(),
                    "path resolves outside the sandbox"
                );
                Err(self.outside(path))
            }
            // Missing paths are reported by the operation itself, once the
            // part that does exist is known to stay inside.
            Err(_) => match self.existing_ancestor(&normalized) {
                Some(real) if !real.starts_with(&self.canonical) => {
                    tracing::warn!(
                        requested = %path.display(),
                        resolved = %real.display(),
                        "path resolves outside the sandbox"
                    );
                    Err(self.outside(path))
                }
                _ => Ok(normalized),
            },
        }
    }

    /// Canonical form of the deepest existing ancestor of `normalized` that
    /// is still lexically inside the root.
    fn existing_ancestor(&self, normalized: &Path) -> Option<PathBuf> {
        normalized
            .ancestors()
            .skip(1)
            .take_while(|ancestor| self.contains_lexically(ancestor))
            .find_map(|ancestor| std::fs::canonicalize(ancestor).ok())
    }

    fn contains_lexically(&self, normalized: &Path) -> bool {
        normalized.starts_with(&self.path) || normalized.starts_with(&self.canonical)
    }

    fn outside(&self, path: &Path) -> SandboxError {
        SandboxError::OutsideSandbox {
            path: path.to_path_buf(),
            root: self.path.clone(),
        }
    }
}

/// Resolves `.` and `..` components without consulting the filesystem.
///
/// `..` never climbs above the filesystem root.
fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::Prefix(_) | Component::RootDir | Component::Normal(_) => {
                out.push(component.as_os_str());
            }
            Component::CurDir => {}
            Component::ParentDir => {
                if out.parent().is_some() {
                    out.pop();
                }
            }
        }
    }
    out
}
