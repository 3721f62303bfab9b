//! Recursive directory listings.

use crate::error::SandboxError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// A node in a [`DirectoryTree`].
///
/// Serializes as `null` for files and as a nested object for directories,
/// e.g. `{"README.md": null, "src": {"main.rs": null}}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TreeNode {
    /// A subdirectory and its contents.
    Directory(DirectoryTree),
    /// A non-directory entry: regular file, symlink, socket, ...
    File,
}

impl TreeNode {
    /// Returns `true` if this node is a leaf.
    #[must_use]
    pub fn is_file(&self) -> bool {
        matches!(self, Self::File)
    }

    /// Returns the subtree if this node is a directory.
    #[must_use]
    pub fn as_directory(&self) -> Option<&DirectoryTree> {
        match self {
            Self::Directory(tree) => Some(tree),
            Self::File => None,
        }
    }
}

/// Mapping from entry name to [`TreeNode`], sorted by name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DirectoryTree {
    entries: BTreeMap<String, TreeNode>,
}

impl DirectoryTree {
    /// Returns the node for `name`, if present.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&TreeNode> {
        self.entries.get(name)
    }

    /// Returns `true` if an entry called `name` exists.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Number of direct entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the directory has no (visible) entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over direct entries in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &TreeNode)> {
        self.entries.iter().map(|(name, node)| (name.as_str(), node))
    }
}

/// Entries whose name starts with this character are hidden.
const HIDDEN_PREFIX: char = '.';

fn is_hidden(name: &str) -> bool {
    name.starts_with(HIDDEN_PREFIX)
}

/// Walks `dir` recursively. Symlinks are leaves and never followed.
pub(crate) fn walk(dir: &Path, include_hidden: bool) -> Result<DirectoryTree, SandboxError> {
    let read_err = |err: std::io::Error| SandboxError::io(format!("{}: {err}", dir.display()));

    let mut tree = DirectoryTree::default();
    for entry in fs::read_dir(dir).map_err(read_err)? {
        let entry = entry.map_err(read_err)?;
        let name = entry.file_name().to_string_lossy().into_owned();
        if !include_hidden && is_hidden(&name) {
            continue;
        }

        let file_type = entry.file_type().map_err(read_err)?;
        let node = if file_type.is_dir() {
            TreeNode::Directory(walk(&entry.path(), include_hidden)?)
        } else {
            TreeNode::File
        };
        tree.entries.insert(name, node);
    }
    Ok(tree)
}
