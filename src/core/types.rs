//! Core data types for files-to-prompt

use serde::Serialize;
use std::fmt;
use std::path::{Path, PathBuf};

/// Kind of a discovered filesystem entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Directory,
}

impl EntryKind {
    pub fn is_dir(self) -> bool {
        self == EntryKind::Directory
    }
}

/// A path discovered during traversal
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraversalEntry {
    /// Path as it will be shown in the output (root argument joined with the relative path)
    pub path: PathBuf,
    /// File or directory
    pub kind: EntryKind,
}

impl TraversalEntry {
    pub fn file(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            kind: EntryKind::File,
        }
    }

    pub fn directory(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            kind: EntryKind::Directory,
        }
    }

    /// Final path segment, used for hidden-entry and rule matching
    pub fn name(&self) -> String {
        file_name_of(&self.path)
    }

    pub fn is_hidden(&self) -> bool {
        self.name().starts_with('.')
    }
}

/// A file that made it into the output stream
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmittedDocument {
    /// 1-based position in the output, shared across all root paths
    pub index: u32,
    pub path: String,
    pub content: String,
}

impl fmt::Display for EmittedDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{} {}", self.index, self.path)
    }
}

/// File name of a path as a lossy string, or the whole path when it has none (e.g. `..`)
pub fn file_name_of(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string_lossy().into_owned())
}
