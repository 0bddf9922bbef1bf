//! File record type.

use std::path::{Path, PathBuf};

use compact_str::CompactString;
use serde::{Deserialize, Serialize};

/// One included file: its path relative to the walk root and its size.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FileRecord {
    /// Path relative to the walk root, `/`-separated.
    pub name: CompactString,

    /// Size in bytes.
    pub size: u64,

    /// On-disk path relative to the walk root, kept only when `name` is a
    /// lossy rendering of it (the name was not valid UTF-8).
    #[serde(skip)]
    path: Option<PathBuf>,
}

impl FileRecord {
    /// Create a new record.
    pub fn new(name: impl Into<CompactString>, size: u64) -> Self {
        Self {
            name: name.into(),
            size,
            path: None,
        }
    }

    /// Attach the exact relative path, for names that could not be
    /// represented as UTF-8.
    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Path of the file relative to the walk root, suitable for opening it.
    pub fn path(&self) -> &Path {
        self.path
            .as_deref()
            .unwrap_or_else(|| Path::new(self.name.as_str()))
    }

    /// Number of directory levels between the root and this file.
    pub fn depth(&self) -> usize {
        self.name.matches('/').count()
    }

    /// Base name of the file.
    pub fn file_name(&self) -> &str {
        self.name.rsplit('/').next().unwrap_or(&self.name)
    }
}

/// Join a relative directory prefix and an entry name.
///
/// An empty prefix denotes the walk root, whose children carry no prefix.
pub fn join_relative(prefix: &str, name: &str) -> CompactString {
    if prefix.is_empty() {
        CompactString::from(name)
    } else {
        let mut joined = CompactString::with_capacity(prefix.len() + 1 + name.len());
        joined.push_str(prefix);
        joined.push('/');
        joined.push_str(name);
        joined
    }
}
