//! Error types for walking operations.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that abort a walk.
#[derive(Debug, Error)]
pub enum WalkError {
    /// The starting directory could not be listed.
    #[error("Cannot read root directory {path}: {source}")]
    RootUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A directory below the root could not be listed.
    #[error("Cannot read directory {path}: {source}")]
    DirectoryUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// An exclusion rule is not a valid regular expression.
    #[error("Malformed exclusion rule `{rule}`: {message}")]
    MalformedRule { rule: String, message: String },

    /// Invalid configuration.
    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },
}

impl WalkError {
    /// Create a listing error for `path`.
    ///
    /// `depth` is the recursion level the listing happened at; only a failure
    /// at depth 0 is reported as [`WalkError::RootUnreadable`].
    pub fn io(path: impl Into<PathBuf>, depth: u32, source: std::io::Error) -> Self {
        let path = path.into();
        if depth == 0 {
            Self::RootUnreadable { path, source }
        } else {
            Self::DirectoryUnreadable { path, source }
        }
    }

    /// Path of the directory that failed to list, if any.
    pub fn path(&self) -> Option<&std::path::Path> {
        match self {
            Self::RootUnreadable { path, .. } | Self::DirectoryUnreadable { path, .. } => {
                Some(path)
            }
            _ => None,
        }
    }
}

/// Kind of walk warning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WarningKind {
    /// The directory listing yielded an error instead of an entry.
    ReadError,
    /// Metadata for a listed entry could not be read.
    MetadataError,
}

/// Non-fatal problem encountered during a walk. The affected entry is
/// left out of the result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WalkWarning {
    /// Path where the warning occurred.
    pub path: PathBuf,
    /// Human-readable message.
    pub message: String,
    /// Kind of warning.
    pub kind: WarningKind,
}

impl WalkWarning {
    /// Create a new walk warning.
    pub fn new(path: impl Into<PathBuf>, message: impl Into<String>, kind: WarningKind) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
            kind,
        }
    }

    /// Create a metadata warning for an entry that could not be stat'ed.
    pub fn unstatable(path: impl Into<PathBuf>, error: &std::io::Error) -> Self {
        Self {
            path: path.into(),
            message: format!("Metadata error: {error}"),
            kind: WarningKind::MetadataError,
        }
    }

    /// Create a read error warning for a listing entry.
    pub fn read_error(path: impl Into<PathBuf>, error: &std::io::Error) -> Self {
        Self {
            path: path.into(),
            message: format!("Read error: {error}"),
            kind: WarningKind::ReadError,
        }
    }
}
