//! Directory walking for filesize.
//!
//! This crate walks a directory tree depth-first and produces a flat,
//! ordered list of file records.
//!
//! # Overview
//!
//! - **Single pass** over the tree, one blocking `read_dir` per directory
//! - **Exclusion rules** for files and directories, matched on base names
//! - **Relative names** built from the path below the root (`a/b/file.txt`)
//! - **Partial-failure tolerance**: entries that cannot be stat'ed are
//!   dropped and reported as warnings, while an unreadable directory aborts
//!   the walk
//!
//! # Example
//!
//! ```rust,no_run
//! use filesize_scan::{TreeWalker, WalkConfig};
//!
//! let config = WalkConfig::new("/path/to/walk");
//! let inventory = TreeWalker::new().walk(&config).unwrap();
//!
//! for record in &inventory {
//!     println!("{} {}", record.name, record.size);
//! }
//! println!("Total size: {} bytes", inventory.total_size());
//! ```
//!
//! # Progress Monitoring
//!
//! With `verbose` set, every recorded file is reported to the sink:
//!
//! ```rust,no_run
//! use filesize_scan::{TreeWalker, WalkConfig, WalkProgress};
//!
//! let config = WalkConfig::builder()
//!     .root("/path/to/walk")
//!     .verbose(true)
//!     .build()
//!     .unwrap();
//!
//! let mut walker = TreeWalker::with_progress(|p: &WalkProgress| {
//!     eprintln!("Processing: {} ({} files so far)", p.name, p.files_walked);
//! });
//! let inventory = walker.walk(&config).unwrap();
//! ```

mod progress;
mod walker;

pub use progress::{ProgressSink, WalkProgress};
pub use walker::{TreeWalker, WalkSummary};

// Re-export core types for convenience
pub use filesize_core::{
    ExclusionSet, Exclusions, FileRecord, Inventory, WalkConfig, WalkError, WalkStats,
    WalkWarning, WarningKind,
};
