//! Walk result container and statistics.

use std::path::PathBuf;
use std::time::{Duration, SystemTime};

use serde::{Deserialize, Serialize};

use crate::config::WalkConfig;
use crate::error::WalkWarning;
use crate::record::FileRecord;

/// Counters collected while walking.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WalkStats {
    /// Total size of included files in bytes.
    pub total_size: u64,
    /// Number of included files.
    pub total_files: u64,
    /// Number of directories listed, the root included.
    pub total_dirs: u64,
    /// Files skipped by the file rules.
    pub excluded_files: u64,
    /// Directories skipped by the directory rules.
    pub excluded_dirs: u64,
    /// Deepest directory level listed.
    pub max_depth: u32,
    /// Largest included file (name, size).
    pub largest_file: Option<(String, u64)>,
}

impl WalkStats {
    /// Create new empty stats.
    pub fn new() -> Self {
        Self::default()
    }

    /// Update stats with an included file.
    pub fn record_file(&mut self, record: &FileRecord) {
        self.total_files += 1;
        self.total_size += record.size;

        if self.largest_file.as_ref().is_none_or(|(_, s)| record.size > *s) {
            self.largest_file = Some((record.name.to_string(), record.size));
        }
    }

    /// Record a listed directory.
    pub fn record_dir(&mut self, depth: u32) {
        self.total_dirs += 1;
        self.max_depth = self.max_depth.max(depth);
    }
}

/// The outcome of a complete walk.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Inventory {
    /// Included files in walk order.
    pub records: Vec<FileRecord>,

    /// Root path that was walked.
    pub root_path: PathBuf,

    /// When the walk finished.
    pub walked_at: SystemTime,

    /// Duration of the walk.
    pub walk_duration: Duration,

    /// Configuration used.
    pub config: WalkConfig,

    /// Summary statistics.
    pub stats: WalkStats,

    /// Entries dropped because they could not be inspected.
    pub warnings: Vec<WalkWarning>,
}

impl Inventory {
    /// Create a new inventory.
    pub fn new(
        records: Vec<FileRecord>,
        root_path: PathBuf,
        config: WalkConfig,
        stats: WalkStats,
        walk_duration: Duration,
        warnings: Vec<WalkWarning>,
    ) -> Self {
        Self {
            records,
            root_path,
            walked_at: SystemTime::now(),
            walk_duration,
            config,
            stats,
            warnings,
        }
    }

    /// Sum of all record sizes.
    pub fn total_size(&self) -> u64 {
        self.records.iter().map(|r| r.size).sum()
    }

    /// Number of records.
    pub fn total_files(&self) -> usize {
        self.records.len()
    }

    /// Check if any entries were dropped.
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// Iterate over the records.
    pub fn iter(&self) -> std::slice::Iter<'_, FileRecord> {
        self.records.iter()
    }
}

impl<'a> IntoIterator for &'a Inventory {
    type Item = &'a FileRecord;
    type IntoIter = std::slice::Iter<'a, FileRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_walk_stats_default() {
        let stats = WalkStats::default();
        assert_eq!(stats.total_size, 0);
        assert_eq!(stats.total_files, 0);
        assert_eq!(stats.total_dirs, 0);
        assert!(stats.largest_file.is_none());
    }

    #[test]
    fn test_walk_stats_record_file() {
        let mut stats = WalkStats::new();
        stats.record_file(&FileRecord::new("a.txt", 10));
        stats.record_file(&FileRecord::new("b/c.txt", 30));
        stats.record_file(&FileRecord::new("d.txt", 20));

        assert_eq!(stats.total_files, 3);
        assert_eq!(stats.total_size, 60);
        assert_eq!(stats.largest_file, Some(("b/c.txt".to_string(), 30)));
    }

    #[test]
    fn test_walk_stats_record_dir() {
        let mut stats = WalkStats::new();
        stats.record_dir(0);
        stats.record_dir(3);
        stats.record_dir(1);
        assert_eq!(stats.total_dirs, 3);
        assert_eq!(stats.max_depth, 3);
    }

    #[test]
    fn test_inventory_totals() {
        let records = vec![FileRecord::new("a", 1), FileRecord::new("b/c", 41)];
        let inventory = Inventory::new(
            records,
            PathBuf::from("/root"),
            WalkConfig::new("/root"),
            WalkStats::default(),
            Duration::ZERO,
            Vec::new(),
        );
        assert_eq!(inventory.total_size(), 42);
        assert_eq!(inventory.total_files(), 2);
        assert!(!inventory.has_warnings());
        assert_eq!((&inventory).into_iter().count(), 2);
    }
}
