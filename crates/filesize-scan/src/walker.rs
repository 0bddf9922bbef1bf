//! Recursive directory walker.

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info, trace};

use filesize_core::{
    Exclusions, FileRecord, Inventory, WalkConfig, WalkError, WalkStats, WalkWarning,
    join_relative,
};

use crate::progress::{ProgressSink, ProgressTracker};

/// Depth-first walker producing a flat list of [`FileRecord`]s.
///
/// At every level the included files of a directory are recorded, in listing
/// order, before any of its subdirectories is entered. Relative names are
/// built by threading the parent's relative prefix down the recursion, so
/// they do not depend on how the root path is spelled.
pub struct TreeWalker<'p> {
    progress: Option<Box<dyn ProgressSink + 'p>>,
}

impl<'p> TreeWalker<'p> {
    /// Create a walker without a progress sink.
    pub fn new() -> Self {
        Self { progress: None }
    }

    /// Create a walker that reports each recorded file to `sink`.
    ///
    /// [`TreeWalker::walk`] only reports when the config asks for verbose
    /// output; [`TreeWalker::walk_into`] always reports.
    pub fn with_progress(sink: impl ProgressSink + 'p) -> Self {
        Self {
            progress: Some(Box::new(sink)),
        }
    }

    /// Walk the tree described by `config`.
    pub fn walk(&mut self, config: &WalkConfig) -> Result<Inventory, WalkError> {
        let exclusions = config.exclusions()?;
        let mut records = Vec::new();

        let progress = if config.verbose {
            self.progress.as_deref_mut()
        } else {
            None
        };

        let mut walk = Walk::new(&exclusions, &mut records, progress);
        walk.walk_dir(&config.root, "", Path::new(""), 0)?;
        let Walk {
            stats,
            warnings,
            tracker,
            ..
        } = walk;
        let walk_duration = tracker.elapsed();

        info!(
            root = %config.root.display(),
            files = stats.total_files,
            dirs = stats.total_dirs,
            warnings = warnings.len(),
            "walk complete"
        );

        Ok(Inventory::new(
            records,
            config.root.clone(),
            config.clone(),
            stats,
            walk_duration,
            warnings,
        ))
    }

    /// Walk `root`, appending to a caller-owned accumulator.
    ///
    /// On error the accumulator may hold records from the part of the tree
    /// that was walked before the failure.
    pub fn walk_into(
        &mut self,
        root: &Path,
        exclusions: &Exclusions,
        records: &mut Vec<FileRecord>,
    ) -> Result<WalkSummary, WalkError> {
        let mut walk = Walk::new(exclusions, records, self.progress.as_deref_mut());
        walk.walk_dir(root, "", Path::new(""), 0)?;

        Ok(WalkSummary {
            stats: walk.stats,
            warnings: walk.warnings,
        })
    }
}

impl Default for TreeWalker<'_> {
    fn default() -> Self {
        Self::new()
    }
}

/// Counters and warnings from [`TreeWalker::walk_into`].
#[derive(Debug, Clone, Default)]
pub struct WalkSummary {
    /// Summary statistics.
    pub stats: WalkStats,
    /// Entries dropped because they could not be inspected.
    pub warnings: Vec<WalkWarning>,
}

/// State shared by every level of one walk.
struct Walk<'w, 'p> {
    exclusions: &'w Exclusions,
    records: &'w mut Vec<FileRecord>,
    progress: Option<&'w mut (dyn ProgressSink + 'p)>,
    tracker: ProgressTracker,
    stats: WalkStats,
    warnings: Vec<WalkWarning>,
}

impl<'w, 'p> Walk<'w, 'p> {
    fn new(
        exclusions: &'w Exclusions,
        records: &'w mut Vec<FileRecord>,
        progress: Option<&'w mut (dyn ProgressSink + 'p)>,
    ) -> Self {
        Self {
            exclusions,
            records,
            progress,
            tracker: ProgressTracker::new(),
            stats: WalkStats::new(),
            warnings: Vec::new(),
        }
    }

    /// Record the files of `dir`, then descend into its subdirectories.
    ///
    /// `prefix` is the relative name of `dir` ("" for the root) and
    /// `relative` the same location as an on-disk path.
    fn walk_dir(
        &mut self,
        dir: &Path,
        prefix: &str,
        relative: &Path,
        depth: u32,
    ) -> Result<(), WalkError> {
        let entries = fs::read_dir(dir).map_err(|e| WalkError::io(dir, depth, e))?;
        self.stats.record_dir(depth);
        trace!(path = %dir.display(), depth, "listing directory");

        let mut files: Vec<(String, OsString, u64)> = Vec::new();
        let mut directories: Vec<(PathBuf, String, OsString)> = Vec::new();

        for entry_result in entries {
            let entry = match entry_result {
                Ok(e) => e,
                Err(err) => {
                    debug!(path = %dir.display(), error = %err, "skipping unreadable entry");
                    self.warnings.push(WalkWarning::read_error(dir, &err));
                    continue;
                }
            };

            let path = entry.path();
            let os_name = entry.file_name();
            let name = os_name.to_string_lossy().into_owned();

            // Follows symlinks, so a dangling link ends up here.
            let metadata = match fs::metadata(&path) {
                Ok(m) => m,
                Err(err) => {
                    debug!(path = %path.display(), error = %err, "skipping unstatable entry");
                    self.warnings.push(WalkWarning::unstatable(&path, &err));
                    continue;
                }
            };

            if metadata.is_dir() {
                if self.exclusions.dirs.matches(&name) {
                    self.stats.excluded_dirs += 1;
                } else {
                    directories.push((path, name, os_name));
                }
            } else if metadata.is_file() {
                if self.exclusions.files.matches(&name) {
                    self.stats.excluded_files += 1;
                } else {
                    files.push((name, os_name, metadata.len()));
                }
            }
        }

        for (name, os_name, size) in files {
            let mut record = FileRecord::new(join_relative(prefix, &name), size);
            let exact = relative.join(&os_name);
            if exact.to_str().is_none() {
                record = record.with_path(exact);
            }
            self.stats.record_file(&record);
            let progress = self.tracker.record_file(&record, depth);
            self.records.push(record);

            if let Some(sink) = self.progress.as_deref_mut() {
                sink.on_file(&progress);
            }
        }

        for (path, name, os_name) in directories {
            let child_prefix = join_relative(prefix, &name);
            self.walk_dir(&path, &child_prefix, &relative.join(os_name), depth + 1)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use filesize_core::ExclusionSet;
    use tempfile::TempDir;

    fn create_test_tree() -> TempDir {
        let temp = TempDir::new().unwrap();
        let root = temp.path();

        fs::create_dir(root.join("dir1")).unwrap();
        fs::create_dir(root.join("dir2")).unwrap();
        fs::create_dir(root.join("dir1/subdir")).unwrap();

        fs::write(root.join("file1.txt"), "hello").unwrap();
        fs::write(root.join("dir1/file2.txt"), "world world world").unwrap();
        fs::write(root.join("dir1/subdir/file3.txt"), "test").unwrap();
        fs::write(root.join("dir2/file4.txt"), "another file here").unwrap();

        temp
    }

    fn names(inventory: &Inventory) -> Vec<String> {
        let mut names: Vec<String> = inventory.iter().map(|r| r.name.to_string()).collect();
        names.sort();
        names
    }

    #[test]
    fn test_basic_walk() {
        let temp = create_test_tree();
        let config = WalkConfig::new(temp.path());

        let inventory = TreeWalker::new().walk(&config).unwrap();

        assert_eq!(inventory.total_files(), 4);
        assert_eq!(inventory.stats.total_dirs, 4);
        assert_eq!(inventory.stats.max_depth, 2);
        assert_eq!(
            names(&inventory),
            vec![
                "dir1/file2.txt",
                "dir1/subdir/file3.txt",
                "dir2/file4.txt",
                "file1.txt",
            ]
        );
        assert_eq!(inventory.total_size(), 5 + 17 + 4 + 17);
    }

    #[test]
    fn test_files_before_subdirectories() {
        let temp = create_test_tree();
        let config = WalkConfig::new(temp.path());

        let inventory = TreeWalker::new().walk(&config).unwrap();

        // The only root-level file must come before anything nested.
        assert_eq!(inventory.records[0].name, "file1.txt");
        // A directory's own files precede its subdirectory's files.
        let pos = |n: &str| inventory.iter().position(|r| r.name == n).unwrap();
        assert!(pos("dir1/file2.txt") < pos("dir1/subdir/file3.txt"));
    }

    #[test]
    fn test_ignore_dir_rule() {
        let temp = create_test_tree();
        let config = WalkConfig::builder()
            .root(temp.path())
            .exclude_dirs(vec!["dir2".to_string()])
            .build()
            .unwrap();

        let inventory = TreeWalker::new().walk(&config).unwrap();

        assert!(!inventory.iter().any(|r| r.name.starts_with("dir2/")));
        assert_eq!(inventory.stats.excluded_dirs, 1);
    }

    #[test]
    fn test_walk_into_appends() {
        let temp = create_test_tree();
        let mut records = vec![FileRecord::new("pre-existing", 1)];

        let summary = TreeWalker::new()
            .walk_into(
                temp.path(),
                &Exclusions::new(ExclusionSet::new(["file[34]"]).unwrap(), ExclusionSet::empty()),
                &mut records,
            )
            .unwrap();

        assert_eq!(records.len(), 3);
        assert_eq!(records[0].name, "pre-existing");
        assert_eq!(summary.stats.total_files, 2);
        assert_eq!(summary.stats.excluded_files, 2);
        assert!(summary.warnings.is_empty());
    }

    #[test]
    fn test_missing_root_is_fatal() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("nope");

        let err = TreeWalker::new()
            .walk(&WalkConfig::new(&missing))
            .unwrap_err();

        match err {
            WalkError::RootUnreadable { path, .. } => assert_eq!(path, missing),
            other => panic!("unexpected error: {other}"),
        }
    }
}
