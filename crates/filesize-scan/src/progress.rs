//! Walk progress reporting.

use std::time::{Duration, Instant};

use compact_str::CompactString;

use filesize_core::FileRecord;

/// Progress information emitted once per included file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WalkProgress {
    /// Relative name of the file just recorded.
    pub name: CompactString,
    /// Size of the file just recorded.
    pub size: u64,
    /// Directory level of the file (root children are 0).
    pub depth: u32,
    /// Number of files recorded so far, this one included.
    pub files_walked: u64,
    /// Total bytes recorded so far, this one included.
    pub bytes_walked: u64,
    /// Time elapsed since the walk started.
    pub elapsed: Duration,
}

impl WalkProgress {
    /// Calculate walk rate in files per second.
    pub fn files_per_second(&self) -> f64 {
        if self.elapsed.as_secs_f64() > 0.0 {
            self.files_walked as f64 / self.elapsed.as_secs_f64()
        } else {
            0.0
        }
    }
}

/// Receives a notification for every file appended to the accumulator.
///
/// Implemented for any `FnMut(&WalkProgress)`, so a closure can be passed
/// wherever a sink is expected.
pub trait ProgressSink {
    /// Called right after a record is appended.
    fn on_file(&mut self, progress: &WalkProgress);
}

impl<F> ProgressSink for F
where
    F: FnMut(&WalkProgress),
{
    fn on_file(&mut self, progress: &WalkProgress) {
        self(progress)
    }
}

/// Running totals used to build [`WalkProgress`] snapshots.
#[derive(Debug)]
pub(crate) struct ProgressTracker {
    start_time: Instant,
    files_walked: u64,
    bytes_walked: u64,
}

impl ProgressTracker {
    pub fn new() -> Self {
        Self {
            start_time: Instant::now(),
            files_walked: 0,
            bytes_walked: 0,
        }
    }

    pub fn record_file(&mut self, record: &FileRecord, depth: u32) -> WalkProgress {
        self.files_walked += 1;
        self.bytes_walked += record.size;

        WalkProgress {
            name: record.name.clone(),
            size: record.size,
            depth,
            files_walked: self.files_walked,
            bytes_walked: self.bytes_walked,
            elapsed: self.start_time.elapsed(),
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }
}
