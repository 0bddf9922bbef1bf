//! Size analysis for filesize inventories.
//!
//! This crate turns a walked [`Inventory`] into a report:
//!
//! - **Gzip sizing** - compressed length of each file via `flate2`
//! - **Large-file flags** - raw and gzip sizes above a threshold
//! - **Totals** - file count, raw bytes, gzip bytes
//!
//! ```rust,ignore
//! use filesize_analyze::{ReportConfig, SizeReporter};
//! use filesize_scan::{TreeWalker, WalkConfig};
//!
//! let inventory = TreeWalker::new().walk(&WalkConfig::new("/path/to/walk")).unwrap();
//!
//! let config = ReportConfig::builder().large_file(100_000u64).build().unwrap();
//! let report = SizeReporter::with_config(config).build(&inventory).unwrap();
//!
//! for row in report.oversized() {
//!     println!("{} is {} bytes ({} gzipped)", row.name, row.size, row.gzip_size);
//! }
//! println!("{} files, {} bytes", report.totals.files, report.totals.size);
//! ```

mod gzip;
mod report;

pub use gzip::{CompressedSize, GzipSize, gzip_size};
pub use report::{
    ReportConfig, ReportConfigBuilder, ReportError, ReportTotals, SizeReport, SizeReporter,
    SizeRow,
};

// Re-export core types
pub use filesize_core::{FileRecord, Inventory};
