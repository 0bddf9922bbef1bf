//! Size report: raw and gzip sizes per file, with totals.

use std::fs;
use std::path::{Path, PathBuf};

use compact_str::CompactString;
use derive_builder::Builder;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::trace;

use filesize_core::{FileRecord, Inventory};

use crate::gzip::{CompressedSize, GzipSize};

/// Errors that can occur while building a report.
#[derive(Debug, Error)]
pub enum ReportError {
    /// A recorded file could not be read back.
    #[error("Cannot read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Compressing a file's contents failed.
    #[error("Cannot compress {path}: {source}")]
    Compress {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Configuration for report building.
#[derive(Debug, Clone, Builder, Serialize, Deserialize)]
#[builder(setter(into), build_fn(validate = "Self::validate"))]
pub struct ReportConfig {
    /// Sizes strictly above this many bytes are flagged as oversized.
    #[builder(default)]
    #[serde(default)]
    pub large_file: Option<u64>,

    /// Gzip compression level (0-9).
    #[builder(default = "GzipSize::DEFAULT_LEVEL")]
    #[serde(default = "default_level")]
    pub compression_level: u32,
}

fn default_level() -> u32 {
    GzipSize::DEFAULT_LEVEL
}

impl ReportConfigBuilder {
    fn validate(&self) -> Result<(), String> {
        if let Some(level) = self.compression_level {
            if level > 9 {
                return Err(format!("Compression level must be 0-9, got {level}"));
            }
        }
        Ok(())
    }
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            large_file: None,
            compression_level: GzipSize::DEFAULT_LEVEL,
        }
    }
}

impl ReportConfig {
    /// Create a new config builder.
    pub fn builder() -> ReportConfigBuilder {
        ReportConfigBuilder::default()
    }

    /// Check a size against the large-file threshold.
    pub fn is_oversized(&self, size: u64) -> bool {
        self.large_file.is_some_and(|limit| size > limit)
    }
}

/// One line of the report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SizeRow {
    /// Relative file name.
    pub name: CompactString,
    /// Raw size in bytes.
    pub size: u64,
    /// Gzip size in bytes.
    pub gzip_size: u64,
    /// Raw size exceeds the large-file threshold.
    pub size_oversized: bool,
    /// Gzip size exceeds the large-file threshold.
    pub gzip_oversized: bool,
}

/// Totals across all rows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportTotals {
    /// Number of files.
    pub files: u64,
    /// Sum of raw sizes.
    pub size: u64,
    /// Sum of gzip sizes.
    pub gzip_size: u64,
}

/// Complete size report, rows in walk order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SizeReport {
    /// One row per file.
    pub rows: Vec<SizeRow>,
    /// Totals row.
    pub totals: ReportTotals,
    /// Threshold the rows were flagged against.
    pub large_file: Option<u64>,
}

impl SizeReport {
    /// Check if the report has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Rows with either size flagged.
    pub fn oversized(&self) -> impl Iterator<Item = &SizeRow> {
        self.rows
            .iter()
            .filter(|r| r.size_oversized || r.gzip_oversized)
    }

    /// Overall gzip ratio (compressed / raw), or `None` for an empty total.
    pub fn compression_ratio(&self) -> Option<f64> {
        (self.totals.size > 0).then(|| self.totals.gzip_size as f64 / self.totals.size as f64)
    }
}

/// Builds [`SizeReport`]s from inventories.
pub struct SizeReporter {
    config: ReportConfig,
}

impl SizeReporter {
    /// Create a reporter with default config.
    pub fn new() -> Self {
        Self {
            config: ReportConfig::default(),
        }
    }

    /// Create a reporter with custom config.
    pub fn with_config(config: ReportConfig) -> Self {
        Self { config }
    }

    /// Build a report, gzipping each file's contents from disk.
    pub fn build(&self, inventory: &Inventory) -> Result<SizeReport, ReportError> {
        let sizer = GzipSize::with_level(self.config.compression_level);
        self.build_with(inventory, &sizer)
    }

    /// Build a report using a custom compressed-size function.
    pub fn build_with(
        &self,
        inventory: &Inventory,
        sizer: &impl CompressedSize,
    ) -> Result<SizeReport, ReportError> {
        self.build_rows(&inventory.root_path, &inventory.records, sizer)
    }

    fn build_rows(
        &self,
        root: &Path,
        records: &[FileRecord],
        sizer: &impl CompressedSize,
    ) -> Result<SizeReport, ReportError> {
        let mut rows = Vec::with_capacity(records.len());
        let mut totals = ReportTotals::default();

        for record in records {
            let path = root.join(record.path());
            let bytes = fs::read(&path).map_err(|source| ReportError::Read {
                path: path.clone(),
                source,
            })?;
            let gzip_size = sizer
                .compressed_len(&bytes)
                .map_err(|source| ReportError::Compress {
                    path: path.clone(),
                    source,
                })?;
            trace!(name = %record.name, size = record.size, gzip_size, "sized file");

            totals.files += 1;
            totals.size += record.size;
            totals.gzip_size += gzip_size;

            rows.push(SizeRow {
                name: record.name.clone(),
                size: record.size,
                gzip_size,
                size_oversized: self.config.is_oversized(record.size),
                gzip_oversized: self.config.is_oversized(gzip_size),
            });
        }

        Ok(SizeReport {
            rows,
            totals,
            large_file: self.config.large_file,
        })
    }
}

impl Default for SizeReporter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_oversized_is_strict() {
        let config = ReportConfig::builder().large_file(100u64).build().unwrap();
        assert!(!config.is_oversized(99));
        assert!(!config.is_oversized(100));
        assert!(config.is_oversized(101));

        assert!(!ReportConfig::default().is_oversized(u64::MAX));
    }

    #[test]
    fn test_config_rejects_bad_level() {
        assert!(ReportConfig::builder().compression_level(10u32).build().is_err());
        assert!(ReportConfig::builder().compression_level(0u32).build().is_ok());
    }

    #[test]
    fn test_compression_ratio() {
        let mut report = SizeReport {
            rows: Vec::new(),
            totals: ReportTotals::default(),
            large_file: None,
        };
        assert!(report.compression_ratio().is_none());

        report.totals = ReportTotals {
            files: 1,
            size: 200,
            gzip_size: 50,
        };
        assert_eq!(report.compression_ratio(), Some(0.25));
    }
}
