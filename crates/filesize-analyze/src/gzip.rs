//! Compressed size computation.

use std::io::{self, Write};

use flate2::Compression;
use flate2::write::GzEncoder;

/// Computes the compressed length of a byte buffer.
pub trait CompressedSize {
    /// Length in bytes of `bytes` after compression.
    fn compressed_len(&self, bytes: &[u8]) -> io::Result<u64>;
}

/// Gzip sizer backed by `flate2`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GzipSize {
    level: u32,
}

impl GzipSize {
    /// Highest compression level, the default.
    pub const DEFAULT_LEVEL: u32 = 9;

    /// Create a sizer at the default level.
    pub fn new() -> Self {
        Self {
            level: Self::DEFAULT_LEVEL,
        }
    }

    /// Create a sizer at `level` (clamped to 0..=9).
    pub fn with_level(level: u32) -> Self {
        Self {
            level: level.min(9),
        }
    }

    /// The compression level in use.
    pub fn level(&self) -> u32 {
        self.level
    }
}

impl Default for GzipSize {
    fn default() -> Self {
        Self::new()
    }
}

impl CompressedSize for GzipSize {
    fn compressed_len(&self, bytes: &[u8]) -> io::Result<u64> {
        let mut encoder = GzEncoder::new(CountingWriter::default(), Compression::new(self.level));
        encoder.write_all(bytes)?;
        Ok(encoder.finish()?.count)
    }
}

/// Discards output, keeping only its length.
#[derive(Debug, Default)]
struct CountingWriter {
    count: u64,
}

impl Write for CountingWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.count += buf.len() as u64;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Gzip size of `bytes` at the default level.
pub fn gzip_size(bytes: &[u8]) -> io::Result<u64> {
    GzipSize::new().compressed_len(bytes)
}
