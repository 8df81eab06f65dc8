//! Bounded, memory-mapped file access.
//!
//! `SafeReader` backs [`crate::rich::parse_path`]. Files are mapped read-only
//! and every read is charged against a byte budget so a hostile `e_lfanew`
//! cannot make the parser pull an arbitrary amount of data into memory.

pub mod error;

use crate::config::DEFAULT_MAX_HEADER_SIZE;
use crate::io::error::{IoError, Result};
use crate::rich::slicer::E_LFANEW_LEN;
use bytes::Bytes;
use memmap2::Mmap;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::path::{Path, PathBuf};
use tracing::{debug, trace, warn};

/// Resource limits for file-backed parses.
///
/// The defaults admit any file whose header region passes the default
/// `e_lfanew` cap: the map is lazy, so only the bytes read count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IOLimits {
    /// The absolute maximum file size that can be opened.
    pub max_file_size: u64,
    /// Total bytes that may be read from one file across all reads.
    pub max_read_bytes: u64,
}

impl Default for IOLimits {
    fn default() -> Self {
        Self {
            max_file_size: u64::MAX,
            // e_lfanew field plus the largest region the default cap allows.
            max_read_bytes: DEFAULT_MAX_HEADER_SIZE + E_LFANEW_LEN as u64,
        }
    }
}

/// A read-only memory map of one file, bounded by `IOLimits`.
pub struct SafeReader {
    path: PathBuf,
    // None when the file size is zero; memmap cannot map empty files.
    mmap: Option<Mmap>,
    limits: IOLimits,
    bytes_read: u64,
    file_size: u64,
}

impl SafeReader {
    /// Opens and maps `path`, failing if it is larger than `limits.max_file_size`.
    pub fn open<P: AsRef<Path>>(path: P, limits: IOLimits) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)?;
        let file_size = file.metadata()?.len();

        debug!(
            path = %path.display(),
            size = file_size,
            limits.max_file_size = limits.max_file_size,
            "Opening file for Rich header parsing"
        );

        if file_size > limits.max_file_size {
            warn!(
                path = %path.display(),
                size = file_size,
                limit = limits.max_file_size,
                "File is too large"
            );
            return Err(IoError::FileTooLarge {
                limit: limits.max_file_size,
                found: file_size,
            });
        }

        let mmap = if file_size == 0 {
            None
        } else {
            // Safety: read-only map of a regular file that we keep open for the map's lifetime.
            Some(unsafe { Mmap::map(&file)? })
        };

        Ok(Self {
            path: path.to_path_buf(),
            mmap,
            limits,
            bytes_read: 0,
            file_size,
        })
    }

    pub fn size(&self) -> u64 {
        self.file_size
    }

    pub fn bytes_read(&self) -> u64 {
        self.bytes_read
    }

    pub fn limits(&self) -> &IOLimits {
        &self.limits
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads up to `len` bytes at `offset`, clamped to the end of the file.
    ///
    /// # Errors
    ///
    /// Returns `IoError::ReadLimitExceeded` if the request would push the total
    /// past `limits.max_read_bytes`. The budget is checked against the requested
    /// length and charged with the length actually returned.
    pub fn read_at(&mut self, offset: u64, len: u64) -> Result<Bytes> {
        if self.bytes_read.saturating_add(len) > self.limits.max_read_bytes {
            warn!(
                path = %self.path.display(),
                current_read = self.bytes_read,
                requested = len,
                limit = self.limits.max_read_bytes,
                "Read limit exceeded"
            );
            return Err(IoError::ReadLimitExceeded {
                limit: self.limits.max_read_bytes,
                current: self.bytes_read,
                requested: len,
            });
        }

        let map = match &self.mmap {
            Some(m) => m,
            None => return Ok(Bytes::new()),
        };

        let start = offset.min(map.len() as u64) as usize;
        let end = offset.saturating_add(len).min(map.len() as u64) as usize;
        if start >= end {
            return Ok(Bytes::new());
        }

        let out = Bytes::copy_from_slice(&map[start..end]);
        self.bytes_read += out.len() as u64;

        trace!(
            path = %self.path.display(),
            offset = start,
            len = out.len(),
            total_read = self.bytes_read,
            "Performed read"
        );

        Ok(out)
    }

    /// Equivalent to `read_at(0, len)`.
    pub fn read_prefix(&mut self, len: u64) -> Result<Bytes> {
        self.read_at(0, len)
    }
}
