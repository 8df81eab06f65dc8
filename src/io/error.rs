//! Errors raised while reading a file into memory.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum IoError {
    #[error("File size of {found} bytes exceeds the maximum allowed size of {limit} bytes.")]
    FileTooLarge { limit: u64, found: u64 },

    #[error(
        "Reading {requested} bytes would exceed the read budget of {limit} bytes (already read: {current})"
    )]
    ReadLimitExceeded {
        limit: u64,
        current: u64,
        requested: u64,
    },

    #[error("I/O error: {0}")]
    StdIo(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, IoError>;
