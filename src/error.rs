//! Error types for Rich Header parsing.
//!
//! Both parse failures are final: they describe the input (not a PE file, or
//! a PE file without a Rich Header) rather than a transient condition. A
//! checksum mismatch is not an error and is reported on the parse result.

use crate::io::error::IoError;
use thiserror::Error;

/// Main error type for Rich Header operations.
#[derive(Debug, Error)]
pub enum RichError {
    /// The source cannot hold the DOS header region it declares.
    #[error("Not a PE file: {0}")]
    NotPeFormat(String),

    /// No "Rich" tag, no trailing checksum, or no start marker.
    #[error("Rich header does not appear to exist")]
    RichHeaderNotFound,

    /// Failure of the underlying byte source.
    #[error(transparent)]
    Io(#[from] IoError),
}

impl From<std::io::Error> for RichError {
    fn from(err: std::io::Error) -> Self {
        RichError::Io(IoError::StdIo(err))
    }
}

/// Result type alias for Rich Header operations
pub type Result<T> = std::result::Result<T, RichError>;
