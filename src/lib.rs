//! Rich Header extraction and verification for PE files.
//!
//! ```no_run
//! use richheader::{parse_path, RichConfig};
//!
//! let header = parse_path("sample.exe", &RichConfig::default())?;
//! for entry in &header.entries {
//!     println!("{:#010x} x{}", entry.identifier, entry.count);
//! }
//! println!("checksum valid: {}", header.checksum_valid);
//! # Ok::<(), richheader::RichError>(())
//! ```

pub mod config;
pub mod error;
pub mod io;
pub mod logging;
pub mod rich;

#[cfg(feature = "python-ext")]
pub mod python_bindings;

pub use config::{MarkerSearch, RichConfig};
pub use error::{Result, RichError};
pub use rich::{parse_bytes, parse_path, parse_reader, parse_region};
pub use rich::{EntryTable, RichEntry, RichHeader};
