//! Parser configuration.
//!
//! Defaults are what most callers want; the legacy single-byte marker search
//! exists only to reproduce results of older tooling byte for byte.

use crate::io::IOLimits;
use serde::{Deserialize, Serialize};

/// Largest DOS header region accepted before allocating it (16 MiB).
pub const DEFAULT_MAX_HEADER_SIZE: u64 = 16 * 1024 * 1024;

/// How the start of the Rich block is located once the checksum is known.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MarkerSearch {
    /// Match the full 16-byte `{C ^ "DanS", C, C, C}` sequence before the "Rich" tag.
    #[default]
    Canonical,
    /// Match only the low byte of `C ^ "DanS"`, anywhere in the region.
    SingleByte,
}

/// Configuration shared by every parse entry point.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RichConfig {
    pub marker_search: MarkerSearch,
    /// Upper bound on `e_lfanew`; larger values are rejected as not-PE.
    pub max_header_size: u64,
    /// Limits applied when parsing straight from a path.
    pub io: IOLimits,
}

impl Default for RichConfig {
    fn default() -> Self {
        Self {
            marker_search: MarkerSearch::Canonical,
            max_header_size: DEFAULT_MAX_HEADER_SIZE,
            io: IOLimits::default(),
        }
    }
}

impl RichConfig {
    /// Configuration matching the legacy single-byte start marker search.
    pub fn legacy() -> Self {
        Self {
            marker_search: MarkerSearch::SingleByte,
            ..Self::default()
        }
    }

    /// Parse a (possibly partial) JSON configuration; missing keys keep their defaults.
    pub fn from_json(s: &str) -> serde_json::Result<Self> {
        serde_json::from_str(s)
    }
}
