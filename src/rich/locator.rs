//! Location of the Rich block inside the header region.
//!
//! The block is laid out as
//!
//! ```text
//! C ^ "DanS", C, C, C,              start marker (16 bytes)
//! id_0 ^ C, count_0 ^ C, ...        masked entries (8 bytes each)
//! "Rich", C                         end tag and checksum
//! ```
//!
//! where `C` is the stored checksum, which doubles as the XOR key.

use crate::config::MarkerSearch;
use crate::error::{Result, RichError};
use crate::rich::utils::ReadExt;
use memchr::{memchr, memmem};
use tracing::{debug, trace};

/// End-of-entries tag.
pub const RICH_TAG: &[u8; 4] = b"Rich";
/// "DanS" as a little-endian word; XORed with the checksum to form the start marker.
pub const DANS_MASK: u32 = 0x536E_6144;
/// Length of the start marker (masked "DanS" plus three checksum copies).
pub const START_MARKER_LEN: usize = 16;

/// Offsets and checksum recovered from the header region.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Markers {
    pub stored_checksum: u32,
    /// Offset of the start marker.
    pub block_start: usize,
    /// First byte after the start marker; may lie past `entries_end`.
    pub entries_start: usize,
    /// Offset of the "Rich" tag (exclusive end of the entries).
    pub entries_end: usize,
}

/// The canonical 16-byte start marker for `checksum`.
pub fn start_marker(checksum: u32) -> [u8; START_MARKER_LEN] {
    let mut marker = [0u8; START_MARKER_LEN];
    marker[..4].copy_from_slice(&(checksum ^ DANS_MASK).to_le_bytes());
    for word in marker[4..].chunks_exact_mut(4) {
        word.copy_from_slice(&checksum.to_le_bytes());
    }
    marker
}

/// Find the "Rich" tag, the stored checksum, and the start marker.
pub fn locate(region: &[u8], search: MarkerSearch) -> Result<Markers> {
    let rich_offset = memmem::find(region, RICH_TAG).ok_or(RichError::RichHeaderNotFound)?;
    let stored_checksum = region
        .read_u32_le_at(rich_offset + RICH_TAG.len())
        .ok_or(RichError::RichHeaderNotFound)?;
    trace!(rich_offset, stored_checksum, "Found Rich tag");

    let block_start = match search {
        MarkerSearch::Canonical => {
            memmem::find(&region[..rich_offset], &start_marker(stored_checksum))
        }
        MarkerSearch::SingleByte => memchr((stored_checksum ^ DANS_MASK) as u8, region),
    }
    .ok_or(RichError::RichHeaderNotFound)?;

    debug!(
        block_start,
        rich_offset,
        stored_checksum,
        ?search,
        "Located Rich header"
    );

    Ok(Markers {
        stored_checksum,
        block_start,
        entries_start: block_start + START_MARKER_LEN,
        entries_end: rich_offset,
    })
}
