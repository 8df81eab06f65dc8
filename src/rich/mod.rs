//! PE Rich Header extraction and verification.
//!
//! The Rich Header is an undocumented block that Microsoft's linker places
//! between the DOS stub and the PE header. It lists, for every tool that
//! contributed object files, an opaque identifier and a use count, all XOR
//! masked with a checksum over the DOS header and the entries themselves.
//!
//! Parsing runs four stages over the `[0, e_lfanew)` region:
//! [`slicer`] cuts the region, [`locator`] finds the markers and stored
//! checksum, [`decoder`] unmasks the entries and [`checksum`] recomputes the
//! checksum. A checksum mismatch is reported on the result, never as an error.

pub mod checksum;
pub mod decoder;
pub mod locator;
pub mod slicer;
pub mod types;
pub mod utils;

pub use types::{EntryTable, RichEntry, RichHeader};

use crate::config::RichConfig;
use crate::error::Result;
use crate::io::SafeReader;
use std::io::{Read, Seek};
use std::path::Path;
use tracing::{debug, warn};

/// Parse a complete in-memory PE file.
pub fn parse_bytes(data: &[u8], config: &RichConfig) -> Result<RichHeader> {
    let region = slicer::slice_header(data, config.max_header_size)?;
    parse_region(region, config)
}

/// Parse from an open, seekable stream.
pub fn parse_reader<R: Read + Seek>(src: &mut R, config: &RichConfig) -> Result<RichHeader> {
    let region = slicer::read_header(src, config.max_header_size)?;
    parse_region(&region, config)
}

/// Open `path` with the configured I/O limits and parse it.
pub fn parse_path<P: AsRef<Path>>(path: P, config: &RichConfig) -> Result<RichHeader> {
    let path = path.as_ref();
    let mut reader = SafeReader::open(path, config.io.clone())?;
    let region = slicer::read_header_mapped(&mut reader, config.max_header_size)?;
    debug!(path = %path.display(), region_len = region.len(), "Read DOS header region");
    parse_region(&region, config)
}

/// Run marker location, decoding and checksum validation over a header region.
pub fn parse_region(region: &[u8], config: &RichConfig) -> Result<RichHeader> {
    let markers = locator::locate(region, config.marker_search)?;
    let entries = decoder::decode_entries(
        region,
        markers.entries_start,
        markers.entries_end,
        markers.stored_checksum,
    );
    let computed_checksum = checksum::compute_checksum(region, markers.block_start, &entries);
    let checksum_valid = computed_checksum == markers.stored_checksum;

    if checksum_valid {
        debug!(entries = entries.len(), "Rich header checksum verified");
    } else {
        warn!(
            stored = markers.stored_checksum,
            computed = computed_checksum,
            "Rich header checksum mismatch"
        );
    }

    Ok(RichHeader {
        offset: markers.block_start,
        rich_offset: markers.entries_end,
        size: (markers.entries_end + 8).saturating_sub(markers.block_start),
        entries,
        stored_checksum: markers.stored_checksum,
        computed_checksum,
        checksum_valid,
    })
}
