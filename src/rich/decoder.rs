//! Unmasking of the (identifier, count) pairs between the markers.

use crate::rich::types::EntryTable;
use tracing::trace;

/// Size of one masked entry on disk.
pub const ENTRY_SIZE: usize = 8;

/// Decode every whole 8-byte entry in `region[start..end]`.
///
/// A trailing partial entry is dropped, as is everything when `start` lies
/// past `end` or past the region.
pub fn decode_entries(region: &[u8], start: usize, end: usize, key: u32) -> EntryTable {
    let end = end.min(region.len());
    let mut table = EntryTable::new();
    let Some(raw) = region.get(start..end) else {
        return table;
    };

    for chunk in raw.chunks_exact(ENTRY_SIZE) {
        let (id, count) = chunk.split_at(4);
        // chunks_exact guarantees both halves are four bytes wide.
        let identifier = u32::from_le_bytes([id[0], id[1], id[2], id[3]]) ^ key;
        let count = u32::from_le_bytes([count[0], count[1], count[2], count[3]]) ^ key;
        if let Some(previous) = table.insert(identifier, count) {
            trace!(identifier, previous, count, "Duplicate Rich entry overwritten");
        }
    }

    table
}
