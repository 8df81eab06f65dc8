//! Rich Header checksum recomputation.
//!
//! The checksum starts from the offset of the start marker, adds every header
//! byte before the marker rotated left by its offset (skipping `e_lfanew`),
//! then adds every identifier rotated left by its count. All arithmetic is
//! modulo 2^32 and rotations are true 32-bit rotations.

use crate::rich::slicer::{E_LFANEW_LEN, E_LFANEW_OFFSET};
use crate::rich::types::EntryTable;

/// Rotate `value` left by `amount mod 32`; an amount of 0 leaves it unchanged.
#[inline(always)]
pub fn rotl32(value: u32, amount: u32) -> u32 {
    value.rotate_left(amount % 32)
}

/// Header-byte half of the checksum, seeded with `block_start`.
pub fn header_sum(region: &[u8], block_start: usize) -> u32 {
    let lfanew = E_LFANEW_OFFSET..E_LFANEW_OFFSET + E_LFANEW_LEN;
    region[..block_start.min(region.len())]
        .iter()
        .enumerate()
        .filter(|(i, _)| !lfanew.contains(i))
        .fold(block_start as u32, |sum, (i, &b)| {
            sum.wrapping_add(rotl32(u32::from(b), i as u32))
        })
}

/// Entry half of the checksum.
pub fn entries_sum(entries: &EntryTable) -> u32 {
    entries.iter().fold(0u32, |sum, e| {
        sum.wrapping_add(rotl32(e.identifier, e.count))
    })
}

/// Full checksum over the header bytes before `block_start` and the decoded entries.
pub fn compute_checksum(region: &[u8], block_start: usize, entries: &EntryTable) -> u32 {
    header_sum(region, block_start).wrapping_add(entries_sum(entries))
}
