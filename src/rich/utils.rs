//! Byte-slice helpers shared by the pipeline stages

/// Extension trait for reading little-endian words from byte slices
pub trait ReadExt {
    fn read_u32_le_at(&self, offset: usize) -> Option<u32>;
}

impl ReadExt for [u8] {
    #[inline(always)]
    fn read_u32_le_at(&self, offset: usize) -> Option<u32> {
        self.get(offset..offset.checked_add(4)?)
            .and_then(|b| b.try_into().ok())
            .map(u32::from_le_bytes)
    }
}
