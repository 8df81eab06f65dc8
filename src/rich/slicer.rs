//! Extraction of the DOS header region (`[0, e_lfanew)`).

use crate::error::{Result, RichError};
use crate::io::SafeReader;
use crate::rich::utils::ReadExt;
use bytes::Bytes;
use std::io::{ErrorKind, Read, Seek, SeekFrom};
use tracing::{debug, warn};

/// Offset of the `e_lfanew` field in the DOS header.
pub const E_LFANEW_OFFSET: usize = 0x3C;
/// Size of the `e_lfanew` field.
pub const E_LFANEW_LEN: usize = 4;

fn too_short(len: u64) -> RichError {
    RichError::NotPeFormat(format!(
        "{len} bytes is too short to contain e_lfanew at {E_LFANEW_OFFSET:#x}"
    ))
}

/// Validate `e_lfanew` against the source length and the configured cap.
fn region_len(pe_offset: u32, source_len: u64, max_header_size: u64) -> Result<usize> {
    let pe_offset = u64::from(pe_offset);
    if pe_offset > max_header_size {
        warn!(pe_offset, max_header_size, "e_lfanew exceeds header size cap");
        return Err(RichError::NotPeFormat(format!(
            "e_lfanew {pe_offset:#x} exceeds the header size limit of {max_header_size:#x}"
        )));
    }
    if pe_offset > source_len {
        return Err(RichError::NotPeFormat(format!(
            "e_lfanew {pe_offset:#x} points past the end of a {source_len}-byte source"
        )));
    }
    debug!(pe_offset, source_len, "Sliced DOS header region");
    Ok(pe_offset as usize)
}

/// Borrow the header region out of an in-memory file.
pub fn slice_header(data: &[u8], max_header_size: u64) -> Result<&[u8]> {
    let pe_offset = data
        .read_u32_le_at(E_LFANEW_OFFSET)
        .ok_or_else(|| too_short(data.len() as u64))?;
    let len = region_len(pe_offset, data.len() as u64, max_header_size)?;
    Ok(&data[..len])
}

/// Read the header region from a seekable stream.
///
/// The stream position afterwards is unspecified.
pub fn read_header<R: Read + Seek>(src: &mut R, max_header_size: u64) -> Result<Vec<u8>> {
    let source_len = src.seek(SeekFrom::End(0))?;

    let mut field = [0u8; E_LFANEW_LEN];
    src.seek(SeekFrom::Start(E_LFANEW_OFFSET as u64))?;
    read_exact_or(src, &mut field, || too_short(source_len))?;
    let pe_offset = u32::from_le_bytes(field);

    let len = region_len(pe_offset, source_len, max_header_size)?;
    let mut region = vec![0u8; len];
    src.seek(SeekFrom::Start(0))?;
    read_exact_or(src, &mut region, || {
        RichError::NotPeFormat(format!("source ended before e_lfanew {pe_offset:#x}"))
    })?;
    Ok(region)
}

/// Read the header region through a memory-mapped `SafeReader`.
pub fn read_header_mapped(reader: &mut SafeReader, max_header_size: u64) -> Result<Bytes> {
    let field = reader.read_at(E_LFANEW_OFFSET as u64, E_LFANEW_LEN as u64)?;
    let pe_offset = field
        .read_u32_le_at(0)
        .ok_or_else(|| too_short(reader.size()))?;
    let len = region_len(pe_offset, reader.size(), max_header_size)?;
    Ok(reader.read_prefix(len as u64)?)
}

/// `read_exact`, with a short read reported as `on_eof()` instead of an I/O error.
fn read_exact_or<R: Read>(
    src: &mut R,
    buf: &mut [u8],
    on_eof: impl FnOnce() -> RichError,
) -> Result<()> {
    match src.read_exact(buf) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == ErrorKind::UnexpectedEof => Err(on_eof()),
        Err(e) => Err(e.into()),
    }
}
