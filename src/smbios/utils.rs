//! Low-level byte reading utilities

use byteorder::{ByteOrder, LittleEndian};
use log::trace;

use super::error::{Result, SmbiosError};

/// Returns `width` bytes at `offset`, provided they end within `limit`.
///
/// `limit` is the structure's declared length; the bytes behind it belong to
/// the string-set or the next structure and are never handed out as fields.
pub fn field(data: &[u8], limit: usize, offset: usize, width: usize) -> Option<&[u8]> {
    let end = offset.checked_add(width)?;
    if end > limit.min(data.len()) {
        trace!("Field {:#04x}+{} lies past declared length {:#04x}", offset, width, limit);
        return None;
    }
    Some(&data[offset..end])
}

pub fn read_u16(bytes: &[u8]) -> u16 {
    LittleEndian::read_u16(bytes)
}

pub fn read_u32(bytes: &[u8]) -> u32 {
    LittleEndian::read_u32(bytes)
}

pub fn read_u64(bytes: &[u8]) -> u64 {
    LittleEndian::read_u64(bytes)
}

/// Splits a structure's string-set into its strings.
///
/// The set is a run of NUL-terminated strings closed by one more NUL; a
/// structure without strings carries just two NULs.
///
/// # Returns
/// The strings and the number of bytes the set occupies, or `None` when the
/// data ends before the closing NUL.
pub fn split_string_set(data: &[u8]) -> Option<(Vec<String>, usize)> {
    if data.starts_with(&[0, 0]) {
        return Some((Vec::new(), 2));
    }

    let mut strings = Vec::new();
    let mut pos = 0;
    loop {
        let nul = data[pos..].iter().position(|&b| b == 0)?;
        strings.push(String::from_utf8_lossy(&data[pos..pos + nul]).into_owned());
        pos += nul + 1;
        match data.get(pos) {
            Some(0) => return Some((strings, pos + 1)),
            Some(_) => continue,
            None => return None,
        }
    }
}

/// Decodes a hex dump of a structure, ignoring whitespace and an optional
/// `0x` prefix.
pub fn decode_hex(input: &str) -> Result<Vec<u8>> {
    let compact: String = input.split_whitespace().collect();
    let digits = compact
        .strip_prefix("0x")
        .or_else(|| compact.strip_prefix("0X"))
        .unwrap_or(&compact);
    hex::decode(digits).map_err(|e| SmbiosError::InvalidHex(e.to_string()))
}
