//! Generic SMBIOS structures and the structure-table walk.
//!
//! # Structure Layout
//! ```text
//! [1 byte]  type
//! [1 byte]  length of header + formatted area
//! [2 bytes] handle (little-endian)
//! [length - 4 bytes] formatted area
//! [...]     string-set: "str1\0str2\0...\0" or "\0\0"
//! ```

use log::{debug, info, warn};

use super::error::{Result, SmbiosError};
use super::types::models::{HEADER_LEN, Header, TableType};
use super::utils;

/// Text used for string fields whose index is 0.
pub const NOT_SPECIFIED: &str = "Not Specified";
/// Text used for string fields pointing past the string-set.
pub const BAD_INDEX: &str = "<BAD INDEX>";

/// Read access to one SMBIOS structure, as needed by the record decoders.
///
/// Offsets are relative to the start of the structure, header included. All
/// reads are limited to the declared length even when [`raw`](Record::raw)
/// returns a longer buffer.
pub trait Record {
    /// The structure header.
    fn header(&self) -> Header;

    /// Bytes of the structure starting at the header.
    fn raw(&self) -> &[u8];

    /// Looks up a string by its 1-based index. Index 0 yields `None`.
    fn string(&self, index: u8) -> Option<&str>;

    fn record_type(&self) -> TableType {
        self.header().table_type
    }

    fn declared_length(&self) -> usize {
        self.header().length as usize
    }

    fn read_u8(&self, offset: usize) -> Option<u8> {
        utils::field(self.raw(), self.declared_length(), offset, 1).map(|b| b[0])
    }

    fn read_u16(&self, offset: usize) -> Option<u16> {
        utils::field(self.raw(), self.declared_length(), offset, 2).map(utils::read_u16)
    }

    fn read_u32(&self, offset: usize) -> Option<u32> {
        utils::field(self.raw(), self.declared_length(), offset, 4).map(utils::read_u32)
    }

    fn read_u64(&self, offset: usize) -> Option<u64> {
        utils::field(self.raw(), self.declared_length(), offset, 8).map(utils::read_u64)
    }

    /// Resolves the string referenced by the index byte at `offset`.
    ///
    /// Returns `None` when the index byte lies past the declared length.
    fn string_at(&self, offset: usize) -> Option<String> {
        let index = self.read_u8(offset)?;
        if index == 0 {
            return Some(NOT_SPECIFIED.to_string());
        }
        match self.string(index) {
            Some(s) => Some(s.to_string()),
            None => {
                warn!(
                    "String index {} at offset {:#04x} of handle {:#06x} is out of range",
                    index,
                    offset,
                    self.header().handle
                );
                Some(BAD_INDEX.to_string())
            }
        }
    }
}

/// One SMBIOS structure: header, formatted area and string-set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    header: Header,
    /// Header and formatted area, exactly `header.length` bytes.
    data: Vec<u8>,
    strings: Vec<String>,
}

impl Table {
    /// Parses one structure from the start of `data`.
    ///
    /// # Returns
    /// The structure and the bytes following its string-set.
    ///
    /// # Errors
    /// - [`SmbiosError::TooShort`] if the header or formatted area is cut off
    /// - [`SmbiosError::InvalidHeaderLength`] if the length is below 4
    /// - [`SmbiosError::UnterminatedStrings`] if the string-set never ends
    pub fn parse(data: &[u8]) -> Result<(Self, &[u8])> {
        if data.len() < HEADER_LEN {
            return Err(SmbiosError::TooShort {
                context: "structure header",
                expected: HEADER_LEN,
                actual: data.len(),
            });
        }

        let header = Header {
            table_type: TableType(data[0]),
            length: data[1],
            handle: utils::read_u16(&data[2..4]),
        };
        let length = header.length as usize;
        if length < HEADER_LEN {
            return Err(SmbiosError::InvalidHeaderLength {
                length: header.length,
                handle: header.handle,
            });
        }
        if data.len() < length {
            return Err(SmbiosError::TooShort {
                context: "formatted area",
                expected: length,
                actual: data.len(),
            });
        }

        let (strings, strings_len) = match utils::split_string_set(&data[length..]) {
            Some(set) => set,
            None => {
                warn!("String-set of handle {:#06x} is not terminated", header.handle);
                return Err(SmbiosError::UnterminatedStrings {
                    handle: header.handle,
                });
            }
        };

        debug!(
            "Parsed structure {:#06x}: type {}, {} bytes, {} strings",
            header.handle,
            header.table_type.0,
            header.length,
            strings.len()
        );

        let table = Self {
            header,
            data: data[..length].to_vec(),
            strings,
        };
        Ok((table, &data[length + strings_len..]))
    }

    /// Bytes of the formatted area following the header.
    pub fn formatted(&self) -> &[u8] {
        &self.data[HEADER_LEN..]
    }

    pub fn strings(&self) -> &[String] {
        &self.strings
    }
}

impl Record for Table {
    fn header(&self) -> Header {
        self.header
    }

    fn raw(&self) -> &[u8] {
        &self.data
    }

    fn string(&self, index: u8) -> Option<&str> {
        let slot = usize::from(index).checked_sub(1)?;
        self.strings.get(slot).map(String::as_str)
    }
}

/// Iterator over the structures of a structure table.
///
/// Stops after the End-of-Table structure or when the data runs out. A parse
/// error is yielded once and ends the walk, since the position of the next
/// structure is unknown after it.
pub struct TableIter<'a> {
    data: &'a [u8],
    done: bool,
    count: usize,
}

impl<'a> TableIter<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            data,
            done: false,
            count: 0,
        }
    }
}

impl Iterator for TableIter<'_> {
    type Item = Result<Table>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        if self.data.is_empty() {
            self.done = true;
            info!("Structure table walked: {} structures", self.count);
            return None;
        }

        match Table::parse(self.data) {
            Ok((table, rest)) => {
                self.data = rest;
                self.count += 1;
                if table.record_type() == TableType::END_OF_TABLE {
                    self.done = true;
                    info!("Structure table walked: {} structures", self.count);
                }
                Some(Ok(table))
            }
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}
