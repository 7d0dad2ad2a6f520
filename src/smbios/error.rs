//! Custom error types for the smbios-processor crate.

use thiserror::Error;

/// The primary error type for all operations in this crate.
#[derive(Debug, Error)]
pub enum SmbiosError {
    /// An error originating from I/O operations.
    #[error("I/O error: {0:?}")]
    Io(#[from] std::io::Error),

    /// The structure handed to a decoder carries a different type tag.
    #[error("Wrong record type: expected {expected}, got {actual}")]
    WrongRecordType { expected: u8, actual: u8 },

    /// The declared length does not cover the mandatory fields of the record.
    #[error("Truncated record: declared length {length:#04x} is below the minimum of {minimum:#04x}")]
    TruncatedRecord { length: u8, minimum: u8 },

    /// The buffer ends before the structure it is supposed to contain.
    #[error("Buffer too short for {context}: expected at least {expected} bytes, got {actual}")]
    TooShort {
        context: &'static str,
        expected: usize,
        actual: usize,
    },

    /// A structure header declares a length smaller than the header itself.
    #[error("Invalid structure length {length} for handle {handle:#06x}")]
    InvalidHeaderLength { length: u8, handle: u16 },

    /// The string-set following a structure is not terminated by a double NUL.
    #[error("Unterminated string-set for handle {handle:#06x}")]
    UnterminatedStrings { handle: u16 },

    /// Hex-encoded input could not be decoded.
    #[error("Invalid hex input: {0}")]
    InvalidHex(String),
}

/// A convenience `Result` type alias using the crate's `SmbiosError` type.
pub type Result<T> = std::result::Result<T, SmbiosError>;
