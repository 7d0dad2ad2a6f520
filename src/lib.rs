//! # smbios-processor
//!
//! A decoder for SMBIOS Processor Information (type 4) structures.
//! Works on captured byte images: single structures from
//! `/sys/firmware/dmi/entries` or whole structure tables.
//!
//! Rendering follows the indented report layout of `dmidecode`.
pub mod smbios;

// Re-export the main types for convenience
pub use smbios::{
    processor::{
        ProcessorInformation,
        enums::{
            ProcessorCharacteristics, ProcessorFamily, ProcessorStatus, ProcessorType,
            ProcessorUpgrade,
        },
        signature::{CpuFlags, IdLayout, Signature},
    },
    Header, Record, Result, SmbiosError, Table, TableIter, TableType, decode_hex,
    processor_from_bytes, processors,
};
