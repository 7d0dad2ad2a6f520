//! Core SMBIOS decoding module
//!
//! # Module Organization
//!
//! - [`error`]: Error type and crate `Result`
//! - [`types`]: Structure header and type identifiers
//! - [`table`]: Generic structure parsing, the [`Record`](table::Record) accessor
//!   trait and the structure-table walk
//! - [`processor`]: The Processor Information (type 4) decoder

pub mod error;
pub mod processor;
pub mod table;
pub mod types;
mod utils;

use log::debug;

pub use processor::ProcessorInformation;
pub use table::{Record, Table, TableIter};
pub use error::{Result, SmbiosError};
pub use types::models::{Header, TableType};
pub use utils::decode_hex;

/// Decodes every Processor Information structure in a structure table.
///
/// Other structure types are skipped. The first malformed structure or
/// processor record ends the walk with its error.
pub fn processors(data: &[u8]) -> Result<Vec<ProcessorInformation>> {
    let mut found = Vec::new();
    for table in TableIter::new(data) {
        let table = table?;
        if table.record_type() != TableType::PROCESSOR_INFORMATION {
            continue;
        }
        found.push(ProcessorInformation::new(&table)?);
    }
    debug!("Found {} processor structures", found.len());
    Ok(found)
}

/// Decodes a single raw structure, such as a
/// `/sys/firmware/dmi/entries/4-*/raw` file.
pub fn processor_from_bytes(data: &[u8]) -> Result<ProcessorInformation> {
    let (table, _) = Table::parse(data)?;
    ProcessorInformation::new(&table)
}
