//! Core data structures shared by every SMBIOS structure.
//!
//! This module defines the pieces that precede or surround a structure's
//! formatted area:
//! - The 4-byte structure header
//! - Structure type identifiers and their names

use std::fmt;

/// Size of the header that starts every SMBIOS structure.
pub const HEADER_LEN: usize = 4;

/// Structure header: type, declared length and handle.
///
/// The declared length covers the header and the formatted area, but not the
/// string-set that follows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Header {
    pub table_type: TableType,
    pub length: u8,
    pub handle: u16,
}

impl fmt::Display for Header {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Handle {:#06X}, DMI type {}, {} bytes\n{}",
            self.handle,
            u8::from(self.table_type),
            self.length,
            self.table_type
        )
    }
}

/// SMBIOS structure type identifier (DSP0134 6.1.2).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TableType(pub u8);

impl TableType {
    pub const PROCESSOR_INFORMATION: Self = Self(4);
    pub const END_OF_TABLE: Self = Self(127);

    /// Returns the standard name of this structure type, if it has one.
    pub fn name(self) -> Option<&'static str> {
        let name = match self.0 {
            0 => "BIOS Information",
            1 => "System Information",
            2 => "Base Board Information",
            3 => "Chassis Information",
            4 => "Processor Information",
            5 => "Memory Controller Information",
            6 => "Memory Module Information",
            7 => "Cache Information",
            8 => "Port Connector Information",
            9 => "System Slots",
            10 => "On Board Devices Information",
            11 => "OEM Strings",
            12 => "System Configuration Options",
            13 => "BIOS Language Information",
            14 => "Group Associations",
            15 => "System Event Log",
            16 => "Physical Memory Array",
            17 => "Memory Device",
            18 => "32-bit Memory Error Information",
            19 => "Memory Array Mapped Address",
            20 => "Memory Device Mapped Address",
            21 => "Built-in Pointing Device",
            22 => "Portable Battery",
            23 => "System Reset",
            24 => "Hardware Security",
            25 => "System Power Controls",
            26 => "Voltage Probe",
            27 => "Cooling Device",
            28 => "Temperature Probe",
            29 => "Electrical Current Probe",
            30 => "Out-of-band Remote Access",
            31 => "Boot Integrity Services Entry Point",
            32 => "System Boot Information",
            33 => "64-bit Memory Error Information",
            34 => "Management Device",
            35 => "Management Device Component",
            36 => "Management Device Threshold Data",
            37 => "Memory Channel",
            38 => "IPMI Device Information",
            39 => "System Power Supply",
            40 => "Additional Information",
            41 => "Onboard Devices Extended Information",
            42 => "Management Controller Host Interface",
            43 => "TPM Device",
            126 => "Inactive",
            127 => "End Of Table",
            _ => return None,
        };
        Some(name)
    }
}

impl From<u8> for TableType {
    fn from(value: u8) -> Self {
        Self(value)
    }
}

impl From<TableType> for u8 {
    fn from(value: TableType) -> Self {
        value.0
    }
}

impl fmt::Display for TableType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => f.write_str(name),
            None if self.0 >= 128 => f.write_str("OEM-specific Type"),
            None => f.write_str("Unknown Type"),
        }
    }
}
