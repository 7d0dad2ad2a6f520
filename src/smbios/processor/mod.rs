//! Processor Information structure (SMBIOS type 4, DSP0134 7.5).
//!
//! # Layout
//! ```text
//! 04h socket designation (str)   18h status             26h characteristics (u16)
//! 05h processor type             19h upgrade            28h family 2 (u16)
//! 06h family                     1Ah L1 cache handle    2Ah core count 2 (u16)
//! 07h manufacturer (str)         1Ch L2 cache handle    2Ch core enabled 2 (u16)
//! 08h processor ID (u64)         1Eh L3 cache handle    2Eh thread count 2 (u16)
//! 10h version (str)              20h serial number (str)
//! 11h voltage                    21h asset tag (str)
//! 12h external clock (u16)       22h part number (str)
//! 14h max speed (u16)            23h core count
//! 16h current speed (u16)        24h core enabled
//!                                25h thread count
//! ```
//!
//! Everything past 1Ah was added in later revisions of the standard. The
//! declared length decides which of those fields exist; absent fields keep
//! their zero value.

pub mod enums;
pub mod signature;

use std::fmt;

use log::{debug, trace};

use super::table::Record;
use super::error::{Result, SmbiosError};
use super::types::models::{Header, TableType};
use enums::{
    ProcessorCharacteristics, ProcessorFamily, ProcessorStatus, ProcessorType, ProcessorUpgrade,
};
use signature::{CpuFlags, IdLayout, Signature};

/// Shortest declared length accepted (through the upgrade field).
pub const MIN_LENGTH: u8 = 0x1A;

// Lengths at which each extended field becomes present.
const FAMILY_2_LENGTH: usize = 0x2A;
const CORE_COUNT_2_LENGTH: usize = 0x2C;
const CORE_ENABLED_2_LENGTH: usize = 0x2E;
const THREAD_COUNT_2_LENGTH: usize = 0x30;

// Renderer gates, one per optional field group.
const CACHE_GROUP_LENGTH: usize = 0x1A;
const ASSET_GROUP_LENGTH: usize = 0x20;
const CORE_GROUP_LENGTH: usize = 0x23;

/// 8-bit count value meaning "see the 16-bit field".
const COUNT_OVERFLOW: u8 = 0xFF;

const CACHE_NOT_PROVIDED: u16 = 0xFFFF;

/// Decoded Processor Information structure.
#[derive(Debug, Clone, PartialEq)]
pub struct ProcessorInformation {
    pub header: Header,
    pub socket_designation: String,
    pub processor_type: ProcessorType,
    pub family: u8,
    pub manufacturer: String,
    pub id: u64,
    pub version: String,
    pub voltage: u8,
    pub external_clock: u16,
    pub max_speed: u16,
    pub current_speed: u16,
    pub status: ProcessorStatus,
    pub upgrade: ProcessorUpgrade,
    pub l1_cache_handle: u16,
    pub l2_cache_handle: u16,
    pub l3_cache_handle: u16,
    pub serial_number: String,
    pub asset_tag: String,
    pub part_number: String,
    pub core_count: u8,
    pub core_enabled: u8,
    pub thread_count: u8,
    pub characteristics: ProcessorCharacteristics,
    pub family_2: ProcessorFamily,
    pub core_count_2: u16,
    pub core_enabled_2: u16,
    pub thread_count_2: u16,
}

impl ProcessorInformation {
    /// Decodes a Processor Information structure from a generic record.
    ///
    /// # Errors
    /// - [`SmbiosError::WrongRecordType`] if the record is not type 4
    /// - [`SmbiosError::TruncatedRecord`] if the declared length is below 1Ah
    pub fn new<R: Record + ?Sized>(record: &R) -> Result<Self> {
        let header = record.header();
        if header.table_type != TableType::PROCESSOR_INFORMATION {
            return Err(SmbiosError::WrongRecordType {
                expected: TableType::PROCESSOR_INFORMATION.into(),
                actual: header.table_type.into(),
            });
        }
        if header.length < MIN_LENGTH {
            return Err(SmbiosError::TruncatedRecord {
                length: header.length,
                minimum: MIN_LENGTH,
            });
        }

        let string = |offset: usize| record.string_at(offset).unwrap_or_default();
        let byte = |offset: usize| record.read_u8(offset).unwrap_or_default();
        let word = |offset: usize| record.read_u16(offset).unwrap_or_default();

        let info = Self {
            header,
            socket_designation: string(0x04),
            processor_type: ProcessorType(byte(0x05)),
            family: byte(0x06),
            manufacturer: string(0x07),
            id: record.read_u64(0x08).unwrap_or_default(),
            version: string(0x10),
            voltage: byte(0x11),
            external_clock: word(0x12),
            max_speed: word(0x14),
            current_speed: word(0x16),
            status: ProcessorStatus(byte(0x18)),
            upgrade: ProcessorUpgrade(byte(0x19)),
            l1_cache_handle: word(0x1A),
            l2_cache_handle: word(0x1C),
            l3_cache_handle: word(0x1E),
            serial_number: string(0x20),
            asset_tag: string(0x21),
            part_number: string(0x22),
            core_count: byte(0x23),
            core_enabled: byte(0x24),
            thread_count: byte(0x25),
            characteristics: ProcessorCharacteristics(word(0x26)),
            family_2: ProcessorFamily(word(0x28)),
            core_count_2: word(0x2A),
            core_enabled_2: word(0x2C),
            thread_count_2: word(0x2E),
        };

        debug!(
            "Decoded processor {:#06x}: {} bytes, socket='{}', family={}",
            header.handle,
            header.length,
            info.socket_designation,
            info.family()
        );
        trace!(
            "Processor {:#06x} raw: id={:#018x}, voltage={:#04x}, status={:#04x}, counts={}/{}/{}",
            header.handle,
            info.id,
            info.voltage,
            info.status.0,
            info.core_count,
            info.core_enabled,
            info.thread_count
        );

        Ok(info)
    }

    /// Declared length of the structure in bytes.
    pub fn length(&self) -> usize {
        self.header.length as usize
    }

    /// Returns the processor family, taken from Family 2 when the legacy byte
    /// says so and the structure carries it.
    pub fn family(&self) -> ProcessorFamily {
        if self.family == ProcessorFamily::INDICATOR_FAMILY_2 && self.length() >= FAMILY_2_LENGTH {
            return self.family_2;
        }
        ProcessorFamily::from(self.family)
    }

    /// Returns the processor voltage in volts, or 0.0 when unknown.
    ///
    /// Bit 7 set selects the direct encoding (volts * 10 in bits 0-6).
    /// Otherwise bits 0-2 are the legacy 5V / 3.3V / 2.9V capability bits and
    /// the lowest set bit wins.
    pub fn voltage(&self) -> f32 {
        if self.voltage & 0x80 != 0 {
            return f32::from(self.voltage & 0x7F) / 10.0;
        }
        if self.voltage & 0x01 != 0 {
            5.0
        } else if self.voltage & 0x02 != 0 {
            3.3
        } else if self.voltage & 0x04 != 0 {
            2.9
        } else {
            0.0
        }
    }

    /// Number of cores detected by the BIOS for this socket.
    pub fn core_count(&self) -> u16 {
        self.widen(self.core_count, self.core_count_2, CORE_COUNT_2_LENGTH)
    }

    /// Number of cores enabled by the BIOS and available to the OS.
    pub fn core_enabled(&self) -> u16 {
        self.widen(self.core_enabled, self.core_enabled_2, CORE_ENABLED_2_LENGTH)
    }

    /// Number of threads detected by the BIOS for this socket.
    pub fn thread_count(&self) -> u16 {
        self.widen(self.thread_count, self.thread_count_2, THREAD_COUNT_2_LENGTH)
    }

    fn widen(&self, legacy: u8, extended: u16, min_length: usize) -> u16 {
        if legacy == COUNT_OVERFLOW && self.length() >= min_length {
            extended
        } else {
            legacy.into()
        }
    }

    /// ID layout implied by the resolved family, if any.
    pub fn id_layout(&self) -> Option<IdLayout> {
        IdLayout::classify(self.family())
    }

    /// Decoded processor signature, if the family has a known ID layout.
    pub fn signature(&self) -> Option<Signature> {
        self.id_layout()?.decode(self.id)
    }

    /// x86 feature flags, present only for x86 families.
    pub fn cpu_flags(&self) -> Option<CpuFlags> {
        self.id_layout()
            .filter(|layout| layout.has_cpu_flags())
            .map(|_| CpuFlags::from_id(self.id))
    }
}

fn speed(f: &mut fmt::Formatter<'_>, label: &str, mhz: u16) -> fmt::Result {
    if mhz == 0 {
        write!(f, "\n\t{}: Unknown", label)
    } else {
        write!(f, "\n\t{}: {} MHz", label, mhz)
    }
}

fn cache_handle(f: &mut fmt::Formatter<'_>, label: &str, handle: u16) -> fmt::Result {
    if handle == CACHE_NOT_PROVIDED {
        write!(f, "\n\t{}: Not Provided", label)
    } else {
        write!(f, "\n\t{}: {:#06X}", label, handle)
    }
}

impl fmt::Display for ProcessorInformation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.header)?;
        write!(f, "\n\tSocket Designation: {}", self.socket_designation)?;
        write!(f, "\n\tType: {}", self.processor_type)?;
        write!(f, "\n\tFamily: {}", self.family())?;
        write!(f, "\n\tManufacturer: {}", self.manufacturer)?;
        f.write_str("\n\tID:")?;
        for byte in self.id.to_le_bytes() {
            write!(f, " {:02X}", byte)?;
        }

        if let Some(signature) = self.signature() {
            write!(f, "\n\tSignature: {}", signature)?;
        }
        if let Some(flags) = self.cpu_flags() {
            f.write_str("\n\tFlags:")?;
            for name in flags.names() {
                write!(f, "\n\t\t{}", name)?;
            }
        }

        write!(f, "\n\tVersion: {}", self.version)?;
        write!(f, "\n\tVoltage: {:.1} V", self.voltage())?;
        speed(f, "External Clock", self.external_clock)?;
        speed(f, "Max Speed", self.max_speed)?;
        speed(f, "Current Speed", self.current_speed)?;
        write!(f, "\n\tStatus: {}", self.status)?;
        write!(f, "\n\tUpgrade: {}", self.upgrade)?;

        if self.length() > CACHE_GROUP_LENGTH {
            cache_handle(f, "L1 Cache Handle", self.l1_cache_handle)?;
            cache_handle(f, "L2 Cache Handle", self.l2_cache_handle)?;
            cache_handle(f, "L3 Cache Handle", self.l3_cache_handle)?;
        }
        if self.length() > ASSET_GROUP_LENGTH {
            write!(f, "\n\tSerial Number: {}", self.serial_number)?;
            write!(f, "\n\tAsset Tag: {}", self.asset_tag)?;
            write!(f, "\n\tPart Number: {}", self.part_number)?;
        }
        if self.length() > CORE_GROUP_LENGTH {
            write!(f, "\n\tCore Count: {}", self.core_count())?;
            write!(f, "\n\tCore Enabled: {}", self.core_enabled())?;
            let threads = self.thread_count();
            if threads > 0 {
                write!(f, "\n\tThread Count: {}", threads)?;
            }
            write!(f, "\n\tCharacteristics:\n{}", self.characteristics)?;
        }
        Ok(())
    }
}
