//! Code tables for the Processor Information structure (DSP0134 7.5.1 - 7.5.9).
//!
//! Every table is closed: codes the table does not know render as their
//! low byte in hex (`0x7f`), since newer revisions of the standard keep
//! adding values.

use std::fmt;

/// Renders an unrecognised code as its low byte in hex.
fn unknown_code(f: &mut fmt::Formatter<'_>, code: u16) -> fmt::Result {
    write!(f, "{:#x}", code as u8)
}

/// Processor type (DSP0134 7.5.1).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ProcessorType(pub u8);

impl ProcessorType {
    pub fn name(self) -> Option<&'static str> {
        let name = match self.0 {
            0x01 => "Other",
            0x02 => "Unknown",
            0x03 => "Central Processor",
            0x04 => "Math Processor",
            0x05 => "DSP Processor",
            0x06 => "Video Processor",
            _ => return None,
        };
        Some(name)
    }
}

impl fmt::Display for ProcessorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => f.write_str(name),
            None => unknown_code(f, self.0.into()),
        }
    }
}

/// Processor family (DSP0134 7.5.2).
///
/// Holds the full 16-bit family domain. Codes below 0x100 fit the legacy
/// byte at offset 06h; the rest are only reachable through Processor Family 2.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct ProcessorFamily(pub u16);

impl ProcessorFamily {
    pub const OTHER: Self = Self(0x01);
    pub const PENTIUM: Self = Self(0x0B);
    /// "Obtain from Processor Family 2".
    pub const INDICATOR_FAMILY_2: u8 = 0xFE;

    pub fn name(self) -> Option<&'static str> {
        let name = match self.0 {
            0x0001 => "Other",
            0x0002 => "Unknown",
            0x0003 => "8086",
            0x0004 => "80286",
            0x0005 => "80386",
            0x0006 => "80486",
            0x0007 => "8087",
            0x0008 => "80287",
            0x0009 => "80387",
            0x000A => "80487",
            0x000B => "Pentium",
            0x000C => "Pentium Pro",
            0x000D => "Pentium II",
            0x000E => "Pentium MMX",
            0x000F => "Celeron",
            0x0010 => "Pentium II Xeon",
            0x0011 => "Pentium III",
            0x0012 => "M1",
            0x0013 => "M2",
            0x0014 => "Celeron M",
            0x0015 => "Pentium 4 HT",
            0x0018 => "Duron",
            0x0019 => "K5",
            0x001A => "K6",
            0x001B => "K6-2",
            0x001C => "K6-3",
            0x001D => "Athlon",
            0x001E => "AMD29000",
            0x001F => "K6-2+",
            0x0020 => "Power PC",
            0x0021 => "Power PC 601",
            0x0022 => "Power PC 603",
            0x0023 => "Power PC 603+",
            0x0024 => "Power PC 604",
            0x0025 => "Power PC 620",
            0x0026 => "Power PC x704",
            0x0027 => "Power PC 750",
            0x0028 => "Core Duo",
            0x0029 => "Core Duo Mobile",
            0x002A => "Core Solo Mobile",
            0x002B => "Atom",
            0x002C => "Core M",
            0x002D => "Core m3",
            0x002E => "Core m5",
            0x002F => "Core m7",
            0x0030 => "Alpha",
            0x0031 => "Alpha 21064",
            0x0032 => "Alpha 21066",
            0x0033 => "Alpha 21164",
            0x0034 => "Alpha 21164PC",
            0x0035 => "Alpha 21164a",
            0x0036 => "Alpha 21264",
            0x0037 => "Alpha 21364",
            0x0038 => "Turion II Ultra Dual-Core Mobile M",
            0x0039 => "Turion II Dual-Core Mobile M",
            0x003A => "Athlon II Dual-Core M",
            0x003B => "Opteron 6100",
            0x003C => "Opteron 4100",
            0x003D => "Opteron 6200",
            0x003E => "Opteron 4200",
            0x003F => "FX",
            0x0040 => "MIPS",
            0x0041 => "MIPS R4000",
            0x0042 => "MIPS R4200",
            0x0043 => "MIPS R4400",
            0x0044 => "MIPS R4600",
            0x0045 => "MIPS R10000",
            0x0046 => "C-Series",
            0x0047 => "E-Series",
            0x0048 => "A-Series",
            0x0049 => "G-Series",
            0x004A => "Z-Series",
            0x004B => "R-Series",
            0x004C => "Opteron 4300",
            0x004D => "Opteron 6300",
            0x004E => "Opteron 3300",
            0x004F => "FirePro",
            0x0050 => "SPARC",
            0x0051 => "SuperSPARC",
            0x0052 => "MicroSPARC II",
            0x0053 => "MicroSPARC IIep",
            0x0054 => "UltraSPARC",
            0x0055 => "UltraSPARC II",
            0x0056 => "UltraSPARC IIi",
            0x0057 => "UltraSPARC III",
            0x0058 => "UltraSPARC IIIi",
            0x0060 => "68040",
            0x0061 => "68xxx",
            0x0062 => "68000",
            0x0063 => "68010",
            0x0064 => "68020",
            0x0065 => "68030",
            0x0066 => "Athlon X4",
            0x0067 => "Opteron X1000",
            0x0068 => "Opteron X2000",
            0x0069 => "Opteron A-Series",
            0x006A => "Opteron X3000",
            0x006B => "Zen",
            0x0070 => "Hobbit",
            0x0078 => "Crusoe TM5000",
            0x0079 => "Crusoe TM3000",
            0x007A => "Efficeon TM8000",
            0x0080 => "Weitek",
            0x0082 => "Itanium",
            0x0083 => "Athlon 64",
            0x0084 => "Opteron",
            0x0085 => "Sempron",
            0x0086 => "Turion 64",
            0x0087 => "Dual-Core Opteron",
            0x0088 => "Athlon 64 X2",
            0x0089 => "Turion 64 X2",
            0x008A => "Quad-Core Opteron",
            0x008B => "Third-Generation Opteron",
            0x008C => "Phenom FX",
            0x008D => "Phenom X4",
            0x008E => "Phenom X2",
            0x008F => "Athlon X2",
            0x0090 => "PA-RISC",
            0x0091 => "PA-RISC 8500",
            0x0092 => "PA-RISC 8000",
            0x0093 => "PA-RISC 7300LC",
            0x0094 => "PA-RISC 7200",
            0x0095 => "PA-RISC 7100LC",
            0x0096 => "PA-RISC 7100",
            0x00A0 => "V30",
            0x00A1 => "Quad-Core Xeon 3200",
            0x00A2 => "Dual-Core Xeon 3000",
            0x00A3 => "Quad-Core Xeon 5300",
            0x00A4 => "Dual-Core Xeon 5100",
            0x00A5 => "Dual-Core Xeon 5000",
            0x00A6 => "Dual-Core Xeon LV",
            0x00A7 => "Dual-Core Xeon ULV",
            0x00A8 => "Dual-Core Xeon 7100",
            0x00A9 => "Quad-Core Xeon 5400",
            0x00AA => "Quad-Core Xeon",
            0x00AB => "Dual-Core Xeon 5200",
            0x00AC => "Dual-Core Xeon 7200",
            0x00AD => "Quad-Core Xeon 7300",
            0x00AE => "Quad-Core Xeon 7400",
            0x00AF => "Multi-Core Xeon 7400",
            0x00B0 => "Pentium III Xeon",
            0x00B1 => "Pentium III Speedstep",
            0x00B2 => "Pentium 4",
            0x00B3 => "Xeon",
            0x00B4 => "AS400",
            0x00B5 => "Xeon MP",
            0x00B6 => "Athlon XP",
            0x00B7 => "Athlon MP",
            0x00B8 => "Itanium 2",
            0x00B9 => "Pentium M",
            0x00BA => "Celeron D",
            0x00BB => "Pentium D",
            0x00BC => "Pentium EE",
            0x00BD => "Core Solo",
            0x00BE => "Core 2 or K7",
            0x00BF => "Core 2 Duo",
            0x00C0 => "Core 2 Solo",
            0x00C1 => "Core 2 Extreme",
            0x00C2 => "Core 2 Quad",
            0x00C3 => "Core 2 Extreme Mobile",
            0x00C4 => "Core 2 Duo Mobile",
            0x00C5 => "Core 2 Solo Mobile",
            0x00C6 => "Core i7",
            0x00C7 => "Dual-Core Celeron",
            0x00C8 => "IBM390",
            0x00C9 => "G4",
            0x00CA => "G5",
            0x00CB => "ESA/390 G6",
            0x00CC => "z/Architecture",
            0x00CD => "Core i5",
            0x00CE => "Core i3",
            0x00CF => "Core i9",
            0x00D2 => "C7-M",
            0x00D3 => "C7-D",
            0x00D4 => "C7",
            0x00D5 => "Eden",
            0x00D6 => "Multi-Core Xeon",
            0x00D7 => "Dual-Core Xeon 3xxx",
            0x00D8 => "Quad-Core Xeon 3xxx",
            0x00D9 => "Nano",
            0x00DA => "Dual-Core Xeon 5xxx",
            0x00DB => "Quad-Core Xeon 5xxx",
            0x00DD => "Dual-Core Xeon 7xxx",
            0x00DE => "Quad-Core Xeon 7xxx",
            0x00DF => "Multi-Core Xeon 7xxx",
            0x00E0 => "Multi-Core Xeon 3400",
            0x00E4 => "Opteron 3000",
            0x00E5 => "Sempron II",
            0x00E6 => "Embedded Opteron Quad-Core",
            0x00E7 => "Phenom Triple-Core",
            0x00E8 => "Turion Ultra Dual-Core Mobile",
            0x00E9 => "Turion Dual-Core Mobile",
            0x00EA => "Athlon Dual-Core",
            0x00EB => "Sempron SI",
            0x00EC => "Phenom II",
            0x00ED => "Athlon II",
            0x00EE => "Six-Core Opteron",
            0x00EF => "Sempron M",
            0x00FA => "i860",
            0x00FB => "i960",
            0x0100 => "ARMv7",
            0x0101 => "ARMv8",
            0x0104 => "SH-3",
            0x0105 => "SH-4",
            0x0118 => "ARM",
            0x0119 => "StrongARM",
            0x012C => "6x86",
            0x012D => "MediaGX",
            0x012E => "MII",
            0x0140 => "WinChip",
            0x015E => "DSP",
            0x01F4 => "Video Processor",
            _ => return None,
        };
        Some(name)
    }
}

impl From<u8> for ProcessorFamily {
    fn from(value: u8) -> Self {
        Self(value.into())
    }
}

impl fmt::Display for ProcessorFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => f.write_str(name),
            None => unknown_code(f, self.0),
        }
    }
}

const STATUS_LABELS: [&str; 8] = [
    "Unknown",
    "Enabled",
    "Disabled By User",
    "Disabled By BIOS",
    "Idle",
    "Reserved",
    "Reserved",
    "Other",
];

/// Socket population and CPU status byte (DSP0134 7.5, offset 18h).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ProcessorStatus(pub u8);

impl ProcessorStatus {
    const SOCKET_POPULATED: u8 = 0x40;

    pub fn is_populated(self) -> bool {
        self.0 & Self::SOCKET_POPULATED != 0
    }

    /// CPU status label from bits 0-2.
    pub fn cpu_status(self) -> &'static str {
        STATUS_LABELS[(self.0 & 0x07) as usize]
    }
}

impl fmt::Display for ProcessorStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.is_populated() {
            return f.write_str("Unpopulated");
        }
        write!(f, "Populated, {}", self.cpu_status())
    }
}

/// Processor upgrade / socket kind (DSP0134 7.5.5).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ProcessorUpgrade(pub u8);

impl ProcessorUpgrade {
    pub fn name(self) -> Option<&'static str> {
        let name = match self.0 {
            0x01 => "Other",
            0x02 => "Unknown",
            0x03 => "Daughter Board",
            0x04 => "ZIF Socket",
            0x05 => "Replaceable Piggy Back",
            0x06 => "None",
            0x07 => "LIF Socket",
            0x08 => "Slot 1",
            0x09 => "Slot 2",
            0x0A => "370-pin Socket",
            0x0B => "Slot A",
            0x0C => "Slot M",
            0x0D => "Socket 423",
            0x0E => "Socket A (Socket 462)",
            0x0F => "Socket 478",
            0x10 => "Socket 754",
            0x11 => "Socket 940",
            0x12 => "Socket 939",
            0x13 => "Socket mPGA604",
            0x14 => "Socket LGA771",
            0x15 => "Socket LGA775",
            0x16 => "Socket S1",
            0x17 => "Socket AM2",
            0x18 => "Socket F (1207)",
            0x19 => "Socket LGA1366",
            0x1A => "Socket G34",
            0x1B => "Socket AM3",
            0x1C => "Socket C32",
            0x1D => "Socket LGA1156",
            0x1E => "Socket LGA1567",
            0x1F => "Socket PGA988A",
            0x20 => "Socket BGA1288",
            0x21 => "Socket rPGA988B",
            0x22 => "Socket BGA1023",
            0x23 => "Socket BGA1224",
            0x24 => "Socket BGA1155",
            0x25 => "Socket LGA1356",
            0x26 => "Socket LGA2011",
            0x27 => "Socket FS1",
            0x28 => "Socket FS2",
            0x29 => "Socket FM1",
            0x2A => "Socket FM2",
            0x2B => "Socket LGA2011-3",
            0x2C => "Socket LGA1356-3",
            0x2D => "Socket LGA1150",
            0x2E => "Socket BGA1168",
            0x2F => "Socket BGA1234",
            0x30 => "Socket BGA1364",
            0x31 => "Socket AM4",
            0x32 => "Socket LGA1151",
            0x33 => "Socket BGA1356",
            0x34 => "Socket BGA1440",
            0x35 => "Socket BGA1515",
            0x36 => "Socket LGA3647-1",
            0x37 => "Socket SP3",
            0x38 => "Socket SP3r2",
            0x39 => "Socket LGA2066",
            0x3A => "Socket BGA1392",
            0x3B => "Socket BGA1510",
            0x3C => "Socket BGA1528",
            _ => return None,
        };
        Some(name)
    }
}

impl fmt::Display for ProcessorUpgrade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => f.write_str(name),
            None => unknown_code(f, self.0.into()),
        }
    }
}

/// Processor characteristics bitmap (DSP0134 7.5.9).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ProcessorCharacteristics(pub u16);

impl ProcessorCharacteristics {
    pub const RESERVED: u16 = 1 << 0;
    pub const UNKNOWN: u16 = 1 << 1;
    pub const CAPABLE_64BIT: u16 = 1 << 2;
    pub const MULTI_CORE: u16 = 1 << 3;
    pub const HARDWARE_THREAD: u16 = 1 << 4;
    pub const EXECUTE_PROTECTION: u16 = 1 << 5;
    pub const ENHANCED_VIRTUALIZATION: u16 = 1 << 6;
    pub const POWER_PERFORMANCE_CONTROL: u16 = 1 << 7;

    const LABELS: [(u16, &'static str); 8] = [
        (Self::RESERVED, "Reserved"),
        (Self::UNKNOWN, "Unknown"),
        (Self::CAPABLE_64BIT, "64-bit capable"),
        (Self::MULTI_CORE, "Multi-Core"),
        (Self::HARDWARE_THREAD, "Hardware Thread"),
        (Self::EXECUTE_PROTECTION, "Execute Protection"),
        (Self::ENHANCED_VIRTUALIZATION, "Enhanced Virtualization"),
        (Self::POWER_PERFORMANCE_CONTROL, "Power/Performance Control"),
    ];

    pub fn contains(self, bit: u16) -> bool {
        self.0 & bit != 0
    }

    /// Labels of the set bits, lowest bit first. Bits 8-15 have no label.
    pub fn labels(self) -> impl Iterator<Item = &'static str> {
        Self::LABELS
            .iter()
            .filter(move |(bit, _)| self.contains(*bit))
            .map(|(_, label)| *label)
    }
}

impl fmt::Display for ProcessorCharacteristics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let lines: Vec<&str> = self.labels().collect();
        write!(f, "\t\t{}", lines.join("\n\t\t"))
    }
}
