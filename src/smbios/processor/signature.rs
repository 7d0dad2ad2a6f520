//! Processor ID decoding (DSP0134 7.5.3).
//!
//! The 8-byte Processor ID field has no single layout. Which one applies is
//! decided by the processor family:
//!
//! ```text
//! Intel-style x86   ID[0..4] = CPUID(1).EAX, ID[4..8] = CPUID(1).EDX
//! AMD-style x86     ID[0..4] = CPUID(1).EAX, ID[4..8] = CPUID(1).EDX
//! ARM32             ID[0..4] = MIDR
//! anything else     opaque
//! ```
//!
//! The two x86 layouts differ only in how the extended family and model
//! bits are folded into the base values.

use std::fmt;

use log::trace;

use super::enums::ProcessorFamily;

/// Identification layout selected by processor family.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdLayout {
    /// Intel-style CPUID signature; extended fields always added.
    IntelX86,
    /// AMD-style CPUID signature; extended fields only for base family 0xF.
    AmdX86,
    /// ARM Main ID Register.
    Arm32,
}

impl IdLayout {
    /// Picks the ID layout for a resolved processor family.
    pub fn classify(family: ProcessorFamily) -> Option<Self> {
        let layout = match family.0 {
            0x0B..=0x15
            | 0x28..=0x2F
            | 0xA1..=0xB3
            | 0xB5
            | 0xB9..=0xC7
            | 0xCD..=0xCF
            | 0xD2..=0xDB
            | 0xDD..=0xE0 => Self::IntelX86,
            0x18..=0x1D
            | 0x1F
            | 0x38..=0x3F
            | 0x46..=0x4F
            | 0x66..=0x6B
            | 0x83..=0x8F
            | 0xB6..=0xB7
            | 0xE4..=0xEF => Self::AmdX86,
            0x100..=0x101 | 0x118..=0x119 => Self::Arm32,
            _ => return None,
        };
        trace!("Family {:#06x} uses {:?} ID layout", family.0, layout);
        Some(layout)
    }

    /// Whether the upper half of the ID carries CPUID(1).EDX feature flags.
    pub fn has_cpu_flags(self) -> bool {
        matches!(self, Self::IntelX86 | Self::AmdX86)
    }

    /// Extracts the signature fields from the raw processor ID.
    ///
    /// Returns `None` for an all-zero MIDR, which firmware uses when the
    /// register was not captured.
    pub fn decode(self, id: u64) -> Option<Signature> {
        let eax = id as u32;
        let signature = match self {
            Self::IntelX86 => Signature::IntelX86 {
                cpu_type: (eax >> 12) & 0x3,
                family: ((eax >> 20) & 0xFF) + ((eax >> 8) & 0xF),
                model: ((eax >> 12) & 0xF0) + ((eax >> 4) & 0xF),
                stepping: eax & 0xF,
            },
            Self::AmdX86 => {
                let base_family = (eax >> 8) & 0xF;
                let mut family = base_family;
                let mut model = (eax >> 4) & 0xF;
                if base_family == 0xF {
                    family += (eax >> 20) & 0xFF;
                    model += (eax >> 12) & 0xF0;
                }
                Signature::AmdX86 {
                    family,
                    model,
                    stepping: eax & 0xF,
                }
            }
            Self::Arm32 => {
                if eax == 0 {
                    return None;
                }
                Signature::Arm32 {
                    implementor: eax >> 24,
                    variant: (eax >> 20) & 0xF,
                    architecture: (eax >> 16) & 0xF,
                    part: (eax >> 4) & 0xFFF,
                    revision: eax & 0xF,
                }
            }
        };
        Some(signature)
    }
}

/// Decoded processor signature.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Signature {
    IntelX86 {
        cpu_type: u32,
        family: u32,
        model: u32,
        stepping: u32,
    },
    AmdX86 {
        family: u32,
        model: u32,
        stepping: u32,
    },
    Arm32 {
        implementor: u32,
        variant: u32,
        architecture: u32,
        part: u32,
        revision: u32,
    },
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::IntelX86 {
                cpu_type,
                family,
                model,
                stepping,
            } => write!(
                f,
                "Type {}, Family {}, Model {}, Stepping {}",
                cpu_type, family, model, stepping
            ),
            Self::AmdX86 {
                family,
                model,
                stepping,
            } => write!(f, "Family {}, Model {}, Stepping {}", family, model, stepping),
            Self::Arm32 {
                implementor,
                variant,
                architecture,
                part,
                revision,
            } => write!(
                f,
                "Implementor {:#04x}, Variant {:#x}, Architecture {}, Part {:#05x}, Revision {}",
                implementor, variant, architecture, part, revision
            ),
        }
    }
}

/// CPUID(1).EDX feature names; empty entries are reserved bits.
const CPU_FLAG_NAMES: [&str; 32] = [
    "FPU (Floating-point unit on-chip)",
    "VME (Virtual mode extension)",
    "DE (Debugging extension)",
    "PSE (Page size extension)",
    "TSC (Time stamp counter)",
    "MSR (Model specific registers)",
    "PAE (Physical address extension)",
    "MCE (Machine check exception)",
    "CX8 (CMPXCHG8 instruction supported)",
    "APIC (On-chip APIC hardware supported)",
    "",
    "SEP (Fast system call)",
    "MTRR (Memory type range registers)",
    "PGE (Page global enable)",
    "MCA (Machine check architecture)",
    "CMOV (Conditional move instruction supported)",
    "PAT (Page attribute table)",
    "PSE-36 (36-bit page size extension)",
    "PSN (Processor serial number present and enabled)",
    "CLFSH (CLFLUSH instruction supported)",
    "",
    "DS (Debug store)",
    "ACPI (ACPI supported)",
    "MMX (MMX technology supported)",
    "FXSR (FXSAVE and FXSTOR instructions supported)",
    "SSE (Streaming SIMD extensions)",
    "SSE2 (Streaming SIMD extensions 2)",
    "SS (Self-snoop)",
    "HTT (Multi-threading)",
    "TM (Thermal monitor supported)",
    "",
    "PBE (Pending break enabled)",
];

/// x86 feature flags from the upper half of the processor ID.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CpuFlags(pub u32);

impl CpuFlags {
    pub fn from_id(id: u64) -> Self {
        Self((id >> 32) as u32)
    }

    /// Names of the set, non-reserved flags in ascending bit order.
    pub fn names(self) -> impl Iterator<Item = &'static str> {
        CPU_FLAG_NAMES
            .iter()
            .enumerate()
            .filter(move |(bit, name)| self.0 & (1 << bit) != 0 && !name.is_empty())
            .map(|(_, name)| *name)
    }
}
