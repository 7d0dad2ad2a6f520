use smbios_processor::{
    Header, IdLayout, ProcessorFamily, ProcessorInformation, Record, Signature, SmbiosError,
    TableType, processor_from_bytes, processors,
};
use std::fs;
use std::path::PathBuf;

const HANDLE: u16 = 0x0004;

/// A full-length (30h) type 4 structure that tests patch and cut down.
#[derive(Clone)]
struct RawProcessor {
    bytes: [u8; 0x30],
}

impl RawProcessor {
    fn new() -> Self {
        let mut bytes = [0u8; 0x30];
        bytes[0] = 4;
        bytes[1] = 0x30;
        bytes[2..4].copy_from_slice(&HANDLE.to_le_bytes());
        Self { bytes }
    }

    fn u8(mut self, offset: usize, value: u8) -> Self {
        self.bytes[offset] = value;
        self
    }

    fn u16(mut self, offset: usize, value: u16) -> Self {
        self.bytes[offset..offset + 2].copy_from_slice(&value.to_le_bytes());
        self
    }

    fn u64(mut self, offset: usize, value: u64) -> Self {
        self.bytes[offset..offset + 8].copy_from_slice(&value.to_le_bytes());
        self
    }

    /// Encodes the first `length` bytes followed by a string-set.
    fn encode(&self, length: u8, strings: &[&str]) -> Vec<u8> {
        let mut out = self.bytes[..length as usize].to_vec();
        out[1] = length;
        if strings.is_empty() {
            out.extend_from_slice(&[0, 0]);
        } else {
            for s in strings {
                out.extend_from_slice(s.as_bytes());
                out.push(0);
            }
            out.push(0);
        }
        out
    }

    fn decode(&self, length: u8) -> ProcessorInformation {
        processor_from_bytes(&self.encode(length, &[]))
            .unwrap_or_else(|e| panic!("decode failed at length {:#04x}: {}", length, e))
    }
}

/// Record whose buffer always holds all 30h bytes, whatever the declared length.
struct Oversized {
    raw: RawProcessor,
    length: u8,
}

impl Record for Oversized {
    fn header(&self) -> Header {
        Header {
            table_type: TableType(self.raw.bytes[0]),
            length: self.length,
            handle: HANDLE,
        }
    }

    fn raw(&self) -> &[u8] {
        &self.raw.bytes
    }

    fn string(&self, index: u8) -> Option<&str> {
        match index {
            1 => Some("CPU1"),
            _ => None,
        }
    }
}

fn fixture_path(parts: &[&str]) -> PathBuf {
    let mut p = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    for part in parts {
        p.push(part);
    }
    p
}

#[test]
fn xeon_fixture_renders_full_report() {
    let raw = fs::read(fixture_path(&["tests", "fixtures", "processor-xeon.bin"]))
        .expect("read fixture structure");
    let expected = fs::read_to_string(fixture_path(&["tests", "fixtures", "processor-xeon.txt"]))
        .expect("read fixture report");

    let info = processor_from_bytes(&raw).expect("decode fixture");
    assert_eq!(info.header.handle, 0x0041);
    assert_eq!(info.family(), ProcessorFamily(0xB3));
    assert_eq!(info.core_count(), 16);
    assert_eq!(info.thread_count(), 32);
    assert_eq!(info.to_string(), expected.trim_end_matches('\n'));
}

#[test]
fn minimum_length_record_omits_optional_groups() {
    let raw = RawProcessor::new()
        .u8(0x05, 0x03)
        .u8(0x06, 0x20)
        .u8(0x07, 1)
        .u8(0x10, 2)
        .u8(0x11, 0x02)
        .u16(0x14, 500)
        .u16(0x16, 400)
        .u8(0x18, 0x41)
        .u8(0x19, 0x06)
        // Past the declared length; must be ignored.
        .u16(0x1A, 0x1234)
        .u8(0x23, 8);
    let info = processor_from_bytes(&raw.encode(0x1A, &["IBM", "PPC750"])).expect("decode");

    let expected = "Handle 0x0004, DMI type 4, 26 bytes\n\
                    Processor Information\n\
                    \tSocket Designation: Not Specified\n\
                    \tType: Central Processor\n\
                    \tFamily: Power PC\n\
                    \tManufacturer: IBM\n\
                    \tID: 00 00 00 00 00 00 00 00\n\
                    \tVersion: PPC750\n\
                    \tVoltage: 3.3 V\n\
                    \tExternal Clock: Unknown\n\
                    \tMax Speed: 500 MHz\n\
                    \tCurrent Speed: 400 MHz\n\
                    \tStatus: Populated, Enabled\n\
                    \tUpgrade: None";
    assert_eq!(info.to_string(), expected);
    assert_eq!(info.l1_cache_handle, 0);
    assert_eq!(info.serial_number, "");
    assert_eq!(info.core_count, 0);
}

#[test]
fn short_records_are_truncated() {
    for length in 4..0x1A {
        match processor_from_bytes(&RawProcessor::new().encode(length, &[])) {
            Err(SmbiosError::TruncatedRecord { length: got, minimum }) => {
                assert_eq!(got, length);
                assert_eq!(minimum, 0x1A);
            }
            other => panic!("length {:#04x}: expected TruncatedRecord, got {:?}", length, other),
        }
    }
}

#[test]
fn header_only_lengths_are_truncated_through_record() {
    for length in 0..4 {
        let record = Oversized {
            raw: RawProcessor::new(),
            length,
        };
        match ProcessorInformation::new(&record) {
            Err(SmbiosError::TruncatedRecord { length: got, minimum }) => {
                assert_eq!(got, length);
                assert_eq!(minimum, 0x1A);
            }
            other => panic!("length {}: expected TruncatedRecord, got {:?}", length, other),
        }
    }
}

#[test]
fn other_structure_types_are_rejected() {
    let raw = RawProcessor::new().u8(0x00, 7);
    for length in [0x10, 0x1A, 0x30] {
        match processor_from_bytes(&raw.encode(length, &[])) {
            Err(SmbiosError::WrongRecordType { expected, actual }) => {
                assert_eq!(expected, 4);
                assert_eq!(actual, 7);
            }
            other => panic!("expected WrongRecordType, got {:?}", other),
        }
    }
}

#[test]
fn family_two_is_used_only_when_indicated_and_present() {
    let raw = RawProcessor::new().u8(0x06, 0xFE).u16(0x28, 0x0118);
    assert_eq!(raw.decode(0x2A).family(), ProcessorFamily(0x0118));
    assert_eq!(raw.decode(0x2A).family().to_string(), "ARM");
    assert_eq!(raw.decode(0x29).family(), ProcessorFamily(0xFE));
    assert_eq!(raw.decode(0x29).family().to_string(), "0xfe");

    let raw = raw.u8(0x06, 0x0B);
    assert_eq!(raw.decode(0x30).family(), ProcessorFamily::PENTIUM);
    assert_eq!(raw.decode(0x1A).family(), ProcessorFamily::PENTIUM);
}

#[test]
fn counts_fall_back_to_extended_fields_at_their_thresholds() {
    let raw = RawProcessor::new()
        .u8(0x23, 0xFF)
        .u8(0x24, 0xFF)
        .u8(0x25, 0xFF)
        .u16(0x2A, 300)
        .u16(0x2C, 280)
        .u16(0x2E, 600);

    let at = |length| {
        let info = raw.decode(length);
        (info.core_count(), info.core_enabled(), info.thread_count())
    };
    assert_eq!(at(0x2B), (255, 255, 255));
    assert_eq!(at(0x2C), (300, 255, 255));
    assert_eq!(at(0x2E), (300, 280, 255));
    assert_eq!(at(0x30), (300, 280, 600));

    let raw = raw.u8(0x23, 12).u8(0x24, 10).u8(0x25, 24);
    assert_eq!(
        {
            let info = raw.decode(0x30);
            (info.core_count(), info.core_enabled(), info.thread_count())
        },
        (12, 10, 24)
    );
}

#[test]
fn reads_stop_at_declared_length_even_with_more_bytes() {
    let record = Oversized {
        raw: RawProcessor::new()
            .u8(0x04, 1)
            .u8(0x23, 0xFF)
            .u16(0x2A, 64)
            .u16(0x1A, 0x0010),
        length: 0x2B,
    };
    let info = ProcessorInformation::new(&record).expect("decode");
    assert_eq!(info.socket_designation, "CPU1");
    assert_eq!(info.l1_cache_handle, 0x0010);
    assert_eq!(info.core_count_2, 0);
    assert_eq!(info.core_count(), 255);

    let record = Oversized { length: 0x2C, ..record };
    assert_eq!(ProcessorInformation::new(&record).unwrap().core_count(), 64);
}

#[test]
fn voltage_decodes_direct_and_legacy_encodings() {
    let cases: [(u8, f32); 7] = [
        (0x85, 0.5),
        (0x8C, 1.2),
        (0x01, 5.0),
        (0x02, 3.3),
        (0x04, 2.9),
        (0x00, 0.0),
        (0x03, 5.0),
    ];
    for (byte, volts) in cases {
        let info = RawProcessor::new().u8(0x11, byte).decode(0x1A);
        assert_eq!(info.voltage(), volts, "voltage byte {:#04x}", byte);
    }

    let info = RawProcessor::new().u8(0x11, 0x00).decode(0x1A);
    assert!(info.to_string().contains("\n\tVoltage: 0.0 V\n"));
}

#[test]
fn pentium_signature_and_flags() {
    // Type 1, family 6, model 10, stepping 5; EDX has FPU, bit 10 (reserved) and SSE.
    let id = u64::from(0x0000_16A5u32) | u64::from(1u32 | 1 << 10 | 1 << 25) << 32;
    let info = RawProcessor::new().u8(0x06, 0x0B).u64(0x08, id).decode(0x1A);

    assert_eq!(info.id_layout(), Some(IdLayout::IntelX86));
    assert_eq!(
        info.signature(),
        Some(Signature::IntelX86 {
            cpu_type: 1,
            family: 6,
            model: 10,
            stepping: 5
        })
    );

    let report = info.to_string();
    assert!(report.contains("\n\tID: A5 16 00 00 01 04 00 02\n"));
    assert!(report.contains(
        "\n\tSignature: Type 1, Family 6, Model 10, Stepping 5\n\
         \tFlags:\n\
         \t\tFPU (Floating-point unit on-chip)\n\
         \t\tSSE (Streaming SIMD extensions)\n\
         \tVersion: "
    ));
}

#[test]
fn amd_signature_uses_extended_family() {
    let info = RawProcessor::new()
        .u8(0x06, 0x6B)
        .u64(0x08, 0x0083_0F10)
        .decode(0x1A);
    let report = info.to_string();
    assert!(report.contains("\n\tSignature: Family 23, Model 49, Stepping 0\n\tFlags:\n\tVersion: "));
}

#[test]
fn unclassified_family_has_no_signature_or_flags() {
    let info = RawProcessor::new()
        .u8(0x06, 0x01)
        .u64(0x08, 0xFFFF_FFFF_FFFF_FFFF)
        .decode(0x30);
    assert_eq!(info.family(), ProcessorFamily::OTHER);
    assert_eq!(info.signature(), None);
    assert_eq!(info.cpu_flags(), None);

    let report = info.to_string();
    assert!(!report.contains("Signature:"));
    assert!(!report.contains("Flags:"));
}

#[test]
fn arm_signature_requires_non_zero_midr() {
    let raw = RawProcessor::new().u8(0x06, 0xFE).u16(0x28, 0x0101);

    let info = raw.decode(0x30);
    assert_eq!(info.id_layout(), Some(IdLayout::Arm32));
    assert_eq!(info.signature(), None);
    assert!(!info.to_string().contains("Signature:"));

    let info = raw.u64(0x08, 0x410F_D083).decode(0x30);
    let report = info.to_string();
    assert!(report.contains(
        "\n\tSignature: Implementor 0x41, Variant 0x0, Architecture 15, Part 0xd08, Revision 3\n\tVersion: "
    ));
    assert!(!report.contains("Flags:"));
}

#[test]
fn cache_handles_render_hex_or_not_provided() {
    let info = RawProcessor::new()
        .u16(0x1A, 0xFFFF)
        .u16(0x1C, 0x00AB)
        .u16(0x1E, 0x1F2E)
        .decode(0x20);
    let report = info.to_string();
    assert!(report.contains(
        "\n\tL1 Cache Handle: Not Provided\n\tL2 Cache Handle: 0x00AB\n\tL3 Cache Handle: 0x1F2E"
    ));
    assert!(!report.contains("Serial Number:"));
}

#[test]
fn asset_group_appears_after_offset_20h() {
    let raw = RawProcessor::new().u8(0x20, 1).u8(0x21, 2).u8(0x22, 3);

    let info = processor_from_bytes(&raw.encode(0x23, &["SN-1", "Tag"])).expect("decode");
    let report = info.to_string();
    assert!(report.ends_with(
        "\n\tSerial Number: SN-1\n\tAsset Tag: Tag\n\tPart Number: <BAD INDEX>"
    ));
    assert!(!report.contains("Core Count:"));
}

#[test]
fn core_group_suppresses_zero_thread_count() {
    let raw = RawProcessor::new()
        .u8(0x23, 4)
        .u8(0x24, 2)
        .u16(0x26, 0x0004);

    let report = raw.decode(0x28).to_string();
    assert!(report.ends_with(
        "\n\tCore Count: 4\n\tCore Enabled: 2\n\tCharacteristics:\n\t\t64-bit capable"
    ));
    assert!(!report.contains("Thread Count:"));

    let report = raw.u8(0x25, 8).decode(0x28).to_string();
    assert!(report.contains("\n\tCore Enabled: 2\n\tThread Count: 8\n\tCharacteristics:"));
}

#[test]
fn status_reports_unpopulated_socket() {
    let info = RawProcessor::new().u8(0x18, 0x01).decode(0x1A);
    assert!(info.to_string().contains("\n\tStatus: Unpopulated\n"));
}

#[test]
fn rendering_is_deterministic() {
    let raw = fs::read(fixture_path(&["tests", "fixtures", "processor-xeon.bin"]))
        .expect("read fixture structure");
    let first = processor_from_bytes(&raw).unwrap();
    let second = processor_from_bytes(&raw).unwrap();
    assert_eq!(first, second);
    assert_eq!(first.to_string(), second.to_string());
}

#[test]
fn table_walk_decodes_every_processor() {
    let mut table = vec![0, 4, 0, 0, 0, 0];
    table.extend(RawProcessor::new().u8(0x04, 1).encode(0x30, &["CPU0"]));
    table.extend(
        RawProcessor::new()
            .u16(0x02, 0x0005)
            .u8(0x04, 1)
            .encode(0x30, &["CPU1"]),
    );
    table.extend_from_slice(&[127, 4, 0xFF, 0xFE, 0, 0]);

    let found = processors(&table).expect("walk table");
    let sockets: Vec<&str> = found.iter().map(|p| p.socket_designation.as_str()).collect();
    assert_eq!(sockets, ["CPU0", "CPU1"]);
    assert_eq!(found[1].header.handle, 0x0005);
}

#[test]
fn table_walk_surfaces_bad_processor_records() {
    let mut table = RawProcessor::new().encode(0x30, &[]);
    table.extend(RawProcessor::new().encode(0x18, &[]));

    assert!(matches!(
        processors(&table),
        Err(SmbiosError::TruncatedRecord { length: 0x18, .. })
    ));
}
