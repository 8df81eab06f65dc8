//! Rich headers produced by the MSVC linker.
//!
//! Fixtures are the `[0, e_lfanew)` bytes of the Windows launcher stubs shipped
//! in pip 23.2.1 (`pip/_vendor/distlib/t64.exe`, sha256 81a618f2...ae06b7, and
//! `w32.exe`). The stored checksums were written by link.exe, so a match here
//! checks the arithmetic against the linker rather than against our own model.

use richheader::{parse_bytes, parse_region, MarkerSearch, RichConfig};

/// distlib `t64.exe` (x64 console launcher).
const T64_HEADER: [u8; 0xf8] = [
    0x4d, 0x5a, 0x90, 0x00, 0x03, 0x00, 0x00, 0x00, 0x04, 0x00, 0x00, 0x00, 0xff, 0xff, 0x00, 0x00,
    0xb8, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x40, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0xf8, 0x00, 0x00, 0x00,
    0x0e, 0x1f, 0xba, 0x0e, 0x00, 0xb4, 0x09, 0xcd, 0x21, 0xb8, 0x01, 0x4c, 0xcd, 0x21, 0x54, 0x68,
    0x69, 0x73, 0x20, 0x70, 0x72, 0x6f, 0x67, 0x72, 0x61, 0x6d, 0x20, 0x63, 0x61, 0x6e, 0x6e, 0x6f,
    0x74, 0x20, 0x62, 0x65, 0x20, 0x72, 0x75, 0x6e, 0x20, 0x69, 0x6e, 0x20, 0x44, 0x4f, 0x53, 0x20,
    0x6d, 0x6f, 0x64, 0x65, 0x2e, 0x0d, 0x0d, 0x0a, 0x24, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0xa3, 0xfa, 0x60, 0x76, 0xe7, 0x9b, 0x0e, 0x25, 0xe7, 0x9b, 0x0e, 0x25, 0xe7, 0x9b, 0x0e, 0x25,
    0x74, 0xd5, 0x96, 0x25, 0xe6, 0x9b, 0x0e, 0x25, 0xfc, 0x06, 0xa5, 0x25, 0xc6, 0x9b, 0x0e, 0x25,
    0xfc, 0x06, 0xa4, 0x25, 0x91, 0x9b, 0x0e, 0x25, 0xfc, 0x06, 0x90, 0x25, 0xee, 0x9b, 0x0e, 0x25,
    0xee, 0xe3, 0x9d, 0x25, 0xe2, 0x9b, 0x0e, 0x25, 0xe7, 0x9b, 0x0f, 0x25, 0xb8, 0x9b, 0x0e, 0x25,
    0xfc, 0x06, 0xa0, 0x25, 0xe6, 0x9b, 0x0e, 0x25, 0xfc, 0x06, 0x94, 0x25, 0xe6, 0x9b, 0x0e, 0x25,
    0xfc, 0x06, 0x93, 0x25, 0xe6, 0x9b, 0x0e, 0x25, 0x52, 0x69, 0x63, 0x68, 0xe7, 0x9b, 0x0e, 0x25,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
];

/// distlib `w32.exe` (x86 GUI launcher).
const W32_HEADER: [u8; 0xf8] = [
    0x4d, 0x5a, 0x90, 0x00, 0x03, 0x00, 0x00, 0x00, 0x04, 0x00, 0x00, 0x00, 0xff, 0xff, 0x00, 0x00,
    0xb8, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x40, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0xf8, 0x00, 0x00, 0x00,
    0x0e, 0x1f, 0xba, 0x0e, 0x00, 0xb4, 0x09, 0xcd, 0x21, 0xb8, 0x01, 0x4c, 0xcd, 0x21, 0x54, 0x68,
    0x69, 0x73, 0x20, 0x70, 0x72, 0x6f, 0x67, 0x72, 0x61, 0x6d, 0x20, 0x63, 0x61, 0x6e, 0x6e, 0x6f,
    0x74, 0x20, 0x62, 0x65, 0x20, 0x72, 0x75, 0x6e, 0x20, 0x69, 0x6e, 0x20, 0x44, 0x4f, 0x53, 0x20,
    0x6d, 0x6f, 0x64, 0x65, 0x2e, 0x0d, 0x0d, 0x0a, 0x24, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0xd1, 0x08, 0x80, 0x3e, 0x95, 0x69, 0xee, 0x6d, 0x95, 0x69, 0xee, 0x6d, 0x95, 0x69, 0xee, 0x6d,
    0x06, 0x27, 0x76, 0x6d, 0x94, 0x69, 0xee, 0x6d, 0x8e, 0xf4, 0x45, 0x6d, 0xb4, 0x69, 0xee, 0x6d,
    0x8e, 0xf4, 0x70, 0x6d, 0x9a, 0x69, 0xee, 0x6d, 0x8e, 0xf4, 0x44, 0x6d, 0xe3, 0x69, 0xee, 0x6d,
    0x9c, 0x11, 0x7d, 0x6d, 0x92, 0x69, 0xee, 0x6d, 0x95, 0x69, 0xef, 0x6d, 0xf3, 0x69, 0xee, 0x6d,
    0x8e, 0xf4, 0x40, 0x6d, 0x94, 0x69, 0xee, 0x6d, 0x8e, 0xf4, 0x74, 0x6d, 0x94, 0x69, 0xee, 0x6d,
    0x8e, 0xf4, 0x73, 0x6d, 0x94, 0x69, 0xee, 0x6d, 0x52, 0x69, 0x63, 0x68, 0x95, 0x69, 0xee, 0x6d,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
];

const T64_ENTRIES: [(u32, u32); 9] = [
    (0x0098_4E93, 1),
    (0x00AB_9D1B, 33),
    (0x00AA_9D1B, 118),
    (0x009E_9D1B, 9),
    (0x0093_7809, 5),
    (0x0001_0000, 95),
    (0x00AE_9D1B, 1),
    (0x009A_9D1B, 1),
    (0x009D_9D1B, 1),
];

const W32_ENTRIES: [(u32, u32); 9] = [
    (0x0098_4E93, 1),
    (0x00AB_9D1B, 33),
    (0x009E_9D1B, 15),
    (0x00AA_9D1B, 118),
    (0x0093_7809, 7),
    (0x0001_0000, 102),
    (0x00AE_9D1B, 1),
    (0x009A_9D1B, 1),
    (0x009D_9D1B, 1),
];

fn both_modes() -> [RichConfig; 2] {
    [
        RichConfig::default(),
        RichConfig {
            marker_search: MarkerSearch::SingleByte,
            ..RichConfig::default()
        },
    ]
}

#[test]
fn t64_checksum_matches_linker() {
    for cfg in both_modes() {
        let header = parse_bytes(&T64_HEADER, &cfg).unwrap();
        assert_eq!(header.offset, 0x80, "{:?}", cfg.marker_search);
        assert_eq!(header.rich_offset, 0xD8);
        assert_eq!(header.stored_checksum, 0x250E_9BE7);
        assert_eq!(header.computed_checksum, 0x250E_9BE7);
        assert!(header.checksum_valid);
        assert_eq!(header.entries.pairs(), T64_ENTRIES.to_vec());
    }
}

#[test]
fn w32_checksum_matches_linker() {
    for cfg in both_modes() {
        let header = parse_bytes(&W32_HEADER, &cfg).unwrap();
        assert_eq!(header.stored_checksum, 0x6DEE_6995, "{:?}", cfg.marker_search);
        assert_eq!(header.computed_checksum, 0x6DEE_6995);
        assert!(header.checksum_valid);
        assert_eq!(header.entries.pairs(), W32_ENTRIES.to_vec());
    }
}

#[test]
fn linker_header_tamper_is_detected() {
    let mut data = T64_HEADER;
    // "This program" -> "this program"
    data[0x4E] ^= 0x20;
    let header = parse_region(&data, &RichConfig::default()).unwrap();
    assert!(!header.checksum_valid);
    assert_eq!(header.entries.pairs(), T64_ENTRIES.to_vec());
}
