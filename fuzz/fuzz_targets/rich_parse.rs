#![no_main]
use libfuzzer_sys::fuzz_target;
use richheader::{parse_bytes, parse_region, RichConfig};

fuzz_target!(|data: &[u8]| {
    let canonical = RichConfig::default();
    let legacy = RichConfig::legacy();
    let _ = parse_bytes(data, &canonical);
    let _ = parse_bytes(data, &legacy);
    // Treat the whole input as an already sliced region too.
    if let Ok(h) = parse_region(data, &legacy) {
        assert!(h.entries.len() <= data.len() / 8);
    }
});
