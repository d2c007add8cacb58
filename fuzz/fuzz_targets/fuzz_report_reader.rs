//! Fuzzes the bounds-checked report reader with arbitrary offsets.
//!
//! Run with:
//!   cargo +nightly fuzz run fuzz_report_reader
#![no_main]
use libfuzzer_sys::fuzz_target;
use padrelay_hid_common::ReportReader;

fuzz_target!(|data: &[u8]| {
    let r = ReportReader::new(data);
    let mut out = [0u8; 8];
    for offset in data.iter().take(16).map(|&b| usize::from(b)) {
        let _ = r.u8_at(offset);
        let _ = r.u8_or(offset, 0x80);
        let _ = r.i8_or(offset, 0);
        let _ = r.u16_le_at(offset);
        let _ = r.i16_le_or(offset, 0);
        let _ = r.bit(offset, (offset % 8) as u8);
        let _ = r.low_nibble_or(offset, 0x08);
        r.copy_or(offset, &mut out, 0);
    }
    let _ = r.is_truncated(usize::from(data.first().copied().unwrap_or(0)));
});
