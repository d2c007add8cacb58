//! Fuzzes every console decoder with arbitrary reports.
//!
//! The first byte picks the family; the rest is the report. Decoding must
//! never panic, and re-encoding the decoded state must produce a report of
//! the family's fixed length.
//!
//! Run with:
//!   cargo +nightly fuzz run fuzz_console_decode
#![no_main]
use libfuzzer_sys::fuzz_target;
use padrelay_device_types::{CanonicalInputState, ConsoleType};
use padrelay_hid_console_protocol::{decode, encode, encode_secondary, report_len, update};

fuzz_target!(|data: &[u8]| {
    let Some((&selector, raw)) = data.split_first() else {
        return;
    };
    let console = ConsoleType::ALL[usize::from(selector) % ConsoleType::ALL.len()];

    let state = decode(console, raw);
    assert_eq!(encode(console, &state).len(), report_len(console));
    let _ = encode_secondary(console, &state);

    // Split reports fold onto the previous state.
    let (head, tail) = raw.split_at(raw.len() / 2);
    let first = update(console, head, &CanonicalInputState::neutral());
    let _ = update(console, tail, &first);
});
