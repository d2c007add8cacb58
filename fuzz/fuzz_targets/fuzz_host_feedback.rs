//! Fuzzes host output report decoding and handshake detection.
//!
//! Run with:
//!   cargo +nightly fuzz run fuzz_host_feedback
#![no_main]
use libfuzzer_sys::fuzz_target;
use padrelay_device_types::ConsoleType;
use padrelay_hid_console_protocol::{
    decode_feedback, encode_rumble, handshake_sequence, is_handshake_report,
};

fuzz_target!(|data: &[u8]| {
    for console in ConsoleType::ALL {
        let feedback = decode_feedback(console, data);
        if let Some(rumble) = feedback.rumble {
            for peripheral in ConsoleType::ALL {
                let _ = encode_rumble(peripheral, rumble);
            }
        }

        if handshake_sequence(console, data).is_some() {
            assert!(is_handshake_report(console, data));
        }
    }
});
