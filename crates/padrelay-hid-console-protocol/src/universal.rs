//! Generic HID gamepad layout used for unknown devices and the universal host.
//!
//! 9 bytes, no report ID: 16 button bits, hat, four 8-bit sticks, two 8-bit
//! triggers. Button bit `n` is canonical flag `1 << n`.

use crate::scale;
use padrelay_device_types::{Buttons, CanonicalInputState, Hat, Stick};
use padrelay_hid_common::{ReportBuf, ReportReader, ReportWriter};

pub const REPORT_LEN: usize = 9;

/// South through capture; bits 14 and 15 are spare.
const BUTTON_MASK: u32 = 0x3FFF;

pub fn decode(raw: &[u8]) -> CanonicalInputState {
    let r = ReportReader::new(raw);
    let bits = u32::from(r.u16_le_or(0, 0)) & BUTTON_MASK;
    CanonicalInputState {
        buttons: Buttons::from_bits_truncate(bits),
        hat: Hat::from_nibble(r.low_nibble_or(2, Hat::NEUTRAL_NIBBLE)),
        left_stick: Stick::new(
            scale::axis_from_u8(r.u8_or(3, 0x80)),
            scale::axis_from_u8(r.u8_or(4, 0x80)),
        ),
        right_stick: Stick::new(
            scale::axis_from_u8(r.u8_or(5, 0x80)),
            scale::axis_from_u8(r.u8_or(6, 0x80)),
        ),
        left_trigger: scale::trigger_from_u8(r.u8_or(7, 0)),
        right_trigger: scale::trigger_from_u8(r.u8_or(8, 0)),
        ..CanonicalInputState::neutral()
    }
}

pub fn encode(state: &CanonicalInputState) -> ReportBuf {
    let bits = (state.buttons.bits() & BUTTON_MASK) as u16;
    let mut w = ReportWriter::new();
    w.write_u16_le(bits)
        .write_u8(state.hat.to_nibble())
        .write_u8(scale::axis_to_u8(state.left_stick.x))
        .write_u8(scale::axis_to_u8(state.left_stick.y))
        .write_u8(scale::axis_to_u8(state.right_stick.x))
        .write_u8(scale::axis_to_u8(state.right_stick.y))
        .write_u8(scale::trigger_to_u8(state.left_trigger))
        .write_u8(scale::trigger_to_u8(state.right_trigger));
    w.into_inner()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_neutral_report() {
        let report = encode(&CanonicalInputState::neutral());
        assert_eq!(report.as_slice(), &[0x00, 0x00, 0x08, 0x80, 0x80, 0x80, 0x80, 0x00, 0x00]);
    }

    #[test]
    fn test_button_bits_follow_flag_order() {
        let state = decode(&[0x01, 0x10, 0x08]);
        assert_eq!(state.buttons, Buttons::SOUTH | Buttons::GUIDE);
        // bits 14 and 15 are spare
        assert!(decode(&[0x00, 0xC0]).buttons.is_empty());
    }

    #[test]
    fn test_sync_is_not_sent() {
        let state = CanonicalInputState::neutral().with_buttons(Buttons::SYNC | Buttons::SOUTH);
        let report = encode(&state);
        assert_eq!(report.as_slice().get(..2), Some(&[0x01, 0x00][..]));
    }

    #[test]
    fn test_truncated_axes_are_centred() {
        let state = decode(&[0x00, 0x00, 0x03, 0xFF]);
        assert_eq!(state.hat, Hat::DownRight);
        assert_eq!(state.left_stick, Stick::new(0x7F00, 0));
        assert_eq!(state.right_stick, Stick::CENTER);
    }
}
