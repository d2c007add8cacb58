//! Boot-style keyboard (report ID 1) and mouse (report ID 2).
//!
//! ```text
//! 01 modifiers 00 key0..key5
//! 02 buttons x y wheel pan
//! ```

use padrelay_device_types::{CanonicalInputState, KeyboardState, MouseState};
use padrelay_hid_common::{ReportBuf, ReportReader, ReportWriter};

pub const KEYBOARD_REPORT_ID: u8 = 0x01;
pub const MOUSE_REPORT_ID: u8 = 0x02;
pub const KEYBOARD_REPORT_LEN: usize = 9;
pub const MOUSE_REPORT_LEN: usize = 6;

/// Keyboard LED output report: `01 leds`.
pub const LED_REPORT_LEN: usize = 2;

/// A keyboard report replaces the keyboard part only, a mouse report the
/// mouse part only.
pub fn update(raw: &[u8], previous: &CanonicalInputState) -> CanonicalInputState {
    let r = ReportReader::new(raw);
    let mut next = *previous;
    match r.u8_at(0) {
        Some(KEYBOARD_REPORT_ID) => {
            let mut keys = [0u8; 6];
            r.copy_or(3, &mut keys, 0);
            next.keyboard = KeyboardState {
                modifiers: r.u8_or(1, 0),
                keys,
            };
        }
        Some(MOUSE_REPORT_ID) => {
            next.mouse = MouseState {
                buttons: r.u8_or(1, 0),
                x: r.i8_or(2, 0),
                y: r.i8_or(3, 0),
                wheel: r.i8_or(4, 0),
                pan: r.i8_or(5, 0),
            };
        }
        _ => {}
    }
    next
}

pub fn encode_keyboard(state: &CanonicalInputState) -> ReportBuf {
    let mut w = ReportWriter::new();
    w.write_u8(KEYBOARD_REPORT_ID)
        .write_u8(state.keyboard.modifiers)
        .write_u8(0x00)
        .write_bytes(&state.keyboard.keys);
    w.into_inner()
}

pub fn encode_mouse(state: &CanonicalInputState) -> ReportBuf {
    let m = &state.mouse;
    let mut w = ReportWriter::new();
    w.write_u8(MOUSE_REPORT_ID)
        .write_u8(m.buttons)
        .write_i8(m.x)
        .write_i8(m.y)
        .write_i8(m.wheel)
        .write_i8(m.pan);
    w.into_inner()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyboard_report_keeps_mouse() {
        let mut previous = CanonicalInputState::neutral();
        previous.mouse.x = -3;
        let next = update(&[0x01, 0x02, 0x00, 0x04, 0x05], &previous);
        assert_eq!(next.keyboard.modifiers, 0x02);
        assert_eq!(next.keyboard.keys, [0x04, 0x05, 0, 0, 0, 0]);
        assert_eq!(next.mouse.x, -3);
    }

    #[test]
    fn test_mouse_report_keeps_keyboard() {
        let mut previous = CanonicalInputState::neutral();
        previous.keyboard.keys[0] = 0x1E;
        let next = update(&[0x02, 0x01, 0x05, 0xFB, 0x01, 0x00], &previous);
        assert_eq!(
            next.mouse,
            MouseState {
                buttons: 1,
                x: 5,
                y: -5,
                wheel: 1,
                pan: 0
            }
        );
        assert_eq!(next.keyboard.keys[0], 0x1E);
    }

    #[test]
    fn test_encode_both_reports() {
        let mut state = CanonicalInputState::neutral();
        state.keyboard.modifiers = 0x81;
        state.keyboard.keys[5] = 0x29;
        state.mouse.wheel = -1;
        assert_eq!(
            encode_keyboard(&state).as_slice(),
            &[0x01, 0x81, 0x00, 0, 0, 0, 0, 0, 0x29]
        );
        assert_eq!(encode_mouse(&state).as_slice(), &[0x02, 0, 0, 0, 0xFF, 0]);
    }
}
