//! PS4 (DualShock 4 style) input report.
//!
//! USB report ID `0x01`, 64 bytes. Bluetooth report `0x11` carries the same
//! fields two bytes later and is accepted on decode; encode always produces
//! the USB form.
//!
//! ```text
//! 0      0x01
//! 1..4   LX LY RX RY
//! 5      hat (low nibble) square cross circle triangle
//! 6      L1 R1 L2 R2 share options L3 R3
//! 7      PS, touchpad click, frame counter (bits 2..7)
//! 8..9   L2 R2 analog
//! 13..18 gyro i16 x3
//! 19..24 accel i16 x3
//! 30     battery
//! 33     touch packet count
//! 35..42 two touch points
//! ```

use crate::bitmap::{self, BitMap, UNUSED};
use crate::scale;
use padrelay_device_types::{Buttons, CanonicalInputState, Hat, Motion, Stick, TouchPoint};
use padrelay_hid_common::{ReportBuf, ReportReader, ReportWriter};

pub const REPORT_LEN: usize = 64;
pub const USB_REPORT_ID: u8 = 0x01;
pub const BT_REPORT_ID: u8 = 0x11;

/// Offset of the USB layout inside a Bluetooth `0x11` report.
const BT_SHIFT: usize = 2;

const TOUCH_OFFSET: usize = 35;
const TOUCH_INACTIVE: u8 = 0x80;

/// Upper nibble of byte 5, shifted down.
const FACE: BitMap = [
    Buttons::WEST,
    Buttons::SOUTH,
    Buttons::EAST,
    Buttons::NORTH,
    UNUSED,
    UNUSED,
    UNUSED,
    UNUSED,
];

const BYTE6: BitMap = [
    Buttons::LEFT_SHOULDER,
    Buttons::RIGHT_SHOULDER,
    Buttons::LEFT_TRIGGER,
    Buttons::RIGHT_TRIGGER,
    Buttons::SELECT,
    Buttons::START,
    Buttons::LEFT_STICK,
    Buttons::RIGHT_STICK,
];

const BYTE7: BitMap = [
    Buttons::GUIDE,
    Buttons::CAPTURE,
    UNUSED,
    UNUSED,
    UNUSED,
    UNUSED,
    UNUSED,
    UNUSED,
];

/// Field offset base for an input report, `None` for anything else
/// (feature/handshake traffic, output echoes).
fn layout_base(raw: &[u8]) -> Option<usize> {
    match raw.first() {
        Some(&USB_REPORT_ID) => Some(0),
        Some(&BT_REPORT_ID) => Some(BT_SHIFT),
        _ => None,
    }
}

fn read_touch(r: &ReportReader<'_>, at: usize) -> TouchPoint {
    let head = r.u8_or(at, TOUCH_INACTIVE);
    let b1 = u16::from(r.u8_or(at + 1, 0));
    let b2 = u16::from(r.u8_or(at + 2, 0));
    let b3 = u16::from(r.u8_or(at + 3, 0));
    TouchPoint {
        active: head & TOUCH_INACTIVE == 0,
        id: head & 0x7F,
        x: b1 | ((b2 & 0x0F) << 8),
        y: (b2 >> 4) | (b3 << 4),
    }
}

fn write_touch(w: &mut ReportWriter, touch: &TouchPoint) {
    let x = touch.x & 0x0FFF;
    let y = touch.y & 0x0FFF;
    let head = (touch.id & 0x7F) | if touch.active { 0 } else { TOUCH_INACTIVE };
    w.write_u8(head)
        .write_u8((x & 0xFF) as u8)
        .write_u8(((x >> 8) as u8) | (((y & 0x0F) as u8) << 4))
        .write_u8((y >> 4) as u8);
}

/// Decodes an input report; `None` when `raw` is not one.
pub fn parse(raw: &[u8]) -> Option<CanonicalInputState> {
    let base = layout_base(raw)?;
    let r = ReportReader::new(raw);
    let at = |offset: usize| base + offset;

    let byte5 = r.u8_or(at(5), Hat::NEUTRAL_NIBBLE);
    let mut motion = Motion::default();
    for i in 0..3 {
        motion.gyro[i] = r.i16_le_or(at(13 + i * 2), 0);
        motion.accel[i] = r.i16_le_or(at(19 + i * 2), 0);
    }

    Some(CanonicalInputState {
        buttons: bitmap::unpack(byte5 >> 4, &FACE)
            | bitmap::unpack(r.u8_or(at(6), 0), &BYTE6)
            | bitmap::unpack(r.u8_or(at(7), 0), &BYTE7),
        hat: Hat::from_nibble(byte5),
        left_stick: Stick::new(
            scale::axis_from_u8(r.u8_or(at(1), 0x80)),
            scale::axis_from_u8(r.u8_or(at(2), 0x80)),
        ),
        right_stick: Stick::new(
            scale::axis_from_u8(r.u8_or(at(3), 0x80)),
            scale::axis_from_u8(r.u8_or(at(4), 0x80)),
        ),
        left_trigger: scale::trigger_from_u8(r.u8_or(at(8), 0)),
        right_trigger: scale::trigger_from_u8(r.u8_or(at(9), 0)),
        motion,
        touch: [
            read_touch(&r, at(TOUCH_OFFSET)),
            read_touch(&r, at(TOUCH_OFFSET + 4)),
        ],
        battery: r.u8_or(at(30), 0),
        ..CanonicalInputState::neutral()
    })
}

pub fn update(raw: &[u8], previous: &CanonicalInputState) -> CanonicalInputState {
    parse(raw).unwrap_or(*previous)
}

pub fn encode(state: &CanonicalInputState) -> ReportBuf {
    let mut w = ReportWriter::new();
    w.write_u8(USB_REPORT_ID)
        .write_u8(scale::axis_to_u8(state.left_stick.x))
        .write_u8(scale::axis_to_u8(state.left_stick.y))
        .write_u8(scale::axis_to_u8(state.right_stick.x))
        .write_u8(scale::axis_to_u8(state.right_stick.y))
        .write_u8(state.hat.to_nibble() | (bitmap::pack(state.buttons, &FACE) << 4))
        .write_u8(bitmap::pack(state.buttons, &BYTE6))
        // frame counter left at zero
        .write_u8(bitmap::pack(state.buttons, &BYTE7))
        .write_u8(scale::trigger_to_u8(state.left_trigger))
        .write_u8(scale::trigger_to_u8(state.right_trigger))
        .write_zeros(3);
    for axis in state.motion.gyro {
        w.write_i16_le(axis);
    }
    for axis in state.motion.accel {
        w.write_i16_le(axis);
    }
    w.write_zeros(5)
        .write_u8(state.battery)
        .write_zeros(2)
        .write_u8(1)
        .write_u8(0);
    for touch in &state.touch {
        write_touch(&mut w, touch);
    }
    w.pad_to(REPORT_LEN);
    w.into_inner()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_neutral_layout() -> Result<(), Box<dyn std::error::Error>> {
        let report = encode(&CanonicalInputState::neutral());
        assert_eq!(report.len(), REPORT_LEN);
        assert_eq!(&report[..10], &[0x01, 0x80, 0x80, 0x80, 0x80, 0x08, 0, 0, 0, 0]);
        assert_eq!(report[33], 1);
        assert_eq!(report[35], TOUCH_INACTIVE);
        assert_eq!(report[39], TOUCH_INACTIVE);
        let back = parse(&report).ok_or("not an input report")?;
        assert!(back.is_neutral());
        Ok(())
    }

    #[test]
    fn test_face_buttons_share_byte_with_hat() -> Result<(), Box<dyn std::error::Error>> {
        let mut raw = [0u8; REPORT_LEN];
        raw[0] = USB_REPORT_ID;
        raw[5] = 0x20 | 0x06; // cross, hat left
        raw[7] = 0x03;
        let state = parse(&raw).ok_or("not an input report")?;
        assert_eq!(state.hat, Hat::Left);
        assert_eq!(state.buttons, Buttons::SOUTH | Buttons::GUIDE | Buttons::CAPTURE);
        Ok(())
    }

    #[test]
    fn test_counter_bits_ignored() -> Result<(), Box<dyn std::error::Error>> {
        let mut raw = encode(&CanonicalInputState::neutral());
        raw[7] = 0xFC;
        let state = parse(&raw).ok_or("not an input report")?;
        assert!(state.buttons.is_empty());
        Ok(())
    }

    #[test]
    fn test_touch_point_packing() -> Result<(), Box<dyn std::error::Error>> {
        let mut state = CanonicalInputState::neutral();
        state.touch[1] = TouchPoint {
            active: true,
            id: 5,
            x: 0x0ABC,
            y: 0x0123,
        };
        let report = encode(&state);
        assert_eq!(&report[39..43], &[0x05, 0xBC, 0x3A, 0x12]);
        let back = parse(&report).ok_or("not an input report")?;
        assert_eq!(back.touch, state.touch);
        Ok(())
    }

    #[test]
    fn test_bluetooth_report_is_shifted() -> Result<(), Box<dyn std::error::Error>> {
        let mut raw = [0u8; REPORT_LEN + BT_SHIFT];
        raw[0] = BT_REPORT_ID;
        raw[3] = 0xFF; // LX
        raw[7] = 0x08;
        raw[10] = 0x80; // L2
        let state = parse(&raw).ok_or("not an input report")?;
        assert_eq!(state.left_stick.x, 0x7F00);
        assert_eq!(state.left_trigger, 0x8080);
        assert_eq!(state.hat, Hat::Neutral);
        Ok(())
    }

    #[test]
    fn test_non_input_report_keeps_previous() {
        let previous = CanonicalInputState::neutral().with_buttons(Buttons::NORTH);
        assert_eq!(update(&[0xF1, 0x00], &previous), previous);
        assert_eq!(parse(&[0x05, 0xFF]), None);
    }
}
