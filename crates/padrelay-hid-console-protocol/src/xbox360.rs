//! Xbox 360 (XInput) input message, 20 bytes.
//!
//! ```text
//! 0      message type 0x00
//! 1      length 0x14
//! 2      up down left right start back L3 R3
//! 3      LB RB guide - A B X Y
//! 4..5   LT RT
//! 6..13  LX LY RX RY i16, up is positive
//! ```

use crate::bitmap::{self, BitMap, UNUSED};
use crate::scale;
use padrelay_device_types::{Buttons, CanonicalInputState, Dpad, Hat, Stick};
use padrelay_hid_common::{ReportBuf, ReportReader, ReportWriter};

pub const REPORT_LEN: usize = 20;
pub const MSG_INPUT: u8 = 0x00;
pub const MSG_LED: u8 = 0x01;
pub const MSG_RUMBLE: u8 = 0x00;

/// Byte 2 without the d-pad nibble.
const BYTE2: BitMap = [
    UNUSED,
    UNUSED,
    UNUSED,
    UNUSED,
    Buttons::START,
    Buttons::SELECT,
    Buttons::LEFT_STICK,
    Buttons::RIGHT_STICK,
];

const BYTE3: BitMap = [
    Buttons::LEFT_SHOULDER,
    Buttons::RIGHT_SHOULDER,
    Buttons::GUIDE,
    UNUSED,
    Buttons::SOUTH,
    Buttons::EAST,
    Buttons::WEST,
    Buttons::NORTH,
];

pub(crate) fn dpad_from_bits(byte: u8) -> Dpad {
    Dpad {
        up: byte & 0x01 != 0,
        down: byte & 0x02 != 0,
        left: byte & 0x04 != 0,
        right: byte & 0x08 != 0,
    }
}

pub(crate) fn dpad_to_bits(dpad: Dpad) -> u8 {
    u8::from(dpad.up) | (u8::from(dpad.down) << 1) | (u8::from(dpad.left) << 2) | (u8::from(dpad.right) << 3)
}

/// Digital trigger flags for consoles that only report the analog value.
pub(crate) fn trigger_buttons(left: u16, right: u16) -> Buttons {
    let mut buttons = Buttons::empty();
    buttons.set(Buttons::LEFT_TRIGGER, left >= scale::TRIGGER_DIGITAL_THRESHOLD);
    buttons.set(Buttons::RIGHT_TRIGGER, right >= scale::TRIGGER_DIGITAL_THRESHOLD);
    buttons
}

/// A digital-only trigger press still has to register on the analog wire.
fn trigger_byte(state: &CanonicalInputState, analog: u16, flag: Buttons) -> u8 {
    match scale::trigger_to_u8(analog) {
        0 if state.pressed(flag) => u8::MAX,
        value => value,
    }
}

/// Decodes an input message; `None` for LED, rumble acknowledgement and
/// status traffic.
pub fn parse(raw: &[u8]) -> Option<CanonicalInputState> {
    if raw.first() != Some(&MSG_INPUT) {
        return None;
    }
    let r = ReportReader::new(raw);
    let byte2 = r.u8_or(2, 0);
    let left_trigger = scale::trigger_from_u8(r.u8_or(4, 0));
    let right_trigger = scale::trigger_from_u8(r.u8_or(5, 0));

    Some(CanonicalInputState {
        buttons: bitmap::unpack(byte2, &BYTE2)
            | bitmap::unpack(r.u8_or(3, 0), &BYTE3)
            | trigger_buttons(left_trigger, right_trigger),
        hat: Hat::from_dpad(dpad_from_bits(byte2)),
        left_trigger,
        right_trigger,
        left_stick: Stick::new(r.i16_le_or(6, 0), scale::invert_axis(r.i16_le_or(8, 0))),
        right_stick: Stick::new(r.i16_le_or(10, 0), scale::invert_axis(r.i16_le_or(12, 0))),
        ..CanonicalInputState::neutral()
    })
}

pub fn update(raw: &[u8], previous: &CanonicalInputState) -> CanonicalInputState {
    parse(raw).unwrap_or(*previous)
}

pub fn encode(state: &CanonicalInputState) -> ReportBuf {
    let mut w = ReportWriter::new();
    w.write_u8(MSG_INPUT)
        .write_u8(REPORT_LEN as u8)
        .write_u8(dpad_to_bits(state.hat.dpad()) | bitmap::pack(state.buttons, &BYTE2))
        .write_u8(bitmap::pack(state.buttons, &BYTE3))
        .write_u8(trigger_byte(state, state.left_trigger, Buttons::LEFT_TRIGGER))
        .write_u8(trigger_byte(state, state.right_trigger, Buttons::RIGHT_TRIGGER))
        .write_i16_le(state.left_stick.x)
        .write_i16_le(scale::invert_axis(state.left_stick.y))
        .write_i16_le(state.right_stick.x)
        .write_i16_le(scale::invert_axis(state.right_stick.y))
        .pad_to(REPORT_LEN);
    w.into_inner()
}
