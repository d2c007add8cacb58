//! Xbox One GIP input.
//!
//! Every GIP packet starts `command, options, sequence, payload length`.
//! Buttons, triggers and sticks arrive in command `0x20`; the guide button
//! has its own command `0x07`. Sequence bytes are written as zero and stamped
//! by the transport.
//!
//! ```text
//! 0x20: 20 00 seq 0E | sync - menu view A B X Y | up down left right LB RB L3 R3
//!       | LT RT u16 (10 bit) | LX LY RX RY i16, up is positive
//! 0x07: 07 20 seq 02 | guide | 5B
//! ```

use crate::bitmap::{self, BitMap, UNUSED};
use crate::scale;
use crate::xbox360::{dpad_from_bits, dpad_to_bits, trigger_buttons};
use padrelay_device_types::{Buttons, CanonicalInputState, Hat, Stick};
use padrelay_hid_common::{ReportBuf, ReportReader, ReportWriter};

pub const CMD_ANNOUNCE: u8 = 0x02;
pub const CMD_STATUS: u8 = 0x03;
pub const CMD_AUTH: u8 = 0x06;
pub const CMD_GUIDE: u8 = 0x07;
pub const CMD_RUMBLE: u8 = 0x09;
pub const CMD_LED: u8 = 0x0A;
pub const CMD_INPUT: u8 = 0x20;

pub const INPUT_LEN: usize = 18;
pub const GUIDE_LEN: usize = 6;

const INPUT_PAYLOAD_LEN: u8 = 0x0E;
const GUIDE_OPTIONS: u8 = 0x20;
const GUIDE_PAYLOAD_LEN: u8 = 0x02;
const GUIDE_TRAILER: u8 = 0x5B;

const BYTE4: BitMap = [
    Buttons::SYNC,
    UNUSED,
    Buttons::START,
    Buttons::SELECT,
    Buttons::SOUTH,
    Buttons::EAST,
    Buttons::WEST,
    Buttons::NORTH,
];

/// Byte 5 without the d-pad nibble.
const BYTE5: BitMap = [
    UNUSED,
    UNUSED,
    UNUSED,
    UNUSED,
    Buttons::LEFT_SHOULDER,
    Buttons::RIGHT_SHOULDER,
    Buttons::LEFT_STICK,
    Buttons::RIGHT_STICK,
];

fn trigger_word(state: &CanonicalInputState, analog: u16, flag: Buttons) -> u16 {
    match scale::trigger_to_10bit(analog) {
        0 if state.pressed(flag) => 1023,
        value => value,
    }
}

fn decode_input(r: &ReportReader<'_>) -> CanonicalInputState {
    let byte5 = r.u8_or(5, 0);
    let left_trigger = scale::trigger_from_10bit(r.u16_le_or(6, 0));
    let right_trigger = scale::trigger_from_10bit(r.u16_le_or(8, 0));

    CanonicalInputState {
        buttons: bitmap::unpack(r.u8_or(4, 0), &BYTE4)
            | bitmap::unpack(byte5, &BYTE5)
            | trigger_buttons(left_trigger, right_trigger),
        hat: Hat::from_dpad(dpad_from_bits(byte5)),
        left_trigger,
        right_trigger,
        left_stick: Stick::new(r.i16_le_or(10, 0), scale::invert_axis(r.i16_le_or(12, 0))),
        right_stick: Stick::new(r.i16_le_or(14, 0), scale::invert_axis(r.i16_le_or(16, 0))),
        ..CanonicalInputState::neutral()
    }
}

/// Applies one GIP packet to `previous`.
///
/// An input packet replaces everything but the guide bit, a guide packet
/// replaces only the guide bit, anything else changes nothing.
pub fn update(raw: &[u8], previous: &CanonicalInputState) -> CanonicalInputState {
    let r = ReportReader::new(raw);
    match r.u8_at(0) {
        Some(CMD_INPUT) => {
            let mut next = decode_input(&r);
            next.buttons.set(Buttons::GUIDE, previous.pressed(Buttons::GUIDE));
            next
        }
        Some(CMD_GUIDE) => {
            let mut next = *previous;
            next.buttons.set(Buttons::GUIDE, r.bit(4, 0));
            next
        }
        _ => *previous,
    }
}

pub fn encode(state: &CanonicalInputState) -> ReportBuf {
    let mut w = ReportWriter::new();
    w.write_u8(CMD_INPUT)
        .write_u8(0x00)
        .write_u8(0x00)
        .write_u8(INPUT_PAYLOAD_LEN)
        .write_u8(bitmap::pack(state.buttons, &BYTE4))
        .write_u8(dpad_to_bits(state.hat.dpad()) | bitmap::pack(state.buttons, &BYTE5))
        .write_u16_le(trigger_word(state, state.left_trigger, Buttons::LEFT_TRIGGER))
        .write_u16_le(trigger_word(state, state.right_trigger, Buttons::RIGHT_TRIGGER))
        .write_i16_le(state.left_stick.x)
        .write_i16_le(scale::invert_axis(state.left_stick.y))
        .write_i16_le(state.right_stick.x)
        .write_i16_le(scale::invert_axis(state.right_stick.y));
    w.into_inner()
}

/// Guide packet carrying the current guide state.
pub fn encode_guide(state: &CanonicalInputState) -> ReportBuf {
    let mut w = ReportWriter::new();
    w.write_u8(CMD_GUIDE)
        .write_u8(GUIDE_OPTIONS)
        .write_u8(0x00)
        .write_u8(GUIDE_PAYLOAD_LEN)
        .write_u8(u8::from(state.pressed(Buttons::GUIDE)))
        .write_u8(GUIDE_TRAILER);
    w.into_inner()
}
