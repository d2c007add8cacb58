//! PS3 (DualShock 3 / Sixaxis style) input report, 27 bytes, no report ID.
//!
//! ```text
//! 0      square cross circle triangle L1 R1 L2 R2
//! 1      select start L3 R3 PS capture - -
//! 2      hat (low nibble, 8 = released)
//! 3..6   LX LY RX RY (0x80 centre)
//! 7..18  pressure: right left up down triangle circle cross square L1 R1 L2 R2
//! 19..26 accel X Y Z, gyro (u16 LE, 10 bit, 0x0200 centre)
//! ```

use crate::bitmap::{self, BitMap, UNUSED};
use crate::scale;
use padrelay_device_types::{Buttons, CanonicalInputState, Hat, Motion, Pressure, Stick};
use padrelay_hid_common::{ReportBuf, ReportReader, ReportWriter};

pub const REPORT_LEN: usize = 27;

/// Digital buttons described by the report descriptor.
pub const BUTTON_COUNT: u8 = 13;

const MOTION_OFFSET: usize = 19;
const MOTION_CENTER: u16 = 0x0200;

const BYTE0: BitMap = [
    Buttons::WEST,
    Buttons::SOUTH,
    Buttons::EAST,
    Buttons::NORTH,
    Buttons::LEFT_SHOULDER,
    Buttons::RIGHT_SHOULDER,
    Buttons::LEFT_TRIGGER,
    Buttons::RIGHT_TRIGGER,
];

const BYTE1: BitMap = [
    Buttons::SELECT,
    Buttons::START,
    Buttons::LEFT_STICK,
    Buttons::RIGHT_STICK,
    Buttons::GUIDE,
    Buttons::CAPTURE,
    UNUSED,
    UNUSED,
];

/// Every PS3 report is an input report; missing bytes decode as neutral.
pub fn decode(raw: &[u8]) -> CanonicalInputState {
    let r = ReportReader::new(raw);
    let mut p = [0u8; 12];
    r.copy_or(7, &mut p, 0);

    let mut accel = [0i16; 3];
    for (i, a) in accel.iter_mut().enumerate() {
        *a = scale::motion_from_10bit(r.u16_le_or(MOTION_OFFSET + i * 2, MOTION_CENTER));
    }
    let yaw = scale::motion_from_10bit(r.u16_le_or(MOTION_OFFSET + 6, MOTION_CENTER));

    CanonicalInputState {
        buttons: bitmap::unpack(r.u8_or(0, 0), &BYTE0) | bitmap::unpack(r.u8_or(1, 0), &BYTE1),
        hat: Hat::from_nibble(r.low_nibble_or(2, Hat::NEUTRAL_NIBBLE)),
        left_stick: Stick::new(
            scale::axis_from_u8(r.u8_or(3, 0x80)),
            scale::axis_from_u8(r.u8_or(4, 0x80)),
        ),
        right_stick: Stick::new(
            scale::axis_from_u8(r.u8_or(5, 0x80)),
            scale::axis_from_u8(r.u8_or(6, 0x80)),
        ),
        pressure: Pressure {
            dpad_right: p[0],
            dpad_left: p[1],
            dpad_up: p[2],
            dpad_down: p[3],
            north: p[4],
            east: p[5],
            south: p[6],
            west: p[7],
            left_shoulder: p[8],
            right_shoulder: p[9],
        },
        left_trigger: scale::trigger_from_u8(p[10]),
        right_trigger: scale::trigger_from_u8(p[11]),
        motion: Motion {
            accel,
            gyro: [0, 0, yaw],
        },
        ..CanonicalInputState::neutral()
    }
}

pub fn encode(state: &CanonicalInputState) -> ReportBuf {
    let p = &state.pressure;
    let mut w = ReportWriter::new();
    w.write_u8(bitmap::pack(state.buttons, &BYTE0))
        .write_u8(bitmap::pack(state.buttons, &BYTE1))
        .write_u8(state.hat.to_nibble())
        .write_u8(scale::axis_to_u8(state.left_stick.x))
        .write_u8(scale::axis_to_u8(state.left_stick.y))
        .write_u8(scale::axis_to_u8(state.right_stick.x))
        .write_u8(scale::axis_to_u8(state.right_stick.y))
        .write_bytes(&[
            p.dpad_right,
            p.dpad_left,
            p.dpad_up,
            p.dpad_down,
            p.north,
            p.east,
            p.south,
            p.west,
            p.left_shoulder,
            p.right_shoulder,
            scale::trigger_to_u8(state.left_trigger),
            scale::trigger_to_u8(state.right_trigger),
        ]);
    for axis in state.motion.accel {
        w.write_u16_le(scale::motion_to_10bit(axis));
    }
    w.write_u16_le(scale::motion_to_10bit(state.motion.gyro[2]));
    w.into_inner()
}
