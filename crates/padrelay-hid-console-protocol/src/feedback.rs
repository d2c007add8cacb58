//! Host feedback (rumble, player LEDs, lightbar, keyboard LEDs) decoding and
//! rumble re-encoding toward peripherals.
//!
//! ```text
//! PS3 host   01 00 r_dur r_on l_dur l_force 00 00 00 00 leds ...   (leds bits 1..4 = P1..P4)
//! PS4 host   05 flags 04 00 weak strong r g b on_time off_time ...  (flags bit0 rumble, bit1 lightbar)
//! 360 host   00 08 00 left right 00 00 00 | 01 03 pattern
//! One host   09 00 seq 09 00 mask lt rt left right dur delay repeat
//! Kbd host   01 leds
//! ```

use crate::keyboard_mouse::KEYBOARD_REPORT_ID;
use crate::xbox_one::{CMD_AUTH, CMD_RUMBLE};
use crate::xbox360;
use padrelay_device_types::ConsoleType;
use padrelay_hid_common::{ReportBuf, ReportReader, ReportWriter};
use tracing::trace;

pub const PS3_OUTPUT_LEN: usize = 36;
pub const PS4_OUTPUT_LEN: usize = 32;
pub const XBOX360_RUMBLE_LEN: usize = 8;
pub const XBOX_ONE_RUMBLE_LEN: usize = 13;

const PS3_OUTPUT_ID: u8 = 0x01;
const PS4_OUTPUT_ID: u8 = 0x05;
const PS4_FLAG_RUMBLE: u8 = 0x01;
const PS4_FLAG_LIGHTBAR: u8 = 0x02;
const XBOX360_RUMBLE_LEN_BYTE: u8 = 0x08;
const XBOX360_LED_LEN_BYTE: u8 = 0x03;
const XBOX_ONE_MOTOR_MASK: u8 = 0x0F;

/// DS3 per-LED blink block: always on.
const PS3_LED_BLOCK: [u8; 5] = [0xFF, 0x27, 0x10, 0x00, 0x32];

/// Motor intensities; `left` is the strong low-frequency motor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rumble {
    pub left: u8,
    pub right: u8,
}

impl Rumble {
    pub const OFF: Rumble = Rumble { left: 0, right: 0 };

    pub fn new(left: u8, right: u8) -> Self {
        Self { left, right }
    }

    pub fn is_off(&self) -> bool {
        *self == Self::OFF
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Lightbar {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

/// Everything a host output report asked for; `None` fields were not part
/// of the report and leave the current output untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HostFeedback {
    pub rumble: Option<Rumble>,
    /// Bit `n` set lights player `n + 1`.
    pub player_leds: Option<u8>,
    pub lightbar: Option<Lightbar>,
    /// Boot keyboard LED bits: num, caps, scroll, compose, kana.
    pub keyboard_leds: Option<u8>,
}

impl HostFeedback {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

fn ps3(r: &ReportReader<'_>) -> HostFeedback {
    if r.u8_at(0) != Some(PS3_OUTPUT_ID) {
        return HostFeedback::default();
    }
    let rumble = match (r.u8_at(3), r.u8_at(5)) {
        (Some(right), Some(left)) => Some(Rumble::new(left, right)),
        _ => None,
    };
    HostFeedback {
        rumble,
        player_leds: r.u8_at(10).map(|leds| (leds >> 1) & 0x0F),
        ..HostFeedback::default()
    }
}

fn ps4(r: &ReportReader<'_>) -> HostFeedback {
    if r.u8_at(0) != Some(PS4_OUTPUT_ID) {
        return HostFeedback::default();
    }
    let flags = r.u8_or(1, 0);
    let rumble = if flags & PS4_FLAG_RUMBLE != 0 {
        match (r.u8_at(4), r.u8_at(5)) {
            (Some(weak), Some(strong)) => Some(Rumble::new(strong, weak)),
            _ => None,
        }
    } else {
        None
    };
    let lightbar = if flags & PS4_FLAG_LIGHTBAR != 0 {
        match (r.u8_at(6), r.u8_at(7), r.u8_at(8)) {
            (Some(red), Some(green), Some(blue)) => Some(Lightbar {
                r: red,
                g: green,
                b: blue,
            }),
            _ => None,
        }
    } else {
        None
    };
    HostFeedback {
        rumble,
        lightbar,
        ..HostFeedback::default()
    }
}

/// XInput LED animation to a player mask; blinking and rotating patterns
/// count as off.
fn xinput_player_mask(pattern: u8) -> u8 {
    match pattern {
        0x02..=0x05 => 1 << (pattern - 0x02),
        0x06..=0x09 => 1 << (pattern - 0x06),
        _ => 0,
    }
}

fn xbox360(r: &ReportReader<'_>) -> HostFeedback {
    match (r.u8_at(0), r.u8_at(1)) {
        (Some(xbox360::MSG_RUMBLE), Some(XBOX360_RUMBLE_LEN_BYTE)) => HostFeedback {
            rumble: match (r.u8_at(3), r.u8_at(4)) {
                (Some(left), Some(right)) => Some(Rumble::new(left, right)),
                _ => None,
            },
            ..HostFeedback::default()
        },
        (Some(xbox360::MSG_LED), Some(XBOX360_LED_LEN_BYTE)) => HostFeedback {
            player_leds: r.u8_at(2).map(xinput_player_mask),
            ..HostFeedback::default()
        },
        _ => HostFeedback::default(),
    }
}

fn xbox_one(r: &ReportReader<'_>) -> HostFeedback {
    match r.u8_at(0) {
        Some(CMD_RUMBLE) => HostFeedback {
            rumble: match (r.u8_at(8), r.u8_at(9)) {
                (Some(left), Some(right)) => Some(Rumble::new(left, right)),
                _ => None,
            },
            ..HostFeedback::default()
        },
        // CMD_LED only drives the guide button brightness
        _ => HostFeedback::default(),
    }
}

fn keyboard(r: &ReportReader<'_>) -> HostFeedback {
    match (r.u8_at(0), r.u8_at(1)) {
        (Some(KEYBOARD_REPORT_ID), Some(leds)) => HostFeedback {
            keyboard_leds: Some(leds & 0x1F),
            ..HostFeedback::default()
        },
        _ => HostFeedback::default(),
    }
}

/// Decodes an output report the host sent to the emulated controller.
///
/// Unrecognized or truncated reports decode to an empty [`HostFeedback`].
pub fn decode_feedback(host_console: ConsoleType, raw: &[u8]) -> HostFeedback {
    let r = ReportReader::new(raw);
    let feedback = match host_console {
        ConsoleType::Ps3 => ps3(&r),
        ConsoleType::Ps4 => ps4(&r),
        ConsoleType::Xbox360 => xbox360(&r),
        ConsoleType::XboxOne => xbox_one(&r),
        ConsoleType::KeyboardMouse => keyboard(&r),
        ConsoleType::Universal => HostFeedback::default(),
    };
    if feedback.is_empty() && !raw.is_empty() {
        trace!("No feedback in {} byte {} output report", raw.len(), host_console);
    }
    feedback
}

/// Rumble command in the peripheral's own format; `None` for families
/// without motors.
pub fn encode_rumble(peripheral: ConsoleType, rumble: Rumble) -> Option<ReportBuf> {
    let mut w = ReportWriter::new();
    match peripheral {
        ConsoleType::Ps3 => {
            w.write_u8(PS3_OUTPUT_ID)
                .write_u8(0x00)
                .write_u8(0xFF)
                .write_u8(u8::from(rumble.right != 0))
                .write_u8(0xFF)
                .write_u8(rumble.left)
                .write_zeros(4)
                // player 1
                .write_u8(0x02);
            for _ in 0..4 {
                w.write_bytes(&PS3_LED_BLOCK);
            }
            w.pad_to(PS3_OUTPUT_LEN);
        }
        ConsoleType::Ps4 => {
            w.write_u8(PS4_OUTPUT_ID)
                .write_u8(PS4_FLAG_RUMBLE)
                .write_u8(0x04)
                .write_u8(0x00)
                .write_u8(rumble.right)
                .write_u8(rumble.left)
                .pad_to(PS4_OUTPUT_LEN);
        }
        ConsoleType::Xbox360 => {
            w.write_u8(xbox360::MSG_RUMBLE)
                .write_u8(XBOX360_RUMBLE_LEN_BYTE)
                .write_u8(0x00)
                .write_u8(rumble.left)
                .write_u8(rumble.right)
                .pad_to(XBOX360_RUMBLE_LEN);
        }
        ConsoleType::XboxOne => {
            w.write_u8(CMD_RUMBLE)
                .write_u8(0x00)
                .write_u8(0x00)
                .write_u8(0x09)
                .write_u8(0x00)
                .write_u8(XBOX_ONE_MOTOR_MASK)
                .write_u8(0x00)
                .write_u8(0x00)
                .write_u8(rumble.left)
                .write_u8(rumble.right)
                .write_bytes(&[0xFF, 0x00, 0xFF]);
        }
        ConsoleType::Universal | ConsoleType::KeyboardMouse => return None,
    }
    Some(w.into_inner())
}

/// True for authentication traffic that is relayed rather than decoded.
pub fn is_handshake_report(console: ConsoleType, raw: &[u8]) -> bool {
    match (console, raw.first()) {
        (ConsoleType::Ps4, Some(id)) => (0xF0..=0xF3).contains(id),
        (ConsoleType::XboxOne, Some(&cmd)) => cmd == CMD_AUTH,
        _ => false,
    }
}

/// Challenge sequence number carried by a handshake report.
pub fn handshake_sequence(console: ConsoleType, raw: &[u8]) -> Option<u8> {
    if !is_handshake_report(console, raw) {
        return None;
    }
    let r = ReportReader::new(raw);
    match console {
        ConsoleType::Ps4 => r.u8_at(1),
        _ => r.u8_at(2),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ps3_host_feedback() {
        let mut raw = [0u8; PS3_OUTPUT_LEN];
        raw[0] = 0x01;
        raw[3] = 0x01;
        raw[5] = 0xC0;
        raw[10] = 0b0000_0110;
        let fb = decode_feedback(ConsoleType::Ps3, &raw);
        assert_eq!(fb.rumble, Some(Rumble::new(0xC0, 0x01)));
        assert_eq!(fb.player_leds, Some(0b0011));
        assert_eq!(fb.lightbar, None);
    }

    #[test]
    fn test_ps4_flags_select_fields() {
        let raw = [0x05, 0x02, 0x04, 0x00, 0x10, 0x20, 0x00, 0x00, 0xFF];
        let fb = decode_feedback(ConsoleType::Ps4, &raw);
        assert_eq!(fb.rumble, None);
        assert_eq!(fb.lightbar, Some(Lightbar { r: 0, g: 0, b: 0xFF }));

        let raw = [0x05, 0x03, 0x04, 0x00, 0x10, 0x20, 0x01, 0x02, 0x03];
        let fb = decode_feedback(ConsoleType::Ps4, &raw);
        assert_eq!(fb.rumble, Some(Rumble::new(0x20, 0x10)));
    }

    #[test]
    fn test_xinput_led_patterns() {
        let fb = decode_feedback(ConsoleType::Xbox360, &[0x01, 0x03, 0x07]);
        assert_eq!(fb.player_leds, Some(0b0010));
        let fb = decode_feedback(ConsoleType::Xbox360, &[0x01, 0x03, 0x03]);
        assert_eq!(fb.player_leds, Some(0b0010));
        let fb = decode_feedback(ConsoleType::Xbox360, &[0x01, 0x03, 0x0A]);
        assert_eq!(fb.player_leds, Some(0));
    }

    #[test]
    fn test_xinput_rumble() {
        let fb = decode_feedback(ConsoleType::Xbox360, &[0x00, 0x08, 0x00, 0x40, 0x80, 0, 0, 0]);
        assert_eq!(fb.rumble, Some(Rumble::new(0x40, 0x80)));
    }

    #[test]
    fn test_keyboard_leds() {
        let fb = decode_feedback(ConsoleType::KeyboardMouse, &[0x01, 0xFF]);
        assert_eq!(fb.keyboard_leds, Some(0x1F));
        assert!(decode_feedback(ConsoleType::KeyboardMouse, &[0x02, 0x01]).is_empty());
    }

    #[test]
    fn test_truncated_feedback_is_empty() {
        assert!(decode_feedback(ConsoleType::Xbox360, &[0x00, 0x08, 0x00, 0x40]).is_empty());
        assert!(decode_feedback(ConsoleType::Ps4, &[0x05, 0x01]).is_empty());
        assert!(decode_feedback(ConsoleType::Universal, &[0x01, 0x02]).is_empty());
    }

    #[test]
    fn test_encode_rumble_per_family() -> Result<(), Box<dyn std::error::Error>> {
        let rumble = Rumble::new(0xAA, 0x55);

        let ds4 = encode_rumble(ConsoleType::Ps4, rumble).ok_or("no ps4 rumble")?;
        assert_eq!(ds4.len(), PS4_OUTPUT_LEN);
        assert_eq!(&ds4[..6], &[0x05, 0x01, 0x04, 0x00, 0x55, 0xAA]);

        let x360 = encode_rumble(ConsoleType::Xbox360, rumble).ok_or("no 360 rumble")?;
        assert_eq!(x360.as_slice(), &[0x00, 0x08, 0x00, 0xAA, 0x55, 0x00, 0x00, 0x00]);

        let one = encode_rumble(ConsoleType::XboxOne, rumble).ok_or("no one rumble")?;
        assert_eq!(one.len(), XBOX_ONE_RUMBLE_LEN);
        assert_eq!(&one[8..10], &[0xAA, 0x55]);

        let ds3 = encode_rumble(ConsoleType::Ps3, rumble).ok_or("no ps3 rumble")?;
        assert_eq!(ds3.len(), PS3_OUTPUT_LEN);
        assert_eq!(&ds3[..11], &[0x01, 0x00, 0xFF, 0x01, 0xFF, 0xAA, 0, 0, 0, 0, 0x02]);
        assert_eq!(&ds3[11..16], &PS3_LED_BLOCK);

        assert_eq!(encode_rumble(ConsoleType::Universal, rumble), None);
        assert_eq!(encode_rumble(ConsoleType::KeyboardMouse, rumble), None);
        Ok(())
    }

    #[test]
    fn test_own_rumble_decodes_back() -> Result<(), Box<dyn std::error::Error>> {
        let rumble = Rumble::new(0x12, 0x34);
        for console in [ConsoleType::Ps4, ConsoleType::Xbox360, ConsoleType::XboxOne] {
            let report = encode_rumble(console, rumble).ok_or("no rumble")?;
            assert_eq!(decode_feedback(console, &report).rumble, Some(rumble));
        }
        Ok(())
    }

    #[test]
    fn test_handshake_detection() {
        assert!(is_handshake_report(ConsoleType::Ps4, &[0xF0, 0x01]));
        assert!(is_handshake_report(ConsoleType::Ps4, &[0xF3]));
        assert!(!is_handshake_report(ConsoleType::Ps4, &[0x01]));
        assert!(is_handshake_report(ConsoleType::XboxOne, &[0x06, 0x30, 0x07]));
        assert!(!is_handshake_report(ConsoleType::Xbox360, &[0x06]));
        assert!(!is_handshake_report(ConsoleType::Ps4, &[]));
        assert_eq!(handshake_sequence(ConsoleType::Ps4, &[0xF0, 0x09, 0x00]), Some(9));
        assert_eq!(handshake_sequence(ConsoleType::XboxOne, &[0x06, 0x30, 0x07]), Some(7));
        assert_eq!(handshake_sequence(ConsoleType::Ps4, &[0x01, 0x09]), None);
    }
}
