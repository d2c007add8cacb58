//! Conversions between wire resolutions and the canonical 16-bit ranges.
//!
//! Canonical sticks are signed 16-bit centred at zero, triggers unsigned
//! 16-bit. Narrow-then-widen is lossless for every wire width used here, so
//! decode followed by encode reproduces the original wire value.

/// Canonical trigger level at which consoles without a digital trigger bit
/// report the trigger as pressed.
pub const TRIGGER_DIGITAL_THRESHOLD: u16 = 30 * 257;

/// 8-bit unsigned stick (0x80 centre) to canonical.
pub fn axis_from_u8(value: u8) -> i16 {
    (i16::from(value) - 128) << 8
}

pub fn axis_to_u8(value: i16) -> u8 {
    ((value >> 8) + 128) as u8
}

/// 8-bit trigger to the full 16-bit range (0xFF maps to 0xFFFF).
pub fn trigger_from_u8(value: u8) -> u16 {
    u16::from(value) * 257
}

pub fn trigger_to_u8(value: u16) -> u8 {
    (value >> 8) as u8
}

/// 10-bit trigger (GIP) to canonical; values above 1023 saturate.
pub fn trigger_from_10bit(value: u16) -> u16 {
    let v = value.min(1023);
    (v << 6) | (v >> 4)
}

pub fn trigger_to_10bit(value: u16) -> u16 {
    value >> 6
}

/// 10-bit motion sample centred at 0x200 (PS3) to canonical.
pub fn motion_from_10bit(value: u16) -> i16 {
    (value.min(1023) as i16 - 512) << 6
}

pub fn motion_to_10bit(value: i16) -> u16 {
    ((value >> 6) + 512) as u16
}

/// Flips an axis between "up is negative" (HID) and "up is positive" (XInput).
pub fn invert_axis(value: i16) -> i16 {
    // -32768 has no positive counterpart and lands on 32767
    value.saturating_neg()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_axis_u8_extremes() {
        assert_eq!(axis_from_u8(0x80), 0);
        assert_eq!(axis_from_u8(0x00), i16::MIN);
        assert_eq!(axis_from_u8(0xFF), 0x7F00);
        for v in 0..=u8::MAX {
            assert_eq!(axis_to_u8(axis_from_u8(v)), v);
        }
        assert_eq!(axis_to_u8(i16::MAX), 0xFF);
        assert_eq!(axis_to_u8(i16::MIN), 0x00);
    }

    #[test]
    fn test_trigger_u8() {
        assert_eq!(trigger_from_u8(0xFF), u16::MAX);
        assert_eq!(trigger_from_u8(0), 0);
        for v in 0..=u8::MAX {
            assert_eq!(trigger_to_u8(trigger_from_u8(v)), v);
        }
    }

    #[test]
    fn test_trigger_10bit() {
        assert_eq!(trigger_from_10bit(1023), u16::MAX);
        assert_eq!(trigger_from_10bit(4000), u16::MAX);
        for v in 0..1024u16 {
            assert_eq!(trigger_to_10bit(trigger_from_10bit(v)), v);
        }
    }

    #[test]
    fn test_motion_10bit() {
        assert_eq!(motion_from_10bit(0x200), 0);
        assert_eq!(motion_from_10bit(0), i16::MIN);
        for v in 0..1024u16 {
            assert_eq!(motion_to_10bit(motion_from_10bit(v)), v);
        }
    }

    #[test]
    fn test_invert_axis() {
        assert_eq!(invert_axis(100), -100);
        assert_eq!(invert_axis(i16::MIN), i16::MAX);
        assert_eq!(invert_axis(0), 0);
    }

    #[test]
    fn test_threshold_sits_between_released_and_pressed() {
        assert_eq!(trigger_to_u8(TRIGGER_DIGITAL_THRESHOLD), 30);
    }
}
