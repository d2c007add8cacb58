//! Console report codecs for padrelay
//!
//! Translates between each console family's wire reports and the
//! protocol-agnostic [`CanonicalInputState`]. All functions are pure and
//! allocation-free; reports are returned in fixed-capacity [`ReportBuf`]s.
//!
//! ```
//! use padrelay_device_types::{Buttons, CanonicalInputState, ConsoleType};
//! use padrelay_hid_console_protocol::{decode, encode};
//!
//! let state = CanonicalInputState::neutral().with_buttons(Buttons::SOUTH);
//! let report = encode(ConsoleType::Ps3, &state);
//! assert_eq!(report.len(), 27);
//! assert_eq!(decode(ConsoleType::Ps3, &report), state);
//! ```

#![deny(static_mut_refs)]
#![deny(unsafe_op_in_unsafe_fn)]
#![deny(clippy::unwrap_used)]

mod bitmap;
pub mod descriptor;
pub mod feedback;
pub mod keyboard_mouse;
pub mod ps3;
pub mod ps4;
pub mod scale;
pub mod universal;
pub mod xbox360;
pub mod xbox_one;

pub use descriptor::{CoordinateMode, DescriptorConfig, build_report_descriptor};
pub use feedback::{
    HostFeedback, Lightbar, Rumble, decode_feedback, encode_rumble, handshake_sequence,
    is_handshake_report,
};

use padrelay_device_types::{CanonicalInputState, ConsoleType};
use padrelay_hid_common::{DescriptorBuf, HidCommonError, ReportBuf};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProtocolError {
    #[error("{0} does not enumerate as HID and has no report descriptor")]
    NoReportDescriptor(ConsoleType),

    #[error("Button count {0} outside 1..=16")]
    InvalidButtonCount(u8),

    #[error(transparent)]
    Hid(#[from] HidCommonError),
}

pub type ProtocolResult<T> = Result<T, ProtocolError>;

/// Decodes one report from a device of family `console`.
///
/// Never fails: bytes past the end of `raw` read as neutral, and reports
/// that carry no input (status, feedback echoes) decode as the neutral state.
pub fn decode(console: ConsoleType, raw: &[u8]) -> CanonicalInputState {
    update(console, raw, &CanonicalInputState::neutral())
}

/// Decodes `raw` on top of the previous state of the same device.
///
/// Families that split their input over several reports (Xbox One guide
/// packets, keyboard and mouse reports) only replace the part `raw`
/// carries; non-input traffic leaves `previous` unchanged.
pub fn update(
    console: ConsoleType,
    raw: &[u8],
    previous: &CanonicalInputState,
) -> CanonicalInputState {
    match console {
        ConsoleType::Ps3 => ps3::decode(raw),
        ConsoleType::Ps4 => ps4::update(raw, previous),
        ConsoleType::Xbox360 => xbox360::update(raw, previous),
        ConsoleType::XboxOne => xbox_one::update(raw, previous),
        ConsoleType::Universal => universal::decode(raw),
        ConsoleType::KeyboardMouse => keyboard_mouse::update(raw, previous),
    }
}

/// Primary input report for `console`. Deterministic.
pub fn encode(console: ConsoleType, state: &CanonicalInputState) -> ReportBuf {
    match console {
        ConsoleType::Ps3 => ps3::encode(state),
        ConsoleType::Ps4 => ps4::encode(state),
        ConsoleType::Xbox360 => xbox360::encode(state),
        ConsoleType::XboxOne => xbox_one::encode(state),
        ConsoleType::Universal => universal::encode(state),
        ConsoleType::KeyboardMouse => keyboard_mouse::encode_keyboard(state),
    }
}

/// Second report for families whose input spans two reports: the Xbox One
/// guide packet and the mouse half of a keyboard/mouse combo.
pub fn encode_secondary(console: ConsoleType, state: &CanonicalInputState) -> Option<ReportBuf> {
    match console {
        ConsoleType::XboxOne => Some(xbox_one::encode_guide(state)),
        ConsoleType::KeyboardMouse => Some(keyboard_mouse::encode_mouse(state)),
        _ => None,
    }
}

/// Primary report for a state with nothing pressed.
pub fn neutral_report(console: ConsoleType) -> ReportBuf {
    encode(console, &CanonicalInputState::neutral())
}

/// Length of the primary input report.
pub fn report_len(console: ConsoleType) -> usize {
    match console {
        ConsoleType::Ps3 => ps3::REPORT_LEN,
        ConsoleType::Ps4 => ps4::REPORT_LEN,
        ConsoleType::Xbox360 => xbox360::REPORT_LEN,
        ConsoleType::XboxOne => xbox_one::INPUT_LEN,
        ConsoleType::Universal => universal::REPORT_LEN,
        ConsoleType::KeyboardMouse => keyboard_mouse::KEYBOARD_REPORT_LEN,
    }
}

/// Descriptor with default parameters.
pub fn default_report_descriptor(console: ConsoleType) -> ProtocolResult<DescriptorBuf> {
    build_report_descriptor(console, &DescriptorConfig::default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use padrelay_device_types::Buttons;

    #[test]
    fn test_encode_lengths_match_report_len() {
        for console in ConsoleType::ALL {
            assert_eq!(neutral_report(console).len(), report_len(console), "{console}");
        }
    }

    #[test]
    fn test_neutral_reports_decode_neutral() {
        for console in ConsoleType::ALL {
            let state = decode(console, &neutral_report(console));
            assert!(state.is_neutral(), "{console}: {state:?}");
        }
    }

    #[test]
    fn test_empty_input_is_neutral() {
        for console in ConsoleType::ALL {
            assert!(decode(console, &[]).is_neutral(), "{console}");
        }
    }

    #[test]
    fn test_secondary_reports() -> Result<(), Box<dyn std::error::Error>> {
        let state = CanonicalInputState::neutral().with_buttons(Buttons::GUIDE);
        let guide = encode_secondary(ConsoleType::XboxOne, &state).ok_or("no guide packet")?;
        assert_eq!(decode(ConsoleType::XboxOne, &guide), state);

        let mut km = CanonicalInputState::neutral();
        km.mouse.x = 12;
        let mouse = encode_secondary(ConsoleType::KeyboardMouse, &km).ok_or("no mouse report")?;
        assert_eq!(decode(ConsoleType::KeyboardMouse, &mouse), km);

        assert!(encode_secondary(ConsoleType::Ps4, &state).is_none());
        Ok(())
    }

    #[test]
    fn test_error_display() {
        let err = ProtocolError::NoReportDescriptor(ConsoleType::Xbox360);
        assert_eq!(
            err.to_string(),
            "xbox360 does not enumerate as HID and has no report descriptor"
        );
    }
}
