//! Command implementations for padctl

pub mod classify;
pub mod codec;
pub mod simulate;

use clap::ValueEnum;
use padrelay_device_types::{ConsoleType, ProtocolHint};
use padrelay_hid_console_protocol::CoordinateMode;

use crate::error::CliError;

/// Accepts `xbox_one`, `xbox-one` and any letter case.
pub fn parse_console(input: &str) -> Result<ConsoleType, CliError> {
    let name = input.trim().to_ascii_lowercase().replace('-', "_");
    ConsoleType::from_name(&name).ok_or_else(|| CliError::UnknownConsole(input.to_string()))
}

/// Interface class reported by the transport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum HintArg {
    Hid,
    Xinput,
    XboxOne,
    BootKeyboard,
    BootMouse,
}

impl HintArg {
    pub fn to_hint(self, subtype: u8) -> ProtocolHint {
        match self {
            HintArg::Hid => ProtocolHint::Hid,
            HintArg::Xinput => ProtocolHint::XInput { subtype },
            HintArg::XboxOne => ProtocolHint::XboxOne,
            HintArg::BootKeyboard => ProtocolHint::BootKeyboard,
            HintArg::BootMouse => ProtocolHint::BootMouse,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum CoordinateArg {
    Relative,
    Absolute,
}

impl From<CoordinateArg> for CoordinateMode {
    fn from(arg: CoordinateArg) -> Self {
        match arg {
            CoordinateArg::Relative => CoordinateMode::Relative,
            CoordinateArg::Absolute => CoordinateMode::Absolute,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    type TestResult = Result<(), Box<dyn std::error::Error>>;

    #[test]
    fn test_parse_console_spellings() -> TestResult {
        assert_eq!(parse_console("ps4")?, ConsoleType::Ps4);
        assert_eq!(parse_console("Xbox-One")?, ConsoleType::XboxOne);
        assert_eq!(parse_console("keyboard_mouse")?, ConsoleType::KeyboardMouse);
        assert!(matches!(
            parse_console("dreamcast"),
            Err(CliError::UnknownConsole(_))
        ));
        Ok(())
    }

    #[test]
    fn test_xinput_hint_carries_subtype() {
        assert_eq!(
            HintArg::Xinput.to_hint(0x08),
            ProtocolHint::XInput { subtype: 0x08 }
        );
        assert_eq!(HintArg::Hid.to_hint(0x08), ProtocolHint::Hid);
    }
}
