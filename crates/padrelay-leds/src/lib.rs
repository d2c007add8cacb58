//! LED state synchronization for padrelay
//!
//! Producers describe what every LED should show; [`LedDomain::flush`]
//! writes only what differs from the last successful write.
//!
//! ```
//! use padrelay_leds::{Apa102, LedColor, LedDomain, LedDomainId, LedValue, LedWriter, TransportError};
//!
//! struct Bus(usize);
//! impl LedWriter for Bus {
//!     fn write(&mut self, _: LedDomainId, _: u16, _: &[u8]) -> Result<(), TransportError> {
//!         self.0 += 1;
//!         Ok(())
//!     }
//! }
//!
//! let mut leds: LedDomain<Apa102, 4> = LedDomain::new(LedDomainId::Onboard);
//! leds.set_desired(2, LedValue::Rgb(LedColor::RED), false)?;
//! let mut bus = Bus(0);
//! assert_eq!(leds.flush(&mut bus).writes, 1);
//! assert_eq!(leds.flush(&mut bus).writes, 0);
//! # Ok::<(), padrelay_leds::LedError>(())
//! ```

#![deny(unsafe_op_in_unsafe_fn)]
#![deny(clippy::unwrap_used)]

pub mod board;
pub mod domain;
pub mod technology;
pub mod writer;

pub use board::{Board, BoardLeds, LedBank, NoLeds, bare_board};
pub use domain::{FlushReport, LedDomain, LedEntry, LedSnapshot, LedStatus, MAX_GROUP_LEN, SetOutcome};
pub use technology::{
    Apa102, Apa102Color, LedFrame, LedTechnology, Mpr121, Stp, Ws2812Channel, Ws2812Color,
    Ws2812Spi,
};
pub use writer::{LedWriter, TransportError};

use core::fmt;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct LedColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl LedColor {
    pub const RED: LedColor = LedColor { r: 255, g: 0, b: 0 };
    pub const GREEN: LedColor = LedColor { r: 0, g: 255, b: 0 };
    pub const BLUE: LedColor = LedColor { r: 0, g: 0, b: 255 };
    pub const WHITE: LedColor = LedColor {
        r: 255,
        g: 255,
        b: 255,
    };
    pub const OFF: LedColor = LedColor { r: 0, g: 0, b: 0 };

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Technology-neutral request for one LED.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LedValue {
    #[default]
    Off,
    On,
    Rgb(LedColor),
}

impl LedValue {
    /// `On` is white on colour LEDs.
    pub fn rgb(self) -> LedColor {
        match self {
            LedValue::Off => LedColor::OFF,
            LedValue::On => LedColor::WHITE,
            LedValue::Rgb(c) => c,
        }
    }

    /// Any non-black colour lights a single-colour LED.
    pub fn is_lit(self) -> bool {
        self.rgb() != LedColor::OFF
    }
}

/// Independent LED buses on a board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LedDomainId {
    /// LEDs on the adapter itself.
    Onboard,
    /// LEDs on an attached accessory or button panel.
    Peripheral,
    /// LEDs behind the capacitive touch controller.
    Capacitive,
}

impl LedDomainId {
    pub const ALL: [LedDomainId; 3] = [
        LedDomainId::Onboard,
        LedDomainId::Peripheral,
        LedDomainId::Capacitive,
    ];

    pub fn name(self) -> &'static str {
        match self {
            LedDomainId::Onboard => "onboard",
            LedDomainId::Peripheral => "peripheral",
            LedDomainId::Capacitive => "capacitive",
        }
    }
}

impl fmt::Display for LedDomainId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LedError {
    #[error("LED index {index} out of range for {domain} ({len} LEDs)")]
    IndexOutOfRange {
        domain: LedDomainId,
        index: usize,
        len: usize,
    },
}

pub type LedResult<T> = Result<T, LedError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_conversions() {
        assert_eq!(LedValue::On.rgb(), LedColor::WHITE);
        assert!(!LedValue::Rgb(LedColor::OFF).is_lit());
        assert!(LedValue::Rgb(LedColor::new(0, 0, 1)).is_lit());
    }

    #[test]
    fn test_value_serde() -> Result<(), Box<dyn std::error::Error>> {
        let v: LedValue = serde_json::from_str(r#"{"rgb":{"r":1,"g":2,"b":3}}"#)?;
        assert_eq!(v, LedValue::Rgb(LedColor::new(1, 2, 3)));
        let on: LedValue = serde_json::from_str(r#""on""#)?;
        assert_eq!(on, LedValue::On);
        Ok(())
    }

    #[test]
    fn test_error_display() {
        let err = LedError::IndexOutOfRange {
            domain: LedDomainId::Peripheral,
            index: 9,
            len: 8,
        };
        assert_eq!(err.to_string(), "LED index 9 out of range for peripheral (8 LEDs)");
    }
}
