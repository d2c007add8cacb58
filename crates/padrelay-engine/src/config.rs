//! Engine configuration

use crate::error::ConfigError;
use padrelay_device_types::ConsoleType;
use padrelay_leds::{LedColor, LedDomainId};
use serde::{Deserialize, Serialize};

/// Upper bound for [`EngineConfig::max_reports_per_tick`].
pub const MAX_REPORTS_PER_TICK: usize = 64;

pub const MAX_BINDINGS: usize = 16;

/// Player LED bits a host can set.
const PLAYER_LED_COUNT: u8 = 8;

/// Boot keyboard LEDs: num, caps, scroll, compose, kana.
const KEYBOARD_LED_COUNT: u8 = 5;

/// Host feedback field that drives a bound LED.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeedbackSource {
    /// Lit while the host sets player `n` (zero based).
    PlayerLed(u8),
    /// Shows the host's lightbar colour; the binding colour is ignored.
    Lightbar,
    /// Lit while the host sets keyboard LED bit `n`.
    KeyboardLed(u8),
    /// Lit while any rumble motor runs.
    Rumble,
}

fn default_binding_color() -> LedColor {
    LedColor::WHITE
}

/// Routes one host feedback field to one LED.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedbackBinding {
    pub source: FeedbackSource,
    pub domain: LedDomainId,
    pub index: usize,
    #[serde(default = "default_binding_color")]
    pub color: LedColor,
}

impl FeedbackBinding {
    pub fn new(source: FeedbackSource, domain: LedDomainId, index: usize) -> Self {
        Self {
            source,
            domain,
            index,
            color: default_binding_color(),
        }
    }

    pub fn with_color(mut self, color: LedColor) -> Self {
        self.color = color;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Protocol the host side speaks.
    pub host_console: ConsoleType,
    /// Inbound reports taken from the transport per tick.
    pub max_reports_per_tick: usize,
    /// Skip host reports identical to the last one sent.
    pub suppress_unchanged: bool,
    /// Global LED brightness.
    pub brightness: u8,
    pub feedback_bindings: heapless::Vec<FeedbackBinding, MAX_BINDINGS>,
    /// Forward host rumble to every active peripheral.
    pub relay_rumble: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            host_console: ConsoleType::Universal,
            max_reports_per_tick: 8,
            suppress_unchanged: true,
            brightness: u8::MAX,
            feedback_bindings: heapless::Vec::new(),
            relay_rumble: true,
        }
    }
}

impl EngineConfig {
    pub fn for_host(host_console: ConsoleType) -> Self {
        Self {
            host_console,
            ..Self::default()
        }
    }

    /// Checks everything that does not depend on the board.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(1..=MAX_REPORTS_PER_TICK).contains(&self.max_reports_per_tick) {
            return Err(ConfigError::ReportBudget {
                value: self.max_reports_per_tick,
                max: MAX_REPORTS_PER_TICK,
            });
        }
        for (binding, b) in self.feedback_bindings.iter().enumerate() {
            match b.source {
                FeedbackSource::PlayerLed(player) if player >= PLAYER_LED_COUNT => {
                    return Err(ConfigError::PlayerOutOfRange { binding, player });
                }
                FeedbackSource::KeyboardLed(led) if led >= KEYBOARD_LED_COUNT => {
                    return Err(ConfigError::KeyboardLedOutOfRange { binding, led });
                }
                _ => {}
            }
        }
        Ok(())
    }
}
