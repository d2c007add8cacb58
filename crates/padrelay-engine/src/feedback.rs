//! Host feedback routed to LED bindings

use crate::config::{FeedbackBinding, FeedbackSource};
use padrelay_hid_console_protocol::HostFeedback;
use padrelay_leds::{LedColor, LedValue};

/// Folds a newer feedback report into the pending one; fields the newer
/// report carries win.
pub(crate) fn accumulate(pending: &mut HostFeedback, newer: HostFeedback) {
    if newer.rumble.is_some() {
        pending.rumble = newer.rumble;
    }
    if newer.player_leds.is_some() {
        pending.player_leds = newer.player_leds;
    }
    if newer.lightbar.is_some() {
        pending.lightbar = newer.lightbar;
    }
    if newer.keyboard_leds.is_some() {
        pending.keyboard_leds = newer.keyboard_leds;
    }
}

fn bit(mask: u8, n: u8) -> bool {
    mask.checked_shr(u32::from(n)).is_some_and(|m| m & 1 != 0)
}

fn lit(on: bool, color: LedColor) -> LedValue {
    if on { LedValue::Rgb(color) } else { LedValue::Off }
}

/// Value for a bound LED, or `None` when the feedback does not mention its
/// source.
pub fn binding_value(binding: &FeedbackBinding, feedback: &HostFeedback) -> Option<LedValue> {
    match binding.source {
        FeedbackSource::PlayerLed(n) => {
            let mask = feedback.player_leds?;
            Some(lit(bit(mask, n), binding.color))
        }
        FeedbackSource::KeyboardLed(n) => {
            let mask = feedback.keyboard_leds?;
            Some(lit(bit(mask, n), binding.color))
        }
        FeedbackSource::Lightbar => {
            let bar = feedback.lightbar?;
            Some(LedValue::Rgb(LedColor::new(bar.r, bar.g, bar.b)))
        }
        FeedbackSource::Rumble => {
            let rumble = feedback.rumble?;
            Some(lit(!rumble.is_off(), binding.color))
        }
    }
}
