//! Mapping between wire button bytes and canonical button flags.

use padrelay_device_types::Buttons;

/// Canonical flag carried by each bit of a wire byte, LSB first; an empty
/// entry marks an unused bit.
pub(crate) type BitMap = [Buttons; 8];

pub(crate) const UNUSED: Buttons = Buttons::empty();

pub(crate) fn pack(buttons: Buttons, map: &BitMap) -> u8 {
    map.iter()
        .enumerate()
        .filter(|(_, flag)| !flag.is_empty() && buttons.contains(**flag))
        .fold(0u8, |acc, (bit, _)| acc | (1 << bit))
}

pub(crate) fn unpack(byte: u8, map: &BitMap) -> Buttons {
    map.iter()
        .enumerate()
        .filter(|(bit, _)| byte & (1 << bit) != 0)
        .fold(Buttons::empty(), |acc, (_, flag)| acc | *flag)
}
