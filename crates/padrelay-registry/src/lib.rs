//! Device type registry
//!
//! Classifies attached devices from their vendor ID, product ID and the
//! interface class the transport observed, and finds which attached device
//! implements a requested console family.
//!
//! ```
//! use padrelay_device_types::{Classification, ConsoleType, ProtocolHint};
//! use padrelay_registry::classify;
//!
//! let c = classify(0x054C, 0x0268, ProtocolHint::Hid);
//! assert_eq!(c.console_type(), ConsoleType::Ps3);
//! assert_eq!(classify(0x1234, 0x5678, ProtocolHint::Hid), Classification::Unknown);
//! ```

#![deny(static_mut_refs)]
#![deny(unsafe_op_in_unsafe_fn)]
#![deny(clippy::unwrap_used)]

pub mod ids;
pub mod table;

pub use ids::*;
pub use table::{DEFAULT_TABLE, FamilyMatch, ProductMatch, RegistryEntry, SubTypeRule, VendorMatch};

use padrelay_device_types::{AddressSlot, Classification, ConsoleType, DeviceIdentity, ProtocolHint};
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistryError {
    #[error("No attached device implements {0}")]
    NotFound(ConsoleType),
}

pub type RegistryResult<T> = Result<T, RegistryError>;

/// Classification over an ordered table.
#[derive(Debug, Clone, Copy)]
pub struct Registry {
    table: &'static [RegistryEntry],
}

impl Default for Registry {
    fn default() -> Self {
        Self::new(DEFAULT_TABLE)
    }
}

impl Registry {
    pub fn new(table: &'static [RegistryEntry]) -> Self {
        Self { table }
    }

    pub fn table(&self) -> &'static [RegistryEntry] {
        self.table
    }

    /// First matching entry wins.
    pub fn classify(&self, vendor_id: u16, product_id: u16, hint: ProtocolHint) -> Classification {
        let found = self
            .table
            .iter()
            .find(|entry| entry.matches(vendor_id, product_id, hint));

        match found {
            Some(entry) => {
                let kind = entry.kind(hint);
                debug!(
                    "Classified {:04X}:{:04X} as {} {:?}",
                    vendor_id, product_id, kind.console_type, kind.sub_type
                );
                Classification::Known(kind)
            }
            None => {
                debug!(
                    "No registry entry for {:04X}:{:04X} ({:?}); treating as generic HID",
                    vendor_id, product_id, hint
                );
                Classification::Unknown
            }
        }
    }

    /// Builds the immutable identity of a device attached at `slot`.
    pub fn identify(
        &self,
        vendor_id: u16,
        product_id: u16,
        hint: ProtocolHint,
        slot: AddressSlot,
    ) -> DeviceIdentity {
        DeviceIdentity {
            vendor_id,
            product_id,
            classification: self.classify(vendor_id, product_id, hint),
            slot,
        }
    }
}

/// Classifies against [`DEFAULT_TABLE`].
pub fn classify(vendor_id: u16, product_id: u16, hint: ProtocolHint) -> Classification {
    Registry::default().classify(vendor_id, product_id, hint)
}

/// Slot of the first attached device implementing `console_type`.
///
/// Unknown devices implement nothing, even though they are driven as
/// generic HID.
pub fn resolve_address_for<'a, I>(console_type: ConsoleType, attached: I) -> RegistryResult<AddressSlot>
where
    I: IntoIterator<Item = &'a DeviceIdentity>,
{
    attached
        .into_iter()
        .find(|identity| {
            matches!(identity.classification, Classification::Known(kind) if kind.console_type == console_type)
        })
        .map(|identity| identity.slot)
        .ok_or(RegistryError::NotFound(console_type))
}

#[cfg(test)]
mod tests {
    use super::*;
    use padrelay_device_types::{DeviceKind, SubType};

    #[test]
    fn test_exact_match() {
        assert_eq!(
            classify(SONY_VENDOR_ID, sony::DUALSHOCK4_V2, ProtocolHint::Hid),
            Classification::Known(DeviceKind::new(ConsoleType::Ps4, SubType::Gamepad))
        );
        assert_eq!(
            classify(SONY_RHYTHM_VENDOR_ID, sony_rhythm::DJ_HERO_TURNTABLE, ProtocolHint::Hid),
            Classification::Known(DeviceKind::new(ConsoleType::Ps3, SubType::Turntable))
        );
    }

    #[test]
    fn test_exact_match_wins_over_hint() {
        // A wired 360 pad always reports the XInput class; the exact entry
        // fixes the sub type even if the capabilities byte is odd.
        let c = classify(
            MICROSOFT_VENDOR_ID,
            microsoft::XBOX360_WIRED,
            ProtocolHint::XInput { subtype: 0x08 },
        );
        assert_eq!(c, Classification::Known(DeviceKind::new(ConsoleType::Xbox360, SubType::Gamepad)));
    }

    #[test]
    fn test_vendor_wildcards_match_without_interface_class() {
        let madcatz = classify(MADCATZ_VENDOR_ID, 0x4716, ProtocolHint::Hid);
        assert_eq!(
            madcatz,
            Classification::Known(DeviceKind::new(ConsoleType::Xbox360, SubType::Gamepad))
        );

        let pdp = classify(PDP_VENDOR_ID, 0x0401, ProtocolHint::XInput { subtype: 0x03 });
        assert_eq!(
            pdp,
            Classification::Known(DeviceKind::new(ConsoleType::Xbox360, SubType::ArcadeStick))
        );

        // Hori sticks are always arcade sticks, whatever the capabilities byte says.
        let hori = classify(HORI_VENDOR_ID, 0x000A, ProtocolHint::XInput { subtype: 0x01 });
        assert_eq!(
            hori,
            Classification::Known(DeviceKind::new(ConsoleType::Xbox360, SubType::ArcadeStick))
        );
    }

    #[test]
    fn test_vendor_gip_interface_is_xbox_one() {
        for vid in [MADCATZ_VENDOR_ID, PDP_VENDOR_ID, HORI_VENDOR_ID] {
            let c = classify(vid, 0x02A4, ProtocolHint::XboxOne);
            assert_eq!(c.console_type(), ConsoleType::XboxOne, "{vid:04x}");
        }
    }

    #[test]
    fn test_family_wildcards() {
        let c = classify(0xABCD, 0x0001, ProtocolHint::XInput { subtype: 0x06 });
        assert_eq!(c, Classification::Known(DeviceKind::new(ConsoleType::Xbox360, SubType::Guitar)));

        let kb = classify(0xABCD, 0x0002, ProtocolHint::BootKeyboard);
        assert_eq!(kb.console_type(), ConsoleType::KeyboardMouse);
    }

    #[test]
    fn test_unknown_device() {
        let c = classify(0x1209, 0x0001, ProtocolHint::Hid);
        assert!(c.is_unknown());
        assert_eq!(c.console_type(), ConsoleType::Universal);
    }

    #[test]
    fn test_custom_table_first_match_wins() {
        static TABLE: &[RegistryEntry] = &[
            RegistryEntry {
                vendor: VendorMatch::Exact(0x1111),
                product: ProductMatch::Any,
                family: FamilyMatch::Any,
                console_type: ConsoleType::Ps4,
                sub_type: SubTypeRule::Fixed(SubType::Wheel),
            },
            RegistryEntry {
                vendor: VendorMatch::Exact(0x1111),
                product: ProductMatch::Exact(0x2222),
                family: FamilyMatch::Any,
                console_type: ConsoleType::Ps3,
                sub_type: SubTypeRule::Fixed(SubType::Gamepad),
            },
        ];
        let registry = Registry::new(TABLE);
        assert_eq!(
            registry.classify(0x1111, 0x2222, ProtocolHint::Hid),
            Classification::Known(DeviceKind::new(ConsoleType::Ps4, SubType::Wheel))
        );
    }

    #[test]
    fn test_resolve_address_for() -> Result<(), Box<dyn std::error::Error>> {
        let registry = Registry::default();
        let attached = [
            registry.identify(0x1209, 0x0001, ProtocolHint::Hid, AddressSlot::usb(1, 0)),
            registry.identify(SONY_VENDOR_ID, sony::DUALSHOCK4_V1, ProtocolHint::Hid, AddressSlot::usb(2, 0)),
            registry.identify(SONY_VENDOR_ID, sony::DUALSHOCK4_V2, ProtocolHint::Hid, AddressSlot::usb(3, 0)),
        ];

        assert_eq!(resolve_address_for(ConsoleType::Ps4, &attached)?, AddressSlot::usb(2, 0));
        assert_eq!(
            resolve_address_for(ConsoleType::Xbox360, &attached),
            Err(RegistryError::NotFound(ConsoleType::Xbox360))
        );
        // the unknown device is not a Universal implementation
        assert_eq!(
            resolve_address_for(ConsoleType::Universal, &attached),
            Err(RegistryError::NotFound(ConsoleType::Universal))
        );
        Ok(())
    }
}
