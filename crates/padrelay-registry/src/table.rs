//! Ordered classification table

use crate::ids::{self, harmonix, hori, microsoft, sony, sony_rhythm};
use padrelay_device_types::{ConsoleType, DeviceKind, ProtocolHint, SubType};
use ConsoleType::{Ps3, Ps4, Xbox360, XboxOne};
use SubType::{ArcadePad, ArcadeStick, Drums, Gamepad, Guitar, Turntable};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VendorMatch {
    Exact(u16),
    Any,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProductMatch {
    Exact(u16),
    Any,
}

/// Interface class an entry applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FamilyMatch {
    Any,
    Hid,
    XInput,
    XboxOne,
    Boot,
}

impl FamilyMatch {
    pub fn matches(self, hint: ProtocolHint) -> bool {
        match self {
            FamilyMatch::Any => true,
            FamilyMatch::Hid => matches!(hint, ProtocolHint::Hid),
            FamilyMatch::XInput => matches!(hint, ProtocolHint::XInput { .. }),
            FamilyMatch::XboxOne => matches!(hint, ProtocolHint::XboxOne),
            FamilyMatch::Boot => {
                matches!(hint, ProtocolHint::BootKeyboard | ProtocolHint::BootMouse)
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubTypeRule {
    Fixed(SubType),
    /// Taken from the XInput capabilities subtype in the hint.
    FromHint,
}

impl SubTypeRule {
    pub fn resolve(self, hint: ProtocolHint) -> SubType {
        match (self, hint) {
            (SubTypeRule::Fixed(sub), _) => sub,
            (SubTypeRule::FromHint, ProtocolHint::XInput { subtype }) => {
                SubType::from_xinput_subtype(subtype)
            }
            (SubTypeRule::FromHint, _) => SubType::Gamepad,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegistryEntry {
    pub vendor: VendorMatch,
    pub product: ProductMatch,
    pub family: FamilyMatch,
    pub console_type: ConsoleType,
    pub sub_type: SubTypeRule,
}

impl RegistryEntry {
    const fn exact(vendor: u16, product: u16, console_type: ConsoleType, sub_type: SubType) -> Self {
        Self {
            vendor: VendorMatch::Exact(vendor),
            product: ProductMatch::Exact(product),
            family: FamilyMatch::Any,
            console_type,
            sub_type: SubTypeRule::Fixed(sub_type),
        }
    }

    const fn vendor(vendor: u16, family: FamilyMatch, console_type: ConsoleType) -> Self {
        Self {
            vendor: VendorMatch::Exact(vendor),
            product: ProductMatch::Any,
            family,
            console_type,
            sub_type: SubTypeRule::FromHint,
        }
    }

    const fn vendor_fixed(vendor: u16, console_type: ConsoleType, sub_type: SubType) -> Self {
        Self {
            vendor: VendorMatch::Exact(vendor),
            product: ProductMatch::Any,
            family: FamilyMatch::Any,
            console_type,
            sub_type: SubTypeRule::Fixed(sub_type),
        }
    }

    const fn family(family: FamilyMatch, console_type: ConsoleType) -> Self {
        Self {
            vendor: VendorMatch::Any,
            product: ProductMatch::Any,
            family,
            console_type,
            sub_type: SubTypeRule::FromHint,
        }
    }

    pub fn matches(&self, vendor_id: u16, product_id: u16, hint: ProtocolHint) -> bool {
        let vendor_ok = match self.vendor {
            VendorMatch::Exact(v) => v == vendor_id,
            VendorMatch::Any => true,
        };
        let product_ok = match self.product {
            ProductMatch::Exact(p) => p == product_id,
            ProductMatch::Any => true,
        };
        vendor_ok && product_ok && self.family.matches(hint)
    }

    /// 2 for an exact pair, 1 for a vendor wildcard, 0 for a class wildcard.
    pub fn specificity(&self) -> u8 {
        match (self.vendor, self.product) {
            (VendorMatch::Exact(_), ProductMatch::Exact(_)) => 2,
            (VendorMatch::Exact(_), ProductMatch::Any) => 1,
            (VendorMatch::Any, _) => 0,
        }
    }

    pub fn kind(&self, hint: ProtocolHint) -> DeviceKind {
        let sub_type = match (self.console_type, hint) {
            (ConsoleType::KeyboardMouse, _) => SubType::Unknown,
            _ => self.sub_type.resolve(hint),
        };
        DeviceKind::new(self.console_type, sub_type)
    }
}

/// Built-in table; specific entries precede wildcards.
pub static DEFAULT_TABLE: &[RegistryEntry] = &[
    RegistryEntry::exact(ids::SONY_VENDOR_ID, sony::DUALSHOCK3, Ps3, Gamepad),
    RegistryEntry::exact(ids::SONY_VENDOR_ID, sony::DUALSHOCK4_V1, Ps4, Gamepad),
    RegistryEntry::exact(ids::SONY_VENDOR_ID, sony::DUALSHOCK4_V2, Ps4, Gamepad),
    RegistryEntry::exact(ids::SONY_VENDOR_ID, sony::DUALSHOCK4_ADAPTER, Ps4, Gamepad),
    RegistryEntry::exact(ids::SONY_RHYTHM_VENDOR_ID, sony_rhythm::GUITAR_HERO_GUITAR, Ps3, Guitar),
    RegistryEntry::exact(ids::SONY_RHYTHM_VENDOR_ID, sony_rhythm::GUITAR_HERO_DRUMS, Ps3, Drums),
    RegistryEntry::exact(ids::SONY_RHYTHM_VENDOR_ID, sony_rhythm::DJ_HERO_TURNTABLE, Ps3, Turntable),
    RegistryEntry::exact(ids::SONY_RHYTHM_VENDOR_ID, sony_rhythm::ROCK_BAND_GUITAR, Ps3, Guitar),
    RegistryEntry::exact(ids::SONY_RHYTHM_VENDOR_ID, sony_rhythm::ROCK_BAND_DRUMS, Ps3, Drums),
    RegistryEntry::exact(ids::MICROSOFT_VENDOR_ID, microsoft::XBOX360_WIRED, Xbox360, Gamepad),
    RegistryEntry::exact(ids::MICROSOFT_VENDOR_ID, microsoft::XBOX360_WIRELESS, Xbox360, Gamepad),
    RegistryEntry::exact(
        ids::MICROSOFT_VENDOR_ID,
        microsoft::XBOX360_WIRELESS_RECEIVER,
        Xbox360,
        Gamepad,
    ),
    RegistryEntry::exact(ids::MICROSOFT_VENDOR_ID, microsoft::XBOX_ONE, XboxOne, Gamepad),
    RegistryEntry::exact(ids::MICROSOFT_VENDOR_ID, microsoft::XBOX_ONE_2015, XboxOne, Gamepad),
    RegistryEntry::exact(ids::MICROSOFT_VENDOR_ID, microsoft::XBOX_ONE_ELITE, XboxOne, Gamepad),
    RegistryEntry::exact(ids::MICROSOFT_VENDOR_ID, microsoft::XBOX_ONE_S, XboxOne, Gamepad),
    RegistryEntry::exact(ids::MICROSOFT_VENDOR_ID, microsoft::XBOX_ONE_ELITE_2, XboxOne, Gamepad),
    RegistryEntry::exact(ids::MICROSOFT_VENDOR_ID, microsoft::XBOX_SERIES, XboxOne, Gamepad),
    RegistryEntry::exact(ids::HORI_VENDOR_ID, hori::FIGHTING_COMMANDER_PS4, Ps4, ArcadePad),
    RegistryEntry::exact(ids::HARMONIX_VENDOR_ID, harmonix::ROCK_BAND_GUITAR, Xbox360, Guitar),
    RegistryEntry::exact(ids::HARMONIX_VENDOR_ID, harmonix::ROCK_BAND_DRUMS, Xbox360, Drums),
    // GIP-class entries come first so an Xbox One pad from these vendors is
    // not caught by the vendor-only 360 wildcards below.
    RegistryEntry::vendor(ids::MADCATZ_VENDOR_ID, FamilyMatch::XboxOne, XboxOne),
    RegistryEntry::vendor(ids::PDP_VENDOR_ID, FamilyMatch::XboxOne, XboxOne),
    RegistryEntry::vendor(ids::HORI_VENDOR_ID, FamilyMatch::XboxOne, XboxOne),
    RegistryEntry::vendor(ids::MADCATZ_VENDOR_ID, FamilyMatch::Any, Xbox360),
    RegistryEntry::vendor(ids::PDP_VENDOR_ID, FamilyMatch::Any, Xbox360),
    RegistryEntry::vendor_fixed(ids::HORI_VENDOR_ID, Xbox360, ArcadeStick),
    RegistryEntry::family(FamilyMatch::XInput, Xbox360),
    RegistryEntry::family(FamilyMatch::XboxOne, XboxOne),
    RegistryEntry::family(FamilyMatch::Boot, ConsoleType::KeyboardMouse),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_lists_specific_entries_first() {
        let mut last = u8::MAX;
        for (i, entry) in DEFAULT_TABLE.iter().enumerate() {
            let s = entry.specificity();
            assert!(s <= last, "entry {i} is more specific than an earlier wildcard");
            last = s;
        }
    }

    #[test]
    fn test_exact_pairs_are_unique() {
        for (i, a) in DEFAULT_TABLE.iter().enumerate() {
            for b in DEFAULT_TABLE.iter().skip(i + 1) {
                if a.specificity() == 2 && b.specificity() == 2 {
                    assert!(
                        a.vendor != b.vendor || a.product != b.product,
                        "duplicate exact entry {a:?}"
                    );
                }
            }
        }
    }

    #[test]
    fn test_sub_type_from_hint() {
        assert_eq!(
            SubTypeRule::FromHint.resolve(ProtocolHint::XInput { subtype: 0x08 }),
            SubType::Drums
        );
        assert_eq!(SubTypeRule::FromHint.resolve(ProtocolHint::Hid), SubType::Gamepad);
        assert_eq!(
            SubTypeRule::Fixed(SubType::Wheel).resolve(ProtocolHint::XInput { subtype: 1 }),
            SubType::Wheel
        );
    }
}
