//! Console families, device kinds and transport address slots

use core::fmt;
use serde::{Deserialize, Serialize};

/// Protocol family a host expects or a peripheral speaks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConsoleType {
    /// Generic HID gamepad.
    #[default]
    Universal,
    Ps3,
    Ps4,
    Xbox360,
    XboxOne,
    KeyboardMouse,
}

impl ConsoleType {
    pub const ALL: [ConsoleType; 6] = [
        ConsoleType::Universal,
        ConsoleType::Ps3,
        ConsoleType::Ps4,
        ConsoleType::Xbox360,
        ConsoleType::XboxOne,
        ConsoleType::KeyboardMouse,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ConsoleType::Universal => "universal",
            ConsoleType::Ps3 => "ps3",
            ConsoleType::Ps4 => "ps4",
            ConsoleType::Xbox360 => "xbox360",
            ConsoleType::XboxOne => "xbox_one",
            ConsoleType::KeyboardMouse => "keyboard_mouse",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.name() == name)
    }
}

impl fmt::Display for ConsoleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Variant within a console family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubType {
    #[default]
    Gamepad,
    Wheel,
    ArcadeStick,
    FlightStick,
    DancePad,
    Guitar,
    GuitarBass,
    Drums,
    ArcadePad,
    Turntable,
    Unknown,
}

impl SubType {
    /// Maps the XInput capabilities subtype byte.
    pub fn from_xinput_subtype(value: u8) -> Self {
        match value {
            0x01 => SubType::Gamepad,
            0x02 => SubType::Wheel,
            0x03 => SubType::ArcadeStick,
            0x04 => SubType::FlightStick,
            0x05 => SubType::DancePad,
            0x06 | 0x07 => SubType::Guitar,
            0x08 => SubType::Drums,
            0x0B => SubType::GuitarBass,
            0x13 => SubType::ArcadePad,
            0x17 => SubType::Turntable,
            _ => SubType::Unknown,
        }
    }

    pub fn xinput_subtype(self) -> u8 {
        match self {
            SubType::Gamepad | SubType::Unknown => 0x01,
            SubType::Wheel => 0x02,
            SubType::ArcadeStick => 0x03,
            SubType::FlightStick => 0x04,
            SubType::DancePad => 0x05,
            SubType::Guitar => 0x06,
            SubType::Drums => 0x08,
            SubType::GuitarBass => 0x0B,
            SubType::ArcadePad => 0x13,
            SubType::Turntable => 0x17,
        }
    }
}

/// Interface class observed by the transport before classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProtocolHint {
    #[default]
    Hid,
    /// XUSB interface carrying the capabilities subtype byte.
    #[serde(rename = "xinput")]
    XInput { subtype: u8 },
    /// GIP interface.
    XboxOne,
    BootKeyboard,
    BootMouse,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct DeviceKind {
    pub console_type: ConsoleType,
    pub sub_type: SubType,
}

impl DeviceKind {
    pub const fn new(console_type: ConsoleType, sub_type: SubType) -> Self {
        Self {
            console_type,
            sub_type,
        }
    }
}

/// Registry verdict for an attached device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Classification {
    Known(DeviceKind),
    Unknown,
}

impl Classification {
    /// Unknown devices are driven as a generic HID gamepad.
    pub fn console_type(&self) -> ConsoleType {
        match self {
            Classification::Known(kind) => kind.console_type,
            Classification::Unknown => ConsoleType::Universal,
        }
    }

    pub fn sub_type(&self) -> SubType {
        match self {
            Classification::Known(kind) => kind.sub_type,
            Classification::Unknown => SubType::Unknown,
        }
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, Classification::Unknown)
    }
}

/// Transport-level handle of a physical or logical connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AddressSlot {
    Usb { dev_addr: u8, instance: u8 },
    Bluetooth { handle: u16 },
}

impl AddressSlot {
    pub const fn usb(dev_addr: u8, instance: u8) -> Self {
        AddressSlot::Usb { dev_addr, instance }
    }

    pub const fn bluetooth(handle: u16) -> Self {
        AddressSlot::Bluetooth { handle }
    }
}

impl fmt::Display for AddressSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AddressSlot::Usb { dev_addr, instance } => write!(f, "usb:{dev_addr}.{instance}"),
            AddressSlot::Bluetooth { handle } => write!(f, "bt:0x{handle:04X}"),
        }
    }
}

/// Identity assigned at attach; immutable for the life of the connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DeviceIdentity {
    pub vendor_id: u16,
    pub product_id: u16,
    pub classification: Classification,
    pub slot: AddressSlot,
}

impl DeviceIdentity {
    pub fn console_type(&self) -> ConsoleType {
        self.classification.console_type()
    }

    pub fn sub_type(&self) -> SubType {
        self.classification.sub_type()
    }

    pub fn is_unknown(&self) -> bool {
        self.classification.is_unknown()
    }
}
