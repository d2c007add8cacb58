//! HID report descriptors for the consoles that enumerate as HID devices.
//!
//! Each descriptor describes exactly the report its codec writes, so the
//! host parses what `encode` produces. Xbox 360 and Xbox One are vendor
//! class interfaces and have none.

use crate::{ProtocolError, ProtocolResult};
use padrelay_device_types::ConsoleType;
use padrelay_hid_common::{
    Collection, DescriptorBuf, DescriptorBuilder, MainItemFlags, usage, usage_page,
};

/// Degrees, English rotation system.
const UNIT_DEGREES: u32 = 0x14;
const UNIT_NONE: u32 = 0x00;

/// Vendor usage the PS3 uses for its 32-byte feature and output reports.
const PS3_VENDOR_REPORT_USAGE: u16 = 0x2621;
const PS3_PRESSURE_USAGES: core::ops::RangeInclusive<u16> = 0x20..=0x2B;
const PS3_MOTION_USAGES: core::ops::RangeInclusive<u16> = 0x2C..=0x2F;

pub const MOUSE_BUTTON_COUNT: u8 = 5;
const KEYBOARD_ROLLOVER: u8 = 6;

/// Whether the mouse reports absolute positions or deltas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CoordinateMode {
    Absolute,
    #[default]
    Relative,
}

/// Build-time descriptor parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DescriptorConfig {
    /// Buttons declared by the universal gamepad, 1..=16.
    pub button_count: u8,
    pub coordinates: CoordinateMode,
}

impl Default for DescriptorConfig {
    fn default() -> Self {
        Self {
            button_count: 15,
            coordinates: CoordinateMode::Relative,
        }
    }
}

fn hat(d: &mut DescriptorBuilder) {
    d.usage_page(usage_page::GENERIC_DESKTOP)
        .logical_minimum(0)
        .logical_maximum(7)
        .physical_minimum(0)
        .physical_maximum(315)
        .report_size(4)
        .report_count(1)
        .unit(UNIT_DEGREES)
        .usage(usage::HAT_SWITCH)
        .input(MainItemFlags::DATA_VAR_ABS | MainItemFlags::NULL_STATE)
        .unit(UNIT_NONE);
}

fn ps3() -> ProtocolResult<DescriptorBuf> {
    let mut d = DescriptorBuilder::new();
    d.usage_page(usage_page::GENERIC_DESKTOP)
        .usage(usage::GAMEPAD)
        .collection(Collection::Application)
        .logical_minimum(0)
        .logical_maximum(1)
        .physical_minimum(0)
        .physical_maximum(1)
        .report_size(1)
        .report_count(crate::ps3::BUTTON_COUNT)
        .usage_page(usage_page::BUTTON)
        .usage_minimum(1)
        .usage_maximum(u16::from(crate::ps3::BUTTON_COUNT))
        .input(MainItemFlags::DATA_VAR_ABS)
        .report_count(16 - crate::ps3::BUTTON_COUNT)
        .input(MainItemFlags::CONSTANT)
        .usage_page(usage_page::GENERIC_DESKTOP)
        .logical_maximum(7)
        .physical_maximum(315)
        .report_size(4)
        .report_count(1)
        .unit(UNIT_DEGREES)
        .usage(usage::HAT_SWITCH)
        .input(MainItemFlags::DATA_VAR_ABS | MainItemFlags::NULL_STATE)
        .unit(UNIT_NONE)
        .report_count(1)
        .input(MainItemFlags::CONSTANT)
        .logical_maximum(255)
        .physical_maximum(255)
        .usage(usage::X)
        .usage(usage::Y)
        .usage(usage::Z)
        .usage(usage::RZ)
        .report_size(8)
        .report_count(4)
        .input(MainItemFlags::DATA_VAR_ABS)
        .usage_page(usage_page::VENDOR);
    for u in PS3_PRESSURE_USAGES {
        d.usage(u);
    }
    d.report_count(12)
        .input(MainItemFlags::DATA_VAR_ABS)
        .usage(PS3_VENDOR_REPORT_USAGE)
        .report_count(32)
        .feature(MainItemFlags::DATA_VAR_ABS)
        .usage(PS3_VENDOR_REPORT_USAGE)
        .output(MainItemFlags::DATA_VAR_ABS)
        .logical_maximum(1023)
        .physical_maximum(1023);
    for u in PS3_MOTION_USAGES {
        d.usage(u);
    }
    d.report_size(16)
        .report_count(4)
        .input(MainItemFlags::DATA_VAR_ABS)
        .end_collection();
    Ok(d.build()?)
}

fn ps4() -> ProtocolResult<DescriptorBuf> {
    const BUTTONS: u8 = 14;
    let trailing = (crate::ps4::REPORT_LEN - 10) as u8;

    let mut d = DescriptorBuilder::new();
    d.usage_page(usage_page::GENERIC_DESKTOP)
        .usage(usage::GAMEPAD)
        .collection(Collection::Application)
        .report_id(crate::ps4::USB_REPORT_ID)
        .usage(usage::X)
        .usage(usage::Y)
        .usage(usage::Z)
        .usage(usage::RZ)
        .logical_minimum(0)
        .logical_maximum(255)
        .report_size(8)
        .report_count(4)
        .input(MainItemFlags::DATA_VAR_ABS);
    hat(&mut d);
    d.usage_page(usage_page::BUTTON)
        .usage_minimum(1)
        .usage_maximum(u16::from(BUTTONS))
        .logical_minimum(0)
        .logical_maximum(1)
        .report_size(1)
        .report_count(BUTTONS)
        .input(MainItemFlags::DATA_VAR_ABS)
        // frame counter
        .usage_page(usage_page::VENDOR)
        .usage(0x20)
        .report_size(6)
        .report_count(1)
        .logical_maximum(63)
        .input(MainItemFlags::DATA_VAR_ABS)
        .usage_page(usage_page::GENERIC_DESKTOP)
        .usage(usage::RX)
        .usage(usage::RY)
        .logical_maximum(255)
        .report_size(8)
        .report_count(2)
        .input(MainItemFlags::DATA_VAR_ABS)
        // motion, battery and touchpad block
        .usage_page(usage_page::VENDOR)
        .usage(0x21)
        .report_count(trailing)
        .input(MainItemFlags::DATA_VAR_ABS)
        .end_collection();
    Ok(d.build()?)
}

fn universal(config: &DescriptorConfig) -> ProtocolResult<DescriptorBuf> {
    let buttons = config.button_count;
    if !(1..=16).contains(&buttons) {
        return Err(ProtocolError::InvalidButtonCount(buttons));
    }

    let mut d = DescriptorBuilder::new();
    d.usage_page(usage_page::GENERIC_DESKTOP)
        .usage(usage::GAMEPAD)
        .collection(Collection::Application)
        .usage_page(usage_page::BUTTON)
        .usage_minimum(1)
        .usage_maximum(u16::from(buttons))
        .logical_minimum(0)
        .logical_maximum(1)
        .report_size(1)
        .report_count(buttons)
        .input(MainItemFlags::DATA_VAR_ABS);
    if buttons < 16 {
        d.padding(1, 16 - buttons);
    }
    hat(&mut d);
    d.padding(4, 1)
        .usage_page(usage_page::GENERIC_DESKTOP)
        .usage(usage::X)
        .usage(usage::Y)
        .usage(usage::Z)
        .usage(usage::RZ)
        .usage(usage::RX)
        .usage(usage::RY)
        .logical_minimum(0)
        .logical_maximum(255)
        .physical_minimum(0)
        .physical_maximum(255)
        .report_size(8)
        .report_count(6)
        .input(MainItemFlags::DATA_VAR_ABS)
        .end_collection();
    Ok(d.build()?)
}

fn keyboard_mouse(config: &DescriptorConfig) -> ProtocolResult<DescriptorBuf> {
    use crate::keyboard_mouse::{KEYBOARD_REPORT_ID, MOUSE_REPORT_ID};

    let axes = match config.coordinates {
        CoordinateMode::Absolute => MainItemFlags::DATA_VAR_ABS,
        CoordinateMode::Relative => MainItemFlags::DATA_VAR_REL,
    };

    let mut d = DescriptorBuilder::new();
    d.usage_page(usage_page::GENERIC_DESKTOP)
        .usage(usage::KEYBOARD)
        .collection(Collection::Application)
        .report_id(KEYBOARD_REPORT_ID)
        // modifiers
        .usage_page(usage_page::KEYBOARD)
        .usage_minimum(0xE0)
        .usage_maximum(0xE7)
        .logical_minimum(0)
        .logical_maximum(1)
        .report_size(1)
        .report_count(8)
        .input(MainItemFlags::DATA_VAR_ABS)
        .report_count(1)
        .report_size(8)
        .input(MainItemFlags::CONSTANT)
        // lock LEDs
        .usage_page(usage_page::LEDS)
        .usage_minimum(1)
        .usage_maximum(5)
        .report_count(5)
        .report_size(1)
        .output(MainItemFlags::DATA_VAR_ABS)
        .report_count(1)
        .report_size(3)
        .output(MainItemFlags::CONSTANT)
        // key array
        .logical_minimum(0)
        .logical_maximum(0xFF)
        .usage_page(usage_page::KEYBOARD)
        .usage_minimum(0)
        .usage_maximum(0xFF)
        .report_count(KEYBOARD_ROLLOVER)
        .report_size(8)
        .input(MainItemFlags::DATA_ARRAY)
        .end_collection()
        .usage_page(usage_page::GENERIC_DESKTOP)
        .usage(usage::MOUSE)
        .collection(Collection::Application)
        .report_id(MOUSE_REPORT_ID)
        .usage(usage::POINTER)
        .collection(Collection::Physical)
        .usage_page(usage_page::BUTTON)
        .usage_minimum(1)
        .usage_maximum(u16::from(MOUSE_BUTTON_COUNT))
        .logical_minimum(0)
        .logical_maximum(1)
        .report_count(MOUSE_BUTTON_COUNT)
        .report_size(1)
        .input(MainItemFlags::DATA_VAR_ABS)
        .padding(8 - MOUSE_BUTTON_COUNT % 8, 1)
        .usage_page(usage_page::GENERIC_DESKTOP)
        .usage(usage::X)
        .usage(usage::Y)
        .usage(usage::WHEEL)
        .logical_minimum(-127)
        .logical_maximum(127)
        .report_count(3)
        .report_size(8)
        .input(axes)
        .usage_page(usage_page::CONSUMER)
        .usage(usage::AC_PAN)
        .report_count(1)
        .input(MainItemFlags::DATA_VAR_REL)
        .end_collection()
        .end_collection();
    Ok(d.build()?)
}

/// Report descriptor the emulated controller presents to the host.
pub fn build_report_descriptor(
    console: ConsoleType,
    config: &DescriptorConfig,
) -> ProtocolResult<DescriptorBuf> {
    match console {
        ConsoleType::Ps3 => ps3(),
        ConsoleType::Ps4 => ps4(),
        ConsoleType::Universal => universal(config),
        ConsoleType::KeyboardMouse => keyboard_mouse(config),
        ConsoleType::Xbox360 | ConsoleType::XboxOne => {
            Err(ProtocolError::NoReportDescriptor(console))
        }
    }
}
