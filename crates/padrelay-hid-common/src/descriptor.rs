//! HID report descriptor item assembly
//!
//! Encodes HID 1.11 short items. Each item is a prefix byte
//! `tag << 4 | type << 2 | size` followed by 0, 1, 2 or 4 data bytes.
//! Unsigned data (usages, sizes, ids) uses the smallest unsigned width,
//! signed data (logical and physical extents) the smallest signed width, so
//! a logical maximum of 255 is emitted as `26 FF 00`.

use crate::{DescriptorBuf, HidCommonError, HidCommonResult, MAX_DESCRIPTOR_LEN};
use bitflags::bitflags;

const TYPE_MAIN: u8 = 0;
const TYPE_GLOBAL: u8 = 1;
const TYPE_LOCAL: u8 = 2;

const MAIN_INPUT: u8 = 0x8;
const MAIN_OUTPUT: u8 = 0x9;
const MAIN_COLLECTION: u8 = 0xA;
const MAIN_FEATURE: u8 = 0xB;
const MAIN_END_COLLECTION: u8 = 0xC;

const GLOBAL_USAGE_PAGE: u8 = 0x0;
const GLOBAL_LOGICAL_MIN: u8 = 0x1;
const GLOBAL_LOGICAL_MAX: u8 = 0x2;
const GLOBAL_PHYSICAL_MIN: u8 = 0x3;
const GLOBAL_PHYSICAL_MAX: u8 = 0x4;
const GLOBAL_UNIT: u8 = 0x6;
const GLOBAL_REPORT_SIZE: u8 = 0x7;
const GLOBAL_REPORT_ID: u8 = 0x8;
const GLOBAL_REPORT_COUNT: u8 = 0x9;

const LOCAL_USAGE: u8 = 0x0;
const LOCAL_USAGE_MIN: u8 = 0x1;
const LOCAL_USAGE_MAX: u8 = 0x2;

/// Usage pages referenced by the console descriptors.
pub mod usage_page {
    pub const GENERIC_DESKTOP: u16 = 0x01;
    pub const KEYBOARD: u16 = 0x07;
    pub const LEDS: u16 = 0x08;
    pub const BUTTON: u16 = 0x09;
    pub const CONSUMER: u16 = 0x0C;
    pub const VENDOR: u16 = 0xFF00;
}

/// Generic desktop and consumer usages referenced by the console descriptors.
pub mod usage {
    pub const POINTER: u16 = 0x01;
    pub const MOUSE: u16 = 0x02;
    pub const GAMEPAD: u16 = 0x05;
    pub const KEYBOARD: u16 = 0x06;
    pub const X: u16 = 0x30;
    pub const Y: u16 = 0x31;
    pub const Z: u16 = 0x32;
    pub const RX: u16 = 0x33;
    pub const RY: u16 = 0x34;
    pub const RZ: u16 = 0x35;
    pub const WHEEL: u16 = 0x38;
    pub const HAT_SWITCH: u16 = 0x39;
    pub const AC_PAN: u16 = 0x0238;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collection {
    Physical = 0x00,
    Application = 0x01,
    Logical = 0x02,
}

bitflags! {
    /// Data bits of Input, Output and Feature main items.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct MainItemFlags: u8 {
        const CONSTANT = 0x01;
        const VARIABLE = 0x02;
        const RELATIVE = 0x04;
        const WRAP = 0x08;
        const NON_LINEAR = 0x10;
        const NO_PREFERRED = 0x20;
        const NULL_STATE = 0x40;
        const VOLATILE = 0x80;
    }
}

impl MainItemFlags {
    /// Data, Variable, Absolute.
    pub const DATA_VAR_ABS: Self = Self::VARIABLE;
    /// Data, Variable, Relative.
    pub const DATA_VAR_REL: Self = Self::VARIABLE.union(Self::RELATIVE);
    /// Constant padding.
    pub const PADDING: Self = Self::CONSTANT.union(Self::VARIABLE);
    /// Data, Array, Absolute.
    pub const DATA_ARRAY: Self = Self::empty();
}

/// Builder for HID report descriptors.
#[derive(Debug, Clone, Default)]
pub struct DescriptorBuilder {
    buffer: DescriptorBuf,
    overflowed: bool,
    depth: i16,
}

impl DescriptorBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&mut self, byte: u8) {
        if self.buffer.push(byte).is_err() {
            self.overflowed = true;
        }
    }

    fn item(&mut self, tag: u8, kind: u8, data: &[u8]) -> &mut Self {
        let size_code = match data.len() {
            0 => 0,
            1 => 1,
            2 => 2,
            _ => 3,
        };
        self.push((tag << 4) | (kind << 2) | size_code);
        for &b in data {
            self.push(b);
        }
        self
    }

    fn unsigned_item(&mut self, tag: u8, kind: u8, value: u32) -> &mut Self {
        let bytes = value.to_le_bytes();
        let len = if value <= 0xFF {
            1
        } else if value <= 0xFFFF {
            2
        } else {
            4
        };
        self.item(tag, kind, &bytes[..len])
    }

    fn signed_item(&mut self, tag: u8, kind: u8, value: i32) -> &mut Self {
        let bytes = value.to_le_bytes();
        let len = if i8::try_from(value).is_ok() {
            1
        } else if i16::try_from(value).is_ok() {
            2
        } else {
            4
        };
        self.item(tag, kind, &bytes[..len])
    }

    pub fn usage_page(&mut self, page: u16) -> &mut Self {
        self.unsigned_item(GLOBAL_USAGE_PAGE, TYPE_GLOBAL, u32::from(page))
    }

    pub fn usage(&mut self, usage: u16) -> &mut Self {
        self.unsigned_item(LOCAL_USAGE, TYPE_LOCAL, u32::from(usage))
    }

    pub fn usage_minimum(&mut self, usage: u16) -> &mut Self {
        self.unsigned_item(LOCAL_USAGE_MIN, TYPE_LOCAL, u32::from(usage))
    }

    pub fn usage_maximum(&mut self, usage: u16) -> &mut Self {
        self.unsigned_item(LOCAL_USAGE_MAX, TYPE_LOCAL, u32::from(usage))
    }

    pub fn logical_minimum(&mut self, value: i32) -> &mut Self {
        self.signed_item(GLOBAL_LOGICAL_MIN, TYPE_GLOBAL, value)
    }

    pub fn logical_maximum(&mut self, value: i32) -> &mut Self {
        self.signed_item(GLOBAL_LOGICAL_MAX, TYPE_GLOBAL, value)
    }

    pub fn physical_minimum(&mut self, value: i32) -> &mut Self {
        self.signed_item(GLOBAL_PHYSICAL_MIN, TYPE_GLOBAL, value)
    }

    pub fn physical_maximum(&mut self, value: i32) -> &mut Self {
        self.signed_item(GLOBAL_PHYSICAL_MAX, TYPE_GLOBAL, value)
    }

    pub fn unit(&mut self, unit: u32) -> &mut Self {
        self.unsigned_item(GLOBAL_UNIT, TYPE_GLOBAL, unit)
    }

    pub fn report_size(&mut self, bits: u8) -> &mut Self {
        self.unsigned_item(GLOBAL_REPORT_SIZE, TYPE_GLOBAL, u32::from(bits))
    }

    pub fn report_count(&mut self, count: u8) -> &mut Self {
        self.unsigned_item(GLOBAL_REPORT_COUNT, TYPE_GLOBAL, u32::from(count))
    }

    pub fn report_id(&mut self, id: u8) -> &mut Self {
        self.unsigned_item(GLOBAL_REPORT_ID, TYPE_GLOBAL, u32::from(id))
    }

    pub fn collection(&mut self, kind: Collection) -> &mut Self {
        self.depth = self.depth.saturating_add(1);
        self.item(MAIN_COLLECTION, TYPE_MAIN, &[kind as u8])
    }

    pub fn end_collection(&mut self) -> &mut Self {
        self.depth = self.depth.saturating_sub(1);
        self.item(MAIN_END_COLLECTION, TYPE_MAIN, &[])
    }

    pub fn input(&mut self, flags: MainItemFlags) -> &mut Self {
        self.item(MAIN_INPUT, TYPE_MAIN, &[flags.bits()])
    }

    pub fn output(&mut self, flags: MainItemFlags) -> &mut Self {
        self.item(MAIN_OUTPUT, TYPE_MAIN, &[flags.bits()])
    }

    pub fn feature(&mut self, flags: MainItemFlags) -> &mut Self {
        self.item(MAIN_FEATURE, TYPE_MAIN, &[flags.bits()])
    }

    /// `count` constant bits of `size` each.
    pub fn padding(&mut self, size: u8, count: u8) -> &mut Self {
        self.report_size(size)
            .report_count(count)
            .input(MainItemFlags::PADDING)
    }

    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.buffer
    }

    pub fn build(self) -> HidCommonResult<DescriptorBuf> {
        if self.overflowed {
            return Err(HidCommonError::DescriptorOverflow {
                capacity: MAX_DESCRIPTOR_LEN,
            });
        }
        if self.depth != 0 {
            return Err(HidCommonError::UnbalancedCollection { open: self.depth });
        }
        Ok(self.buffer)
    }
}
