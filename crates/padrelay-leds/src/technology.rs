//! LED technologies and their wire packing

use crate::{LedColor, LedValue};
use core::fmt;

/// Bytes produced for one hardware write.
pub type LedFrame = heapless::Vec<u8, 16>;

/// How one LED technology stores colours and packs them for the bus.
pub trait LedTechnology {
    type Color: Copy + PartialEq + Default + fmt::Debug;

    const NAME: &'static str;

    /// LEDs that share one hardware write.
    const GROUP_LEN: usize;

    /// Whether the global brightness changes the packed bytes.
    const USES_BRIGHTNESS: bool = false;

    fn color(value: LedValue) -> Self::Color;

    /// Packs one group (`GROUP_LEN` colours, fewer for a short tail group).
    fn pack(group: &[Self::Color], brightness: u8, out: &mut LedFrame);
}

fn push_all(out: &mut LedFrame, bytes: &[u8]) {
    // frames are sized for the largest group
    if out.extend_from_slice(bytes).is_err() {
        tracing::warn!("LED frame overflow, {} bytes dropped", bytes.len());
    }
}

/// APA102 / SK9822 colour with a per-LED brightness level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Apa102Color {
    pub brightness: u8,
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

/// Clocked RGB LEDs with a 5-bit brightness field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Apa102;

impl Apa102 {
    /// Start bits of every LED frame.
    pub const FRAME_START: u8 = 0xE0;
}

impl LedTechnology for Apa102 {
    type Color = Apa102Color;

    const NAME: &'static str = "apa102";
    const GROUP_LEN: usize = 1;
    const USES_BRIGHTNESS: bool = true;

    fn color(value: LedValue) -> Self::Color {
        let c = value.rgb();
        Apa102Color {
            brightness: if c == LedColor::OFF { 0 } else { u8::MAX },
            r: c.r,
            g: c.g,
            b: c.b,
        }
    }

    fn pack(group: &[Self::Color], brightness: u8, out: &mut LedFrame) {
        for c in group {
            let scaled = (u16::from(c.brightness) * u16::from(brightness) / 255) as u8;
            push_all(out, &[Self::FRAME_START | (scaled >> 3), c.b, c.g, c.r]);
        }
    }
}

/// One colour channel as four SPI bytes, two data bits per byte.
pub type Ws2812Channel = [u8; 4];

/// WS2812 colour already expanded to its SPI bit patterns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ws2812Color {
    pub r: Ws2812Channel,
    pub g: Ws2812Channel,
    pub b: Ws2812Channel,
}

impl Default for Ws2812Color {
    fn default() -> Self {
        Ws2812Spi::encode(LedColor::OFF)
    }
}

/// WS2812 driven from an SPI MOSI line; every pair of data bits becomes one
/// SPI byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Ws2812Spi;

impl Ws2812Spi {
    /// SPI byte for data bits `00`, `01`, `10`, `11`.
    pub const BITS: [u8; 4] = [0x88, 0x8E, 0xE8, 0xEE];

    pub fn encode_channel(value: u8) -> Ws2812Channel {
        let mut out = [0u8; 4];
        for (i, slot) in out.iter_mut().enumerate() {
            let pair = (value >> (6 - 2 * i)) & 0x03;
            *slot = Self::BITS[usize::from(pair)];
        }
        out
    }

    pub fn encode(color: LedColor) -> Ws2812Color {
        Ws2812Color {
            r: Self::encode_channel(color.r),
            g: Self::encode_channel(color.g),
            b: Self::encode_channel(color.b),
        }
    }
}

impl LedTechnology for Ws2812Spi {
    type Color = Ws2812Color;

    const NAME: &'static str = "ws2812";
    const GROUP_LEN: usize = 1;

    fn color(value: LedValue) -> Self::Color {
        Self::encode(value.rgb())
    }

    fn pack(group: &[Self::Color], _brightness: u8, out: &mut LedFrame) {
        for c in group {
            push_all(out, &c.g);
            push_all(out, &c.r);
            push_all(out, &c.b);
        }
    }
}

/// Shift-register (STP16 style) LED outputs, eight per byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Stp;

impl LedTechnology for Stp {
    type Color = bool;

    const NAME: &'static str = "stp";
    const GROUP_LEN: usize = 8;

    fn color(value: LedValue) -> Self::Color {
        value.is_lit()
    }

    fn pack(group: &[Self::Color], _brightness: u8, out: &mut LedFrame) {
        push_all(out, &[bitmask(group)]);
    }
}

/// MPR121 GPIO bank; the whole mask is rewritten at once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Mpr121;

impl Mpr121 {
    pub const LED_COUNT: usize = 8;
}

impl LedTechnology for Mpr121 {
    type Color = bool;

    const NAME: &'static str = "mpr121";
    const GROUP_LEN: usize = Self::LED_COUNT;

    fn color(value: LedValue) -> Self::Color {
        value.is_lit()
    }

    fn pack(group: &[Self::Color], _brightness: u8, out: &mut LedFrame) {
        push_all(out, &[bitmask(group)]);
    }
}

fn bitmask(group: &[bool]) -> u8 {
    group
        .iter()
        .take(8)
        .enumerate()
        .filter(|(_, on)| **on)
        .fold(0u8, |acc, (bit, _)| acc | (1 << bit))
}
