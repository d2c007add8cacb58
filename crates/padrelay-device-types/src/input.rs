//! Canonical controller input state

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

bitflags! {
    /// Digital buttons by position rather than by console label.
    ///
    /// South is cross/A, east is circle/B, west is square/X and north is
    /// triangle/Y.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    pub struct Buttons: u32 {
        const SOUTH = 1 << 0;
        const EAST = 1 << 1;
        const WEST = 1 << 2;
        const NORTH = 1 << 3;
        const LEFT_SHOULDER = 1 << 4;
        const RIGHT_SHOULDER = 1 << 5;
        const LEFT_TRIGGER = 1 << 6;
        const RIGHT_TRIGGER = 1 << 7;
        const SELECT = 1 << 8;
        const START = 1 << 9;
        const LEFT_STICK = 1 << 10;
        const RIGHT_STICK = 1 << 11;
        const GUIDE = 1 << 12;
        const CAPTURE = 1 << 13;
        const SYNC = 1 << 14;
    }
}

/// Hat switch / D-pad direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Hat {
    Up,
    UpRight,
    Right,
    DownRight,
    Down,
    DownLeft,
    Left,
    UpLeft,
    #[default]
    Neutral,
}

/// Individual D-pad switches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Dpad {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

impl Hat {
    /// Null state used by every hat-based report layout.
    pub const NEUTRAL_NIBBLE: u8 = 0x08;

    pub const ALL: [Hat; 9] = [
        Hat::Up,
        Hat::UpRight,
        Hat::Right,
        Hat::DownRight,
        Hat::Down,
        Hat::DownLeft,
        Hat::Left,
        Hat::UpLeft,
        Hat::Neutral,
    ];

    /// Values 8..=15 are all treated as the null state.
    pub fn from_nibble(value: u8) -> Self {
        match value & 0x0F {
            0 => Hat::Up,
            1 => Hat::UpRight,
            2 => Hat::Right,
            3 => Hat::DownRight,
            4 => Hat::Down,
            5 => Hat::DownLeft,
            6 => Hat::Left,
            7 => Hat::UpLeft,
            _ => Hat::Neutral,
        }
    }

    pub fn to_nibble(self) -> u8 {
        match self {
            Hat::Up => 0,
            Hat::UpRight => 1,
            Hat::Right => 2,
            Hat::DownRight => 3,
            Hat::Down => 4,
            Hat::DownLeft => 5,
            Hat::Left => 6,
            Hat::UpLeft => 7,
            Hat::Neutral => Self::NEUTRAL_NIBBLE,
        }
    }

    /// Opposing switches pressed together cancel out.
    pub fn from_dpad(dpad: Dpad) -> Self {
        let vertical = match (dpad.up, dpad.down) {
            (true, false) => 1i8,
            (false, true) => -1,
            _ => 0,
        };
        let horizontal = match (dpad.left, dpad.right) {
            (false, true) => 1i8,
            (true, false) => -1,
            _ => 0,
        };
        match (vertical, horizontal) {
            (1, 0) => Hat::Up,
            (1, 1) => Hat::UpRight,
            (0, 1) => Hat::Right,
            (-1, 1) => Hat::DownRight,
            (-1, 0) => Hat::Down,
            (-1, -1) => Hat::DownLeft,
            (0, -1) => Hat::Left,
            (1, -1) => Hat::UpLeft,
            _ => Hat::Neutral,
        }
    }

    pub fn dpad(self) -> Dpad {
        let (up, down, left, right) = match self {
            Hat::Up => (true, false, false, false),
            Hat::UpRight => (true, false, false, true),
            Hat::Right => (false, false, false, true),
            Hat::DownRight => (false, true, false, true),
            Hat::Down => (false, true, false, false),
            Hat::DownLeft => (false, true, true, false),
            Hat::Left => (false, false, true, false),
            Hat::UpLeft => (true, false, true, false),
            Hat::Neutral => (false, false, false, false),
        };
        Dpad {
            up,
            down,
            left,
            right,
        }
    }
}

/// Analog stick, centred at zero; positive y points down as in HID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Stick {
    pub x: i16,
    pub y: i16,
}

impl Stick {
    pub const CENTER: Stick = Stick { x: 0, y: 0 };

    pub fn new(x: i16, y: i16) -> Self {
        Self { x, y }
    }
}

/// Pressure-sensitive buttons; L2/R2 pressure is carried by the triggers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Pressure {
    pub dpad_up: u8,
    pub dpad_right: u8,
    pub dpad_down: u8,
    pub dpad_left: u8,
    pub north: u8,
    pub east: u8,
    pub south: u8,
    pub west: u8,
    pub left_shoulder: u8,
    pub right_shoulder: u8,
}

impl Pressure {
    fn max(self, other: Self) -> Self {
        Self {
            dpad_up: self.dpad_up.max(other.dpad_up),
            dpad_right: self.dpad_right.max(other.dpad_right),
            dpad_down: self.dpad_down.max(other.dpad_down),
            dpad_left: self.dpad_left.max(other.dpad_left),
            north: self.north.max(other.north),
            east: self.east.max(other.east),
            south: self.south.max(other.south),
            west: self.west.max(other.west),
            left_shoulder: self.left_shoulder.max(other.left_shoulder),
            right_shoulder: self.right_shoulder.max(other.right_shoulder),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Motion {
    pub accel: [i16; 3],
    pub gyro: [i16; 3],
}

impl Motion {
    pub fn is_at_rest(&self) -> bool {
        *self == Self::default()
    }
}

/// One touchpad contact with 12-bit coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct TouchPoint {
    pub active: bool,
    pub id: u8,
    pub x: u16,
    pub y: u16,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct KeyboardState {
    pub modifiers: u8,
    pub keys: [u8; 6],
}

impl KeyboardState {
    pub fn is_idle(&self) -> bool {
        *self == Self::default()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct MouseState {
    pub buttons: u8,
    pub x: i8,
    pub y: i8,
    pub wheel: i8,
    pub pan: i8,
}

impl MouseState {
    pub fn is_idle(&self) -> bool {
        *self == Self::default()
    }
}

/// Protocol-agnostic snapshot of one controller.
///
/// `Default` is the neutral state: nothing pressed, sticks centred, triggers
/// released, no motion, no touch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct CanonicalInputState {
    pub buttons: Buttons,
    pub hat: Hat,
    pub left_stick: Stick,
    pub right_stick: Stick,
    pub left_trigger: u16,
    pub right_trigger: u16,
    pub pressure: Pressure,
    pub motion: Motion,
    pub touch: [TouchPoint; 2],
    pub keyboard: KeyboardState,
    pub mouse: MouseState,
    pub battery: u8,
}

impl CanonicalInputState {
    pub fn neutral() -> Self {
        Self::default()
    }

    pub fn is_neutral(&self) -> bool {
        *self == Self::default()
    }

    pub fn with_buttons(mut self, buttons: Buttons) -> Self {
        self.buttons = buttons;
        self
    }

    pub fn with_hat(mut self, hat: Hat) -> Self {
        self.hat = hat;
        self
    }

    pub fn with_sticks(mut self, left: Stick, right: Stick) -> Self {
        self.left_stick = left;
        self.right_stick = right;
        self
    }

    pub fn with_triggers(mut self, left: u16, right: u16) -> Self {
        self.left_trigger = left;
        self.right_trigger = right;
        self
    }

    pub fn pressed(&self, button: Buttons) -> bool {
        self.buttons.contains(button)
    }

    /// Folds `other` into `self` so several controllers drive one host report.
    ///
    /// Buttons are OR-ed, the first non-neutral hat wins, each axis keeps the
    /// larger deflection, triggers and pressures keep the maximum. Motion,
    /// touch, keyboard and mouse come from the first state that carries them.
    pub fn merge(&mut self, other: &Self) {
        self.buttons |= other.buttons;
        if self.hat == Hat::Neutral {
            self.hat = other.hat;
        }
        self.left_stick = merge_stick(self.left_stick, other.left_stick);
        self.right_stick = merge_stick(self.right_stick, other.right_stick);
        self.left_trigger = self.left_trigger.max(other.left_trigger);
        self.right_trigger = self.right_trigger.max(other.right_trigger);
        self.pressure = self.pressure.max(other.pressure);
        if self.motion.is_at_rest() {
            self.motion = other.motion;
        }
        if !self.touch.iter().any(|t| t.active) {
            self.touch = other.touch;
        }
        if self.keyboard.is_idle() {
            self.keyboard = other.keyboard;
        }
        if self.mouse.is_idle() {
            self.mouse = other.mouse;
        }
        if self.battery == 0 {
            self.battery = other.battery;
        }
    }
}

fn merge_axis(a: i16, b: i16) -> i16 {
    if b.unsigned_abs() > a.unsigned_abs() { b } else { a }
}

fn merge_stick(a: Stick, b: Stick) -> Stick {
    Stick {
        x: merge_axis(a.x, b.x),
        y: merge_axis(a.y, b.y),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hat_nibble_mapping() {
        for hat in Hat::ALL {
            assert_eq!(Hat::from_nibble(hat.to_nibble()), hat);
        }
        assert_eq!(Hat::from_nibble(0x0F), Hat::Neutral);
        assert_eq!(Hat::from_nibble(0x18), Hat::Neutral);
        assert_eq!(Hat::from_nibble(0x12), Hat::Right);
    }

    #[test]
    fn test_hat_dpad_mapping() {
        for hat in Hat::ALL {
            assert_eq!(Hat::from_dpad(hat.dpad()), hat);
        }
        let conflicting = Dpad {
            up: true,
            down: true,
            left: false,
            right: true,
        };
        assert_eq!(Hat::from_dpad(conflicting), Hat::Right);
    }

    #[test]
    fn test_default_is_neutral() {
        let state = CanonicalInputState::neutral();
        assert!(state.is_neutral());
        assert_eq!(state.hat, Hat::Neutral);
        assert!(!state.pressed(Buttons::SOUTH));
    }

    #[test]
    fn test_merge_combines_controllers() {
        let mut a = CanonicalInputState::neutral()
            .with_buttons(Buttons::SOUTH)
            .with_sticks(Stick::new(100, -5), Stick::CENTER)
            .with_triggers(10, 0);
        let b = CanonicalInputState::neutral()
            .with_buttons(Buttons::START)
            .with_hat(Hat::Left)
            .with_sticks(Stick::new(-200, 3), Stick::new(0, 7))
            .with_triggers(5, 900);

        a.merge(&b);

        assert_eq!(a.buttons, Buttons::SOUTH | Buttons::START);
        assert_eq!(a.hat, Hat::Left);
        assert_eq!(a.left_stick, Stick::new(-200, -5));
        assert_eq!(a.right_stick, Stick::new(0, 7));
        assert_eq!((a.left_trigger, a.right_trigger), (10, 900));
    }

    #[test]
    fn test_merge_keeps_first_hat() {
        let mut a = CanonicalInputState::neutral().with_hat(Hat::Up);
        a.merge(&CanonicalInputState::neutral().with_hat(Hat::Down));
        assert_eq!(a.hat, Hat::Up);
    }

    #[test]
    fn test_merge_extreme_axis() {
        let mut a = CanonicalInputState::neutral().with_sticks(Stick::new(i16::MAX, 0), Stick::CENTER);
        a.merge(&CanonicalInputState::neutral().with_sticks(Stick::new(i16::MIN, 0), Stick::CENTER));
        assert_eq!(a.left_stick.x, i16::MIN);
    }

    #[test]
    fn test_state_serde() -> Result<(), Box<dyn std::error::Error>> {
        let state = CanonicalInputState::neutral()
            .with_buttons(Buttons::NORTH | Buttons::GUIDE)
            .with_hat(Hat::DownLeft);
        let json = serde_json::to_string(&state)?;
        let back: CanonicalInputState = serde_json::from_str(&json)?;
        assert_eq!(back, state);
        Ok(())
    }
}
