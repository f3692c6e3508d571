//! Closed identifier tables: keyboard usages, mouse buttons, gamepad buttons,
//! hat directions, and gamepad axes.
//!
//! Keyboard codes are USB HID usages on the Keyboard/Keypad page (0x07).
//! Every lookup by name or number fails with a typed error instead of falling
//! back to code 0.

use crate::error::{Error, Result};

macro_rules! key_table {
    ($($variant:ident = $code:literal, $name:literal;)*) => {
        /// Keyboard key, identified by its HID usage on page 0x07.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        #[repr(u8)]
        pub enum Key {
            $($variant = $code,)*
        }

        impl Key {
            /// Every key in the table.
            pub const ALL: &'static [Key] = &[$(Key::$variant,)*];

            /// Look up a key from its HID usage code.
            pub fn from_code(code: u8) -> Result<Self> {
                match code {
                    $($code => Ok(Key::$variant),)*
                    other => Err(Error::InvalidKeyCode(format!("0x{other:02X}"))),
                }
            }

            /// Canonical upper-case name.
            pub fn name(self) -> &'static str {
                match self {
                    $(Key::$variant => $name,)*
                }
            }

            fn from_canonical(name: &str) -> Option<Self> {
                match name {
                    $($name => Some(Key::$variant),)*
                    _ => None,
                }
            }
        }
    };
}

key_table! {
    A = 0x04, "A";
    B = 0x05, "B";
    C = 0x06, "C";
    D = 0x07, "D";
    E = 0x08, "E";
    F = 0x09, "F";
    G = 0x0A, "G";
    H = 0x0B, "H";
    I = 0x0C, "I";
    J = 0x0D, "J";
    K = 0x0E, "K";
    L = 0x0F, "L";
    M = 0x10, "M";
    N = 0x11, "N";
    O = 0x12, "O";
    P = 0x13, "P";
    Q = 0x14, "Q";
    R = 0x15, "R";
    S = 0x16, "S";
    T = 0x17, "T";
    U = 0x18, "U";
    V = 0x19, "V";
    W = 0x1A, "W";
    X = 0x1B, "X";
    Y = 0x1C, "Y";
    Z = 0x1D, "Z";
    Key1 = 0x1E, "KEY_1";
    Key2 = 0x1F, "KEY_2";
    Key3 = 0x20, "KEY_3";
    Key4 = 0x21, "KEY_4";
    Key5 = 0x22, "KEY_5";
    Key6 = 0x23, "KEY_6";
    Key7 = 0x24, "KEY_7";
    Key8 = 0x25, "KEY_8";
    Key9 = 0x26, "KEY_9";
    Key0 = 0x27, "KEY_0";
    Enter = 0x28, "ENTER";
    Esc = 0x29, "ESC";
    Backspace = 0x2A, "BACKSPACE";
    Tab = 0x2B, "TAB";
    Space = 0x2C, "SPACE";
    Minus = 0x2D, "MINUS";
    Equal = 0x2E, "EQUAL";
    LeftBrace = 0x2F, "LEFTBRACE";
    RightBrace = 0x30, "RIGHTBRACE";
    Backslash = 0x31, "BACKSLASH";
    Semicolon = 0x33, "SEMICOLON";
    Quote = 0x34, "QUOTE";
    Tilde = 0x35, "TILDE";
    Comma = 0x36, "COMMA";
    Period = 0x37, "PERIOD";
    Slash = 0x38, "SLASH";
    CapsLock = 0x39, "CAPSLOCK";
    F1 = 0x3A, "F1";
    F2 = 0x3B, "F2";
    F3 = 0x3C, "F3";
    F4 = 0x3D, "F4";
    F5 = 0x3E, "F5";
    F6 = 0x3F, "F6";
    F7 = 0x40, "F7";
    F8 = 0x41, "F8";
    F9 = 0x42, "F9";
    F10 = 0x43, "F10";
    F11 = 0x44, "F11";
    F12 = 0x45, "F12";
    PrintScreen = 0x46, "PRINTSCREEN";
    ScrollLock = 0x47, "SCROLLLOCK";
    Pause = 0x48, "PAUSE";
    Insert = 0x49, "INSERT";
    Home = 0x4A, "HOME";
    PageUp = 0x4B, "PAGEUP";
    Delete = 0x4C, "DELETE";
    End = 0x4D, "END";
    PageDown = 0x4E, "PAGEDOWN";
    Right = 0x4F, "RIGHT";
    Left = 0x50, "LEFT";
    Down = 0x51, "DOWN";
    Up = 0x52, "UP";
    KpEnter = 0x58, "KPENTER";
    Kp1 = 0x59, "KP1";
    Kp2 = 0x5A, "KP2";
    Kp3 = 0x5B, "KP3";
    Kp4 = 0x5C, "KP4";
    Kp5 = 0x5D, "KP5";
    Kp6 = 0x5E, "KP6";
    Kp7 = 0x5F, "KP7";
    Kp8 = 0x60, "KP8";
    Kp9 = 0x61, "KP9";
    Kp0 = 0x62, "KP0";
    KpDecimal = 0x63, "KPDECIMAL";
    LCtrl = 0xE0, "LCTRL";
    LShift = 0xE1, "LSHIFT";
    LAlt = 0xE2, "LALT";
    LGui = 0xE3, "LGUI";
    RCtrl = 0xE4, "RCTRL";
    RShift = 0xE5, "RSHIFT";
    RAlt = 0xE6, "RALT";
    RGui = 0xE7, "RGUI";
}

/// Modifier bits in byte 0 of a keyboard payload.
pub mod modifiers {
    pub const LCTRL: u8 = 0x01;
    pub const LSHIFT: u8 = 0x02;
    pub const LALT: u8 = 0x04;
    pub const LGUI: u8 = 0x08;
    pub const RCTRL: u8 = 0x10;
    pub const RSHIFT: u8 = 0x20;
    pub const RALT: u8 = 0x40;
    pub const RGUI: u8 = 0x80;
}

impl Key {
    /// HID usage code.
    pub fn code(self) -> u8 {
        self as u8
    }

    /// Whether this key is reported through the modifier mask.
    pub fn is_modifier(self) -> bool {
        self.modifier_bit().is_some()
    }

    /// Modifier mask bit for Ctrl/Shift/Alt/GUI keys, `None` for all others.
    ///
    /// Usages 0xE0..=0xE7 map to bits 0..=7 in order.
    pub fn modifier_bit(self) -> Option<u8> {
        let code = self.code();
        (0xE0..=0xE7).contains(&code).then(|| 1u8 << (code - 0xE0))
    }

    /// Parse a key from a name (case-insensitive).
    ///
    /// Accepts the canonical table names (`A`, `KEY_1`, `PAGEUP`, `LCTRL`, ...),
    /// bare digits (`"1"`), and a few common spellings (`CTRL`, `SHIFT`, `ALT`,
    /// `WIN`, `ESCAPE`, `RETURN`, `DEL`).
    pub fn from_name(name: &str) -> Result<Self> {
        let upper = name.trim().to_ascii_uppercase();
        if let Some(key) = Self::from_canonical(&upper) {
            return Ok(key);
        }
        let alias = match upper.as_str() {
            "0" => Some(Key::Key0),
            "1" => Some(Key::Key1),
            "2" => Some(Key::Key2),
            "3" => Some(Key::Key3),
            "4" => Some(Key::Key4),
            "5" => Some(Key::Key5),
            "6" => Some(Key::Key6),
            "7" => Some(Key::Key7),
            "8" => Some(Key::Key8),
            "9" => Some(Key::Key9),
            "CTRL" => Some(Key::LCtrl),
            "SHIFT" => Some(Key::LShift),
            "ALT" => Some(Key::LAlt),
            "GUI" | "WIN" | "SUPER" => Some(Key::LGui),
            "ESCAPE" => Some(Key::Esc),
            "RETURN" => Some(Key::Enter),
            "DEL" => Some(Key::Delete),
            _ => None,
        };
        alias.ok_or_else(|| Error::InvalidKeyCode(name.to_string()))
    }
}

impl std::fmt::Display for Key {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Mouse button, identified by its bit in the buttons byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum MouseButton {
    Left = 0x01,
    Right = 0x02,
    Middle = 0x04,
    Back = 0x08,
    Forward = 0x10,
}

impl MouseButton {
    /// All buttons.
    pub const ALL: &'static [MouseButton] = &[
        MouseButton::Left,
        MouseButton::Right,
        MouseButton::Middle,
        MouseButton::Back,
        MouseButton::Forward,
    ];

    /// Bit in the buttons mask.
    pub fn bit(self) -> u8 {
        self as u8
    }

    /// Look up a button from its single-bit mask value.
    pub fn from_bit(bit: u8) -> Result<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|b| b.bit() == bit)
            .ok_or_else(|| Error::InvalidButton(format!("mouse bit 0x{bit:02X}")))
    }

    /// Parse a button name (case-insensitive).
    pub fn from_name(name: &str) -> Result<Self> {
        match name.trim().to_lowercase().as_str() {
            "left" | "l" => Ok(Self::Left),
            "right" | "r" => Ok(Self::Right),
            "middle" | "m" => Ok(Self::Middle),
            "back" | "x1" => Ok(Self::Back),
            "forward" | "x2" => Ok(Self::Forward),
            _ => Err(Error::InvalidButton(name.to_string())),
        }
    }

    /// Human-readable label.
    pub fn label(self) -> &'static str {
        match self {
            Self::Left => "Left",
            Self::Right => "Right",
            Self::Middle => "Middle",
            Self::Back => "Back",
            Self::Forward => "Forward",
        }
    }
}

/// Number of gamepad buttons carried by the 32-bit button mask.
pub const GAMEPAD_BUTTON_COUNT: u8 = 32;

/// Gamepad button, identified by its bit index in the 32-bit mask.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GamepadButton(u8);

impl GamepadButton {
    pub const A: Self = Self(0);
    pub const B: Self = Self(1);
    pub const C: Self = Self(2);
    pub const X: Self = Self(3);
    pub const Y: Self = Self(4);
    pub const Z: Self = Self(5);
    pub const SOUTH: Self = Self::A;
    pub const EAST: Self = Self::B;
    pub const NORTH: Self = Self::X;
    pub const WEST: Self = Self::Y;
    /// Left shoulder.
    pub const TL: Self = Self(6);
    /// Right shoulder.
    pub const TR: Self = Self(7);
    /// Left trigger button.
    pub const TL2: Self = Self(8);
    /// Right trigger button.
    pub const TR2: Self = Self(9);
    pub const SELECT: Self = Self(10);
    pub const START: Self = Self(11);
    pub const MODE: Self = Self(12);
    /// Left stick press.
    pub const THUMBL: Self = Self(13);
    /// Right stick press.
    pub const THUMBR: Self = Self(14);

    /// Button by bit index (0..=31).
    pub fn new(index: u8) -> Result<Self> {
        if index < GAMEPAD_BUTTON_COUNT {
            Ok(Self(index))
        } else {
            Err(Error::InvalidButton(format!(
                "gamepad button {index} (allowed 0..={})",
                GAMEPAD_BUTTON_COUNT - 1
            )))
        }
    }

    /// Bit index.
    pub fn index(self) -> u8 {
        self.0
    }

    /// Mask with only this button's bit set.
    pub fn mask(self) -> u32 {
        1u32 << self.0
    }

    /// Parse a button from a name or bit index (case-insensitive).
    ///
    /// Accepts `a`, `south`, `start`, `thumbl`, ... as well as `0`..`31` and
    /// `button_0`..`button_31`.
    pub fn from_name(name: &str) -> Result<Self> {
        let lower = name.trim().to_lowercase();
        let named = match lower.as_str() {
            "a" | "south" => Some(Self::A),
            "b" | "east" => Some(Self::B),
            "c" => Some(Self::C),
            "x" | "north" => Some(Self::X),
            "y" | "west" => Some(Self::Y),
            "z" => Some(Self::Z),
            "tl" | "lb" => Some(Self::TL),
            "tr" | "rb" => Some(Self::TR),
            "tl2" | "lt" => Some(Self::TL2),
            "tr2" | "rt" => Some(Self::TR2),
            "select" | "back" => Some(Self::SELECT),
            "start" => Some(Self::START),
            "mode" | "home" => Some(Self::MODE),
            "thumbl" | "ls" => Some(Self::THUMBL),
            "thumbr" | "rs" => Some(Self::THUMBR),
            _ => None,
        };
        if let Some(button) = named {
            return Ok(button);
        }
        let digits = lower.strip_prefix("button_").unwrap_or(&lower);
        digits
            .parse::<u8>()
            .map_err(|_| Error::InvalidButton(name.to_string()))
            .and_then(Self::new)
    }
}

/// Hat switch position: centered or one of eight compass points, clockwise
/// from up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u8)]
pub enum HatDirection {
    #[default]
    Centered = 0,
    Up = 1,
    UpRight = 2,
    Right = 3,
    DownRight = 4,
    Down = 5,
    DownLeft = 6,
    Left = 7,
    UpLeft = 8,
}

impl HatDirection {
    /// All positions in wire order.
    pub const ALL: &'static [HatDirection] = &[
        HatDirection::Centered,
        HatDirection::Up,
        HatDirection::UpRight,
        HatDirection::Right,
        HatDirection::DownRight,
        HatDirection::Down,
        HatDirection::DownLeft,
        HatDirection::Left,
        HatDirection::UpLeft,
    ];

    /// Look up a position from its wire value (0..=8).
    pub fn from_u8(value: u8) -> Result<Self> {
        Self::ALL
            .get(value as usize)
            .copied()
            .ok_or_else(|| Error::InvalidHat(value.to_string()))
    }

    /// Wire value.
    pub fn as_u8(self) -> u8 {
        self as u8
    }

    /// Parse a direction name (case-insensitive), e.g. `up`, `down-left`, `center`.
    pub fn from_name(name: &str) -> Result<Self> {
        let normalized = name.trim().to_lowercase().replace(['_', ' '], "-");
        match normalized.as_str() {
            "center" | "centered" | "none" => Ok(Self::Centered),
            "up" | "n" => Ok(Self::Up),
            "up-right" | "ne" => Ok(Self::UpRight),
            "right" | "e" => Ok(Self::Right),
            "down-right" | "se" => Ok(Self::DownRight),
            "down" | "s" => Ok(Self::Down),
            "down-left" | "sw" => Ok(Self::DownLeft),
            "left" | "w" => Ok(Self::Left),
            "up-left" | "nw" => Ok(Self::UpLeft),
            _ => match normalized.parse::<u8>() {
                Ok(v) => Self::from_u8(v),
                Err(_) => Err(Error::InvalidHat(name.to_string())),
            },
        }
    }
}

/// Gamepad analog axis, in wire order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GamepadAxis {
    /// Left stick X.
    X,
    /// Left stick Y.
    Y,
    /// Right stick X.
    Z,
    /// Right stick Y.
    Rz,
    /// Left trigger.
    Rx,
    /// Right trigger.
    Ry,
}

impl GamepadAxis {
    /// All axes in wire order.
    pub const ALL: &'static [GamepadAxis] = &[
        GamepadAxis::X,
        GamepadAxis::Y,
        GamepadAxis::Z,
        GamepadAxis::Rz,
        GamepadAxis::Rx,
        GamepadAxis::Ry,
    ];

    /// Position of this axis within the gamepad payload.
    pub fn index(self) -> usize {
        match self {
            Self::X => 0,
            Self::Y => 1,
            Self::Z => 2,
            Self::Rz => 3,
            Self::Rx => 4,
            Self::Ry => 5,
        }
    }

    /// Parse an axis name (case-insensitive): raw names (`x`, `rz`) or
    /// role names (`left-x`, `right-y`, `left-trigger`).
    pub fn from_name(name: &str) -> Result<Self> {
        let normalized = name.trim().to_lowercase().replace(['_', ' '], "-");
        match normalized.as_str() {
            "x" | "left-x" => Ok(Self::X),
            "y" | "left-y" => Ok(Self::Y),
            "z" | "right-x" => Ok(Self::Z),
            "rz" | "right-y" => Ok(Self::Rz),
            "rx" | "left-trigger" | "lt" => Ok(Self::Rx),
            "ry" | "right-trigger" | "rt" => Ok(Self::Ry),
            _ => Err(Error::InvalidUsage(format!("gamepad axis '{name}'"))),
        }
    }
}
