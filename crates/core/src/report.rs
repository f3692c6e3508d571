//! Report encoding: held state plus per-call deltas into complete frames.
//!
//! Every frame carries the full current state of its class, never a diff,
//! so a lost frame is corrected by the next one.

use crate::error::Result;
use crate::frame::{
    ReportClass, ReportFrame, GAMEPAD_PAYLOAD_LEN, KEYBOARD_PAYLOAD_LEN, MOUSE_PAYLOAD_LEN,
};
use crate::keys::Key;
use crate::state::{clamp_axis, GamepadState, KeyboardState, MAX_HELD_KEYS};

/// Relative motion carried by one mouse report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MouseDelta {
    pub x: i8,
    pub y: i8,
    pub wheel: i8,
    pub pan: i8,
}

impl MouseDelta {
    /// Pointer motion only.
    pub fn motion(x: i8, y: i8) -> Self {
        Self {
            x,
            y,
            ..Self::default()
        }
    }

    /// Wheel and horizontal pan only.
    pub fn scroll(wheel: i8, pan: i8) -> Self {
        Self {
            wheel,
            pan,
            ..Self::default()
        }
    }
}

/// Mouse payload: buttons, x, y, wheel, pan.
pub fn mouse_payload(buttons: u8, delta: MouseDelta) -> [u8; MOUSE_PAYLOAD_LEN] {
    [
        buttons,
        delta.x as u8,
        delta.y as u8,
        delta.wheel as u8,
        delta.pan as u8,
    ]
}

/// Encode a mouse frame.
pub fn encode_mouse(buttons: u8, delta: MouseDelta) -> Result<ReportFrame> {
    ReportFrame::new(ReportClass::Mouse, &mouse_payload(buttons, delta))
}

/// Keyboard payload: modifier mask, reserved zero, six keycode slots.
pub fn keyboard_payload(modifiers: u8, slots: [u8; MAX_HELD_KEYS]) -> [u8; KEYBOARD_PAYLOAD_LEN] {
    let mut payload = [0u8; KEYBOARD_PAYLOAD_LEN];
    payload[0] = modifiers;
    payload[2..].copy_from_slice(&slots);
    payload
}

/// Encode a keyboard frame from held state.
pub fn encode_keyboard(state: &KeyboardState) -> Result<ReportFrame> {
    ReportFrame::new(
        ReportClass::Keyboard,
        &keyboard_payload(state.modifiers(), state.slots()),
    )
}

/// Encode a one-off keyboard frame from an explicit modifier mask and key list,
/// without consulting held state.
///
/// Modifier keys in `keys` are folded into the mask. Non-modifier keys fill
/// slots in the given order; duplicates and anything past the sixth slot are
/// dropped.
pub fn encode_keyboard_combo(modifiers: u8, keys: &[Key]) -> Result<ReportFrame> {
    let mut mask = modifiers;
    let mut slots = [0u8; MAX_HELD_KEYS];
    let mut used = 0;
    for key in keys {
        if let Some(bit) = key.modifier_bit() {
            mask |= bit;
        } else if used < MAX_HELD_KEYS && !slots[..used].contains(&key.code()) {
            slots[used] = key.code();
            used += 1;
        }
    }
    ReportFrame::new(ReportClass::Keyboard, &keyboard_payload(mask, slots))
}

/// Gamepad payload: six axes, hat, then the button mask little-endian.
pub fn gamepad_payload(state: &GamepadState) -> [u8; GAMEPAD_PAYLOAD_LEN] {
    let mut payload = [0u8; GAMEPAD_PAYLOAD_LEN];
    for (byte, axis) in payload[..6].iter_mut().zip(state.axes()) {
        // Re-clamp so a -128 can never reach the wire.
        *byte = clamp_axis(axis as i32) as u8;
    }
    payload[6] = state.hat().as_u8();
    payload[7..].copy_from_slice(&state.buttons().to_le_bytes());
    payload
}

/// Encode a gamepad frame from held state.
pub fn encode_gamepad(state: &GamepadState) -> Result<ReportFrame> {
    ReportFrame::new(ReportClass::Gamepad, &gamepad_payload(state))
}

/// Receiver routing for physical mouse motion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum MouseToGamepadMode {
    /// Mouse reports pass through unchanged.
    Off = 0,
    /// Mouse motion drives the left stick at full deflection.
    Stick = 1,
    /// Mouse motion is swallowed; the host drives the gamepad itself.
    Manual = 2,
}

impl MouseToGamepadMode {
    /// Parse a mode name or number.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "off" | "0" => Some(Self::Off),
            "stick" | "on" | "1" => Some(Self::Stick),
            "manual" | "2" => Some(Self::Manual),
            _ => None,
        }
    }
}

/// Encode the receiver's mouse-to-gamepad mode switch.
pub fn encode_mouse_to_gamepad(mode: MouseToGamepadMode) -> Result<ReportFrame> {
    ReportFrame::new(ReportClass::MouseToGamepad, &[mode as u8])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::KeyOverflow;
    use crate::keys::{GamepadAxis, GamepadButton, HatDirection, MouseButton};
    use crate::state::MouseState;

    #[test]
    fn mouse_left_with_signed_motion() {
        let mut mouse = MouseState::default();
        mouse.press(MouseButton::Left);
        let payload = mouse_payload(mouse.buttons(), MouseDelta::motion(10, -10));
        assert_eq!(payload, [0x01, 0x0A, 0xF6, 0x00, 0x00]);
    }

    #[test]
    fn mouse_frame_carries_held_buttons_with_scroll() {
        let frame = encode_mouse(0x06, MouseDelta::scroll(-3, 2)).unwrap();
        let bytes = frame.as_bytes();
        assert_eq!(bytes[1], 0x02);
        assert_eq!(&bytes[2..7], &[0x06, 0x00, 0x00, 0xFD, 0x02]);
        assert!(bytes[7..].iter().all(|&b| b == 0));
    }

    #[test]
    fn keyboard_modifiers_and_slots() {
        let mut kb = KeyboardState::default();
        kb.press(Key::LCtrl, KeyOverflow::Reject).unwrap();
        kb.press(Key::C, KeyOverflow::Reject).unwrap();
        kb.press(Key::RShift, KeyOverflow::Reject).unwrap();
        let frame = encode_keyboard(&kb).unwrap();
        let bytes = frame.as_bytes();
        assert_eq!(bytes[1], 0x01);
        assert_eq!(&bytes[2..10], &[0x21, 0x00, 0x06, 0, 0, 0, 0, 0]);
    }

    #[test]
    fn keyboard_empty_state_is_all_zero() {
        let frame = encode_keyboard(&KeyboardState::default()).unwrap();
        assert!(frame.payload().iter().all(|&b| b == 0));
    }

    #[test]
    fn keyboard_combo_folds_modifiers_and_truncates() {
        let keys = [
            Key::LAlt,
            Key::A,
            Key::B,
            Key::A,
            Key::C,
            Key::D,
            Key::E,
            Key::F,
            Key::G,
        ];
        let frame = encode_keyboard_combo(0x01, &keys).unwrap();
        assert_eq!(
            &frame.as_bytes()[2..10],
            &[0x05, 0x00, 0x04, 0x05, 0x06, 0x07, 0x08, 0x09]
        );
    }

    #[test]
    fn gamepad_layout() {
        let mut pad = GamepadState::default();
        pad.set_axis(GamepadAxis::X, -1);
        pad.set_axis(GamepadAxis::Y, 127);
        pad.set_axis(GamepadAxis::Z, -300);
        pad.set_axis(GamepadAxis::Ry, 64);
        pad.set_hat(HatDirection::UpLeft);
        pad.press(GamepadButton::A);
        pad.press(GamepadButton::THUMBR);
        pad.press(GamepadButton::new(31).unwrap());
        let frame = encode_gamepad(&pad).unwrap();
        let bytes = frame.as_bytes();
        assert_eq!(bytes[1], 0x00);
        assert_eq!(
            &bytes[2..13],
            &[0xFF, 0x7F, 0x81, 0x00, 0x00, 0x40, 0x08, 0x01, 0x40, 0x00, 0x80]
        );
        assert!(bytes[13..].iter().all(|&b| b == 0));
    }

    #[test]
    fn mouse_to_gamepad_mode_frame() {
        let frame = encode_mouse_to_gamepad(MouseToGamepadMode::Stick).unwrap();
        assert_eq!(&frame.as_bytes()[..3], &[0x00, 0x03, 0x01]);
        assert_eq!(MouseToGamepadMode::from_name("manual"), Some(MouseToGamepadMode::Manual));
        assert_eq!(MouseToGamepadMode::from_name("sideways"), None);
    }
}
