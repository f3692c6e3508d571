//! Canonical held-input state for one session.
//!
//! One [`HidState`] owns everything that is currently pressed or deflected
//! across the three device classes. Encoders read it; only the session
//! mutates it.

use crate::config::KeyOverflow;
use crate::error::{Error, Result};
use crate::keys::{GamepadAxis, GamepadButton, HatDirection, Key, MouseButton};
use tracing::{debug, warn};

/// Maximum number of non-modifier keys reported at once.
pub const MAX_HELD_KEYS: usize = 6;

/// Smallest and largest encodable axis value.
pub const AXIS_MIN: i8 = -127;
pub const AXIS_MAX: i8 = 127;

/// Clamp an arbitrary axis value into [`AXIS_MIN`]..=[`AXIS_MAX`].
pub fn clamp_axis(value: i32) -> i8 {
    value.clamp(AXIS_MIN as i32, AXIS_MAX as i32) as i8
}

/// Held mouse buttons.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MouseState {
    buttons: u8,
}

impl MouseState {
    pub fn press(&mut self, button: MouseButton) {
        self.buttons |= button.bit();
    }

    pub fn release(&mut self, button: MouseButton) {
        self.buttons &= !button.bit();
    }

    pub fn release_all(&mut self) {
        self.buttons = 0;
    }

    pub fn is_pressed(&self, button: MouseButton) -> bool {
        self.buttons & button.bit() != 0
    }

    /// Raw button mask.
    pub fn buttons(&self) -> u8 {
        self.buttons
    }
}

/// Held keyboard keys: a modifier mask plus up to six other keys in press
/// order (oldest first).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyboardState {
    modifiers: u8,
    keys: Vec<Key>,
}

impl KeyboardState {
    /// Mark `key` as held.
    ///
    /// Modifiers only touch the mask. Pressing a held key keeps its original
    /// position. A seventh key is handled per `overflow`; with
    /// [`KeyOverflow::EvictOldest`] the evicted key is returned.
    pub fn press(&mut self, key: Key, overflow: KeyOverflow) -> Result<Option<Key>> {
        if let Some(bit) = key.modifier_bit() {
            self.modifiers |= bit;
            return Ok(None);
        }
        if self.keys.contains(&key) {
            return Ok(None);
        }
        let mut evicted = None;
        if self.keys.len() == MAX_HELD_KEYS {
            match overflow {
                KeyOverflow::Reject => return Err(Error::KeyRolloverFull(key.code())),
                KeyOverflow::EvictOldest => {
                    let oldest = self.keys.remove(0);
                    warn!(evicted = %oldest, pressed = %key, "Key rollover full, evicting oldest key");
                    evicted = Some(oldest);
                }
            }
        }
        self.keys.push(key);
        Ok(evicted)
    }

    /// Mark `key` as released. Releasing a key that is not held is a no-op.
    pub fn release(&mut self, key: Key) {
        if let Some(bit) = key.modifier_bit() {
            self.modifiers &= !bit;
        } else {
            self.keys.retain(|&k| k != key);
        }
    }

    pub fn release_all(&mut self) {
        self.modifiers = 0;
        self.keys.clear();
    }

    pub fn is_pressed(&self, key: Key) -> bool {
        match key.modifier_bit() {
            Some(bit) => self.modifiers & bit != 0,
            None => self.keys.contains(&key),
        }
    }

    /// Modifier mask.
    pub fn modifiers(&self) -> u8 {
        self.modifiers
    }

    /// Held non-modifier keys, oldest first.
    pub fn keys(&self) -> &[Key] {
        &self.keys
    }

    /// Keycode slots in report order: held keys oldest first, zero-filled.
    pub fn slots(&self) -> [u8; MAX_HELD_KEYS] {
        let mut slots = [0u8; MAX_HELD_KEYS];
        for (slot, key) in slots.iter_mut().zip(&self.keys) {
            *slot = key.code();
        }
        slots
    }
}

/// Gamepad axes, hat, and buttons.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GamepadState {
    axes: [i8; 6],
    hat: HatDirection,
    buttons: u32,
}

impl GamepadState {
    pub fn press(&mut self, button: GamepadButton) {
        self.buttons |= button.mask();
    }

    pub fn release(&mut self, button: GamepadButton) {
        self.buttons &= !button.mask();
    }

    /// Set one axis, clamping to [`AXIS_MIN`]..=[`AXIS_MAX`]. Returns the stored value.
    pub fn set_axis(&mut self, axis: GamepadAxis, value: i32) -> i8 {
        let clamped = clamp_axis(value);
        if clamped as i32 != value {
            debug!(?axis, value, clamped, "Axis value clamped");
        }
        self.axes[axis.index()] = clamped;
        clamped
    }

    pub fn set_hat(&mut self, direction: HatDirection) {
        self.hat = direction;
    }

    pub fn release_all(&mut self) {
        *self = Self::default();
    }

    pub fn axis(&self, axis: GamepadAxis) -> i8 {
        self.axes[axis.index()]
    }

    /// All six axes in wire order (x, y, z, rz, rx, ry).
    pub fn axes(&self) -> [i8; 6] {
        self.axes
    }

    pub fn hat(&self) -> HatDirection {
        self.hat
    }

    pub fn is_pressed(&self, button: GamepadButton) -> bool {
        self.buttons & button.mask() != 0
    }

    /// Raw 32-bit button mask.
    pub fn buttons(&self) -> u32 {
        self.buttons
    }
}

/// All held-input state for one session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HidState {
    pub mouse: MouseState,
    pub keyboard: KeyboardState,
    pub gamepad: GamepadState,
}

impl HidState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Zero every class.
    pub fn release_all(&mut self) {
        self.mouse.release_all();
        self.keyboard.release_all();
        self.gamepad.release_all();
    }

    /// Whether nothing is held in any class.
    pub fn is_idle(&self) -> bool {
        *self == Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn mouse_press_release_masks() {
        let mut mouse = MouseState::default();
        mouse.press(MouseButton::Left);
        mouse.press(MouseButton::Back);
        assert_eq!(mouse.buttons(), 0x09);
        mouse.press(MouseButton::Left);
        assert_eq!(mouse.buttons(), 0x09);
        mouse.release(MouseButton::Left);
        assert_eq!(mouse.buttons(), 0x08);
        assert!(mouse.is_pressed(MouseButton::Back));
        mouse.release_all();
        assert_eq!(mouse.buttons(), 0);
    }

    #[test]
    fn modifier_never_takes_a_slot() {
        let mut kb = KeyboardState::default();
        kb.press(Key::LShift, KeyOverflow::Reject).unwrap();
        kb.press(Key::RAlt, KeyOverflow::Reject).unwrap();
        assert_eq!(kb.modifiers(), 0x42);
        assert!(kb.keys().is_empty());
        assert_eq!(kb.slots(), [0; 6]);
    }

    #[test]
    fn six_keys_fill_slots_in_press_order() {
        let mut kb = KeyboardState::default();
        let keys = [Key::Q, Key::W, Key::E, Key::R, Key::T, Key::Y];
        for key in keys {
            kb.press(key, KeyOverflow::Reject).unwrap();
        }
        kb.press(Key::LCtrl, KeyOverflow::Reject).unwrap();
        assert_eq!(kb.slots(), keys.map(Key::code));
        assert_eq!(kb.modifiers(), 0x01);
    }

    #[test]
    fn seventh_key_evicts_oldest() {
        let mut kb = KeyboardState::default();
        for key in [Key::A, Key::B, Key::C, Key::D, Key::E, Key::F] {
            kb.press(key, KeyOverflow::EvictOldest).unwrap();
        }
        let evicted = kb.press(Key::G, KeyOverflow::EvictOldest).unwrap();
        assert_eq!(evicted, Some(Key::A));
        assert_eq!(kb.keys(), &[Key::B, Key::C, Key::D, Key::E, Key::F, Key::G]);
        assert!(!kb.is_pressed(Key::A));
    }

    #[test]
    fn seventh_key_rejected_leaves_state() {
        let mut kb = KeyboardState::default();
        for key in [Key::A, Key::B, Key::C, Key::D, Key::E, Key::F] {
            kb.press(key, KeyOverflow::Reject).unwrap();
        }
        let before = kb.clone();
        let result = kb.press(Key::G, KeyOverflow::Reject);
        assert!(matches!(result, Err(Error::KeyRolloverFull(0x0A))));
        assert_eq!(kb, before);
    }

    #[test]
    fn repeated_press_does_not_duplicate() {
        let mut kb = KeyboardState::default();
        kb.press(Key::A, KeyOverflow::Reject).unwrap();
        kb.press(Key::B, KeyOverflow::Reject).unwrap();
        kb.press(Key::A, KeyOverflow::Reject).unwrap();
        assert_eq!(kb.keys(), &[Key::A, Key::B]);
    }

    #[test]
    fn full_set_repress_is_not_overflow() {
        let mut kb = KeyboardState::default();
        for key in [Key::A, Key::B, Key::C, Key::D, Key::E, Key::F] {
            kb.press(key, KeyOverflow::Reject).unwrap();
        }
        assert_eq!(kb.press(Key::C, KeyOverflow::Reject).unwrap(), None);
    }

    #[test]
    fn release_frees_slot_and_keeps_order() {
        let mut kb = KeyboardState::default();
        for key in [Key::A, Key::B, Key::C] {
            kb.press(key, KeyOverflow::Reject).unwrap();
        }
        kb.release(Key::B);
        kb.release(Key::Z);
        assert_eq!(kb.slots(), [0x04, 0x06, 0, 0, 0, 0]);
    }

    #[test]
    fn axis_values_are_clamped() {
        let mut pad = GamepadState::default();
        assert_eq!(pad.set_axis(GamepadAxis::X, 500), 127);
        assert_eq!(pad.set_axis(GamepadAxis::Y, -500), -127);
        assert_eq!(pad.set_axis(GamepadAxis::Rz, -128), -127);
        assert_eq!(pad.set_axis(GamepadAxis::Ry, 42), 42);
        assert_eq!(pad.axes(), [127, -127, 0, -127, 0, 42]);
    }

    #[test]
    fn release_all_zeroes_every_class() {
        let mut state = HidState::new();
        state.mouse.press(MouseButton::Right);
        state.keyboard.press(Key::LGui, KeyOverflow::Reject).unwrap();
        state.keyboard.press(Key::Tab, KeyOverflow::Reject).unwrap();
        state.gamepad.press(GamepadButton::START);
        state.gamepad.set_axis(GamepadAxis::Z, 90);
        state.gamepad.set_hat(HatDirection::DownLeft);
        assert!(!state.is_idle());

        state.release_all();
        assert!(state.is_idle());
        assert_eq!(state.mouse.buttons(), 0);
        assert_eq!(state.keyboard.modifiers(), 0);
        assert!(state.keyboard.keys().is_empty());
        assert_eq!(state.gamepad.buttons(), 0);
        assert_eq!(state.gamepad.axes(), [0; 6]);
        assert_eq!(state.gamepad.hat(), HatDirection::Centered);
    }

    proptest! {
        #[test]
        fn gamepad_press_release_restores_mask(initial in any::<u32>(), index in 0u8..32) {
            let mut pad = GamepadState::default();
            for i in 0..32u8 {
                if initial & (1 << i) != 0 {
                    pad.press(GamepadButton::new(i).unwrap());
                }
            }
            let button = GamepadButton::new(index).unwrap();
            let held_before = pad.is_pressed(button);
            pad.press(button);
            pad.release(button);
            let expected = if held_before { initial & !button.mask() } else { initial };
            prop_assert_eq!(pad.buttons(), expected);
        }

        #[test]
        fn mouse_press_release_restores_unheld_mask(initial in 0u8..32, pick in 0usize..5) {
            let button = MouseButton::ALL[pick];
            let mut mouse = MouseState::default();
            for b in MouseButton::ALL {
                if initial & b.bit() != 0 && *b != button {
                    mouse.press(*b);
                }
            }
            let before = mouse.buttons();
            mouse.press(button);
            mouse.release(button);
            prop_assert_eq!(mouse.buttons(), before);
        }

        #[test]
        fn clamp_axis_stays_in_range(value in any::<i32>()) {
            let clamped = clamp_axis(value);
            prop_assert!((AXIS_MIN..=AXIS_MAX).contains(&clamped));
        }
    }
}
