//! Keyboard operations on a session.

use crate::error::Result;
use crate::keys::Key;
use crate::report::encode_keyboard_combo;
use crate::session::HidSession;
use crate::transport::HidTransport;
use std::time::Duration;
use tracing::{debug, warn};

/// Hold time between the last press and the first release of a hotkey.
pub const HOTKEY_HOLD: Duration = Duration::from_millis(100);

impl<T: HidTransport> HidSession<T> {
    /// Hold `key` and send the keyboard state.
    ///
    /// Re-pressing a held key still sends a frame.
    pub fn key_press(&mut self, key: Key) -> Result<()> {
        self.state.keyboard.press(key, self.config.key_overflow)?;
        self.send_keyboard()
    }

    pub fn key_release(&mut self, key: Key) -> Result<()> {
        self.state.keyboard.release(key);
        self.send_keyboard()
    }

    /// Press by name, e.g. `"a"`, `"KEY_1"`, `"LCTRL"`.
    pub fn key_press_name(&mut self, name: &str) -> Result<()> {
        self.key_press(Key::from_name(name)?)
    }

    pub fn key_release_name(&mut self, name: &str) -> Result<()> {
        self.key_release(Key::from_name(name)?)
    }

    /// Press by raw HID usage code.
    pub fn key_press_code(&mut self, code: u8) -> Result<()> {
        self.key_press(Key::from_code(code)?)
    }

    pub fn key_release_code(&mut self, code: u8) -> Result<()> {
        self.key_release(Key::from_code(code)?)
    }

    /// Press, hold for the configured click time, release.
    pub fn key_click(&mut self, key: Key) -> Result<()> {
        self.key_press(key)?;
        self.hold(self.config.click_hold());
        self.key_release(key)
    }

    /// Press `keys` in order, hold, then release them in reverse order, with
    /// `delay` after each press and release.
    ///
    /// If a press fails, the keys pressed so far are released in reverse
    /// order before the press error is returned. The failing key is released
    /// too unless it was already held.
    pub fn key_hotkey(&mut self, keys: &[Key], delay: Duration) -> Result<()> {
        for (i, &key) in keys.iter().enumerate() {
            let was_held = self.state.keyboard.is_pressed(key);
            if let Err(e) = self.key_press(key) {
                warn!(%key, "Hotkey press failed, releasing pressed keys");
                let end = if was_held { i } else { i + 1 };
                for &held in keys[..end].iter().rev() {
                    if let Err(release_err) = self.key_release(held) {
                        debug!(key = %held, "Hotkey cleanup release failed: {release_err}");
                    }
                }
                return Err(e);
            }
            self.hold(delay);
        }
        self.hold(HOTKEY_HOLD);
        for &key in keys.iter().rev() {
            self.key_release(key)?;
            self.hold(delay);
        }
        Ok(())
    }

    /// Send one keyboard frame built from `modifiers` and `keys` without
    /// touching held state. The next stateful keyboard frame overrides it.
    pub fn key_send_combo(&mut self, modifiers: u8, keys: &[Key]) -> Result<()> {
        let frame = encode_keyboard_combo(modifiers, keys)?;
        self.send(&frame)
    }

    /// Release every key and modifier.
    pub fn key_release_all(&mut self) -> Result<()> {
        self.state.keyboard.release_all();
        self.send_keyboard()
    }
}
