//! Gamepad operations on a session.
//!
//! Axis values outside ±127 are clamped, never rejected.

use crate::error::Result;
use crate::keys::{GamepadAxis, GamepadButton, HatDirection};
use crate::session::HidSession;
use crate::transport::HidTransport;
use std::time::Duration;

impl<T: HidTransport> HidSession<T> {
    pub fn gamepad_press(&mut self, button: GamepadButton) -> Result<()> {
        self.state.gamepad.press(button);
        self.send_gamepad()
    }

    pub fn gamepad_release(&mut self, button: GamepadButton) -> Result<()> {
        self.state.gamepad.release(button);
        self.send_gamepad()
    }

    pub fn gamepad_click(&mut self, button: GamepadButton, hold: Duration) -> Result<()> {
        self.gamepad_press(button)?;
        self.hold(hold);
        self.gamepad_release(button)
    }

    pub fn gamepad_set_axis(&mut self, axis: GamepadAxis, value: i32) -> Result<()> {
        self.state.gamepad.set_axis(axis, value);
        self.send_gamepad()
    }

    /// Left stick (x, y axes).
    pub fn gamepad_set_left_stick(&mut self, x: i32, y: i32) -> Result<()> {
        self.state.gamepad.set_axis(GamepadAxis::X, x);
        self.state.gamepad.set_axis(GamepadAxis::Y, y);
        self.send_gamepad()
    }

    /// Right stick (z, rz axes).
    pub fn gamepad_set_right_stick(&mut self, x: i32, y: i32) -> Result<()> {
        self.state.gamepad.set_axis(GamepadAxis::Z, x);
        self.state.gamepad.set_axis(GamepadAxis::Rz, y);
        self.send_gamepad()
    }

    /// Triggers (rx, ry axes).
    pub fn gamepad_set_triggers(&mut self, left: i32, right: i32) -> Result<()> {
        self.state.gamepad.set_axis(GamepadAxis::Rx, left);
        self.state.gamepad.set_axis(GamepadAxis::Ry, right);
        self.send_gamepad()
    }

    pub fn gamepad_set_hat(&mut self, direction: HatDirection) -> Result<()> {
        self.state.gamepad.set_hat(direction);
        self.send_gamepad()
    }

    /// Hold the hat in `direction`, then return it to center.
    pub fn gamepad_hat_click(&mut self, direction: HatDirection, hold: Duration) -> Result<()> {
        self.gamepad_set_hat(direction)?;
        self.hold(hold);
        self.gamepad_set_hat(HatDirection::Centered)
    }

    /// Release every button, center every axis and the hat.
    pub fn gamepad_release_all(&mut self) -> Result<()> {
        self.state.gamepad.release_all();
        self.send_gamepad()
    }
}
