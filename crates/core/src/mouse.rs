//! Mouse operations on a session.
//!
//! Every mouse frame carries the full held-button mask. Motion, wheel, and
//! pan are per-frame deltas that default to 0.

use crate::chunk::{chunk_move, split_evenly};
use crate::error::{Error, Result};
use crate::keys::MouseButton;
use crate::report::{encode_mouse, MouseDelta};
use crate::session::HidSession;
use crate::state::clamp_axis;
use crate::transport::HidTransport;
use std::time::Duration;
use tracing::debug;

/// Pause between pressing the button and the first drag step.
pub const DRAG_SETTLE: Duration = Duration::from_millis(100);

impl<T: HidTransport> HidSession<T> {
    pub fn mouse_press(&mut self, button: MouseButton) -> Result<()> {
        self.state.mouse.press(button);
        self.send_mouse(MouseDelta::default())
    }

    pub fn mouse_release(&mut self, button: MouseButton) -> Result<()> {
        self.state.mouse.release(button);
        self.send_mouse(MouseDelta::default())
    }

    /// Press, hold for the configured click time, release.
    pub fn mouse_click(&mut self, button: MouseButton) -> Result<()> {
        self.mouse_press(button)?;
        self.hold(self.config.click_hold());
        self.mouse_release(button)
    }

    /// Move by a relative amount of any size.
    ///
    /// Moves beyond ±127 are split into steps; each step is a full frame and
    /// goes through the pacer, spaced at least `chunk_delay` apart.
    pub fn mouse_move(&mut self, dx: i32, dy: i32) -> Result<()> {
        let chunks = chunk_move(dx, dy);
        if chunks.len() > 1 {
            debug!(dx, dy, steps = chunks.len(), "Chunking mouse move");
        }
        let chunk_delay = self.config.chunk_delay();
        for (i, (x, y)) in chunks.enumerate() {
            let frame = encode_mouse(self.state.mouse.buttons(), MouseDelta::motion(x, y))?;
            if i == 0 {
                self.send(&frame)?;
            } else {
                self.send_spaced(&frame, chunk_delay)?;
            }
        }
        Ok(())
    }

    /// Scroll vertically and/or horizontally. Values are clamped to ±127.
    pub fn mouse_wheel(&mut self, scroll: i32, pan: i32) -> Result<()> {
        self.send_mouse(MouseDelta::scroll(clamp_axis(scroll), clamp_axis(pan)))
    }

    /// Press `button`, move by (`dx`, `dy`) in `steps` equal parts with
    /// `step_delay` between them, then release.
    ///
    /// The button is released even when a move fails; the move error wins.
    pub fn mouse_drag(
        &mut self,
        dx: i32,
        dy: i32,
        button: MouseButton,
        steps: u32,
        step_delay: Duration,
    ) -> Result<()> {
        if steps == 0 {
            return Err(Error::OutOfRange {
                field: "steps",
                value: 0,
                min: 1,
                max: u32::MAX as i64,
            });
        }
        self.mouse_press(button)?;
        self.hold(DRAG_SETTLE);

        let moved = self.drag_steps(dx, dy, steps, step_delay);
        let released = self.mouse_release(button);
        moved.and(released)
    }

    fn drag_steps(&mut self, dx: i32, dy: i32, steps: u32, step_delay: Duration) -> Result<()> {
        let (step_x, rem_x) = split_evenly(dx, steps);
        let (step_y, rem_y) = split_evenly(dy, steps);
        for _ in 0..steps {
            self.mouse_move(step_x, step_y)?;
            self.hold(step_delay);
        }
        if rem_x != 0 || rem_y != 0 {
            self.mouse_move(rem_x, rem_y)?;
        }
        Ok(())
    }

    /// Release every mouse button.
    pub fn mouse_release_all(&mut self) -> Result<()> {
        self.state.mouse.release_all();
        self.send_mouse(MouseDelta::default())
    }
}
