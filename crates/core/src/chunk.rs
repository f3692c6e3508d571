//! Splitting large relative moves into receiver-safe steps.
//!
//! Each step moves at most [`MAX_STEP`] counts per axis. The axes run down
//! independently: the shorter one reaches zero first and then reports 0
//! while the longer one finishes. A zero move yields no steps.

/// Largest per-frame magnitude on either axis.
pub const MAX_STEP: i32 = 127;

/// Iterator over the `(x, y)` steps of one relative move.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveChunks {
    remaining_x: i32,
    remaining_y: i32,
}

impl MoveChunks {
    pub fn new(dx: i32, dy: i32) -> Self {
        Self {
            remaining_x: dx,
            remaining_y: dy,
        }
    }

    /// Distance not yet emitted.
    pub fn remaining(&self) -> (i32, i32) {
        (self.remaining_x, self.remaining_y)
    }
}

fn take_step(remaining: &mut i32) -> i8 {
    let step = (*remaining).clamp(-MAX_STEP, MAX_STEP);
    *remaining -= step;
    step as i8
}

impl Iterator for MoveChunks {
    type Item = (i8, i8);

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining_x == 0 && self.remaining_y == 0 {
            return None;
        }
        let x = take_step(&mut self.remaining_x);
        let y = take_step(&mut self.remaining_y);
        Some((x, y))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = step_count(self.remaining_x).max(step_count(self.remaining_y));
        (n, Some(n))
    }
}

impl ExactSizeIterator for MoveChunks {}

/// Split a relative move into steps.
pub fn chunk_move(dx: i32, dy: i32) -> MoveChunks {
    MoveChunks::new(dx, dy)
}

/// Number of non-zero steps needed for one axis: `ceil(|delta| / 127)`.
pub fn step_count(delta: i32) -> usize {
    (delta.unsigned_abs() as usize).div_ceil(MAX_STEP as usize)
}

/// Split `total` into `steps` near-equal parts plus a remainder.
///
/// Returns `(per_step, remainder)` with `per_step * steps + remainder == total`,
/// both truncated toward zero.
pub fn split_evenly(total: i32, steps: u32) -> (i32, i32) {
    if steps == 0 {
        return (0, total);
    }
    let steps = steps as i32;
    (total / steps, total % steps)
}
