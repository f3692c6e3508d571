//! Transmission pacing: keeps consecutive frames at least one receiver
//! polling interval apart.
//!
//! OS sleeps routinely overshoot by a millisecond or more, which is the whole
//! budget here. Waits therefore sleep coarsely until `spin_threshold` before
//! the deadline, then spin on the monotonic clock for the rest.

use std::time::{Duration, Instant};
use tracing::trace;

/// Block until `duration` has elapsed, with sub-millisecond precision.
pub fn precise_sleep(duration: Duration, spin_threshold: Duration) {
    sleep_until(Instant::now() + duration, spin_threshold);
}

/// Block until `deadline`: coarse sleep, then spin.
pub fn sleep_until(deadline: Instant, spin_threshold: Duration) {
    loop {
        let now = Instant::now();
        let Some(remaining) = deadline.checked_duration_since(now) else {
            break;
        };
        if remaining.is_zero() {
            break;
        }
        if remaining > spin_threshold {
            std::thread::sleep(remaining - spin_threshold);
        } else {
            std::hint::spin_loop();
        }
    }
}

/// Enforces a minimum interval between frame writes.
#[derive(Debug, Clone)]
pub struct Pacer {
    min_interval: Duration,
    spin_threshold: Duration,
    last_write: Option<Instant>,
}

impl Pacer {
    pub fn new(min_interval: Duration, spin_threshold: Duration) -> Self {
        Self {
            min_interval,
            spin_threshold,
            last_write: None,
        }
    }

    pub fn min_interval(&self) -> Duration {
        self.min_interval
    }

    /// Time of the last recorded write.
    pub fn last_write(&self) -> Option<Instant> {
        self.last_write
    }

    /// Block until the next write is allowed.
    pub fn wait(&self) {
        self.wait_at_least(self.min_interval);
    }

    /// Block until `interval` (or the minimum interval, whichever is longer)
    /// has passed since the last write.
    pub fn wait_at_least(&self, interval: Duration) {
        let Some(last) = self.last_write else {
            return;
        };
        let ready_at = last + interval.max(self.min_interval);
        if let Some(remaining) = ready_at.checked_duration_since(Instant::now()) {
            if !remaining.is_zero() {
                trace!(wait_us = remaining.as_micros() as u64, "Pacing frame");
                sleep_until(ready_at, self.spin_threshold);
            }
        }
    }

    /// Record that a write just happened.
    pub fn mark(&mut self) {
        self.last_write = Some(Instant::now());
    }

    /// Wait for the interval, run `write`, and record the write time.
    ///
    /// The time is recorded even if `write` fails: the transport was still
    /// touched.
    pub fn pace<T>(&mut self, write: impl FnOnce() -> T) -> T {
        self.pace_with(self.min_interval, write)
    }

    /// Like [`Pacer::pace`], with a longer spacing for this one write.
    pub fn pace_with<T>(&mut self, interval: Duration, write: impl FnOnce() -> T) -> T {
        self.wait_at_least(interval);
        let result = write();
        self.mark();
        result
    }

    /// Sleep for `duration` with the same precision as frame pacing.
    pub fn delay(&self, duration: Duration) {
        if !duration.is_zero() {
            precise_sleep(duration, self.spin_threshold);
        }
    }
}
