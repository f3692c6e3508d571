//! Device session: one transport handle, one canonical state, one pacer.
//!
//! Every operation mutates [`HidState`], encodes the full state of the
//! affected class, waits for the pacer, and writes the frame. Per-class
//! operations live in [`crate::mouse`], [`crate::keyboard`], and
//! [`crate::gamepad`].
//!
//! A session is single-threaded and blocking. Dropping it releases
//! everything that is still held.

use crate::config::SessionConfig;
use crate::device::HidapiTransport;
use crate::error::Result;
use crate::frame::ReportFrame;
use crate::inject::{InjectPacket, Usage};
use crate::pacer::Pacer;
use crate::parser::{parse_mouse_report, MouseEvent, ReportLayout};
use crate::report::{self, MouseDelta, MouseToGamepadMode};
use crate::state::HidState;
use crate::transport::{read_frame, write_frame, HidTransport};
use std::time::Duration;
use tracing::{debug, info, warn};

/// An open session with the relay.
pub struct HidSession<T: HidTransport> {
    pub(crate) transport: T,
    pub(crate) state: HidState,
    pub(crate) pacer: Pacer,
    pub(crate) config: SessionConfig,
    closed: bool,
}

impl HidSession<HidapiTransport> {
    /// Open the relay described by `config` and start with zeroed state.
    pub fn open(config: SessionConfig) -> Result<Self> {
        let transport = HidapiTransport::open(&config)?;
        Ok(Self::new(transport, config))
    }
}

impl<T: HidTransport> HidSession<T> {
    /// Start a session over an already-open transport.
    pub fn new(transport: T, config: SessionConfig) -> Self {
        let pacer = Pacer::new(config.min_frame_interval(), config.spin_threshold());
        debug!(
            min_interval_us = config.min_frame_interval_us,
            key_overflow = ?config.key_overflow,
            "Session started"
        );
        Self {
            transport,
            state: HidState::new(),
            pacer,
            config,
            closed: false,
        }
    }

    /// Current held state.
    pub fn state(&self) -> &HidState {
        &self.state
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Pace and write one frame.
    pub(crate) fn send(&mut self, frame: &ReportFrame) -> Result<()> {
        let transport = &self.transport;
        self.pacer.pace(|| write_frame(transport, frame))
    }

    /// Pace with at least `interval` since the previous write, then write.
    pub(crate) fn send_spaced(&mut self, frame: &ReportFrame, interval: Duration) -> Result<()> {
        let transport = &self.transport;
        self.pacer.pace_with(interval, || write_frame(transport, frame))
    }

    /// Block for `duration` using the pacer's precise sleep.
    pub(crate) fn hold(&self, duration: Duration) {
        self.pacer.delay(duration);
    }

    pub(crate) fn send_mouse(&mut self, delta: MouseDelta) -> Result<()> {
        let frame = report::encode_mouse(self.state.mouse.buttons(), delta)?;
        self.send(&frame)
    }

    pub(crate) fn send_keyboard(&mut self) -> Result<()> {
        let frame = report::encode_keyboard(&self.state.keyboard)?;
        self.send(&frame)
    }

    pub(crate) fn send_gamepad(&mut self) -> Result<()> {
        let frame = report::encode_gamepad(&self.state.gamepad)?;
        self.send(&frame)
    }

    /// Set one usage directly with an inject packet.
    pub fn inject(&mut self, usage: Usage, value: i32) -> Result<()> {
        debug!(%usage, value, "Inject usage");
        let frame = InjectPacket::new(usage, value).to_frame(self.config.inject_framing)?;
        self.send(&frame)
    }

    /// Switch how the receiver routes physical mouse motion.
    pub fn set_mouse_to_gamepad(&mut self, mode: MouseToGamepadMode) -> Result<()> {
        info!(?mode, "Setting mouse-to-gamepad mode");
        let frame = report::encode_mouse_to_gamepad(mode)?;
        self.send(&frame)
    }

    /// Read one inbound mouse report forwarded by the receiver.
    ///
    /// Returns `Ok(None)` on timeout or when fewer bytes than a mouse report
    /// arrive.
    pub fn read_mouse_event(&mut self) -> Result<Option<MouseEvent>> {
        let (buf, n) = read_frame(&self.transport, self.config.read_timeout_ms)?;
        Ok(parse_mouse_report(&buf[..n], ReportLayout::WithReportId))
    }

    /// Release every button, key, axis, and hat in all three classes.
    ///
    /// State is zeroed first; all three release frames are attempted even if
    /// one fails, and the first failure is returned.
    pub fn release_all(&mut self) -> Result<()> {
        debug!("Releasing all inputs");
        self.state.release_all();
        let mouse = self.send_mouse(MouseDelta::default());
        let keyboard = self.send_keyboard();
        let gamepad = self.send_gamepad();
        mouse.and(keyboard).and(gamepad)
    }

    /// Release everything and close the transport.
    pub fn close(mut self) -> Result<()> {
        let result = self.release_all();
        self.closed = true;
        info!("Session closed");
        result
    }
}

impl<T: HidTransport> Drop for HidSession<T> {
    fn drop(&mut self) {
        if self.closed {
            return;
        }
        if let Err(e) = self.release_all() {
            warn!("release-all on drop failed: {e}");
        }
    }
}
