//! hidrelay-core: report framing, held-input state, and pacing for an RP2040
//! composite HID relay.
//!
//! This crate turns logical input actions (press a key, move the mouse, tilt
//! a stick) into the fixed 64-byte frames the relay firmware replays as USB
//! mouse, keyboard, and gamepad reports, plus CRC-checked inject packets for
//! arbitrary usages.

pub mod chunk;
pub mod config;
pub mod device;
pub mod error;
pub mod frame;
pub mod gamepad;
pub mod inject;
pub mod keyboard;
pub mod keys;
pub mod mouse;
pub mod pacer;
pub mod parser;
pub mod report;
pub mod session;
pub mod state;
pub mod transport;

pub use error::{Error, Result};
pub use session::HidSession;

/// Default USB Vendor ID presented by the relay.
pub const DEFAULT_VID: u16 = 0x046D;
/// Default USB Product ID presented by the relay.
pub const DEFAULT_PID: u16 = 0xC08B;
/// Usage page of the relay's vendor-defined command interface.
pub const VENDOR_USAGE_PAGE: u16 = 0xFF00;
