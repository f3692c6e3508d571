//! Fixed-size report frames exchanged with the relay receiver.
//!
//! Every outbound report is exactly 64 bytes:
//! - Byte 0: transport report ID (always 0x00 for the vendor interface)
//! - Byte 1: class/command ID selecting the payload layout
//! - Bytes 2..: class payload, zero-padded to 64 bytes
//!
//! Payload layouts:
//! - Mouse (5 bytes): buttons, x, y, wheel, pan
//! - Keyboard (8 bytes): modifiers, reserved, 6 keycode slots
//! - Gamepad (11 bytes): x, y, z, rz, rx, ry, hat, buttons (u32 LE)
//! - Mouse-to-gamepad mode (1 byte): mode
//! - Config/inject (32 bytes): inject packet

use crate::error::{Error, Result};

/// Total frame length (including report ID).
pub const REPORT_LEN: usize = 64;
/// Offset of the class payload within a frame.
pub const PAYLOAD_OFFSET: usize = 2;
/// Largest payload that fits after the report ID and class ID.
pub const MAX_PAYLOAD_LEN: usize = REPORT_LEN - PAYLOAD_OFFSET;

/// Transport report ID used for every class frame.
pub const REPORT_ID: u8 = 0x00;

/// Mouse payload length.
pub const MOUSE_PAYLOAD_LEN: usize = 5;
/// Keyboard payload length.
pub const KEYBOARD_PAYLOAD_LEN: usize = 8;
/// Gamepad payload length.
pub const GAMEPAD_PAYLOAD_LEN: usize = 11;

/// Class/command identifier carried in byte 1 of every frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ReportClass {
    Gamepad = 0x00,
    Keyboard = 0x01,
    Mouse = 0x02,
    /// Receiver mode switch: route mouse motion to the gamepad stick.
    MouseToGamepad = 0x03,
    /// Config sub-protocol carrying inject packets.
    Config = 100,
}

impl ReportClass {
    /// Look up a class from its wire identifier.
    pub fn from_id(id: u8) -> Option<Self> {
        match id {
            0x00 => Some(Self::Gamepad),
            0x01 => Some(Self::Keyboard),
            0x02 => Some(Self::Mouse),
            0x03 => Some(Self::MouseToGamepad),
            100 => Some(Self::Config),
            _ => None,
        }
    }

    /// Wire identifier.
    pub fn id(self) -> u8 {
        self as u8
    }
}

/// One complete 64-byte outbound report.
#[derive(Clone, PartialEq, Eq)]
pub struct ReportFrame {
    bytes: [u8; REPORT_LEN],
}

impl ReportFrame {
    /// Build a frame for `class` with `payload` at [`PAYLOAD_OFFSET`].
    pub fn new(class: ReportClass, payload: &[u8]) -> Result<Self> {
        if payload.len() > MAX_PAYLOAD_LEN {
            return Err(Error::OutOfRange {
                field: "payload_len",
                value: payload.len() as i64,
                min: 0,
                max: MAX_PAYLOAD_LEN as i64,
            });
        }
        let mut bytes = [0u8; REPORT_LEN];
        bytes[0] = REPORT_ID;
        bytes[1] = class.id();
        bytes[PAYLOAD_OFFSET..PAYLOAD_OFFSET + payload.len()].copy_from_slice(payload);
        Ok(Self { bytes })
    }

    /// Wrap raw bytes that already follow some framing (e.g. inject with a
    /// leading report ID).
    pub fn from_raw(bytes: [u8; REPORT_LEN]) -> Self {
        Self { bytes }
    }

    /// Transport report ID (byte 0).
    pub fn report_id(&self) -> u8 {
        self.bytes[0]
    }

    /// Class identifier (byte 1), if it names a known class.
    pub fn class(&self) -> Option<ReportClass> {
        ReportClass::from_id(self.bytes[1])
    }

    /// Payload region (bytes 2..64, including padding).
    pub fn payload(&self) -> &[u8] {
        &self.bytes[PAYLOAD_OFFSET..]
    }

    /// Full frame bytes as written to the transport.
    pub fn as_bytes(&self) -> &[u8; REPORT_LEN] {
        &self.bytes
    }
}

impl std::fmt::Debug for ReportFrame {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Trailing padding is noise in logs; show up to the last non-zero byte.
        let used = self
            .bytes
            .iter()
            .rposition(|&b| b != 0)
            .map_or(PAYLOAD_OFFSET, |i| (i + 1).max(PAYLOAD_OFFSET));
        f.debug_struct("ReportFrame")
            .field("bytes", &format_args!("{:02X?}", &self.bytes[..used]))
            .field("len", &REPORT_LEN)
            .finish()
    }
}
