//! Inject packets: set a single HID usage directly, bypassing the per-class
//! report encoders.
//!
//! Packet layout (32 bytes, little-endian):
//! - Byte 0: version ([`INJECT_VERSION`])
//! - Byte 1: command ([`COMMAND_INJECT_INPUT`])
//! - Bytes 2..6: usage (u32, page << 16 | id)
//! - Bytes 6..10: value (i32)
//! - Bytes 10..28: zero padding
//! - Bytes 28..32: CRC32 (IEEE) of bytes 0..28

use crate::config::InjectFraming;
use crate::error::{Error, Result};
use crate::frame::{ReportClass, ReportFrame, REPORT_LEN};

/// Config protocol version understood by the receiver.
pub const INJECT_VERSION: u8 = 18;
/// Config command that injects one usage value.
pub const COMMAND_INJECT_INPUT: u8 = 26;
/// Total packet length.
pub const INJECT_PACKET_LEN: usize = 32;
/// Length of the CRC-covered region.
pub const INJECT_BODY_LEN: usize = INJECT_PACKET_LEN - 4;

/// A (usage page, usage id) pair packed into one 32-bit value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Usage {
    pub page: u16,
    pub id: u16,
}

impl Usage {
    /// Generic Desktop X.
    pub const X: Self = Self::new(0x0001, 0x0030);
    /// Generic Desktop Y.
    pub const Y: Self = Self::new(0x0001, 0x0031);
    /// Generic Desktop Wheel.
    pub const WHEEL: Self = Self::new(0x0001, 0x0038);
    /// Button page, button 1 (left).
    pub const BUTTON_1: Self = Self::new(0x0009, 0x0001);
    /// Button page, button 2 (right).
    pub const BUTTON_2: Self = Self::new(0x0009, 0x0002);

    pub const fn new(page: u16, id: u16) -> Self {
        Self { page, id }
    }

    /// Packed form: page in the high 16 bits, id in the low 16 bits.
    pub const fn to_raw(self) -> u32 {
        ((self.page as u32) << 16) | self.id as u32
    }

    pub const fn from_raw(raw: u32) -> Self {
        Self {
            page: (raw >> 16) as u16,
            id: (raw & 0xFFFF) as u16,
        }
    }

    /// Parse a usage from a well-known name (`x`, `y`, `wheel`, `button1`,
    /// `button2`) or a number (`0x00010030`, `65584`).
    pub fn parse(text: &str) -> Result<Self> {
        let lower = text.trim().to_lowercase();
        match lower.as_str() {
            "x" => return Ok(Self::X),
            "y" => return Ok(Self::Y),
            "wheel" => return Ok(Self::WHEEL),
            "button1" | "button_1" | "left" => return Ok(Self::BUTTON_1),
            "button2" | "button_2" | "right" => return Ok(Self::BUTTON_2),
            _ => {}
        }
        let parsed = match lower.strip_prefix("0x") {
            Some(hex) => u32::from_str_radix(hex, 16),
            None => lower.parse::<u32>(),
        };
        parsed
            .map(Self::from_raw)
            .map_err(|_| Error::InvalidUsage(text.to_string()))
    }
}

impl std::fmt::Display for Usage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "0x{:04X}:0x{:04X}", self.page, self.id)
    }
}

/// CRC32 (IEEE, as used by zlib) of `data`.
pub fn crc32(data: &[u8]) -> u32 {
    let mut hasher = crc32fast::Hasher::new();
    hasher.update(data);
    hasher.finalize()
}

/// A decoded inject command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InjectPacket {
    pub usage: Usage,
    pub value: i32,
}

impl InjectPacket {
    pub fn new(usage: Usage, value: i32) -> Self {
        Self { usage, value }
    }

    /// Encode into a 32-byte packet with trailing CRC.
    pub fn encode(&self) -> [u8; INJECT_PACKET_LEN] {
        let mut packet = [0u8; INJECT_PACKET_LEN];
        packet[0] = INJECT_VERSION;
        packet[1] = COMMAND_INJECT_INPUT;
        packet[2..6].copy_from_slice(&self.usage.to_raw().to_le_bytes());
        packet[6..10].copy_from_slice(&self.value.to_le_bytes());
        let crc = crc32(&packet[..INJECT_BODY_LEN]);
        packet[INJECT_BODY_LEN..].copy_from_slice(&crc.to_le_bytes());
        packet
    }

    /// Decode and verify a packet.
    ///
    /// The receiver does this on its side; it lives here so encoded packets
    /// can be checked against the same contract.
    pub fn decode(data: &[u8]) -> Result<Self> {
        if data.len() != INJECT_PACKET_LEN {
            return Err(Error::InjectPacket(format!(
                "expected {INJECT_PACKET_LEN} bytes, got {}",
                data.len()
            )));
        }
        let stored = u32::from_le_bytes([data[28], data[29], data[30], data[31]]);
        let computed = crc32(&data[..INJECT_BODY_LEN]);
        if stored != computed {
            return Err(Error::InjectPacket(format!(
                "CRC mismatch: stored 0x{stored:08X}, computed 0x{computed:08X}"
            )));
        }
        if data[0] != INJECT_VERSION {
            return Err(Error::InjectPacket(format!(
                "unsupported version {} (expected {INJECT_VERSION})",
                data[0]
            )));
        }
        if data[1] != COMMAND_INJECT_INPUT {
            return Err(Error::InjectPacket(format!(
                "unexpected command {} (expected {COMMAND_INJECT_INPUT})",
                data[1]
            )));
        }
        let usage = u32::from_le_bytes([data[2], data[3], data[4], data[5]]);
        let value = i32::from_le_bytes([data[6], data[7], data[8], data[9]]);
        Ok(Self {
            usage: Usage::from_raw(usage),
            value,
        })
    }

    /// Place the packet in a 64-byte frame.
    pub fn to_frame(&self, framing: InjectFraming) -> Result<ReportFrame> {
        let packet = self.encode();
        match framing {
            InjectFraming::CommandByte => ReportFrame::new(ReportClass::Config, &packet),
            InjectFraming::ReportId => {
                let mut bytes = [0u8; REPORT_LEN];
                bytes[0] = ReportClass::Config.id();
                bytes[1..1 + INJECT_PACKET_LEN].copy_from_slice(&packet);
                Ok(ReportFrame::from_raw(bytes))
            }
        }
    }
}

/// Encode a packet for `usage` = `value`.
pub fn encode(usage: Usage, value: i32) -> [u8; INJECT_PACKET_LEN] {
    InjectPacket::new(usage, value).encode()
}
