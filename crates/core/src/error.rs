//! Error types for hidrelay-core.

use thiserror::Error;

/// Core library error type.
#[derive(Debug, Error)]
pub enum Error {
    /// HID device communication failure.
    #[error("HID error: {0}")]
    Hid(String),

    /// Device not found during enumeration.
    #[error("device not found: {0}")]
    DeviceNotFound(String),

    /// The transport accepted the call but did not write the frame.
    #[error("write failed: {0}")]
    WriteFailed(String),

    /// Key name or keycode outside the known keyboard table.
    #[error("invalid key code: {0}")]
    InvalidKeyCode(String),

    /// Mouse or gamepad button identifier outside the known set.
    #[error("invalid button: {0}")]
    InvalidButton(String),

    /// Hat switch name or value outside 0..=8.
    #[error("invalid hat direction: {0} (allowed 0..=8 or a compass name)")]
    InvalidHat(String),

    /// Usage name or value that cannot be addressed by an inject packet.
    #[error("invalid usage: {0}")]
    InvalidUsage(String),

    /// A seventh non-modifier key was pressed while the rollover policy rejects it.
    #[error("key rollover full: cannot hold key 0x{0:02X} with 6 keys already held")]
    KeyRolloverFull(u8),

    /// Value out of range.
    #[error("value out of range: {field} = {value} (allowed {min}..={max})")]
    OutOfRange {
        field: &'static str,
        value: i64,
        min: i64,
        max: i64,
    },

    /// Configuration could not be loaded or is inconsistent.
    #[error("config error: {0}")]
    Config(String),

    /// Malformed inject packet (length, version, command, or CRC).
    #[error("inject packet error: {0}")]
    InjectPacket(String),
}

/// Convenience Result alias.
pub type Result<T> = std::result::Result<T, Error>;
