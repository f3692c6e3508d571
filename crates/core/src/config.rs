//! Session configuration: device selection, pacing, and protocol policies.
//!
//! Stored as JSON; every field has a default so a partial file is valid.

use crate::error::{Error, Result};
use crate::{DEFAULT_PID, DEFAULT_VID, VENDOR_USAGE_PAGE};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// What happens when a seventh non-modifier key is pressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum KeyOverflow {
    /// Drop the longest-held key to make room for the new one.
    #[default]
    EvictOldest,
    /// Refuse the new key with `Error::KeyRolloverFull`.
    Reject,
}

/// Where the config report ID goes when an inject packet is framed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum InjectFraming {
    /// Byte 0 = 0x00, byte 1 = 100, packet at bytes 2..34.
    #[default]
    CommandByte,
    /// Byte 0 = 100, packet at bytes 1..33.
    ReportId,
}

/// Configuration for one device session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// USB vendor ID of the relay.
    pub vendor_id: u16,
    /// USB product ID of the relay.
    pub product_id: u16,
    /// Usage page of the vendor-defined interface that accepts frames.
    pub usage_page: u16,
    /// Minimum spacing between two written frames, in microseconds.
    pub min_frame_interval_us: u64,
    /// Remaining wait below which the pacer spins instead of sleeping.
    pub spin_threshold_us: u64,
    /// Hold time between press and release for click helpers.
    pub click_hold_ms: u64,
    /// Extra delay between consecutive chunks of a large move.
    pub chunk_delay_us: u64,
    /// Seventh-key policy.
    pub key_overflow: KeyOverflow,
    /// Inject packet framing.
    pub inject_framing: InjectFraming,
    /// Timeout for a single inbound read.
    pub read_timeout_ms: i32,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            vendor_id: DEFAULT_VID,
            product_id: DEFAULT_PID,
            usage_page: VENDOR_USAGE_PAGE,
            min_frame_interval_us: 1000,
            spin_threshold_us: 200,
            click_hold_ms: 50,
            chunk_delay_us: 1000,
            key_overflow: KeyOverflow::EvictOldest,
            inject_framing: InjectFraming::CommandByte,
            read_timeout_ms: 1000,
        }
    }
}

impl SessionConfig {
    /// Load a config from a JSON file and validate it.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("read {}: {e}", path.display())))?;
        let config = Self::from_json(&text)?;
        tracing::debug!(path = %path.display(), "Loaded session config");
        Ok(config)
    }

    /// Parse and validate a config from JSON text.
    pub fn from_json(text: &str) -> Result<Self> {
        let config: Self =
            serde_json::from_str(text).map_err(|e| Error::Config(format!("parse: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize to pretty JSON.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| Error::Config(format!("serialize: {e}")))
    }

    /// Reject inconsistent settings.
    pub fn validate(&self) -> Result<()> {
        if self.vendor_id == 0 || self.product_id == 0 {
            return Err(Error::Config(format!(
                "vendor/product ID must be non-zero (got 0x{:04X}:0x{:04X})",
                self.vendor_id, self.product_id
            )));
        }
        if self.spin_threshold_us > self.min_frame_interval_us {
            return Err(Error::OutOfRange {
                field: "spin_threshold_us",
                value: self.spin_threshold_us as i64,
                min: 0,
                max: self.min_frame_interval_us as i64,
            });
        }
        if self.read_timeout_ms < -1 {
            return Err(Error::OutOfRange {
                field: "read_timeout_ms",
                value: self.read_timeout_ms as i64,
                min: -1,
                max: i32::MAX as i64,
            });
        }
        Ok(())
    }

    pub fn min_frame_interval(&self) -> Duration {
        Duration::from_micros(self.min_frame_interval_us)
    }

    pub fn spin_threshold(&self) -> Duration {
        Duration::from_micros(self.spin_threshold_us)
    }

    pub fn click_hold(&self) -> Duration {
        Duration::from_millis(self.click_hold_ms)
    }

    pub fn chunk_delay(&self) -> Duration {
        Duration::from_micros(self.chunk_delay_us)
    }
}
