//! Device discovery and the hidapi-backed transport.

use crate::config::SessionConfig;
use crate::error::{Error, Result};
use crate::frame::{ReportFrame, REPORT_LEN};
use crate::transport::HidTransport;
use std::ffi::CString;
use tracing::{debug, info};

/// Information about a discovered relay interface.
#[derive(Debug, Clone)]
pub struct DeviceInfo {
    pub vid: u16,
    pub pid: u16,
    pub usage_page: u16,
    pub interface_number: i32,
    pub path: String,
    pub product: Option<String>,
    pub serial: Option<String>,
}

fn hidapi() -> Result<hidapi::HidApi> {
    hidapi::HidApi::new().map_err(|e| Error::Hid(format!("hidapi init: {e}")))
}

fn matching_interfaces(api: &hidapi::HidApi, vid: u16, pid: u16, usage_page: u16) -> Vec<DeviceInfo> {
    api.device_list()
        .filter(|info| {
            info.vendor_id() == vid && info.product_id() == pid && info.usage_page() == usage_page
        })
        .map(|info| DeviceInfo {
            vid: info.vendor_id(),
            pid: info.product_id(),
            usage_page: info.usage_page(),
            interface_number: info.interface_number(),
            path: info.path().to_string_lossy().into_owned(),
            product: info.product_string().map(|s| s.to_string()),
            serial: info.serial_number().map(|s| s.to_string()),
        })
        .collect()
}

/// Discover relay interfaces with the given IDs on the vendor usage page.
///
/// A composite relay exposes one HID interface per class; only the
/// vendor-defined one accepts frames.
pub fn discover_devices(vid: u16, pid: u16, usage_page: u16) -> Result<Vec<DeviceInfo>> {
    debug!(
        vid = format_args!("0x{vid:04X}"),
        pid = format_args!("0x{pid:04X}"),
        usage_page = format_args!("0x{usage_page:04X}"),
        "Starting HID device enumeration"
    );
    let api = hidapi()?;
    let devices = matching_interfaces(&api, vid, pid, usage_page);
    for dev in &devices {
        info!(
            vid = format_args!("0x{:04X}", dev.vid),
            pid = format_args!("0x{:04X}", dev.pid),
            interface = dev.interface_number,
            path = %dev.path,
            "Found relay interface"
        );
    }
    debug!(count = devices.len(), "Device enumeration complete");
    Ok(devices)
}

/// Transport over an opened hidapi device handle. Dropping it closes the handle.
pub struct HidapiTransport {
    device: hidapi::HidDevice,
    info: DeviceInfo,
}

impl HidapiTransport {
    /// Open the first relay interface matching `config`.
    pub fn open(config: &SessionConfig) -> Result<Self> {
        let api = hidapi()?;
        let info = matching_interfaces(&api, config.vendor_id, config.product_id, config.usage_page)
            .into_iter()
            .next()
            .ok_or_else(|| {
                Error::DeviceNotFound(format!(
                    "no interface with VID=0x{:04X} PID=0x{:04X} on usage page 0x{:04X}",
                    config.vendor_id, config.product_id, config.usage_page
                ))
            })?;

        let path = CString::new(info.path.clone())
            .map_err(|e| Error::Hid(format!("device path contains NUL: {e}")))?;
        let device = api.open_path(&path).map_err(|e| classify_open_error(&info, e))?;

        info!(path = %info.path, "Opened relay interface");
        Ok(Self { device, info })
    }

    pub fn info(&self) -> &DeviceInfo {
        &self.info
    }
}

fn classify_open_error(info: &DeviceInfo, err: hidapi::HidError) -> Error {
    let msg = err.to_string();
    let lower = msg.to_lowercase();
    if lower.contains("not found") || lower.contains("no such device") {
        Error::DeviceNotFound(format!("{}: {msg}", info.path))
    } else {
        Error::Hid(format!(
            "open HID device (VID=0x{:04X} PID=0x{:04X}): {msg}",
            info.vid, info.pid
        ))
    }
}

impl HidTransport for HidapiTransport {
    fn write_report(&self, frame: &ReportFrame) -> Result<()> {
        let written = self
            .device
            .write(frame.as_bytes())
            .map_err(|e| Error::WriteFailed(format!("write: {e}")))?;
        if written == 0 {
            return Err(Error::WriteFailed(format!(
                "device accepted 0 of {REPORT_LEN} bytes"
            )));
        }
        Ok(())
    }

    fn read_report(&self, buf: &mut [u8], timeout_ms: i32) -> Result<usize> {
        self.device
            .read_timeout(buf, timeout_ms)
            .map_err(|e| Error::Hid(format!("read_timeout: {e}")))
    }
}

impl Drop for HidapiTransport {
    fn drop(&mut self) {
        debug!(path = %self.info.path, "Closing relay interface");
    }
}
