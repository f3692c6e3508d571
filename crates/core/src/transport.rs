//! HID transport abstraction for device communication.
//!
//! Provides a trait-based transport layer so that real HID devices and
//! mock devices share the same interface.

use crate::error::{Error, Result};
use crate::frame::{ReportFrame, REPORT_LEN};
use tracing::trace;

/// Abstraction over raw HID read/write.
///
/// Implementations write whole 64-byte frames and read raw inbound reports.
pub trait HidTransport: Send {
    /// Write one frame. Anything short of a complete write is an error.
    fn write_report(&self, frame: &ReportFrame) -> Result<()>;

    /// Read one inbound report into `buf`, waiting at most `timeout_ms`
    /// (`-1` blocks). Returns the number of bytes read; 0 means timeout.
    fn read_report(&self, buf: &mut [u8], timeout_ms: i32) -> Result<usize>;
}

/// Write a frame through `transport`, logging the bytes.
pub fn write_frame(transport: &dyn HidTransport, frame: &ReportFrame) -> Result<()> {
    trace!(
        class = ?frame.class(),
        report_hex = format_args!("{:02X?}", &frame.as_bytes()[..]),
        "HID TX"
    );
    transport.write_report(frame)
}

/// Read one inbound report into a fresh 64-byte buffer.
///
/// Returns the buffer and the number of valid bytes.
pub fn read_frame(
    transport: &dyn HidTransport,
    timeout_ms: i32,
) -> Result<([u8; REPORT_LEN], usize)> {
    let mut buf = [0u8; REPORT_LEN];
    let n = transport.read_report(&mut buf, timeout_ms)?;
    if n > REPORT_LEN {
        return Err(Error::Hid(format!(
            "transport reported {n} bytes for a {REPORT_LEN}-byte buffer"
        )));
    }
    trace!(len = n, report_hex = format_args!("{:02X?}", &buf[..n]), "HID RX");
    Ok((buf, n))
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::ReportClass;
    use mock::MockTransport;

    #[test]
    fn write_frame_records() {
        let mock = MockTransport::new();
        let frame = ReportFrame::new(ReportClass::Mouse, &[0x01]).unwrap();
        write_frame(&mock, &frame).unwrap();
        assert_eq!(mock.written(), vec![frame]);
    }

    #[test]
    fn write_failure_is_surfaced() {
        let mock = MockTransport::new();
        mock.fail_after(0);
        let frame = ReportFrame::new(ReportClass::Keyboard, &[]).unwrap();
        assert!(matches!(
            write_frame(&mock, &frame),
            Err(Error::WriteFailed(_))
        ));
        assert!(mock.written().is_empty());
    }

    #[test]
    fn read_frame_returns_queued_bytes() {
        let mock = MockTransport::new();
        mock.push_inbound(&[0x04, 0x01, 0x02, 0x03, 0x04]);
        let (buf, n) = read_frame(&mock, 10).unwrap();
        assert_eq!(n, 5);
        assert_eq!(&buf[..5], &[0x04, 0x01, 0x02, 0x03, 0x04]);
    }

    #[test]
    fn read_frame_timeout_is_zero_bytes() {
        let mock = MockTransport::new();
        let (_, n) = read_frame(&mock, 10).unwrap();
        assert_eq!(n, 0);
    }
}
