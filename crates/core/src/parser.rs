//! Decoding inbound mouse reports forwarded by the receiver.
//!
//! Best effort only: the mouse channel carries no checksum. Reads shorter than
//! [`MIN_MOUSE_REPORT_LEN`] yield no event rather than an error.

use serde::Serialize;

/// Minimum number of bytes needed to decode a mouse report.
pub const MIN_MOUSE_REPORT_LEN: usize = 4;

/// Where the buttons byte starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReportLayout {
    /// `[report_id, buttons, x, y, wheel?]` as forwarded on the vendor interface.
    #[default]
    WithReportId,
    /// `[buttons, x, y, wheel?]`, a bare payload.
    Bare,
}

/// Button states from the buttons byte.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ButtonStates {
    pub left: bool,
    pub right: bool,
    pub middle: bool,
}

impl ButtonStates {
    pub fn from_bits(bits: u8) -> Self {
        Self {
            left: bits & 0x01 != 0,
            right: bits & 0x02 != 0,
            middle: bits & 0x04 != 0,
        }
    }
}

/// One decoded mouse report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MouseEvent {
    /// Report ID, when the layout carries one.
    pub report_id: Option<u8>,
    pub buttons: ButtonStates,
    pub x: i8,
    pub y: i8,
    pub wheel: i8,
}

/// Interpret a byte as two's complement.
pub fn to_signed(byte: u8) -> i8 {
    byte as i8
}

/// Decode a mouse report, or `None` if `data` is too short.
pub fn parse_mouse_report(data: &[u8], layout: ReportLayout) -> Option<MouseEvent> {
    if data.len() < MIN_MOUSE_REPORT_LEN {
        return None;
    }
    let (report_id, body) = match layout {
        ReportLayout::WithReportId => (Some(data[0]), &data[1..]),
        ReportLayout::Bare => (None, data),
    };
    Some(MouseEvent {
        report_id,
        buttons: ButtonStates::from_bits(body[0]),
        x: to_signed(body[1]),
        y: to_signed(body[2]),
        wheel: body.get(3).copied().map_or(0, to_signed),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::{mouse_payload, MouseDelta};

    #[test]
    fn parses_encoded_payload() {
        let payload = mouse_payload(0x01, MouseDelta::motion(10, -10));
        assert_eq!(payload, [0x01, 0x0A, 0xF6, 0x00, 0x00]);
        let event = parse_mouse_report(&payload, ReportLayout::Bare).unwrap();
        assert_eq!(event.x, 10);
        assert_eq!(event.y, -10);
        assert_eq!(event.wheel, 0);
        assert_eq!(
            event.buttons,
            ButtonStates {
                left: true,
                right: false,
                middle: false
            }
        );
        assert_eq!(event.report_id, None);
    }

    #[test]
    fn parses_forwarded_report_with_id() {
        let mut data = [0u8; 64];
        data[..5].copy_from_slice(&[0x04, 0x06, 0x80, 0x7F, 0xFF]);
        let event = parse_mouse_report(&data, ReportLayout::WithReportId).unwrap();
        assert_eq!(event.report_id, Some(0x04));
        assert!(!event.buttons.left);
        assert!(event.buttons.right);
        assert!(event.buttons.middle);
        assert_eq!(event.x, -128);
        assert_eq!(event.y, 127);
        assert_eq!(event.wheel, -1);
    }

    #[test]
    fn four_bytes_with_id_defaults_wheel() {
        let event = parse_mouse_report(&[0x04, 0x00, 0x05, 0xFB], ReportLayout::WithReportId)
            .unwrap();
        assert_eq!((event.x, event.y, event.wheel), (5, -5, 0));
    }

    #[test]
    fn short_reads_yield_no_event() {
        assert_eq!(parse_mouse_report(&[], ReportLayout::Bare), None);
        assert_eq!(parse_mouse_report(&[0x01, 0x02, 0x03], ReportLayout::Bare), None);
        assert_eq!(
            parse_mouse_report(&[0x04, 0x01, 0x02], ReportLayout::WithReportId),
            None
        );
    }

    #[test]
    fn signed_conversion() {
        assert_eq!(to_signed(0), 0);
        assert_eq!(to_signed(127), 127);
        assert_eq!(to_signed(128), -128);
        assert_eq!(to_signed(255), -1);
    }
}
