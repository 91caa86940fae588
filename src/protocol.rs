//! Wire contract between the controller and the ball device.
//!
//! The device exposes two register pairs (ball position, background color)
//! through four fixed-size commands. Command identifiers and field layout are
//! stable: any device-side implementation relies on them.

use crate::error::{BallctlError, Result};

/// Command code for writing the background color registers.
pub const CMD_WRITE_BACKGROUND: u32 = 1;
/// Command code for reading back the cached background color.
pub const CMD_READ_BACKGROUND: u32 = 2;
/// Command code for writing the position register pair.
pub const CMD_WRITE_POSITION: u32 = 3;
/// Command code for reading back the cached position.
pub const CMD_READ_POSITION: u32 = 4;

/// Register window layout: byte offsets of the five 32-bit hardware registers.
pub const REG_BALL_X: usize = 0;
pub const REG_BALL_Y: usize = 4;
pub const REG_BG_RED: usize = 8;
pub const REG_BG_GREEN: usize = 12;
pub const REG_BG_BLUE: usize = 16;
/// Total length of the mapped register window in bytes.
pub const REGISTER_WINDOW_LEN: usize = 20;

/// Raster dimensions of the display the coprocessor drives.
pub const SCREEN_WIDTH: i32 = 640;
pub const SCREEN_HEIGHT: i32 = 480;
/// Largest legal y coordinate.
pub const Y_MAX: i32 = SCREEN_HEIGHT - 1;
/// Side length of one tile, the unit used to size jump/duck offsets.
pub const TILE: i32 = 32;

/// Wire size of an encoded position payload (two 32-bit fields).
pub const POSITION_PAYLOAD_LEN: usize = 8;
/// Wire size of an encoded color payload (three 8-bit channels, each carried
/// in its own 32-bit field).
pub const COLOR_PAYLOAD_LEN: usize = 12;

/// Ball position in device pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Encode as the fixed 8-byte little-endian wire payload.
    pub fn to_payload(self) -> [u8; POSITION_PAYLOAD_LEN] {
        let mut buf = [0u8; POSITION_PAYLOAD_LEN];
        buf[..4].copy_from_slice(&self.x.to_le_bytes());
        buf[4..].copy_from_slice(&self.y.to_le_bytes());
        buf
    }

    /// Decode from a wire payload. Any length mismatch is an access fault:
    /// the device cannot transfer a partial register pair.
    pub fn from_payload(payload: &[u8]) -> Result<Self> {
        if payload.len() != POSITION_PAYLOAD_LEN {
            return Err(BallctlError::access_fault(format!(
                "position payload is {} bytes, expected {}",
                payload.len(),
                POSITION_PAYLOAD_LEN
            )));
        }
        let x = i32::from_le_bytes([payload[0], payload[1], payload[2], payload[3]]);
        let y = i32::from_le_bytes([payload[4], payload[5], payload[6], payload[7]]);
        Ok(Self { x, y })
    }
}

/// Background fill color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
}

impl Color {
    pub const BLACK: Color = Color {
        red: 0,
        green: 0,
        blue: 0,
    };

    /// Hardware reset background, matching the device-side default.
    pub const BEIGE: Color = Color {
        red: 0xf9,
        green: 0xe4,
        blue: 0xb7,
    };

    pub fn new(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }

    /// Encode as the fixed 12-byte payload: each channel widened to a 32-bit
    /// little-endian field, mirroring the 32-bit hardware registers.
    pub fn to_payload(self) -> [u8; COLOR_PAYLOAD_LEN] {
        let mut buf = [0u8; COLOR_PAYLOAD_LEN];
        buf[..4].copy_from_slice(&(self.red as u32).to_le_bytes());
        buf[4..8].copy_from_slice(&(self.green as u32).to_le_bytes());
        buf[8..].copy_from_slice(&(self.blue as u32).to_le_bytes());
        buf
    }

    /// Decode from a wire payload; length mismatch is an access fault.
    pub fn from_payload(payload: &[u8]) -> Result<Self> {
        if payload.len() != COLOR_PAYLOAD_LEN {
            return Err(BallctlError::access_fault(format!(
                "color payload is {} bytes, expected {}",
                payload.len(),
                COLOR_PAYLOAD_LEN
            )));
        }
        let red = u32::from_le_bytes([payload[0], payload[1], payload[2], payload[3]]);
        let green = u32::from_le_bytes([payload[4], payload[5], payload[6], payload[7]]);
        let blue = u32::from_le_bytes([payload[8], payload[9], payload[10], payload[11]]);
        Ok(Self {
            red: red as u8,
            green: green as u8,
            blue: blue as u8,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn position_payload_layout_is_little_endian() {
        let pos = Position::new(16, 336);
        let payload = pos.to_payload();
        assert_eq!(&payload[..4], &16i32.to_le_bytes());
        assert_eq!(&payload[4..], &336i32.to_le_bytes());
        assert_eq!(Position::from_payload(&payload).unwrap(), pos);
    }

    #[test]
    fn color_channels_are_widened_to_32_bit_fields() {
        let color = Color::new(0xf9, 0xe4, 0xb7);
        let payload = color.to_payload();
        assert_eq!(payload.len(), COLOR_PAYLOAD_LEN);
        assert_eq!(&payload[..4], &[0xf9, 0, 0, 0]);
        assert_eq!(&payload[4..8], &[0xe4, 0, 0, 0]);
        assert_eq!(&payload[8..], &[0xb7, 0, 0, 0]);
        assert_eq!(Color::from_payload(&payload).unwrap(), color);
    }

    #[test]
    fn truncated_payloads_are_access_faults() {
        let err = Position::from_payload(&[1, 2, 3]).unwrap_err();
        assert!(matches!(err, crate::error::BallctlError::AccessFault { .. }));

        let err = Color::from_payload(&[0; 16]).unwrap_err();
        assert!(matches!(err, crate::error::BallctlError::AccessFault { .. }));
    }

    #[test]
    fn register_window_covers_five_registers() {
        assert_eq!(REGISTER_WINDOW_LEN, REG_BG_BLUE + 4);
    }
}
