//! Device-side register store.
//!
//! Owned struct standing in for the hardware's command servicing path: a
//! five-register window plus the cached position/background values that back
//! the read commands. One instance exists per open device handle.

use crate::error::{BallctlError, Result};
use crate::protocol::{
    Color, Position, CMD_READ_BACKGROUND, CMD_READ_POSITION, CMD_WRITE_BACKGROUND,
    CMD_WRITE_POSITION, REGISTER_WINDOW_LEN, REG_BALL_X, REG_BALL_Y, REG_BG_BLUE, REG_BG_GREEN,
    REG_BG_RED,
};

/// The ball device's register state and command dispatcher.
#[derive(Debug, Clone)]
pub struct RegisterFile {
    window: [u8; REGISTER_WINDOW_LEN],
    position: Position,
    background: Color,
}

impl RegisterFile {
    /// Create a register file in its hardware reset state: beige background,
    /// ball centered on screen.
    pub fn new() -> Self {
        let mut regs = Self {
            window: [0; REGISTER_WINDOW_LEN],
            position: Position::new(0, 0),
            background: Color::BLACK,
        };
        regs.store_position(Position::new(320, 240));
        regs.store_background(Color::BEIGE);
        regs
    }

    /// Service one command. Returns the reply payload (empty for writes).
    ///
    /// Unsupported codes and malformed payloads are the only device-side
    /// failure modes.
    pub fn handle_command(&mut self, code: u32, payload: &[u8]) -> Result<Vec<u8>> {
        match code {
            CMD_WRITE_POSITION => {
                let pos = Position::from_payload(payload)?;
                self.store_position(pos);
                Ok(Vec::new())
            }
            CMD_READ_POSITION => {
                if !payload.is_empty() {
                    return Err(BallctlError::access_fault(
                        "read position carries no payload",
                    ));
                }
                Ok(self.position.to_payload().to_vec())
            }
            CMD_WRITE_BACKGROUND => {
                let color = Color::from_payload(payload)?;
                self.store_background(color);
                Ok(Vec::new())
            }
            CMD_READ_BACKGROUND => {
                if !payload.is_empty() {
                    return Err(BallctlError::access_fault(
                        "read background carries no payload",
                    ));
                }
                Ok(self.background.to_payload().to_vec())
            }
            other => Err(BallctlError::InvalidCommand { code: other }),
        }
    }

    /// Last position written through the command path.
    pub fn position(&self) -> Position {
        self.position
    }

    /// Last background written through the command path.
    pub fn background(&self) -> Color {
        self.background
    }

    /// Raw register window, as the raster pipeline would see it.
    pub fn window(&self) -> &[u8; REGISTER_WINDOW_LEN] {
        &self.window
    }

    fn store_position(&mut self, pos: Position) {
        self.window[REG_BALL_X..REG_BALL_X + 4].copy_from_slice(&pos.x.to_le_bytes());
        self.window[REG_BALL_Y..REG_BALL_Y + 4].copy_from_slice(&pos.y.to_le_bytes());
        self.position = pos;
    }

    fn store_background(&mut self, color: Color) {
        self.window[REG_BG_RED..REG_BG_RED + 4].copy_from_slice(&(color.red as u32).to_le_bytes());
        self.window[REG_BG_GREEN..REG_BG_GREEN + 4]
            .copy_from_slice(&(color.green as u32).to_le_bytes());
        self.window[REG_BG_BLUE..REG_BG_BLUE + 4]
            .copy_from_slice(&(color.blue as u32).to_le_bytes());
        self.background = color;
    }
}

impl Default for RegisterFile {
    fn default() -> Self {
        Self::new()
    }
}
