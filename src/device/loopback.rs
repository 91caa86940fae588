//! In-process channel backend.
//!
//! Every operation is encoded to its wire payload and pushed through a
//! [`RegisterFile`], so the loopback exercises the exact command path the real
//! device services. Used by the test suite and by `--loopback` dry runs.

use crate::device::{BallChannel, RegisterFile};
use crate::error::Result;
use crate::protocol::{
    Color, Position, CMD_READ_BACKGROUND, CMD_READ_POSITION, CMD_WRITE_BACKGROUND,
    CMD_WRITE_POSITION,
};

/// Channel that terminates in an in-process register file.
#[derive(Debug, Default)]
pub struct LoopbackChannel {
    registers: RegisterFile,
}

impl LoopbackChannel {
    pub fn new() -> Self {
        Self {
            registers: RegisterFile::new(),
        }
    }

    /// Direct view of the device-side registers, for assertions in tests.
    pub fn registers(&self) -> &RegisterFile {
        &self.registers
    }
}

impl BallChannel for LoopbackChannel {
    fn write_position(&mut self, pos: Position) -> Result<()> {
        self.registers
            .handle_command(CMD_WRITE_POSITION, &pos.to_payload())?;
        Ok(())
    }

    fn write_background(&mut self, color: Color) -> Result<()> {
        self.registers
            .handle_command(CMD_WRITE_BACKGROUND, &color.to_payload())?;
        Ok(())
    }

    fn read_position(&mut self) -> Result<Position> {
        let reply = self.registers.handle_command(CMD_READ_POSITION, &[])?;
        Position::from_payload(&reply)
    }

    fn read_background(&mut self) -> Result<Color> {
        let reply = self.registers.handle_command(CMD_READ_BACKGROUND, &[])?;
        Color::from_payload(&reply)
    }
}
