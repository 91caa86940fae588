//! Command channel to the ball device.
//!
//! The controller owns exactly one [`BallChannel`] and is the only writer,
//! which is what guarantees the device never observes a partial register-pair
//! update. Two backends exist: [`mmio::MmioChannel`] maps the real register
//! window, [`loopback::LoopbackChannel`] drives an in-process register file
//! through the full wire protocol for tests and dry runs.

pub mod loopback;
pub mod mmio;
pub mod registers;

use crate::error::Result;
use crate::protocol::{Color, Position};

// Public re-exports for convenience. Modules outside this crate should prefer importing
// from `crate::device` rather than reaching into submodules.
pub use loopback::LoopbackChannel;
pub use mmio::MmioChannel;
pub use registers::RegisterFile;

/// Register-level operations exposed to the controller.
///
/// Writes transfer a whole logical unit (both position fields, all three color
/// channels); reads return the last value successfully written, not the live
/// raster state — the device has no readback path beyond its cached registers.
pub trait BallChannel: Send {
    /// Write the ball position register pair. Idempotent: repeating the same
    /// position has no effect beyond the hardware write itself.
    fn write_position(&mut self, pos: Position) -> Result<()>;

    /// Write the background color registers.
    fn write_background(&mut self, color: Color) -> Result<()>;

    /// Read the last successfully written position.
    fn read_position(&mut self) -> Result<Position>;

    /// Read the last successfully written background color.
    fn read_background(&mut self) -> Result<Color>;
}
