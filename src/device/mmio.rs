//! Memory-mapped channel backend.
//!
//! Maps the device's 20-byte register window from the device node and issues
//! volatile 32-bit stores at the fixed layout offsets. The hardware offers no
//! readback, so reads are served from the last values written through this
//! handle, matching the device-side caching contract.

use crate::device::BallChannel;
use crate::error::{BallctlError, Result};
use crate::protocol::{
    Color, Position, REGISTER_WINDOW_LEN, REG_BALL_X, REG_BALL_Y, REG_BG_BLUE, REG_BG_GREEN,
    REG_BG_RED,
};
use memmap2::MmapMut;
use std::fs::OpenOptions;
use std::path::Path;

/// Channel backed by the mapped hardware register window.
#[derive(Debug)]
pub struct MmioChannel {
    window: MmapMut,
    position: Position,
    background: Color,
}

impl MmioChannel {
    /// Open the device node and map its register window.
    ///
    /// Fails with a setup error when the node cannot be opened or mapped;
    /// startup treats that as fatal.
    pub fn open(path: &Path) -> Result<Self> {
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .open(path)
            .map_err(|err| {
                BallctlError::setup(format!("could not open {}: {}", path.display(), err))
            })?;

        // Safety: the mapping is private to this handle and the window length
        // is the fixed hardware register span.
        let window = unsafe {
            memmap2::MmapOptions::new()
                .len(REGISTER_WINDOW_LEN)
                .map_mut(&file)
                .map_err(|err| {
                    BallctlError::setup(format!(
                        "could not map register window of {}: {}",
                        path.display(),
                        err
                    ))
                })?
        };

        Ok(Self {
            window,
            position: Position::new(320, 240),
            background: Color::BEIGE,
        })
    }

    fn store_register(&mut self, offset: usize, value: u32) {
        // Volatile store: the raster pipeline reads these registers
        // concurrently and the write must not be elided or reordered.
        unsafe {
            let reg = self.window.as_mut_ptr().add(offset) as *mut u32;
            reg.write_volatile(value.to_le());
        }
    }
}

impl BallChannel for MmioChannel {
    fn write_position(&mut self, pos: Position) -> Result<()> {
        self.store_register(REG_BALL_X, pos.x as u32);
        self.store_register(REG_BALL_Y, pos.y as u32);
        self.position = pos;
        Ok(())
    }

    fn write_background(&mut self, color: Color) -> Result<()> {
        self.store_register(REG_BG_RED, color.red as u32);
        self.store_register(REG_BG_GREEN, color.green as u32);
        self.store_register(REG_BG_BLUE, color.blue as u32);
        self.background = color;
        Ok(())
    }

    fn read_position(&mut self) -> Result<Position> {
        Ok(self.position)
    }

    fn read_background(&mut self) -> Result<Color> {
        Ok(self.background)
    }
}
