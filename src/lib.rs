//! # ballctl - Keyboard Controller for the VGA Ball Coprocessor
//!
//! Drives a memory-mapped display coprocessor that renders a colored disc over
//! a solid background on a 640x480 raster. Raw keyboard bytes are decoded into
//! discrete events, which either step the ball directly or trigger a timed
//! jump/duck animation; every hardware change goes through one register-level
//! command channel.
//!
//! ## Architecture
//!
//! Data flows one direction: raw bytes → discrete events → position target →
//! register writes.
//!
//! - [`error`] - Centralized error types and handling
//! - [`protocol`] - Wire contract: command codes, payload layout, register map
//! - [`device`] - Command channel trait with MMIO and loopback backends
//! - [`input`] - Escape-sequence decoder and raw terminal source
//! - [`animation`] - Triangular jump/duck interpolation
//! - [`app`] - The controller state machine

// Core modules
pub mod error;
pub mod protocol;

// Hardware side
pub mod device;

// User side
pub mod animation;
pub mod input;

// Core components
pub mod app;

// Re-export commonly used types for convenience
pub use error::{BallctlError, Result};

// Public API surface for external usage
pub use app::{Controller, Mode};
pub use device::{BallChannel, LoopbackChannel, MmioChannel};
pub use input::InputEvent;
pub use protocol::{Color, Position};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
