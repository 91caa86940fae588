//! Keyboard input subsystem.
//!
//! Raw bytes come from a non-blocking terminal source, pass through the
//! escape-sequence decoder, and leave as discrete [`InputEvent`]s in arrival
//! order. The controller consumes them; nothing here touches the device.

pub mod decoder;
pub mod source;

// Public re-exports for convenience. Modules outside this crate should prefer importing
// from `crate::input` rather than reaching into submodules.
pub use decoder::decode;
pub use source::{spawn_input_thread, RawModeGuard, TerminalInput};

/// Discrete event produced per decoded byte or escape sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    /// Up arrow: move the ball up, or start a jump.
    MoveUp,
    /// Down arrow: move the ball down, or start a duck.
    MoveDown,
    /// `q`/`Q`: leave the control loop.
    Quit,
    /// Any byte with no mapping. Causes no controller transition.
    Ignored,
}
