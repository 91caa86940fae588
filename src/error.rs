//! Error types and handling infrastructure for ballctl.
//!
//! This module provides a centralized error handling system using `thiserror` for
//! custom error types and `anyhow` for application-level error handling with context.
//!
//! ## Taxonomy
//!
//! - **Setup**: the command channel or raw input mode could not be acquired.
//!   Fatal; the controller never enters its loop.
//! - **Io**: a single register transfer failed. Logged and treated as transient;
//!   the next natural write re-synchronizes hardware state.
//! - **Poll**: the input polling machinery itself failed. Fatal; triggers
//!   cleanup and exit.
//! - **InvalidCommand** / **AccessFault**: the device-side protocol errors for
//!   an unsupported command code and an unreadable/unwritable payload transfer.

use thiserror::Error;

/// The main error type for ballctl operations.
#[derive(Error, Debug)]
pub enum BallctlError {
    /// Command channel or terminal could not be set up (fatal at startup)
    #[error("Setup failed: {message}")]
    Setup { message: String },

    /// A register read or write over the command channel failed
    #[error("Register transfer failed: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// The input polling mechanism failed (fatal, triggers cleanup)
    #[error("Input poll failed: {message}")]
    Poll { message: String },

    /// Device side rejected an unsupported command code
    #[error("Unsupported device command: {code:#x}")]
    InvalidCommand { code: u32 },

    /// Device side could not transfer the command payload
    #[error("Payload transfer fault: {message}")]
    AccessFault { message: String },
}

/// Standard Result type for ballctl operations.
pub type Result<T> = std::result::Result<T, BallctlError>;

impl BallctlError {
    /// Create a Setup error with a descriptive message
    pub fn setup(message: impl Into<String>) -> Self {
        Self::Setup {
            message: message.into(),
        }
    }

    /// Create an Io error from an io::Error with additional context
    pub fn io(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source,
        }
    }

    /// Create a Poll error with a descriptive message
    pub fn poll(message: impl Into<String>) -> Self {
        Self::Poll {
            message: message.into(),
        }
    }

    /// Create an AccessFault with a descriptive message
    pub fn access_fault(message: impl Into<String>) -> Self {
        Self::AccessFault {
            message: message.into(),
        }
    }
}

// Automatic conversion from io::Error: a plain io failure on the channel is a
// register transfer failure unless the call site wraps it as Setup.
impl From<std::io::Error> for BallctlError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: "IO operation failed".to_string(),
            source: err,
        }
    }
}
