//! Terminal byte source: raw-mode configuration and non-blocking reads.
//!
//! `RawModeGuard` switches stdin out of canonical mode for the lifetime of the
//! controller and restores the saved attributes on drop, so every exit path
//! (quit, fatal error, panic unwind) puts the terminal back exactly once.

use crate::error::{BallctlError, Result};
use crate::input::{decode, InputEvent};
use nix::poll::{poll, PollFd, PollFlags, PollTimeout};
use nix::sys::termios::{
    tcgetattr, tcsetattr, LocalFlags, SetArg, SpecialCharacterIndices, Termios,
};
use std::io::{self, Read};
use std::os::fd::AsFd;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;
use tokio::sync::mpsc::UnboundedSender;

/// Largest number of bytes consumed per poll cycle. Arrow keys need three,
/// so one chunk carries a couple of keypresses at most.
const READ_CHUNK: usize = 8;

/// Scoped raw-mode switch for stdin: no line buffering, no local echo,
/// reads return immediately with whatever is pending (VMIN=0, VTIME=0).
pub struct RawModeGuard {
    original: Termios,
}

impl RawModeGuard {
    /// Save the current terminal attributes and switch to raw input.
    pub fn engage() -> Result<Self> {
        let stdin = io::stdin();
        let original = tcgetattr(&stdin).map_err(|err| {
            BallctlError::setup(format!("could not read terminal attributes: {}", err))
        })?;

        let mut raw = original.clone();
        raw.local_flags.remove(LocalFlags::ICANON | LocalFlags::ECHO);
        raw.control_chars[SpecialCharacterIndices::VMIN as usize] = 0;
        raw.control_chars[SpecialCharacterIndices::VTIME as usize] = 0;

        tcsetattr(&stdin, SetArg::TCSANOW, &raw).map_err(|err| {
            BallctlError::setup(format!("could not configure raw input mode: {}", err))
        })?;

        Ok(Self { original })
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        let _ = tcsetattr(&io::stdin(), SetArg::TCSANOW, &self.original);
    }
}

/// Non-blocking byte source over stdin.
#[derive(Debug, Default)]
pub struct TerminalInput;

impl TerminalInput {
    pub fn new() -> Self {
        Self
    }

    /// Wait up to `timeout` for input readiness (indefinitely when `None`)
    /// and read at most one chunk of pending bytes.
    pub fn poll_bytes(&mut self, timeout: Option<Duration>) -> Result<Option<Vec<u8>>> {
        let stdin = io::stdin();
        let poll_timeout = match timeout {
            Some(duration) => PollTimeout::try_from(duration).unwrap_or(PollTimeout::MAX),
            None => PollTimeout::NONE,
        };

        let mut fds = [PollFd::new(stdin.as_fd(), PollFlags::POLLIN)];
        let ready = poll(&mut fds, poll_timeout)
            .map_err(|err| BallctlError::poll(format!("poll on stdin failed: {}", err)))?;
        if ready == 0 {
            return Ok(None);
        }

        let readable = fds[0]
            .revents()
            .map_or(false, |flags| flags.contains(PollFlags::POLLIN));
        if !readable {
            return Ok(None);
        }

        let mut buf = [0u8; READ_CHUNK];
        match stdin.lock().read(&mut buf) {
            Ok(0) => Err(BallctlError::poll("stdin closed")),
            Ok(n) => Ok(Some(buf[..n].to_vec())),
            Err(err) if err.kind() == io::ErrorKind::WouldBlock => Ok(None),
            Err(err) => Err(BallctlError::io("read from stdin failed", err)),
        }
    }
}

/// Spawn a blocking thread that polls the terminal, decodes bytes, and
/// forwards events onto a channel in arrival order.
///
/// `Ignored` events are filtered here; the controller only sees events that
/// could cause a transition. A failed poll ends the thread, which closes the
/// channel and surfaces as a fatal poll error on the controller side.
pub fn spawn_input_thread(
    tx: UnboundedSender<InputEvent>,
    shutdown: Arc<AtomicBool>,
    poll_interval: Duration,
) -> thread::JoinHandle<()> {
    thread::spawn(move || {
        let mut source = TerminalInput::new();
        while !shutdown.load(Ordering::SeqCst) {
            match source.poll_bytes(Some(poll_interval)) {
                Ok(Some(bytes)) => {
                    for event in decode(&bytes) {
                        if event == InputEvent::Ignored {
                            continue;
                        }
                        if tx.send(event).is_err() {
                            return;
                        }
                    }
                }
                Ok(None) => {
                    // No input this tick; keep polling.
                    continue;
                }
                Err(err) => {
                    eprintln!("Input thread error: {}", err);
                    break;
                }
            }
        }
    })
}
