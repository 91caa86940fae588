//! Controller: the top-level state machine driving the ball device.
//!
//! Events arrive on a channel fed by the input thread; the controller owns the
//! command channel outright and is the only writer, so register-pair updates
//! are serialized by construction. Two modes share the loop: `Simple` steps
//! the ball one pixel per keypress, `Animated` runs a full jump/duck per
//! keypress and ignores everything decoded while the run is in flight.

use crate::animation::{JumpProfile, JumpRun, SAMPLE_PERIOD};
use crate::device::BallChannel;
use crate::error::{BallctlError, Result};
use crate::input::InputEvent;
use crate::protocol::{Color, Position, TILE, Y_MAX};
use std::time::Duration;
use tokio::sync::mpsc::error::TryRecvError;
use tokio::sync::mpsc::UnboundedReceiver;

/// Rest position of the simple variant: screen center, left edge.
const SIMPLE_START: Position = Position { x: 10, y: 240 };
/// Rest position of the animated variant: four tile rows above the bottom.
const ANIMATED_START: Position = Position {
    x: 16,
    y: 480 - 4 * TILE - 16,
};

/// Which controller variant runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Arrow keys move the ball one pixel, clamped to the screen.
    Simple,
    /// Arrow keys trigger a timed jump (up) or duck (down).
    Animated,
}

/// Loop state, evaluated at the top of each iteration. `Quit` is terminal and
/// reachable from `Idle` only; a run in flight always completes.
enum ControlState {
    Idle,
    Animating(JumpRun),
    Quit,
}

/// Top-level control loop over one exclusively-owned command channel.
pub struct Controller {
    channel: Box<dyn BallChannel>,
    events: UnboundedReceiver<InputEvent>,
    position: Position,
    base_y: i32,
    mode: Mode,
}

impl Controller {
    /// Wire up the controller and perform the startup writes: black
    /// background, variant rest position. A failed startup write is fatal.
    pub fn new(
        mut channel: Box<dyn BallChannel>,
        events: UnboundedReceiver<InputEvent>,
        mode: Mode,
    ) -> Result<Self> {
        let position = match mode {
            Mode::Simple => SIMPLE_START,
            Mode::Animated => ANIMATED_START,
        };

        channel.write_background(Color::BLACK)?;
        channel.write_position(position)?;

        Ok(Self {
            channel,
            events,
            position,
            base_y: position.y,
            mode,
        })
    }

    /// Current in-memory position (hardware may lag one failed write behind).
    pub fn position(&self) -> Position {
        self.position
    }

    /// Run the control loop until quit or a fatal poll failure.
    pub async fn run(&mut self) -> Result<()> {
        match self.mode {
            Mode::Simple => self.run_simple().await,
            Mode::Animated => self.run_animated().await,
        }
    }

    /// Degenerate variant: every arrow keypress is one clamped pixel step and
    /// one position write. No intermediate state.
    async fn run_simple(&mut self) -> Result<()> {
        loop {
            match self.next_event().await? {
                InputEvent::MoveUp => {
                    if self.position.y > 0 {
                        self.position.y -= 1;
                    }
                    self.write_position();
                }
                InputEvent::MoveDown => {
                    if self.position.y < Y_MAX {
                        self.position.y += 1;
                    }
                    self.write_position();
                }
                InputEvent::Quit => return Ok(()),
                InputEvent::Ignored => {}
            }
        }
    }

    async fn run_animated(&mut self) -> Result<()> {
        let mut state = ControlState::Idle;
        loop {
            state = match state {
                ControlState::Idle => match self.next_event().await? {
                    InputEvent::MoveUp => {
                        ControlState::Animating(JumpRun::start(JumpProfile::new(self.base_y, -TILE)))
                    }
                    InputEvent::MoveDown => {
                        ControlState::Animating(JumpRun::start(JumpProfile::new(self.base_y, TILE)))
                    }
                    InputEvent::Quit => ControlState::Quit,
                    InputEvent::Ignored => ControlState::Idle,
                },
                ControlState::Animating(run) => {
                    self.drive_run(run).await;
                    ControlState::Idle
                }
                ControlState::Quit => return Ok(()),
            };
        }
    }

    /// Execute one run to completion. No preemption: events decoded while the
    /// run is in flight are drained and discarded, Quit included, so nothing
    /// else can touch the position register pair mid-run.
    async fn drive_run(&mut self, run: JumpRun) {
        loop {
            let elapsed = run.elapsed();
            if run.profile().is_complete(elapsed) {
                // Forced rest write: guards against truncation drift.
                self.position.y = run.profile().base_y;
                self.write_position();
                return;
            }

            self.position.y = run.profile().sample(elapsed);
            self.write_position();
            self.discard_pending_events();
            tokio::time::sleep(SAMPLE_PERIOD).await;
        }
    }

    /// Keep the input channel drained during a run so bytes are not lost, but
    /// drop the decoded events.
    fn discard_pending_events(&mut self) {
        loop {
            match self.events.try_recv() {
                Ok(event) => {
                    log::debug!("discarding {:?} received mid-run", event);
                }
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => return,
            }
        }
    }

    /// A closed event channel means the input thread died: fatal.
    async fn next_event(&mut self) -> Result<InputEvent> {
        self.events
            .recv()
            .await
            .ok_or_else(|| BallctlError::poll("input event channel closed"))
    }

    /// Best-effort register write. A single failure leaves hardware state one
    /// frame stale; the next write re-synchronizes it.
    fn write_position(&mut self) {
        if let Err(err) = self.channel.write_position(self.position) {
            log::warn!("position write failed: {}", err);
        }
    }
}

/// Poll interval handed to the input thread; also bounds how long shutdown
/// takes to be observed.
pub const INPUT_POLL_INTERVAL: Duration = Duration::from_millis(50);
