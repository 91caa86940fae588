use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::mpsc;

use ballctl::device::{BallChannel, LoopbackChannel};
use ballctl::error::Result;
use ballctl::protocol::{Color, Position};
use ballctl::{Controller, InputEvent, Mode};

/// Channel wrapper that records every position write before forwarding it to
/// the loopback device.
struct RecordingChannel {
    inner: LoopbackChannel,
    writes: Arc<Mutex<Vec<Position>>>,
}

impl RecordingChannel {
    fn new() -> (Self, Arc<Mutex<Vec<Position>>>) {
        let writes = Arc::new(Mutex::new(Vec::new()));
        let channel = Self {
            inner: LoopbackChannel::new(),
            writes: Arc::clone(&writes),
        };
        (channel, writes)
    }
}

impl BallChannel for RecordingChannel {
    fn write_position(&mut self, pos: Position) -> Result<()> {
        self.writes.lock().expect("writes lock").push(pos);
        self.inner.write_position(pos)
    }

    fn write_background(&mut self, color: Color) -> Result<()> {
        self.inner.write_background(color)
    }

    fn read_position(&mut self) -> Result<Position> {
        self.inner.read_position()
    }

    fn read_background(&mut self) -> Result<Color> {
        self.inner.read_background()
    }
}

fn spawn_controller(
    mode: Mode,
) -> (
    mpsc::UnboundedSender<InputEvent>,
    Arc<Mutex<Vec<Position>>>,
    tokio::task::JoinHandle<Result<()>>,
) {
    let (tx, rx) = mpsc::unbounded_channel();
    let (channel, writes) = RecordingChannel::new();
    let mut controller =
        Controller::new(Box::new(channel), rx, mode).expect("loopback setup cannot fail");

    let handle = tokio::spawn(async move { controller.run().await });
    (tx, writes, handle)
}

#[tokio::test]
async fn simple_variant_tracks_keypresses() {
    let (tx, writes, handle) = spawn_controller(Mode::Simple);

    for event in [
        InputEvent::MoveUp,
        InputEvent::MoveUp,
        InputEvent::MoveDown,
        InputEvent::Quit,
    ] {
        tx.send(event).unwrap();
    }
    handle.await.unwrap().unwrap();

    let writes = writes.lock().unwrap();
    let ys: Vec<i32> = writes.iter().map(|pos| pos.y).collect();
    // Setup write, then one write per arrow keypress.
    assert_eq!(ys, vec![240, 239, 238, 239]);
    assert!(writes.iter().all(|pos| pos.x == 10));
}

#[tokio::test]
async fn simple_variant_never_leaves_the_screen() {
    let (tx, writes, handle) = spawn_controller(Mode::Simple);

    for _ in 0..500 {
        tx.send(InputEvent::MoveUp).unwrap();
    }
    tx.send(InputEvent::Quit).unwrap();
    handle.await.unwrap().unwrap();

    let writes = writes.lock().unwrap();
    assert!(writes.iter().all(|pos| (0..=479).contains(&pos.y)));
    assert_eq!(writes.last().unwrap().y, 0);
}

#[tokio::test(start_paused = true)]
async fn jump_profile_is_there_and_back() {
    let (tx, writes, handle) = spawn_controller(Mode::Animated);

    tx.send(InputEvent::MoveUp).unwrap();
    tokio::time::sleep(Duration::from_millis(1100)).await;
    tx.send(InputEvent::Quit).unwrap();
    handle.await.unwrap().unwrap();

    let writes = writes.lock().unwrap();
    let ys: Vec<i32> = writes.iter().map(|pos| pos.y).collect();

    // Setup write, 63 on-cadence samples, one forced rest write.
    assert_eq!(ys.len(), 65);
    assert_eq!(ys[0], 336);
    assert_eq!(ys[1], 336);
    assert_eq!(*ys.last().unwrap(), 336);
    assert_eq!(*ys.iter().min().unwrap(), 304);

    // Monotone down to the peak, then monotone back up.
    let run = &ys[1..];
    let peak = run.iter().position(|&y| y == 304).expect("peak written");
    assert!(run[..peak].windows(2).all(|w| w[1] <= w[0]));
    assert!(run[peak..].windows(2).all(|w| w[1] >= w[0]));
}

#[tokio::test(start_paused = true)]
async fn events_arriving_mid_run_do_not_start_a_second_run() {
    let (tx, writes, handle) = spawn_controller(Mode::Animated);

    tx.send(InputEvent::MoveUp).unwrap();
    tokio::time::sleep(Duration::from_millis(200)).await;

    // Both land mid-run: the duck is discarded and Quit does not cancel.
    tx.send(InputEvent::MoveDown).unwrap();
    tx.send(InputEvent::Quit).unwrap();
    tokio::time::sleep(Duration::from_millis(1000)).await;

    // The loop is idle again; only now is Quit observed.
    tx.send(InputEvent::Quit).unwrap();
    handle.await.unwrap().unwrap();

    let writes = writes.lock().unwrap();
    let ys: Vec<i32> = writes.iter().map(|pos| pos.y).collect();

    // Exactly one excursion: setup write plus a single run.
    assert_eq!(ys.len(), 65);
    assert_eq!(*ys.last().unwrap(), 336);
    assert!(ys.iter().all(|&y| (304..=336).contains(&y)));
}

#[tokio::test]
async fn quit_is_observed_from_idle() {
    let (tx, writes, handle) = spawn_controller(Mode::Animated);

    tx.send(InputEvent::Quit).unwrap();
    handle.await.unwrap().unwrap();

    // Only the setup write happened.
    assert_eq!(writes.lock().unwrap().len(), 1);
}
