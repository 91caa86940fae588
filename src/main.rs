//! ballctl - Keyboard controller for the VGA ball display coprocessor.

use anyhow::{Context, Result};
use ballctl::app::INPUT_POLL_INTERVAL;
use ballctl::input::{spawn_input_thread, RawModeGuard};
use ballctl::{BallChannel, Controller, LoopbackChannel, MmioChannel, Mode};
use clap::{Arg, ArgAction, Command};
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging for development
    env_logger::init();

    let matches = Command::new("ballctl")
        .version(ballctl::VERSION)
        .about("Keyboard controller for the VGA ball display coprocessor")
        .long_about(
            "ballctl reads arrow keys from the terminal and drives the ball \
             device's position and background registers, either one pixel per \
             keypress or as a timed jump/duck animation.",
        )
        .arg(
            Arg::new("device")
                .help("Path to the ball device node")
                .default_value("/dev/vga_ball")
                .index(1),
        )
        .arg(
            Arg::new("simple")
                .long("simple")
                .action(ArgAction::SetTrue)
                .help("Move one pixel per keypress instead of running the jump/duck animation"),
        )
        .arg(
            Arg::new("loopback")
                .long("loopback")
                .action(ArgAction::SetTrue)
                .help("Drive an in-process device instead of real hardware (dry run)"),
        )
        .get_matches();

    let mode = if matches.get_flag("simple") {
        Mode::Simple
    } else {
        Mode::Animated
    };

    let channel: Box<dyn BallChannel> = if matches.get_flag("loopback") {
        Box::new(LoopbackChannel::new())
    } else {
        let device_path = PathBuf::from(
            matches
                .get_one::<String>("device")
                .expect("device has a default value"),
        );
        Box::new(MmioChannel::open(&device_path).context("could not open the ball device")?)
    };

    // Raw mode is held for the whole session and restored on every exit path.
    let raw_guard = RawModeGuard::engage().context("could not configure the terminal")?;

    println!("ballctl started ({} mode)", mode_name(mode));
    match mode {
        Mode::Simple => println!("Use Up/Down arrow keys to move the ball. Press 'q' to quit."),
        Mode::Animated => println!("Up arrow jumps, Down arrow ducks. Press 'q' to quit."),
    }

    let shutdown = Arc::new(AtomicBool::new(false));
    let (tx, rx) = tokio::sync::mpsc::unbounded_channel();
    let input_thread = spawn_input_thread(tx, Arc::clone(&shutdown), INPUT_POLL_INTERVAL);

    let mut controller = Controller::new(channel, rx, mode).context("device setup failed")?;
    let result = controller.run().await;

    shutdown.store(true, Ordering::SeqCst);
    let _ = input_thread.join();
    drop(raw_guard);

    result.context("control loop failed")?;
    println!("Quit command received. ballctl terminating.");
    Ok(())
}

fn mode_name(mode: Mode) -> &'static str {
    match mode {
        Mode::Simple => "simple",
        Mode::Animated => "animated",
    }
}
