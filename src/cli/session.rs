//! Terminal session: stdin, the timer engine and the display wired together.
//!
//! Stdin is read on its own thread and forwarded line by line over a channel,
//! so a read that never returns cannot hold up shutdown.

use std::io::BufRead;

use anyhow::{Context, Result};
use tokio::sync::{mpsc, watch};
use tracing::{debug, info, warn};

use super::display::Display;
use super::input::{parse_line, InputLine};
use crate::engine::{ScreenEvent, TimerEngine};
use crate::notification::NotificationSender;
use crate::types::{CountdownConfig, DigitBuffer, Screen, ScreenCommand};

/// Capacity of the command and stdin line channels.
const CHANNEL_CAPACITY: usize = 32;

// ============================================================================
// SessionOptions
// ============================================================================

/// How a session starts and when it ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionOptions {
    /// Duration to commit right away
    pub initial: Option<DigitBuffer>,
    /// Start the committed countdown without waiting for a toggle
    pub autostart: bool,
    /// End the session when the countdown expires; stdin EOF then only ends
    /// it once the countdown is not running
    pub exit_on_expiry: bool,
    /// Print JSON lines instead of text
    pub json: bool,
}

impl SessionOptions {
    /// Options for `countdown start`.
    pub fn start(duration: DigitBuffer, autostart: bool, json: bool) -> Self {
        Self {
            initial: Some(duration),
            autostart,
            exit_on_expiry: true,
            json,
        }
    }

    /// Options for `countdown interactive`.
    pub fn interactive() -> Self {
        Self {
            initial: None,
            autostart: false,
            exit_on_expiry: false,
            json: false,
        }
    }
}

// ============================================================================
// Session
// ============================================================================

/// Runs one countdown session until it expires, the user quits or Ctrl-C is
/// pressed. A closed stdin ends an interactive session at once and a `start`
/// session as soon as its countdown is not running.
///
/// # Errors
///
/// Returns an error if the engine fails or Ctrl-C cannot be listened for.
pub async fn run_session<N: NotificationSender>(
    config: CountdownConfig,
    notifier: N,
    options: SessionOptions,
) -> Result<()> {
    let (command_tx, command_rx) = mpsc::channel(CHANNEL_CAPACITY);
    let (event_tx, mut event_rx) = mpsc::unbounded_channel();

    let screen = options
        .initial
        .map(Screen::with_buffer)
        .unwrap_or_default();
    let mut engine = TimerEngine::with_screen(screen, config, notifier, command_rx, event_tx);

    if options.initial.is_some() {
        engine
            .handle_command(ScreenCommand::Commit)
            .context("Failed to commit duration")?;
        if options.autostart {
            engine
                .handle_command(ScreenCommand::Toggle)
                .context("Failed to start countdown")?;
        }
    } else {
        if !options.json {
            Display::show_help();
        }
        Display::show_snapshot(&engine.snapshot(), options.json);
    }

    let line_rx = spawn_stdin_reader();
    let hold_while_running = options.exit_on_expiry.then(|| engine.running());
    let input = forward_input(line_rx, command_tx, hold_while_running);
    let drive = async { tokio::join!(engine.run(), input).0 };

    tokio::select! {
        result = drive => result?,
        () = render(&mut event_rx, options) => debug!("countdown finished"),
        result = tokio::signal::ctrl_c() => {
            result.context("Failed to listen for Ctrl-C")?;
            info!("interrupted");
        }
    }

    // Events emitted while the engine drained its last commands.
    while let Ok(event) = event_rx.try_recv() {
        Display::show_event(&event, options.json);
    }

    Ok(())
}

/// Prints events until the countdown expires (when the session ends on
/// expiry) or the engine goes away.
async fn render(event_rx: &mut mpsc::UnboundedReceiver<ScreenEvent>, options: SessionOptions) {
    while let Some(event) = event_rx.recv().await {
        Display::show_event(&event, options.json);
        if options.exit_on_expiry && matches!(event, ScreenEvent::Expired) {
            return;
        }
    }
}

/// Turns stdin lines into screen commands.
///
/// Returns on `quit` or EOF. With `hold_while_running`, EOF only returns once
/// every forwarded command has been handled and the countdown is not running. Returning drops the command sender, which
/// lets the engine finish.
async fn forward_input(
    mut line_rx: mpsc::Receiver<String>,
    command_tx: mpsc::Sender<ScreenCommand>,
    hold_while_running: Option<watch::Receiver<bool>>,
) {
    while let Some(line) = line_rx.recv().await {
        match parse_line(&line) {
            InputLine::Commands(commands) => {
                for command in commands {
                    if command_tx.send(command).await.is_err() {
                        return;
                    }
                }
            }
            InputLine::Quit => {
                debug!("quit requested");
                return;
            }
            InputLine::Help => Display::show_help(),
            InputLine::Empty => {}
            InputLine::Unknown(text) => {
                Display::show_error(&format!("unknown input '{}' (type h for help)", text));
            }
        }
    }

    debug!("stdin closed");
    if let Some(mut running) = hold_while_running {
        loop {
            let drained = command_tx.capacity() == command_tx.max_capacity();
            if drained && !*running.borrow_and_update() {
                debug!("countdown not running, ending input");
                break;
            }
            if running.changed().await.is_err() {
                break;
            }
        }
    }
}

/// Reads stdin lines on a dedicated thread.
fn spawn_stdin_reader() -> mpsc::Receiver<String> {
    let (line_tx, line_rx) = mpsc::channel(CHANNEL_CAPACITY);

    std::thread::spawn(move || {
        for line in std::io::stdin().lock().lines() {
            match line {
                Ok(line) => {
                    if line_tx.blocking_send(line).is_err() {
                        break;
                    }
                }
                Err(e) => {
                    warn!("failed to read stdin: {}", e);
                    break;
                }
            }
        }
    });

    line_rx
}

// ============================================================================
// Tests
// ============================================================================
