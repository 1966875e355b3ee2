//! Timer engine for the countdown screen.
//!
//! The engine owns the [`Screen`] and is the only place that touches it:
//! - Commands arrive on an mpsc channel
//! - A one-second ticker is armed only while the countdown is running
//! - Display events go out on an unbounded channel
//! - The notifier is called once when the countdown expires

use anyhow::{Context, Result};
use tokio::sync::{mpsc, watch};
use tokio::time::{interval_at, Duration, Instant, Interval, MissedTickBehavior};
use tracing::{debug, info, warn};

use crate::notification::{Notification, NotificationSender};
use crate::types::{
    CountdownConfig, Screen, ScreenCommand, ScreenError, TickOutcome, TimerPhase, TimerSnapshot,
};

// ============================================================================
// ScreenEvent
// ============================================================================

/// Events for the display collaborator.
#[derive(Debug, Clone, PartialEq)]
pub enum ScreenEvent {
    /// The entry buffer changed (push, pop)
    EditChanged {
        /// Current screen state
        snapshot: TimerSnapshot,
    },
    /// A countdown was committed and is waiting to start
    Committed {
        /// Committed duration in seconds
        total_seconds: u32,
    },
    /// The countdown started or resumed
    Started {
        /// Seconds left
        remaining_seconds: u32,
    },
    /// The countdown was paused
    Paused {
        /// Seconds left
        remaining_seconds: u32,
    },
    /// One second elapsed
    Tick {
        /// Current screen state
        snapshot: TimerSnapshot,
    },
    /// The countdown reached zero
    Expired,
    /// The countdown was turned back into an entry buffer
    Adjusted {
        /// Current screen state
        snapshot: TimerSnapshot,
    },
    /// A command did not apply
    Rejected {
        /// Why the command was rejected
        reason: ScreenError,
    },
}

// ============================================================================
// TimerEngine
// ============================================================================

/// Drives a [`Screen`] from commands and a per-second ticker.
pub struct TimerEngine<N> {
    /// Current screen state
    screen: Screen,
    /// Incoming user commands
    command_rx: mpsc::Receiver<ScreenCommand>,
    /// Outgoing display events
    event_tx: mpsc::UnboundedSender<ScreenEvent>,
    /// Expiry notification collaborator
    notifier: N,
    /// Configuration
    config: CountdownConfig,
    /// Armed only while running
    ticker: Option<Interval>,
    /// Whether the countdown is running, for observers outside the engine
    running_tx: watch::Sender<bool>,
}

impl<N: NotificationSender> TimerEngine<N> {
    /// Creates a new engine in edit mode.
    pub fn new(
        config: CountdownConfig,
        notifier: N,
        command_rx: mpsc::Receiver<ScreenCommand>,
        event_tx: mpsc::UnboundedSender<ScreenEvent>,
    ) -> Self {
        Self::with_screen(Screen::new(), config, notifier, command_rx, event_tx)
    }

    /// Creates a new engine starting from an existing screen.
    pub fn with_screen(
        screen: Screen,
        config: CountdownConfig,
        notifier: N,
        command_rx: mpsc::Receiver<ScreenCommand>,
        event_tx: mpsc::UnboundedSender<ScreenEvent>,
    ) -> Self {
        let (running_tx, _) = watch::channel(screen.is_running());
        Self {
            screen,
            command_rx,
            event_tx,
            notifier,
            config,
            ticker: None,
            running_tx,
        }
    }

    /// Runs the engine until the command channel closes.
    ///
    /// The ticker is armed here, never at construction.
    ///
    /// # Errors
    ///
    /// Returns an error if the event receiver has been dropped.
    pub async fn run(&mut self) -> Result<()> {
        self.sync_ticker();

        loop {
            tokio::select! {
                command = self.command_rx.recv() => match command {
                    Some(command) => {
                        self.handle_command(command)?;
                        self.sync_ticker();
                    }
                    None => break,
                },
                _ = next_tick(&mut self.ticker) => self.handle_tick().await?,
            }
        }

        debug!("command channel closed, engine stopping");
        Ok(())
    }

    /// Applies a user command and emits the resulting event.
    ///
    /// Rejected commands are reported as [`ScreenEvent::Rejected`], not as
    /// errors. Does not touch the ticker; [`run`](Self::run) re-arms or drops
    /// it after every command.
    pub fn handle_command(&mut self, command: ScreenCommand) -> Result<()> {
        let applied = self.screen.apply(command);
        self.running_tx.send_replace(self.screen.is_running());
        if let Err(reason) = applied {
            if reason.is_wrong_mode() {
                debug!(?command, %reason, "command ignored in this mode");
            } else {
                info!(?command, %reason, "command rejected");
            }
            return self.emit(ScreenEvent::Rejected { reason });
        }

        let event = match command {
            ScreenCommand::Push(_) | ScreenCommand::Pop => ScreenEvent::EditChanged {
                snapshot: self.screen.snapshot(),
            },
            ScreenCommand::Commit => {
                let total_seconds = self.snapshot().total_seconds;
                info!(total_seconds, "countdown committed");
                ScreenEvent::Committed { total_seconds }
            }
            ScreenCommand::Toggle => {
                let snapshot = self.snapshot();
                match snapshot.phase {
                    TimerPhase::Running => {
                        info!(remaining = snapshot.remaining_seconds, "countdown started");
                        ScreenEvent::Started {
                            remaining_seconds: snapshot.remaining_seconds,
                        }
                    }
                    _ => {
                        info!(remaining = snapshot.remaining_seconds, "countdown paused");
                        ScreenEvent::Paused {
                            remaining_seconds: snapshot.remaining_seconds,
                        }
                    }
                }
            }
            ScreenCommand::Adjust => {
                info!("countdown adjusted back to edit mode");
                ScreenEvent::Adjusted {
                    snapshot: self.screen.snapshot(),
                }
            }
        };

        self.emit(event)
    }

    /// Handles one elapsed tick.
    async fn handle_tick(&mut self) -> Result<()> {
        // Pausing or adjusting drops the ticker, but check again before
        // touching the countdown.
        if !self.screen.is_running() {
            self.ticker = None;
            return Ok(());
        }

        match self.screen.tick() {
            TickOutcome::Ignored => {}
            TickOutcome::Counted { remaining_seconds } => {
                debug!(remaining_seconds, "tick");
                self.emit(ScreenEvent::Tick {
                    snapshot: self.screen.snapshot(),
                })?;
            }
            TickOutcome::Expired => {
                self.ticker = None;
                self.running_tx.send_replace(false);
                self.emit(ScreenEvent::Tick {
                    snapshot: self.screen.snapshot(),
                })?;
                self.handle_expired().await?;
            }
        }

        Ok(())
    }

    /// Sends the notification, then emits the expiry event.
    async fn handle_expired(&mut self) -> Result<()> {
        info!("countdown expired");

        if !self.config.notification.enabled {
            debug!("notifications disabled, skipping");
        } else if !self.notifier.is_available() {
            warn!("no notifier available, skipping expiry notification");
        } else {
            let notification = Notification::times_up(&self.config.notification);
            if let Err(e) = self.notifier.notify(&notification).await {
                warn!(id = %notification.id, "failed to send expiry notification: {}", e);
            }
        }

        self.emit(ScreenEvent::Expired)
    }

    /// Arms the ticker when the countdown is running and drops it otherwise.
    fn sync_ticker(&mut self) {
        match (self.screen.is_running(), self.ticker.is_some()) {
            (true, false) => {
                let period = Duration::from_millis(self.config.tick_interval_ms);
                let mut ticker = interval_at(Instant::now() + period, period);
                ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
                self.ticker = Some(ticker);
            }
            (false, true) => self.ticker = None,
            _ => {}
        }
    }

    fn emit(&self, event: ScreenEvent) -> Result<()> {
        self.event_tx
            .send(event)
            .context("Failed to send screen event")
    }

    /// Subscribes to the running state of the countdown.
    ///
    /// The value is republished after every handled command, so a change
    /// notification also means the command queue moved.
    pub fn running(&self) -> watch::Receiver<bool> {
        self.running_tx.subscribe()
    }

    /// Returns a snapshot of the current screen.
    pub fn snapshot(&self) -> TimerSnapshot {
        self.screen.snapshot()
    }

    /// Returns a reference to the current screen.
    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    /// Returns a reference to the notifier.
    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    /// Returns true if the ticker is armed.
    pub fn is_ticking(&self) -> bool {
        self.ticker.is_some()
    }
}

/// Waits for the next tick, or forever if no ticker is armed.
async fn next_tick(ticker: &mut Option<Interval>) {
    match ticker {
        Some(ticker) => {
            ticker.tick().await;
        }
        None => std::future::pending::<()>().await,
    }
}

// ============================================================================
// Tests
// ============================================================================
