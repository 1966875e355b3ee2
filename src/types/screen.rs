//! Edit/run mode controller.
//!
//! The screen holds exactly one of the two models at a time: the digit
//! buffer while a duration is being entered, or the countdown once it has
//! been committed. Adjusting a countdown turns it back into a buffer.

use serde::{Deserialize, Serialize};

use super::countdown::{CountdownTimer, TickOutcome};
use super::digit_buffer::DigitBuffer;
use super::error::ScreenError;
use super::TimerPhase;

// ============================================================================
// ScreenCommand
// ============================================================================

/// User input accepted by the screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenCommand {
    /// Append a digit to the entry buffer
    Push(u8),
    /// Delete the newest digit
    Pop,
    /// Start a countdown from the entered duration
    Commit,
    /// Start/stop the countdown
    Toggle,
    /// Go back to editing with the remaining time
    Adjust,
}

// ============================================================================
// ScreenMode
// ============================================================================

/// Which of the two models the screen is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScreenMode {
    /// Entering a duration
    Edit,
    /// Showing a committed countdown
    Run,
}

/// The model owned by the screen.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Mode {
    Edit(DigitBuffer),
    Run(CountdownTimer),
}

// ============================================================================
// TimerSnapshot
// ============================================================================

/// Serializable view of the screen for rendering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimerSnapshot {
    /// Edit or run
    pub mode: ScreenMode,
    /// Countdown phase (always idle in edit mode)
    pub phase: TimerPhase,
    /// Seconds left (the entered total in edit mode)
    pub remaining_seconds: u32,
    /// Committed duration (the entered total in edit mode)
    pub total_seconds: u32,
    /// Elapsed fraction in [0, 1]
    pub progress: f64,
    /// `HH : MM : SS` text
    pub display: String,
}

// ============================================================================
// Screen
// ============================================================================

/// Timer screen state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Screen {
    mode: Mode,
}

impl Default for Screen {
    fn default() -> Self {
        Self::new()
    }
}

impl Screen {
    /// Creates a screen in edit mode with an all-zero buffer.
    pub fn new() -> Self {
        Self::with_buffer(DigitBuffer::new())
    }

    /// Creates a screen in edit mode with the given buffer.
    pub fn with_buffer(buffer: DigitBuffer) -> Self {
        Self {
            mode: Mode::Edit(buffer),
        }
    }

    /// Applies a command.
    ///
    /// # Errors
    ///
    /// Returns a [`ScreenError`] if the command does not apply to the current
    /// mode or its input is invalid. The screen is left unchanged.
    pub fn apply(&mut self, command: ScreenCommand) -> Result<(), ScreenError> {
        match command {
            ScreenCommand::Push(digit) => {
                let buffer = self.buffer().ok_or(ScreenError::NotEditing)?;
                self.mode = Mode::Edit(buffer.push(digit)?);
            }
            ScreenCommand::Pop => {
                let buffer = self.buffer().ok_or(ScreenError::NotEditing)?;
                self.mode = Mode::Edit(buffer.pop());
            }
            ScreenCommand::Commit => {
                let buffer = self.buffer().ok_or(ScreenError::NotEditing)?;
                if buffer.total_seconds() == 0 {
                    return Err(ScreenError::EmptyDuration);
                }
                self.mode = Mode::Run(CountdownTimer::from_buffer(&buffer));
            }
            ScreenCommand::Toggle => match &mut self.mode {
                Mode::Run(timer) if timer.is_expired() => {
                    return Err(ScreenError::AlreadyExpired)
                }
                Mode::Run(timer) => {
                    timer.toggle();
                }
                Mode::Edit(_) => return Err(ScreenError::NotRunning),
            },
            ScreenCommand::Adjust => {
                let mode =
                    std::mem::replace(&mut self.mode, Mode::Edit(DigitBuffer::new()));
                match mode {
                    Mode::Run(timer) => self.mode = Mode::Edit(timer.adjust()),
                    edit @ Mode::Edit(_) => {
                        self.mode = edit;
                        return Err(ScreenError::NotRunning);
                    }
                }
            }
        }
        Ok(())
    }

    /// Delivers one tick to the countdown. Ignored in edit mode.
    pub fn tick(&mut self) -> TickOutcome {
        match &mut self.mode {
            Mode::Run(timer) => timer.tick(),
            Mode::Edit(_) => TickOutcome::Ignored,
        }
    }

    /// Returns the entry buffer in edit mode.
    pub fn buffer(&self) -> Option<DigitBuffer> {
        match &self.mode {
            Mode::Edit(buffer) => Some(*buffer),
            Mode::Run(_) => None,
        }
    }

    /// Returns the countdown in run mode.
    pub fn timer(&self) -> Option<&CountdownTimer> {
        match &self.mode {
            Mode::Run(timer) => Some(timer),
            Mode::Edit(_) => None,
        }
    }

    /// Returns which model is on screen.
    pub fn mode(&self) -> ScreenMode {
        match self.mode {
            Mode::Edit(_) => ScreenMode::Edit,
            Mode::Run(_) => ScreenMode::Run,
        }
    }

    /// Returns true if a countdown is running.
    pub fn is_running(&self) -> bool {
        self.timer().is_some_and(CountdownTimer::is_running)
    }

    /// Builds a snapshot for rendering.
    pub fn snapshot(&self) -> TimerSnapshot {
        match &self.mode {
            Mode::Edit(buffer) => TimerSnapshot {
                mode: self.mode(),
                phase: TimerPhase::Idle,
                remaining_seconds: buffer.total_seconds(),
                total_seconds: buffer.total_seconds(),
                progress: 0.0,
                display: buffer.display_text(),
            },
            Mode::Run(timer) => TimerSnapshot {
                mode: self.mode(),
                phase: timer.phase(),
                remaining_seconds: timer.remaining_seconds(),
                total_seconds: timer.total_seconds(),
                progress: timer.progress_fraction(),
                display: timer.remaining_text(),
            },
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
