//! Countdown state machine.
//!
//! A [`CountdownTimer`] is created when a duration is committed and lives
//! until the user adjusts back to edit mode. It never reads the clock; the
//! caller drives it with one [`tick`](CountdownTimer::tick) per elapsed
//! second.

use super::digit_buffer::DigitBuffer;
use super::{format_clock, TimerPhase};

// ============================================================================
// TickOutcome
// ============================================================================

/// Result of delivering one tick to the timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// The timer was not running; nothing changed.
    Ignored,
    /// One second was counted down.
    Counted {
        /// Seconds left after this tick
        remaining_seconds: u32,
    },
    /// This tick brought the timer to zero.
    Expired,
}

// ============================================================================
// CountdownTimer
// ============================================================================

/// Countdown over a fixed number of seconds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountdownTimer {
    phase: TimerPhase,
    remaining_seconds: u32,
    total_seconds: u32,
}

impl CountdownTimer {
    /// Creates a timer that is ready to start.
    ///
    /// A zero-length timer starts out expired and never reports expiry.
    pub fn new(total_seconds: u32) -> Self {
        let phase = if total_seconds == 0 {
            TimerPhase::Expired
        } else {
            TimerPhase::Idle
        };

        Self {
            phase,
            remaining_seconds: total_seconds,
            total_seconds,
        }
    }

    /// Creates a timer from the duration entered in `buffer`.
    pub fn from_buffer(buffer: &DigitBuffer) -> Self {
        Self::new(buffer.total_seconds())
    }

    /// Starts or resumes the countdown.
    ///
    /// Returns true if the phase changed.
    pub fn start(&mut self) -> bool {
        match self.phase {
            TimerPhase::Idle | TimerPhase::Paused if self.remaining_seconds > 0 => {
                self.phase = TimerPhase::Running;
                true
            }
            _ => false,
        }
    }

    /// Pauses a running countdown.
    ///
    /// Returns true if the phase changed.
    pub fn pause(&mut self) -> bool {
        if self.phase == TimerPhase::Running {
            self.phase = TimerPhase::Paused;
            true
        } else {
            false
        }
    }

    /// Flips between running and paused. Has no effect once expired.
    ///
    /// Returns the phase after the toggle.
    pub fn toggle(&mut self) -> TimerPhase {
        if !self.pause() {
            self.start();
        }
        self.phase
    }

    /// Counts down one second if running.
    ///
    /// [`TickOutcome::Expired`] is reported on the tick that reaches zero
    /// and never again for this timer.
    pub fn tick(&mut self) -> TickOutcome {
        if self.phase != TimerPhase::Running {
            return TickOutcome::Ignored;
        }

        self.remaining_seconds = self.remaining_seconds.saturating_sub(1);

        if self.remaining_seconds == 0 {
            self.phase = TimerPhase::Expired;
            TickOutcome::Expired
        } else {
            TickOutcome::Counted {
                remaining_seconds: self.remaining_seconds,
            }
        }
    }

    /// Leaves the countdown and returns a buffer seeded with the time left.
    ///
    /// Consumes the timer; an adjusted countdown cannot be resumed.
    pub fn adjust(self) -> DigitBuffer {
        DigitBuffer::from_seconds(self.remaining_seconds)
    }

    /// Fraction of the countdown already elapsed, in `[0, 1]`.
    ///
    /// A zero-length countdown is reported as complete.
    pub fn progress_fraction(&self) -> f64 {
        if self.total_seconds == 0 {
            return 1.0;
        }
        let remaining = f64::from(self.remaining_seconds) / f64::from(self.total_seconds);
        (1.0 - remaining).clamp(0.0, 1.0)
    }

    /// Remaining time formatted as `HH : MM : SS`.
    pub fn remaining_text(&self) -> String {
        format_clock(self.remaining_seconds)
    }

    pub fn phase(&self) -> TimerPhase {
        self.phase
    }

    pub fn remaining_seconds(&self) -> u32 {
        self.remaining_seconds
    }

    pub fn total_seconds(&self) -> u32 {
        self.total_seconds
    }

    pub fn is_running(&self) -> bool {
        self.phase.is_active()
    }

    pub fn is_expired(&self) -> bool {
        self.phase == TimerPhase::Expired
    }
}

// ============================================================================
// Tests
// ============================================================================
