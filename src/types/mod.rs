//! Core data types for the countdown timer.
//!
//! This module defines:
//! - The six-digit entry buffer
//! - The countdown state machine
//! - The edit/run screen that switches between them
//! - Configuration with validation

pub mod config;
pub mod countdown;
pub mod digit_buffer;
pub mod error;
pub mod screen;

use serde::{Deserialize, Serialize};

pub use config::{
    ConfigError, CountdownConfig, NotificationConfig, MAX_TICK_INTERVAL_MS, MIN_TICK_INTERVAL_MS,
};
pub use countdown::{CountdownTimer, TickOutcome};
pub use digit_buffer::{DigitBuffer, DIGIT_COUNT, MAX_ENTRY_SECONDS, MAX_SECONDS};
pub use error::{DigitError, ScreenError};
pub use screen::{Screen, ScreenCommand, ScreenMode, TimerSnapshot};

// ============================================================================
// TimerPhase
// ============================================================================

/// Represents the current phase of a countdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimerPhase {
    /// Committed but not started
    Idle,
    /// Counting down
    Running,
    /// Stopped by the user, resumable
    Paused,
    /// Reached zero
    Expired,
}

impl TimerPhase {
    /// Returns the string representation of the phase.
    pub fn as_str(&self) -> &'static str {
        match self {
            TimerPhase::Idle => "idle",
            TimerPhase::Running => "running",
            TimerPhase::Paused => "paused",
            TimerPhase::Expired => "expired",
        }
    }

    /// Returns true if the countdown is actively counting down.
    pub fn is_active(&self) -> bool {
        matches!(self, TimerPhase::Running)
    }
}

impl Default for TimerPhase {
    fn default() -> Self {
        TimerPhase::Idle
    }
}

// ============================================================================
// Formatting
// ============================================================================

/// Formats a number of seconds as `HH : MM : SS`.
pub fn format_clock(total_seconds: u32) -> String {
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;
    format!("{:02} : {:02} : {:02}", hours, minutes, seconds)
}

// ============================================================================
// Tests
// ============================================================================
