//! Error types for time entry and the timer screen.

use thiserror::Error;

/// Errors raised by [`DigitBuffer`](super::DigitBuffer) input.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DigitError {
    /// A pushed value was outside 0-9.
    #[error("invalid digit: {0} (expected 0-9)")]
    InvalidDigit(u8),

    /// A duration string could not be read as digits or HH:MM:SS.
    #[error("invalid duration '{0}': use up to six digits or H:M:S")]
    InvalidFormat(String),
}

/// Errors raised when a command does not apply to the current screen mode.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ScreenError {
    /// The command only works while entering a duration.
    #[error("not in edit mode")]
    NotEditing,

    /// The command only works while a countdown is on screen.
    #[error("no countdown in progress")]
    NotRunning,

    /// The countdown already reached zero; only adjust applies.
    #[error("countdown already expired")]
    AlreadyExpired,

    /// Commit was requested with a zero duration.
    #[error("duration is zero")]
    EmptyDuration,

    /// Digit input was rejected.
    #[error(transparent)]
    Digit(#[from] DigitError),
}

impl ScreenError {
    /// Returns true if the command was sent in the wrong mode.
    #[must_use]
    pub fn is_wrong_mode(&self) -> bool {
        matches!(self, Self::NotEditing | Self::NotRunning)
    }
}
