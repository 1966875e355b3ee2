//! Notification system error types.
//!
//! Notification failures never stop a countdown; callers log them and move
//! on.

use thiserror::Error;

/// Errors that can occur in the notification system.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum NotificationError {
    /// No notification backend exists on this system.
    #[error("no desktop notification backend available")]
    NotAvailable,

    /// The backend ran but reported a failure.
    #[error("failed to send notification: {0}")]
    SendFailed(String),

    /// The backend did not finish in time.
    #[error("notification timed out after {0}s")]
    Timeout(u64),

    /// The notification text was rejected before sending.
    #[error("invalid notification: {0}")]
    InvalidInput(String),
}

impl NotificationError {
    /// Returns true if a terminal fallback is worth trying.
    #[must_use]
    pub fn should_fallback(&self) -> bool {
        !matches!(self, Self::InvalidInput(_))
    }

    /// Returns a user-friendly suggestion for resolving this error.
    #[must_use]
    pub fn suggestion(&self) -> &'static str {
        match self {
            Self::NotAvailable => "install notify-send (libnotify) or use --notifier terminal",
            Self::SendFailed(_) => "check that a notification daemon is running",
            Self::Timeout(_) => "raise notification.timeout_seconds in the config file",
            Self::InvalidInput(_) => "check the notification title and body in the config file",
        }
    }
}
