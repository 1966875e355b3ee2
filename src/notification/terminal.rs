//! Terminal bell notifier.

use std::io::{self, Write};

use super::error::NotificationError;
use super::Notification;

/// Rings the terminal bell and prints the notification to stderr.
#[derive(Debug, Clone, Copy, Default)]
pub struct TerminalNotifier;

impl TerminalNotifier {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Writes the notification to `out`.
    ///
    /// # Errors
    ///
    /// Returns [`NotificationError::SendFailed`] if writing fails.
    pub fn write_to<W: Write>(
        &self,
        out: &mut W,
        notification: &Notification,
    ) -> Result<(), NotificationError> {
        writeln!(out, "\x07{}: {}", notification.title, notification.body)
            .and_then(|()| out.flush())
            .map_err(|e| NotificationError::SendFailed(e.to_string()))
    }

    /// Writes the notification to stderr.
    ///
    /// # Errors
    ///
    /// Returns [`NotificationError::SendFailed`] if stderr is closed.
    pub fn send(&self, notification: &Notification) -> Result<(), NotificationError> {
        self.write_to(&mut io::stderr().lock(), notification)
    }
}
