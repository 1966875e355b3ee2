//! Expiry notifications.
//!
//! The countdown core only knows the [`NotificationSender`] trait. This
//! module provides:
//!
//! - [`DesktopNotifier`]: native desktop notifications via `osascript` or
//!   `notify-send`
//! - [`TerminalNotifier`]: terminal bell plus a line on stderr
//! - [`Notifier`]: runtime selection between the two, falling back to the
//!   terminal when the desktop backend fails
//! - [`MockNotificationSender`]: records notifications for tests
//!
//! # Example
//!
//! ```rust,no_run
//! use countdown::notification::{Notification, NotificationSender, Notifier};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let notifier = Notifier::desktop(5);
//! notifier.notify(&Notification::new("Countdown", "Time's up!")).await?;
//! # Ok(())
//! # }
//! ```

mod desktop;
pub mod error;
mod terminal;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use uuid::Uuid;

pub use self::desktop::{validate_notification, Backend, DesktopNotifier};
pub use self::error::NotificationError;
pub use self::terminal::TerminalNotifier;

use crate::types::NotificationConfig;

// ============================================================================
// Notification
// ============================================================================

/// A single notification to show.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    /// Unique ID, used in logs
    pub id: Uuid,
    /// Title line
    pub title: String,
    /// Body text
    pub body: String,
}

impl Notification {
    /// Creates a notification with a fresh ID.
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            body: body.into(),
        }
    }

    /// Creates the "time's up" notification described by the config.
    pub fn times_up(config: &NotificationConfig) -> Self {
        Self::new(config.title.clone(), config.body.clone())
    }
}

// ============================================================================
// NotificationSender
// ============================================================================

#[allow(async_fn_in_trait)]
pub trait NotificationSender {
    /// Shows a notification.
    async fn notify(&self, notification: &Notification) -> Result<(), NotificationError>;

    /// Returns true if this sender can show anything.
    fn is_available(&self) -> bool;
}

// ============================================================================
// Notifier
// ============================================================================

/// Notification backend chosen at startup.
#[derive(Debug, Clone)]
pub enum Notifier {
    /// Desktop notification with terminal fallback
    Desktop(DesktopNotifier),
    /// Terminal bell only
    Terminal(TerminalNotifier),
}

impl Notifier {
    /// Creates a desktop notifier with the given command timeout.
    #[must_use]
    pub fn desktop(timeout_seconds: u64) -> Self {
        Notifier::Desktop(DesktopNotifier::new(timeout_seconds))
    }

    /// Creates a terminal notifier.
    #[must_use]
    pub fn terminal() -> Self {
        Notifier::Terminal(TerminalNotifier::new())
    }
}

impl NotificationSender for Notifier {
    async fn notify(&self, notification: &Notification) -> Result<(), NotificationError> {
        match self {
            Notifier::Desktop(desktop) => match desktop.send(notification).await {
                Ok(()) => Ok(()),
                Err(e) if e.should_fallback() => {
                    tracing::warn!("desktop notification failed, using terminal: {}", e);
                    tracing::info!("{}", e.suggestion());
                    TerminalNotifier::new().send(notification)
                }
                Err(e) => Err(e),
            },
            Notifier::Terminal(terminal) => terminal.send(notification),
        }
    }

    fn is_available(&self) -> bool {
        match self {
            Notifier::Desktop(desktop) => desktop.is_available(),
            Notifier::Terminal(_) => true,
        }
    }
}

// ============================================================================
// MockNotificationSender
// ============================================================================

#[derive(Debug)]
pub struct MockNotificationSender {
    notifications: Mutex<Vec<Notification>>,
    available: AtomicBool,
    should_fail: AtomicBool,
}

impl Default for MockNotificationSender {
    fn default() -> Self {
        Self::new()
    }
}

impl MockNotificationSender {
    #[must_use]
    pub fn new() -> Self {
        Self {
            notifications: Mutex::new(Vec::new()),
            available: AtomicBool::new(true),
            should_fail: AtomicBool::new(false),
        }
    }

    pub fn set_available(&self, available: bool) {
        self.available.store(available, Ordering::SeqCst);
    }

    pub fn set_should_fail(&self, should_fail: bool) {
        self.should_fail.store(should_fail, Ordering::SeqCst);
    }

    #[must_use]
    pub fn get_notifications(&self) -> Vec<Notification> {
        self.notifications
            .lock()
            .map(|n| n.clone())
            .unwrap_or_default()
    }

    #[must_use]
    pub fn notification_count(&self) -> usize {
        self.notifications.lock().map(|n| n.len()).unwrap_or(0)
    }
}

impl NotificationSender for MockNotificationSender {
    async fn notify(&self, notification: &Notification) -> Result<(), NotificationError> {
        if self.should_fail.load(Ordering::SeqCst) {
            return Err(NotificationError::SendFailed("Mock failure".to_string()));
        }
        if let Ok(mut notifications) = self.notifications.lock() {
            notifications.push(notification.clone());
        }
        Ok(())
    }

    fn is_available(&self) -> bool {
        self.available.load(Ordering::SeqCst)
    }
}
