//! Countdown Timer Library
//!
//! This library provides the core functionality for the countdown CLI.
//! It includes:
//! - The six-digit time-entry buffer and the countdown state machine
//! - The edit/run screen and the async engine that ticks it
//! - Desktop and terminal expiry notifications
//! - CLI command parsing, input handling and display utilities
//! - Configuration loading and validation

pub mod cli;
pub mod engine;
pub mod notification;
pub mod types;

// Re-export commonly used types for convenience
pub use types::{
    CountdownConfig, CountdownTimer, DigitBuffer, DigitError, NotificationConfig, Screen,
    ScreenCommand, ScreenError, TickOutcome, TimerPhase, TimerSnapshot,
};

// Re-export engine types
pub use engine::{ScreenEvent, TimerEngine};

// Re-export notification types
pub use notification::{
    DesktopNotifier, MockNotificationSender, Notification, NotificationError, NotificationSender,
    Notifier, TerminalNotifier,
};
