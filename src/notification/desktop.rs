//! Desktop notifications through the platform's command-line notifier.
//!
//! - macOS: `osascript -e 'display notification ...'`
//! - Linux and BSD: `notify-send`
//!
//! The command runs in a blocking task under a timeout so a hung notifier
//! can't stall the timer loop.

use std::env;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::time::Duration;

use tokio::time::timeout;
use tracing::debug;

use super::error::NotificationError;
use super::Notification;

/// Path to the AppleScript runner on macOS.
const OSASCRIPT_PATH: &str = "/usr/bin/osascript";

/// Name of the libnotify command-line client.
const NOTIFY_SEND: &str = "notify-send";

/// Longest title or body passed to the backend.
const MAX_TEXT_LENGTH: usize = 256;

// ============================================================================
// Backend
// ============================================================================

/// External program used to show the notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Backend {
    /// macOS `osascript`
    AppleScript(PathBuf),
    /// libnotify `notify-send`
    NotifySend(PathBuf),
}

impl Backend {
    /// Detects the backend for the current system.
    pub fn detect() -> Option<Self> {
        if cfg!(target_os = "macos") {
            let path = Path::new(OSASCRIPT_PATH);
            return path.exists().then(|| Backend::AppleScript(path.to_path_buf()));
        }
        find_in_path(NOTIFY_SEND).map(Backend::NotifySend)
    }

    /// Builds the command line for a notification.
    pub fn command(&self, notification: &Notification) -> (PathBuf, Vec<String>) {
        match self {
            Backend::AppleScript(path) => {
                let script = format!(
                    "display notification \"{}\" with title \"{}\" sound name \"default\"",
                    applescript_escape(&notification.body),
                    applescript_escape(&notification.title),
                );
                (path.clone(), vec!["-e".to_string(), script])
            }
            Backend::NotifySend(path) => (
                path.clone(),
                vec![
                    "--app-name=countdown".to_string(),
                    notification.title.clone(),
                    notification.body.clone(),
                ],
            ),
        }
    }
}

/// Escapes text for use inside an AppleScript string literal.
fn applescript_escape(text: &str) -> String {
    text.replace('\\', "\\\\").replace('"', "\\\"")
}

/// Looks up an executable name in `PATH`.
fn find_in_path(name: &str) -> Option<PathBuf> {
    let paths = env::var_os("PATH")?;
    env::split_paths(&paths)
        .map(|dir| dir.join(name))
        .find(|candidate| candidate.is_file())
}

/// Rejects notification text the backend can't show.
pub fn validate_notification(notification: &Notification) -> Result<(), NotificationError> {
    if notification.title.trim().is_empty() {
        return Err(NotificationError::InvalidInput(
            "title must not be empty".to_string(),
        ));
    }
    if notification.title.chars().count() > MAX_TEXT_LENGTH
        || notification.body.chars().count() > MAX_TEXT_LENGTH
    {
        return Err(NotificationError::InvalidInput(format!(
            "title and body must be at most {} characters",
            MAX_TEXT_LENGTH
        )));
    }
    Ok(())
}

// ============================================================================
// DesktopNotifier
// ============================================================================

/// Sends notifications through the detected desktop backend.
#[derive(Debug, Clone)]
pub struct DesktopNotifier {
    backend: Option<Backend>,
    timeout_seconds: u64,
}

impl DesktopNotifier {
    /// Creates a notifier using the backend for the current system.
    #[must_use]
    pub fn new(timeout_seconds: u64) -> Self {
        Self::with_backend(Backend::detect(), timeout_seconds)
    }

    /// Creates a notifier with an explicit backend.
    #[must_use]
    pub fn with_backend(backend: Option<Backend>, timeout_seconds: u64) -> Self {
        if backend.is_none() {
            debug!("no desktop notification backend found");
        }
        Self {
            backend,
            timeout_seconds,
        }
    }

    pub fn is_available(&self) -> bool {
        self.backend.is_some()
    }

    /// Shows a notification.
    ///
    /// # Errors
    ///
    /// Returns an error if no backend is available, the text is invalid, the
    /// command fails, or it does not finish within the timeout.
    pub async fn send(&self, notification: &Notification) -> Result<(), NotificationError> {
        validate_notification(notification)?;
        let backend = self.backend.as_ref().ok_or(NotificationError::NotAvailable)?;
        let (program, args) = backend.command(notification);

        debug!(id = %notification.id, program = %program.display(), "sending desktop notification");

        match timeout(
            Duration::from_secs(self.timeout_seconds),
            execute(program, args),
        )
        .await
        {
            Ok(result) => result,
            Err(_) => Err(NotificationError::Timeout(self.timeout_seconds)),
        }
    }
}

/// Runs the notifier command in a blocking task.
async fn execute(program: PathBuf, args: Vec<String>) -> Result<(), NotificationError> {
    let output = tokio::task::spawn_blocking(move || Command::new(&program).args(&args).output())
        .await
        .map_err(|e| NotificationError::SendFailed(format!("task failed: {}", e)))?
        .map_err(|e| NotificationError::SendFailed(format!("command failed: {}", e)))?;

    if output.status.success() {
        Ok(())
    } else {
        let stderr = String::from_utf8_lossy(&output.stderr);
        Err(NotificationError::SendFailed(stderr.trim().to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn notification(title: &str, body: &str) -> Notification {
        Notification::new(title, body)
    }

    #[test]
    fn test_applescript_escape() {
        assert_eq!(applescript_escape(r#"say "hi""#), r#"say \"hi\""#);
        assert_eq!(applescript_escape(r"a\b"), r"a\\b");
    }

    #[test]
    fn test_applescript_command() {
        let backend = Backend::AppleScript(PathBuf::from(OSASCRIPT_PATH));
        let (program, args) = backend.command(&notification("Countdown", "Time's up!"));

        assert_eq!(program, PathBuf::from("/usr/bin/osascript"));
        assert_eq!(args[0], "-e");
        assert!(args[1].contains("display notification \"Time's up!\""));
        assert!(args[1].contains("with title \"Countdown\""));
    }

    #[test]
    fn test_notify_send_command() {
        let backend = Backend::NotifySend(PathBuf::from("/usr/bin/notify-send"));
        let (program, args) = backend.command(&notification("Countdown", "Time's up!"));

        assert_eq!(program, PathBuf::from("/usr/bin/notify-send"));
        assert_eq!(args, vec!["--app-name=countdown", "Countdown", "Time's up!"]);
    }

    #[test]
    fn test_validate_notification() {
        assert!(validate_notification(&notification("Countdown", "done")).is_ok());
        assert!(matches!(
            validate_notification(&notification(" ", "done")),
            Err(NotificationError::InvalidInput(_))
        ));
        let long = "x".repeat(MAX_TEXT_LENGTH + 1);
        assert!(validate_notification(&notification("Countdown", &long)).is_err());
    }

    #[tokio::test]
    async fn test_send_without_backend() {
        let notifier = DesktopNotifier::with_backend(None, 1);
        assert!(!notifier.is_available());

        let result = notifier.send(&notification("Countdown", "done")).await;
        assert_eq!(result, Err(NotificationError::NotAvailable));
    }

    #[tokio::test]
    async fn test_send_failing_command() {
        let backend = Backend::NotifySend(PathBuf::from("/nonexistent/notify-send"));
        let notifier = DesktopNotifier::with_backend(Some(backend), 5);

        let result = notifier.send(&notification("Countdown", "done")).await;
        assert!(matches!(result, Err(NotificationError::SendFailed(_))));
    }

    #[test]
    fn test_find_in_path_missing() {
        assert!(find_in_path("definitely-not-a-real-binary-4821").is_none());
    }

    #[tokio::test]
    #[ignore = "Shows a real desktop notification"]
    async fn test_send_integration() {
        let notifier = DesktopNotifier::new(5);
        let result = notifier.send(&notification("Countdown", "Test")).await;
        assert!(result.is_ok(), "Failed to notify: {:?}", result);
    }
}
