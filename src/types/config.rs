//! Countdown configuration.
//!
//! Every field has a serde default so a config file only needs the values it
//! changes. CLI flags are applied on top with the `with_*` builders.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Smallest accepted tick interval in milliseconds.
pub const MIN_TICK_INTERVAL_MS: u64 = 1;

/// Largest accepted tick interval in milliseconds.
pub const MAX_TICK_INTERVAL_MS: u64 = 60_000;

fn default_tick_interval_ms() -> u64 {
    1000
}

fn default_enabled() -> bool {
    true
}

fn default_title() -> String {
    "Countdown".to_string()
}

fn default_body() -> String {
    "Time's up!".to_string()
}

fn default_timeout_seconds() -> u64 {
    5
}

// ============================================================================
// ConfigError
// ============================================================================

/// Errors that can occur while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The config file could not be read.
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The config file is not valid JSON for this schema.
    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    /// A value is out of range.
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

// ============================================================================
// NotificationConfig
// ============================================================================

/// Settings for the expiry notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationConfig {
    /// Whether a notification is sent on expiry.
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    /// Notification title.
    #[serde(default = "default_title")]
    pub title: String,

    /// Notification body.
    #[serde(default = "default_body")]
    pub body: String,

    /// Timeout for the external notifier in seconds.
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            title: default_title(),
            body: default_body(),
            timeout_seconds: default_timeout_seconds(),
        }
    }
}

// ============================================================================
// CountdownConfig
// ============================================================================

/// Top-level configuration.
///
/// # Example
///
/// ```
/// use countdown::types::CountdownConfig;
///
/// let config = CountdownConfig::default().with_tick_interval_ms(250);
/// assert!(config.validate().is_ok());
/// assert_eq!(config.notification.body, "Time's up!");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountdownConfig {
    /// Length of one tick in milliseconds. One tick counts down one second
    /// of the displayed duration.
    #[serde(default = "default_tick_interval_ms")]
    pub tick_interval_ms: u64,

    /// Expiry notification settings.
    #[serde(default)]
    pub notification: NotificationConfig,
}

impl Default for CountdownConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: default_tick_interval_ms(),
            notification: NotificationConfig::default(),
        }
    }
}

impl CountdownConfig {
    /// Loads configuration from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed, or validated.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let display = path.display().to_string();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: display.clone(),
            source,
        })?;
        let config: Self = serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
            path: display,
            source,
        })?;
        config.validate()?;
        tracing::debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Sets the tick interval.
    pub fn with_tick_interval_ms(mut self, millis: u64) -> Self {
        self.tick_interval_ms = millis;
        self
    }

    /// Enables or disables the expiry notification.
    pub fn with_notification_enabled(mut self, enabled: bool) -> Self {
        self.notification.enabled = enabled;
        self
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] if a value is out of range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(MIN_TICK_INTERVAL_MS..=MAX_TICK_INTERVAL_MS).contains(&self.tick_interval_ms) {
            return Err(ConfigError::Invalid(format!(
                "tick_interval_ms must be {}-{}",
                MIN_TICK_INTERVAL_MS, MAX_TICK_INTERVAL_MS
            )));
        }
        if self.notification.title.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "notification title must not be empty".to_string(),
            ));
        }
        if self.notification.timeout_seconds == 0 {
            return Err(ConfigError::Invalid(
                "notification timeout must be at least 1 second".to_string(),
            ));
        }
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_values() {
        let config = CountdownConfig::default();
        assert_eq!(config.tick_interval_ms, 1000);
        assert!(config.notification.enabled);
        assert_eq!(config.notification.title, "Countdown");
        assert_eq!(config.notification.body, "Time's up!");
        assert_eq!(config.notification.timeout_seconds, 5);
    }

    #[test]
    fn test_builder_pattern() {
        let config = CountdownConfig::default()
            .with_tick_interval_ms(10)
            .with_notification_enabled(false);
        assert_eq!(config.tick_interval_ms, 10);
        assert!(!config.notification.enabled);
    }

    #[test]
    fn test_validate_boundaries() {
        assert!(CountdownConfig::default()
            .with_tick_interval_ms(MIN_TICK_INTERVAL_MS)
            .validate()
            .is_ok());
        assert!(CountdownConfig::default()
            .with_tick_interval_ms(MAX_TICK_INTERVAL_MS)
            .validate()
            .is_ok());
        assert!(CountdownConfig::default()
            .with_tick_interval_ms(0)
            .validate()
            .is_err());
        assert!(CountdownConfig::default()
            .with_tick_interval_ms(MAX_TICK_INTERVAL_MS + 1)
            .validate()
            .is_err());
    }

    #[test]
    fn test_validate_empty_title() {
        let mut config = CountdownConfig::default();
        config.notification.title = "  ".to_string();
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_deserialize_partial_uses_defaults() {
        let json = r#"{"notification":{"body":"Tea is ready"}}"#;
        let config: CountdownConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.tick_interval_ms, 1000);
        assert_eq!(config.notification.title, "Countdown");
        assert_eq!(config.notification.body, "Tea is ready");
        assert!(config.notification.enabled);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"tick_interval_ms": 500}}"#).unwrap();

        let config = CountdownConfig::load(file.path()).unwrap();
        assert_eq!(config.tick_interval_ms, 500);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = CountdownConfig::load(&dir.path().join("missing.json"));
        assert!(matches!(result, Err(ConfigError::Io { .. })));
    }

    #[test]
    fn test_load_invalid_json() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();

        let result = CountdownConfig::load(file.path());
        assert!(matches!(result, Err(ConfigError::Parse { .. })));
    }

    #[test]
    fn test_load_rejects_out_of_range() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"tick_interval_ms": 0}}"#).unwrap();

        let result = CountdownConfig::load(file.path());
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }
}
