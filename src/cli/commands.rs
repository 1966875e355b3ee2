//! Command definitions for the countdown CLI.
//!
//! Uses clap derive macro for argument parsing.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::types::{DigitBuffer, MAX_TICK_INTERVAL_MS, MIN_TICK_INTERVAL_MS};

// ============================================================================
// CLI Structure
// ============================================================================

/// Countdown CLI - a digit-pad countdown timer for the terminal
#[derive(Parser, Debug)]
#[command(
    name = "countdown",
    version,
    about = "Digit-pad countdown timer for the terminal",
    long_about = "Enter a duration as HH:MM:SS digits, start it, and get a notification \
                  when it reaches zero.\n\
                  Run `countdown start 130` for a 1m30s countdown, or \
                  `countdown interactive` to type digits one at a time.",
    propagate_version = true
)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Enable verbose output for debugging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to a JSON configuration file
    #[arg(short, long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Tick interval in milliseconds (overrides the config file)
    #[arg(
        long,
        global = true,
        value_name = "MS",
        value_parser = clap::value_parser!(u64).range(MIN_TICK_INTERVAL_MS..=MAX_TICK_INTERVAL_MS)
    )]
    pub tick_ms: Option<u64>,

    /// Where the expiry notification goes
    #[arg(long, global = true, value_enum, default_value_t = NotifierKind::Desktop)]
    pub notifier: NotifierKind,
}

// ============================================================================
// Subcommands
// ============================================================================

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Start a countdown from a duration
    Start(StartArgs),

    /// Enter digits and control the countdown from stdin
    Interactive,

    /// Generate shell completion scripts
    Completions {
        /// Shell type for completion script
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

// ============================================================================
// Start Command Arguments
// ============================================================================

/// Arguments for the start command
#[derive(Args, Debug, Clone)]
pub struct StartArgs {
    /// Duration as up to six digits (130 = 1m30s) or H:M:S
    #[arg(value_parser = parse_duration)]
    pub duration: DigitBuffer,

    /// Commit the duration without starting it
    #[arg(short, long)]
    pub paused: bool,

    /// Print one JSON object per event instead of text
    #[arg(long)]
    pub json: bool,
}

// ============================================================================
// Notifier Selection
// ============================================================================

/// Expiry notification backend.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NotifierKind {
    /// Desktop notification (osascript / notify-send), terminal fallback
    #[default]
    Desktop,
    /// Bell and message on stderr
    Terminal,
    /// No notification
    None,
}

// ============================================================================
// Validation Functions
// ============================================================================

/// Parses a duration argument into a digit buffer.
///
/// - Must be digits or `H:M:S`
/// - Must not be all zeros
fn parse_duration(s: &str) -> Result<DigitBuffer, String> {
    let buffer = DigitBuffer::parse(s).map_err(|e| e.to_string())?;
    if buffer.is_zero() {
        return Err("duration must be greater than zero".to_string());
    }
    Ok(buffer)
}

// ============================================================================
// Tests
// ============================================================================
