//! Display utilities for the countdown CLI.
//!
//! This module provides formatted output for:
//! - Screen events (text or JSON lines)
//! - The edit/run snapshot line with a progress bar
//! - Error and help messages

use serde_json::{json, Value};

use crate::engine::ScreenEvent;
use crate::types::{format_clock, ScreenMode, TimerSnapshot};

/// Width of the progress bar in characters.
const PROGRESS_WIDTH: usize = 20;

// ============================================================================
// Display
// ============================================================================

/// Display utilities for CLI output.
pub struct Display;

impl Display {
    /// Shows a screen event on stdout; rejections go to stderr.
    pub fn show_event(event: &ScreenEvent, json: bool) {
        if json {
            println!("{}", Self::event_json(event));
            return;
        }

        match event {
            ScreenEvent::Rejected { .. } => Self::show_error(&Self::render_event(event)),
            _ => println!("{}", Self::render_event(event)),
        }
    }

    /// Shows the current screen state.
    pub fn show_snapshot(snapshot: &TimerSnapshot, json: bool) {
        if json {
            println!("{}", json!({ "event": "snapshot", "snapshot": snapshot }));
        } else {
            println!("{}", Self::render_snapshot(snapshot));
        }
    }

    /// Shows the interactive key list.
    pub fn show_help() {
        println!("Commands (one per line):");
        println!("  0-9          push digits (a line like 130 pushes 1, 3, 0)");
        println!("  x, del       delete the last digit");
        println!("  ok, set      set the countdown");
        println!("  s, space     start / stop");
        println!("  a, adjust    go back to editing with the remaining time");
        println!("  h, help      show this list");
        println!("  q, quit      exit");
    }

    /// Shows an error message.
    pub fn show_error(message: &str) {
        eprintln!("Error: {}", message);
    }

    /// Renders an event as a text line.
    pub fn render_event(event: &ScreenEvent) -> String {
        match event {
            ScreenEvent::EditChanged { snapshot } | ScreenEvent::Tick { snapshot } => {
                Self::render_snapshot(snapshot)
            }
            ScreenEvent::Committed { total_seconds } => {
                format!("* Countdown set: {}", format_clock(*total_seconds))
            }
            ScreenEvent::Started { remaining_seconds } => {
                format!("> Started, {} left", format_clock(*remaining_seconds))
            }
            ScreenEvent::Paused { remaining_seconds } => {
                format!("|| Paused, {} left", format_clock(*remaining_seconds))
            }
            ScreenEvent::Expired => "* Time's up!".to_string(),
            ScreenEvent::Adjusted { snapshot } => {
                format!("<< Editing {}", snapshot.display)
            }
            ScreenEvent::Rejected { reason } => reason.to_string(),
        }
    }

    /// Renders a snapshot as `[phase] HH : MM : SS`, with a progress bar in
    /// run mode.
    pub fn render_snapshot(snapshot: &TimerSnapshot) -> String {
        if snapshot.mode == ScreenMode::Edit {
            return format!("[edit] {}", snapshot.display);
        }

        format!(
            "[{}] {} {} {:>3}%",
            snapshot.phase.as_str(),
            snapshot.display,
            Self::progress_bar(snapshot.progress, PROGRESS_WIDTH),
            Self::percent(snapshot.progress)
        )
    }

    /// Converts an event into a JSON object.
    pub fn event_json(event: &ScreenEvent) -> Value {
        match event {
            ScreenEvent::EditChanged { snapshot } => {
                json!({ "event": "edit_changed", "snapshot": snapshot })
            }
            ScreenEvent::Committed { total_seconds } => {
                json!({ "event": "committed", "total_seconds": total_seconds })
            }
            ScreenEvent::Started { remaining_seconds } => {
                json!({ "event": "started", "remaining_seconds": remaining_seconds })
            }
            ScreenEvent::Paused { remaining_seconds } => {
                json!({ "event": "paused", "remaining_seconds": remaining_seconds })
            }
            ScreenEvent::Tick { snapshot } => json!({ "event": "tick", "snapshot": snapshot }),
            ScreenEvent::Expired => json!({ "event": "expired" }),
            ScreenEvent::Adjusted { snapshot } => {
                json!({ "event": "adjusted", "snapshot": snapshot })
            }
            ScreenEvent::Rejected { reason } => {
                json!({ "event": "rejected", "reason": reason.to_string() })
            }
        }
    }

    /// Builds a `[####----]` bar for a fraction in [0, 1].
    pub fn progress_bar(progress: f64, width: usize) -> String {
        let filled = ((progress.clamp(0.0, 1.0) * width as f64).round() as usize).min(width);
        format!("[{}{}]", "#".repeat(filled), "-".repeat(width - filled))
    }

    fn percent(progress: f64) -> u32 {
        (progress.clamp(0.0, 1.0) * 100.0).round() as u32
    }
}

// ============================================================================
// Tests
// ============================================================================
