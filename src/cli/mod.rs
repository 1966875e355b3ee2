//! CLI module for the countdown timer.
//!
//! This module provides the command-line interface:
//! - `commands`: Command definitions using clap derive
//! - `display`: Output formatting and display logic
//! - `input`: Interactive line parsing
//! - `session`: Runs the engine against stdin and the display

pub mod commands;
pub mod display;
pub mod input;
pub mod session;

pub use commands::{Cli, Commands, NotifierKind, StartArgs};
pub use display::Display;
pub use input::{parse_line, InputLine};
pub use session::{run_session, SessionOptions};
