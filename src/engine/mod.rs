//! Engine module for the countdown timer.
//!
//! - `timer`: async driver that applies commands, ticks the countdown and
//!   sends the expiry notification

pub mod timer;

pub use timer::{ScreenEvent, TimerEngine};
