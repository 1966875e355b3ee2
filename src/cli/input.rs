//! Line-based input for interactive sessions.

use crate::types::ScreenCommand;

/// What a line of user input asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputLine {
    /// Commands to send to the screen, in order
    Commands(Vec<ScreenCommand>),
    /// End the session
    Quit,
    /// Show the key list
    Help,
    /// Blank line
    Empty,
    /// Anything not recognized
    Unknown(String),
}

/// Parses one line of stdin.
///
/// A line made only of digits pushes each digit in order, so `130` enters
/// one minute thirty. Keywords are case-insensitive.
pub fn parse_line(line: &str) -> InputLine {
    // A bare space is the toggle key.
    if line.trim_end_matches(['\r', '\n']) == " " {
        return InputLine::Commands(vec![ScreenCommand::Toggle]);
    }

    let word = line.trim().to_ascii_lowercase();
    if word.is_empty() {
        return InputLine::Empty;
    }

    if word.bytes().all(|b| b.is_ascii_digit()) {
        let pushes = word.bytes().map(|b| ScreenCommand::Push(b - b'0')).collect();
        return InputLine::Commands(pushes);
    }

    let command = match word.as_str() {
        "x" | "del" | "delete" | "backspace" => ScreenCommand::Pop,
        "ok" | "set" => ScreenCommand::Commit,
        "s" | "space" | "start" | "stop" | "toggle" => ScreenCommand::Toggle,
        "a" | "adjust" => ScreenCommand::Adjust,
        "q" | "quit" | "exit" => return InputLine::Quit,
        "h" | "help" | "?" => return InputLine::Help,
        _ => return InputLine::Unknown(line.trim().to_string()),
    };

    InputLine::Commands(vec![command])
}
