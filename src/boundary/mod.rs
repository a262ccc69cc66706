//! Completion rules and mode dispatch
//!
//! This module answers the editor's question "submit now, or show a
//! continuation prompt?" for the active language mode, and routes a
//! submitted buffer either to mode-switching logic or to evaluation.
//!
//! - `array`: bracket/quote/comment aware rule for the array language
//! - `sql`: `;`-terminated rule for the SQL dialect
//! - `system`: system-command detection and parsing

pub mod array;
pub mod sql;
pub mod system;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::scanner::buffer_lines;
pub use system::{SystemCommand, is_system_command};

/// Language mode of the shell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Array-expression language
    #[default]
    Array,
    /// SQL dialect
    Sql,
}

impl Mode {
    /// Runs this mode's completion rule.
    pub fn is_complete<S: AsRef<str>>(self, lines: &[S], cursor_line: usize) -> bool {
        let complete = match self {
            Mode::Array => array::is_complete(lines, cursor_line),
            Mode::Sql => sql::is_complete(lines, cursor_line),
        };
        tracing::debug!(mode = %self, cursor_line, complete, "completion verdict");
        complete
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Mode::Array => "array",
            Mode::Sql => "sql",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What to do with a submitted buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Hand the text to the evaluator of the active mode.
    Evaluate(String),
    SwitchMode(Mode),
    /// Print an informational message.
    Message(String),
    /// A system command nobody recognises.
    Unknown(String),
    Exit,
    /// Nothing to do (blank input).
    Ignore,
}

/// Routes a submitted buffer.
///
/// System commands are recognised before any language rule, so they behave
/// the same in every mode.
pub fn dispatch(mode: Mode, buffer: &str) -> Action {
    if buffer.trim().is_empty() {
        return Action::Ignore;
    }

    if is_system_command(&buffer_lines(buffer))
        && let Some(command) = SystemCommand::parse(buffer)
    {
        tracing::debug!(?command, "system command");
        return match command {
            SystemCommand::SwitchMode(target) => Action::SwitchMode(target),
            SystemCommand::ShowMode => Action::Message(format!("mode: {mode}")),
            SystemCommand::Help => Action::Message(SystemCommand::help_text().to_string()),
            SystemCommand::Exit => Action::Exit,
            SystemCommand::Unknown(text) => Action::Unknown(text),
        };
    }

    Action::Evaluate(buffer.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_selects_rule() {
        assert!(!Mode::Array.is_complete(&["(1"], 0));
        assert!(Mode::Sql.is_complete(&["(1;"], 0));
        assert!(Mode::Array.is_complete(&["SELECT 1"], 0));
        assert!(!Mode::Sql.is_complete(&["SELECT 1"], 0));
    }

    #[test]
    fn test_system_command_complete_in_both_modes() {
        assert!(Mode::Array.is_complete(&[")sql"], 0));
        assert!(Mode::Sql.is_complete(&[")sql"], 0));
    }

    #[test]
    fn test_dispatch_mode_switch() {
        assert_eq!(dispatch(Mode::Array, ")sql"), Action::SwitchMode(Mode::Sql));
        assert_eq!(dispatch(Mode::Sql, ")array"), Action::SwitchMode(Mode::Array));
    }

    #[test]
    fn test_dispatch_messages_and_exit() {
        assert_eq!(
            dispatch(Mode::Sql, ")mode"),
            Action::Message("mode: sql".to_string())
        );
        assert!(matches!(dispatch(Mode::Array, ")help"), Action::Message(_)));
        assert_eq!(dispatch(Mode::Array, ")exit"), Action::Exit);
        assert_eq!(
            dispatch(Mode::Array, ")nope"),
            Action::Unknown("nope".to_string())
        );
    }

    #[test]
    fn test_dispatch_evaluates_everything_else() {
        assert_eq!(
            dispatch(Mode::Array, "1+1"),
            Action::Evaluate("1+1".to_string())
        );
        // A marker line inside a multi-line buffer is ordinary input.
        assert_eq!(
            dispatch(Mode::Array, ")sql\n1"),
            Action::Evaluate(")sql\n1".to_string())
        );
    }

    #[test]
    fn test_dispatch_blank() {
        assert_eq!(dispatch(Mode::Array, "  \n"), Action::Ignore);
    }

    #[test]
    fn test_mode_display() {
        assert_eq!(Mode::Array.to_string(), "array");
        assert_eq!(Mode::Sql.to_string(), "sql");
    }
}
