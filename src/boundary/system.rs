//! System commands
//!
//! A buffer made of exactly one line that starts with the marker `)` is a
//! system command. It is always complete and never reaches an evaluator:
//! - `)sql` switch to the SQL dialect
//! - `)array`, `)q` switch back to the array language
//! - `)mode` show the active mode
//! - `)help` list the system commands
//! - `)exit`, `)quit` leave the shell

use super::Mode;
use crate::scanner::grammar::SYSTEM_COMMAND_MARKER;

/// Returns true when the buffer is a single system-command line.
pub fn is_system_command<S: AsRef<str>>(lines: &[S]) -> bool {
    match lines {
        [line] => line.as_ref().starts_with(SYSTEM_COMMAND_MARKER),
        _ => false,
    }
}

/// A parsed system command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SystemCommand {
    SwitchMode(Mode),
    ShowMode,
    Help,
    Exit,
    Unknown(String),
}

impl SystemCommand {
    /// Parses a system-command line; `None` when the line lacks the marker.
    pub fn parse(line: &str) -> Option<Self> {
        let body = line.strip_prefix(SYSTEM_COMMAND_MARKER)?.trim();
        let name = body.split_whitespace().next().unwrap_or("");

        let command = match name.to_lowercase().as_str() {
            "sql" => SystemCommand::SwitchMode(Mode::Sql),
            "array" | "q" => SystemCommand::SwitchMode(Mode::Array),
            "mode" => SystemCommand::ShowMode,
            "help" | "?" => SystemCommand::Help,
            "exit" | "quit" => SystemCommand::Exit,
            _ => SystemCommand::Unknown(body.to_string()),
        };
        Some(command)
    }

    /// Help text listing the system commands.
    pub fn help_text() -> &'static str {
        concat!(
            "System commands:\n",
            "  )sql          switch to the SQL dialect\n",
            "  )array, )q    switch to the array language\n",
            "  )mode         show the active mode\n",
            "  )help         show this help\n",
            "  )exit, )quit  leave the shell",
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_marker_line_is_command() {
        assert!(is_system_command(&[")sql"]));
        assert!(is_system_command(&[")"]));
    }

    #[test]
    fn test_marker_must_start_the_line() {
        assert!(!is_system_command(&[" )sql"]));
        assert!(!is_system_command(&["x)sql"]));
    }

    #[test]
    fn test_multi_line_buffer_is_not_command() {
        assert!(!is_system_command(&[")sql", ""]));
        let empty: [&str; 0] = [];
        assert!(!is_system_command(&empty));
    }

    #[test]
    fn test_parse_commands() {
        assert_eq!(
            SystemCommand::parse(")sql"),
            Some(SystemCommand::SwitchMode(Mode::Sql))
        );
        assert_eq!(
            SystemCommand::parse(") Array"),
            Some(SystemCommand::SwitchMode(Mode::Array))
        );
        assert_eq!(
            SystemCommand::parse(")q"),
            Some(SystemCommand::SwitchMode(Mode::Array))
        );
        assert_eq!(SystemCommand::parse(")mode"), Some(SystemCommand::ShowMode));
        assert_eq!(SystemCommand::parse(")help"), Some(SystemCommand::Help));
        assert_eq!(SystemCommand::parse(")quit"), Some(SystemCommand::Exit));
    }

    #[test]
    fn test_parse_unknown_and_non_commands() {
        assert_eq!(
            SystemCommand::parse(")load x.q"),
            Some(SystemCommand::Unknown("load x.q".to_string()))
        );
        assert_eq!(SystemCommand::parse("sql"), None);
    }
}
