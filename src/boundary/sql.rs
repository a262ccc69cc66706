//! Completion rule for the SQL dialect.

use super::system::is_system_command;
use crate::scanner::grammar::SQL_TERMINATOR;

/// Decides whether the buffer is ready to submit.
///
/// Only the terminator at the very end of the last line counts: trailing
/// whitespace after `;` leaves the statement open, and brackets or quotes are
/// not inspected.
pub fn is_complete<S: AsRef<str>>(lines: &[S], cursor_line: usize) -> bool {
    if is_system_command(lines) {
        return true;
    }
    match lines.last() {
        Some(last) if cursor_line.saturating_add(1) == lines.len() => {
            last.as_ref().ends_with(SQL_TERMINATOR)
        }
        _ => false,
    }
}
