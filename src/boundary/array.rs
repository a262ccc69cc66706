//! Completion rule for the array language.

use super::system::is_system_command;
use crate::scanner::scan_lines;

/// Decides whether the buffer is ready to submit.
///
/// A single system-command line is always complete. Otherwise the buffer is
/// complete only when the cursor is on the last line and the scanner finds a
/// boundary; with the cursor higher up, Enter inserts a newline and the
/// scanner is not run at all.
pub fn is_complete<S: AsRef<str>>(lines: &[S], cursor_line: usize) -> bool {
    if is_system_command(lines) {
        return true;
    }
    if lines.len().checked_sub(1) != Some(cursor_line) {
        tracing::trace!(cursor_line, lines = lines.len(), "cursor above last line");
        return false;
    }
    scan_lines(lines).is_complete()
}
