//! Validator for reedline - decides whether Enter submits the buffer

use reedline::{ValidationResult, Validator};

use crate::repl::SharedState;
use crate::scanner::buffer_lines;

/// Mode-aware validator for reedline
///
/// Runs the completion rule of whatever mode is active when Enter is pressed.
pub struct BoundaryValidator {
    state: SharedState,
}

impl BoundaryValidator {
    /// Create a new validator reading the mode from `state`
    pub fn new(state: SharedState) -> Self {
        Self { state }
    }
}

impl Validator for BoundaryValidator {
    /// Validate input for completeness
    ///
    /// reedline does not pass the cursor here, so the line comes from the
    /// highlighter's last repaint of this buffer. Without one the cursor is
    /// on the last line.
    fn validate(&self, line: &str) -> ValidationResult {
        let lines = buffer_lines(line);
        let last_line = lines.len().saturating_sub(1);
        let cursor_line = self
            .state
            .cursor_line(line)
            .map_or(last_line, |cursor| cursor.min(last_line));

        if self.state.mode().is_complete(&lines, cursor_line) {
            ValidationResult::Complete
        } else {
            ValidationResult::Incomplete
        }
    }
}
