//! Splits a multi-statement array-language text into the units the boundary
//! scanner finds.

use serde::Serialize;

use super::machine::{ScanResult, Scanner};
use super::source::LineSource;

/// One complete unit of input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Statement {
    /// 1-based line the statement starts on.
    pub line: usize,
    /// Statement text without its final newline.
    pub text: String,
}

/// Result of splitting a text.
#[derive(Debug, Default, Serialize)]
pub struct Split {
    pub statements: Vec<Statement>,
    /// Trailing input the scanner could not close (open bracket, literal or
    /// comment).
    pub pending: Option<Statement>,
}

/// Splits `text` into statements, starting a fresh scanner after every
/// boundary so a bracket mismatch in one statement never leaks into the next.
///
/// Blank units are dropped.
pub fn split_statements(text: &str) -> Split {
    let lines: Vec<&str> = text.lines().collect();
    let mut split = Split::default();
    let mut scanner = Scanner::new();
    let mut line = 1;
    let mut start_line = 1;

    for ch in LineSource::new(&lines) {
        if let Some(ScanResult::Complete(len)) = scanner.feed(ch) {
            let unit = &scanner.consumed()[..len];
            if !unit.trim().is_empty() {
                split.statements.push(Statement {
                    line: start_line,
                    text: unit.trim_end_matches('\n').to_string(),
                });
            }
            scanner = Scanner::new();
            start_line = line + 1;
        }
        if ch == '\n' {
            line += 1;
        }
    }

    if !scanner.consumed().trim().is_empty() {
        split.pending = Some(Statement {
            line: start_line,
            text: scanner.consumed().trim_end_matches('\n').to_string(),
        });
    }

    tracing::debug!(
        statements = split.statements.len(),
        pending = split.pending.is_some(),
        "split input into statements"
    );
    split
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(split: &Split) -> Vec<&str> {
        split.statements.iter().map(|s| s.text.as_str()).collect()
    }

    #[test]
    fn test_one_statement_per_line() {
        let split = split_statements("a:1\nb:2\n");
        assert_eq!(texts(&split), vec!["a:1", "b:2"]);
        assert_eq!(split.statements[1].line, 2);
        assert!(split.pending.is_none());
    }

    #[test]
    fn test_multi_line_statement() {
        let split = split_statements("f:{[x]\n  x+1}\nf 2\n");
        assert_eq!(texts(&split), vec!["f:{[x]\n  x+1}", "f 2"]);
        assert_eq!(split.statements[1].line, 3);
    }

    #[test]
    fn test_blank_lines_skipped_but_counted() {
        let split = split_statements("\n\na\n\nb");
        assert_eq!(texts(&split), vec!["a", "b"]);
        assert_eq!(split.statements[0].line, 3);
        assert_eq!(split.statements[1].line, 5);
    }

    #[test]
    fn test_unterminated_tail_is_pending() {
        let split = split_statements("a\n(1;\n2");
        assert_eq!(texts(&split), vec!["a"]);
        let pending = split.pending.expect("pending statement");
        assert_eq!(pending.line, 2);
        assert_eq!(pending.text, "(1;\n2");
    }

    #[test]
    fn test_mismatch_does_not_leak_into_next_statement() {
        let split = split_statements("2)\n(1\n2)\n");
        assert_eq!(texts(&split), vec!["2)", "(1\n2)"]);
    }

    #[test]
    fn test_crlf_input() {
        let split = split_statements("a\r\nb\r\n");
        assert_eq!(texts(&split), vec!["a", "b"]);
    }
}
