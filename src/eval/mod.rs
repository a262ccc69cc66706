//! Evaluator boundary
//!
//! The array-language interpreter and the SQL engine live outside this crate.
//! The shell talks to them through [`Evaluator`]: it hands over exactly the
//! text the completion rule declared complete, and prints whatever comes back.
//! Syntax errors in that text are the evaluator's to report.

use crate::boundary::Mode;
use crate::error::Result;

/// Outcome of evaluating one submitted statement.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Evaluation {
    /// Text to display, if any.
    pub output: Option<String>,
}

/// Receives complete statements from the shell.
pub trait Evaluator {
    /// Evaluate `source` in the given language mode.
    fn evaluate(&mut self, mode: Mode, source: &str) -> Result<Evaluation>;
}

/// Evaluator that echoes what the shell would submit.
///
/// Each statement is numbered and tagged with its mode, which makes it easy to
/// see where the boundary scanner cut the input.
#[derive(Debug, Default)]
pub struct TranscriptEvaluator {
    submitted: usize,
}

impl TranscriptEvaluator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of statements received so far.
    pub fn submitted(&self) -> usize {
        self.submitted
    }
}

impl Evaluator for TranscriptEvaluator {
    fn evaluate(&mut self, mode: Mode, source: &str) -> Result<Evaluation> {
        self.submitted += 1;
        let lines = source.lines().count();
        let plural = if lines == 1 { "" } else { "s" };
        Ok(Evaluation {
            output: Some(format!(
                "[{mode} #{}, {lines} line{plural}]\n{source}",
                self.submitted
            )),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transcript_numbers_statements() {
        let mut evaluator = TranscriptEvaluator::new();
        let first = evaluator.evaluate(Mode::Array, "1+1").unwrap();
        assert_eq!(first.output.as_deref(), Some("[array #1, 1 line]\n1+1"));

        let second = evaluator.evaluate(Mode::Sql, "SELECT a\nFROM t;").unwrap();
        assert_eq!(
            second.output.as_deref(),
            Some("[sql #2, 2 lines]\nSELECT a\nFROM t;")
        );
        assert_eq!(evaluator.submitted(), 2);
    }
}
