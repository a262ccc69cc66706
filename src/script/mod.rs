//! Script execution for arrsh
//!
//! A script is fed to the completion rules line by line, exactly as if it
//! were typed at the prompt:
//! - blank lines between statements are skipped
//! - a buffer is submitted as soon as the active mode's rule accepts it
//! - system commands switch modes mid-script
//! - input left open at end of file is an error

use std::fs;
use std::path::Path;

use crate::boundary::{Action, Mode, dispatch};
use crate::error::{ArrshError, Result, ScriptError};
use crate::eval::Evaluator;

/// Result of running a script.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptReport {
    /// Number of statements handed to the evaluator
    pub statements: usize,

    /// Evaluator output and system-command messages, in order
    pub outputs: Vec<String>,

    /// Mode active when the script finished
    pub final_mode: Mode,

    /// Whether the script stopped at an exit command
    pub exited: bool,
}

/// Runs scripts against an evaluator.
pub struct ScriptRunner<'e, E: Evaluator + ?Sized> {
    mode: Mode,
    evaluator: &'e mut E,
}

impl<'e, E: Evaluator + ?Sized> ScriptRunner<'e, E> {
    /// Create a runner starting in `mode`.
    pub fn new(mode: Mode, evaluator: &'e mut E) -> Self {
        Self { mode, evaluator }
    }

    /// Read a script file.
    pub fn load(path: &Path) -> Result<String> {
        if !path.exists() {
            return Err(ScriptError::FileNotFound(path.display().to_string()).into());
        }
        Ok(fs::read_to_string(path)?)
    }

    /// Load and run a script file.
    pub fn run_file(&mut self, path: &Path) -> Result<ScriptReport> {
        let source = Self::load(path)?;
        tracing::info!(path = %path.display(), mode = %self.mode, "running script");
        self.run_source(&source)
    }

    /// Run script text.
    pub fn run_source(&mut self, source: &str) -> Result<ScriptReport> {
        let mut report = ScriptReport {
            statements: 0,
            outputs: Vec::new(),
            final_mode: self.mode,
            exited: false,
        };
        let mut buffer: Vec<&str> = Vec::new();
        let mut start_line = 1;

        for (index, line) in source.lines().enumerate() {
            if buffer.is_empty() {
                if line.trim().is_empty() {
                    continue;
                }
                start_line = index + 1;
            }
            buffer.push(line);

            if !self.mode.is_complete(&buffer, buffer.len() - 1) {
                continue;
            }

            let text = buffer.join("\n");
            buffer.clear();

            match dispatch(self.mode, &text) {
                Action::Evaluate(statement) => {
                    let evaluation = self
                        .evaluator
                        .evaluate(self.mode, &statement)
                        .map_err(|e| ArrshError::Eval(format!("line {start_line}: {e}")))?;
                    report.statements += 1;
                    report.outputs.extend(evaluation.output);
                }
                Action::SwitchMode(mode) => {
                    tracing::debug!(line = start_line, from = %self.mode, to = %mode, "mode switch");
                    self.mode = mode;
                }
                Action::Message(message) => report.outputs.push(message),
                Action::Unknown(command) => {
                    tracing::warn!(line = start_line, %command, "unknown system command");
                }
                Action::Exit => {
                    report.exited = true;
                    break;
                }
                Action::Ignore => {}
            }
        }

        report.final_mode = self.mode;

        if !report.exited && !buffer.is_empty() {
            return Err(ScriptError::Incomplete {
                line: start_line,
                mode: self.mode.to_string(),
            }
            .into());
        }

        Ok(report)
    }
}
