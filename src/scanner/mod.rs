//! Statement-boundary scanner for the array language
//!
//! This module decides where a unit of array-language input ends without
//! tokenizing it:
//! - `grammar`: the shared lexical table (brackets, delimiters, comment and
//!   quote-introducer syntax, system-command marker, SQL terminator)
//! - `source`: turns editor lines into a newline-terminated character stream
//! - `machine`: the bracket/quote/comment state machine
//! - `split`: cuts a whole text into statements

pub mod grammar;
mod machine;
mod source;
mod split;

pub use machine::{ScanResult, Scanner, ScannerState, scan};
pub use source::{LineSource, buffer_lines};
pub use split::{Split, Statement, split_statements};

/// Scans the lines typed so far with a fresh scanner.
pub fn scan_lines<S: AsRef<str>>(lines: &[S]) -> ScanResult {
    let result = scan(LineSource::new(lines));
    tracing::trace!(lines = lines.len(), ?result, "scanned buffer");
    result
}
