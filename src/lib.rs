//! arrsh library
//!
//! Statement-boundary detection and the interactive shell built on it.
//!
//! # Modules
//!
//! - `scanner`: bracket/quote/comment scanner for the array language
//! - `boundary`: per-mode completion rules, system commands and dispatch
//! - `eval`: the evaluator seam between the shell and a language engine
//! - `repl`: Interactive REPL engine
//! - `script`: Script execution
//! - `cli`: Command-line interface and argument parsing
//! - `config`: Configuration management
//! - `error`: Error types and handling
//!
//! # Example
//!
//! ```
//! use arrsh::boundary::Mode;
//!
//! assert!(!Mode::Array.is_complete(&["f:{[x]"], 0));
//! assert!(Mode::Array.is_complete(&["f:{[x]", "  x+1}"], 1));
//! assert!(Mode::Sql.is_complete(&["SELECT 1;"], 0));
//! ```

pub mod boundary;
pub mod cli;
pub mod config;
pub mod error;
pub mod eval;
pub mod repl;
pub mod scanner;
pub mod script;

// Re-export commonly used types
pub use boundary::{Action, Mode, SystemCommand, dispatch};
pub use config::Config;
pub use error::{ArrshError, Result};
pub use eval::{Evaluation, Evaluator, TranscriptEvaluator};
pub use repl::{ReplEngine, SharedState};
pub use scanner::{ScanResult, Scanner, scan_lines, split_statements};
pub use script::{ScriptReport, ScriptRunner};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Get library version string
pub fn version() -> &'static str {
    VERSION
}
