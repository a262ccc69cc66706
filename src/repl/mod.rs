//! REPL (Read-Eval-Print Loop) engine for arrsh
//!
//! This module provides the interactive shell on top of reedline:
//! - Enter submits only when the active mode's completion rule says so
//! - Continuation prompts while a statement is open
//! - Syntax highlighting driven by the boundary scanner
//! - Persistent command history with inline hints
//! - Mode-aware prompts

mod engine;
mod highlighter;
mod prompt;
mod shared_state;
mod validator;

pub use engine::ReplEngine;
pub use highlighter::SyntaxHighlighter;
pub use prompt::ShellPrompt;
pub use shared_state::SharedState;
pub use validator::BoundaryValidator;

#[cfg(test)]
mod tests;
