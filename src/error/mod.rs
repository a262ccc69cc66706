//! Error types for arrsh.
//!
//! The boundary scanner itself never fails: malformed input degrades to a
//! complete verdict and reaches the evaluator. The errors here cover the
//! shell around it:
//! - configuration loading and validation
//! - script loading and unterminated scripts
//! - line editor and I/O failures
//! - evaluator failures

pub mod kinds;

pub use kinds::{ArrshError, ConfigError, Result, ScriptError};
