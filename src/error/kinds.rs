use std::{fmt, io};

/// Crate-wide `Result` type using [`ArrshError`] as the error.
pub type Result<T> = std::result::Result<T, ArrshError>;

/// Top-level error type for arrsh.
///
/// Wraps the more specific error kinds so a single error type can flow
/// through the crate.
#[derive(Debug)]
pub enum ArrshError {
    /// Configuration errors.
    Config(ConfigError),

    /// Script loading and execution errors.
    Script(ScriptError),

    /// I/O errors.
    Io(io::Error),

    /// Line editor errors.
    Readline(String),

    /// Errors reported by an evaluator.
    Eval(String),

    /// Generic error with a free-form message.
    Generic(String),
}

/// Configuration-specific errors.
#[derive(Debug)]
pub enum ConfigError {
    /// Config file not found.
    FileNotFound(String),

    /// Invalid config format.
    InvalidFormat(String),

    /// Invalid field value.
    InvalidValue { field: String, value: String },

    /// Anything else (unsupported shell for completions, ...).
    Generic(String),
}

/// Script-specific errors.
#[derive(Debug)]
pub enum ScriptError {
    /// Script file not found.
    FileNotFound(String),

    /// The script ended inside an open statement.
    Incomplete { line: usize, mode: String },
}

/* ========================= Display & Error impls ========================= */

impl fmt::Display for ArrshError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArrshError::Config(e) => write!(f, "Configuration error: {e}"),
            ArrshError::Script(e) => write!(f, "Script error: {e}"),
            ArrshError::Io(e) => write!(f, "I/O error: {e}"),
            ArrshError::Readline(msg) => write!(f, "Readline error: {msg}"),
            ArrshError::Eval(msg) => write!(f, "{msg}"),
            ArrshError::Generic(msg) => write!(f, "{msg}"),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::FileNotFound(path) => write!(f, "Config file not found: {path}"),
            ConfigError::InvalidFormat(msg) => write!(f, "Invalid config format: {msg}"),
            ConfigError::InvalidValue { field, value } => {
                write!(f, "Invalid value '{value}' for field '{field}'")
            }
            ConfigError::Generic(msg) => write!(f, "{msg}"),
        }
    }
}

impl fmt::Display for ScriptError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScriptError::FileNotFound(path) => write!(f, "Script file not found: {path}"),
            ScriptError::Incomplete { line, mode } => {
                write!(f, "Unterminated {mode} statement starting at line {line}")
            }
        }
    }
}

impl std::error::Error for ArrshError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ArrshError::Config(e) => Some(e),
            ArrshError::Script(e) => Some(e),
            ArrshError::Io(e) => Some(e),
            _ => None,
        }
    }
}
impl std::error::Error for ConfigError {}
impl std::error::Error for ScriptError {}

/* ========================= Conversions to ArrshError ========================= */

impl From<io::Error> for ArrshError {
    fn from(err: io::Error) -> Self {
        ArrshError::Io(err)
    }
}

impl From<ConfigError> for ArrshError {
    fn from(err: ConfigError) -> Self {
        ArrshError::Config(err)
    }
}

impl From<ScriptError> for ArrshError {
    fn from(err: ScriptError) -> Self {
        ArrshError::Script(err)
    }
}

impl From<toml::de::Error> for ArrshError {
    fn from(err: toml::de::Error) -> Self {
        ArrshError::Config(ConfigError::InvalidFormat(err.to_string()))
    }
}

impl From<toml::ser::Error> for ArrshError {
    fn from(err: toml::ser::Error) -> Self {
        ArrshError::Config(ConfigError::InvalidFormat(err.to_string()))
    }
}

impl From<serde_json::Error> for ArrshError {
    fn from(err: serde_json::Error) -> Self {
        ArrshError::Generic(format!("JSON error: {err}"))
    }
}

impl From<reedline::ReedlineError> for ArrshError {
    fn from(err: reedline::ReedlineError) -> Self {
        ArrshError::Readline(err.to_string())
    }
}

impl From<String> for ArrshError {
    fn from(msg: String) -> Self {
        ArrshError::Generic(msg)
    }
}

impl From<&str> for ArrshError {
    fn from(msg: &str) -> Self {
        ArrshError::Generic(msg.to_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_config_error() {
        let err: ArrshError = ConfigError::InvalidValue {
            field: "history.max_size".to_string(),
            value: "0".to_string(),
        }
        .into();
        assert_eq!(
            err.to_string(),
            "Configuration error: Invalid value '0' for field 'history.max_size'"
        );
    }

    #[test]
    fn test_display_script_error() {
        let err: ArrshError = ScriptError::Incomplete {
            line: 4,
            mode: "array".to_string(),
        }
        .into();
        assert_eq!(
            err.to_string(),
            "Script error: Unterminated array statement starting at line 4"
        );
    }

    #[test]
    fn test_from_str() {
        let err: ArrshError = "boom".into();
        assert!(matches!(err, ArrshError::Generic(ref m) if m == "boom"));
    }
}
