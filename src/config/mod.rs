//! Configuration management for arrsh
//!
//! Configuration comes from a TOML file and command-line arguments.
//!
//! Configuration precedence (highest to lowest):
//! 1. Command-line arguments
//! 2. Configuration file
//! 3. Default values

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::boundary::Mode;
use crate::error::{ConfigError, Result};

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Interactive shell configuration
    pub repl: ReplConfig,

    /// Display configuration
    pub display: DisplayConfig,

    /// History configuration
    pub history: HistoryConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Prompts and starting mode
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReplConfig {
    /// Language mode the shell starts in
    #[serde(default)]
    pub start_mode: Mode,

    /// Prompt shown in array-language mode
    #[serde(default = "default_array_prompt")]
    pub array_prompt: String,

    /// Prompt shown in SQL mode
    #[serde(default = "default_sql_prompt")]
    pub sql_prompt: String,

    /// Prompt shown on continuation lines
    #[serde(default = "default_continuation_prompt")]
    pub continuation_prompt: String,
}

/// Display and output configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// Enable colored output
    #[serde(default = "default_true")]
    pub color_output: bool,

    /// Enable syntax highlighting of the input line
    #[serde(default = "default_true")]
    pub syntax_highlighting: bool,
}

/// Command history configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryConfig {
    /// Maximum number of history entries
    #[serde(default = "default_max_history_size")]
    pub max_size: usize,

    /// Path to history file
    #[serde(default = "default_history_file")]
    pub file_path: PathBuf,

    /// Enable history persistence
    #[serde(default = "default_true")]
    pub persist: bool,
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace)
    #[serde(default = "default_log_level")]
    pub level: LogLevel,

    /// Enable timestamps in logs
    #[serde(default)]
    pub timestamps: bool,
}

/// Log level options
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

// Default value functions
fn default_array_prompt() -> String {
    "q) ".to_string()
}

fn default_sql_prompt() -> String {
    "sql) ".to_string()
}

fn default_continuation_prompt() -> String {
    "... ".to_string()
}

fn default_true() -> bool {
    true
}

fn default_max_history_size() -> usize {
    1000
}

fn default_history_file() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".arrsh_history")
}

fn default_log_level() -> LogLevel {
    LogLevel::Warn
}

impl Default for ReplConfig {
    fn default() -> Self {
        Self {
            start_mode: Mode::default(),
            array_prompt: default_array_prompt(),
            sql_prompt: default_sql_prompt(),
            continuation_prompt: default_continuation_prompt(),
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            color_output: true,
            syntax_highlighting: true,
        }
    }
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            max_size: default_max_history_size(),
            file_path: default_history_file(),
            persist: true,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            timestamps: false,
        }
    }
}

impl Config {
    /// Get the default configuration file path
    pub fn default_config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".arrsh")
            .join("config.toml")
    }

    /// Load configuration from a file
    ///
    /// With no explicit path the default location is used, and a missing
    /// default file yields the default configuration. An explicit path that
    /// does not exist is an error.
    ///
    /// # Arguments
    /// * `path` - Optional path to the configuration file (TOML format)
    pub fn load_from_file(path: Option<&Path>) -> Result<Self> {
        let (path, explicit) = match path {
            Some(p) => (p.to_path_buf(), true),
            None => (Self::default_config_path(), false),
        };

        if !path.exists() {
            if explicit {
                return Err(ConfigError::FileNotFound(path.display().to_string()).into());
            }
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path)?;
        let config = Self::from_toml_str(&contents)?;
        tracing::debug!(path = %path.display(), "loaded config file");
        Ok(config)
    }

    /// Parse configuration from TOML text
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Render the configuration as TOML
    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        let prompts = [
            ("repl.array_prompt", &self.repl.array_prompt),
            ("repl.sql_prompt", &self.repl.sql_prompt),
            ("repl.continuation_prompt", &self.repl.continuation_prompt),
        ];
        for (field, value) in prompts {
            if value.is_empty() {
                return Err(ConfigError::InvalidValue {
                    field: field.to_string(),
                    value: String::new(),
                }
                .into());
            }
        }

        if self.history.max_size == 0 {
            return Err(ConfigError::InvalidValue {
                field: "history.max_size".to_string(),
                value: "0".to_string(),
            }
            .into());
        }

        Ok(())
    }
}

impl LogLevel {
    /// Convert to tracing::Level
    pub fn to_tracing_level(self) -> tracing::Level {
        match self {
            LogLevel::Error => tracing::Level::ERROR,
            LogLevel::Warn => tracing::Level::WARN,
            LogLevel::Info => tracing::Level::INFO,
            LogLevel::Debug => tracing::Level::DEBUG,
            LogLevel::Trace => tracing::Level::TRACE,
        }
    }
}
