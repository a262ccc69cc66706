//! Command-line interface for arrsh
//!
//! This module handles:
//! - Command-line argument parsing using clap
//! - Configuration loading and validation
//! - Subcommands (version, completion, config, check, split)
//! - Mode selection (interactive vs script execution)

mod completion;

use clap::{Parser, Subcommand};
use serde::Serialize;
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use crate::boundary::Mode;
use crate::config::{Config, LogLevel};
use crate::error::{Result, ScriptError};
use crate::scanner::{buffer_lines, split_statements};

/// Interactive shell for an array language and its SQL dialect
#[derive(Parser, Debug)]
#[command(
    name = "arrsh",
    version,
    about = "Interactive shell for an array language and its SQL dialect",
    long_about = "An interactive front-end that decides when a statement is complete:
brackets, strings, quoted literals and comments keep the input open in the
array language, and a trailing ';' ends a SQL statement."
)]
pub struct CliArgs {
    /// Script file to run instead of starting the interactive shell
    #[arg(value_name = "FILE")]
    pub file: Option<PathBuf>,

    /// Language mode to start in
    #[arg(short = 'm', long, value_enum, value_name = "MODE")]
    pub mode: Option<Mode>,

    /// Configuration file path
    #[arg(short = 'c', long = "config", value_name = "FILE")]
    pub config_file: Option<PathBuf>,

    /// Disable colored output
    #[arg(long = "no-color")]
    pub no_color: bool,

    /// Disable syntax highlighting
    #[arg(long = "no-highlight")]
    pub no_highlight: bool,

    /// Quiet mode (minimal output)
    #[arg(short = 'q', long)]
    pub quiet: bool,

    /// Verbose mode (detailed logging)
    #[arg(short = 'v', long)]
    pub verbose: bool,

    /// Very verbose mode (trace logging)
    #[arg(long = "vv")]
    pub very_verbose: bool,

    /// Subcommands
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Subcommands for arrsh
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show version information
    Version,

    /// Generate shell completion script
    Completion {
        /// Shell type (bash, zsh, fish)
        #[arg(value_name = "SHELL")]
        shell: String,
    },

    /// Show configuration
    Config {
        /// Show effective configuration
        #[arg(long)]
        show: bool,

        /// Validate configuration file
        #[arg(long)]
        validate: bool,
    },

    /// Report whether a buffer would be submitted
    Check {
        /// File holding the buffer (stdin when omitted)
        #[arg(value_name = "FILE")]
        file: Option<PathBuf>,

        /// Language mode whose rule is applied
        #[arg(short = 'm', long, value_enum, value_name = "MODE")]
        mode: Option<Mode>,

        /// Line the cursor is on, counted from 0 (last line when omitted)
        #[arg(long, value_name = "LINE")]
        cursor: Option<usize>,

        /// Print the verdict as JSON
        #[arg(long)]
        json: bool,
    },

    /// Cut array-language text into statements
    Split {
        /// File to split (stdin when omitted)
        #[arg(value_name = "FILE")]
        file: Option<PathBuf>,

        /// Print the statements as JSON
        #[arg(long)]
        json: bool,
    },
}

/// Verdict printed by `arrsh check`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckReport {
    pub mode: Mode,
    pub complete: bool,
    pub lines: usize,
    pub cursor_line: usize,
}

/// Run a mode's completion rule over an editor buffer.
///
/// A single trailing newline is treated as the end of the file rather than an
/// empty last line. Lines may end in `\r\n`.
pub fn check_buffer(mode: Mode, text: &str, cursor: Option<usize>) -> CheckReport {
    let text = text.strip_suffix('\n').unwrap_or(text);
    let lines: Vec<&str> = buffer_lines(text)
        .into_iter()
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .collect();
    let cursor_line = cursor.unwrap_or(lines.len().saturating_sub(1));

    CheckReport {
        mode,
        complete: mode.is_complete(&lines, cursor_line),
        lines: lines.len(),
        cursor_line,
    }
}

/// CLI interface handler
pub struct CliInterface {
    /// Parsed command-line arguments
    args: CliArgs,

    /// Loaded configuration
    config: Config,
}

impl CliInterface {
    /// Create a new CLI interface
    pub fn new() -> Result<Self> {
        let args = CliArgs::parse();
        let config = Self::load_config(&args)?;

        Ok(Self { args, config })
    }

    /// Load configuration from file and merge with arguments
    fn load_config(args: &CliArgs) -> Result<Config> {
        let config_path = args.config_file.as_deref();
        let mut config = Config::load_from_file(config_path)?;

        // Validate loaded configuration
        if let Err(e) = config.validate() {
            eprintln!("Warning: Configuration validation failed: {e}");
            eprintln!("Using default configuration instead.");
            config = Config::default();
        }

        // Apply CLI arguments to override config values
        Self::apply_args_to_config(&mut config, args);

        Ok(config)
    }

    /// Get the configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Get the CLI arguments
    pub fn args(&self) -> &CliArgs {
        &self.args
    }

    /// Script file given on the command line, if any
    pub fn script_file(&self) -> Option<&Path> {
        self.args.file.as_deref()
    }

    /// Apply CLI arguments to configuration
    ///
    /// Overrides configuration values with CLI arguments where provided
    fn apply_args_to_config(config: &mut Config, args: &CliArgs) {
        Self::apply_repl_args(config, args);
        Self::apply_display_args(config, args);
        Self::apply_logging_args(config, args);
    }

    fn apply_repl_args(config: &mut Config, args: &CliArgs) {
        if let Some(mode) = args.mode {
            config.repl.start_mode = mode;
        }
    }

    /// Apply display-related CLI arguments to configuration
    fn apply_display_args(config: &mut Config, args: &CliArgs) {
        if args.no_color {
            config.display.color_output = false;
        }

        if args.no_highlight {
            config.display.syntax_highlighting = false;
        }
    }

    /// Apply logging-related CLI arguments to configuration
    fn apply_logging_args(config: &mut Config, args: &CliArgs) {
        config.logging.level = if args.very_verbose {
            LogLevel::Trace
        } else if args.verbose {
            LogLevel::Debug
        } else if args.quiet {
            LogLevel::Error
        } else {
            config.logging.level
        };
    }

    /// Handle subcommands
    ///
    /// # Returns
    /// * `Result<bool>` - True if subcommand was handled, false to continue
    pub fn handle_subcommand(&self) -> Result<bool> {
        match &self.args.command {
            Some(Commands::Version) => {
                self.show_version();
                Ok(true)
            }
            Some(Commands::Completion { shell }) => {
                completion::generate_completion(shell, &mut io::stdout())?;
                Ok(true)
            }
            Some(Commands::Config { show, validate }) => {
                self.handle_config_command(*show, *validate)?;
                Ok(true)
            }
            Some(Commands::Check {
                file,
                mode,
                cursor,
                json,
            }) => {
                let mode = mode.unwrap_or(self.config.repl.start_mode);
                self.handle_check_command(file.as_deref(), mode, *cursor, *json)?;
                Ok(true)
            }
            Some(Commands::Split { file, json }) => {
                self.handle_split_command(file.as_deref(), *json)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Show version information
    fn show_version(&self) {
        println!("arrsh version {}", env!("CARGO_PKG_VERSION"));
        println!("Rust version: {}", env!("CARGO_PKG_RUST_VERSION"));
    }

    /// Handle config subcommand
    fn handle_config_command(&self, show: bool, validate: bool) -> Result<()> {
        if validate {
            self.validate_config_file();
        }

        if show {
            self.show_config();
        }

        Ok(())
    }

    /// Validate configuration file
    fn validate_config_file(&self) {
        let path = self.get_config_path();
        println!("Validating configuration file: {}", path.display());

        if !path.exists() {
            println!("Configuration file does not exist");
            return;
        }

        match Config::load_from_file(Some(&path)) {
            Ok(config) => match config.validate() {
                Ok(()) => println!("Configuration is valid"),
                Err(e) => println!("Configuration validation failed: {e}"),
            },
            Err(e) => println!("Failed to load configuration: {e}"),
        }
    }

    /// Show effective configuration
    fn show_config(&self) {
        let path = self.get_config_path();
        println!("Configuration file: {}", path.display());
        println!();
        println!("=== Effective Configuration ===");
        println!();

        match self.config.to_toml() {
            Ok(toml_str) => println!("{toml_str}"),
            Err(e) => {
                eprintln!("Error formatting configuration: {e}");
                println!("{:#?}", self.config);
            }
        }
    }

    fn handle_check_command(
        &self,
        file: Option<&Path>,
        mode: Mode,
        cursor: Option<usize>,
        json: bool,
    ) -> Result<()> {
        let text = read_input(file)?;
        let report = check_buffer(mode, &text, cursor);

        if json {
            println!("{}", serde_json::to_string_pretty(&report)?);
        } else if report.complete {
            println!("complete ({} mode, {} lines)", report.mode, report.lines);
        } else {
            println!("incomplete ({} mode, {} lines)", report.mode, report.lines);
        }
        Ok(())
    }

    fn handle_split_command(&self, file: Option<&Path>, json: bool) -> Result<()> {
        let text = read_input(file)?;
        let split = split_statements(&text);

        if json {
            println!("{}", serde_json::to_string_pretty(&split)?);
            return Ok(());
        }

        for statement in &split.statements {
            println!("-- line {}", statement.line);
            println!("{}", statement.text);
        }
        if let Some(pending) = &split.pending {
            eprintln!("Unterminated statement starting at line {}", pending.line);
        }
        Ok(())
    }

    /// Get configuration file path (from args or default)
    fn get_config_path(&self) -> PathBuf {
        self.args
            .config_file
            .clone()
            .unwrap_or_else(Config::default_config_path)
    }

    /// Print banner with version and key bindings
    pub fn print_banner(&self) {
        if !self.args.quiet {
            println!("arrsh {}", env!("CARGO_PKG_VERSION"));
            println!(
                "Starting in {} mode. Type )help for system commands, Ctrl-D to quit.",
                self.config.repl.start_mode
            );
        }
    }
}

/// Read a subcommand's input from a file, or stdin when no file is given
fn read_input(file: Option<&Path>) -> Result<String> {
    match file {
        Some(path) if !path.exists() => {
            Err(ScriptError::FileNotFound(path.display().to_string()).into())
        }
        Some(path) => Ok(fs::read_to_string(path)?),
        None => {
            let mut text = String::new();
            io::stdin().read_to_string(&mut text)?;
            Ok(text)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cli(argv: &[&str]) -> CliInterface {
        let args = CliArgs::try_parse_from(argv).unwrap();
        let mut config = Config::default();
        CliInterface::apply_args_to_config(&mut config, &args);
        CliInterface { args, config }
    }

    #[test]
    fn test_cli_args_parsing() {
        let args = CliArgs::try_parse_from(["arrsh"]).unwrap();
        assert!(args.file.is_none());
        assert!(args.mode.is_none());
        assert!(args.command.is_none());
    }

    #[test]
    fn test_cli_args_with_script() {
        let args = CliArgs::try_parse_from(["arrsh", "load.q"]).unwrap();
        assert_eq!(args.file, Some(PathBuf::from("load.q")));
    }

    #[test]
    fn test_cli_args_with_flags() {
        let args =
            CliArgs::try_parse_from(["arrsh", "--no-color", "--quiet", "--mode", "sql"]).unwrap();
        assert!(args.no_color);
        assert!(args.quiet);
        assert_eq!(args.mode, Some(Mode::Sql));
    }

    #[test]
    fn test_invalid_mode_rejected() {
        assert!(CliArgs::try_parse_from(["arrsh", "--mode", "apl"]).is_err());
    }

    #[test]
    fn test_subcommand_takes_precedence_over_file() {
        let args = CliArgs::try_parse_from(["arrsh", "check", "--json", "x.q"]).unwrap();
        match args.command {
            Some(Commands::Check { file, json, .. }) => {
                assert_eq!(file, Some(PathBuf::from("x.q")));
                assert!(json);
            }
            other => panic!("expected check, got {other:?}"),
        }
        assert!(args.file.is_none());
    }

    #[test]
    fn test_args_override_config() {
        let cli = cli(&["arrsh", "--mode", "sql", "--no-color", "--no-highlight"]);
        assert_eq!(cli.config().repl.start_mode, Mode::Sql);
        assert!(!cli.config().display.color_output);
        assert!(!cli.config().display.syntax_highlighting);
    }

    #[test]
    fn test_log_level_flags() {
        assert_eq!(cli(&["arrsh", "--vv"]).config().logging.level, LogLevel::Trace);
        assert_eq!(cli(&["arrsh", "-v"]).config().logging.level, LogLevel::Debug);
        assert_eq!(cli(&["arrsh", "-q"]).config().logging.level, LogLevel::Error);
        assert_eq!(cli(&["arrsh"]).config().logging.level, LogLevel::Warn);
    }

    #[test]
    fn test_check_buffer_array() {
        let report = check_buffer(Mode::Array, "f:{[x]\n  x+1}\n", None);
        assert!(report.complete);
        assert_eq!(report.lines, 2);
        assert_eq!(report.cursor_line, 1);

        assert!(!check_buffer(Mode::Array, "f:{[x]\n", None).complete);
    }

    #[test]
    fn test_check_buffer_cursor_above_last_line() {
        assert!(!check_buffer(Mode::Array, "1\n2", Some(0)).complete);
    }

    #[test]
    fn test_check_buffer_sql() {
        assert!(check_buffer(Mode::Sql, "SELECT 1;", None).complete);
        assert!(!check_buffer(Mode::Sql, "SELECT 1", None).complete);
    }

    #[test]
    fn test_check_buffer_crlf() {
        assert!(check_buffer(Mode::Sql, "SELECT 1;\r\n", None).complete);
        assert!(check_buffer(Mode::Sql, "SELECT a\r\nFROM t;\r\n", None).complete);

        let report = check_buffer(Mode::Array, "f:{[x]\r\n  x+1}\r\n", None);
        assert!(report.complete);
        assert_eq!(report.lines, 2);
    }

    #[test]
    fn test_check_report_json() {
        let report = check_buffer(Mode::Sql, "SELECT 1;", None);
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["mode"], "sql");
        assert_eq!(json["complete"], true);
    }

    #[test]
    fn test_read_input_missing_file() {
        assert!(read_input(Some(Path::new("/nonexistent/in.q"))).is_err());
    }
}
