//! Shell completion generation for arrsh
//!
//! Generates completion scripts for bash, zsh and fish from the clap
//! definition of the command line.

use clap::CommandFactory;
use clap_complete::{Shell, generate};
use std::io::Write;

use crate::cli::CliArgs;
use crate::error::{ConfigError, Result};

const BIN_NAME: &str = "arrsh";

/// Generate a shell completion script
///
/// # Arguments
/// * `shell_name` - Shell type (bash, zsh, fish)
/// * `out` - Where the script is written
pub fn generate_completion<W: Write>(shell_name: &str, out: &mut W) -> Result<()> {
    let shell = parse_shell(shell_name)?;
    let mut cmd = CliArgs::command();
    generate(shell, &mut cmd, BIN_NAME, out);
    Ok(())
}

/// Parse shell name string to Shell enum
fn parse_shell(shell_name: &str) -> Result<Shell> {
    match shell_name.to_lowercase().as_str() {
        "bash" => Ok(Shell::Bash),
        "zsh" => Ok(Shell::Zsh),
        "fish" => Ok(Shell::Fish),
        _ => Err(ConfigError::Generic(format!(
            "Unsupported shell: {shell_name}. Supported shells: bash, zsh, fish"
        ))
        .into()),
    }
}
