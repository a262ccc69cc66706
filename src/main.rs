//! arrsh - interactive shell for an array language and its SQL dialect
//!
//! The shell reads statements with a line editor that knows when a statement
//! is finished, and hands each finished statement to an evaluator.
//!
//! # Usage
//!
//! ```bash
//! # Interactive mode
//! arrsh
//!
//! # Start in SQL mode
//! arrsh --mode sql
//!
//! # Run a script
//! arrsh load.q
//! ```

use std::path::Path;

use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::LevelFilter;

use arrsh::cli::CliInterface;
use arrsh::error::Result;
use arrsh::eval::TranscriptEvaluator;
use arrsh::repl::{ReplEngine, SharedState};
use arrsh::script::ScriptRunner;

/// Application entry point
fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

/// Main application logic
///
/// 1. Parse command-line arguments and load configuration
/// 2. Initialize logging
/// 3. Handle subcommands, run a script, or start the interactive shell
fn run() -> Result<()> {
    let cli = CliInterface::new()?;

    initialize_logging(&cli);

    // Handle subcommands (version, completion, config, check, split)
    if cli.handle_subcommand()? {
        return Ok(());
    }

    let mut evaluator = TranscriptEvaluator::new();

    if let Some(path) = cli.script_file() {
        return run_script(&cli, path, &mut evaluator);
    }

    cli.print_banner();
    run_interactive_mode(&cli, &mut evaluator)
}

/// Run a script file and print what the evaluator returned
fn run_script(cli: &CliInterface, path: &Path, evaluator: &mut TranscriptEvaluator) -> Result<()> {
    let mut runner = ScriptRunner::new(cli.config().repl.start_mode, evaluator);
    let report = runner.run_file(path)?;

    for output in &report.outputs {
        println!("{output}");
    }
    tracing::info!(
        statements = report.statements,
        final_mode = %report.final_mode,
        "script finished"
    );
    Ok(())
}

/// Run application in interactive REPL mode
fn run_interactive_mode(cli: &CliInterface, evaluator: &mut TranscriptEvaluator) -> Result<()> {
    let config = cli.config();
    let shared_state = SharedState::with_config(config.repl.start_mode, &config.display);
    let mut repl = ReplEngine::new(shared_state, config)?;

    repl.run(evaluator)?;

    println!("Goodbye!");
    Ok(())
}

/// Initialize logging from the configured level
///
/// `RUST_LOG`, when set, takes precedence over the configuration.
fn initialize_logging(cli: &CliInterface) {
    let level = cli.config().logging.level.to_tracing_level();
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::from_level(level).into())
        .from_env_lossy();

    // Logs go to stderr so `check --json` and `split --json` stay parseable
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr);

    // Configure timestamps
    if cli.config().logging.timestamps {
        subscriber.init();
    } else {
        subscriber.without_time().init();
    }
}
