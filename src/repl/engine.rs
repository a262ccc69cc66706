use nu_ansi_term::{Color, Style};
use reedline::{DefaultHinter, FileBackedHistory, Reedline, Signal};

use crate::boundary::{Action, dispatch};
use crate::config::{Config, ReplConfig};
use crate::error::Result;
use crate::eval::Evaluator;

use super::highlighter::SyntaxHighlighter;
use super::prompt::ShellPrompt;
use super::shared_state::SharedState;
use super::validator::BoundaryValidator;

/// REPL engine for interactive statement entry
pub struct ReplEngine {
    /// Line editor for statement input
    editor: Reedline,

    /// Shared state with the editor components
    shared_state: SharedState,

    /// Prompt strings
    repl_config: ReplConfig,

    /// Whether to continue running
    running: bool,
}

impl ReplEngine {
    /// Create a new REPL engine with shared state
    ///
    /// # Arguments
    /// * `shared_state` - Shared state read by the validator, highlighter and prompt
    /// * `config` - Prompt, display and history settings
    pub fn new(shared_state: SharedState, config: &Config) -> Result<Self> {
        let validator = BoundaryValidator::new(shared_state.clone());
        let highlighter =
            SyntaxHighlighter::new(shared_state.clone(), config.display.syntax_highlighting);
        let hinter =
            DefaultHinter::default().with_style(Style::new().italic().fg(Color::DarkGray));

        let mut editor = Reedline::create()
            .with_validator(Box::new(validator))
            .with_highlighter(Box::new(highlighter))
            .with_hinter(Box::new(hinter))
            .with_ansi_colors(config.display.color_output);

        // Load history if persistent
        if config.history.persist {
            match FileBackedHistory::with_file(
                config.history.max_size,
                config.history.file_path.clone(),
            ) {
                Ok(history) => editor = editor.with_history(Box::new(history)),
                Err(e) => tracing::warn!(
                    path = %config.history.file_path.display(),
                    "history disabled: {e}"
                ),
            }
        }

        Ok(Self {
            editor,
            shared_state,
            repl_config: config.repl.clone(),
            running: true,
        })
    }

    /// Read one submitted buffer
    ///
    /// The validator keeps the editor open until the active mode's completion
    /// rule accepts the buffer, so what comes back is a whole statement.
    ///
    /// # Returns
    /// * `Result<Option<String>>` - Buffer, empty on Ctrl-C, `None` on Ctrl-D
    pub fn read_line(&mut self) -> Result<Option<String>> {
        let prompt = ShellPrompt::new(self.shared_state.mode(), &self.repl_config);
        match self.editor.read_line(&prompt)? {
            Signal::Success(buffer) => Ok(Some(buffer)),
            Signal::CtrlC => Ok(Some(String::new())),
            Signal::CtrlD => {
                self.running = false;
                Ok(None)
            }
            #[allow(unreachable_patterns)]
            _ => Ok(Some(String::new())),
        }
    }

    /// Route a submitted buffer and apply its effect on the shell
    ///
    /// Mode switches update the shared state right away, so the next
    /// validation and prompt already use the new mode.
    pub fn process_input(&mut self, input: &str) -> Action {
        let action = dispatch(self.shared_state.mode(), input);
        match &action {
            Action::SwitchMode(mode) => {
                tracing::debug!(from = %self.shared_state.mode(), to = %mode, "mode switch");
                self.shared_state.set_mode(*mode);
            }
            Action::Exit => self.stop(),
            _ => {}
        }
        action
    }

    /// Start the REPL loop
    ///
    /// Reads statements, hands them to `evaluator` and prints the results
    /// until Ctrl-D or an exit command.
    pub fn run<E: Evaluator + ?Sized>(&mut self, evaluator: &mut E) -> Result<()> {
        while self.is_running() {
            let Some(input) = self.read_line()? else {
                break;
            };

            match self.process_input(&input) {
                Action::Evaluate(source) => {
                    match evaluator.evaluate(self.shared_state.mode(), &source) {
                        Ok(evaluation) => {
                            if let Some(output) = evaluation.output {
                                println!("{output}");
                            }
                        }
                        Err(e) => eprintln!("Error: {e}"),
                    }
                }
                Action::Message(message) => println!("{message}"),
                Action::Unknown(command) => {
                    eprintln!("Unknown system command: ){command} (try )help)");
                }
                Action::SwitchMode(_) | Action::Exit | Action::Ignore => {}
            }
        }

        self.sync_history();
        Ok(())
    }

    /// Get shared state reference
    pub fn shared_state(&self) -> &SharedState {
        &self.shared_state
    }

    /// Flush history to disk
    pub fn sync_history(&mut self) {
        if let Err(e) = self.editor.sync_history() {
            tracing::warn!("failed to save history: {e}");
        }
    }

    /// Stop the REPL
    pub fn stop(&mut self) {
        self.running = false;
    }

    /// Check if REPL is still running
    pub fn is_running(&self) -> bool {
        self.running
    }
}
