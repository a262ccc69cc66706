//! Custom prompt implementation for arrsh

use std::borrow::Cow;

use reedline::{Prompt, PromptEditMode, PromptHistorySearch, PromptHistorySearchStatus};

use crate::boundary::Mode;
use crate::config::ReplConfig;

/// Mode-aware prompt for the arrsh REPL
pub struct ShellPrompt {
    /// Mode the prompt is rendered for
    mode: Mode,
    array_prompt: String,
    sql_prompt: String,
    continuation: String,
}

impl ShellPrompt {
    /// Create a new prompt
    ///
    /// # Arguments
    /// * `mode` - Active language mode
    /// * `config` - Prompt strings
    pub fn new(mode: Mode, config: &ReplConfig) -> Self {
        Self {
            mode,
            array_prompt: config.array_prompt.clone(),
            sql_prompt: config.sql_prompt.clone(),
            continuation: config.continuation_prompt.clone(),
        }
    }
}

impl Prompt for ShellPrompt {
    /// Render the left prompt (main prompt)
    fn render_prompt_left(&self) -> Cow<'_, str> {
        match self.mode {
            Mode::Array => Cow::Borrowed(self.array_prompt.as_str()),
            Mode::Sql => Cow::Borrowed(self.sql_prompt.as_str()),
        }
    }

    /// Render the right prompt (empty in our case)
    fn render_prompt_right(&self) -> Cow<'_, str> {
        "".into()
    }

    /// Render the prompt indicator
    ///
    /// Empty since the left prompt carries its own marker.
    fn render_prompt_indicator(&self, _prompt_mode: PromptEditMode) -> Cow<'_, str> {
        "".into()
    }

    /// Render the continuation prompt shown while a statement is open
    fn render_prompt_multiline_indicator(&self) -> Cow<'_, str> {
        Cow::Borrowed(self.continuation.as_str())
    }

    /// Render the history search prompt
    fn render_prompt_history_search_indicator(
        &self,
        history_search: PromptHistorySearch,
    ) -> Cow<'_, str> {
        let prefix = match history_search.status {
            PromptHistorySearchStatus::Passing => "",
            PromptHistorySearchStatus::Failing => "failing ",
        };

        format!("({}reverse-search: {}) ", prefix, history_search.term).into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn prompt(mode: Mode) -> ShellPrompt {
        ShellPrompt::new(mode, &ReplConfig::default())
    }

    #[test]
    fn test_array_prompt() {
        assert_eq!(prompt(Mode::Array).render_prompt_left(), "q) ");
    }

    #[test]
    fn test_sql_prompt() {
        assert_eq!(prompt(Mode::Sql).render_prompt_left(), "sql) ");
    }

    #[test]
    fn test_custom_prompts() {
        let config = ReplConfig {
            array_prompt: "k> ".to_string(),
            continuation_prompt: "  ".to_string(),
            ..ReplConfig::default()
        };
        let prompt = ShellPrompt::new(Mode::Array, &config);
        assert_eq!(prompt.render_prompt_left(), "k> ");
        assert_eq!(prompt.render_prompt_multiline_indicator(), "  ");
    }

    #[test]
    fn test_right_prompt_empty() {
        assert_eq!(prompt(Mode::Array).render_prompt_right(), "");
    }

    #[test]
    fn test_indicator_empty() {
        let prompt = prompt(Mode::Sql);
        let rendered = prompt.render_prompt_indicator(PromptEditMode::Default);
        assert_eq!(rendered, "");
    }

    #[test]
    fn test_multiline_indicator() {
        assert_eq!(prompt(Mode::Array).render_prompt_multiline_indicator(), "... ");
    }
}
