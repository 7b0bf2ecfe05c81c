//! Custom prompt implementation for sqshell

use std::borrow::Cow;

use nu_ansi_term::{Color, Style};
use reedline::{
    Prompt, PromptEditMode, PromptHistorySearch, PromptHistorySearchStatus, PromptViMode,
};

use super::mode::ModeState;

/// Main prompt text
pub const PROMPT_TEXT: &str = "SQL \u{279C} ";

/// Prompt showing the mode legend above the input line
pub struct SqlPrompt {
    /// Legend rendered from the mode state at the time of the prompt
    status_line: String,
    /// Whether to emit ANSI styling
    use_color: bool,
}

impl SqlPrompt {
    /// Create a prompt for the current mode state
    ///
    /// # Arguments
    /// * `state` - Mode state the legend is rendered from
    /// * `use_color` - Whether to style the legend and prompt
    pub fn new(state: &ModeState, use_color: bool) -> Self {
        Self {
            status_line: state.status_line(),
            use_color,
        }
    }

    pub fn status_line(&self) -> &str {
        &self.status_line
    }
}

impl Prompt for SqlPrompt {
    fn render_prompt_left(&self) -> Cow<'_, str> {
        if !self.use_color {
            return format!("{}\n{}", self.status_line, PROMPT_TEXT).into();
        }

        let toolbar = Style::new().dimmed().paint(&self.status_line);
        let language = Color::Cyan.bold().paint("SQL");
        let arrow = Color::Green.paint(" \u{279C} ");
        format!("{toolbar}\n{language}{arrow}").into()
    }

    fn render_prompt_right(&self) -> Cow<'_, str> {
        "".into()
    }

    /// Vi mode marker; nothing in Emacs mode
    fn render_prompt_indicator(&self, prompt_mode: PromptEditMode) -> Cow<'_, str> {
        match prompt_mode {
            PromptEditMode::Vi(PromptViMode::Normal) => "[N] ".into(),
            PromptEditMode::Vi(PromptViMode::Insert) => "[I] ".into(),
            _ => "".into(),
        }
    }

    fn render_prompt_multiline_indicator(&self) -> Cow<'_, str> {
        "... ".into()
    }

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
    use crate::repl::mode::{EditingMode, LineMode};

    fn plain(editing: EditingMode, line: LineMode) -> SqlPrompt {
        SqlPrompt::new(&ModeState::new(editing, line), false)
    }

    #[test]
    fn test_plain_prompt_has_legend_and_arrow() {
        let prompt = plain(EditingMode::Emacs, LineMode::Single);
        assert_eq!(
            prompt.render_prompt_left(),
            "[F4] Emacs | [C-Space] Autocomplete | [Enter] Run | [C-c] Abort command | [C-d] Quit\nSQL \u{279C} "
        );
    }

    #[test]
    fn test_colored_prompt_keeps_text() {
        let prompt = SqlPrompt::new(&ModeState::default(), true);
        let rendered = prompt.render_prompt_left();
        assert!(rendered.contains("SQL"));
        assert!(rendered.contains("\u{279C}"));
        assert!(rendered.contains("[F4] Emacs"));
    }

    #[test]
    fn test_vi_indicator() {
        let prompt = plain(EditingMode::Vi, LineMode::Single);
        assert_eq!(
            prompt.render_prompt_indicator(PromptEditMode::Vi(PromptViMode::Normal)),
            "[N] "
        );
        assert_eq!(prompt.render_prompt_indicator(PromptEditMode::Emacs), "");
    }

    #[test]
    fn test_multiline_indicator() {
        let prompt = plain(EditingMode::Emacs, LineMode::Multi);
        assert_eq!(prompt.render_prompt_multiline_indicator(), "... ");
        assert!(prompt.status_line().contains("[Escape-Enter] Run"));
    }
}
