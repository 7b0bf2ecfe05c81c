//! Line editor seam
//!
//! The input session only needs two things from a line editor: read one
//! line with a prompt, and switch keymaps. [`ReedlineEditor`] provides them
//! over reedline; tests drive the session with a scripted editor instead.

use std::io;
use std::sync::Arc;

use reedline::{History, Prompt, Reedline, ReedlineMenu, Signal};
use tracing::debug;

use super::completer::SqlCompleter;
use super::highlighter::SqlHighlighter;
use super::hinter::HistoryHinter;
use super::keybindings;
use super::keywords::KeywordCatalog;
use super::menu::KeywordMenu;
use super::mode::ModeState;

/// Blocking line source used by the input session
pub trait LineEditor {
    /// Read one line; blocks until submit, interrupt or end of input
    fn read_line(&mut self, prompt: &dyn Prompt) -> io::Result<Signal>;

    /// Apply the keymap for `state`, keeping any pending buffer
    fn set_mode(&mut self, state: &ModeState);
}

/// Editor features chosen at startup
#[derive(Debug, Clone, Copy)]
pub struct EditorSettings {
    pub syntax_highlighting: bool,
    pub history_hints: bool,
    pub use_color: bool,
}

impl Default for EditorSettings {
    fn default() -> Self {
        Self {
            syntax_highlighting: true,
            history_hints: true,
            use_color: true,
        }
    }
}

/// reedline-backed editor
pub struct ReedlineEditor {
    /// Taken out only while the edit mode is being swapped
    editor: Option<Reedline>,
}

impl ReedlineEditor {
    /// Build the editor
    ///
    /// # Arguments
    /// * `state` - Initial mode state (selects keymaps)
    /// * `settings` - Highlighting, hints and color switches
    /// * `catalog` - Keyword catalog for completion and highlighting
    /// * `history` - Navigation history seeded from the history store
    pub fn new(
        state: &ModeState,
        settings: EditorSettings,
        catalog: Arc<KeywordCatalog>,
        history: Box<dyn History>,
    ) -> Self {
        // Candidates reach the buffer only when picked from the menu.
        let mut editor = Reedline::create()
            .with_history(history)
            .with_completer(Box::new(SqlCompleter::new(catalog.clone())))
            .with_menu(ReedlineMenu::EngineCompleter(Box::new(KeywordMenu::new())))
            .with_quick_completions(false)
            .with_partial_completions(false)
            .with_highlighter(Box::new(SqlHighlighter::new(
                catalog,
                settings.syntax_highlighting && settings.use_color,
            )))
            .with_ansi_colors(settings.use_color)
            .with_edit_mode(keybindings::edit_mode(state));

        if settings.history_hints {
            editor = editor.with_hinter(Box::new(HistoryHinter::new()));
        }

        Self {
            editor: Some(editor),
        }
    }
}

impl LineEditor for ReedlineEditor {
    fn read_line(&mut self, prompt: &dyn Prompt) -> io::Result<Signal> {
        self.editor
            .as_mut()
            .ok_or_else(|| io::Error::other("line editor is unavailable"))?
            .read_line(prompt)
    }

    fn set_mode(&mut self, state: &ModeState) {
        debug!("Switching keymap to {}", state.editing_mode());
        if let Some(editor) = self.editor.take() {
            self.editor = Some(editor.with_edit_mode(keybindings::edit_mode(state)));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repl::keywords::KeywordCase;
    use crate::repl::mode::{EditingMode, LineMode};
    use reedline::FileBackedHistory;

    fn editor(state: &ModeState) -> ReedlineEditor {
        ReedlineEditor::new(
            state,
            EditorSettings::default(),
            Arc::new(KeywordCatalog::build(KeywordCase::Lower)),
            Box::new(FileBackedHistory::default()),
        )
    }

    #[test]
    fn test_mode_swap_keeps_the_same_editor() {
        let mut state = ModeState::new(EditingMode::Emacs, LineMode::Single);
        let mut editor = editor(&state);

        for _ in 0..3 {
            state.toggle_editing_mode();
            editor.set_mode(&state);
            assert!(editor.editor.is_some());
        }
    }
}
