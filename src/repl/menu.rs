//! Keyword completion menu
//!
//! A columnar menu that stays out of sight until it has something to offer.
//! Typing opens it on every word character, so it must hide itself when the
//! word under the cursor has no keyword candidates, and it must not rewrite
//! the buffer unless the user picked a candidate.

use reedline::{
    ColumnarMenu, Completer, Editor, Menu, MenuBuilder, MenuEvent, MenuSettings, Painter,
    Suggestion,
};

use super::completion::is_word_char;
use super::keybindings::COMPLETION_MENU_NAME;

/// Completion menu that shows only while it has candidates.
///
/// After activation the list is shown whenever it is non-empty, which lets
/// the completion key list every keyword on an empty word. After an edit it
/// is shown only while the cursor ends a word. Nothing is selected until the
/// user moves through the list; the first move selects the highlighted
/// candidate.
pub struct KeywordMenu {
    inner: ColumnarMenu,
    /// Values must be refreshed before the visibility is known
    pending: bool,
    /// The last refresh came from an edit rather than an activation
    edited: bool,
    visible: bool,
    selected: bool,
}

impl KeywordMenu {
    pub fn new() -> Self {
        Self {
            inner: ColumnarMenu::default().with_name(COMPLETION_MENU_NAME),
            pending: false,
            edited: false,
            visible: false,
            selected: false,
        }
    }

    /// Whether a candidate has been picked
    pub fn has_selection(&self) -> bool {
        self.selected
    }

    /// Recompute visibility from the current values and cursor
    pub fn refresh_visibility(&mut self, editor: &Editor) {
        self.pending = false;
        let has_values = !self.inner.get_values().is_empty();
        self.visible = has_values && (!self.edited || cursor_ends_word(editor));
    }
}

impl Default for KeywordMenu {
    fn default() -> Self {
        Self::new()
    }
}

fn cursor_ends_word(editor: &Editor) -> bool {
    let buffer = editor.get_buffer();
    let pos = editor.line_buffer().insertion_point();
    buffer
        .get(..pos)
        .and_then(|head| head.chars().next_back())
        .is_some_and(is_word_char)
}

impl Menu for KeywordMenu {
    fn settings(&self) -> &MenuSettings {
        self.inner.settings()
    }

    fn is_active(&self) -> bool {
        self.inner.is_active() && (self.pending || self.visible)
    }

    fn menu_event(&mut self, event: MenuEvent) {
        match &event {
            MenuEvent::Activate(_) => {
                self.pending = true;
                self.edited = false;
                self.selected = false;
            }
            MenuEvent::Edit(_) => {
                self.pending = true;
                self.edited = true;
                self.selected = false;
            }
            MenuEvent::Deactivate => {
                self.pending = false;
                self.visible = false;
                self.selected = false;
            }
            // The highlighted candidate becomes the selection.
            MenuEvent::NextElement if !self.selected => {
                self.selected = true;
                return;
            }
            _ => self.selected = true,
        }
        self.inner.menu_event(event);
    }

    fn can_quick_complete(&self) -> bool {
        self.selected
    }

    fn can_partially_complete(
        &mut self,
        values_updated: bool,
        editor: &mut Editor,
        completer: &mut dyn Completer,
    ) -> bool {
        self.inner
            .can_partially_complete(values_updated, editor, completer)
    }

    fn update_values(&mut self, editor: &mut Editor, completer: &mut dyn Completer) {
        self.inner.update_values(editor, completer);
    }

    fn update_working_details(
        &mut self,
        editor: &mut Editor,
        completer: &mut dyn Completer,
        painter: &Painter,
    ) {
        self.inner.update_working_details(editor, completer, painter);
        if self.pending {
            self.refresh_visibility(editor);
        }
    }

    fn replace_in_buffer(&self, editor: &mut Editor) {
        if self.selected {
            self.inner.replace_in_buffer(editor);
        }
    }

    fn menu_required_lines(&self, terminal_columns: u16) -> u16 {
        self.inner.menu_required_lines(terminal_columns)
    }

    fn menu_string(&self, available_lines: u16, use_ansi_coloring: bool) -> String {
        self.inner.menu_string(available_lines, use_ansi_coloring)
    }

    fn min_rows(&self) -> u16 {
        self.inner.min_rows()
    }

    fn get_values(&self) -> &[Suggestion] {
        self.inner.get_values()
    }

    fn set_cursor_pos(&mut self, pos: (u16, u16)) {
        self.inner.set_cursor_pos(pos);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repl::completer::SqlCompleter;
    use crate::repl::keywords::{KeywordCase, KeywordCatalog};
    use reedline::UndoBehavior;
    use std::sync::Arc;

    fn editor_with(text: &str) -> Editor {
        let mut editor = Editor::default();
        editor.edit_buffer(
            |buffer| buffer.set_buffer(text.to_string()),
            UndoBehavior::CreateUndoPoint,
        );
        editor
    }

    fn completer() -> SqlCompleter {
        SqlCompleter::new(Arc::new(KeywordCatalog::build(KeywordCase::Lower)))
    }

    /// Drive the menu the way the engine does: event, then a value refresh.
    fn open(menu: &mut KeywordMenu, editor: &mut Editor, event: MenuEvent) {
        menu.menu_event(event);
        menu.update_values(editor, &mut completer());
        menu.refresh_visibility(editor);
    }

    #[test]
    fn test_opening_leaves_buffer_untouched() {
        let mut editor = editor_with("SELECT * FROM t WH");
        let mut menu = KeywordMenu::new();
        open(&mut menu, &mut editor, MenuEvent::Activate(false));

        assert!(menu.is_active());
        assert!(menu.get_values().iter().any(|s| s.value == "where"));
        assert!(!menu.has_selection());

        menu.replace_in_buffer(&mut editor);
        assert_eq!(editor.get_buffer(), "SELECT * FROM t WH");
    }

    #[test]
    fn test_first_move_selects_highlighted_candidate() {
        let mut editor = editor_with("sel");
        let mut menu = KeywordMenu::new();
        open(&mut menu, &mut editor, MenuEvent::Activate(false));
        assert!(!menu.can_quick_complete());

        menu.menu_event(MenuEvent::NextElement);
        assert!(menu.has_selection());
        assert!(menu.can_quick_complete());

        menu.replace_in_buffer(&mut editor);
        assert_eq!(editor.get_buffer(), "select ");
    }

    #[test]
    fn test_hidden_without_candidates() {
        let mut editor = editor_with("SELECT t1");
        let mut menu = KeywordMenu::new();
        open(&mut menu, &mut editor, MenuEvent::Activate(false));
        assert!(!menu.is_active());
    }

    #[test]
    fn test_activation_on_empty_word_lists_every_keyword() {
        let mut editor = editor_with("SELECT * ");
        let mut menu = KeywordMenu::new();
        open(&mut menu, &mut editor, MenuEvent::Activate(false));
        assert!(menu.is_active());
        assert_eq!(
            menu.get_values().len(),
            KeywordCatalog::build(KeywordCase::Lower).len()
        );
    }

    #[test]
    fn test_edit_past_word_end_hides_menu() {
        let mut editor = editor_with("SELECT * FROM t WH");
        let mut menu = KeywordMenu::new();
        open(&mut menu, &mut editor, MenuEvent::Activate(false));
        assert!(menu.is_active());

        editor.edit_buffer(|buffer| buffer.insert_str(" "), UndoBehavior::CreateUndoPoint);
        open(&mut menu, &mut editor, MenuEvent::Edit(false));
        assert!(!menu.is_active());
    }

    #[test]
    fn test_edit_narrows_candidates() {
        let mut editor = editor_with("s");
        let mut menu = KeywordMenu::new();
        open(&mut menu, &mut editor, MenuEvent::Activate(false));
        let wide = menu.get_values().len();

        editor.edit_buffer(|buffer| buffer.insert_str("el"), UndoBehavior::CreateUndoPoint);
        open(&mut menu, &mut editor, MenuEvent::Edit(false));
        assert!(menu.is_active());
        assert!(menu.get_values().len() < wide);
        assert_eq!(menu.get_values()[0].value, "select");
    }

    #[test]
    fn test_deactivate_clears_selection() {
        let mut editor = editor_with("sel");
        let mut menu = KeywordMenu::new();
        open(&mut menu, &mut editor, MenuEvent::Activate(false));
        menu.menu_event(MenuEvent::NextElement);
        menu.menu_event(MenuEvent::Deactivate);
        assert!(!menu.is_active());
        assert!(!menu.has_selection());
    }
}
