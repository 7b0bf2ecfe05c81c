//! Editing and line mode state of a session

use std::fmt;

use serde::{Deserialize, Serialize};

use super::keybindings;

/// Keymap family driving the line editor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EditingMode {
    #[default]
    Emacs,
    Vi,
}

impl EditingMode {
    pub fn name(&self) -> &'static str {
        match self {
            EditingMode::Emacs => "Emacs",
            EditingMode::Vi => "Vi",
        }
    }

    /// The other mode
    pub fn toggled(self) -> Self {
        match self {
            EditingMode::Emacs => EditingMode::Vi,
            EditingMode::Vi => EditingMode::Emacs,
        }
    }
}

impl fmt::Display for EditingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// What Enter does
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineMode {
    /// Enter submits
    #[default]
    Single,
    /// Enter inserts a newline; Escape-Enter submits
    Multi,
}

/// Mode pair owned by the input session
///
/// The line mode is fixed when the session starts. The editing mode only
/// changes through [`ModeState::toggle_editing_mode`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ModeState {
    editing: EditingMode,
    line: LineMode,
}

impl ModeState {
    pub fn new(editing: EditingMode, line: LineMode) -> Self {
        Self { editing, line }
    }

    pub fn editing_mode(&self) -> EditingMode {
        self.editing
    }

    pub fn line_mode(&self) -> LineMode {
        self.line
    }

    /// Flip Emacs and Vi
    pub fn toggle_editing_mode(&mut self) -> EditingMode {
        self.editing = self.editing.toggled();
        self.editing
    }

    /// One-line legend shown above the prompt
    ///
    /// e.g. `[F4] Emacs | [C-Space] Autocomplete | [Enter] Run | [C-c] Abort command | [C-d] Quit`
    pub fn status_line(&self) -> String {
        keybindings::legend(self)
    }
}
