//! Key surface of the shell
//!
//! [`KEY_SURFACE`] is the single table of keys the shell binds on top of the
//! stock reedline keymaps. Both the reedline keybindings and the legend in
//! the status line are generated from it. Word characters are bound as well,
//! so typing opens and narrows the completion menu.

use reedline::{
    EditCommand, EditMode, Emacs, KeyCode, KeyModifiers, Keybindings, ReedlineEvent, Vi,
    default_emacs_keybindings, default_vi_insert_keybindings, default_vi_normal_keybindings,
};

use super::mode::{EditingMode, LineMode, ModeState};

/// Name of the completion menu registered with the editor
pub const COMPLETION_MENU_NAME: &str = "completion_menu";

/// Host command the editor returns when the mode-toggle key is pressed
pub const TOGGLE_EDITING_MODE_COMMAND: &str = "\u{0}sqshell:toggle-editing-mode";

/// What a bound key does
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    /// Switch between Emacs and Vi
    ToggleEditingMode,
    /// Open the completion menu, or move to the next candidate
    Complete,
    /// Submit the buffer
    Submit,
    /// Insert a newline into the buffer
    NewLine,
    /// Discard the buffer and prompt again
    Abort,
    /// End the session
    Quit,
    /// Copy the history hint into the buffer
    AcceptHint,
}

/// One row of the key table
#[derive(Debug, Clone, Copy)]
pub struct KeySpec {
    /// Label shown in the legend
    pub label: &'static str,
    pub modifiers: KeyModifiers,
    pub code: KeyCode,
    pub action: KeyAction,
    /// Line mode the binding applies to; `None` for both
    pub line_mode: Option<LineMode>,
    /// Whether the key appears in the legend
    pub in_legend: bool,
}

pub const KEY_SURFACE: &[KeySpec] = &[
    KeySpec {
        label: "F4",
        modifiers: KeyModifiers::NONE,
        code: KeyCode::F(4),
        action: KeyAction::ToggleEditingMode,
        line_mode: None,
        in_legend: true,
    },
    KeySpec {
        label: "C-Space",
        modifiers: KeyModifiers::CONTROL,
        code: KeyCode::Char(' '),
        action: KeyAction::Complete,
        line_mode: None,
        in_legend: true,
    },
    KeySpec {
        label: "Tab",
        modifiers: KeyModifiers::NONE,
        code: KeyCode::Tab,
        action: KeyAction::Complete,
        line_mode: None,
        in_legend: false,
    },
    KeySpec {
        label: "Enter",
        modifiers: KeyModifiers::NONE,
        code: KeyCode::Enter,
        action: KeyAction::Submit,
        line_mode: Some(LineMode::Single),
        in_legend: true,
    },
    KeySpec {
        label: "Enter",
        modifiers: KeyModifiers::NONE,
        code: KeyCode::Enter,
        action: KeyAction::NewLine,
        line_mode: Some(LineMode::Multi),
        in_legend: true,
    },
    KeySpec {
        label: "Escape-Enter",
        modifiers: KeyModifiers::ALT,
        code: KeyCode::Enter,
        action: KeyAction::Submit,
        line_mode: Some(LineMode::Multi),
        in_legend: true,
    },
    KeySpec {
        label: "C-c",
        modifiers: KeyModifiers::CONTROL,
        code: KeyCode::Char('c'),
        action: KeyAction::Abort,
        line_mode: None,
        in_legend: true,
    },
    KeySpec {
        label: "C-d",
        modifiers: KeyModifiers::CONTROL,
        code: KeyCode::Char('d'),
        action: KeyAction::Quit,
        line_mode: None,
        in_legend: true,
    },
    KeySpec {
        label: "Right",
        modifiers: KeyModifiers::NONE,
        code: KeyCode::Right,
        action: KeyAction::AcceptHint,
        line_mode: None,
        in_legend: false,
    },
];

impl KeySpec {
    fn applies_to(&self, line: LineMode) -> bool {
        self.line_mode.is_none_or(|m| m == line)
    }
}

impl KeyAction {
    /// Legend text; the toggle key shows the active editing mode
    pub fn describe(&self, state: &ModeState) -> &'static str {
        match self {
            KeyAction::ToggleEditingMode => state.editing_mode().name(),
            KeyAction::Complete => "Autocomplete",
            KeyAction::Submit => "Run",
            KeyAction::NewLine => "New line",
            KeyAction::Abort => "Abort command",
            KeyAction::Quit => "Quit",
            KeyAction::AcceptHint => "Accept hint",
        }
    }

    /// Editor event bound for this action
    pub fn event(&self) -> ReedlineEvent {
        match self {
            KeyAction::ToggleEditingMode => {
                ReedlineEvent::ExecuteHostCommand(TOGGLE_EDITING_MODE_COMMAND.to_string())
            }
            KeyAction::Complete => ReedlineEvent::UntilFound(vec![
                ReedlineEvent::Menu(COMPLETION_MENU_NAME.to_string()),
                ReedlineEvent::MenuNext,
            ]),
            // The first Enter applies a picked candidate and closes an open
            // menu; the second submits. Without a menu the first one submits.
            KeyAction::Submit => {
                ReedlineEvent::Multiple(vec![ReedlineEvent::Enter, ReedlineEvent::Enter])
            }
            KeyAction::NewLine => ReedlineEvent::Edit(vec![EditCommand::InsertNewline]),
            KeyAction::Abort => ReedlineEvent::CtrlC,
            KeyAction::Quit => ReedlineEvent::CtrlD,
            KeyAction::AcceptHint => ReedlineEvent::UntilFound(vec![
                ReedlineEvent::HistoryHintComplete,
                ReedlineEvent::MenuRight,
                ReedlineEvent::Right,
            ]),
        }
    }
}

/// Key table entries active for a line mode, in table order
pub fn active_keys(line: LineMode) -> impl Iterator<Item = &'static KeySpec> {
    KEY_SURFACE.iter().filter(move |k| k.applies_to(line))
}

/// Status line legend for the given state
pub fn legend(state: &ModeState) -> String {
    active_keys(state.line_mode())
        .filter(|k| k.in_legend)
        .map(|k| format!("[{}] {}", k.label, k.action.describe(state)))
        .collect::<Vec<_>>()
        .join(" | ")
}

/// Layer the key table onto a stock keymap
pub fn apply_key_surface(keybindings: &mut Keybindings, line: LineMode) {
    for key in active_keys(line) {
        keybindings.add_binding(key.modifiers, key.code, key.action.event());
    }
}

/// Event for a typed word character: insert it, then open the menu
///
/// An already open menu ignores the second event and narrows on the edit.
pub fn typed_char_event(c: char) -> ReedlineEvent {
    ReedlineEvent::Multiple(vec![
        ReedlineEvent::Edit(vec![EditCommand::InsertChar(c)]),
        ReedlineEvent::Menu(COMPLETION_MENU_NAME.to_string()),
    ])
}

/// Make typing word characters open and narrow the completion menu
///
/// Shifted letters are looked up in lowercase with the SHIFT modifier.
pub fn apply_typing_completion(keybindings: &mut Keybindings) {
    for c in ('a'..='z').chain('A'..='Z').chain('0'..='9').chain(['_']) {
        keybindings.add_binding(KeyModifiers::NONE, KeyCode::Char(c), typed_char_event(c));
    }
    for c in ('a'..='z').chain(['_']) {
        keybindings.add_binding(
            KeyModifiers::SHIFT,
            KeyCode::Char(c),
            typed_char_event(c.to_ascii_uppercase()),
        );
    }
}

/// Emacs keymap with the shell's keys
pub fn emacs_keybindings(line: LineMode) -> Keybindings {
    let mut keybindings = default_emacs_keybindings();
    apply_typing_completion(&mut keybindings);
    apply_key_surface(&mut keybindings, line);
    keybindings
}

/// Vi insert and normal keymaps with the shell's keys
///
/// In normal mode Enter always submits, so `Escape` then `Enter` runs the
/// buffer in both line modes.
pub fn vi_keybindings(line: LineMode) -> (Keybindings, Keybindings) {
    let mut insert = default_vi_insert_keybindings();
    apply_typing_completion(&mut insert);
    apply_key_surface(&mut insert, line);

    let mut normal = default_vi_normal_keybindings();
    apply_key_surface(&mut normal, line);
    normal.add_binding(
        KeyModifiers::NONE,
        KeyCode::Enter,
        KeyAction::Submit.event(),
    );

    (insert, normal)
}

/// Build the reedline edit mode for a state
pub fn edit_mode(state: &ModeState) -> Box<dyn EditMode> {
    match state.editing_mode() {
        EditingMode::Emacs => Box::new(Emacs::new(emacs_keybindings(state.line_mode()))),
        EditingMode::Vi => {
            let (insert, normal) = vi_keybindings(state.line_mode());
            Box::new(Vi::new(insert, normal))
        }
    }
}
