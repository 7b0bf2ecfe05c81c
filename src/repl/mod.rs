//! REPL (Read-Eval-Print Loop) engine for sqshell
//!
//! This module provides the interactive shell with features:
//! - Line editing with reedline, Emacs and Vi keymaps toggled at runtime
//! - Keyword completion from a fixed SQL keyword catalog
//! - Append-only statement history with inline hints
//! - Syntax highlighting
//! - Single or multi-line input
//! - A status line describing the active key surface
//!
//! Data flows one way: [`InputSession`] yields statements, [`ReplEngine`]
//! hands them to the execution bridge and prints what comes back.

pub mod completer;
pub mod completion;
pub mod editor;
pub mod engine;
pub mod highlighter;
pub mod hinter;
pub mod history;
pub mod keybindings;
pub mod keywords;
pub mod menu;
pub mod mode;
pub mod prompt;
pub mod session;

pub use completer::SqlCompleter;
pub use completion::CompletionEngine;
pub use editor::{EditorSettings, LineEditor, ReedlineEditor};
pub use engine::ReplEngine;
pub use highlighter::SqlHighlighter;
pub use hinter::HistoryHinter;
pub use history::HistoryStore;
pub use keybindings::{KEY_SURFACE, KeyAction};
pub use keywords::{KeywordCase, KeywordCatalog};
pub use menu::KeywordMenu;
pub use mode::{EditingMode, LineMode, ModeState};
pub use prompt::SqlPrompt;
pub use session::{InputSession, InputSignal};
