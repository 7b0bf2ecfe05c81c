//! Input session: one prompt, one outcome
//!
//! Each call to [`InputSession::next`] renders the prompt and blocks in the
//! line editor until the user submits, aborts or ends input. Mode toggles are
//! handled inside the call and do not end it.

use reedline::Signal;
use tracing::{debug, warn};

use super::editor::LineEditor;
use super::history::HistoryStore;
use super::keybindings::TOGGLE_EDITING_MODE_COMMAND;
use super::mode::ModeState;
use super::prompt::SqlPrompt;
use crate::error::Result;

/// Outcome of one prompt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSignal {
    /// Submitted, non-blank text to execute
    Statement(String),
    /// Input was aborted or blank; prompt again
    Continue,
    /// End of input; leave the loop
    Stop,
}

/// Prompt loop state shared across submissions
pub struct InputSession<E: LineEditor> {
    editor: E,
    modes: ModeState,
    history: HistoryStore,
    use_color: bool,
}

impl<E: LineEditor> InputSession<E> {
    pub fn new(editor: E, modes: ModeState, history: HistoryStore, use_color: bool) -> Self {
        Self {
            editor,
            modes,
            history,
            use_color,
        }
    }

    /// Wait for the next statement or control signal
    ///
    /// # Returns
    /// * `Result<InputSignal>` - Signal, or an error if the terminal fails
    pub fn next(&mut self) -> Result<InputSignal> {
        loop {
            let prompt = SqlPrompt::new(&self.modes, self.use_color);
            match self.editor.read_line(&prompt)? {
                Signal::Success(text) if text == TOGGLE_EDITING_MODE_COMMAND => {
                    let mode = self.modes.toggle_editing_mode();
                    debug!("Editing mode is now {}", mode);
                    self.editor.set_mode(&self.modes);
                }
                Signal::Success(text) => return Ok(self.submit(text)),
                Signal::CtrlC => {
                    debug!("Input aborted");
                    return Ok(InputSignal::Continue);
                }
                Signal::CtrlD => return Ok(InputSignal::Stop),
            }
        }
    }

    fn submit(&mut self, text: String) -> InputSignal {
        if text.trim().is_empty() {
            return InputSignal::Continue;
        }

        if let Err(e) = self.history.append(&text) {
            warn!("{}", e);
            eprintln!("Warning: {e}");
        }
        InputSignal::Statement(text)
    }

    pub fn modes(&self) -> &ModeState {
        &self.modes
    }

    pub fn history(&self) -> &HistoryStore {
        &self.history
    }

    pub fn editor(&self) -> &E {
        &self.editor
    }
}
