//! Hinter for reedline - provides inline hints based on history

use nu_ansi_term::{Color, Style};
use reedline::{Hinter, History, SearchQuery};

/// Suggests the rest of the most recent history entry extending the buffer
pub struct HistoryHinter {
    /// Style for hints
    style: Style,
    /// Current hint text
    current_hint: String,
}

impl HistoryHinter {
    /// Create a new hinter with the default dim style
    pub fn new() -> Self {
        Self {
            style: Style::new().italic().fg(Color::DarkGray),
            current_hint: String::new(),
        }
    }
}

impl Default for HistoryHinter {
    fn default() -> Self {
        Self::new()
    }
}

impl Hinter for HistoryHinter {
    /// Provide a hint for the current buffer
    ///
    /// # Arguments
    /// * `line` - The current input buffer
    /// * `pos` - Cursor position
    /// * `history` - Navigation history
    /// * `use_ansi_coloring` - Whether to use ANSI colors
    /// * `_cwd` - Current working directory (unused)
    ///
    /// # Returns
    /// * `String` - Hint text to display after the cursor
    fn handle(
        &mut self,
        line: &str,
        pos: usize,
        history: &dyn History,
        use_ansi_coloring: bool,
        _cwd: &str,
    ) -> String {
        self.current_hint.clear();

        if pos != line.len() || line.trim().is_empty() {
            return String::new();
        }

        let found = history
            .search(SearchQuery::last_with_prefix(line.to_string(), None))
            .ok()
            .and_then(|results| results.into_iter().next());

        let Some(item) = found else {
            return String::new();
        };

        // Strict extension only; an identical entry has nothing to add.
        let Some(hint) = item.command_line.strip_prefix(line) else {
            return String::new();
        };
        if hint.is_empty() {
            return String::new();
        }

        self.current_hint = hint.to_string();
        if use_ansi_coloring {
            self.style.paint(hint).to_string()
        } else {
            self.current_hint.clone()
        }
    }

    fn complete_hint(&self) -> String {
        self.current_hint.clone()
    }

    /// Next word of the hint, with its leading whitespace
    fn next_hint_token(&self) -> String {
        let trimmed = self.current_hint.trim_start();
        let lead = self.current_hint.len() - trimmed.len();
        let word_len = trimmed
            .find(char::is_whitespace)
            .unwrap_or(trimmed.len());
        self.current_hint[..lead + word_len].to_string()
    }
}
