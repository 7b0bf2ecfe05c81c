//! Completer for reedline - provides keyword suggestions

use std::sync::Arc;

use reedline::{Completer, Span, Suggestion};

use super::completion::CompletionEngine;
use super::keywords::KeywordCatalog;

/// SQL keyword completer for reedline
pub struct SqlCompleter {
    /// Keyword matcher
    engine: CompletionEngine,

    /// Catalog fixed at session start
    catalog: Arc<KeywordCatalog>,
}

impl SqlCompleter {
    /// Create a new SQL completer
    ///
    /// # Arguments
    /// * `catalog` - Keyword catalog shared with the highlighter
    ///
    /// # Returns
    /// * `Self` - New completer
    pub fn new(catalog: Arc<KeywordCatalog>) -> Self {
        Self {
            engine: CompletionEngine::new(),
            catalog,
        }
    }
}

impl Completer for SqlCompleter {
    /// Complete the word under the cursor
    ///
    /// # Arguments
    /// * `line` - The input buffer
    /// * `pos` - Cursor position (byte index)
    ///
    /// # Returns
    /// * `Vec<Suggestion>` - Keywords replacing exactly the word before the cursor
    fn complete(&mut self, line: &str, pos: usize) -> Vec<Suggestion> {
        let (start, word) = self.engine.word_before(line, pos);
        let end = start + word.len();

        self.engine
            .suggest(word, &self.catalog)
            .into_iter()
            .map(|value| Suggestion {
                value,
                description: None,
                style: None,
                extra: None,
                span: Span::new(start, end),
                append_whitespace: true,
                match_indices: None,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repl::keywords::KeywordCase;

    fn create_test_completer(case: KeywordCase) -> SqlCompleter {
        SqlCompleter::new(Arc::new(KeywordCatalog::build(case)))
    }

    #[test]
    fn test_complete_partial_keyword() {
        let mut completer = create_test_completer(KeywordCase::Upper);
        let suggestions = completer.complete("sel", 3);
        assert_eq!(suggestions.len(), 1);
        assert_eq!(suggestions[0].value, "SELECT");
    }

    #[test]
    fn test_span_covers_only_current_word() {
        let mut completer = create_test_completer(KeywordCase::Lower);
        let suggestions = completer.complete("SELECT * FROM t WH", 18);
        assert!(suggestions.iter().any(|s| s.value == "where"));
        for suggestion in suggestions {
            assert_eq!(suggestion.span.start, 16);
            assert_eq!(suggestion.span.end, 18);
        }
    }

    #[test]
    fn test_no_word_offers_every_keyword() {
        let mut completer = create_test_completer(KeywordCase::Lower);
        let catalog_len = KeywordCatalog::build(KeywordCase::Lower).len();

        let at_start = completer.complete("", 0);
        assert_eq!(at_start.len(), catalog_len);
        assert_eq!(at_start[0].span, Span::new(0, 0));

        let after_space = completer.complete("SELECT * ", 9);
        assert_eq!(after_space.len(), catalog_len);
        assert!(after_space.iter().all(|s| s.span == Span::new(9, 9)));
    }

    #[test]
    fn test_unknown_word_no_suggestions() {
        let mut completer = create_test_completer(KeywordCase::Lower);
        assert!(completer.complete("SELECT t1", 9).is_empty());
    }
}
