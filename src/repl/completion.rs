//! Keyword completion engine
//!
//! Given the partial word under the cursor, the engine returns the catalog
//! entries that extend it. Matching ignores letter case; candidates keep the
//! catalog's case.

use super::keywords::KeywordCatalog;

/// Stateless keyword matcher.
#[derive(Debug, Clone, Copy, Default)]
pub struct CompletionEngine;

impl CompletionEngine {
    pub fn new() -> Self {
        Self
    }

    /// Candidates for `prefix`
    ///
    /// # Arguments
    /// * `prefix` - Partial word typed so far
    /// * `catalog` - Keyword catalog to search
    ///
    /// # Returns
    /// * `Vec<String>` - Matches in catalog order; the whole catalog for an empty
    ///   prefix, empty when nothing matches
    pub fn suggest(&self, prefix: &str, catalog: &KeywordCatalog) -> Vec<String> {
        catalog
            .iter()
            .filter(|word| starts_with_ignore_case(word, prefix))
            .map(str::to_string)
            .collect()
    }

    /// Locate the word ending at `pos`
    ///
    /// # Returns
    /// * `(usize, &str)` - Byte offset where the word starts, and the word itself
    pub fn word_before<'a>(&self, line: &'a str, pos: usize) -> (usize, &'a str) {
        let pos = clamp_to_boundary(line, pos);
        let head = &line[..pos];
        let start = head
            .char_indices()
            .rev()
            .take_while(|(_, c)| is_word_char(*c))
            .last()
            .map(|(i, _)| i)
            .unwrap_or(pos);
        (start, &line[start..pos])
    }
}

/// Identifier characters: `[A-Za-z0-9_]`
pub fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

fn starts_with_ignore_case(word: &str, prefix: &str) -> bool {
    word.len() >= prefix.len()
        && word
            .get(..prefix.len())
            .is_some_and(|head| head.eq_ignore_ascii_case(prefix))
}

fn clamp_to_boundary(line: &str, pos: usize) -> usize {
    let mut pos = pos.min(line.len());
    while !line.is_char_boundary(pos) {
        pos -= 1;
    }
    pos
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repl::keywords::KeywordCase;

    #[test]
    fn test_suggest_prefix_case_insensitive() {
        let engine = CompletionEngine::new();
        let lower = KeywordCatalog::build(KeywordCase::Lower);
        let upper = KeywordCatalog::build(KeywordCase::Upper);

        assert_eq!(engine.suggest("SEL", &lower), vec!["select"]);
        assert_eq!(engine.suggest("sel", &upper), vec!["SELECT"]);
    }

    #[test]
    fn test_every_candidate_extends_prefix() {
        let engine = CompletionEngine::new();
        let catalog = KeywordCatalog::build(KeywordCase::Upper);
        for prefix in ["c", "Cu", "in", "R", "tr"] {
            let candidates = engine.suggest(prefix, &catalog);
            assert!(!candidates.is_empty(), "no candidates for {prefix}");
            assert!(
                candidates
                    .iter()
                    .all(|c| c.to_lowercase().starts_with(&prefix.to_lowercase()))
            );
        }
    }

    #[test]
    fn test_candidates_follow_catalog_order() {
        let engine = CompletionEngine::new();
        let catalog = KeywordCatalog::build(KeywordCase::Lower);
        assert_eq!(
            engine.suggest("current", &catalog),
            vec!["current_date", "current_time", "current_timestamp"]
        );
    }

    #[test]
    fn test_empty_prefix_lists_whole_catalog() {
        let engine = CompletionEngine::new();
        let catalog = KeywordCatalog::build(KeywordCase::Upper);
        let all = engine.suggest("", &catalog);
        assert_eq!(all.len(), catalog.len());
        assert!(all.iter().map(String::as_str).eq(catalog.iter()));
    }

    #[test]
    fn test_no_match() {
        let engine = CompletionEngine::new();
        let catalog = KeywordCatalog::build(KeywordCase::Lower);
        assert!(engine.suggest("zzz", &catalog).is_empty());
        assert!(engine.suggest("é", &catalog).is_empty());
    }

    #[test]
    fn test_word_before_cursor() {
        let engine = CompletionEngine::new();
        assert_eq!(engine.word_before("SELECT * fr", 11), (9, "fr"));
        assert_eq!(engine.word_before("SELECT ", 7), (7, ""));
        assert_eq!(engine.word_before("sel", 2), (0, "se"));
        assert_eq!(engine.word_before("(ins", 4), (1, "ins"));
    }
}
