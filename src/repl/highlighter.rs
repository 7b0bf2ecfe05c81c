//! Syntax highlighter for SQL input
//!
//! The buffer is split into spans (words, quoted text, numbers, comments,
//! punctuation) and each span is styled. Span text is never altered, so the
//! styled output always renders back to the exact buffer.

use std::sync::Arc;

use nu_ansi_term::{Color, Style};
use reedline::{Highlighter, StyledText};

use super::completion::is_word_char;
use super::keywords::KeywordCatalog;

/// SQLite column type names
const TYPES: &[&str] = &[
    "INT", "INTEGER", "TINYINT", "SMALLINT", "MEDIUMINT", "BIGINT", "REAL", "DOUBLE", "FLOAT",
    "NUMERIC", "DECIMAL", "BOOLEAN", "DATE", "DATETIME", "TEXT", "CHAR", "VARCHAR", "CLOB",
    "BLOB",
];

/// SQLite core and aggregate functions
const FUNCTIONS: &[&str] = &[
    "ABS", "AVG", "CHANGES", "CHAR", "COALESCE", "COUNT", "DATE", "DATETIME", "GLOB",
    "GROUP_CONCAT", "HEX", "IFNULL", "IIF", "INSTR", "JULIANDAY", "LENGTH", "LIKE", "LOWER",
    "LTRIM", "MAX", "MIN", "NULLIF", "PRINTF", "QUOTE", "RANDOM", "REPLACE", "ROUND", "RTRIM",
    "STRFTIME", "SUBSTR", "SUM", "TIME", "TOTAL", "TRIM", "TYPEOF", "UPPER",
];

/// Highlighter for the SQL input buffer
pub struct SqlHighlighter {
    catalog: Arc<KeywordCatalog>,
    enabled: bool,
}

impl SqlHighlighter {
    /// Create a highlighter using the session's keyword catalog
    pub fn new(catalog: Arc<KeywordCatalog>, enabled: bool) -> Self {
        Self { catalog, enabled }
    }

    fn word_style(&self, word: &str) -> Style {
        let upper = word.to_ascii_uppercase();
        if self.catalog.contains(word) {
            Color::Green.bold().into()
        } else if TYPES.contains(&upper.as_str()) {
            Color::Cyan.bold().into()
        } else if FUNCTIONS.contains(&upper.as_str()) {
            Color::Magenta.into()
        } else {
            Style::default()
        }
    }

    fn punctuation_style(ch: char) -> Style {
        match ch {
            '(' | ')' => Color::Cyan.into(),
            ',' | ';' | '.' => Color::DarkGray.into(),
            '*' | '+' | '-' | '/' | '%' | '=' | '<' | '>' | '!' | '|' => Color::Blue.into(),
            _ => Style::default(),
        }
    }
}

impl Highlighter for SqlHighlighter {
    fn highlight(&self, line: &str, _cursor: usize) -> StyledText {
        let mut styled = StyledText::new();
        if !self.enabled {
            styled.push((Style::default(), line.to_string()));
            return styled;
        }

        let mut rest = line;
        while let Some(ch) = rest.chars().next() {
            let (len, style): (usize, Style) = if rest.starts_with("--") {
                let len = rest.find('\n').unwrap_or(rest.len());
                (len, Color::DarkGray.dimmed().into())
            } else if rest.starts_with("/*") {
                let len = rest[2..].find("*/").map_or(rest.len(), |i| i + 4);
                (len, Color::DarkGray.dimmed().into())
            } else if ch == '\'' {
                (quoted_len(rest, '\''), Color::Yellow.into())
            } else if ch == '"' || ch == '`' {
                (quoted_len(rest, ch), Style::default())
            } else if ch == '[' {
                (rest.find(']').map_or(rest.len(), |i| i + 1), Style::default())
            } else if ch.is_ascii_digit() {
                let len = rest
                    .find(|c: char| !(c.is_ascii_alphanumeric() || c == '.'))
                    .unwrap_or(rest.len());
                (len, Color::LightRed.into())
            } else if is_word_char(ch) {
                let len = rest.find(|c| !is_word_char(c)).unwrap_or(rest.len());
                (len, self.word_style(&rest[..len]))
            } else {
                (ch.len_utf8(), Self::punctuation_style(ch))
            };

            styled.push((style, rest[..len].to_string()));
            rest = &rest[len..];
        }

        styled
    }
}

/// Length of a quoted span starting at `text[0]`, doubled quotes included;
/// an unterminated span runs to the end.
fn quoted_len(text: &str, quote: char) -> usize {
    let mut chars = text.char_indices().skip(1).peekable();
    while let Some((i, c)) = chars.next() {
        if c == quote {
            if chars.peek().is_some_and(|&(_, next)| next == quote) {
                chars.next();
                continue;
            }
            return i + c.len_utf8();
        }
    }
    text.len()
}
