//! SQL keyword catalog used by completion and highlighting

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Letter case of the keywords offered to the user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum KeywordCase {
    #[default]
    Lower,
    Upper,
}

/// SQLite keywords, lowercase, in catalog order.
const SQLITE_KEYWORDS: &[&str] = &[
    "abort", "action", "add", "after", "all", "alter", "analyze", "and",
    "as", "asc", "attach", "autoincrement", "before", "begin", "between",
    "by", "cascade", "case", "cast", "check", "collate", "column",
    "commit", "conflict", "constraint", "create", "cross", "current_date",
    "current_time", "current_timestamp", "database", "default",
    "deferrable", "deferred", "delete", "desc", "detach", "distinct",
    "drop", "each", "else", "end", "escape", "except", "exclusive",
    "exists", "explain", "fail", "for", "foreign", "from", "full", "glob",
    "group", "having", "if", "ignore", "immediate", "in", "index",
    "indexed", "initially", "inner", "insert", "instead", "intersect",
    "into", "is", "isnull", "join", "key", "left", "like", "limit",
    "match", "natural", "no", "not", "notnull", "null", "of", "offset",
    "on", "or", "order", "outer", "plan", "pragma", "primary", "query",
    "raise", "recursive", "references", "regexp", "reindex", "release",
    "rename", "replace", "restrict", "right", "rollback", "row",
    "savepoint", "select", "set", "table", "temp", "temporary", "then",
    "to", "transaction", "trigger", "union", "unique", "update", "using",
    "vacuum", "values", "view", "virtual", "when", "where", "with",
    "without",
];

/// Immutable, ordered set of keywords in one letter case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeywordCatalog {
    case: KeywordCase,
    words: Vec<String>,
}

impl KeywordCatalog {
    /// Build the catalog for the given case
    ///
    /// The same case always yields the same ordered, duplicate-free list.
    pub fn build(case: KeywordCase) -> Self {
        let mut words: Vec<String> = Vec::with_capacity(SQLITE_KEYWORDS.len());
        for kw in SQLITE_KEYWORDS {
            let word = match case {
                KeywordCase::Lower => kw.to_ascii_lowercase(),
                KeywordCase::Upper => kw.to_ascii_uppercase(),
            };
            if !words.contains(&word) {
                words.push(word);
            }
        }
        Self { case, words }
    }

    pub fn case(&self) -> KeywordCase {
        self.case
    }

    /// Case-insensitive membership test
    pub fn contains(&self, word: &str) -> bool {
        self.words.iter().any(|w| w.eq_ignore_ascii_case(word))
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.words.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}
