//! Append-only statement history
//!
//! Every submitted statement is kept in memory for the session and appended
//! to a plain text file, one entry per line. Newlines inside an entry are
//! stored as the token `<\n>` so multi-line statements stay on one line.

use std::fs::{File, OpenOptions};
use std::io::{self, BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

use reedline::{FileBackedHistory, History, HistoryItem};
use tracing::debug;

use crate::error::HistoryError;

const NEWLINE_TOKEN: &str = "<\\n>";

/// Ordered log of submitted statements.
#[derive(Debug)]
pub struct HistoryStore {
    entries: Vec<String>,
    path: Option<PathBuf>,
}

impl HistoryStore {
    /// Open the history file, reading every existing entry
    ///
    /// A missing file is an empty history; the file is created on first append.
    ///
    /// # Returns
    /// * `Result<Self, HistoryError>` - Store or `HistoryError::Load`
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, HistoryError> {
        let path = path.into();
        let entries = match File::open(&path) {
            Ok(file) => read_entries(file).map_err(|source| HistoryError::Load {
                path: path.clone(),
                source,
            })?,
            Err(e) if e.kind() == io::ErrorKind::NotFound => Vec::new(),
            Err(source) => return Err(HistoryError::Load { path, source }),
        };

        debug!("Loaded {} history entries from {}", entries.len(), path.display());
        Ok(Self {
            entries,
            path: Some(path),
        })
    }

    /// History that is never written to disk
    pub fn in_memory() -> Self {
        Self {
            entries: Vec::new(),
            path: None,
        }
    }

    /// Record a submitted statement
    ///
    /// The entry is kept in memory even when writing the file fails.
    pub fn append(&mut self, line: &str) -> Result<(), HistoryError> {
        self.entries.push(line.to_string());

        let Some(path) = &self.path else {
            return Ok(());
        };

        write_entry(path, line).map_err(|source| HistoryError::Append {
            path: path.clone(),
            source,
        })
    }

    /// All entries, most recent last
    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// In-memory reedline history seeded with every stored entry
    ///
    /// Used for up/down navigation and hints; it never touches the file.
    /// Room is left for `session_capacity` more entries, so hints search the
    /// whole log.
    pub fn navigation_history(
        &self,
        session_capacity: usize,
    ) -> crate::error::Result<Box<dyn History>> {
        let capacity = self.entries.len().saturating_add(session_capacity.max(1));
        let mut history = FileBackedHistory::new(capacity)?;

        for entry in &self.entries {
            history.save(HistoryItem::from_command_line(entry.clone()))?;
        }
        Ok(Box::new(history))
    }
}

fn read_entries(file: File) -> io::Result<Vec<String>> {
    let mut entries = Vec::new();
    for line in BufReader::new(file).lines() {
        let line = line?;
        if line.is_empty() {
            continue;
        }
        entries.push(line.replace(NEWLINE_TOKEN, "\n"));
    }
    Ok(entries)
}

fn write_entry(path: &Path, line: &str) -> io::Result<()> {
    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    writeln!(file, "{}", line.replace('\n', NEWLINE_TOKEN))
}

#[cfg(test)]
mod tests {
    use super::*;
    use reedline::SearchQuery;

    #[test]
    fn test_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = HistoryStore::open(dir.path().join("none")).unwrap();
        assert!(store.entries().is_empty());
    }

    #[test]
    fn test_append_persists_across_sessions() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".sqshell_history");

        let mut store = HistoryStore::open(&path).unwrap();
        store.append("SELECT 1").unwrap();
        store.append("SELECT 1").unwrap();
        store.append("SELECT\n  2").unwrap();
        assert_eq!(store.entries().len(), 3);

        let reopened = HistoryStore::open(&path).unwrap();
        assert_eq!(reopened.entries(), &["SELECT 1", "SELECT 1", "SELECT\n  2"]);
    }

    #[test]
    fn test_multiline_entry_is_one_file_line() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("h");
        let mut store = HistoryStore::open(&path).unwrap();
        store.append("SELECT *\nFROM t").unwrap();

        let raw = std::fs::read_to_string(&path).unwrap();
        assert_eq!(raw, "SELECT *<\\n>FROM t\n");
    }

    #[test]
    fn test_append_failure_keeps_entry() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = HistoryStore::open(dir.path().join("missing/dir/h")).unwrap();
        let err = store.append("SELECT 1").unwrap_err();
        assert!(matches!(err, HistoryError::Append { .. }));
        assert_eq!(store.entries(), &["SELECT 1"]);
    }

    #[test]
    fn test_in_memory_store() {
        let mut store = HistoryStore::in_memory();
        store.append("SELECT 1").unwrap();
        assert_eq!(store.entries(), &["SELECT 1"]);
        assert!(store.path().is_none());
    }

    #[test]
    fn test_navigation_history_holds_whole_log() {
        let mut store = HistoryStore::in_memory();
        for i in 0..5 {
            store.append(&format!("SELECT {i}")).unwrap();
        }
        let history = store.navigation_history(2).unwrap();
        assert_eq!(history.count_all().unwrap(), 5);

        let latest = history
            .search(SearchQuery::last_with_prefix("SELECT".to_string(), None))
            .unwrap();
        assert_eq!(latest[0].command_line, "SELECT 4");

        let oldest = history
            .search(SearchQuery::last_with_prefix("SELECT 0".to_string(), None))
            .unwrap();
        assert_eq!(oldest[0].command_line, "SELECT 0");
    }
}
