use std::path::PathBuf;
use std::{fmt, io};

use crate::error::sqlite::describe_sqlite_error;

/// Crate-wide `Result` type using [`SqshellError`] as the error.
///
/// This alias is re-exported by the parent `error` module and is intended
/// to be used throughout the crate for fallible operations.
pub type Result<T> = std::result::Result<T, SqshellError>;

/// Top-level error type for sqshell operations.
///
/// This type wraps more specific error kinds and provides a single
/// error type that can be used throughout the crate.
#[derive(Debug)]
pub enum SqshellError {
    /// Opening or closing the data store failed.
    Connection(ConnectionError),

    /// History log errors.
    History(HistoryError),

    /// Configuration errors.
    Config(ConfigError),

    /// I/O errors.
    Io(io::Error),

    /// Line editor errors.
    Editor(String),
}

/// Connection-specific errors.
#[derive(Debug)]
pub enum ConnectionError {
    /// The store locator could not be opened.
    OpenFailed { locator: String, reason: String },

    /// The store locator is malformed.
    InvalidLocator(String),

    /// The connection was already released.
    Released,

    /// Closing the connection failed.
    CloseFailed(String),
}

/// Execution-specific errors.
///
/// These never end the session; the driver prints their description and
/// prompts again.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExecutionError {
    /// The executor rejected or failed the statement.
    StatementFailed(String),

    /// Committing or rolling back the statement scope failed.
    TransactionFailed(String),

    /// No connection is available to run the statement.
    NotConnected,
}

/// History log errors.
#[derive(Debug)]
pub enum HistoryError {
    /// Reading the history file at startup failed.
    Load { path: PathBuf, source: io::Error },

    /// Appending an entry to the history file failed.
    Append { path: PathBuf, source: io::Error },
}

/// Configuration-specific errors.
#[derive(Debug)]
pub enum ConfigError {
    /// Config file not found.
    FileNotFound(String),

    /// Invalid config format.
    InvalidFormat(String),

    /// Invalid field value.
    InvalidValue { field: String, value: String },

    /// Anything else.
    Generic(String),
}

/* ========================= Display & Error impls ========================= */

impl fmt::Display for SqshellError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SqshellError::Connection(e) => write!(f, "Connection error: {e}"),
            SqshellError::History(e) => write!(f, "History error: {e}"),
            SqshellError::Config(e) => write!(f, "Configuration error: {e}"),
            SqshellError::Io(e) => write!(f, "I/O error: {e}"),
            SqshellError::Editor(msg) => write!(f, "Line editor error: {msg}"),
        }
    }
}

impl fmt::Display for ConnectionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConnectionError::OpenFailed { locator, reason } => {
                write!(f, "unable to open database '{locator}': {reason}")
            }
            ConnectionError::InvalidLocator(locator) => {
                write!(f, "invalid database locator: '{locator}'")
            }
            ConnectionError::Released => write!(f, "connection already released"),
            ConnectionError::CloseFailed(msg) => write!(f, "failed to close database: {msg}"),
        }
    }
}

impl fmt::Display for ExecutionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExecutionError::StatementFailed(msg) => write!(f, "{msg}"),
            ExecutionError::TransactionFailed(msg) => write!(f, "Transaction error: {msg}"),
            ExecutionError::NotConnected => write!(f, "Not connected to a database"),
        }
    }
}

impl fmt::Display for HistoryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HistoryError::Load { path, source } => {
                write!(f, "cannot read history file {}: {source}", path.display())
            }
            HistoryError::Append { path, source } => {
                write!(f, "cannot append to history file {}: {source}", path.display())
            }
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::FileNotFound(path) => write!(f, "Config file not found: {path}"),
            ConfigError::InvalidFormat(msg) => write!(f, "Invalid config format: {msg}"),
            ConfigError::InvalidValue { field, value } => {
                write!(f, "Invalid value '{value}' for field '{field}'")
            }
            ConfigError::Generic(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for SqshellError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SqshellError::Io(e) => Some(e),
            SqshellError::History(HistoryError::Load { source, .. })
            | SqshellError::History(HistoryError::Append { source, .. }) => Some(source),
            _ => None,
        }
    }
}
impl std::error::Error for ConnectionError {}
impl std::error::Error for ExecutionError {}
impl std::error::Error for HistoryError {}
impl std::error::Error for ConfigError {}

/* ========================= Conversions to SqshellError ========================= */

impl From<io::Error> for SqshellError {
    fn from(err: io::Error) -> Self {
        SqshellError::Io(err)
    }
}

impl From<rusqlite::Error> for ExecutionError {
    fn from(err: rusqlite::Error) -> Self {
        ExecutionError::StatementFailed(describe_sqlite_error(&err))
    }
}

impl From<ConnectionError> for SqshellError {
    fn from(err: ConnectionError) -> Self {
        SqshellError::Connection(err)
    }
}

impl From<HistoryError> for SqshellError {
    fn from(err: HistoryError) -> Self {
        SqshellError::History(err)
    }
}

impl From<ConfigError> for SqshellError {
    fn from(err: ConfigError) -> Self {
        SqshellError::Config(err)
    }
}

impl From<reedline::ReedlineError> for SqshellError {
    fn from(err: reedline::ReedlineError) -> Self {
        SqshellError::Editor(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_execution_error_display_is_bare_description() {
        let err = ExecutionError::StatementFailed("OperationalError: no such table: t".into());
        assert_eq!(err.to_string(), "OperationalError: no such table: t");
    }

    #[test]
    fn test_driver_error_only_reaches_callers_as_description() {
        let conn = rusqlite::Connection::open_in_memory().unwrap();
        let err = conn.execute_batch("SELECT * FROM nowhere").unwrap_err();
        assert_eq!(
            ExecutionError::from(err),
            ExecutionError::StatementFailed("OperationalError: no such table: nowhere".into())
        );
    }

    #[test]
    fn test_connection_error_display() {
        let err = SqshellError::from(ConnectionError::OpenFailed {
            locator: "/nope/x.db".into(),
            reason: "unable to open database file".into(),
        });
        assert_eq!(
            err.to_string(),
            "Connection error: unable to open database '/nope/x.db': unable to open database file"
        );
    }

    #[test]
    fn test_history_error_exposes_source() {
        use std::error::Error;

        let err = SqshellError::from(HistoryError::Append {
            path: PathBuf::from(".sqshell_history"),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        });
        assert!(err.source().is_some());
        assert!(err.to_string().contains(".sqshell_history"));
    }
}
