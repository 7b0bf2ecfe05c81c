//! Classification of SQLite driver errors.
//!
//! The shell reports executor failures as a single human-readable line made
//! of an error category and the engine's own message, for example
//! `OperationalError: near "SELEC": syntax error`. Categories follow the
//! usual DB-API grouping of SQLite result codes.

use std::fmt;

use rusqlite::ErrorCode;

/// Broad category of a failed statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Syntax errors, missing tables, locked or unreadable stores.
    Operational,
    /// Constraint violations and type mismatches.
    Integrity,
    /// Values that do not fit (string or blob too big).
    Data,
    /// Corrupt or foreign files.
    Database,
    /// Engine-internal failures.
    Internal,
    /// Allocation failures inside the engine.
    Memory,
    /// Misuse of the driver API (bad parameter index, etc).
    Interface,
    /// Errors raised by the driver before reaching the engine.
    Programming,
}

impl ErrorCategory {
    /// Name printed in front of the error message.
    pub fn name(&self) -> &'static str {
        match self {
            ErrorCategory::Operational => "OperationalError",
            ErrorCategory::Integrity => "IntegrityError",
            ErrorCategory::Data => "DataError",
            ErrorCategory::Database => "DatabaseError",
            ErrorCategory::Internal => "InternalError",
            ErrorCategory::Memory => "MemoryError",
            ErrorCategory::Interface => "InterfaceError",
            ErrorCategory::Programming => "ProgrammingError",
        }
    }

    fn from_code(code: ErrorCode) -> Self {
        match code {
            ErrorCode::InternalMalfunction | ErrorCode::NotFound => ErrorCategory::Internal,
            ErrorCode::OutOfMemory => ErrorCategory::Memory,
            ErrorCode::DatabaseCorrupt | ErrorCode::NotADatabase => ErrorCategory::Database,
            ErrorCode::TooBig => ErrorCategory::Data,
            ErrorCode::ConstraintViolation | ErrorCode::TypeMismatch => ErrorCategory::Integrity,
            ErrorCode::ApiMisuse | ErrorCode::ParameterOutOfRange => ErrorCategory::Interface,
            _ => ErrorCategory::Operational,
        }
    }
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Determine the category of a driver error.
pub fn classify(error: &rusqlite::Error) -> ErrorCategory {
    match error {
        rusqlite::Error::SqliteFailure(inner, _) => ErrorCategory::from_code(inner.code),
        rusqlite::Error::SqlInputError { error, .. } => ErrorCategory::from_code(error.code),
        _ => ErrorCategory::Programming,
    }
}

/// Render a driver error as `Category: message`.
pub fn describe_sqlite_error(error: &rusqlite::Error) -> String {
    let message = match error {
        rusqlite::Error::SqliteFailure(_, Some(msg)) => msg.clone(),
        rusqlite::Error::SqliteFailure(inner, None) => inner.to_string(),
        // Prepare errors carry the statement and offset; only the message is shown.
        rusqlite::Error::SqlInputError { msg, .. } => msg.clone(),
        other => other.to_string(),
    };
    format!("{}: {}", classify(error), message)
}
