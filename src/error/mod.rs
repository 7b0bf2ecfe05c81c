//! Error handling module for sqshell.
//!
//! This module provides:
//! - Application-specific error types (`kinds`)
//! - Classification of SQLite driver errors into printable descriptions (`sqlite`)
//!
//! Statement-level failures are values, not fatal errors: the session prints
//! them and keeps going. Only startup failures end the process.
//!
//! # Example
//!
//! ```rust,no_run
//! use sqshell::error::{Result, SqshellError};
//! use sqshell::error::sqlite::describe_sqlite_error;
//!
//! fn report(err: &rusqlite::Error) {
//!     println!("{}", describe_sqlite_error(err));
//! }
//! ```

pub mod kinds;
pub mod sqlite;

// Re-export commonly used types
pub use kinds::{ConfigError, ConnectionError, ExecutionError, HistoryError, Result, SqshellError};
pub use sqlite::{ErrorCategory, describe_sqlite_error};
