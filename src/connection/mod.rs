//! Connection management for SQLite
//!
//! This module provides connection management functionality including:
//! - Interpreting the startup store locator (file path or `:memory:`)
//! - Opening the single connection the session uses
//! - Releasing it when the session ends

use rusqlite::{Connection, OpenFlags};
use std::fmt;
use std::path::PathBuf;
use tracing::{debug, info};

use crate::error::{ConnectionError, Result};

/// Locator string selecting a transient in-memory store
pub const MEMORY_LOCATOR: &str = ":memory:";

/// Where the session's data lives
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreLocator {
    /// Transient store discarded at exit
    Memory,

    /// Database file, created if missing
    File(PathBuf),
}

impl StoreLocator {
    /// Interpret the optional startup argument
    ///
    /// # Arguments
    /// * `arg` - Positional argument from the command line, if any
    ///
    /// # Returns
    /// * `Result<StoreLocator>` - Parsed locator or `InvalidLocator` for an empty string
    pub fn parse(arg: Option<&str>) -> Result<Self> {
        match arg {
            None => Ok(StoreLocator::Memory),
            Some(MEMORY_LOCATOR) => Ok(StoreLocator::Memory),
            Some(s) if s.trim().is_empty() => {
                Err(ConnectionError::InvalidLocator(s.to_string()).into())
            }
            Some(s) => Ok(StoreLocator::File(PathBuf::from(s))),
        }
    }
}

impl fmt::Display for StoreLocator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreLocator::Memory => write!(f, "{MEMORY_LOCATOR}"),
            StoreLocator::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// SQLite connection manager
///
/// Owns the one connection of the session. The connection is opened once at
/// startup and released exactly once at exit.
pub struct ConnectionManager {
    /// Open connection, `None` once released
    conn: Option<Connection>,

    /// Locator the connection was opened from
    locator: StoreLocator,
}

impl ConnectionManager {
    /// Open the store named by `locator`
    ///
    /// # Returns
    /// * `Result<Self>` - Connected manager or `ConnectionError::OpenFailed`
    pub fn open(locator: StoreLocator) -> Result<Self> {
        let opened = match &locator {
            StoreLocator::Memory => Connection::open_in_memory(),
            StoreLocator::File(path) => Connection::open_with_flags(
                path,
                OpenFlags::SQLITE_OPEN_READ_WRITE
                    | OpenFlags::SQLITE_OPEN_CREATE
                    | OpenFlags::SQLITE_OPEN_NO_MUTEX,
            ),
        };

        let conn = opened.map_err(|e| ConnectionError::OpenFailed {
            locator: locator.to_string(),
            reason: e.to_string(),
        })?;

        // Opening is lazy; touch the schema so unreadable files fail here.
        conn.query_row("SELECT count(*) FROM sqlite_master", [], |_| Ok(()))
            .map_err(|e| ConnectionError::OpenFailed {
                locator: locator.to_string(),
                reason: e.to_string(),
            })?;

        info!("Opened database {}", locator);
        Ok(Self {
            conn: Some(conn),
            locator,
        })
    }

    /// Borrow the open connection
    ///
    /// # Returns
    /// * `Result<&Connection>` - Connection or `ConnectionError::Released`
    pub fn connection(&self) -> Result<&Connection> {
        self.conn
            .as_ref()
            .ok_or_else(|| ConnectionError::Released.into())
    }

    /// Release the connection
    ///
    /// Releasing twice is a no-op.
    pub fn close(&mut self) -> Result<()> {
        let Some(conn) = self.conn.take() else {
            debug!("Connection already released");
            return Ok(());
        };

        conn.close()
            .map_err(|(_, e)| ConnectionError::CloseFailed(e.to_string()))?;
        info!("Closed database {}", self.locator);
        Ok(())
    }

    pub fn is_open(&self) -> bool {
        self.conn.is_some()
    }

    pub fn locator(&self) -> &StoreLocator {
        &self.locator
    }
}
