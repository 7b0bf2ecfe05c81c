//! sqshell library
//!
//! This library provides the core of sqshell, an interactive SQL shell for
//! SQLite. It can be embedded to drive the same session loop from other
//! front ends or from tests.
//!
//! # Modules
//!
//! - `cli`: Command-line interface and argument parsing
//! - `config`: Configuration management
//! - `connection`: SQLite connection management
//! - `error`: Error types and handling
//! - `executor`: Statement execution and row rendering
//! - `repl`: Interactive REPL engine
//!
//! # Example
//!
//! ```no_run
//! use sqshell::connection::{ConnectionManager, StoreLocator};
//! use sqshell::executor::{ExecutionBridge, SqliteExecutor};
//!
//! fn main() -> sqshell::Result<()> {
//!     let manager = ConnectionManager::open(StoreLocator::Memory)?;
//!     let mut bridge = ExecutionBridge::new(SqliteExecutor::new(manager));
//!
//!     bridge.run("SELECT 1, 'one'", &mut |row| println!("{}", row.render()));
//!
//!     bridge.release()?;
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod config;
pub mod connection;
pub mod error;
pub mod executor;
pub mod repl;

// Re-export commonly used types
pub use config::Config;
pub use connection::{ConnectionManager, StoreLocator};
pub use error::{Result, SqshellError};
pub use executor::{ExecutionBridge, ExecutionResult, Executor, SqliteExecutor};
pub use repl::{InputSession, ReplEngine};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Get library version string
///
/// # Returns
/// * `&str` - Version string
pub fn version() -> &'static str {
    VERSION
}
