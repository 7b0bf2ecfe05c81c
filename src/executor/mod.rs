//! Statement execution for sqshell
//!
//! This module provides the execution layer between a submitted text and the
//! output sink:
//! - `Executor`: trait for anything that runs statement text and yields rows
//! - `SqliteExecutor`: the SQLite implementation with its commit-or-rollback scope
//! - `Record` / `Row`: result rows and their one-line rendering
//! - `ExecutionBridge`: runs one submission and reduces it to an `ExecutionResult`

pub mod row;
pub mod sqlite;

pub use row::{Record, Row};
pub use sqlite::{SqliteExecutor, TransactionScope};

use tracing::debug;

use crate::error::{ExecutionError, Result};

/// Something that can run statement text.
pub trait Executor {
    /// Run `text`, handing each result row to `on_row` as it is produced
    ///
    /// # Arguments
    /// * `text` - Submitted text, passed through verbatim
    /// * `on_row` - Sink callback, invoked once per row in executor order
    ///
    /// # Returns
    /// * `Result<(), ExecutionError>` - Ok, or a failure with a printable description
    fn execute(
        &mut self,
        text: &str,
        on_row: &mut dyn FnMut(&dyn Record),
    ) -> std::result::Result<(), ExecutionError>;

    /// Release the underlying connection
    fn release(&mut self) -> Result<()>;
}

/// Outcome of one submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExecutionResult {
    /// Rows were streamed to the sink
    Rows { count: usize },

    /// The executor failed; description is ready to print
    Error(String),
}

impl ExecutionResult {
    pub fn is_error(&self) -> bool {
        matches!(self, ExecutionResult::Error(_))
    }
}

/// Runs submissions against an executor, never propagating executor failures.
pub struct ExecutionBridge<X: Executor> {
    executor: X,
}

impl<X: Executor> ExecutionBridge<X> {
    pub fn new(executor: X) -> Self {
        Self { executor }
    }

    /// Execute one submission
    ///
    /// Rows reach `sink` one at a time; nothing is buffered here.
    ///
    /// # Returns
    /// * `ExecutionResult` - Exactly one of `Rows` or `Error`
    pub fn run(&mut self, text: &str, sink: &mut dyn FnMut(&dyn Record)) -> ExecutionResult {
        let mut count = 0usize;
        let outcome = self.executor.execute(text, &mut |record| {
            count += 1;
            sink(record);
        });

        match outcome {
            Ok(()) => {
                debug!("Submission produced {} row(s)", count);
                ExecutionResult::Rows { count }
            }
            Err(e) => {
                debug!("Submission failed: {}", e);
                ExecutionResult::Error(e.to_string())
            }
        }
    }

    /// Release the executor's connection
    pub fn release(&mut self) -> Result<()> {
        self.executor.release()
    }

    pub fn executor(&self) -> &X {
        &self.executor
    }
}
