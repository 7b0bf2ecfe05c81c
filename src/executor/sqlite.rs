//! SQLite statement executor
//!
//! Submitted text may hold several statements. They are prepared one at a
//! time with [`rusqlite::Batch`], which follows SQLite's own notion of where a
//! statement ends (quotes, comments and trigger bodies included), and each is
//! stepped to completion before the next one is prepared.

use rusqlite::Connection;
use rusqlite::types::Value;
use tracing::{debug, warn};

use crate::connection::ConnectionManager;
use crate::error::{ExecutionError, Result};
use crate::executor::Executor;
use crate::executor::row::{Record, Row};

/// Executor backed by a single SQLite connection.
pub struct SqliteExecutor {
    manager: ConnectionManager,
}

impl SqliteExecutor {
    /// Create an executor owning the given connection for its lifetime
    pub fn new(manager: ConnectionManager) -> Self {
        Self { manager }
    }

    /// Borrow the underlying connection manager
    pub fn manager(&self) -> &ConnectionManager {
        &self.manager
    }
}

impl Executor for SqliteExecutor {
    fn execute(
        &mut self,
        text: &str,
        on_row: &mut dyn FnMut(&dyn Record),
    ) -> std::result::Result<(), ExecutionError> {
        let conn = self
            .manager
            .connection()
            .map_err(|_| ExecutionError::NotConnected)?;

        let scope = TransactionScope::begin(conn);
        run_statements(conn, text, on_row)?;
        scope.commit()
    }

    fn release(&mut self) -> Result<()> {
        self.manager.close()
    }
}

fn run_statements(
    conn: &Connection,
    text: &str,
    on_row: &mut dyn FnMut(&dyn Record),
) -> std::result::Result<(), ExecutionError> {
    let mut batch = rusqlite::Batch::new(conn, text);
    while let Some(mut stmt) = batch.next()? {
        let columns = stmt.column_count();
        debug!(
            "Executing statement: {}",
            stmt.expanded_sql().unwrap_or_default()
        );

        let mut rows = stmt.query([])?;
        while let Some(row) = rows.next()? {
            let values = (0..columns)
                .map(|i| row.get::<_, Value>(i))
                .collect::<rusqlite::Result<Vec<_>>>()?;
            on_row(&Row::new(values));
        }
    }
    Ok(())
}

/// Commit-or-rollback guard around one submission.
///
/// Statements run in SQLite's autocommit mode unless the submission itself
/// opens a transaction. A transaction still open at the end is committed on
/// success. If the guard is dropped without [`TransactionScope::commit`]
/// (error, early return, unwinding), an open transaction is rolled back.
pub struct TransactionScope<'c> {
    conn: &'c Connection,
    finished: bool,
}

impl<'c> TransactionScope<'c> {
    pub fn begin(conn: &'c Connection) -> Self {
        Self {
            conn,
            finished: false,
        }
    }

    /// Commit any transaction left open by the submission
    pub fn commit(mut self) -> std::result::Result<(), ExecutionError> {
        self.finished = true;
        if self.conn.is_autocommit() {
            return Ok(());
        }
        debug!("Committing open transaction");
        self.conn
            .execute_batch("COMMIT")
            .map_err(|e| ExecutionError::TransactionFailed(e.to_string()))
    }
}

impl Drop for TransactionScope<'_> {
    fn drop(&mut self) {
        if self.finished || self.conn.is_autocommit() {
            return;
        }
        debug!("Rolling back open transaction");
        if let Err(e) = self.conn.execute_batch("ROLLBACK") {
            warn!("Rollback failed: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::connection::StoreLocator;

    fn executor() -> SqliteExecutor {
        SqliteExecutor::new(ConnectionManager::open(StoreLocator::Memory).unwrap())
    }

    fn collect(
        executor: &mut SqliteExecutor,
        text: &str,
    ) -> std::result::Result<Vec<String>, ExecutionError> {
        let mut lines = Vec::new();
        executor.execute(text, &mut |r| lines.push(r.render()))?;
        Ok(lines)
    }

    #[test]
    fn test_multiple_statements_in_one_submission() {
        let mut ex = executor();
        let rows = collect(
            &mut ex,
            "CREATE TABLE t(x); INSERT INTO t VALUES(1); SELECT * FROM t;",
        )
        .unwrap();
        assert_eq!(rows, vec!["(1,)"]);
    }

    #[test]
    fn test_rows_stream_in_order() {
        let mut ex = executor();
        collect(&mut ex, "CREATE TABLE t(a, b)").unwrap();
        collect(&mut ex, "INSERT INTO t VALUES(1, 'x'), (2, NULL), (3, 0.5)").unwrap();
        let rows = collect(&mut ex, "SELECT a, b FROM t ORDER BY a").unwrap();
        assert_eq!(rows, vec!["(1, 'x')", "(2, None)", "(3, 0.5)"]);
    }

    #[test]
    fn test_comments_and_blank_statements_are_skipped() {
        let mut ex = executor();
        let rows = collect(&mut ex, "-- leading comment\n;; SELECT 'a;b' /* ; */ ;").unwrap();
        assert_eq!(rows, vec!["('a;b',)"]);
    }

    #[test]
    fn test_trigger_body_is_one_statement() {
        let mut ex = executor();
        collect(
            &mut ex,
            "CREATE TABLE t(x); CREATE TABLE log(x);
             CREATE TRIGGER tr AFTER INSERT ON t BEGIN INSERT INTO log VALUES(new.x); END;
             INSERT INTO t VALUES(7);",
        )
        .unwrap();
        assert_eq!(collect(&mut ex, "SELECT x FROM log").unwrap(), vec!["(7,)"]);
    }

    #[test]
    fn test_syntax_error_is_described() {
        let mut ex = executor();
        let err = collect(&mut ex, "SELEC * FROM t").unwrap_err();
        match err {
            ExecutionError::StatementFailed(msg) => {
                assert!(msg.starts_with("OperationalError: "));
                assert!(msg.contains("syntax error"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_open_transaction_rolled_back_on_failure() {
        let mut ex = executor();
        collect(&mut ex, "CREATE TABLE t(x UNIQUE)").unwrap();
        let result = collect(
            &mut ex,
            "BEGIN; INSERT INTO t VALUES(1); INSERT INTO t VALUES(1);",
        );
        assert!(result.is_err());
        assert!(ex.manager().connection().unwrap().is_autocommit());
        assert!(collect(&mut ex, "SELECT * FROM t").unwrap().is_empty());
    }

    #[test]
    fn test_open_transaction_committed_on_success() {
        let mut ex = executor();
        collect(&mut ex, "CREATE TABLE t(x); BEGIN; INSERT INTO t VALUES(5);").unwrap();
        assert!(ex.manager().connection().unwrap().is_autocommit());
        assert_eq!(collect(&mut ex, "SELECT x FROM t").unwrap(), vec!["(5,)"]);
    }

    #[test]
    fn test_release_then_execute_is_not_connected() {
        let mut ex = executor();
        ex.release().unwrap();
        assert_eq!(
            collect(&mut ex, "SELECT 1").unwrap_err(),
            ExecutionError::NotConnected
        );
    }
}
