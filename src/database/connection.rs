//! Database connection management
//!
//! This module provides the core database connection wrapper used by the
//! bootstrap procedures.

use anyhow::{anyhow, Result};
use rusqlite::Connection;

/// Core database connection wrapper
///
/// `DatabaseConn` provides a thin wrapper around SQLite connections,
/// handling both file-based and in-memory databases with consistent
/// configuration and error handling. The connection is closed when the
/// wrapper is dropped, on every exit path.
pub struct DatabaseConn {
    pub conn: Connection,
}

impl DatabaseConn {
    /// Open a database at the specified path
    ///
    /// If the path is `None`, an in-memory database is created. The file is
    /// created if it does not exist yet.
    pub fn open(path: Option<&str>) -> Result<Self> {
        let conn = match path {
            Some(p) => Connection::open(p)
                .map_err(|e| anyhow!("Failed to open database at '{}': {}", p, e))?,
            None => Connection::open_in_memory()
                .map_err(|e| anyhow!("Failed to create in-memory database: {}", e))?,
        };

        let db = DatabaseConn { conn };
        db.configure()?;
        Ok(db)
    }

    /// Open a database at the specified path (convenience method)
    pub fn open_path(path: &str) -> Result<Self> {
        Self::open(Some(path))
    }

    /// Create an in-memory database
    pub fn open_in_memory() -> Result<Self> {
        Self::open(None)
    }

    /// Configure the database with consistent settings
    fn configure(&self) -> Result<()> {
        // WAL keeps the single writer from blocking future dashboard readers
        let _: String = self
            .conn
            .query_row("PRAGMA journal_mode=WAL", [], |row| row.get(0))
            .map_err(|e| anyhow!("Failed to set journal mode: {}", e))?;

        self.conn
            .execute("PRAGMA synchronous=NORMAL", [])
            .map_err(|e| anyhow!("Failed to set synchronous mode: {}", e))?;

        self.conn
            .execute("PRAGMA foreign_keys=ON", [])
            .map_err(|e| anyhow!("Failed to enable foreign keys: {}", e))?;

        Ok(())
    }

    /// Execute a batch of SQL statements inside a single transaction
    ///
    /// Commits only if every statement succeeds; otherwise the transaction
    /// is rolled back when dropped and nothing is persisted.
    pub fn execute_batch_atomic(&self, sql: &str) -> Result<()> {
        let tx = self
            .conn
            .unchecked_transaction()
            .map_err(|e| anyhow!("Failed to begin transaction: {}", e))?;
        tx.execute_batch(sql)
            .map_err(|e| anyhow!("Failed to execute SQL batch: {}", e))?;
        tx.commit()
            .map_err(|e| anyhow!("Failed to commit SQL batch: {}", e))?;
        Ok(())
    }

    /// Check if a table exists in the database
    pub fn table_exists(&self, table_name: &str) -> Result<bool> {
        let count: i32 = self
            .conn
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name=?1",
                [table_name],
                |row| row.get(0),
            )
            .map_err(|e| anyhow!("Failed to check table existence: {}", e))?;
        Ok(count > 0)
    }

    /// Check if a view exists in the database
    pub fn view_exists(&self, view_name: &str) -> Result<bool> {
        let count: i32 = self
            .conn
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE type='view' AND name=?1",
                [view_name],
                |row| row.get(0),
            )
            .map_err(|e| anyhow!("Failed to check view existence: {}", e))?;
        Ok(count > 0)
    }

    /// Get the row count for a table
    pub fn table_count(&self, table_name: &str) -> Result<u64> {
        let query = format!("SELECT COUNT(*) FROM {}", table_name);
        let count: u64 = self
            .conn
            .query_row(&query, [], |row| row.get(0))
            .map_err(|e| anyhow!("Failed to get table count: {}", e))?;
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_in_memory() {
        let db = DatabaseConn::open_in_memory();
        assert!(db.is_ok());
    }

    #[test]
    fn test_execute_batch_atomic() {
        let db = DatabaseConn::open_in_memory().unwrap();
        db.execute_batch_atomic(
            "CREATE TABLE t (id INTEGER PRIMARY KEY);
             INSERT INTO t (id) VALUES (1), (2);",
        )
        .unwrap();

        assert_eq!(db.table_count("t").unwrap(), 2);
    }

    #[test]
    fn test_execute_batch_atomic_rolls_back_on_error() {
        let db = DatabaseConn::open_in_memory().unwrap();
        let result = db.execute_batch_atomic(
            "CREATE TABLE t (id INTEGER PRIMARY KEY);
             INSERT INTO t (id) VALUES (1);
             INSERT INTO nonexistent (id) VALUES (2);",
        );

        assert!(result.is_err());
        // The whole batch is rolled back, including the CREATE TABLE
        assert!(!db.table_exists("t").unwrap());
    }

    #[test]
    fn test_table_exists() {
        let db = DatabaseConn::open_in_memory().unwrap();
        db.execute_batch_atomic("CREATE TABLE test_table (id INTEGER PRIMARY KEY);")
            .unwrap();

        assert!(db.table_exists("test_table").unwrap());
        assert!(!db.table_exists("nonexistent_table").unwrap());
    }

    #[test]
    fn test_view_exists() {
        let db = DatabaseConn::open_in_memory().unwrap();
        db.execute_batch_atomic(
            "CREATE TABLE test_table (id INTEGER PRIMARY KEY);
             CREATE VIEW test_view AS SELECT id FROM test_table;",
        )
        .unwrap();

        assert!(db.view_exists("test_view").unwrap());
        assert!(!db.view_exists("test_table").unwrap());
    }

    #[test]
    fn test_table_count() {
        let db = DatabaseConn::open_in_memory().unwrap();
        db.execute_batch_atomic(
            "CREATE TABLE test_table (id INTEGER PRIMARY KEY);
             INSERT INTO test_table (id) VALUES (1), (2), (3);",
        )
        .unwrap();

        assert_eq!(db.table_count("test_table").unwrap(), 3);
    }
}
