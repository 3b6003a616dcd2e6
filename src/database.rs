/// Database façade - ties the SQL pipeline to one storage engine

use crate::error::Result;
use crate::sql::{self, QueryResult};
use crate::storage::StorageEngine;
use crate::types::Column;
use std::path::Path;

/// Schema and size summary for one table, as reported by
/// [`Database::describe_table`].
#[derive(Debug, Clone)]
pub struct TableInfo {
    pub name: String,
    pub columns: Vec<Column>,
    pub row_count: usize,
}

/// An embedded SQL database rooted at a single data directory.
///
/// Owns the storage engine and drives the full pipeline for each
/// statement: lexing, parsing, execution, and any persistence write
/// happen within one `execute` call. Mutating calls take `&mut self`,
/// so one logical caller drives an instance at a time.
pub struct Database {
    storage: StorageEngine,
}

impl Database {
    /// Open (or create) a database rooted at `dir`.
    ///
    /// Loads every table record found in the directory. Records that
    /// cannot be read back are skipped with a warning.
    ///
    /// # Example
    /// ```ignore
    /// let mut db = Database::open("./minnowdb_data")?;
    /// ```
    pub fn open<P: AsRef<Path>>(dir: P) -> Result<Self> {
        let storage = StorageEngine::open(dir)?;
        Ok(Self { storage })
    }

    /// Execute a single SQL statement.
    ///
    /// Never returns `Err`: a pipeline failure comes back as a
    /// `QueryResult` with `success == false`, the error preserved in
    /// `error`, and a rendered `Error: ...` message.
    ///
    /// # Example
    /// ```ignore
    /// let result = db.execute("SELECT name FROM users WHERE age > 26");
    /// for row in &result.rows {
    ///     println!("{:?}", row);
    /// }
    /// ```
    pub fn execute(&mut self, sql: &str) -> QueryResult {
        match sql::execute_sql(&mut self.storage, sql) {
            Ok(result) => result,
            Err(error) => QueryResult::failure(error),
        }
    }

    /// All table names, in name order.
    pub fn list_tables(&self) -> Vec<String> {
        self.storage.list_tables()
    }

    /// Schema and current row count for one table, bypassing the SQL
    /// pipeline. Fails `TableNotFound` if the table does not exist.
    pub fn describe_table(&self, name: &str) -> Result<TableInfo> {
        let table = self.storage.get_table(name)?;
        Ok(TableInfo {
            name: table.name.clone(),
            columns: table.columns.clone(),
            row_count: table.row_count(),
        })
    }
}
