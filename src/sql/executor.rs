/// Query executor - executes statements against the storage engine

use super::ast::{CreateTableStmt, InsertStmt, Projection, SelectStmt, Statement, WhereClause};
use super::evaluator;
use crate::error::{Error, ParseError, Result, StorageError};
use crate::storage::StorageEngine;
use crate::types::{Row, Table, Value};

/// Outcome of a single statement.
///
/// Every statement produces one of these. `success` and `error` mirror
/// each other: a failed result carries the error that stopped it plus a
/// rendered `message`, a successful one carries a human-readable summary
/// and, for SELECT, the result set.
#[derive(Debug)]
pub struct QueryResult {
    pub success: bool,
    pub error: Option<Error>,
    pub message: String,
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Value>>,
    pub rows_affected: usize,
}

impl QueryResult {
    /// Successful statement with no result set (CREATE TABLE, INSERT).
    pub fn command(message: String, rows_affected: usize) -> Self {
        Self {
            success: true,
            error: None,
            message,
            columns: Vec::new(),
            rows: Vec::new(),
            rows_affected,
        }
    }

    /// Successful SELECT carrying a result set.
    pub fn result_set(columns: Vec<String>, rows: Vec<Vec<Value>>) -> Self {
        Self {
            success: true,
            error: None,
            message: format!("{} row(s) returned", rows.len()),
            rows_affected: rows.len(),
            columns,
            rows,
        }
    }

    /// Failed statement. The error is kept alongside its rendered message.
    pub fn failure(error: Error) -> Self {
        Self {
            success: false,
            message: format!("Error: {}", error),
            error: Some(error),
            columns: Vec::new(),
            rows: Vec::new(),
            rows_affected: 0,
        }
    }
}

pub struct QueryExecutor<'a> {
    storage: &'a mut StorageEngine,
}

impl<'a> QueryExecutor<'a> {
    pub fn new(storage: &'a mut StorageEngine) -> Self {
        Self { storage }
    }

    pub fn execute(&mut self, statement: Statement) -> Result<QueryResult> {
        match statement {
            Statement::Select(stmt) => self.execute_select(stmt),
            Statement::Insert(stmt) => self.execute_insert(stmt),
            Statement::CreateTable(stmt) => self.execute_create_table(stmt),
        }
    }

    fn execute_select(&mut self, stmt: SelectStmt) -> Result<QueryResult> {
        let table = self.storage.get_table(&stmt.table)?;

        // Resolve every referenced column against the schema before
        // scanning, so an unknown column errors even on an empty table.
        let columns = projected_columns(table, &stmt.projection)?;
        if let Some(ref clause) = stmt.where_clause {
            validate_where_columns(table, clause)?;
        }

        let mut rows = Vec::new();
        for row in &table.rows {
            let keep = match stmt.where_clause {
                Some(ref clause) => evaluator::evaluate_where(table, row, clause)?,
                None => true,
            };
            if !keep {
                continue;
            }
            let mut values = Vec::with_capacity(columns.len());
            for name in &columns {
                let value = row
                    .get(name)
                    .cloned()
                    .ok_or_else(|| StorageError::ColumnNotFound(name.clone()))?;
                values.push(value);
            }
            rows.push(values);
        }

        Ok(QueryResult::result_set(columns, rows))
    }

    fn execute_insert(&mut self, stmt: InsertStmt) -> Result<QueryResult> {
        // Resolving the effective column list needs the table, so a
        // missing table surfaces before any arity check.
        let columns = match stmt.columns {
            Some(cols) => {
                self.storage.get_table(&stmt.table)?;
                cols
            }
            None => self.storage.get_table(&stmt.table)?.column_names(),
        };

        if stmt.values.len() != columns.len() {
            return Err(ParseError::ArityMismatch {
                expected: columns.len(),
                found: stmt.values.len(),
            }
            .into());
        }

        let mut row = Row::new();
        for (name, value) in columns.into_iter().zip(stmt.values) {
            row.insert(name, value);
        }
        self.storage.insert_row(&stmt.table, row)?;

        Ok(QueryResult::command(
            format!("1 row inserted into '{}'", stmt.table),
            1,
        ))
    }

    fn execute_create_table(&mut self, stmt: CreateTableStmt) -> Result<QueryResult> {
        let message = format!("table '{}' created", stmt.table);
        self.storage.create_table(stmt.table, stmt.columns)?;
        Ok(QueryResult::command(message, 0))
    }
}

/// Expand a projection into concrete column names, in output order.
fn projected_columns(table: &Table, projection: &Projection) -> Result<Vec<String>> {
    match projection {
        Projection::All => Ok(table.column_names()),
        Projection::Columns(names) => {
            for name in names {
                if !table.has_column(name) {
                    return Err(StorageError::ColumnNotFound(name.clone()).into());
                }
            }
            Ok(names.clone())
        }
    }
}

fn validate_where_columns(table: &Table, clause: &WhereClause) -> Result<()> {
    match clause {
        WhereClause::Condition { column, .. } => {
            if table.has_column(column) {
                Ok(())
            } else {
                Err(StorageError::ColumnNotFound(column.clone()).into())
            }
        }
        WhereClause::Compound { left, right, .. } => {
            validate_where_columns(table, left)?;
            validate_where_columns(table, right)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sql::execute_sql;
    use tempfile::tempdir;

    fn open_engine(dir: &std::path::Path) -> StorageEngine {
        StorageEngine::open(dir).unwrap()
    }

    fn setup_users(storage: &mut StorageEngine) {
        execute_sql(
            storage,
            "CREATE TABLE users (id INT, name VARCHAR(50), age INT)",
        )
        .unwrap();
        execute_sql(
            storage,
            "INSERT INTO users (id, name, age) VALUES (1, 'Alice', 30)",
        )
        .unwrap();
        execute_sql(
            storage,
            "INSERT INTO users (id, name, age) VALUES (2, 'Bob', 25)",
        )
        .unwrap();
    }

    #[test]
    fn test_create_table_result() {
        let dir = tempdir().unwrap();
        let mut storage = open_engine(dir.path());

        let result = execute_sql(&mut storage, "CREATE TABLE users (id INT)").unwrap();
        assert!(result.success);
        assert_eq!(result.message, "table 'users' created");
        assert_eq!(result.rows_affected, 0);
        assert!(storage.get_table("users").is_ok());
    }

    #[test]
    fn test_create_duplicate_table() {
        let dir = tempdir().unwrap();
        let mut storage = open_engine(dir.path());

        execute_sql(&mut storage, "CREATE TABLE users (id INT)").unwrap();
        let err = execute_sql(&mut storage, "CREATE TABLE users (id INT)").unwrap_err();
        assert!(matches!(
            err,
            Error::Storage(StorageError::TableExists(ref name)) if name == "users"
        ));
    }

    #[test]
    fn test_insert_result() {
        let dir = tempdir().unwrap();
        let mut storage = open_engine(dir.path());
        execute_sql(&mut storage, "CREATE TABLE users (id INT)").unwrap();

        let result = execute_sql(&mut storage, "INSERT INTO users (id) VALUES (7)").unwrap();
        assert!(result.success);
        assert_eq!(result.message, "1 row inserted into 'users'");
        assert_eq!(result.rows_affected, 1);
    }

    #[test]
    fn test_insert_without_column_list() {
        let dir = tempdir().unwrap();
        let mut storage = open_engine(dir.path());
        execute_sql(&mut storage, "CREATE TABLE users (id INT, name VARCHAR(50))").unwrap();

        execute_sql(&mut storage, "INSERT INTO users VALUES (1, 'Alice')").unwrap();

        let result = execute_sql(&mut storage, "SELECT name FROM users").unwrap();
        assert_eq!(result.rows, vec![vec![Value::Text("Alice".to_string())]]);
    }

    #[test]
    fn test_insert_missing_table() {
        let dir = tempdir().unwrap();
        let mut storage = open_engine(dir.path());

        let err = execute_sql(&mut storage, "INSERT INTO ghosts (id) VALUES (1)").unwrap_err();
        assert!(matches!(
            err,
            Error::Storage(StorageError::TableNotFound(ref name)) if name == "ghosts"
        ));
    }

    #[test]
    fn test_insert_arity_mismatch() {
        let dir = tempdir().unwrap();
        let mut storage = open_engine(dir.path());
        execute_sql(&mut storage, "CREATE TABLE users (id INT, name VARCHAR(50))").unwrap();

        let err = execute_sql(&mut storage, "INSERT INTO users (id, name) VALUES (1)").unwrap_err();
        assert!(matches!(
            err,
            Error::Parse(ParseError::ArityMismatch {
                expected: 2,
                found: 1
            })
        ));

        // Same check against the schema-resolved list.
        let err = execute_sql(&mut storage, "INSERT INTO users VALUES (1)").unwrap_err();
        assert!(matches!(
            err,
            Error::Parse(ParseError::ArityMismatch {
                expected: 2,
                found: 1
            })
        ));
    }

    #[test]
    fn test_insert_type_mismatch_leaves_table_unchanged() {
        let dir = tempdir().unwrap();
        let mut storage = open_engine(dir.path());
        execute_sql(&mut storage, "CREATE TABLE users (id INT)").unwrap();

        let err = execute_sql(&mut storage, "INSERT INTO users (id) VALUES ('one')").unwrap_err();
        assert!(matches!(
            err,
            Error::Storage(StorageError::TypeMismatch { .. })
        ));
        assert_eq!(storage.get_table("users").unwrap().row_count(), 0);
    }

    #[test]
    fn test_select_star_uses_schema_order() {
        let dir = tempdir().unwrap();
        let mut storage = open_engine(dir.path());
        setup_users(&mut storage);

        let result = execute_sql(&mut storage, "SELECT * FROM users").unwrap();
        assert_eq!(result.columns, vec!["id", "name", "age"]);
        assert_eq!(result.rows.len(), 2);
        assert_eq!(result.message, "2 row(s) returned");
        assert_eq!(result.rows_affected, 2);
    }

    #[test]
    fn test_select_projection_order_is_as_written() {
        let dir = tempdir().unwrap();
        let mut storage = open_engine(dir.path());
        setup_users(&mut storage);

        let result = execute_sql(&mut storage, "SELECT name, id FROM users WHERE id = 1").unwrap();
        assert_eq!(result.columns, vec!["name", "id"]);
        assert_eq!(
            result.rows,
            vec![vec![Value::Text("Alice".to_string()), Value::Integer(1)]]
        );
    }

    #[test]
    fn test_select_where_filters_rows() {
        let dir = tempdir().unwrap();
        let mut storage = open_engine(dir.path());
        setup_users(&mut storage);

        let result = execute_sql(&mut storage, "SELECT name FROM users WHERE age > 26").unwrap();
        assert_eq!(result.rows, vec![vec![Value::Text("Alice".to_string())]]);
        assert_eq!(result.message, "1 row(s) returned");
    }

    #[test]
    fn test_select_unknown_projection_column_fails_on_empty_table() {
        let dir = tempdir().unwrap();
        let mut storage = open_engine(dir.path());
        execute_sql(&mut storage, "CREATE TABLE users (id INT)").unwrap();

        let err = execute_sql(&mut storage, "SELECT nope FROM users").unwrap_err();
        assert!(matches!(
            err,
            Error::Storage(StorageError::ColumnNotFound(ref name)) if name == "nope"
        ));
    }

    #[test]
    fn test_select_unknown_where_column_fails_on_empty_table() {
        let dir = tempdir().unwrap();
        let mut storage = open_engine(dir.path());
        execute_sql(&mut storage, "CREATE TABLE users (id INT)").unwrap();

        let err = execute_sql(&mut storage, "SELECT * FROM users WHERE nope = 1").unwrap_err();
        assert!(matches!(
            err,
            Error::Storage(StorageError::ColumnNotFound(ref name)) if name == "nope"
        ));
    }

    #[test]
    fn test_where_connectives_fold_left() {
        let dir = tempdir().unwrap();
        let mut storage = open_engine(dir.path());
        setup_users(&mut storage);

        // Grouped as (id = 1 AND age = 99) OR name = 'Bob': Bob matches
        // through the OR arm even though the AND arm is false for him.
        let result = execute_sql(
            &mut storage,
            "SELECT name FROM users WHERE id = 1 AND age = 99 OR name = 'Bob'",
        )
        .unwrap();
        assert_eq!(result.rows, vec![vec![Value::Text("Bob".to_string())]]);
    }

    #[test]
    fn test_where_type_mismatch() {
        let dir = tempdir().unwrap();
        let mut storage = open_engine(dir.path());
        setup_users(&mut storage);

        let err = execute_sql(&mut storage, "SELECT * FROM users WHERE age = 'old'").unwrap_err();
        assert!(matches!(
            err,
            Error::Storage(StorageError::TypeMismatch { ref column, .. }) if column == "age"
        ));
    }

    #[test]
    fn test_select_empty_result() {
        let dir = tempdir().unwrap();
        let mut storage = open_engine(dir.path());
        setup_users(&mut storage);

        let result = execute_sql(&mut storage, "SELECT * FROM users WHERE age > 99").unwrap();
        assert!(result.success);
        assert!(result.rows.is_empty());
        assert_eq!(result.message, "0 row(s) returned");
    }
}
