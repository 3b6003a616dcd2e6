/// Table schema and catalog entry definitions
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{ParseError, Result, StorageError};
use crate::types::{Row, Value};

/// Column data type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DataType {
    /// 64-bit signed integer
    #[serde(rename = "INT")]
    Int,
    /// Text with an optional maximum length
    #[serde(rename = "VARCHAR")]
    Varchar,
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataType::Int => write!(f, "INT"),
            DataType::Varchar => write!(f, "VARCHAR"),
        }
    }
}

/// Column definition
///
/// Shared by CREATE TABLE statements and the persisted schema;
/// `size` is the declared maximum length, VARCHAR only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    /// Column name
    pub name: String,
    /// Declared data type
    pub data_type: DataType,
    /// Maximum length (VARCHAR only)
    pub size: Option<usize>,
}

impl Column {
    pub fn new(name: String, data_type: DataType) -> Self {
        Self {
            name,
            data_type,
            size: None,
        }
    }

    pub fn with_size(mut self, size: usize) -> Self {
        self.size = Some(size);
        self
    }
}

/// One table: schema fixed at creation plus append-only rows.
///
/// This struct is also the persisted record: serializing it yields the
/// on-disk JSON layout (`name`, `columns`, `rows`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Table {
    /// Table name
    pub name: String,
    /// Column definitions (ordered, never altered after creation)
    pub columns: Vec<Column>,
    /// Rows in insertion order
    pub rows: Vec<Row>,
}

impl Table {
    /// Create an empty table with the given schema.
    pub fn new(name: String, columns: Vec<Column>) -> Self {
        Self {
            name,
            columns,
            rows: Vec::new(),
        }
    }

    /// Get column by name
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column(name).is_some()
    }

    /// Column names in declared schema order.
    pub fn column_names(&self) -> Vec<String> {
        self.columns.iter().map(|c| c.name.clone()).collect()
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Validate a row against this schema.
    ///
    /// The row's key set must equal the column-name set: an unknown key
    /// fails `ColumnNotFound`, a missing key fails `ArityMismatch`. Each
    /// value's kind must match the declared type, and VARCHAR values must
    /// fit the declared size.
    pub fn validate_row(&self, row: &Row) -> Result<()> {
        for key in row.keys() {
            if !self.has_column(key) {
                return Err(StorageError::ColumnNotFound(key.clone()).into());
            }
        }

        for col in &self.columns {
            let value = row.get(&col.name).ok_or(ParseError::ArityMismatch {
                expected: self.columns.len(),
                found: row.len(),
            })?;

            match (col.data_type, value) {
                (DataType::Int, Value::Integer(_)) => {}
                (DataType::Varchar, Value::Text(s)) => {
                    if let Some(max) = col.size {
                        let length = s.chars().count();
                        if length > max {
                            return Err(StorageError::ValueTooLong {
                                column: col.name.clone(),
                                max,
                                length,
                            }
                            .into());
                        }
                    }
                }
                (data_type, value) => {
                    return Err(StorageError::TypeMismatch {
                        column: col.name.clone(),
                        expected: data_type.to_string(),
                        found: value.kind_name().to_string(),
                    }
                    .into());
                }
            }
        }

        Ok(())
    }
}
