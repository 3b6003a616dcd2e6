//! Core data types for the minnowdb engine

mod table;

pub use table::{Column, DataType, Table};

use serde::{Deserialize, Serialize};
use std::fmt;

/// A literal or stored cell value.
///
/// Serializes untagged so a persisted row reads as plain JSON
/// (`5`, `"alice"`), matching the table record format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// Integer value
    Integer(i64),

    /// Text string
    Text(String),
}

impl Value {
    /// Kind name used in type-mismatch messages.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Value::Integer(_) => "integer",
            Value::Text(_) => "text",
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Integer(i) => write!(f, "{}", i),
            Value::Text(s) => write!(f, "{}", s),
        }
    }
}

/// A row maps column names to values.
pub type Row = std::collections::HashMap<String, Value>;
