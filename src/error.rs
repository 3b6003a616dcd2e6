//! Error types for the minnowdb query pipeline
//!
//! Each pipeline stage has its own error family; [`Error`] is the
//! crate-wide umbrella every public API returns.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Errors produced while scanning query text into tokens.
///
/// Every variant carries the character offset where the lexer
/// detected the problem.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LexError {
    #[error("Unexpected character '{ch}' at position {position}")]
    UnexpectedCharacter { ch: char, position: usize },

    #[error("Unterminated string literal at position {position}")]
    UnterminatedString { position: usize },

    #[error("Malformed number '{literal}' at position {position}")]
    MalformedNumber { literal: String, position: usize },
}

/// Errors produced while turning tokens into a statement.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("Unexpected token {found} at position {position}")]
    UnexpectedToken { found: String, position: usize },

    #[error("Expected {expected}, found {found} at position {position}")]
    SyntaxError {
        expected: String,
        found: String,
        position: usize,
    },

    #[error("Column count mismatch: expected {expected} values, got {found}")]
    ArityMismatch { expected: usize, found: usize },
}

/// Errors produced by the table catalog and its persisted records.
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Table already exists: {0}")]
    TableExists(String),

    #[error("Table not found: {0}")]
    TableNotFound(String),

    #[error("Column not found: {0}")]
    ColumnNotFound(String),

    #[error("Type mismatch: column '{column}' expects {expected}, got {found}")]
    TypeMismatch {
        column: String,
        expected: String,
        found: String,
    },

    #[error("Value too long for column '{column}': length {length} exceeds VARCHAR({max})")]
    ValueTooLong {
        column: String,
        max: usize,
        length: usize,
    },

    #[error("Corrupt table record: {0}")]
    CorruptData(std::path::PathBuf),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Crate-wide error, one variant per pipeline stage.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Lex error: {0}")]
    Lex(#[from] LexError),

    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}
