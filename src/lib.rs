//! MinnowDB Embedded SQL Engine
//!
//! A minimal single-caller relational engine: SQL text in, rows out,
//! one pretty-printed JSON record per table on disk.
//!
//! ## Features
//! - CREATE TABLE, INSERT, SELECT over INT and VARCHAR(n) columns
//! - WHERE clauses with =, !=, <, >, <=, >= combined by AND/OR
//!   (connectives fold left-to-right with equal precedence)
//! - Synchronous persistence: every schema or row change is flushed to
//!   its table's record before the statement returns
//!
//! ## Architecture
//! - SQL layer: hand-written lexer, recursive descent parser, executor
//! - Storage layer: in-memory catalog backed by per-table JSON records
//! - `Database`: the entry point threading each statement through the
//!   whole pipeline in one call

pub mod sql;
pub mod storage;
pub mod types;

pub mod database;

mod error;

pub use database::{Database, TableInfo};
pub use error::{Error, LexError, ParseError, Result, StorageError};
pub use sql::{execute_sql, QueryResult};
