/// SQL frontend - lexing, parsing, and execution
///
/// Pipeline:
/// - Lexer: turns query text into tokens
/// - Parser: builds a statement AST from tokens
/// - Evaluator: applies WHERE clauses to stored rows
/// - Executor: runs statements against the storage engine

pub mod token;
pub mod lexer;
pub mod ast;
pub mod parser;
pub mod evaluator;
pub mod executor;

pub use token::{Token, TokenType};
pub use lexer::Lexer;
pub use ast::{CreateTableStmt, InsertStmt, SelectStmt, Statement};
pub use parser::Parser;
pub use executor::{QueryExecutor, QueryResult};

use crate::error::Result;
use crate::storage::StorageEngine;

/// Parse and execute a single SQL statement.
pub fn execute_sql(storage: &mut StorageEngine, sql: &str) -> Result<QueryResult> {
    let mut lexer = Lexer::new(sql);
    let tokens = lexer.tokenize()?;
    let mut parser = Parser::new(tokens);
    let statement = parser.parse()?;
    let mut executor = QueryExecutor::new(storage);
    executor.execute(statement)
}
