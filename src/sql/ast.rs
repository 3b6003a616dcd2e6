/// Abstract syntax tree for SQL statements
use crate::types::{Column, Value};

/// Top-level SQL statement
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    Select(SelectStmt),
    Insert(InsertStmt),
    CreateTable(CreateTableStmt),
}

/// SELECT statement
#[derive(Debug, Clone, PartialEq)]
pub struct SelectStmt {
    pub projection: Projection,
    pub table: String,
    pub where_clause: Option<WhereClause>,
}

/// Projection list: `*` or explicit column names in written order.
#[derive(Debug, Clone, PartialEq)]
pub enum Projection {
    All,
    Columns(Vec<String>),
}

/// INSERT statement
#[derive(Debug, Clone, PartialEq)]
pub struct InsertStmt {
    pub table: String,
    pub columns: Option<Vec<String>>, // None means all columns in schema order
    pub values: Vec<Value>,
}

/// CREATE TABLE statement
#[derive(Debug, Clone, PartialEq)]
pub struct CreateTableStmt {
    pub table: String,
    pub columns: Vec<Column>,
}

/// WHERE clause: a single comparison or a folded pair of clauses.
///
/// AND and OR carry equal precedence and fold left to right, so
/// `a AND b OR c` is `Compound(Compound(a, And, b), Or, c)`.
#[derive(Debug, Clone, PartialEq)]
pub enum WhereClause {
    Condition {
        column: String,
        comparator: Comparator,
        value: Value,
    },
    Compound {
        left: Box<WhereClause>,
        op: LogicalOp,
        right: Box<WhereClause>,
    },
}

/// Comparison operator in a condition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparator {
    Eq, // =
    Ne, // !=
    Lt, // <
    Gt, // >
    Le, // <=
    Ge, // >=
}

impl Comparator {
    /// Whether this comparator accepts the given ordering of left vs right.
    pub fn matches(&self, ordering: std::cmp::Ordering) -> bool {
        use std::cmp::Ordering::{Equal, Greater, Less};
        match self {
            Comparator::Eq => ordering == Equal,
            Comparator::Ne => ordering != Equal,
            Comparator::Lt => ordering == Less,
            Comparator::Gt => ordering == Greater,
            Comparator::Le => ordering != Greater,
            Comparator::Ge => ordering != Less,
        }
    }
}

/// Logical connective between conditions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogicalOp {
    And,
    Or,
}
