/// WHERE clause evaluator - evaluates predicates against rows

use crate::error::{Result, StorageError};
use crate::sql::ast::{LogicalOp, WhereClause};
use crate::types::{DataType, Row, Table, Value};

/// Evaluate a WHERE clause against a single row.
///
/// Comparisons are typed by the column's declared type: INT columns
/// compare as integers, VARCHAR columns lexicographically. A literal
/// whose kind does not match the column type is a type mismatch, not
/// a false result.
pub fn evaluate_where(table: &Table, row: &Row, clause: &WhereClause) -> Result<bool> {
    match clause {
        WhereClause::Condition {
            column,
            comparator,
            value,
        } => {
            let column_def = table
                .column(column)
                .ok_or_else(|| StorageError::ColumnNotFound(column.clone()))?;
            let stored = row
                .get(column)
                .ok_or_else(|| StorageError::ColumnNotFound(column.clone()))?;

            match (column_def.data_type, stored, value) {
                (DataType::Int, Value::Integer(lhs), Value::Integer(rhs)) => {
                    Ok(comparator.matches(lhs.cmp(rhs)))
                }
                (DataType::Varchar, Value::Text(lhs), Value::Text(rhs)) => {
                    Ok(comparator.matches(lhs.cmp(rhs)))
                }
                _ => Err(StorageError::TypeMismatch {
                    column: column.clone(),
                    expected: column_def.data_type.to_string(),
                    found: value.kind_name().to_string(),
                }
                .into()),
            }
        }
        WhereClause::Compound { left, op, right } => {
            // Both sides are evaluated before combining, so a type
            // mismatch on the right side surfaces even when the left
            // side already decides the outcome.
            let lhs = evaluate_where(table, row, left)?;
            let rhs = evaluate_where(table, row, right)?;
            Ok(match op {
                LogicalOp::And => lhs && rhs,
                LogicalOp::Or => lhs || rhs,
            })
        }
    }
}
