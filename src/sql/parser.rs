/// SQL parser - converts tokens into an AST
use super::ast::*;
use super::token::{Token, TokenType};
use crate::error::{Error, ParseError, Result};
use crate::types::{Column, DataType, Value};

pub struct Parser {
    tokens: Vec<Token>,
    position: usize,
}

impl Parser {
    pub fn new(tokens: Vec<Token>) -> Self {
        Self {
            tokens,
            position: 0,
        }
    }

    /// Parse one SQL statement.
    pub fn parse(&mut self) -> Result<Statement> {
        let stmt = match &self.current().token_type {
            TokenType::Select => Statement::Select(self.parse_select()?),
            TokenType::Insert => Statement::Insert(self.parse_insert()?),
            TokenType::Create => Statement::CreateTable(self.parse_create_table()?),
            token_type => {
                return Err(ParseError::UnexpectedToken {
                    found: format!("{:?}", token_type),
                    position: self.current().position,
                }
                .into());
            }
        };

        // Optionally consume a trailing semicolon, then require the end
        // of input so surplus tokens are not silently dropped.
        if matches!(self.current().token_type, TokenType::Semicolon) {
            self.advance();
        }
        self.expect(TokenType::Eof)?;

        Ok(stmt)
    }

    /// Parse SELECT statement
    fn parse_select(&mut self) -> Result<SelectStmt> {
        self.expect(TokenType::Select)?;

        let projection = if matches!(self.current().token_type, TokenType::Star) {
            self.advance();
            Projection::All
        } else {
            Projection::Columns(self.parse_identifier_list()?)
        };

        self.expect(TokenType::From)?;
        let table = self.parse_identifier()?;

        let where_clause = if self.match_token(TokenType::Where) {
            Some(self.parse_where_clause()?)
        } else {
            None
        };

        Ok(SelectStmt {
            projection,
            table,
            where_clause,
        })
    }

    /// Parse INSERT statement
    fn parse_insert(&mut self) -> Result<InsertStmt> {
        self.expect(TokenType::Insert)?;
        self.expect(TokenType::Into)?;

        let table = self.parse_identifier()?;

        // Optional column list; None means all columns in schema order
        let columns = if matches!(self.current().token_type, TokenType::LParen) {
            self.advance();
            let cols = self.parse_identifier_list()?;
            self.expect(TokenType::RParen)?;
            Some(cols)
        } else {
            None
        };

        self.expect(TokenType::Values)?;
        self.expect(TokenType::LParen)?;
        let values = self.parse_literal_list()?;
        self.expect(TokenType::RParen)?;

        Ok(InsertStmt {
            table,
            columns,
            values,
        })
    }

    /// Parse CREATE TABLE statement
    fn parse_create_table(&mut self) -> Result<CreateTableStmt> {
        self.expect(TokenType::Create)?;
        self.expect(TokenType::Table)?;
        let table = self.parse_identifier()?;

        self.expect(TokenType::LParen)?;
        let columns = self.parse_column_defs()?;
        self.expect(TokenType::RParen)?;

        Ok(CreateTableStmt { table, columns })
    }

    fn parse_column_defs(&mut self) -> Result<Vec<Column>> {
        let mut columns = Vec::new();

        loop {
            let name = self.parse_identifier()?;
            let column = match &self.current().token_type {
                TokenType::Int => {
                    self.advance();
                    Column::new(name, DataType::Int)
                }
                TokenType::Varchar => {
                    self.advance();
                    self.expect(TokenType::LParen)?;
                    let size = self.parse_varchar_size()?;
                    self.expect(TokenType::RParen)?;
                    Column::new(name, DataType::Varchar).with_size(size)
                }
                _ => return Err(self.syntax_error("data type")),
            };
            columns.push(column);

            if !self.match_token(TokenType::Comma) {
                break;
            }
        }

        Ok(columns)
    }

    fn parse_varchar_size(&mut self) -> Result<usize> {
        if let TokenType::Number(n) = self.current().token_type {
            if n < 0 {
                return Err(self.syntax_error("non-negative VARCHAR size"));
            }
            self.advance();
            Ok(n as usize)
        } else {
            Err(self.syntax_error("VARCHAR size"))
        }
    }

    /// Parse a WHERE clause as a left-to-right fold of conditions.
    ///
    /// AND and OR bind equally here, so `a AND b OR c` becomes
    /// `(a AND b) OR c`.
    fn parse_where_clause(&mut self) -> Result<WhereClause> {
        let mut clause = self.parse_condition()?;

        loop {
            let op = match self.current().token_type {
                TokenType::And => LogicalOp::And,
                TokenType::Or => LogicalOp::Or,
                _ => break,
            };
            self.advance();
            let right = self.parse_condition()?;
            clause = WhereClause::Compound {
                left: Box::new(clause),
                op,
                right: Box::new(right),
            };
        }

        Ok(clause)
    }

    fn parse_condition(&mut self) -> Result<WhereClause> {
        let column = self.parse_identifier()?;
        let comparator = self.parse_comparator()?;
        let value = self.parse_literal()?;

        Ok(WhereClause::Condition {
            column,
            comparator,
            value,
        })
    }

    fn parse_comparator(&mut self) -> Result<Comparator> {
        let comparator = match self.current().token_type {
            TokenType::Eq => Comparator::Eq,
            TokenType::Ne => Comparator::Ne,
            TokenType::Lt => Comparator::Lt,
            TokenType::Gt => Comparator::Gt,
            TokenType::Le => Comparator::Le,
            TokenType::Ge => Comparator::Ge,
            _ => return Err(self.syntax_error("comparison operator")),
        };
        self.advance();
        Ok(comparator)
    }

    fn parse_literal(&mut self) -> Result<Value> {
        let value = match &self.current().token_type {
            TokenType::Number(n) => Value::Integer(*n),
            TokenType::String(s) => Value::Text(s.clone()),
            _ => return Err(self.syntax_error("literal value")),
        };
        self.advance();
        Ok(value)
    }

    fn parse_literal_list(&mut self) -> Result<Vec<Value>> {
        let mut list = Vec::new();
        loop {
            list.push(self.parse_literal()?);
            if !self.match_token(TokenType::Comma) {
                break;
            }
        }
        Ok(list)
    }

    fn parse_identifier(&mut self) -> Result<String> {
        if let TokenType::Identifier(name) = &self.current().token_type {
            let name = name.clone();
            self.advance();
            Ok(name)
        } else {
            Err(self.syntax_error("identifier"))
        }
    }

    fn parse_identifier_list(&mut self) -> Result<Vec<String>> {
        let mut list = Vec::new();
        loop {
            list.push(self.parse_identifier()?);
            if !self.match_token(TokenType::Comma) {
                break;
            }
        }
        Ok(list)
    }

    // Helper methods

    fn current(&self) -> &Token {
        &self.tokens[self.position]
    }

    fn advance(&mut self) {
        if self.position < self.tokens.len() - 1 {
            self.position += 1;
        }
    }

    fn match_token(&mut self, token_type: TokenType) -> bool {
        if std::mem::discriminant(&self.current().token_type) == std::mem::discriminant(&token_type)
        {
            self.advance();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, token_type: TokenType) -> Result<()> {
        if std::mem::discriminant(&self.current().token_type) == std::mem::discriminant(&token_type)
        {
            self.advance();
            Ok(())
        } else {
            Err(self.syntax_error(&format!("{:?}", token_type)))
        }
    }

    fn syntax_error(&self, expected: &str) -> Error {
        let token = self.current();
        ParseError::SyntaxError {
            expected: expected.to_string(),
            found: format!("{:?}", token.token_type),
            position: token.position,
        }
        .into()
    }
}
