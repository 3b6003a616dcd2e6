/// Token types for the SQL lexer
#[derive(Debug, Clone, PartialEq)]
pub enum TokenType {
    // Keywords
    Select,
    From,
    Where,
    Insert,
    Into,
    Values,
    Create,
    Table,
    And,
    Or,

    // Data type keywords
    Int,
    Varchar,

    // Operators
    Eq, // =
    Ne, // !=
    Lt, // <
    Gt, // >
    Le, // <=
    Ge, // >=

    // Delimiters
    LParen,    // (
    RParen,    // )
    Comma,     // ,
    Semicolon, // ;
    Star,      // *

    // Literals
    Number(i64),
    String(String),
    Identifier(String),

    // Special
    Eof,
}

/// One lexical unit with the character offset where it started.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub token_type: TokenType,
    pub position: usize,
}

impl Token {
    pub fn new(token_type: TokenType, position: usize) -> Self {
        Self {
            token_type,
            position,
        }
    }
}

impl TokenType {
    /// Case-insensitive lookup against the fixed keyword set.
    pub fn from_keyword(s: &str) -> Option<Self> {
        let token = match s.to_lowercase().as_str() {
            "select" => TokenType::Select,
            "from" => TokenType::From,
            "where" => TokenType::Where,
            "insert" => TokenType::Insert,
            "into" => TokenType::Into,
            "values" => TokenType::Values,
            "create" => TokenType::Create,
            "table" => TokenType::Table,
            "and" => TokenType::And,
            "or" => TokenType::Or,
            "int" => TokenType::Int,
            "varchar" => TokenType::Varchar,
            _ => return None,
        };
        Some(token)
    }
}
