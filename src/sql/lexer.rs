/// SQL lexer - converts query text into tokens

use super::token::{Token, TokenType};
use crate::error::{LexError, Result};

pub struct Lexer {
    input: Vec<char>,
    position: usize,
}

impl Lexer {
    pub fn new(input: &str) -> Self {
        Self {
            input: input.chars().collect(),
            position: 0,
        }
    }

    /// Scan the whole input, ending with an `Eof` marker token.
    pub fn tokenize(&mut self) -> Result<Vec<Token>> {
        let mut tokens = Vec::new();

        loop {
            let token = self.next_token()?;
            let is_eof = matches!(token.token_type, TokenType::Eof);
            tokens.push(token);
            if is_eof {
                break;
            }
        }

        Ok(tokens)
    }

    fn next_token(&mut self) -> Result<Token> {
        self.skip_whitespace();

        let position = self.position;

        if self.is_eof() {
            return Ok(Token::new(TokenType::Eof, position));
        }

        let ch = self.current_char();

        let token_type = match ch {
            // String literals (single-quoted)
            '\'' => self.read_string()?,

            // Numbers
            '0'..='9' => self.read_number()?,

            // Identifiers and keywords
            'a'..='z' | 'A'..='Z' | '_' => self.read_identifier(),

            // Operators: two-character forms before single-character ones
            '=' => {
                self.advance();
                TokenType::Eq
            }
            '!' => {
                self.advance();
                if self.current_char() == '=' {
                    self.advance();
                    TokenType::Ne
                } else {
                    return Err(LexError::UnexpectedCharacter { ch: '!', position }.into());
                }
            }
            '<' => {
                self.advance();
                if self.current_char() == '=' {
                    self.advance();
                    TokenType::Le
                } else {
                    TokenType::Lt
                }
            }
            '>' => {
                self.advance();
                if self.current_char() == '=' {
                    self.advance();
                    TokenType::Ge
                } else {
                    TokenType::Gt
                }
            }

            // Delimiters
            '(' => {
                self.advance();
                TokenType::LParen
            }
            ')' => {
                self.advance();
                TokenType::RParen
            }
            ',' => {
                self.advance();
                TokenType::Comma
            }
            ';' => {
                self.advance();
                TokenType::Semicolon
            }
            '*' => {
                self.advance();
                TokenType::Star
            }

            _ => {
                return Err(LexError::UnexpectedCharacter { ch, position }.into());
            }
        };

        Ok(Token::new(token_type, position))
    }

    fn current_char(&self) -> char {
        if self.is_eof() {
            '\0'
        } else {
            self.input[self.position]
        }
    }

    fn advance(&mut self) {
        if !self.is_eof() {
            self.position += 1;
        }
    }

    fn is_eof(&self) -> bool {
        self.position >= self.input.len()
    }

    fn skip_whitespace(&mut self) {
        while !self.is_eof() && self.current_char().is_whitespace() {
            self.advance();
        }
    }

    fn read_string(&mut self) -> Result<TokenType> {
        let start = self.position;
        self.advance(); // skip opening quote
        let mut value = String::new();

        while !self.is_eof() && self.current_char() != '\'' {
            value.push(self.current_char());
            self.advance();
        }

        if self.is_eof() {
            return Err(LexError::UnterminatedString { position: start }.into());
        }

        self.advance(); // skip closing quote
        Ok(TokenType::String(value))
    }

    fn read_number(&mut self) -> Result<TokenType> {
        let start = self.position;
        let mut value = String::new();
        let mut seen_dot = false;

        while !self.is_eof() {
            let ch = self.current_char();
            if ch.is_ascii_digit() {
                value.push(ch);
            } else if ch == '.' {
                if seen_dot {
                    value.push(ch);
                    return Err(LexError::MalformedNumber {
                        literal: value,
                        position: start,
                    }
                    .into());
                }
                seen_dot = true;
                value.push(ch);
            } else {
                break;
            }
            self.advance();
        }

        // The value model has no fractional case, so a run that does not
        // convert to i64 is malformed too.
        match value.parse::<i64>() {
            Ok(n) => Ok(TokenType::Number(n)),
            Err(_) => Err(LexError::MalformedNumber {
                literal: value,
                position: start,
            }
            .into()),
        }
    }

    fn read_identifier(&mut self) -> TokenType {
        let mut value = String::new();

        while !self.is_eof() {
            let ch = self.current_char();
            if ch.is_alphanumeric() || ch == '_' {
                value.push(ch);
                self.advance();
            } else {
                break;
            }
        }

        TokenType::from_keyword(&value).unwrap_or(TokenType::Identifier(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    fn tokenize(sql: &str) -> Result<Vec<Token>> {
        Lexer::new(sql).tokenize()
    }

    #[test]
    fn test_lexer_simple_select() {
        let tokens = tokenize("SELECT * FROM users").unwrap();

        assert_eq!(tokens.len(), 5); // SELECT, *, FROM, users, EOF
        assert!(matches!(tokens[0].token_type, TokenType::Select));
        assert!(matches!(tokens[1].token_type, TokenType::Star));
        assert!(matches!(tokens[2].token_type, TokenType::From));
        assert!(matches!(tokens[3].token_type, TokenType::Identifier(ref s) if s == "users"));
        assert!(matches!(tokens[4].token_type, TokenType::Eof));
    }

    #[test]
    fn test_lexer_with_where() {
        let tokens = tokenize("SELECT id FROM users WHERE age > 18").unwrap();

        // SELECT, id, FROM, users, WHERE, age, >, 18, EOF
        assert_eq!(tokens.len(), 9);
        assert!(matches!(tokens[5].token_type, TokenType::Identifier(_)));
        assert!(matches!(tokens[6].token_type, TokenType::Gt));
        assert!(matches!(tokens[7].token_type, TokenType::Number(18)));
    }

    #[test]
    fn test_lexer_string_literal() {
        let tokens = tokenize("SELECT * FROM users WHERE name = 'John'").unwrap();

        assert!(matches!(tokens[7].token_type, TokenType::String(ref s) if s == "John"));
    }

    #[test]
    fn test_lexer_operators_maximal_munch() {
        let tokens = tokenize("= != < > <= >=").unwrap();

        assert_eq!(tokens.len(), 7);
        assert!(matches!(tokens[0].token_type, TokenType::Eq));
        assert!(matches!(tokens[1].token_type, TokenType::Ne));
        assert!(matches!(tokens[2].token_type, TokenType::Lt));
        assert!(matches!(tokens[3].token_type, TokenType::Gt));
        assert!(matches!(tokens[4].token_type, TokenType::Le));
        assert!(matches!(tokens[5].token_type, TokenType::Ge));
    }

    #[test]
    fn test_lexer_keywords_case_insensitive() {
        let tokens = tokenize("select InSeRt CREATE varchar AND or").unwrap();

        assert!(matches!(tokens[0].token_type, TokenType::Select));
        assert!(matches!(tokens[1].token_type, TokenType::Insert));
        assert!(matches!(tokens[2].token_type, TokenType::Create));
        assert!(matches!(tokens[3].token_type, TokenType::Varchar));
        assert!(matches!(tokens[4].token_type, TokenType::And));
        assert!(matches!(tokens[5].token_type, TokenType::Or));
    }

    #[test]
    fn test_lexer_punctuation() {
        let tokens = tokenize("(1, 2);").unwrap();

        assert!(matches!(tokens[0].token_type, TokenType::LParen));
        assert!(matches!(tokens[1].token_type, TokenType::Number(1)));
        assert!(matches!(tokens[2].token_type, TokenType::Comma));
        assert!(matches!(tokens[3].token_type, TokenType::Number(2)));
        assert!(matches!(tokens[4].token_type, TokenType::RParen));
        assert!(matches!(tokens[5].token_type, TokenType::Semicolon));
    }

    #[test]
    fn test_lexer_token_positions() {
        let tokens = tokenize("SELECT id").unwrap();

        assert_eq!(tokens[0].position, 0);
        assert_eq!(tokens[1].position, 7);
        assert_eq!(tokens[2].position, 9); // EOF sits past the last character
    }

    #[test]
    fn test_lexer_unexpected_character() {
        let err = tokenize("SELECT @").unwrap_err();
        assert!(matches!(
            err,
            Error::Lex(LexError::UnexpectedCharacter {
                ch: '@',
                position: 7
            })
        ));
    }

    #[test]
    fn test_lexer_bare_bang_is_unexpected() {
        let err = tokenize("a ! b").unwrap_err();
        assert!(matches!(
            err,
            Error::Lex(LexError::UnexpectedCharacter { ch: '!', .. })
        ));
    }

    #[test]
    fn test_lexer_unterminated_string() {
        let err = tokenize("name = 'abc").unwrap_err();
        assert!(matches!(
            err,
            Error::Lex(LexError::UnterminatedString { position: 7 })
        ));
    }

    #[test]
    fn test_lexer_second_decimal_point_is_malformed() {
        let err = tokenize("1.2.3").unwrap_err();
        assert!(matches!(
            err,
            Error::Lex(LexError::MalformedNumber { position: 0, .. })
        ));
    }

    #[test]
    fn test_lexer_fractional_number_is_malformed() {
        let err = tokenize("3.14").unwrap_err();
        assert!(matches!(
            err,
            Error::Lex(LexError::MalformedNumber { ref literal, .. }) if literal == "3.14"
        ));
    }

    #[test]
    fn test_lexer_underscore_identifiers() {
        let tokens = tokenize("_tmp user_name").unwrap();

        assert!(matches!(tokens[0].token_type, TokenType::Identifier(ref s) if s == "_tmp"));
        assert!(matches!(tokens[1].token_type, TokenType::Identifier(ref s) if s == "user_name"));
    }

    #[test]
    fn test_lexer_is_deterministic() {
        let sql = "SELECT name, age FROM users WHERE age >= 21 AND name != 'Zed';";
        let first = tokenize(sql).unwrap();
        let second = tokenize(sql).unwrap();
        assert_eq!(first, second);
    }
}
