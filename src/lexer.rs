use crate::ast::Token;

use thiserror::Error;

/// Query text that does not match the grammar.
///
/// Carries the byte-offset-free character position the lexer or parser had
/// reached when the input stopped making sense.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("syntax error at position {position}: {message}")]
pub struct SyntaxError {
    pub message: String,
    pub position: usize,
}

impl SyntaxError {
    pub fn new(message: impl Into<String>, position: usize) -> Self {
        SyntaxError {
            message: message.into(),
            position,
        }
    }
}

/// Shared lexer for the filter and order-by languages.
pub struct Lexer {
    input: Vec<char>,
    position: usize,
}

impl Lexer {
    pub fn new(input: &str) -> Self {
        Lexer {
            input: input.chars().collect(),
            position: 0,
        }
    }

    /// Position of the most recently examined character.
    pub fn position(&self) -> usize {
        self.position
    }

    fn current_char(&self) -> Option<char> {
        self.input.get(self.position).copied()
    }

    fn peek_char(&self, offset: usize) -> Option<char> {
        self.input.get(self.position + offset).copied()
    }

    fn advance(&mut self) {
        self.position += 1;
    }

    fn skip_whitespace(&mut self) {
        while let Some(ch) = self.current_char() {
            if ch.is_whitespace() {
                self.advance();
            } else {
                break;
            }
        }
    }

    fn read_identifier(&mut self) -> String {
        let mut result = String::new();
        while let Some(ch) = self.current_char() {
            if ch.is_alphanumeric() || ch == '_' {
                result.push(ch);
                self.advance();
            } else {
                break;
            }
        }
        result
    }

    /// Reads a string literal delimited by `quote`.
    ///
    /// A backslash escapes the quote character and itself; any other
    /// backslash is kept literally.
    fn read_string(&mut self, quote: char) -> Result<String, SyntaxError> {
        let start = self.position;
        let mut result = String::new();
        self.advance(); // consume opening quote

        while let Some(ch) = self.current_char() {
            match ch {
                c if c == quote => {
                    self.advance();
                    return Ok(result);
                }
                '\\' => {
                    match self.peek_char(1) {
                        Some(c) if c == quote || c == '\\' => {
                            result.push(c);
                            self.advance();
                        }
                        _ => result.push('\\'),
                    }
                    self.advance();
                }
                _ => {
                    result.push(ch);
                    self.advance();
                }
            }
        }

        Err(SyntaxError::new("unterminated string literal", start))
    }

    /// Reads an unsigned numeric literal. Signs are separate tokens and
    /// reattached by the parser in literal positions.
    fn read_number(&mut self) -> Result<Token, SyntaxError> {
        let start = self.position;
        let mut number = String::new();
        let mut is_float = false;

        while let Some(ch) = self.current_char() {
            if ch.is_ascii_digit() {
                number.push(ch);
                self.advance();
            } else if ch == '.' && !is_float {
                is_float = true;
                number.push(ch);
                self.advance();
            } else {
                break;
            }
        }

        if let Some('e' | 'E') = self.current_char() {
            is_float = true;
            number.push('e');
            self.advance();
            if let Some(sign @ ('+' | '-')) = self.current_char() {
                number.push(sign);
                self.advance();
            }
            let mut digits = 0;
            while let Some(ch) = self.current_char() {
                if ch.is_ascii_digit() {
                    number.push(ch);
                    self.advance();
                    digits += 1;
                } else {
                    break;
                }
            }
            if digits == 0 {
                return Err(SyntaxError::new("exponent has no digits", self.position));
            }
        }

        if is_float {
            number
                .parse::<f64>()
                .map(Token::Float)
                .map_err(|_| SyntaxError::new(format!("invalid float '{number}'"), start))
        } else {
            number
                .parse::<i64>()
                .map(Token::Integer)
                .map_err(|_| SyntaxError::new(format!("invalid integer '{number}'"), start))
        }
    }

    pub fn next_token(&mut self) -> Result<Token, SyntaxError> {
        self.skip_whitespace();

        match self.current_char() {
            None => Ok(Token::Eof),
            Some('.') => {
                if self.peek_char(1).is_some_and(|c| c.is_ascii_digit()) {
                    self.read_number()
                } else {
                    self.advance();
                    Ok(Token::Dot)
                }
            }
            Some(',') => {
                self.advance();
                Ok(Token::Comma)
            }
            Some('-') => {
                self.advance();
                Ok(Token::Minus)
            }
            Some('+') => {
                self.advance();
                Ok(Token::Plus)
            }
            Some('(') => {
                self.advance();
                Ok(Token::LParen)
            }
            Some(')') => {
                self.advance();
                Ok(Token::RParen)
            }
            Some('[') => {
                self.advance();
                Ok(Token::LBracket)
            }
            Some(']') => {
                self.advance();
                Ok(Token::RBracket)
            }
            Some('=') => {
                self.advance();
                Ok(Token::Equals)
            }
            Some(':') => {
                self.advance();
                Ok(Token::Has)
            }
            Some('!') => {
                if self.peek_char(1) == Some('=') {
                    self.advance();
                    self.advance();
                    Ok(Token::NotEquals)
                } else {
                    Err(SyntaxError::new(
                        "unexpected '!' (did you mean '!='?)",
                        self.position,
                    ))
                }
            }
            Some('<') => {
                if self.peek_char(1) == Some('=') {
                    self.advance();
                    self.advance();
                    Ok(Token::LessEquals)
                } else {
                    self.advance();
                    Ok(Token::LessThan)
                }
            }
            Some('>') => {
                if self.peek_char(1) == Some('=') {
                    self.advance();
                    self.advance();
                    Ok(Token::GreaterEquals)
                } else {
                    self.advance();
                    Ok(Token::GreaterThan)
                }
            }
            Some('"') => Ok(Token::String(self.read_string('"')?)),
            Some('\'') => Ok(Token::String(self.read_string('\'')?)),
            Some(ch) if ch.is_alphabetic() || ch == '_' => {
                let ident = self.read_identifier();

                // Keywords are case-sensitive: `and` is an identifier.
                match ident.as_str() {
                    "AND" => Ok(Token::And),
                    "OR" => Ok(Token::Or),
                    "NOT" => Ok(Token::Not),
                    "True" => Ok(Token::Boolean(true)),
                    "False" => Ok(Token::Boolean(false)),
                    _ => Ok(Token::Identifier(ident)),
                }
            }
            Some(ch) if ch.is_ascii_digit() => self.read_number(),
            Some(ch) => Err(SyntaxError::new(
                format!("unexpected character '{ch}'"),
                self.position,
            )),
        }
    }
}
