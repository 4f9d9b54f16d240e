use super::token::{Token, TokenKind};
use crate::error::{Error, Result};

/// Scanner for Squirrel S-expression source text
///
/// Single-pass, maximal-munch: each call to `scan_token` consumes the
/// longest lexeme starting at the current position.
pub struct Scanner {
    /// Source text as character vector
    source: Vec<char>,
    /// Accumulated tokens
    tokens: Vec<Token>,
    /// Start position of the current token
    start: usize,
    /// Current position in the source
    current: usize,
    /// Current line number (1-indexed)
    line: usize,
    /// Current column number (1-indexed)
    column: usize,
    /// Column where the current token started
    start_column: usize,
}

impl Scanner {
    /// Creates a new scanner from source text
    pub fn new(source: &str) -> Self {
        Scanner {
            source: source.chars().collect(),
            tokens: Vec::new(),
            start: 0,
            current: 0,
            line: 1,
            column: 1,
            start_column: 1,
        }
    }

    /// Scans all tokens from the source and returns them as a vector
    ///
    /// The returned vector always ends with an `Eof` token.
    pub fn scan_tokens(&mut self) -> Result<Vec<Token>> {
        while !self.is_at_end() {
            self.start = self.current;
            self.start_column = self.column;
            self.scan_token()?;
        }

        self.tokens.push(Token::new(
            TokenKind::Eof,
            String::new(),
            self.line,
            self.column,
        ));

        Ok(self.tokens.clone())
    }

    fn scan_token(&mut self) -> Result<()> {
        let c = self.advance();

        match c {
            // Whitespace
            ' ' | '\r' | '\t' => {}
            '\n' => {
                self.line += 1;
                self.column = 1;
            }

            // Line comments
            ';' => self.skip_line_comment(),

            // Delimiters
            '(' => self.add_token(TokenKind::LeftParen),
            ')' => self.add_token(TokenKind::RightParen),
            '[' => self.add_token(TokenKind::LeftBracket),
            ']' => self.add_token(TokenKind::RightBracket),
            '{' => self.add_token(TokenKind::LeftBrace),
            '}' => self.add_token(TokenKind::RightBrace),

            // Quote sigil
            '\'' => self.add_token(TokenKind::Quote),

            // Strings
            '"' => self.scan_string()?,

            // Numbers, possibly negative
            '-' => {
                if self.peek().is_ascii_digit() {
                    self.scan_number()?;
                } else if self.peek().is_alphanumeric() || self.peek() == '-' {
                    // Consume the rest of the would-be symbol so the error
                    // names the whole lexeme
                    while self.peek().is_alphanumeric() || self.peek() == '-' {
                        self.advance();
                    }
                    return Err(self.lex_error(format!(
                        "a symbol may not begin with a hyphen: '{}'",
                        self.lexeme()
                    )));
                } else {
                    return Err(self.lex_error("unexpected character '-'"));
                }
            }
            c if c.is_ascii_digit() => self.scan_number()?,

            // A leading decimal point is never valid
            '.' => {
                while self.peek().is_ascii_digit() {
                    self.advance();
                }
                return Err(self.lex_error(format!(
                    "a number may not begin with a decimal point: '{}'",
                    self.lexeme()
                )));
            }

            // Symbols
            c if c.is_alphabetic() => self.scan_symbol()?,

            _ => {
                return Err(self.lex_error(format!("unexpected character '{}'", c)));
            }
        }

        Ok(())
    }

    fn skip_line_comment(&mut self) {
        while !self.is_at_end() && self.peek() != '\n' {
            self.advance();
        }
    }

    fn scan_string(&mut self) -> Result<()> {
        let mut value = String::new();

        while !self.is_at_end() && self.peek() != '"' {
            if self.peek() == '\\' {
                self.advance();
                if self.is_at_end() {
                    break;
                }
                let escaped = self.advance();
                match escaped {
                    'n' => value.push('\n'),
                    't' => value.push('\t'),
                    'r' => value.push('\r'),
                    '\\' => value.push('\\'),
                    '"' => value.push('"'),
                    _ => {
                        return Err(
                            self.lex_error(format!("invalid escape sequence '\\{}'", escaped))
                        );
                    }
                }
            } else {
                if self.peek() == '\n' {
                    self.line += 1;
                    self.column = 1;
                }
                value.push(self.advance());
            }
        }

        if self.is_at_end() {
            return Err(self.lex_error("unterminated string"));
        }

        self.advance(); // closing "

        self.add_token(TokenKind::String(value));
        Ok(())
    }

    fn scan_number(&mut self) -> Result<()> {
        while self.peek().is_ascii_digit() {
            self.advance();
        }

        if self.peek() == '.' {
            if self.peek_next().is_ascii_digit() {
                self.advance(); // consume .
                while self.peek().is_ascii_digit() {
                    self.advance();
                }
            } else {
                self.advance(); // include the dangling . in the lexeme
                return Err(self.lex_error(format!(
                    "a number may not end with a decimal point: '{}'",
                    self.lexeme()
                )));
            }
        }

        let text = self.lexeme();
        let value: f64 = text
            .parse()
            .map_err(|_| self.lex_error(format!("malformed number: '{}'", text)))?;
        self.add_token(TokenKind::Number(value));
        Ok(())
    }

    fn scan_symbol(&mut self) -> Result<()> {
        while self.peek().is_alphanumeric() || self.peek() == '-' {
            self.advance();
        }

        let text = self.lexeme();
        if text.ends_with('-') {
            return Err(self.lex_error(format!(
                "a symbol may not end with a hyphen: '{}'",
                text
            )));
        }

        let kind = match text.as_str() {
            "true" => TokenKind::True,
            "false" => TokenKind::False,
            _ => TokenKind::Symbol(text),
        };
        self.add_token(kind);
        Ok(())
    }

    fn lexeme(&self) -> String {
        self.source[self.start..self.current].iter().collect()
    }

    fn lex_error(&self, message: impl Into<String>) -> Error {
        Error::lex(self.line, self.start_column, message)
    }

    fn is_at_end(&self) -> bool {
        self.current >= self.source.len()
    }

    fn advance(&mut self) -> char {
        let c = self.source[self.current];
        self.current += 1;
        self.column += 1;
        c
    }

    fn peek(&self) -> char {
        if self.is_at_end() {
            '\0'
        } else {
            self.source[self.current]
        }
    }

    fn peek_next(&self) -> char {
        if self.current + 1 >= self.source.len() {
            '\0'
        } else {
            self.source[self.current + 1]
        }
    }

    fn add_token(&mut self, kind: TokenKind) {
        let lexeme = self.lexeme();
        self.tokens
            .push(Token::new(kind, lexeme, self.line, self.start_column));
    }
}

/// Scans source text into a token vector
pub fn lex(source: &str) -> Result<Vec<Token>> {
    Scanner::new(source).scan_tokens()
}
