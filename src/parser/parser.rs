use super::ast::Node;
use crate::error::{Error, Result};
use crate::lexer::{Token, TokenKind};

/// Maximum expression nesting depth accepted by the parser
///
/// The parser recurses once per nesting level, so the bound is checked
/// explicitly and violation surfaces as a `ParseError` instead of a host
/// stack overflow.
pub const MAX_NESTING_DEPTH: usize = 500;

/// Recursive-descent parser with one token of lookahead
pub struct Parser {
    tokens: Vec<Token>,
    current: usize,
}

impl Parser {
    /// Creates a new parser over a token vector
    pub fn new(tokens: Vec<Token>) -> Self {
        Parser { tokens, current: 0 }
    }

    /// Parses the tokens into a single AST root
    ///
    /// The grammar admits exactly one top-level expression; trailing tokens
    /// are a parse error.
    pub fn parse(&mut self) -> Result<Node> {
        // The scanner always emits Eof, but parse is a public entry point
        // and may be handed a hand-built token vector
        if self.tokens.is_empty() {
            return Err(Error::parse("unexpected end of input"));
        }

        let root = self.parse_expression(0)?;

        if !self.is_at_end() {
            return Err(Error::parse(format!(
                "input must be a single expression, found trailing '{}'",
                self.peek().kind
            )));
        }

        Ok(root)
    }

    fn parse_expression(&mut self, depth: usize) -> Result<Node> {
        if depth > MAX_NESTING_DEPTH {
            return Err(Error::parse(format!(
                "expression nesting exceeds maximum depth of {}",
                MAX_NESTING_DEPTH
            )));
        }

        match self.peek().kind.clone() {
            TokenKind::Number(n) => {
                self.advance();
                Ok(Node::Number(n))
            }
            TokenKind::String(s) => {
                self.advance();
                Ok(Node::Str(s))
            }
            TokenKind::True => {
                self.advance();
                Ok(Node::Bool(true))
            }
            TokenKind::False => {
                self.advance();
                Ok(Node::Bool(false))
            }
            TokenKind::Symbol(name) => {
                self.advance();
                Ok(Node::Symbol(name))
            }
            TokenKind::Quote => self.parse_quoted(depth),
            TokenKind::LeftParen => self.parse_list(depth),
            TokenKind::LeftBracket => self.parse_vector(depth),
            TokenKind::LeftBrace => self.parse_dictionary(depth),
            TokenKind::RightParen | TokenKind::RightBracket | TokenKind::RightBrace => Err(
                Error::parse(format!("unmatched '{}'", self.peek().kind)),
            ),
            TokenKind::Eof => Err(Error::parse("unexpected end of input")),
        }
    }

    /// Desugars `'expr` into `(quote expr)`
    fn parse_quoted(&mut self, depth: usize) -> Result<Node> {
        self.advance(); // consume '
        let operand = self.parse_expression(depth + 1)?;
        Ok(Node::list(vec![Node::symbol("quote"), operand]))
    }

    fn parse_list(&mut self, depth: usize) -> Result<Node> {
        self.advance(); // consume (

        if self.check(&TokenKind::RightParen) {
            self.advance();
            return Err(Error::parse("() is not a valid expression"));
        }

        let mut elements = Vec::new();
        while !self.check(&TokenKind::RightParen) {
            if self.is_at_end() {
                return Err(Error::parse("unmatched '('"));
            }
            elements.push(self.parse_expression(depth + 1)?);
        }
        self.advance(); // consume )

        Ok(Node::list(elements))
    }

    fn parse_vector(&mut self, depth: usize) -> Result<Node> {
        self.advance(); // consume [

        let mut elements = Vec::new();
        while !self.check(&TokenKind::RightBracket) {
            if self.is_at_end() {
                return Err(Error::parse("unmatched '['"));
            }
            elements.push(self.parse_expression(depth + 1)?);
        }
        self.advance(); // consume ]

        Ok(Node::vector(elements))
    }

    fn parse_dictionary(&mut self, depth: usize) -> Result<Node> {
        self.advance(); // consume {

        let mut pairs = Vec::new();
        while !self.check(&TokenKind::RightBrace) {
            if self.is_at_end() {
                return Err(Error::parse("unmatched '{'"));
            }

            let key = match self.peek().kind.clone() {
                TokenKind::String(key) => {
                    self.advance();
                    key
                }
                _ => {
                    return Err(Error::DictionaryKey {
                        got: self.peek().lexeme.clone(),
                    });
                }
            };

            if self.check(&TokenKind::RightBrace) || self.is_at_end() {
                return Err(Error::DictionaryArity { key });
            }
            let value = self.parse_expression(depth + 1)?;
            pairs.push((key, value));
        }
        self.advance(); // consume }

        Ok(Node::Dictionary(pairs))
    }

    fn is_at_end(&self) -> bool {
        matches!(self.peek().kind, TokenKind::Eof)
    }

    fn peek(&self) -> &Token {
        // The token vector always ends with Eof, so current stays in bounds
        &self.tokens[self.current.min(self.tokens.len() - 1)]
    }

    fn check(&self, kind: &TokenKind) -> bool {
        &self.peek().kind == kind
    }

    fn advance(&mut self) -> &Token {
        if !self.is_at_end() {
            self.current += 1;
        }
        &self.tokens[self.current - 1]
    }
}

/// Parses a token vector into a single AST root
pub fn parse(tokens: Vec<Token>) -> Result<Node> {
    Parser::new(tokens).parse()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::lex;

    fn parse_source(source: &str) -> Result<Node> {
        parse(lex(source)?)
    }

    #[test]
    fn test_atoms() {
        assert_eq!(parse_source("1").unwrap(), Node::Number(1.0));
        assert_eq!(parse_source("true").unwrap(), Node::Bool(true));
        assert_eq!(
            parse_source("\"hi\"").unwrap(),
            Node::Str("hi".to_string())
        );
        assert_eq!(parse_source("foo").unwrap(), Node::symbol("foo"));
    }

    #[test]
    fn test_nested_list() {
        let ast = parse_source("(add (add 1 2) 3)").unwrap();
        assert_eq!(ast.to_string(), "(add (add 1 2) 3)");
    }

    #[test]
    fn test_vector_literal() {
        let ast = parse_source("[1 2 3]").unwrap();
        assert_eq!(ast, Node::vector(vec![
            Node::Number(1.0),
            Node::Number(2.0),
            Node::Number(3.0),
        ]));
        assert_eq!(parse_source("[]").unwrap(), Node::vector(vec![]));
    }

    #[test]
    fn test_quote_desugars() {
        let ast = parse_source("'foo").unwrap();
        assert_eq!(
            ast,
            Node::list(vec![Node::symbol("quote"), Node::symbol("foo")])
        );
    }

    #[test]
    fn test_dictionary_literal() {
        let ast = parse_source("{\"name\" \"John Smith\" \"age\" 42}").unwrap();
        assert_eq!(
            ast,
            Node::Dictionary(vec![
                ("name".to_string(), Node::Str("John Smith".to_string())),
                ("age".to_string(), Node::Number(42.0)),
            ])
        );
        assert_eq!(parse_source("{}").unwrap(), Node::Dictionary(vec![]));
    }

    #[test]
    fn test_dictionary_key_must_be_string() {
        let err = parse_source("{name \"John Smith\"}").unwrap_err();
        assert!(matches!(err, Error::DictionaryKey { .. }));
    }

    #[test]
    fn test_dictionary_dangling_key() {
        let err = parse_source("{\"name\"}").unwrap_err();
        assert_eq!(
            err,
            Error::DictionaryArity {
                key: "name".to_string()
            }
        );
    }

    #[test]
    fn test_empty_list_rejected() {
        assert!(matches!(parse_source("()"), Err(Error::ParseError(_))));
    }

    #[test]
    fn test_single_expression_only() {
        assert!(matches!(parse_source("foo bar"), Err(Error::ParseError(_))));
        assert!(matches!(
            parse_source("(add 1 2) foo"),
            Err(Error::ParseError(_))
        ));
    }

    #[test]
    fn test_unmatched_delimiters() {
        assert!(matches!(parse_source("("), Err(Error::ParseError(_))));
        assert!(matches!(parse_source(")"), Err(Error::ParseError(_))));
        assert!(matches!(parse_source("(add 1"), Err(Error::ParseError(_))));
        assert!(matches!(parse_source("[1 2"), Err(Error::ParseError(_))));
    }

    #[test]
    fn test_empty_input() {
        assert!(matches!(parse_source(""), Err(Error::ParseError(_))));
    }

    #[test]
    fn test_empty_token_vector() {
        assert!(matches!(parse(Vec::new()), Err(Error::ParseError(_))));
    }

    #[test]
    fn test_nesting_up_to_the_limit_is_accepted() {
        let depth = MAX_NESTING_DEPTH - 1;
        let source = format!("{}1{}", "[".repeat(depth), "]".repeat(depth));
        assert!(parse_source(&source).is_ok());
    }

    #[test]
    fn test_excessive_nesting_is_an_error_not_a_crash() {
        let source = format!("{}1{}", "(".repeat(100_000), ")".repeat(100_000));
        assert!(matches!(parse_source(&source), Err(Error::ParseError(_))));
    }
}
