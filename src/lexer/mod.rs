//! Lexical analysis for Squirrel
//!
//! Converts source text into a stream of S-expression tokens.

mod scanner;
mod token;

pub use scanner::{lex, Scanner};
pub use token::{Token, TokenKind};
