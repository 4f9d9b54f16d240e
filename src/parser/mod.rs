//! Parsing for Squirrel
//!
//! Turns a token stream into a single AST root and defines the shared
//! node/value data model.

mod ast;
mod parser;

pub use ast::{Function, Lambda, NativeFunction, Node};
pub use parser::{parse, Parser, MAX_NESTING_DEPTH};
