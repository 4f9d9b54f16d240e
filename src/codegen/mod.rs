//! JavaScript backend for Squirrel
//!
//! Lowers the shared AST into a JavaScript expression AST and renders it to
//! source text. Supported forms produce output semantically equivalent to
//! direct evaluation.

mod js_ast;
mod lower;
mod serialize;

pub use js_ast::{JsBinaryOp, JsLiteral, JsNode};
pub use lower::codegen;
pub use serialize::serialize;
