//! # Squirrel
//!
//! A small S-expression language: a lexer and recursive-descent parser, a
//! tree-walking evaluator with lexically-scoped environments and closures,
//! and a secondary backend that lowers the same AST to JavaScript source.
//!
//! ## Quick start
//!
//! ```rust
//! use squirrel::{default_environment, interpret};
//!
//! # fn main() -> squirrel::Result<()> {
//! let env = default_environment();
//!
//! let value = interpret("(add 1 2)", &env)?;
//! assert_eq!(value.to_string(), "3");
//!
//! let value = interpret(
//!     "(do \
//!        (def square (lambda (x) (mul x x))) \
//!        (square 3))",
//!     &env,
//! )?;
//! assert_eq!(value.to_string(), "9");
//! # Ok(())
//! # }
//! ```
//!
//! ## Pipeline
//!
//! ```text
//! source text → Lexer → Parser → AST ─┬→ Evaluator(AST, Environment) → value
//!                                     └→ Codegen → JS AST → Serializer → text
//! ```
//!
//! Each stage is exposed separately for hosts that need it:
//!
//! ```rust
//! use squirrel::{codegen, lex, parse, serialize, Evaluator};
//!
//! # fn main() -> squirrel::Result<()> {
//! let ast = parse(lex("(mul (add 1 2) 3)")?)?;
//!
//! // Evaluate directly...
//! let evaluator = Evaluator::new();
//! assert_eq!(evaluator.run(&ast)?.to_string(), "9");
//!
//! // ...or lower to JavaScript
//! let js = serialize(&codegen(&ast)?);
//! assert_eq!(js, "((1 + 2) * 3)");
//! # Ok(())
//! # }
//! ```
//!
//! ## Language overview
//!
//! - **Atoms**: numbers `1`, `-0.5`; booleans `true`/`false`; strings
//!   `"hi"`; symbols `foo-bar`.
//! - **Collections**: lists `(add 1 2)`, vectors `[1 2 3]`, dictionaries
//!   `{"name" "Ada" "age" 36}`.
//! - **Special forms**: `def`, `set`, `do`, `if`, `lambda`, `quote` (with
//!   the `'` sigil as sugar).
//! - **Builtins**: arithmetic `add sub mul div mod pow`, comparisons
//!   `eq neq lt gt lte gte`, collection helpers `list length nth slice
//!   concat join`, conversions `parse-integer parse-float`, and `print`.
//!
//! Evaluation is single-threaded, synchronous recursion; runaway nesting
//! or recursion surfaces as [`Error::StackExhausted`] rather than
//! overflowing the host stack. All failures share one [`Error`] enum and
//! unwind immediately: a top-level expression fully succeeds or fully
//! fails.

/// Version of the Squirrel toolchain
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod codegen;
pub mod error;
pub mod lexer;
pub mod parser;
pub mod runtime;

// Re-export main types
pub use codegen::{codegen, serialize, JsBinaryOp, JsLiteral, JsNode};
pub use error::{Error, Result};
pub use lexer::{lex, Scanner, Token, TokenKind};
pub use parser::{parse, Function, Lambda, NativeFunction, Node, Parser, MAX_NESTING_DEPTH};
pub use runtime::{default_environment, EnvRef, Environment, Evaluator, Registry};

/// Lexes, parses and evaluates `source` against `env`
///
/// Convenience entry point for hosts (REPLs, script runners) that keep a
/// long-lived environment across inputs.
pub fn interpret(source: &str, env: &EnvRef) -> Result<Node> {
    let ast = parse(lex(source)?)?;
    // The environment carries the builtins; the evaluator only contributes
    // dispatch and the depth bound
    Evaluator::with_registry(Registry::empty()).evaluate(&ast, env)
}
