//! Error types for the Squirrel toolchain

use thiserror::Error;

/// Squirrel toolchain errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    // Front-end errors
    /// Unrecognized or malformed lexeme encountered while scanning
    ///
    /// **Triggered by:** an unrecognized character, a malformed number
    /// (`.1`, `1.`), or a malformed symbol (`-foo`, `foo-`)
    #[error("Lex error at line {line}, column {column}: {message}")]
    LexError {
        /// Line number where the error occurred (1-indexed)
        line: usize,
        /// Column number where the error occurred (1-indexed)
        column: usize,
        /// Error description naming the offending lexeme
        message: String,
    },

    /// Grammar violation encountered while parsing
    ///
    /// **Triggered by:** unmatched delimiters, an empty list `()`, or more
    /// than one top-level expression
    #[error("Parse error: {0}")]
    ParseError(String),

    // Runtime errors
    /// Reference to a symbol with no binding anywhere in the scope chain
    #[error("Unbound symbol: {name}")]
    UnboundSymbol {
        /// Symbol name
        name: String,
    },

    /// Wrong value kind in a position with a fixed kind requirement
    ///
    /// **Triggered by:** a non-Boolean `if` condition, a non-symbol
    /// parameter list, or calling a value that is not a function
    #[error("Type error: expected {expected}, got {got}")]
    TypeError {
        /// Expected kind
        expected: String,
        /// Actual kind received
        got: String,
    },

    /// Invalid arguments provided to a native function
    ///
    /// **Triggered by:** arity mismatch, wrong argument kind, or an
    /// out-of-range index
    #[error("Invalid arguments for {function}: {reason}")]
    ArgumentError {
        /// Function name
        function: String,
        /// Reason for invalidity
        reason: String,
    },

    /// String-to-number parse failure
    #[error("Format error: cannot parse {text:?} as {target}")]
    FormatError {
        /// The text that failed to parse
        text: String,
        /// Target kind ("integer" or "float")
        target: String,
    },

    /// Dictionary key in a non-string position
    #[error("Dictionary keys must be strings, got {got}")]
    DictionaryKey {
        /// The offending key lexeme
        got: String,
    },

    /// Dictionary entry with a key but no value
    #[error("Dictionary key {key:?} has no value")]
    DictionaryArity {
        /// The dangling key
        key: String,
    },

    // Resource errors
    /// Evaluation exceeded the configured recursion depth
    ///
    /// **Triggered by:** deeply nested expressions or runaway recursive
    /// lambda calls; environment state is left intact
    #[error("Evaluation exceeded maximum depth of {limit}")]
    StackExhausted {
        /// Configured depth limit
        limit: usize,
    },

    // Backend errors
    /// Expression form with no defined JavaScript mapping
    #[error("Codegen has no mapping for {form}")]
    CodegenUnsupported {
        /// Description of the unsupported form
        form: String,
    },
}

impl Error {
    /// Create a lex error with position information
    pub fn lex(line: usize, column: usize, message: impl Into<String>) -> Self {
        Error::LexError {
            line,
            column,
            message: message.into(),
        }
    }

    /// Create a parse error with a message
    pub fn parse(msg: impl Into<String>) -> Self {
        Error::ParseError(msg.into())
    }

    /// Create an argument error for a named function
    pub fn arguments(function: impl Into<String>, reason: impl Into<String>) -> Self {
        Error::ArgumentError {
            function: function.into(),
            reason: reason.into(),
        }
    }

    /// Create a type error from expected/actual kind names
    pub fn type_error(expected: impl Into<String>, got: impl Into<String>) -> Self {
        Error::TypeError {
            expected: expected.into(),
            got: got.into(),
        }
    }
}

/// Result type for Squirrel operations
pub type Result<T> = std::result::Result<T, Error>;
