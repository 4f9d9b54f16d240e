use std::fmt;
use std::rc::Rc;

use crate::error::Result;
use crate::runtime::EnvRef;

/// AST node and runtime value representation
///
/// Squirrel uses a single closed tagged union for both syntax and runtime
/// values: the parser produces `Node`s, the evaluator consumes and produces
/// `Node`s, and the codegen backend lowers `Node`s. Nodes are immutable once
/// constructed; evaluation only creates new nodes or mutates environment
/// bindings.
#[derive(Debug, Clone)]
pub enum Node {
    /// Double-precision number
    Number(f64),
    /// Boolean value
    Bool(bool),
    /// String value
    Str(String),
    /// Symbol (identifier)
    Symbol(String),
    /// Ordered sequence of child nodes, used both as syntax and as a
    /// runtime collection
    List {
        /// Child nodes
        elements: Vec<Node>,
        /// True when the list came from `[...]` syntax; affects rendering
        /// only, never evaluation
        vector: bool,
    },
    /// Ordered sequence of string-keyed pairs
    Dictionary(Vec<(String, Node)>),
    /// Function value (native or lambda)
    Function(Function),
}

/// A callable value
#[derive(Debug, Clone)]
pub enum Function {
    /// Host operation over evaluated arguments
    Native(NativeFunction),
    /// User-defined closure
    Lambda(Lambda),
}

/// A built-in function over evaluated argument nodes
#[derive(Debug, Clone, Copy)]
pub struct NativeFunction {
    /// Name the function is bound to in the global environment
    pub name: &'static str,
    /// Required argument count, or `None` for variadic
    pub arity: Option<usize>,
    /// Host implementation
    pub func: fn(&[Node]) -> Result<Node>,
}

/// A lambda value: parameter symbols, body, and the environment captured
/// by reference at definition time
#[derive(Debug, Clone)]
pub struct Lambda {
    /// Ordered parameter names
    pub params: Vec<String>,
    /// Body expression
    pub body: Rc<Node>,
    /// Definition-site environment, shared (not copied) so that `set`
    /// mutations stay visible to every holder
    pub env: EnvRef,
}

impl Node {
    /// Creates a paren-flavored list node
    pub fn list(elements: Vec<Node>) -> Self {
        Node::List {
            elements,
            vector: false,
        }
    }

    /// Creates a bracket-flavored (vector) list node
    pub fn vector(elements: Vec<Node>) -> Self {
        Node::List {
            elements,
            vector: true,
        }
    }

    /// Creates a symbol node
    pub fn symbol(name: impl Into<String>) -> Self {
        Node::Symbol(name.into())
    }

    /// Returns the kind name as used in error messages
    pub fn kind_name(&self) -> &'static str {
        match self {
            Node::Number(_) => "number",
            Node::Bool(_) => "boolean",
            Node::Str(_) => "string",
            Node::Symbol(_) => "symbol",
            Node::List { .. } => "list",
            Node::Dictionary(_) => "dictionary",
            Node::Function(_) => "function",
        }
    }
}

fn escape_string(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\r' => out.push_str("\\r"),
            _ => out.push(c),
        }
    }
    out
}

/// Canonical rendering: the unique textual form used for round-trip and
/// equality checks. Numbers use the shortest decimal text that parses back
/// to the same value.
impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Node::Number(n) => write!(f, "{}", n),
            Node::Bool(b) => write!(f, "{}", b),
            Node::Str(s) => write!(f, "\"{}\"", escape_string(s)),
            Node::Symbol(name) => write!(f, "{}", name),
            Node::List { elements, vector } => {
                let (open, close) = if *vector { ("[", "]") } else { ("(", ")") };
                write!(f, "{}", open)?;
                for (i, element) in elements.iter().enumerate() {
                    if i > 0 {
                        write!(f, " ")?;
                    }
                    write!(f, "{}", element)?;
                }
                write!(f, "{}", close)
            }
            Node::Dictionary(pairs) => {
                write!(f, "{{")?;
                for (i, (key, value)) in pairs.iter().enumerate() {
                    if i > 0 {
                        write!(f, " ")?;
                    }
                    write!(f, "\"{}\" {}", escape_string(key), value)?;
                }
                write!(f, "}}")
            }
            Node::Function(Function::Native(native)) => {
                write!(f, "<native-function {}>", native.name)
            }
            Node::Function(Function::Lambda(lambda)) => {
                write!(f, "<lambda ({})>", lambda.params.join(" "))
            }
        }
    }
}

// Structural equality for data; functions compare by identity since a
// lambda's captured environment may contain the lambda itself.
impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Node::Number(a), Node::Number(b)) => a == b,
            (Node::Bool(a), Node::Bool(b)) => a == b,
            (Node::Str(a), Node::Str(b)) => a == b,
            (Node::Symbol(a), Node::Symbol(b)) => a == b,
            (
                Node::List {
                    elements: a,
                    vector: va,
                },
                Node::List {
                    elements: b,
                    vector: vb,
                },
            ) => va == vb && a == b,
            (Node::Dictionary(a), Node::Dictionary(b)) => a == b,
            (
                Node::Function(Function::Native(a)),
                Node::Function(Function::Native(b)),
            ) => a.name == b.name,
            (
                Node::Function(Function::Lambda(a)),
                Node::Function(Function::Lambda(b)),
            ) => Rc::ptr_eq(&a.body, &b.body),
            _ => false,
        }
    }
}
