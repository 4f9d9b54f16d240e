//! Builtin namespace for Squirrel
//!
//! A fixed set of pure native functions over evaluated nodes. The registry
//! is an explicit configuration object injected into the evaluator rather
//! than a process-wide singleton, so isolated interpreter instances can
//! coexist in tests.

use crate::error::{Error, Result};
use crate::parser::{Function, NativeFunction, Node};
use crate::runtime::EnvRef;

/// Registry of native functions
pub struct Registry {
    functions: Vec<NativeFunction>,
}

impl Registry {
    /// Create a registry populated with the standard builtin namespace
    pub fn standard() -> Self {
        let mut registry = Registry::empty();

        // Arithmetic (Number x Number -> Number)
        registry.register("add", Some(2), add);
        registry.register("sub", Some(2), sub);
        registry.register("mul", Some(2), mul);
        registry.register("div", Some(2), div);
        registry.register("mod", Some(2), modulo);
        registry.register("pow", Some(2), pow);

        // Comparisons (Number x Number -> Boolean)
        registry.register("eq", Some(2), eq);
        registry.register("neq", Some(2), neq);
        registry.register("lt", Some(2), lt);
        registry.register("gt", Some(2), gt);
        registry.register("lte", Some(2), lte);
        registry.register("gte", Some(2), gte);

        // Collections
        registry.register("list", None, list);
        registry.register("length", Some(1), length);
        registry.register("nth", Some(2), nth);
        registry.register("slice", Some(3), slice);
        registry.register("concat", None, concat);
        registry.register("join", None, join);

        // Conversions
        registry.register("parse-integer", Some(1), parse_integer);
        registry.register("parse-float", Some(1), parse_float);

        // Effects
        registry.register("print", Some(1), print);

        registry
    }

    /// Create an empty registry (for testing)
    pub fn empty() -> Self {
        Registry {
            functions: Vec::new(),
        }
    }

    /// Register a native function
    pub fn register(
        &mut self,
        name: &'static str,
        arity: Option<usize>,
        func: fn(&[Node]) -> Result<Node>,
    ) {
        self.functions.push(NativeFunction { name, arity, func });
    }

    /// Define every registered function in `env`
    pub fn install(&self, env: &EnvRef) {
        let mut env = env.borrow_mut();
        for native in &self.functions {
            env.define(native.name, Node::Function(Function::Native(*native)));
        }
    }
}

// Argument helpers. Builtins perform no implicit cross-kind coercion: a
// wrong kind in any position is an ArgumentError naming the function.

fn number_arg(function: &str, args: &[Node], index: usize) -> Result<f64> {
    match &args[index] {
        Node::Number(n) => Ok(*n),
        other => Err(Error::arguments(
            function,
            format!(
                "argument {} must be a number, got {}",
                index + 1,
                other.kind_name()
            ),
        )),
    }
}

fn string_arg<'a>(function: &str, args: &'a [Node], index: usize) -> Result<&'a str> {
    match &args[index] {
        Node::Str(s) => Ok(s),
        other => Err(Error::arguments(
            function,
            format!(
                "argument {} must be a string, got {}",
                index + 1,
                other.kind_name()
            ),
        )),
    }
}

/// Checks that a number argument is a usable index: a non-negative integer
fn index_arg(function: &str, args: &[Node], index: usize) -> Result<usize> {
    let n = number_arg(function, args, index)?;
    if n < 0.0 || n.fract() != 0.0 {
        return Err(Error::arguments(
            function,
            format!("index must be a non-negative integer, got {}", n),
        ));
    }
    Ok(n as usize)
}

// Arithmetic

fn add(args: &[Node]) -> Result<Node> {
    Ok(Node::Number(
        number_arg("add", args, 0)? + number_arg("add", args, 1)?,
    ))
}

fn sub(args: &[Node]) -> Result<Node> {
    Ok(Node::Number(
        number_arg("sub", args, 0)? - number_arg("sub", args, 1)?,
    ))
}

fn mul(args: &[Node]) -> Result<Node> {
    Ok(Node::Number(
        number_arg("mul", args, 0)? * number_arg("mul", args, 1)?,
    ))
}

fn div(args: &[Node]) -> Result<Node> {
    Ok(Node::Number(
        number_arg("div", args, 0)? / number_arg("div", args, 1)?,
    ))
}

fn modulo(args: &[Node]) -> Result<Node> {
    Ok(Node::Number(
        number_arg("mod", args, 0)? % number_arg("mod", args, 1)?,
    ))
}

fn pow(args: &[Node]) -> Result<Node> {
    Ok(Node::Number(
        number_arg("pow", args, 0)?.powf(number_arg("pow", args, 1)?),
    ))
}

// Comparisons return Boolean, never a sentinel number

fn eq(args: &[Node]) -> Result<Node> {
    Ok(Node::Bool(
        number_arg("eq", args, 0)? == number_arg("eq", args, 1)?,
    ))
}

fn neq(args: &[Node]) -> Result<Node> {
    Ok(Node::Bool(
        number_arg("neq", args, 0)? != number_arg("neq", args, 1)?,
    ))
}

fn lt(args: &[Node]) -> Result<Node> {
    Ok(Node::Bool(
        number_arg("lt", args, 0)? < number_arg("lt", args, 1)?,
    ))
}

fn gt(args: &[Node]) -> Result<Node> {
    Ok(Node::Bool(
        number_arg("gt", args, 0)? > number_arg("gt", args, 1)?,
    ))
}

fn lte(args: &[Node]) -> Result<Node> {
    Ok(Node::Bool(
        number_arg("lte", args, 0)? <= number_arg("lte", args, 1)?,
    ))
}

fn gte(args: &[Node]) -> Result<Node> {
    Ok(Node::Bool(
        number_arg("gte", args, 0)? >= number_arg("gte", args, 1)?,
    ))
}

// Collections

fn list(args: &[Node]) -> Result<Node> {
    Ok(Node::list(args.to_vec()))
}

fn length(args: &[Node]) -> Result<Node> {
    match &args[0] {
        Node::List { elements, .. } => Ok(Node::Number(elements.len() as f64)),
        Node::Str(s) => Ok(Node::Number(s.chars().count() as f64)),
        other => Err(Error::arguments(
            "length",
            format!("expected a list or string, got {}", other.kind_name()),
        )),
    }
}

/// 0-based element access for lists and strings
fn nth(args: &[Node]) -> Result<Node> {
    let index = index_arg("nth", args, 1)?;
    match &args[0] {
        Node::List { elements, .. } => elements.get(index).cloned().ok_or_else(|| {
            Error::arguments(
                "nth",
                format!("index {} out of range for list of length {}", index, elements.len()),
            )
        }),
        Node::Str(s) => s
            .chars()
            .nth(index)
            .map(|c| Node::Str(c.to_string()))
            .ok_or_else(|| {
                Error::arguments(
                    "nth",
                    format!(
                        "index {} out of range for string of length {}",
                        index,
                        s.chars().count()
                    ),
                )
            }),
        other => Err(Error::arguments(
            "nth",
            format!("expected a list or string, got {}", other.kind_name()),
        )),
    }
}

fn slice(args: &[Node]) -> Result<Node> {
    let start = index_arg("slice", args, 1)?;
    let end = index_arg("slice", args, 2)?;
    if start > end {
        return Err(Error::arguments(
            "slice",
            format!("start {} is past end {}", start, end),
        ));
    }

    match &args[0] {
        Node::List { elements, vector } => {
            if end > elements.len() {
                return Err(Error::arguments(
                    "slice",
                    format!("end {} out of range for list of length {}", end, elements.len()),
                ));
            }
            Ok(Node::List {
                elements: elements[start..end].to_vec(),
                vector: *vector,
            })
        }
        Node::Str(s) => {
            let chars: Vec<char> = s.chars().collect();
            if end > chars.len() {
                return Err(Error::arguments(
                    "slice",
                    format!("end {} out of range for string of length {}", end, chars.len()),
                ));
            }
            Ok(Node::Str(chars[start..end].iter().collect()))
        }
        other => Err(Error::arguments(
            "slice",
            format!("expected a list or string, got {}", other.kind_name()),
        )),
    }
}

/// Kind-preserving concatenation: every argument must be a list, or every
/// argument must be a string
fn concatenate(function: &str, args: &[Node]) -> Result<Node> {
    match args.first() {
        None => Err(Error::arguments(function, "expected at least one argument")),
        Some(Node::List { vector, .. }) => {
            let mut elements = Vec::new();
            for arg in args {
                match arg {
                    Node::List { elements: more, .. } => elements.extend(more.iter().cloned()),
                    other => {
                        return Err(Error::arguments(
                            function,
                            format!("cannot join a list with a {}", other.kind_name()),
                        ));
                    }
                }
            }
            Ok(Node::List {
                elements,
                vector: *vector,
            })
        }
        Some(Node::Str(_)) => {
            let mut out = String::new();
            for arg in args {
                match arg {
                    Node::Str(s) => out.push_str(s),
                    other => {
                        return Err(Error::arguments(
                            function,
                            format!("cannot join a string with a {}", other.kind_name()),
                        ));
                    }
                }
            }
            Ok(Node::Str(out))
        }
        Some(other) => Err(Error::arguments(
            function,
            format!("expected a list or string, got {}", other.kind_name()),
        )),
    }
}

fn concat(args: &[Node]) -> Result<Node> {
    concatenate("concat", args)
}

fn join(args: &[Node]) -> Result<Node> {
    concatenate("join", args)
}

// Conversions

fn parse_integer(args: &[Node]) -> Result<Node> {
    let text = string_arg("parse-integer", args, 0)?;
    text.trim()
        .parse::<i64>()
        .map(|n| Node::Number(n as f64))
        .map_err(|_| Error::FormatError {
            text: text.to_string(),
            target: "integer".to_string(),
        })
}

fn parse_float(args: &[Node]) -> Result<Node> {
    let text = string_arg("parse-float", args, 0)?;
    text.trim()
        .parse::<f64>()
        .map(Node::Number)
        .map_err(|_| Error::FormatError {
            text: text.to_string(),
            target: "float".to_string(),
        })
}

// Effects

/// The only builtin with an externally visible effect: writes the canonical
/// form of its argument to stdout and returns the argument unchanged
fn print(args: &[Node]) -> Result<Node> {
    println!("{}", args[0]);
    Ok(args[0].clone())
}
