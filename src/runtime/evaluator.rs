use std::rc::Rc;

use tracing::trace;

use crate::error::{Error, Result};
use crate::parser::{Function, Lambda, Node};
use crate::runtime::builtins::Registry;
use crate::runtime::{EnvRef, Environment};

/// Default recursion depth bound
///
/// Depth is counted explicitly so exhaustion surfaces as a `StackExhausted`
/// error instead of overflowing the host stack mid-mutation.
pub const DEFAULT_MAX_DEPTH: usize = 1000;

/// Tree-walking evaluator
///
/// Holds the global environment (pre-populated from an injected builtin
/// registry) and a recursion depth bound. Evaluation is single-threaded,
/// fully synchronous direct recursion.
pub struct Evaluator {
    globals: EnvRef,
    max_depth: usize,
}

impl Evaluator {
    /// Creates an evaluator with the standard builtin namespace
    pub fn new() -> Self {
        Self::with_registry(Registry::standard())
    }

    /// Creates an evaluator with a custom builtin registry
    pub fn with_registry(registry: Registry) -> Self {
        let globals = Environment::new();
        registry.install(&globals);
        Evaluator {
            globals,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// Overrides the recursion depth bound
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Returns the global environment holding the builtin namespace
    pub fn globals(&self) -> EnvRef {
        self.globals.clone()
    }

    /// Evaluates `node` in the global environment
    pub fn run(&self, node: &Node) -> Result<Node> {
        let globals = self.globals();
        self.evaluate(node, &globals)
    }

    /// Evaluates `node` in `env`
    ///
    /// A top-level expression either fully succeeds or fully fails; errors
    /// unwind immediately with no partial value.
    pub fn evaluate(&self, node: &Node, env: &EnvRef) -> Result<Node> {
        self.eval_node(node, env, 0)
    }

    fn eval_node(&self, node: &Node, env: &EnvRef, depth: usize) -> Result<Node> {
        if depth > self.max_depth {
            return Err(Error::StackExhausted {
                limit: self.max_depth,
            });
        }

        match node {
            // Self-evaluating
            Node::Number(_) | Node::Bool(_) | Node::Str(_) | Node::Function(_) => {
                Ok(node.clone())
            }

            Node::Symbol(name) => env.borrow().lookup(name),

            // A vector literal evaluates its elements left to right
            Node::List {
                elements,
                vector: true,
            } => {
                let mut values = Vec::with_capacity(elements.len());
                for element in elements {
                    values.push(self.eval_node(element, env, depth + 1)?);
                }
                Ok(Node::vector(values))
            }

            // Dictionary values evaluate left to right, preserving order
            Node::Dictionary(pairs) => {
                let mut values = Vec::with_capacity(pairs.len());
                for (key, value) in pairs {
                    values.push((key.clone(), self.eval_node(value, env, depth + 1)?));
                }
                Ok(Node::Dictionary(values))
            }

            Node::List {
                elements,
                vector: false,
            } => {
                // The parser rejects (), so elements is never empty
                if let Node::Symbol(name) = &elements[0] {
                    match name.as_str() {
                        "def" => return self.eval_def(&elements[1..], env, depth),
                        "set" => return self.eval_set(&elements[1..], env, depth),
                        "do" => return self.eval_do(&elements[1..], env, depth),
                        "if" => return self.eval_if(&elements[1..], env, depth),
                        "lambda" => return self.eval_lambda(&elements[1..], env),
                        "quote" => return self.eval_quote(&elements[1..]),
                        _ => {}
                    }
                }
                self.eval_application(elements, env, depth)
            }
        }
    }

    /// `(def sym expr)` - evaluate and bind in the current scope
    fn eval_def(&self, args: &[Node], env: &EnvRef, depth: usize) -> Result<Node> {
        if args.len() != 2 {
            return Err(Error::arguments(
                "def",
                format!("expected 2 arguments, got {}", args.len()),
            ));
        }
        let name = match &args[0] {
            Node::Symbol(name) => name.clone(),
            other => return Err(Error::type_error("symbol", other.kind_name())),
        };
        let value = self.eval_node(&args[1], env, depth + 1)?;
        env.borrow_mut().define(name, value.clone());
        Ok(value)
    }

    /// `(set sym expr)` - evaluate and mutate the owning scope
    fn eval_set(&self, args: &[Node], env: &EnvRef, depth: usize) -> Result<Node> {
        if args.len() != 2 {
            return Err(Error::arguments(
                "set",
                format!("expected 2 arguments, got {}", args.len()),
            ));
        }
        let name = match &args[0] {
            Node::Symbol(name) => name.clone(),
            other => return Err(Error::type_error("symbol", other.kind_name())),
        };
        let value = self.eval_node(&args[1], env, depth + 1)?;
        env.borrow_mut().assign(&name, value.clone())?;
        Ok(value)
    }

    /// `(do e1 ... en)` - evaluate in order in the same environment
    fn eval_do(&self, args: &[Node], env: &EnvRef, depth: usize) -> Result<Node> {
        let (last, rest) = match args.split_last() {
            Some(parts) => parts,
            None => return Err(Error::arguments("do", "expected at least one expression")),
        };
        for arg in rest {
            self.eval_node(arg, env, depth + 1)?;
        }
        self.eval_node(last, env, depth + 1)
    }

    /// `(if cond then else)` - the condition must be Boolean; exactly one
    /// branch is evaluated
    fn eval_if(&self, args: &[Node], env: &EnvRef, depth: usize) -> Result<Node> {
        if args.len() != 3 {
            return Err(Error::arguments(
                "if",
                format!("expected 3 arguments, got {}", args.len()),
            ));
        }
        let condition = self.eval_node(&args[0], env, depth + 1)?;
        match condition {
            Node::Bool(true) => self.eval_node(&args[1], env, depth + 1),
            Node::Bool(false) => self.eval_node(&args[2], env, depth + 1),
            other => Err(Error::type_error("boolean", other.kind_name())),
        }
    }

    /// `(lambda (p1 ... pk) body)` - capture `env` by reference
    fn eval_lambda(&self, args: &[Node], env: &EnvRef) -> Result<Node> {
        if args.len() != 2 {
            return Err(Error::arguments(
                "lambda",
                format!("expected 2 arguments, got {}", args.len()),
            ));
        }
        let params = match &args[0] {
            Node::List { elements, .. } => {
                let mut params = Vec::with_capacity(elements.len());
                for element in elements {
                    match element {
                        Node::Symbol(name) => params.push(name.clone()),
                        other => {
                            return Err(Error::type_error(
                                "list of symbols",
                                other.kind_name(),
                            ))
                        }
                    }
                }
                params
            }
            other => return Err(Error::type_error("list of symbols", other.kind_name())),
        };

        Ok(Node::Function(Function::Lambda(Lambda {
            params,
            body: Rc::new(args[1].clone()),
            env: env.clone(),
        })))
    }

    /// `(quote expr)` - return the operand unevaluated
    fn eval_quote(&self, args: &[Node]) -> Result<Node> {
        if args.len() != 1 {
            return Err(Error::arguments(
                "quote",
                format!("expected 1 argument, got {}", args.len()),
            ));
        }
        Ok(args[0].clone())
    }

    /// Application: evaluate the head, then each argument left to right
    /// (the order is observable through `print`), then apply
    fn eval_application(&self, elements: &[Node], env: &EnvRef, depth: usize) -> Result<Node> {
        let head = self.eval_node(&elements[0], env, depth + 1)?;

        let mut args = Vec::with_capacity(elements.len() - 1);
        for element in &elements[1..] {
            args.push(self.eval_node(element, env, depth + 1)?);
        }

        match head {
            Node::Function(Function::Native(native)) => {
                trace!(function = native.name, argc = args.len(), "applying native");
                if let Some(arity) = native.arity {
                    if args.len() != arity {
                        return Err(Error::arguments(
                            native.name,
                            format!("expected {} arguments, got {}", arity, args.len()),
                        ));
                    }
                }
                (native.func)(&args)
            }
            Node::Function(Function::Lambda(lambda)) => {
                trace!(argc = args.len(), "applying lambda");
                if args.len() != lambda.params.len() {
                    return Err(Error::arguments(
                        "lambda",
                        format!(
                            "expected {} arguments, got {}",
                            lambda.params.len(),
                            args.len()
                        ),
                    ));
                }
                // Fresh scope per invocation, parented to the captured
                // environment, not the call site
                let call_env = Environment::with_parent(lambda.env.clone());
                {
                    let mut call_env = call_env.borrow_mut();
                    for (param, arg) in lambda.params.iter().zip(args) {
                        call_env.define(param.clone(), arg);
                    }
                }
                self.eval_node(&lambda.body, &call_env, depth + 1)
            }
            other => Err(Error::type_error("function", other.kind_name())),
        }
    }
}

impl Default for Evaluator {
    fn default() -> Self {
        Self::new()
    }
}
