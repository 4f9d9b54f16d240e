use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::error::{Error, Result};
use crate::parser::Node;

/// Shared handle to an environment
///
/// Environments are the only shared mutable state in the interpreter. A
/// lambda captures its definition environment through this handle, so `set`
/// mutations stay visible to every closure holding the same environment
/// (aliasing, not copy-on-write).
pub type EnvRef = Rc<RefCell<Environment>>;

/// Mapping from symbol to value with parent-chain lexical scoping
#[derive(Debug)]
pub struct Environment {
    /// Bindings local to this scope
    bindings: HashMap<String, Node>,
    /// Enclosing scope (None for the global environment)
    parent: Option<EnvRef>,
}

impl Environment {
    /// Creates a root environment with no parent
    pub fn new() -> EnvRef {
        Rc::new(RefCell::new(Environment {
            bindings: HashMap::new(),
            parent: None,
        }))
    }

    /// Creates a child environment parented to `parent`
    pub fn with_parent(parent: EnvRef) -> EnvRef {
        Rc::new(RefCell::new(Environment {
            bindings: HashMap::new(),
            parent: Some(parent),
        }))
    }

    /// Returns the value bound to `name`, or `None` if it is absent from
    /// the whole parent chain
    ///
    /// Always resolves to the nearest enclosing binding; there is no
    /// sibling or downward visibility.
    pub fn get(&self, name: &str) -> Option<Node> {
        if let Some(value) = self.bindings.get(name) {
            return Some(value.clone());
        }

        let mut current = self.parent.clone();
        while let Some(env) = current {
            let env = env.borrow();
            if let Some(value) = env.bindings.get(name) {
                return Some(value.clone());
            }
            current = env.parent.clone();
        }
        None
    }

    /// Binds or overwrites `name` in this scope only
    pub fn define(&mut self, name: impl Into<String>, value: Node) {
        self.bindings.insert(name.into(), value);
    }

    /// Returns the value bound to `name`, or an `UnboundSymbol` error if it
    /// is absent from the whole parent chain
    pub fn lookup(&self, name: &str) -> Result<Node> {
        self.get(name).ok_or_else(|| Error::UnboundSymbol {
            name: name.to_string(),
        })
    }

    /// Walks up the chain to the scope that owns `name` and mutates the
    /// binding there
    ///
    /// Never creates a new binding; an `UnboundSymbol` error is returned
    /// when no scope owns the name. This is the contract behind `set`.
    pub fn assign(&mut self, name: &str, value: Node) -> Result<()> {
        if self.bindings.contains_key(name) {
            self.bindings.insert(name.to_string(), value);
            return Ok(());
        }

        let mut current = self.parent.clone();
        while let Some(env) = current {
            let mut env = env.borrow_mut();
            if env.bindings.contains_key(name) {
                env.bindings.insert(name.to_string(), value);
                return Ok(());
            }
            current = env.parent.clone();
        }

        Err(Error::UnboundSymbol {
            name: name.to_string(),
        })
    }
}
