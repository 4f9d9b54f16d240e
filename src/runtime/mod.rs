//! Runtime execution for Squirrel: environments, builtins, evaluator

pub mod builtins;
mod environment;
mod evaluator;

pub use builtins::Registry;
pub use environment::{EnvRef, Environment};
pub use evaluator::{Evaluator, DEFAULT_MAX_DEPTH};

/// Creates a fresh global environment pre-populated with the standard
/// builtin namespace, for reuse by a host REPL or script runner
pub fn default_environment() -> EnvRef {
    let env = Environment::new();
    Registry::standard().install(&env);
    env
}
