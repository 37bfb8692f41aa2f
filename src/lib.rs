//! Compiles serializable logic ASTs into composable validation rules.
//!
//! A [`Compiler`] holds a [`Predicates`] registry and turns [`Node`] trees,
//! built in code or decoded from their JSON wire form (see [`wire`]), into
//! [`Rule`]s that can be combined with `and`/`or`/`xor`/`implication` and
//! negation.

mod compile;
mod error;
mod types;
pub mod wire;

pub use error::LogicaError;
pub use types::{
    attr, check, check_keys, each, key, param, predicate, set, unbound, val, CompileError,
    Compiler, CompilerBuilder, Node, Param, Predicate, Predicates, Rule, Value,
    DEFAULT_MAX_DEPTH,
};
