mod compiler;
mod error;
mod node;
mod predicate;
mod predicates;
mod rule;
mod value;

pub use compiler::{Compiler, CompilerBuilder, DEFAULT_MAX_DEPTH};
pub use error::CompileError;
pub use node::{
    attr, check, check_keys, each, key, param, predicate, set, unbound, val, Node, Param,
};
pub use predicate::Predicate;
pub use predicates::Predicates;
pub use rule::Rule;
pub use value::Value;
