use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompileError {
    #[error("unknown predicate '{name}'")]
    UnknownPredicate { name: String },

    #[error("predicate '{predicate}' takes {arity} arguments but {given} were bound")]
    ArityMismatch {
        predicate: String,
        arity: usize,
        given: usize,
    },

    #[error("rule nesting exceeds the depth limit of {limit}")]
    DepthLimitExceeded { limit: usize },
}
