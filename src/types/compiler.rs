use std::fmt;

use super::error::CompileError;
use super::node::Node;
use super::predicates::Predicates;
use super::rule::Rule;

/// Default bound on AST nesting, for both decoding and compilation.
pub const DEFAULT_MAX_DEPTH: usize = 128;

/// Builder for a [`Compiler`].
///
/// # Example
///
/// ```
/// use logica::{Compiler, Predicates};
///
/// let compiler = Compiler::builder(Predicates::standard())
///     .max_depth(32)
///     .build();
/// assert_eq!(compiler.max_depth(), 32);
/// ```
#[derive(Debug)]
pub struct CompilerBuilder {
    predicates: Predicates,
    max_depth: usize,
}

impl CompilerBuilder {
    /// Maximum nesting depth accepted. A top-level leaf node has depth 1.
    /// Values below 1 are raised to 1.
    #[must_use]
    pub fn max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth.max(1);
        self
    }

    #[must_use]
    pub fn build(self) -> Compiler {
        Compiler {
            predicates: self.predicates,
            max_depth: self.max_depth,
        }
    }
}

/// Compiles rule ASTs into [`Rule`]s against a fixed predicate registry.
///
/// Holds no mutable state; share it behind `Arc` to compile from many
/// threads at once.
///
/// # Example
///
/// ```
/// use logica::{check, param, predicate, Compiler, Predicates, Rule};
///
/// let compiler = Compiler::new(Predicates::new().register("gt?", ["num", "input"]));
/// let rules = compiler
///     .compile(&[check("age", predicate("gt?", [param("num", 18_i64)]))])
///     .unwrap();
///
/// match &rules[0] {
///     Rule::Check { name, keys, .. } => {
///         assert_eq!(name, "age");
///         assert_eq!(keys, &["age"]);
///     }
///     other => panic!("unexpected rule {other}"),
/// }
/// ```
#[derive(Debug, Clone)]
pub struct Compiler {
    pub(crate) predicates: Predicates,
    pub(crate) max_depth: usize,
}

impl Compiler {
    #[must_use]
    pub fn new(predicates: Predicates) -> Self {
        Self::builder(predicates).build()
    }

    #[must_use]
    pub fn builder(predicates: Predicates) -> CompilerBuilder {
        CompilerBuilder {
            predicates,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    #[must_use]
    pub fn predicates(&self) -> &Predicates {
        &self.predicates
    }

    #[must_use]
    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Compile each top-level node independently, preserving order.
    ///
    /// # Errors
    ///
    /// Returns the first [`CompileError`] encountered; no partial output is
    /// produced.
    pub fn compile(&self, nodes: &[Node]) -> Result<Vec<Rule>, CompileError> {
        crate::compile::compile(self, nodes)
    }

    /// Compile a single node.
    ///
    /// # Errors
    ///
    /// Returns [`CompileError`] if the node references an unknown predicate,
    /// over-binds a predicate, or nests too deeply.
    pub fn visit(&self, node: &Node) -> Result<Rule, CompileError> {
        crate::compile::visit(self, node)
    }

    /// Decode a JSON array-of-arrays AST and compile it.
    ///
    /// # Errors
    ///
    /// Returns [`LogicaError`](crate::LogicaError) on decode or compile failure.
    pub fn compile_json(&self, ast: &serde_json::Value) -> Result<Vec<Rule>, crate::LogicaError> {
        let nodes = crate::wire::decode_with_limit(ast, self.max_depth)?;
        Ok(self.compile(&nodes)?)
    }

    /// Parse JSON text holding an AST and compile it.
    ///
    /// # Errors
    ///
    /// Returns [`LogicaError`](crate::LogicaError) on JSON, decode or compile
    /// failure.
    pub fn compile_str(&self, input: &str) -> Result<Vec<Rule>, crate::LogicaError> {
        let ast: serde_json::Value =
            serde_json::from_str(input).map_err(crate::wire::DecodeError::from)?;
        self.compile_json(&ast)
    }

    /// Read a JSON AST file and compile it.
    ///
    /// # Errors
    ///
    /// Returns [`LogicaError`](crate::LogicaError) on I/O, JSON, decode or
    /// compile failure.
    pub fn compile_file(
        &self,
        path: impl AsRef<std::path::Path>,
    ) -> Result<Vec<Rule>, crate::LogicaError> {
        let input = std::fs::read_to_string(path)?;
        self.compile_str(&input)
    }
}

impl fmt::Display for Compiler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Compiler({} predicates, max depth {})",
            self.predicates.len(),
            self.max_depth,
        )
    }
}
