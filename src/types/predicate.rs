use std::fmt;

use super::error::CompileError;
use super::node::{Node, Param};
use super::value::Value;

/// Name of the unbound param [`Predicate::to_ast`] appends to keep a node
/// with a single bound argument above the currying threshold.
const PLACEHOLDER: &str = "rest";

/// A named primitive predicate signature.
///
/// `params` lists the predicate's parameter names in call order; the last
/// unbound slot is normally filled with the value under test at evaluation
/// time. `args` holds the leading arguments bound so far by [`curry`](Self::curry).
///
/// Equality compares name, params and args only.
#[derive(Debug, Clone)]
pub struct Predicate {
    name: String,
    params: Vec<String>,
    args: Vec<Value>,
    // Leading args already bound when the predicate was registered.
    preset: usize,
}

impl Predicate {
    #[must_use]
    pub fn new<I, S>(name: &str, params: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.to_owned(),
            params: params.into_iter().map(Into::into).collect(),
            args: Vec::new(),
            preset: 0,
        }
    }

    /// Freeze the currently bound args as part of a registry entry.
    pub(crate) fn registered(mut self) -> Self {
        self.preset = self.args.len();
        self
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn params(&self) -> &[String] {
        &self.params
    }

    #[must_use]
    pub fn args(&self) -> &[Value] {
        &self.args
    }

    #[must_use]
    pub fn arity(&self) -> usize {
        self.params.len()
    }

    /// Bind further leading arguments, returning a new predicate.
    ///
    /// # Errors
    ///
    /// Returns [`CompileError::ArityMismatch`] if the total number of bound
    /// arguments would exceed the predicate's arity.
    pub fn curry(&self, args: impl IntoIterator<Item = Value>) -> Result<Self, CompileError> {
        let mut bound = self.args.clone();
        bound.extend(args);
        if bound.len() > self.arity() {
            return Err(CompileError::ArityMismatch {
                predicate: self.name.clone(),
                arity: self.arity(),
                given: bound.len(),
            });
        }
        Ok(Self {
            name: self.name.clone(),
            params: self.params.clone(),
            args: bound,
            preset: self.preset,
        })
    }

    /// Render as a `predicate` node. Arguments bound beyond the registry
    /// entry fill the params that follow its preset ones; the rest are
    /// emitted unbound. A lone bound param gets an unbound placeholder so the
    /// node still curries when compiled.
    #[must_use]
    pub fn to_ast(&self) -> Node {
        let mut params: Vec<Param> = self
            .params
            .iter()
            .enumerate()
            .skip(self.preset)
            .map(|(i, name)| Param {
                name: name.clone(),
                value: self.args.get(i).cloned(),
            })
            .collect();
        if self.args.len() > self.preset && params.len() <= 1 {
            params.push(Param {
                name: PLACEHOLDER.to_owned(),
                value: None,
            });
        }
        Node::Predicate {
            name: self.name.clone(),
            params,
        }
    }
}

impl PartialEq for Predicate {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.params == other.params && self.args == other.args
    }
}

impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.name)?;
        for (i, arg) in self.args.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{arg}")?;
        }
        write!(f, ")")
    }
}
