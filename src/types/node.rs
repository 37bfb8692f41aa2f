use std::fmt;
use std::ops::Not;

use super::value::Value;

/// A named predicate parameter. `value: None` marks the parameter as
/// unbound: it is skipped when the predicate is curried.
#[derive(Debug, Clone, PartialEq)]
pub struct Param {
    pub name: String,
    pub value: Option<Value>,
}

/// The rule AST. Each variant corresponds to one wire tag
/// (see [`Node::tag`]) and compiles to one [`Rule`](super::Rule).
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Predicate {
        name: String,
        params: Vec<Param>,
    },
    Check {
        name: String,
        predicate: Box<Node>,
        keys: Option<Vec<String>>,
    },
    Not(Box<Node>),
    Key {
        name: String,
        predicate: Box<Node>,
    },
    Attr {
        name: String,
        predicate: Box<Node>,
    },
    Val(Box<Node>),
    Set(Vec<Node>),
    Each(Box<Node>),
    And(Box<Node>, Box<Node>),
    Or(Box<Node>, Box<Node>),
    Xor(Box<Node>, Box<Node>),
    Implication(Box<Node>, Box<Node>),
}

impl Node {
    /// The wire tag for this node.
    #[must_use]
    pub fn tag(&self) -> &'static str {
        match self {
            Node::Predicate { .. } => "predicate",
            Node::Check { .. } => "check",
            Node::Not(_) => "not",
            Node::Key { .. } => "key",
            Node::Attr { .. } => "attr",
            Node::Val(_) => "val",
            Node::Set(_) => "set",
            Node::Each(_) => "each",
            Node::And(..) => "and",
            Node::Or(..) => "or",
            Node::Xor(..) => "xor",
            Node::Implication(..) => "implication",
        }
    }

    #[must_use]
    pub fn and(self, other: Node) -> Node {
        Node::And(Box::new(self), Box::new(other))
    }

    #[must_use]
    pub fn or(self, other: Node) -> Node {
        Node::Or(Box::new(self), Box::new(other))
    }

    #[must_use]
    pub fn xor(self, other: Node) -> Node {
        Node::Xor(Box::new(self), Box::new(other))
    }

    #[must_use]
    pub fn implication(self, other: Node) -> Node {
        Node::Implication(Box::new(self), Box::new(other))
    }
}

impl Not for Node {
    type Output = Node;

    fn not(self) -> Node {
        Node::Not(Box::new(self))
    }
}

impl fmt::Display for Param {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.value {
            Some(value) => write!(f, "{}: {value}", self.name),
            None => write!(f, "{}: _", self.name),
        }
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Node::Predicate { name, params } => {
                write!(f, "{name}(")?;
                for (i, p) in params.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{p}")?;
                }
                write!(f, ")")
            }
            Node::Check {
                name,
                predicate,
                keys,
            } => match keys {
                Some(keys) => write!(f, "check {name} [{}] {predicate}", keys.join(", ")),
                None => write!(f, "check {name} {predicate}"),
            },
            Node::Not(inner) => write!(f, "(NOT {inner})"),
            Node::Key { name, predicate } => write!(f, "key[{name}]({predicate})"),
            Node::Attr { name, predicate } => write!(f, "attr[{name}]({predicate})"),
            Node::Val(inner) => write!(f, "val({inner})"),
            Node::Set(nodes) => {
                write!(f, "set{{")?;
                for (i, n) in nodes.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{n}")?;
                }
                write!(f, "}}")
            }
            Node::Each(inner) => write!(f, "each({inner})"),
            Node::And(a, b) => write!(f, "({a} AND {b})"),
            Node::Or(a, b) => write!(f, "({a} OR {b})"),
            Node::Xor(a, b) => write!(f, "({a} XOR {b})"),
            Node::Implication(a, b) => write!(f, "({a} THEN {b})"),
        }
    }
}

/// A bound predicate parameter.
#[must_use]
pub fn param(name: &str, value: impl Into<Value>) -> Param {
    Param {
        name: name.to_owned(),
        value: Some(value.into()),
    }
}

/// An unbound predicate parameter, left for evaluation time.
#[must_use]
pub fn unbound(name: &str) -> Param {
    Param {
        name: name.to_owned(),
        value: None,
    }
}

#[must_use]
pub fn predicate(name: &str, params: impl IntoIterator<Item = Param>) -> Node {
    Node::Predicate {
        name: name.to_owned(),
        params: params.into_iter().collect(),
    }
}

/// A `check` node whose keys default to `[name]` at compile time.
#[must_use]
pub fn check(name: &str, predicate: Node) -> Node {
    Node::Check {
        name: name.to_owned(),
        predicate: Box::new(predicate),
        keys: None,
    }
}

#[must_use]
pub fn check_keys<I, S>(name: &str, predicate: Node, keys: I) -> Node
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    Node::Check {
        name: name.to_owned(),
        predicate: Box::new(predicate),
        keys: Some(keys.into_iter().map(Into::into).collect()),
    }
}

#[must_use]
pub fn key(name: &str, predicate: Node) -> Node {
    Node::Key {
        name: name.to_owned(),
        predicate: Box::new(predicate),
    }
}

#[must_use]
pub fn attr(name: &str, predicate: Node) -> Node {
    Node::Attr {
        name: name.to_owned(),
        predicate: Box::new(predicate),
    }
}

#[must_use]
pub fn val(node: Node) -> Node {
    Node::Val(Box::new(node))
}

#[must_use]
pub fn set(nodes: impl IntoIterator<Item = Node>) -> Node {
    Node::Set(nodes.into_iter().collect())
}

#[must_use]
pub fn each(node: Node) -> Node {
    Node::Each(Box::new(node))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gt18() -> Node {
        predicate("gt?", [param("num", 18_i64), unbound("input")])
    }

    #[test]
    fn param_builders() {
        assert_eq!(
            param("num", 18_i64),
            Param {
                name: "num".into(),
                value: Some(Value::Int(18)),
            }
        );
        assert_eq!(unbound("input").value, None);
    }

    #[test]
    fn predicate_builder() {
        let node = gt18();
        match node {
            Node::Predicate { name, params } => {
                assert_eq!(name, "gt?");
                assert_eq!(params.len(), 2);
            }
            other => panic!("expected Predicate, got {other:?}"),
        }
    }

    #[test]
    fn check_without_keys() {
        let node = check("age", gt18());
        match node {
            Node::Check { name, keys, .. } => {
                assert_eq!(name, "age");
                assert_eq!(keys, None);
            }
            other => panic!("expected Check, got {other:?}"),
        }
    }

    #[test]
    fn check_with_keys() {
        let node = check_keys("adult", gt18(), ["age"]);
        match node {
            Node::Check { keys, .. } => assert_eq!(keys, Some(vec!["age".to_owned()])),
            other => panic!("expected Check, got {other:?}"),
        }
    }

    #[test]
    fn combinator_sugar() {
        let a = predicate("str?", []);
        let b = predicate("filled?", []);
        assert_eq!(
            a.clone().and(b.clone()),
            Node::And(Box::new(a.clone()), Box::new(b.clone()))
        );
        assert_eq!(
            a.clone().implication(b.clone()),
            Node::Implication(Box::new(a.clone()), Box::new(b))
        );
        assert_eq!(!a.clone(), Node::Not(Box::new(a)));
    }

    #[test]
    fn tags_cover_every_variant() {
        let leaf = predicate("nil?", []);
        let nodes = vec![
            leaf.clone(),
            check("x", leaf.clone()),
            !leaf.clone(),
            key("x", leaf.clone()),
            attr("x", leaf.clone()),
            val(leaf.clone()),
            set([leaf.clone()]),
            each(leaf.clone()),
            leaf.clone().and(leaf.clone()),
            leaf.clone().or(leaf.clone()),
            leaf.clone().xor(leaf.clone()),
            leaf.clone().implication(leaf),
        ];
        let tags: Vec<&str> = nodes.iter().map(Node::tag).collect();
        assert_eq!(
            tags,
            vec![
                "predicate",
                "check",
                "not",
                "key",
                "attr",
                "val",
                "set",
                "each",
                "and",
                "or",
                "xor",
                "implication"
            ]
        );
    }

    #[test]
    fn display() {
        let node = key("age", gt18()).and(!predicate("nil?", [unbound("input")]));
        assert_eq!(
            node.to_string(),
            "(key[age](gt?(num: 18, input: _)) AND (NOT nil?(input: _)))"
        );
    }
}
