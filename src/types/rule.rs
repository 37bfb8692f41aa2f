use std::fmt;
use std::ops::{BitAnd, BitOr, BitXor, Not};

use super::node::Node;
use super::predicate::Predicate;

/// A compiled rule.
///
/// Every variant supports the same combinators ([`negation`](Rule::negation),
/// [`and`](Rule::and), [`or`](Rule::or), [`xor`](Rule::xor),
/// [`implication`](Rule::implication)), so any rule can be nested under any
/// other regardless of its concrete shape. Rules are immutable values;
/// equality is structural.
#[derive(Debug, Clone, PartialEq)]
pub enum Rule {
    /// A bare, possibly curried predicate.
    Predicate(Predicate),
    /// A named rule scoped to the given input keys.
    Check {
        rule: Box<Rule>,
        name: String,
        keys: Vec<String>,
    },
    /// Applies `rule` to the value under `name` in the input.
    Key { rule: Box<Rule>, name: String },
    /// Applies `rule` to the attribute `name` of the input.
    Attr { rule: Box<Rule>, name: String },
    /// Applies `rule` to the input itself.
    Value(Box<Rule>),
    /// Independent sibling rules.
    Set(Vec<Rule>),
    /// Applies `rule` to every element of a collection input.
    Each(Box<Rule>),
    Negation(Box<Rule>),
    Conjunction(Box<Rule>, Box<Rule>),
    Disjunction(Box<Rule>, Box<Rule>),
    ExclusiveDisjunction(Box<Rule>, Box<Rule>),
    Implication(Box<Rule>, Box<Rule>),
}

impl Rule {
    #[must_use]
    pub fn negation(self) -> Rule {
        Rule::Negation(Box::new(self))
    }

    #[must_use]
    pub fn and(self, other: Rule) -> Rule {
        Rule::Conjunction(Box::new(self), Box::new(other))
    }

    #[must_use]
    pub fn or(self, other: Rule) -> Rule {
        Rule::Disjunction(Box::new(self), Box::new(other))
    }

    #[must_use]
    pub fn xor(self, other: Rule) -> Rule {
        Rule::ExclusiveDisjunction(Box::new(self), Box::new(other))
    }

    #[must_use]
    pub fn implication(self, other: Rule) -> Rule {
        Rule::Implication(Box::new(self), Box::new(other))
    }

    /// Render this rule back into an AST node. Compiling the result with the
    /// compiler that produced `self` yields a rule equal to `self`.
    #[must_use]
    pub fn to_ast(&self) -> Node {
        match self {
            Rule::Predicate(p) => p.to_ast(),
            Rule::Check { rule, name, keys } => Node::Check {
                name: name.clone(),
                predicate: Box::new(rule.to_ast()),
                keys: Some(keys.clone()),
            },
            Rule::Key { rule, name } => Node::Key {
                name: name.clone(),
                predicate: Box::new(rule.to_ast()),
            },
            Rule::Attr { rule, name } => Node::Attr {
                name: name.clone(),
                predicate: Box::new(rule.to_ast()),
            },
            Rule::Value(rule) => Node::Val(Box::new(rule.to_ast())),
            Rule::Set(rules) => Node::Set(rules.iter().map(Rule::to_ast).collect()),
            Rule::Each(rule) => Node::Each(Box::new(rule.to_ast())),
            Rule::Negation(rule) => Node::Not(Box::new(rule.to_ast())),
            Rule::Conjunction(a, b) => a.to_ast().and(b.to_ast()),
            Rule::Disjunction(a, b) => a.to_ast().or(b.to_ast()),
            Rule::ExclusiveDisjunction(a, b) => a.to_ast().xor(b.to_ast()),
            Rule::Implication(a, b) => a.to_ast().implication(b.to_ast()),
        }
    }
}

impl From<Predicate> for Rule {
    fn from(p: Predicate) -> Self {
        Rule::Predicate(p)
    }
}

impl Not for Rule {
    type Output = Rule;

    fn not(self) -> Rule {
        self.negation()
    }
}

impl BitAnd for Rule {
    type Output = Rule;

    fn bitand(self, rhs: Rule) -> Rule {
        self.and(rhs)
    }
}

impl BitOr for Rule {
    type Output = Rule;

    fn bitor(self, rhs: Rule) -> Rule {
        self.or(rhs)
    }
}

impl BitXor for Rule {
    type Output = Rule;

    fn bitxor(self, rhs: Rule) -> Rule {
        self.xor(rhs)
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rule::Predicate(p) => write!(f, "{p}"),
            Rule::Check { rule, name, keys } => {
                write!(f, "check[{name}: {}]({rule})", keys.join(", "))
            }
            Rule::Key { rule, name } => write!(f, "key[{name}]({rule})"),
            Rule::Attr { rule, name } => write!(f, "attr[{name}]({rule})"),
            Rule::Value(rule) => write!(f, "val({rule})"),
            Rule::Set(rules) => {
                write!(f, "set{{")?;
                for (i, r) in rules.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{r}")?;
                }
                write!(f, "}}")
            }
            Rule::Each(rule) => write!(f, "each({rule})"),
            Rule::Negation(rule) => write!(f, "(NOT {rule})"),
            Rule::Conjunction(a, b) => write!(f, "({a} AND {b})"),
            Rule::Disjunction(a, b) => write!(f, "({a} OR {b})"),
            Rule::ExclusiveDisjunction(a, b) => write!(f, "({a} XOR {b})"),
            Rule::Implication(a, b) => write!(f, "({a} THEN {b})"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Value;

    fn int() -> Rule {
        Predicate::new("int?", ["input"]).into()
    }

    fn gt(n: i64) -> Rule {
        Predicate::new("gt?", ["num", "input"])
            .curry([Value::Int(n)])
            .unwrap()
            .into()
    }

    #[test]
    fn operators_match_methods() {
        assert_eq!(int() & gt(1), int().and(gt(1)));
        assert_eq!(int() | gt(1), int().or(gt(1)));
        assert_eq!(int() ^ gt(1), int().xor(gt(1)));
        assert_eq!(!int(), int().negation());
    }

    #[test]
    fn combinators_compose_across_variants() {
        let scoped = Rule::Key {
            rule: Box::new(int()),
            name: "age".into(),
        };
        let combined = scoped.clone().implication(Rule::Each(Box::new(gt(0))));
        match combined {
            Rule::Implication(left, right) => {
                assert_eq!(*left, scoped);
                assert_eq!(*right, Rule::Each(Box::new(gt(0))));
            }
            other => panic!("expected Implication, got {other:?}"),
        }
    }

    #[test]
    fn to_ast_check_always_carries_keys() {
        let rule = Rule::Check {
            rule: Box::new(gt(18)),
            name: "adult".into(),
            keys: vec!["age".into()],
        };
        match rule.to_ast() {
            Node::Check { name, keys, .. } => {
                assert_eq!(name, "adult");
                assert_eq!(keys, Some(vec!["age".to_owned()]));
            }
            other => panic!("expected Check, got {other:?}"),
        }
    }

    #[test]
    fn to_ast_maps_capabilities_to_tags() {
        assert_eq!((!int()).to_ast().tag(), "not");
        assert_eq!((int() & int()).to_ast().tag(), "and");
        assert_eq!((int() | int()).to_ast().tag(), "or");
        assert_eq!((int() ^ int()).to_ast().tag(), "xor");
        assert_eq!(int().implication(int()).to_ast().tag(), "implication");
    }

    #[test]
    fn display() {
        let rule = Rule::Key {
            rule: Box::new(int() & gt(18)),
            name: "age".into(),
        };
        assert_eq!(rule.to_string(), "key[age]((int?() AND gt?(18)))");
    }
}
