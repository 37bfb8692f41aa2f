use logica::{
    param, predicate, unbound, Compiler, Node, Param, Predicate, Predicates, Value,
};
use proptest::prelude::*;

// --- Fixed predicate schema ---
// int?          (input)
// filled?       (input)
// gt?           (num, input)
// included_in?  (list, input)
// between?      (left, right, input)
// positive?     (num = 0, input)     registered pre-curried

pub const SIGNATURES: &[(&str, &[&str])] = &[
    ("int?", &["input"]),
    ("filled?", &["input"]),
    ("gt?", &["num", "input"]),
    ("included_in?", &["list", "input"]),
    ("between?", &["left", "right", "input"]),
];

/// Predicate names with their params and how many of them a node may still
/// bind.
const LEAVES: &[(&str, &[&str], usize)] = &[
    ("int?", &["input"], 1),
    ("filled?", &["input"], 1),
    ("gt?", &["num", "input"], 2),
    ("included_in?", &["list", "input"], 2),
    ("between?", &["left", "right", "input"], 3),
    ("positive?", &["input"], 1),
];

const NAMES: &[&str] = &["age", "name", "email", "roles", "address"];

/// A compiler over the fixed schema.
#[must_use]
pub fn schema_compiler() -> Compiler {
    let predicates = SIGNATURES
        .iter()
        .fold(Predicates::new(), |reg, (name, params)| {
            reg.register(name, params.iter().copied())
        });
    let positive = Predicate::new("positive?", ["num", "input"])
        .curry([Value::Int(0)])
        .expect("positive? takes two arguments");
    Compiler::new(predicates.insert(positive))
}

/// Generate an argument value. Floats are multiples of 0.25 so they survive
/// a trip through JSON text exactly.
pub fn arb_value() -> impl Strategy<Value = Value> {
    let scalar = prop_oneof![
        Just(Value::Null),
        any::<i64>().prop_map(Value::Int),
        (-4000_i32..4000).prop_map(|n| Value::Float(f64::from(n) / 4.0)),
        any::<bool>().prop_map(Value::Bool),
        "[a-z]{0,8}".prop_map(Value::String),
    ];
    scalar.prop_recursive(2, 8, 3, |inner| {
        prop::collection::vec(inner, 0..3).prop_map(Value::List)
    })
}

/// Generate the params of a predicate node: anywhere from none to one more
/// than declared, each independently bound or unbound. At most `free` are
/// bound and the surplus entry is always unbound, so arity is never exceeded.
fn arb_params(names: &'static [&'static str], free: usize) -> impl Strategy<Value = Vec<Param>> {
    (0..=names.len() + 1)
        .prop_flat_map(|len| prop::collection::vec(prop::option::of(arb_value()), len))
        .prop_map(move |values| {
            let mut bound = 0;
            values
                .into_iter()
                .enumerate()
                .map(|(i, value)| {
                    let name = names.get(i).copied().unwrap_or("extra");
                    match value {
                        Some(v) if i < names.len() && bound < free => {
                            bound += 1;
                            param(name, v)
                        }
                        _ => unbound(name),
                    }
                })
                .collect()
        })
}

/// Generate a predicate node referencing the fixed schema.
pub fn arb_leaf() -> impl Strategy<Value = Node> {
    prop::sample::select(LEAVES).prop_flat_map(|(name, names, free)| {
        arb_params(names, free).prop_map(move |params| predicate(name, params))
    })
}

fn arb_name() -> impl Strategy<Value = String> {
    prop::sample::select(NAMES).prop_map(str::to_owned)
}

/// Generate a node tree using every tag, bounded depth.
pub fn arb_node(max_depth: u32) -> impl Strategy<Value = Node> {
    arb_leaf().prop_recursive(max_depth, 32, 3, |inner| {
        let wrappers = prop_oneof![
            (
                arb_name(),
                inner.clone(),
                prop::option::of(prop::collection::vec(arb_name(), 0..3))
            )
                .prop_map(|(name, node, keys)| Node::Check {
                    name,
                    predicate: Box::new(node),
                    keys,
                }),
            inner.clone().prop_map(|n| !n),
            (arb_name(), inner.clone()).prop_map(|(name, node)| Node::Key {
                name,
                predicate: Box::new(node),
            }),
            (arb_name(), inner.clone()).prop_map(|(name, node)| Node::Attr {
                name,
                predicate: Box::new(node),
            }),
            inner.clone().prop_map(|n| Node::Val(Box::new(n))),
            prop::collection::vec(inner.clone(), 0..3).prop_map(Node::Set),
            inner.clone().prop_map(|n| Node::Each(Box::new(n))),
        ];
        let combinators = prop_oneof![
            (inner.clone(), inner.clone()).prop_map(|(a, b)| a.and(b)),
            (inner.clone(), inner.clone()).prop_map(|(a, b)| a.or(b)),
            (inner.clone(), inner.clone()).prop_map(|(a, b)| a.xor(b)),
            (inner.clone(), inner).prop_map(|(a, b)| a.implication(b)),
        ];
        prop_oneof![7 => wrappers, 4 => combinators]
    })
}

/// Generate a top-level AST: 0..=6 independent nodes.
pub fn arb_ast() -> impl Strategy<Value = Vec<Node>> {
    prop::collection::vec(arb_node(4), 0..=6)
}
