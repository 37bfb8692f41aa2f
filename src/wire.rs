//! JSON wire form of the rule AST.
//!
//! Rule definitions arrive from front ends as nested arrays. Every node is a
//! two-element `[tag, payload]` array; the payload shape depends on the tag.
//!
//! ## Grammar
//!
//! ```text
//! Tag           Payload
//! predicate     [name, [[param, value] | [param], ...]]
//! check         [name, node] | [name, node, null] | [name, node, [key, ...]]
//! not           node
//! key / attr    [name, node]
//! val / each    node
//! set           [node, ...]
//! and / or      [node, node]
//! xor           [node, node]
//! implication   [node, node]
//! ```
//!
//! A one-element param (`["input"]`) is unbound and is skipped when the
//! predicate is curried. A param bound to JSON `null` carries
//! [`Value::Null`]. Integral numbers that fit `i64` decode as
//! [`Value::Int`], all other numbers as [`Value::Float`]. Non-finite floats
//! encode as `null`.
//!
//! ## Example
//!
//! ```
//! use serde_json::json;
//!
//! let ast = json!([
//!     ["check", ["age", ["predicate", ["gt?", [["num", 18]]]], null]]
//! ]);
//! let nodes = logica::wire::decode(&ast).unwrap();
//! assert_eq!(nodes[0].tag(), "check");
//! assert_eq!(logica::wire::encode(&nodes)[0][0], "check");
//! ```

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{json, Value as Json};
use thiserror::Error;

use crate::types::{Node, Param, Value, DEFAULT_MAX_DEPTH};

const TAGS: &[&str] = &[
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
    "implication",
];

/// Errors produced when decoding the wire form into [`Node`]s.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("unknown node tag '{tag}'")]
    UnknownTag { tag: String },

    #[error("malformed '{tag}' node: {reason}")]
    MalformedNode { tag: String, reason: String },

    #[error("expected a [tag, payload] node, found {found}")]
    ExpectedNode { found: &'static str },

    #[error("expected a string node tag, found {found}")]
    ExpectedTag { found: &'static str },

    #[error("expected an array of nodes, found {found}")]
    ExpectedNodeList { found: &'static str },

    #[error("AST nesting exceeds the depth limit of {limit}")]
    DepthLimitExceeded { limit: usize },

    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Decode a top-level array of nodes with the default depth limit.
///
/// # Errors
///
/// Returns [`DecodeError`] if the input is not an array of well-formed nodes.
pub fn decode(ast: &Json) -> Result<Vec<Node>, DecodeError> {
    decode_with_limit(ast, DEFAULT_MAX_DEPTH)
}

/// Decode a top-level array of nodes, rejecting nesting deeper than `limit`.
///
/// Depth counts nodes exactly as the compiler does: a top-level node has
/// depth 1. Nested list arguments of a predicate are not counted.
///
/// # Errors
///
/// Returns [`DecodeError`] if the input is not an array of well-formed nodes
/// or nests too deeply.
pub fn decode_with_limit(ast: &Json, limit: usize) -> Result<Vec<Node>, DecodeError> {
    let items = ast.as_array().ok_or(DecodeError::ExpectedNodeList {
        found: describe(ast),
    })?;
    let decoder = Decoder { limit };
    let nodes = items
        .iter()
        .map(|item| decoder.node(item, 1))
        .collect::<Result<Vec<_>, _>>()
        .map_err(|err| {
            tracing::debug!(error = %err, "rule ast decoding failed");
            err
        })?;
    tracing::trace!(nodes = nodes.len(), "decoded rule ast");
    Ok(nodes)
}

/// Decode a single node.
///
/// # Errors
///
/// Returns [`DecodeError`] if the node is malformed.
pub fn decode_node(node: &Json) -> Result<Node, DecodeError> {
    Decoder {
        limit: DEFAULT_MAX_DEPTH,
    }
    .node(node, 1)
}

/// Parse JSON text and decode the top-level node array.
///
/// # Errors
///
/// Returns [`DecodeError::Json`] on invalid JSON, otherwise as [`decode`].
pub fn decode_str(input: &str) -> Result<Vec<Node>, DecodeError> {
    let ast: Json = serde_json::from_str(input)?;
    decode(&ast)
}

#[must_use]
pub fn encode(nodes: &[Node]) -> Json {
    Json::Array(nodes.iter().map(encode_node).collect())
}

#[must_use]
pub fn encode_node(node: &Node) -> Json {
    match node {
        Node::Predicate { name, params } => {
            let params: Vec<Json> = params.iter().map(encode_param).collect();
            json!(["predicate", [name, params]])
        }
        Node::Check {
            name,
            predicate,
            keys,
        } => match keys {
            Some(keys) => json!(["check", [name, encode_node(predicate), keys]]),
            None => json!(["check", [name, encode_node(predicate)]]),
        },
        Node::Not(inner) => json!(["not", encode_node(inner)]),
        Node::Key { name, predicate } => json!(["key", [name, encode_node(predicate)]]),
        Node::Attr { name, predicate } => json!(["attr", [name, encode_node(predicate)]]),
        Node::Val(inner) => json!(["val", encode_node(inner)]),
        Node::Set(nodes) => json!(["set", encode(nodes)]),
        Node::Each(inner) => json!(["each", encode_node(inner)]),
        Node::And(a, b) | Node::Or(a, b) | Node::Xor(a, b) | Node::Implication(a, b) => {
            json!([node.tag(), [encode_node(a), encode_node(b)]])
        }
    }
}

fn encode_param(param: &Param) -> Json {
    match &param.value {
        Some(value) => json!([param.name, encode_value(value)]),
        None => json!([param.name]),
    }
}

fn encode_value(value: &Value) -> Json {
    match value {
        Value::Null => Json::Null,
        Value::Int(v) => json!(v),
        Value::Float(v) => json!(v),
        Value::Bool(v) => json!(v),
        Value::String(v) => json!(v),
        Value::List(items) => Json::Array(items.iter().map(encode_value).collect()),
    }
}

struct Decoder {
    limit: usize,
}

impl Decoder {
    fn node(&self, json: &Json, depth: usize) -> Result<Node, DecodeError> {
        if depth > self.limit {
            return Err(DecodeError::DepthLimitExceeded { limit: self.limit });
        }
        let items = json.as_array().ok_or(DecodeError::ExpectedNode {
            found: describe(json),
        })?;
        let tag = match items.first() {
            Some(Json::String(tag)) => tag.as_str(),
            Some(other) => {
                return Err(DecodeError::ExpectedTag {
                    found: describe(other),
                })
            }
            None => return Err(DecodeError::ExpectedTag { found: "nothing" }),
        };
        if !TAGS.contains(&tag) {
            return Err(DecodeError::UnknownTag {
                tag: tag.to_owned(),
            });
        }
        let payload = match items.as_slice() {
            [_, payload] => payload,
            _ => {
                return Err(malformed(
                    tag,
                    format!("expected [tag, payload], found {} elements", items.len()),
                ))
            }
        };

        let next = depth + 1;
        match tag {
            "predicate" => predicate(payload),
            "check" => self.check(payload, next),
            "not" => Ok(Node::Not(Box::new(self.node(payload, next)?))),
            "key" => {
                let (name, predicate) = self.named(tag, payload, next)?;
                Ok(Node::Key { name, predicate })
            }
            "attr" => {
                let (name, predicate) = self.named(tag, payload, next)?;
                Ok(Node::Attr { name, predicate })
            }
            "val" => Ok(Node::Val(Box::new(self.node(payload, next)?))),
            "set" => {
                let members = payload
                    .as_array()
                    .ok_or_else(|| malformed(tag, "expected an array of nodes"))?;
                let nodes = members
                    .iter()
                    .map(|member| self.node(member, next))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(Node::Set(nodes))
            }
            "each" => Ok(Node::Each(Box::new(self.node(payload, next)?))),
            "and" => {
                let (a, b) = self.pair(tag, payload, next)?;
                Ok(Node::And(a, b))
            }
            "or" => {
                let (a, b) = self.pair(tag, payload, next)?;
                Ok(Node::Or(a, b))
            }
            "xor" => {
                let (a, b) = self.pair(tag, payload, next)?;
                Ok(Node::Xor(a, b))
            }
            "implication" => {
                let (a, b) = self.pair(tag, payload, next)?;
                Ok(Node::Implication(a, b))
            }
            other => Err(DecodeError::UnknownTag {
                tag: other.to_owned(),
            }),
        }
    }

    fn check(&self, payload: &Json, depth: usize) -> Result<Node, DecodeError> {
        let (name, predicate, keys) = match payload.as_array().map(Vec::as_slice) {
            Some([Json::String(name), predicate]) => (name, predicate, None),
            Some([Json::String(name), predicate, keys]) => (name, predicate, Some(keys)),
            _ => return Err(malformed("check", "expected [name, node] or [name, node, keys]")),
        };
        let keys = match keys {
            None | Some(Json::Null) => None,
            Some(Json::Array(keys)) => Some(
                keys.iter()
                    .map(|k| {
                        k.as_str()
                            .map(str::to_owned)
                            .ok_or_else(|| malformed("check", "keys must be strings"))
                    })
                    .collect::<Result<Vec<_>, _>>()?,
            ),
            Some(_) => return Err(malformed("check", "keys must be null or an array")),
        };
        Ok(Node::Check {
            name: name.clone(),
            predicate: Box::new(self.node(predicate, depth)?),
            keys,
        })
    }

    fn named(
        &self,
        tag: &str,
        payload: &Json,
        depth: usize,
    ) -> Result<(String, Box<Node>), DecodeError> {
        match payload.as_array().map(Vec::as_slice) {
            Some([Json::String(name), node]) => {
                Ok((name.clone(), Box::new(self.node(node, depth)?)))
            }
            _ => Err(malformed(tag, "expected [name, node]")),
        }
    }

    fn pair(
        &self,
        tag: &str,
        payload: &Json,
        depth: usize,
    ) -> Result<(Box<Node>, Box<Node>), DecodeError> {
        match payload.as_array().map(Vec::as_slice) {
            Some([left, right]) => Ok((
                Box::new(self.node(left, depth)?),
                Box::new(self.node(right, depth)?),
            )),
            _ => Err(malformed(tag, "expected [left, right]")),
        }
    }
}

fn predicate(payload: &Json) -> Result<Node, DecodeError> {
    let (name, params) = match payload.as_array().map(Vec::as_slice) {
        Some([Json::String(name), Json::Array(params)]) => (name, params),
        _ => return Err(malformed("predicate", "expected [name, [params]]")),
    };
    let params = params
        .iter()
        .map(|param| decode_param(name, param))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Node::Predicate {
        name: name.clone(),
        params,
    })
}

fn decode_param(predicate: &str, json: &Json) -> Result<Param, DecodeError> {
    match json.as_array().map(Vec::as_slice) {
        Some([Json::String(name)]) => Ok(Param {
            name: name.clone(),
            value: None,
        }),
        Some([Json::String(name), value]) => Ok(Param {
            name: name.clone(),
            value: Some(decode_value(value)?),
        }),
        _ => Err(malformed(
            "predicate",
            format!("param of '{predicate}' must be [name] or [name, value]"),
        )),
    }
}

/// Argument values are data, not rule structure, so their nesting does not
/// count toward the depth limit.
fn decode_value(json: &Json) -> Result<Value, DecodeError> {
    match json {
        Json::Null => Ok(Value::Null),
        Json::Bool(b) => Ok(Value::Bool(*b)),
        Json::Number(n) => match n.as_i64() {
            Some(i) => Ok(Value::Int(i)),
            None => n
                .as_f64()
                .map(Value::Float)
                .ok_or_else(|| malformed("predicate", format!("unrepresentable number {n}"))),
        },
        Json::String(s) => Ok(Value::String(s.clone())),
        Json::Array(items) => items
            .iter()
            .map(decode_value)
            .collect::<Result<Vec<_>, _>>()
            .map(Value::List),
        Json::Object(_) => Err(malformed("predicate", "objects are not valid arguments")),
    }
}

fn malformed(tag: &str, reason: impl Into<String>) -> DecodeError {
    DecodeError::MalformedNode {
        tag: tag.to_owned(),
        reason: reason.into(),
    }
}

fn describe(json: &Json) -> &'static str {
    match json {
        Json::Null => "null",
        Json::Bool(_) => "a boolean",
        Json::Number(_) => "a number",
        Json::String(_) => "a string",
        Json::Array(_) => "an array",
        Json::Object(_) => "an object",
    }
}

impl Serialize for Node {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        encode_node(self).serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Node {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Json::deserialize(deserializer)?;
        decode_node(&raw).map_err(serde::de::Error::custom)
    }
}
