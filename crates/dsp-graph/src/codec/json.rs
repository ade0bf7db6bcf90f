//! Field access on compacted JSON-LD nodes.
//!
//! Literals arrive either bare (`true`, `"text"`, `42`) or as typed objects
//! (`{"@type": "xsd:decimal", "@value": "1.5"}`); references arrive as
//! `{"@id": ...}` objects. Properties may hold one item or an array.

use serde_json::{Map, Value as Json};

use crate::error::{DecodeError, Result};
use crate::vocab::jsonld;

pub(crate) type Node = Map<String, Json>;

/// Returns the node object, or a shape error naming `context`.
pub(crate) fn as_node<'a>(value: &'a Json, context: &'static str) -> Result<&'a Node> {
    value
        .as_object()
        .ok_or(DecodeError::MalformedGraphShape { context })
}

/// Unwraps `{"@value": x}` to `x`.
pub(crate) fn literal(value: &Json) -> &Json {
    match value {
        Json::Object(obj) => obj.get(jsonld::VALUE).unwrap_or(value),
        _ => value,
    }
}

/// Iterates over a property that holds one item or an array of items.
pub(crate) fn one_or_many(value: &Json) -> impl Iterator<Item = &Json> {
    let items: &[Json] = match value {
        Json::Array(items) => items,
        single => std::slice::from_ref(single),
    };
    items.iter()
}

/// First item of a property that may be an array.
pub(crate) fn first(value: &Json) -> Option<&Json> {
    one_or_many(value).next()
}

/// Reads a string-valued label or comment, taking the first entry of an array.
pub(crate) fn text(value: &Json) -> Option<String> {
    first(value)
        .map(literal)
        .and_then(Json::as_str)
        .map(str::to_owned)
}

/// Reads an `{"@id": ...}` reference (a bare string is accepted too).
pub(crate) fn id_ref(value: &Json) -> Option<&str> {
    match value {
        Json::String(s) => Some(s),
        Json::Object(obj) => obj.get(jsonld::ID).and_then(Json::as_str),
        _ => None,
    }
}

/// Reads every reference of a one-or-many property.
pub(crate) fn id_refs(value: &Json) -> Vec<String> {
    one_or_many(value)
        .filter_map(id_ref)
        .map(str::to_owned)
        .collect()
}

/// The node's `@id`.
pub(crate) fn node_id(node: &Node) -> Option<&str> {
    node.get(jsonld::ID).and_then(Json::as_str)
}

/// The node's `@type`; the first one if several are given.
pub(crate) fn node_type(node: &Node) -> Option<&str> {
    node.get(jsonld::TYPE).and_then(first).and_then(Json::as_str)
}

/// True if the node's `@type` is, or includes, `type_iri`.
pub(crate) fn has_type(node: &Node, type_iri: &str) -> bool {
    node.get(jsonld::TYPE)
        .is_some_and(|t| one_or_many(t).any(|t| t.as_str() == Some(type_iri)))
}

pub(crate) fn opt_text(node: &Node, key: &str) -> Option<String> {
    node.get(key).and_then(text)
}

pub(crate) fn opt_ref(node: &Node, key: &str) -> Option<String> {
    node.get(key).and_then(first).and_then(id_ref).map(str::to_owned)
}

/// Reads a boolean literal; the strings `"true"` and `"false"` are accepted.
pub(crate) fn opt_bool(node: &Node, key: &'static str) -> Result<Option<bool>> {
    let Some(value) = node.get(key).map(literal) else {
        return Ok(None);
    };
    match value {
        Json::Bool(b) => Ok(Some(*b)),
        Json::String(s) if s == "true" => Ok(Some(true)),
        Json::String(s) if s == "false" => Ok(Some(false)),
        _ => Err(DecodeError::InvalidField {
            field: key,
            expected: "a boolean",
        }),
    }
}

/// Reads an integer literal given as a JSON number or a numeric string.
pub(crate) fn opt_i64(node: &Node, key: &'static str) -> Result<Option<i64>> {
    let Some(value) = node.get(key).map(literal) else {
        return Ok(None);
    };
    let parsed = match value {
        Json::Number(n) => n.as_i64(),
        Json::String(s) => s.trim().parse().ok(),
        _ => None,
    };
    parsed.map(Some).ok_or(DecodeError::InvalidField {
        field: key,
        expected: "an integer",
    })
}

/// Reads a decimal literal given as a JSON number or a numeric string.
pub(crate) fn opt_f64(node: &Node, key: &'static str) -> Result<Option<f64>> {
    let Some(value) = node.get(key).map(literal) else {
        return Ok(None);
    };
    let parsed = match value {
        Json::Number(n) => n.as_f64(),
        Json::String(s) => s.trim().parse().ok(),
        _ => None,
    };
    parsed.map(Some).ok_or(DecodeError::InvalidField {
        field: key,
        expected: "a decimal",
    })
}

pub(crate) fn opt_str<'a>(node: &'a Node, key: &'static str) -> Result<Option<&'a str>> {
    let Some(value) = node.get(key).map(literal) else {
        return Ok(None);
    };
    value.as_str().map(Some).ok_or(DecodeError::InvalidField {
        field: key,
        expected: "a string",
    })
}

pub(crate) fn required<T>(value: Option<T>, key: &'static str) -> Result<T> {
    value.ok_or(DecodeError::MissingField { field: key })
}

pub(crate) fn required_str<'a>(node: &'a Node, key: &'static str) -> Result<&'a str> {
    required(opt_str(node, key)?, key)
}
