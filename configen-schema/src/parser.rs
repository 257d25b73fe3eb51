//! Configuration schema parser.
//!
//! This module turns an already decoded JSON document into the schema node
//! tree. Parsing is all-or-nothing: the first structural problem aborts with
//! a [`SchemaError`] naming the offending node's path.

use crate::error::SchemaError;
use crate::naming::{is_valid_identifier, normalize};
use crate::types::{
    ArrayNode, BoolNode, IntegerNode, NodeKind, NumberNode, ObjectNode, ReferenceNode,
    ScalarNode, Schema, SchemaNode, StringNode,
};
use indexmap::IndexMap;
use serde_json::{Map, Value};
use std::collections::HashMap;

/// Parses a schema from JSON text.
///
/// # Errors
/// Returns `SchemaError` if the text is not JSON or the schema is malformed.
pub fn parse_schema_str(json: &str) -> Result<Schema, SchemaError> {
    let value: Value = serde_json::from_str(json)?;
    parse_schema(&value)
}

/// Parses a schema from a decoded JSON value.
///
/// The root must be an object mapping top-level entry names to nodes.
///
/// # Errors
/// Returns `SchemaError` if any node is malformed.
pub fn parse_schema(raw: &Value) -> Result<Schema, SchemaError> {
    let root = raw
        .as_object()
        .ok_or_else(|| SchemaError::not_an_object("<root>"))?;

    let entries = parse_members("<root>", root, None)?;
    for (name, node) in &entries {
        if node.is_reference() {
            return Err(SchemaError::TopLevelReference { path: name.clone() });
        }
    }

    tracing::debug!(entries = entries.len(), "parsed configuration schema");
    Ok(Schema { entries })
}

/// Parses an ordered member mapping (schema root or object `properties`).
fn parse_members(
    path: &str,
    members: &Map<String, Value>,
    prefix: Option<&str>,
) -> Result<IndexMap<String, SchemaNode>, SchemaError> {
    let mut parsed = IndexMap::with_capacity(members.len());
    let mut type_names: HashMap<String, &str> = HashMap::with_capacity(members.len());

    for (name, value) in members {
        if !is_valid_identifier(name) {
            return Err(SchemaError::invalid_name(path, name.as_str()));
        }

        let type_name = normalize(name);
        if let Some(first) = type_names.insert(type_name.clone(), name.as_str()) {
            return Err(SchemaError::DuplicateMember {
                path: path.to_string(),
                first: first.to_string(),
                second: name.clone(),
                type_name,
            });
        }

        let member_path = match prefix {
            Some(prefix) => format!("{prefix}.{name}"),
            None => name.clone(),
        };
        parsed.insert(name.clone(), parse_node(&member_path, value)?);
    }

    Ok(parsed)
}

/// Parses a single node.
fn parse_node(path: &str, value: &Value) -> Result<SchemaNode, SchemaError> {
    let map = value
        .as_object()
        .ok_or_else(|| SchemaError::not_an_object(path))?;

    match (map.get("type"), map.get("$ref")) {
        (Some(_), Some(_)) => Err(SchemaError::TypeAndReference {
            path: path.to_string(),
        }),
        (None, None) => Err(SchemaError::MissingType {
            path: path.to_string(),
        }),
        (None, Some(reference)) => parse_reference(path, reference),
        (Some(tag), None) => {
            let tag = tag
                .as_str()
                .ok_or_else(|| SchemaError::invalid_keyword(path, "type", "a type name"))?;
            let kind = NodeKind::parse(tag).ok_or_else(|| SchemaError::UnknownType {
                path: path.to_string(),
                type_name: tag.to_string(),
            })?;

            match kind {
                NodeKind::Bool => Ok(SchemaNode::Scalar(ScalarNode::Bool(BoolNode {
                    default: read_bool(path, map, "default")?,
                }))),
                NodeKind::Integer => Ok(SchemaNode::Scalar(ScalarNode::Integer(IntegerNode {
                    minimum: read_integer(path, map, "minimum")?,
                    maximum: read_integer(path, map, "maximum")?,
                    default: read_integer(path, map, "default")?,
                }))),
                NodeKind::Number => Ok(SchemaNode::Scalar(ScalarNode::Number(NumberNode {
                    minimum: read_number(path, map, "minimum")?,
                    maximum: read_number(path, map, "maximum")?,
                    default: read_number(path, map, "default")?,
                }))),
                NodeKind::String => Ok(SchemaNode::Scalar(ScalarNode::String(StringNode {
                    default: read_string(path, map, "default")?,
                }))),
                NodeKind::Object => parse_object(path, map),
                NodeKind::Array => parse_array(path, map),
                NodeKind::Reference => Err(SchemaError::UnknownType {
                    path: path.to_string(),
                    type_name: tag.to_string(),
                }),
            }
        }
    }
}

/// Parses an object node.
fn parse_object(path: &str, map: &Map<String, Value>) -> Result<SchemaNode, SchemaError> {
    let properties = map
        .get("properties")
        .ok_or_else(|| SchemaError::MissingProperties {
            path: path.to_string(),
        })?
        .as_object()
        .ok_or_else(|| SchemaError::invalid_keyword(path, "properties", "an object"))?;

    Ok(SchemaNode::Object(ObjectNode {
        properties: parse_members(path, properties, Some(path))?,
    }))
}

/// Parses an array node.
fn parse_array(path: &str, map: &Map<String, Value>) -> Result<SchemaNode, SchemaError> {
    let items = map.get("items").ok_or_else(|| SchemaError::MissingItems {
        path: path.to_string(),
    })?;
    if items.is_array() {
        return Err(SchemaError::invalid_keyword(
            path,
            "items",
            "a single item schema",
        ));
    }

    let item = parse_node(&format!("{path}.items"), items)?;
    Ok(SchemaNode::Array(ArrayNode::new(item).with_bounds(
        read_count(path, map, "minItems")?,
        read_count(path, map, "maxItems")?,
    )))
}

/// Parses a `$ref` node.
fn parse_reference(path: &str, reference: &Value) -> Result<SchemaNode, SchemaError> {
    let target = reference
        .as_str()
        .ok_or_else(|| SchemaError::invalid_keyword(path, "$ref", "a dotted path string"))?;

    let node = ReferenceNode::parse(target);
    if node.path.iter().any(|segment| !is_valid_identifier(segment)) {
        return Err(SchemaError::invalid_keyword(
            path,
            "$ref",
            "a dotted path of member names",
        ));
    }

    Ok(SchemaNode::Reference(node))
}

fn read_bool(path: &str, map: &Map<String, Value>, key: &str) -> Result<Option<bool>, SchemaError> {
    map.get(key)
        .map(|value| {
            value
                .as_bool()
                .ok_or_else(|| SchemaError::invalid_keyword(path, key, "a boolean"))
        })
        .transpose()
}

fn read_integer(
    path: &str,
    map: &Map<String, Value>,
    key: &str,
) -> Result<Option<i128>, SchemaError> {
    map.get(key)
        .map(|value| {
            value
                .as_i64()
                .map(i128::from)
                .or_else(|| value.as_u64().map(i128::from))
                .ok_or_else(|| SchemaError::invalid_keyword(path, key, "an integer"))
        })
        .transpose()
}

fn read_number(path: &str, map: &Map<String, Value>, key: &str) -> Result<Option<f64>, SchemaError> {
    map.get(key)
        .map(|value| {
            value
                .as_f64()
                .ok_or_else(|| SchemaError::invalid_keyword(path, key, "a number"))
        })
        .transpose()
}

fn read_string(
    path: &str,
    map: &Map<String, Value>,
    key: &str,
) -> Result<Option<String>, SchemaError> {
    map.get(key)
        .map(|value| {
            value
                .as_str()
                .map(str::to_string)
                .ok_or_else(|| SchemaError::invalid_keyword(path, key, "a string"))
        })
        .transpose()
}

fn read_count(path: &str, map: &Map<String, Value>, key: &str) -> Result<Option<u64>, SchemaError> {
    map.get(key)
        .map(|value| {
            value
                .as_u64()
                .ok_or_else(|| SchemaError::invalid_keyword(path, key, "a non-negative integer"))
        })
        .transpose()
}
