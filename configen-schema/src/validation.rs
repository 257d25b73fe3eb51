//! Schema constraint checks.
//!
//! This module rejects schemas whose declared bounds and defaults contradict
//! each other. It runs on the parsed tree before any code is emitted.

use crate::error::ConstraintError;
use crate::resolver::resolve_integer;
use crate::types::{ArrayNode, IntegerNode, NumberNode, ScalarNode, Schema, SchemaNode};

/// Validates the constraints of every node in the schema.
///
/// # Errors
/// Returns `ConstraintError` for the first inconsistent node, in
/// declaration order.
pub fn validate_schema(schema: &Schema) -> Result<(), ConstraintError> {
    for (name, node) in schema.iter() {
        validate_node(name, node)?;
    }
    Ok(())
}

/// Validates a node and all of its descendants.
///
/// # Errors
/// Returns `ConstraintError` if a constraint is violated.
pub fn validate_node(path: &str, node: &SchemaNode) -> Result<(), ConstraintError> {
    match node {
        SchemaNode::Scalar(ScalarNode::Integer(integer)) => validate_integer(path, integer),
        SchemaNode::Scalar(ScalarNode::Number(number)) => validate_number(path, number),
        SchemaNode::Scalar(ScalarNode::Bool(_) | ScalarNode::String(_)) => Ok(()),
        SchemaNode::Object(object) => {
            for (name, member) in &object.properties {
                validate_node(&format!("{path}.{name}"), member)?;
            }
            Ok(())
        }
        SchemaNode::Array(array) => validate_array(path, array),
        SchemaNode::Reference(_) => Ok(()),
    }
}

/// Validates an integer node.
fn validate_integer(path: &str, node: &IntegerNode) -> Result<(), ConstraintError> {
    if let (Some(minimum), Some(maximum)) = (node.minimum, node.maximum) {
        if minimum > maximum {
            return Err(ConstraintError::InvalidRange {
                path: path.to_string(),
                minimum: minimum.to_string(),
                maximum: maximum.to_string(),
            });
        }
    }

    let primitive = resolve_integer(node);
    let Some((type_min, type_max)) = primitive.integer_range() else {
        return Ok(());
    };

    for bound in [node.minimum, node.maximum].into_iter().flatten() {
        if bound < type_min || bound > type_max {
            return Err(ConstraintError::Unrepresentable {
                path: path.to_string(),
                minimum: node.minimum.unwrap_or(0),
                maximum: node.maximum.unwrap_or(0),
            });
        }
    }

    if let Some(default) = node.default {
        let low = node.minimum.unwrap_or(type_min);
        let high = node.maximum.unwrap_or(type_max);
        if default < low || default > high {
            return Err(ConstraintError::DefaultOutOfBounds {
                path: path.to_string(),
                default: default.to_string(),
                minimum: low.to_string(),
                maximum: high.to_string(),
            });
        }
    }

    Ok(())
}

/// Validates a number node.
fn validate_number(path: &str, node: &NumberNode) -> Result<(), ConstraintError> {
    if let (Some(minimum), Some(maximum)) = (node.minimum, node.maximum) {
        if minimum > maximum {
            return Err(ConstraintError::InvalidRange {
                path: path.to_string(),
                minimum: minimum.to_string(),
                maximum: maximum.to_string(),
            });
        }
    }

    if let Some(default) = node.default {
        let below = node.minimum.is_some_and(|minimum| default < minimum);
        let above = node.maximum.is_some_and(|maximum| default > maximum);
        if below || above {
            return Err(ConstraintError::DefaultOutOfBounds {
                path: path.to_string(),
                default: default.to_string(),
                minimum: node
                    .minimum
                    .map_or_else(|| "-inf".to_string(), |m| m.to_string()),
                maximum: node
                    .maximum
                    .map_or_else(|| "inf".to_string(), |m| m.to_string()),
            });
        }
    }

    Ok(())
}

/// Validates an array node and its item schema.
fn validate_array(path: &str, node: &ArrayNode) -> Result<(), ConstraintError> {
    if let (Some(min_items), Some(max_items)) = (node.min_items, node.max_items) {
        if min_items > max_items {
            return Err(ConstraintError::InvalidItemRange {
                path: path.to_string(),
                min_items,
                max_items,
            });
        }
    }

    validate_node(&format!("{path}.items"), &node.items)
}
