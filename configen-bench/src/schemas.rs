//! Synthetic schema builders.

use serde_json::{Map, Value, json};

/// Integer member with bounds that resolve to a different width per index.
fn integer_member(index: usize) -> Value {
    match index % 4 {
        0 => json!({"type": "integer", "minimum": 0, "maximum": 200}),
        1 => json!({"type": "integer", "minimum": -129, "maximum": 128}),
        2 => json!({"type": "integer", "minimum": 0, "maximum": 70000, "default": 8080}),
        _ => json!({"type": "integer"}),
    }
}

/// Scalar member cycling through every scalar kind.
fn scalar_member(index: usize) -> Value {
    match index % 4 {
        0 => integer_member(index / 4),
        1 => json!({"type": "number", "minimum": 0.0, "maximum": 1.0}),
        2 => json!({"type": "string", "default": "value"}),
        _ => json!({"type": "bool", "default": true}),
    }
}

/// Schema with one object holding `members` scalar members.
#[must_use]
pub fn wide_object(members: usize) -> String {
    let properties: Map<String, Value> = (0..members)
        .map(|index| (format!("field_{index}"), scalar_member(index)))
        .collect();
    json!({"root": {"type": "object", "properties": properties}}).to_string()
}

/// Schema with objects nested `depth` levels deep, each holding a scalar
/// and a bounded array.
#[must_use]
pub fn nested_objects(depth: usize) -> String {
    let mut node = json!({"type": "object", "properties": {
        "leaf": {"type": "integer", "minimum": 0, "maximum": 10}
    }});
    for level in (0..depth).rev() {
        let mut properties = Map::new();
        properties.insert("value".to_string(), scalar_member(level));
        properties.insert(
            "items".to_string(),
            json!({"type": "array", "minItems": 1, "maxItems": 8, "items": {"type": "number"}}),
        );
        properties.insert(format!("level_{level}"), node);
        node = json!({"type": "object", "properties": properties});
    }
    json!({"root": node}).to_string()
}

/// Schema with one shared object referenced from `count` top-level holders.
#[must_use]
pub fn reference_fanout(count: usize) -> String {
    let mut entries = Map::new();
    entries.insert(
        "shared".to_string(),
        json!({"type": "object", "properties": {
            "id": {"type": "string"},
            "weight": {"type": "number", "default": 1.0}
        }}),
    );
    for index in 0..count {
        entries.insert(
            format!("holder_{index}"),
            json!({"type": "object", "properties": {
                "single": {"$ref": "shared"},
                "many": {"type": "array", "items": {"$ref": "shared"}}
            }}),
        );
    }
    Value::Object(entries).to_string()
}
