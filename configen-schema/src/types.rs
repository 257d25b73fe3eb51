//! Schema type definitions.
//!
//! This module contains the data structures representing configuration
//! schema nodes: scalars, objects, arrays and references, plus the target
//! primitive types scalars resolve to.

use indexmap::IndexMap;

/// Complete configuration schema.
///
/// The root of a schema is an ordered mapping from top-level entry name to
/// node. Iteration order is the declaration order of the input.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Schema {
    /// Top-level entries in declaration order.
    pub entries: IndexMap<String, SchemaNode>,
}

impl Schema {
    /// Creates a new empty schema.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a top-level entry, returning the previous node with that name.
    pub fn add_entry(&mut self, name: impl Into<String>, node: SchemaNode) -> Option<SchemaNode> {
        self.entries.insert(name.into(), node)
    }

    /// Looks up a top-level entry by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&SchemaNode> {
        self.entries.get(name)
    }

    /// Returns the number of top-level entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the schema has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over top-level entries in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &SchemaNode)> {
        self.entries.iter()
    }
}

/// Schema node variants.
#[derive(Debug, Clone, PartialEq)]
pub enum SchemaNode {
    /// Bool, integer, number or string.
    Scalar(ScalarNode),
    /// Nested object with ordered members.
    Object(ObjectNode),
    /// Homogeneous array.
    Array(ArrayNode),
    /// Reference to a previously declared object.
    Reference(ReferenceNode),
}

impl SchemaNode {
    /// Returns the kind of the node.
    #[must_use]
    pub const fn kind(&self) -> NodeKind {
        match self {
            Self::Scalar(ScalarNode::Bool(_)) => NodeKind::Bool,
            Self::Scalar(ScalarNode::Integer(_)) => NodeKind::Integer,
            Self::Scalar(ScalarNode::Number(_)) => NodeKind::Number,
            Self::Scalar(ScalarNode::String(_)) => NodeKind::String,
            Self::Object(_) => NodeKind::Object,
            Self::Array(_) => NodeKind::Array,
            Self::Reference(_) => NodeKind::Reference,
        }
    }

    /// Returns true if this is a scalar node.
    #[must_use]
    pub const fn is_scalar(&self) -> bool {
        matches!(self, Self::Scalar(_))
    }

    /// Returns true if this is an object node.
    #[must_use]
    pub const fn is_object(&self) -> bool {
        matches!(self, Self::Object(_))
    }

    /// Returns true if this is an array node.
    #[must_use]
    pub const fn is_array(&self) -> bool {
        matches!(self, Self::Array(_))
    }

    /// Returns true if this is a reference node.
    #[must_use]
    pub const fn is_reference(&self) -> bool {
        matches!(self, Self::Reference(_))
    }
}

/// Node kind tags, as written in the `type` keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// `bool` / `boolean`.
    Bool,
    /// `integer`.
    Integer,
    /// `number`.
    Number,
    /// `string`.
    String,
    /// `object`.
    Object,
    /// `array`.
    Array,
    /// `$ref` node (no `type` tag).
    Reference,
}

impl NodeKind {
    /// Parses a `type` tag.
    #[must_use]
    pub fn parse(tag: &str) -> Option<Self> {
        match tag {
            "bool" | "boolean" => Some(Self::Bool),
            "integer" => Some(Self::Integer),
            "number" => Some(Self::Number),
            "string" => Some(Self::String),
            "object" => Some(Self::Object),
            "array" => Some(Self::Array),
            _ => None,
        }
    }

    /// Returns the canonical tag name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Bool => "bool",
            Self::Integer => "integer",
            Self::Number => "number",
            Self::String => "string",
            Self::Object => "object",
            Self::Array => "array",
            Self::Reference => "$ref",
        }
    }
}

/// Scalar node variants.
#[derive(Debug, Clone, PartialEq)]
pub enum ScalarNode {
    /// Boolean value.
    Bool(BoolNode),
    /// Bounded integer value.
    Integer(IntegerNode),
    /// Floating point value.
    Number(NumberNode),
    /// Text value.
    String(StringNode),
}

/// Boolean scalar.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BoolNode {
    /// Default value.
    pub default: Option<bool>,
}

/// Integer scalar.
///
/// Bounds are stored as `i128` so that the full `u64` and `i64` ranges can
/// be expressed without loss.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IntegerNode {
    /// Inclusive lower bound.
    pub minimum: Option<i128>,
    /// Inclusive upper bound.
    pub maximum: Option<i128>,
    /// Default value.
    pub default: Option<i128>,
}

impl IntegerNode {
    /// Creates an unconstrained integer node.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the lower bound.
    #[must_use]
    pub fn with_minimum(mut self, minimum: i128) -> Self {
        self.minimum = Some(minimum);
        self
    }

    /// Sets the upper bound.
    #[must_use]
    pub fn with_maximum(mut self, maximum: i128) -> Self {
        self.maximum = Some(maximum);
        self
    }

    /// Sets the default value.
    #[must_use]
    pub fn with_default(mut self, default: i128) -> Self {
        self.default = Some(default);
        self
    }
}

/// Floating point scalar.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NumberNode {
    /// Inclusive lower bound.
    pub minimum: Option<f64>,
    /// Inclusive upper bound.
    pub maximum: Option<f64>,
    /// Default value.
    pub default: Option<f64>,
}

/// Text scalar.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StringNode {
    /// Default value.
    pub default: Option<String>,
}

/// Object node.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ObjectNode {
    /// Members in declaration order.
    pub properties: IndexMap<String, SchemaNode>,
}

impl ObjectNode {
    /// Creates an object with no members.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a member, keeping declaration order.
    #[must_use]
    pub fn with_member(mut self, name: impl Into<String>, node: SchemaNode) -> Self {
        self.properties.insert(name.into(), node);
        self
    }
}

/// Array node.
#[derive(Debug, Clone, PartialEq)]
pub struct ArrayNode {
    /// Schema of every element.
    pub items: Box<SchemaNode>,
    /// Minimum number of elements.
    pub min_items: Option<u64>,
    /// Maximum number of elements.
    pub max_items: Option<u64>,
}

impl ArrayNode {
    /// Creates an unbounded array of `items`.
    #[must_use]
    pub fn new(items: SchemaNode) -> Self {
        Self {
            items: Box::new(items),
            min_items: None,
            max_items: None,
        }
    }

    /// Sets both item bounds.
    #[must_use]
    pub fn with_bounds(mut self, min_items: Option<u64>, max_items: Option<u64>) -> Self {
        self.min_items = min_items;
        self.max_items = max_items;
        self
    }
}

/// Reference node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferenceNode {
    /// Path segments of the referenced object, e.g. `["sub_module", "inner"]`.
    pub path: Vec<String>,
}

impl ReferenceNode {
    /// Creates a reference from a dot-separated path.
    #[must_use]
    pub fn parse(path: &str) -> Self {
        Self {
            path: path.split('.').map(str::to_string).collect(),
        }
    }

    /// Returns the dot-separated form of the path.
    #[must_use]
    pub fn target(&self) -> String {
        self.path.join(".")
    }
}

/// Target primitive types scalars resolve to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveType {
    /// Signed 8-bit integer.
    Int8,
    /// Signed 16-bit integer.
    Int16,
    /// Signed 32-bit integer.
    Int32,
    /// Signed 64-bit integer.
    Int64,
    /// Unsigned 8-bit integer.
    Uint8,
    /// Unsigned 16-bit integer.
    Uint16,
    /// Unsigned 32-bit integer.
    Uint32,
    /// Unsigned 64-bit integer.
    Uint64,
    /// 64-bit floating point.
    Double,
    /// Boolean.
    Bool,
    /// Owned text.
    String,
}

impl PrimitiveType {
    /// Standard integer widths, narrowest first.
    pub const INTEGER_WIDTHS: [u32; 4] = [8, 16, 32, 64];

    /// Returns the integer type for a signedness and width.
    #[must_use]
    pub const fn integer(signed: bool, bits: u32) -> Option<Self> {
        match (signed, bits) {
            (true, 8) => Some(Self::Int8),
            (true, 16) => Some(Self::Int16),
            (true, 32) => Some(Self::Int32),
            (true, 64) => Some(Self::Int64),
            (false, 8) => Some(Self::Uint8),
            (false, 16) => Some(Self::Uint16),
            (false, 32) => Some(Self::Uint32),
            (false, 64) => Some(Self::Uint64),
            _ => None,
        }
    }

    /// Returns the width in bits for integer types.
    #[must_use]
    pub const fn bits(&self) -> Option<u32> {
        match self {
            Self::Int8 | Self::Uint8 => Some(8),
            Self::Int16 | Self::Uint16 => Some(16),
            Self::Int32 | Self::Uint32 => Some(32),
            Self::Int64 | Self::Uint64 => Some(64),
            Self::Double | Self::Bool | Self::String => None,
        }
    }

    /// Returns the C++ type name for this primitive.
    #[must_use]
    pub const fn cpp_type(&self) -> &'static str {
        match self {
            Self::Int8 => "int8_t",
            Self::Int16 => "int16_t",
            Self::Int32 => "int32_t",
            Self::Int64 => "int64_t",
            Self::Uint8 => "uint8_t",
            Self::Uint16 => "uint16_t",
            Self::Uint32 => "uint32_t",
            Self::Uint64 => "uint64_t",
            Self::Double => "double",
            Self::Bool => "bool",
            Self::String => "std::string",
        }
    }

    /// Returns true if this is a signed integer type.
    #[must_use]
    pub const fn is_signed(&self) -> bool {
        matches!(self, Self::Int8 | Self::Int16 | Self::Int32 | Self::Int64)
    }

    /// Returns true if this is an unsigned integer type.
    #[must_use]
    pub const fn is_unsigned(&self) -> bool {
        matches!(
            self,
            Self::Uint8 | Self::Uint16 | Self::Uint32 | Self::Uint64
        )
    }

    /// Returns true if this is any integer type.
    #[must_use]
    pub const fn is_integer(&self) -> bool {
        self.is_signed() || self.is_unsigned()
    }

    /// Returns the inclusive value range of an integer type.
    #[must_use]
    pub const fn integer_range(&self) -> Option<(i128, i128)> {
        match self {
            Self::Int8 => Some((i8::MIN as i128, i8::MAX as i128)),
            Self::Int16 => Some((i16::MIN as i128, i16::MAX as i128)),
            Self::Int32 => Some((i32::MIN as i128, i32::MAX as i128)),
            Self::Int64 => Some((i64::MIN as i128, i64::MAX as i128)),
            Self::Uint8 => Some((0, u8::MAX as i128)),
            Self::Uint16 => Some((0, u16::MAX as i128)),
            Self::Uint32 => Some((0, u32::MAX as i128)),
            Self::Uint64 => Some((0, u64::MAX as i128)),
            Self::Double | Self::Bool | Self::String => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_kind_parse() {
        assert_eq!(NodeKind::parse("bool"), Some(NodeKind::Bool));
        assert_eq!(NodeKind::parse("boolean"), Some(NodeKind::Bool));
        assert_eq!(NodeKind::parse("integer"), Some(NodeKind::Integer));
        assert_eq!(NodeKind::parse("object"), Some(NodeKind::Object));
        assert_eq!(NodeKind::parse("int"), None);
        assert_eq!(NodeKind::parse(""), None);
    }

    #[test]
    fn test_schema_node_kind() {
        let node = SchemaNode::Scalar(ScalarNode::Integer(IntegerNode::new()));
        assert_eq!(node.kind(), NodeKind::Integer);
        assert!(node.is_scalar());

        let node = SchemaNode::Reference(ReferenceNode::parse("a.b"));
        assert_eq!(node.kind(), NodeKind::Reference);
        assert!(node.is_reference());
    }

    #[test]
    fn test_schema_preserves_order() {
        let mut schema = Schema::new();
        schema.add_entry("zeta", SchemaNode::Object(ObjectNode::new()));
        schema.add_entry("alpha", SchemaNode::Object(ObjectNode::new()));
        let names: Vec<_> = schema.iter().map(|(name, _)| name.as_str()).collect();
        assert_eq!(names, ["zeta", "alpha"]);
        assert_eq!(schema.len(), 2);
    }

    #[test]
    fn test_reference_parse() {
        let reference = ReferenceNode::parse("sub_module.inner");
        assert_eq!(reference.path, ["sub_module", "inner"]);
        assert_eq!(reference.target(), "sub_module.inner");
    }

    #[test]
    fn test_primitive_integer_lookup() {
        assert_eq!(PrimitiveType::integer(true, 16), Some(PrimitiveType::Int16));
        assert_eq!(PrimitiveType::integer(false, 64), Some(PrimitiveType::Uint64));
        assert_eq!(PrimitiveType::integer(false, 12), None);
    }

    #[test]
    fn test_primitive_cpp_type() {
        assert_eq!(PrimitiveType::Uint8.cpp_type(), "uint8_t");
        assert_eq!(PrimitiveType::Int64.cpp_type(), "int64_t");
        assert_eq!(PrimitiveType::Double.cpp_type(), "double");
        assert_eq!(PrimitiveType::String.cpp_type(), "std::string");
    }

    #[test]
    fn test_primitive_integer_range() {
        assert_eq!(PrimitiveType::Int8.integer_range(), Some((-128, 127)));
        assert_eq!(PrimitiveType::Uint16.integer_range(), Some((0, 65535)));
        assert_eq!(PrimitiveType::Double.integer_range(), None);
        assert!(PrimitiveType::Uint32.is_integer());
        assert!(!PrimitiveType::Bool.is_integer());
    }
}
