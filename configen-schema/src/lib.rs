//! # Configen Schema
//!
//! Configuration schema model and analysis.
//!
//! This crate provides:
//! - Parsing of JSON configuration schemas into a typed node tree
//! - Constraint checks on bounds and defaults
//! - Resolution of scalar nodes to target primitive types
//! - Identifier normalization

pub mod error;
pub mod naming;
pub mod parser;
pub mod resolver;
pub mod types;
pub mod validation;

pub use error::{ConstraintError, SchemaError};
pub use naming::normalize;
pub use parser::{parse_schema, parse_schema_str};
pub use resolver::{resolve_integer, resolve_scalar};
pub use types::{
    ArrayNode, BoolNode, IntegerNode, NodeKind, NumberNode, ObjectNode, PrimitiveType,
    ReferenceNode, ScalarNode, Schema, SchemaNode, StringNode,
};
pub use validation::validate_schema;
