//! Prelude module for convenient imports.
//!
//! This module re-exports the most commonly used types and functions.
//!
//! ```
//! use configen::prelude::*;
//! ```

// Schema types
pub use configen_schema::{
    ArrayNode, ConstraintError, IntegerNode, NodeKind, ObjectNode, PrimitiveType, ReferenceNode,
    ScalarNode, Schema, SchemaError, SchemaNode, parse_schema, parse_schema_str,
};

// Generation
pub use configen_codegen::{
    CodegenError, GeneratedCode, GeneratorOptions, GeneratorOptionsBuilder, generate,
    generate_from_json,
};
