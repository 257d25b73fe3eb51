//! # Configen
//!
//! Generate typed C++ configuration classes from JSON schemas.
//!
//! A schema describes a tree of booleans, bounded integers, numbers,
//! strings, nested objects, arrays and references to previously declared
//! objects. For every type in the tree the generated code provides default
//! initialization, validation, JSON conversion and, for objects, string
//! round trips with equality.
//!
//! ## Features
//!
//! - **Narrowest integer types** - Widths and signedness follow the declared bounds
//! - **Nested scopes** - Objects become nested classes with qualified helpers
//! - **References** - Reuse an object type elsewhere without duplicating code
//! - **Deterministic output** - Identical input yields byte-identical files
//!
//! ## Quick Start
//!
//! ```
//! use configen::prelude::*;
//!
//! let schema = r#"{
//!     "server": {
//!         "type": "object",
//!         "properties": {
//!             "port": {"type": "integer", "minimum": 1, "maximum": 65535, "default": 8080},
//!             "host": {"type": "string", "default": "localhost"}
//!         }
//!     }
//! }"#;
//!
//! let options = GeneratorOptions::builder()
//!     .namespace(["app"])
//!     .base_name("server_config")
//!     .build();
//! let code = generate_from_json(schema, &options)?;
//! assert!(code.declarations.contains("class Server {"));
//! assert!(code.definitions.contains("#include \"server_config.h\""));
//! # Ok::<(), CodegenError>(())
//! ```
//!
//! ## Crate Organization
//!
//! - [`schema`] - Schema model, parsing, constraint checks and type resolution
//! - [`codegen`] - Tree walker, code fragments, C++ emitters and file assembly

pub mod prelude;

/// Schema model, parsing and analysis.
pub mod schema {
    pub use configen_schema::*;
}

/// C++ code generation from schemas.
pub mod codegen {
    pub use configen_codegen::*;
}

// Re-export commonly used items at the crate root
pub use configen_codegen::{
    CodegenError, GeneratedCode, GeneratorOptions, generate, generate_from_json,
};
pub use configen_schema::{Schema, SchemaError, parse_schema, parse_schema_str};
