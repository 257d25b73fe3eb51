//! # Configen Codegen
//!
//! C++ code generation from configuration schemas.
//!
//! This crate provides:
//! - A depth-first walker turning schema nodes into code fragments
//! - Fragments with typed scope holes, bound when composed into a parent
//! - Emitters for scalars, objects, arrays and references
//! - Assembly of header and source translation units

pub mod assembler;
pub mod cpp;
pub mod error;
pub mod fragment;
pub mod generator;
pub mod namespace;
pub mod options;

pub use assembler::{Assembler, GeneratedCode};
pub use error::CodegenError;
pub use fragment::{Bindings, CodeFragment, Hole, ResolvedFragment};
pub use generator::{GeneratedUnit, GenerationContext, Generator};
pub use namespace::{NamePath, QualifiedName};
pub use options::{GeneratorOptions, GeneratorOptionsBuilder};

use configen_schema::Schema;

/// Generates C++ code for a parsed schema.
///
/// # Arguments
/// * `schema` - Parsed configuration schema
/// * `options` - Namespace, file naming and include settings
///
/// # Returns
/// The header and source contents.
///
/// # Errors
/// Returns `CodegenError` if the schema violates a constraint, contains an
/// unresolved reference or yields colliding type names.
pub fn generate(schema: &Schema, options: &GeneratorOptions) -> Result<GeneratedCode, CodegenError> {
    let units = Generator::new(schema, options).generate()?;
    let code = Assembler::new(options).assemble(&units);
    tracing::info!(
        entries = units.len(),
        header = %options.header_file_name(),
        header_bytes = code.declarations.len(),
        source_bytes = code.definitions.len(),
        "generated configuration code"
    );
    Ok(code)
}

/// Generates C++ code from JSON schema text.
///
/// # Arguments
/// * `json` - Configuration schema as JSON text
/// * `options` - Namespace, file naming and include settings
///
/// # Returns
/// The header and source contents.
///
/// # Errors
/// Returns `CodegenError` if parsing or generation fails.
pub fn generate_from_json(json: &str, options: &GeneratorOptions) -> Result<GeneratedCode, CodegenError> {
    let schema = configen_schema::parse_schema_str(json)?;
    generate(&schema, options)
}
