//! Timing helpers for generation runs.

use configen_codegen::{CodegenError, GeneratorOptions, generate_from_json};
use std::time::{Duration, Instant};

/// Runs `iterations` full generations of `schema` and returns the elapsed
/// time.
///
/// # Errors
/// Returns the first `CodegenError` raised by a run.
pub fn time_generation(
    iterations: usize,
    schema: &str,
    options: &GeneratorOptions,
) -> Result<Duration, CodegenError> {
    let start = Instant::now();
    for _ in 0..iterations {
        let _ = generate_from_json(schema, options)?;
    }
    Ok(start.elapsed())
}

/// Total size in bytes of the header and source generated for `schema`.
///
/// # Errors
/// Returns `CodegenError` if generation fails.
pub fn output_size(schema: &str, options: &GeneratorOptions) -> Result<usize, CodegenError> {
    let code = generate_from_json(schema, options)?;
    Ok(code.declarations.len() + code.definitions.len())
}
