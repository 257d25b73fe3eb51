//! Error types for code generation.

use thiserror::Error;

/// Error type for code generation operations.
///
/// Generation is all-or-nothing: any error discards the output produced so
/// far.
#[derive(Debug, Error)]
pub enum CodegenError {
    /// Structural schema error.
    #[error("schema error: {0}")]
    Schema(#[from] configen_schema::SchemaError),

    /// Bounds or default constraint violation.
    #[error("constraint error: {0}")]
    Constraint(#[from] configen_schema::ConstraintError),

    /// `$ref` that does not name an already generated object.
    #[error("unresolved reference '{target}' in '{path}'")]
    Reference {
        /// Path of the referencing member.
        path: String,
        /// Referenced path as written.
        target: String,
    },

    /// Two declarations share a name within one C++ scope: types, their
    /// helper functions, data members and the class's own members.
    #[error("name '{name}' declared twice in scope '{scope}'")]
    NameCollision {
        /// Qualified scope of the collision.
        scope: String,
        /// Colliding identifier.
        name: String,
    },

    /// Internal consistency failure.
    #[error("internal generator error: {message}")]
    Internal {
        /// Error message.
        message: String,
    },
}

impl CodegenError {
    /// Creates an internal error with the given message.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Creates an unresolved reference error.
    pub fn reference(path: impl Into<String>, target: impl Into<String>) -> Self {
        Self::Reference {
            path: path.into(),
            target: target.into(),
        }
    }
}
