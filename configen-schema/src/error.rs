//! Error types for schema parsing and constraint checking.

use thiserror::Error;

/// Error type for structural schema problems found while parsing.
///
/// Every variant carries the dotted path of the offending node, e.g.
/// `sub_module.values.items`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SchemaError {
    /// Schema text is not valid JSON.
    #[error("JSON parsing error: {message}")]
    Json {
        /// Parser message.
        message: String,
    },

    /// A node (or the schema root) is not a JSON object.
    #[error("node '{path}' must be a JSON object")]
    NotAnObject {
        /// Node path.
        path: String,
    },

    /// Node has neither `type` nor `$ref`.
    #[error("node '{path}' has neither 'type' nor '$ref'")]
    MissingType {
        /// Node path.
        path: String,
    },

    /// Node has both `type` and `$ref`.
    #[error("node '{path}' has both 'type' and '$ref'")]
    TypeAndReference {
        /// Node path.
        path: String,
    },

    /// Unrecognized `type` tag.
    #[error("unknown type '{type_name}' at '{path}'")]
    UnknownType {
        /// Node path.
        path: String,
        /// The unrecognized tag.
        type_name: String,
    },

    /// Object node without `properties`.
    #[error("object '{path}' has no 'properties'")]
    MissingProperties {
        /// Node path.
        path: String,
    },

    /// Array node without `items`.
    #[error("array '{path}' has no 'items'")]
    MissingItems {
        /// Node path.
        path: String,
    },

    /// Keyword present with a value of the wrong JSON type.
    #[error("invalid value for '{keyword}' at '{path}': expected {expected}")]
    InvalidKeyword {
        /// Node path.
        path: String,
        /// Keyword name.
        keyword: String,
        /// Human readable description of the accepted values.
        expected: String,
    },

    /// Member name that cannot become an identifier.
    #[error("invalid member name '{name}' at '{path}'")]
    InvalidName {
        /// Path of the containing node.
        path: String,
        /// The rejected name.
        name: String,
    },

    /// Two members of one object normalize to the same type name.
    #[error("members '{first}' and '{second}' at '{path}' both map to type '{type_name}'")]
    DuplicateMember {
        /// Path of the containing object.
        path: String,
        /// First member name.
        first: String,
        /// Second member name.
        second: String,
        /// Normalized type name shared by both.
        type_name: String,
    },

    /// `$ref` used directly at the schema root.
    #[error("top-level entry '{path}' cannot be a reference")]
    TopLevelReference {
        /// Node path.
        path: String,
    },
}

/// Error type for semantic constraint violations.
///
/// These are raised before any code is emitted so that generation never
/// produces a validator that rejects every value.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConstraintError {
    /// `minimum` greater than `maximum`.
    #[error("minimum {minimum} is greater than maximum {maximum} at '{path}'")]
    InvalidRange {
        /// Node path.
        path: String,
        /// Declared minimum.
        minimum: String,
        /// Declared maximum.
        maximum: String,
    },

    /// Default value outside the declared bounds.
    #[error("default {default} is outside [{minimum}, {maximum}] at '{path}'")]
    DefaultOutOfBounds {
        /// Node path.
        path: String,
        /// Declared default.
        default: String,
        /// Declared minimum or `-inf`.
        minimum: String,
        /// Declared maximum or `inf`.
        maximum: String,
    },

    /// `minItems` greater than `maxItems`.
    #[error("minItems {min_items} is greater than maxItems {max_items} at '{path}'")]
    InvalidItemRange {
        /// Node path.
        path: String,
        /// Declared minItems.
        min_items: u64,
        /// Declared maxItems.
        max_items: u64,
    },

    /// Integer bounds that no 64-bit integer type can hold.
    #[error("integer range [{minimum}, {maximum}] at '{path}' does not fit in 64 bits")]
    Unrepresentable {
        /// Node path.
        path: String,
        /// Declared minimum.
        minimum: i128,
        /// Declared maximum.
        maximum: i128,
    },
}

impl SchemaError {
    /// Creates an invalid keyword error.
    pub fn invalid_keyword(
        path: impl Into<String>,
        keyword: impl Into<String>,
        expected: impl Into<String>,
    ) -> Self {
        Self::InvalidKeyword {
            path: path.into(),
            keyword: keyword.into(),
            expected: expected.into(),
        }
    }

    /// Creates an invalid name error.
    pub fn invalid_name(path: impl Into<String>, name: impl Into<String>) -> Self {
        Self::InvalidName {
            path: path.into(),
            name: name.into(),
        }
    }

    /// Creates a not-an-object error.
    pub fn not_an_object(path: impl Into<String>) -> Self {
        Self::NotAnObject { path: path.into() }
    }

    /// Returns the path of the offending node, if the error has one.
    #[must_use]
    pub fn path(&self) -> Option<&str> {
        match self {
            Self::Json { .. } => None,
            Self::NotAnObject { path }
            | Self::MissingType { path }
            | Self::TypeAndReference { path }
            | Self::UnknownType { path, .. }
            | Self::MissingProperties { path }
            | Self::MissingItems { path }
            | Self::InvalidKeyword { path, .. }
            | Self::InvalidName { path, .. }
            | Self::DuplicateMember { path, .. }
            | Self::TopLevelReference { path } => Some(path),
        }
    }
}

impl From<serde_json::Error> for SchemaError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json {
            message: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_error_display() {
        let err = SchemaError::MissingItems {
            path: "cfg.values".to_string(),
        };
        assert_eq!(err.to_string(), "array 'cfg.values' has no 'items'");
        assert_eq!(err.path(), Some("cfg.values"));
    }

    #[test]
    fn test_json_error_has_no_path() {
        let err: SchemaError = serde_json::from_str::<serde_json::Value>("{")
            .map_err(SchemaError::from)
            .unwrap_err();
        assert!(matches!(err, SchemaError::Json { .. }));
        assert_eq!(err.path(), None);
    }

    #[test]
    fn test_constraint_error_display() {
        let err = ConstraintError::InvalidItemRange {
            path: "cfg.values".to_string(),
            min_items: 3,
            max_items: 1,
        };
        assert!(err.to_string().contains("minItems 3"));
    }
}
