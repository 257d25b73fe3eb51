//! Namespace tracking and qualified names.

use crate::error::CodegenError;
use configen_schema::normalize;

/// Stack of enclosing object names from the schema root to the current node.
///
/// Raw schema names are kept alongside their normalized type names: the raw
/// form keys reference lookup, the normalized form is emitted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NamePath {
    raw: Vec<String>,
    normalized: Vec<String>,
}

impl NamePath {
    /// Creates an empty path.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Enters an object scope.
    pub fn push(&mut self, name: &str) {
        self.raw.push(name.to_string());
        self.normalized.push(normalize(name));
    }

    /// Leaves the innermost object scope.
    ///
    /// # Errors
    /// Returns `CodegenError::Internal` if the path is already empty.
    pub fn pop(&mut self) -> Result<String, CodegenError> {
        self.normalized.pop();
        self.raw
            .pop()
            .ok_or_else(|| CodegenError::internal("namespace stack popped while empty"))
    }

    /// Returns the normalized identifiers of the enclosing scopes.
    #[must_use]
    pub fn qualified_name(&self) -> &[String] {
        &self.normalized
    }

    /// Returns the raw schema names of the enclosing scopes.
    #[must_use]
    pub fn raw(&self) -> &[String] {
        &self.raw
    }

    /// Returns the nesting depth.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.raw.len()
    }

    /// Returns true at the schema root.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    /// Dotted raw path of `name` inside the current scope.
    #[must_use]
    pub fn member_path(&self, name: &str) -> String {
        let mut path = self.raw.join(".");
        if !path.is_empty() {
            path.push('.');
        }
        path.push_str(name);
        path
    }

    /// Qualified name of a type called `name` declared in the current scope.
    #[must_use]
    pub fn qualify(&self, name: &str) -> QualifiedName {
        QualifiedName::new(self.normalized.clone(), normalize(name))
    }
}

/// Fully qualified name of an emitted type.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QualifiedName {
    /// Normalized names of the enclosing classes.
    pub scope: Vec<String>,
    /// Normalized type name.
    pub name: String,
}

impl QualifiedName {
    /// Creates a qualified name.
    #[must_use]
    pub fn new(scope: Vec<String>, name: impl Into<String>) -> Self {
        Self {
            scope,
            name: name.into(),
        }
    }

    /// Scope prefix including the trailing separator, e.g. `SubModule::`.
    #[must_use]
    pub fn scope_prefix(&self) -> String {
        self.scope.iter().map(|s| format!("{s}::")).collect()
    }

    /// Type path relative to the target namespace, e.g. `SubModule::Inner`.
    #[must_use]
    pub fn type_path(&self) -> String {
        format!("{}{}", self.scope_prefix(), self.name)
    }

    /// Type path from the global namespace, e.g. `::cfg::SubModule::Inner`.
    #[must_use]
    pub fn absolute(&self, namespace: &[String]) -> String {
        let mut path = String::new();
        for segment in namespace {
            path.push_str("::");
            path.push_str(segment);
        }
        path.push_str("::");
        path.push_str(&self.type_path());
        path
    }

    /// Qualified helper function name, e.g. `SubModule::InitInner`.
    #[must_use]
    pub fn function(&self, verb: &str) -> String {
        format!("{}{verb}{}", self.scope_prefix(), self.name)
    }

    /// Qualified `<Type>ToJson` helper name.
    #[must_use]
    pub fn to_json_function(&self) -> String {
        format!("{}{}ToJson", self.scope_prefix(), self.name)
    }
}

impl std::fmt::Display for QualifiedName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.type_path())
    }
}
