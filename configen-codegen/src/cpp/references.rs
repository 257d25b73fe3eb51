//! Reference resolution and emission.

use super::EmittedType;
use crate::fragment::CodeFragment;
use crate::namespace::QualifiedName;
use configen_schema::ReferenceNode;
use std::collections::HashMap;

/// Objects available as reference targets, keyed by dotted raw path.
///
/// An object is registered once its generation completes, so neither an
/// enclosing object nor a later sibling can be referenced.
#[derive(Debug, Clone, Default)]
pub struct ReferenceTable {
    objects: HashMap<String, QualifiedName>,
}

impl ReferenceTable {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a generated object under its dotted raw path.
    pub fn register(&mut self, raw_path: impl Into<String>, name: QualifiedName) {
        self.objects.insert(raw_path.into(), name);
    }

    /// Returns the number of registered objects.
    #[must_use]
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Returns true if no object has been registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Resolves `reference` as seen from the scope `enclosing`.
    ///
    /// The innermost enclosing scope is searched first, then each outer scope
    /// up to the root.
    #[must_use]
    pub fn resolve(
        &self,
        enclosing: &[String],
        reference: &ReferenceNode,
    ) -> Option<&QualifiedName> {
        let target = reference.target();
        (0..=enclosing.len()).rev().find_map(|depth| {
            let candidate = if depth == 0 {
                target.clone()
            } else {
                format!("{}.{target}", enclosing[..depth].join("."))
            };
            tracing::trace!(candidate = %candidate, "trying reference candidate");
            self.objects.get(&candidate)
        })
    }
}

/// Emitter for reference nodes.
///
/// A reference emits no code: the referencing member reuses the target's
/// type and helpers.
#[derive(Debug, Default)]
pub struct ReferenceEmitter;

impl ReferenceEmitter {
    /// Creates a new reference emitter.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Emits the empty fragment carrying the resolved target name.
    #[must_use]
    pub fn emit(&self, target: &QualifiedName) -> EmittedType {
        EmittedType {
            fragment: CodeFragment::new(),
            name: target.clone(),
        }
    }
}
