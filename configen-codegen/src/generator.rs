//! Schema tree walker.

use crate::cpp::{
    ArrayBounds, ArrayEmitter, CLASS_MEMBER_NAMES, CppTarget, EmittedType, MemberFragment,
    ObjectEmitter, ReferenceEmitter, ReferenceTable, VariableEmitter, is_reserved_member_name,
    scope_names,
};
use crate::error::CodegenError;
use crate::fragment::{Bindings, ResolvedFragment};
use crate::namespace::{NamePath, QualifiedName};
use crate::options::GeneratorOptions;
use configen_schema::naming::is_valid_identifier;
use configen_schema::{
    ArrayNode, ObjectNode, ReferenceNode, ScalarNode, Schema, SchemaError, SchemaNode,
    resolve_scalar, validate_schema,
};
use indexmap::IndexMap;
use std::collections::HashSet;

/// Generated code of one top-level schema entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedUnit {
    /// Code bound to the target namespace.
    pub fragment: ResolvedFragment,
    /// Name of the emitted type.
    pub name: QualifiedName,
}

/// Identifiers declared in one C++ scope.
#[derive(Debug)]
struct TypeScope {
    label: String,
    names: HashSet<String>,
}

/// Mutable traversal state of one generation run.
#[derive(Debug)]
pub struct GenerationContext {
    path: NamePath,
    array_bounds: Vec<ArrayBounds>,
    references: ReferenceTable,
    scopes: Vec<TypeScope>,
}

impl GenerationContext {
    /// Creates the context for a fresh run, positioned at the schema root.
    #[must_use]
    pub fn new() -> Self {
        Self {
            path: NamePath::new(),
            array_bounds: Vec::new(),
            references: ReferenceTable::new(),
            scopes: vec![TypeScope {
                label: String::new(),
                names: HashSet::new(),
            }],
        }
    }

    /// Current position in the schema.
    #[must_use]
    pub fn path(&self) -> &NamePath {
        &self.path
    }

    /// Objects generated so far.
    #[must_use]
    pub fn references(&self) -> &ReferenceTable {
        &self.references
    }

    /// Records a type and its helpers in the innermost scope.
    fn declare_type(&mut self, name: &QualifiedName) -> Result<(), CodegenError> {
        for identifier in scope_names(&name.name) {
            self.declare(identifier)?;
        }
        Ok(())
    }

    /// Records a data member of the innermost class.
    fn declare_member(&mut self, raw_name: &str) -> Result<(), CodegenError> {
        self.declare(raw_name.to_string())
    }

    fn declare(&mut self, identifier: String) -> Result<(), CodegenError> {
        let scope = self
            .scopes
            .last_mut()
            .ok_or_else(|| CodegenError::internal("no open type scope"))?;
        if scope.names.contains(&identifier) {
            return Err(CodegenError::NameCollision {
                scope: scope.label.clone(),
                name: identifier,
            });
        }
        scope.names.insert(identifier);
        Ok(())
    }

    /// Opens the member scope of class `name`. The names of the class and
    /// its enclosing classes are taken, since out-of-line bodies qualify
    /// through them, as are the members every class declares.
    fn open_scope(&mut self, name: &QualifiedName) {
        let mut names: HashSet<String> =
            CLASS_MEMBER_NAMES.iter().map(|s| s.to_string()).collect();
        names.extend(name.scope.iter().cloned());
        names.insert(name.name.clone());
        self.scopes.push(TypeScope {
            label: name.type_path(),
            names,
        });
    }

    fn close_scope(&mut self) -> Result<(), CodegenError> {
        if self.scopes.len() < 2 {
            return Err(CodegenError::internal("type scope stack popped at root"));
        }
        self.scopes.pop();
        Ok(())
    }

    fn pop_array(&mut self) -> Result<ArrayBounds, CodegenError> {
        self.array_bounds
            .pop()
            .ok_or_else(|| CodegenError::internal("array stack popped while empty"))
    }

    /// Checks the terminal condition of a traversal.
    ///
    /// # Errors
    /// Returns `CodegenError::Internal` if any stack is left open.
    pub fn finish(&self) -> Result<(), CodegenError> {
        if !self.path.is_empty() {
            return Err(CodegenError::internal(format!(
                "namespace stack not empty after generation: {}",
                self.path.raw().join(".")
            )));
        }
        if !self.array_bounds.is_empty() {
            return Err(CodegenError::internal("array stack not empty after generation"));
        }
        if self.scopes.len() != 1 {
            return Err(CodegenError::internal("type scopes left open after generation"));
        }
        Ok(())
    }
}

impl Default for GenerationContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Depth-first code generator over a configuration schema.
pub struct Generator<'a> {
    schema: &'a Schema,
    target: CppTarget,
}

impl<'a> Generator<'a> {
    /// Creates a new generator for `schema`.
    #[must_use]
    pub fn new(schema: &'a Schema, options: &GeneratorOptions) -> Self {
        Self {
            schema,
            target: CppTarget::new(options),
        }
    }

    /// Generates every top-level entry, in declaration order.
    ///
    /// Bounds and defaults are checked before any code is emitted.
    ///
    /// # Errors
    /// Returns `CodegenError` on the first constraint, schema, reference or
    /// naming error; no partial output is returned.
    pub fn generate(&self) -> Result<IndexMap<String, GeneratedUnit>, CodegenError> {
        validate_schema(self.schema)?;

        let mut ctx = GenerationContext::new();
        let mut units = IndexMap::with_capacity(self.schema.len());
        for (name, node) in self.schema.iter() {
            if !is_valid_identifier(name) {
                return Err(SchemaError::invalid_name(name.as_str(), name.as_str()).into());
            }
            if node.is_reference() {
                return Err(SchemaError::TopLevelReference { path: name.clone() }.into());
            }
            let emitted = self.visit(&mut ctx, name, node)?;
            units.insert(
                name.clone(),
                GeneratedUnit {
                    fragment: emitted.fragment.bind(&Bindings::top_level()),
                    name: emitted.name,
                },
            );
        }
        ctx.finish()?;
        Ok(units)
    }

    fn visit(
        &self,
        ctx: &mut GenerationContext,
        name: &str,
        node: &SchemaNode,
    ) -> Result<EmittedType, CodegenError> {
        tracing::debug!(
            path = %ctx.path.member_path(name),
            depth = ctx.path.depth(),
            kind = node.kind().as_str(),
            "visiting schema node"
        );
        match node {
            SchemaNode::Scalar(scalar) => self.visit_scalar(ctx, name, scalar),
            SchemaNode::Object(object) => self.visit_object(ctx, name, object),
            SchemaNode::Array(array) => self.visit_array(ctx, name, array),
            SchemaNode::Reference(reference) => self.visit_reference(ctx, name, reference),
        }
    }

    fn visit_scalar(
        &self,
        ctx: &mut GenerationContext,
        name: &str,
        scalar: &ScalarNode,
    ) -> Result<EmittedType, CodegenError> {
        let qualified = ctx.path.qualify(name);
        ctx.declare_type(&qualified)?;
        let primitive = resolve_scalar(scalar);
        let fragment = VariableEmitter::new(&self.target).emit(&qualified.name, scalar, primitive);
        Ok(EmittedType {
            fragment,
            name: qualified,
        })
    }

    fn visit_object(
        &self,
        ctx: &mut GenerationContext,
        name: &str,
        object: &ObjectNode,
    ) -> Result<EmittedType, CodegenError> {
        let qualified = ctx.path.qualify(name);
        ctx.declare_type(&qualified)?;
        ctx.path.push(name);
        ctx.open_scope(&qualified);

        let mut members = Vec::with_capacity(object.properties.len());
        for (member, node) in &object.properties {
            if !is_valid_identifier(member) || is_reserved_member_name(member) {
                return Err(
                    SchemaError::invalid_name(ctx.path.member_path(member), member.as_str()).into(),
                );
            }
            let emitted = self.visit(ctx, member, node)?;
            ctx.declare_member(member)?;
            members.push(MemberFragment::new(member.as_str(), emitted));
        }

        ctx.close_scope()?;
        let raw_path = ctx.path.raw().join(".");
        ctx.path.pop()?;

        let fragment = ObjectEmitter::new(&self.target).emit(name, &qualified, &members);
        ctx.references.register(raw_path, qualified.clone());
        Ok(EmittedType {
            fragment,
            name: qualified,
        })
    }

    fn visit_array(
        &self,
        ctx: &mut GenerationContext,
        name: &str,
        array: &ArrayNode,
    ) -> Result<EmittedType, CodegenError> {
        let qualified = ctx.path.qualify(name);
        ctx.declare_type(&qualified)?;

        ctx.array_bounds.push(ArrayBounds::from(array));
        let item = self.visit(ctx, &format!("{name}_element"), &array.items)?;
        let bounds = ctx.pop_array()?;

        let fragment = ArrayEmitter::new(&self.target).emit(&qualified.name, item, bounds);
        Ok(EmittedType {
            fragment,
            name: qualified,
        })
    }

    fn visit_reference(
        &self,
        ctx: &mut GenerationContext,
        name: &str,
        reference: &ReferenceNode,
    ) -> Result<EmittedType, CodegenError> {
        let target = ctx
            .references
            .resolve(ctx.path.raw(), reference)
            .cloned()
            .ok_or_else(|| CodegenError::reference(ctx.path.member_path(name), reference.target()))?;
        tracing::trace!(
            path = %ctx.path.member_path(name),
            target = %target,
            "resolved reference"
        );
        Ok(ReferenceEmitter::new().emit(&target))
    }
}
