//! Schema type tracking during document traversal.
//!
//! [`TypeInfo`] follows the walker's enter/exit events and keeps a stack of
//! the types in scope, so that at every field it can answer "which type owns
//! this field" and "what is this field's definition". Fragment definitions
//! are typed by their type condition where they are defined.

use crate::schema::{FieldDef, SchemaIndex, TypeDef};
use apollo_parser::cst;
use apollo_parser::SyntaxTree;
use graphql_apollo_ext::{operation_kind, walk_document, CstVisitor, NameExt, TypeConditionExt};

/// Types in scope at the current traversal position.
pub struct TypeInfo<'s> {
    schema: &'s SchemaIndex,
    type_stack: Vec<Option<&'s TypeDef>>,
    parent_type_stack: Vec<Option<&'s TypeDef>>,
    field_def_stack: Vec<Option<&'s FieldDef>>,
}

impl<'s> TypeInfo<'s> {
    #[must_use]
    pub const fn new(schema: &'s SchemaIndex) -> Self {
        Self {
            schema,
            type_stack: Vec::new(),
            parent_type_stack: Vec::new(),
            field_def_stack: Vec::new(),
        }
    }

    #[must_use]
    pub const fn schema(&self) -> &'s SchemaIndex {
        self.schema
    }

    /// The type of the innermost operation, fragment, field or inline fragment
    #[must_use]
    pub fn current_type(&self) -> Option<&'s TypeDef> {
        self.type_stack.last().copied().flatten()
    }

    /// The composite type owning the selection set being walked
    #[must_use]
    pub fn parent_type(&self) -> Option<&'s TypeDef> {
        self.parent_type_stack.last().copied().flatten()
    }

    /// Definition of the field being visited, if it resolves on the parent type
    #[must_use]
    pub fn field_def(&self) -> Option<&'s FieldDef> {
        self.field_def_stack.last().copied().flatten()
    }

    fn named(&self, name: Option<String>) -> Option<&'s TypeDef> {
        name.and_then(|name| self.schema.type_def(&name))
    }

    fn enter_operation(&mut self, op: &cst::OperationDefinition) {
        let root = self.schema.root_type(operation_kind(op));
        self.type_stack.push(root);
    }

    fn enter_fragment_definition(&mut self, frag: &cst::FragmentDefinition) {
        let ty = self.named(frag.type_condition_text());
        self.type_stack.push(ty);
    }

    fn enter_inline_fragment(&mut self, inline: &cst::InlineFragment) {
        let ty = match inline.type_condition_text() {
            Some(name) => self.schema.type_def(&name),
            None => self.current_type(),
        };
        self.type_stack.push(ty);
    }

    fn enter_selection_set(&mut self) {
        let parent = self.current_type().filter(|ty| ty.kind.is_composite());
        self.parent_type_stack.push(parent);
    }

    fn enter_field(&mut self, field: &cst::Field) {
        let field_def = self
            .parent_type()
            .zip(field.name_text())
            .and_then(|(parent, name)| parent.field(&name));
        let ty = field_def.and_then(|def| self.schema.type_def(&def.type_name));
        self.field_def_stack.push(field_def);
        self.type_stack.push(ty);
    }

    fn exit_field(&mut self) {
        self.field_def_stack.pop();
        self.type_stack.pop();
    }

    fn pop_type(&mut self) {
        self.type_stack.pop();
    }

    fn exit_selection_set(&mut self) {
        self.parent_type_stack.pop();
    }
}

/// A visitor that sees each field together with its type context.
#[allow(unused_variables)]
pub trait TypedVisitor {
    /// Called when entering a field; `info` already reflects this field
    fn visit_field(&mut self, field: &cst::Field, info: &TypeInfo<'_>) {}

    /// Called when exiting a field, before its type is popped
    fn exit_field(&mut self, field: &cst::Field, info: &TypeInfo<'_>) {}
}

struct TypedWalker<'v, 's, V> {
    info: TypeInfo<'s>,
    visitor: &'v mut V,
}

impl<V: TypedVisitor> CstVisitor for TypedWalker<'_, '_, V> {
    fn enter_operation(&mut self, op: &cst::OperationDefinition) {
        self.info.enter_operation(op);
    }

    fn exit_operation(&mut self, _op: &cst::OperationDefinition) {
        self.info.pop_type();
    }

    fn enter_fragment_definition(&mut self, frag: &cst::FragmentDefinition) {
        self.info.enter_fragment_definition(frag);
    }

    fn exit_fragment_definition(&mut self, _frag: &cst::FragmentDefinition) {
        self.info.pop_type();
    }

    fn enter_selection_set(&mut self, _set: &cst::SelectionSet) {
        self.info.enter_selection_set();
    }

    fn exit_selection_set(&mut self, _set: &cst::SelectionSet) {
        self.info.exit_selection_set();
    }

    fn visit_field(&mut self, field: &cst::Field) {
        self.info.enter_field(field);
        self.visitor.visit_field(field, &self.info);
    }

    fn exit_field(&mut self, field: &cst::Field) {
        self.visitor.exit_field(field, &self.info);
        self.info.exit_field();
    }

    fn enter_inline_fragment(&mut self, inline: &cst::InlineFragment) {
        self.info.enter_inline_fragment(inline);
    }

    fn exit_inline_fragment(&mut self, _inline: &cst::InlineFragment) {
        self.info.pop_type();
    }
}

/// Walk every operation and fragment definition in `tree`, reporting fields
/// to `visitor` with their type context.
pub fn walk_document_with_type_info<V: TypedVisitor>(
    visitor: &mut V,
    tree: &SyntaxTree,
    schema: &SchemaIndex,
) {
    let mut walker = TypedWalker {
        info: TypeInfo::new(schema),
        visitor,
    };
    walk_document(&mut walker, tree);
}
