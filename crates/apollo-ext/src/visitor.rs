//! Visitor pattern for executable GraphQL CST traversal.
//!
//! This module provides a visitor trait that allows traversing operations and
//! fragment definitions with custom logic at each node type. Default
//! implementations do nothing, so you only need to override the methods you
//! care about.
//!
//! Fragment definitions are walked once, where they are defined. A fragment
//! spread is reported through [`CstVisitor::visit_fragment_spread`] but its
//! target is never re-entered, so cyclic fragments cannot loop the walker.
//!
//! # Example
//!
//! ```
//! use graphql_apollo_ext::{CstVisitor, walk_document};
//! use apollo_parser::cst;
//!
//! struct FieldCounter(usize);
//!
//! impl CstVisitor for FieldCounter {
//!     fn visit_field(&mut self, _field: &cst::Field) {
//!         self.0 += 1;
//!     }
//! }
//!
//! let source = "query { user { name email } }";
//! let tree = apollo_parser::Parser::new(source).parse();
//! let mut counter = FieldCounter(0);
//! walk_document(&mut counter, &tree);
//! assert_eq!(counter.0, 3); // user, name, email
//! ```

use apollo_parser::cst;

/// A visitor for traversing executable GraphQL CST nodes.
///
/// All methods have default empty implementations. Override only the methods
/// you need. The `walk_*` functions handle traversal; visitor methods are
/// called at each node.
///
/// Methods prefixed with `enter_` are called before visiting children,
/// and `exit_` methods are called after. `visit_field` is the enter hook for
/// fields and pairs with `exit_field`.
#[allow(unused_variables)]
pub trait CstVisitor {
    /// Called when entering an operation definition
    fn enter_operation(&mut self, op: &cst::OperationDefinition) {}

    /// Called when exiting an operation definition
    fn exit_operation(&mut self, op: &cst::OperationDefinition) {}

    /// Called when entering a fragment definition
    fn enter_fragment_definition(&mut self, frag: &cst::FragmentDefinition) {}

    /// Called when exiting a fragment definition
    fn exit_fragment_definition(&mut self, frag: &cst::FragmentDefinition) {}

    // =========================================================================
    // Selection set visitors
    // =========================================================================

    /// Called when entering a selection set
    fn enter_selection_set(&mut self, set: &cst::SelectionSet) {}

    /// Called when exiting a selection set
    fn exit_selection_set(&mut self, set: &cst::SelectionSet) {}

    /// Called when entering a field, before its sub-selections
    fn visit_field(&mut self, field: &cst::Field) {}

    /// Called when exiting a field, after its sub-selections
    fn exit_field(&mut self, field: &cst::Field) {}

    /// Called for each fragment spread (`...FragmentName`)
    fn visit_fragment_spread(&mut self, spread: &cst::FragmentSpread) {}

    /// Called when entering an inline fragment (... on Type { })
    fn enter_inline_fragment(&mut self, inline: &cst::InlineFragment) {}

    /// Called when exiting an inline fragment
    fn exit_inline_fragment(&mut self, inline: &cst::InlineFragment) {}
}

// =============================================================================
// Walk functions - these drive the traversal
// =============================================================================

/// Walk a parsed document with the given visitor.
///
/// This is the main entry point for traversing a GraphQL document.
pub fn walk_document<V: CstVisitor>(visitor: &mut V, tree: &apollo_parser::SyntaxTree) {
    for definition in tree.document().definitions() {
        walk_definition(visitor, &definition);
    }
}

/// Walk a single definition. Type-system definitions are skipped.
pub fn walk_definition<V: CstVisitor>(visitor: &mut V, def: &cst::Definition) {
    match def {
        cst::Definition::OperationDefinition(op) => walk_operation(visitor, op),
        cst::Definition::FragmentDefinition(frag) => walk_fragment_definition(visitor, frag),
        _ => {}
    }
}

/// Walk an operation definition.
pub fn walk_operation<V: CstVisitor>(visitor: &mut V, op: &cst::OperationDefinition) {
    visitor.enter_operation(op);

    if let Some(selection_set) = op.selection_set() {
        walk_selection_set(visitor, &selection_set);
    }

    visitor.exit_operation(op);
}

/// Walk a fragment definition.
pub fn walk_fragment_definition<V: CstVisitor>(visitor: &mut V, frag: &cst::FragmentDefinition) {
    visitor.enter_fragment_definition(frag);

    if let Some(selection_set) = frag.selection_set() {
        walk_selection_set(visitor, &selection_set);
    }

    visitor.exit_fragment_definition(frag);
}

/// Walk a selection set.
pub fn walk_selection_set<V: CstVisitor>(visitor: &mut V, set: &cst::SelectionSet) {
    visitor.enter_selection_set(set);

    for selection in set.selections() {
        match selection {
            cst::Selection::Field(field) => walk_field(visitor, &field),
            cst::Selection::FragmentSpread(spread) => walk_fragment_spread(visitor, &spread),
            cst::Selection::InlineFragment(inline) => walk_inline_fragment(visitor, &inline),
        }
    }

    visitor.exit_selection_set(set);
}

/// Walk a field selection.
pub fn walk_field<V: CstVisitor>(visitor: &mut V, field: &cst::Field) {
    visitor.visit_field(field);

    if let Some(selection_set) = field.selection_set() {
        walk_selection_set(visitor, &selection_set);
    }

    visitor.exit_field(field);
}

/// Walk a fragment spread. The spread target is not entered.
pub fn walk_fragment_spread<V: CstVisitor>(visitor: &mut V, spread: &cst::FragmentSpread) {
    visitor.visit_fragment_spread(spread);
}

/// Walk an inline fragment.
pub fn walk_inline_fragment<V: CstVisitor>(visitor: &mut V, inline: &cst::InlineFragment) {
    visitor.enter_inline_fragment(inline);

    if let Some(selection_set) = inline.selection_set() {
        walk_selection_set(visitor, &selection_set);
    }

    visitor.exit_inline_fragment(inline);
}
