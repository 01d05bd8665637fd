//! Definition filtering utilities for executable GraphQL documents.
//!
//! # Example
//!
//! ```
//! use graphql_apollo_ext::DocumentExt;
//! use apollo_parser::Parser;
//!
//! let source = r"
//!     query GetUser { user { id } }
//!     mutation UpdateUser { updateUser { id } }
//!     fragment UserFields on User { name }
//! ";
//! let tree = Parser::new(source).parse();
//!
//! assert_eq!(tree.operations().count(), 2);
//! assert_eq!(tree.fragments().count(), 1);
//! ```

use apollo_parser::cst;
use apollo_parser::SyntaxTree;

/// Extension trait for convenient access to executable definitions.
pub trait DocumentExt {
    /// Iterate over all operation definitions in the document.
    fn operations(&self) -> impl Iterator<Item = cst::OperationDefinition>;

    /// Iterate over all fragment definitions in the document.
    fn fragments(&self) -> impl Iterator<Item = cst::FragmentDefinition>;
}

impl DocumentExt for SyntaxTree {
    fn operations(&self) -> impl Iterator<Item = cst::OperationDefinition> {
        self.document().definitions().filter_map(|def| {
            if let cst::Definition::OperationDefinition(op) = def {
                Some(op)
            } else {
                None
            }
        })
    }

    fn fragments(&self) -> impl Iterator<Item = cst::FragmentDefinition> {
        self.document().definitions().filter_map(|def| {
            if let cst::Definition::FragmentDefinition(frag) = def {
                Some(frag)
            } else {
                None
            }
        })
    }
}

/// The kind of GraphQL operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationKind {
    Query,
    Mutation,
    Subscription,
}

/// Get the operation kind of an operation definition.
///
/// The anonymous shorthand (`{ ... }`) has no operation type token and is a query.
#[must_use]
pub fn operation_kind(op: &cst::OperationDefinition) -> OperationKind {
    match op.operation_type() {
        Some(op_type) if op_type.mutation_token().is_some() => OperationKind::Mutation,
        Some(op_type) if op_type.subscription_token().is_some() => OperationKind::Subscription,
        _ => OperationKind::Query,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operation_kind() {
        let source = "{ a } query Q { a } mutation M { a } subscription S { a }";
        let tree = apollo_parser::Parser::new(source).parse();
        let kinds: Vec<_> = tree.operations().map(|op| operation_kind(&op)).collect();
        assert_eq!(
            kinds,
            vec![
                OperationKind::Query,
                OperationKind::Query,
                OperationKind::Mutation,
                OperationKind::Subscription,
            ]
        );
    }
}
