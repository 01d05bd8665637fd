//! Collection utilities for gathering data from executable GraphQL documents.
//!
//! # Example
//!
//! ```
//! use graphql_apollo_ext::collect_fragment_definitions;
//! use apollo_parser::Parser;
//!
//! let source = "query { ...UserFields } fragment UserFields on User { name }";
//! let tree = Parser::new(source).parse();
//!
//! let fragments = collect_fragment_definitions(&tree);
//! assert!(fragments.contains_key("UserFields"));
//! ```

use crate::{walk_document, CstVisitor, NameExt};
use apollo_parser::cst;
use apollo_parser::SyntaxTree;
use std::collections::HashMap;

// =============================================================================
// Fragment Collection
// =============================================================================

/// Collect fragment definitions keyed by name.
///
/// When a name is defined more than once, the first definition wins.
#[must_use]
pub fn collect_fragment_definitions(tree: &SyntaxTree) -> HashMap<String, cst::FragmentDefinition> {
    struct Collector(HashMap<String, cst::FragmentDefinition>);

    impl CstVisitor for Collector {
        fn enter_fragment_definition(&mut self, frag: &cst::FragmentDefinition) {
            if let Some(name) = frag.name_text() {
                self.0.entry(name).or_insert_with(|| frag.clone());
            }
        }
    }

    let mut collector = Collector(HashMap::new());
    walk_document(&mut collector, tree);
    collector.0
}
