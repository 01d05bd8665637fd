//! Extensions for `apollo-parser` executable documents: visitor pattern, name extraction,
//! definition iterators and fragment collection.
//!
//! **Note**: This crate is specifically tied to `apollo-parser`'s CST types. Only
//! executable definitions (operations and fragments) are walked; type-system
//! definitions that happen to appear in a query document are ignored.
//!
//! # Example
//!
//! ```
//! use graphql_apollo_ext::{CstVisitor, walk_document};
//! use apollo_parser::cst;
//!
//! struct FragmentCollector {
//!     fragments: Vec<String>,
//! }
//!
//! impl CstVisitor for FragmentCollector {
//!     fn visit_fragment_spread(&mut self, spread: &cst::FragmentSpread) {
//!         if let Some(name) = spread.fragment_name().and_then(|n| n.name()) {
//!             self.fragments.push(name.text().to_string());
//!         }
//!     }
//! }
//!
//! let source = "query { ...UserFields }";
//! let tree = apollo_parser::Parser::new(source).parse();
//! let mut collector = FragmentCollector { fragments: vec![] };
//! walk_document(&mut collector, &tree);
//! assert_eq!(collector.fragments, vec!["UserFields"]);
//! ```

mod collectors;
mod definitions;
mod names;
mod visitor;

pub use collectors::*;
pub use definitions::*;
pub use names::*;
pub use visitor::*;
