//! Static performance diagnostics for GraphQL queries.
//!
//! Each rule takes a raw query string, the request variables and an optional
//! schema, and reports a [`RuleResult`]. Rules never fail: syntax errors,
//! a missing schema and unresolvable fields all degrade to a non-triggered
//! result with an explanatory message.
//!
//! ```
//! use graphql_diagnostics::{DiagnosticsEngine, Variables};
//!
//! let engine = DiagnosticsEngine::with_default_rules();
//! let report = engine.analyze_all("query { a { b { c } } }", &Variables::new(), None);
//!
//! assert_eq!(report.len(), 4);
//! assert_eq!(report.get("complexity").unwrap().details["value"], 3);
//! assert_eq!(report.get("nestedQuery").unwrap().details["maxDepthReached"], 3);
//! ```

mod directives;
mod document;
mod engine;
pub mod registry;
mod result;
pub mod rules;
mod schema;
mod traits;
mod type_info;

pub use directives::{is_included, is_truthy, Variables};
pub use document::{ParsedQuery, SyntaxError};
pub use engine::DiagnosticsEngine;
pub use graphql_diagnostics_config::{ConfigError, DiagnosticsConfig};
pub use result::{AnalysisReport, RuleResult};
pub use schema::{FieldDef, SchemaError, SchemaIndex, TypeDef, TypeKind};
pub use traits::{DiagnosticRule, ThresholdOverride};
pub use type_info::{walk_document_with_type_info, TypeInfo, TypedVisitor};

/// Prelude module for convenient imports.
///
/// ```rust,ignore
/// use graphql_diagnostics::prelude::*;
/// ```
pub mod prelude {
    pub use crate::engine::DiagnosticsEngine;
    pub use crate::result::{AnalysisReport, RuleResult};
    pub use crate::rules::{ComplexityRule, ExcessiveFieldsRule, NestedQueryRule, UnfilteredListsRule};
    pub use crate::schema::SchemaIndex;
    pub use crate::traits::DiagnosticRule;
    pub use crate::Variables;
}
