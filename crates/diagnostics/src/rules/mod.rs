//! Diagnostic rule implementations
//!
//! Each rule lives in its own file and implements [`DiagnosticRule`](crate::DiagnosticRule).
//! Rules that attribute fields to schema types walk the document with
//! [`walk_document_with_type_info`](crate::walk_document_with_type_info).

use serde::de::DeserializeOwned;

mod complexity;
mod excessive_fields;
mod nested_query;
mod unfiltered_lists;

pub use complexity::{ComplexityOptions, ComplexityRule};
pub use excessive_fields::{ExcessiveFieldsOptions, ExcessiveFieldsRule};
pub use nested_query::{NestedQueryOptions, NestedQueryRule};
pub use unfiltered_lists::{UnfilteredListsOptions, UnfilteredListsRule};

/// Deserialize rule options from a config value, falling back to defaults
/// when they are absent or malformed.
fn options_from_json<T: DeserializeOwned + Default>(rule: &str, value: Option<&serde_json::Value>) -> T {
    let Some(value) = value else {
        return T::default();
    };

    serde_json::from_value(value.clone()).unwrap_or_else(|error| {
        tracing::warn!(rule, %error, "Ignoring malformed rule options");
        T::default()
    })
}
