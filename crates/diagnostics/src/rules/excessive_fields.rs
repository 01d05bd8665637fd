use crate::type_info::{walk_document_with_type_info, TypeInfo, TypedVisitor};
use crate::{DiagnosticRule, ParsedQuery, RuleResult, SchemaIndex, ThresholdOverride, Variables};
use apollo_parser::cst;
use indexmap::IndexMap;
use serde::Deserialize;
use std::sync::Arc;

const DEFAULT_THRESHOLD: usize = 15;

/// Options for the `excessiveFieldsRule` rule
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ExcessiveFieldsOptions {
    /// Number of selected fields per type above which the rule triggers. Defaults to 15.
    pub threshold: usize,
}

impl Default for ExcessiveFieldsOptions {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
        }
    }
}

impl ExcessiveFieldsOptions {
    #[must_use]
    pub fn from_json(value: Option<&serde_json::Value>) -> Self {
        super::options_from_json("excessiveFieldsRule", value)
    }
}

/// Flags types that have too many of their fields selected.
///
/// Every field that resolves on its parent type counts once towards that
/// type, across the whole document. Fields that do not resolve (introspection
/// fields, unknown fields, fields under an unknown type) are not counted.
pub struct ExcessiveFieldsRule {
    threshold: usize,
    threshold_override: Option<ThresholdOverride>,
}

impl Default for ExcessiveFieldsRule {
    fn default() -> Self {
        Self::new(DEFAULT_THRESHOLD)
    }
}

impl ExcessiveFieldsRule {
    #[must_use]
    pub const fn new(threshold: usize) -> Self {
        Self {
            threshold,
            threshold_override: None,
        }
    }

    #[must_use]
    pub fn from_options(options: Option<&serde_json::Value>) -> Self {
        Self::new(ExcessiveFieldsOptions::from_json(options).threshold)
    }

    /// Compute the effective threshold per request.
    #[must_use]
    pub fn with_threshold_override<F>(mut self, f: F) -> Self
    where
        F: Fn(usize, &str, &Variables, Option<&SchemaIndex>) -> usize + Send + Sync + 'static,
    {
        self.threshold_override = Some(Arc::new(f));
        self
    }

    #[must_use]
    pub const fn threshold(&self) -> usize {
        self.threshold
    }
}

#[derive(Default)]
struct FieldCounter {
    counts: IndexMap<String, usize>,
}

impl TypedVisitor for FieldCounter {
    fn visit_field(&mut self, _field: &cst::Field, info: &TypeInfo<'_>) {
        let (Some(parent), Some(_)) = (info.parent_type(), info.field_def()) else {
            return;
        };
        *self.counts.entry(parent.name.clone()).or_default() += 1;
    }
}

impl DiagnosticRule for ExcessiveFieldsRule {
    fn key(&self) -> &'static str {
        "excessiveFieldsRule"
    }

    fn description(&self) -> &'static str {
        "Reports types with more selected fields than the threshold"
    }

    fn analyze(
        &self,
        query: &str,
        variables: &Variables,
        schema: Option<&SchemaIndex>,
    ) -> RuleResult {
        let threshold = self
            .threshold_override
            .as_ref()
            .map_or(self.threshold, |f| f(self.threshold, query, variables, schema));

        let parsed = match ParsedQuery::parse(query) {
            Ok(parsed) => parsed,
            Err(error) => {
                return RuleResult::new(self.key(), format!("Unable to count selected fields: {error}"))
                    .with_detail("threshold", threshold);
            }
        };

        let Some(schema) = schema else {
            return RuleResult::new(
                self.key(),
                "No schema provided; selected fields cannot be attributed to types.",
            )
            .with_detail("threshold", threshold);
        };

        let mut counter = FieldCounter::default();
        walk_document_with_type_info(&mut counter, parsed.tree(), schema);

        let excessive: Vec<(&String, usize)> = counter
            .counts
            .iter()
            .filter(|(_, count)| **count > threshold)
            .map(|(name, count)| (name, *count))
            .collect();

        let message = if excessive.is_empty() {
            format!("No type selects more than {threshold} fields.")
        } else {
            excessive
                .iter()
                .map(|(name, count)| {
                    format!(
                        "Type \"{name}\" selects {count} fields, exceeding the threshold of {threshold}."
                    )
                })
                .collect::<Vec<_>>()
                .join(" ")
        };

        tracing::debug!(types = counter.counts.len(), excessive = excessive.len(), "Fields counted");

        let excessive_types: Vec<serde_json::Value> = excessive
            .iter()
            .map(|(name, _)| serde_json::Value::from(name.as_str()))
            .collect();
        let field_counts: serde_json::Map<String, serde_json::Value> = counter
            .counts
            .iter()
            .map(|(name, count)| (name.clone(), serde_json::Value::from(*count)))
            .collect();

        RuleResult::new(self.key(), message)
            .triggered(!excessive_types.is_empty())
            .with_detail("threshold", threshold)
            .with_detail("fieldCounts", field_counts)
            .with_detail("excessiveTypes", excessive_types)
    }
}
