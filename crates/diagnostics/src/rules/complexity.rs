use crate::directives::is_included;
use crate::{DiagnosticRule, ParsedQuery, RuleResult, SchemaIndex, Variables};
use apollo_parser::cst;
use graphql_apollo_ext::{walk_document, CstVisitor};
use serde::Deserialize;

/// Options for the `complexity` rule
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ComplexityOptions {
    /// Complexity above which the rule triggers. Unset means report only.
    pub max_complexity: Option<usize>,
}

impl ComplexityOptions {
    #[must_use]
    pub fn from_json(value: Option<&serde_json::Value>) -> Self {
        super::options_from_json("complexity", value)
    }
}

/// Counts one point per field, fragment spread and inline fragment.
///
/// Selections excluded by `@skip`/`@include` are not counted. Fragment
/// bodies are counted once, where they are defined.
#[derive(Debug, Clone, Default)]
pub struct ComplexityRule {
    max_complexity: Option<usize>,
}

impl ComplexityRule {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn with_max_complexity(mut self, max: usize) -> Self {
        self.max_complexity = Some(max);
        self
    }

    #[must_use]
    pub fn from_options(options: Option<&serde_json::Value>) -> Self {
        let opts = ComplexityOptions::from_json(options);
        Self {
            max_complexity: opts.max_complexity,
        }
    }
}

fn complexity_note(value: usize) -> &'static str {
    match value {
        0..=20 => "low complexity",
        21..=50 => "moderate complexity",
        51..=100 => "high complexity, consider optimizing",
        _ => "very high complexity, optimization recommended",
    }
}

struct ComplexityCounter<'a> {
    variables: &'a Variables,
    count: usize,
}

impl ComplexityCounter<'_> {
    fn count_if_included(&mut self, directives: Option<cst::Directives>) {
        if is_included(directives, self.variables) {
            self.count += 1;
        }
    }
}

impl CstVisitor for ComplexityCounter<'_> {
    fn visit_field(&mut self, field: &cst::Field) {
        self.count_if_included(field.directives());
    }

    fn visit_fragment_spread(&mut self, spread: &cst::FragmentSpread) {
        self.count_if_included(spread.directives());
    }

    fn enter_inline_fragment(&mut self, inline: &cst::InlineFragment) {
        self.count_if_included(inline.directives());
    }
}

impl DiagnosticRule for ComplexityRule {
    fn key(&self) -> &'static str {
        "complexity"
    }

    fn description(&self) -> &'static str {
        "Counts fields, fragment spreads and inline fragments selected by the query"
    }

    fn analyze(
        &self,
        query: &str,
        variables: &Variables,
        _schema: Option<&SchemaIndex>,
    ) -> RuleResult {
        let mut result = match ParsedQuery::parse(query) {
            Ok(parsed) => {
                let mut counter = ComplexityCounter {
                    variables,
                    count: 0,
                };
                walk_document(&mut counter, parsed.tree());

                let value = counter.count;
                let note = complexity_note(value);
                let triggered = self.max_complexity.is_some_and(|max| value > max);

                RuleResult::new(self.key(), format!("Query complexity is {value} ({note})."))
                    .triggered(triggered)
                    .with_detail("value", value)
                    .with_detail("note", note)
            }
            Err(error) => {
                RuleResult::new(self.key(), format!("Unable to compute query complexity: {error}"))
                    .with_detail("value", serde_json::Value::Null)
            }
        };

        if let Some(max) = self.max_complexity {
            result = result.with_detail("maxComplexity", max);
        }
        result
    }
}
