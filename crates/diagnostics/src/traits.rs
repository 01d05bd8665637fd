use crate::{RuleResult, SchemaIndex, Variables};
use std::sync::Arc;

/// A static query diagnostic.
///
/// Rules are stateless apart from their construction-time configuration and
/// must be safe to share between threads. `analyze` never fails: parse errors
/// and a missing schema are reported as a non-triggered [`RuleResult`].
pub trait DiagnosticRule: Send + Sync {
    /// Stable key used in the analysis report
    fn key(&self) -> &'static str;

    /// Human-readable description of what the rule checks
    fn description(&self) -> &'static str;

    fn analyze(&self, query: &str, variables: &Variables, schema: Option<&SchemaIndex>)
        -> RuleResult;
}

/// Computes the effective value of a threshold for one request.
///
/// Called with `(default, query, variables, schema)`; returns the value the
/// rule should use.
pub type ThresholdOverride =
    Arc<dyn Fn(usize, &str, &Variables, Option<&SchemaIndex>) -> usize + Send + Sync>;
