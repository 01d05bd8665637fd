use crate::registry;
use crate::{AnalysisReport, DiagnosticRule, RuleResult, SchemaIndex, Variables};
use graphql_diagnostics_config::{ConfigError, DiagnosticsConfig};
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

/// Runs a fixed set of rules over a query and collects their results.
///
/// The engine holds no per-call state, so one instance can serve concurrent
/// callers on different threads.
#[derive(Clone)]
pub struct DiagnosticsEngine {
    rules: Vec<Arc<dyn DiagnosticRule>>,
}

impl std::fmt::Debug for DiagnosticsEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DiagnosticsEngine")
            .field("rules", &self.rule_keys())
            .finish()
    }
}

impl DiagnosticsEngine {
    #[must_use]
    pub fn new(rules: Vec<Arc<dyn DiagnosticRule>>) -> Self {
        Self { rules }
    }

    #[must_use]
    pub fn with_default_rules() -> Self {
        Self::new(registry::default_rules())
    }

    /// Build the rules enabled in `config`.
    pub fn from_config(config: &DiagnosticsConfig) -> Result<Self, ConfigError> {
        Ok(Self::new(registry::rules_from_config(config)?))
    }

    #[must_use]
    pub fn rules(&self) -> &[Arc<dyn DiagnosticRule>] {
        &self.rules
    }

    #[must_use]
    pub fn rule_keys(&self) -> Vec<&'static str> {
        self.rules.iter().map(|rule| rule.key()).collect()
    }

    /// Run every rule, in registration order.
    ///
    /// The report always has one entry per rule. A rule that panics is
    /// reported as a non-triggered entry naming the failure.
    #[tracing::instrument(skip_all, fields(query_len = query.len(), has_schema = schema.is_some()))]
    pub fn analyze_all(
        &self,
        query: &str,
        variables: &Variables,
        schema: Option<&SchemaIndex>,
    ) -> AnalysisReport {
        let mut report = AnalysisReport::new();

        for rule in &self.rules {
            let key = rule.key();
            let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
                rule.analyze(query, variables, schema)
            }));

            let result = match outcome {
                Ok(result) => {
                    tracing::debug!(rule = key, triggered = result.triggered, "Rule finished");
                    result
                }
                Err(payload) => {
                    let reason = panic_message(payload.as_ref());
                    tracing::error!(rule = key, %reason, "Rule panicked");
                    RuleResult::new(key, format!("Rule \"{key}\" failed: {reason}"))
                }
            };

            report.insert(result);
        }

        report
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}
