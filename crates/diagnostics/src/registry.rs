//! Registry of the available diagnostic rules.
//!
//! Rules are built on request; callers own the returned instances and hand
//! them to a [`DiagnosticsEngine`](crate::DiagnosticsEngine).

use crate::rules::{ComplexityRule, ExcessiveFieldsRule, NestedQueryRule, UnfilteredListsRule};
use crate::traits::DiagnosticRule;
use graphql_diagnostics_config::{ConfigError, DiagnosticsConfig};
use std::sync::Arc;

/// Rule keys in report order
const RULE_KEYS: [&str; 4] = [
    "complexity",
    "nestedQuery",
    "excessiveFieldsRule",
    "unfilteredLists",
];

#[must_use]
pub fn all_rule_keys() -> Vec<&'static str> {
    RULE_KEYS.to_vec()
}

/// Every rule with its default configuration
#[must_use]
pub fn default_rules() -> Vec<Arc<dyn DiagnosticRule>> {
    vec![
        Arc::new(ComplexityRule::new()),
        Arc::new(NestedQueryRule::default()),
        Arc::new(ExcessiveFieldsRule::default()),
        Arc::new(UnfilteredListsRule::default()),
    ]
}

/// The rules `config` enables, built with their configured options.
///
/// Fails when the config names a rule that does not exist.
pub fn rules_from_config(
    config: &DiagnosticsConfig,
) -> Result<Vec<Arc<dyn DiagnosticRule>>, ConfigError> {
    config.validate_rule_names(&RULE_KEYS)?;

    let configured: [Arc<dyn DiagnosticRule>; 4] = [
        Arc::new(ComplexityRule::from_options(config.options("complexity"))),
        Arc::new(NestedQueryRule::from_options(config.options("nestedQuery"))),
        Arc::new(ExcessiveFieldsRule::from_options(config.options("excessiveFieldsRule"))),
        Arc::new(UnfilteredListsRule::from_options(config.options("unfilteredLists"))),
    ];

    let rules = configured
        .into_iter()
        .filter(|rule| {
            let enabled = config.is_enabled(rule.key());
            if !enabled {
                tracing::debug!(rule = rule.key(), "Rule disabled by config");
            }
            enabled
        })
        .collect();

    Ok(rules)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys(rules: &[Arc<dyn DiagnosticRule>]) -> Vec<&'static str> {
        rules.iter().map(|rule| rule.key()).collect()
    }

    #[test]
    fn test_default_rules_match_keys() {
        assert_eq!(keys(&default_rules()), all_rule_keys());
    }

    #[test]
    fn test_rules_from_empty_config() {
        let rules = rules_from_config(&DiagnosticsConfig::default()).unwrap();
        assert_eq!(keys(&rules), all_rule_keys());
    }

    #[test]
    fn test_rules_from_config_skips_disabled() {
        let config: DiagnosticsConfig = serde_json::from_str(
            r#"{ "rules": { "complexity": "off", "unfilteredLists": false } }"#,
        )
        .unwrap();
        let rules = rules_from_config(&config).unwrap();
        assert_eq!(keys(&rules), vec!["nestedQuery", "excessiveFieldsRule"]);
    }

    #[test]
    fn test_rules_from_config_applies_options() {
        let config: DiagnosticsConfig = serde_json::from_str(
            r#"{ "rules": { "nestedQuery": ["on", { "max_depth": 2 }] } }"#,
        )
        .unwrap();
        let rules = rules_from_config(&config).unwrap();
        let nested = rules.iter().find(|rule| rule.key() == "nestedQuery").unwrap();

        let result = nested.analyze("{ a { b } }", &crate::Variables::new(), None);
        assert!(result.triggered);
    }

    #[test]
    fn test_rules_from_config_rejects_unknown_rule() {
        let config: DiagnosticsConfig =
            serde_json::from_str(r#"{ "rules": { "complexityy": "on" } }"#).unwrap();
        let Err(err) = rules_from_config(&config) else {
            panic!("unknown rule should be rejected");
        };
        assert!(err.to_string().contains("did you mean 'complexity'?"));
    }
}
