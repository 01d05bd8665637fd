use crate::{ConfigError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Configuration for a single diagnostics rule
///
/// Supports multiple formats:
/// ```yaml
/// # Simple toggle
/// rule_key: off
/// rule_key: true
///
/// # Object style with options
/// rule_key:
///   enabled: true
///   options:
///     max_depth: 10
///
/// # ESLint-style array: [toggle, options]
/// rule_key: [on, { max_depth: 10 }]
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum RuleConfig {
    /// Just an on/off toggle (simple case)
    Enabled(bool),

    /// Detailed config with options
    Detailed {
        enabled: bool,
        #[serde(skip_serializing_if = "Option::is_none")]
        options: Option<serde_json::Value>,
    },
}

impl RuleConfig {
    /// Whether the rule should run
    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        match self {
            Self::Enabled(enabled) | Self::Detailed { enabled, .. } => *enabled,
        }
    }

    /// Get the options for this rule configuration (if any)
    #[must_use]
    pub const fn options(&self) -> Option<&serde_json::Value> {
        match self {
            Self::Enabled(_) => None,
            Self::Detailed { options, .. } => options.as_ref(),
        }
    }
}

/// An on/off value written as a boolean or as `"on"`/`"off"`.
struct Toggle(bool);

impl<'de> Deserialize<'de> for Toggle {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        use serde::de::{self, Visitor};

        struct ToggleVisitor;

        impl Visitor<'_> for ToggleVisitor {
            type Value = Toggle;

            fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
                formatter.write_str("a boolean or one of 'on', 'off'")
            }

            fn visit_bool<E>(self, value: bool) -> std::result::Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(Toggle(value))
            }

            fn visit_str<E>(self, value: &str) -> std::result::Result<Self::Value, E>
            where
                E: de::Error,
            {
                parse_toggle(value).map(Toggle)
            }
        }

        deserializer.deserialize_any(ToggleVisitor)
    }
}

fn parse_toggle<E: serde::de::Error>(value: &str) -> std::result::Result<bool, E> {
    match value {
        "on" | "true" => Ok(true),
        "off" | "false" => Ok(false),
        _ => Err(E::custom(format!("unknown rule toggle: {value}"))),
    }
}

/// Custom deserializer for `RuleConfig` to handle the toggle, array and object syntaxes
impl<'de> Deserialize<'de> for RuleConfig {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        use serde::de::{self, MapAccess, SeqAccess, Visitor};

        struct RuleConfigVisitor;

        impl<'de> Visitor<'de> for RuleConfigVisitor {
            type Value = RuleConfig;

            fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
                formatter.write_str(
                    "a toggle (true, false, 'on', 'off'), \
                     an array [toggle, options], \
                     or an object { enabled, options }",
                )
            }

            fn visit_bool<E>(self, value: bool) -> std::result::Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(RuleConfig::Enabled(value))
            }

            fn visit_str<E>(self, value: &str) -> std::result::Result<Self::Value, E>
            where
                E: de::Error,
            {
                parse_toggle(value).map(RuleConfig::Enabled)
            }

            fn visit_seq<A>(self, mut seq: A) -> std::result::Result<Self::Value, A::Error>
            where
                A: SeqAccess<'de>,
            {
                // ESLint-style: [toggle, options]
                let Toggle(enabled) = seq
                    .next_element()?
                    .ok_or_else(|| de::Error::invalid_length(0, &"array with a toggle"))?;

                let options: Option<serde_json::Value> = seq.next_element()?;

                Ok(RuleConfig::Detailed { enabled, options })
            }

            fn visit_map<A>(self, map: A) -> std::result::Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                // Object style: { enabled, options }
                #[derive(Deserialize)]
                #[serde(deny_unknown_fields)]
                struct DetailedConfig {
                    #[serde(default = "enabled_by_default")]
                    enabled: bool,
                    #[serde(default)]
                    options: Option<serde_json::Value>,
                }

                let config =
                    DetailedConfig::deserialize(de::value::MapAccessDeserializer::new(map))?;
                Ok(RuleConfig::Detailed {
                    enabled: config.enabled,
                    options: config.options,
                })
            }
        }

        deserializer.deserialize_any(RuleConfigVisitor)
    }
}

const fn enabled_by_default() -> bool {
    true
}

/// Top-level diagnostics configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DiagnosticsConfig {
    /// Rule configurations keyed by rule key (e.g. `nestedQuery`)
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub rules: HashMap<String, RuleConfig>,
}

impl DiagnosticsConfig {
    /// Get the configuration for a rule, if the file mentions it
    #[must_use]
    pub fn rule(&self, key: &str) -> Option<&RuleConfig> {
        self.rules.get(key)
    }

    /// Rules not mentioned in the config are enabled
    #[must_use]
    pub fn is_enabled(&self, key: &str) -> bool {
        self.rule(key).is_none_or(RuleConfig::is_enabled)
    }

    /// Get the raw options for a rule
    #[must_use]
    pub fn options(&self, key: &str) -> Option<&serde_json::Value> {
        self.rule(key).and_then(RuleConfig::options)
    }

    /// Set a single option for a rule, keeping its enablement and other options.
    ///
    /// Used to layer command-line overrides on top of a loaded file.
    pub fn set_option(&mut self, key: &str, option: &str, value: serde_json::Value) {
        let entry = self
            .rules
            .entry(key.to_string())
            .or_insert(RuleConfig::Enabled(true));

        let (enabled, mut options) = match entry {
            RuleConfig::Enabled(enabled) => (*enabled, serde_json::Map::new()),
            RuleConfig::Detailed { enabled, options } => (
                *enabled,
                options
                    .as_ref()
                    .and_then(serde_json::Value::as_object)
                    .cloned()
                    .unwrap_or_default(),
            ),
        };
        options.insert(option.to_string(), value);

        *entry = RuleConfig::Detailed {
            enabled,
            options: Some(serde_json::Value::Object(options)),
        };
    }

    /// Reject rule keys that no registered rule answers to.
    ///
    /// The error suggests the closest known key when one is similar enough.
    pub fn validate_rule_names(&self, known: &[&str]) -> Result<()> {
        let mut names: Vec<&String> = self.rules.keys().collect();
        names.sort();

        for name in names {
            if known.contains(&name.as_str()) {
                continue;
            }

            let hint = known
                .iter()
                .map(|candidate| (candidate, strsim::jaro_winkler(name, candidate)))
                .filter(|(_, score)| *score > 0.8)
                .max_by(|a, b| a.1.total_cmp(&b.1))
                .map(|(candidate, _)| format!(", did you mean '{candidate}'?"))
                .unwrap_or_default();

            return Err(ConfigError::UnknownRule {
                name: name.clone(),
                hint,
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const KNOWN: &[&str] = &[
        "complexity",
        "nestedQuery",
        "excessiveFieldsRule",
        "unfilteredLists",
    ];

    #[test]
    fn test_rule_config_toggle_forms() {
        let config: DiagnosticsConfig = serde_json::from_str(
            r#"{ "rules": { "complexity": "off", "nestedQuery": true, "unfilteredLists": false } }"#,
        )
        .unwrap();

        assert!(!config.is_enabled("complexity"));
        assert!(config.is_enabled("nestedQuery"));
        assert!(!config.is_enabled("unfilteredLists"));
        assert!(config.is_enabled("excessiveFieldsRule"));
    }

    #[test]
    fn test_rule_config_array_form() {
        let config: DiagnosticsConfig =
            serde_json::from_str(r#"{ "rules": { "nestedQuery": ["on", { "max_depth": 4 }] } }"#)
                .unwrap();

        assert!(config.is_enabled("nestedQuery"));
        assert_eq!(
            config.options("nestedQuery"),
            Some(&serde_json::json!({ "max_depth": 4 }))
        );
    }

    #[test]
    fn test_rule_config_object_form_defaults_enabled() {
        let config: DiagnosticsConfig = serde_json::from_str(
            r#"{ "rules": { "excessiveFieldsRule": { "options": { "threshold": 3 } } } }"#,
        )
        .unwrap();

        assert!(config.is_enabled("excessiveFieldsRule"));
        assert_eq!(
            config.options("excessiveFieldsRule"),
            Some(&serde_json::json!({ "threshold": 3 }))
        );
    }

    #[test]
    fn test_rule_config_rejects_unknown_toggle() {
        let result: std::result::Result<DiagnosticsConfig, _> =
            serde_json::from_str(r#"{ "rules": { "complexity": "maybe" } }"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_set_option_preserves_existing_options() {
        let mut config: DiagnosticsConfig = serde_json::from_str(
            r#"{ "rules": { "unfilteredLists": { "enabled": false, "options": { "pagination_arguments": ["first"] } } } }"#,
        )
        .unwrap();

        config.set_option("unfilteredLists", "extra", serde_json::json!(1));
        config.set_option("nestedQuery", "max_depth", serde_json::json!(3));

        assert!(!config.is_enabled("unfilteredLists"));
        assert_eq!(
            config.options("unfilteredLists"),
            Some(&serde_json::json!({ "pagination_arguments": ["first"], "extra": 1 }))
        );
        assert_eq!(
            config.options("nestedQuery"),
            Some(&serde_json::json!({ "max_depth": 3 }))
        );
    }

    #[test]
    fn test_validate_rule_names_suggests_closest() {
        let config: DiagnosticsConfig =
            serde_json::from_str(r#"{ "rules": { "nestedQueries": "on" } }"#).unwrap();

        let err = config.validate_rule_names(KNOWN).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Unknown rule 'nestedQueries', did you mean 'nestedQuery'?"
        );
    }

    #[test]
    fn test_validate_rule_names_accepts_known() {
        let config: DiagnosticsConfig =
            serde_json::from_str(r#"{ "rules": { "complexity": "on" } }"#).unwrap();
        assert!(config.validate_rule_names(KNOWN).is_ok());
    }
}
