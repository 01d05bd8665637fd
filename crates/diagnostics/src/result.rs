use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Value;

/// The outcome of one rule over one query.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RuleResult {
    pub key: String,
    pub triggered: bool,
    pub message: String,
    pub details: IndexMap<String, Value>,
}

impl RuleResult {
    /// A non-triggered result with no details
    pub fn new(key: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            triggered: false,
            message: message.into(),
            details: IndexMap::new(),
        }
    }

    #[must_use]
    pub const fn triggered(mut self, triggered: bool) -> Self {
        self.triggered = triggered;
        self
    }

    #[must_use]
    pub fn with_detail(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.details.insert(name.into(), value.into());
        self
    }

    #[must_use]
    pub fn detail(&self, name: &str) -> Option<&Value> {
        self.details.get(name)
    }
}

/// Results of every registered rule, keyed by rule key in registration order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct AnalysisReport {
    results: IndexMap<String, RuleResult>,
}

impl AnalysisReport {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a result under its own key. A later result for the same key
    /// replaces the earlier one.
    pub fn insert(&mut self, result: RuleResult) {
        self.results.insert(result.key.clone(), result);
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&RuleResult> {
        self.results.get(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = &RuleResult> {
        self.results.values()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.results.keys().map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.results.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// Results whose rule triggered
    pub fn triggered_rules(&self) -> impl Iterator<Item = &RuleResult> {
        self.iter().filter(|result| result.triggered)
    }

    #[must_use]
    pub fn any_triggered(&self) -> bool {
        self.triggered_rules().next().is_some()
    }
}

impl<'a> IntoIterator for &'a AnalysisReport {
    type Item = &'a RuleResult;
    type IntoIter = indexmap::map::Values<'a, String, RuleResult>;

    fn into_iter(self) -> Self::IntoIter {
        self.results.values()
    }
}
