use crate::{DiagnosticRule, ParsedQuery, RuleResult, SchemaIndex, ThresholdOverride, Variables};
use apollo_parser::cst;
use graphql_apollo_ext::{DocumentExt, NameExt};
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::Arc;

const DEFAULT_MAX_DEPTH: usize = 8;

/// Options for the `nestedQuery` rule
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct NestedQueryOptions {
    /// Depth at which the rule triggers. Defaults to 8.
    pub max_depth: usize,
}

impl Default for NestedQueryOptions {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl NestedQueryOptions {
    #[must_use]
    pub fn from_json(value: Option<&serde_json::Value>) -> Self {
        super::options_from_json("nestedQuery", value)
    }
}

/// Reports the deepest selection nesting across all operations.
///
/// The root selection set is depth 1. Each field selection set and each
/// inline fragment adds a level; a named fragment spread is inlined at the
/// depth where it appears. A fragment already being expanded on the current
/// path is not expanded again, so cyclic fragments terminate.
pub struct NestedQueryRule {
    max_depth: usize,
    max_depth_override: Option<ThresholdOverride>,
}

impl Default for NestedQueryRule {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_DEPTH)
    }
}

impl NestedQueryRule {
    #[must_use]
    pub const fn new(max_depth: usize) -> Self {
        Self {
            max_depth,
            max_depth_override: None,
        }
    }

    #[must_use]
    pub fn from_options(options: Option<&serde_json::Value>) -> Self {
        Self::new(NestedQueryOptions::from_json(options).max_depth)
    }

    /// Compute the effective maximum depth per request.
    #[must_use]
    pub fn with_max_depth_override<F>(mut self, f: F) -> Self
    where
        F: Fn(usize, &str, &Variables, Option<&SchemaIndex>) -> usize + Send + Sync + 'static,
    {
        self.max_depth_override = Some(Arc::new(f));
        self
    }

    #[must_use]
    pub const fn max_depth(&self) -> usize {
        self.max_depth
    }
}

type Fragments = HashMap<String, cst::FragmentDefinition>;

/// One selection set awaiting evaluation.
struct Frame {
    selections: std::vec::IntoIter<cst::Selection>,
    /// Deepest level reached below this set, relative to it
    best: usize,
    /// Levels this set adds when folded into its parent
    step: usize,
    /// Lowest path index of a fragment whose spread was cut inside this set
    min_cut: usize,
    /// Fragment expanded by this frame, popped from the path on completion
    fragment: Option<String>,
}

impl Frame {
    fn new(set: &cst::SelectionSet, step: usize, fragment: Option<String>) -> Self {
        Self {
            selections: set.selections().collect::<Vec<_>>().into_iter(),
            best: 0,
            step,
            min_cut: usize::MAX,
            fragment,
        }
    }
}

/// Depth computation over one document.
///
/// Runs on an explicit stack so fragment chains of any length are safe. A
/// fragment's relative depth is cached once it is known not to depend on the
/// fragments above it on the path.
struct DepthWalker<'a> {
    fragments: &'a Fragments,
    /// Fragments being expanded on the current path, with their path index
    path: HashMap<String, usize>,
    memo: HashMap<String, usize>,
}

impl<'a> DepthWalker<'a> {
    fn new(fragments: &'a Fragments) -> Self {
        Self {
            fragments,
            path: HashMap::new(),
            memo: HashMap::new(),
        }
    }

    /// Depth of an operation's root selection set, which is itself level 1.
    fn operation_depth(&mut self, root: &cst::SelectionSet) -> usize {
        let mut stack = vec![Frame::new(root, 1, None)];

        loop {
            let Some(frame) = stack.last_mut() else {
                return 0;
            };

            let Some(selection) = frame.selections.next() else {
                let Some(done) = stack.pop() else {
                    return 0;
                };
                let (value, min_cut) = self.finish(done);
                match stack.last_mut() {
                    Some(parent) => {
                        parent.best = parent.best.max(value);
                        parent.min_cut = parent.min_cut.min(min_cut);
                    }
                    None => return value,
                }
                continue;
            };

            match selection {
                cst::Selection::Field(field) => {
                    if let Some(nested) = field.selection_set() {
                        stack.push(Frame::new(&nested, 1, None));
                    }
                }
                cst::Selection::InlineFragment(inline) => {
                    if let Some(nested) = inline.selection_set() {
                        stack.push(Frame::new(&nested, 1, None));
                    }
                }
                cst::Selection::FragmentSpread(spread) => {
                    let Some(name) = spread.name_text() else {
                        continue;
                    };

                    if let Some(&index) = self.path.get(&name) {
                        tracing::trace!(fragment = %name, "Fragment already on path, not re-entering");
                        frame.min_cut = frame.min_cut.min(index);
                    } else if let Some(&depth) = self.memo.get(&name) {
                        frame.best = frame.best.max(depth);
                    } else if let Some(nested) =
                        self.fragments.get(&name).and_then(cst::FragmentDefinition::selection_set)
                    {
                        self.path.insert(name.clone(), self.path.len());
                        stack.push(Frame::new(&nested, 0, Some(name)));
                    } else {
                        tracing::warn!(fragment = %name, "Spread of unknown fragment");
                    }
                }
            }
        }
    }

    /// Close a frame, returning its contribution to the parent and its cut marker.
    fn finish(&mut self, frame: Frame) -> (usize, usize) {
        if let Some(name) = frame.fragment {
            if let Some(index) = self.path.remove(&name) {
                if frame.min_cut >= index {
                    self.memo.insert(name, frame.best);
                }
            }
        }
        (frame.best + frame.step, frame.min_cut)
    }
}

/// Maximum depth over every operation; 0 when the document has none.
fn max_query_depth(parsed: &ParsedQuery) -> usize {
    let fragments = parsed.fragments();
    let mut walker = DepthWalker::new(&fragments);

    parsed
        .tree()
        .operations()
        .filter_map(|op| op.selection_set())
        .map(|set| walker.operation_depth(&set))
        .max()
        .unwrap_or(0)
}

impl DiagnosticRule for NestedQueryRule {
    fn key(&self) -> &'static str {
        "nestedQuery"
    }

    fn description(&self) -> &'static str {
        "Reports queries whose selection nesting reaches the maximum depth"
    }

    fn analyze(
        &self,
        query: &str,
        variables: &Variables,
        schema: Option<&SchemaIndex>,
    ) -> RuleResult {
        let max_allowed = self
            .max_depth_override
            .as_ref()
            .map_or(self.max_depth, |f| f(self.max_depth, query, variables, schema));

        let parsed = match ParsedQuery::parse(query) {
            Ok(parsed) => parsed,
            Err(error) => {
                return RuleResult::new(self.key(), format!("Unable to analyze query depth: {error}"))
                    .with_detail("maxDepthReached", 0)
                    .with_detail("maxAllowed", max_allowed);
            }
        };

        let depth = max_query_depth(&parsed);
        let triggered = depth >= max_allowed;

        let message = if depth > max_allowed {
            format!("Query depth of {depth} exceeds the maximum allowed depth of {max_allowed}.")
        } else if triggered {
            format!("Query depth of {depth} reaches the maximum allowed depth of {max_allowed}.")
        } else {
            format!("Query depth of {depth} is within the maximum allowed depth of {max_allowed}.")
        };

        RuleResult::new(self.key(), message)
            .triggered(triggered)
            .with_detail("maxDepthReached", depth)
            .with_detail("maxAllowed", max_allowed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn depth_of(query: &str) -> serde_json::Value {
        NestedQueryRule::default()
            .analyze(query, &Variables::new(), None)
            .details["maxDepthReached"]
            .clone()
    }

    #[test]
    fn test_nested_fields() {
        assert_eq!(depth_of("query { a { b { c } } }"), json!(3));
    }

    #[test]
    fn test_flat_query_is_depth_one() {
        assert_eq!(depth_of("{ a b c }"), json!(1));
    }

    #[test]
    fn test_fragment_spread_adds_no_level() {
        assert_eq!(depth_of("query { a { ...F } } fragment F on T { b }"), json!(2));
    }

    #[test]
    fn test_inline_fragment_adds_level() {
        assert_eq!(depth_of("query { a { ... on T { b } } }"), json!(3));
    }

    #[test]
    fn test_mutually_recursive_fragments_terminate() {
        let query = r"
            query { ...A }
            fragment A on T { a { ...B } }
            fragment B on T { b { ...A } }
        ";
        // A is already on the path when b's selection set spreads it again
        assert_eq!(depth_of(query), json!(3));
    }

    #[test]
    fn test_fragment_reused_in_sibling_branches() {
        let query = r"
            query { x { ...F } y { z { ...F } } }
            fragment F on T { leaf { id } }
        ";
        assert_eq!(depth_of(query), json!(4));
    }

    #[test]
    fn test_unknown_fragment_contributes_current_depth() {
        assert_eq!(depth_of("query { a { ...Missing } }"), json!(2));
    }

    #[test]
    fn test_max_over_operations() {
        let query = "query A { a } query B { a { b { c { d } } } } query C { a { b } }";
        assert_eq!(depth_of(query), json!(4));
    }

    #[test]
    fn test_fragments_only_document_is_zero() {
        assert_eq!(depth_of("fragment F on T { a { b } }"), json!(0));
    }

    #[test]
    fn test_trigger_boundaries() {
        let rule = NestedQueryRule::new(3);
        let vars = Variables::new();

        let within = rule.analyze("{ a { b } }", &vars, None);
        assert!(!within.triggered);
        insta::assert_snapshot!(within.message, @"Query depth of 2 is within the maximum allowed depth of 3.");

        let reached = rule.analyze("{ a { b { c } } }", &vars, None);
        assert!(reached.triggered);
        insta::assert_snapshot!(reached.message, @"Query depth of 3 reaches the maximum allowed depth of 3.");

        let exceeded = rule.analyze("{ a { b { c { d } } } }", &vars, None);
        assert!(exceeded.triggered);
        insta::assert_snapshot!(exceeded.message, @"Query depth of 4 exceeds the maximum allowed depth of 3.");
        assert_eq!(exceeded.details["maxAllowed"], json!(3));
    }

    #[test]
    fn test_max_depth_override() {
        let rule = NestedQueryRule::default().with_max_depth_override(|default, _query, vars, _schema| {
            if vars.contains_key("strict") {
                2
            } else {
                default
            }
        });

        let strict = json!({ "strict": true }).as_object().cloned().unwrap();
        let result = rule.analyze("{ a { b } }", &strict, None);
        assert!(result.triggered);
        assert_eq!(result.details["maxAllowed"], json!(2));

        let result = rule.analyze("{ a { b } }", &Variables::new(), None);
        assert!(!result.triggered);
        assert_eq!(result.details["maxAllowed"], json!(8));
    }

    #[test]
    fn test_options_from_json() {
        assert_eq!(NestedQueryRule::from_options(Some(&json!({ "max_depth": 4 }))).max_depth(), 4);
        assert_eq!(NestedQueryRule::from_options(Some(&json!({}))).max_depth(), 8);
        assert_eq!(NestedQueryRule::from_options(None).max_depth(), 8);
    }

    fn fragment_chain(length: usize) -> String {
        let mut query = String::from("query { ...F0 }\n");
        for i in 0..length {
            query.push_str(&format!("fragment F{i} on T {{ ...F{} }}\n", i + 1));
        }
        query.push_str(&format!("fragment F{length} on T {{ a }}\n"));
        query
    }

    #[test]
    fn test_long_fragment_chain() {
        assert_eq!(depth_of(&fragment_chain(20_000)), json!(1));
    }

    #[test]
    fn test_long_fragment_chain_with_nesting() {
        let mut query = String::from("query { ...F0 }\n");
        for i in 0..5_000 {
            query.push_str(&format!("fragment F{i} on T {{ n {{ ...F{} }} }}\n", i + 1));
        }
        query.push_str("fragment F5000 on T { a }\n");
        assert_eq!(depth_of(&query), json!(5_001));
    }

    #[test]
    fn test_doubling_fragments_are_expanded_once() {
        let mut query = String::from("query { ...F0 }\n");
        for i in 0..64 {
            query.push_str(&format!("fragment F{i} on T {{ x {{ ...F{next} }} ...F{next} }}\n", next = i + 1));
        }
        query.push_str("fragment F64 on T { a }\n");
        // 2^64 paths reach F64; only a cached walk finishes
        assert_eq!(depth_of(&query), json!(65));
    }

    #[test]
    fn test_cut_fragment_is_not_cached_for_other_paths() {
        // B's depth under A is cut short by the A cycle; reached directly, B expands A fully
        let query = r"
            query { ...A ...B }
            fragment A on T { a { ...B } }
            fragment B on T { b { ...A } }
        ";
        assert_eq!(depth_of(query), json!(3));

        let query = r"
            query One { ...A }
            query Two { c { ...B } }
            fragment A on T { a { ...B } }
            fragment B on T { b { ...A } }
        ";
        assert_eq!(depth_of(query), json!(4));
    }

    #[test]
    fn test_syntax_error() {
        let result = NestedQueryRule::default().analyze("query { a { b }", &Variables::new(), None);
        assert!(!result.triggered);
        assert_eq!(result.details["maxDepthReached"], json!(0));
        assert!(result.message.contains("Syntax Error"));
    }
}
