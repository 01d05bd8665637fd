//! End-to-end tests for `DiagnosticsEngine` against the blog schema fixture.

use graphql_diagnostics::prelude::*;
use graphql_test_utils::{
    format_outcomes, post_query_with_fields, BLOG_SCHEMA, FEED_QUERY, MALFORMED_QUERY,
    PAGINATED_POSTS, RECURSIVE_FRAGMENTS, UNPAGINATED_POSTS,
};
use serde_json::json;
use std::sync::Arc;

fn schema() -> SchemaIndex {
    SchemaIndex::from_sdl(BLOG_SCHEMA, "blog.graphql").expect("blog schema is valid")
}

fn vars(value: serde_json::Value) -> Variables {
    value.as_object().cloned().unwrap_or_default()
}

fn outcomes(report: &AnalysisReport) -> String {
    let outcomes: Vec<_> = report
        .iter()
        .map(|r| (r.key.as_str(), r.triggered, r.message.as_str()))
        .collect();
    format_outcomes(&outcomes)
}

#[test]
fn report_has_one_entry_per_rule_in_order() {
    let schema = schema();
    let report = DiagnosticsEngine::with_default_rules().analyze_all(
        "query { a b c }",
        &Variables::new(),
        Some(&schema),
    );

    assert_eq!(
        report.keys().collect::<Vec<_>>(),
        vec!["complexity", "nestedQuery", "excessiveFieldsRule", "unfilteredLists"]
    );
    assert_eq!(report.get("complexity").unwrap().details["value"], json!(3));
}

#[test]
fn flat_query_complexity_equals_field_count() {
    let rule = ComplexityRule::new();
    for count in 1..30 {
        let fields: Vec<String> = (0..count).map(|i| format!("f{i}")).collect();
        let query = format!("{{ {} }}", fields.join(" "));
        let result = rule.analyze(&query, &Variables::new(), None);
        assert_eq!(result.details["value"], json!(count), "query: {query}");
    }
}

#[test]
fn skipped_field_not_counted() {
    let result = ComplexityRule::new().analyze("query { a @skip(if: true) b }", &Variables::new(), None);
    assert_eq!(result.details["value"], json!(1));
}

#[test]
fn nesting_depth_examples() {
    let rule = NestedQueryRule::default();
    let depth = |query: &str| rule.analyze(query, &Variables::new(), None).details["maxDepthReached"].clone();

    assert_eq!(depth("query { a { b { c } } }"), json!(3));
    assert_eq!(depth("query { a { ...F } } fragment F on T { b }"), json!(2));
}

#[test]
fn recursive_fragments_terminate() {
    let schema = schema();
    let report = DiagnosticsEngine::with_default_rules().analyze_all(
        RECURSIVE_FRAGMENTS,
        &Variables::new(),
        Some(&schema),
    );

    let nested = report.get("nestedQuery").unwrap();
    assert_eq!(nested.details["maxDepthReached"], json!(2));
    assert!(!nested.triggered);
    assert_eq!(report.get("complexity").unwrap().details["value"], json!(4));
}

#[test]
fn wide_post_selection_triggers_excessive_fields() {
    let schema = schema();
    let result = ExcessiveFieldsRule::default().analyze(
        &post_query_with_fields(20),
        &Variables::new(),
        Some(&schema),
    );

    assert!(result.triggered);
    assert!(result.message.contains("Post"));
    assert!(result.message.contains("20"));
    assert!(result.message.contains("15"));
    insta::assert_snapshot!(
        result.message,
        @r#"Type "Post" selects 20 fields, exceeding the threshold of 15."#
    );
}

#[test]
fn fifteen_post_fields_is_within_threshold() {
    let schema = schema();
    let result = ExcessiveFieldsRule::default().analyze(
        &post_query_with_fields(15),
        &Variables::new(),
        Some(&schema),
    );
    assert!(!result.triggered);
}

#[test]
fn unpaginated_posts_are_reported() {
    let schema = schema();
    let rule = UnfilteredListsRule::default();

    let result = rule.analyze(UNPAGINATED_POSTS, &Variables::new(), Some(&schema));
    assert!(result.triggered);
    assert_eq!(result.details["unfilteredFields"], json!(["posts"]));

    let result = rule.analyze(PAGINATED_POSTS, &Variables::new(), Some(&schema));
    assert!(!result.triggered);
}

#[test]
fn feed_query_report() {
    let schema = schema();
    let report = DiagnosticsEngine::with_default_rules().analyze_all(
        FEED_QUERY,
        &vars(json!({ "withComments": true, "skipAuthor": false })),
        Some(&schema),
    );

    insta::assert_snapshot!(outcomes(&report), @r"
    - complexity: Query complexity is 22 (moderate complexity).
    - nestedQuery: Query depth of 5 is within the maximum allowed depth of 8.
    - excessiveFieldsRule: No type selects more than 15 fields.
    ! unfilteredLists: List fields queried without pagination: followers, comments. Consider adding pagination arguments (first, last, after, before, offset, limit).
    ");

    assert_eq!(
        report.get("excessiveFieldsRule").unwrap().details["fieldCounts"],
        json!({ "Query": 2, "PostConnection": 2, "Post": 6, "User": 4, "Comment": 3, "PageInfo": 2 })
    );
}

#[test]
fn directive_variables_change_complexity() {
    let engine = DiagnosticsEngine::with_default_rules();
    let complexity = |variables: &Variables| {
        engine.analyze_all(FEED_QUERY, variables, None).get("complexity").unwrap().details["value"].clone()
    };

    assert_eq!(complexity(&vars(json!({ "withComments": false, "skipAuthor": false }))), json!(21));
    // An absent variable resolves to true, so `@skip(if: $skipAuthor)` excludes
    assert_eq!(complexity(&Variables::new()), json!(21));
}

#[test]
fn missing_schema_degrades_schema_rules() {
    let report = DiagnosticsEngine::with_default_rules().analyze_all(
        UNPAGINATED_POSTS,
        &Variables::new(),
        None,
    );

    for key in ["excessiveFieldsRule", "unfilteredLists"] {
        let result = report.get(key).unwrap();
        assert!(!result.triggered);
        assert!(result.message.contains("No schema provided"), "{key}: {}", result.message);
    }
    assert_eq!(report.get("complexity").unwrap().details["value"], json!(3));
}

#[test]
fn malformed_query_never_triggers() {
    let schema = schema();
    let report = DiagnosticsEngine::with_default_rules().analyze_all(
        MALFORMED_QUERY,
        &Variables::new(),
        Some(&schema),
    );

    assert_eq!(report.len(), 4);
    for result in &report {
        assert!(!result.triggered, "{} triggered", result.key);
        assert!(result.message.contains("Syntax Error"), "{}: {}", result.key, result.message);
    }
    assert_eq!(report.get("nestedQuery").unwrap().details["maxDepthReached"], json!(0));
    assert!(report.get("complexity").unwrap().details["value"].is_null());
}

#[test]
fn analysis_is_idempotent() {
    let schema = schema();
    let engine = DiagnosticsEngine::with_default_rules();
    let variables = vars(json!({ "withComments": true }));

    let first = engine.analyze_all(FEED_QUERY, &variables, Some(&schema));
    let second = engine.analyze_all(FEED_QUERY, &variables, Some(&schema));
    assert_eq!(first, second);
}

#[test]
fn long_fragment_chain_yields_complete_report() {
    let mut query = String::from(r#"query { post(id: "1") { comments(first: 1) { ...C0 } } }"#);
    for i in 0..20_000 {
        query.push_str(&format!("\nfragment C{i} on Comment {{ ...C{} }}", i + 1));
    }
    query.push_str("\nfragment C20000 on Comment { body }");

    let schema = schema();
    let report = DiagnosticsEngine::with_default_rules().analyze_all(&query, &Variables::new(), Some(&schema));

    assert_eq!(report.len(), 4);
    let depth = report.get("nestedQuery").unwrap();
    assert_eq!(depth.details["maxDepthReached"], json!(3));
    assert!(!depth.triggered);
}

#[test]
fn engine_is_shareable_across_threads() {
    let schema = Arc::new(schema());
    let engine = Arc::new(DiagnosticsEngine::with_default_rules());
    let expected = engine.analyze_all(FEED_QUERY, &Variables::new(), Some(schema.as_ref()));

    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let schema = Arc::clone(&schema);
                let engine = Arc::clone(&engine);
                scope.spawn(move || {
                    engine.analyze_all(FEED_QUERY, &Variables::new(), Some(schema.as_ref()))
                })
            })
            .collect();

        for handle in handles {
            assert_eq!(handle.join().unwrap(), expected);
        }
    });
}

#[test]
fn report_serializes_keyed_by_rule() {
    let report = DiagnosticsEngine::with_default_rules().analyze_all("{ a { b } }", &Variables::new(), None);
    let json = serde_json::to_value(&report).unwrap();

    assert_eq!(json["nestedQuery"]["details"]["maxDepthReached"], json!(2));
    assert_eq!(json["complexity"]["triggered"], json!(false));
}

#[test]
fn engine_from_config_uses_options() {
    let config: graphql_diagnostics::DiagnosticsConfig = serde_json::from_str(
        r#"{ "rules": { "complexity": ["on", { "max_complexity": 2 }], "unfilteredLists": "off" } }"#,
    )
    .unwrap();
    let engine = DiagnosticsEngine::from_config(&config).unwrap();
    let report = engine.analyze_all("{ a b c }", &Variables::new(), None);

    assert_eq!(report.len(), 3);
    assert!(report.get("complexity").unwrap().triggered);
    assert!(report.get("unfilteredLists").is_none());
}
