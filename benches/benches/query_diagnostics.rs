use criterion::{criterion_group, criterion_main, BatchSize, Criterion};
use graphql_diagnostics::prelude::*;
use graphql_test_utils::{post_query_with_fields, BLOG_SCHEMA, FEED_QUERY, RECURSIVE_FRAGMENTS};
use std::hint::black_box;

/// A query nested `depth` levels through `Comment.replies`
fn deep_query(depth: usize) -> String {
    let open = "replies { ".repeat(depth);
    let close = "} ".repeat(depth);
    format!("query {{ post(id: \"1\") {{ comments(first: 5) {{ {open}body {close}}} }} }}")
}

fn blog_schema() -> SchemaIndex {
    SchemaIndex::from_sdl(BLOG_SCHEMA, "blog.graphql").expect("blog schema is valid")
}

fn bench_schema_index(c: &mut Criterion) {
    c.bench_function("schema_index_from_sdl", |b| {
        b.iter(|| black_box(SchemaIndex::from_sdl(black_box(BLOG_SCHEMA), "blog.graphql")));
    });
}

fn bench_analyze_all_feed(c: &mut Criterion) {
    let schema = blog_schema();
    let engine = DiagnosticsEngine::with_default_rules();
    let variables = serde_json::json!({ "withComments": true })
        .as_object()
        .cloned()
        .unwrap_or_default();

    c.bench_function("analyze_all_feed_query", |b| {
        b.iter(|| black_box(engine.analyze_all(black_box(FEED_QUERY), &variables, Some(&schema))));
    });
}

fn bench_analyze_all_without_schema(c: &mut Criterion) {
    let engine = DiagnosticsEngine::with_default_rules();
    let variables = Variables::new();

    c.bench_function("analyze_all_without_schema", |b| {
        b.iter(|| black_box(engine.analyze_all(black_box(FEED_QUERY), &variables, None)));
    });
}

fn bench_nested_depth(c: &mut Criterion) {
    let rule = NestedQueryRule::default();
    let variables = Variables::new();
    let mut group = c.benchmark_group("nested_query_depth");

    for depth in [4, 16, 64] {
        let query = deep_query(depth);
        group.bench_function(depth.to_string(), |b| {
            b.iter(|| black_box(rule.analyze(black_box(&query), &variables, None)));
        });
    }

    group.bench_function("recursive_fragments", |b| {
        b.iter(|| black_box(rule.analyze(black_box(RECURSIVE_FRAGMENTS), &variables, None)));
    });
    group.finish();
}

fn bench_excessive_fields(c: &mut Criterion) {
    let schema = blog_schema();
    let rule = ExcessiveFieldsRule::default();
    let variables = Variables::new();

    c.bench_function("excessive_fields_wide_selection", |b| {
        b.iter_batched(
            || post_query_with_fields(20),
            |query| black_box(rule.analyze(&query, &variables, Some(&schema))),
            BatchSize::SmallInput,
        );
    });
}

criterion_group!(
    benches,
    bench_schema_index,
    bench_analyze_all_feed,
    bench_analyze_all_without_schema,
    bench_nested_depth,
    bench_excessive_fields,
);
criterion_main!(benches);
