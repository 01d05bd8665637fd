//! Snapshot formatting helpers for diagnostic outcomes
//!
//! Outcomes are formatted one per line so insta snapshots stay readable.

/// Format `(key, triggered, message)` outcomes for snapshot testing.
///
/// # Example
///
/// ```ignore
/// use graphql_test_utils::assertions::format_outcomes;
///
/// let outcomes: Vec<_> = report
///     .iter()
///     .map(|r| (r.key.as_str(), r.triggered, r.message.as_str()))
///     .collect();
/// insta::assert_snapshot!(format_outcomes(&outcomes));
/// ```
pub fn format_outcomes<K: AsRef<str>, M: AsRef<str>>(outcomes: &[(K, bool, M)]) -> String {
    if outcomes.is_empty() {
        return String::from("(no diagnostics)");
    }

    outcomes
        .iter()
        .map(|(key, triggered, message)| {
            let marker = if *triggered { "!" } else { "-" };
            format!("{marker} {}: {}", key.as_ref(), message.as_ref())
        })
        .collect::<Vec<_>>()
        .join("\n")
}
