//! `@skip` / `@include` resolution against request variables.

use apollo_parser::cst;
use graphql_apollo_ext::NameExt;
use serde_json::Value;

/// Request variables, keyed by variable name without the `$`
pub type Variables = serde_json::Map<String, Value>;

/// Whether a selection carrying `directives` takes part in the query.
///
/// The selection is excluded when `@skip(if:)` resolves to `true` or
/// `@include(if:)` resolves to `false`. Scanning stops at the first
/// directive that excludes the selection.
#[must_use]
pub fn is_included(directives: Option<cst::Directives>, variables: &Variables) -> bool {
    let Some(directives) = directives else {
        return true;
    };

    for directive in directives.directives() {
        let excluded = match directive.name_text().as_deref() {
            Some("skip") => resolve_if(&directive, variables) == Some(true),
            Some("include") => resolve_if(&directive, variables) == Some(false),
            _ => false,
        };
        if excluded {
            return false;
        }
    }

    true
}

/// Resolve the `if` argument of a directive.
///
/// A variable absent from `variables` resolves to `true`. A variable that is
/// present is read by [`is_truthy`], so an explicit `null` resolves to `false`.
/// Returns `None` when the argument is missing or is a literal that is
/// neither a boolean nor a variable.
fn resolve_if(directive: &cst::Directive, variables: &Variables) -> Option<bool> {
    let value = directive
        .arguments()?
        .arguments()
        .find(|arg| arg.name_text().as_deref() == Some("if"))?
        .value()?;

    match value {
        cst::Value::BooleanValue(boolean) => Some(boolean.true_token().is_some()),
        cst::Value::Variable(var) => {
            let name = var.name_text()?;
            Some(variables.get(&name).is_none_or(is_truthy))
        }
        _ => None,
    }
}

/// Loose truthiness of a variable value.
///
/// `null`, `false`, `0`, `""`, `"0"`, `[]` and `{}` are false.
#[must_use]
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
        Value::String(s) => !(s.is_empty() || s == "0"),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
    }
}
