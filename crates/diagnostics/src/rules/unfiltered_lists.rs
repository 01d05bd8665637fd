use crate::schema::TypeKind;
use crate::type_info::{walk_document_with_type_info, TypeInfo, TypedVisitor};
use crate::{DiagnosticRule, ParsedQuery, RuleResult, SchemaIndex, Variables};
use apollo_parser::cst;
use graphql_apollo_ext::{argument_names, NameExt};
use indexmap::IndexSet;
use serde::Deserialize;

/// Options for the `unfilteredLists` rule
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UnfilteredListsOptions {
    /// Argument names that bound a list result
    pub pagination_arguments: Vec<String>,
}

impl Default for UnfilteredListsOptions {
    fn default() -> Self {
        Self {
            pagination_arguments: ["first", "last", "after", "before", "offset", "limit"]
                .into_iter()
                .map(String::from)
                .collect(),
        }
    }
}

impl UnfilteredListsOptions {
    #[must_use]
    pub fn from_json(value: Option<&serde_json::Value>) -> Self {
        super::options_from_json("unfilteredLists", value)
    }
}

/// Flags paginable fields queried without any pagination argument.
///
/// A field is paginable when its schema definition declares at least one
/// pagination argument. Only fields on object types are checked.
#[derive(Debug, Clone)]
pub struct UnfilteredListsRule {
    pagination_arguments: IndexSet<String>,
}

impl Default for UnfilteredListsRule {
    fn default() -> Self {
        Self::new(UnfilteredListsOptions::default().pagination_arguments)
    }
}

impl UnfilteredListsRule {
    pub fn new<I, S>(pagination_arguments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            pagination_arguments: pagination_arguments.into_iter().map(Into::into).collect(),
        }
    }

    #[must_use]
    pub fn from_options(options: Option<&serde_json::Value>) -> Self {
        Self::new(UnfilteredListsOptions::from_json(options).pagination_arguments)
    }

    pub fn pagination_arguments(&self) -> impl Iterator<Item = &str> {
        self.pagination_arguments.iter().map(String::as_str)
    }

    fn is_pagination_argument(&self, name: &str) -> bool {
        self.pagination_arguments.contains(name)
    }
}

struct UnpaginatedCollector<'r> {
    rule: &'r UnfilteredListsRule,
    fields: IndexSet<String>,
}

impl TypedVisitor for UnpaginatedCollector<'_> {
    fn visit_field(&mut self, field: &cst::Field, info: &TypeInfo<'_>) {
        let Some(parent) = info.parent_type().filter(|ty| ty.kind == TypeKind::Object) else {
            return;
        };
        let Some(def) = info.field_def() else {
            return;
        };

        let paginable = def
            .arguments
            .iter()
            .any(|arg| self.rule.is_pagination_argument(arg));
        if !paginable {
            return;
        }

        let paginated = argument_names(field)
            .iter()
            .any(|arg| self.rule.is_pagination_argument(arg));
        if !paginated {
            tracing::trace!(parent = %parent.name, field = ?field.name_text(), "Unpaginated list field");
            self.fields.insert(def.name.clone());
        }
    }
}

impl DiagnosticRule for UnfilteredListsRule {
    fn key(&self) -> &'static str {
        "unfilteredLists"
    }

    fn description(&self) -> &'static str {
        "Reports paginable list fields queried without pagination arguments"
    }

    fn analyze(
        &self,
        query: &str,
        _variables: &Variables,
        schema: Option<&SchemaIndex>,
    ) -> RuleResult {
        let arguments: Vec<&str> = self.pagination_arguments().collect();

        let parsed = match ParsedQuery::parse(query) {
            Ok(parsed) => parsed,
            Err(error) => {
                return RuleResult::new(self.key(), format!("Unable to check list pagination: {error}"))
                    .with_detail("paginationArguments", arguments);
            }
        };

        let Some(schema) = schema else {
            return RuleResult::new(
                self.key(),
                "No schema provided; list fields cannot be checked for pagination.",
            )
            .with_detail("paginationArguments", arguments);
        };

        let mut collector = UnpaginatedCollector {
            rule: self,
            fields: IndexSet::new(),
        };
        walk_document_with_type_info(&mut collector, parsed.tree(), schema);

        let fields: Vec<String> = collector.fields.into_iter().collect();
        let message = if fields.is_empty() {
            "All paginable list fields are queried with pagination arguments.".to_string()
        } else {
            format!(
                "List fields queried without pagination: {}. Consider adding pagination arguments ({}).",
                fields.join(", "),
                arguments.join(", ")
            )
        };

        RuleResult::new(self.key(), message)
            .triggered(!fields.is_empty())
            .with_detail("unfilteredFields", fields)
            .with_detail("paginationArguments", arguments)
    }
}
