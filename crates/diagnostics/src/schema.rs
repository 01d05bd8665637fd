//! Read-only schema index used for type attribution.
//!
//! The index is built once from a compiled `apollo-compiler` schema and keeps
//! only what the rules look up: type kinds, field output types and field
//! argument names. It is immutable and `Send + Sync`, so one index can be
//! shared behind an `Arc` by concurrent analyses.

use apollo_compiler::ast::OperationType;
use apollo_compiler::schema::ExtendedType;
use apollo_compiler::Schema;
use graphql_apollo_ext::OperationKind;
use indexmap::IndexMap;
use std::collections::HashMap;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    #[error("Invalid schema: {0}")]
    Invalid(String),
}

/// The kind of a named schema type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeKind {
    Scalar,
    Object,
    Interface,
    Union,
    Enum,
    InputObject,
}

impl TypeKind {
    /// Object, interface and union types own selection sets
    #[must_use]
    pub const fn is_composite(self) -> bool {
        matches!(self, Self::Object | Self::Interface | Self::Union)
    }
}

/// A field definition on an object or interface type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDef {
    pub name: String,
    /// Named output type with list and non-null wrappers removed
    pub type_name: String,
    /// Declared argument names, in definition order
    pub arguments: Vec<String>,
}

impl FieldDef {
    #[must_use]
    pub fn has_argument(&self, name: &str) -> bool {
        self.arguments.iter().any(|arg| arg == name)
    }
}

/// A named type in the schema
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeDef {
    pub name: String,
    pub kind: TypeKind,
    /// Fields of object and interface types; empty for every other kind
    pub fields: IndexMap<String, FieldDef>,
}

impl TypeDef {
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&FieldDef> {
        self.fields.get(name)
    }
}

/// Type and field lookups over a compiled schema.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SchemaIndex {
    types: HashMap<String, TypeDef>,
    query_type: Option<String>,
    mutation_type: Option<String>,
    subscription_type: Option<String>,
}

impl SchemaIndex {
    /// Parse, validate and index a schema written in SDL.
    #[tracing::instrument(skip(sdl), fields(size = sdl.len()))]
    pub fn from_sdl(sdl: &str, path: &str) -> Result<Self, SchemaError> {
        let schema = Schema::parse_and_validate(sdl, path)
            .map_err(|with_errors| SchemaError::Invalid(with_errors.errors.to_string()))?;
        let index = Self::from_schema(&schema);
        tracing::debug!(types = index.types.len(), "Schema indexed");
        Ok(index)
    }

    /// Index an already compiled schema.
    ///
    /// Introspection types (`__Schema`, `__Type`, ...) are left out, so
    /// introspection fields never resolve.
    #[must_use]
    pub fn from_schema(schema: &Schema) -> Self {
        let mut types = HashMap::new();

        for (name, ty) in &schema.types {
            if name.as_str().starts_with("__") {
                continue;
            }

            let (kind, fields) = match ty {
                ExtendedType::Scalar(_) => (TypeKind::Scalar, IndexMap::new()),
                ExtendedType::Object(obj) => (
                    TypeKind::Object,
                    obj.fields
                        .values()
                        .map(|field| index_field(field))
                        .collect(),
                ),
                ExtendedType::Interface(iface) => (
                    TypeKind::Interface,
                    iface
                        .fields
                        .values()
                        .map(|field| index_field(field))
                        .collect(),
                ),
                ExtendedType::Union(_) => (TypeKind::Union, IndexMap::new()),
                ExtendedType::Enum(_) => (TypeKind::Enum, IndexMap::new()),
                ExtendedType::InputObject(_) => (TypeKind::InputObject, IndexMap::new()),
            };

            types.insert(
                name.to_string(),
                TypeDef {
                    name: name.to_string(),
                    kind,
                    fields,
                },
            );
        }

        let root = |operation: OperationType, default: &str| {
            schema
                .root_operation(operation)
                .map(ToString::to_string)
                .or_else(|| types.contains_key(default).then(|| default.to_string()))
        };

        let query_type = root(OperationType::Query, "Query");
        let mutation_type = root(OperationType::Mutation, "Mutation");
        let subscription_type = root(OperationType::Subscription, "Subscription");

        Self {
            types,
            query_type,
            mutation_type,
            subscription_type,
        }
    }

    #[must_use]
    pub fn type_def(&self, name: &str) -> Option<&TypeDef> {
        self.types.get(name)
    }

    /// Look up the definition of field `field_name` on type `type_name`.
    #[must_use]
    pub fn field(&self, type_name: &str, field_name: &str) -> Option<&FieldDef> {
        self.type_def(type_name)?.field(field_name)
    }

    /// Whether `type_name.field_name` declares an argument called `argument`.
    #[must_use]
    pub fn field_has_argument(&self, type_name: &str, field_name: &str, argument: &str) -> bool {
        self.field(type_name, field_name)
            .is_some_and(|field| field.has_argument(argument))
    }

    /// The root type for an operation kind.
    #[must_use]
    pub fn root_type(&self, kind: OperationKind) -> Option<&TypeDef> {
        let name = match kind {
            OperationKind::Query => self.query_type.as_deref(),
            OperationKind::Mutation => self.mutation_type.as_deref(),
            OperationKind::Subscription => self.subscription_type.as_deref(),
        }?;
        self.type_def(name)
    }
}

fn index_field(field: &apollo_compiler::schema::FieldDefinition) -> (String, FieldDef) {
    let name = field.name.to_string();
    let def = FieldDef {
        name: name.clone(),
        type_name: field.ty.inner_named_type().to_string(),
        arguments: field
            .arguments
            .iter()
            .map(|arg| arg.name.to_string())
            .collect(),
    };
    (name, def)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SDL: &str = r"
        schema { query: RootQuery }

        type RootQuery {
          posts(first: Int, after: String): [Post!]!
          node(id: ID!): Node
        }

        interface Node { id: ID! }

        type Post implements Node {
          id: ID!
          title: String
        }

        union SearchResult = Post
    ";

    #[test]
    fn test_index_types_and_fields() {
        let schema = SchemaIndex::from_sdl(SDL, "schema.graphql").unwrap();

        let posts = schema.field("RootQuery", "posts").unwrap();
        assert_eq!(posts.type_name, "Post");
        assert_eq!(posts.arguments, vec!["first", "after"]);
        assert!(schema.field_has_argument("RootQuery", "posts", "after"));
        assert!(!schema.field_has_argument("RootQuery", "posts", "last"));

        assert_eq!(schema.type_def("Node").unwrap().kind, TypeKind::Interface);
        assert_eq!(schema.type_def("SearchResult").unwrap().kind, TypeKind::Union);
        assert!(schema.type_def("SearchResult").unwrap().fields.is_empty());
    }

    #[test]
    fn test_explicit_root_type() {
        let schema = SchemaIndex::from_sdl(SDL, "schema.graphql").unwrap();
        assert_eq!(
            schema.root_type(OperationKind::Query).map(|t| t.name.as_str()),
            Some("RootQuery")
        );
        assert!(schema.root_type(OperationKind::Mutation).is_none());
    }

    #[test]
    fn test_introspection_types_not_indexed() {
        let schema = SchemaIndex::from_sdl(SDL, "schema.graphql").unwrap();
        assert!(schema.type_def("__Schema").is_none());
        assert!(schema.field("RootQuery", "__typename").is_none());
    }

    #[test]
    fn test_invalid_schema_is_error() {
        let err = SchemaIndex::from_sdl("type Query { a: Missing }", "schema.graphql").unwrap_err();
        assert!(matches!(err, SchemaError::Invalid(_)));
    }
}
