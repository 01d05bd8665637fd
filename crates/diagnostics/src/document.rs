//! Query parsing shared by every rule.

use apollo_parser::cst;
use apollo_parser::SyntaxTree;
use graphql_apollo_ext::collect_fragment_definitions;
use std::collections::HashMap;
use thiserror::Error;

/// A query string that failed to parse.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SyntaxError {
    #[error("Syntax Error: {message} at offset {offset}")]
    Parse { message: String, offset: usize },

    #[error("Syntax Error: Unexpected <EOF>")]
    Empty,
}

/// A successfully parsed query document.
pub struct ParsedQuery {
    tree: SyntaxTree,
}

impl std::fmt::Debug for ParsedQuery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ParsedQuery")
            .field("definitions", &self.tree.document().definitions().count())
            .finish()
    }
}

impl ParsedQuery {
    /// Parse a query, rejecting any document the parser had to recover from.
    ///
    /// A document with no definitions at all is also rejected.
    pub fn parse(source: &str) -> Result<Self, SyntaxError> {
        let tree = apollo_parser::Parser::new(source).parse();

        if let Some(error) = tree.errors().next() {
            return Err(SyntaxError::Parse {
                message: error.message().to_string(),
                offset: error.index(),
            });
        }

        if tree.document().definitions().next().is_none() {
            return Err(SyntaxError::Empty);
        }

        Ok(Self { tree })
    }

    #[must_use]
    pub const fn tree(&self) -> &SyntaxTree {
        &self.tree
    }

    /// Fragment definitions keyed by name.
    #[must_use]
    pub fn fragments(&self) -> HashMap<String, cst::FragmentDefinition> {
        collect_fragment_definitions(&self.tree)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_query() {
        let parsed = ParsedQuery::parse("query { a } fragment F on T { b }").unwrap();
        assert_eq!(parsed.fragments().len(), 1);
    }

    #[test]
    fn test_unbalanced_braces_is_syntax_error() {
        let err = ParsedQuery::parse("query { a { b }").unwrap_err();
        assert!(matches!(err, SyntaxError::Parse { .. }));
        assert!(err.to_string().starts_with("Syntax Error: "));
    }

    #[test]
    fn test_empty_document_is_syntax_error() {
        assert_eq!(ParsedQuery::parse("   ").unwrap_err(), SyntaxError::Empty);
        assert_eq!(
            SyntaxError::Empty.to_string(),
            "Syntax Error: Unexpected <EOF>"
        );
    }
}
