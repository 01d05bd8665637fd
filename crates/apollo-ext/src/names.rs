//! Name extraction helpers for CST nodes.
//!
//! `apollo-parser` exposes names as optional child nodes because the CST is
//! lossless and error tolerant. These helpers flatten the common
//! `node.name().map(|n| n.text().to_string())` chains.

use apollo_parser::cst;

/// Extract the name of a CST node as an owned string.
pub trait NameExt {
    /// The node's name, or `None` when the parser could not recover one.
    fn name_text(&self) -> Option<String>;
}

fn text_of(name: Option<cst::Name>) -> Option<String> {
    name.map(|n| n.text().to_string())
}

impl NameExt for cst::Field {
    fn name_text(&self) -> Option<String> {
        text_of(self.name())
    }
}

impl NameExt for cst::FragmentSpread {
    fn name_text(&self) -> Option<String> {
        text_of(self.fragment_name().and_then(|n| n.name()))
    }
}

impl NameExt for cst::FragmentDefinition {
    fn name_text(&self) -> Option<String> {
        text_of(self.fragment_name().and_then(|n| n.name()))
    }
}

impl NameExt for cst::Directive {
    fn name_text(&self) -> Option<String> {
        text_of(self.name())
    }
}

impl NameExt for cst::Argument {
    fn name_text(&self) -> Option<String> {
        text_of(self.name())
    }
}

impl NameExt for cst::Variable {
    fn name_text(&self) -> Option<String> {
        text_of(self.name())
    }
}

/// Extract the type condition (`on Type`) of a fragment.
pub trait TypeConditionExt {
    /// The named type in the type condition, if present.
    fn type_condition_text(&self) -> Option<String>;
}

impl TypeConditionExt for cst::FragmentDefinition {
    fn type_condition_text(&self) -> Option<String> {
        text_of(
            self.type_condition()
                .and_then(|tc| tc.named_type())
                .and_then(|nt| nt.name()),
        )
    }
}

impl TypeConditionExt for cst::InlineFragment {
    fn type_condition_text(&self) -> Option<String> {
        text_of(
            self.type_condition()
                .and_then(|tc| tc.named_type())
                .and_then(|nt| nt.name()),
        )
    }
}

/// Names of the arguments supplied at a field invocation, in source order.
#[must_use]
pub fn argument_names(field: &cst::Field) -> Vec<String> {
    field
        .arguments()
        .map(|args| {
            args.arguments()
                .filter_map(|arg| arg.name_text())
                .collect()
        })
        .unwrap_or_default()
}
