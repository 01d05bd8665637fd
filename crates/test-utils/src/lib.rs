//! Shared test fixtures for the GraphQL diagnostics crates.
//!
//! - [`fixtures`]: a blog schema and queries exercising each diagnostic
//! - [`assertions`]: formatting helpers for readable snapshots

pub mod assertions;
pub mod fixtures;

pub use assertions::format_outcomes;
pub use fixtures::*;
