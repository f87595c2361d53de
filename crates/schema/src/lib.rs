//! # Formwatch Schema
//!
//! Schema engine contract and issue model for the formwatch form
//! validator. Defines what a schema engine is ([`Schema`]), the issues
//! it reports ([`Issue`], [`SchemaFailure`]), the per-field grouping
//! observers consume ([`FieldIssues`]), and a closure-based engine for
//! forms that need no dedicated schema type ([`FieldRules`]).

pub mod field_issues;
pub mod issue;
pub mod rules;
pub mod traits;

pub use field_issues::FieldIssues;
pub use issue::{Issue, PathSegment, SchemaFailure};
pub use rules::FieldRules;
pub use traits::{FnSchema, Schema, schema_fn};
