//! # formwatch
//!
//! Debounced schema validation for observable form state.
//!
//! A [`FormValidator`] owns the values of a form as an observable
//! cell, runs them through a [`Schema`] engine, and publishes the
//! resulting per-field issues and validity flag as observables of
//! their own. Validation runs in a background reaction once edits
//! settle — 300ms of quiet, capped at 500ms during bursts — or on
//! demand through [`FormValidator::validate`].
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use formwatch::{FieldRules, FormValidator, Issue};
//!
//! #[derive(Clone, PartialEq, Default)]
//! struct Signup { name: String, age: i64 }
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() {
//!     let schema = FieldRules::new()
//!         .field("name", |s: &Signup| {
//!             s.name.trim().is_empty().then(|| Issue::new("required", "This field is required"))
//!         })
//!         .field("age", |s: &Signup| {
//!             (!(0..=130).contains(&s.age))
//!                 .then(|| Issue::new("out_of_range", "Value must be between 0 and 130"))
//!         });
//!
//!     let form = FormValidator::new(schema, Signup::default());
//!
//!     form.update_values(|s| s.age = 200);
//!     let report = form.validate().await;
//!     assert!(!report.is_valid);
//!     assert!(report.errors.contains("age"));
//! }
//! ```

pub mod report;
pub mod validator;

pub use report::ValidationReport;
pub use validator::FormValidator;

pub use formwatch_reactive::{
    DEFAULT_DEBOUNCE, DEFAULT_MAX_WAIT, DebouncePolicy, Observable, PolicyError,
};
pub use formwatch_schema::{
    FieldIssues, FieldRules, FnSchema, Issue, PathSegment, Schema, SchemaFailure, schema_fn,
};
