//! The schema engine contract
//!
//! This module defines the single trait a schema engine must implement
//! to drive form validation, plus an adapter for building engines out
//! of plain closures.

use std::fmt;

use async_trait::async_trait;

use crate::issue::SchemaFailure;

// ============================================================================
// SCHEMA TRAIT
// ============================================================================

/// A schema engine: parses a snapshot of form values into a validated,
/// possibly normalized value, or rejects it with a batch of issues.
///
/// The engine receives a borrowed snapshot and must not mutate shared
/// state; on success it returns an owned value, which lets engines
/// apply coercions and defaults rather than merely approve the input.
/// On failure it reports every issue it found, not just the first.
///
/// Parsing is async so engines may consult external resources (a
/// username-availability check, say), though most engines are pure.
///
/// # Examples
///
/// ```rust,ignore
/// use async_trait::async_trait;
/// use formwatch_schema::{Issue, Schema, SchemaFailure};
///
/// #[derive(Clone)]
/// struct Signup { name: String, age: i64 }
///
/// struct SignupSchema;
///
/// #[async_trait]
/// impl Schema<Signup> for SignupSchema {
///     async fn parse(&self, input: &Signup) -> Result<Signup, SchemaFailure> {
///         let mut issues = Vec::new();
///         if input.name.trim().is_empty() {
///             issues.push(Issue::required("name"));
///         }
///         if !(0..=130).contains(&input.age) {
///             issues.push(Issue::out_of_range("age", 0, 130));
///         }
///         if issues.is_empty() {
///             Ok(Signup { name: input.name.trim().to_owned(), ..input.clone() })
///         } else {
///             Err(SchemaFailure::new(issues))
///         }
///     }
/// }
/// ```
#[async_trait]
pub trait Schema<T>: Send + Sync {
    /// Parses and validates one snapshot of the input.
    ///
    /// # Returns
    ///
    /// * `Ok(parsed)` with the validated (and possibly normalized) value
    /// * `Err(failure)` carrying every issue the engine found
    async fn parse(&self, input: &T) -> Result<T, SchemaFailure>;
}

// ============================================================================
// CLOSURE ADAPTER
// ============================================================================

/// A [`Schema`] built from a plain function, created by [`schema_fn`].
pub struct FnSchema<F> {
    check: F,
}

/// Wraps a synchronous closure as a [`Schema`] engine.
///
/// Handy for tests and for forms whose rules need no async work:
///
/// ```rust,ignore
/// use formwatch_schema::{schema_fn, Issue, SchemaFailure};
///
/// let schema = schema_fn(|value: &i64| {
///     if *value >= 0 {
///         Ok(*value)
///     } else {
///         Err(SchemaFailure::from(Issue::out_of_range("value", 0, i64::MAX)))
///     }
/// });
/// ```
pub fn schema_fn<F>(check: F) -> FnSchema<F> {
    FnSchema { check }
}

#[async_trait]
impl<T, F> Schema<T> for FnSchema<F>
where
    T: Send + Sync,
    F: Fn(&T) -> Result<T, SchemaFailure> + Send + Sync,
{
    async fn parse(&self, input: &T) -> Result<T, SchemaFailure> {
        (self.check)(input)
    }
}

impl<F> fmt::Debug for FnSchema<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnSchema").finish_non_exhaustive()
    }
}

// ============================================================================
// TESTS
// ============================================================================
