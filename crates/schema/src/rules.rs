//! Rule-based schema engine
//!
//! [`FieldRules`] builds a [`Schema`] out of plain closures without
//! requiring derive macros: per-field checks whose issues get scoped
//! under the field key, plus whole-form rules for cross-field
//! constraints.

use std::fmt;

use async_trait::async_trait;

use crate::issue::{Issue, SchemaFailure};
use crate::traits::Schema;

type Rule<T> = Box<dyn Fn(&T) -> Vec<Issue> + Send + Sync>;

/// A schema engine assembled from field checks and form rules.
///
/// Rules run in registration order and every produced issue is
/// collected, so one failing field never hides another. `FieldRules`
/// is an identity engine: it validates but never transforms, and
/// parses back the input unchanged.
///
/// # Examples
///
/// ```rust,ignore
/// use formwatch_schema::{FieldRules, Issue};
///
/// struct Signup { name: String, password: String, confirm: String }
///
/// let schema = FieldRules::new()
///     .field("name", |s: &Signup| {
///         s.name.trim().is_empty().then(|| Issue::required("name"))
///     })
///     .rule(|s: &Signup| {
///         if s.password == s.confirm {
///             Vec::new()
///         } else {
///             vec![Issue::custom("Passwords do not match")]
///         }
///     });
/// ```
pub struct FieldRules<T> {
    rules: Vec<Rule<T>>,
}

impl<T> FieldRules<T> {
    /// Creates an engine with no rules. It accepts every input.
    #[must_use]
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    /// Adds a check scoped to one field.
    ///
    /// The check returns `Some(issue)` to reject the field; the issue's
    /// path gets the field key prepended, so a pathless issue ends up
    /// at `[key]` and an issue at `["street"]` at `[key, "street"]`.
    #[must_use = "builder methods must be chained or built"]
    pub fn field<F>(mut self, key: impl Into<String>, check: F) -> Self
    where
        F: Fn(&T) -> Option<Issue> + Send + Sync + 'static,
    {
        let key = key.into();
        self.rules.push(Box::new(move |input: &T| {
            check(input)
                .map(|issue| issue.under(key.clone()))
                .into_iter()
                .collect()
        }));
        self
    }

    /// Adds a whole-form rule.
    ///
    /// The rule may emit any number of issues; their paths are kept
    /// as produced, so pathless issues stay form-level.
    #[must_use = "builder methods must be chained or built"]
    pub fn rule<F>(mut self, rule: F) -> Self
    where
        F: Fn(&T) -> Vec<Issue> + Send + Sync + 'static,
    {
        self.rules.push(Box::new(rule));
        self
    }

    /// Returns the number of registered rules.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Returns true if no rules are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl<T> Default for FieldRules<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for FieldRules<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldRules")
            .field("rules", &self.rules.len())
            .finish()
    }
}

#[async_trait]
impl<T> Schema<T> for FieldRules<T>
where
    T: Clone + Send + Sync,
{
    async fn parse(&self, input: &T) -> Result<T, SchemaFailure> {
        let mut issues = Vec::new();
        for rule in &self.rules {
            issues.extend(rule(input));
        }

        if issues.is_empty() {
            Ok(input.clone())
        } else {
            Err(SchemaFailure::new(issues))
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
