//! Issue model for schema validation failures
//!
//! This module provides the structured issue type produced by schema
//! engines, along with the failure type that carries a batch of issues
//! out of a parse attempt.
//!
//! All string fields use `Cow<'static, str>` for zero-allocation in the
//! common case of static issue codes and messages.

use std::borrow::Cow;
use std::fmt;

use serde::{Deserialize, Serialize};

// ============================================================================
// PATH SEGMENT
// ============================================================================

/// One step of the structural path locating a value inside the form.
///
/// Paths mix named fields and sequence positions, e.g. the second entry
/// of an `emails` list is `[Key("emails"), Index(1)]`.
///
/// Serializes untagged, so a path renders as a plain JSON array like
/// `["emails", 1]`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PathSegment {
    /// A named field of an object-like value.
    Key(String),
    /// A position within a sequence.
    Index(usize),
}

impl From<&str> for PathSegment {
    fn from(key: &str) -> Self {
        Self::Key(key.to_owned())
    }
}

impl From<String> for PathSegment {
    fn from(key: String) -> Self {
        Self::Key(key)
    }
}

impl From<usize> for PathSegment {
    fn from(index: usize) -> Self {
        Self::Index(index)
    }
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Key(key) => write!(f, "{key}"),
            Self::Index(index) => write!(f, "{index}"),
        }
    }
}

// ============================================================================
// ISSUE
// ============================================================================

/// A structured validation issue reported by a schema engine.
///
/// Uses `Cow<'static, str>` for zero-allocation when issue codes and
/// messages are known at compile time (the common case).
///
/// # Examples
///
/// ## Simple issue
///
/// ```rust,ignore
/// use formwatch_schema::Issue;
///
/// let issue = Issue::new("min_length", "Must be at least 5 characters");
/// ```
///
/// ## Issue located inside the form
///
/// ```rust,ignore
/// use formwatch_schema::Issue;
///
/// let issue = Issue::new("invalid_format", "Not a valid email")
///     .with_path(["emails", "work"]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    /// Issue code for programmatic handling and i18n.
    ///
    /// Examples: "min_length", "invalid_format", "required"
    pub code: Cow<'static, str>,

    /// Human-readable message in English.
    ///
    /// This is the default message. Use `code` for i18n lookups.
    pub message: Cow<'static, str>,

    /// Structural path to the offending value.
    ///
    /// An empty path means the issue concerns the form as a whole
    /// rather than any one field.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub path: Vec<PathSegment>,
}

impl Issue {
    /// Creates a new issue with a code and message.
    ///
    /// # Examples
    ///
    /// ```rust,ignore
    /// use formwatch_schema::Issue;
    ///
    /// // Static strings — zero allocation:
    /// let issue = Issue::new("required", "This field is required");
    ///
    /// // Dynamic strings — allocates only when needed:
    /// let issue = Issue::new("too_small", format!("Must be at least {}", 18));
    /// ```
    pub fn new(code: impl Into<Cow<'static, str>>, message: impl Into<Cow<'static, str>>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            path: Vec::new(),
        }
    }

    /// Sets the full path for this issue, replacing any existing one.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_path<I>(mut self, path: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<PathSegment>,
    {
        self.path = path.into_iter().map(Into::into).collect();
        self
    }

    /// Prepends a segment to the path.
    ///
    /// Used when an issue produced against a sub-value is lifted into
    /// its parent: `issue.under("address")` turns path `["street"]`
    /// into `["address", "street"]`.
    #[must_use = "builder methods must be chained or built"]
    pub fn under(mut self, segment: impl Into<PathSegment>) -> Self {
        self.path.insert(0, segment.into());
        self
    }

    /// Returns true if the issue concerns the form as a whole.
    #[must_use]
    pub fn is_form_level(&self) -> bool {
        self.path.is_empty()
    }

    /// Renders the path as a dotted string, e.g. `"emails[1]"` or
    /// `"address.street"`. Empty for form-level issues.
    #[must_use]
    pub fn path_string(&self) -> String {
        let mut out = String::new();
        for segment in &self.path {
            match segment {
                PathSegment::Key(key) => {
                    if !out.is_empty() {
                        out.push('.');
                    }
                    out.push_str(key);
                }
                PathSegment::Index(index) => {
                    out.push('[');
                    out.push_str(&index.to_string());
                    out.push(']');
                }
            }
        }
        out
    }
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_empty() {
            write!(f, "{}: {}", self.code, self.message)
        } else {
            write!(f, "[{}] {}: {}", self.path_string(), self.code, self.message)
        }
    }
}

// ============================================================================
// CONVENIENCE CONSTRUCTORS
// ============================================================================

impl Issue {
    /// Creates a "required" issue.
    pub fn required(field: impl Into<PathSegment>) -> Self {
        Self::new("required", "This field is required").with_path([field.into()])
    }

    /// Creates a "min_length" issue.
    pub fn min_length(field: impl Into<PathSegment>, min: usize) -> Self {
        Self::new("min_length", format!("Must be at least {min} characters"))
            .with_path([field.into()])
    }

    /// Creates an "out_of_range" issue.
    pub fn out_of_range<T: fmt::Display>(field: impl Into<PathSegment>, min: T, max: T) -> Self {
        Self::new(
            "out_of_range",
            format!("Value must be between {min} and {max}"),
        )
        .with_path([field.into()])
    }

    /// Creates an "invalid_format" issue.
    pub fn invalid_format(
        field: impl Into<PathSegment>,
        expected: impl fmt::Display,
    ) -> Self {
        Self::new("invalid_format", format!("Expected {expected}")).with_path([field.into()])
    }

    /// Creates a "custom" issue with a message and no path.
    pub fn custom(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new("custom", message)
    }
}

// ============================================================================
// SCHEMA FAILURE
// ============================================================================

/// The failure side of a schema parse: one or more issues.
///
/// A failure always carries at least one issue in practice; engines
/// that find nothing wrong return `Ok` instead.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaFailure {
    issues: Vec<Issue>,
}

impl SchemaFailure {
    /// Creates a failure from a batch of issues.
    #[must_use]
    pub fn new(issues: Vec<Issue>) -> Self {
        Self { issues }
    }

    /// Returns all issues in engine output order.
    #[must_use]
    pub fn issues(&self) -> &[Issue] {
        &self.issues
    }

    /// Consumes the failure, yielding its issues.
    #[must_use]
    pub fn into_issues(self) -> Vec<Issue> {
        self.issues
    }

    /// Adds an issue to the failure.
    pub fn push(&mut self, issue: Issue) {
        self.issues.push(issue);
    }

    /// Returns the number of issues.
    #[must_use]
    pub fn len(&self) -> usize {
        self.issues.len()
    }

    /// Returns true if the failure carries no issues.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }
}

impl From<Issue> for SchemaFailure {
    fn from(issue: Issue) -> Self {
        Self {
            issues: vec![issue],
        }
    }
}

impl From<Vec<Issue>> for SchemaFailure {
    fn from(issues: Vec<Issue>) -> Self {
        Self { issues }
    }
}

impl FromIterator<Issue> for SchemaFailure {
    fn from_iter<I: IntoIterator<Item = Issue>>(iter: I) -> Self {
        Self {
            issues: iter.into_iter().collect(),
        }
    }
}

impl fmt::Display for SchemaFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Schema rejected input with {} issue(s):", self.issues.len())?;
        for (i, issue) in self.issues.iter().enumerate() {
            writeln!(f, "  {}. {}", i + 1, issue)?;
        }
        Ok(())
    }
}

impl std::error::Error for SchemaFailure {}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_simple_issue() {
        let issue = Issue::new("test", "Test issue");
        assert_eq!(issue.code, "test");
        assert_eq!(issue.message, "Test issue");
        assert!(issue.is_form_level());
    }

    #[test]
    fn test_issue_with_path() {
        let issue = Issue::new("required", "This field is required").with_path(["email"]);
        assert_eq!(issue.path, vec![PathSegment::Key("email".into())]);
        assert!(!issue.is_form_level());
    }

    #[test]
    fn test_under_prepends() {
        let issue = Issue::new("min_length", "Too short")
            .with_path(["street"])
            .under("address");

        assert_eq!(
            issue.path,
            vec![
                PathSegment::Key("address".into()),
                PathSegment::Key("street".into()),
            ]
        );
    }

    #[test]
    fn test_path_string_rendering() {
        let issue = Issue::new("invalid_format", "Bad email")
            .with_path(vec![PathSegment::from("emails"), PathSegment::from(1usize)]);
        assert_eq!(issue.path_string(), "emails[1]");

        let nested = Issue::new("required", "Missing").with_path(["address", "street"]);
        assert_eq!(nested.path_string(), "address.street");
    }

    #[test]
    fn test_display_includes_path() {
        let issue = Issue::new("too_small", "Must be 18 or older").with_path(["age"]);
        assert_eq!(issue.to_string(), "[age] too_small: Must be 18 or older");

        let form_level = Issue::new("invalid_type", "Expected an object");
        assert_eq!(form_level.to_string(), "invalid_type: Expected an object");
    }

    #[test]
    fn test_convenience_constructors() {
        assert_eq!(Issue::required("name").code, "required");
        assert_eq!(Issue::min_length("name", 2).code, "min_length");
        assert_eq!(Issue::out_of_range("age", 0, 130).code, "out_of_range");
        assert_eq!(Issue::invalid_format("email", "an email address").code, "invalid_format");
        assert_eq!(Issue::custom("Passwords do not match").code, "custom");

        assert_eq!(Issue::required("name").path_string(), "name");
        assert!(Issue::custom("Passwords do not match").is_form_level());
    }

    #[test]
    fn test_zero_alloc_static_strings() {
        let issue = Issue::new("required", "This field is required");
        // Both should be borrowed (no allocation)
        assert!(matches!(issue.code, Cow::Borrowed(_)));
        assert!(matches!(issue.message, Cow::Borrowed(_)));
    }

    #[test]
    fn test_dynamic_strings() {
        let code = format!("issue_{}", 42);
        let issue = Issue::new(code, "Dynamic issue");
        assert!(matches!(issue.code, Cow::Owned(_)));
        assert!(matches!(issue.message, Cow::Borrowed(_)));
    }

    #[test]
    fn test_failure_collects_in_order() {
        let failure: SchemaFailure = vec![
            Issue::required("name"),
            Issue::out_of_range("age", 0, 130),
        ]
        .into_iter()
        .collect();

        assert_eq!(failure.len(), 2);
        assert_eq!(failure.issues()[0].code, "required");
        assert_eq!(failure.issues()[1].code, "out_of_range");
    }

    #[test]
    fn test_failure_display() {
        let failure = SchemaFailure::from(Issue::required("name"));
        let rendered = failure.to_string();
        assert!(rendered.contains("1 issue(s)"));
        assert!(rendered.contains("[name] required"));
    }

    #[test]
    fn test_issue_serializes_with_untagged_path() {
        let issue = Issue::new("invalid_format", "Bad email")
            .with_path(vec![PathSegment::from("emails"), PathSegment::from(0usize)]);

        let value = serde_json::to_value(&issue).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "code": "invalid_format",
                "message": "Bad email",
                "path": ["emails", 0],
            })
        );
    }

    #[test]
    fn test_form_level_issue_omits_path_when_serialized() {
        let value = serde_json::to_value(Issue::custom("Top-level problem")).unwrap();
        assert!(value.get("path").is_none());
    }
}
