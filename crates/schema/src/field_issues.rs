//! Issues grouped per field
//!
//! A schema engine reports a flat batch of issues; observers of form
//! state want them keyed by the field they belong to. [`FieldIssues`]
//! is that grouped view, plus a bucket for issues that concern the
//! form as a whole.

use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::issue::{Issue, PathSegment};

/// Validation issues grouped by the first segment of their path.
///
/// Grouping keys are strings: a leading `Key("age")` groups under
/// `"age"`, a leading `Index(2)` under `"2"`. Issues with an empty
/// path land in the form-level bucket instead of any field. Both
/// field order and issue order within a field follow first appearance
/// in the engine's output.
///
/// The grouped view is replaced wholesale on every validation pass,
/// so there are no per-field mutation methods.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldIssues {
    fields: IndexMap<String, Vec<Issue>>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    form: Vec<Issue>,
}

impl FieldIssues {
    /// Creates an empty grouping (the "no issues" state).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Groups a batch of issues by field key.
    pub fn from_issues<I>(issues: I) -> Self
    where
        I: IntoIterator<Item = Issue>,
    {
        let mut grouped = Self::new();
        for issue in issues {
            match issue.path.first() {
                Some(PathSegment::Key(key)) => {
                    let key = key.clone();
                    grouped.fields.entry(key).or_default().push(issue);
                }
                Some(PathSegment::Index(index)) => {
                    let key = index.to_string();
                    grouped.fields.entry(key).or_default().push(issue);
                }
                None => grouped.form.push(issue),
            }
        }
        grouped
    }

    /// Returns true if no field and no form-level issue is present.
    ///
    /// This is the definition of a valid form: form-level issues count
    /// against validity even though they belong to no field.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty() && self.form.is_empty()
    }

    /// Returns the number of fields that currently carry issues.
    #[must_use]
    pub fn field_count(&self) -> usize {
        self.fields.len()
    }

    /// Returns the total number of issues, form-level ones included.
    #[must_use]
    pub fn issue_count(&self) -> usize {
        self.fields.values().map(Vec::len).sum::<usize>() + self.form.len()
    }

    /// Returns the issues recorded against a field, if any.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&[Issue]> {
        self.fields.get(key).map(Vec::as_slice)
    }

    /// Returns true if the field currently carries at least one issue.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    /// Iterates fields with issues, in first-appearance order.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &[Issue])> {
        self.fields
            .iter()
            .map(|(key, issues)| (key.as_str(), issues.as_slice()))
    }

    /// Returns the issues that concern the form as a whole.
    #[must_use]
    pub fn form(&self) -> &[Issue] {
        &self.form
    }

    /// Iterates every issue in grouped order, field buckets first.
    pub fn iter(&self) -> impl Iterator<Item = &Issue> {
        self.fields.values().flatten().chain(self.form.iter())
    }
}

impl FromIterator<Issue> for FieldIssues {
    fn from_iter<I: IntoIterator<Item = Issue>>(iter: I) -> Self {
        Self::from_issues(iter)
    }
}

impl fmt::Display for FieldIssues {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return write!(f, "no issues");
        }
        writeln!(f, "{} issue(s):", self.issue_count())?;
        for issue in self.iter() {
            writeln!(f, "  - {issue}")?;
        }
        Ok(())
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_empty_grouping_is_valid() {
        let grouped = FieldIssues::new();
        assert!(grouped.is_empty());
        assert_eq!(grouped.issue_count(), 0);
        assert_eq!(grouped.field_count(), 0);
    }

    #[test]
    fn test_groups_by_first_path_segment() {
        let grouped = FieldIssues::from_issues(vec![
            Issue::required("name"),
            Issue::out_of_range("age", 0, 130),
            Issue::new("min_length", "Too short").with_path(["name"]),
        ]);

        assert_eq!(grouped.field_count(), 2);
        assert_eq!(grouped.get("name").unwrap().len(), 2);
        assert_eq!(grouped.get("age").unwrap().len(), 1);
        assert!(grouped.form().is_empty());
    }

    #[test]
    fn test_nested_paths_group_under_root_field() {
        let grouped = FieldIssues::from_issues(vec![
            Issue::new("required", "Missing street").with_path(["address", "street"]),
            Issue::new("invalid_format", "Bad zip").with_path(["address", "zip"]),
        ]);

        assert_eq!(grouped.field_count(), 1);
        assert_eq!(grouped.get("address").unwrap().len(), 2);
    }

    #[test]
    fn test_leading_index_groups_under_stringified_position() {
        let grouped = FieldIssues::from_issues(vec![
            Issue::new("invalid_format", "Bad entry").with_path([PathSegment::Index(2)]),
        ]);

        assert!(grouped.contains("2"));
        assert_eq!(grouped.get("2").unwrap()[0].code, "invalid_format");
    }

    #[test]
    fn test_form_level_issues_block_validity() {
        let grouped = FieldIssues::from_issues(vec![Issue::custom("Passwords do not match")]);

        assert!(!grouped.is_empty());
        assert_eq!(grouped.field_count(), 0);
        assert_eq!(grouped.form().len(), 1);
        assert_eq!(grouped.issue_count(), 1);
    }

    #[test]
    fn test_field_order_follows_engine_output() {
        let grouped = FieldIssues::from_issues(vec![
            Issue::required("zebra"),
            Issue::required("apple"),
            Issue::min_length("zebra", 3),
        ]);

        let order: Vec<&str> = grouped.fields().map(|(key, _)| key).collect();
        assert_eq!(order, vec!["zebra", "apple"]);
    }

    #[test]
    fn test_iter_walks_fields_then_form() {
        let grouped = FieldIssues::from_issues(vec![
            Issue::custom("Form broken"),
            Issue::required("name"),
        ]);

        let codes: Vec<&str> = grouped.iter().map(|issue| issue.code.as_ref()).collect();
        assert_eq!(codes, vec!["required", "custom"]);
    }

    #[test]
    fn test_display_lists_issues() {
        let grouped = FieldIssues::from_issues(vec![Issue::required("name")]);
        let rendered = grouped.to_string();
        assert!(rendered.contains("1 issue(s)"));
        assert!(rendered.contains("[name] required"));

        assert_eq!(FieldIssues::new().to_string(), "no issues");
    }

    #[test]
    fn test_serializes_as_key_to_issue_list() {
        let grouped = FieldIssues::from_issues(vec![
            Issue::required("name"),
            Issue::custom("Form broken"),
        ]);

        let value = serde_json::to_value(&grouped).unwrap();
        assert_eq!(value["fields"]["name"][0]["code"], "required");
        assert_eq!(value["form"][0]["code"], "custom");
    }
}
