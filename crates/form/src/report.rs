//! Validation pass reports.

use serde::{Deserialize, Serialize};

use formwatch_schema::FieldIssues;

/// Outcome of a single validation pass.
///
/// `values` is the snapshot the pass worked on: the engine's parsed
/// (and possibly normalized) output when the pass succeeded, the raw
/// snapshot otherwise. A report stays self-consistent even after later
/// passes have overwritten the live observables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationReport<T> {
    /// The values this pass parsed.
    pub values: T,
    /// Issues grouped per field; empty when the pass succeeded.
    pub errors: FieldIssues,
    /// Whether the pass found no issues.
    pub is_valid: bool,
}

impl<T> ValidationReport<T> {
    /// Builds a report. Validity is derived from the issues, never
    /// stated independently.
    #[must_use]
    pub fn new(values: T, errors: FieldIssues) -> Self {
        let is_valid = errors.is_empty();
        Self {
            values,
            errors,
            is_valid,
        }
    }
}

#[cfg(test)]
mod tests {
    use formwatch_schema::Issue;
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn validity_follows_issues() {
        let passed = ValidationReport::new(5, FieldIssues::new());
        assert!(passed.is_valid);

        let rejected = ValidationReport::new(
            5,
            FieldIssues::from_issues(vec![Issue::out_of_range("value", 0, 3)]),
        );
        assert!(!rejected.is_valid);
    }

    #[test]
    fn serializes_for_logging() {
        let report = ValidationReport::new(
            42,
            FieldIssues::from_issues(vec![Issue::required("name")]),
        );

        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(value["values"], 42);
        assert_eq!(value["is_valid"], false);
        assert_eq!(value["errors"]["fields"]["name"][0]["code"], "required");
    }
}
