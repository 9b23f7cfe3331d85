//! Core type definitions for the merge engine.

use helmwise_yaml::{ConfigNode, Document, Path};
use serde::Serialize;
use std::fmt;

/// The kind of change an operation proposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeKind {
    /// Replace (or create) the value at the path.
    Set,

    /// Recursive union where mapping meets mapping; behaves as `Set`
    /// otherwise.
    Merge,

    /// Remove the value at the path.
    Delete,
}

impl fmt::Display for ChangeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChangeKind::Set => write!(f, "set"),
            ChangeKind::Merge => write!(f, "merge"),
            ChangeKind::Delete => write!(f, "delete"),
        }
    }
}

/// One proposed mutation, produced by the recommendation parser.
///
/// Invariants (enforced at parse time, re-checked by the engine): the path
/// is non-empty (root replacement is not permitted as a single operation)
/// and the rationale is non-empty, since it is carried into the change log.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChangeOperation {
    /// Target of the change.
    pub path: Path,

    /// What to do at the path.
    #[serde(rename = "action")]
    pub kind: ChangeKind,

    /// New value; absent for `Delete`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<ConfigNode>,

    /// Why the reasoning service proposed this change.
    pub rationale: String,
}

/// One applied change, immutable once created.
///
/// The ordered sequence of records is the audit trail returned to the
/// caller: a full history of the batch, not just its net effect.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChangeRecord {
    pub path: Path,

    #[serde(rename = "action")]
    pub kind: ChangeKind,

    /// Value before the change; absent when the path did not exist.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub previous_value: Option<ConfigNode>,

    /// Value after the change; absent for deletions.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub new_value: Option<ConfigNode>,

    pub rationale: String,
}

/// Why an operation was skipped instead of applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// The write conflicted with the shape of the existing document.
    TypeConflict,

    /// A delete targeted a path that does not resolve.
    NotFound,
}

impl SkipReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            SkipReason::TypeConflict => "type_conflict",
            SkipReason::NotFound => "not_found",
        }
    }
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An operation that could not be safely applied, with the reason it was
/// omitted. Skips never abort the batch.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkippedOperation {
    pub operation: ChangeOperation,
    pub reason: SkipReason,
}

/// The outcome of applying a batch of operations.
#[derive(Debug, Clone, PartialEq)]
pub struct MergeResult {
    /// The updated document. Paths not targeted by any operation are
    /// preserved exactly as in the input.
    pub document: Document,

    /// Applied changes, in application order.
    pub changes: Vec<ChangeRecord>,

    /// Operations that were skipped, in occurrence order.
    pub skipped: Vec<SkippedOperation>,
}

/// A validated recommendation payload.
#[derive(Debug, Clone, PartialEq)]
pub struct Recommendation {
    /// Narrative analysis from the reasoning service, passed through
    /// verbatim when present.
    pub analysis: Option<String>,

    /// Ordered change operations. Duplicate target paths are allowed;
    /// the engine applies them in order (later entries win).
    pub operations: Vec<ChangeOperation>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_change_kind_display() {
        assert_eq!(ChangeKind::Set.to_string(), "set");
        assert_eq!(ChangeKind::Merge.to_string(), "merge");
        assert_eq!(ChangeKind::Delete.to_string(), "delete");
    }

    #[test]
    fn test_skip_reason_strings() {
        assert_eq!(SkipReason::TypeConflict.as_str(), "type_conflict");
        assert_eq!(SkipReason::NotFound.as_str(), "not_found");
    }

    #[test]
    fn test_change_record_serializes_path_as_string() {
        let record = ChangeRecord {
            path: Path::parse("resources.limits.cpu").unwrap(),
            kind: ChangeKind::Set,
            previous_value: None,
            new_value: Some(ConfigNode::Scalar(helmwise_yaml::Scalar::Str(
                "500m".into(),
            ))),
            rationale: "throttling observed".into(),
        };
        let json: serde_json::Value = serde_json::to_value(&record).unwrap();
        assert_eq!(json["path"], "resources.limits.cpu");
        assert_eq!(json["action"], "set");
        assert_eq!(json["new_value"], "500m");
        assert!(json.get("previous_value").is_none());
    }
}
