//! Application of change operations to a document.

use crate::error::MergeError;
use crate::types::{
    ChangeKind, ChangeOperation, ChangeRecord, MergeResult, SkipReason, SkippedOperation,
};
use helmwise_yaml::{ConfigNode, Document};
use indexmap::IndexMap;

/// Apply a batch of operations to a document.
///
/// Operations are processed in the given order against a working document, so
/// later operations targeting an already-changed path see the updated value
/// (last-write-wins) and every record stays in the log. Paths the batch does
/// not target are preserved exactly.
///
/// Per-operation soft failures never abort the batch: a `Set`/`Merge` that
/// conflicts with the shape of the document is skipped as
/// [`SkipReason::TypeConflict`], a `Delete` of an unresolvable path as
/// [`SkipReason::NotFound`].
///
/// # Errors
///
/// [`MergeError::InvalidOperation`] only for operations that violate the
/// parser's contract (empty path, empty rationale, missing value for a
/// non-delete). That is a defect upstream, not a user error.
pub fn apply(document: &Document, operations: &[ChangeOperation]) -> Result<MergeResult, MergeError> {
    let mut working = document.clone();
    let mut changes = Vec::new();
    let mut skipped = Vec::new();

    for (index, operation) in operations.iter().enumerate() {
        check_contract(index, operation)?;
        match operation.kind {
            ChangeKind::Set => {
                let value = operation.value.clone().unwrap_or(ConfigNode::Scalar(
                    helmwise_yaml::Scalar::Null,
                ));
                apply_set(&mut working, operation, value, &mut changes, &mut skipped);
            }
            ChangeKind::Merge => {
                let incoming = operation.value.clone().unwrap_or(ConfigNode::Scalar(
                    helmwise_yaml::Scalar::Null,
                ));
                let value = match (working.get(&operation.path), &incoming) {
                    (Some(ConfigNode::Mapping(existing)), ConfigNode::Mapping(update)) => {
                        ConfigNode::Mapping(merge_mappings(existing, update))
                    }
                    // Either side not a mapping: merge degenerates to set.
                    _ => incoming,
                };
                apply_set(&mut working, operation, value, &mut changes, &mut skipped);
            }
            ChangeKind::Delete => match working.get(&operation.path).cloned() {
                None => skipped.push(SkippedOperation {
                    operation: operation.clone(),
                    reason: SkipReason::NotFound,
                }),
                Some(previous) => {
                    working = working.delete(&operation.path);
                    changes.push(ChangeRecord {
                        path: operation.path.clone(),
                        kind: operation.kind,
                        previous_value: Some(previous),
                        new_value: None,
                        rationale: operation.rationale.clone(),
                    });
                }
            },
        }
    }

    Ok(MergeResult {
        document: working,
        changes,
        skipped,
    })
}

/// Re-check what [`crate::parse_recommendations`] already guarantees, for
/// callers that construct operations directly. A failure here is a defect in
/// the caller, not in the advice.
fn check_contract(index: usize, operation: &ChangeOperation) -> Result<(), MergeError> {
    if operation.path.is_empty() {
        return Err(MergeError::InvalidOperation {
            index,
            reason: "path must not be empty",
        });
    }
    if operation.rationale.trim().is_empty() {
        return Err(MergeError::InvalidOperation {
            index,
            reason: "rationale must not be empty",
        });
    }
    if operation.kind != ChangeKind::Delete && operation.value.is_none() {
        return Err(MergeError::InvalidOperation {
            index,
            reason: "value is required for set and merge",
        });
    }
    Ok(())
}

fn apply_set(
    working: &mut Document,
    operation: &ChangeOperation,
    value: ConfigNode,
    changes: &mut Vec<ChangeRecord>,
    skipped: &mut Vec<SkippedOperation>,
) {
    let previous = working.get(&operation.path).cloned();
    match working.set(&operation.path, value.clone()) {
        Ok(updated) => {
            *working = updated;
            changes.push(ChangeRecord {
                path: operation.path.clone(),
                kind: operation.kind,
                previous_value: previous,
                new_value: Some(value),
                rationale: operation.rationale.clone(),
            });
        }
        // One bad recommendation must not abort the batch.
        Err(_) => skipped.push(SkippedOperation {
            operation: operation.clone(),
            reason: SkipReason::TypeConflict,
        }),
    }
}

/// Recursive union: keys from `update` override or add to `base`; where both
/// sides hold mappings the union recurses. Key order of `base` is kept, new
/// keys append.
fn merge_mappings(
    base: &IndexMap<String, ConfigNode>,
    update: &IndexMap<String, ConfigNode>,
) -> IndexMap<String, ConfigNode> {
    let mut out = base.clone();
    for (key, new_child) in update {
        let merged = match (out.get(key), new_child) {
            (Some(ConfigNode::Mapping(b)), ConfigNode::Mapping(n)) => {
                ConfigNode::Mapping(merge_mappings(b, n))
            }
            _ => new_child.clone(),
        };
        out.insert(key.clone(), merged);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use helmwise_yaml::{parse, Path, Scalar};

    fn scalar(s: &str) -> ConfigNode {
        ConfigNode::Scalar(Scalar::Str(s.into()))
    }

    fn int(i: i64) -> ConfigNode {
        ConfigNode::Scalar(Scalar::Int(i))
    }

    fn op(expr: &str, kind: ChangeKind, value: Option<ConfigNode>) -> ChangeOperation {
        ChangeOperation {
            path: Path::parse(expr).unwrap(),
            kind,
            value,
            rationale: "test rationale".into(),
        }
    }

    #[test]
    fn test_empty_batch_preserves_document() {
        let doc = parse("replicas: 2\nresources:\n  limits:\n    cpu: 500m").unwrap();
        let result = apply(&doc, &[]).unwrap();
        assert_eq!(result.document, doc);
        assert!(result.changes.is_empty());
        assert!(result.skipped.is_empty());
    }

    #[test]
    fn test_scenario_replicas_and_memory() {
        let doc = parse("replicas: 2\nresources:\n  limits:\n    cpu: 500m").unwrap();
        let operations = vec![
            ChangeOperation {
                path: Path::parse("replicas").unwrap(),
                kind: ChangeKind::Set,
                value: Some(int(3)),
                rationale: "p99 latency above threshold".into(),
            },
            ChangeOperation {
                path: Path::parse("resources.limits.memory").unwrap(),
                kind: ChangeKind::Set,
                value: Some(scalar("1Gi")),
                rationale: "OOM incidents observed".into(),
            },
        ];

        let result = apply(&doc, &operations).unwrap();
        assert_eq!(result.changes.len(), 2);
        assert!(result.skipped.is_empty());

        let out = &result.document;
        assert_eq!(out.get(&Path::parse("replicas").unwrap()), Some(&int(3)));
        assert_eq!(
            out.get(&Path::parse("resources.limits.memory").unwrap()),
            Some(&scalar("1Gi"))
        );
        // Untargeted path is untouched.
        assert_eq!(
            out.get(&Path::parse("resources.limits.cpu").unwrap()),
            Some(&scalar("500m"))
        );

        assert_eq!(result.changes[0].previous_value, Some(int(2)));
        assert_eq!(result.changes[1].previous_value, None);
        assert_eq!(result.changes[1].rationale, "OOM incidents observed");
    }

    #[test]
    fn test_set_idempotence() {
        let doc = parse("replicas: 2").unwrap();
        let operation = op("replicas", ChangeKind::Set, Some(int(3)));
        let result = apply(&doc, &[operation.clone(), operation]).unwrap();

        assert_eq!(result.changes.len(), 2);
        assert_eq!(
            result.document.get(&Path::parse("replicas").unwrap()),
            Some(&int(3))
        );
        // Second record sees the value the first one wrote.
        assert_eq!(result.changes[1].previous_value, Some(int(3)));
        assert_eq!(result.changes[1].previous_value, result.changes[1].new_value);
    }

    #[test]
    fn test_last_write_wins() {
        let doc = parse("replicas: 2").unwrap();
        let operations = vec![
            op("replicas", ChangeKind::Set, Some(int(3))),
            op("replicas", ChangeKind::Set, Some(int(5))),
        ];
        let result = apply(&doc, &operations).unwrap();

        assert_eq!(
            result.document.get(&Path::parse("replicas").unwrap()),
            Some(&int(5))
        );
        // Both records stay in the log, in order.
        assert_eq!(result.changes.len(), 2);
        assert_eq!(result.changes[0].new_value, Some(int(3)));
        assert_eq!(result.changes[1].new_value, Some(int(5)));
    }

    #[test]
    fn test_soft_failures_do_not_abort_batch() {
        let doc = parse("replicas: 2").unwrap();
        let operations = vec![
            op("resources.limits.cpu", ChangeKind::Delete, None),
            op("replicas", ChangeKind::Set, Some(int(4))),
        ];
        let result = apply(&doc, &operations).unwrap();

        assert_eq!(result.skipped.len(), 1);
        assert_eq!(result.skipped[0].reason, SkipReason::NotFound);
        assert_eq!(result.changes.len(), 1);
        assert_eq!(
            result.document.get(&Path::parse("replicas").unwrap()),
            Some(&int(4))
        );
    }

    #[test]
    fn test_set_through_scalar_skips_with_type_conflict() {
        let doc = parse("replicas: 2\nname: app").unwrap();
        let operations = vec![
            op("replicas.max", ChangeKind::Set, Some(int(5))),
            op("name", ChangeKind::Set, Some(scalar("renamed"))),
        ];
        let result = apply(&doc, &operations).unwrap();

        assert_eq!(result.skipped.len(), 1);
        assert_eq!(result.skipped[0].reason, SkipReason::TypeConflict);
        assert_eq!(result.changes.len(), 1);
        // The conflicting write left the document untouched.
        assert_eq!(
            result.document.get(&Path::parse("replicas").unwrap()),
            Some(&int(2))
        );
    }

    #[test]
    fn test_delete_records_previous_value() {
        let doc = parse("nodeSelector:\n  disk: ssd").unwrap();
        let result = apply(&doc, &[op("nodeSelector", ChangeKind::Delete, None)]).unwrap();

        assert_eq!(result.changes.len(), 1);
        let record = &result.changes[0];
        assert!(record.previous_value.is_some());
        assert_eq!(record.new_value, None);
        assert_eq!(
            result.document.get(&Path::parse("nodeSelector").unwrap()),
            None
        );
    }

    #[test]
    fn test_merge_deep_union() {
        let doc = parse("resources:\n  limits:\n    cpu: 500m\n  requests:\n    cpu: 100m")
            .unwrap();
        let update = parse("limits:\n  memory: 1Gi\nrequests:\n  cpu: 250m")
            .unwrap()
            .into_root();
        let result = apply(&doc, &[op("resources", ChangeKind::Merge, Some(update))]).unwrap();

        let out = &result.document;
        // Existing key survives, new key appends, overlapping key updates.
        assert_eq!(
            out.get(&Path::parse("resources.limits.cpu").unwrap()),
            Some(&scalar("500m"))
        );
        assert_eq!(
            out.get(&Path::parse("resources.limits.memory").unwrap()),
            Some(&scalar("1Gi"))
        );
        assert_eq!(
            out.get(&Path::parse("resources.requests.cpu").unwrap()),
            Some(&scalar("250m"))
        );
        assert_eq!(result.changes.len(), 1);
        assert_eq!(result.changes[0].kind, ChangeKind::Merge);
    }

    #[test]
    fn test_merge_on_scalar_behaves_as_set() {
        let doc = parse("replicas: 2").unwrap();
        let result = apply(&doc, &[op("replicas", ChangeKind::Merge, Some(int(6)))]).unwrap();
        assert_eq!(
            result.document.get(&Path::parse("replicas").unwrap()),
            Some(&int(6))
        );
    }

    #[test]
    fn test_merge_with_scalar_value_behaves_as_set() {
        let doc = parse("resources:\n  limits:\n    cpu: 500m").unwrap();
        let result = apply(
            &doc,
            &[op("resources", ChangeKind::Merge, Some(scalar("flattened")))],
        )
        .unwrap();
        assert_eq!(
            result.document.get(&Path::parse("resources").unwrap()),
            Some(&scalar("flattened"))
        );
    }

    #[test]
    fn test_empty_rationale_is_contract_violation() {
        let doc = parse("replicas: 2").unwrap();
        let operation = ChangeOperation {
            path: Path::parse("replicas").unwrap(),
            kind: ChangeKind::Set,
            value: Some(int(3)),
            rationale: "".into(),
        };
        let err = apply(&doc, &[operation]).unwrap_err();
        assert!(matches!(
            err,
            MergeError::InvalidOperation { index: 0, .. }
        ));
    }

    #[test]
    fn test_empty_path_is_contract_violation() {
        let doc = parse("replicas: 2").unwrap();
        let operation = ChangeOperation {
            path: Path::from_segments(Vec::new()),
            kind: ChangeKind::Set,
            value: Some(int(3)),
            rationale: "root swap".into(),
        };
        let err = apply(&doc, &[operation]).unwrap_err();
        assert!(matches!(
            err,
            MergeError::InvalidOperation { index: 0, .. }
        ));
    }

    #[test]
    fn test_missing_value_is_contract_violation() {
        let doc = parse("replicas: 2").unwrap();
        let operation = op("replicas", ChangeKind::Set, None);
        let err = apply(&doc, &[operation]).unwrap_err();
        assert!(matches!(
            err,
            MergeError::InvalidOperation { index: 0, .. }
        ));
    }

    #[test]
    fn test_input_document_is_not_mutated() {
        let doc = parse("replicas: 2").unwrap();
        let snapshot = doc.clone();
        let _ = apply(&doc, &[op("replicas", ChangeKind::Set, Some(int(9)))]).unwrap();
        assert_eq!(doc, snapshot);
    }
}
