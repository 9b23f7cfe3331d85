//! Human- and machine-readable change summaries.

use crate::types::{ChangeKind, ChangeRecord, SkippedOperation};
use serde_json::json;
use std::fmt::Write;

/// Format the audit trail as a deterministic, ordered report.
///
/// One line per applied change (`path: previous -> new (rationale)`), one
/// line per skipped operation (`path: skipped (reason)`), in the order they
/// occurred. An empty batch reports `No changes made`.
pub fn render_summary(changes: &[ChangeRecord], skipped: &[SkippedOperation]) -> String {
    if changes.is_empty() && skipped.is_empty() {
        return "No changes made".to_string();
    }

    let mut out = String::new();
    for change in changes {
        match change.kind {
            ChangeKind::Delete => {
                let previous = change
                    .previous_value
                    .as_ref()
                    .map(|node| node.to_string())
                    .unwrap_or_default();
                let _ = writeln!(
                    out,
                    "- {}: removed (was {}) ({})",
                    change.path, previous, change.rationale
                );
            }
            ChangeKind::Set | ChangeKind::Merge => {
                let previous = change
                    .previous_value
                    .as_ref()
                    .map(|node| node.to_string())
                    .unwrap_or_else(|| "(unset)".to_string());
                let new = change
                    .new_value
                    .as_ref()
                    .map(|node| node.to_string())
                    .unwrap_or_default();
                let _ = writeln!(
                    out,
                    "- {}: {} -> {} ({})",
                    change.path, previous, new, change.rationale
                );
            }
        }
    }
    for skip in skipped {
        let _ = writeln!(
            out,
            "- {}: skipped ({})",
            skip.operation.path, skip.reason
        );
    }

    // Drop the trailing newline so callers control spacing.
    out.truncate(out.trim_end().len());
    out
}

/// Format the audit trail as pretty-printed JSON, for machine consumption.
///
/// # Errors
///
/// Propagates `serde_json` serialization errors; these do not occur for
/// well-formed records.
pub fn render_summary_json(
    changes: &[ChangeRecord],
    skipped: &[SkippedOperation],
) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&json!({
        "changes": changes,
        "skipped": skipped,
    }))
}
