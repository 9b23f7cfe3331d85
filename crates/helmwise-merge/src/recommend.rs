//! Validation and normalization of recommendation payloads.
//!
//! The payload is itself a structural document: a mapping with an ordered
//! `recommendations` list, each entry carrying `path`, `action`, `value`
//! (absent for deletes), and `reason`. It is parsed as YAML, which also
//! accepts the JSON that reasoning services emit.

use crate::error::RecommendError;
use crate::types::{ChangeKind, ChangeOperation, Recommendation};
use helmwise_yaml::{ConfigNode, Path};
use indexmap::IndexMap;

/// Parse and validate a raw recommendation payload.
///
/// Returns the ordered change operations plus the optional pass-through
/// `analysis` text. Duplicate target paths are not an error; ordering is
/// preserved so the merge engine applies them as given (later entries win on
/// conflict).
///
/// # Errors
///
/// [`RecommendError`] on an unparsable payload or any structurally invalid
/// entry, naming the zero-based entry index. The whole batch is rejected:
/// a malformed entry may indicate the upstream advice is unreliable.
pub fn parse_recommendations(raw_payload: &str) -> Result<Recommendation, RecommendError> {
    let document = helmwise_yaml::parse(raw_payload)?;
    let root = document
        .root()
        .as_mapping()
        .ok_or(RecommendError::PayloadNotMapping)?;

    let analysis = root
        .get("analysis")
        .and_then(ConfigNode::as_str)
        .map(str::to_string);

    let list = root
        .get("recommendations")
        .ok_or(RecommendError::MissingRecommendations)?;
    let entries = list
        .as_sequence()
        .ok_or(RecommendError::RecommendationsNotSequence)?;

    let mut operations = Vec::with_capacity(entries.len());
    for (index, entry) in entries.iter().enumerate() {
        operations.push(parse_entry(index, entry)?);
    }

    Ok(Recommendation {
        analysis,
        operations,
    })
}

fn parse_entry(index: usize, entry: &ConfigNode) -> Result<ChangeOperation, RecommendError> {
    let map = entry
        .as_mapping()
        .ok_or(RecommendError::EntryNotMapping { index })?;

    let expr = string_field(map, index, "path")?;
    let path = Path::parse(expr).map_err(|source| RecommendError::BadPath { index, source })?;

    let action = string_field(map, index, "action")?;
    let kind = match action {
        "set" => ChangeKind::Set,
        "merge" => ChangeKind::Merge,
        "delete" => ChangeKind::Delete,
        other => {
            return Err(RecommendError::UnknownAction {
                index,
                action: other.to_string(),
            });
        }
    };

    let reason = string_field(map, index, "reason")?;
    if reason.trim().is_empty() {
        return Err(RecommendError::EmptyRationale { index });
    }

    let value = match kind {
        ChangeKind::Delete => None,
        ChangeKind::Set | ChangeKind::Merge => Some(
            map.get("value")
                .ok_or(RecommendError::MissingField {
                    index,
                    field: "value",
                })?
                .clone(),
        ),
    };

    Ok(ChangeOperation {
        path,
        kind,
        value,
        rationale: reason.to_string(),
    })
}

fn string_field<'a>(
    map: &'a IndexMap<String, ConfigNode>,
    index: usize,
    field: &'static str,
) -> Result<&'a str, RecommendError> {
    map.get(field)
        .ok_or(RecommendError::MissingField { index, field })?
        .as_str()
        .ok_or(RecommendError::FieldNotString { index, field })
}
