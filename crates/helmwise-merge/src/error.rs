//! Error types for recommendation parsing and merging.

use helmwise_yaml::PathParseError;
use thiserror::Error;

/// A recommendation payload that cannot be accepted.
///
/// Fatal to the run: the whole batch is rejected before any change is
/// applied, because a malformed entry may indicate the upstream advice is
/// unreliable. Entry-level variants carry the zero-based index of the
/// offending entry.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RecommendError {
    /// The payload text is not structurally valid.
    #[error(transparent)]
    Payload(#[from] helmwise_yaml::Error),

    /// The payload root is not a mapping.
    #[error("recommendation payload must be a mapping")]
    PayloadNotMapping,

    /// The payload has no `recommendations` key.
    #[error("recommendation payload is missing the `recommendations` list")]
    MissingRecommendations,

    /// `recommendations` is present but not a sequence.
    #[error("`recommendations` must be a sequence")]
    RecommendationsNotSequence,

    /// An entry is not a mapping.
    #[error("recommendation {index}: entry must be a mapping")]
    EntryNotMapping { index: usize },

    /// An entry is missing a required field.
    #[error("recommendation {index}: missing `{field}`")]
    MissingField { index: usize, field: &'static str },

    /// A field that must be a string holds something else.
    #[error("recommendation {index}: `{field}` must be a string")]
    FieldNotString { index: usize, field: &'static str },

    /// The rationale is empty. Rationale is mandatory: it is the system's
    /// accountability mechanism.
    #[error("recommendation {index}: `reason` must not be empty")]
    EmptyRationale { index: usize },

    /// The action is not one of `set`, `merge`, `delete`.
    #[error("recommendation {index}: unknown action `{action}`")]
    UnknownAction { index: usize, action: String },

    /// The path expression does not parse.
    #[error("recommendation {index}: {source}")]
    BadPath {
        index: usize,
        source: PathParseError,
    },
}

/// A contract violation inside the merge engine.
///
/// Raised only for operations that are structurally invalid in a way the
/// recommendation parser should have caught. This is a defect, not a normal
/// outcome; per-operation soft failures go through the skip list instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MergeError {
    #[error("operation {index} is invalid: {reason}")]
    InvalidOperation { index: usize, reason: &'static str },
}
