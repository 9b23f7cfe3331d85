//! Error types for document parsing and path-addressed edits.

use crate::path::{Path, PathSegment};
use thiserror::Error;

/// Result type alias for helmwise-yaml operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while parsing or rendering a document.
///
/// These are fatal to the run that produced them: no partial document is
/// returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// The input is not syntactically valid YAML. The scanner message
    /// includes the line and column of the failure.
    #[error("{}: {message}", source_name.as_deref().unwrap_or("<input>"))]
    Parse {
        /// Name of the input, when parsed via [`crate::parse_file`].
        source_name: Option<String>,
        /// Scanner message, including position.
        message: String,
    },

    /// The input contained no YAML document at all.
    #[error("{}: no YAML document found", source_name.as_deref().unwrap_or("<input>"))]
    EmptyDocument { source_name: Option<String> },

    /// The emitter failed while serializing a document.
    #[error("failed to serialize document: {message}")]
    Emit { message: String },
}

/// Errors raised by writes through an incompatible shape.
///
/// Reads (`get`) report unresolvable paths as `None`; only writes produce
/// `PathError`. The merge engine treats these as per-operation soft failures,
/// never as batch failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PathError {
    /// A write was given a path with no segments. Whole-root replacement is
    /// not supported; a write must name a target inside the tree.
    #[error("empty path: a write must name a target")]
    EmptyPath,

    /// A segment tried to descend into a node of the wrong shape, e.g. a
    /// mapping key applied to a scalar or a sequence.
    #[error("`{path}`: cannot descend into {found} with `{segment}`")]
    TypeMismatch {
        /// The full target path of the write.
        path: Path,
        /// The segment that failed to apply.
        segment: PathSegment,
        /// Kind of the node actually found (`scalar`, `sequence`, `mapping`).
        found: &'static str,
    },

    /// A sequence write index beyond append-by-one.
    #[error("`{path}`: index {index} is out of bounds for sequence of length {len}")]
    IndexOutOfBounds {
        path: Path,
        index: usize,
        len: usize,
    },
}
