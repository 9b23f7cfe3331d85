//! # helmwise-merge
//!
//! The recommendation-to-configuration merge engine.
//!
//! Takes free-form structured advice (produced by an external reasoning
//! service) and deterministically applies it to an existing configuration
//! document, preserving untouched structure and producing an auditable
//! change list.
//!
//! # Pipeline
//!
//! 1. [`parse_recommendations`] validates the advice payload into ordered
//!    [`ChangeOperation`]s (fatal on any structurally invalid entry).
//! 2. [`apply`] runs the operations against a `Document`, producing a
//!    [`MergeResult`]: the new document, the ordered [`ChangeRecord`] audit
//!    trail, and the operations that were skipped (soft failures).
//! 3. [`render_summary`] / [`render_summary_json`] format the audit trail.
//!
//! A single questionable recommendation never aborts the batch: type
//! conflicts and deletes of missing paths are recorded as skipped and the
//! rest of the batch still applies.
//!
//! # Example
//!
//! ```rust
//! use helmwise_merge::{apply, parse_recommendations};
//!
//! let doc = helmwise_yaml::parse("replicas: 2").unwrap();
//! let payload = r#"
//! recommendations:
//!   - path: replicas
//!     action: set
//!     value: 3
//!     reason: p99 latency above threshold
//! "#;
//! let recommendation = parse_recommendations(payload).unwrap();
//! let result = apply(&doc, &recommendation.operations).unwrap();
//! assert_eq!(result.changes.len(), 1);
//! ```

mod engine;
mod error;
mod recommend;
mod summary;
mod types;

pub use engine::apply;
pub use error::{MergeError, RecommendError};
pub use recommend::parse_recommendations;
pub use summary::{render_summary, render_summary_json};
pub use types::{
    ChangeKind,
    ChangeOperation,
    ChangeRecord,
    MergeResult,
    Recommendation,
    SkipReason,
    SkippedOperation,
};
