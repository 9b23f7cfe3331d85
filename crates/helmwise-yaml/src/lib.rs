//! # helmwise-yaml
//!
//! Order-preserving YAML document model with path-addressed edits.
//!
//! This crate provides [`Document`], a typed configuration tree parsed from
//! YAML text. Mappings preserve key order, scalars keep enough of their source
//! lexeme to round-trip, and every edit (`set`/`delete`) returns a new
//! `Document` rather than mutating in place. This is the substrate the
//! merge engine in `helmwise-merge` operates on.
//!
//! ## Design
//!
//! The tree is a tagged union ([`ConfigNode`]): scalar, sequence, or mapping.
//! Invalid intermediate states (indexing into a scalar, keying a sequence)
//! are unrepresentable as values and surface as [`PathError`] on writes or
//! `None` on reads.
//!
//! ## Example
//!
//! ```rust
//! use helmwise_yaml::{parse, Path};
//!
//! let doc = parse("replicas: 2\nimage:\n  tag: v1").unwrap();
//! let path = Path::parse("image.tag").unwrap();
//! assert!(doc.get(&path).is_some());
//! ```

mod document;
mod emit;
mod error;
mod node;
mod parser;
mod path;

pub use document::Document;
pub use error::{Error, PathError, Result};
pub use node::{ConfigNode, Scalar};
pub use parser::{parse, parse_file};
pub use path::{Path, PathParseError, PathSegment};
