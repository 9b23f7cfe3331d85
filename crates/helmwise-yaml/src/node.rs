//! The configuration tree: scalars, sequences, and order-preserving mappings.

use crate::error::PathError;
use crate::path::{Path, PathSegment};
use indexmap::IndexMap;
use serde::{Serialize, Serializer};
use std::fmt;

/// A scalar leaf value.
///
/// Floats keep the lexeme they were parsed with (the `yaml-rust2::Yaml::Real`
/// approach) so that rendering is format-stable: `0.50` does not silently
/// become `0.5` on round-trip.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    Str(String),
    Int(i64),
    /// Floating-point value, stored as its source lexeme.
    Float(String),
    Bool(bool),
    Null,
}

impl Scalar {
    /// Get the string value if this is a `Str`.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Scalar::Str(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Str(s) => write!(f, "{}", s),
            Scalar::Int(i) => write!(f, "{}", i),
            Scalar::Float(lexeme) => write!(f, "{}", lexeme),
            Scalar::Bool(b) => write!(f, "{}", b),
            Scalar::Null => write!(f, "null"),
        }
    }
}

/// One node of the configuration tree.
///
/// Owned exclusively by its parent; the root is owned by
/// [`crate::Document`]. Mapping keys are unique at each level and keep
/// insertion order.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigNode {
    Scalar(Scalar),
    Sequence(Vec<ConfigNode>),
    Mapping(IndexMap<String, ConfigNode>),
}

impl ConfigNode {
    /// Kind of this node, for error messages.
    pub fn kind_name(&self) -> &'static str {
        match self {
            ConfigNode::Scalar(_) => "scalar",
            ConfigNode::Sequence(_) => "sequence",
            ConfigNode::Mapping(_) => "mapping",
        }
    }

    /// Check if this is a scalar.
    pub fn is_scalar(&self) -> bool {
        matches!(self, ConfigNode::Scalar(_))
    }

    /// Check if this is a sequence.
    pub fn is_sequence(&self) -> bool {
        matches!(self, ConfigNode::Sequence(_))
    }

    /// Check if this is a mapping.
    pub fn is_mapping(&self) -> bool {
        matches!(self, ConfigNode::Mapping(_))
    }

    /// Get the scalar if this is a scalar node.
    pub fn as_scalar(&self) -> Option<&Scalar> {
        match self {
            ConfigNode::Scalar(scalar) => Some(scalar),
            _ => None,
        }
    }

    /// Get the string value if this is a string scalar.
    pub fn as_str(&self) -> Option<&str> {
        self.as_scalar().and_then(Scalar::as_str)
    }

    /// Get the items if this is a sequence.
    pub fn as_sequence(&self) -> Option<&[ConfigNode]> {
        match self {
            ConfigNode::Sequence(items) => Some(items),
            _ => None,
        }
    }

    /// Get the entries if this is a mapping.
    pub fn as_mapping(&self) -> Option<&IndexMap<String, ConfigNode>> {
        match self {
            ConfigNode::Mapping(entries) => Some(entries),
            _ => None,
        }
    }

    /// Resolve a path against this node.
    ///
    /// Returns `None` if any segment does not resolve: a missing mapping key,
    /// a sequence index out of range, or a segment applied to a scalar.
    pub fn get(&self, path: &Path) -> Option<&ConfigNode> {
        let mut current = self;
        for segment in path.segments() {
            current = match (segment, current) {
                (PathSegment::Key(key), ConfigNode::Mapping(map)) => map.get(key)?,
                (PathSegment::Index(index), ConfigNode::Sequence(items)) => items.get(*index)?,
                _ => return None,
            };
        }
        Some(current)
    }

    /// Return a new tree with `value` at `path`.
    ///
    /// Missing mapping keys along the path are created as empty mappings.
    /// A sequence index equal to the current length appends (append-by-one).
    ///
    /// # Errors
    ///
    /// [`PathError::EmptyPath`] when the path has no segments,
    /// [`PathError::TypeMismatch`] when an existing node along the path has
    /// the wrong shape for its segment, [`PathError::IndexOutOfBounds`] when
    /// a sequence index is past append-by-one.
    pub fn set(&self, path: &Path, value: ConfigNode) -> Result<ConfigNode, PathError> {
        if path.is_empty() {
            return Err(PathError::EmptyPath);
        }
        let mut root = self.clone();
        set_in(&mut root, path.segments(), 0, value, path)?;
        Ok(root)
    }

    /// Return a new tree with the node at `path` removed.
    ///
    /// A path that does not resolve leaves the tree unchanged; the caller
    /// (the merge engine) reports that case through its skip list.
    pub fn delete(&self, path: &Path) -> ConfigNode {
        let mut root = self.clone();
        delete_in(&mut root, path.segments());
        root
    }
}

impl fmt::Display for ConfigNode {
    /// Compact flow-style rendering, used in change summaries.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigNode::Scalar(scalar) => write!(f, "{}", scalar),
            ConfigNode::Sequence(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, "]")
            }
            ConfigNode::Mapping(entries) => {
                write!(f, "{{")?;
                for (i, (key, value)) in entries.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}: {}", key, value)?;
                }
                write!(f, "}}")
            }
        }
    }
}

impl Serialize for Scalar {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Scalar::Str(s) => serializer.serialize_str(s),
            Scalar::Int(i) => serializer.serialize_i64(*i),
            Scalar::Float(lexeme) => match lexeme.parse::<f64>() {
                Ok(value) => serializer.serialize_f64(value),
                Err(_) => serializer.serialize_str(lexeme),
            },
            Scalar::Bool(b) => serializer.serialize_bool(*b),
            Scalar::Null => serializer.serialize_unit(),
        }
    }
}

impl Serialize for ConfigNode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            ConfigNode::Scalar(scalar) => scalar.serialize(serializer),
            ConfigNode::Sequence(items) => serializer.collect_seq(items),
            ConfigNode::Mapping(entries) => serializer.collect_map(entries.iter()),
        }
    }
}

fn set_in(
    current: &mut ConfigNode,
    segments: &[PathSegment],
    pos: usize,
    value: ConfigNode,
    path: &Path,
) -> Result<(), PathError> {
    let segment = &segments[pos];
    let last = pos + 1 == segments.len();
    match (segment, current) {
        (PathSegment::Key(key), ConfigNode::Mapping(map)) => {
            if last {
                map.insert(key.clone(), value);
                Ok(())
            } else {
                let child = map
                    .entry(key.clone())
                    .or_insert_with(|| ConfigNode::Mapping(IndexMap::new()));
                set_in(child, segments, pos + 1, value, path)
            }
        }
        (PathSegment::Index(index), ConfigNode::Sequence(items)) => {
            if *index < items.len() {
                if last {
                    items[*index] = value;
                    Ok(())
                } else {
                    set_in(&mut items[*index], segments, pos + 1, value, path)
                }
            } else if *index == items.len() {
                // Append-by-one.
                if last {
                    items.push(value);
                    Ok(())
                } else {
                    let appended = items.len();
                    items.push(ConfigNode::Mapping(IndexMap::new()));
                    set_in(&mut items[appended], segments, pos + 1, value, path)
                }
            } else {
                Err(PathError::IndexOutOfBounds {
                    path: path.clone(),
                    index: *index,
                    len: items.len(),
                })
            }
        }
        (segment, node) => Err(PathError::TypeMismatch {
            path: path.clone(),
            segment: segment.clone(),
            found: node.kind_name(),
        }),
    }
}

fn delete_in(root: &mut ConfigNode, segments: &[PathSegment]) {
    let Some((target, parents)) = segments.split_last() else {
        return;
    };

    let mut node = root;
    for segment in parents {
        node = match (segment, node) {
            (PathSegment::Key(key), ConfigNode::Mapping(map)) => match map.get_mut(key) {
                Some(child) => child,
                None => return,
            },
            (PathSegment::Index(index), ConfigNode::Sequence(items)) => {
                match items.get_mut(*index) {
                    Some(child) => child,
                    None => return,
                }
            }
            _ => return,
        };
    }

    match (target, node) {
        (PathSegment::Key(key), ConfigNode::Mapping(map)) => {
            // shift_remove keeps the order of the remaining keys.
            map.shift_remove(key);
        }
        (PathSegment::Index(index), ConfigNode::Sequence(items)) => {
            if *index < items.len() {
                items.remove(*index);
            }
        }
        _ => {}
    }
}
