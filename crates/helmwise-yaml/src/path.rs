//! Paths addressing nodes inside a configuration tree.

use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// One step of a [`Path`]: a mapping key or a sequence index.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathSegment {
    /// A mapping key.
    Key(String),

    /// A sequence index.
    Index(usize),
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathSegment::Key(key) => write!(f, "{}", key),
            PathSegment::Index(index) => write!(f, "[{}]", index),
        }
    }
}

/// An ordered sequence of segments identifying a node from the root.
///
/// Paths are written in the dot/bracket form used by recommendation payloads:
/// `resources.limits.cpu`, `tolerations[0].key`. [`Path::parse`] accepts that
/// form and `Display` reproduces it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Path {
    segments: Vec<PathSegment>,
}

/// Error produced when a path expression cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid path expression `{expr}`: {message}")]
pub struct PathParseError {
    /// The offending expression.
    pub expr: String,
    /// What was wrong with it.
    pub message: String,
}

impl Path {
    /// Parse a dot/bracket path expression.
    ///
    /// Grammar: segments separated by `.`, each a key optionally followed by
    /// one or more `[index]` suffixes. A leading `[index]` chain (sequence
    /// root) is accepted. The empty expression is rejected, so a successfully
    /// parsed `Path` is always non-empty.
    ///
    /// # Errors
    ///
    /// Returns [`PathParseError`] on empty expressions, empty segments
    /// (`a..b`, trailing dot), unterminated brackets, and non-numeric indices.
    pub fn parse(expr: &str) -> Result<Self, PathParseError> {
        let err = |message: &str| PathParseError {
            expr: expr.to_string(),
            message: message.to_string(),
        };

        if expr.is_empty() {
            return Err(err("path must not be empty"));
        }

        let mut segments = Vec::new();
        let mut rest = expr;
        loop {
            let end = rest.find(['.', '[']).unwrap_or(rest.len());
            let key = &rest[..end];
            if key.is_empty() {
                // Only a bracket may follow an empty key, and only where a
                // sequence index is grammatical (start of the expression or
                // right after a closing bracket handled below).
                if !rest[end..].starts_with('[') || !segments.is_empty() {
                    return Err(err("empty path segment"));
                }
            } else {
                segments.push(PathSegment::Key(key.to_string()));
            }
            rest = &rest[end..];

            while let Some(after_open) = rest.strip_prefix('[') {
                let close = after_open
                    .find(']')
                    .ok_or_else(|| err("unterminated `[`"))?;
                let index = after_open[..close]
                    .parse::<usize>()
                    .map_err(|_| err("index must be a non-negative integer"))?;
                segments.push(PathSegment::Index(index));
                rest = &after_open[close + 1..];
            }

            if rest.is_empty() {
                break;
            }
            rest = rest
                .strip_prefix('.')
                .ok_or_else(|| err("expected `.` or `[` between segments"))?;
            if rest.is_empty() {
                return Err(err("trailing `.`"));
            }
        }

        Ok(Path { segments })
    }

    /// Build a path from already-constructed segments.
    pub fn from_segments(segments: Vec<PathSegment>) -> Self {
        Path { segments }
    }

    /// The segments of this path, in root-to-leaf order.
    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    /// Number of segments.
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Whether the path has no segments (addresses the root).
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            if i > 0 && matches!(segment, PathSegment::Key(_)) {
                write!(f, ".")?;
            }
            write!(f, "{}", segment)?;
        }
        Ok(())
    }
}

impl FromStr for Path {
    type Err = PathParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Path::parse(s)
    }
}

impl Serialize for Path {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
