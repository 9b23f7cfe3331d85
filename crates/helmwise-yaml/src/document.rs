//! A parsed configuration document.

use crate::error::PathError;
use crate::node::ConfigNode;
use crate::path::Path;

/// A configuration document: a root [`ConfigNode`] plus source metadata.
///
/// Documents are immutable from the caller's point of view: `set` and
/// `delete` return new documents. Concurrent readers can therefore share a
/// document freely, though the merge pipeline itself is single-threaded.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    root: ConfigNode,
    source_name: Option<String>,
}

impl Document {
    /// Create a document from a root node.
    pub fn new(root: ConfigNode) -> Self {
        Document {
            root,
            source_name: None,
        }
    }

    /// Attach a source name (file name) used in error messages.
    pub fn with_source_name(mut self, name: impl Into<String>) -> Self {
        self.source_name = Some(name.into());
        self
    }

    /// The root of the tree.
    pub fn root(&self) -> &ConfigNode {
        &self.root
    }

    /// Consume the document, returning the root node.
    pub fn into_root(self) -> ConfigNode {
        self.root
    }

    /// The source name, when parsed via [`crate::parse_file`].
    pub fn source_name(&self) -> Option<&str> {
        self.source_name.as_deref()
    }

    /// Resolve a path. `None` if any segment does not resolve.
    pub fn get(&self, path: &Path) -> Option<&ConfigNode> {
        self.root.get(path)
    }

    /// Return a new document with `value` at `path`. See [`ConfigNode::set`].
    pub fn set(&self, path: &Path, value: ConfigNode) -> Result<Document, PathError> {
        Ok(Document {
            root: self.root.set(path, value)?,
            source_name: self.source_name.clone(),
        })
    }

    /// Return a new document with the node at `path` removed; unchanged when
    /// the path does not resolve.
    pub fn delete(&self, path: &Path) -> Document {
        Document {
            root: self.root.delete(path),
            source_name: self.source_name.clone(),
        }
    }
}
