//! YAML parsing into [`Document`] trees.

use crate::document::Document;
use crate::error::{Error, Result};
use crate::node::{ConfigNode, Scalar};
use indexmap::IndexMap;
use yaml_rust2::{Yaml, YamlLoader};

/// Parse YAML text into a [`Document`].
///
/// Parses a single document; a multi-document stream keeps only the first.
///
/// # Example
///
/// ```rust
/// use helmwise_yaml::parse;
///
/// let doc = parse("replicas: 2").unwrap();
/// assert!(doc.root().is_mapping());
/// ```
///
/// # Errors
///
/// [`Error::Parse`] on syntactically invalid input (the message carries the
/// scanner's line and column), [`Error::EmptyDocument`] when the input holds
/// no document.
pub fn parse(content: &str) -> Result<Document> {
    parse_impl(content, None)
}

/// Parse YAML text with an associated source name.
///
/// The name is recorded on the document and prefixes error messages.
///
/// # Errors
///
/// Same as [`parse`].
pub fn parse_file(content: &str, name: &str) -> Result<Document> {
    parse_impl(content, Some(name))
}

fn parse_impl(content: &str, name: Option<&str>) -> Result<Document> {
    let docs = YamlLoader::load_from_str(content).map_err(|err| Error::Parse {
        source_name: name.map(str::to_string),
        message: err.to_string(),
    })?;

    let first = docs.into_iter().next().ok_or_else(|| Error::EmptyDocument {
        source_name: name.map(str::to_string),
    })?;

    let root = node_from_yaml(first, name)?;
    let document = Document::new(root);
    Ok(match name {
        Some(name) => document.with_source_name(name),
        None => document,
    })
}

fn node_from_yaml(yaml: Yaml, name: Option<&str>) -> Result<ConfigNode> {
    match yaml {
        Yaml::Array(items) => {
            let items = items
                .into_iter()
                .map(|item| node_from_yaml(item, name))
                .collect::<Result<Vec<_>>>()?;
            Ok(ConfigNode::Sequence(items))
        }
        Yaml::Hash(hash) => {
            let mut entries = IndexMap::with_capacity(hash.len());
            for (key, value) in hash {
                entries.insert(key_string(key, name)?, node_from_yaml(value, name)?);
            }
            Ok(ConfigNode::Mapping(entries))
        }
        other => Ok(ConfigNode::Scalar(scalar_from_yaml(other, name)?)),
    }
}

/// Mapping keys are normalized to strings; non-scalar keys are rejected.
fn key_string(key: Yaml, name: Option<&str>) -> Result<String> {
    match key {
        Yaml::String(s) => Ok(s),
        Yaml::Integer(i) => Ok(i.to_string()),
        Yaml::Real(lexeme) => Ok(lexeme),
        Yaml::Boolean(b) => Ok(b.to_string()),
        other => Err(Error::Parse {
            source_name: name.map(str::to_string),
            message: format!("unsupported mapping key: {:?}", other),
        }),
    }
}

fn scalar_from_yaml(yaml: Yaml, name: Option<&str>) -> Result<Scalar> {
    match yaml {
        Yaml::String(s) => Ok(Scalar::Str(s)),
        Yaml::Integer(i) => Ok(Scalar::Int(i)),
        Yaml::Real(lexeme) => Ok(Scalar::Float(lexeme)),
        Yaml::Boolean(b) => Ok(Scalar::Bool(b)),
        Yaml::Null => Ok(Scalar::Null),
        other => Err(Error::Parse {
            source_name: name.map(str::to_string),
            message: format!("unresolved YAML node: {:?}", other),
        }),
    }
}
