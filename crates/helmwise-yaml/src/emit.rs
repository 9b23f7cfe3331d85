//! Rendering documents back to YAML text.

use crate::document::Document;
use crate::error::{Error, Result};
use crate::node::{ConfigNode, Scalar};
use yaml_rust2::yaml::Hash;
use yaml_rust2::{Yaml, YamlEmitter};

impl Document {
    /// Serialize back to YAML text.
    ///
    /// Format-stable: rendering a freshly parsed, unmodified document
    /// reproduces an equivalent tree on re-parse (key order, sequence order,
    /// scalar values). Scalar canonicalization follows the emitter's quoting
    /// rules: a string whose lexeme would re-parse as a number, boolean, or
    /// null is quoted; all other strings (`500m`, `1Gi`) are emitted bare.
    /// Floats render the lexeme they were parsed with.
    ///
    /// # Errors
    ///
    /// [`Error::Emit`] if the emitter fails; this does not happen for trees
    /// produced by [`crate::parse`] or by path edits.
    pub fn render(&self) -> Result<String> {
        let yaml = yaml_from_node(self.root());
        let mut out = String::new();
        let mut emitter = YamlEmitter::new(&mut out);
        emitter.dump(&yaml).map_err(|err| Error::Emit {
            message: err.to_string(),
        })?;

        // The emitter prefixes a `---` document marker; values files carry none.
        let body = out.strip_prefix("---").unwrap_or(&out);
        let body = body
            .strip_prefix('\n')
            .or_else(|| body.strip_prefix(' '))
            .unwrap_or(body);

        let mut text = body.to_string();
        if !text.ends_with('\n') {
            text.push('\n');
        }
        Ok(text)
    }
}

fn yaml_from_node(node: &ConfigNode) -> Yaml {
    match node {
        ConfigNode::Scalar(scalar) => yaml_from_scalar(scalar),
        ConfigNode::Sequence(items) => Yaml::Array(items.iter().map(yaml_from_node).collect()),
        ConfigNode::Mapping(entries) => {
            let mut hash = Hash::new();
            for (key, value) in entries {
                hash.insert(Yaml::String(key.clone()), yaml_from_node(value));
            }
            Yaml::Hash(hash)
        }
    }
}

fn yaml_from_scalar(scalar: &Scalar) -> Yaml {
    match scalar {
        Scalar::Str(s) => Yaml::String(s.clone()),
        Scalar::Int(i) => Yaml::Integer(*i),
        Scalar::Float(lexeme) => Yaml::Real(lexeme.clone()),
        Scalar::Bool(b) => Yaml::Boolean(*b),
        Scalar::Null => Yaml::Null,
    }
}

#[cfg(test)]
mod tests {
    use crate::parser::parse;
    use crate::path::Path;

    fn round_trip(text: &str) {
        let doc = parse(text).unwrap();
        let rendered = doc.render().unwrap();
        let reparsed = parse(&rendered).unwrap();
        assert_eq!(
            reparsed.root(),
            doc.root(),
            "round-trip changed structure:\n{}",
            rendered
        );
    }

    #[test]
    fn test_round_trip_flat_mapping() {
        round_trip("replicas: 2\nname: app");
    }

    #[test]
    fn test_round_trip_nested() {
        round_trip(
            "resources:\n  limits:\n    cpu: 500m\n    memory: 1Gi\n  requests:\n    cpu: 100m",
        );
    }

    #[test]
    fn test_round_trip_sequences() {
        round_trip("tolerations:\n  - key: gpu\n    operator: Exists\n  - key: spot");
    }

    #[test]
    fn test_round_trip_scalar_types() {
        round_trip("count: 3\nratio: 0.50\nenabled: true\nempty: null\ntag: v1.2.3");
    }

    #[test]
    fn test_round_trip_numeric_looking_string() {
        // A quoted numeric string must stay a string across the round-trip.
        let doc = parse("version: \"1234\"").unwrap();
        let rendered = doc.render().unwrap();
        let reparsed = parse(&rendered).unwrap();
        assert_eq!(reparsed.root(), doc.root());
    }

    #[test]
    fn test_render_has_no_document_marker() {
        let doc = parse("a: 1").unwrap();
        let rendered = doc.render().unwrap();
        assert!(!rendered.starts_with("---"));
        assert!(rendered.ends_with('\n'));
    }

    #[test]
    fn test_render_preserves_key_order() {
        let doc = parse("zeta: 1\nalpha: 2").unwrap();
        let rendered = doc.render().unwrap();
        let zeta = rendered.find("zeta").unwrap();
        let alpha = rendered.find("alpha").unwrap();
        assert!(zeta < alpha);
    }

    #[test]
    fn test_render_after_edit() {
        let doc = parse("replicas: 2").unwrap();
        let updated = doc
            .set(
                &Path::parse("resources.limits.memory").unwrap(),
                crate::ConfigNode::Scalar(crate::Scalar::Str("1Gi".into())),
            )
            .unwrap();
        let rendered = updated.render().unwrap();
        let reparsed = parse(&rendered).unwrap();
        assert_eq!(reparsed.root(), updated.root());
    }
}
