//! Raw YAML documents and the tagged value type used at the parsing boundary.
//!
//! `serde_yaml_ng` parses the file into its own dynamic value; we convert
//! that into [`Value`] right away so the rest of the resolver only ever
//! sees the handful of shapes a config file can actually contain.

use indexmap::IndexMap;
use serde::Serialize;
use std::path::Path;

use super::InvalidConfig;

/// Ordered mapping of string keys to values.
pub type Mapping = IndexMap<String, Value>;

/// A dynamically-typed config value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    Null,
    Bool(bool),
    Integer(i64),
    Float(f64),
    String(String),
    Sequence(Vec<Value>),
    Mapping(Mapping),
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Render a scalar as a string. Collections and null yield `None`.
    pub fn to_scalar_string(&self) -> Option<String> {
        match self {
            Value::String(s) => Some(s.clone()),
            Value::Integer(i) => Some(i.to_string()),
            Value::Float(f) => Some(f.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            Value::Null | Value::Sequence(_) | Value::Mapping(_) => None,
        }
    }

    /// Coerce into a list: null is empty, a sequence is itself, anything
    /// else is a one-element list.
    pub fn into_sequence(self) -> Vec<Value> {
        match self {
            Value::Null => Vec::new(),
            Value::Sequence(items) => items,
            other => vec![other],
        }
    }

    fn from_yaml(value: serde_yaml_ng::Value, path: &Path) -> Result<Self, InvalidConfig> {
        use serde_yaml_ng::Value as Yaml;

        Ok(match value {
            Yaml::Null => Value::Null,
            Yaml::Bool(b) => Value::Bool(b),
            Yaml::Number(n) => match n.as_i64() {
                Some(i) => Value::Integer(i),
                None => Value::Float(n.as_f64().unwrap_or(f64::NAN)),
            },
            Yaml::String(s) => Value::String(s),
            Yaml::Sequence(items) => Value::Sequence(
                items
                    .into_iter()
                    .map(|item| Value::from_yaml(item, path))
                    .collect::<Result<_, _>>()?,
            ),
            Yaml::Mapping(map) => Value::Mapping(mapping_from_yaml(map, path)?),
            Yaml::Tagged(tagged) => Value::from_yaml(tagged.value, path)?,
        })
    }
}

fn mapping_from_yaml(map: serde_yaml_ng::Mapping, path: &Path) -> Result<Mapping, InvalidConfig> {
    let mut out = Mapping::with_capacity(map.len());
    for (key, value) in map {
        let key = Value::from_yaml(key, path)?
            .to_scalar_string()
            .ok_or_else(|| InvalidConfig::UnsupportedKey {
                path: path.to_path_buf(),
            })?;
        out.insert(key, Value::from_yaml(value, path)?);
    }
    Ok(out)
}

/// A parsed but not yet normalized config file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawDocument {
    entries: Mapping,
}

impl RawDocument {
    /// Parse YAML text. The root must be a mapping; an empty or `null`
    /// document is rejected like any other scalar root.
    pub fn parse(content: &str, path: &Path) -> Result<Self, InvalidConfig> {
        let not_a_mapping = || InvalidConfig::NotAMapping {
            path: path.to_path_buf(),
        };

        let blank = content.lines().all(|line| {
            let line = line.trim();
            line.is_empty() || line.starts_with('#')
        });
        if blank {
            return Err(not_a_mapping());
        }

        let yaml: serde_yaml_ng::Value =
            serde_yaml_ng::from_str(content).map_err(|source| InvalidConfig::Syntax {
                path: path.to_path_buf(),
                source,
            })?;

        match Value::from_yaml(yaml, path)? {
            Value::Mapping(entries) => Ok(Self { entries }),
            _ => Err(not_a_mapping()),
        }
    }

    /// Look up a top-level key, treating explicit `null` as absent.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key).filter(|v| !v.is_null())
    }

    /// Top-level keys in document order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl From<Mapping> for RawDocument {
    fn from(entries: Mapping) -> Self {
        Self { entries }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(content: &str) -> Result<RawDocument, InvalidConfig> {
        RawDocument::parse(content, Path::new("test.yaml"))
    }

    #[test]
    fn parses_nested_values_in_order() {
        let doc = parse(
            r#"
paths: [a, b]
before:
  url: http://before.test
  selector: '#main'
curl_opts:
  timeout: 30
  verbose: true
"#,
        )
        .unwrap();

        let keys: Vec<_> = doc.keys().collect();
        assert_eq!(keys, vec!["paths", "before", "curl_opts"]);

        let Some(Value::Mapping(opts)) = doc.get("curl_opts") else {
            panic!("expected curl_opts mapping");
        };
        assert_eq!(opts.get("timeout"), Some(&Value::Integer(30)));
        assert_eq!(opts.get("verbose"), Some(&Value::Bool(true)));
    }

    #[test]
    fn empty_and_null_roots_are_rejected() {
        for content in ["", "  \n", "~\n", "null\n", "# only a comment\n"] {
            let err = parse(content).unwrap_err();
            assert!(
                matches!(err, InvalidConfig::NotAMapping { .. }),
                "{content:?}: {err:?}"
            );
        }
        assert!(parse("{}\n").unwrap().is_empty());
    }

    #[test]
    fn non_mapping_root_is_rejected() {
        let err = parse("- just\n- a list\n").unwrap_err();
        assert!(matches!(err, InvalidConfig::NotAMapping { .. }));
    }

    #[test]
    fn syntax_error_names_the_file() {
        let err = parse("before: [unterminated").unwrap_err();
        assert!(matches!(err, InvalidConfig::Syntax { .. }));
        assert!(err.to_string().contains("test.yaml"));
    }

    #[test]
    fn null_entries_read_as_absent() {
        let doc = parse("selector: ~\n").unwrap();
        assert!(doc.get("selector").is_none());
        assert_eq!(doc.keys().count(), 1);
    }

    #[test]
    fn scalar_keys_are_stringified() {
        let doc = parse("before:\n  404: missing\n").unwrap();
        let Some(Value::Mapping(before)) = doc.get("before") else {
            panic!("expected before mapping");
        };
        assert_eq!(before.get("404"), Some(&Value::String("missing".into())));
    }

    #[test]
    fn collection_keys_are_rejected() {
        let err = parse("? [a, b]\n: value\n").unwrap_err();
        assert!(matches!(err, InvalidConfig::UnsupportedKey { .. }));
    }

    #[test]
    fn tags_are_stripped() {
        let doc = parse("selector: !css '#content'\n").unwrap();
        assert_eq!(doc.get("selector").and_then(Value::as_str), Some("#content"));
    }

    #[test]
    fn into_sequence_wraps_scalars() {
        assert!(Value::Null.into_sequence().is_empty());
        assert_eq!(
            Value::String("x".into()).into_sequence(),
            vec![Value::String("x".into())]
        );
        assert_eq!(
            Value::Sequence(vec![Value::Integer(1)]).into_sequence(),
            vec![Value::Integer(1)]
        );
    }
}
