//! Normalize a raw document into a [`NormalizedConfig`].
//!
//! Config files may put tool settings and URLs at the top level as
//! shorthand for "both positions". Normalization folds those globals into
//! `before` and `after` so the merger only ever deals with one shape:
//!
//! - array tools: the position's own list, then the global list
//! - scalar tools: the position's value, else the global one
//! - `url`: the position's `url`, else `before_url` / `after_url`
//! - `curl_opts`: always the global value, even over a position-local one
//!
//! Every other top-level key (`includes` among them) is dropped.

use indexmap::IndexMap;
use std::path::Path;
use tracing::trace;

use super::InvalidConfig;
use super::document::{RawDocument, Value};
use super::tools::ToolKeySet;
use super::types::{NormalizedConfig, Position, SideConfig};

/// Normalize a whole document. `source` is only used for error messages.
pub fn normalize(
    doc: &RawDocument,
    tools: &ToolKeySet,
    source: &Path,
) -> Result<NormalizedConfig, InvalidConfig> {
    let before = normalize_side(doc, Position::Before, tools, source)?;
    let after = normalize_side(doc, Position::After, tools, source)?;
    let paths = normalize_paths(path_entries(doc, source)?);

    trace!(path = %source.display(), paths = paths.len(), "normalized config document");

    Ok(NormalizedConfig {
        before,
        after,
        paths,
        curl_opts: doc.get("curl_opts").cloned(),
    })
}

/// Prefix each path with `/` unless it already has one and strip trailing
/// whitespace. Leading whitespace is left alone.
pub fn normalize_paths<I, S>(paths: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    paths
        .into_iter()
        .map(|path| {
            let path = path.as_ref().trim_end();
            if path.starts_with('/') {
                path.to_string()
            } else {
                format!("/{path}")
            }
        })
        .collect()
}

fn normalize_side(
    doc: &RawDocument,
    position: Position,
    tools: &ToolKeySet,
    source: &Path,
) -> Result<SideConfig, InvalidConfig> {
    let mut local = match doc.get(position.as_str()) {
        None => IndexMap::new(),
        Some(Value::Mapping(map)) => map.clone(),
        Some(_) => return Err(invalid(position.as_str(), source, "a mapping")),
    };

    let mut side = SideConfig::default();

    side.url = match local.shift_remove("url") {
        Some(value) if !value.is_null() => Some(url_string(value, "url", source)?),
        _ => doc
            .get(position.url_key())
            .cloned()
            .map(|value| url_string(value, position.url_key(), source))
            .transpose()?,
    };

    for key in tools.array_keys() {
        let mut values = local
            .shift_remove(key)
            .map(Value::into_sequence)
            .unwrap_or_default();
        if let Some(global) = doc.get(key) {
            values.extend(global.clone().into_sequence());
        }
        side.arrays.insert(key.to_string(), values);
    }

    for key in tools.scalar_keys() {
        let value = local
            .shift_remove(key)
            .filter(|v| !v.is_null())
            .or_else(|| doc.get(key).cloned());
        if let Some(value) = value {
            side.scalars.insert(key.to_string(), value);
        }
    }

    local.shift_remove("curl_opts");
    side.curl_opts = doc.get("curl_opts").cloned();
    side.extra = local;

    Ok(side)
}

fn path_entries(doc: &RawDocument, source: &Path) -> Result<Vec<String>, InvalidConfig> {
    match doc.get("paths") {
        None => Ok(Vec::new()),
        Some(Value::Sequence(items)) => items
            .iter()
            .map(|item| {
                item.to_scalar_string()
                    .ok_or_else(|| invalid("paths", source, "a sequence of strings"))
            })
            .collect(),
        Some(_) => Err(invalid("paths", source, "a sequence of strings")),
    }
}

fn url_string(value: Value, key: &str, source: &Path) -> Result<String, InvalidConfig> {
    match value {
        Value::String(url) => Ok(url),
        _ => Err(invalid(key, source, "a string")),
    }
}

fn invalid(key: &str, source: &Path, expected: &'static str) -> InvalidConfig {
    InvalidConfig::InvalidValue {
        key: key.to_string(),
        path: source.to_path_buf(),
        expected,
    }
}
