//! Normalized config shapes shared by the normalizer, merger and `Config`.

use indexmap::IndexMap;
use serde::Serialize;
use std::fmt;

use super::document::Value;

/// One of the two compared website variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Position {
    Before,
    After,
}

impl Position {
    pub const ALL: [Position; 2] = [Position::Before, Position::After];

    pub fn as_str(self) -> &'static str {
        match self {
            Position::Before => "before",
            Position::After => "after",
        }
    }

    /// The top-level fallback URL key, e.g. `before_url`.
    pub fn url_key(self) -> &'static str {
        match self {
            Position::Before => "before_url",
            Position::After => "after_url",
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Settings for a single position after normalization.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SideConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Array-valued tool keys. Every registered array key is present.
    #[serde(flatten)]
    pub arrays: IndexMap<String, Vec<Value>>,
    /// Scalar-valued tool keys that have a value.
    #[serde(flatten)]
    pub scalars: IndexMap<String, Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub curl_opts: Option<Value>,
    /// Any other position-local keys, kept verbatim.
    #[serde(flatten)]
    pub extra: IndexMap<String, Value>,
}

impl SideConfig {
    pub fn array(&self, key: &str) -> &[Value] {
        self.arrays.get(key).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn scalar(&self, key: &str) -> Option<&Value> {
        self.scalars.get(key)
    }
}

/// The canonical `{before, after, paths, curl_opts}` shape.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct NormalizedConfig {
    pub before: SideConfig,
    pub after: SideConfig,
    pub paths: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub curl_opts: Option<Value>,
}

impl NormalizedConfig {
    pub fn side(&self, position: Position) -> &SideConfig {
        match position {
            Position::Before => &self.before,
            Position::After => &self.after,
        }
    }

    pub fn side_mut(&mut self, position: Position) -> &mut SideConfig {
        match position {
            Position::Before => &mut self.before,
            Position::After => &mut self.after,
        }
    }
}
