//! Registry of sanitizer tool keys.
//!
//! Each recognised tool key is either array-valued (lists accumulate when
//! configs are combined) or scalar-valued (the first value set wins). The
//! table is data, not code, so the sanitizer can register additional keys
//! without touching the normalizer or merger.

use indexmap::IndexMap;

/// How a tool key combines across globals, positions and includes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToolKind {
    /// Values are sequences that concatenate.
    Array,
    /// A single value; the left-most definition wins.
    Scalar,
}

/// Lookup table from tool key to its [`ToolKind`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolKeySet {
    kinds: IndexMap<String, ToolKind>,
}

impl ToolKeySet {
    /// A registry with no tool keys at all.
    pub fn empty() -> Self {
        Self {
            kinds: IndexMap::new(),
        }
    }

    /// The sanitizer's built-in tools: DOM transforms and regex
    /// sanitization rules accumulate; the content selector and the
    /// whitespace toggle are single-valued.
    pub fn sanitizer() -> Self {
        Self::empty()
            .with_key("dom_transform", ToolKind::Array)
            .with_key("sanitization", ToolKind::Array)
            .with_key("selector", ToolKind::Scalar)
            .with_key("remove_spacing", ToolKind::Scalar)
    }

    /// Register (or reclassify) a key.
    pub fn with_key(mut self, key: impl Into<String>, kind: ToolKind) -> Self {
        self.kinds.insert(key.into(), kind);
        self
    }

    pub fn kind(&self, key: &str) -> Option<ToolKind> {
        self.kinds.get(key).copied()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.kinds.contains_key(key)
    }

    pub fn array_keys(&self) -> impl Iterator<Item = &str> {
        self.keys_of(ToolKind::Array)
    }

    pub fn scalar_keys(&self) -> impl Iterator<Item = &str> {
        self.keys_of(ToolKind::Scalar)
    }

    fn keys_of(&self, kind: ToolKind) -> impl Iterator<Item = &str> {
        self.kinds
            .iter()
            .filter(move |(_, k)| **k == kind)
            .map(|(key, _)| key.as_str())
    }
}

impl Default for ToolKeySet {
    fn default() -> Self {
        Self::sanitizer()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitizer_registry_partitions_keys() {
        let tools = ToolKeySet::sanitizer();
        let arrays: Vec<_> = tools.array_keys().collect();
        let scalars: Vec<_> = tools.scalar_keys().collect();
        assert_eq!(arrays, vec!["dom_transform", "sanitization"]);
        assert_eq!(scalars, vec!["selector", "remove_spacing"]);
    }

    #[test]
    fn default_is_sanitizer() {
        assert_eq!(ToolKeySet::default(), ToolKeySet::sanitizer());
    }

    #[test]
    fn with_key_extends_registry() {
        let tools = ToolKeySet::sanitizer().with_key("ignore_whitespace", ToolKind::Scalar);
        assert_eq!(tools.kind("ignore_whitespace"), Some(ToolKind::Scalar));
        assert!(tools.contains("selector"));
    }

    #[test]
    fn with_key_reclassifies_existing_key() {
        let tools = ToolKeySet::sanitizer().with_key("selector", ToolKind::Array);
        assert_eq!(tools.kind("selector"), Some(ToolKind::Array));
        assert!(tools.array_keys().any(|k| k == "selector"));
        assert!(!tools.scalar_keys().any(|k| k == "selector"));
    }

    #[test]
    fn unknown_key_has_no_kind() {
        assert_eq!(ToolKeySet::empty().kind("selector"), None);
    }
}
