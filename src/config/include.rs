//! Recursive `includes` resolution with cycle detection.

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::debug;

use super::document::{RawDocument, Value};
use super::loader::{self, expand_home, expand_path};
use super::merge::merge;
use super::normalize::normalize;
use super::tools::ToolKeySet;
use super::types::NormalizedConfig;
use super::{ConfigError, InvalidConfig};

/// Canonical identities of the files visited during one resolution.
///
/// Entries are never removed, so a file reached twice through different
/// branches is reported the same way as a true cycle.
#[derive(Debug, Clone, Default)]
pub struct IncludeVisitSet {
    visited: HashSet<PathBuf>,
}

impl IncludeVisitSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, path: &Path) -> bool {
        self.visited.contains(path)
    }

    fn insert(&mut self, path: PathBuf) {
        self.visited.insert(path);
    }
}

/// Loads a file and everything it includes into one normalized config.
#[derive(Debug, Clone, Copy)]
pub struct IncludeResolver<'a> {
    tools: &'a ToolKeySet,
}

impl<'a> IncludeResolver<'a> {
    pub fn new(tools: &'a ToolKeySet) -> Self {
        Self { tools }
    }

    /// Resolve `file` with a fresh visit set.
    pub fn resolve(&self, file: &Path) -> Result<NormalizedConfig, ConfigError> {
        self.resolve_with(file, &mut IncludeVisitSet::new())
    }

    /// Resolve `file`, sharing `visited` with the caller.
    ///
    /// The file's own values take precedence over its includes, and earlier
    /// includes over later ones.
    pub fn resolve_with(
        &self,
        file: &Path,
        visited: &mut IncludeVisitSet,
    ) -> Result<NormalizedConfig, ConfigError> {
        let canonical = canonicalize(file)?;
        if visited.contains(&canonical) {
            return Err(InvalidConfig::CircularInclude { path: canonical }.into());
        }

        let doc = loader::load_raw(&canonical, self.tools)?;
        visited.insert(canonical.clone());

        let includes = include_entries(&doc, &canonical)?;
        let mut conf = normalize(&doc, self.tools, &canonical)?;

        let base = canonical.parent().unwrap_or_else(|| Path::new("/"));
        for include in includes {
            let dep = base.join(expand_home(&include));
            debug!(
                from = %canonical.display(),
                include = %dep.display(),
                "merging included config"
            );
            let included = self.resolve_with(&dep, visited)?;
            conf = merge(conf, included);
        }

        Ok(conf)
    }
}

/// Resolve symlinks and relative segments. A missing file reports the
/// expanded (not canonical) path the caller asked for.
fn canonicalize(file: &Path) -> Result<PathBuf, ConfigError> {
    std::fs::canonicalize(expand_path(file)).map_err(|source| {
        if source.kind() == std::io::ErrorKind::NotFound {
            ConfigError::NotFound {
                path: expand_path(file),
            }
        } else {
            ConfigError::ReadFile {
                path: expand_path(file),
                source,
            }
        }
    })
}

fn include_entries(doc: &RawDocument, source: &Path) -> Result<Vec<PathBuf>, InvalidConfig> {
    let invalid = || InvalidConfig::InvalidValue {
        key: "includes".to_string(),
        path: source.to_path_buf(),
        expected: "a sequence of file paths",
    };

    match doc.get("includes") {
        None => Ok(Vec::new()),
        Some(Value::Sequence(items)) => items
            .iter()
            .map(|item| item.as_str().map(PathBuf::from).ok_or_else(invalid))
            .collect(),
        Some(_) => Err(invalid()),
    }
}
