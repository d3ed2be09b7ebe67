//! Config file loading and the top-level [`Config`] object.
//!
//! Resolution order (highest precedence first):
//! 1. the root config file (`sitediff.yaml` unless given explicitly)
//! 2. its includes, depth-first in listed order
//! 3. the built-in empty default

use std::path::{Path, PathBuf};
use tracing::debug;

use super::document::RawDocument;
use super::include::IncludeResolver;
use super::merge::merge;
use super::normalize::normalize_paths;
use super::tools::ToolKeySet;
use super::types::{NormalizedConfig, SideConfig};
use super::validation;
use super::{ConfigError, InvalidConfig};
use crate::constants::CONFIG_FILENAME;

/// Top-level keys accepted in addition to the registered tool keys.
pub const RESERVED_KEYS: &[&str] = &[
    "paths",
    "before",
    "after",
    "before_url",
    "after_url",
    "includes",
    "curl_opts",
];

/// Read and parse a config file, rejecting unknown top-level keys.
pub fn load_raw(path: &Path, tools: &ToolKeySet) -> Result<RawDocument, ConfigError> {
    let expanded = expand_path(path);
    debug!(path = %expanded.display(), "reading config file");

    let content = std::fs::read_to_string(&expanded).map_err(|source| {
        if source.kind() == std::io::ErrorKind::NotFound {
            ConfigError::NotFound {
                path: expanded.clone(),
            }
        } else {
            ConfigError::ReadFile {
                path: expanded.clone(),
                source,
            }
        }
    })?;

    let doc = RawDocument::parse(&content, path)?;

    if let Some(key) = doc
        .keys()
        .find(|key| !RESERVED_KEYS.contains(key) && !tools.contains(key))
    {
        return Err(InvalidConfig::UnknownKey {
            key: key.to_string(),
            path: path.to_path_buf(),
        }
        .into());
    }

    Ok(doc)
}

/// Make `path` absolute without touching the filesystem. A leading `~`
/// component is replaced by the user's home directory; anything else is
/// resolved against the current directory. `~user` forms are left alone.
pub fn expand_path(path: &Path) -> PathBuf {
    let path = expand_home(path);
    std::path::absolute(&path).unwrap_or(path)
}

/// Replace a leading `~` component with the home directory, if known.
pub(crate) fn expand_home(path: &Path) -> PathBuf {
    let Ok(rest) = path.strip_prefix("~") else {
        return path.to_path_buf();
    };
    match dirs::home_dir() {
        Some(home) if rest.as_os_str().is_empty() => home,
        Some(home) => home.join(rest),
        None => path.to_path_buf(),
    }
}

/// A fully resolved configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    inner: NormalizedConfig,
}

impl Config {
    /// Load `file`, or `dir/sitediff.yaml` when no file is given, using the
    /// built-in sanitizer tool registry.
    pub fn new(file: Option<&Path>, dir: &Path) -> Result<Self, ConfigError> {
        Self::with_tools(file, dir, &ToolKeySet::default())
    }

    /// Like [`Config::new`] with a caller-supplied tool registry.
    pub fn with_tools(
        file: Option<&Path>,
        dir: &Path,
        tools: &ToolKeySet,
    ) -> Result<Self, ConfigError> {
        let files: Vec<PathBuf> = file.map(Path::to_path_buf).into_iter().collect();
        Self::from_files(&files, dir, tools)
    }

    /// Load several root files, merged left to right onto the default.
    /// Each root gets its own include visit set.
    pub fn from_files(
        files: &[PathBuf],
        dir: &Path,
        tools: &ToolKeySet,
    ) -> Result<Self, ConfigError> {
        let default_file = [dir.join(CONFIG_FILENAME)];
        let files = if files.is_empty() { &default_file[..] } else { files };

        let resolver = IncludeResolver::new(tools);
        let mut inner = NormalizedConfig::default();
        for file in files {
            let file = expand_path(file);
            if !file.exists() {
                return Err(ConfigError::NotFound { path: file });
            }
            inner = merge(inner, resolver.resolve(&file)?);
        }

        Ok(Self { inner })
    }

    pub fn before(&self) -> &SideConfig {
        &self.inner.before
    }

    pub fn after(&self) -> &SideConfig {
        &self.inner.after
    }

    pub fn paths(&self) -> &[String] {
        &self.inner.paths
    }

    /// Replace the path list. Entries are normalized like file paths are.
    pub fn set_paths<I, S>(&mut self, paths: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.inner.paths = normalize_paths(paths);
    }

    pub fn curl_opts(&self) -> Option<&super::Value> {
        self.inner.curl_opts.as_ref()
    }

    /// Check the config is complete enough to run a comparison.
    pub fn validate(&self, need_before: bool) -> Result<(), InvalidConfig> {
        validation::validate(&self.inner, need_before)
    }

    /// Serialize the resolved config back to YAML.
    pub fn to_yaml(&self) -> Result<String, serde_yaml_ng::Error> {
        serde_yaml_ng::to_string(&self.inner)
    }
}

impl From<NormalizedConfig> for Config {
    fn from(inner: NormalizedConfig) -> Self {
        Self { inner }
    }
}
