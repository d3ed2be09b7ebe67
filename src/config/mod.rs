//! Configuration loading, normalization and include resolution.
//!
//! A config file describes a "before" and an "after" site plus the paths to
//! compare. Files may pull in other files through `includes`; those are
//! resolved depth-first and merged in as lower-precedence supplements.

pub mod document;
pub mod include;
pub mod loader;
pub mod merge;
pub mod normalize;
pub mod tools;
pub mod types;
pub mod validation;

use std::path::PathBuf;
use thiserror::Error;

pub use document::{RawDocument, Value};
pub use include::{IncludeResolver, IncludeVisitSet};
pub use loader::Config;
pub use merge::merge;
pub use normalize::{normalize, normalize_paths};
pub use tools::{ToolKeySet, ToolKind};
pub use types::{NormalizedConfig, Position, SideConfig};

/// Errors during config resolution.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing config file {path}")]
    NotFound { path: PathBuf },

    #[error("failed to read config file {path}: {source}")]
    ReadFile {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error(transparent)]
    Invalid(#[from] InvalidConfig),
}

/// A config that was found but cannot be used.
#[derive(Error, Debug)]
pub enum InvalidConfig {
    #[error("failed to parse config file {path}: {source}")]
    Syntax {
        path: PathBuf,
        source: serde_yaml_ng::Error,
    },

    #[error("invalid configuration file {path}: top level must be a mapping")]
    NotAMapping { path: PathBuf },

    #[error("invalid configuration file {path}: mapping keys must be scalars")]
    UnsupportedKey { path: PathBuf },

    #[error("unknown configuration key ({path}): '{key}'")]
    UnknownKey { key: String, path: PathBuf },

    #[error("invalid value for '{key}' ({path}): expected {expected}")]
    InvalidValue {
        key: String,
        path: PathBuf,
        expected: &'static str,
    },

    #[error("circular dependency: {path}")]
    CircularInclude { path: PathBuf },

    #[error("undefined '{0}' base URL")]
    MissingUrl(Position),

    #[error("undefined 'paths'")]
    MissingPaths,
}

impl ConfigError {
    /// Whether the error is an [`InvalidConfig`] rather than a missing or
    /// unreadable file.
    pub fn is_invalid(&self) -> bool {
        matches!(self, ConfigError::Invalid(_))
    }
}
