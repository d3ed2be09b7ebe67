//! App-wide constants.
//!
//! Centralises the tool name, default config filename and environment
//! variable names so a rename only requires changing this file.

/// Display name of the tool (lowercase).
pub const APP_NAME: &str = "sitediff";

/// Config filename looked up in the base directory when none is given.
pub const CONFIG_FILENAME: &str = "sitediff.yaml";

/// Crate version, shown by `--version`.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// ── Environment variable names ──────────────────────────────────────

/// Base directory used to find the default config file.
pub const ENV_DIR: &str = "SITEDIFF_DIR";

/// Log filter directive (same syntax as `RUST_LOG`).
pub const ENV_LOG: &str = "SITEDIFF_LOG";
