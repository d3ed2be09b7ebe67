//! sitediff: configuration resolver for before/after website comparisons
//! (library crate).
//!
//! Re-exports public modules for integration tests and external use.

pub mod config;
pub mod constants;

pub use config::{Config, ConfigError, InvalidConfig};
