//! Completeness checks on a merged config.

use super::InvalidConfig;
use super::types::{NormalizedConfig, Position};

/// Ensure a merged config can drive a comparison.
///
/// The `before` URL may be optional, e.g. when comparing against
/// previously cached output.
pub fn validate(config: &NormalizedConfig, need_before: bool) -> Result<(), InvalidConfig> {
    if need_before && config.before.url.is_none() {
        return Err(InvalidConfig::MissingUrl(Position::Before));
    }
    if config.after.url.is_none() {
        return Err(InvalidConfig::MissingUrl(Position::After));
    }
    if config.paths.is_empty() {
        return Err(InvalidConfig::MissingPaths);
    }
    Ok(())
}
