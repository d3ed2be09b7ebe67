//! Combine two normalized configs.
//!
//! Merge semantics (`first` is the higher-precedence side):
//! - `paths`: concatenated, first then second, duplicates kept
//! - array tools: concatenated, first then second
//! - scalars (`url`, scalar tools, `curl_opts`, other keys): first wins
//!   unless it is absent or null
//!
//! The operation is not commutative; callers pick the order.

use indexmap::IndexMap;

use super::document::Value;
use super::types::{NormalizedConfig, SideConfig};

/// Merge `second` into `first`, keeping `first`'s values where both are set.
pub fn merge(first: NormalizedConfig, second: NormalizedConfig) -> NormalizedConfig {
    let mut paths = first.paths;
    paths.extend(second.paths);

    NormalizedConfig {
        before: merge_side(first.before, second.before),
        after: merge_side(first.after, second.after),
        paths,
        curl_opts: left_biased(first.curl_opts, second.curl_opts),
    }
}

fn merge_side(first: SideConfig, second: SideConfig) -> SideConfig {
    let mut arrays = first.arrays;
    for (key, values) in second.arrays {
        arrays.entry(key).or_default().extend(values);
    }

    SideConfig {
        url: first.url.or(second.url),
        arrays,
        scalars: merge_scalars(first.scalars, second.scalars),
        curl_opts: left_biased(first.curl_opts, second.curl_opts),
        extra: merge_scalars(first.extra, second.extra),
    }
}

fn merge_scalars(
    mut first: IndexMap<String, Value>,
    second: IndexMap<String, Value>,
) -> IndexMap<String, Value> {
    for (key, value) in second {
        match first.get(&key) {
            Some(existing) if !existing.is_null() => {}
            _ => {
                first.insert(key, value);
            }
        }
    }
    first
}

fn left_biased(first: Option<Value>, second: Option<Value>) -> Option<Value> {
    match first {
        Some(value) if !value.is_null() => Some(value),
        _ => second,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn s(value: &str) -> Value {
        Value::String(value.to_string())
    }

    fn with_before(f: impl FnOnce(&mut SideConfig)) -> NormalizedConfig {
        let mut conf = NormalizedConfig::default();
        f(&mut conf.before);
        conf
    }

    #[test]
    fn scalar_is_left_biased() {
        let first = with_before(|b| {
            b.scalars.insert("selector".into(), s("a"));
        });
        let second = with_before(|b| {
            b.scalars.insert("selector".into(), s("b"));
        });
        let merged = merge(first, second);
        assert_eq!(merged.before.scalar("selector"), Some(&s("a")));
    }

    #[test]
    fn scalar_falls_back_to_second() {
        let first = with_before(|b| {
            b.scalars.insert("selector".into(), Value::Null);
        });
        let second = with_before(|b| {
            b.scalars.insert("selector".into(), s("b"));
            b.scalars.insert("remove_spacing".into(), Value::Bool(true));
        });
        let merged = merge(first, second);
        assert_eq!(merged.before.scalar("selector"), Some(&s("b")));
        assert_eq!(merged.before.scalar("remove_spacing"), Some(&Value::Bool(true)));
    }

    #[test]
    fn arrays_concatenate_in_order() {
        let first = with_before(|b| {
            b.arrays.insert("dom_transform".into(), vec![s("X")]);
        });
        let second = with_before(|b| {
            b.arrays.insert("dom_transform".into(), vec![s("Y")]);
            b.arrays.insert("sanitization".into(), vec![s("Z")]);
        });
        let merged = merge(first, second);
        assert_eq!(merged.before.array("dom_transform"), &[s("X"), s("Y")]);
        assert_eq!(merged.before.array("sanitization"), &[s("Z")]);
    }

    #[test]
    fn paths_concatenate_with_duplicates() {
        let first = NormalizedConfig {
            paths: vec!["/a".into(), "/b".into()],
            ..Default::default()
        };
        let second = NormalizedConfig {
            paths: vec!["/b".into()],
            ..Default::default()
        };
        assert_eq!(merge(first, second).paths, vec!["/a", "/b", "/b"]);
    }

    #[test]
    fn url_is_left_biased() {
        let mut first = NormalizedConfig::default();
        first.after.url = Some("http://first".into());
        let mut second = NormalizedConfig::default();
        second.after.url = Some("http://second".into());
        second.before.url = Some("http://second-before".into());

        let merged = merge(first, second);
        assert_eq!(merged.after.url.as_deref(), Some("http://first"));
        assert_eq!(merged.before.url.as_deref(), Some("http://second-before"));
    }

    #[test]
    fn curl_opts_is_left_biased() {
        let first = NormalizedConfig::default();
        let mut second = NormalizedConfig::default();
        second.curl_opts = Some(s("opts"));
        second.before.curl_opts = Some(s("opts"));

        let merged = merge(first, second);
        assert_eq!(merged.curl_opts, Some(s("opts")));
        assert_eq!(merged.before.curl_opts, Some(s("opts")));
    }

    #[test]
    fn empty_first_side_takes_second_verbatim() {
        let second = with_before(|b| {
            b.url = Some("http://x".into());
            b.arrays.insert("dom_transform".into(), vec![s("X")]);
            b.extra.insert("note".into(), s("kept"));
        });
        let merged = merge(NormalizedConfig::default(), second.clone());
        assert_eq!(merged.before, second.before);
    }

    #[test]
    fn merge_is_not_commutative() {
        let a = with_before(|b| {
            b.scalars.insert("selector".into(), s("a"));
        });
        let b = with_before(|b| {
            b.scalars.insert("selector".into(), s("b"));
        });
        assert_ne!(merge(a.clone(), b.clone()), merge(b, a));
    }
}
