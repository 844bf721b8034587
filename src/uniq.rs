//! Uniqueness checking over collected values.

use std::collections::HashSet;

use serde::Serialize;
use serde_json::Value;

use crate::path::{collect_values, FieldPath};
use crate::{Error, Result};

/// Total and distinct counts for one collected value set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct UniquenessReport {
    pub total: usize,
    pub unique: usize,
}

/// Count total and distinct values.
///
/// Distinctness follows typed value equality: the number `1` and the string
/// `"1"` never compare equal. Pure counting; the policy on what the counts
/// mean lives in [`assert_unique`].
pub fn distinct_report(values: &[Value]) -> UniquenessReport {
    let distinct: HashSet<String> = values.iter().map(Value::to_string).collect();
    UniquenessReport {
        total: values.len(),
        unique: distinct.len(),
    }
}

/// Apply the uniqueness policy to collected values.
///
/// Zero matches is a failed check ([`Error::EmptyPath`]), not a vacuous
/// pass; `unique < total` fails with both counts
/// ([`Error::DuplicateValues`]). The `path` and `key` arguments label the
/// failure for diagnostics.
pub fn assert_unique(values: &[Value], path: &str, key: &str) -> Result<UniquenessReport> {
    let report = distinct_report(values);
    if report.total == 0 {
        return Err(Error::EmptyPath {
            path: path.to_string(),
            key: key.to_string(),
        });
    }
    if report.unique < report.total {
        return Err(Error::DuplicateValues {
            path: path.to_string(),
            key: key.to_string(),
            total: report.total,
            unique: report.unique,
        });
    }
    Ok(report)
}

/// Check that `key` is globally unique across every map reached by `path`.
///
/// # Example
///
/// ```rust
/// use serde_json::json;
///
/// let body = json!({"a": {"b": [{"x": 1}, {"x": 2}]}});
/// let report = assay::check_unique_in_path(&body, "a.b", "x").unwrap();
/// assert_eq!((report.total, report.unique), (2, 2));
/// ```
pub fn check_unique_in_path(root: &Value, path_spec: &str, key: &str) -> Result<UniquenessReport> {
    let path = FieldPath::parse(path_spec)?;
    let values = collect_values(root, &path, key)?;
    assert_unique(&values, path_spec, key)
}

/// Single-level variant: `key` must be unique inside the top-level sequence
/// field `field`.
///
/// Stricter than the path walk: the field must exist, must be a non-empty
/// sequence, and its first element must carry `key`. Each violation fails
/// fast with a descriptive error instead of degenerating to an empty
/// result.
pub fn check_unique(root: &Value, field: &str, key: &str) -> Result<UniquenessReport> {
    if key.trim().is_empty() {
        return Err(Error::BlankKey);
    }
    let level = match root {
        Value::Object(map) => map.get(field),
        _ => None,
    };
    let Some(level) = level else {
        return Err(Error::MissingField {
            field: field.to_string(),
        });
    };
    let Value::Array(items) = level else {
        return Err(Error::NotASequence {
            field: field.to_string(),
        });
    };
    if items.is_empty() {
        return Err(Error::NotASequence {
            field: field.to_string(),
        });
    }
    match items.first() {
        Some(Value::Object(first)) if first.contains_key(key) => {}
        _ => {
            return Err(Error::MissingKey {
                key: key.to_string(),
                field: field.to_string(),
            })
        }
    }

    let values: Vec<Value> = items
        .iter()
        .filter_map(|item| match item {
            Value::Object(map) => map.get(key).cloned(),
            _ => None,
        })
        .collect();

    assert_unique(&values, field, key)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn duplicate_values_fail_with_both_counts() {
        let root = json!({"branches": [{"id": 1}, {"id": 2}, {"id": 1}]});

        let err = check_unique_in_path(&root, "branches", "id").unwrap_err();

        match err {
            Error::DuplicateValues {
                total,
                unique,
                path,
                key,
            } => {
                assert_eq!((total, unique), (3, 2));
                assert_eq!((path.as_str(), key.as_str()), ("branches", "id"));
            }
            other => panic!("expected DuplicateValues, got {other:?}"),
        }
    }

    #[test]
    fn unique_values_pass_with_report() {
        let root = json!({"a": {"b": [{"x": 1}, {"x": 2}]}});

        let report = check_unique_in_path(&root, "a.b", "x").unwrap();

        assert_eq!(report, UniquenessReport { total: 2, unique: 2 });
    }

    #[test]
    fn zero_matches_fail_as_empty_path() {
        let root = json!({"a": 1});

        let err = check_unique_in_path(&root, "nothing.here", "id").unwrap_err();

        assert!(matches!(err, Error::EmptyPath { .. }));
    }

    #[test]
    fn primitive_kinds_never_compare_equal() {
        let report = distinct_report(&[json!(1), json!("1")]);

        assert_eq!(report, UniquenessReport { total: 2, unique: 2 });
    }

    #[test]
    fn distinct_report_is_pure_counting() {
        assert_eq!(
            distinct_report(&[]),
            UniquenessReport { total: 0, unique: 0 }
        );
        assert_eq!(
            distinct_report(&[json!("a"), json!("a"), json!("b")]),
            UniquenessReport { total: 3, unique: 2 }
        );
    }

    #[test]
    fn single_level_variant_passes_on_unique_ids() {
        let root = json!({"branches": [{"id": 1}, {"id": 2}]});

        let report = check_unique(&root, "branches", "id").unwrap();

        assert_eq!(report, UniquenessReport { total: 2, unique: 2 });
    }

    #[test]
    fn single_level_variant_fails_fast_on_bad_input() {
        let root = json!({"branches": [{"id": 1}]});

        assert!(matches!(
            check_unique(&root, "missing", "id"),
            Err(Error::MissingField { .. })
        ));
        assert!(matches!(
            check_unique(&json!({"branches": 5}), "branches", "id"),
            Err(Error::NotASequence { .. })
        ));
        assert!(matches!(
            check_unique(&json!({"branches": []}), "branches", "id"),
            Err(Error::NotASequence { .. })
        ));
        assert!(matches!(
            check_unique(&root, "branches", "code"),
            Err(Error::MissingKey { .. })
        ));
        assert!(matches!(
            check_unique(&root, "branches", "  "),
            Err(Error::BlankKey)
        ));
    }

    #[test]
    fn single_level_variant_matches_the_path_walk() {
        let root = json!({"branches": [{"id": 1}, {"id": 2}, {"id": 1}]});

        let via_level = check_unique(&root, "branches", "id").unwrap_err();
        let via_path = check_unique_in_path(&root, "branches", "id").unwrap_err();

        assert_eq!(via_level.to_string(), via_path.to_string());
    }
}
