//! Flattening of nested documents into single-level path/value records.

use serde_json::{Map, Value};

use crate::node::{is_scalar, AncestorGuard};
use crate::Result;

/// A single-level mapping from path text to scalar leaf value.
///
/// Keys keep first-write position; a later write at an identical synthesized
/// key overwrites the value in place.
pub type FlatRecord = Map<String, Value>;

/// Flatten an arbitrarily nested document into a [`FlatRecord`].
///
/// Map children extend the path with `.key`, sequence elements with
/// `[index]`, and scalar leaves are copied verbatim under the accumulated
/// path. A bare scalar root lands under the empty-string key; callers that
/// need a display name for that column supply one (the tabularizer names it
/// `value`).
///
/// When a map key literally spells a synthesized index path (a key named
/// `"b[0]"` next to a sequence `b`), entries are processed in document order
/// and the later write wins at that key.
///
/// # Example
///
/// ```rust
/// use serde_json::json;
///
/// let flat = assay::flatten(&json!({"a": 1, "b": {"c": 2, "d": [3, 4]}})).unwrap();
/// assert_eq!(flat.get("a"), Some(&json!(1)));
/// assert_eq!(flat.get("b.c"), Some(&json!(2)));
/// assert_eq!(flat.get("b.d[0]"), Some(&json!(3)));
/// assert_eq!(flat.get("b.d[1]"), Some(&json!(4)));
/// ```
pub fn flatten(node: &Value) -> Result<FlatRecord> {
    flatten_at(node, "")
}

/// [`flatten`] with every synthesized path rooted under `prefix`.
pub fn flatten_at(node: &Value, prefix: &str) -> Result<FlatRecord> {
    let mut record = Map::new();
    let mut guard = AncestorGuard::default();
    flatten_into(node, prefix, &mut record, &mut guard)?;
    Ok(record)
}

fn flatten_into(
    node: &Value,
    prefix: &str,
    out: &mut FlatRecord,
    guard: &mut AncestorGuard,
) -> Result<()> {
    match node {
        Value::Object(map) => {
            guard.enter(node)?;
            for (key, child) in map {
                let path = if prefix.is_empty() {
                    key.clone()
                } else {
                    format!("{prefix}.{key}")
                };
                flatten_into(child, &path, out, guard)?;
            }
            guard.leave();
        }
        Value::Array(seq) => {
            guard.enter(node)?;
            for (index, element) in seq.iter().enumerate() {
                let path = format!("{prefix}[{index}]");
                if is_scalar(element) {
                    out.insert(path, element.clone());
                } else {
                    flatten_into(element, &path, out, guard)?;
                }
            }
            guard.leave();
        }
        scalar => {
            out.insert(prefix.to_string(), scalar.clone());
        }
    }
    Ok(())
}
