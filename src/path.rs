//! Multi-valued dot-path traversal.
//!
//! A path names map fields only; sequences encountered along the way fan the
//! frontier out over their elements. Frontier items missing a segment are
//! dropped silently: heterogeneous collections are expected, and absence of
//! a nested field on some elements is not an error.

use serde_json::Value;

use crate::{Error, Result};

/// A parsed, validated dot-separated field path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldPath {
    segments: Vec<String>,
}

impl FieldPath {
    /// Parse a dot-delimited path like `catalogItems.branches.availability`.
    ///
    /// The path must be non-empty and every segment non-blank.
    pub fn parse(spec: &str) -> Result<Self> {
        if spec.trim().is_empty() {
            return Err(Error::EmptyPathSpec);
        }
        let segments: Vec<String> = spec.split('.').map(str::to_string).collect();
        for (index, segment) in segments.iter().enumerate() {
            if segment.trim().is_empty() {
                return Err(Error::BlankSegment { index });
            }
        }
        Ok(FieldPath { segments })
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }
}

impl std::fmt::Display for FieldPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.segments.join("."))
    }
}

/// Walk `root` along `path` and collect `terminal_key` values from every
/// matched leaf map.
///
/// Each path segment replaces the frontier: a segment resolving to a
/// sequence splices all its elements in (one-to-many fan-out), any other
/// present value is pushed as-is, and frontier items that are not maps or do
/// not carry the segment are dropped. After the last segment, the value of
/// `terminal_key` is read from every frontier item that is a map carrying
/// it.
///
/// Order follows traversal order: map iteration order crossed with sequence
/// index order. An empty result is not an error here; the uniqueness policy
/// decides what zero matches means.
pub fn collect_values(root: &Value, path: &FieldPath, terminal_key: &str) -> Result<Vec<Value>> {
    if terminal_key.trim().is_empty() {
        return Err(Error::BlankKey);
    }

    let mut frontier: Vec<&Value> = vec![root];

    for segment in path.segments() {
        let mut next = Vec::new();
        for item in frontier {
            let Value::Object(map) = item else { continue };
            match map.get(segment) {
                Some(Value::Array(seq)) => next.extend(seq.iter()),
                Some(value) => next.push(value),
                None => {}
            }
        }
        frontier = next;
    }

    let values = frontier
        .into_iter()
        .filter_map(|item| match item {
            Value::Object(map) => map.get(terminal_key).cloned(),
            _ => None,
        })
        .collect();

    Ok(values)
}
