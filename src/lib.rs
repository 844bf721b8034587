//! # Assay - API response checking toolkit
//!
//! Helper routines for an API-testing harness: flatten nested response
//! documents into tables, walk dotted field paths across heterogeneous
//! collections, assert uniqueness of identifier fields, run assertions over
//! captured responses, and generate synthetic request data.
//!
//! ## Modules
//!
//! - **table**: flatten nested documents and lay them out as tables
//! - **path**: multi-valued dot-path traversal with sequence fan-out
//! - **uniq**: uniqueness counting and policy
//! - **check**: response assertions over a captured [`ResponseSnapshot`]
//! - **gen**: synthetic test-data generators
//! - **cycle**: explicit-cursor value rotation
//!
//! ## Tabularizing a response
//!
//! ```rust
//! use serde_json::json;
//!
//! let body = json!({
//!     "timestamp": "2024-05-01T12:00:00Z",
//!     "items": [
//!         {"id": 1, "v": "x"},
//!         {"id": 2, "v": "y"}
//!     ]
//! });
//!
//! let table = assay::tabularize(&body).unwrap();
//! assert_eq!(table.headers, vec!["timestamp", "id", "v"]);
//! assert_eq!(table.rows[0], vec!["2024-05-01T12:00:00Z", "1", "x"]);
//! ```
//!
//! ## Checking uniqueness along a path
//!
//! ```rust
//! use serde_json::json;
//!
//! let body = json!({"branches": [{"id": 1}, {"id": 2}, {"id": 1}]});
//!
//! let err = assay::check_unique_in_path(&body, "branches", "id").unwrap_err();
//! assert!(matches!(err, assay::Error::DuplicateValues { total: 3, unique: 2, .. }));
//! ```

pub mod check;
pub mod cycle;
pub mod error;
pub mod gen;
mod node;
pub mod path;
pub mod table;
pub mod uniq;

// Re-export the commonly used types at the crate root
pub use check::{CheckOutcome, ResponseSnapshot};
pub use error::{Error, Result};
pub use path::{collect_values, FieldPath};
pub use table::{flatten, flatten_at, tabularize, FlatRecord, Table};
pub use uniq::{
    assert_unique, check_unique, check_unique_in_path, distinct_report, UniquenessReport,
};

/// Tabularize a raw body without failing on unparseable input.
///
/// A body that does not parse as JSON still produces a table - a single row
/// describing the error - so the visualizer always has something to render.
/// The caller keeps the raw text for its own diagnostics.
pub fn tabularize_text(body: &str) -> Table {
    match serde_json::from_str::<serde_json::Value>(body) {
        Ok(doc) => match tabularize(&doc) {
            Ok(table) => table,
            Err(err) => error_table("FlattenError", err.to_string()),
        },
        Err(err) => error_table("ParseError", err.to_string()),
    }
}

fn error_table(name: &str, message: String) -> Table {
    Table {
        headers: vec!["error.name".to_string(), "error.message".to_string()],
        rows: vec![vec![name.to_string(), message]],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_entry_point_parses_and_tabularizes() {
        let table = tabularize_text(r#"{"items": [{"id": 1}, {"id": 2}]}"#);

        assert_eq!(table.headers, vec!["id"]);
        assert_eq!(table.rows, vec![vec!["1"], vec!["2"]]);
    }

    #[test]
    fn unparseable_body_becomes_an_error_table() {
        let table = tabularize_text("<html>not json</html>");

        assert_eq!(table.headers, vec!["error.name", "error.message"]);
        assert_eq!(table.rows.len(), 1);
        assert_eq!(table.rows[0][0], "ParseError");
        assert!(!table.rows[0][1].is_empty());
    }
}
