//! Laying a response payload out as a column-aligned table.

use std::collections::HashSet;

use serde::Serialize;
use serde_json::{Map, Value};

use crate::node::{cell_text, is_scalar};
use crate::table::flatten::{flatten, FlatRecord};
use crate::Result;

/// Column header used for the degenerate bare-scalar payload.
const SCALAR_COLUMN: &str = "value";

/// An ordered header list plus rows aligned to it.
///
/// Cells are already rendered as text; a key missing from a row renders as
/// the empty string. Headers and rows go to the external renderer verbatim.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

/// Lay a response payload out as a table.
///
/// A sequence payload is the main sequence itself. A map payload contributes
/// the value of its first sequence-valued key (in document order) as the
/// main sequence - first match wins, and that tie-break is part of the
/// contract - plus every scalar top-level field as a global value replicated
/// into each row. Nested maps at the top level are neither globals nor rows;
/// they are dropped from the global set. When no sequence-valued key exists,
/// the whole payload becomes a single row and the global set stays empty.
///
/// Global keys win collisions against flattened row keys of the same name.
///
/// Header order is first-occurrence order scanning rows top to bottom, each
/// row in its natural key order. An empty main sequence yields a zero-row,
/// zero-header table.
pub fn tabularize(payload: &Value) -> Result<Table> {
    let (main, globals) = split_payload(payload);

    let mut records = Vec::with_capacity(main.len());
    for element in main {
        let mut row: FlatRecord = globals.clone();
        for (key, value) in flatten(element)? {
            let key = if key.is_empty() {
                SCALAR_COLUMN.to_string()
            } else {
                key
            };
            row.entry(key).or_insert(value);
        }
        records.push(row);
    }

    Ok(align(records))
}

/// Split a payload into its main sequence and the global scalar fields.
fn split_payload(payload: &Value) -> (Vec<&Value>, FlatRecord) {
    match payload {
        Value::Array(seq) => (seq.iter().collect(), Map::new()),
        Value::Object(map) => {
            let main = map.values().find_map(|value| match value {
                Value::Array(seq) => Some(seq.iter().collect::<Vec<_>>()),
                _ => None,
            });
            match main {
                Some(main) => {
                    let globals = map
                        .iter()
                        .filter(|(_, value)| is_scalar(value))
                        .map(|(key, value)| (key.clone(), value.clone()))
                        .collect();
                    (main, globals)
                }
                None => (vec![payload], Map::new()),
            }
        }
        scalar => (vec![scalar], Map::new()),
    }
}

/// Align flattened rows to the union of their keys.
fn align(records: Vec<FlatRecord>) -> Table {
    let mut headers: Vec<String> = Vec::new();
    let mut seen: HashSet<String> = HashSet::new();
    for record in &records {
        for key in record.keys() {
            if seen.insert(key.clone()) {
                headers.push(key.clone());
            }
        }
    }

    let rows = records
        .iter()
        .map(|record| {
            headers
                .iter()
                .map(|header| record.get(header).map(cell_text).unwrap_or_default())
                .collect()
        })
        .collect();

    Table { headers, rows }
}
