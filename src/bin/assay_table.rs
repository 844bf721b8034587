//! assay-table: lay a JSON response body out as a table.
//!
//! Usage:
//!   # Read from file, output aligned text
//!   assay-table response.json
//!
//!   # Read from stdin
//!   echo '{"items": [{"id": 1}]}' | assay-table
//!
//!   # Tab-separated output for further processing
//!   assay-table --format tsv response.json
//!
//!   # Headers/rows envelope for an external renderer
//!   assay-table --format json response.json

// Use MiMalloc allocator (recommended by simd-json)
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use anyhow::{Context, Result};
use assay::Table;
use clap::{Parser, ValueEnum};
use std::fs::File;
use std::io::Read;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    /// Column-aligned plain text
    Text,
    /// Tab-separated values
    Tsv,
    /// JSON envelope with `headers` and `rows`
    Json,
}

#[derive(Parser, Debug)]
#[command(name = "assay-table")]
#[command(about = "Lay a JSON response body out as a table", long_about = None)]
struct Args {
    /// Input file (use stdin if omitted)
    #[arg(value_name = "FILE")]
    input: Option<String>,

    /// Output format
    #[arg(long, value_enum, default_value_t = Format::Text)]
    format: Format,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let bytes = read_input(args.input.as_deref())?;
    let table = build_table(bytes)?;

    match args.format {
        Format::Text => print!("{}", render_text(&table)),
        Format::Tsv => print!("{}", render_tsv(&table)),
        Format::Json => println!("{}", serde_json::to_string_pretty(&table)?),
    }

    Ok(())
}

fn read_input(path: Option<&str>) -> Result<Vec<u8>> {
    let mut bytes = Vec::new();
    match path {
        Some(path) => {
            File::open(path)
                .with_context(|| format!("failed to open {path}"))?
                .read_to_end(&mut bytes)
                .with_context(|| format!("failed to read {path}"))?;
        }
        None => {
            std::io::stdin()
                .read_to_end(&mut bytes)
                .context("failed to read stdin")?;
        }
    }
    Ok(bytes)
}

/// SIMD parse fast path; anything it rejects falls back to the tolerant
/// text entry point, which renders unparseable input as an error table.
fn build_table(bytes: Vec<u8>) -> Result<Table> {
    let mut scratch = bytes.clone();
    match simd_json::serde::from_slice::<serde_json::Value>(&mut scratch) {
        Ok(doc) => Ok(assay::tabularize(&doc)?),
        Err(_) => Ok(assay::tabularize_text(&String::from_utf8_lossy(&bytes))),
    }
}

fn render_text(table: &Table) -> String {
    if table.headers.is_empty() {
        return String::new();
    }

    let mut widths: Vec<usize> = table.headers.iter().map(String::len).collect();
    for row in &table.rows {
        for (i, cell) in row.iter().enumerate() {
            if cell.len() > widths[i] {
                widths[i] = cell.len();
            }
        }
    }

    let mut out = String::new();
    push_row(&mut out, &table.headers, &widths);
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    push_row(&mut out, &rule, &widths);
    for row in &table.rows {
        push_row(&mut out, row, &widths);
    }
    out
}

fn push_row(out: &mut String, cells: &[String], widths: &[usize]) {
    let line: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(cell, &width)| format!("{cell:<width$}"))
        .collect();
    out.push_str(line.join("  ").trim_end());
    out.push('\n');
}

fn render_tsv(table: &Table) -> String {
    let mut out = String::new();
    if !table.headers.is_empty() {
        out.push_str(&table.headers.join("\t"));
        out.push('\n');
    }
    for row in &table.rows {
        out.push_str(&row.join("\t"));
        out.push('\n');
    }
    out
}
