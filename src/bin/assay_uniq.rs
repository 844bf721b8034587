//! assay-uniq: check global uniqueness of a key along a dotted path.
//!
//! Usage:
//!   # Top-level sequence field
//!   assay-uniq --path branches --key id response.json
//!
//!   # Nested path with fan-out over every sequence along the way
//!   assay-uniq --path catalogItems.branches.availability --key date response.json
//!
//! Exits 0 when the values are unique, 1 when the check fails (duplicates
//! or nothing matched), and 2 on bad input.

// Use MiMalloc allocator (recommended by simd-json)
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use anyhow::{Context, Result};
use clap::Parser;
use std::fs::File;
use std::io::Read;

#[derive(Parser, Debug)]
#[command(name = "assay-uniq")]
#[command(about = "Check global uniqueness of a key along a dotted path", long_about = None)]
struct Args {
    /// Input file (use stdin if omitted)
    #[arg(value_name = "FILE")]
    input: Option<String>,

    /// Dot-separated field path to walk
    #[arg(long)]
    path: String,

    /// Key whose values must be globally unique
    #[arg(long)]
    key: String,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let bytes = read_input(args.input.as_deref())?;
    let doc = parse_json(bytes)?;

    match assay::check_unique_in_path(&doc, &args.path, &args.key) {
        Ok(report) => {
            println!(
                "ok: {} values at path '{}' with key '{}', all unique",
                report.total, args.path, args.key
            );
            Ok(())
        }
        Err(err @ (assay::Error::EmptyPath { .. } | assay::Error::DuplicateValues { .. })) => {
            eprintln!("check failed: {err}");
            std::process::exit(1);
        }
        Err(err) => {
            eprintln!("error: {err}");
            std::process::exit(2);
        }
    }
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

/// SIMD parse fast path with a serde_json fallback for input simd-json
/// rejects.
fn parse_json(bytes: Vec<u8>) -> Result<serde_json::Value> {
    let mut scratch = bytes.clone();
    match simd_json::serde::from_slice(&mut scratch) {
        Ok(doc) => Ok(doc),
        Err(_) => serde_json::from_slice(&bytes).context("failed to parse input as JSON"),
    }
}
