//! Inspect command implementation.

use super::{read_document, OutputFormat};
use crate::error::CliResult;
use serde::Serialize;
use std::path::Path;

/// Store inspection result.
#[derive(Debug, Serialize)]
pub struct InspectResult {
    /// Backing file path.
    pub path: String,
    /// File size in bytes.
    pub size: usize,
    /// Store name from the first line.
    pub store: String,
    /// Total number of records.
    pub record_count: usize,
    /// Per-entity summaries, in file order.
    pub entities: Vec<EntityStats>,
}

/// Summary of a single entity.
#[derive(Debug, Serialize)]
pub struct EntityStats {
    /// Entity name.
    pub name: String,
    /// Field markers in schema order.
    pub fields: Vec<String>,
    /// Number of records.
    pub record_count: usize,
}

/// Inspects a backing file.
pub fn inspect(path: &Path) -> CliResult<InspectResult> {
    let (text, document) = read_document(path)?;
    Ok(InspectResult {
        path: path.display().to_string(),
        size: text.len(),
        record_count: document.record_count(),
        entities: document
            .entities
            .into_iter()
            .map(|e| EntityStats {
                record_count: e.records.len(),
                name: e.name,
                fields: e.fields,
            })
            .collect(),
        store: document.name,
    })
}

/// Runs the inspect command.
pub fn run(path: &Path, format: OutputFormat) -> CliResult<()> {
    let result = inspect(path)?;
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&result)?),
        OutputFormat::Text => print_text_output(&result),
    }
    Ok(())
}

fn print_text_output(result: &InspectResult) {
    println!("EmojiDB Store Inspection");
    println!("========================");
    println!();
    println!("Path:  {}", result.path);
    println!("Size:  {}", format_size(result.size));
    println!("Store: {}", result.store);
    println!();
    println!("Entities: {}", result.entities.len());
    for entity in &result.entities {
        println!(
            "  {} [{}] {} records",
            entity.name,
            entity.fields.join(" "),
            entity.record_count
        );
    }
    println!();
    println!("Records: {}", result.record_count);
}

fn format_size(bytes: usize) -> String {
    if bytes < 1024 {
        format!("{bytes} bytes")
    } else if bytes < 1024 * 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else {
        format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
    }
}
