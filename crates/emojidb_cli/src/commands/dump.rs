//! Dump command implementation.

use super::{read_document, OutputFormat};
use crate::error::{CliError, CliResult};
use emojidb_codec::{EntityBlock, Value};
use serde::Serialize;
use std::path::Path;

/// Decoded records of one entity.
#[derive(Debug, Serialize)]
pub struct EntityDump {
    /// Entity name.
    pub name: String,
    /// Field markers in schema order.
    pub fields: Vec<String>,
    /// Records, each a row of values in schema order.
    pub records: Vec<Vec<serde_json::Value>>,
}

impl From<EntityBlock> for EntityDump {
    fn from(block: EntityBlock) -> Self {
        let records = block
            .records
            .into_iter()
            .map(|row| row.into_iter().map(json_value).collect())
            .collect();
        Self {
            name: block.name,
            fields: block.fields,
            records,
        }
    }
}

fn json_value(value: Value) -> serde_json::Value {
    match value {
        Value::Integer(n) => n.into(),
        Value::Text(s) => s.into(),
    }
}

/// Decodes the records of a backing file, optionally of one entity only.
pub fn dump(path: &Path, entity: Option<&str>) -> CliResult<Vec<EntityDump>> {
    let (_, document) = read_document(path)?;
    let blocks: Vec<EntityBlock> = match entity {
        Some(name) => {
            let block = document
                .entities
                .into_iter()
                .find(|e| e.name == name)
                .ok_or_else(|| CliError::EntityNotFound(name.to_string()))?;
            vec![block]
        }
        None => document.entities,
    };
    Ok(blocks.into_iter().map(EntityDump::from).collect())
}

/// Runs the dump command.
pub fn run(path: &Path, entity: Option<&str>, format: OutputFormat) -> CliResult<()> {
    let entities = dump(path, entity)?;
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&entities)?),
        OutputFormat::Text => print_text_output(&entities),
    }
    Ok(())
}

fn print_text_output(entities: &[EntityDump]) {
    for entity in entities {
        println!(
            "{} [{}] ({} records)",
            entity.name,
            entity.fields.join(" "),
            entity.records.len()
        );
        for (i, record) in entity.records.iter().enumerate() {
            let fields: Vec<String> = entity
                .fields
                .iter()
                .zip(record)
                .map(|(field, value)| match value {
                    serde_json::Value::String(s) => format!("{field}={s}"),
                    other => format!("{field}={other}"),
                })
                .collect();
            println!("  #{i:<4} {}", fields.join("  "));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::*;
    use serde_json::json;

    #[test]
    fn dump_all_entities() {
        let (_dir, path) = write_store(KITCHEN);
        let entities = dump(&path, None).unwrap();
        assert_eq!(entities.len(), 2);
        assert_eq!(entities[0].records, vec![vec![json!(1), json!(4)], vec![json!(2), json!(7)]]);
        assert_eq!(entities[1].records, vec![vec![json!("🥩"), json!("✅")]]);
    }

    #[test]
    fn dump_one_entity() {
        let (_dir, path) = write_store(KITCHEN);
        let entities = dump(&path, Some("🍴")).unwrap();
        assert_eq!(entities.len(), 1);
        assert_eq!(entities[0].fields, vec!["🍽", "🧟"]);
    }

    #[test]
    fn dump_unknown_entity() {
        let (_dir, path) = write_store(KITCHEN);
        assert!(matches!(
            dump(&path, Some("🗒")),
            Err(CliError::EntityNotFound(_))
        ));
    }
}
