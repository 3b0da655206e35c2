//! Verify command implementation.

use super::read_document;
use crate::error::{CliError, CliResult};
use emojidb_core::{Database, OpenMode};
use emojidb_storage::InMemoryBackend;
use std::path::Path;

/// Verification result.
#[derive(Debug)]
pub struct VerifyResult {
    /// Store name.
    pub store: String,
    /// Number of entities loaded.
    pub entity_count: usize,
    /// Number of records loaded.
    pub record_count: usize,
    /// Whether re-encoding reproduces the file byte for byte.
    pub canonical: bool,
}

/// Loads a backing file as a store and re-encodes it.
///
/// Decoding checks the grammar; loading into a [`Database`] also checks the
/// schemas and that no entity is declared twice.
pub fn verify(path: &Path) -> CliResult<VerifyResult> {
    let (text, document) = read_document(path)?;

    let backend = InMemoryBackend::with_file(document.name.as_str(), text.as_bytes());
    let db = Database::open_with_backend(&document.name, OpenMode::LoadOrCreate, Box::new(backend))
        .map_err(|source| CliError::InvalidStore {
            path: path.to_path_buf(),
            source,
        })?;

    Ok(VerifyResult {
        store: document.name,
        entity_count: db.entities().len(),
        record_count: db.entities().iter().map(|e| e.len()).sum(),
        canonical: db.render() == text,
    })
}

/// Runs the verify command.
pub fn run(path: &Path) -> CliResult<()> {
    println!("Verifying store at {}", path.display());
    println!();

    let result = match verify(path) {
        Ok(result) => result,
        Err(err) => {
            println!("✗ {err}");
            return Err(err);
        }
    };

    println!("Store:    {}", result.store);
    println!("Entities: {}", result.entity_count);
    println!("Records:  {}", result.record_count);
    println!();
    if result.canonical {
        println!("✓ Store verification passed");
        Ok(())
    } else {
        println!("✗ Store loads but re-encodes differently");
        Err(CliError::NotCanonical(path.to_path_buf()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::*;

    #[test]
    fn canonical_store_passes() {
        let (_dir, path) = write_store(&KITCHEN.replace('\n', emojidb_codec::LINE_ENDING));
        let result = verify(&path).unwrap();
        assert_eq!(result.store, "👨‍🍳");
        assert_eq!(result.entity_count, 2);
        assert_eq!(result.record_count, 3);
        assert!(result.canonical);
        assert!(run(&path).is_ok());
    }

    #[test]
    fn blank_lines_are_not_canonical() {
        let text = format!("{KITCHEN}\n\n").replace('\n', emojidb_codec::LINE_ENDING);
        let (_dir, path) = write_store(&text);
        assert!(!verify(&path).unwrap().canonical);
        assert!(matches!(run(&path), Err(CliError::NotCanonical(_))));
    }

    #[test]
    fn duplicate_entity_fails() {
        let (_dir, path) = write_store("S\nEA#️⃣0️⃣\nEB#️⃣0️⃣\n");
        assert!(matches!(
            verify(&path),
            Err(CliError::InvalidStore { .. })
        ));
    }

    #[test]
    fn grammar_violation_fails() {
        let (_dir, path) = write_store("S\nEA1️⃣\n");
        assert!(matches!(verify(&path), Err(CliError::Decode { .. })));
    }
}
