//! CLI command implementations.

pub mod dump;
pub mod inspect;
pub mod verify;

use crate::error::{CliError, CliResult};
use clap::ValueEnum;
use emojidb_codec::{from_text, Document};
use emojidb_storage::{FileBackend, StorageBackend};
use std::path::Path;

/// Output format for reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text.
    #[default]
    Text,
    /// Pretty-printed JSON.
    Json,
}

/// Reads a backing file as text.
///
/// The file is read through a [`FileBackend`] rooted at its directory, with
/// the file stem as the store key.
pub fn read_file(path: &Path) -> CliResult<String> {
    let (Some(stem), Some(dir)) = (path.file_stem().and_then(|s| s.to_str()), path.parent()) else {
        return Err(CliError::InvalidPath(path.to_path_buf()));
    };
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or_default();

    let backend = FileBackend::new(dir).with_extension(extension);
    let bytes = backend
        .load(stem)?
        .ok_or_else(|| CliError::NotFound(path.to_path_buf()))?;
    tracing::debug!(path = %path.display(), bytes = bytes.len(), "read backing file");
    String::from_utf8(bytes).map_err(|_| CliError::NotUtf8(path.to_path_buf()))
}

/// Reads and decodes a backing file, returning its text and document.
pub fn read_document(path: &Path) -> CliResult<(String, Document)> {
    let text = read_file(path)?;
    let document = from_text(&text).map_err(|source| CliError::Decode {
        path: path.to_path_buf(),
        source,
    })?;
    Ok((text, document))
}


#[cfg(test)]
mod tests {
    use super::test_support::*;
    use super::*;

    #[test]
    fn read_existing_file() {
        let (_dir, path) = write_store(KITCHEN);
        let (text, document) = read_document(&path).unwrap();
        assert_eq!(text, KITCHEN);
        assert_eq!(document.name, "👨‍🍳");
        assert_eq!(document.entities.len(), 2);
    }

    #[test]
    fn read_file_without_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store");
        std::fs::write(&path, "S\n").unwrap();
        assert_eq!(read_file(&path).unwrap(), "S\n");
    }

    #[test]
    fn read_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_file(&dir.path().join("absent.emojidb")).unwrap_err();
        assert!(matches!(err, CliError::NotFound(_)));
    }

    #[test]
    fn read_malformed_file() {
        let (_dir, path) = write_store("S\nEA#️⃣2️⃣\nA1️⃣\n");
        assert!(matches!(
            read_document(&path),
            Err(CliError::Decode { .. })
        ));
    }

    #[test]
    fn read_non_utf8_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.emojidb");
        std::fs::write(&path, [0xff, 0xfe]).unwrap();
        assert!(matches!(read_file(&path), Err(CliError::NotUtf8(_))));
    }
}
