//! In-memory storage backend for testing.

use crate::backend::StorageBackend;
use crate::error::StorageResult;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// An in-memory storage backend.
///
/// This backend keeps one byte buffer per store name and is suitable for:
/// - Unit tests
/// - Integration tests that simulate a restart by reopening a store
/// - Ephemeral databases that don't need persistence
///
/// Clones share the same files, so a clone handed to a second `Database`
/// sees everything the first one wrote.
///
/// # Example
///
/// ```rust
/// use emojidb_storage::{StorageBackend, InMemoryBackend};
///
/// let backend = InMemoryBackend::new();
/// backend.store("🗂", b"test data").unwrap();
/// assert_eq!(backend.load("🗂").unwrap().unwrap(), b"test data");
/// assert!(backend.load("📂").unwrap().is_none());
/// ```
#[derive(Debug, Clone, Default)]
pub struct InMemoryBackend {
    files: Arc<RwLock<HashMap<String, Vec<u8>>>>,
    fail_writes: Arc<AtomicBool>,
}

impl InMemoryBackend {
    /// Creates a new empty in-memory backend.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a backend holding one pre-existing file.
    ///
    /// Useful for testing load scenarios.
    #[must_use]
    pub fn with_file(name: impl Into<String>, data: impl Into<Vec<u8>>) -> Self {
        let backend = Self::new();
        backend.files.write().insert(name.into(), data.into());
        backend
    }

    /// Returns a copy of the named file's contents.
    #[must_use]
    pub fn data(&self, name: &str) -> Option<Vec<u8>> {
        self.files.read().get(name).cloned()
    }

    /// Returns the named file's contents as text, if present and UTF-8.
    #[must_use]
    pub fn text(&self, name: &str) -> Option<String> {
        self.data(name).and_then(|data| String::from_utf8(data).ok())
    }

    /// Makes every subsequent `store` fail with an I/O error (or stop failing).
    ///
    /// Useful for testing how callers handle write failures.
    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }
}

impl StorageBackend for InMemoryBackend {
    fn load(&self, name: &str) -> StorageResult<Option<Vec<u8>>> {
        Ok(self.data(name))
    }

    fn store(&self, name: &str, contents: &[u8]) -> StorageResult<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(io::Error::new(
                io::ErrorKind::PermissionDenied,
                "writes disabled on in-memory backend",
            )
            .into());
        }
        self.files
            .write()
            .insert(name.to_string(), contents.to_vec());
        Ok(())
    }

    fn location(&self, name: &str) -> String {
        format!("memory:{name}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StorageError;

    #[test]
    fn memory_new_is_empty() {
        let backend = InMemoryBackend::new();
        assert!(backend.load("🗂").unwrap().is_none());
    }

    #[test]
    fn memory_store_replaces_contents() {
        let backend = InMemoryBackend::new();
        backend.store("🗂", b"hello world").unwrap();
        backend.store("🗂", b"bye").unwrap();
        assert_eq!(backend.load("🗂").unwrap().unwrap(), b"bye");
    }

    #[test]
    fn memory_clones_share_files() {
        let backend = InMemoryBackend::new();
        let clone = backend.clone();
        backend.store("🗂", b"shared").unwrap();
        assert_eq!(clone.text("🗂").unwrap(), "shared");
    }

    #[test]
    fn memory_with_file() {
        let backend = InMemoryBackend::with_file("🗂", "preloaded");
        assert_eq!(backend.load("🗂").unwrap().unwrap(), b"preloaded");
    }

    #[test]
    fn memory_fail_writes() {
        let backend = InMemoryBackend::with_file("🗂", "kept");
        backend.fail_writes(true);
        assert!(matches!(
            backend.store("🗂", b"lost"),
            Err(StorageError::Io(_))
        ));
        assert_eq!(backend.text("🗂").unwrap(), "kept");

        backend.fail_writes(false);
        backend.store("🗂", b"written").unwrap();
        assert_eq!(backend.text("🗂").unwrap(), "written");
    }

    #[test]
    fn memory_location() {
        assert_eq!(InMemoryBackend::new().location("🗂"), "memory:🗂");
    }
}
