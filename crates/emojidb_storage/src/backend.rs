//! Storage backend trait definition.

use crate::error::StorageResult;

/// A whole-file storage backend for EmojiDB.
///
/// Storage backends are **opaque byte stores** keyed by store name. Each
/// store owns exactly one backing file, which is always read and written as
/// a whole. Backends do not understand the symbolic encoding.
///
/// # Invariants
///
/// - `load` returns exactly the bytes of the last completed `store`
/// - `load` returns `None` only when no backing file exists
/// - `store` replaces the previous contents entirely
/// - Backends must be `Send + Sync`
///
/// # Implementors
///
/// - [`super::InMemoryBackend`] - For testing
/// - [`super::FileBackend`] - For persistent storage
pub trait StorageBackend: Send + Sync {
    /// Reads the whole backing file of the named store.
    ///
    /// Returns `Ok(None)` if the file does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error for any failure other than the file being absent.
    fn load(&self, name: &str) -> StorageResult<Option<Vec<u8>>>;

    /// Overwrites the backing file of the named store.
    ///
    /// The write is not atomic: a crash part-way through can leave a
    /// truncated file behind.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    fn store(&self, name: &str, contents: &[u8]) -> StorageResult<()>;

    /// Describes where the named store lives, for logs and error messages.
    fn location(&self, name: &str) -> String;
}
