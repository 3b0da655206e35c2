//! Test fixtures and store helpers.
//!
//! Provides convenience functions for setting up test stores, reopening
//! them as a new process would, and filling them from generated specs.

use crate::generators::{RecordOp, StoreSpec};
use emojidb_core::{Config, CoreResult, Database, EntityMut, OpenMode, Record, Value};
use emojidb_storage::InMemoryBackend;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Name given to stores created by the fixtures.
pub const TEST_STORE: &str = "🧪";

enum Location {
    Memory(InMemoryBackend),
    File(TempDir),
}

/// A test store with automatic cleanup.
///
/// The backing file outlives the [`Database`] handle, so a test can drop
/// the handle and [`reopen`](Self::reopen) it to observe exactly what was
/// persisted.
pub struct TestStore {
    /// The store instance.
    pub db: Database,
    location: Location,
}

impl TestStore {
    /// Creates an empty store backed by shared memory.
    pub fn memory() -> Self {
        let backend = InMemoryBackend::new();
        let db = open_memory(&backend, OpenMode::ForceCreate);
        Self {
            db,
            location: Location::Memory(backend),
        }
    }

    /// Creates an empty store backed by a file in a temporary directory.
    pub fn file() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let db = Database::open(TEST_STORE, temp_dir.path()).expect("Failed to open file store");
        Self {
            db,
            location: Location::File(temp_dir),
        }
    }

    /// Opens the backing file again in load-or-create mode.
    ///
    /// # Panics
    ///
    /// Panics if the persisted store does not load.
    pub fn reopen(&self) -> Database {
        self.try_reopen().expect("Failed to reopen store")
    }

    /// Opens the backing file again in load-or-create mode.
    pub fn try_reopen(&self) -> CoreResult<Database> {
        match &self.location {
            Location::Memory(backend) => Database::open_with_backend(
                TEST_STORE,
                OpenMode::LoadOrCreate,
                Box::new(backend.clone()),
            ),
            Location::File(dir) => {
                Database::open_with_config(TEST_STORE, Config::new().data_dir(dir.path()))
            }
        }
    }

    /// Returns the persisted text, or `None` if nothing was written yet.
    pub fn persisted(&self) -> Option<String> {
        match &self.location {
            Location::Memory(backend) => backend.text(TEST_STORE),
            Location::File(_) => self
                .path()
                .and_then(|path| std::fs::read_to_string(path).ok()),
        }
    }

    /// Returns the backing file path if file-based, None if in-memory.
    pub fn path(&self) -> Option<PathBuf> {
        match &self.location {
            Location::Memory(_) => None,
            Location::File(dir) => Some(backing_path(dir.path())),
        }
    }

    /// Returns the in-memory backend, for fault injection.
    pub fn backend(&self) -> Option<&InMemoryBackend> {
        match &self.location {
            Location::Memory(backend) => Some(backend),
            Location::File(_) => None,
        }
    }
}

impl std::ops::Deref for TestStore {
    type Target = Database;

    fn deref(&self) -> &Self::Target {
        &self.db
    }
}

impl std::ops::DerefMut for TestStore {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.db
    }
}

fn open_memory(backend: &InMemoryBackend, mode: OpenMode) -> Database {
    Database::open_with_backend(TEST_STORE, mode, Box::new(backend.clone()))
        .expect("Failed to open in-memory store")
}

fn backing_path(dir: &Path) -> PathBuf {
    Config::new()
        .data_dir(dir)
        .backend()
        .path_for(TEST_STORE)
        .expect("Test store name is a valid file name")
}

/// Runs a test with a temporary in-memory store.
///
/// # Example
///
/// ```rust
/// use emojidb_testkit::with_temp_store;
///
/// with_temp_store(|db| {
///     db.create_entity("E", ["A"]).unwrap();
///     assert_eq!(db.entities().len(), 1);
/// });
/// ```
pub fn with_temp_store<F, R>(f: F) -> R
where
    F: FnOnce(&mut Database) -> R,
{
    let mut store = TestStore::memory();
    f(&mut store.db)
}

/// Runs a test with a temporary file-backed store.
pub fn with_file_store<F, R>(f: F) -> R
where
    F: FnOnce(&mut Database, &Path) -> R,
{
    let mut store = TestStore::file();
    let path = store.path().expect("File store has a path");
    f(&mut store.db, &path)
}

/// Creates every entity of `spec` and inserts its records in order.
///
/// # Errors
///
/// Returns the first error reported by the store.
pub fn populate(db: &mut Database, spec: &StoreSpec) -> CoreResult<()> {
    for entity in &spec.entities {
        let mut handle = db.create_entity(&entity.name, entity.fields.iter().cloned())?;
        for record in &entity.records {
            insert(&mut handle, record, false)?;
        }
    }
    Ok(())
}

/// Inserts one record given as values in schema order.
///
/// # Errors
///
/// Returns the error reported by the store.
pub fn insert(entity: &mut EntityMut<'_>, values: &[Value], first: bool) -> CoreResult<()> {
    let fields = entity.fields().to_vec();
    let mut builder = entity.create_record(first);
    for (field, value) in fields.iter().zip(values) {
        builder = builder.set(field, value.clone())?;
    }
    builder.insert()?;
    Ok(())
}

/// Applies a mutation to an entity.
///
/// # Errors
///
/// Returns the error reported by the store, including `RecordNotFound` for
/// `RemoveFirst` on an empty entity.
pub fn apply(entity: &mut EntityMut<'_>, op: &RecordOp) -> CoreResult<()> {
    match op {
        RecordOp::Append(values) => insert(entity, values, false),
        RecordOp::Prepend(values) => insert(entity, values, true),
        RecordOp::RemoveFirst => entity.remove_first().map(|_| ()),
        RecordOp::RemoveAll => entity.remove_all().map(|_| ()),
    }
}

/// Returns an entity's records as rows of values.
pub fn rows<'a>(records: impl Iterator<Item = &'a Record>) -> Vec<Vec<Value>> {
    records.map(|r| r.values().to_vec()).collect()
}

/// Returns a store's contents as a [`StoreSpec`], for comparing two stores.
pub fn snapshot(db: &Database) -> StoreSpec {
    StoreSpec {
        entities: db
            .entities()
            .iter()
            .map(|entity| crate::generators::EntitySpec {
                name: entity.name().to_string(),
                fields: entity.fields().to_vec(),
                records: rows(entity.records()),
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_store_reopens() {
        let mut store = TestStore::memory();
        assert!(store.persisted().is_none());
        store.create_entity("E", ["A"]).unwrap();
        assert!(store.persisted().is_some());
        assert_eq!(store.reopen().entities().len(), 1);
    }

    #[test]
    fn file_store_reopens() {
        let mut store = TestStore::file();
        store.create_entity("E", ["A"]).unwrap();
        let path = store.path().unwrap();
        assert!(path.exists());
        assert_eq!(store.persisted().unwrap(), store.render());
        assert_eq!(snapshot(&store.reopen()), snapshot(&store.db));
    }

    #[test]
    fn with_file_store_passes_path() {
        with_file_store(|db, path| {
            db.create_entity("E", ["A"]).unwrap();
            assert!(path.exists());
        });
    }
}
