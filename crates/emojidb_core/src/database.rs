//! Store facade: loading, entity management and write-through flushing.

use crate::config::{Config, OpenMode};
use crate::entity::{Entity, EntityMut};
use crate::error::{CoreError, CoreResult};
use crate::record::Record;
use crate::schema::Schema;
use emojidb_codec::{check_store_name, from_text, Document, TextEncoder};
use emojidb_storage::{InMemoryBackend, StorageBackend};
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

/// The main store handle.
///
/// `Database` is the primary entry point for EmojiDB. It owns every entity
/// of one named store and keeps the backing file in sync with them:
/// each mutation rewrites the whole file before it returns.
///
/// # Opening a Store
///
/// ```rust
/// use emojidb_core::Database;
///
/// let dir = tempfile::tempdir().unwrap();
/// let mut db = Database::open("🗂", dir.path()).unwrap();
///
/// db.create_entity("📂", ["🆔", "📆"]).unwrap();
/// db.entity_mut("📂")
///     .unwrap()
///     .create_record(false)
///     .set("🆔", 1u64)
///     .unwrap()
///     .set("📆", "🌞")
///     .unwrap()
///     .insert()
///     .unwrap();
///
/// let db = Database::open("🗂", dir.path()).unwrap();
/// assert_eq!(db.entity("📂").unwrap().len(), 1);
/// ```
///
/// # In-Memory Stores
///
/// For testing, use `Database::open_in_memory()`:
///
/// ```rust
/// let db = emojidb_core::Database::open_in_memory("🗂").unwrap();
/// assert!(db.entities().is_empty());
/// ```
pub struct Database {
    /// Store name, also the first line of the backing file.
    name: String,
    /// Entities in serialization order.
    entities: Vec<Entity>,
    /// Entity name to index into `entities`.
    slots: HashMap<String, usize>,
    /// Where the backing file lives.
    backend: Box<dyn StorageBackend>,
}

impl Database {
    /// Opens the store `name` from a file in `dir`, creating it if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the name is invalid, the file cannot be read, or
    /// it exists but does not hold a valid store named `name`.
    pub fn open(name: &str, dir: impl AsRef<Path>) -> CoreResult<Self> {
        Self::open_with_config(name, Config::default().data_dir(dir.as_ref()))
    }

    /// Opens the store `name` with custom configuration.
    ///
    /// # Example
    ///
    /// ```rust
    /// use emojidb_core::{Config, Database};
    ///
    /// let dir = tempfile::tempdir().unwrap();
    /// let config = Config::new().data_dir(dir.path()).force_create();
    /// let db = Database::open_with_config("🗂", config).unwrap();
    /// assert_eq!(db.name(), "🗂");
    /// ```
    ///
    /// # Errors
    ///
    /// See [`Database::open`].
    pub fn open_with_config(name: &str, config: Config) -> CoreResult<Self> {
        Self::open_with_backend(name, config.open_mode, Box::new(config.backend()))
    }

    /// Opens a store on a pre-configured backend.
    ///
    /// In [`OpenMode::LoadOrCreate`] an existing non-empty backing file is
    /// decoded; an absent or empty one yields an empty store. In
    /// [`OpenMode::ForceCreate`] the store starts empty and nothing is read.
    /// Opening never writes; the file is first written by the first
    /// mutation or an explicit [`flush`](Self::flush).
    ///
    /// # Errors
    ///
    /// See [`Database::open`].
    pub fn open_with_backend(
        name: &str,
        mode: OpenMode,
        backend: Box<dyn StorageBackend>,
    ) -> CoreResult<Self> {
        check_store_name(name)?;

        let mut db = Self {
            name: name.to_string(),
            entities: Vec::new(),
            slots: HashMap::new(),
            backend,
        };

        if mode == OpenMode::LoadOrCreate {
            match db.backend.load(name)? {
                Some(bytes) if !bytes.is_empty() => db.restore(&bytes)?,
                _ => {}
            }
        }

        tracing::info!(
            store = %db.name,
            location = %db.location(),
            ?mode,
            entities = db.entities.len(),
            "opened store"
        );
        Ok(db)
    }

    /// Opens a fresh store backed by memory only.
    ///
    /// # Errors
    ///
    /// Returns an error if the name is not a valid store name.
    pub fn open_in_memory(name: &str) -> CoreResult<Self> {
        Self::open_with_backend(name, OpenMode::ForceCreate, Box::new(InMemoryBackend::new()))
    }

    /// Rebuilds the in-memory state from backing file contents.
    fn restore(&mut self, bytes: &[u8]) -> CoreResult<()> {
        let text = std::str::from_utf8(bytes)
            .map_err(|e| CoreError::invalid_format(format!("backing file is not UTF-8: {e}")))?;
        let document = from_text(text)?;
        if document.name != self.name {
            return Err(CoreError::invalid_format(format!(
                "backing file holds store {}, expected {}",
                document.name, self.name
            )));
        }
        self.load_document(document)
    }

    fn load_document(&mut self, document: Document) -> CoreResult<()> {
        for block in document.entities {
            if self.slots.contains_key(&block.name) {
                return Err(CoreError::invalid_format(format!(
                    "entity {} is declared twice",
                    block.name
                )));
            }
            let schema = Schema::new(block.name, block.fields)
                .map_err(|e| CoreError::invalid_format(e.to_string()))?;
            let mut entity = Entity::new(schema);
            let schema = Arc::clone(entity.shared_schema());
            entity.records = block
                .records
                .into_iter()
                .map(|values| Record::new(Arc::clone(&schema), values))
                .collect();

            self.slots.insert(entity.name().to_string(), self.entities.len());
            self.entities.push(entity);
        }
        Ok(())
    }

    /// Returns the store name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Describes where the backing file lives.
    #[must_use]
    pub fn location(&self) -> String {
        self.backend.location(&self.name)
    }

    /// Registers an entity and flushes the store.
    ///
    /// An existing entity with the same name is replaced in place, records
    /// included; it keeps its position in the file.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidSchema`] for an invalid name or field
    /// list, or the flush error, in which case the store is unchanged.
    pub fn create_entity<I, S>(&mut self, name: &str, fields: I) -> CoreResult<EntityMut<'_>>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let entity = Entity::new(Schema::new(name, fields)?);

        let slot = if let Some(&slot) = self.slots.get(name) {
            tracing::debug!(store = %self.name, entity = name, "replacing entity");
            let previous = std::mem::replace(&mut self.entities[slot], entity);
            self.commit(move |db| db.entities[slot] = previous)?;
            slot
        } else {
            let slot = self.entities.len();
            self.entities.push(entity);
            self.slots.insert(name.to_string(), slot);
            self.commit(|db| {
                db.entities.pop();
                db.slots.remove(name);
            })?;
            slot
        };

        Ok(EntityMut::new(self, slot))
    }

    /// Returns the named entity, if registered.
    #[must_use]
    pub fn entity(&self, name: &str) -> Option<&Entity> {
        self.slots.get(name).map(|&slot| &self.entities[slot])
    }

    /// Returns a mutable handle to the named entity.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::EntityNotFound`] if no entity has that name.
    pub fn entity_mut(&mut self, name: &str) -> CoreResult<EntityMut<'_>> {
        let slot = *self
            .slots
            .get(name)
            .ok_or_else(|| CoreError::entity_not_found(name))?;
        Ok(EntityMut::new(self, slot))
    }

    /// Returns all entities in serialization order.
    #[must_use]
    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    /// Renders the store exactly as [`flush`](Self::flush) writes it.
    #[must_use]
    pub fn render(&self) -> String {
        let mut encoder = TextEncoder::new(&self.name);
        for entity in &self.entities {
            encoder.entity_header(entity.name(), entity.fields(), entity.len());
            for record in entity.records() {
                encoder.record(entity.fields(), record.values());
            }
        }
        encoder.into_string()
    }

    /// Rewrites the whole backing file from the in-memory state.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing file cannot be written.
    pub fn flush(&self) -> CoreResult<()> {
        let text = self.render();
        self.backend.store(&self.name, text.as_bytes())?;
        tracing::debug!(store = %self.name, bytes = text.len(), "flushed store");
        Ok(())
    }

    /// Flushes after a mutation, undoing the mutation if the flush fails.
    pub(crate) fn commit(&mut self, undo: impl FnOnce(&mut Self)) -> CoreResult<()> {
        if let Err(err) = self.flush() {
            tracing::warn!(store = %self.name, error = %err, "flush failed, rolling back");
            undo(self);
            return Err(err);
        }
        Ok(())
    }

    pub(crate) fn entity_at(&self, slot: usize) -> &Entity {
        &self.entities[slot]
    }

    pub(crate) fn entity_at_mut(&mut self, slot: usize) -> &mut Entity {
        &mut self.entities[slot]
    }
}

impl std::fmt::Debug for Database {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Database")
            .field("name", &self.name)
            .field("location", &self.location())
            .field("entity_count", &self.entities.len())
            .finish_non_exhaustive()
    }
}
