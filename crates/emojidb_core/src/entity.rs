//! Entities: named, schema-typed collections of records.

use crate::database::Database;
use crate::error::{CoreError, CoreResult};
use crate::record::{Record, RecordBuilder, RecordMut};
use crate::schema::Schema;
use emojidb_codec::Value;
use std::collections::vec_deque;
use std::collections::VecDeque;
use std::ops::Deref;
use std::sync::Arc;

/// A named collection of records sharing one schema.
///
/// Records keep their insertion order, except that priority records are
/// placed at the front. Read access goes through `&Entity`; changes go
/// through [`EntityMut`], which writes every change through to disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entity {
    schema: Arc<Schema>,
    pub(crate) records: VecDeque<Record>,
}

impl Entity {
    pub(crate) fn new(schema: Schema) -> Self {
        Self {
            schema: Arc::new(schema),
            records: VecDeque::new(),
        }
    }

    /// Returns the entity name.
    #[must_use]
    pub fn name(&self) -> &str {
        self.schema.entity()
    }

    /// Returns the field markers in schema order.
    #[must_use]
    pub fn fields(&self) -> &[String] {
        self.schema.fields()
    }

    /// Returns the schema.
    #[must_use]
    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub(crate) fn shared_schema(&self) -> &Arc<Schema> {
        &self.schema
    }

    /// Returns the number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns true if the entity holds no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Iterates all records in order.
    pub fn records(&self) -> vec_deque::Iter<'_, Record> {
        self.records.iter()
    }

    /// Returns the record at `position`.
    #[must_use]
    pub fn get(&self, position: usize) -> Option<&Record> {
        self.records.get(position)
    }

    /// Returns every record whose `field` equals `value`, in order.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::UnknownField`] if the field is not declared.
    pub fn records_where(&self, field: &str, value: impl Into<Value>) -> CoreResult<Vec<&Record>> {
        let index = self.schema.position(field)?;
        let value = value.into();
        Ok(self
            .records
            .iter()
            .filter(|r| *r.value_at(index) == value)
            .collect())
    }

    /// Returns the first record whose `field` equals `value`.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::UnknownField`] if the field is not declared.
    pub fn first_where(&self, field: &str, value: impl Into<Value>) -> CoreResult<Option<&Record>> {
        Ok(self.position_where(field, value)?.map(|p| &self.records[p]))
    }

    fn position_where(&self, field: &str, value: impl Into<Value>) -> CoreResult<Option<usize>> {
        let index = self.schema.position(field)?;
        let value = value.into();
        Ok(self
            .records
            .iter()
            .position(|r| *r.value_at(index) == value))
    }
}

/// A mutable handle to an entity, borrowed from its [`Database`].
///
/// Dereferences to [`Entity`] for reads. Each mutating call rewrites the
/// backing file before it returns; if that write fails the change is undone
/// and the error returned.
pub struct EntityMut<'db> {
    db: &'db mut Database,
    slot: usize,
}

impl<'db> EntityMut<'db> {
    pub(crate) fn new(db: &'db mut Database, slot: usize) -> Self {
        Self { db, slot }
    }

    fn entity_mut(&mut self) -> &mut Entity {
        self.db.entity_at_mut(self.slot)
    }

    /// Starts a new record bound to this entity's schema.
    ///
    /// With `insert_first` the record goes to the front of the sequence,
    /// ahead of every existing record; otherwise it is appended.
    pub fn create_record(&mut self, insert_first: bool) -> RecordBuilder<'_> {
        RecordBuilder::new(self.db, self.slot, insert_first)
    }

    /// Returns a write-through handle to the record at `position`.
    pub fn record_mut(&mut self, position: usize) -> Option<RecordMut<'_>> {
        if position < self.len() {
            Some(RecordMut::new(self.db, self.slot, position))
        } else {
            None
        }
    }

    /// Returns a write-through handle to the first record whose `field`
    /// equals `value`.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::UnknownField`] if the field is not declared.
    pub fn first_where_mut(
        &mut self,
        field: &str,
        value: impl Into<Value>,
    ) -> CoreResult<Option<RecordMut<'_>>> {
        let Some(position) = self.position_where(field, value)? else {
            return Ok(None);
        };
        Ok(Some(RecordMut::new(self.db, self.slot, position)))
    }

    /// Removes every record and returns how many were removed.
    ///
    /// # Errors
    ///
    /// Returns the flush error; the records are restored in that case.
    pub fn remove_all(&mut self) -> CoreResult<usize> {
        let slot = self.slot;
        let removed = std::mem::take(&mut self.entity_mut().records);
        let count = removed.len();
        self.db.commit(move |db| db.entity_at_mut(slot).records = removed)?;
        Ok(count)
    }

    /// Removes and returns the first record.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::RecordNotFound`] if the entity is empty, or the
    /// flush error, in which case the record stays in place.
    pub fn remove_first(&mut self) -> CoreResult<Record> {
        let slot = self.slot;
        let Some(first) = self.entity_mut().records.pop_front() else {
            return Err(CoreError::record_not_found(self.name()));
        };
        let restore = first.clone();
        self.db
            .commit(move |db| db.entity_at_mut(slot).records.push_front(restore))?;
        Ok(first)
    }

    /// Removes every record whose `field` equals `value` and returns how many
    /// were removed.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::UnknownField`] if the field is not declared, or
    /// the flush error, in which case nothing is removed.
    pub fn remove_where(&mut self, field: &str, value: impl Into<Value>) -> CoreResult<usize> {
        let index = self.schema().position(field)?;
        let value = value.into();
        let slot = self.slot;

        let previous = self.records.clone();
        let records = &mut self.entity_mut().records;
        records.retain(|r| *r.value_at(index) != value);
        let removed = previous.len() - records.len();
        if removed == 0 {
            return Ok(0);
        }

        self.db
            .commit(move |db| db.entity_at_mut(slot).records = previous)?;
        Ok(removed)
    }
}

impl Deref for EntityMut<'_> {
    type Target = Entity;

    fn deref(&self) -> &Entity {
        self.db.entity_at(self.slot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entity() -> Entity {
        let schema = Schema::new("E", ["A", "B"]).unwrap();
        let mut entity = Entity::new(schema);
        let schema = Arc::clone(entity.shared_schema());
        for (a, b) in [(1, "x"), (2, "y"), (3, "x")] {
            entity.records.push_back(Record::new(
                Arc::clone(&schema),
                vec![Value::Integer(a), Value::text(b)],
            ));
        }
        entity
    }

    #[test]
    fn records_where_preserves_order() {
        let entity = entity();
        let matches = entity.records_where("B", "x").unwrap();
        let ids: Vec<_> = matches
            .iter()
            .map(|r| r.get_integer("A").unwrap().unwrap())
            .collect();
        assert_eq!(ids, vec![1, 3]);
    }

    #[test]
    fn records_where_without_match_is_empty() {
        let entity = entity();
        assert!(entity.records_where("B", "z").unwrap().is_empty());
        // Decoded values compare by type as well as content.
        assert!(entity.records_where("A", "1").unwrap().is_empty());
    }

    #[test]
    fn records_where_unknown_field() {
        assert!(matches!(
            entity().records_where("C", 1u64),
            Err(CoreError::UnknownField { .. })
        ));
    }

    #[test]
    fn first_where_finds_head_match() {
        let entity = entity();
        let found = entity.first_where("B", "x").unwrap().unwrap();
        assert_eq!(found.get_integer("A").unwrap(), Some(1));
        assert!(entity.first_where("A", 9u64).unwrap().is_none());
    }

    #[test]
    fn accessors() {
        let entity = entity();
        assert_eq!(entity.name(), "E");
        assert_eq!(entity.fields(), ["A", "B"]);
        assert_eq!(entity.len(), 3);
        assert!(!entity.is_empty());
        assert_eq!(entity.records().count(), 3);
        assert!(entity.get(3).is_none());
    }
}
