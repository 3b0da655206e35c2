//! Records and the handles that create and modify them.

use crate::database::Database;
use crate::entity::Entity;
use crate::error::{CoreError, CoreResult};
use crate::schema::Schema;
use emojidb_codec::Value;
use std::ops::Deref;
use std::sync::Arc;

/// One row of an entity: a value for every field of its schema, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    schema: Arc<Schema>,
    values: Vec<Value>,
}

impl Record {
    pub(crate) fn new(schema: Arc<Schema>, values: Vec<Value>) -> Self {
        debug_assert_eq!(schema.len(), values.len());
        Self { schema, values }
    }

    /// Returns the decoded value of a field.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::UnknownField`] if the field is not declared.
    pub fn get(&self, field: &str) -> CoreResult<&Value> {
        let index = self.schema.position(field)?;
        Ok(&self.values[index])
    }

    /// Returns the integer in a field, or `None` if it holds text.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::UnknownField`] if the field is not declared.
    pub fn get_integer(&self, field: &str) -> CoreResult<Option<u64>> {
        Ok(self.get(field)?.as_integer())
    }

    /// Returns the text in a field, or `None` if it holds an integer.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::UnknownField`] if the field is not declared.
    pub fn get_text(&self, field: &str) -> CoreResult<Option<&str>> {
        Ok(self.get(field)?.as_text())
    }

    /// Returns all values in schema order.
    #[must_use]
    pub fn values(&self) -> &[Value] {
        &self.values
    }

    /// Iterates `(field, value)` pairs in schema order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.schema
            .fields()
            .iter()
            .map(String::as_str)
            .zip(self.values.iter())
    }

    /// Returns the schema this record conforms to.
    #[must_use]
    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub(crate) fn value_at(&self, index: usize) -> &Value {
        &self.values[index]
    }

    pub(crate) fn replace(&mut self, index: usize, value: Value) -> Value {
        std::mem::replace(&mut self.values[index], value)
    }
}

/// A record under construction.
///
/// Created by [`EntityMut::create_record`](crate::EntityMut::create_record).
/// Values are staged with [`set`](Self::set); nothing is stored until
/// [`insert`](Self::insert), which adds the record and flushes the store
/// once. Dropping a builder discards the record.
#[must_use = "a record is only stored when `insert` is called"]
pub struct RecordBuilder<'db> {
    db: &'db mut Database,
    slot: usize,
    insert_first: bool,
    values: Vec<Option<Value>>,
}

impl<'db> RecordBuilder<'db> {
    pub(crate) fn new(db: &'db mut Database, slot: usize, insert_first: bool) -> Self {
        let width = db.entity_at(slot).schema().len();
        Self {
            db,
            slot,
            insert_first,
            values: vec![None; width],
        }
    }

    fn schema(&self) -> &Schema {
        self.db.entity_at(self.slot).schema()
    }

    /// Stages a field value.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::UnknownField`] for an undeclared field and
    /// [`CoreError::InvalidValue`] for text that cannot be encoded
    /// unambiguously.
    pub fn set(mut self, field: &str, value: impl Into<Value>) -> CoreResult<Self> {
        let value = value.into();
        let index = self.schema().position(field)?;
        self.schema().validate(index, &value)?;
        self.values[index] = Some(value);
        Ok(self)
    }

    /// Adds the record to its entity and flushes the store.
    ///
    /// The record is appended, or prepended if the builder was created with
    /// `insert_first`.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::MissingField`] if a field was never set, or the
    /// flush error. A failed flush leaves the entity unchanged.
    pub fn insert(self) -> CoreResult<&'db Record> {
        let Self {
            db,
            slot,
            insert_first,
            values,
        } = self;

        let entity = db.entity_at(slot);
        let schema = Arc::clone(entity.shared_schema());
        let values = values
            .into_iter()
            .zip(schema.fields())
            .map(|(value, field)| {
                value.ok_or_else(|| CoreError::MissingField {
                    entity: schema.entity().to_string(),
                    field: field.clone(),
                })
            })
            .collect::<CoreResult<Vec<_>>>()?;

        let record = Record::new(schema, values);
        let records = &mut db.entity_at_mut(slot).records;
        if insert_first {
            records.push_front(record);
        } else {
            records.push_back(record);
        }

        db.commit(|db| {
            let records = &mut db.entity_at_mut(slot).records;
            if insert_first {
                records.pop_front();
            } else {
                records.pop_back();
            }
        })?;

        let db: &'db Database = db;
        let entity = db.entity_at(slot);
        let inserted = if insert_first {
            entity.records.front()
        } else {
            entity.records.back()
        };
        inserted.ok_or_else(|| CoreError::record_not_found(entity.name()))
    }
}

/// A mutable handle to a stored record.
///
/// Every [`set`](Self::set) is written through to the backing file before it
/// returns.
pub struct RecordMut<'db> {
    db: &'db mut Database,
    slot: usize,
    position: usize,
}

impl<'db> RecordMut<'db> {
    pub(crate) fn new(db: &'db mut Database, slot: usize, position: usize) -> Self {
        Self { db, slot, position }
    }

    /// Returns the record's position in its entity.
    #[must_use]
    pub fn position(&self) -> usize {
        self.position
    }

    /// Sets a field and flushes the store.
    ///
    /// Returns the same handle so calls can be chained.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::UnknownField`], [`CoreError::InvalidValue`], or
    /// the flush error. A failed flush restores the previous value.
    pub fn set(&mut self, field: &str, value: impl Into<Value>) -> CoreResult<&mut Self> {
        let value = value.into();
        let schema = Arc::clone(self.entity().shared_schema());
        let index = schema.position(field)?;
        schema.validate(index, &value)?;

        let (slot, position) = (self.slot, self.position);
        let previous = self.record_mut().replace(index, value);
        self.db.commit(move |db| {
            db.entity_at_mut(slot).records[position].replace(index, previous);
        })?;
        Ok(self)
    }

    fn entity(&self) -> &Entity {
        self.db.entity_at(self.slot)
    }

    fn record_mut(&mut self) -> &mut Record {
        &mut self.db.entity_at_mut(self.slot).records[self.position]
    }
}

impl Deref for RecordMut<'_> {
    type Target = Record;

    fn deref(&self) -> &Record {
        &self.entity().records[self.position]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> Record {
        let schema = Arc::new(Schema::new("E", ["A", "B"]).unwrap());
        Record::new(schema, vec![Value::Integer(1), Value::text("x")])
    }

    #[test]
    fn get_by_field() {
        let record = record();
        assert_eq!(record.get("A").unwrap(), &Value::Integer(1));
        assert_eq!(record.get_integer("A").unwrap(), Some(1));
        assert_eq!(record.get_text("B").unwrap(), Some("x"));
        assert_eq!(record.get_text("A").unwrap(), None);
        assert!(matches!(
            record.get("C"),
            Err(CoreError::UnknownField { .. })
        ));
    }

    #[test]
    fn iterate_in_schema_order() {
        let record = record();
        let pairs: Vec<_> = record.iter().collect();
        assert_eq!(
            pairs,
            vec![("A", &Value::Integer(1)), ("B", &Value::text("x"))]
        );
    }

    #[test]
    fn replace_returns_previous() {
        let mut record = record();
        let previous = record.replace(0, Value::Integer(2));
        assert_eq!(previous, Value::Integer(1));
        assert_eq!(record.value_at(0), &Value::Integer(2));
    }
}
