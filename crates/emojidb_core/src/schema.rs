//! Entity schemas.

use crate::error::{CoreError, CoreResult};
use emojidb_codec::{check_header, check_text, Value};
use std::collections::HashMap;

/// The name and ordered field markers of an entity.
///
/// A schema is fixed when its entity is created. It is shared by the entity
/// and all of its records, and gives O(1) lookup from field marker to
/// position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schema {
    entity: String,
    fields: Vec<String>,
    positions: HashMap<String, usize>,
}

impl Schema {
    /// Creates a validated schema.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidSchema`] if there are no fields, a field
    /// marker repeats, or the name or a marker is not a single standalone
    /// symbol outside the digit alphabet.
    pub fn new<I, S>(entity: impl Into<String>, fields: I) -> CoreResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let entity = entity.into();
        let fields: Vec<String> = fields.into_iter().map(Into::into).collect();

        if fields.is_empty() {
            return Err(CoreError::invalid_schema(entity, "at least one field is required"));
        }
        check_header(&entity, &fields)
            .map_err(|e| CoreError::invalid_schema(entity.clone(), e.to_string()))?;

        let mut positions = HashMap::with_capacity(fields.len());
        for (i, field) in fields.iter().enumerate() {
            if positions.insert(field.clone(), i).is_some() {
                return Err(CoreError::invalid_schema(
                    entity,
                    format!("duplicate field {field}"),
                ));
            }
        }

        Ok(Self {
            entity,
            fields,
            positions,
        })
    }

    /// Returns the entity name.
    #[must_use]
    pub fn entity(&self) -> &str {
        &self.entity
    }

    /// Returns the field markers in order.
    #[must_use]
    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    /// Returns the number of fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Always false; a schema has at least one field.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Returns the position of a field.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::UnknownField`] if the field is not declared.
    pub fn position(&self, field: &str) -> CoreResult<usize> {
        self.positions
            .get(field)
            .copied()
            .ok_or_else(|| CoreError::UnknownField {
                entity: self.entity.clone(),
                field: field.to_string(),
            })
    }

    /// Checks that `value` can be written to the field at `index`.
    ///
    /// Integers are always valid. Text must survive a round trip through a
    /// record line of this entity.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidValue`] describing why the text is
    /// ambiguous.
    pub fn validate(&self, index: usize, value: &Value) -> CoreResult<()> {
        let Value::Text(text) = value else {
            return Ok(());
        };
        let marker = &self.fields[index];
        let next = self.fields.get(index + 1).map(String::as_str);
        check_text(text, marker, next, &self.fields).map_err(|source| CoreError::InvalidValue {
            entity: self.entity.clone(),
            field: marker.clone(),
            source,
        })
    }
}
