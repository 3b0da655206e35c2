//! Owned image of an encoded store.

use crate::value::Value;

/// A decoded store file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    /// The store name from the first line.
    pub name: String,
    /// Entity blocks in file order.
    pub entities: Vec<EntityBlock>,
}

/// One entity header and its record lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityBlock {
    /// The entity name.
    pub name: String,
    /// Field markers in schema order.
    pub fields: Vec<String>,
    /// Record values, each row in schema order.
    pub records: Vec<Vec<Value>>,
}

impl Document {
    /// Create an empty document.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            entities: Vec::new(),
        }
    }

    /// Finds an entity block by name.
    #[must_use]
    pub fn entity(&self, name: &str) -> Option<&EntityBlock> {
        self.entities.iter().find(|e| e.name == name)
    }

    /// Total number of records across all entities.
    #[must_use]
    pub fn record_count(&self) -> usize {
        self.entities.iter().map(|e| e.records.len()).sum()
    }
}

impl EntityBlock {
    /// Create an empty entity block.
    pub fn new(name: impl Into<String>, fields: Vec<String>) -> Self {
        Self {
            name: name.into(),
            fields,
            records: Vec::new(),
        }
    }

    /// Returns the position of a field marker in the schema.
    #[must_use]
    pub fn field_position(&self, field: &str) -> Option<usize> {
        self.fields.iter().position(|f| f == field)
    }
}
