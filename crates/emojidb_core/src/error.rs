//! Error types for EmojiDB core.

use emojidb_codec::CodecError;
use thiserror::Error;

/// Result type for core operations.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors that can occur in EmojiDB core operations.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Storage backend error.
    #[error("storage error: {0}")]
    Storage(#[from] emojidb_storage::StorageError),

    /// The backing file violates the encoding grammar.
    #[error("codec error: {0}")]
    Codec(#[from] CodecError),

    /// The backing file decodes but cannot be loaded as a store.
    #[error("invalid store format: {message}")]
    InvalidFormat {
        /// Description of the format issue.
        message: String,
    },

    /// Entity not found.
    #[error("entity not found: {name}")]
    EntityNotFound {
        /// Name of the entity.
        name: String,
    },

    /// No record matched, or the entity has no records.
    #[error("no record found in entity {entity}")]
    RecordNotFound {
        /// Name of the entity searched.
        entity: String,
    },

    /// The field is not part of the entity's schema.
    #[error("entity {entity} has no field {field}")]
    UnknownField {
        /// Name of the entity.
        entity: String,
        /// The undeclared field.
        field: String,
    },

    /// A record was inserted without a value for every field.
    #[error("record for entity {entity} is missing field {field}")]
    MissingField {
        /// Name of the entity.
        entity: String,
        /// The unset field.
        field: String,
    },

    /// The entity name or field list is not a valid schema.
    #[error("invalid schema for entity {entity}: {message}")]
    InvalidSchema {
        /// Name of the entity.
        entity: String,
        /// Description of the problem.
        message: String,
    },

    /// The value cannot be stored in the field without ambiguity.
    #[error("invalid value for field {field} of entity {entity}: {source}")]
    InvalidValue {
        /// Name of the entity.
        entity: String,
        /// The field being set.
        field: String,
        /// Why the value was rejected.
        source: CodecError,
    },
}

impl CoreError {
    /// Creates an invalid format error.
    pub fn invalid_format(message: impl Into<String>) -> Self {
        Self::InvalidFormat {
            message: message.into(),
        }
    }

    /// Creates an entity not found error.
    pub fn entity_not_found(name: impl Into<String>) -> Self {
        Self::EntityNotFound { name: name.into() }
    }

    /// Creates a record not found error.
    pub fn record_not_found(entity: impl Into<String>) -> Self {
        Self::RecordNotFound {
            entity: entity.into(),
        }
    }

    /// Creates an invalid schema error.
    pub fn invalid_schema(entity: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidSchema {
            entity: entity.into(),
            message: message.into(),
        }
    }

    /// True if a backing file exists but does not hold a valid store.
    #[must_use]
    pub fn is_format_error(&self) -> bool {
        matches!(self, Self::Codec(_) | Self::InvalidFormat { .. })
    }

    /// True if reading or writing the backing file failed.
    #[must_use]
    pub fn is_io_error(&self) -> bool {
        matches!(self, Self::Storage(_))
    }

    /// True if a lookup by name or field found nothing.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::EntityNotFound { .. } | Self::RecordNotFound { .. })
    }

    /// True if an operation did not respect an entity's schema.
    #[must_use]
    pub fn is_schema_error(&self) -> bool {
        matches!(
            self,
            Self::UnknownField { .. }
                | Self::MissingField { .. }
                | Self::InvalidSchema { .. }
                | Self::InvalidValue { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classification() {
        assert!(CoreError::from(CodecError::MissingStoreName).is_format_error());
        assert!(CoreError::invalid_format("bad").is_format_error());
        assert!(CoreError::entity_not_found("📂").is_not_found());
        assert!(CoreError::record_not_found("📂").is_not_found());
        assert!(CoreError::invalid_schema("📂", "no fields").is_schema_error());

        let io = std::io::Error::new(std::io::ErrorKind::Other, "disk");
        let err = CoreError::from(emojidb_storage::StorageError::from(io));
        assert!(err.is_io_error());
        assert!(!err.is_format_error());
    }

    #[test]
    fn display_names_the_field() {
        let err = CoreError::UnknownField {
            entity: "E".to_string(),
            field: "Z".to_string(),
        };
        assert_eq!(err.to_string(), "entity E has no field Z");
    }
}
