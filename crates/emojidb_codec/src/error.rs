//! Error types for the codec crate.

use thiserror::Error;

/// Result type for codec operations.
pub type CodecResult<T> = Result<T, CodecError>;

/// Errors that can occur during encoding, decoding or value validation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    /// The blob has no store name line.
    #[error("missing store name line")]
    MissingStoreName,

    /// An entity header line does not follow the header grammar.
    #[error("malformed entity header on line {line}: {message}")]
    MalformedHeader {
        /// 1-based line number.
        line: usize,
        /// Description of the problem.
        message: String,
    },

    /// A record count is empty or contains a non-digit symbol.
    #[error("invalid record count on line {line}")]
    InvalidCount {
        /// 1-based line number.
        line: usize,
    },

    /// A record line does not split into the entity's fields.
    #[error("malformed record on line {line}: {message}")]
    MalformedRecord {
        /// 1-based line number.
        line: usize,
        /// Description of the problem.
        message: String,
    },

    /// The blob ended before an entity's announced record lines.
    #[error("entity {entity} announces {expected} records but only {found} follow")]
    MissingRecords {
        /// The entity being decoded.
        entity: String,
        /// The announced record count.
        expected: u64,
        /// The number of record lines actually present.
        found: u64,
    },

    /// A digit-symbol sequence does not fit in a `u64`.
    #[error("integer overflow")]
    IntegerOverflow,

    /// A name or field marker is not a single standalone symbol.
    #[error("invalid symbol {symbol:?}: {message}")]
    InvalidSymbol {
        /// The offending symbol.
        symbol: String,
        /// Why it was rejected.
        message: String,
    },

    /// A text value cannot be encoded without ambiguity.
    #[error("invalid text value {value:?}: {message}")]
    InvalidText {
        /// The offending text.
        value: String,
        /// Why it was rejected.
        message: String,
    },
}

impl CodecError {
    /// Create a malformed header error.
    pub fn malformed_header(line: usize, message: impl Into<String>) -> Self {
        Self::MalformedHeader {
            line,
            message: message.into(),
        }
    }

    /// Create a malformed record error.
    pub fn malformed_record(line: usize, message: impl Into<String>) -> Self {
        Self::MalformedRecord {
            line,
            message: message.into(),
        }
    }

    /// Create an invalid symbol error.
    pub fn invalid_symbol(symbol: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidSymbol {
            symbol: symbol.into(),
            message: message.into(),
        }
    }

    /// Create an invalid text error.
    pub fn invalid_text(value: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidText {
            value: value.into(),
            message: message.into(),
        }
    }
}
