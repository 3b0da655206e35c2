//! Error types for storage operations.

use std::io;
use thiserror::Error;

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Errors that can occur during storage operations.
#[derive(Debug, Error)]
pub enum StorageError {
    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The store name cannot be used as a backing file name.
    #[error("invalid store name {name:?}: {reason}")]
    InvalidName {
        /// The rejected store name.
        name: String,
        /// Why it was rejected.
        reason: &'static str,
    },
}
