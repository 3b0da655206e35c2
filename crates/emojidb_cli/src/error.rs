//! CLI error type.

use emojidb_codec::CodecError;
use emojidb_core::CoreError;
use emojidb_storage::StorageError;
use std::path::PathBuf;
use thiserror::Error;

/// Result type for CLI commands.
pub type CliResult<T> = Result<T, CliError>;

/// Errors reported by CLI commands.
#[derive(Debug, Error)]
pub enum CliError {
    /// The path does not name a file.
    #[error("{} is not a file path", .0.display())]
    InvalidPath(PathBuf),

    /// No backing file exists at the path.
    #[error("no backing file at {}", .0.display())]
    NotFound(PathBuf),

    /// Reading the file failed.
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// The file is not valid UTF-8.
    #[error("{} is not valid UTF-8", .0.display())]
    NotUtf8(PathBuf),

    /// The file does not follow the store grammar.
    #[error("cannot decode {}: {source}", .path.display())]
    Decode {
        /// The file being decoded.
        path: PathBuf,
        /// What the decoder rejected.
        source: CodecError,
    },

    /// The file decodes but is not a loadable store.
    #[error("invalid store in {}: {source}", .path.display())]
    InvalidStore {
        /// The file being loaded.
        path: PathBuf,
        /// Why the store was rejected.
        source: CoreError,
    },

    /// The requested entity is not in the file.
    #[error("entity {0} not found")]
    EntityNotFound(String),

    /// The file loads but re-encodes differently.
    #[error("{} is not in canonical form", .0.display())]
    NotCanonical(PathBuf),

    /// JSON output failed.
    #[error("JSON output failed: {0}")]
    Json(#[from] serde_json::Error),
}
