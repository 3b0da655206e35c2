//! # EmojiDB Storage
//!
//! Persistence backends for EmojiDB.
//!
//! This crate provides the lowest-level storage abstraction for EmojiDB.
//! Storage backends are **opaque byte stores** holding one backing file per
//! store name. They do not interpret the data they store.
//!
//! ## Design Principles
//!
//! - Backends read and overwrite whole files (load, store)
//! - A missing file is reported as `None`, every other failure as an error
//! - No knowledge of the symbolic encoding
//! - Must be `Send + Sync`
//!
//! ## Available Backends
//!
//! - [`InMemoryBackend`] - For testing and ephemeral storage
//! - [`FileBackend`] - For persistent storage using OS file APIs
//!
//! ## Example
//!
//! ```rust
//! use emojidb_storage::{StorageBackend, InMemoryBackend};
//!
//! let backend = InMemoryBackend::new();
//! backend.store("🗂", "🗂\n".as_bytes()).unwrap();
//! let data = backend.load("🗂").unwrap().unwrap();
//! assert_eq!(data, "🗂\n".as_bytes());
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod backend;
mod error;
mod file;
mod memory;

pub use backend::StorageBackend;
pub use error::{StorageError, StorageResult};
pub use file::{FileBackend, DEFAULT_EXTENSION};
pub use memory::InMemoryBackend;
