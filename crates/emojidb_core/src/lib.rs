//! # EmojiDB Core
//!
//! Core record store for EmojiDB.
//!
//! A store is a named set of entities, each a schema-typed, ordered list of
//! records. The whole store lives in one human-readable backing file written
//! with the symbolic encoding from `emojidb_codec`.
//!
//! This crate provides:
//! - [`Database`], the store handle, with load-or-create and force-create
//!   opening modes
//! - [`Entity`] and [`EntityMut`] for reading and changing record lists
//! - [`RecordBuilder`] and [`RecordMut`] for creating and editing records
//! - [`Schema`] validation of names, markers and text values
//!
//! ## Durability
//!
//! Every mutation rewrites the backing file before returning. If that write
//! fails the mutation is undone, so memory always matches the last file that
//! was completely written.

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod database;
mod entity;
mod error;
mod record;
mod schema;

pub use config::{Config, OpenMode};
pub use database::Database;
pub use emojidb_codec::Value;
pub use entity::{Entity, EntityMut};
pub use error::{CoreError, CoreResult};
pub use record::{Record, RecordBuilder, RecordMut};
pub use schema::Schema;

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
