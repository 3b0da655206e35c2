//! # EmojiDB Testkit
//!
//! Test utilities for EmojiDB.
//!
//! This crate provides:
//! - Test fixtures and store helpers that survive a simulated restart
//! - Property-based test generators using proptest
//!
//! The cross-crate property and scenario tests live in this crate's
//! `tests/` directory.
//!
//! ## Usage
//!
//! ```rust
//! use emojidb_testkit::prelude::*;
//!
//! let mut store = TestStore::memory();
//! store.create_entity("E", ["A", "B"]).unwrap();
//! let reloaded = store.reopen();
//! assert_eq!(snapshot(&reloaded), snapshot(&store));
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod fixtures;
pub mod generators;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::fixtures::*;
    pub use crate::generators::*;
}

pub use fixtures::*;
pub use generators::*;
