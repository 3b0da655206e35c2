//! Store configuration.

use emojidb_storage::{FileBackend, DEFAULT_EXTENSION};
use std::path::PathBuf;

/// How a store treats an existing backing file when it is opened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OpenMode {
    /// Reuse the backing file if present and non-empty, else start empty.
    #[default]
    LoadOrCreate,
    /// Always start empty; the next flush overwrites any existing file.
    ForceCreate,
}

/// Configuration for opening a file-backed store.
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory holding the backing file.
    pub data_dir: PathBuf,

    /// What to do with an existing backing file.
    pub open_mode: OpenMode,

    /// Backing file extension, without the leading dot.
    pub file_extension: String,

    /// Whether to create `data_dir` if it doesn't exist.
    pub create_dirs: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("."),
            open_mode: OpenMode::LoadOrCreate,
            file_extension: DEFAULT_EXTENSION.to_string(),
            create_dirs: true,
        }
    }
}

impl Config {
    /// Creates a new configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the directory holding the backing file.
    #[must_use]
    pub fn data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.data_dir = dir.into();
        self
    }

    /// Sets the open mode.
    #[must_use]
    pub fn open_mode(mut self, mode: OpenMode) -> Self {
        self.open_mode = mode;
        self
    }

    /// Shorthand for `open_mode(OpenMode::ForceCreate)`.
    #[must_use]
    pub fn force_create(self) -> Self {
        self.open_mode(OpenMode::ForceCreate)
    }

    /// Sets the backing file extension.
    #[must_use]
    pub fn file_extension(mut self, extension: impl Into<String>) -> Self {
        self.file_extension = extension.into();
        self
    }

    /// Sets whether to create missing directories.
    #[must_use]
    pub fn create_dirs(mut self, value: bool) -> Self {
        self.create_dirs = value;
        self
    }

    /// Builds the file backend this configuration describes.
    #[must_use]
    pub fn backend(&self) -> FileBackend {
        FileBackend::new(&self.data_dir)
            .with_extension(self.file_extension.clone())
            .create_dirs(self.create_dirs)
    }
}
