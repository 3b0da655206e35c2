//! File-based storage backend for persistent storage.

use crate::backend::StorageBackend;
use crate::error::{StorageError, StorageResult};
use parking_lot::Mutex;
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Extension given to backing files unless configured otherwise.
pub const DEFAULT_EXTENSION: &str = "emojidb";

/// A file-based storage backend.
///
/// Each store lives in `<dir>/<name>.<extension>`. Data survives process
/// restarts.
///
/// # Durability
///
/// `store()` truncates the file, writes the new contents and calls
/// `File::sync_all()` before returning. The rewrite happens in place, so a
/// crash mid-write may leave a truncated file.
///
/// # Thread Safety
///
/// Writes through one backend are serialized by an internal lock. Nothing
/// coordinates separate processes sharing a directory.
///
/// # Example
///
/// ```no_run
/// use emojidb_storage::{StorageBackend, FileBackend};
/// use std::path::Path;
///
/// let backend = FileBackend::new(Path::new("data"));
/// backend.store("🗂", "🗂\n".as_bytes()).unwrap();
/// assert!(backend.load("🗂").unwrap().is_some());
/// ```
#[derive(Debug)]
pub struct FileBackend {
    dir: PathBuf,
    extension: String,
    create_dirs: bool,
    write_lock: Mutex<()>,
}

impl FileBackend {
    /// Creates a backend that keeps backing files in `dir`.
    ///
    /// The directory is created on the first write if it doesn't exist.
    #[must_use]
    pub fn new(dir: &Path) -> Self {
        Self {
            dir: dir.to_path_buf(),
            extension: DEFAULT_EXTENSION.to_string(),
            create_dirs: true,
            write_lock: Mutex::new(()),
        }
    }

    /// Sets the backing file extension (without the leading dot).
    #[must_use]
    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into();
        self
    }

    /// Sets whether missing directories are created on write.
    #[must_use]
    pub fn create_dirs(mut self, value: bool) -> Self {
        self.create_dirs = value;
        self
    }

    /// Returns the directory holding the backing files.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Returns the backing file path of the named store.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::InvalidName`] if the name would escape the
    /// directory or is not a usable file name.
    pub fn path_for(&self, name: &str) -> StorageResult<PathBuf> {
        let reason = if name.is_empty() {
            Some("empty name")
        } else if name == "." || name == ".." {
            Some("reserved path component")
        } else if name.contains(['/', '\\', '\0']) {
            Some("contains a path separator or NUL")
        } else {
            None
        };
        if let Some(reason) = reason {
            return Err(StorageError::InvalidName {
                name: name.to_string(),
                reason,
            });
        }

        let file_name = if self.extension.is_empty() {
            name.to_string()
        } else {
            format!("{name}.{}", self.extension)
        };
        Ok(self.dir.join(file_name))
    }
}

impl StorageBackend for FileBackend {
    fn load(&self, name: &str) -> StorageResult<Option<Vec<u8>>> {
        let path = self.path_for(name)?;
        match fs::read(&path) {
            Ok(data) => {
                debug!(path = %path.display(), bytes = data.len(), "loaded backing file");
                Ok(Some(data))
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn store(&self, name: &str, contents: &[u8]) -> StorageResult<()> {
        let path = self.path_for(name)?;
        let _guard = self.write_lock.lock();

        if self.create_dirs {
            fs::create_dir_all(&self.dir)?;
        }

        let mut file = File::create(&path)?;
        file.write_all(contents)?;
        file.sync_all()?;

        debug!(path = %path.display(), bytes = contents.len(), "rewrote backing file");
        Ok(())
    }

    fn location(&self, name: &str) -> String {
        match self.path_for(name) {
            Ok(path) => path.display().to_string(),
            Err(_) => format!("{}/<invalid name {name:?}>", self.dir.display()),
        }
    }
}
