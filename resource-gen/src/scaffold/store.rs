//! File access for generated artifacts
//!
//! The generator never touches the filesystem directly. Every check, read and
//! write goes through [`FileStore`], with paths relative to the project root.
//! [`LocalFileStore`] is the real implementation and [`MemoryFileStore`] keeps
//! everything in memory for tests and dry runs.

use parking_lot::Mutex;
use std::collections::BTreeMap;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// File store errors
#[derive(Debug, Error)]
pub enum StoreError {
    /// File not found
    #[error("File not found: {}", .0.display())]
    NotFound(PathBuf),

    /// I/O error while accessing a file
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        /// Path being accessed
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },
}

/// Result type for file store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Abstraction over the project tree the generator writes into
///
/// All paths are relative to the project root the store was created for.
pub trait FileStore: Send + Sync {
    /// Whether a file exists at `path`
    fn exists(&self, path: &Path) -> bool;

    /// Read a UTF-8 file
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] if the file does not exist, or
    /// [`StoreError::Io`] if it cannot be read.
    fn read(&self, path: &Path) -> StoreResult<String>;

    /// Create or overwrite a file, creating parent directories as needed
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Io`] if the file or its directories cannot be written.
    fn write(&self, path: &Path, contents: &str) -> StoreResult<()>;

    /// Append to a file, creating it (and its parent directories) if missing
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Io`] if the file cannot be opened or written.
    fn append(&self, path: &Path, contents: &str) -> StoreResult<()>;
}

/// Filesystem-backed store rooted at a project directory
#[derive(Debug, Clone)]
pub struct LocalFileStore {
    root: PathBuf,
}

impl LocalFileStore {
    /// Create a store rooted at `root`
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Project root
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        self.root.join(path)
    }

    fn ensure_parent(full_path: &Path) -> StoreResult<()> {
        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent).map_err(|source| StoreError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        Ok(())
    }
}

impl FileStore for LocalFileStore {
    fn exists(&self, path: &Path) -> bool {
        self.resolve(path).is_file()
    }

    fn read(&self, path: &Path) -> StoreResult<String> {
        let full_path = self.resolve(path);
        fs::read_to_string(&full_path).map_err(|source| {
            if source.kind() == std::io::ErrorKind::NotFound {
                StoreError::NotFound(full_path.clone())
            } else {
                StoreError::Io {
                    path: full_path.clone(),
                    source,
                }
            }
        })
    }

    fn write(&self, path: &Path, contents: &str) -> StoreResult<()> {
        let full_path = self.resolve(path);
        Self::ensure_parent(&full_path)?;
        fs::write(&full_path, contents).map_err(|source| StoreError::Io {
            path: full_path.clone(),
            source,
        })
    }

    fn append(&self, path: &Path, contents: &str) -> StoreResult<()> {
        let full_path = self.resolve(path);
        Self::ensure_parent(&full_path)?;

        let io_error = |source: std::io::Error| StoreError::Io {
            path: full_path.clone(),
            source,
        };

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&full_path)
            .map_err(io_error)?;
        file.write_all(contents.as_bytes()).map_err(io_error)
    }
}

/// In-memory store
#[derive(Debug, Default)]
pub struct MemoryFileStore {
    files: Mutex<BTreeMap<PathBuf, String>>,
}

impl MemoryFileStore {
    /// Empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a file
    #[must_use]
    pub fn with_file(self, path: impl Into<PathBuf>, contents: impl Into<String>) -> Self {
        self.files.lock().insert(path.into(), contents.into());
        self
    }

    /// Remove a file, returning its contents
    pub fn remove(&self, path: &Path) -> Option<String> {
        self.files.lock().remove(path)
    }

    /// Paths of all stored files, sorted
    #[must_use]
    pub fn paths(&self) -> Vec<PathBuf> {
        self.files.lock().keys().cloned().collect()
    }
}

impl FileStore for MemoryFileStore {
    fn exists(&self, path: &Path) -> bool {
        self.files.lock().contains_key(path)
    }

    fn read(&self, path: &Path) -> StoreResult<String> {
        self.files
            .lock()
            .get(path)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(path.to_path_buf()))
    }

    fn write(&self, path: &Path, contents: &str) -> StoreResult<()> {
        self.files.lock().insert(path.to_path_buf(), contents.to_string());
        Ok(())
    }

    fn append(&self, path: &Path, contents: &str) -> StoreResult<()> {
        self.files
            .lock()
            .entry(path.to_path_buf())
            .or_default()
            .push_str(contents);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_local_write_creates_directories() {
        let dir = tempdir().unwrap();
        let store = LocalFileStore::new(dir.path());
        let path = Path::new("app/Http/Controllers/TigerController.php");

        assert!(!store.exists(path));
        store.write(path, "<?php").unwrap();
        assert!(store.exists(path));
        assert_eq!(store.read(path).unwrap(), "<?php");
        assert!(dir.path().join(path).is_file());
    }

    #[test]
    fn test_local_append_creates_then_appends() {
        let dir = tempdir().unwrap();
        let store = LocalFileStore::new(dir.path());
        let path = Path::new("app/Http/routes.php");

        store.append(path, "a").unwrap();
        store.append(path, "b").unwrap();
        assert_eq!(store.read(path).unwrap(), "ab");
    }

    #[test]
    fn test_local_read_missing_file() {
        let dir = tempdir().unwrap();
        let store = LocalFileStore::new(dir.path());
        let err = store.read(Path::new("missing.php")).unwrap_err();
        assert!(matches!(err, StoreError::NotFound(_)));
    }

    #[test]
    fn test_local_directory_is_not_a_file() {
        let dir = tempdir().unwrap();
        fs::create_dir_all(dir.path().join("app")).unwrap();
        let store = LocalFileStore::new(dir.path());
        assert!(!store.exists(Path::new("app")));
    }

    #[test]
    fn test_memory_store() {
        let store = MemoryFileStore::new().with_file("routes.php", "<?php\n");
        let path = Path::new("routes.php");

        store.append(path, "Route::get();\n").unwrap();
        assert_eq!(store.read(path).unwrap(), "<?php\nRoute::get();\n");

        store.write(Path::new("a/B.php"), "x").unwrap();
        assert_eq!(
            store.paths(),
            vec![PathBuf::from("a/B.php"), PathBuf::from("routes.php")]
        );

        assert_eq!(store.remove(path).as_deref(), Some("<?php\nRoute::get();\n"));
        assert!(matches!(store.read(path), Err(StoreError::NotFound(_))));
    }
}
