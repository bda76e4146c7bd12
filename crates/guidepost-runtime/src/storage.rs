#![forbid(unsafe_code)]

//! Key/value storage backends for tour state.
//!
//! The engine persists a handful of small strings (a JSON record and a
//! completion marker). [`StorageBackend`] is the seam: a browser binding
//! wraps `localStorage`, tests use [`MemoryStorage`], and native hosts can
//! use [`FileStorage`] (behind the `state-persistence` feature).
//!
//! # Failure Modes
//!
//! Backends report failures as [`StorageError`]. Callers in this workspace
//! never propagate them to the host: load failures are treated as absent
//! state, save failures are logged and dropped.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;

/// Errors from a storage backend.
#[derive(Debug)]
pub enum StorageError {
    /// Underlying I/O failed.
    Io(std::io::Error),
    /// Stored data could not be encoded or decoded.
    Serialization(String),
    /// The backend is not usable (quota exceeded, disabled, locked).
    Unavailable(String),
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "storage I/O error: {e}"),
            Self::Serialization(msg) => write!(f, "storage serialization error: {msg}"),
            Self::Unavailable(msg) => write!(f, "storage unavailable: {msg}"),
        }
    }
}

impl std::error::Error for StorageError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for StorageError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

/// Result alias for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// A string key/value store.
pub trait StorageBackend {
    /// Human-readable backend name for logs.
    fn name(&self) -> &str;

    /// Read the value under `key`. A missing key is `Ok(None)`.
    fn load(&self, key: &str) -> StorageResult<Option<String>>;

    /// Write `value` under `key`, replacing any previous value.
    fn save(&self, key: &str, value: &str) -> StorageResult<()>;

    /// Delete `key`. Deleting a missing key succeeds.
    fn remove(&self, key: &str) -> StorageResult<()>;
}

impl<S: StorageBackend + ?Sized> StorageBackend for Rc<S> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn load(&self, key: &str) -> StorageResult<Option<String>> {
        (**self).load(key)
    }

    fn save(&self, key: &str, value: &str) -> StorageResult<()> {
        (**self).save(key, value)
    }

    fn remove(&self, key: &str) -> StorageResult<()> {
        (**self).remove(key)
    }
}

/// In-process storage.
///
/// Clones share the same map, which is how a test hands "the same browser
/// profile" to two engine instances.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    entries: Rc<RefCell<BTreeMap<String, String>>>,
}

impl MemoryStorage {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    /// Whether the store is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }

    /// Snapshot of every key.
    #[must_use]
    pub fn keys(&self) -> Vec<String> {
        self.entries.borrow().keys().cloned().collect()
    }
}

impl StorageBackend for MemoryStorage {
    fn name(&self) -> &str {
        "memory"
    }

    fn load(&self, key: &str) -> StorageResult<Option<String>> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn save(&self, key: &str, value: &str) -> StorageResult<()> {
        self.entries
            .borrow_mut()
            .insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove(&self, key: &str) -> StorageResult<()> {
        self.entries.borrow_mut().remove(key);
        Ok(())
    }
}

#[cfg(feature = "state-persistence")]
pub use file::FileStorage;

#[cfg(feature = "state-persistence")]
mod file {
    use std::collections::BTreeMap;
    use std::path::{Path, PathBuf};

    use tracing::debug;

    use super::{StorageBackend, StorageError, StorageResult};

    /// JSON file storage.
    ///
    /// All keys live in one JSON object. Every write rewrites the file using
    /// a temp-file-then-rename so a crash never leaves a half-written file.
    /// A missing file reads as empty.
    #[derive(Debug, Clone)]
    pub struct FileStorage {
        path: PathBuf,
    }

    impl FileStorage {
        /// Store data at `path`. The parent directory must exist.
        #[must_use]
        pub fn new(path: impl Into<PathBuf>) -> Self {
            Self { path: path.into() }
        }

        /// Backing file path.
        #[must_use]
        pub fn path(&self) -> &Path {
            &self.path
        }

        fn read_all(&self) -> StorageResult<BTreeMap<String, String>> {
            if !self.path.exists() {
                return Ok(BTreeMap::new());
            }
            let contents = std::fs::read_to_string(&self.path)?;
            if contents.trim().is_empty() {
                return Ok(BTreeMap::new());
            }
            serde_json::from_str(&contents).map_err(|e| {
                StorageError::Serialization(format!(
                    "failed to parse {}: {e}",
                    self.path.display()
                ))
            })
        }

        fn write_all(&self, entries: &BTreeMap<String, String>) -> StorageResult<()> {
            let json = serde_json::to_string_pretty(entries)
                .map_err(|e| StorageError::Serialization(e.to_string()))?;
            let temp = self.path.with_extension("json.tmp");
            std::fs::write(&temp, json)?;
            std::fs::rename(&temp, &self.path)?;
            debug!(path = %self.path.display(), keys = entries.len(), "storage flushed");
            Ok(())
        }
    }

    impl StorageBackend for FileStorage {
        fn name(&self) -> &str {
            "file"
        }

        fn load(&self, key: &str) -> StorageResult<Option<String>> {
            Ok(self.read_all()?.remove(key))
        }

        fn save(&self, key: &str, value: &str) -> StorageResult<()> {
            let mut entries = self.read_all()?;
            entries.insert(key.to_owned(), value.to_owned());
            self.write_all(&entries)
        }

        fn remove(&self, key: &str) -> StorageResult<()> {
            let mut entries = self.read_all()?;
            if entries.remove(key).is_some() {
                self.write_all(&entries)?;
            }
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_storage_basic_ops() {
        let storage = MemoryStorage::new();
        assert!(storage.is_empty());
        assert_eq!(storage.load("k").unwrap(), None);

        storage.save("k", "v1").unwrap();
        storage.save("k", "v2").unwrap();
        assert_eq!(storage.load("k").unwrap().as_deref(), Some("v2"));
        assert_eq!(storage.len(), 1);

        storage.remove("k").unwrap();
        storage.remove("k").unwrap();
        assert!(storage.is_empty());
    }

    #[test]
    fn memory_storage_clones_share_entries() {
        let a = MemoryStorage::new();
        let b = a.clone();
        a.save("shared", "yes").unwrap();
        assert_eq!(b.load("shared").unwrap().as_deref(), Some("yes"));
        assert_eq!(b.keys(), vec!["shared".to_string()]);
    }

    #[test]
    fn rc_backend_forwards() {
        let inner = Rc::new(MemoryStorage::new());
        let handle: Rc<dyn StorageBackend> = inner.clone();
        handle.save("x", "1").unwrap();
        assert_eq!(handle.name(), "memory");
        assert_eq!(inner.load("x").unwrap().as_deref(), Some("1"));
    }

    #[test]
    fn storage_error_display_and_source() {
        let io = StorageError::from(std::io::Error::other("disk gone"));
        assert!(io.to_string().contains("disk gone"));
        assert!(std::error::Error::source(&io).is_some());
        let quota = StorageError::Unavailable("quota exceeded".into());
        assert_eq!(quota.to_string(), "storage unavailable: quota exceeded");
        assert!(std::error::Error::source(&quota).is_none());
    }
}
