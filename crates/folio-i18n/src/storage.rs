//! Durable preference storage

use parking_lot::{Mutex, RwLock};
use std::collections::{BTreeMap, HashMap};
use std::fmt::Debug;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

/// Key under which the language preference is stored
pub const LANGUAGE_STORAGE_KEY: &str = "portfolio-language";

/// File name used by [`FileStorage`]
pub const PREFERENCES_FILE: &str = "preferences.json";

/// Failures of a preference storage backend
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StorageError {
    /// Backend disabled or not reachable in this context
    #[error("storage unavailable: {0}")]
    Unavailable(String),

    /// Backend refused the write for lack of space
    #[error("storage quota exceeded")]
    QuotaExceeded,

    /// Underlying I/O failure
    #[error("storage I/O failure ({kind:?}): {message}")]
    Io {
        /// Error kind reported by the OS
        kind: io::ErrorKind,
        /// Rendered error
        message: String,
    },

    /// Stored data could not be decoded
    #[error("stored preferences are corrupt: {0}")]
    Corrupt(String),
}

impl From<io::Error> for StorageError {
    fn from(err: io::Error) -> Self {
        Self::Io {
            kind: err.kind(),
            message: err.to_string(),
        }
    }
}

/// String key/value storage that survives restarts
pub trait PreferenceStorage: Send + Sync + Debug {
    /// Read a value; `Ok(None)` when the key was never written
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Write or overwrite a value
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// In-process storage; values are lost when the process exits
#[derive(Debug, Default)]
pub struct MemoryStorage {
    values: RwLock<HashMap<String, String>>,
}

impl MemoryStorage {
    /// Create an empty storage
    pub fn new() -> Self {
        Self::default()
    }
}

impl PreferenceStorage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.values.read().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.values.write().insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Storage that rejects every operation, for contexts where persistence is off
#[derive(Debug, Clone, Default)]
pub struct DisabledStorage;

impl PreferenceStorage for DisabledStorage {
    fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
        Err(StorageError::Unavailable("persistence disabled".to_string()))
    }

    fn set(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
        Err(StorageError::Unavailable("persistence disabled".to_string()))
    }
}

/// JSON object file holding every preference
///
/// Writes replace the file atomically through a temporary file in the same
/// directory.
#[derive(Debug)]
pub struct FileStorage {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl FileStorage {
    /// Store preferences in `dir/preferences.json`
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        Self::at_path(dir.as_ref().join(PREFERENCES_FILE))
    }

    /// Store preferences in an explicit file
    pub fn at_path<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            write_lock: Mutex::new(()),
        }
    }

    /// Location of the preferences file
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> Result<BTreeMap<String, String>, StorageError> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(e) => return Err(e.into()),
        };
        if content.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        serde_json::from_str(&content).map_err(|e| StorageError::Corrupt(e.to_string()))
    }

    fn write_all(&self, values: &BTreeMap<String, String>) -> Result<(), StorageError> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        std::fs::create_dir_all(&dir)?;

        let body = serde_json::to_vec_pretty(values).map_err(|e| StorageError::Corrupt(e.to_string()))?;
        let mut temp = tempfile::NamedTempFile::new_in(&dir)?;
        temp.write_all(&body).map_err(map_write_error)?;
        temp.as_file().sync_all()?;
        temp.persist(&self.path).map_err(|e| StorageError::from(e.error))?;
        Ok(())
    }
}

fn map_write_error(err: io::Error) -> StorageError {
    // ENOSPC / EDQUOT
    match err.raw_os_error() {
        Some(28) | Some(122) => StorageError::QuotaExceeded,
        _ => err.into(),
    }
}

impl PreferenceStorage for FileStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.read_all()?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let _guard = self.write_lock.lock();
        let mut values = match self.read_all() {
            Ok(values) => values,
            Err(StorageError::Corrupt(reason)) => {
                debug!("Replacing corrupt preferences file {:?}: {}", self.path, reason);
                BTreeMap::new()
            }
            Err(e) => return Err(e),
        };
        values.insert(key.to_string(), value.to_string());
        self.write_all(&values)?;
        debug!("Stored preference '{}' in {:?}", key, self.path);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_storage() {
        let storage = MemoryStorage::new();
        assert_eq!(storage.get(LANGUAGE_STORAGE_KEY).unwrap(), None);
        storage.set(LANGUAGE_STORAGE_KEY, "en").unwrap();
        storage.set(LANGUAGE_STORAGE_KEY, "es").unwrap();
        assert_eq!(storage.get(LANGUAGE_STORAGE_KEY).unwrap().as_deref(), Some("es"));
    }

    #[test]
    fn test_disabled_storage_rejects_everything() {
        let storage = DisabledStorage;
        assert!(matches!(storage.get("k"), Err(StorageError::Unavailable(_))));
        assert!(matches!(storage.set("k", "v"), Err(StorageError::Unavailable(_))));
    }

    #[test]
    fn test_file_storage_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(dir.path());
        assert_eq!(storage.get(LANGUAGE_STORAGE_KEY).unwrap(), None);

        storage.set(LANGUAGE_STORAGE_KEY, "en").unwrap();
        storage.set("theme", "dark").unwrap();

        let reopened = FileStorage::new(dir.path());
        assert_eq!(reopened.get(LANGUAGE_STORAGE_KEY).unwrap().as_deref(), Some("en"));
        assert_eq!(reopened.get("theme").unwrap().as_deref(), Some("dark"));
    }

    #[test]
    fn test_file_storage_creates_directory() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("state").join("folio");
        let storage = FileStorage::new(&nested);
        storage.set(LANGUAGE_STORAGE_KEY, "es").unwrap();
        assert!(nested.join(PREFERENCES_FILE).exists());
    }

    #[test]
    fn test_corrupt_file_reports_then_recovers_on_write() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(dir.path());
        std::fs::write(storage.path(), "not json").unwrap();

        assert!(matches!(storage.get(LANGUAGE_STORAGE_KEY), Err(StorageError::Corrupt(_))));

        storage.set(LANGUAGE_STORAGE_KEY, "en").unwrap();
        assert_eq!(storage.get(LANGUAGE_STORAGE_KEY).unwrap().as_deref(), Some("en"));
    }

    #[test]
    fn test_io_error_conversion_keeps_kind() {
        let err: StorageError = io::Error::new(io::ErrorKind::PermissionDenied, "denied").into();
        assert!(matches!(err, StorageError::Io { kind: io::ErrorKind::PermissionDenied, .. }));
    }
}
