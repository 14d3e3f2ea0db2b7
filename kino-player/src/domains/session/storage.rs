//! Session storage backends.

use std::{
    collections::BTreeMap,
    fs, io,
    path::{Path, PathBuf},
};

use directories::ProjectDirs;
use kino_contracts::storage::{SessionStorage, StorageError};
use parking_lot::Mutex;

pub(crate) const SESSION_FILE: &str = "session.json";

/// Process-local storage for tests and throwaway sessions.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: Mutex<BTreeMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStorage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.lock().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries.lock().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.entries.lock().remove(key);
        Ok(())
    }
}

/// JSON object on disk, one string value per key.
///
/// Every write rewrites the whole file; the store holds a handful of keys.
#[derive(Debug)]
pub struct FileStorage {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    /// `session.json` under `data_dir`, or under the platform data directory
    /// when no override is given.
    pub fn in_data_dir(data_dir: Option<&Path>) -> Result<Self, StorageError> {
        let dir = match data_dir {
            Some(dir) => dir.to_path_buf(),
            None => ProjectDirs::from("", "kino", "kino-watch")
                .ok_or_else(|| {
                    StorageError::Io(io::Error::other(
                        "could not determine a data directory",
                    ))
                })?
                .data_dir()
                .to_path_buf(),
        };
        Ok(Self::new(dir.join(SESSION_FILE)))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_entries(&self) -> Result<BTreeMap<String, String>, StorageError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                return Ok(BTreeMap::new());
            }
            Err(err) => return Err(err.into()),
        };
        if raw.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        serde_json::from_str(&raw).map_err(|err| {
            StorageError::Corrupt(format!("{}: {}", self.path.display(), err))
        })
    }

    fn write_entries(
        &self,
        entries: &BTreeMap<String, String>,
    ) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(entries)
            .map_err(|err| StorageError::Corrupt(err.to_string()))?;
        fs::write(&self.path, json)?;
        Ok(())
    }
}

impl SessionStorage for FileStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let _guard = self.lock.lock();
        Ok(self.read_entries()?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let _guard = self.lock.lock();
        let mut entries = self.read_entries()?;
        entries.insert(key.to_string(), value.to_string());
        self.write_entries(&entries)
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let _guard = self.lock.lock();
        let mut entries = self.read_entries()?;
        if entries.remove(key).is_some() {
            self.write_entries(&entries)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn file_storage_persists_across_instances() {
        let dir = TempDir::new().unwrap();
        let storage = FileStorage::in_data_dir(Some(dir.path())).unwrap();
        storage.set("token", "abc").unwrap();

        let reopened = FileStorage::new(dir.path().join(SESSION_FILE));
        assert_eq!(reopened.get("token").unwrap().as_deref(), Some("abc"));

        reopened.remove("token").unwrap();
        assert_eq!(storage.get("token").unwrap(), None);
    }

    #[test]
    fn missing_file_reads_as_empty() {
        let dir = TempDir::new().unwrap();
        let storage = FileStorage::new(dir.path().join("nested/session.json"));
        assert_eq!(storage.get("user").unwrap(), None);
        storage.remove("user").unwrap();
        assert!(!storage.path().exists());
    }

    #[test]
    fn corrupt_file_is_reported() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(SESSION_FILE);
        fs::write(&path, "[1, 2").unwrap();

        let storage = FileStorage::new(path);
        assert!(matches!(
            storage.get("token"),
            Err(StorageError::Corrupt(_))
        ));
    }
}
