//! Key-value storage for small text records
//!
//! The settings record is the only thing persisted. `MemoryStorage` backs
//! tests and headless runs; `FileStorage` keeps one file per key on native
//! targets.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("could not encode record: {0}")]
    Encode(#[from] serde_json::Error),
}

/// LocalStorage-shaped string store
pub trait Storage {
    fn get_item(&self, key: &str) -> Option<String>;
    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}

#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    items: HashMap<String, String>,
}

impl Storage for MemoryStorage {
    fn get_item(&self, key: &str) -> Option<String> {
        self.items.get(key).cloned()
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.items.insert(key.to_owned(), value.to_owned());
        Ok(())
    }
}

/// One `<key>.json` file per key inside a directory
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        let name: String = key
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() || c == '_' || c == '-' { c } else { '_' })
            .collect();
        self.dir.join(format!("{name}.json"))
    }
}

impl Storage for FileStorage {
    fn get_item(&self, key: &str) -> Option<String> {
        let path = self.path_for(key);
        match std::fs::read_to_string(&path) {
            Ok(text) => Some(text),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => None,
            Err(err) => {
                log::warn!("Could not read {}: {}", path.display(), err);
                None
            }
        }
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        std::fs::create_dir_all(&self.dir)?;
        // Write-then-rename so a crash never leaves a torn record
        let path = self.path_for(key);
        let tmp = path.with_extension("json.tmp");
        std::fs::write(&tmp, value)?;
        std::fs::rename(&tmp, &path)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_dir(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("cross-road-{}-{}", name, std::process::id()))
    }

    #[test]
    fn test_memory_storage() {
        let mut store = MemoryStorage::default();
        assert_eq!(store.get_item("a"), None);
        store.set_item("a", "1").unwrap();
        store.set_item("a", "2").unwrap();
        assert_eq!(store.get_item("a").as_deref(), Some("2"));
    }

    #[test]
    fn test_file_storage_round_trip() {
        let dir = scratch_dir("roundtrip");
        let mut store = FileStorage::new(&dir);
        assert_eq!(store.get_item("crossRoadSettings"), None);
        store.set_item("crossRoadSettings", "{\"speedScale\":1.2}").unwrap();
        assert_eq!(
            store.get_item("crossRoadSettings").as_deref(),
            Some("{\"speedScale\":1.2}")
        );
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_file_storage_sanitizes_keys() {
        let store = FileStorage::new("/tmp/x");
        assert_eq!(store.path_for("../evil key"), PathBuf::from("/tmp/x/___evil_key.json"));
    }
}
