use crate::constants::COLLECTION_KEY;
use crate::types::Collection;
use std::cell::RefCell;
use std::collections::HashMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use thiserror::Error;

// Persistence for the collection. A raw key/value port sits underneath so the collection
// logic never touches the filesystem directly and tests can run against memory.

/// Storage port for raw blobs keyed by logical name.
pub trait StorageBackend {
    /// Load a raw blob. Returns `NotFound` when missing.
    fn load_raw(&self, key: &str) -> Result<Vec<u8>, StoreError>;
    /// Persist a raw blob, replacing any previous value.
    fn save_raw(&self, key: &str, data: &[u8]) -> Result<(), StoreError>;
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("not found")]
    NotFound,
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("serde error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("no data directory could be resolved")]
    NoDataDir,
}

/// One `<key>.json` file per key under a base directory.
pub struct FsBackend {
    base: PathBuf,
}

impl FsBackend {
    pub fn new(base: impl Into<PathBuf>) -> Self {
        Self { base: base.into() }
    }

    /// Rooted at the platform data directory, e.g. `~/.local/share/qr-faces`.
    pub fn in_data_dir() -> Result<Self, StoreError> {
        let dirs = crate::config::project_dirs().ok_or(StoreError::NoDataDir)?;
        Ok(Self::new(dirs.data_dir()))
    }

    pub fn base(&self) -> &Path {
        &self.base
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.base.join(format!("{}.json", key))
    }
}

impl StorageBackend for FsBackend {
    fn load_raw(&self, key: &str) -> Result<Vec<u8>, StoreError> {
        match fs::read(self.path_for(key)) {
            Ok(bytes) => Ok(bytes),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Err(StoreError::NotFound),
            Err(err) => Err(StoreError::Io(err)),
        }
    }

    fn save_raw(&self, key: &str, data: &[u8]) -> Result<(), StoreError> {
        fs::create_dir_all(&self.base)?;
        let path = self.path_for(key);
        let tmp = path.with_extension("json.tmp");
        {
            let mut file = fs::File::create(&tmp)?;
            file.write_all(data)?;
            file.sync_all()?;
        }
        fs::rename(&tmp, &path)?;
        Ok(())
    }
}

#[derive(Default)]
pub struct MemoryBackend {
    blobs: RefCell<HashMap<String, Vec<u8>>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_value(key: &str, data: &[u8]) -> Self {
        let backend = Self::new();
        backend.blobs.borrow_mut().insert(key.to_string(), data.to_vec());
        backend
    }
}

impl StorageBackend for MemoryBackend {
    fn load_raw(&self, key: &str) -> Result<Vec<u8>, StoreError> {
        self.blobs
            .borrow()
            .get(key)
            .cloned()
            .ok_or(StoreError::NotFound)
    }

    fn save_raw(&self, key: &str, data: &[u8]) -> Result<(), StoreError> {
        self.blobs.borrow_mut().insert(key.to_string(), data.to_vec());
        Ok(())
    }
}

/// Loads and saves the whole collection under one fixed key.
pub struct CollectionStore<B> {
    backend: B,
    key: String,
}

impl<B> CollectionStore<B> {
    pub fn new(backend: B) -> Self {
        Self::with_key(backend, COLLECTION_KEY)
    }

    pub fn with_key(backend: B, key: impl Into<String>) -> Self {
        Self {
            backend,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }
}

impl<B: StorageBackend> CollectionStore<B> {
    /// Absent, empty or malformed state all load as an empty collection.
    pub fn load(&self) -> Collection {
        let bytes = match self.backend.load_raw(&self.key) {
            Ok(bytes) => bytes,
            Err(StoreError::NotFound) => return Collection::new(),
            Err(err) => {
                log::warn!("could not read {:?}, starting empty: {}", self.key, err);
                return Collection::new();
            }
        };
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Collection::new();
        }
        match serde_json::from_slice::<Collection>(&bytes) {
            Ok(collection) => {
                log::info!("loaded {} faces from {:?}", collection.len(), self.key);
                collection
            }
            Err(err) => {
                log::warn!("malformed {:?}, starting empty: {}", self.key, err);
                Collection::new()
            }
        }
    }

    pub fn save(&self, collection: &Collection) -> Result<(), StoreError> {
        let data = serde_json::to_vec(collection)?;
        self.backend.save_raw(&self.key, &data)?;
        log::debug!("saved {} faces to {:?}", collection.len(), self.key);
        Ok(())
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::types::{Face, Rarity};
    use rstest::rstest;
    use std::cell::Cell;
    use tempdir::TempDir;

    /// Memory backend whose writes fail while `fail_saves` is set.
    #[derive(Default)]
    pub(crate) struct FlakyBackend {
        pub inner: MemoryBackend,
        pub fail_saves: Cell<bool>,
    }

    impl StorageBackend for FlakyBackend {
        fn load_raw(&self, key: &str) -> Result<Vec<u8>, StoreError> {
            self.inner.load_raw(key)
        }

        fn save_raw(&self, key: &str, data: &[u8]) -> Result<(), StoreError> {
            if self.fail_saves.get() {
                return Err(StoreError::Io(std::io::Error::new(
                    std::io::ErrorKind::Other,
                    "disk full",
                )));
            }
            self.inner.save_raw(key, data)
        }
    }

    fn sample() -> Collection {
        Collection::from(vec![
            Face::new("Dexter", "#3733cd", Rarity::new(3).unwrap()),
            Face::new("Luna", "hsl(12, 100%, 50%)", Rarity::new(9).unwrap()),
            Face::new("Dexter", "#3733cd", Rarity::new(3).unwrap()),
        ])
    }

    #[test]
    fn absent_value_loads_empty() {
        let store = CollectionStore::new(MemoryBackend::new());
        assert!(store.load().is_empty());
    }

    #[rstest]
    #[case(b"")]
    #[case(b"   \n")]
    #[case(b"not json")]
    #[case(b"{\"name\":\"x\"}")]
    #[case(b"[{\"name\":\"x\",\"color\":\"#000000\",\"rarity\":42}]")]
    #[case(b"[{\"name\":\"x\"}]")]
    fn malformed_value_loads_empty(#[case] raw: &[u8]) {
        let store = CollectionStore::new(MemoryBackend::with_value(COLLECTION_KEY, raw));
        assert!(store.load().is_empty());
    }

    #[test]
    fn memory_round_trip_preserves_order() {
        let store = CollectionStore::new(MemoryBackend::new());
        store.save(&sample()).unwrap();
        assert_eq!(store.load(), sample());
    }

    #[test]
    fn persisted_form_is_plain_json_array() {
        let store = CollectionStore::new(MemoryBackend::new());
        store.save(&sample()).unwrap();
        let raw = store.backend().load_raw(COLLECTION_KEY).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&raw).unwrap();
        assert_eq!(value.as_array().map(Vec::len), Some(3));
        assert_eq!(value[1]["rarity"], 9);
    }

    #[test]
    fn save_overwrites_in_full() {
        let store = CollectionStore::new(MemoryBackend::new());
        store.save(&sample()).unwrap();
        store.save(&Collection::new()).unwrap();
        assert!(store.load().is_empty());
    }

    #[test]
    fn fs_round_trip() {
        let dir = TempDir::new("qr-faces-store").unwrap();
        let store = CollectionStore::new(FsBackend::new(dir.path().join("nested")));
        assert!(store.load().is_empty());
        store.save(&sample()).unwrap();
        assert!(dir.path().join("nested").join("collection.json").exists());
        assert!(!dir.path().join("nested").join("collection.json.tmp").exists());

        let reopened = CollectionStore::new(FsBackend::new(dir.path().join("nested")));
        assert_eq!(reopened.load(), sample());
    }

    #[test]
    fn fs_malformed_file_loads_empty() {
        let dir = TempDir::new("qr-faces-store").unwrap();
        fs::write(dir.path().join("collection.json"), "[{").unwrap();
        let store = CollectionStore::new(FsBackend::new(dir.path()));
        assert!(store.load().is_empty());
    }

    #[test]
    fn failed_write_is_reported() {
        let store = CollectionStore::new(FlakyBackend::default());
        store.save(&sample()).unwrap();
        store.backend().fail_saves.set(true);
        assert!(matches!(store.save(&Collection::new()), Err(StoreError::Io(_))));
        assert_eq!(store.load(), sample());
    }

    #[test]
    fn custom_key_is_isolated() {
        let backend = MemoryBackend::new();
        backend.save_raw("other", b"[]").unwrap();
        let store = CollectionStore::with_key(backend, "faces");
        store.save(&sample()).unwrap();
        assert_eq!(store.backend().load_raw("other").unwrap(), b"[]");
        assert_eq!(store.load().len(), 3);
    }
}
