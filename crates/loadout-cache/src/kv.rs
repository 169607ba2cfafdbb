//! The [`KeyValueStore`] substrate and its backends.

use std::collections::HashMap;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use crate::error::CacheResult;

/// Synchronous string key/value storage on the device.
///
/// Implementations must be `Send + Sync`; each individual operation is
/// atomic, but no multi-key transactions are offered.
pub trait KeyValueStore: Send + Sync {
    /// Read a value. Returns `Ok(None)` if the key is absent.
    fn get(&self, key: &str) -> CacheResult<Option<String>>;

    /// Create or replace a value.
    fn set(&self, key: &str, value: &str) -> CacheResult<()>;

    /// Delete a value. Returns `Ok(true)` if the key existed.
    fn remove(&self, key: &str) -> CacheResult<bool>;

    /// Every stored key, sorted.
    fn keys(&self) -> CacheResult<Vec<String>>;
}

/// In-memory substrate for tests and ephemeral sessions.
#[derive(Debug, Default)]
pub struct InMemoryKeyValueStore {
    values: RwLock<HashMap<String, String>>,
}

impl InMemoryKeyValueStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys.
    pub fn len(&self) -> usize {
        self.values.read().expect("lock poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl KeyValueStore for InMemoryKeyValueStore {
    fn get(&self, key: &str) -> CacheResult<Option<String>> {
        Ok(self.values.read().expect("lock poisoned").get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> CacheResult<()> {
        self.values
            .write()
            .expect("lock poisoned")
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> CacheResult<bool> {
        Ok(self
            .values
            .write()
            .expect("lock poisoned")
            .remove(key)
            .is_some())
    }

    fn keys(&self) -> CacheResult<Vec<String>> {
        let mut keys: Vec<String> = self
            .values
            .read()
            .expect("lock poisoned")
            .keys()
            .cloned()
            .collect();
        keys.sort();
        Ok(keys)
    }
}

/// File-backed substrate: one file per key under a directory.
///
/// File names are the hex encoding of the key, so any key is a safe file
/// name. Writes replace the file atomically.
#[derive(Clone, Debug)]
pub struct FileKeyValueStore {
    dir: PathBuf,
}

impl FileKeyValueStore {
    /// Open (or create) a store rooted at `dir`.
    pub fn open(dir: impl AsRef<Path>) -> CacheResult<Self> {
        let dir = dir.as_ref().to_path_buf();
        std::fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.kv", hex::encode(key.as_bytes())))
    }
}

impl KeyValueStore for FileKeyValueStore {
    fn get(&self, key: &str) -> CacheResult<Option<String>> {
        match std::fs::read_to_string(self.path_for(key)) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&self, key: &str, value: &str) -> CacheResult<()> {
        let mut tmp = tempfile::NamedTempFile::new_in(&self.dir)?;
        tmp.write_all(value.as_bytes())?;
        tmp.persist(self.path_for(key)).map_err(|e| e.error)?;
        Ok(())
    }

    fn remove(&self, key: &str) -> CacheResult<bool> {
        match std::fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    fn keys(&self) -> CacheResult<Vec<String>> {
        let mut keys = Vec::new();
        for entry in std::fs::read_dir(&self.dir)? {
            let path = entry?.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some("kv") {
                continue;
            }
            // Temp files and foreign names are not keys.
            let Some(key) = path
                .file_stem()
                .and_then(|stem| stem.to_str())
                .and_then(|stem| hex::decode(stem).ok())
                .and_then(|bytes| String::from_utf8(bytes).ok())
            else {
                continue;
            };
            keys.push(key);
        }
        keys.sort();
        Ok(keys)
    }
}
