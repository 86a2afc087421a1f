// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Key-value storage media underneath the document store.
//!
//! A medium maps a string key to one serialized string value, the same
//! shape as browser local storage. Each collection lives under its own key.

use crate::db::StoreError;
use dashmap::DashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

/// A string-keyed, string-valued persistence medium.
pub trait StorageMedium: Send + Sync {
    fn get_item(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set_item(&self, key: &str, value: &str) -> Result<(), StoreError>;
    fn remove_item(&self, key: &str) -> Result<(), StoreError>;
}

/// Process-local medium backed by a concurrent map.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    items: DashMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StorageMedium for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.items.get(key).map(|v| v.value().clone()))
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.items.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<(), StoreError> {
        self.items.remove(key);
        Ok(())
    }
}

/// Medium storing each key as `<key>.json` inside a data directory.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    /// Open (and create if needed) a data directory.
    pub fn open<P: AsRef<Path>>(dir: P) -> Result<Self, StoreError> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir)?;
        tracing::info!(path = %dir.display(), "Opened file storage");
        Ok(Self { dir })
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, StoreError> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !valid {
            return Err(StoreError::InvalidKey(key.to_string()));
        }
        Ok(self.dir.join(format!("{key}.json")))
    }
}

impl StorageMedium for FileStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StoreError> {
        match fs::read_to_string(self.path_for(key)?) {
            Ok(data) => Ok(Some(data)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let path = self.path_for(key)?;
        // Write-then-rename so readers never observe a partially written blob.
        let tmp = self.dir.join(format!(".{key}.json.tmp"));
        fs::write(&tmp, value)?;
        fs::rename(&tmp, &path)?;
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<(), StoreError> {
        match fs::remove_file(self.path_for(key)?) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// Shared handle to a storage medium, or to no medium at all.
///
/// Every access to a key runs under that key's mutex, so read-modify-write
/// sequences on one collection never interleave.
#[derive(Clone)]
pub struct Storage {
    medium: Option<Arc<dyn StorageMedium>>,
    locks: Arc<DashMap<String, Arc<Mutex<()>>>>,
}

impl Storage {
    pub fn new<M: StorageMedium + 'static>(medium: M) -> Self {
        Self {
            medium: Some(Arc::new(medium)),
            locks: Arc::new(DashMap::new()),
        }
    }

    /// In-memory storage (tests and ephemeral deployments).
    pub fn in_memory() -> Self {
        Self::new(MemoryStorage::new())
    }

    /// File-backed storage rooted at `dir`.
    pub fn open_dir<P: AsRef<Path>>(dir: P) -> Result<Self, StoreError> {
        Ok(Self::new(FileStorage::open(dir)?))
    }

    /// Storage with no medium (offline mode).
    ///
    /// Reads come back empty and writes are silently dropped.
    pub fn offline() -> Self {
        Self {
            medium: None,
            locks: Arc::new(DashMap::new()),
        }
    }

    pub fn is_available(&self) -> bool {
        self.medium.is_some()
    }

    /// Run `f` against the medium while holding the lock for `key`.
    ///
    /// Returns `None` when offline.
    pub(crate) fn locked<R>(
        &self,
        key: &str,
        f: impl FnOnce(&dyn StorageMedium) -> Result<R, StoreError>,
    ) -> Option<Result<R, StoreError>> {
        let medium = self.medium.as_deref()?;
        let lock = self.locks.entry(key.to_string()).or_default().clone();
        let _guard = lock.lock().unwrap_or_else(PoisonError::into_inner);
        Some(f(medium))
    }

    pub fn get_item(&self, key: &str) -> Result<Option<String>, StoreError> {
        self.locked(key, |m| m.get_item(key)).unwrap_or(Ok(None))
    }

    pub fn set_item(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.locked(key, |m| m.set_item(key, value))
            .unwrap_or(Ok(()))
    }

    pub fn remove_item(&self, key: &str) -> Result<(), StoreError> {
        self.locked(key, |m| m.remove_item(key)).unwrap_or(Ok(()))
    }
}

impl std::fmt::Debug for Storage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Storage")
            .field("available", &self.is_available())
            .field("collections", &self.locks.len())
            .finish()
    }
}
