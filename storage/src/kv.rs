//! Byte-oriented key-value stores

use parking_lot::RwLock;
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;

use crate::{Result, StorageError};

pub trait KvStore: Send + Sync {
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>>;

    fn set(&self, key: &[u8], value: Vec<u8>) -> Result<()>;

    fn has(&self, key: &[u8]) -> Result<bool> {
        Ok(self.get(key)?.is_some())
    }
}

impl<T: KvStore + ?Sized> KvStore for Arc<T> {
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>> {
        (**self).get(key)
    }

    fn set(&self, key: &[u8], value: Vec<u8>) -> Result<()> {
        (**self).set(key, value)
    }
}

/// In-memory store
#[derive(Debug, Default)]
pub struct MemStore {
    entries: RwLock<BTreeMap<Vec<u8>, Vec<u8>>>,
}

impl MemStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}

impl KvStore for MemStore {
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>> {
        Ok(self.entries.read().get(key).cloned())
    }

    fn set(&self, key: &[u8], value: Vec<u8>) -> Result<()> {
        self.entries.write().insert(key.to_vec(), value);
        Ok(())
    }
}

/// Sled-backed store; every write is flushed before returning
#[derive(Debug, Clone)]
pub struct SledStore {
    db: sled::Db,
    path: String,
}

impl SledStore {
    /// Open or create the database
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path_str = path.as_ref().to_string_lossy().to_string();
        let db = sled::open(&path)
            .map_err(|e| StorageError::IoError(format!("Failed to open database: {}", e)))?;

        log::debug!(target: "storage", "opened sled store at {}", path_str);
        Ok(SledStore { db, path: path_str })
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    fn flush(&self) -> Result<()> {
        self.db
            .flush()
            .map_err(|e| StorageError::IoError(format!("Failed to flush to disk: {}", e)))?;
        Ok(())
    }
}

impl KvStore for SledStore {
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>> {
        self.db
            .get(key)
            .map(|value| value.map(|v| v.to_vec()))
            .map_err(|e| StorageError::IoError(format!("Failed to read key: {}", e)))
    }

    fn set(&self, key: &[u8], value: Vec<u8>) -> Result<()> {
        self.db
            .insert(key, value)
            .map_err(|e| StorageError::IoError(format!("Failed to write key: {}", e)))?;
        self.flush()
    }
}

/// View of another store where every key carries a fixed prefix
#[derive(Clone)]
pub struct PrefixStore {
    inner: Arc<dyn KvStore>,
    prefix: Vec<u8>,
}

impl PrefixStore {
    pub fn new(inner: Arc<dyn KvStore>, prefix: impl Into<Vec<u8>>) -> Self {
        Self {
            inner,
            prefix: prefix.into(),
        }
    }

    fn full_key(&self, key: &[u8]) -> Vec<u8> {
        let mut full = Vec::with_capacity(self.prefix.len() + key.len());
        full.extend_from_slice(&self.prefix);
        full.extend_from_slice(key);
        full
    }
}

impl KvStore for PrefixStore {
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>> {
        self.inner.get(&self.full_key(key))
    }

    fn set(&self, key: &[u8], value: Vec<u8>) -> Result<()> {
        self.inner.set(&self.full_key(key), value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_mem_store_set_get() {
        let store = MemStore::new();
        assert!(store.get(b"k").unwrap().is_none());

        store.set(b"k", b"v".to_vec()).unwrap();
        assert_eq!(store.get(b"k").unwrap(), Some(b"v".to_vec()));
        assert!(store.has(b"k").unwrap());

        store.set(b"k", b"w".to_vec()).unwrap();
        assert_eq!(store.get(b"k").unwrap(), Some(b"w".to_vec()));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_sled_store_survives_reopen() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("db");

        {
            let store = SledStore::open(&path).unwrap();
            store.set(b"params", vec![1, 2, 3]).unwrap();
        }

        let store = SledStore::open(&path).unwrap();
        assert_eq!(store.get(b"params").unwrap(), Some(vec![1, 2, 3]));
    }

    #[test]
    fn test_prefix_stores_do_not_collide() {
        let shared: Arc<dyn KvStore> = Arc::new(MemStore::new());
        let a = PrefixStore::new(shared.clone(), b"feedist/".to_vec());
        let b = PrefixStore::new(shared.clone(), b"mint/".to_vec());

        a.set(&[0x01], vec![0xaa]).unwrap();
        b.set(&[0x01], vec![0xbb]).unwrap();

        assert_eq!(a.get(&[0x01]).unwrap(), Some(vec![0xaa]));
        assert_eq!(b.get(&[0x01]).unwrap(), Some(vec![0xbb]));
        assert_eq!(shared.get(b"mint/\x01").unwrap(), Some(vec![0xbb]));
    }
}
