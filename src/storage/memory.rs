//! In-memory storage backend.

use std::collections::HashMap;

use super::{Storage, StorageError};

/// A [`Storage`] kept entirely in memory.
///
/// A per-value quota and a write switch let callers reproduce the platform
/// failures a browser storage area can report (quota denial, storage
/// disabled).
#[derive(Debug, Clone)]
pub struct MemoryStorage {
    entries: HashMap<String, Vec<u8>>,
    quota: Option<usize>,
    writes_enabled: bool,
}

impl MemoryStorage {
    /// Create an empty storage with no quota.
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
            quota: None,
            writes_enabled: true,
        }
    }

    /// Create an empty storage that rejects values larger than `quota` bytes.
    pub fn with_quota(quota: usize) -> Self {
        Self {
            quota: Some(quota),
            ..Self::new()
        }
    }

    /// Create a storage pre-populated with one value.
    pub fn with_entry(key: &str, value: impl Into<Vec<u8>>) -> Self {
        let mut storage = Self::new();
        storage.entries.insert(key.to_string(), value.into());
        storage
    }

    /// Make every subsequent `set` and `remove` fail (or succeed again).
    pub fn set_writes_enabled(&mut self, enabled: bool) {
        self.writes_enabled = enabled;
    }

    /// Raw bytes currently stored under `key`.
    pub fn raw(&self, key: &str) -> Option<&[u8]> {
        self.entries.get(key).map(Vec::as_slice)
    }

    /// Whether `key` is present.
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    fn check_writable(&self) -> Result<(), StorageError> {
        if self.writes_enabled {
            Ok(())
        } else {
            Err(StorageError::Unavailable(
                "writes are disabled".to_string(),
            ))
        }
    }
}

impl Default for MemoryStorage {
    fn default() -> Self {
        Self::new()
    }
}

impl Storage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &[u8]) -> Result<(), StorageError> {
        self.check_writable()?;
        if let Some(quota) = self.quota {
            if value.len() > quota {
                return Err(StorageError::QuotaExceeded {
                    requested: value.len(),
                    quota,
                });
            }
        }
        self.entries.insert(key.to_string(), value.to_vec());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        self.check_writable()?;
        self.entries.remove(key);
        Ok(())
    }
}
