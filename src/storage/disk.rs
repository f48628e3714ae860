//! On-disk storage backend using fjall.

use std::path::Path;

use fjall::{Keyspace, KeyspaceCreateOptions, PersistMode};

use super::{Storage, StorageError};

/// Keyspace holding the named slots.
const SLOTS_KEYSPACE: &str = "slots";

/// Keyspace holding store metadata.
const META_KEYSPACE: &str = "_meta";
const META_VERSION_KEY: &str = "version";

/// Current on-disk layout version.
const STORE_VERSION: u32 = 1;

/// A [`Storage`] persisted in a fjall database directory.
///
/// Every write is synced before it returns.
pub struct FjallStorage {
    db: fjall::Database,
    slots: Keyspace,
}

impl FjallStorage {
    /// Open an existing store at the given path.
    pub fn open(path: &Path) -> Result<Self, StorageError> {
        if !path.exists() {
            return Err(StorageError::NotInitialized(path.display().to_string()));
        }

        let db = fjall::Database::builder(path).open()?;
        let meta = db.keyspace(META_KEYSPACE, KeyspaceCreateOptions::default)?;

        let Some(raw) = meta.get(META_VERSION_KEY)? else {
            return Err(StorageError::NotInitialized(path.display().to_string()));
        };
        let version = u32::from_le_bytes(
            raw.as_ref()
                .try_into()
                .map_err(|_| StorageError::InvalidFormat("Invalid version marker".to_string()))?,
        );
        if version != STORE_VERSION {
            return Err(StorageError::InvalidFormat(format!(
                "Store version mismatch: expected {}, got {}",
                STORE_VERSION, version
            )));
        }

        let slots = db.keyspace(SLOTS_KEYSPACE, KeyspaceCreateOptions::default)?;
        Ok(Self { db, slots })
    }

    /// Initialize a new store at the given path.
    pub fn init(path: &Path) -> Result<Self, StorageError> {
        let db = fjall::Database::builder(path).open()?;
        let meta = db.keyspace(META_KEYSPACE, KeyspaceCreateOptions::default)?;
        let slots = db.keyspace(SLOTS_KEYSPACE, KeyspaceCreateOptions::default)?;

        meta.insert(META_VERSION_KEY, STORE_VERSION.to_le_bytes())?;
        db.persist(PersistMode::SyncAll)?;

        Ok(Self { db, slots })
    }

    /// Open the store at `path`, initializing it first if the directory is missing.
    pub fn open_or_init(path: &Path) -> Result<Self, StorageError> {
        if path.exists() {
            Self::open(path)
        } else {
            Self::init(path)
        }
    }
}

impl Storage for FjallStorage {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError> {
        Ok(self.slots.get(key)?.map(|v| v.to_vec()))
    }

    fn set(&mut self, key: &str, value: &[u8]) -> Result<(), StorageError> {
        self.slots.insert(key, value)?;
        self.db.persist(PersistMode::SyncAll)?;
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        self.slots.remove(key)?;
        self.db.persist(PersistMode::SyncAll)?;
        Ok(())
    }
}
