//! Key-value storage backends for the history store.
//!
//! The store only needs three primitives on a single named slot, so the
//! backend is injected behind the [`Storage`] trait. [`MemoryStorage`] is the
//! in-process fake used by tests and ephemeral sessions; `FjallStorage` keeps
//! the slot on disk.

mod error;
#[cfg(feature = "fjall")]
mod disk;
mod memory;

pub use error::StorageError;
#[cfg(feature = "fjall")]
pub use disk::FjallStorage;
pub use memory::MemoryStorage;

/// A byte-oriented key-value store.
///
/// Every call either fully succeeds or fully fails before it returns.
pub trait Storage {
    /// Read the value stored under `key`, if any.
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError>;

    /// Replace the value stored under `key`.
    fn set(&mut self, key: &str, value: &[u8]) -> Result<(), StorageError>;

    /// Delete `key`. Deleting a missing key succeeds.
    fn remove(&mut self, key: &str) -> Result<(), StorageError>;
}

impl<S: Storage + ?Sized> Storage for Box<S> {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &[u8]) -> Result<(), StorageError> {
        (**self).set(key, value)
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        (**self).remove(key)
    }
}
