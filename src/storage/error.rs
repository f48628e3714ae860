//! Error types for storage backends.

use thiserror::Error;

/// Errors reported by a [`Storage`](super::Storage) backend.
#[derive(Error, Debug)]
pub enum StorageError {
    #[cfg(feature = "fjall")]
    #[error("Fjall error: {0}")]
    Fjall(#[from] ::fjall::Error),

    #[error("Storage unavailable: {0}")]
    Unavailable(String),

    #[error("Storage quota exceeded: {requested} bytes requested, quota is {quota} bytes")]
    QuotaExceeded { requested: usize, quota: usize },

    #[error("Storage not initialized at {0}")]
    NotInitialized(String),

    #[error("Invalid format: {0}")]
    InvalidFormat(String),
}
