//! Unified error type for the qr-history library.
//!
//! [`Error`] wraps the module-specific errors so application code can use a
//! single `Result` type.

use thiserror::Error;

use crate::history::{HistoryError, ValidationError};
use crate::storage::StorageError;

/// Unified error type for all qr-history operations.
///
/// # Example
///
/// ```ignore
/// use qr_history::prelude::*;
///
/// fn save_url(store: &mut HistoryStore<MemoryStorage>, url: &str) -> qr_history::Result<()> {
///     let record = QrRecord::new(Payload::Url(url.to_string()), None);
///     record.validate()?;
///     store.add(record)?;
///     Ok(())
/// }
/// ```
#[derive(Error, Debug)]
pub enum Error {
    /// Error from history store operations.
    #[error(transparent)]
    History(#[from] HistoryError),

    /// Record input is incomplete.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Error from a storage backend.
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// I/O error reading an input file, such as a logo image.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// A [`Result`] type alias using the unified [`Error`] type.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Returns `true` if a record was rejected for exceeding the storage budget.
    pub fn is_budget_exceeded(&self) -> bool {
        matches!(self, Self::History(e) if e.is_budget_exceeded())
    }

    /// Returns `true` if this is a validation error.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Returns `true` if a storage backend failed, directly or during a history write.
    pub fn is_storage(&self) -> bool {
        match self {
            Self::Storage(_) => true,
            Self::History(e) => e.is_persistence_failure(),
            _ => false,
        }
    }
}
