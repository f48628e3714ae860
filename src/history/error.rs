//! Error types for the history module.

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::storage::StorageError;

use super::types::RecordId;

/// Errors that can occur during history store operations.
#[derive(Error, Debug)]
pub enum HistoryError {
    #[error("History storage budget exceeded: {size} bytes would exceed the {budget} byte limit")]
    StorageBudgetExceeded { size: usize, budget: usize },

    #[error("Failed to persist history: {0}")]
    PersistenceFailure(#[from] StorageError),

    #[error("Corrupt persisted history: {0}")]
    CorruptPersistedState(String),

    #[error("Record id already present: {0}")]
    DuplicateId(RecordId),

    #[error("Record {id} cannot be saved: creation time {created_at} is outside years 0000-9999")]
    TimestampOutOfRange {
        id: RecordId,
        created_at: DateTime<Utc>,
    },

    #[error("Failed to encode history: {0}")]
    Encode(#[from] serde_json::Error),
}

impl HistoryError {
    /// Returns `true` if this error is the storage budget warning.
    pub fn is_budget_exceeded(&self) -> bool {
        matches!(self, Self::StorageBudgetExceeded { .. })
    }

    /// Returns `true` if the backing storage failed.
    pub fn is_persistence_failure(&self) -> bool {
        matches!(self, Self::PersistenceFailure(_))
    }
}

/// Reasons a record is not ready to be generated.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Please enter a URL first")]
    EmptyUrl,

    #[error("Please enter some text first")]
    EmptyText,

    #[error("WiFi network name is required")]
    MissingSsid,

    #[error("WiFi password is required for {0} networks")]
    MissingPassword(super::types::Security),

    #[error("Contact name is required")]
    MissingContactName,

    #[error("Logo is too large: {size} bytes exceeds the {limit} byte limit")]
    LogoTooLarge { size: usize, limit: usize },

    #[error("Logo must be a PNG, JPEG, GIF, WebP, SVG, AVIF or HEIC image: {0}")]
    UnsupportedLogoType(String),
}
