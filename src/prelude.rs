//! Convenient re-exports for common usage patterns.
//!
//! ```ignore
//! use qr_history::prelude::*;
//!
//! let mut store = HistoryStore::load(MemoryStorage::new());
//! store.add(QrRecord::new(Payload::Text("hello".into()), None))?;
//! ```

// Unified error handling
pub use crate::error::{Error, Result};

// History types
pub use crate::history::view::{self, KindCounts, KindFilter, Page};
pub use crate::history::{
    Contact, HistoryError, HistoryStore, Kind, Payload, QrRecord, RecordId, Security, Style,
    ValidationError, WifiCredentials,
};

// Storage backends
#[cfg(feature = "fjall")]
pub use crate::storage::FjallStorage;
pub use crate::storage::{MemoryStorage, Storage, StorageError};
