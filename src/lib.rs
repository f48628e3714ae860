//! Size-bounded, persisted history of generated QR codes.
//!
//! A [`HistoryStore`] keeps the QR codes a user generated (URLs, WiFi
//! credentials, contacts, free text) together with their rendering hints,
//! most recent first, in one slot of a key-value [`Storage`]. The serialized
//! collection never exceeds [`MAX_STORAGE_SIZE`] bytes.
//!
//! # Quick Start
//!
//! ```ignore
//! use qr_history::prelude::*;
//!
//! let mut store = HistoryStore::load(MemoryStorage::new());
//!
//! let record = QrRecord::new(Payload::Url("https://a.example".into()), None);
//! store.add(record)?;
//!
//! let page = view::paginate(store.list(), KindFilter::All, 1, view::DEFAULT_PAGE_SIZE);
//! ```
//!
//! # Modules
//!
//! - [`history`] - Records, the history store and its list views
//! - [`storage`] - Storage trait with in-memory and fjall backends
//! - [`cli`] - Configuration and logging setup for the binary (requires `cli` feature)
//!
//! # Feature Flags
//!
//! - `fjall` - Enable the on-disk storage backend (enabled by default)
//! - `logging` - Enable library-level tracing (consumers provide their own subscriber)
//! - `cli` - Enable the command-line interface binary
//! - `full` - Enable all features

#[cfg(feature = "cli")]
pub mod cli;
pub mod history;
mod logging;
pub mod prelude;
pub mod storage;

mod error;

// Re-export the unified error type
pub use error::{Error, Result};

// Re-export history types at crate root for convenience
pub use history::{
    Contact, HistoryError, HistoryStore, Kind, KindFilter, Payload, QrRecord, RecordId, Security,
    Style, ValidationError, WifiCredentials, MAX_STORAGE_SIZE, STORAGE_KEY,
};

// Re-export storage types at crate root for convenience
#[cfg(feature = "fjall")]
pub use storage::FjallStorage;
pub use storage::{MemoryStorage, Storage, StorageError};
