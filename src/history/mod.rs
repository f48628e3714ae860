//! QR-code generation history.
//!
//! [`HistoryStore`] keeps a most-recent-first collection of [`QrRecord`]s in
//! one slot of a [`Storage`](crate::storage::Storage), capped at
//! [`MAX_STORAGE_SIZE`] bytes of serialized JSON. The [`view`] functions
//! filter and paginate that collection for display.

mod content;
mod error;
mod format;
mod logo;
mod store;
mod types;
pub mod view;

pub use error::{HistoryError, ValidationError};
pub use format::format_timestamp;
pub use logo::{MAX_LOGO_SIZE, image_mime_type, logo_data_url, read_logo};
pub use store::{HistoryStore, MAX_STORAGE_SIZE, STORAGE_KEY};
pub use types::{
    Contact, Kind, ParseKindError, Payload, QrRecord, RecordId, Security, Style, WifiCredentials,
};
pub use view::{KindCounts, KindFilter, Page};
