//! History store implementation.

use crate::logging::{debug, error, info, trace, warn};
use crate::storage::Storage;

use super::error::HistoryError;
use super::format;
use super::types::{QrRecord, RecordId};

/// Storage key holding the serialized collection.
pub const STORAGE_KEY: &str = "qr-code-history";

/// Maximum size of the serialized collection, in bytes.
pub const MAX_STORAGE_SIZE: usize = 5 * 1024 * 1024;

/// Ordered, persisted collection of [`QrRecord`]s.
///
/// Records are kept most-recent-first. Every mutation is written through to
/// the backing [`Storage`] before it returns; if the write fails the
/// in-memory collection is put back the way it was.
pub struct HistoryStore<S: Storage> {
    storage: S,
    records: Vec<QrRecord>,
    budget: usize,
    load_error: Option<HistoryError>,
}

impl<S: Storage> HistoryStore<S> {
    /// Load the collection persisted in `storage`.
    ///
    /// Never fails. Missing data yields an empty store. Unreadable or
    /// invalid data is logged and also yields an empty store; the stored
    /// bytes are not touched, and the problem is kept in
    /// [`load_error`](Self::load_error).
    pub fn load(storage: S) -> Self {
        let (records, load_error) = match Self::read(&storage) {
            Ok(records) => (records, None),
            Err(e) => {
                warn!(error = %e, key = STORAGE_KEY, "discarding unreadable history");
                (Vec::new(), Some(e))
            }
        };

        info!(records = records.len(), "history loaded");

        Self {
            storage,
            records,
            budget: MAX_STORAGE_SIZE,
            load_error,
        }
    }

    /// Prepend a record and persist the collection.
    ///
    /// Fails with [`HistoryError::StorageBudgetExceeded`] if the collection
    /// would no longer fit the budget, [`HistoryError::DuplicateId`] if the
    /// id is already present, [`HistoryError::TimestampOutOfRange`] if the
    /// creation time could not be read back, and
    /// [`HistoryError::PersistenceFailure`] if the write fails. The store is
    /// unchanged after any failure.
    pub fn add(&mut self, record: QrRecord) -> Result<(), HistoryError> {
        if self.get(record.id()).is_some() {
            return Err(HistoryError::DuplicateId(record.id().clone()));
        }
        if !format::is_persistable(&record.created_at()) {
            warn!(
                id = %record.id(),
                created_at = %record.created_at(),
                "record timestamp out of range"
            );
            return Err(HistoryError::TimestampOutOfRange {
                id: record.id().clone(),
                created_at: record.created_at(),
            });
        }

        self.records.insert(0, record);

        let bytes = match format::encode(&self.records) {
            Ok(bytes) => bytes,
            Err(e) => {
                self.records.remove(0);
                return Err(e);
            }
        };

        trace!(size = bytes.len(), budget = self.budget, "encoded history");

        if bytes.len() > self.budget {
            self.records.remove(0);
            warn!(
                size = bytes.len(),
                budget = self.budget,
                "history storage is full, record not saved"
            );
            return Err(HistoryError::StorageBudgetExceeded {
                size: bytes.len(),
                budget: self.budget,
            });
        }

        if let Err(e) = self.storage.set(STORAGE_KEY, &bytes) {
            self.records.remove(0);
            error!(error = %e, "failed to save history");
            return Err(e.into());
        }

        debug!(records = self.records.len(), size = bytes.len(), "record added");
        Ok(())
    }

    /// Remove the record with `id` and persist the collection.
    ///
    /// Returns the removed record, or `None` without touching storage when
    /// no record has that id.
    pub fn remove(&mut self, id: &RecordId) -> Result<Option<QrRecord>, HistoryError> {
        let Some(position) = self.records.iter().position(|r| r.id() == id) else {
            debug!(id = %id, "remove of unknown record ignored");
            return Ok(None);
        };

        let removed = self.records.remove(position);

        if let Err(e) = self.write() {
            self.records.insert(position, removed);
            error!(error = %e, id = %id, "failed to save history after remove");
            return Err(e);
        }

        debug!(id = %id, records = self.records.len(), "record removed");
        Ok(Some(removed))
    }

    /// Remove every record and delete the persisted collection.
    pub fn clear(&mut self) -> Result<(), HistoryError> {
        if let Err(e) = self.storage.remove(STORAGE_KEY) {
            error!(error = %e, "failed to clear history");
            return Err(e.into());
        }

        info!(removed = self.records.len(), "history cleared");
        self.records.clear();
        Ok(())
    }

    /// All records, most recent first.
    pub fn list(&self) -> &[QrRecord] {
        &self.records
    }

    /// Look up a record by id.
    pub fn get(&self, id: &RecordId) -> Option<&QrRecord> {
        self.records.iter().find(|r| r.id() == id)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Size of the collection in its persisted form.
    pub fn serialized_size(&self) -> Result<usize, HistoryError> {
        Ok(format::encode(&self.records)?.len())
    }

    /// Maximum persisted size, in bytes.
    pub fn budget(&self) -> usize {
        self.budget
    }

    /// The problem recovered from at load time, if any.
    pub fn load_error(&self) -> Option<&HistoryError> {
        self.load_error.as_ref()
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Release the backing storage.
    pub fn into_storage(self) -> S {
        self.storage
    }

    fn read(storage: &S) -> Result<Vec<QrRecord>, HistoryError> {
        match storage.get(STORAGE_KEY)? {
            Some(bytes) => format::decode(&bytes),
            None => Ok(Vec::new()),
        }
    }

    fn write(&mut self) -> Result<(), HistoryError> {
        let bytes = format::encode(&self.records)?;
        self.storage.set(STORAGE_KEY, &bytes)?;
        Ok(())
    }
}
