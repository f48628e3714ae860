//! Common test utilities and fixtures.
//!
//! Record builders shared across the integration test suite.

#![allow(dead_code)]

use chrono::{DateTime, TimeZone, Utc};
use qr_history::{
    Contact, HistoryStore, MemoryStorage, Payload, QrRecord, RecordId, Security, Style,
    WifiCredentials,
};

// =============================================================================
// Record Builders
// =============================================================================

/// A fixed timestamp, `offset_secs` after 2024-05-01T10:00:00Z.
pub fn at(offset_secs: i64) -> DateTime<Utc> {
    Utc.timestamp_opt(1_714_557_600 + offset_secs, 0)
        .single()
        .unwrap_or_default()
}

pub fn url_record(id: &str, url: &str) -> QrRecord {
    QrRecord::from_parts(RecordId::from(id), Payload::Url(url.to_string()), None, at(0))
}

pub fn styled_url_record(id: &str, url: &str, dot_color: &str) -> QrRecord {
    QrRecord::from_parts(
        RecordId::from(id),
        Payload::Url(url.to_string()),
        Some(Style {
            dot_color: Some(dot_color.to_string()),
            ..Style::default()
        }),
        at(0),
    )
}

pub fn wifi_record(id: &str, ssid: &str, password: &str, security: Security) -> QrRecord {
    QrRecord::from_parts(
        RecordId::from(id),
        Payload::Wifi(WifiCredentials {
            ssid: ssid.to_string(),
            password: password.to_string(),
            security,
        }),
        None,
        at(60),
    )
}

pub fn contact_record(id: &str, name: &str) -> QrRecord {
    QrRecord::from_parts(
        RecordId::from(id),
        Payload::Contact(Contact {
            name: name.to_string(),
            phone: "+1 555 0100".to_string(),
            email: format!("{}@example.com", name.to_lowercase()),
            organization: Some("Example Org".to_string()),
        }),
        None,
        at(120),
    )
}

pub fn text_record(id: &str, text: &str) -> QrRecord {
    QrRecord::from_parts(RecordId::from(id), Payload::Text(text.to_string()), None, at(180))
}

// =============================================================================
// Store Helpers
// =============================================================================

/// An empty store over fresh in-memory storage.
pub fn empty_store() -> HistoryStore<MemoryStorage> {
    HistoryStore::load(MemoryStorage::new())
}

/// Drop the in-memory state and load again from the same storage.
pub fn reload(store: HistoryStore<MemoryStorage>) -> HistoryStore<MemoryStorage> {
    HistoryStore::load(store.into_storage())
}

/// Ids of the listed records, in list order.
pub fn ids(store: &HistoryStore<MemoryStorage>) -> Vec<String> {
    store
        .list()
        .iter()
        .map(|r| r.id().as_str().to_string())
        .collect()
}
