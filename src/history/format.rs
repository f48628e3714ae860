//! Persisted JSON layout of the history collection.
//!
//! The slot value is a JSON array, most-recent-first, of
//!
//! ```text
//! { "id": string,
//!   "type": "url" | "wifi" | "contact" | "text",
//!   "data": string | {ssid, password, security} | {name, phone, email, organization?},
//!   "style"?: { dotColor?, backgroundColor?, logo?, cornerSquareColor?, cornerDotColor? },
//!   "createdAt": ISO-8601 string }
//! ```
//!
//! `data` is decoded according to `type`, so a record whose payload does not
//! match its kind is rejected as a whole.

use std::collections::HashSet;

use chrono::{DateTime, Datelike, SecondsFormat, Utc};
use serde::de::{self, Deserializer};
use serde::ser::{self, Serializer};
use serde::{Deserialize, Serialize};

use super::error::HistoryError;
use super::types::{Contact, Kind, Payload, QrRecord, RecordId, Style, WifiCredentials};

/// Owned wire form, used when reading.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RecordRepr {
    id: String,
    #[serde(rename = "type")]
    kind: Kind,
    data: serde_json::Value,
    #[serde(default)]
    style: Option<Style>,
    created_at: String,
}

/// Borrowed wire form, used when writing.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RecordRef<'a> {
    id: &'a str,
    #[serde(rename = "type")]
    kind: Kind,
    data: DataRef<'a>,
    #[serde(skip_serializing_if = "Option::is_none")]
    style: Option<&'a Style>,
    created_at: String,
}

#[derive(Serialize)]
#[serde(untagged)]
enum DataRef<'a> {
    Text(&'a str),
    Wifi(&'a WifiCredentials),
    Contact(&'a Contact),
}

impl<'a> From<&'a Payload> for DataRef<'a> {
    fn from(payload: &'a Payload) -> Self {
        match payload {
            Payload::Url(s) | Payload::Text(s) => DataRef::Text(s),
            Payload::Wifi(wifi) => DataRef::Wifi(wifi),
            Payload::Contact(contact) => DataRef::Contact(contact),
        }
    }
}

/// Render a timestamp the way browsers do (`2024-05-01T10:00:00.000Z`).
pub fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Whether `ts` falls in years 0000-9999.
///
/// Other years are rendered with a sign and six digits (`+10000-01-01...`),
/// which RFC 3339 readers reject.
pub(crate) fn is_persistable(ts: &DateTime<Utc>) -> bool {
    (0..=9999).contains(&ts.year())
}

fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>, String> {
    DateTime::parse_from_rfc3339(raw)
        .map(|ts| ts.with_timezone(&Utc))
        .map_err(|e| format!("invalid createdAt '{}': {}", raw, e))
}

fn parse_payload(kind: Kind, data: serde_json::Value) -> Result<Payload, String> {
    let payload = match kind {
        Kind::Url => serde_json::from_value(data).map(Payload::Url),
        Kind::Text => serde_json::from_value(data).map(Payload::Text),
        Kind::Wifi => serde_json::from_value(data).map(Payload::Wifi),
        Kind::Contact => serde_json::from_value(data).map(Payload::Contact),
    };
    payload.map_err(|e| format!("invalid {} data: {}", kind, e))
}

impl TryFrom<RecordRepr> for QrRecord {
    type Error = String;

    fn try_from(repr: RecordRepr) -> Result<Self, Self::Error> {
        if repr.id.is_empty() {
            return Err("record id is empty".to_string());
        }
        let payload = parse_payload(repr.kind, repr.data)?;
        let created_at = parse_timestamp(&repr.created_at)?;
        Ok(QrRecord::from_parts(
            RecordId::from(repr.id),
            payload,
            repr.style,
            created_at,
        ))
    }
}

impl Serialize for QrRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if !is_persistable(&self.created_at()) {
            return Err(ser::Error::custom(format!(
                "createdAt of record '{}' is outside years 0000-9999",
                self.id()
            )));
        }
        RecordRef {
            id: self.id().as_str(),
            kind: self.kind(),
            data: DataRef::from(self.payload()),
            style: self.style(),
            created_at: format_timestamp(&self.created_at()),
        }
        .serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for QrRecord {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let repr = RecordRepr::deserialize(deserializer)?;
        QrRecord::try_from(repr).map_err(de::Error::custom)
    }
}

/// Serialize a collection into its persisted form.
pub(crate) fn encode(records: &[QrRecord]) -> Result<Vec<u8>, HistoryError> {
    Ok(serde_json::to_vec(records)?)
}

/// Parse a persisted collection.
///
/// Any parse failure, or two records sharing an id, is reported as
/// [`HistoryError::CorruptPersistedState`].
pub(crate) fn decode(bytes: &[u8]) -> Result<Vec<QrRecord>, HistoryError> {
    let records: Vec<QrRecord> = serde_json::from_slice(bytes)
        .map_err(|e| HistoryError::CorruptPersistedState(e.to_string()))?;

    let mut seen = HashSet::with_capacity(records.len());
    for record in &records {
        if !seen.insert(record.id()) {
            return Err(HistoryError::CorruptPersistedState(format!(
                "duplicate record id '{}'",
                record.id()
            )));
        }
    }

    Ok(records)
}
