//! Data types for the history module.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};

/// Length of the random suffix in generated ids.
const ID_SUFFIX_LEN: usize = 9;

/// Opaque, unique identifier of a [`QrRecord`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(String);

impl RecordId {
    /// Generate a fresh id of the form `qr_<millis>_<suffix>`.
    pub fn generate() -> Self {
        let suffix: String = uuid::Uuid::new_v4()
            .simple()
            .to_string()
            .chars()
            .take(ID_SUFFIX_LEN)
            .collect();
        Self(format!("qr_{}_{}", Utc::now().timestamp_millis(), suffix))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for RecordId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&str> for RecordId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// Content category of a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Kind {
    Url,
    Wifi,
    Contact,
    Text,
}

impl Kind {
    /// All kinds, in display order.
    pub const ALL: [Kind; 4] = [Kind::Url, Kind::Wifi, Kind::Contact, Kind::Text];

    pub fn as_str(self) -> &'static str {
        match self {
            Kind::Url => "url",
            Kind::Wifi => "wifi",
            Kind::Contact => "contact",
            Kind::Text => "text",
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown [`Kind`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown record kind: {0}")]
pub struct ParseKindError(String);

impl FromStr for Kind {
    type Err = ParseKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Kind::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| ParseKindError(s.to_string()))
    }
}

/// WiFi authentication mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Security {
    #[default]
    #[serde(rename = "WPA")]
    Wpa,
    #[serde(rename = "WEP")]
    Wep,
    /// Open network.
    #[serde(rename = "nopass", alias = "none")]
    NoPass,
}

impl Security {
    /// Token used in the `T:` field of a WiFi QR payload.
    pub fn as_str(self) -> &'static str {
        match self {
            Security::Wpa => "WPA",
            Security::Wep => "WEP",
            Security::NoPass => "nopass",
        }
    }
}

impl fmt::Display for Security {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// WiFi network credentials.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct WifiCredentials {
    pub ssid: String,
    pub password: String,
    pub security: Security,
}

/// Contact card details.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Contact {
    pub name: String,
    pub phone: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub organization: Option<String>,
}

/// Record content; the variant determines the record's [`Kind`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Payload {
    Url(String),
    Wifi(WifiCredentials),
    Contact(Contact),
    Text(String),
}

impl Payload {
    pub fn kind(&self) -> Kind {
        match self {
            Payload::Url(_) => Kind::Url,
            Payload::Wifi(_) => Kind::Wifi,
            Payload::Contact(_) => Kind::Contact,
            Payload::Text(_) => Kind::Text,
        }
    }
}

/// Rendering hints stored alongside a record.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Style {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dot_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
    /// Embedded image reference, usually a `data:` URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub corner_square_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub corner_dot_color: Option<String>,
}

impl Style {
    pub const DEFAULT_DOT_COLOR: &'static str = "#000000";
    pub const DEFAULT_BACKGROUND_COLOR: &'static str = "#FFFFFF";

    pub fn dot_color_or_default(&self) -> &str {
        self.dot_color.as_deref().unwrap_or(Self::DEFAULT_DOT_COLOR)
    }

    pub fn background_color_or_default(&self) -> &str {
        self.background_color
            .as_deref()
            .unwrap_or(Self::DEFAULT_BACKGROUND_COLOR)
    }

    /// Whether no hint is set.
    pub fn is_empty(&self) -> bool {
        *self == Style::default()
    }
}

/// One saved QR-code generation event.
///
/// Records are immutable once built; "editing" produces a new record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QrRecord {
    id: RecordId,
    payload: Payload,
    style: Option<Style>,
    created_at: DateTime<Utc>,
}

impl QrRecord {
    /// Create a record with a fresh id, stamped with the current time.
    pub fn new(payload: Payload, style: Option<Style>) -> Self {
        Self::from_parts(RecordId::generate(), payload, style, Utc::now())
    }

    /// Assemble a record from existing parts.
    ///
    /// The timestamp is truncated to millisecond precision, which is what
    /// the persisted form keeps.
    pub fn from_parts(
        id: RecordId,
        payload: Payload,
        style: Option<Style>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            payload,
            style,
            created_at: created_at.trunc_subsecs(3),
        }
    }

    pub fn id(&self) -> &RecordId {
        &self.id
    }

    pub fn kind(&self) -> Kind {
        self.payload.kind()
    }

    pub fn payload(&self) -> &Payload {
        &self.payload
    }

    pub fn style(&self) -> Option<&Style> {
        self.style.as_ref()
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
