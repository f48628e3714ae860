//! QR content strings, list titles and form validation for records.

use super::error::ValidationError;
use super::logo;
use super::types::{Contact, Payload, QrRecord, Security, Style, WifiCredentials};

/// Characters of a text payload shown in its title.
const TITLE_TEXT_CHARS: usize = 30;

impl Payload {
    /// The string a QR symbol for this payload encodes.
    pub fn content(&self) -> String {
        match self {
            Payload::Url(url) => url.clone(),
            Payload::Text(text) => text.clone(),
            Payload::Wifi(wifi) => wifi.content(),
            Payload::Contact(contact) => contact.content(),
        }
    }

    /// Check that the payload carries enough input to generate a code.
    pub fn validate(&self) -> Result<(), ValidationError> {
        match self {
            Payload::Url(url) if url.trim().is_empty() => Err(ValidationError::EmptyUrl),
            Payload::Text(text) if text.trim().is_empty() => Err(ValidationError::EmptyText),
            Payload::Wifi(wifi) => wifi.validate(),
            Payload::Contact(contact) if contact.name.trim().is_empty() => {
                Err(ValidationError::MissingContactName)
            }
            _ => Ok(()),
        }
    }
}

impl WifiCredentials {
    /// `WIFI:T:<security>;S:<ssid>;P:<password>;;`
    ///
    /// `\`, `;`, `,`, `:` and `"` in the SSID or password are
    /// backslash-escaped so scanners split the fields correctly.
    pub fn content(&self) -> String {
        format!(
            "WIFI:T:{};S:{};P:{};;",
            self.security,
            escape_wifi_field(&self.ssid),
            escape_wifi_field(&self.password)
        )
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.ssid.is_empty() {
            return Err(ValidationError::MissingSsid);
        }
        if self.security != Security::NoPass && self.password.is_empty() {
            return Err(ValidationError::MissingPassword(self.security));
        }
        Ok(())
    }
}

fn escape_wifi_field(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        if matches!(c, '\\' | ';' | ',' | ':' | '"') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

impl Contact {
    /// MECARD form; empty fields are left out.
    pub fn content(&self) -> String {
        let mut out = format!("MECARD:N:{};", self.name);
        if !self.phone.is_empty() {
            out.push_str(&format!("TEL:{};", self.phone));
        }
        if !self.email.is_empty() {
            out.push_str(&format!("EMAIL:{};", self.email));
        }
        if let Some(org) = self.organization.as_deref().filter(|o| !o.is_empty()) {
            out.push_str(&format!("ORG:{};", org));
        }
        out.push(';');
        out
    }
}

impl Style {
    /// Check that the logo image, if any, is within
    /// [`MAX_LOGO_SIZE`](super::MAX_LOGO_SIZE).
    pub fn validate(&self) -> Result<(), ValidationError> {
        match &self.logo {
            Some(reference) => logo::check_size(logo::logo_size(reference)),
            None => Ok(()),
        }
    }
}

impl QrRecord {
    /// Payload content, see [`Payload::content`].
    pub fn content(&self) -> String {
        self.payload().content()
    }

    /// One-line summary used in history listings.
    pub fn title(&self) -> String {
        match self.payload() {
            Payload::Url(url) => format!("URL: {}", url),
            Payload::Wifi(wifi) => format!("WiFi: {}", wifi.ssid),
            Payload::Contact(contact) => format!("Contact: {}", contact.name),
            Payload::Text(text) => {
                let head: String = text.chars().take(TITLE_TEXT_CHARS).collect();
                if text.chars().count() > TITLE_TEXT_CHARS {
                    format!("Text: {}...", head)
                } else {
                    format!("Text: {}", head)
                }
            }
        }
    }

    /// Validate payload and style together.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.payload().validate()?;
        match self.style() {
            Some(style) => style.validate(),
            None => Ok(()),
        }
    }
}
