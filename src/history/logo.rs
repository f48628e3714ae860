//! Logo images embedded in a record's style as `data:` URLs.

use std::path::Path;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;

use super::error::ValidationError;

/// Largest accepted logo image, in bytes.
pub const MAX_LOGO_SIZE: usize = 5 * 1024 * 1024;

const BASE64_MARKER: &str = ";base64,";

/// MIME type of an image file, judged by its extension.
pub fn image_mime_type(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    match ext.as_str() {
        "png" => Some("image/png"),
        "jpg" | "jpeg" => Some("image/jpeg"),
        "gif" => Some("image/gif"),
        "webp" => Some("image/webp"),
        "svg" => Some("image/svg+xml"),
        "avif" => Some("image/avif"),
        "heic" => Some("image/heic"),
        "heif" => Some("image/heif"),
        _ => None,
    }
}

/// Encode image bytes as a `data:<mime>;base64,<data>` URL.
pub fn logo_data_url(mime: &str, image: &[u8]) -> Result<String, ValidationError> {
    check_size(image.len())?;
    Ok(format!("data:{}{}{}", mime, BASE64_MARKER, STANDARD.encode(image)))
}

/// Read an image file into a `data:` URL suitable for [`Style::logo`].
///
/// [`Style::logo`]: super::Style::logo
pub fn read_logo(path: impl AsRef<Path>) -> crate::Result<String> {
    let path = path.as_ref();
    let mime = image_mime_type(path)
        .ok_or_else(|| ValidationError::UnsupportedLogoType(path.display().to_string()))?;

    let len = std::fs::metadata(path)?.len();
    check_size(usize::try_from(len).unwrap_or(usize::MAX))?;

    let image = std::fs::read(path)?;
    Ok(logo_data_url(mime, &image)?)
}

/// Size of the image a logo reference carries.
///
/// A base64 `data:` URL is measured by its decoded length, anything else by
/// its own length.
pub(crate) fn logo_size(logo: &str) -> usize {
    match logo.split_once(BASE64_MARKER) {
        Some((header, data)) if header.starts_with("data:") => decoded_len(data),
        _ => logo.len(),
    }
}

fn decoded_len(data: &str) -> usize {
    let symbols = data.trim_end_matches('=').len();
    let tail = match symbols % 4 {
        2 => 1,
        3 => 2,
        _ => 0,
    };
    symbols / 4 * 3 + tail
}

pub(crate) fn check_size(size: usize) -> Result<(), ValidationError> {
    if size > MAX_LOGO_SIZE {
        return Err(ValidationError::LogoTooLarge {
            size,
            limit: MAX_LOGO_SIZE,
        });
    }
    Ok(())
}
