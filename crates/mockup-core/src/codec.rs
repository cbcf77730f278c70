//! Conversion between uploaded files and the base64 payloads exchanged with
//! the generation service.
//!
//! Payloads are opaque to the rest of the crate. The only things ever
//! inspected here are the magic bytes (to detect a media type) and the image
//! header (to report natural dimensions for the viewer).

use std::fmt;
use std::io::Cursor;
use std::path::Path;
use std::sync::Arc;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use tracing::debug;

use crate::consts::{MAX_UPLOAD_BYTES, SUPPORTED_MEDIA_TYPES};
use crate::error::{MockupError, Result};
use crate::viewport::Size;

/// Base64 text of an image, shared cheaply between snapshots.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct EncodedImage(Arc<str>);

impl EncodedImage {
    pub fn new(payload: impl Into<Arc<str>>) -> Self {
        Self(payload.into())
    }

    pub fn encode(bytes: &[u8]) -> Self {
        Self(BASE64.encode(bytes).into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn decode(&self) -> Result<Vec<u8>> {
        decode_payload(&self.0)
    }
}

// Payloads are megabytes of base64; keep them out of debug output.
impl fmt::Debug for EncodedImage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EncodedImage({} bytes)", self.0.len())
    }
}

impl From<&str> for EncodedImage {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for EncodedImage {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

/// A product photo ready to be sent with every generation request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SourceImage {
    pub payload: EncodedImage,
    pub media_type: String,
    pub name: String,
}

/// Encode an uploaded file.
///
/// The media type is sniffed from the content; the filename extension is only
/// consulted when the content is not recognised.
pub fn encode_upload(bytes: &[u8], filename: &str) -> Result<SourceImage> {
    if bytes.is_empty() {
        return Err(MockupError::Decode(format!("{filename} is empty")));
    }
    if bytes.len() > MAX_UPLOAD_BYTES {
        return Err(MockupError::Decode(format!(
            "{filename} is {} bytes, limit is {MAX_UPLOAD_BYTES}",
            bytes.len()
        )));
    }

    let media_type = detect_media_type(bytes, filename)?;
    debug!(filename, media_type, size = bytes.len(), "Encoded upload");

    Ok(SourceImage {
        payload: EncodedImage::encode(bytes),
        media_type: media_type.to_string(),
        name: filename.to_string(),
    })
}

/// Read and encode an image file from disk.
pub fn load_file(path: &Path) -> Result<SourceImage> {
    let bytes = std::fs::read(path)?;
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    encode_upload(&bytes, &name)
}

fn detect_media_type(bytes: &[u8], filename: &str) -> Result<&'static str> {
    let media_type = match infer::get(bytes) {
        Some(kind) if kind.matcher_type() == infer::MatcherType::Image => kind.mime_type(),
        Some(kind) => {
            return Err(MockupError::Decode(format!(
                "{filename} is not an image ({})",
                kind.mime_type()
            )))
        }
        None => media_type_for_name(filename).ok_or_else(|| {
            MockupError::Decode(format!("{filename} is not a recognised image"))
        })?,
    };

    if !SUPPORTED_MEDIA_TYPES.contains(&media_type) {
        return Err(MockupError::Decode(format!(
            "{filename} has unsupported type {media_type} (expected PNG, JPEG or WEBP)"
        )));
    }
    Ok(media_type)
}

/// Media type implied by a filename extension.
pub fn media_type_for_name(filename: &str) -> Option<&'static str> {
    let ext = Path::new(filename).extension()?.to_str()?.to_lowercase();
    match ext.as_str() {
        "png" => Some("image/png"),
        "jpg" | "jpeg" => Some("image/jpeg"),
        "webp" => Some("image/webp"),
        "gif" => Some("image/gif"),
        _ => None,
    }
}

pub fn decode_payload(payload: &str) -> Result<Vec<u8>> {
    BASE64
        .decode(payload.trim())
        .map_err(|e| MockupError::Decode(format!("invalid base64 payload: {e}")))
}

/// File extension for decoded image bytes, `png` when unrecognised.
pub fn extension_for(bytes: &[u8]) -> &'static str {
    infer::get(bytes)
        .filter(|kind| kind.matcher_type() == infer::MatcherType::Image)
        .map(|kind| kind.extension())
        .unwrap_or("png")
}

/// Pixel dimensions of an encoded image, read from its header only.
pub fn natural_size(image: &EncodedImage) -> Result<Size> {
    let bytes = image.decode()?;
    let (width, height) = image::ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()?
        .into_dimensions()
        .map_err(|e| MockupError::Decode(e.to_string()))?;
    Ok(Size::new(width as f32, height as f32))
}
