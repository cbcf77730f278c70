/// Smallest number of variations a batch may request.
pub const MIN_VARIATIONS: u32 = 1;

/// Largest number of variations a batch may request.
pub const MAX_VARIATIONS: u32 = 6;

/// Upload size limit. Inline image parts above this are rejected by the
/// generation service, so the codec refuses them up front.
pub const MAX_UPLOAD_BYTES: usize = 20 * 1024 * 1024;

/// Media types accepted for product uploads.
pub const SUPPORTED_MEDIA_TYPES: &[&str] = &["image/png", "image/jpeg", "image/webp"];

pub const MIN_SCALE: f32 = 0.1;
pub const MAX_SCALE: f32 = 10.0;

/// Per-tick mouse wheel zoom steps.
pub const WHEEL_ZOOM_IN: f32 = 1.05;
pub const WHEEL_ZOOM_OUT: f32 = 0.95;

/// Toolbar button zoom steps.
pub const BUTTON_ZOOM_IN: f32 = 1.2;
pub const BUTTON_ZOOM_OUT: f32 = 0.8;

pub const DEFAULT_MODEL: &str = "gemini-2.5-flash-image";
pub const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_API_KEY_ENV: &str = "GEMINI_API_KEY";

/// Variable consulted when the configured key variable is unset.
pub const FALLBACK_API_KEY_ENV: &str = "API_KEY";

pub const DEFAULT_TIMEOUT_SECS: u64 = 120;
