//! Boundary to the remote image generation service.

mod gemini;

use std::future::Future;
use std::pin::Pin;

use serde::{Deserialize, Serialize};

use crate::codec::{EncodedImage, SourceImage};
use crate::consts::{
    DEFAULT_API_KEY_ENV, DEFAULT_ENDPOINT, DEFAULT_MODEL, DEFAULT_TIMEOUT_SECS,
    FALLBACK_API_KEY_ENV,
};
use crate::error::Result;

pub use gemini::GeminiClient;

/// One generation call: the product image plus the prompt to apply to it.
#[derive(Clone, Debug)]
pub struct GenerateRequest {
    pub image: EncodedImage,
    pub media_type: String,
    pub prompt: String,
}

impl GenerateRequest {
    pub fn new(source: &SourceImage, prompt: impl Into<String>) -> Self {
        Self {
            image: source.payload.clone(),
            media_type: source.media_type.clone(),
            prompt: prompt.into(),
        }
    }
}

/// Boxed future returned by [`GenerationClient::generate`].
///
/// Owns everything it needs so the orchestrator can spawn it as a task.
pub type GenerateFuture = Pin<Box<dyn Future<Output = Result<EncodedImage>> + Send + 'static>>;

/// Produces one generated image per request.
///
/// Failures, including responses that carry no image, are reported as
/// [`MockupError::Generation`](crate::error::MockupError::Generation).
pub trait GenerationClient: Send + Sync {
    fn generate(&self, request: GenerateRequest) -> GenerateFuture;
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    pub model: String,
    /// API base URL, without the `/models/...` suffix.
    pub endpoint: String,
    /// Environment variable holding the API key.
    pub api_key_env: String,
    pub timeout_secs: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.into(),
            endpoint: DEFAULT_ENDPOINT.into(),
            api_key_env: DEFAULT_API_KEY_ENV.into(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl ClientConfig {
    /// API key from `api_key_env`, falling back to `API_KEY`.
    pub fn resolve_api_key(&self) -> Option<String> {
        [self.api_key_env.as_str(), FALLBACK_API_KEY_ENV]
            .into_iter()
            .filter_map(|name| std::env::var(name).ok())
            .map(|key| key.trim().to_string())
            .find(|key| !key.is_empty())
    }
}
