use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::codec::EncodedImage;
use crate::error::{MockupError, Result};

use super::{ClientConfig, GenerateFuture, GenerateRequest, GenerationClient};

const ERROR_BODY_PREVIEW_CHARS: usize = 300;

/// Gemini `generateContent` client for image-capable models.
#[derive(Clone)]
pub struct GeminiClient {
    http: reqwest::Client,
    url: String,
    api_key: String,
}

impl GeminiClient {
    pub fn new(config: &ClientConfig, api_key: impl Into<String>) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| MockupError::generation(format!("failed to build HTTP client: {e}")))?;
        let url = format!(
            "{}/models/{}:generateContent",
            config.endpoint.trim_end_matches('/'),
            config.model
        );
        Ok(Self {
            http,
            url,
            api_key: api_key.into(),
        })
    }

    /// Build a client using the key found in the environment.
    pub fn from_env(config: &ClientConfig) -> Result<Self> {
        let key = config.resolve_api_key().ok_or_else(|| {
            MockupError::InvalidConfig(format!(
                "no API key found; set the {} environment variable",
                config.api_key_env
            ))
        })?;
        Self::new(config, key)
    }
}

impl GenerationClient for GeminiClient {
    fn generate(&self, request: GenerateRequest) -> GenerateFuture {
        let http = self.http.clone();
        let url = self.url.clone();
        let api_key = self.api_key.clone();

        Box::pin(async move {
            let body = RequestBody::new(&request);
            debug!(url = %url, prompt_len = request.prompt.len(), "Sending generation request");

            let response = http
                .post(&url)
                .header("x-goog-api-key", &api_key)
                .json(&body)
                .send()
                .await
                .map_err(|e| MockupError::generation(format!("request failed: {e}")))?;

            let status = response.status();
            let text = response
                .text()
                .await
                .map_err(|e| MockupError::generation(format!("failed to read response: {e}")))?;

            if !status.is_success() {
                warn!(%status, "Generation service returned an error");
                return Err(MockupError::generation(format!(
                    "HTTP {status}: {}",
                    preview(&text)
                )));
            }

            let parsed: ResponseBody = serde_json::from_str(&text)
                .map_err(|e| MockupError::generation(format!("malformed response: {e}")))?;
            extract_image(parsed)
        })
    }
}

fn preview(text: &str) -> String {
    let mut out: String = text.chars().take(ERROR_BODY_PREVIEW_CHARS).collect();
    if text.chars().count() > ERROR_BODY_PREVIEW_CHARS {
        out.push('…');
    }
    out
}

/// First inline image of the first candidate.
fn extract_image(response: ResponseBody) -> Result<EncodedImage> {
    let parts = response
        .candidates
        .into_iter()
        .next()
        .and_then(|c| c.content)
        .map(|c| c.parts)
        .filter(|parts| !parts.is_empty())
        .ok_or_else(|| MockupError::generation("No content parts returned from API."))?;

    let mut text = String::new();
    for part in parts {
        if let Some(inline) = part.inline_data {
            if !inline.data.is_empty() {
                return Ok(EncodedImage::new(inline.data));
            }
        }
        if let Some(t) = part.text {
            text.push_str(&t);
        }
    }

    let text = text.trim();
    Err(MockupError::generation(format!(
        "API did not return an image. Response: {}",
        if text.is_empty() { "No text response" } else { text }
    )))
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RequestBody<'a> {
    contents: [RequestContent<'a>; 1],
    generation_config: GenerationConfig,
}

#[derive(Serialize)]
struct RequestContent<'a> {
    parts: [RequestPart<'a>; 2],
}

#[derive(Serialize)]
#[serde(untagged)]
enum RequestPart<'a> {
    Inline {
        #[serde(rename = "inlineData")]
        inline_data: RequestInline<'a>,
    },
    Text {
        text: &'a str,
    },
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RequestInline<'a> {
    mime_type: &'a str,
    data: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_modalities: [&'static str; 2],
}

impl<'a> RequestBody<'a> {
    fn new(request: &'a GenerateRequest) -> Self {
        Self {
            contents: [RequestContent {
                parts: [
                    RequestPart::Inline {
                        inline_data: RequestInline {
                            mime_type: &request.media_type,
                            data: request.image.as_str(),
                        },
                    },
                    RequestPart::Text {
                        text: &request.prompt,
                    },
                ],
            }],
            generation_config: GenerationConfig {
                response_modalities: ["IMAGE", "TEXT"],
            },
        }
    }
}

#[derive(Deserialize, Default)]
struct ResponseBody {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Deserialize)]
struct ResponsePart {
    text: Option<String>,
    #[serde(rename = "inlineData", alias = "inline_data")]
    inline_data: Option<ResponseInline>,
}

#[derive(Deserialize)]
struct ResponseInline {
    #[serde(default)]
    data: String,
}
