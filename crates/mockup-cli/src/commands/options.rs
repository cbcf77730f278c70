use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Args;
use mockup_core::client::GeminiClient;
use mockup_core::codec::{load_file, SourceImage};
use mockup_core::config::{ModelGender, StudioConfig};
use mockup_core::session::Orchestrator;

/// Config file plus per-field overrides shared by every command that builds
/// a generation request.
#[derive(Args)]
pub struct MockupArgs {
    /// Studio config file (TOML)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Product type, e.g. "hoodie"
    #[arg(long)]
    pub product: Option<String>,

    /// Model gender: male, female or any
    #[arg(long)]
    pub gender: Option<ModelGender>,

    /// Model ethnicity
    #[arg(long)]
    pub ethnicity: Option<String>,

    /// Model body type
    #[arg(long)]
    pub body: Option<String>,

    /// Pose style
    #[arg(long)]
    pub pose: Option<String>,

    /// Background style
    #[arg(long)]
    pub background: Option<String>,

    /// Comma-separated vibe keywords
    #[arg(long)]
    pub vibe: Option<String>,

    /// Number of variations to generate (1-6)
    #[arg(short = 'n', long)]
    pub variations: Option<u32>,
}

impl MockupArgs {
    /// Read the config file, if any, and apply the command-line overrides.
    pub fn load(&self) -> Result<StudioConfig> {
        let mut studio = match self.config {
            Some(ref path) => {
                let contents = std::fs::read_to_string(path)
                    .with_context(|| format!("Failed to read config {}", path.display()))?;
                toml::from_str(&contents).context("Invalid studio config")?
            }
            None => StudioConfig::default(),
        };

        let m = &mut studio.mockup;
        if let Some(ref v) = self.product {
            m.product_type = v.clone();
        }
        if let Some(g) = self.gender {
            m.model_gender = g;
        }
        if let Some(ref v) = self.ethnicity {
            m.ethnicity = v.clone();
        }
        if let Some(ref v) = self.body {
            m.body_type = v.clone();
        }
        if let Some(ref v) = self.pose {
            m.pose_style = v.clone();
        }
        if let Some(ref v) = self.background {
            m.background_style = v.clone();
        }
        if let Some(ref v) = self.vibe {
            m.vibe_keywords = v.clone();
        }
        if let Some(n) = self.variations {
            m.variations = n;
        }

        Ok(studio)
    }
}

/// Session backed by the Gemini client configured in `studio`.
pub fn connect(studio: &StudioConfig) -> Result<Orchestrator> {
    let client = GeminiClient::from_env(&studio.client).with_context(|| {
        format!(
            "Set {} (or API_KEY) to your Gemini API key",
            studio.client.api_key_env
        )
    })?;
    Ok(Orchestrator::new(Arc::new(client)))
}

pub fn runtime() -> Result<tokio::runtime::Runtime> {
    tokio::runtime::Runtime::new().context("Failed to start async runtime")
}

/// Load a product image, with the wording users see when an upload fails.
pub fn load_source(path: &Path) -> Result<SourceImage> {
    load_file(path).with_context(|| {
        format!(
            "Failed to load image. Please try another one. ({})",
            path.display()
        )
    })
}
