use std::fmt;

use serde::{Deserialize, Serialize};

use crate::client::ClientConfig;
use crate::consts::{MAX_VARIATIONS, MIN_VARIATIONS};
use crate::error::{MockupError, Result};

pub const PRODUCT_TYPES: &[&str] = &[
    "t-shirt",
    "hoodie",
    "jacket",
    "pants",
    "shoes",
    "hat/cap",
    "beanie",
    "hijab",
    "accessory",
];

pub const ETHNICITIES: &[&str] = &[
    "African",
    "Asian",
    "European / Caucasian",
    "Arab",
    "Latino",
    "Mixed",
];

pub const BODY_TYPES: &[&str] = &["athletic / muscular", "average", "slim", "curvy"];

pub const POSE_STYLES: &[&str] = &[
    "standing frontal",
    "side profile",
    "sitting relaxed",
    "dynamic action",
    "fashion editorial pose",
];

pub const BACKGROUND_STYLES: &[&str] = &[
    "studio minimal",
    "urban street",
    "outdoor natural",
    "luxury interior",
];

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelGender {
    Male,
    Female,
    #[default]
    Any,
}

impl ModelGender {
    pub const ALL: &[Self] = &[Self::Male, Self::Female, Self::Any];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Male => "male",
            Self::Female => "female",
            Self::Any => "any",
        }
    }
}

impl fmt::Display for ModelGender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ModelGender {
    type Err = MockupError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "male" => Ok(Self::Male),
            "female" => Ok(Self::Female),
            "any" => Ok(Self::Any),
            other => Err(MockupError::InvalidConfig(format!(
                "unknown model gender '{other}' (expected male, female or any)"
            ))),
        }
    }
}

/// Every parameter of one generation request.
///
/// Treated as an immutable snapshot: edits produce a new value, the
/// orchestrator only ever reads it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MockupConfig {
    pub product_type: String,
    pub model_gender: ModelGender,
    pub ethnicity: String,
    pub body_type: String,
    pub pose_style: String,
    pub background_style: String,
    /// Comma-separated mood keywords, echoed verbatim into the prompt.
    pub vibe_keywords: String,
    /// Number of images requested per batch, within
    /// [`MIN_VARIATIONS`]..=[`MAX_VARIATIONS`].
    pub variations: u32,
}

impl Default for MockupConfig {
    fn default() -> Self {
        Self {
            product_type: "t-shirt".into(),
            model_gender: ModelGender::Any,
            ethnicity: "European / Caucasian".into(),
            body_type: "average".into(),
            pose_style: "standing frontal".into(),
            background_style: "studio minimal".into(),
            vibe_keywords: "fashion, modern, premium".into(),
            variations: 3,
        }
    }
}

impl MockupConfig {
    pub fn validate(&self) -> Result<()> {
        if !(MIN_VARIATIONS..=MAX_VARIATIONS).contains(&self.variations) {
            return Err(MockupError::InvalidConfig(format!(
                "variations must be between {MIN_VARIATIONS} and {MAX_VARIATIONS}, got {}",
                self.variations
            )));
        }
        Ok(())
    }
}

/// On-disk configuration file: generation parameters plus client settings.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct StudioConfig {
    #[serde(default)]
    pub mockup: MockupConfig,
    #[serde(default)]
    pub client: ClientConfig,
}
