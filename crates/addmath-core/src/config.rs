//! Pipeline configuration.
//!
//! Every field has a default, so an empty JSON object (or no config at all)
//! yields the browser-equivalent behaviour.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::encode::DEFAULT_JPEG_QUALITY;
use crate::transform::{InterpolationFilter, SurfaceLimits};

/// Errors raised while reading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid pipeline config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("JPEG quality must be 1-100, got {0}")]
    QualityOutOfRange(u8),
}

/// Tunables for the crop pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PipelineConfig {
    /// JPEG quality for the exported crop (1-100).
    pub jpeg_quality: u8,
    /// Resampling used when drawing the rotated source.
    pub filter: InterpolationFilter,
    /// Largest drawing surfaces the host provides.
    pub surface_limits: SurfaceLimits,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            jpeg_quality: DEFAULT_JPEG_QUALITY,
            filter: InterpolationFilter::Bilinear,
            surface_limits: SurfaceLimits::default(),
        }
    }
}

impl PipelineConfig {
    /// Parse and validate a JSON config document.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(1..=100).contains(&self.jpeg_quality) {
            return Err(ConfigError::QualityOutOfRange(self.jpeg_quality));
        }
        Ok(())
    }
}
