//! The crop-to-upload pipeline: rotate/flip, crop, lossy export.
//!
//! A pure, single-shot function from `(image, region, transform)` to an
//! encoded image. Each call allocates its own intermediate and final
//! surfaces and drops them on return, so re-cropping an earlier result is
//! just another independent call.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::PipelineConfig;
use crate::decode::{self, DecodeError, DecodedImage};
use crate::encode::{self, EncodeError, EncodedImage};
use crate::transform::{self, CropRegion, Flip, TransformError};

/// Errors surfaced by a pipeline run.
#[derive(Debug, Error)]
pub enum CropError {
    /// The source could not be loaded; nothing was transformed.
    #[error(transparent)]
    Decode(#[from] DecodeError),

    /// A drawing surface could not be allocated.
    #[error(transparent)]
    Transform(#[from] TransformError),

    /// The final surface could not be encoded.
    #[error(transparent)]
    Encode(#[from] EncodeError),
}

/// Crop parameters as assembled by the editing session.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CropParams {
    pub region: CropRegion,
    #[serde(default)]
    pub rotation: f64,
    #[serde(default)]
    pub flip: Flip,
}

impl CropParams {
    /// Axis-aligned crop with no rotation or mirroring.
    pub fn region_only(region: CropRegion) -> Self {
        Self {
            region,
            rotation: 0.0,
            flip: Flip::NONE,
        }
    }
}

/// Crop `source` to `region` after rotating by `rotation_deg` and applying
/// `flip`, using the default configuration.
///
/// `region` is interpreted against the rotated bounding canvas of the source.
pub fn crop(
    source: &DecodedImage,
    region: CropRegion,
    rotation_deg: f64,
    flip: Flip,
) -> Result<EncodedImage, CropError> {
    let params = CropParams {
        region,
        rotation: rotation_deg,
        flip,
    };
    crop_with_config(source, &params, &PipelineConfig::default())
}

/// Run the pipeline with explicit configuration.
pub fn crop_with_config(
    source: &DecodedImage,
    params: &CropParams,
    config: &PipelineConfig,
) -> Result<EncodedImage, CropError> {
    let cropped = render(source, params, config)?;
    Ok(encode::encode_image(&cropped, config.jpeg_quality)?)
}

/// Rotate, flip and crop without encoding.
///
/// Exposed for previews and tests that need exact pixels.
pub fn render(
    source: &DecodedImage,
    params: &CropParams,
    config: &PipelineConfig,
) -> Result<DecodedImage, TransformError> {
    let limits = &config.surface_limits;
    tracing::debug!(
        source_width = source.width,
        source_height = source.height,
        region = ?params.region,
        rotation = params.rotation,
        "cropping image"
    );

    let canvas = transform::apply_rotation(
        source,
        params.rotation,
        params.flip,
        config.filter,
        limits,
    )?;
    transform::apply_crop(&canvas, params.region, limits)
}

/// Decode a data URL, run the pipeline and return the result as a data URL.
///
/// Decoding finishes before any surface is allocated, so a corrupt upload
/// is reported as [`CropError::Decode`].
pub fn crop_data_url(
    data_url: &str,
    params: &CropParams,
    config: &PipelineConfig,
) -> Result<String, CropError> {
    let source = decode::decode_data_url(data_url)?;
    let encoded = crop_with_config(&source, params, config)?;
    Ok(encoded.to_data_url())
}
