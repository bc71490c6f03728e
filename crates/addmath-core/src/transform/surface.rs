//! Drawing surface allocation.
//!
//! Every pipeline stage draws into a freshly allocated surface. Browsers cap
//! canvas dimensions and refuse zero-sized contexts; the same limits are
//! enforced here so a request that would fail in the host fails the same way.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::decode::DecodedImage;

/// Errors raised while preparing transform surfaces.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TransformError {
    /// The host cannot provide a raster surface of the requested size.
    #[error("Drawing surface unavailable: cannot allocate {width}x{height}")]
    SurfaceUnavailable { width: u32, height: u32 },

    /// The pixel buffer does not match the image dimensions.
    #[error("Invalid pixel data: expected {expected} bytes, got {actual}")]
    InvalidPixelData { expected: usize, actual: usize },
}

/// Reject an input whose buffer length disagrees with its dimensions.
pub(crate) fn check_pixels(image: &DecodedImage) -> Result<(), TransformError> {
    if image.has_expected_len() {
        return Ok(());
    }
    Err(TransformError::InvalidPixelData {
        expected: DecodedImage::expected_len(image.width, image.height),
        actual: image.pixels.len(),
    })
}

/// Maximum surface dimensions the host will hand out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SurfaceLimits {
    /// Longest allowed side in pixels.
    pub max_side: u32,
    /// Largest allowed pixel count.
    pub max_area: u64,
}

impl Default for SurfaceLimits {
    fn default() -> Self {
        // Chromium's canvas limits
        Self {
            max_side: 32_767,
            max_area: 268_435_456,
        }
    }
}

impl SurfaceLimits {
    /// Check whether a `width` x `height` surface can be allocated.
    pub fn allows(&self, width: u32, height: u32) -> bool {
        width > 0
            && height > 0
            && width <= self.max_side
            && height <= self.max_side
            && (width as u64) * (height as u64) <= self.max_area
    }

    /// Allocate a blank (transparent, exported as black) surface.
    pub fn allocate(&self, width: u32, height: u32) -> Result<DecodedImage, TransformError> {
        if !self.allows(width, height) {
            return Err(TransformError::SurfaceUnavailable { width, height });
        }
        Ok(DecodedImage::blank(width, height))
    }
}
