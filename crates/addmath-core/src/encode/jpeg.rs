//! JPEG encoding of the final crop surface.

use image::codecs::jpeg::JpegEncoder;
use image::{ExtendedColorType, ImageEncoder};
use thiserror::Error;

use super::EncodedImage;
use crate::decode::DecodedImage;

/// Default JPEG quality, matching the 0.92 a browser canvas uses when
/// `toDataURL('image/jpeg')` is called without a quality argument.
pub const DEFAULT_JPEG_QUALITY: u8 = 92;

#[derive(Debug, Error)]
pub enum EncodeError {
    #[error("Invalid pixel data: expected {expected} bytes, got {actual}")]
    InvalidPixelData { expected: usize, actual: usize },

    #[error("Cannot encode a {width}x{height} surface")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("JPEG encoding failed: {0}")]
    EncodingFailed(String),
}

/// Encode RGB pixel data to JPEG bytes.
///
/// `quality` is clamped to 1-100.
pub fn encode_jpeg(
    pixels: &[u8],
    width: u32,
    height: u32,
    quality: u8,
) -> Result<Vec<u8>, EncodeError> {
    if width == 0 || height == 0 {
        return Err(EncodeError::InvalidDimensions { width, height });
    }

    let expected = width as usize * height as usize * 3;
    if pixels.len() != expected {
        return Err(EncodeError::InvalidPixelData {
            expected,
            actual: pixels.len(),
        });
    }

    let mut out = Vec::with_capacity(expected / 8);
    JpegEncoder::new_with_quality(&mut out, quality.clamp(1, 100))
        .write_image(pixels, width, height, ExtendedColorType::Rgb8)
        .map_err(|e| EncodeError::EncodingFailed(e.to_string()))?;
    Ok(out)
}

/// Encode a decoded surface as a tagged JPEG payload.
pub fn encode_image(image: &DecodedImage, quality: u8) -> Result<EncodedImage, EncodeError> {
    let bytes = encode_jpeg(&image.pixels, image.width, image.height, quality)?;
    tracing::debug!(
        width = image.width,
        height = image.height,
        quality,
        bytes = bytes.len(),
        "encoded jpeg"
    );
    Ok(EncodedImage::jpeg(bytes))
}
