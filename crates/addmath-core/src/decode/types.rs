//! Core types for image decoding.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error types for image decoding operations.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The input is not a `data:` URL this crate understands.
    #[error("Invalid data URL: {0}")]
    InvalidDataUrl(String),

    /// The base64 payload of a data URL could not be decoded.
    #[error("Invalid base64 payload: {0}")]
    InvalidBase64(String),

    /// The file format is not recognized or supported.
    #[error("Invalid or unsupported image format")]
    InvalidFormat,

    /// The image file is corrupted or incomplete.
    #[error("Corrupted or incomplete image file: {0}")]
    CorruptedFile(String),
}

/// Correction that brings a stored photo upright, read from the EXIF
/// orientation tag (values 1-8).
///
/// Applied as an optional horizontal mirror followed by `quarter_turns`
/// clockwise quarter turns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Orientation {
    pub mirror: bool,
    pub quarter_turns: u8,
}

impl Orientation {
    pub const UPRIGHT: Orientation = Orientation {
        mirror: false,
        quarter_turns: 0,
    };

    /// Correction for an EXIF orientation tag. Unknown values are upright.
    pub fn from_exif(tag: u32) -> Self {
        let (mirror, quarter_turns) = match tag {
            2 => (true, 0),
            3 => (false, 2),
            4 => (true, 2),
            5 => (true, 3),
            6 => (false, 1),
            7 => (true, 1),
            8 => (false, 3),
            _ => (false, 0),
        };
        Self {
            mirror,
            quarter_turns,
        }
    }

    pub fn is_upright(self) -> bool {
        self == Self::UPRIGHT
    }

    /// Whether the upright image has width and height exchanged.
    pub fn swaps_dimensions(self) -> bool {
        self.quarter_turns % 2 == 1
    }
}

/// An RGB raster, row-major, 3 bytes per pixel.
///
/// Used both for decoded sources and for every intermediate surface of the
/// crop pipeline. Pixels a transform leaves uncovered are black, which is
/// what a transparent canvas pixel becomes once exported as JPEG.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedImage {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

impl DecodedImage {
    /// Wrap a pixel buffer without checking its length.
    ///
    /// Buffers from the host may not match their dimensions; the transform
    /// and encode stages reject those with an error (see
    /// [`has_expected_len`](Self::has_expected_len)).
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> Self {
        Self {
            width,
            height,
            pixels,
        }
    }

    /// Create an all-black image, the equivalent of a freshly allocated canvas.
    pub fn blank(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![0u8; Self::expected_len(width, height)],
        }
    }

    pub fn from_rgb_image(img: image::RgbImage) -> Self {
        let (width, height) = img.dimensions();
        Self::new(width, height, img.into_raw())
    }

    /// Get the RGB value at `(x, y)`. Panics if out of bounds.
    #[inline]
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 3] {
        let idx = (y as usize * self.width as usize + x as usize) * 3;
        [self.pixels[idx], self.pixels[idx + 1], self.pixels[idx + 2]]
    }

    /// Byte length of an RGB buffer for `width` x `height`.
    pub fn expected_len(width: u32, height: u32) -> usize {
        width as usize * height as usize * 3
    }

    /// Whether the buffer holds exactly `width * height` RGB pixels.
    pub fn has_expected_len(&self) -> bool {
        self.pixels.len() == Self::expected_len(self.width, self.height)
    }

    pub fn pixel_count(&self) -> u64 {
        self.width as u64 * self.height as u64
    }

    /// True for a zero-area image.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0 || self.pixels.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_orientation_from_exif() {
        assert!(Orientation::from_exif(1).is_upright());
        assert!(Orientation::from_exif(0).is_upright());
        assert!(Orientation::from_exif(99).is_upright());
        assert_eq!(
            Orientation::from_exif(6),
            Orientation {
                mirror: false,
                quarter_turns: 1
            }
        );
        assert!(Orientation::from_exif(4).mirror);
    }

    #[test]
    fn test_orientation_swaps_dimensions() {
        let swapping: Vec<u32> = (1..=8)
            .filter(|&tag| Orientation::from_exif(tag).swaps_dimensions())
            .collect();
        assert_eq!(swapping, [5, 6, 7, 8]);
    }

    #[test]
    fn test_expected_len() {
        assert_eq!(DecodedImage::expected_len(4, 3), 36);
        assert!(DecodedImage::blank(4, 3).has_expected_len());
        assert!(!DecodedImage::new(4, 4, vec![10; 5]).has_expected_len());
    }

    #[test]
    fn test_blank_image_is_black() {
        let img = DecodedImage::blank(4, 3);
        assert_eq!(img.pixels.len(), 36);
        assert!(img.pixels.iter().all(|&p| p == 0));
        assert_eq!(img.pixel_count(), 12);
    }

    #[test]
    fn test_pixel_lookup() {
        let img = DecodedImage::new(2, 1, vec![1, 2, 3, 4, 5, 6]);
        assert_eq!(img.pixel(0, 0), [1, 2, 3]);
        assert_eq!(img.pixel(1, 0), [4, 5, 6]);
    }

    #[test]
    fn test_decoded_image_empty() {
        let img = DecodedImage::new(0, 0, vec![]);
        assert!(img.is_empty());
    }

    #[test]
    fn test_decode_error_display() {
        let err = DecodeError::InvalidDataUrl("missing comma".to_string());
        assert_eq!(err.to_string(), "Invalid data URL: missing comma");

        let err = DecodeError::InvalidFormat;
        assert_eq!(err.to_string(), "Invalid or unsupported image format");
    }
}
