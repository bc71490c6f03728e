//! Region extraction from the rotated canvas.
//!
//! Crop regions are pixel rectangles in the coordinate space of the rotated
//! bounding canvas, not of the original source.
//!
//! # Clipping
//!
//! A region that extends past the canvas is not rejected. The overlapping
//! part is copied and the rest of the output stays black, the same clamping
//! a raster copy between canvases performs.

use serde::{Deserialize, Serialize};

use super::surface::check_pixels;
use super::{SurfaceLimits, TransformError};
use crate::decode::DecodedImage;

/// Crop rectangle in rotated-canvas pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CropRegion {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl CropRegion {
    pub fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Region covering a whole `width` x `height` canvas.
    pub fn full(width: u32, height: u32) -> Self {
        Self::new(0, 0, width, height)
    }

    /// Whether the region lies entirely within a `width` x `height` canvas.
    pub fn fits_within(&self, width: u32, height: u32) -> bool {
        self.x >= 0
            && self.y >= 0
            && self.x as i64 + self.width as i64 <= width as i64
            && self.y as i64 + self.height as i64 <= height as i64
    }
}

/// Copy `region` out of `canvas` onto a new surface of exactly
/// `region.width` x `region.height`, unscaled.
///
/// # Errors
///
/// Returns [`TransformError::InvalidPixelData`] for a canvas whose buffer
/// does not match its size, and [`TransformError::SurfaceUnavailable`] if
/// the output surface cannot be allocated, which includes zero-sized regions.
pub fn apply_crop(
    canvas: &DecodedImage,
    region: CropRegion,
    limits: &SurfaceLimits,
) -> Result<DecodedImage, TransformError> {
    check_pixels(canvas)?;

    if region == CropRegion::full(canvas.width, canvas.height)
        && limits.allows(region.width, region.height)
    {
        return Ok(canvas.clone());
    }

    let mut output = limits.allocate(region.width, region.height)?;

    if !region.fits_within(canvas.width, canvas.height) {
        tracing::warn!(
            ?region,
            canvas_width = canvas.width,
            canvas_height = canvas.height,
            "crop region exceeds canvas, clipping"
        );
    }

    // Horizontal overlap in canvas coordinates
    let left = (region.x as i64).max(0);
    let right = (region.x as i64 + region.width as i64).min(canvas.width as i64);
    if left >= right {
        return Ok(output);
    }
    let span = (right - left) as usize * 3;
    let dst_col = (left - region.x as i64) as usize * 3;
    let src_col = left as usize * 3;

    let out_stride = region.width as usize * 3;
    let src_stride = canvas.width as usize * 3;

    for row in 0..region.height as i64 {
        let src_y = region.y as i64 + row;
        if src_y < 0 || src_y >= canvas.height as i64 {
            continue;
        }

        let src_start = src_y as usize * src_stride + src_col;
        let dst_start = row as usize * out_stride + dst_col;
        output.pixels[dst_start..dst_start + span]
            .copy_from_slice(&canvas.pixels[src_start..src_start + span]);
    }

    Ok(output)
}


// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn create_test_image(width: u32, height: u32) -> DecodedImage {
        let mut pixels = Vec::with_capacity((width * height * 3) as usize);
        for y in 0..height {
            for x in 0..width {
                let v = ((y * width + x) % 256) as u8;
                pixels.extend_from_slice(&[v, v, v]);
            }
        }
        DecodedImage::new(width, height, pixels)
    }

    fn region_strategy() -> impl Strategy<Value = CropRegion> {
        (-20i32..=120, -20i32..=120, 1u32..=80, 1u32..=80)
            .prop_map(|(x, y, w, h)| CropRegion::new(x, y, w, h))
    }

    proptest! {
        /// Property: Output dimensions always equal the region size.
        #[test]
        fn prop_output_matches_region(
            (width, height) in (4u32..=100, 4u32..=100),
            region in region_strategy(),
        ) {
            let img = create_test_image(width, height);
            let result = apply_crop(&img, region, &SurfaceLimits::default()).unwrap();

            prop_assert_eq!(result.width, region.width);
            prop_assert_eq!(result.height, region.height);
            prop_assert_eq!(result.pixels.len(), (region.width * region.height * 3) as usize);
        }

        /// Property: In-bounds pixels are copied verbatim.
        #[test]
        fn prop_in_bounds_pixels_copied(
            (width, height) in (4u32..=100, 4u32..=100),
            region in region_strategy(),
        ) {
            let img = create_test_image(width, height);
            let result = apply_crop(&img, region, &SurfaceLimits::default()).unwrap();

            for y in 0..region.height {
                for x in 0..region.width {
                    let cx = region.x as i64 + x as i64;
                    let cy = region.y as i64 + y as i64;
                    let inside = cx >= 0 && cy >= 0 && cx < width as i64 && cy < height as i64;
                    let expected = if inside {
                        img.pixel(cx as u32, cy as u32)
                    } else {
                        [0, 0, 0]
                    };
                    prop_assert_eq!(result.pixel(x, y), expected);
                }
            }
        }

        /// Property: Cropping the full extent of a crop returns it unchanged.
        #[test]
        fn prop_recrop_full_extent_is_identity(
            (width, height) in (4u32..=60, 4u32..=60),
            region in region_strategy(),
        ) {
            let img = create_test_image(width, height);
            let limits = SurfaceLimits::default();
            let first = apply_crop(&img, region, &limits).unwrap();
            let second = apply_crop(
                &first,
                CropRegion::full(first.width, first.height),
                &limits,
            ).unwrap();
            prop_assert_eq!(second, first);
        }
    }
}
