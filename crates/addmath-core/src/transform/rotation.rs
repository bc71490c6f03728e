//! Rotate-and-mirror rendering onto the enlarged bounding canvas.
//!
//! The source is drawn centred on a canvas sized to its rotated bounding box,
//! using the same transform chain as a 2D canvas context:
//!
//! ```text
//! translate(bw/2, bh/2) -> rotate(θ) -> scale(±1, ±1) -> translate(-w/2, -h/2)
//! ```
//!
//! Rendering uses inverse mapping: each destination pixel centre is carried
//! back into source space and sampled there.
//!
//! ```text
//! dx = dst_x + 0.5 - bw/2,  dy = dst_y + 0.5 - bh/2
//! src_x = w/2 + sx * ( dx * cos θ + dy * sin θ)
//! src_y = h/2 + sy * (-dx * sin θ + dy * cos θ)
//! ```
//!
//! Angles are in degrees with the y axis pointing down, so positive values
//! turn the image clockwise on screen.

use serde::{Deserialize, Serialize};

use super::surface::check_pixels;
use super::{SurfaceLimits, TransformError};
use crate::decode::DecodedImage;

/// Interpolation filter for rotation operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InterpolationFilter {
    /// Bilinear interpolation, the quality a browser canvas uses by default.
    #[default]
    Bilinear,
    /// Sharper Lanczos3 interpolation.
    Lanczos3,
}

/// Mirroring about the canvas centre, composed inside the rotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Flip {
    pub horizontal: bool,
    pub vertical: bool,
}

impl Flip {
    pub const NONE: Flip = Flip {
        horizontal: false,
        vertical: false,
    };

    /// Scale factors `(sx, sy)` equivalent to this flip.
    fn scale(self) -> (f64, f64) {
        (
            if self.horizontal { -1.0 } else { 1.0 },
            if self.vertical { -1.0 } else { 1.0 },
        )
    }

    pub fn is_none(self) -> bool {
        !self.horizontal && !self.vertical
    }
}

/// `(cos θ, sin θ)` for an angle in degrees.
///
/// Quarter turns are snapped to exact values so that 90° rotations swap
/// dimensions and map pixels without floating point drift.
fn rotation_terms(angle_degrees: f64) -> (f64, f64) {
    let turns = angle_degrees / 90.0;
    let nearest = turns.round();
    if (turns - nearest).abs() < 1e-9 {
        return match (nearest as i64).rem_euclid(4) {
            0 => (1.0, 0.0),
            1 => (0.0, 1.0),
            2 => (-1.0, 0.0),
            _ => (0.0, -1.0),
        };
    }
    let rad = angle_degrees.to_radians();
    (rad.cos(), rad.sin())
}

/// Compute the bounding box of a `width` x `height` rectangle rotated by
/// `angle_degrees`.
///
/// ```text
/// bound_w = |cos θ|·w + |sin θ|·h
/// bound_h = |sin θ|·w + |cos θ|·h
/// ```
///
/// The result is fractional; see [`surface_size`] for the pixel size of the
/// canvas that holds it.
///
/// # Example
///
/// ```
/// use addmath_core::transform::compute_rotated_bounds;
///
/// let (w, h) = compute_rotated_bounds(100.0, 50.0, 90.0);
/// assert!((w - 50.0).abs() < 1e-9 && (h - 100.0).abs() < 1e-9);
/// ```
pub fn compute_rotated_bounds(width: f64, height: f64, angle_degrees: f64) -> (f64, f64) {
    let (cos, sin) = rotation_terms(angle_degrees);
    let (cos, sin) = (cos.abs(), sin.abs());
    (cos * width + sin * height, sin * width + cos * height)
}

/// Integer canvas size for fractional bounds.
///
/// Assigning a fractional width to a canvas truncates it, so the pixel grid
/// is the truncated bounding box.
pub fn surface_size(bounds: (f64, f64)) -> (u32, u32) {
    (bounds.0.trunc() as u32, bounds.1.trunc() as u32)
}

/// Render `image` rotated by `angle_degrees` and mirrored by `flip` onto a
/// canvas the size of its rotated bounding box.
///
/// Canvas pixels the source does not cover stay black.
///
/// # Errors
///
/// Returns [`TransformError::InvalidPixelData`] when the buffer does not
/// match the image size, and [`TransformError::SurfaceUnavailable`] when the
/// bounding canvas cannot be allocated within `limits`.
pub fn apply_rotation(
    image: &DecodedImage,
    angle_degrees: f64,
    flip: Flip,
    filter: InterpolationFilter,
    limits: &SurfaceLimits,
) -> Result<DecodedImage, TransformError> {
    check_pixels(image)?;

    let (src_w, src_h) = (image.width as f64, image.height as f64);
    let bounds = compute_rotated_bounds(src_w, src_h, angle_degrees);
    let (dst_w, dst_h) = surface_size(bounds);
    let mut output = limits.allocate(dst_w, dst_h)?;

    if image.is_empty() {
        return Ok(output);
    }

    let (cos, sin) = rotation_terms(angle_degrees);
    let (sx, sy) = flip.scale();
    let (cx, cy) = (bounds.0 / 2.0, bounds.1 / 2.0);
    let (src_cx, src_cy) = (src_w / 2.0, src_h / 2.0);

    for dst_y in 0..dst_h {
        let dy = dst_y as f64 + 0.5 - cy;
        let row_start = dst_y as usize * dst_w as usize * 3;

        for dst_x in 0..dst_w {
            let dx = dst_x as f64 + 0.5 - cx;

            let src_x = src_cx + sx * (dx * cos + dy * sin);
            let src_y = src_cy + sy * (-dx * sin + dy * cos);

            // Only pixels whose centre lands inside the drawn source are painted
            if src_x < 0.0 || src_x >= src_w || src_y < 0.0 || src_y >= src_h {
                continue;
            }

            // Shift from continuous coordinates to pixel-centre indices
            let pixel = match filter {
                InterpolationFilter::Bilinear => sample_bilinear(image, src_x - 0.5, src_y - 0.5),
                InterpolationFilter::Lanczos3 => sample_lanczos3(image, src_x - 0.5, src_y - 0.5),
            };

            let idx = row_start + dst_x as usize * 3;
            output.pixels[idx..idx + 3].copy_from_slice(&pixel);
        }
    }

    tracing::debug!(
        angle_degrees,
        ?flip,
        width = dst_w,
        height = dst_h,
        "rendered rotated canvas"
    );

    Ok(output)
}

#[inline]
fn get_pixel_f64(image: &DecodedImage, px: usize, py: usize) -> [f64; 3] {
    let idx = (py * image.width as usize + px) * 3;
    [
        image.pixels[idx] as f64,
        image.pixels[idx + 1] as f64,
        image.pixels[idx + 2] as f64,
    ]
}

/// Sample a pixel using bilinear interpolation, clamping to the edge.
///
/// `x` and `y` are in pixel-centre index space, so integral values hit a
/// source pixel exactly.
fn sample_bilinear(image: &DecodedImage, x: f64, y: f64) -> [u8; 3] {
    let (max_x, max_y) = (image.width as usize - 1, image.height as usize - 1);
    let x = x.clamp(0.0, max_x as f64);
    let y = y.clamp(0.0, max_y as f64);

    let x0 = x.floor() as usize;
    let y0 = y.floor() as usize;
    let x1 = (x0 + 1).min(max_x);
    let y1 = (y0 + 1).min(max_y);

    let fx = x - x0 as f64;
    let fy = y - y0 as f64;

    let p00 = get_pixel_f64(image, x0, y0);
    let p10 = get_pixel_f64(image, x1, y0);
    let p01 = get_pixel_f64(image, x0, y1);
    let p11 = get_pixel_f64(image, x1, y1);

    let mut result = [0u8; 3];
    for i in 0..3 {
        let v = p00[i] * (1.0 - fx) * (1.0 - fy)
            + p10[i] * fx * (1.0 - fy)
            + p01[i] * (1.0 - fx) * fy
            + p11[i] * fx * fy;
        result[i] = v.clamp(0.0, 255.0).round() as u8;
    }

    result
}

/// Sample a pixel using Lanczos3 interpolation over a 6x6 neighbourhood.
///
/// Falls back to bilinear where the kernel would leave the image.
fn sample_lanczos3(image: &DecodedImage, x: f64, y: f64) -> [u8; 3] {
    let (w, h) = (image.width as i64, image.height as i64);

    if x < 2.0 || x >= (w - 3) as f64 || y < 2.0 || y >= (h - 3) as f64 {
        return sample_bilinear(image, x, y);
    }

    let x0 = x.floor() as i64;
    let y0 = y.floor() as i64;

    let mut sum = [0.0f64; 3];
    let mut weight_sum = 0.0;

    for ky in -2..=3 {
        for kx in -2..=3 {
            let px = x0 + kx;
            let py = y0 + ky;

            let weight = lanczos_weight(x - px as f64, 3.0) * lanczos_weight(y - py as f64, 3.0);
            let pixel = get_pixel_f64(image, px as usize, py as usize);
            for i in 0..3 {
                sum[i] += pixel[i] * weight;
            }
            weight_sum += weight;
        }
    }

    let mut result = [0u8; 3];
    if weight_sum > 0.0 {
        for i in 0..3 {
            result[i] = (sum[i] / weight_sum).clamp(0.0, 255.0).round() as u8;
        }
    }

    result
}

/// Lanczos kernel: `sinc(x) * sinc(x/a)` for `|x| < a`, else 0.
fn lanczos_weight(x: f64, a: f64) -> f64 {
    if x.abs() < f64::EPSILON {
        return 1.0;
    }
    if x.abs() >= a {
        return 0.0;
    }

    let pi_x = std::f64::consts::PI * x;
    let pi_x_a = pi_x / a;

    (a * pi_x.sin() * pi_x_a.sin()) / (pi_x * pi_x)
}


// ============================================================================
// Property-Based Tests
// ============================================================================
