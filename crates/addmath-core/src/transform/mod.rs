//! Image transformation operations: rotation, mirroring and cropping.
//!
//! # Transform Order
//!
//! A crop request is applied in this order:
//! 1. Rotate and mirror the source onto its enlarged bounding canvas
//! 2. Copy the crop region out of that canvas, unscaled
//!
//! # Coordinate System
//!
//! - Rotation angles are in degrees, positive = clockwise on screen
//! - Crop regions are pixels in the rotated canvas, not the source
//! - Origin is top-left corner

mod crop;
mod rotation;
mod surface;

pub use crop::{apply_crop, CropRegion};
pub use rotation::{
    apply_rotation, compute_rotated_bounds, surface_size, Flip, InterpolationFilter,
};
pub use surface::{SurfaceLimits, TransformError};
