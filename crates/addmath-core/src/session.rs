//! Crop editing session state.
//!
//! A session holds only the parameters of one select/adjust/confirm episode.
//! It never caches rendered surfaces; confirming a crop hands
//! [`CropSession::params`] to the pipeline, which does all drawing from
//! scratch. Re-cropping an earlier result starts a new session from it.

use serde::{Deserialize, Serialize};

use crate::pipeline::CropParams;
use crate::transform::{compute_rotated_bounds, surface_size, CropRegion, Flip};

pub const MIN_ZOOM: f64 = 1.0;
pub const MAX_ZOOM: f64 = 3.0;
pub const ZOOM_STEP: f64 = 0.2;
pub const MAX_ROTATION: f64 = 360.0;

/// Aspect ratio (width / height) enforced while the region is dragged.
///
/// The pipeline never checks it; it only shapes the regions a session
/// produces.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", content = "ratio", rename_all = "lowercase")]
pub enum AspectConstraint {
    #[default]
    Free,
    Fixed(f64),
}

impl AspectConstraint {
    pub const SQUARE: AspectConstraint = AspectConstraint::Fixed(1.0);
    pub const FOUR_THREE: AspectConstraint = AspectConstraint::Fixed(4.0 / 3.0);
    pub const SIXTEEN_NINE: AspectConstraint = AspectConstraint::Fixed(16.0 / 9.0);

    /// Frame shapes offered by the editor.
    pub const PRESETS: [AspectConstraint; 4] = [
        AspectConstraint::Free,
        AspectConstraint::SQUARE,
        AspectConstraint::FOUR_THREE,
        AspectConstraint::SIXTEEN_NINE,
    ];

    pub fn ratio(self) -> Option<f64> {
        match self {
            AspectConstraint::Fixed(r) if r.is_finite() && r > 0.0 => Some(r),
            _ => None,
        }
    }
}

/// Largest region with the given aspect, shrunk by `zoom`, centred in a
/// `width` x `height` canvas.
pub fn fit_region(width: u32, height: u32, aspect: AspectConstraint, zoom: f64) -> CropRegion {
    let (w, h) = (width as f64, height as f64);
    let (fit_w, fit_h) = match aspect.ratio() {
        Some(r) if w / h > r => (h * r, h),
        Some(r) => (w, w / r),
        None => (w, h),
    };

    let zoom = zoom.clamp(MIN_ZOOM, MAX_ZOOM);
    let region_w = ((fit_w / zoom).round() as u32).clamp(1, width.max(1));
    let region_h = ((fit_h / zoom).round() as u32).clamp(1, height.max(1));

    CropRegion::new(
        (width.saturating_sub(region_w) / 2) as i32,
        (height.saturating_sub(region_h) / 2) as i32,
        region_w,
        region_h,
    )
}

/// Parameters of one crop editing episode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CropSession {
    source_width: u32,
    source_height: u32,
    zoom: f64,
    rotation: f64,
    aspect: AspectConstraint,
    flip: Flip,
    /// Region last reported by the selection UI; `None` means centred default.
    region: Option<CropRegion>,
}

impl CropSession {
    /// Start a session for a `width` x `height` source.
    pub fn new(source_width: u32, source_height: u32) -> Self {
        Self {
            source_width,
            source_height,
            zoom: MIN_ZOOM,
            rotation: 0.0,
            aspect: AspectConstraint::Free,
            flip: Flip::NONE,
            region: None,
        }
    }

    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    pub fn rotation(&self) -> f64 {
        self.rotation
    }

    pub fn aspect(&self) -> AspectConstraint {
        self.aspect
    }

    pub fn flip(&self) -> Flip {
        self.flip
    }

    pub fn set_zoom(&mut self, zoom: f64) {
        let zoom = if zoom.is_finite() { zoom } else { MIN_ZOOM };
        self.zoom = zoom.clamp(MIN_ZOOM, MAX_ZOOM);
        self.region = None;
    }

    pub fn zoom_in(&mut self) {
        self.set_zoom(self.zoom + ZOOM_STEP);
    }

    pub fn zoom_out(&mut self) {
        self.set_zoom(self.zoom - ZOOM_STEP);
    }

    /// Set rotation in degrees, clamped to the slider range `[0, 360]`.
    pub fn set_rotation(&mut self, degrees: f64) {
        let degrees = if degrees.is_finite() { degrees } else { 0.0 };
        self.rotation = degrees.clamp(0.0, MAX_ROTATION);
        self.region = None;
    }

    pub fn set_aspect(&mut self, aspect: AspectConstraint) {
        self.aspect = aspect;
        self.region = None;
    }

    pub fn set_flip(&mut self, flip: Flip) {
        self.flip = flip;
    }

    /// Record the region reported by the selection UI.
    pub fn set_region(&mut self, region: CropRegion) {
        self.region = Some(region);
    }

    /// Back to zoom 1, no rotation and a centred region.
    pub fn reset(&mut self) {
        self.zoom = MIN_ZOOM;
        self.rotation = 0.0;
        self.region = None;
    }

    /// Pixel size of the rotated canvas regions are measured against.
    pub fn canvas_size(&self) -> (u32, u32) {
        surface_size(compute_rotated_bounds(
            self.source_width as f64,
            self.source_height as f64,
            self.rotation,
        ))
    }

    /// Current region, or the centred default for the current settings.
    pub fn region(&self) -> CropRegion {
        self.region.unwrap_or_else(|| {
            let (width, height) = self.canvas_size();
            fit_region(width, height, self.aspect, self.zoom)
        })
    }

    /// Parameters to hand to the pipeline on confirm.
    pub fn params(&self) -> CropParams {
        CropParams {
            region: self.region(),
            rotation: self.rotation,
            flip: self.flip,
        }
    }
}
