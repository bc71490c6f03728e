//! WASM wrapper for the crop editing session.

use addmath_core::session::{AspectConstraint, CropSession as CoreSession};
use addmath_core::transform::CropRegion;
use wasm_bindgen::prelude::*;

use crate::types::flip_from_flags;

/// Zoom, rotation, aspect and flip state of the crop modal.
///
/// # Example (TypeScript)
///
/// ```typescript
/// const session = new CropSession(image.width, image.height);
/// session.zoom_in();
/// session.set_aspect(1.0);            // 1:1 frame
/// session.set_region(x, y, w, h);     // from the drag handles
/// const params = session.params();    // pass to crop_image_with
/// ```
#[wasm_bindgen(js_name = CropSession)]
pub struct JsCropSession {
    inner: CoreSession,
}

#[wasm_bindgen(js_class = CropSession)]
impl JsCropSession {
    #[wasm_bindgen(constructor)]
    pub fn new(source_width: u32, source_height: u32) -> JsCropSession {
        Self {
            inner: CoreSession::new(source_width, source_height),
        }
    }

    #[wasm_bindgen(getter)]
    pub fn zoom(&self) -> f64 {
        self.inner.zoom()
    }

    #[wasm_bindgen(setter)]
    pub fn set_zoom(&mut self, zoom: f64) {
        self.inner.set_zoom(zoom);
    }

    pub fn zoom_in(&mut self) {
        self.inner.zoom_in();
    }

    pub fn zoom_out(&mut self) {
        self.inner.zoom_out();
    }

    #[wasm_bindgen(getter)]
    pub fn rotation(&self) -> f64 {
        self.inner.rotation()
    }

    #[wasm_bindgen(setter)]
    pub fn set_rotation(&mut self, degrees: f64) {
        self.inner.set_rotation(degrees);
    }

    /// Width / height ratio to enforce; `0` (or any non-positive value)
    /// frees the aspect.
    pub fn set_aspect(&mut self, ratio: f64) {
        let aspect = if ratio > 0.0 {
            AspectConstraint::Fixed(ratio)
        } else {
            AspectConstraint::Free
        };
        self.inner.set_aspect(aspect);
    }

    /// Current ratio, or `undefined` when free.
    pub fn aspect(&self) -> Option<f64> {
        self.inner.aspect().ratio()
    }

    pub fn set_flip(&mut self, horizontal: bool, vertical: bool) {
        self.inner.set_flip(flip_from_flags(horizontal, vertical));
    }

    pub fn set_region(&mut self, x: i32, y: i32, width: u32, height: u32) {
        self.inner.set_region(CropRegion::new(x, y, width, height));
    }

    /// Current region as `[x, y, width, height]`.
    pub fn region(&self) -> Vec<i32> {
        let r = self.inner.region();
        vec![r.x, r.y, r.width as i32, r.height as i32]
    }

    /// Rotated canvas size as `[width, height]`.
    pub fn canvas_size(&self) -> Vec<u32> {
        let (w, h) = self.inner.canvas_size();
        vec![w, h]
    }

    pub fn reset(&mut self) {
        self.inner.reset();
    }

    /// Crop parameters object for `crop_image_with`.
    pub fn params(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self.inner.params())
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }
}


#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use addmath_core::pipeline::CropParams;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_params_round_trip_through_js() {
        let mut session = JsCropSession::new(64, 48);
        session.set_flip(true, false);
        let js = session.params().unwrap();

        let params: CropParams = serde_wasm_bindgen::from_value(js).unwrap();
        assert!(params.flip.horizontal);
        assert_eq!(params.region, CropRegion::full(64, 48));
    }
}
