//! WASM bindings for the crop pipeline.
//!
//! The editor confirms a crop by handing its data URL, region and transform
//! to [`crop_image`]; the returned data URL replaces the preview and is what
//! gets uploaded.

use crate::types::{filter_from_flag, flip_from_flags, JsDecodedImage};
use addmath_core::pipeline::{self, CropParams};
use addmath_core::transform::{compute_rotated_bounds, surface_size, CropRegion};
use addmath_core::PipelineConfig;
use wasm_bindgen::prelude::*;

/// Crop a data URL image and return the result as a JPEG data URL.
///
/// `x`, `y`, `width` and `height` are pixels in the rotated canvas.
/// `rotation` is in degrees, positive = clockwise.
///
/// # Example (TypeScript)
///
/// ```typescript
/// const cropped = crop_image(imageSrc, area.x, area.y, area.width, area.height,
///                            rotation, flip.horizontal, flip.vertical);
/// setImage(cropped);
/// ```
#[allow(clippy::too_many_arguments)]
#[wasm_bindgen]
pub fn crop_image(
    data_url: &str,
    x: i32,
    y: i32,
    width: u32,
    height: u32,
    rotation: f64,
    flip_horizontal: bool,
    flip_vertical: bool,
) -> Result<String, JsValue> {
    let params = CropParams {
        region: CropRegion::new(x, y, width, height),
        rotation,
        flip: flip_from_flags(flip_horizontal, flip_vertical),
    };
    pipeline::crop_data_url(data_url, &params, &PipelineConfig::default())
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Crop with `params` (`{region, rotation?, flip?}`) and an optional
/// pipeline config object. `undefined` config uses the defaults.
#[wasm_bindgen]
pub fn crop_image_with(
    data_url: &str,
    params: JsValue,
    config: JsValue,
) -> Result<String, JsValue> {
    let params: CropParams = serde_wasm_bindgen::from_value(params)
        .map_err(|e| JsValue::from_str(&format!("Invalid crop params: {}", e)))?;
    let config: PipelineConfig = if config.is_undefined() || config.is_null() {
        PipelineConfig::default()
    } else {
        serde_wasm_bindgen::from_value(config)
            .map_err(|e| JsValue::from_str(&format!("Invalid pipeline config: {}", e)))?
    };
    config
        .validate()
        .map_err(|e| JsValue::from_str(&e.to_string()))?;

    pipeline::crop_data_url(data_url, &params, &config)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Render a crop preview without encoding.
#[allow(clippy::too_many_arguments)]
#[wasm_bindgen]
pub fn render_crop(
    image: &JsDecodedImage,
    x: i32,
    y: i32,
    width: u32,
    height: u32,
    rotation: f64,
    flip_horizontal: bool,
    flip_vertical: bool,
    use_lanczos: bool,
) -> Result<JsDecodedImage, JsValue> {
    let params = CropParams {
        region: CropRegion::new(x, y, width, height),
        rotation,
        flip: flip_from_flags(flip_horizontal, flip_vertical),
    };
    let mut config = PipelineConfig::default();
    config.filter = filter_from_flag(use_lanczos);

    pipeline::render(&image.to_decoded(), &params, &config)
        .map(JsDecodedImage::from_decoded)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Pixel size `[width, height]` of the canvas a `width` x `height` image
/// occupies after rotating by `rotation` degrees.
#[wasm_bindgen]
pub fn rotated_canvas_size(width: u32, height: u32, rotation: f64) -> Vec<u32> {
    let (w, h) = surface_size(compute_rotated_bounds(width as f64, height as f64, rotation));
    vec![w, h]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_image(width: u32, height: u32) -> JsDecodedImage {
        let pixels: Vec<u8> = (0..(width * height * 3) as usize)
            .map(|i| (i % 256) as u8)
            .collect();
        JsDecodedImage::new(width, height, pixels)
    }

    fn core_render(img: &JsDecodedImage, region: CropRegion, rotation: f64) -> JsDecodedImage {
        let params = CropParams {
            region,
            rotation,
            flip: flip_from_flags(false, false),
        };
        let config = PipelineConfig::default();
        let out = pipeline::render(&img.to_decoded(), &params, &config).unwrap();
        JsDecodedImage::from_decoded(out)
    }

    #[test]
    fn test_rotated_canvas_size() {
        assert_eq!(rotated_canvas_size(100, 50, 0.0), vec![100, 50]);
        assert_eq!(rotated_canvas_size(100, 50, 90.0), vec![50, 100]);
        assert_eq!(rotated_canvas_size(100, 100, 45.0), vec![141, 141]);
    }

    #[test]
    fn test_full_region_no_rotation() {
        let img = test_image(100, 100);
        let result = core_render(&img, CropRegion::full(100, 100), 0.0);
        assert_eq!(result.pixels(), img.pixels());
    }

    #[test]
    fn test_region_after_quarter_turn() {
        let img = test_image(200, 100);
        let result = core_render(&img, CropRegion::new(0, 0, 100, 150), 90.0);
        assert_eq!((result.width(), result.height()), (100, 150));
    }
}
