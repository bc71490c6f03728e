//! Image encoding WASM bindings.
//!
//! # Functions
//!
//! - [`encode_jpeg`] - Encode a JsDecodedImage to JPEG bytes
//! - [`encode_data_url`] - Encode a JsDecodedImage to a JPEG data URL
//!
//! # Example
//!
//! ```typescript
//! import { encode_data_url } from '@addmath/wasm';
//!
//! previewImg.src = encode_data_url(image, 92);
//! ```

use crate::types::JsDecodedImage;
use addmath_core::encode;
use wasm_bindgen::prelude::*;

/// Encode an image to JPEG bytes.
///
/// # Errors
///
/// Returns an error if the pixel buffer does not match the dimensions or
/// either dimension is zero.
#[wasm_bindgen]
pub fn encode_jpeg(image: &JsDecodedImage, quality: u8) -> Result<Vec<u8>, JsValue> {
    let pixels = image.pixels();
    encode::encode_jpeg(&pixels, image.width(), image.height(), quality)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Encode an image to a `data:image/jpeg;base64,...` URL.
#[wasm_bindgen]
pub fn encode_data_url(image: &JsDecodedImage, quality: u8) -> Result<String, JsValue> {
    encode::encode_image(&image.to_decoded(), quality)
        .map(|encoded| encoded.to_data_url())
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Default JPEG quality used for crop exports.
#[wasm_bindgen]
pub fn default_jpeg_quality() -> u8 {
    encode::DEFAULT_JPEG_QUALITY
}


#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_encode_jpeg_magic() {
        let img = JsDecodedImage::new(4, 4, vec![10u8; 4 * 4 * 3]);
        let bytes = encode_jpeg(&img, 90).unwrap();
        assert_eq!(&bytes[0..2], &[0xFF, 0xD8]);
    }

    #[wasm_bindgen_test]
    fn test_encode_mismatched_buffer_fails() {
        let img = JsDecodedImage::new(4, 4, vec![10u8; 5]);
        assert!(encode_data_url(&img, 90).is_err());
    }
}
