//! Image decoding WASM bindings.
//!
//! # Functions
//!
//! - [`decode_image`] - Decode JPEG or PNG bytes, honouring EXIF orientation
//! - [`decode_data_url`] - Decode the data URL a `FileReader` produced
//! - [`strip_mime_header`] - Base64 payload of a data URL
//!
//! # Example
//!
//! ```typescript
//! import { decode_data_url } from '@addmath/wasm';
//!
//! reader.onload = () => {
//!   const image = decode_data_url(reader.result as string);
//!   console.log(`Loaded ${image.width}x${image.height}`);
//! };
//! reader.readAsDataURL(file);
//! ```

use crate::types::JsDecodedImage;
use addmath_core::decode;
use wasm_bindgen::prelude::*;

/// Decode JPEG or PNG bytes into an upright RGB image.
///
/// # Errors
///
/// Returns an error if the format is not recognised or the data is corrupt.
#[wasm_bindgen]
pub fn decode_image(bytes: &[u8]) -> Result<JsDecodedImage, JsValue> {
    decode::decode_image(bytes)
        .map(JsDecodedImage::from_decoded)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Decode a `data:<mime>;base64,<payload>` URL.
#[wasm_bindgen]
pub fn decode_data_url(url: &str) -> Result<JsDecodedImage, JsValue> {
    decode::decode_data_url(url)
        .map(JsDecodedImage::from_decoded)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Everything after the first comma, or the input when there is none.
#[wasm_bindgen]
pub fn strip_mime_header(url: &str) -> String {
    decode::strip_mime_header(url).to_string()
}


#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_decode_invalid_bytes_is_error() {
        assert!(decode_image(&[0, 1, 2, 3]).is_err());
    }

    #[wasm_bindgen_test]
    fn test_decode_data_url_rejects_plain_text() {
        assert!(decode_data_url("not a data url").is_err());
    }
}
