//! AddMath WASM - WebAssembly bindings for the AddMath tutor
//!
//! This crate exposes the addmath-core crop pipeline, crop session, state
//! store and solver request builder to the browser front-end.
//!
//! # Module Structure
//!
//! - `types` - WASM-compatible wrapper types for image data
//! - `decode` - Image and data URL decoding
//! - `encode` - JPEG export
//! - `transform` - The crop pipeline
//! - `session` - Crop modal state
//! - `store` - `localStorage` backed application state
//! - `solver` - Request building and answer recording
//!
//! # Usage
//!
//! ```typescript
//! import init, { crop_image, load_state } from '@addmath/wasm';
//!
//! await init();
//!
//! const state = load_state();
//! const cropped = crop_image(dataUrl, 40, 20, 300, 200, 0, false, false);
//! ```

use wasm_bindgen::prelude::*;

mod decode;
mod encode;
mod session;
mod solver;
mod store;
mod transform;
mod types;

pub use decode::{decode_data_url, decode_image, strip_mime_header};
pub use encode::{default_jpeg_quality, encode_data_url, encode_jpeg};
pub use session::JsCropSession;
pub use solver::{build_solve_request, record_solution};
pub use store::{
    admin_summary, dashboard_summary, load_state, sign_in, sign_out, submit_feedback,
    update_user, upgrade_to_premium, LocalStorageStore,
};
pub use transform::{crop_image, crop_image_with, render_crop, rotated_canvas_size};
pub use types::JsDecodedImage;

/// Initialize the WASM module (called automatically on load)
#[wasm_bindgen(start)]
pub fn init() {
    tracing::debug!(version = %version(), "addmath-wasm loaded");
}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    addmath_core::version().to_string()
}
