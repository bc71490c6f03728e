//! Image decoding for the crop pipeline.
//!
//! This module provides:
//! - Decoding JPEG and PNG bytes into an upright RGB raster
//! - Parsing the base64 data URLs the front-end passes around
//!
//! Decoding always completes before any transform work begins, so a bad
//! upload is rejected with a [`DecodeError`] and never reaches the pipeline.
//!
//! # Examples
//!
//! ```ignore
//! use addmath_core::decode::decode_data_url;
//!
//! let image = decode_data_url(&upload_data_url)?;
//! println!("Decoded {}x{} image", image.width, image.height);
//! ```

mod data_url;
mod source;
mod types;

pub use data_url::{data_url_bytes, decode_data_url, parse_data_url, strip_mime_header, DataUrl};
pub use source::decode_image;
pub use types::{DecodeError, DecodedImage, Orientation};
