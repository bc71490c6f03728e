//! Lossy export of crop results.
//!
//! This module provides:
//! - JPEG encoding with configurable quality
//! - [`EncodedImage`], a MIME-tagged payload convertible to a data URL
//!
//! # Examples
//!
//! ```ignore
//! use addmath_core::encode::{encode_image, DEFAULT_JPEG_QUALITY};
//!
//! let encoded = encode_image(&cropped, DEFAULT_JPEG_QUALITY)?;
//! let preview_src = encoded.to_data_url();
//! ```

mod encoded;
mod jpeg;

pub use encoded::EncodedImage;
pub use jpeg::{encode_image, encode_jpeg, EncodeError, DEFAULT_JPEG_QUALITY};
