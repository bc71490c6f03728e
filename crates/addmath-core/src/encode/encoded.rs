//! Self-contained encoded image payloads.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use crate::decode::{self, DecodeError, DecodedImage};

/// An encoded image plus its MIME tag.
///
/// Produced once per pipeline run and handed to the caller, which either
/// attaches it to a submission or shows it as a preview.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedImage {
    mime: String,
    bytes: Vec<u8>,
}

impl EncodedImage {
    pub fn new(mime: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            mime: mime.into(),
            bytes,
        }
    }

    pub fn jpeg(bytes: Vec<u8>) -> Self {
        Self::new("image/jpeg", bytes)
    }

    pub fn mime(&self) -> &str {
        &self.mime
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    /// Render as `data:<mime>;base64,<payload>`.
    pub fn to_data_url(&self) -> String {
        format!("data:{};base64,{}", self.mime, STANDARD.encode(&self.bytes))
    }

    /// Parse a base64 data URL back into a tagged payload.
    pub fn from_data_url(url: &str) -> Result<Self, DecodeError> {
        let parsed = decode::parse_data_url(url)?;
        let bytes = decode::data_url_bytes(url)?;
        Ok(Self::new(parsed.mime, bytes))
    }

    /// Decode the payload, e.g. to crop an earlier crop result again.
    pub fn decode(&self) -> Result<DecodedImage, DecodeError> {
        decode::decode_image(&self.bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_url_format() {
        let encoded = EncodedImage::jpeg(b"ABC".to_vec());
        assert_eq!(encoded.to_data_url(), "data:image/jpeg;base64,QUJD");
    }

    #[test]
    fn test_from_data_url_keeps_mime() {
        let encoded = EncodedImage::from_data_url("data:image/png;base64,QUJD").unwrap();
        assert_eq!(encoded.mime(), "image/png");
        assert_eq!(encoded.bytes(), b"ABC");
    }

    #[test]
    fn test_from_data_url_rejects_garbage() {
        assert!(EncodedImage::from_data_url("not a url").is_err());
    }

    #[test]
    fn test_decode_non_image_payload_fails() {
        let encoded = EncodedImage::jpeg(vec![1, 2, 3]);
        assert!(encoded.decode().is_err());
    }
}
