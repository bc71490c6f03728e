//! `data:` URL parsing.
//!
//! The front-end keeps every image it handles (fresh uploads, crop results,
//! submitted problems) as a base64 data URL, e.g.
//! `data:image/jpeg;base64,/9j/4AAQ...`.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use super::{decode_image, DecodeError, DecodedImage};

/// The pieces of a base64 `data:` URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataUrl<'a> {
    /// MIME type declared in the header, e.g. `image/png`.
    pub mime: &'a str,
    /// Base64 payload after the first comma.
    pub payload: &'a str,
}

/// Split a data URL into its MIME type and base64 payload.
///
/// Only base64 data URLs are accepted since that is what `FileReader` and
/// `canvas.toDataURL` produce.
pub fn parse_data_url(url: &str) -> Result<DataUrl<'_>, DecodeError> {
    let rest = url
        .strip_prefix("data:")
        .ok_or_else(|| DecodeError::InvalidDataUrl("missing data: scheme".to_string()))?;
    let (header, payload) = rest
        .split_once(',')
        .ok_or_else(|| DecodeError::InvalidDataUrl("missing comma separator".to_string()))?;
    let mime = header
        .strip_suffix(";base64")
        .ok_or_else(|| DecodeError::InvalidDataUrl("payload is not base64".to_string()))?;

    Ok(DataUrl { mime, payload })
}

/// Strip the `data:<mime>;base64,` header, returning only the payload.
///
/// Strings without a comma are returned unchanged.
pub fn strip_mime_header(url: &str) -> &str {
    url.split_once(',').map_or(url, |(_, payload)| payload)
}

/// Decode the raw bytes carried by a base64 data URL.
pub fn data_url_bytes(url: &str) -> Result<Vec<u8>, DecodeError> {
    let parsed = parse_data_url(url)?;
    STANDARD
        .decode(parsed.payload.trim())
        .map_err(|e| DecodeError::InvalidBase64(e.to_string()))
}

/// Decode an image carried in a base64 data URL.
pub fn decode_data_url(url: &str) -> Result<DecodedImage, DecodeError> {
    let bytes = data_url_bytes(url)?;
    decode_image(&bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_jpeg_data_url() {
        let parsed = parse_data_url("data:image/jpeg;base64,AAAA").unwrap();
        assert_eq!(parsed.mime, "image/jpeg");
        assert_eq!(parsed.payload, "AAAA");
    }

    #[test]
    fn test_parse_rejects_missing_scheme() {
        let result = parse_data_url("image/jpeg;base64,AAAA");
        assert!(matches!(result, Err(DecodeError::InvalidDataUrl(_))));
    }

    #[test]
    fn test_parse_rejects_non_base64() {
        let result = parse_data_url("data:text/plain,hello");
        assert!(matches!(result, Err(DecodeError::InvalidDataUrl(_))));
    }

    #[test]
    fn test_parse_rejects_missing_comma() {
        let result = parse_data_url("data:image/png;base64");
        assert!(matches!(result, Err(DecodeError::InvalidDataUrl(_))));
    }

    #[test]
    fn test_strip_mime_header() {
        assert_eq!(strip_mime_header("data:image/jpeg;base64,QUJD"), "QUJD");
        assert_eq!(strip_mime_header("QUJD"), "QUJD");
    }

    #[test]
    fn test_data_url_bytes() {
        let bytes = data_url_bytes("data:application/octet-stream;base64,QUJD").unwrap();
        assert_eq!(bytes, b"ABC");
    }

    #[test]
    fn test_invalid_base64_payload() {
        let result = data_url_bytes("data:image/png;base64,@@@");
        assert!(matches!(result, Err(DecodeError::InvalidBase64(_))));
    }

    #[test]
    fn test_decode_data_url_rejects_non_image() {
        let result = decode_data_url("data:image/png;base64,QUJD");
        assert!(matches!(result, Err(DecodeError::InvalidFormat)));
    }
}
