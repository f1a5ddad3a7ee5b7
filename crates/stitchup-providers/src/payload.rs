//! Binary payload encoding for provider submissions.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;

/// Detect the MIME type of image bytes by inspecting the magic bytes.
///
/// PNG signatures start `0x89 0x50 0x4E`; everything else defaults to JPEG.
pub fn detect_mime(data: &[u8]) -> &'static str {
    if data.len() > 2 && data[0] == 0x89 && data[1] == 0x50 && data[2] == 0x4E {
        "image/png"
    } else {
        "image/jpeg"
    }
}

/// Encode image bytes as a base64 data-URI with the detected MIME prefix.
pub fn image_data_uri(data: &[u8]) -> String {
    format!("data:{};base64,{}", detect_mime(data), BASE64.encode(data))
}

/// Encode image bytes as plain base64 (no data-URI wrapper).
pub fn base64_encode(data: &[u8]) -> String {
    BASE64.encode(data)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_mime_png_signature() {
        let png = [0x89u8, 0x50, 0x4E, 0x47, 0x0D, 0x0A];
        assert_eq!(detect_mime(&png), "image/png");
    }

    #[test]
    fn test_detect_mime_defaults_to_jpeg() {
        assert_eq!(detect_mime(&[0xFF, 0xD8, 0xFF]), "image/jpeg");
        assert_eq!(detect_mime(&[]), "image/jpeg");
    }

    #[test]
    fn test_image_data_uri_prefix() {
        let png = [0x89u8, 0x50, 0x4E, 0x47];
        let uri = image_data_uri(&png);
        assert!(uri.starts_with("data:image/png;base64,"));

        let jpeg = [0xFFu8, 0xD8];
        let uri = image_data_uri(&jpeg);
        assert!(uri.starts_with("data:image/jpeg;base64,"));
    }
}
