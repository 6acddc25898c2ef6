//! # Media Codec
//!
//! Encodes raster images into the text-safe payload stored in a record's
//! `imageBase64` field, and decodes such payloads back into images.
//!
//! ## Pipeline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Image Payload Pipeline                             │
//! │                                                                         │
//! │  encode:  DynamicImage ──PNG──► Vec<u8> ──base64──► String              │
//! │  decode:  String ──base64──► Vec<u8> ──PNG──► DynamicImage              │
//! │                                                                         │
//! │  PNG is lossless, so decode(encode(x)) reproduces x pixel for pixel.    │
//! │  Malformed payloads decode to None - never a panic, never an error      │
//! │  crossing this boundary.                                                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::io::Cursor;

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use image::{DynamicImage, ImageFormat};
use thiserror::Error;

/// Errors raised while encoding an image payload.
///
/// Decoding has no error type on purpose: a malformed payload is treated as
/// "no image" by every caller, so [`decode`] returns an `Option` instead.
#[derive(Debug, Error)]
pub enum MediaError {
    /// PNG compression failed.
    #[error("Failed to encode image: {0}")]
    Encode(#[from] image::ImageError),
}

/// Encodes a raster image into a text-safe payload.
///
/// The image is compressed as PNG and the compressed bytes are
/// base64-encoded. Deterministic: the same pixels always produce the same
/// payload.
pub fn encode(image: &DynamicImage) -> Result<String, MediaError> {
    let mut png = Vec::new();
    image.write_to(&mut Cursor::new(&mut png), ImageFormat::Png)?;
    Ok(STANDARD.encode(png))
}

/// Decodes a text payload back into a raster image.
///
/// Returns `None` on any malformed input - bad base64, truncated bytes, or
/// a payload that is not a decodable image. Payloads written by older
/// clients wrap the encoding in 76-column lines; ASCII whitespace is
/// stripped before decoding.
pub fn decode(payload: &str) -> Option<DynamicImage> {
    if payload.is_empty() {
        return None;
    }

    let compact: String = payload.split_ascii_whitespace().collect();
    let bytes = STANDARD.decode(compact).ok()?;
    image::load_from_memory(&bytes).ok()
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};

    fn test_image() -> DynamicImage {
        let mut img = RgbaImage::new(4, 3);
        for (x, y, pixel) in img.enumerate_pixels_mut() {
            *pixel = Rgba([x as u8 * 40, y as u8 * 60, 200, 255]);
        }
        DynamicImage::ImageRgba8(img)
    }

    #[test]
    fn test_round_trip_is_pixel_identical() {
        let original = test_image();

        let payload = encode(&original).unwrap();
        let decoded = decode(&payload).expect("payload should decode");

        assert_eq!(decoded.to_rgba8().as_raw(), original.to_rgba8().as_raw());
    }

    #[test]
    fn test_encode_is_deterministic() {
        let img = test_image();
        assert_eq!(encode(&img).unwrap(), encode(&img).unwrap());
    }

    #[test]
    fn test_decode_tolerates_line_wrapped_payloads() {
        let payload = encode(&test_image()).unwrap();

        // Re-wrap the payload the way older clients did.
        let wrapped: String = payload
            .as_bytes()
            .chunks(76)
            .map(|chunk| std::str::from_utf8(chunk).unwrap())
            .collect::<Vec<_>>()
            .join("\n");

        assert!(decode(&wrapped).is_some());
    }

    #[test]
    fn test_decode_rejects_malformed_input() {
        assert!(decode("").is_none());
        assert!(decode("not-base64!!!").is_none());

        // Valid base64, but not an image.
        let not_an_image = STANDARD.encode(b"plain text");
        assert!(decode(&not_an_image).is_none());
    }

    #[test]
    fn test_decode_rejects_truncated_payload() {
        let payload = encode(&test_image()).unwrap();
        let truncated = &payload[..payload.len() / 2];
        assert!(decode(truncated).is_none());
    }
}
