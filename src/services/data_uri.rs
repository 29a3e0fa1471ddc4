//! Base64 data URI round-trip
//!
//! Serializes a decoded image to `data:image/<format>;base64,<payload>` and
//! parses such strings back into images.

use crate::{
    error::{Result, TransparencyError},
    services::{codec::CodecService, format::ImageFormatTag},
};
use base64::{engine::general_purpose, Engine as _};
use image::DynamicImage;
use tracing::instrument;

const BASE64_MARKER: &str = "base64,";

/// Encode `image` as a data URI using the codec named by `tag`
///
/// # Errors
/// - `UnsupportedEncodeFormat` for WebP and `Unsupported`; WebP is
///   decode-only in this direction
/// - `Encode` if the codec fails
///
/// # Examples
/// ```rust
/// use bg_transparent::{encode_to_data_uri, ImageFormatTag};
/// use image::{DynamicImage, Rgba, RgbaImage};
///
/// let image = DynamicImage::ImageRgba8(RgbaImage::from_pixel(1, 1, Rgba([255, 255, 255, 255])));
/// let uri = encode_to_data_uri(&image, ImageFormatTag::Png)?;
/// assert!(uri.starts_with("data:image/png;base64,"));
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn encode_to_data_uri(image: &DynamicImage, tag: ImageFormatTag) -> Result<String> {
    if !tag.supports_data_uri_encoding() {
        return Err(TransparencyError::UnsupportedEncodeFormat(format!(
            "image type {} is not supported",
            tag
        )));
    }

    let bytes = CodecService::encode(tag, image)?;
    Ok(format!(
        "data:image/{};{}{}",
        tag.mime_subtype(),
        BASE64_MARKER,
        general_purpose::STANDARD.encode(bytes)
    ))
}

/// Decode a data URI produced by [`encode_to_data_uri`] or any other source
///
/// The codec is chosen from the `data:image/<format>` prefix. When no known
/// prefix matches, the payload is decoded with content sniffing instead of
/// failing. Only the text after the first `base64,` marker is base64-decoded,
/// ignoring line breaks; without a marker the raw bytes are handed to the
/// decoder.
///
/// # Errors
/// - `Base64Decode` on a malformed payload
/// - `Decode` if the codec rejects the decoded bytes
#[instrument(level = "debug", skip_all, fields(len = text.len()))]
pub fn decode_from_data_uri(text: &str) -> Result<DynamicImage> {
    let tag = ImageFormatTag::from_data_uri(text);

    let payload = match text.find(BASE64_MARKER) {
        Some(idx) => {
            // Line-wrapped payloads are accepted; CR and LF are skipped.
            let encoded: Vec<u8> = text[idx + BASE64_MARKER.len()..]
                .bytes()
                .filter(|b| !matches!(b, b'\r' | b'\n'))
                .collect();
            general_purpose::STANDARD
                .decode(encoded)
                .map_err(|e| TransparencyError::Base64Decode(e.to_string()))?
        },
        None => text.as_bytes().to_vec(),
    };

    if tag.is_supported() {
        CodecService::decode_bytes(tag, &payload)
    } else {
        log::debug!("No known data URI prefix, attempting content-based detection");
        CodecService::decode_auto(&payload)
    }
}

/// Encode `image` to a data URI and decode it back
pub fn round_trip(image: &DynamicImage, tag: ImageFormatTag) -> Result<DynamicImage> {
    let encoded = encode_to_data_uri(image, tag)?;
    tracing::debug!(format = %tag, uri_len = encoded.len(), "Encoded image to data URI");
    decode_from_data_uri(&encoded)
}
