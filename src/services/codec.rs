//! Uniform decode/encode across the supported codecs

use crate::{
    error::{Result, TransparencyError},
    services::format::ImageFormatTag,
};
use image::{buffer::ConvertBuffer, DynamicImage, ImageFormat, ImageReader, RgbImage, RgbaImage};
use std::io::{BufRead, Cursor, Seek};

/// Service dispatching decode and encode calls on an [`ImageFormatTag`]
pub struct CodecService;

impl CodecService {
    /// Decode an image with the codec named by `tag`
    ///
    /// The decoder is pinned to `tag`; the content is not sniffed.
    ///
    /// # Errors
    /// - `UnsupportedFormat` if `tag` is `Unsupported`
    /// - `Decode` if the codec rejects the data
    pub fn decode<R: BufRead + Seek>(tag: ImageFormatTag, reader: R) -> Result<DynamicImage> {
        let format = Self::codec_for(tag)?;
        ImageReader::with_format(reader, format)
            .decode()
            .map_err(|e| TransparencyError::decode_error(tag, e))
    }

    /// Decode an in-memory buffer with the codec named by `tag`
    pub fn decode_bytes(tag: ImageFormatTag, bytes: &[u8]) -> Result<DynamicImage> {
        Self::decode(tag, Cursor::new(bytes))
    }

    /// Decode an in-memory buffer, guessing the codec from its content
    pub fn decode_auto(bytes: &[u8]) -> Result<DynamicImage> {
        image::load_from_memory(bytes)
            .map_err(|e| TransparencyError::decode_error("auto-detected", e))
    }

    /// Encode an image with the codec named by `tag`
    ///
    /// # Errors
    /// - `UnsupportedFormat` if `tag` is `Unsupported`
    /// - `Encode` if the codec fails
    pub fn encode(tag: ImageFormatTag, image: &DynamicImage) -> Result<Vec<u8>> {
        match image {
            DynamicImage::ImageRgba8(rgba) => Self::encode_rgba(tag, rgba),
            other => Self::encode_rgba(tag, &other.to_rgba8()),
        }
    }

    /// Encode an RGBA8 buffer with the codec named by `tag`
    ///
    /// JPEG has no alpha channel, so the buffer is flattened to RGB8 first.
    /// Every other codec receives RGBA8.
    pub fn encode_rgba(tag: ImageFormatTag, image: &RgbaImage) -> Result<Vec<u8>> {
        let format = Self::codec_for(tag)?;
        let mut cursor = Cursor::new(Vec::new());

        let result = match tag {
            ImageFormatTag::Jpeg => {
                let rgb: RgbImage = image.convert();
                rgb.write_to(&mut cursor, format)
            },
            _ => image.write_to(&mut cursor, format),
        };
        result.map_err(|e| TransparencyError::encode_error(tag, e))?;

        let bytes = cursor.into_inner();
        log::debug!("Encoded {} image ({} bytes)", tag, bytes.len());
        Ok(bytes)
    }

    fn codec_for(tag: ImageFormatTag) -> Result<ImageFormat> {
        tag.image_format()
            .ok_or_else(|| TransparencyError::unsupported_format(tag.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    fn sample_image() -> DynamicImage {
        let mut img = RgbaImage::from_pixel(4, 3, Rgba([255, 255, 255, 255]));
        img.put_pixel(2, 1, Rgba([0, 0, 255, 255]));
        DynamicImage::ImageRgba8(img)
    }

    #[test]
    fn test_png_encode_decode_lossless() {
        let image = sample_image();
        let bytes = CodecService::encode(ImageFormatTag::Png, &image).unwrap();
        let decoded = CodecService::decode_bytes(ImageFormatTag::Png, &bytes).unwrap();
        assert_eq!(decoded.to_rgba8(), image.to_rgba8());
    }

    #[test]
    fn test_lossless_codecs_preserve_pixels() {
        let image = sample_image();
        for tag in [ImageFormatTag::Bmp, ImageFormatTag::Tiff] {
            let bytes = CodecService::encode(tag, &image).unwrap();
            let decoded = CodecService::decode_bytes(tag, &bytes).unwrap();
            assert_eq!(decoded.to_rgba8(), image.to_rgba8(), "codec {tag}");
        }
    }

    #[test]
    fn test_lossy_codecs_preserve_dimensions() {
        let image = sample_image();
        for tag in [ImageFormatTag::Jpeg, ImageFormatTag::Gif] {
            let bytes = CodecService::encode(tag, &image).unwrap();
            let decoded = CodecService::decode_bytes(tag, &bytes).unwrap();
            assert_eq!(decoded.width(), 4, "codec {tag}");
            assert_eq!(decoded.height(), 3, "codec {tag}");
        }
    }

    #[test]
    fn test_unsupported_tag_rejected() {
        let image = sample_image();
        assert!(matches!(
            CodecService::encode(ImageFormatTag::Unsupported, &image),
            Err(TransparencyError::UnsupportedFormat(_))
        ));
        assert!(matches!(
            CodecService::decode_bytes(ImageFormatTag::Unsupported, b"anything"),
            Err(TransparencyError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn test_decode_is_pinned_to_tag() {
        let png = CodecService::encode(ImageFormatTag::Png, &sample_image()).unwrap();
        let err = CodecService::decode_bytes(ImageFormatTag::Jpeg, &png).unwrap_err();
        assert!(matches!(err, TransparencyError::Decode(_)));
        assert!(err.to_string().contains("jpeg"));
    }

    #[test]
    fn test_decode_auto_sniffs_content() {
        let png = CodecService::encode(ImageFormatTag::Png, &sample_image()).unwrap();
        let decoded = CodecService::decode_auto(&png).unwrap();
        assert_eq!(decoded.to_rgba8(), sample_image().to_rgba8());

        assert!(matches!(
            CodecService::decode_auto(b"not an image"),
            Err(TransparencyError::Decode(_))
        ));
    }

    #[test]
    fn test_corrupt_data_is_decode_error() {
        for tag in ImageFormatTag::SUPPORTED {
            let result = CodecService::decode_bytes(tag, &[0u8; 16]);
            assert!(
                matches!(result, Err(TransparencyError::Decode(_))),
                "codec {tag}"
            );
        }
    }
}
