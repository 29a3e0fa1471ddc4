//! Image format resolution
//!
//! Maps file extensions and data URI prefixes onto the closed set of
//! supported codecs.

use image::ImageFormat;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// Codec selected for a decode or encode operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ImageFormatTag {
    Jpeg,
    Png,
    Bmp,
    Tiff,
    Gif,
    WebP,
    /// Extension or prefix did not map to any codec
    Unsupported,
}

/// Extension table; anything not listed resolves to `Unsupported`
const EXTENSION_TABLE: &[(&str, ImageFormatTag)] = &[
    ("jpg", ImageFormatTag::Jpeg),
    ("jpeg", ImageFormatTag::Jpeg),
    ("png", ImageFormatTag::Png),
    ("bmp", ImageFormatTag::Bmp),
    ("tiff", ImageFormatTag::Tiff),
    ("gif", ImageFormatTag::Gif),
    ("webp", ImageFormatTag::WebP),
];

const DATA_URI_IMAGE_PREFIX: &str = "data:image/";

impl ImageFormatTag {
    /// Every tag that maps to a codec, in data URI detection order
    pub const SUPPORTED: [Self; 6] = [
        Self::Jpeg,
        Self::Png,
        Self::Bmp,
        Self::Tiff,
        Self::Gif,
        Self::WebP,
    ];

    /// Resolve a file extension, with or without its leading `.`
    ///
    /// # Examples
    /// ```rust
    /// use bg_transparent::ImageFormatTag;
    ///
    /// assert_eq!(ImageFormatTag::from_extension("JPG"), ImageFormatTag::Jpeg);
    /// assert_eq!(ImageFormatTag::from_extension(".webp"), ImageFormatTag::WebP);
    /// assert_eq!(ImageFormatTag::from_extension("xyz"), ImageFormatTag::Unsupported);
    /// ```
    pub fn from_extension(extension: &str) -> Self {
        let normalized = extension.strip_prefix('.').unwrap_or(extension).to_lowercase();
        EXTENSION_TABLE
            .iter()
            .find(|(ext, _)| *ext == normalized)
            .map_or(Self::Unsupported, |&(_, tag)| tag)
    }

    /// Resolve the extension of `path` without touching the file system
    pub fn from_path<P: AsRef<Path>>(path: P) -> Self {
        path.as_ref()
            .extension()
            .and_then(|ext| ext.to_str())
            .map_or(Self::Unsupported, Self::from_extension)
    }

    /// Detect the format from a `data:image/<format>` prefix
    pub fn from_data_uri(text: &str) -> Self {
        let Some(rest) = text.strip_prefix(DATA_URI_IMAGE_PREFIX) else {
            return Self::Unsupported;
        };
        Self::SUPPORTED
            .into_iter()
            .find(|tag| rest.starts_with(tag.mime_subtype()))
            .unwrap_or(Self::Unsupported)
    }

    /// Subtype used in `image/<subtype>` MIME strings
    pub fn mime_subtype(self) -> &'static str {
        match self {
            Self::Jpeg => "jpeg",
            Self::Png => "png",
            Self::Bmp => "bmp",
            Self::Tiff => "tiff",
            Self::Gif => "gif",
            Self::WebP => "webp",
            Self::Unsupported => "unsupported",
        }
    }

    /// Codec in the `image` crate, if any
    pub fn image_format(self) -> Option<ImageFormat> {
        match self {
            Self::Jpeg => Some(ImageFormat::Jpeg),
            Self::Png => Some(ImageFormat::Png),
            Self::Bmp => Some(ImageFormat::Bmp),
            Self::Tiff => Some(ImageFormat::Tiff),
            Self::Gif => Some(ImageFormat::Gif),
            Self::WebP => Some(ImageFormat::WebP),
            Self::Unsupported => None,
        }
    }

    pub fn is_supported(self) -> bool {
        !matches!(self, Self::Unsupported)
    }

    /// Whether the data URI encoder accepts this format
    ///
    /// WebP is decode-only in the data URI path.
    pub fn supports_data_uri_encoding(self) -> bool {
        match self {
            Self::Jpeg | Self::Png | Self::Bmp | Self::Tiff | Self::Gif => true,
            Self::WebP | Self::Unsupported => false,
        }
    }
}

impl fmt::Display for ImageFormatTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.mime_subtype())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extension_table() {
        assert_eq!(ImageFormatTag::from_extension("jpg"), ImageFormatTag::Jpeg);
        assert_eq!(ImageFormatTag::from_extension("jpeg"), ImageFormatTag::Jpeg);
        assert_eq!(ImageFormatTag::from_extension("png"), ImageFormatTag::Png);
        assert_eq!(ImageFormatTag::from_extension("bmp"), ImageFormatTag::Bmp);
        assert_eq!(ImageFormatTag::from_extension("tiff"), ImageFormatTag::Tiff);
        assert_eq!(ImageFormatTag::from_extension("gif"), ImageFormatTag::Gif);
        assert_eq!(ImageFormatTag::from_extension("webp"), ImageFormatTag::WebP);
    }

    #[test]
    fn test_extension_case_and_separator() {
        assert_eq!(ImageFormatTag::from_extension("PNG"), ImageFormatTag::Png);
        assert_eq!(ImageFormatTag::from_extension("JpEg"), ImageFormatTag::Jpeg);
        assert_eq!(ImageFormatTag::from_extension(".gif"), ImageFormatTag::Gif);
    }

    #[test]
    fn test_unknown_extensions() {
        for ext in ["xyz", "", "tif", "svg", "jpgx", "..png"] {
            assert_eq!(
                ImageFormatTag::from_extension(ext),
                ImageFormatTag::Unsupported,
                "extension {ext:?}"
            );
        }
    }

    #[test]
    fn test_from_path() {
        assert_eq!(ImageFormatTag::from_path("red-jpg.jpg"), ImageFormatTag::Jpeg);
        assert_eq!(ImageFormatTag::from_path("dir/photo.Tiff"), ImageFormatTag::Tiff);
        assert_eq!(ImageFormatTag::from_path("archive.tar.png"), ImageFormatTag::Png);
        assert_eq!(ImageFormatTag::from_path("no_extension"), ImageFormatTag::Unsupported);
        assert_eq!(ImageFormatTag::from_path("image.xyz"), ImageFormatTag::Unsupported);
    }

    #[test]
    fn test_from_data_uri() {
        assert_eq!(
            ImageFormatTag::from_data_uri("data:image/png;base64,AAAA"),
            ImageFormatTag::Png
        );
        assert_eq!(
            ImageFormatTag::from_data_uri("data:image/jpeg;base64,"),
            ImageFormatTag::Jpeg
        );
        assert_eq!(
            ImageFormatTag::from_data_uri("data:image/webp;base64,"),
            ImageFormatTag::WebP
        );
        assert_eq!(
            ImageFormatTag::from_data_uri("data:image/tiff;base64,"),
            ImageFormatTag::Tiff
        );
        // Prefix must be at the start
        assert_eq!(
            ImageFormatTag::from_data_uri(" data:image/png;base64,"),
            ImageFormatTag::Unsupported
        );
        assert_eq!(
            ImageFormatTag::from_data_uri("data:image/jpg;base64,"),
            ImageFormatTag::Unsupported
        );
        assert_eq!(
            ImageFormatTag::from_data_uri("data:text/plain;base64,"),
            ImageFormatTag::Unsupported
        );
    }

    #[test]
    fn test_data_uri_encoding_capability() {
        assert!(ImageFormatTag::Png.supports_data_uri_encoding());
        assert!(ImageFormatTag::Gif.supports_data_uri_encoding());
        assert!(!ImageFormatTag::WebP.supports_data_uri_encoding());
        assert!(!ImageFormatTag::Unsupported.supports_data_uri_encoding());
    }

    #[test]
    fn test_image_format_mapping() {
        for tag in ImageFormatTag::SUPPORTED {
            assert!(tag.is_supported());
            assert!(tag.image_format().is_some());
        }
        assert_eq!(ImageFormatTag::Unsupported.image_format(), None);
        assert!(!ImageFormatTag::Unsupported.is_supported());
    }

    #[test]
    fn test_display() {
        assert_eq!(ImageFormatTag::Jpeg.to_string(), "jpeg");
        assert_eq!(ImageFormatTag::Unsupported.to_string(), "unsupported");
    }
}
