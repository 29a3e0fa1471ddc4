//! Image file I/O
//!
//! Keeps file system side effects out of the transform and codec code.

use crate::{
    error::{Result, TransparencyError},
    services::{codec::CodecService, format::ImageFormatTag},
};
use image::{DynamicImage, RgbaImage};
use std::fs::File;
use std::io::{BufReader, Write};
use std::path::Path;

/// Service for image file input/output operations
pub struct ImageIOService;

impl ImageIOService {
    /// Load an image from a file path with the codec resolved from its extension
    ///
    /// The extension is checked before the file is opened, so an unsupported
    /// extension fails even if the file does not exist.
    ///
    /// # Examples
    /// ```rust,no_run
    /// use bg_transparent::services::ImageIOService;
    ///
    /// let (image, format) = ImageIOService::load_image("input.jpg")?;
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn load_image<P: AsRef<Path>>(path: P) -> Result<(DynamicImage, ImageFormatTag)> {
        let path_ref = path.as_ref();
        let tag = ImageFormatTag::from_path(path_ref);
        let image = Self::load_image_as(path_ref, tag)?;
        Ok((image, tag))
    }

    /// Load an image from a file path with an explicit codec
    pub fn load_image_as<P: AsRef<Path>>(path: P, tag: ImageFormatTag) -> Result<DynamicImage> {
        let path_ref = path.as_ref();

        if !tag.is_supported() {
            return Err(TransparencyError::unsupported_format(format!(
                "error when loading image '{}': unsupported type '{}'",
                path_ref.display(),
                tag
            )));
        }

        let file = File::open(path_ref)
            .map_err(|e| TransparencyError::file_io_error("open image file", path_ref, &e))?;

        log::debug!("Decoding {} as {}", path_ref.display(), tag);
        CodecService::decode(tag, BufReader::new(file)).map_err(|e| match e {
            TransparencyError::Decode(msg) => TransparencyError::Decode(format!(
                "error when decoding image from file '{}': {}",
                path_ref.display(),
                msg
            )),
            other => other,
        })
    }

    /// Write bytes to `path`, deleting any existing file first
    ///
    /// The replacement is delete-then-create, not an atomic rename. Missing
    /// parent directories are created.
    pub fn write_overwriting<P: AsRef<Path>>(path: P, bytes: &[u8]) -> Result<()> {
        let path_ref = path.as_ref();

        if let Some(parent) = path_ref.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| {
                TransparencyError::file_io_error("create output directory", parent, &e)
            })?;
        }

        if path_ref.exists() {
            log::debug!("Removing existing output file {}", path_ref.display());
            std::fs::remove_file(path_ref)
                .map_err(|e| TransparencyError::file_io_error("delete file", path_ref, &e))?;
        }

        let mut file = File::create(path_ref)
            .map_err(|e| TransparencyError::file_io_error("create file", path_ref, &e))?;
        file.write_all(bytes)
            .map_err(|e| TransparencyError::file_io_error("write file", path_ref, &e))?;
        Ok(())
    }

    /// Encode an RGBA image as PNG and write it to `path`, overwriting
    pub fn save_png<P: AsRef<Path>>(image: &RgbaImage, path: P) -> Result<()> {
        let bytes = CodecService::encode_rgba(ImageFormatTag::Png, image)?;
        Self::write_overwriting(path, &bytes)
    }
}
