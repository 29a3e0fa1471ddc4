//! Background transparency processor
//!
//! `TransparencyProcessor` sequences the whole pipeline: resolve the format
//! from the file extension, decode, optionally round-trip through a data URI,
//! apply the transform, and write `out__<stem>.png`. Every stage is fatal on
//! error.

use crate::{
    config::TransparencyConfig,
    error::{Result, TransparencyError},
    services::{data_uri, CodecService, ImageFormatTag, ImageIOService},
    tracing_config::{events, spans},
    transparency::make_transparent_with_stats,
    types::{ProcessingMetadata, ProcessingTimings, TransparencyResult},
};
use image::DynamicImage;
use instant::Instant;
use log::{debug, info};
use std::path::{Path, PathBuf};
use tracing::instrument;

/// Prefix of every output file name
pub const OUTPUT_PREFIX: &str = "out__";

/// Build `<output_dir>/out__<input stem>.png`
///
/// # Examples
/// ```rust
/// use bg_transparent::generate_output_path;
/// use std::path::Path;
///
/// let output = generate_output_path(Path::new("photos/red-jpg.jpg"), Path::new("."));
/// assert_eq!(output, Path::new("./out__red-jpg.png"));
/// ```
pub fn generate_output_path(input_path: &Path, output_dir: &Path) -> PathBuf {
    let stem = input_path.file_stem().unwrap_or_default();
    output_dir.join(format!("{}{}.png", OUTPUT_PREFIX, stem.to_string_lossy()))
}

/// Pipeline driver for background transparency
#[derive(Debug, Clone)]
pub struct TransparencyProcessor {
    config: TransparencyConfig,
}

impl TransparencyProcessor {
    /// Create a processor, validating the configuration
    pub fn new(config: TransparencyConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Get the current configuration
    pub fn config(&self) -> &TransparencyConfig {
        &self.config
    }

    /// Output path for `input` under the configured output directory
    pub fn output_path_for(&self, input: &Path) -> PathBuf {
        generate_output_path(input, &self.config.output_dir)
    }

    /// Decode `path` and make its background transparent
    ///
    /// The format is resolved from the extension before the file is opened.
    #[instrument(level = "info", skip_all, fields(path = %path.as_ref().display()))]
    pub fn process_file<P: AsRef<Path>>(&self, path: P) -> Result<TransparencyResult> {
        let path_ref = path.as_ref();
        let start = Instant::now();

        let (image, tag) = ImageIOService::load_image(path_ref)?;
        let decode_ms = start.elapsed().as_millis() as u64;
        debug!(
            "Decoded {} ({}x{}, {}) in {}ms",
            path_ref.display(),
            image.width(),
            image.height(),
            tag,
            decode_ms
        );

        self.process_decoded(image, tag, decode_ms, start)
    }

    /// Decode an in-memory buffer with the codec named by `tag` and process it
    pub fn process_bytes(&self, bytes: &[u8], tag: ImageFormatTag) -> Result<TransparencyResult> {
        let start = Instant::now();
        let image = CodecService::decode_bytes(tag, bytes)?;
        let decode_ms = start.elapsed().as_millis() as u64;
        self.process_decoded(image, tag, decode_ms, start)
    }

    /// Process an already decoded image
    ///
    /// `source_format` selects the codec for the data URI round-trip when it
    /// is enabled.
    pub fn process_image(
        &self,
        image: DynamicImage,
        source_format: ImageFormatTag,
    ) -> Result<TransparencyResult> {
        self.process_decoded(image, source_format, 0, Instant::now())
    }

    /// Process `input` and write the PNG result, returning the output path
    pub fn process_and_save<P: AsRef<Path>>(&self, input: P) -> Result<PathBuf> {
        let input_ref = input.as_ref();
        let mut result = self.process_file(input_ref)?;
        let output_path = self.output_path_for(input_ref);

        result.save_png_timed(&output_path)?;
        info!(
            "Processed: {} -> {} in {:.2}s",
            input_ref.display(),
            output_path.display(),
            result.timings().total_ms as f64 / 1000.0
        );
        debug!("{}", result.timing_summary());

        Ok(output_path)
    }

    fn process_decoded(
        &self,
        image: DynamicImage,
        source_format: ImageFormatTag,
        decode_ms: u64,
        start: Instant,
    ) -> Result<TransparencyResult> {
        let mut timings = ProcessingTimings {
            image_decode_ms: decode_ms,
            ..ProcessingTimings::default()
        };

        let image = if self.config.round_trip {
            let _span = spans::round_trip(source_format.mime_subtype()).entered();
            let round_trip_start = Instant::now();
            let decoded = data_uri::round_trip(&image, source_format)?;
            let round_trip_ms = round_trip_start.elapsed().as_millis() as u64;
            timings.round_trip_ms = Some(round_trip_ms);
            events::stage_timing("round_trip", round_trip_ms);
            decoded
        } else {
            image
        };

        let dimensions = (image.width(), image.height());
        if dimensions.0 == 0 || dimensions.1 == 0 {
            return Err(TransparencyError::processing("image has no pixels"));
        }

        let _span = spans::transform(dimensions.0, dimensions.1).entered();
        let transform_start = Instant::now();
        let (rgba, stats) = make_transparent_with_stats(&image, &self.config.tolerance)
            .ok_or(TransparencyError::AlreadyTransparent)?;
        timings.transform_ms = transform_start.elapsed().as_millis() as u64;
        events::stage_timing("transform", timings.transform_ms);
        timings.total_ms = start.elapsed().as_millis() as u64;

        debug!(
            "Cleared {} of {} pixels matching background {:?}",
            stats.cleared_pixels,
            u64::from(dimensions.0) * u64::from(dimensions.1),
            stats.background.0
        );

        let mut metadata = ProcessingMetadata::new(dimensions, source_format);
        metadata.round_trip = self.config.round_trip;
        metadata.timings = timings;

        Ok(TransparencyResult {
            image: rgba,
            background: stats.background,
            cleared_pixels: stats.cleared_pixels,
            metadata,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};

    fn two_by_two() -> DynamicImage {
        let mut img = RgbaImage::from_pixel(2, 2, Rgba([255, 0, 0, 255]));
        img.put_pixel(1, 1, Rgba([0, 255, 0, 255]));
        DynamicImage::ImageRgba8(img)
    }

    #[test]
    fn test_generate_output_path() {
        let output = generate_output_path(Path::new("red-jpg.jpg"), Path::new("."));
        assert_eq!(output.file_name().unwrap(), "out__red-jpg.png");

        let output = generate_output_path(Path::new("/path/to/image.PNG"), Path::new("results"));
        assert_eq!(output, Path::new("results/out__image.png"));

        let output = generate_output_path(Path::new("my.complex.name.jpeg"), Path::new("."));
        assert_eq!(output.file_name().unwrap(), "out__my.complex.name.png");
    }

    #[test]
    fn test_process_image_scenario() {
        let processor = TransparencyProcessor::new(TransparencyConfig::default()).unwrap();
        let result = processor.process_image(two_by_two(), ImageFormatTag::Png).unwrap();

        let alphas: Vec<u8> = [(0, 0), (1, 0), (0, 1), (1, 1)]
            .iter()
            .map(|&(x, y)| result.image.get_pixel(x, y)[3])
            .collect();
        assert_eq!(alphas, vec![0, 0, 0, 255]);
        assert_eq!(result.cleared_pixels, 3);
        assert_eq!(result.metadata.dimensions, (2, 2));
        assert!(!result.metadata.round_trip);
        assert!(result.timings().round_trip_ms.is_none());
    }

    #[test]
    fn test_process_image_with_round_trip() {
        let config = TransparencyConfig::builder().round_trip(true).build().unwrap();
        let processor = TransparencyProcessor::new(config).unwrap();

        let result = processor.process_image(two_by_two(), ImageFormatTag::Png).unwrap();
        assert!(result.metadata.round_trip);
        assert!(result.timings().round_trip_ms.is_some());
        assert_eq!(result.image.get_pixel(1, 1)[3], 255);
        assert_eq!(result.cleared_pixels, 3);
    }

    #[test]
    fn test_round_trip_rejects_webp_source() {
        let config = TransparencyConfig::builder().round_trip(true).build().unwrap();
        let processor = TransparencyProcessor::new(config).unwrap();

        let err = processor.process_image(two_by_two(), ImageFormatTag::WebP).unwrap_err();
        assert!(matches!(err, TransparencyError::UnsupportedEncodeFormat(_)));
    }

    #[test]
    fn test_already_transparent_is_error() {
        let processor = TransparencyProcessor::new(TransparencyConfig::default()).unwrap();
        let first = processor.process_image(two_by_two(), ImageFormatTag::Png).unwrap();

        let err = processor
            .process_image(DynamicImage::ImageRgba8(first.image), ImageFormatTag::Png)
            .unwrap_err();
        assert!(matches!(err, TransparencyError::AlreadyTransparent));
    }

    #[test]
    fn test_zero_sized_image_rejected() {
        let processor = TransparencyProcessor::new(TransparencyConfig::default()).unwrap();
        let err = processor
            .process_image(DynamicImage::ImageRgba8(RgbaImage::new(0, 0)), ImageFormatTag::Png)
            .unwrap_err();
        assert!(matches!(err, TransparencyError::Processing(_)));
    }

    #[test]
    fn test_process_bytes() {
        let png = CodecService::encode(ImageFormatTag::Png, &two_by_two()).unwrap();
        let processor = TransparencyProcessor::new(TransparencyConfig::default()).unwrap();

        let result = processor.process_bytes(&png, ImageFormatTag::Png).unwrap();
        assert_eq!(result.metadata.source_format, ImageFormatTag::Png);
        assert_eq!(result.cleared_pixels, 3);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let mut config = TransparencyConfig::default();
        config.tolerance.uniform = 255;
        config.tolerance.general = 0;
        assert!(TransparencyProcessor::new(config).is_err());
    }
}
