//! Core types for background transparency operations

use crate::{
    error::Result,
    services::{CodecService, ImageFormatTag, ImageIOService},
};
use image::{Rgb, RgbaImage};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Result of a transparency operation
#[derive(Debug, Clone)]
pub struct TransparencyResult {
    /// RGBA image with the background alpha cleared
    pub image: RgbaImage,

    /// Color sampled at (0, 0)
    pub background: Rgb<u8>,

    /// Number of pixels made transparent
    pub cleared_pixels: u64,

    /// Processing metadata
    pub metadata: ProcessingMetadata,
}

impl TransparencyResult {
    /// Output dimensions
    #[must_use]
    pub fn dimensions(&self) -> (u32, u32) {
        self.image.dimensions()
    }

    /// Fraction of pixels made transparent, in [0, 1]
    #[must_use]
    pub fn transparent_ratio(&self) -> f64 {
        let (width, height) = self.dimensions();
        let total = u64::from(width) * u64::from(height);
        if total == 0 {
            0.0
        } else {
            self.cleared_pixels as f64 / total as f64
        }
    }

    /// Get detailed timing breakdown
    #[must_use]
    pub fn timings(&self) -> &ProcessingTimings {
        &self.metadata.timings
    }

    /// Encode the result as PNG
    pub fn to_png_bytes(&self) -> Result<Vec<u8>> {
        CodecService::encode_rgba(ImageFormatTag::Png, &self.image)
    }

    /// Save the result as PNG, replacing any existing file
    pub fn save_png<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        ImageIOService::save_png(&self.image, path)
    }

    /// Save as PNG and record the encode time in the timings
    pub fn save_png_timed<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        let encode_start = instant::Instant::now();
        let bytes = self.to_png_bytes()?;
        let encode_ms = encode_start.elapsed().as_millis() as u64;
        ImageIOService::write_overwriting(path, &bytes)?;

        self.metadata.timings.image_encode_ms = Some(encode_ms);
        self.metadata.timings.total_ms += encode_ms;
        Ok(())
    }

    /// Get timing summary for display
    #[must_use]
    pub fn timing_summary(&self) -> String {
        let t = &self.metadata.timings;
        let mut summary = format!(
            "Total: {}ms | Decode: {}ms | Transform: {}ms",
            t.total_ms, t.image_decode_ms, t.transform_ms
        );

        if let Some(round_trip_ms) = t.round_trip_ms {
            summary.push_str(&format!(" | Round-trip: {}ms", round_trip_ms));
        }
        if let Some(encode_ms) = t.image_encode_ms {
            summary.push_str(&format!(" | Encode: {}ms", encode_ms));
        }

        summary
    }
}

/// Detailed timing for each pipeline stage
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessingTimings {
    /// Image loading and decoding
    pub image_decode_ms: u64,

    /// Data URI encode + decode, when enabled
    pub round_trip_ms: Option<u64>,

    /// Color matching pass
    pub transform_ms: u64,

    /// Final PNG encoding (if saving to file)
    pub image_encode_ms: Option<u64>,

    /// Total end-to-end processing time
    pub total_ms: u64,
}

/// Metadata about a processed image
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessingMetadata {
    /// Image width and height
    pub dimensions: (u32, u32),

    /// Codec the image was decoded with
    pub source_format: ImageFormatTag,

    /// Whether the image went through the data URI round-trip
    pub round_trip: bool,

    pub timings: ProcessingTimings,
}

impl ProcessingMetadata {
    #[must_use]
    pub fn new(dimensions: (u32, u32), source_format: ImageFormatTag) -> Self {
        Self {
            dimensions,
            source_format,
            round_trip: false,
            timings: ProcessingTimings::default(),
        }
    }
}
