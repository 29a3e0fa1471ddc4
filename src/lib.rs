#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::uninlined_format_args)]

//! # bg-transparent
//!
//! Makes the uniform background of an image transparent. The color of the
//! top-left pixel is taken as the background, and every pixel close enough
//! to it gets its alpha cleared. The result is written as PNG.
//!
//! ## Features
//!
//! - **Format Support**: JPEG, PNG, BMP, TIFF, GIF and WebP input, chosen by file extension
//! - **Tolerant Matching**: per-channel color distance with a stricter bound for gray shifts
//! - **Data URI Round-Trip**: optionally re-encode through `data:image/<fmt>;base64,...`
//! - **CLI Integration**: optional command-line interface (enable with `cli` feature)
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use bg_transparent::{TransparencyConfig, TransparencyProcessor};
//!
//! # fn example() -> bg_transparent::Result<()> {
//! let config = TransparencyConfig::builder().round_trip(false).build()?;
//! let processor = TransparencyProcessor::new(config)?;
//!
//! // Writes ./out__logo.png
//! let output = processor.process_and_save("logo.jpg")?;
//! println!("{}", output.display());
//! # Ok(())
//! # }
//! ```
//!
//! ## Transform Only
//!
//! ```rust
//! use bg_transparent::{make_transparent, TolerancePolicy};
//! use image::{DynamicImage, Rgba, RgbaImage};
//!
//! let mut img = RgbaImage::from_pixel(2, 2, Rgba([255, 0, 0, 255]));
//! img.put_pixel(1, 1, Rgba([0, 255, 0, 255]));
//!
//! let out = make_transparent(&DynamicImage::ImageRgba8(img), &TolerancePolicy::default())
//!     .expect("input is fully opaque");
//! assert_eq!(out.get_pixel(0, 0)[3], 0);
//! assert_eq!(out.get_pixel(1, 1)[3], 255);
//! ```
//!
//! ### Feature Flags
//!
//! - `cli` (default): command-line interface and tracing subscriber setup
//! - `webp-support` (default): WebP decoding
//! - `tracing-json`: JSON log output for the CLI
//!
//! ### Library-Only Usage
//!
//! ```toml
//! [dependencies]
//! bg-transparent = { version = "0.1", default-features = false }
//! ```

#[cfg(feature = "cli")]
pub mod cli;
pub mod color;
pub mod config;
pub mod error;
pub mod processor;
pub mod services;
pub mod tracing_config;
pub mod transparency;
pub mod types;

// Public API exports
pub use color::{
    channel_deltas, same_color, TolerancePolicy, DEFAULT_TOLERANCE, DEFAULT_UNIFORM_TOLERANCE,
};
pub use config::{TransparencyConfig, TransparencyConfigBuilder};
pub use error::{Result, TransparencyError};
pub use processor::{generate_output_path, TransparencyProcessor, OUTPUT_PREFIX};
pub use services::{
    decode_from_data_uri, encode_to_data_uri, CodecService, ImageFormatTag, ImageIOService,
};
pub use transparency::{is_opaque, make_transparent, make_transparent_with_stats, TransparencyStats};
pub use types::{ProcessingMetadata, ProcessingTimings, TransparencyResult};

#[cfg(feature = "cli")]
pub use tracing_config::{TracingConfig, TracingFormat};

/// Make the background of an image file transparent with default settings
///
/// Writes `out__<stem>.png` into the current directory, replacing any
/// existing file, and returns the path written.
///
/// # Errors
/// - `UnsupportedFormat` for an unknown file extension
/// - `FileSystem` when the file cannot be read or the output cannot be written
/// - `Decode` when the codec rejects the file
/// - `AlreadyTransparent` when the image already has non-opaque pixels
pub fn make_file_transparent<P: AsRef<std::path::Path>>(input: P) -> Result<std::path::PathBuf> {
    TransparencyProcessor::new(TransparencyConfig::default())?.process_and_save(input)
}
