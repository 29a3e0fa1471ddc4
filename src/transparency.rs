//! Background-to-transparency transform
//!
//! The background color is sampled from the top-left pixel. Every pixel that
//! matches it under the tolerance policy has its alpha cleared; RGB channels
//! are never modified. The transform only runs on fully opaque images.

use crate::color::{same_color, TolerancePolicy};
use image::{DynamicImage, Pixel, Rgb, RgbaImage};
use tracing::instrument;

/// Summary of a transform that was applied
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransparencyStats {
    /// Color sampled at (0, 0)
    pub background: Rgb<u8>,
    /// Number of pixels whose alpha was set to 0
    pub cleared_pixels: u64,
}

/// Returns `true` if every pixel has maximum alpha
pub fn is_opaque(image: &RgbaImage) -> bool {
    image.pixels().all(|p| p[3] == u8::MAX)
}

/// Make the background of `image` transparent
///
/// Returns `None` when the image already contains a non-opaque pixel, in
/// which case no work is done.
///
/// # Examples
/// ```rust
/// use bg_transparent::{make_transparent, TolerancePolicy};
/// use image::{DynamicImage, Rgb, RgbImage};
///
/// let image = DynamicImage::ImageRgb8(RgbImage::from_pixel(2, 2, Rgb([255, 255, 255])));
/// let result = make_transparent(&image, &TolerancePolicy::default()).unwrap();
/// assert!(result.pixels().all(|p| p[3] == 0));
///
/// // Already transparent now
/// assert!(make_transparent(&DynamicImage::ImageRgba8(result), &TolerancePolicy::default()).is_none());
/// ```
pub fn make_transparent(image: &DynamicImage, policy: &TolerancePolicy) -> Option<RgbaImage> {
    make_transparent_with_stats(image, policy).map(|(result, _)| result)
}

/// Same as [`make_transparent`], also reporting the sampled background and
/// the number of cleared pixels
#[instrument(level = "debug", skip_all, fields(width = image.width(), height = image.height()))]
pub fn make_transparent_with_stats(
    image: &DynamicImage,
    policy: &TolerancePolicy,
) -> Option<(RgbaImage, TransparencyStats)> {
    let mut rgba = image.to_rgba8();

    if !is_opaque(&rgba) {
        log::debug!("Image contains non-opaque pixels, skipping transform");
        return None;
    }

    // A zero-sized image is vacuously opaque and has nothing to clear.
    let Some(reference) = rgba.get_pixel_checked(0, 0) else {
        return Some((
            rgba,
            TransparencyStats {
                background: Rgb([0, 0, 0]),
                cleared_pixels: 0,
            },
        ));
    };
    let background = reference.to_rgb();

    let mut cleared_pixels = 0u64;
    for pixel in rgba.pixels_mut() {
        if same_color(pixel.to_rgb(), background, policy) {
            pixel[3] = 0;
            cleared_pixels += 1;
        }
    }

    tracing::debug!(
        background = ?background.0,
        cleared_pixels,
        "Background made transparent"
    );

    Some((
        rgba,
        TransparencyStats {
            background,
            cleared_pixels,
        },
    ))
}
