//! Side-by-side image compositing for dual-monitor mode.
//!
//! Both images are stretched to one screen each and written next to each other
//! as a single JPEG.

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use image::{DynamicImage, GenericImage, ImageReader, RgbImage};

/// Errors that can occur while building a composite.
#[derive(Debug)]
pub enum CompositeError {
    /// Failed to read or decode a source image.
    ImageRead(String),
    /// Failed to write the composite.
    ImageSave(String),
}

impl std::fmt::Display for CompositeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ImageRead(path) => write!(f, "Failed to read image: {path}"),
            Self::ImageSave(path) => write!(f, "Failed to save composite image: {path}"),
        }
    }
}

impl std::error::Error for CompositeError {}

/// Size of one monitor in the composite.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenSize {
    pub width: u32,
    pub height: u32,
}

impl ScreenSize {
    /// 1920x1080, the size each half of the composite is scaled to.
    #[must_use]
    pub const fn full_hd() -> Self { Self { width: 1920, height: 1080 } }
}

impl Default for ScreenSize {
    fn default() -> Self { Self::full_hd() }
}

/// Writes `left` and `right` side by side to `output`.
///
/// Each input is resized to exactly `screen` with Lanczos filtering, so the
/// composite is `2 * screen.width` by `screen.height`.
///
/// # Errors
///
/// Returns an error if either input cannot be decoded or the output cannot be written.
pub fn compose_side_by_side(
    left: &Path,
    right: &Path,
    screen: ScreenSize,
    output: &Path,
) -> Result<(), CompositeError> {
    let left_img = load_scaled(left, screen)?;
    let right_img = load_scaled(right, screen)?;

    let save_err = || CompositeError::ImageSave(output.display().to_string());

    let mut canvas = RgbImage::new(screen.width.saturating_mul(2), screen.height);
    canvas.copy_from(&left_img, 0, 0).map_err(|_| save_err())?;
    canvas.copy_from(&right_img, screen.width, 0).map_err(|_| save_err())?;

    let file = File::create(output).map_err(|_| save_err())?;
    let encoder = JpegEncoder::new_with_quality(BufWriter::new(file), 95);
    canvas.write_with_encoder(encoder).map_err(|_| save_err())?;

    tracing::debug!(
        left = %left.display(),
        right = %right.display(),
        output = %output.display(),
        "composite written"
    );
    Ok(())
}

fn load_scaled(path: &Path, screen: ScreenSize) -> Result<RgbImage, CompositeError> {
    let read_err = || CompositeError::ImageRead(path.display().to_string());

    let img: DynamicImage = ImageReader::open(path)
        .map_err(|_| read_err())?
        .with_guessed_format()
        .map_err(|_| read_err())?
        .decode()
        .map_err(|_| read_err())?;

    Ok(img.resize_exact(screen.width, screen.height, FilterType::Lanczos3).to_rgb8())
}
