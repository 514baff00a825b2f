//! Image loading for captured and uploaded photos
//!
//! Every supported format is decoded with the `image` crate and converted to
//! an 8-bit RGB buffer, the only layout the sampler reads. EXIF orientation
//! is not applied: landmarks are detected on the same buffer they are sampled
//! from, so orientation does not affect the result.

use image::{DynamicImage, ImageReader, RgbImage};
use log::debug;
use std::path::Path;

use crate::error::{AnalysisError, Result};

/// Supported image formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    Jpeg,
    Png,
    /// First frame only
    Gif,
    WebP,
    Tiff,
    Bmp,
    /// PBM, PGM and PPM
    Pnm,
    Qoi,
}

impl ImageFormat {
    /// Detect format from file extension
    pub fn from_extension(path: &Path) -> Option<ImageFormat> {
        let ext = path.extension()?.to_str()?.to_lowercase();
        match ext.as_str() {
            "jpg" | "jpeg" => Some(ImageFormat::Jpeg),
            "png" => Some(ImageFormat::Png),
            "gif" => Some(ImageFormat::Gif),
            "webp" => Some(ImageFormat::WebP),
            "tiff" | "tif" => Some(ImageFormat::Tiff),
            "bmp" => Some(ImageFormat::Bmp),
            "pbm" | "pgm" | "ppm" | "pnm" => Some(ImageFormat::Pnm),
            "qoi" => Some(ImageFormat::Qoi),
            _ => None,
        }
    }
}

impl From<ImageFormat> for image::ImageFormat {
    fn from(format: ImageFormat) -> Self {
        match format {
            ImageFormat::Jpeg => image::ImageFormat::Jpeg,
            ImageFormat::Png => image::ImageFormat::Png,
            ImageFormat::Gif => image::ImageFormat::Gif,
            ImageFormat::WebP => image::ImageFormat::WebP,
            ImageFormat::Tiff => image::ImageFormat::Tiff,
            ImageFormat::Bmp => image::ImageFormat::Bmp,
            ImageFormat::Pnm => image::ImageFormat::Pnm,
            ImageFormat::Qoi => image::ImageFormat::Qoi,
        }
    }
}

/// Load an image file as 8-bit RGB
///
/// # Errors
///
/// Returns `ProcessingError` for an unsupported extension and
/// `ImageLoadError` if the file cannot be opened or decoded
///
/// # Example
///
/// ```rust,no_run
/// use vesto_core::image_loader::load_image;
/// use std::path::Path;
///
/// let image = load_image(Path::new("selfie.jpg"))?;
/// println!("Loaded image: {}x{}", image.width(), image.height());
/// # Ok::<(), vesto_core::AnalysisError>(())
/// ```
pub fn load_image(path: &Path) -> Result<RgbImage> {
    let format = ImageFormat::from_extension(path).ok_or_else(|| {
        AnalysisError::ProcessingError(format!(
            "Unknown image format for file: {}",
            path.display()
        ))
    })?;

    let mut reader = ImageReader::open(path).map_err(|e| {
        AnalysisError::image_load(format!("Failed to open image file: {}", path.display()), e)
    })?;
    reader.set_format(format.into());

    let decoded = reader.decode().map_err(|e| {
        AnalysisError::image_load(format!("Failed to decode image: {}", path.display()), e)
    })?;

    Ok(into_rgb(decoded))
}

/// Decode an in-memory upload, guessing the format from its magic bytes
pub fn load_from_bytes(bytes: &[u8]) -> Result<RgbImage> {
    if bytes.is_empty() {
        return Err(AnalysisError::ImageLoadError {
            message: "Empty image buffer".to_string(),
            source: None,
        });
    }

    let decoded = image::load_from_memory(bytes)
        .map_err(|e| AnalysisError::image_load("Failed to decode image buffer", e))?;

    Ok(into_rgb(decoded))
}

fn into_rgb(image: DynamicImage) -> RgbImage {
    debug!(
        "Decoded {}x{} image ({:?})",
        image.width(),
        image.height(),
        image.color()
    );
    image.to_rgb8()
}

/// Get list of all supported file extensions
pub fn supported_extensions() -> &'static [&'static str] {
    &[
        "jpg", "jpeg", "png", "gif", "webp", "tiff", "tif", "bmp", "pbm", "pgm", "ppm", "pnm",
        "qoi",
    ]
}

/// Check if a file extension is supported
pub fn is_supported_extension(ext: &str) -> bool {
    let ext_lower = ext.to_lowercase();
    supported_extensions().contains(&ext_lower.as_str())
}
