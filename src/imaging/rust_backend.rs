//! Pure Rust image backend built on the `image` crate.
//!
//! ## Crate mapping
//!
//! | Operation | Crate / function |
//! |---|---|
//! | Decode (PNG, JPEG, BMP, GIF, WebP) | `image::ImageReader` with the format taken from the extension |
//! | Resample | `image::DynamicImage::resize_exact` |
//! | Encode | `image::DynamicImage::write_to` in the source format |
//!
//! Encoding happens into memory first. The original file is only replaced
//! once the encoder has produced a complete image, so an encode failure
//! leaves the source untouched.
//!
//! Animated GIF and WebP files are written back as their first frame.

use super::backend::{BackendError, Dimensions, ImageBackend};
use super::params::ResampleFilter;
use image::imageops::FilterType;
use image::{DynamicImage, ImageFormat, ImageReader};
use std::borrow::Cow;
use std::io::Cursor;
use std::path::Path;

/// Extensions with a compiled-in decoder and encoder, and the format each implies.
const FORMATS: &[(&str, ImageFormat)] = &[
    ("png", ImageFormat::Png),
    ("jpg", ImageFormat::Jpeg),
    ("jpeg", ImageFormat::Jpeg),
    ("bmp", ImageFormat::Bmp),
    ("gif", ImageFormat::Gif),
    ("webp", ImageFormat::WebP),
];

/// A decoded image together with the format it was read as.
#[derive(Debug, Clone)]
pub struct DecodedImage {
    pub pixels: DynamicImage,
    pub format: ImageFormat,
}

/// Backend using the `image` crate for every operation.
pub struct RustBackend;

impl RustBackend {
    pub fn new() -> Self {
        Self
    }
}

impl Default for RustBackend {
    fn default() -> Self {
        Self::new()
    }
}

/// Format implied by how the file name ends, compared case-insensitively.
///
/// Matches on the name rather than [`Path::extension`] so that a file
/// called just `.png` still reads as PNG.
fn format_for_path(path: &Path) -> Result<ImageFormat, BackendError> {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_lowercase())
        .unwrap_or_default();
    FORMATS
        .iter()
        .find(|(ext, _)| name.strip_suffix(*ext).is_some_and(|stem| stem.ends_with('.')))
        .map(|(_, format)| *format)
        .ok_or_else(|| BackendError::UnsupportedFormat(path.to_path_buf()))
}

impl From<ResampleFilter> for FilterType {
    fn from(filter: ResampleFilter) -> Self {
        match filter {
            ResampleFilter::Lanczos3 => FilterType::Lanczos3,
            ResampleFilter::CatmullRom => FilterType::CatmullRom,
            ResampleFilter::Gaussian => FilterType::Gaussian,
            ResampleFilter::Triangle => FilterType::Triangle,
            ResampleFilter::Nearest => FilterType::Nearest,
        }
    }
}

/// Convert pixels into a layout the target encoder accepts.
///
/// The JPEG encoder has no alpha channel, GIF frames are RGBA, and BMP/WebP
/// only take 8-bit buffers. PNG takes everything as is.
fn encodable(pixels: &DynamicImage, format: ImageFormat) -> Cow<'_, DynamicImage> {
    use DynamicImage::{ImageLuma8, ImageLumaA8, ImageRgb8, ImageRgba8};

    match (format, pixels) {
        (ImageFormat::Png, _) => Cow::Borrowed(pixels),
        (ImageFormat::Jpeg, ImageLuma8(_) | ImageRgb8(_)) => Cow::Borrowed(pixels),
        (ImageFormat::Jpeg, other) => Cow::Owned(ImageRgb8(other.to_rgb8())),
        (ImageFormat::Gif, ImageRgba8(_)) => Cow::Borrowed(pixels),
        (ImageFormat::Gif, other) => Cow::Owned(ImageRgba8(other.to_rgba8())),
        (_, ImageLuma8(_) | ImageLumaA8(_) | ImageRgb8(_) | ImageRgba8(_)) => {
            Cow::Borrowed(pixels)
        }
        (_, other) if other.color().has_alpha() => Cow::Owned(ImageRgba8(other.to_rgba8())),
        (_, other) => Cow::Owned(ImageRgb8(other.to_rgb8())),
    }
}

impl ImageBackend for RustBackend {
    type Image = DecodedImage;

    fn open(&self, path: &Path) -> Result<DecodedImage, BackendError> {
        let format = format_for_path(path)?;
        let mut reader = ImageReader::open(path)?;
        reader.set_format(format);
        let pixels = reader.decode().map_err(|e| BackendError::Decode {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        Ok(DecodedImage { pixels, format })
    }

    fn dimensions(&self, image: &DecodedImage) -> Dimensions {
        Dimensions {
            width: image.pixels.width(),
            height: image.pixels.height(),
        }
    }

    fn resample(
        &self,
        image: &DecodedImage,
        target: Dimensions,
        filter: ResampleFilter,
    ) -> Result<DecodedImage, BackendError> {
        let pixels = image
            .pixels
            .resize_exact(target.width, target.height, filter.into());
        Ok(DecodedImage {
            pixels,
            format: image.format,
        })
    }

    fn save(&self, image: &DecodedImage, path: &Path) -> Result<(), BackendError> {
        let mut encoded = Cursor::new(Vec::new());
        encodable(&image.pixels, image.format)
            .write_to(&mut encoded, image.format)
            .map_err(|e| BackendError::Encode {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;
        std::fs::write(path, encoded.into_inner())?;
        Ok(())
    }
}
