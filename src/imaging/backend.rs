//! Image processing backend trait and shared types.
//!
//! The [`ImageBackend`] trait is the capability interface the fit operation
//! is written against: open a file, resample the pixels, save them back.
//! Nothing outside [`rust_backend`](super::rust_backend) knows which codec
//! library does the work.
//!
//! The production implementation is
//! [`RustBackend`](super::rust_backend::RustBackend), built on the `image`
//! crate. Tests use the recording `MockBackend` in this module.

use super::params::ResampleFilter;
use serde::Serialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Failure of a single backend call.
///
/// Messages leave the path out; callers report which file failed.
#[derive(Error, Debug)]
pub enum BackendError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to decode: {message}")]
    Decode { path: PathBuf, message: String },
    #[error("Failed to encode: {message}")]
    Encode { path: PathBuf, message: String },
    #[error("Unsupported image format")]
    UnsupportedFormat(PathBuf),
}

/// Width and height of an image, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

impl std::fmt::Display for Dimensions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Trait for image processing backends.
///
/// `Image` is whatever the backend decodes into. It must remember the
/// encoding format implied by the source path so [`save`](Self::save) can
/// write the same format back.
pub trait ImageBackend {
    type Image;

    /// Decode the file at `path`. The file handle is closed before returning.
    fn open(&self, path: &Path) -> Result<Self::Image, BackendError>;

    /// Dimensions of a decoded image.
    fn dimensions(&self, image: &Self::Image) -> Dimensions;

    /// Resample to exactly `target`, keeping the original encoding format.
    fn resample(
        &self,
        image: &Self::Image,
        target: Dimensions,
        filter: ResampleFilter,
    ) -> Result<Self::Image, BackendError>;

    /// Encode `image` in its original format and overwrite `path`.
    fn save(&self, image: &Self::Image, path: &Path) -> Result<(), BackendError>;
}
