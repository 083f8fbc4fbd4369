//! High-level image operations.
//!
//! Combines the dimension math in [`calculations`](super::calculations) with
//! backend execution.

use super::backend::{BackendError, Dimensions, ImageBackend};
use super::calculations::fit_to_width;
use super::params::FitParams;
use serde::Serialize;
use std::path::Path;

/// Result type for image operations.
pub type Result<T> = std::result::Result<T, BackendError>;

/// What happened to a single file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum FitOutcome {
    /// Resampled and written back over the original.
    Resized { from: Dimensions, to: Dimensions },
    /// Already within the maximum width; the file was not written.
    Unchanged { dimensions: Dimensions },
    /// Dry run: would have been resized.
    WouldResize { from: Dimensions, to: Dimensions },
    /// Open, resample or save failed and the run carried on.
    Failed { error: String },
}

/// Shrink the image at `path` to `params.max_width` if it is wider, in place.
///
/// The decoded image is dropped before returning, so no file handle or
/// pixel buffer outlives the call whether it succeeds or fails.
pub fn fit_image<B: ImageBackend>(
    backend: &B,
    path: &Path,
    params: &FitParams,
) -> Result<FitOutcome> {
    let image = backend.open(path)?;
    let from = backend.dimensions(&image);

    let Some(to) = fit_to_width(from, params.max_width) else {
        return Ok(FitOutcome::Unchanged { dimensions: from });
    };

    if params.dry_run {
        return Ok(FitOutcome::WouldResize { from, to });
    }

    let resized = backend.resample(&image, to, params.filter)?;
    drop(image);
    backend.save(&resized, path)?;

    Ok(FitOutcome::Resized { from, to })
}
