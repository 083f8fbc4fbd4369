//! Parameter types for the fit operation.
//!
//! These describe *what* to do, not *how*. The [`operations`](super::operations)
//! module reads them to decide whether a file needs work; the
//! [`backend`](super::backend) only ever sees concrete target dimensions and a
//! filter.
//!
//! ## Types
//!
//! - [`ResampleFilter`] — Interpolation used when shrinking. Lanczos3 by default.
//! - [`FitParams`] — Maximum width, filter, and whether to actually write.

use serde::{Deserialize, Serialize};

/// Resampling filter used when an image is shrunk.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "kebab-case")]
pub enum ResampleFilter {
    /// Lanczos with window 3. Sharpest result, slowest.
    #[default]
    Lanczos3,
    /// Cubic (Catmull-Rom).
    CatmullRom,
    /// Gaussian.
    Gaussian,
    /// Linear (triangle).
    Triangle,
    /// Nearest neighbour. No smoothing at all.
    Nearest,
}

impl ResampleFilter {
    /// Name as written in `fitwidth.toml` and on the command line.
    pub fn name(self) -> &'static str {
        match self {
            Self::Lanczos3 => "lanczos3",
            Self::CatmullRom => "catmull-rom",
            Self::Gaussian => "gaussian",
            Self::Triangle => "triangle",
            Self::Nearest => "nearest",
        }
    }
}

/// Parameters for fitting a single image to a maximum width.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FitParams {
    pub max_width: u32,
    pub filter: ResampleFilter,
    /// Report what would change without resampling or writing.
    pub dry_run: bool,
}

impl FitParams {
    pub fn new(max_width: u32) -> Self {
        Self {
            max_width,
            filter: ResampleFilter::default(),
            dry_run: false,
        }
    }
}
