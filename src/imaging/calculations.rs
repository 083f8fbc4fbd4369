//! Pure calculation functions for image dimensions.
//!
//! All functions here are pure and testable without any I/O or images.

use super::backend::Dimensions;

/// Calculate the dimensions an image must be shrunk to so it fits `max_width`.
///
/// Returns `None` when the image is already narrow enough (`width <= max_width`).
/// Otherwise the width becomes `max_width` and the height is scaled by the
/// same ratio and rounded down: `floor(max_width * height / width)`.
///
/// Integer arithmetic in `u64` keeps the floor exact for every `u32` input.
/// A height that floors to zero is clamped to one pixel, since an empty
/// image cannot be encoded.
///
/// # Examples
/// ```
/// # use fitwidth::imaging::{Dimensions, fit_to_width};
/// let target = fit_to_width(Dimensions { width: 1600, height: 900 }, 800);
/// assert_eq!(target, Some(Dimensions { width: 800, height: 450 }));
///
/// assert_eq!(fit_to_width(Dimensions { width: 400, height: 300 }, 800), None);
/// ```
pub fn fit_to_width(original: Dimensions, max_width: u32) -> Option<Dimensions> {
    if original.width <= max_width {
        return None;
    }

    let height = u64::from(max_width) * u64::from(original.height) / u64::from(original.width);

    Some(Dimensions {
        width: max_width,
        // height < original.height here, so the cast cannot truncate
        height: (height as u32).max(1),
    })
}
