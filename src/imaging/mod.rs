//! Image processing — pure Rust, on the `image` crate.
//!
//! | Operation | Crate / function |
//! |---|---|
//! | **Open** | `image::ImageReader`, format from the file extension |
//! | **Resample** | `resize_exact` with Lanczos3 (configurable) |
//! | **Save** | `DynamicImage::write_to` in the source format, then overwrite |
//!
//! The module is split into:
//! - **Calculations**: Pure functions for dimension math (unit testable)
//! - **Parameters**: Data structures describing the fit operation
//! - **Backend**: [`ImageBackend`] trait + [`RustBackend`]
//! - **Operations**: High-level functions combining calculations + backend

pub mod backend;
mod calculations;
pub mod operations;
mod params;
pub mod rust_backend;

pub use backend::{BackendError, Dimensions, ImageBackend};
pub use calculations::fit_to_width;
pub use operations::{FitOutcome, fit_image};
pub use params::{FitParams, ResampleFilter};
pub use rust_backend::RustBackend;
