//! Foundational primitives for binary-contour extraction.
//!
//! ## Image Views and Stride
//! Images use element stride (not byte stride). `stride` is the distance, in
//! elements, between adjacent row starts and may be greater than `width`.
//! This allows borrowed views over padded host buffers without copying.
//!
//! ## Binarization
//! The contour pipeline treats any non-zero sample as foreground regardless
//! of the sample type. Conversion helpers live with the consumers; this crate
//! only guarantees addressability: every sample of a valid view lies within
//! `[0, height * stride)`.
//!
//! ## Coordinates
//! [`Point2i`] is an integer pixel coordinate with `x` growing rightward and
//! `y` growing downward, matching raster scan order.

mod error;
mod geom;
mod image;

pub use error::Error;
pub use geom::Point2i;
pub use image::{Image, ImageView, ImageViewMut};
