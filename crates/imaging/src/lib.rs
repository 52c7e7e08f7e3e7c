//! Image compositing for signed property photos.
//!
//! One entry point, [`composite`]: decode the base photo, optionally
//! darken it, upscale it when it is under the minimum size, blend the
//! watermark overlay at the center, and encode the result as PNG.

pub mod compositor;
pub mod error;

pub use compositor::{composite, CompositeOptions, CompositeOutput};
pub use error::ImagingError;
