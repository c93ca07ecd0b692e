//! # pixkit-core
//!
//! Core types shared by every pixkit crate.
//!
//! - [`PixelBuffer`] - owned RGBA8 buffer, row-major, `width * height * 4` bytes
//! - [`Point`] - signed pixel coordinate
//! - [`Rgb`], [`Rgba`] - 8-bit colors, hex parsing
//! - [`Error`] - construction and bounds errors
//!
//! ## Crate Structure
//!
//! This crate has no internal dependencies. The engines build on it:
//!
//! ```text
//! pixkit-core (this crate)
//!    ^
//!    |
//!    +-- pixkit-color (HSL math)
//!    +-- pixkit-ops (flood fill, pixelate, adjust, pipeline)
//!    +-- pixkit-worker (background execution)
//!    +-- pixkit-cli
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod buffer;
pub mod error;
pub mod pixel;
pub mod point;

pub use buffer::{PixelBuffer, CHANNELS};
pub use error::{Error, Result};
pub use pixel::{Rgb, Rgba};
pub use point::Point;

/// Prelude module for convenient imports.
///
/// ```
/// use pixkit_core::prelude::*;
///
/// let buf = PixelBuffer::filled(2, 2, Rgba::opaque(Rgb::WHITE));
/// assert_eq!(buf.rgb_at(Point::new(1, 1)), Some(Rgb::WHITE));
/// ```
pub mod prelude {
    pub use crate::buffer::PixelBuffer;
    pub use crate::error::{Error, Result};
    pub use crate::pixel::{Rgb, Rgba};
    pub use crate::point::Point;
}
