//! # pixkit-color
//!
//! Stateless color math used by the color-transform engine.
//!
//! - [`rgb_to_hsl`] / [`hsl_to_rgb`] - conversion between 8-bit RGB and [`Hsl`]
//! - [`Adjustment`] - a lightness or saturation delta
//! - [`shift_rgb`] - apply an adjustment to one color
//!
//! Every function is pure and works on a single color, so callers are free
//! to map them over a buffer in any order or in parallel.
//!
//! # Quick Start
//!
//! ```rust
//! use pixkit_color::{shift_rgb, Adjustment, HslChannel};
//! use pixkit_core::Rgb;
//!
//! // Slider at +40 on the saturation control
//! let adj = Adjustment::from_slider(HslChannel::Saturation, 40.0);
//! let out = shift_rgb(Rgb::new(180, 90, 90), adj);
//! assert!(out.r > 180);
//! ```
//!
//! # Dependencies
//!
//! - [`pixkit_core`] - `Rgb`
//!
//! # Used By
//!
//! - `pixkit-ops` - buffer-wide adjustment and the adjustment pipeline

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod adjust;
pub mod hsl;

pub use adjust::{shift_rgb, Adjustment, HslChannel, SLIDER_SCALE};
pub use hsl::{hsl_to_rgb, hsl_to_rgb_unit, rgb_to_hsl, Hsl};
