//! # pixkit-ops
//!
//! The three raster engines plus the stage pipeline built on them.
//!
//! # Modules
//!
//! - [`fill`] - 4-connected bucket fill from a seed
//! - [`pixelate`] - block mosaic
//! - [`adjust`] - lightness / saturation shift of every pixel
//! - [`pipeline`] - ordered, cached chain of adjustment stages
//!
//! Every engine comes in two forms: one mutating a `&mut PixelBuffer`, and
//! a by-value one (`flood_filled`, `pixelated`, `adjusted`) that takes the
//! buffer and hands it back, which is what the worker uses.
//!
//! # Example
//!
//! ```rust
//! use pixkit_core::{PixelBuffer, Point, Rgb};
//! use pixkit_ops::{adjusted, flood_filled, pixelated, BlockSize};
//! use pixkit_color::Adjustment;
//!
//! let buf = PixelBuffer::new(8, 8);
//! let buf = flood_filled(buf, Point::new(0, 0), Rgb::new(200, 40, 40)).unwrap();
//! let buf = pixelated(buf, BlockSize::square(4.0)).unwrap();
//! let buf = adjusted(buf, Adjustment::lightness(0.1)).unwrap();
//! assert_eq!(buf.dimensions(), (8, 8));
//! ```
//!
//! # Features
//!
//! - `parallel` (default) - pixelate and adjust split work across rayon
//!
//! # Dependencies
//!
//! - `pixkit-core` - buffer and pixel types
//! - `pixkit-color` - HSL math
//! - `serde`, `serde_yaml` - pipeline descriptions
//! - `rayon` - optional parallelism
//!
//! # Used By
//!
//! - `pixkit-worker` - runs engines off-thread
//! - `pixkit-cli` - command line

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod error;
pub mod adjust;
pub mod fill;
pub mod pipeline;
pub mod pixelate;

pub use adjust::{adjust, adjusted};
pub use error::{OpsError, OpsResult};
pub use fill::{flood_fill, flood_filled};
pub use pipeline::{Pipeline, PipelineConfig, PipelineOutput, Stage, StageConfig, StageId, StageKind};
pub use pixelate::{pixelate, pixelated, BlockSize};
