//! Bucket fill.
//!
//! Replaces the 4-connected region around a seed with a fill color. A pixel
//! belongs to the region when all four channels equal the seed's original
//! RGBA; filled pixels are written fully opaque.
//!
//! The traversal is an explicit worklist, so region size is bounded by heap
//! memory rather than call-stack depth. There is no visited set: a pixel
//! stops matching once it has been filled, because either its RGBA no
//! longer equals the seed color or it already equals `(fill, 255)`.
//!
//! # Example
//!
//! ```rust
//! use pixkit_core::{PixelBuffer, Point, Rgb, Rgba};
//! use pixkit_ops::fill::flood_fill;
//!
//! let mut buf = PixelBuffer::new(4, 4);
//! let written = flood_fill(&mut buf, Point::new(1, 2), Rgb::new(10, 10, 10)).unwrap();
//! assert_eq!(written, 16);
//! assert!(buf.pixels().all(|p| p == Rgba::new(10, 10, 10, 255)));
//! ```

use crate::{OpsError, OpsResult};
use pixkit_core::{PixelBuffer, Point, Rgb, Rgba, CHANNELS};
use tracing::{debug, trace};

/// Fills the region containing `seed` with `fill`.
///
/// Returns the number of pixels written. Zero means the region already had
/// the fill color at full opacity.
///
/// # Errors
///
/// [`OpsError::SeedOutOfBounds`] if `seed` is outside the buffer, negative
/// coordinates included. The buffer is left untouched.
pub fn flood_fill(buffer: &mut PixelBuffer, seed: Point, fill: Rgb) -> OpsResult<usize> {
    trace!(x = seed.x, y = seed.y, fill = %fill, "flood_fill");

    let (width, height) = buffer.dimensions();
    let target = buffer.rgba_at(seed).ok_or(OpsError::SeedOutOfBounds {
        x: seed.x,
        y: seed.y,
        width,
        height,
    })?;
    let replacement = Rgba::opaque(fill);

    let mut written = 0usize;
    let mut stack = vec![seed];

    while let Some(p) = stack.pop() {
        let Some(i) = buffer.index_of(p) else {
            continue;
        };
        let data = buffer.as_raw_mut();
        let current = Rgba::new(data[i], data[i + 1], data[i + 2], data[i + 3]);
        if current != target || current == replacement {
            continue;
        }

        data[i..i + CHANNELS].copy_from_slice(&replacement.to_array());
        written += 1;

        stack.extend(p.neighbors4());
    }

    debug!(width, height, written, "Flood fill done");
    Ok(written)
}

/// By-value form of [`flood_fill`]: takes the buffer, returns it filled.
pub fn flood_filled(mut buffer: PixelBuffer, seed: Point, fill: Rgb) -> OpsResult<PixelBuffer> {
    flood_fill(&mut buffer, seed, fill)?;
    Ok(buffer)
}
