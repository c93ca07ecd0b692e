//! Block mosaic pixelation.
//!
//! The buffer is cut into a grid of `block.width x block.height` tiles,
//! starting at the top-left corner:
//!
//! ```text
//! blocks_x = ceil(width / bw)      blocks_y = ceil(height / bh)
//!
//! +----+----+--+
//! |    |    |  |   last column / row may be partial
//! +----+----+--+
//! |    |    |  |
//! +----+----+--+
//! ```
//!
//! Every pixel of a tile is replaced by the unweighted mean RGB of the
//! tile's in-bounds pixels. Partial edge tiles average only what they
//! contain, so they are not darkened. Alpha is left as-is.
//!
//! The mean is rounded to nearest with ties to even, matching an 8-bit
//! clamped store of the fractional value.
//!
//! Each horizontal band of tiles touches a disjoint slice of the buffer,
//! so bands run in parallel when the `parallel` feature is enabled.

use crate::OpsResult;
use pixkit_core::{PixelBuffer, CHANNELS};
use std::fmt;
use tracing::{debug, trace};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Tile size for [`pixelate`], both dimensions at least 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BlockSize {
    width: u32,
    height: u32,
}

impl BlockSize {
    /// Creates a block size from possibly fractional, non-positive or NaN
    /// values.
    ///
    /// Each dimension below 1 becomes 1, then it is rounded to the nearest
    /// integer with halves away from zero.
    ///
    /// ```
    /// use pixkit_ops::BlockSize;
    ///
    /// assert_eq!(BlockSize::new(2.5, 1.4).dimensions(), (3, 1));
    /// assert_eq!(BlockSize::new(-4.0, 0.0).dimensions(), (1, 1));
    /// ```
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width: sanitize(width),
            height: sanitize(height),
        }
    }

    /// Same size in both directions.
    pub fn square(size: f64) -> Self {
        Self::new(size, size)
    }

    /// Tile width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Tile height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// `(width, height)`.
    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Returns `true` for 1x1 tiles, which leave any buffer unchanged.
    #[inline]
    pub fn is_identity(&self) -> bool {
        self.width == 1 && self.height == 1
    }
}

impl Default for BlockSize {
    fn default() -> Self {
        Self {
            width: 1,
            height: 1,
        }
    }
}

impl fmt::Display for BlockSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

fn sanitize(v: f64) -> u32 {
    // `!(v >= 1.0)` also catches NaN
    let v = if !(v >= 1.0) { 1.0 } else { v };
    // float-to-int casts saturate
    v.round() as u32
}

/// Pixelates `buffer` in place.
///
/// Never fails for a well-formed buffer; the `Result` keeps the engine
/// signatures uniform.
pub fn pixelate(buffer: &mut PixelBuffer, block: BlockSize) -> OpsResult<()> {
    trace!(block = %block, "pixelate");

    if buffer.is_empty() || block.is_identity() {
        return Ok(());
    }

    let (width, height) = buffer.dimensions();
    // A tile larger than the buffer covers the same pixels as one of
    // buffer size, and clamping keeps `band_len` from overflowing.
    let bw = block.width.min(width) as usize;
    let bh = block.height.min(height) as usize;
    let stride = buffer.stride();
    let band_len = stride * bh;

    #[cfg(feature = "parallel")]
    buffer
        .as_raw_mut()
        .par_chunks_mut(band_len)
        .for_each(|band| average_band(band, stride, bw));

    #[cfg(not(feature = "parallel"))]
    buffer
        .as_raw_mut()
        .chunks_mut(band_len)
        .for_each(|band| average_band(band, stride, bw));

    debug!(
        width,
        height,
        blocks_x = (width as usize).div_ceil(bw),
        blocks_y = (height as usize).div_ceil(bh),
        "Pixelate done"
    );
    Ok(())
}

/// By-value form of [`pixelate`].
pub fn pixelated(mut buffer: PixelBuffer, block: BlockSize) -> OpsResult<PixelBuffer> {
    pixelate(&mut buffer, block)?;
    Ok(buffer)
}

/// Averages every tile of one band. `band` holds whole rows.
fn average_band(band: &mut [u8], stride: usize, bw: usize) {
    let width = stride / CHANNELS;
    let rows = band.len() / stride;

    let mut x0 = 0;
    while x0 < width {
        let x1 = (x0 + bw).min(width);
        let cols = x0 * CHANNELS..x1 * CHANNELS;

        let mut sum = [0u64; 3];
        for row in band.chunks_exact(stride) {
            for px in row[cols.clone()].chunks_exact(CHANNELS) {
                sum[0] += px[0] as u64;
                sum[1] += px[1] as u64;
                sum[2] += px[2] as u64;
            }
        }

        let count = (rows * (x1 - x0)) as f64;
        let mean = sum.map(|s| (s as f64 / count).round_ties_even() as u8);

        for row in band.chunks_exact_mut(stride) {
            for px in row[cols.clone()].chunks_exact_mut(CHANNELS) {
                px[..3].copy_from_slice(&mean);
            }
        }

        x0 = x1;
    }
}
