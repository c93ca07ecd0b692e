//! Lightness / saturation shift over a whole buffer.
//!
//! A per-pixel map of [`pixkit_color::shift_rgb`]; alpha is kept and no
//! pixel depends on its neighbours. Rows are processed in parallel when
//! the `parallel` feature is enabled.

use crate::OpsResult;
use pixkit_color::{shift_rgb, Adjustment};
use pixkit_core::{PixelBuffer, Rgb, CHANNELS};
use tracing::{debug, trace};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Applies `adjustment` to every pixel of `buffer` in place.
pub fn adjust(buffer: &mut PixelBuffer, adjustment: Adjustment) -> OpsResult<()> {
    trace!(channel = %adjustment.channel, delta = adjustment.delta, "adjust");

    if buffer.is_empty() {
        return Ok(());
    }
    let stride = buffer.stride();

    #[cfg(feature = "parallel")]
    buffer
        .as_raw_mut()
        .par_chunks_mut(stride)
        .for_each(|row| shift_row(row, adjustment));

    #[cfg(not(feature = "parallel"))]
    buffer
        .as_raw_mut()
        .chunks_mut(stride)
        .for_each(|row| shift_row(row, adjustment));

    debug!(
        width = buffer.width(),
        height = buffer.height(),
        "Adjust done"
    );
    Ok(())
}

/// By-value form of [`adjust`].
pub fn adjusted(mut buffer: PixelBuffer, adjustment: Adjustment) -> OpsResult<PixelBuffer> {
    adjust(&mut buffer, adjustment)?;
    Ok(buffer)
}

#[inline]
fn shift_row(row: &mut [u8], adjustment: Adjustment) {
    for px in row.chunks_exact_mut(CHANNELS) {
        let out = shift_rgb(Rgb::new(px[0], px[1], px[2]), adjustment);
        px[..3].copy_from_slice(&out.to_array());
    }
}
