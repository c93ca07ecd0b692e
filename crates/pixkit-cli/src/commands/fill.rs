//! Fill command
//!
//! Bucket fill on the calling thread.

use crate::FillArgs;
use anyhow::{Context, Result};
use pixkit_core::Point;
use pixkit_ops::flood_fill;
use tracing::{info, trace};

pub fn run(args: FillArgs, verbose: u8) -> Result<()> {
    trace!(input = %args.input.display(), x = args.x, y = args.y, color = %args.color, "fill::run");

    let mut buffer = super::load_image(&args.input)?;
    let seed = Point::new(args.x, args.y);

    let written = flood_fill(&mut buffer, seed, args.color)
        .with_context(|| format!("Cannot fill {}", args.input.display()))?;
    info!(seed = %seed, written, "Filled region");

    if verbose > 0 {
        println!("Filled {} pixels from {} with {}", written, seed, args.color);
    }

    super::save_image(&args.output, buffer)
}
