//! Pixelate command
//!
//! Runs the mosaic on a background worker.

use crate::PixelateArgs;
use anyhow::{Context, Result};
use pixkit_ops::BlockSize;
use pixkit_worker::Worker;
use tracing::{info, trace};

pub fn run(args: PixelateArgs, verbose: u8) -> Result<()> {
    trace!(input = %args.input.display(), block_width = args.block_width, block_height = ?args.block_height, "pixelate::run");

    let buffer = super::load_image(&args.input)?;
    let block = BlockSize::new(args.block_width, args.block_height.unwrap_or(args.block_width));
    info!(block = %block, w = buffer.width(), h = buffer.height(), "Pixelating");

    if verbose > 0 {
        println!("Pixelating {} with {} blocks", args.input.display(), block);
    }

    let worker = Worker::spawn("pixkit-pixelate")?;
    let output = worker
        .pixelate(buffer, block)
        .wait()
        .context("Pixelate job failed")?;

    super::save_image(&args.output, output)?;

    if verbose > 0 {
        println!("Done.");
    }

    Ok(())
}
