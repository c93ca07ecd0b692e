//! Adjust command
//!
//! Lightness / saturation shift on a background worker. `--value` takes
//! slider units, `--delta` raw HSL units.

use crate::AdjustArgs;
use anyhow::{Context, Result};
use pixkit_color::{Adjustment, HslChannel};
use pixkit_worker::Worker;
use tracing::{info, trace};

pub fn run(args: AdjustArgs, verbose: u8) -> Result<()> {
    trace!(input = %args.input.display(), channel = ?args.channel, value = ?args.value, delta = ?args.delta, "adjust::run");

    let adjustment = to_adjustment(&args);
    let buffer = super::load_image(&args.input)?;
    info!(channel = %adjustment.channel, delta = adjustment.delta, w = buffer.width(), h = buffer.height(), "Adjusting");

    if verbose > 0 {
        println!(
            "Shifting {} of {} by {:+.4}",
            adjustment.channel,
            args.input.display(),
            adjustment.delta
        );
    }

    let worker = Worker::spawn("pixkit-adjust")?;
    let output = worker
        .adjust(buffer, adjustment)
        .wait()
        .context("Adjust job failed")?;

    super::save_image(&args.output, output)?;

    if verbose > 0 {
        println!("Done.");
    }

    Ok(())
}

fn to_adjustment(args: &AdjustArgs) -> Adjustment {
    let channel = HslChannel::from(args.channel);
    match (args.delta, args.value) {
        (Some(delta), _) => Adjustment::new(channel, delta),
        (None, Some(value)) => Adjustment::from_slider(channel, value),
        // clap requires one of the two
        (None, None) => Adjustment::new(channel, 0.0),
    }
}
