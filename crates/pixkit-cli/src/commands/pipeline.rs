//! Pipeline command
//!
//! Loads a YAML stage list and runs the image through it.

use crate::PipelineArgs;
use anyhow::{Context, Result};
use pixkit_ops::PipelineConfig;
use tracing::{debug, info, trace};

pub fn run(args: PipelineArgs, verbose: u8) -> Result<()> {
    trace!(input = %args.input.display(), config = %args.config.display(), "pipeline::run");

    let config = PipelineConfig::from_file(&args.config)
        .with_context(|| format!("Failed to read pipeline: {}", args.config.display()))?;
    let mut pipeline = config.build();

    let buffer = super::load_image(&args.input)?;
    info!(stages = pipeline.len(), w = buffer.width(), h = buffer.height(), "Running pipeline");

    if verbose > 0 {
        for stage in pipeline.stages() {
            let state = if stage.is_visible() { "" } else { " (hidden)" };
            println!("  {} {:?}{}", stage.id(), stage.kind(), state);
        }
    }

    let output = pipeline.run(&buffer);
    debug!(changed = output.changed, "Pipeline finished");

    super::save_image(&args.output, output.buffer)?;

    if verbose > 0 {
        println!("Done.");
    }

    Ok(())
}
