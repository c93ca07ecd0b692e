//! Image info command.
//!
//! Dimensions, pixel count, distinct colors and alpha coverage.

use crate::InfoArgs;
use anyhow::Result;
use pixkit_core::{PixelBuffer, Rgba};
use std::collections::HashSet;

/// Summary of one buffer.
#[derive(Debug, PartialEq, Eq)]
struct Summary {
    width: u32,
    height: u32,
    distinct_colors: usize,
    opaque: usize,
    transparent: usize,
}

fn summarize(buffer: &PixelBuffer) -> Summary {
    let mut colors: HashSet<Rgba> = HashSet::new();
    let mut opaque = 0;
    let mut transparent = 0;
    for px in buffer.pixels() {
        colors.insert(px);
        match px.a {
            255 => opaque += 1,
            0 => transparent += 1,
            _ => {}
        }
    }
    Summary {
        width: buffer.width(),
        height: buffer.height(),
        distinct_colors: colors.len(),
        opaque,
        transparent,
    }
}

pub fn run(args: InfoArgs, verbose: u8) -> Result<()> {
    for path in &args.input {
        let buffer = super::load_image(path)?;
        let s = summarize(&buffer);

        println!("{}", path.display());
        println!("  Resolution: {}x{}", s.width, s.height);
        println!("  Pixels:     {}", buffer.pixel_count());
        println!("  Colors:     {}", s.distinct_colors);
        if verbose > 0 {
            println!("  Opaque:     {}", s.opaque);
            println!("  Transparent: {}", s.transparent);
        }

        if args.input.len() > 1 {
            println!();
        }
    }

    Ok(())
}
