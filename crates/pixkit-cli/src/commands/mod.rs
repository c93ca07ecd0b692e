//! CLI command implementations

pub mod adjust;
pub mod fill;
pub mod info;
pub mod pipeline;
pub mod pixelate;

use anyhow::{Context, Result};
use pixkit_core::PixelBuffer;
use std::path::Path;

/// Load image from path as RGBA8
pub fn load_image(path: &Path) -> Result<PixelBuffer> {
    let rgba = image::open(path)
        .with_context(|| format!("Failed to load: {}", path.display()))?
        .into_rgba8();
    let (width, height) = rgba.dimensions();
    PixelBuffer::from_raw(width, height, rgba.into_raw())
        .with_context(|| format!("Unexpected pixel layout in {}", path.display()))
}

/// Save RGBA8 buffer to path; format follows the extension
pub fn save_image(path: &Path, buffer: PixelBuffer) -> Result<()> {
    let (width, height) = buffer.dimensions();
    let rgba = image::RgbaImage::from_raw(width, height, buffer.into_raw())
        .context("Buffer size does not match its dimensions")?;
    rgba.save(path)
        .with_context(|| format!("Failed to save: {}", path.display()))
}
