//! Rendering a grid to a raster image.
//!
//! Cell `(x, y)` becomes a `scale` x `scale` block whose top-left pixel is
//! `(x * scale, y * scale)`: grid `x` is the image column and grid `y` the
//! image row, the same convention the engine moves by.

use crate::grid::Grid;
use crate::palette::Palette;
use crate::types::TurmiteError;
use image::{Rgb, RgbImage};
use std::path::Path;
use tracing::debug;

/// Converts a grid into an RGB image.
///
/// # Returns
///
/// * `Ok(RgbImage)` of `size * scale` pixels square.
/// * `Err(TurmiteError::RenderError)` if a cell holds a color missing from the palette.
/// * `Err(TurmiteError::ValidationError)` if `scale` is zero.
pub fn render(grid: &Grid, palette: &Palette, scale: u32) -> Result<RgbImage, TurmiteError> {
    if scale == 0 {
        return Err(TurmiteError::ValidationError(
            "Scale must be at least 1".to_string(),
        ));
    }

    let side = u32::try_from(grid.size())
        .ok()
        .and_then(|size| size.checked_mul(scale))
        .ok_or_else(|| {
            TurmiteError::RenderError(format!(
                "Image for a {} grid at scale {} is too large",
                grid.size(),
                scale
            ))
        })?;

    let mut img = RgbImage::new(side, side);

    for (y, row) in grid.rows().enumerate() {
        for (x, &color) in row.iter().enumerate() {
            let rgb = palette.rgb(color).ok_or_else(|| {
                TurmiteError::RenderError(format!(
                    "Color {} at ({}, {}) is not in the palette",
                    color, x, y
                ))
            })?;

            let (px, py) = (x as u32 * scale, y as u32 * scale);
            for dy in 0..scale {
                for dx in 0..scale {
                    img.put_pixel(px + dx, py + dy, Rgb(rgb));
                }
            }
        }
    }

    Ok(img)
}

/// Renders `grid` and saves it as a PNG at `path`.
pub fn export_png<P: AsRef<Path>>(
    grid: &Grid,
    palette: &Palette,
    scale: u32,
    path: P,
) -> Result<(), TurmiteError> {
    let path = path.as_ref();
    let img = render(grid, palette, scale)?;

    img.save_with_format(path, image::ImageFormat::Png)
        .map_err(|e| {
            TurmiteError::FileError(format!("Failed to write image {}: {}", path.display(), e))
        })?;

    debug!(path = %path.display(), width = img.width(), "wrote image");
    Ok(())
}
