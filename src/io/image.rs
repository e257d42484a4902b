//! Pixel rendering and PNG export

use crate::io::error::{BitartError, Result};
use crate::io::palette::Palette;
use crate::spatial::Grid;
use image::{Rgb, RgbImage};
use std::path::Path;

/// Render every cell as a `scale × scale` block
///
/// A scale of zero is treated as one.
pub fn render(grid: &Grid, palette: &Palette, scale: u32) -> RgbImage {
    let scale = scale.max(1);
    let colors = grid.cells().map(|value| palette.color(value));

    RgbImage::from_fn(
        grid.width() as u32 * scale,
        grid.height() as u32 * scale,
        |px, py| {
            colors
                .get(((py / scale) as usize, (px / scale) as usize))
                .copied()
                .unwrap_or(Rgb([0, 0, 0]))
        },
    )
}

/// Save an image as PNG, creating parent directories as needed
///
/// # Errors
///
/// Returns an error if:
/// - The parent directory cannot be created
/// - The image cannot be encoded or written
pub fn export_png(image: &RgbImage, output_path: &Path) -> Result<()> {
    if let Some(parent) = output_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| BitartError::FileSystem {
            path: parent.to_path_buf(),
            operation: "create directory",
            source: e,
        })?;
    }

    image
        .save_with_format(output_path, image::ImageFormat::Png)
        .map_err(|e| BitartError::ImageExport {
            path: output_path.to_path_buf(),
            source: e,
        })
}
