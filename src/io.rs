//! Decoding and encoding helpers for the `inpaint_demo` tool.

use image::imageops::{self, FilterType};
use image::{DynamicImage, ImageFormat};
use std::path::Path;

use crate::config::{MaskSource, WorkingSize};
use crate::inpaint_kit::grid::{MaskGrid, PixelGrid};

/// Loads any supported raster image as RGBA8.
pub fn load_rgba_image(path: &Path) -> Result<PixelGrid, String> {
    open_impl(path).map(|image| image.to_rgba8())
}

/// Loads a mask image and converts it according to `source`.
///
/// With a working size the mask is resampled with nearest-neighbor filtering,
/// so it stays binary.
pub fn load_mask(
    path: &Path,
    source: MaskSource,
    working_size: Option<WorkingSize>,
) -> Result<MaskGrid, String> {
    let image = open_impl(path)?;
    let image = match working_size {
        Some(size) => image.resize_exact(size.width, size.height, FilterType::Nearest),
        None => image,
    };
    Ok(match source {
        MaskSource::Luma => MaskGrid::from_luma(&image.to_luma8()),
        MaskSource::Alpha => MaskGrid::from_alpha(&image.to_rgba8()),
    })
}

/// Resamples an image to the working size.
#[must_use]
pub fn resize_to(image: &PixelGrid, size: WorkingSize) -> PixelGrid {
    imageops::resize(image, size.width, size.height, FilterType::Triangle)
}

/// Encodes the result as PNG.
pub fn save_png(path: &Path, image: &PixelGrid) -> Result<(), String> {
    image
        .save_with_format(path, ImageFormat::Png)
        .map_err(|e| format!("Failed to write {}: {e}", path.display()))
}

fn open_impl(path: &Path) -> Result<DynamicImage, String> {
    image::open(path).map_err(|e| format!("Failed to open image {}: {e}", path.display()))
}
