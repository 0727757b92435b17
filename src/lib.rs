//! # inpaint-kit
//!
//! Mask-driven inpainting for RGBA images, without any learned model.
//!
//! Two interchangeable engines fill the pixels selected by a [`MaskGrid`] from
//! the pixels around them:
//!
//! - **Diffusion**: Harmonic interpolation by in-place Gauss-Seidel relaxation of
//!   the discrete Laplace equation, for smooth photographic or sketch backgrounds
//! - **Region Fill**: Whiteness front grown from bright pixels, painting masked
//!   strokes solid white on near-white paper
//!
//! Both engines borrow the source image and return a new one of the same size,
//! so the original stays available after a fill attempt. They are pure and
//! deterministic: the same image, mask and options always give the same bytes.
//!
//! ## Example Usage
//!
//! ```no_run
//! use inpaint_kit::{
//!     DiffusionInpaintExt, DiffusionOptions, InpaintAlgorithm, InpaintExt, MaskGrid,
//!     RegionFillInpaintExt, RegionFillOptions,
//! };
//! use imageproc::definitions::Image;
//! use image::Rgba;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let image: Image<Rgba<u8>> = Image::new(256, 256);
//! let mut mask = MaskGrid::new(256, 256);
//! mask.paint_disc(128.0, 128.0, 20.0);
//!
//! // Smooth fill from the surrounding pixels
//! let smooth = image.diffuse_inpaint(&mask, &DiffusionOptions::default())?;
//!
//! // Paint the stroke white on a paper background
//! let cleaned = image.region_fill_inpaint(&mask, &RegionFillOptions::default())?;
//!
//! // Engine chosen at runtime
//! let filled = image.inpaint(&mask, &InpaintAlgorithm::default())?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Features
//!
//! - `serde`: Serialization of masks and options (optional)
//! - `cli` (default): JSON run configuration, image decoding helpers and the
//!   `inpaint_demo` binary

mod error;
mod inpaint_kit;
mod utils;

#[cfg(feature = "cli")]
pub mod config;
#[cfg(feature = "cli")]
pub mod io;

#[cfg(test)]
mod test_utils;

pub use error::{ErrorKind, InpaintError};
pub use inpaint_kit::algorithm::{
    FillStats, InpaintAlgorithm, InpaintExt, InpaintJob, inpaint, inpaint_batch,
    inpaint_with_stats,
};
pub use inpaint_kit::diffusion::{
    DiffusionInpaintExt, DiffusionOptions, DiffusionStats, diffuse_inpaint,
    diffuse_inpaint_with_stats,
};
pub use inpaint_kit::grid::{MaskGrid, PixelGrid};
pub use inpaint_kit::region_fill::{
    Connectivity, RegionFillInpaintExt, RegionFillOptions, RegionFillStats, region_fill_inpaint,
    region_fill_inpaint_with_stats,
};

// Re-export imageproc::definitions::Image for convenience
pub use imageproc::definitions::Image;
