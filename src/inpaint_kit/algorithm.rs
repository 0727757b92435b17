use image::Rgba;
use imageproc::definitions::Image;
use log::debug;
use rayon::prelude::*;

use crate::error::InpaintError;
use crate::inpaint_kit::diffusion::{DiffusionOptions, DiffusionStats, diffuse_inpaint_with_stats};
use crate::inpaint_kit::grid::{MaskGrid, PixelGrid};
use crate::inpaint_kit::region_fill::{
    RegionFillOptions, RegionFillStats, region_fill_inpaint_with_stats,
};

/// Fill engine to run, together with its options.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(tag = "algorithm", rename_all = "kebab-case")
)]
pub enum InpaintAlgorithm {
    /// Smooth harmonic interpolation from the surrounding pixels.
    Diffusion(DiffusionOptions),
    /// Solid white fill grown from bright pixels.
    RegionFill(RegionFillOptions),
}

impl Default for InpaintAlgorithm {
    fn default() -> Self {
        Self::Diffusion(DiffusionOptions::default())
    }
}

impl InpaintAlgorithm {
    /// Short identifier of the engine.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Diffusion(_) => "diffusion",
            Self::RegionFill(_) => "region-fill",
        }
    }

    /// Checks the engine options without running anything.
    ///
    /// # Errors
    ///
    /// Any option error of the selected engine.
    pub fn validate(&self) -> Result<(), InpaintError> {
        match self {
            Self::Diffusion(options) => options.validate(),
            Self::RegionFill(options) => options.validate(),
        }
    }
}

/// Termination report of whichever engine ran.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FillStats {
    /// Sweeps and final delta of the diffusion solver.
    Diffusion(DiffusionStats),
    /// Pass and pixel counts of the region fill.
    RegionFill(RegionFillStats),
}

/// Runs the selected engine on `source`.
///
/// # Errors
///
/// The validation errors of the selected engine.
pub fn inpaint(
    source: &PixelGrid,
    mask: &MaskGrid,
    algorithm: &InpaintAlgorithm,
) -> Result<PixelGrid, InpaintError> {
    inpaint_with_stats(source, mask, algorithm).map(|(image, _)| image)
}

/// Same as [`inpaint`], also returning the engine's termination report.
///
/// # Errors
///
/// The validation errors of the selected engine.
pub fn inpaint_with_stats(
    source: &PixelGrid,
    mask: &MaskGrid,
    algorithm: &InpaintAlgorithm,
) -> Result<(PixelGrid, FillStats), InpaintError> {
    debug!("inpaint: running {}", algorithm.name());
    match algorithm {
        InpaintAlgorithm::Diffusion(options) => diffuse_inpaint_with_stats(source, mask, options)
            .map(|(image, stats)| (image, FillStats::Diffusion(stats))),
        InpaintAlgorithm::RegionFill(options) => {
            region_fill_inpaint_with_stats(source, mask, options)
                .map(|(image, stats)| (image, FillStats::RegionFill(stats)))
        }
    }
}

/// Extension trait selecting the engine at runtime.
pub trait InpaintExt {
    /// Returns a filled copy of the image using the selected engine.
    ///
    /// # Errors
    ///
    /// See [`inpaint`].
    ///
    /// # Examples
    ///
    /// ```
    /// use inpaint_kit::{InpaintAlgorithm, InpaintExt, MaskGrid, RegionFillOptions};
    /// use imageproc::definitions::Image;
    /// use image::Rgba;
    ///
    /// # fn example() -> Result<(), Box<dyn std::error::Error>> {
    /// let image: Image<Rgba<u8>> = Image::from_pixel(10, 10, Rgba([0, 0, 0, 255]));
    /// let mask = MaskGrid::filled(10, 10);
    ///
    /// let filled = image.inpaint(&mask, &InpaintAlgorithm::RegionFill(RegionFillOptions::default()))?;
    /// assert_eq!(filled.get_pixel(0, 0), &Rgba([255, 255, 255, 255]));
    /// # Ok(())
    /// # }
    /// # example().unwrap();
    /// ```
    fn inpaint(&self, mask: &MaskGrid, algorithm: &InpaintAlgorithm) -> Result<Self, InpaintError>
    where
        Self: Sized;
}

impl InpaintExt for Image<Rgba<u8>> {
    fn inpaint(&self, mask: &MaskGrid, algorithm: &InpaintAlgorithm) -> Result<Self, InpaintError> {
        inpaint(self, mask, algorithm)
    }
}

/// One independent inpainting request.
#[derive(Debug, Clone)]
pub struct InpaintJob {
    pub source: PixelGrid,
    pub mask: MaskGrid,
    pub algorithm: InpaintAlgorithm,
}

impl InpaintJob {
    #[must_use]
    pub const fn new(source: PixelGrid, mask: MaskGrid, algorithm: InpaintAlgorithm) -> Self {
        Self {
            source,
            mask,
            algorithm,
        }
    }
}

/// Runs independent jobs in parallel.
///
/// Results come back in job order, and each one is identical to running its
/// job alone through [`inpaint`].
#[must_use]
pub fn inpaint_batch(jobs: &[InpaintJob]) -> Vec<Result<PixelGrid, InpaintError>> {
    debug!("inpaint_batch: {} jobs", jobs.len());
    jobs.par_iter()
        .map(|job| inpaint(&job.source, &job.mask, &job.algorithm))
        .collect()
}
