//! Harmonic (diffusion) inpainting.
//!
//! Masked pixels are treated as the unknowns of a discrete Laplace equation and
//! unmasked pixels as fixed boundary values. The solver relaxes the unknowns
//! in place, Gauss-Seidel style: every update is visible to the pixels visited
//! after it within the same sweep.
//!
//! ```text
//! u(x, y) = 0.25 * (u(x-1, y) + u(x+1, y) + u(x, y-1) + u(x, y+1))
//! ```
//!
//! The steady state is the smoothest interpolation of the boundary, with no new
//! local extrema. Sweeps alternate their row order (ascending on even sweeps,
//! descending on odd ones) to limit the directional bias sequential relaxation
//! would otherwise leave behind. The outer one-pixel ring of the image is never
//! visited and acts as a fixed boundary even when it is masked.
//!
//! Values are stored back into the 8-bit buffer after every update, so the
//! fixed point is only reached up to that quantization.

use image::Rgba;
use imageproc::definitions::Image;
use itertools::Either;
use log::{debug, trace};

use crate::error::InpaintError;
use crate::inpaint_kit::grid::{MaskGrid, PixelGrid};
use crate::utils::{store_channel, validate_fill_dimensions, validate_matching_dimensions};

/// Sweep budget used by the interactive and server call sites.
pub const DEFAULT_MAX_ITERATIONS: u32 = 1500;

/// Largest per-channel change below which a sweep counts as converged.
pub const DEFAULT_CONVERGENCE_TOLERANCE: f32 = 0.8;

const CHANNELS: usize = 4;
const COLOR_CHANNELS: usize = 3;

/// Parameters of the diffusion solver.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct DiffusionOptions {
    /// Maximum number of sweeps. Zero returns the source unchanged.
    pub max_iterations: u32,
    /// Stop once the largest change of a sweep falls below this value.
    pub convergence_tolerance: f32,
}

impl Default for DiffusionOptions {
    fn default() -> Self {
        Self {
            max_iterations: DEFAULT_MAX_ITERATIONS,
            convergence_tolerance: DEFAULT_CONVERGENCE_TOLERANCE,
        }
    }
}

impl DiffusionOptions {
    /// Creates validated diffusion options.
    ///
    /// # Errors
    ///
    /// * `InpaintError::InvalidTolerance` - When the tolerance is negative or not finite
    pub fn new(max_iterations: u32, convergence_tolerance: f32) -> Result<Self, InpaintError> {
        let options = Self {
            max_iterations,
            convergence_tolerance,
        };
        options.validate()?;
        Ok(options)
    }

    /// Checks the options without running anything.
    ///
    /// # Errors
    ///
    /// * `InpaintError::InvalidTolerance` - When the tolerance is negative or not finite
    pub fn validate(&self) -> Result<(), InpaintError> {
        let tolerance = self.convergence_tolerance;
        if !tolerance.is_finite() || tolerance < 0.0 {
            return Err(InpaintError::InvalidTolerance { tolerance });
        }
        Ok(())
    }
}

/// Outcome of a diffusion run.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DiffusionStats {
    /// Sweeps actually performed.
    pub iterations: u32,
    /// Largest per-channel change of the last sweep.
    pub max_delta: f32,
    /// Whether the run stopped on the tolerance rather than the sweep budget.
    pub converged: bool,
}

/// Fills the masked pixels of `source` by harmonic diffusion.
///
/// The source is left untouched; a new image of the same size is returned.
///
/// # Errors
///
/// * `InpaintError::ImageTooSmall` - When either side is below 2 pixels
/// * `InpaintError::MaskLengthMismatch` / `InpaintError::DimensionMismatch` - When the
///   mask does not line up with the image
/// * `InpaintError::InvalidTolerance` - When the options are invalid
///
/// # Examples
///
/// ```
/// use inpaint_kit::{diffuse_inpaint, DiffusionOptions, MaskGrid};
/// use imageproc::definitions::Image;
/// use image::Rgba;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let image: Image<Rgba<u8>> = Image::from_pixel(16, 16, Rgba([90, 120, 150, 255]));
/// let mut mask = MaskGrid::new(16, 16);
/// mask.paint_disc(8.0, 8.0, 6.0);
///
/// let filled = diffuse_inpaint(&image, &mask, &DiffusionOptions::default())?;
/// assert_eq!(filled.dimensions(), (16, 16));
/// # Ok(())
/// # }
/// # example().unwrap();
/// ```
pub fn diffuse_inpaint(
    source: &PixelGrid,
    mask: &MaskGrid,
    options: &DiffusionOptions,
) -> Result<PixelGrid, InpaintError> {
    diffuse_inpaint_with_stats(source, mask, options).map(|(image, _)| image)
}

/// Same as [`diffuse_inpaint`], also reporting how the solver terminated.
///
/// # Errors
///
/// See [`diffuse_inpaint`].
pub fn diffuse_inpaint_with_stats(
    source: &PixelGrid,
    mask: &MaskGrid,
    options: &DiffusionOptions,
) -> Result<(PixelGrid, DiffusionStats), InpaintError> {
    validate_inputs_impl(source, mask, options)?;

    let mut result = source.clone();
    let stats = diffuse_in_place_impl(&mut result, mask, options);
    Ok((result, stats))
}

/// Extension trait running diffusion inpainting directly on an RGBA image.
pub trait DiffusionInpaintExt {
    /// Returns a filled copy of the image; `self` is not modified.
    ///
    /// # Errors
    ///
    /// See [`diffuse_inpaint`].
    fn diffuse_inpaint(
        &self,
        mask: &MaskGrid,
        options: &DiffusionOptions,
    ) -> Result<Self, InpaintError>
    where
        Self: Sized;

    /// Fills the image in-place, reusing its buffer.
    ///
    /// # Errors
    ///
    /// See [`diffuse_inpaint`]. On error the image is left untouched.
    fn diffuse_inpaint_mut(
        &mut self,
        mask: &MaskGrid,
        options: &DiffusionOptions,
    ) -> Result<&mut Self, InpaintError>;
}

impl DiffusionInpaintExt for Image<Rgba<u8>> {
    fn diffuse_inpaint(
        &self,
        mask: &MaskGrid,
        options: &DiffusionOptions,
    ) -> Result<Self, InpaintError> {
        diffuse_inpaint(self, mask, options)
    }

    fn diffuse_inpaint_mut(
        &mut self,
        mask: &MaskGrid,
        options: &DiffusionOptions,
    ) -> Result<&mut Self, InpaintError> {
        validate_inputs_impl(self, mask, options)?;
        diffuse_in_place_impl(self, mask, options);
        Ok(self)
    }
}

fn validate_inputs_impl(
    image: &PixelGrid,
    mask: &MaskGrid,
    options: &DiffusionOptions,
) -> Result<(), InpaintError> {
    options.validate()?;
    let (width, height) = image.dimensions();
    validate_fill_dimensions(width, height)?;
    validate_matching_dimensions((width, height), mask.dimensions(), mask.len())
}

/// Runs the solver on an already validated image.
fn diffuse_in_place_impl(
    image: &mut PixelGrid,
    mask: &MaskGrid,
    options: &DiffusionOptions,
) -> DiffusionStats {
    let (width, height) = image.dimensions();
    let mut stats = DiffusionStats::default();

    debug!(
        "diffuse_inpaint: {width}x{height}, {} masked, max_iterations={} tolerance={}",
        mask.masked_count(),
        options.max_iterations,
        options.convergence_tolerance
    );

    let buffer: &mut [u8] = image;
    for iteration in 0..options.max_iterations {
        let descending = iteration % 2 == 1;
        let max_delta =
            relax_sweep_impl(buffer, mask, width as usize, height as usize, descending);

        stats.iterations = iteration + 1;
        stats.max_delta = max_delta;
        trace!("diffuse_inpaint: sweep {iteration} max_delta={max_delta}");

        if max_delta < options.convergence_tolerance {
            stats.converged = true;
            break;
        }
    }

    debug!(
        "diffuse_inpaint: {} sweeps, converged={}, last max_delta={}",
        stats.iterations, stats.converged, stats.max_delta
    );
    stats
}

/// One Gauss-Seidel sweep over the interior. Returns the largest channel change.
fn relax_sweep_impl(
    buffer: &mut [u8],
    mask: &MaskGrid,
    width: usize,
    height: usize,
    descending: bool,
) -> f32 {
    let rows = 1..height - 1;
    let rows = if descending {
        Either::Left(rows.rev())
    } else {
        Either::Right(rows)
    };

    let stride = width * CHANNELS;
    let mut max_delta = 0.0f32;

    for y in rows {
        for x in 1..width - 1 {
            let p = y * width + x;
            if !mask.cell(p) {
                continue;
            }

            let i = p * CHANNELS;
            let (left, right, up, down) = (i - CHANNELS, i + CHANNELS, i - stride, i + stride);

            for c in 0..COLOR_CHANNELS {
                let sum = f32::from(buffer[left + c])
                    + f32::from(buffer[right + c])
                    + f32::from(buffer[up + c])
                    + f32::from(buffer[down + c]);
                let value = 0.25 * sum;
                let delta = (value - f32::from(buffer[i + c])).abs();
                if delta > max_delta {
                    max_delta = delta;
                }
                buffer[i + c] = store_channel(value);
            }
            buffer[i + 3] = u8::MAX;
        }
    }

    max_delta
}
