//! Region-growing white fill.
//!
//! Meant for drawings on near-white paper: instead of interpolating, masked
//! pixels are turned solid white by growing a "whiteness" front from every
//! bright pixel of the image.
//!
//! 1. Every pixel whose luma reaches the threshold is a seed, masked or not.
//! 2. Raster-order passes over the interior flip each masked, non-white pixel
//!    that touches a white neighbor. The whiteness map is updated in place, so
//!    a flip is visible to the pixels visited later in the same pass.
//! 3. Passes stop at a fixed point (no flips) or when the budget runs out.
//! 4. Optionally, every masked pixel is then forced to white.
//!
//! Because flips propagate within a pass, the result follows the raster scan
//! order; with 8-connectivity on irregular masks this can differ from a strict
//! breadth-first growth.

use image::Rgba;
use imageproc::definitions::Image;
use log::{debug, trace};

use crate::error::InpaintError;
use crate::inpaint_kit::grid::{MaskGrid, PixelGrid};
use crate::utils::{luma, validate_fill_dimensions, validate_matching_dimensions};

/// Luma at or above which a pixel counts as white paper.
pub const DEFAULT_WHITE_THRESHOLD: f32 = 200.0;

/// Pass budget used by the interactive call site.
pub const DEFAULT_MAX_ITERATIONS: u32 = 1024;

const CHANNELS: usize = 4;
const WHITE: [u8; CHANNELS] = [u8::MAX; CHANNELS];

const FOUR_NEIGHBORS: [(isize, isize); 4] = [(0, -1), (0, 1), (-1, 0), (1, 0)];
const EIGHT_NEIGHBORS: [(isize, isize); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

/// Neighborhood used when looking for white neighbors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "u8", into = "u8")
)]
pub enum Connectivity {
    /// Up, down, left and right.
    #[default]
    Four,
    /// The four orthogonal neighbors plus the four diagonals.
    Eight,
}

impl Connectivity {
    /// Neighbor offsets as `(dx, dy)`.
    #[must_use]
    pub const fn offsets(self) -> &'static [(isize, isize)] {
        match self {
            Self::Four => &FOUR_NEIGHBORS,
            Self::Eight => &EIGHT_NEIGHBORS,
        }
    }
}

impl TryFrom<u8> for Connectivity {
    type Error = InpaintError;

    fn try_from(connectivity: u8) -> Result<Self, Self::Error> {
        match connectivity {
            4 => Ok(Self::Four),
            8 => Ok(Self::Eight),
            _ => Err(InpaintError::InvalidConnectivity { connectivity }),
        }
    }
}

impl From<Connectivity> for u8 {
    fn from(connectivity: Connectivity) -> Self {
        match connectivity {
            Connectivity::Four => 4,
            Connectivity::Eight => 8,
        }
    }
}

/// Parameters of the region-growing fill.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct RegionFillOptions {
    /// Luma (0..=255) at or above which a pixel seeds the fill.
    pub white_threshold: f32,
    /// Neighborhood a white pixel spreads through.
    pub connectivity: Connectivity,
    /// Maximum number of propagation passes. Zero returns the source unchanged.
    pub max_iterations: u32,
    /// Force every masked pixel to white once propagation stops.
    pub fill_residual: bool,
}

impl Default for RegionFillOptions {
    fn default() -> Self {
        Self {
            white_threshold: DEFAULT_WHITE_THRESHOLD,
            connectivity: Connectivity::Four,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            fill_residual: true,
        }
    }
}

impl RegionFillOptions {
    /// Creates validated region-fill options.
    ///
    /// # Errors
    ///
    /// * `InpaintError::InvalidThreshold` - When the threshold is outside `0..=255`
    pub fn new(
        white_threshold: f32,
        connectivity: Connectivity,
        max_iterations: u32,
        fill_residual: bool,
    ) -> Result<Self, InpaintError> {
        let options = Self {
            white_threshold,
            connectivity,
            max_iterations,
            fill_residual,
        };
        options.validate()?;
        Ok(options)
    }

    /// Checks the options without running anything.
    ///
    /// # Errors
    ///
    /// * `InpaintError::InvalidThreshold` - When the threshold is outside `0..=255`
    pub fn validate(&self) -> Result<(), InpaintError> {
        let threshold = self.white_threshold;
        if !(0.0..=255.0).contains(&threshold) {
            return Err(InpaintError::InvalidThreshold { threshold });
        }
        Ok(())
    }
}

/// Outcome of a region-fill run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RegionFillStats {
    /// Propagation passes performed, including the final pass without flips.
    pub passes: u32,
    /// Masked pixels turned white by propagation.
    pub flipped: usize,
    /// Masked pixels turned white by the residual pass.
    pub residual_filled: usize,
    /// Masked pixels of the result that are not `(255, 255, 255, 255)`.
    ///
    /// Zero whenever `fill_residual` ran. Without it, bright masked seeds that
    /// were never repainted count here too.
    pub remaining: usize,
}

/// Paints the masked pixels of `source` white by growing from bright pixels.
///
/// The source is left untouched; a new image of the same size is returned.
/// With `fill_residual` set, every masked pixel of the result is
/// `(255, 255, 255, 255)`. Without it, masked pixels the front could not reach
/// keep their source value.
///
/// # Errors
///
/// * `InpaintError::ImageTooSmall` - When either side is below 2 pixels
/// * `InpaintError::MaskLengthMismatch` / `InpaintError::DimensionMismatch` - When the
///   mask does not line up with the image
/// * `InpaintError::InvalidThreshold` - When the options are invalid
///
/// # Examples
///
/// ```
/// use inpaint_kit::{region_fill_inpaint, MaskGrid, RegionFillOptions};
/// use imageproc::definitions::Image;
/// use image::Rgba;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let mut sketch: Image<Rgba<u8>> = Image::from_pixel(8, 8, Rgba([250, 250, 245, 255]));
/// let mut mask = MaskGrid::new(8, 8);
/// for x in 2..6 {
///     sketch.put_pixel(x, 4, Rgba([20, 20, 20, 255]));
///     mask.set(x, 4, true);
/// }
///
/// let cleaned = region_fill_inpaint(&sketch, &mask, &RegionFillOptions::default())?;
/// assert_eq!(cleaned.get_pixel(3, 4), &Rgba([255, 255, 255, 255]));
/// # Ok(())
/// # }
/// # example().unwrap();
/// ```
pub fn region_fill_inpaint(
    source: &PixelGrid,
    mask: &MaskGrid,
    options: &RegionFillOptions,
) -> Result<PixelGrid, InpaintError> {
    region_fill_inpaint_with_stats(source, mask, options).map(|(image, _)| image)
}

/// Same as [`region_fill_inpaint`], also reporting how the fill progressed.
///
/// # Errors
///
/// See [`region_fill_inpaint`].
pub fn region_fill_inpaint_with_stats(
    source: &PixelGrid,
    mask: &MaskGrid,
    options: &RegionFillOptions,
) -> Result<(PixelGrid, RegionFillStats), InpaintError> {
    validate_inputs_impl(source, mask, options)?;

    let mut result = source.clone();
    let stats = region_fill_in_place_impl(&mut result, mask, options);
    Ok((result, stats))
}

/// Extension trait running the region-growing fill directly on an RGBA image.
pub trait RegionFillInpaintExt {
    /// Returns a filled copy of the image; `self` is not modified.
    ///
    /// # Errors
    ///
    /// See [`region_fill_inpaint`].
    fn region_fill_inpaint(
        &self,
        mask: &MaskGrid,
        options: &RegionFillOptions,
    ) -> Result<Self, InpaintError>
    where
        Self: Sized;

    /// Fills the image in-place, reusing its buffer.
    ///
    /// # Errors
    ///
    /// See [`region_fill_inpaint`]. On error the image is left untouched.
    fn region_fill_inpaint_mut(
        &mut self,
        mask: &MaskGrid,
        options: &RegionFillOptions,
    ) -> Result<&mut Self, InpaintError>;
}

impl RegionFillInpaintExt for Image<Rgba<u8>> {
    fn region_fill_inpaint(
        &self,
        mask: &MaskGrid,
        options: &RegionFillOptions,
    ) -> Result<Self, InpaintError> {
        region_fill_inpaint(self, mask, options)
    }

    fn region_fill_inpaint_mut(
        &mut self,
        mask: &MaskGrid,
        options: &RegionFillOptions,
    ) -> Result<&mut Self, InpaintError> {
        validate_inputs_impl(self, mask, options)?;
        region_fill_in_place_impl(self, mask, options);
        Ok(self)
    }
}

fn validate_inputs_impl(
    image: &PixelGrid,
    mask: &MaskGrid,
    options: &RegionFillOptions,
) -> Result<(), InpaintError> {
    options.validate()?;
    let (width, height) = image.dimensions();
    validate_fill_dimensions(width, height)?;
    validate_matching_dimensions((width, height), mask.dimensions(), mask.len())
}

/// Runs the fill on an already validated image.
fn region_fill_in_place_impl(
    image: &mut PixelGrid,
    mask: &MaskGrid,
    options: &RegionFillOptions,
) -> RegionFillStats {
    let (width, height) = image.dimensions();
    let (width, height) = (width as usize, height as usize);
    let mut stats = RegionFillStats::default();

    debug!(
        "region_fill_inpaint: {width}x{height}, {} masked, threshold={} connectivity={} max_iterations={} fill_residual={}",
        mask.masked_count(),
        options.white_threshold,
        u8::from(options.connectivity),
        options.max_iterations,
        options.fill_residual
    );

    let buffer: &mut [u8] = image;
    if options.max_iterations == 0 {
        stats.remaining = count_remaining_impl(buffer, mask);
        return stats;
    }

    let mut white = whiteness_map_impl(buffer, options.white_threshold);
    let offsets = options.connectivity.offsets();

    for pass in 0..options.max_iterations {
        let flipped = propagate_pass_impl(buffer, &mut white, mask, offsets, width, height);

        stats.passes = pass + 1;
        stats.flipped += flipped;
        trace!("region_fill_inpaint: pass {pass} flipped {flipped}");

        if flipped == 0 {
            break;
        }
    }

    if options.fill_residual {
        for p in 0..width * height {
            if !mask.cell(p) {
                continue;
            }
            if !white[p] {
                white[p] = true;
                stats.residual_filled += 1;
            }
            // Seeds inside the mask may be bright without being pure white.
            paint_white_impl(buffer, p);
        }
    }

    stats.remaining = count_remaining_impl(buffer, mask);

    debug!(
        "region_fill_inpaint: {} passes, {} flipped, {} residual, {} remaining",
        stats.passes, stats.flipped, stats.residual_filled, stats.remaining
    );
    stats
}

/// Marks every pixel of the whole image whose luma reaches `threshold`.
fn whiteness_map_impl(buffer: &[u8], threshold: f32) -> Vec<bool> {
    let threshold = f64::from(threshold);
    buffer
        .chunks_exact(CHANNELS)
        .map(|pixel| luma(pixel[0], pixel[1], pixel[2]) >= threshold)
        .collect()
}

/// One raster-order pass over the interior. Returns the number of flips.
fn propagate_pass_impl(
    buffer: &mut [u8],
    white: &mut [bool],
    mask: &MaskGrid,
    offsets: &[(isize, isize)],
    width: usize,
    height: usize,
) -> usize {
    let mut flipped = 0;

    for y in 1..height - 1 {
        for x in 1..width - 1 {
            let p = y * width + x;
            if !mask.cell(p) || white[p] {
                continue;
            }

            let touches_white = offsets.iter().any(|&(dx, dy)| {
                let nx = x.checked_add_signed(dx).filter(|&nx| nx < width);
                let ny = y.checked_add_signed(dy).filter(|&ny| ny < height);
                matches!((nx, ny), (Some(nx), Some(ny)) if white[ny * width + nx])
            });

            if touches_white {
                white[p] = true;
                paint_white_impl(buffer, p);
                flipped += 1;
            }
        }
    }

    flipped
}

/// Masked pixels whose bytes are not pure white.
fn count_remaining_impl(buffer: &[u8], mask: &MaskGrid) -> usize {
    buffer
        .chunks_exact(CHANNELS)
        .enumerate()
        .filter(|&(p, pixel)| mask.cell(p) && pixel != WHITE)
        .count()
}

#[inline]
fn paint_white_impl(buffer: &mut [u8], p: usize) {
    let i = p * CHANNELS;
    buffer[i..i + CHANNELS].copy_from_slice(&WHITE);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::test_utils::*;

    const BLACK: Rgba<u8> = Rgba([0, 0, 0, 255]);
    const PAPER: Rgba<u8> = Rgba([240, 240, 235, 255]);
    const PURE_WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);

    fn without_residual(connectivity: Connectivity) -> RegionFillOptions {
        RegionFillOptions {
            connectivity,
            fill_residual: false,
            ..RegionFillOptions::default()
        }
    }

    #[test]
    fn region_fill_inpaint_with_empty_mask_returns_identical_image() {
        let image = gradient_image(9, 7);
        let mask = MaskGrid::new(9, 7);

        let result = region_fill_inpaint(&image, &mask, &RegionFillOptions::default()).unwrap();

        assert_eq!(result.as_raw(), image.as_raw());
    }

    #[test]
    fn region_fill_inpaint_with_zero_iterations_returns_copy() {
        let image = gradient_image(6, 6);
        let mask = MaskGrid::filled(6, 6);
        let options = RegionFillOptions {
            max_iterations: 0,
            ..RegionFillOptions::default()
        };

        let (result, stats) = region_fill_inpaint_with_stats(&image, &mask, &options).unwrap();

        assert_eq!(result.as_raw(), image.as_raw());
        assert_eq!(
            stats,
            RegionFillStats {
                remaining: 36,
                ..RegionFillStats::default()
            }
        );
    }

    #[test]
    fn region_fill_inpaint_with_stroke_on_paper_whitens_stroke() {
        let mut image: Image<Rgba<u8>> = Image::from_pixel(7, 7, PAPER);
        let mut mask = MaskGrid::new(7, 7);
        for x in 1..6 {
            image.put_pixel(x, 3, BLACK);
            mask.set(x, 3, true);
        }

        let (result, stats) =
            region_fill_inpaint_with_stats(&image, &mask, &without_residual(Connectivity::Four))
                .unwrap();

        for x in 1..6 {
            assert_eq!(result.get_pixel(x, 3), &PURE_WHITE);
        }
        assert_eq!(result.get_pixel(0, 0), &PAPER);
        assert_eq!(stats.flipped, 5);
        assert_eq!(stats.passes, 2);
        assert_eq!(stats.remaining, 0);
    }

    #[test]
    fn region_fill_inpaint_with_single_seed_propagates_within_one_pass() {
        // Dark 6x3 image, only the left border pixel of the middle row is white.
        let mut image: Image<Rgba<u8>> = Image::from_pixel(6, 3, BLACK);
        image.put_pixel(0, 1, PURE_WHITE);
        let mut mask = MaskGrid::new(6, 3);
        for x in 1..5 {
            mask.set(x, 1, true);
        }

        let (result, stats) =
            region_fill_inpaint_with_stats(&image, &mask, &without_residual(Connectivity::Four))
                .unwrap();

        assert_eq!(stats.flipped, 4);
        assert_eq!(stats.passes, 2);
        for x in 1..5 {
            assert_eq!(result.get_pixel(x, 1), &PURE_WHITE);
        }
        assert_eq!(result.get_pixel(5, 1), &BLACK);
    }

    #[test]
    fn region_fill_inpaint_with_upward_front_needs_one_pass_per_row() {
        // The seed sits below the masked column, against the scan direction.
        let mut image: Image<Rgba<u8>> = Image::from_pixel(3, 6, BLACK);
        image.put_pixel(1, 5, PURE_WHITE);
        let mut mask = MaskGrid::new(3, 6);
        for y in 1..5 {
            mask.set(1, y, true);
        }

        let (result, stats) =
            region_fill_inpaint_with_stats(&image, &mask, &without_residual(Connectivity::Four))
                .unwrap();

        assert_eq!(stats.flipped, 4);
        assert_eq!(stats.passes, 5);
        assert_eq!(result.get_pixel(1, 1), &PURE_WHITE);
    }

    #[test]
    fn region_fill_inpaint_with_pass_budget_leaves_partial_fill() {
        let mut image: Image<Rgba<u8>> = Image::from_pixel(3, 6, BLACK);
        image.put_pixel(1, 5, PURE_WHITE);
        let mut mask = MaskGrid::new(3, 6);
        for y in 1..5 {
            mask.set(1, y, true);
        }
        let options = RegionFillOptions {
            max_iterations: 2,
            ..without_residual(Connectivity::Four)
        };

        let (result, stats) = region_fill_inpaint_with_stats(&image, &mask, &options).unwrap();

        assert_eq!(stats.passes, 2);
        assert_eq!(stats.flipped, 2);
        assert_eq!(stats.remaining, 2);
        assert_eq!(result.get_pixel(1, 4), &PURE_WHITE);
        assert_eq!(result.get_pixel(1, 3), &PURE_WHITE);
        assert_eq!(result.get_pixel(1, 2), &BLACK);
    }

    #[test]
    fn region_fill_inpaint_with_diagonal_seed_depends_on_connectivity() {
        let mut image: Image<Rgba<u8>> = Image::from_pixel(5, 5, BLACK);
        image.put_pixel(0, 0, PURE_WHITE);
        let mut mask = MaskGrid::new(5, 5);
        mask.set(1, 1, true);

        let four =
            region_fill_inpaint(&image, &mask, &without_residual(Connectivity::Four)).unwrap();
        let eight =
            region_fill_inpaint(&image, &mask, &without_residual(Connectivity::Eight)).unwrap();

        assert_eq!(four.get_pixel(1, 1), &BLACK);
        assert_eq!(eight.get_pixel(1, 1), &PURE_WHITE);
    }

    #[test]
    fn region_fill_inpaint_with_unreachable_pixels_fills_residual() {
        let image: Image<Rgba<u8>> = Image::from_pixel(6, 6, BLACK);
        let mut mask = center_mask(6, 6, 1);
        mask.set(0, 0, true);

        let (result, stats) =
            region_fill_inpaint_with_stats(&image, &mask, &RegionFillOptions::default()).unwrap();

        assert_eq!(stats.flipped, 0);
        assert_eq!(stats.passes, 1);
        assert_eq!(stats.residual_filled, 17);
        assert_eq!(stats.remaining, 0);
        for (x, y) in masked_coordinates(&mask) {
            assert_eq!(result.get_pixel(x, y), &PURE_WHITE, "({x}, {y})");
        }
        assert_eq!(result.get_pixel(5, 5), &BLACK);
    }

    #[test]
    fn region_fill_inpaint_without_residual_keeps_unreachable_pixels() {
        let image = ring_with_center(6, 6, BLACK, Rgba([10, 20, 30, 40]), 2);
        let mask = center_mask(6, 6, 2);

        let (result, stats) =
            region_fill_inpaint_with_stats(&image, &mask, &without_residual(Connectivity::Eight))
                .unwrap();

        assert_eq!(result.as_raw(), image.as_raw());
        assert_eq!(stats.remaining, 4);
    }

    #[test]
    fn region_fill_inpaint_with_bright_masked_seed_paints_pure_white() {
        let mut image: Image<Rgba<u8>> = Image::from_pixel(5, 5, BLACK);
        image.put_pixel(2, 2, Rgba([230, 230, 230, 100]));
        let mut mask = MaskGrid::new(5, 5);
        mask.set(2, 2, true);

        let with_residual =
            region_fill_inpaint(&image, &mask, &RegionFillOptions::default()).unwrap();
        let without =
            region_fill_inpaint(&image, &mask, &without_residual(Connectivity::Four)).unwrap();

        assert_eq!(with_residual.get_pixel(2, 2), &PURE_WHITE);
        assert_eq!(without.get_pixel(2, 2), &Rgba([230, 230, 230, 100]));
    }

    #[test]
    fn region_fill_inpaint_with_bright_masked_seed_counts_it_as_remaining() {
        let mut image: Image<Rgba<u8>> = Image::from_pixel(5, 5, BLACK);
        image.put_pixel(2, 2, Rgba([230, 230, 230, 100]));
        let mut mask = MaskGrid::new(5, 5);
        mask.set(2, 2, true);

        let (_, partial) =
            region_fill_inpaint_with_stats(&image, &mask, &without_residual(Connectivity::Four))
                .unwrap();
        let (_, full) =
            region_fill_inpaint_with_stats(&image, &mask, &RegionFillOptions::default()).unwrap();

        assert_eq!(partial.remaining, 1);
        assert_eq!(partial.flipped, 0);
        assert_eq!(full.remaining, 0);
        assert_eq!(full.residual_filled, 0);
    }

    #[test]
    fn region_fill_inpaint_with_eight_connectivity_follows_raster_order() {
        // Seed on the top border, anti-diagonal mask running down-left, one
        // masked cell hanging off the diagonal above the front, one isolated.
        let mut image: Image<Rgba<u8>> = Image::from_pixel(7, 7, BLACK);
        image.put_pixel(5, 0, PURE_WHITE);
        let mut mask = MaskGrid::new(7, 7);
        for (x, y) in [(4, 1), (3, 2), (2, 3), (1, 4), (1, 2), (4, 4)] {
            mask.set(x, y, true);
        }

        let (result, stats) =
            region_fill_inpaint_with_stats(&image, &mask, &without_residual(Connectivity::Eight))
                .unwrap();

        // (1, 2) is scanned before (2, 3) turns white, so it waits a pass.
        assert_eq!(stats.passes, 3);
        assert_eq!(stats.flipped, 5);
        assert_eq!(stats.remaining, 1);
        for (x, y) in [(4, 1), (3, 2), (2, 3), (1, 4), (1, 2)] {
            assert_eq!(result.get_pixel(x, y), &PURE_WHITE, "({x}, {y})");
        }
        assert_eq!(result.get_pixel(4, 4), &BLACK);
        assert_eq!(result.get_pixel(3, 3), &BLACK);

        let one_pass = RegionFillOptions {
            max_iterations: 1,
            ..without_residual(Connectivity::Eight)
        };
        let (result, stats) = region_fill_inpaint_with_stats(&image, &mask, &one_pass).unwrap();

        assert_eq!(stats.flipped, 4);
        assert_eq!(result.get_pixel(1, 4), &PURE_WHITE);
        assert_eq!(result.get_pixel(1, 2), &BLACK);

        let four =
            region_fill_inpaint(&image, &mask, &without_residual(Connectivity::Four)).unwrap();
        assert_eq!(four.as_raw(), image.as_raw());
    }

    #[test]
    fn region_fill_inpaint_with_unmasked_dark_pixels_leaves_them() {
        let mut image: Image<Rgba<u8>> = Image::from_pixel(5, 5, PAPER);
        image.put_pixel(2, 2, BLACK);
        image.put_pixel(3, 2, BLACK);
        let mut mask = MaskGrid::new(5, 5);
        mask.set(2, 2, true);

        let result = region_fill_inpaint(&image, &mask, &RegionFillOptions::default()).unwrap();

        assert_eq!(result.get_pixel(2, 2), &PURE_WHITE);
        assert_eq!(result.get_pixel(3, 2), &BLACK);
    }

    #[test]
    fn region_fill_inpaint_with_threshold_above_paper_finds_no_seeds() {
        let mut image: Image<Rgba<u8>> = Image::from_pixel(5, 5, PAPER);
        image.put_pixel(2, 2, BLACK);
        let mut mask = MaskGrid::new(5, 5);
        mask.set(2, 2, true);
        let options = RegionFillOptions {
            white_threshold: 250.0,
            ..without_residual(Connectivity::Four)
        };

        let (result, stats) = region_fill_inpaint_with_stats(&image, &mask, &options).unwrap();

        assert_eq!(result.get_pixel(2, 2), &BLACK);
        assert_eq!(stats.remaining, 1);
    }

    #[test]
    fn region_fill_inpaint_with_identical_inputs_is_deterministic() {
        let image = gradient_image(15, 12);
        let mut mask = MaskGrid::new(15, 12);
        mask.paint_disc(6.0, 6.0, 9.0);
        let options = RegionFillOptions {
            white_threshold: 120.0,
            ..without_residual(Connectivity::Eight)
        };

        let first = region_fill_inpaint(&image, &mask, &options).unwrap();
        let second = region_fill_inpaint(&image, &mask, &options).unwrap();

        assert_eq!(first.as_raw(), second.as_raw());
    }

    #[test]
    fn region_fill_inpaint_with_mismatched_mask_returns_error() {
        let image = gradient_image(8, 8);
        let mask = MaskGrid::new(7, 8);

        let error = region_fill_inpaint(&image, &mask, &RegionFillOptions::default()).unwrap_err();

        assert_eq!(error.kind(), ErrorKind::DimensionMismatch);
    }

    #[test]
    fn region_fill_inpaint_with_invalid_threshold_returns_error() {
        let image = gradient_image(4, 4);
        let mask = MaskGrid::new(4, 4);
        let options = RegionFillOptions {
            white_threshold: 256.0,
            ..RegionFillOptions::default()
        };

        let error = region_fill_inpaint(&image, &mask, &options).unwrap_err();

        assert_eq!(error, InpaintError::InvalidThreshold { threshold: 256.0 });
        assert_eq!(error.kind(), ErrorKind::InvalidOptions);
    }

    #[test]
    fn new_with_threshold_outside_channel_range_returns_error() {
        assert!(RegionFillOptions::new(-1.0, Connectivity::Four, 10, true).is_err());
        assert!(RegionFillOptions::new(f32::NAN, Connectivity::Four, 10, true).is_err());
        RegionFillOptions::new(0.0, Connectivity::Eight, 10, false).unwrap();
        RegionFillOptions::new(255.0, Connectivity::Four, 0, true).unwrap();
    }

    #[test]
    fn connectivity_try_from_with_supported_values_converts() {
        assert_eq!(Connectivity::try_from(4u8), Ok(Connectivity::Four));
        assert_eq!(Connectivity::try_from(8u8), Ok(Connectivity::Eight));
        assert_eq!(
            Connectivity::try_from(6u8),
            Err(InpaintError::InvalidConnectivity { connectivity: 6 })
        );
        assert_eq!(u8::from(Connectivity::Eight), 8);
        assert_eq!(Connectivity::Four.offsets().len(), 4);
        assert_eq!(Connectivity::Eight.offsets().len(), 8);
    }

    #[test]
    fn default_options_match_interactive_settings() {
        let options = RegionFillOptions::default();
        assert_eq!(options.white_threshold, 200.0);
        assert_eq!(options.connectivity, Connectivity::Four);
        assert_eq!(options.max_iterations, 1024);
        assert!(options.fill_residual);
    }

    #[test]
    fn region_fill_inpaint_mut_with_stroke_matches_owned_variant() {
        let image = gradient_image(10, 10);
        let mask = center_mask(10, 10, 3);
        let options = RegionFillOptions {
            white_threshold: 100.0,
            ..RegionFillOptions::default()
        };

        let owned = image.region_fill_inpaint(&mask, &options).unwrap();
        let mut in_place = image.clone();
        in_place.region_fill_inpaint_mut(&mask, &options).unwrap();

        assert_eq!(owned.as_raw(), in_place.as_raw());
    }
}
