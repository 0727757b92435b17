use image::{Luma, Rgba};
use imageproc::definitions::Image;
use itertools::iproduct;

use crate::error::InpaintError;

/// RGBA8 pixel grid consumed and produced by the engines.
pub type PixelGrid = Image<Rgba<u8>>;

/// Binary fill mask aligned cell-for-cell with a [`PixelGrid`].
///
/// A cell value of 1 marks the pixel as eligible for filling, 0 keeps the
/// original pixel. Cells are stored row-major, one byte each.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "RawMask")
)]
pub struct MaskGrid {
    width: u32,
    height: u32,
    cells: Vec<u8>,
}

/// Unchecked serialized form, validated through [`MaskGrid::from_raw`].
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawMask {
    width: u32,
    height: u32,
    cells: Vec<u8>,
}

#[cfg(feature = "serde")]
impl TryFrom<RawMask> for MaskGrid {
    type Error = InpaintError;

    fn try_from(raw: RawMask) -> Result<Self, Self::Error> {
        Self::from_raw(raw.width, raw.height, raw.cells)
    }
}

impl MaskGrid {
    /// Creates an empty mask with no cells selected.
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            cells: vec![0; width as usize * height as usize],
        }
    }

    /// Creates a mask with every cell selected.
    #[must_use]
    pub fn filled(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            cells: vec![1; width as usize * height as usize],
        }
    }

    /// Wraps a raw row-major cell buffer.
    ///
    /// Any nonzero value is treated as selected and normalized to 1.
    ///
    /// # Errors
    ///
    /// * `InpaintError::MaskLengthMismatch` - When `cells.len() != width * height`
    ///
    /// # Examples
    ///
    /// ```
    /// use inpaint_kit::MaskGrid;
    ///
    /// let mask = MaskGrid::from_raw(2, 2, vec![0, 1, 1, 0]).unwrap();
    /// assert!(mask.is_masked(1, 0));
    /// assert!(MaskGrid::from_raw(2, 2, vec![0, 1, 1]).is_err());
    /// ```
    pub fn from_raw(width: u32, height: u32, mut cells: Vec<u8>) -> Result<Self, InpaintError> {
        let expected = width as usize * height as usize;
        if cells.len() != expected {
            return Err(InpaintError::MaskLengthMismatch {
                expected,
                actual: cells.len(),
            });
        }
        cells.iter_mut().for_each(|cell| *cell = u8::from(*cell != 0));
        Ok(Self {
            width,
            height,
            cells,
        })
    }

    /// Builds a mask from a grayscale image; any nonzero luma selects the cell.
    #[must_use]
    pub fn from_luma(mask: &Image<Luma<u8>>) -> Self {
        let (width, height) = mask.dimensions();
        let cells = mask.pixels().map(|Luma([v])| u8::from(*v != 0)).collect();
        Self {
            width,
            height,
            cells,
        }
    }

    /// Builds a mask from a painted RGBA overlay; any visible pixel (alpha > 0)
    /// selects the cell.
    #[must_use]
    pub fn from_alpha(overlay: &Image<Rgba<u8>>) -> Self {
        let (width, height) = overlay.dimensions();
        let cells = overlay
            .pixels()
            .map(|Rgba([_, _, _, alpha])| u8::from(*alpha > 0))
            .collect();
        Self {
            width,
            height,
            cells,
        }
    }

    #[inline]
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    #[must_use]
    pub const fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Number of cells stored.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Row-major cell buffer, each entry 0 or 1.
    #[inline]
    #[must_use]
    pub fn as_raw(&self) -> &[u8] {
        &self.cells
    }

    /// Returns whether the cell at `(x, y)` is selected. Out-of-range
    /// coordinates are never selected.
    #[must_use]
    pub fn is_masked(&self, x: u32, y: u32) -> bool {
        x < self.width && y < self.height && self.cells[self.index(x, y)] == 1
    }

    /// Selects or clears a single cell. Out-of-range coordinates are ignored.
    pub fn set(&mut self, x: u32, y: u32, masked: bool) {
        if x < self.width && y < self.height {
            let index = self.index(x, y);
            self.cells[index] = u8::from(masked);
        }
    }

    /// Number of selected cells.
    #[must_use]
    pub fn masked_count(&self) -> usize {
        self.cells.iter().filter(|&&cell| cell == 1).count()
    }

    /// Clears every cell.
    pub fn clear(&mut self) {
        self.cells.fill(0);
    }

    /// Selects every cell whose center lies within `diameter / 2` of `(cx, cy)`.
    ///
    /// Coordinates are in pixel units with `(0.0, 0.0)` at the top-left corner
    /// of the grid, so the center of cell `(x, y)` is `(x + 0.5, y + 0.5)`.
    pub fn paint_disc(&mut self, cx: f32, cy: f32, diameter: f32) {
        self.stamp_disc_impl(cx, cy, diameter, 1);
    }

    /// Clears every cell [`MaskGrid::paint_disc`] would select.
    pub fn erase_disc(&mut self, cx: f32, cy: f32, diameter: f32) {
        self.stamp_disc_impl(cx, cy, diameter, 0);
    }

    /// Renders the mask as a grayscale image: selected cells are 255, others 0.
    #[must_use]
    pub fn to_luma(&self) -> Image<Luma<u8>> {
        Image::from_fn(self.width, self.height, |x, y| {
            Luma([if self.is_masked(x, y) { 255 } else { 0 }])
        })
    }

    #[inline]
    pub(crate) const fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    /// Cell value by flat row-major index.
    #[inline]
    pub(crate) fn cell(&self, index: usize) -> bool {
        self.cells[index] == 1
    }

    fn stamp_disc_impl(&mut self, cx: f32, cy: f32, diameter: f32, value: u8) {
        let radius = diameter.max(0.0) / 2.0;
        if self.is_empty() || !cx.is_finite() || !cy.is_finite() || !radius.is_finite() {
            return;
        }
        let radius_sq = radius * radius;

        let last_x = self.width - 1;
        let last_y = self.height - 1;
        let min_x = (cx - radius).floor().clamp(0.0, last_x as f32) as u32;
        let max_x = (cx + radius).ceil().clamp(0.0, last_x as f32) as u32;
        let min_y = (cy - radius).floor().clamp(0.0, last_y as f32) as u32;
        let max_y = (cy + radius).ceil().clamp(0.0, last_y as f32) as u32;

        iproduct!(min_y..=max_y, min_x..=max_x).for_each(|(y, x)| {
            let dx = x as f32 + 0.5 - cx;
            let dy = y as f32 + 0.5 - cy;
            if dx * dx + dy * dy <= radius_sq {
                let index = self.index(x, y);
                self.cells[index] = value;
            }
        });
    }
}
