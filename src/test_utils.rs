//! Fixtures shared by the unit tests.

use image::Rgba;
use imageproc::definitions::Image;
use itertools::iproduct;

use crate::MaskGrid;

/// Opaque image whose channels vary with position, so that no two
/// neighboring pixels are equal.
pub fn gradient_image(width: u32, height: u32) -> Image<Rgba<u8>> {
    Image::from_fn(width, height, |x, y| {
        Rgba([
            ((x * 37 + y * 11) % 256) as u8,
            ((x * 5 + y * 53) % 256) as u8,
            ((x * y * 7 + 19) % 256) as u8,
            255,
        ])
    })
}

/// Image filled with `ring`, except for the square `inset..side-inset` which
/// holds `center`.
pub fn ring_with_center(
    width: u32,
    height: u32,
    ring: Rgba<u8>,
    center: Rgba<u8>,
    inset: u32,
) -> Image<Rgba<u8>> {
    Image::from_fn(width, height, |x, y| {
        if in_center(x, y, width, height, inset) {
            center
        } else {
            ring
        }
    })
}

/// Mask selecting the square `inset..side-inset`.
pub fn center_mask(width: u32, height: u32, inset: u32) -> MaskGrid {
    let mut mask = MaskGrid::new(width, height);
    iproduct!(0..height, 0..width)
        .filter(|&(y, x)| in_center(x, y, width, height, inset))
        .for_each(|(y, x)| mask.set(x, y, true));
    mask
}

/// Coordinates of the one-pixel outer ring, as `(x, y)`.
pub fn border_coordinates(width: u32, height: u32) -> Vec<(u32, u32)> {
    iproduct!(0..height, 0..width)
        .filter(|&(y, x)| x == 0 || y == 0 || x == width - 1 || y == height - 1)
        .map(|(y, x)| (x, y))
        .collect()
}

/// Coordinates of the selected mask cells, as `(x, y)`.
pub fn masked_coordinates(mask: &MaskGrid) -> Vec<(u32, u32)> {
    iproduct!(0..mask.height(), 0..mask.width())
        .filter(|&(y, x)| mask.is_masked(x, y))
        .map(|(y, x)| (x, y))
        .collect()
}

fn in_center(x: u32, y: u32, width: u32, height: u32, inset: u32) -> bool {
    x >= inset && y >= inset && x + inset < width && y + inset < height
}
