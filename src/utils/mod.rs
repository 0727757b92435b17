//! Internal helpers shared by the inpainting engines.

use crate::error::InpaintError;

/// Smallest side length the engines accept; both need a one-pixel border ring.
pub const MIN_SIDE: u32 = 2;

/// Rec. 709 luma weights for red, green and blue.
const LUMA_WEIGHTS: [f64; 3] = [0.2126, 0.7152, 0.0722];

/// Validates that an image is large enough to have an interior.
///
/// # Arguments
///
/// * `width` - The width of the image
/// * `height` - The height of the image
///
/// # Returns
///
/// `Ok(())` if both sides are at least [`MIN_SIDE`], otherwise
/// `InpaintError::ImageTooSmall`
pub fn validate_fill_dimensions(width: u32, height: u32) -> Result<(), InpaintError> {
    if width < MIN_SIDE || height < MIN_SIDE {
        Err(InpaintError::ImageTooSmall { width, height })
    } else {
        Ok(())
    }
}

/// Validates that a mask lines up cell-for-cell with its image.
///
/// # Arguments
///
/// * `image` - `(width, height)` of the source image
/// * `mask` - `(width, height)` of the mask
/// * `mask_len` - Number of cells actually stored in the mask
pub fn validate_matching_dimensions(
    image: (u32, u32),
    mask: (u32, u32),
    mask_len: usize,
) -> Result<(), InpaintError> {
    let expected = image.0 as usize * image.1 as usize;
    if mask_len != expected {
        return Err(InpaintError::MaskLengthMismatch {
            expected,
            actual: mask_len,
        });
    }
    if image != mask {
        return Err(InpaintError::DimensionMismatch {
            expected: image,
            actual: mask,
        });
    }
    Ok(())
}

/// Weighted grayscale intensity of an RGB triple, in the 0..=255 range.
#[inline]
#[must_use]
pub fn luma(red: u8, green: u8, blue: u8) -> f64 {
    LUMA_WEIGHTS[0] * f64::from(red)
        + LUMA_WEIGHTS[1] * f64::from(green)
        + LUMA_WEIGHTS[2] * f64::from(blue)
}

/// Converts a computed channel value to a stored byte.
///
/// Clamps to `0..=255` and rounds half to even, the conversion a clamped byte
/// array applies on write. NaN stores as zero.
#[inline]
#[must_use]
pub fn store_channel(value: f32) -> u8 {
    if value.is_nan() {
        return 0;
    }
    value.clamp(0.0, 255.0).round_ties_even() as u8
}
