use thiserror::Error;

/// Broad classification of an [`InpaintError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The mask does not line up with the image, or the image is too small.
    DimensionMismatch,
    /// A fill option is outside its accepted range.
    InvalidOptions,
}

/// Errors raised by the inpainting engines.
///
/// All of them are detected before the first iteration runs, so a failed call
/// never hands back a partially filled buffer.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InpaintError {
    #[error("Mask dimensions do not match image: expected {expected:?}, got {actual:?}")]
    DimensionMismatch {
        expected: (u32, u32),
        actual: (u32, u32),
    },

    #[error("Mask holds {actual} cells, expected width*height = {expected}")]
    MaskLengthMismatch { expected: usize, actual: usize },

    #[error("Image too small for inpainting: {width}x{height} (both sides must be at least 2)")]
    ImageTooSmall { width: u32, height: u32 },

    #[error("Invalid convergence tolerance: {tolerance} (must be finite and non-negative)")]
    InvalidTolerance { tolerance: f32 },

    #[error("Invalid white threshold: {threshold} (must lie within 0..=255)")]
    InvalidThreshold { threshold: f32 },

    #[error("Invalid connectivity: {connectivity} (must be 4 or 8)")]
    InvalidConnectivity { connectivity: u8 },
}

impl InpaintError {
    /// Returns the broad kind of this error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::DimensionMismatch { .. }
            | Self::MaskLengthMismatch { .. }
            | Self::ImageTooSmall { .. } => ErrorKind::DimensionMismatch,
            Self::InvalidTolerance { .. }
            | Self::InvalidThreshold { .. }
            | Self::InvalidConnectivity { .. } => ErrorKind::InvalidOptions,
        }
    }
}
