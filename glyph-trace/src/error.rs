//! Errors that occur while preparing raster input

use thiserror::Error;

/// An error building a [`PixelMask`](crate::PixelMask) from raw data.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum Error {
    #[error("raster size mismatch: expected {expected}, got {actual}")]
    SizeMismatch { expected: usize, actual: usize },
    #[error("raster of {width}x{height} pixels is too large")]
    TooLarge { width: usize, height: usize },
}
