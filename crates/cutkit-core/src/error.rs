//! Error handling for CutKit
//!
//! Provides the error raised while turning an image into a raster plan.
//! Settings errors live in `cutkit-settings`.

use thiserror::Error;

/// Raster plan error type
///
/// Raised when an image cannot be turned into a raster scan plan. There is
/// no degraded plan: the raster cut is not created.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RasterError {
    /// Pixel encoding has no intensity rule, even after RGBA conversion
    #[error("Unsupported color mode: {0}")]
    UnsupportedColorMode(String),

    /// Palette-indexed image without a palette
    #[error("Palette-indexed image has no palette")]
    MissingPalette,

    /// A pixel references a palette entry that does not exist
    #[error("Palette index {index} out of range ({entries} entries)")]
    PaletteIndexOutOfRange {
        /// The offending pixel value.
        index: u8,
        /// Number of entries in the palette.
        entries: usize,
    },

    /// Pixel buffer does not match the declared dimensions
    #[error("Pixel buffer holds {actual} bytes, {width}x{height} needs {expected}")]
    BufferSize {
        /// Declared width in pixels.
        width: u32,
        /// Declared height in pixels.
        height: u32,
        /// Bytes required by the dimensions.
        expected: usize,
        /// Bytes supplied.
        actual: usize,
    },
}

/// Result type alias for raster plan construction.
pub type RasterResult<T> = std::result::Result<T, RasterError>;
