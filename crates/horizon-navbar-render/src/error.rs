//! Error types for the render crate.

use thiserror::Error;

/// Errors that can occur while preparing paint resources.
#[derive(Error, Debug)]
pub enum RenderError {
    /// Invalid grid cell dimensions (zero or negative width or height).
    #[error("invalid atlas cell dimensions: {width}x{height}")]
    InvalidDimensions { width: i32, height: i32 },

    /// The atlas bitmap is empty.
    #[error("atlas bitmap has no pixels")]
    EmptyBitmap,

    /// Decoding an atlas image failed.
    #[error("failed to decode atlas image: {0}")]
    Image(#[from] image::ImageError),
}

/// Result type for render operations.
pub type RenderResult<T> = Result<T, RenderError>;
