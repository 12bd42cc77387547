//! Render error taxonomy
//!
//! A degenerate fit is not an error: it is reported through
//! [`crate::Rendered::degenerate`] and [`crate::Rendered::truncated`].

use thiserror::Error;

/// Errors raised by the render entry points
#[derive(Debug, Error)]
pub enum RenderError {
    /// Region with non-positive width or height
    #[error("invalid region ({x1}, {y1})-({x2}, {y2}): width and height must be positive")]
    InvalidRegion { x1: i32, y1: i32, x2: i32, y2: i32 },

    /// Base or content image could not be opened or decoded
    #[error("failed to decode image {source_name}: {source}")]
    ImageDecode {
        source_name: String,
        #[source]
        source: image::ImageError,
    },

    /// Final canvas could not be encoded
    #[error("failed to encode PNG: {0}")]
    Encode(#[from] png::EncodingError),
}

pub type Result<T> = std::result::Result<T, RenderError>;
