//! Font loading and text measurement
//!
//! Handles:
//! - TTF/OTF font loading (fontdue)
//! - Fallback resolution: configured file -> generic system face -> built-in face
//! - Per-glyph CJK fallback face
//! - String width and line metrics at an arbitrary pixel size
//! - Glyph drawing onto RGBA canvases

pub mod builtin;
pub mod loader;
pub mod sized;

pub use loader::{FaceOrigin, FontLoader};
pub use sized::SizedFont;

/// Width and vertical metrics of text at one fixed size.
///
/// Implemented by [`SizedFont`]; the wrap engine and block measurer
/// only depend on this trait.
pub trait MeasureText {
    /// Advance width of `text` in pixels
    fn text_width(&self, text: &str) -> f32;
    /// Distance from line top to baseline (pixels, positive)
    fn ascent(&self) -> f32;
    /// Distance from baseline to line bottom (pixels, positive)
    fn descent(&self) -> f32;
}

impl<T: MeasureText + ?Sized> MeasureText for &T {
    fn text_width(&self, text: &str) -> f32 {
        (**self).text_width(text)
    }

    fn ascent(&self) -> f32 {
        (**self).ascent()
    }

    fn descent(&self) -> f32 {
        (**self).descent()
    }
}
