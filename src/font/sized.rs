//! Faces at a fixed pixel size
//!
//! Measures strings and draws them onto RGBA canvases, picking the
//! primary or CJK face per glyph.

use super::builtin;
use super::loader::{Face, FontLoader};
use super::MeasureText;
use crate::utils::color::blend_coverage;
use fontdue::Font;
use image::{Rgba, RgbaImage};

/// Face chosen for one character
enum GlyphFace<'a> {
    Outline(&'a Font),
    Builtin,
}

/// Borrowed view of a [`FontLoader`] at one pixel size
pub struct SizedFont<'a> {
    loader: &'a FontLoader,
    px: f32,
}

impl<'a> SizedFont<'a> {
    pub(crate) fn new(loader: &'a FontLoader, px: f32) -> Self {
        Self { loader, px }
    }

    /// Pixel size of this view
    pub fn px(&self) -> f32 {
        self.px
    }

    /// Primary face unless it lacks the glyph and the CJK face has it
    fn face_for(&self, ch: char) -> GlyphFace<'a> {
        let loader: &'a FontLoader = self.loader;
        let cjk = loader.cjk.as_ref().filter(|f| f.lookup_glyph_index(ch) != 0);
        match &loader.primary {
            Face::Outline(font) if font.lookup_glyph_index(ch) != 0 => GlyphFace::Outline(font),
            Face::Outline(font) => cjk.map_or(GlyphFace::Outline(font), GlyphFace::Outline),
            Face::Builtin => cjk.map_or(GlyphFace::Builtin, GlyphFace::Outline),
        }
    }

    fn advance(&self, ch: char) -> f32 {
        match self.face_for(ch) {
            GlyphFace::Outline(font) => font.metrics(ch, self.px).advance_width,
            GlyphFace::Builtin => builtin::advance(ch, self.px),
        }
    }

    /// Draw `text` with its line top at `y_top`, pen starting at `x`.
    ///
    /// Returns the advance consumed, equal to `text_width(text)`.
    pub fn draw(
        &self,
        canvas: &mut RgbaImage,
        x: f32,
        y_top: i64,
        text: &str,
        color: Rgba<u8>,
    ) -> f32 {
        let baseline = y_top + self.ascent().round() as i64;
        let mut pen = x;
        for ch in text.chars() {
            match self.face_for(ch) {
                GlyphFace::Outline(font) => {
                    let (metrics, bitmap) = font.rasterize(ch, self.px);
                    let gx = pen.round() as i64 + metrics.xmin as i64;
                    let gy = baseline - (metrics.ymin as i64 + metrics.height as i64);
                    blit_coverage(canvas, gx, gy, metrics.width, metrics.height, &bitmap, color);
                    pen += metrics.advance_width;
                }
                GlyphFace::Builtin => {
                    builtin::draw_glyph(canvas, pen, baseline, ch, self.px, color);
                    pen += builtin::advance(ch, self.px);
                }
            }
        }
        pen - x
    }
}

impl MeasureText for SizedFont<'_> {
    fn text_width(&self, text: &str) -> f32 {
        text.chars().map(|ch| self.advance(ch)).sum()
    }

    fn ascent(&self) -> f32 {
        match &self.loader.primary {
            Face::Outline(font) => font
                .horizontal_line_metrics(self.px)
                .map(|m| m.ascent)
                .unwrap_or_else(|| builtin::ascent(self.px)),
            Face::Builtin => builtin::ascent(self.px),
        }
    }

    fn descent(&self) -> f32 {
        match &self.loader.primary {
            // fontdue reports descent below the baseline as negative
            Face::Outline(font) => font
                .horizontal_line_metrics(self.px)
                .map(|m| -m.descent)
                .unwrap_or_else(|| builtin::descent(self.px)),
            Face::Builtin => builtin::descent(self.px),
        }
    }
}

/// Blend a coverage bitmap onto the canvas, clipped to its bounds
fn blit_coverage(
    canvas: &mut RgbaImage,
    x0: i64,
    y0: i64,
    width: usize,
    height: usize,
    bitmap: &[u8],
    color: Rgba<u8>,
) {
    let (cw, ch) = (canvas.width() as i64, canvas.height() as i64);
    for row in 0..height {
        let y = y0 + row as i64;
        if y < 0 || y >= ch {
            continue;
        }
        for col in 0..width {
            let x = x0 + col as i64;
            if x < 0 || x >= cw {
                continue;
            }
            let coverage = bitmap.get(row * width + col).copied().unwrap_or(0);
            if coverage == 0 {
                continue;
            }
            blend_coverage(canvas.get_pixel_mut(x as u32, y as u32), color, coverage);
        }
    }
}
