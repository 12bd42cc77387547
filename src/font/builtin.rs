//! Built-in box face
//!
//! Last step of the font fallback chain. Needs no font file, so
//! rendering always makes progress. Metrics are derived from the
//! display width of each character; glyphs are drawn as outlined boxes.

use crate::constants::{BUILTIN_ADVANCE_RATIO, BUILTIN_ASCENT_RATIO, BUILTIN_DESCENT_RATIO};
use crate::utils::color::blend_coverage;
use image::{Rgba, RgbaImage};
use unicode_width::UnicodeWidthChar;

/// Horizontal advance of one character
#[inline]
pub fn advance(ch: char, px: f32) -> f32 {
    let cols = UnicodeWidthChar::width(ch).unwrap_or(0);
    cols as f32 * px * BUILTIN_ADVANCE_RATIO
}

#[inline]
pub fn ascent(px: f32) -> f32 {
    px * BUILTIN_ASCENT_RATIO
}

#[inline]
pub fn descent(px: f32) -> f32 {
    px * BUILTIN_DESCENT_RATIO
}

/// Draw one character as an outlined box sitting on the baseline.
///
/// `x` is the pen position, `baseline` the canvas row of the baseline.
pub fn draw_glyph(
    canvas: &mut RgbaImage,
    x: f32,
    baseline: i64,
    ch: char,
    px: f32,
    color: Rgba<u8>,
) {
    let adv = advance(ch, px);
    if ch.is_whitespace() || adv <= 0.0 {
        return;
    }

    let inset = px * 0.08;
    let left = (x + inset).round() as i64;
    let right = (x + adv - inset).round() as i64;
    let top = baseline - (ascent(px) * 0.9).round() as i64;
    let bottom = baseline;
    if right <= left || bottom <= top {
        // Too small for an outline: a single dot keeps the glyph visible
        fill_rect(canvas, left, top.min(bottom - 1), left + 1, bottom.max(top + 1), color);
        return;
    }

    let stroke = ((px / 10.0).round() as i64).max(1);
    fill_rect(canvas, left, top, right, top + stroke, color);
    fill_rect(canvas, left, bottom - stroke, right, bottom, color);
    fill_rect(canvas, left, top, left + stroke, bottom, color);
    fill_rect(canvas, right - stroke, top, right, bottom, color);
}

/// Fill [x0, x1) x [y0, y1), clipped to the canvas
fn fill_rect(canvas: &mut RgbaImage, x0: i64, y0: i64, x1: i64, y1: i64, color: Rgba<u8>) {
    let (w, h) = (canvas.width() as i64, canvas.height() as i64);
    for y in y0.max(0)..y1.min(h) {
        for x in x0.max(0)..x1.min(w) {
            blend_coverage(canvas.get_pixel_mut(x as u32, y as u32), color, 255);
        }
    }
}
