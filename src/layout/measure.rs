//! Block measurer

use super::wrap::Line;
use crate::font::MeasureText;

/// Absorbs float noise like 22.000002 before rounding up
const PIXEL_EPSILON: f32 = 1e-3;

/// Size of a wrapped block
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockMetrics {
    /// Widest line (pixels)
    pub width: u32,
    /// `line_height * max(1, lines)`
    pub height: u32,
    /// Vertical advance per line
    pub line_height: u32,
}

/// Whole-pixel width of a measured line
pub fn pixel_width(width: f32) -> u32 {
    (width - PIXEL_EPSILON).ceil().max(0.0) as u32
}

/// Line height: `ceil((ascent + descent) * (1 + line_spacing))`
pub fn line_height<M: MeasureText>(font: &M, line_spacing: f32) -> u32 {
    let raw = (font.ascent() + font.descent()) * (1.0 + line_spacing);
    ((raw - PIXEL_EPSILON).ceil().max(1.0)) as u32
}

/// Measure lines already wrapped with `font`
pub fn measure_block<M: MeasureText>(lines: &[Line], font: &M, line_spacing: f32) -> BlockMetrics {
    let line_height = line_height(font, line_spacing);
    let width = lines
        .iter()
        .map(|line| pixel_width(line.width))
        .max()
        .unwrap_or(0);
    let height = line_height.saturating_mul(lines.len().max(1) as u32);
    BlockMetrics {
        width,
        height,
        line_height,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::font::testing::FixedFont;
    use crate::layout::wrap::wrap_text;

    #[test]
    fn test_line_height() {
        let font = FixedFont::square(20.0);
        assert_eq!(line_height(&font, 0.0), 20);
        assert_eq!(line_height(&font, 0.25), 25);
        // 20 * 1.1 = 22 exactly in decimal, ceil must not round up to 23
        assert_eq!(line_height(&font, 0.1), 22);
        assert_eq!(line_height(&FixedFont::square(10.0), 0.15), 12);
    }

    #[test]
    fn test_measure_block() {
        let font = FixedFont::square(10.0);
        let lines = wrap_text("abc\nde", &font, 100.0);
        let m = measure_block(&lines, &font, 0.0);
        assert_eq!(m.width, 30);
        assert_eq!(m.line_height, 10);
        assert_eq!(m.height, 20);
    }

    #[test]
    fn test_empty_block_has_one_line_height() {
        let font = FixedFont::square(10.0);
        let m = measure_block(&[], &font, 0.0);
        assert_eq!(m.width, 0);
        assert_eq!(m.height, 10);
    }
}
