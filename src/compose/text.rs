//! Text compositor
//!
//! Places a fitted block inside its region and draws it line by line.
//! Horizontal alignment uses each line's own width, so lines of different
//! length are each aligned on their own.

use crate::constants::{DEFAULT_LINE_SPACING, DEFAULT_MAX_FONT_HEIGHT};
use crate::error::Result;
use crate::font::{FontLoader, SizedFont};
use crate::highlight::{segment_line, Palette};
use crate::layout::search::fit_text;
use crate::layout::{pixel_width, Align, LayoutResult, Region, VAlign};
use image::{Rgba, RgbaImage};
use log::{debug, info};

/// How text is colored, sized and aligned
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    pub color: Rgba<u8>,
    pub bracket_color: Rgba<u8>,
    /// Font size cap; `None` lets the region height decide
    pub max_font_height: Option<u32>,
    pub align: Align,
    pub valign: VAlign,
    /// Extra line gap as a ratio of ascent + descent
    pub line_spacing: f32,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            color: Rgba([0, 0, 0, 255]),
            bracket_color: Rgba([128, 0, 128, 255]),
            max_font_height: Some(DEFAULT_MAX_FONT_HEIGHT),
            align: Align::Center,
            valign: VAlign::Middle,
            line_spacing: DEFAULT_LINE_SPACING,
        }
    }
}

impl TextStyle {
    fn palette(&self) -> Palette {
        Palette {
            text: self.color,
            bracket: self.bracket_color,
        }
    }
}

/// Text plus everything needed to lay it out
#[derive(Clone, Copy)]
pub struct TextRequest<'a> {
    pub text: &'a str,
    pub font: &'a FontLoader,
    pub style: TextStyle,
}

/// Result of drawing one block
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextOutcome {
    pub font_size: u32,
    pub lines_drawn: usize,
    /// Lines were dropped because the block ran past the region bottom
    pub truncated: bool,
    /// No size fitted and the minimum size was used
    pub degenerate: bool,
}

/// Fit `request` into `region` and draw it onto the canvas
pub fn draw_text(
    canvas: &mut RgbaImage,
    region: Region,
    request: &TextRequest<'_>,
) -> Result<TextOutcome> {
    region.validate()?;

    let style = &request.style;
    let layout = fit_text(
        request.text,
        region.width(),
        region.height(),
        style.max_font_height,
        style.line_spacing,
        |size| request.font.at_size(size),
    );
    let font = request.font.at_size(layout.font_size);
    let (lines_drawn, truncated) = draw_layout(canvas, region, &layout, &font, style);

    if truncated {
        info!(
            "Text truncated: {} of {} lines drawn at {}px",
            lines_drawn,
            layout.lines.len(),
            layout.font_size
        );
    }

    Ok(TextOutcome {
        font_size: layout.font_size,
        lines_drawn,
        truncated,
        degenerate: layout.degenerate,
    })
}

/// Draw a laid-out block; returns (lines drawn, truncated)
pub fn draw_layout(
    canvas: &mut RgbaImage,
    region: Region,
    layout: &LayoutResult,
    font: &SizedFont<'_>,
    style: &TextStyle,
) -> (usize, bool) {
    let region_w = region.width() as i64;
    let region_h = region.height() as i64;
    let y_start = region.y1 as i64 + style.valign.offset(layout.block_height as i64, region_h);
    let palette = style.palette();

    debug!(
        "Block {}x{} at y={} ({} lines, line height {})",
        layout.block_width,
        layout.block_height,
        y_start,
        layout.lines.len(),
        layout.line_height
    );

    let mut y = y_start;
    let mut inside = false;
    for (idx, line) in layout.lines.iter().enumerate() {
        let line_w = pixel_width(line.width) as i64;
        let x = region.x1 as i64 + style.align.offset(line_w, region_w);

        let (segments, next_inside) = segment_line(&line.text, inside, palette);
        inside = next_inside;
        let mut pen = x as f32;
        for segment in &segments {
            pen += font.draw(canvas, pen, y, &segment.text, segment.color);
        }

        y += layout.line_height as i64;
        if y - y_start > region_h {
            let drawn = idx + 1;
            return (drawn, drawn < layout.lines.len());
        }
    }
    (layout.lines.len(), false)
}
