//! Font-size search
//!
//! Binary search for the largest size whose wrapped block fits the region.
//!
//! Precondition: fitness is assumed monotonic in size. Re-wrapping at a
//! larger size can occasionally lower the line count, so for pathological
//! inputs the result is a good size rather than the provably largest one.

use super::measure::{measure_block, BlockMetrics};
use super::wrap::{wrap_text, Line};
use crate::constants::MIN_FONT_SIZE;
use crate::font::MeasureText;
use log::{debug, trace};

/// Layout chosen for one render call
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutResult {
    pub font_size: u32,
    pub lines: Vec<Line>,
    pub block_width: u32,
    pub block_height: u32,
    pub line_height: u32,
    /// No size fitted; laid out at the minimum size and may overflow
    pub degenerate: bool,
}

/// Outcome of trying one size
#[derive(Debug, Clone)]
pub struct Probe {
    pub lines: Vec<Line>,
    pub metrics: BlockMetrics,
    pub fits: bool,
}

/// Wrap and measure `text` at one font size
pub fn probe<M: MeasureText>(
    text: &str,
    font: &M,
    region_width: u32,
    region_height: u32,
    line_spacing: f32,
) -> Probe {
    let lines = wrap_text(text, font, region_width as f32);
    let metrics = measure_block(&lines, font, line_spacing);
    let fits = metrics.width <= region_width && metrics.height <= region_height;
    Probe {
        lines,
        metrics,
        fits,
    }
}

/// Upper bound of the search: region height, lowered by a positive cap
pub fn size_upper_bound(region_height: u32, max_font_height: Option<u32>) -> u32 {
    match max_font_height.filter(|&cap| cap > 0) {
        Some(cap) => region_height.min(cap),
        None => region_height,
    }
}

/// Find the largest size in `[1, min(region_height, cap)]` whose block fits.
///
/// `font_at` builds the font for a candidate size. When nothing fits the
/// text is laid out at size 1 and the result is marked `degenerate`.
pub fn fit_text<F, M>(
    text: &str,
    region_width: u32,
    region_height: u32,
    max_font_height: Option<u32>,
    line_spacing: f32,
    font_at: F,
) -> LayoutResult
where
    F: Fn(u32) -> M,
    M: MeasureText,
{
    let mut lo = MIN_FONT_SIZE;
    let mut hi = size_upper_bound(region_height, max_font_height);
    let mut best: Option<(u32, Probe)> = None;

    while lo <= hi {
        let mid = lo + (hi - lo) / 2;
        let font = font_at(mid);
        let attempt = probe(text, &font, region_width, region_height, line_spacing);
        trace!(
            "size {}: {} lines, block {}x{} -> {}",
            mid,
            attempt.lines.len(),
            attempt.metrics.width,
            attempt.metrics.height,
            if attempt.fits { "fits" } else { "overflows" }
        );
        if attempt.fits {
            best = Some((mid, attempt));
            lo = mid + 1;
        } else {
            hi = mid - 1;
        }
    }

    let (font_size, chosen, degenerate) = match best {
        Some((size, attempt)) => (size, attempt, false),
        None => {
            let font = font_at(MIN_FONT_SIZE);
            let attempt = probe(text, &font, region_width, region_height, line_spacing);
            debug!(
                "No font size fits {}x{}, falling back to {}px",
                region_width, region_height, MIN_FONT_SIZE
            );
            (MIN_FONT_SIZE, attempt, true)
        }
    };

    debug!(
        "Fitted font size {} ({} lines, block {}x{})",
        font_size,
        chosen.lines.len(),
        chosen.metrics.width,
        chosen.metrics.height
    );

    LayoutResult {
        font_size,
        lines: chosen.lines,
        block_width: chosen.metrics.width,
        block_height: chosen.metrics.height,
        line_height: chosen.metrics.line_height,
        degenerate,
    }
}
