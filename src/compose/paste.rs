//! Paste-fit
//!
//! Scales a content image to fit inside a padded region and composites
//! it onto the canvas.

use crate::constants::DEFAULT_PASTE_PADDING;
use crate::error::Result;
use crate::layout::{Align, Region, VAlign};
use image::imageops::{self, FilterType};
use image::RgbaImage;
use log::debug;

/// Placement rules for a pasted image
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PasteOptions {
    pub align: Align,
    pub valign: VAlign,
    /// Gap kept on every side of the region
    pub padding: u32,
    /// Allow scaling above the image's own size
    pub allow_upscale: bool,
    /// Keep the image's transparency; otherwise paste it fully opaque
    pub keep_alpha: bool,
}

impl Default for PasteOptions {
    fn default() -> Self {
        Self {
            align: Align::Center,
            valign: VAlign::Middle,
            padding: DEFAULT_PASTE_PADDING,
            allow_upscale: true,
            keep_alpha: true,
        }
    }
}

/// Where the image ended up on the canvas
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    pub x: i64,
    pub y: i64,
    pub width: u32,
    pub height: u32,
}

/// Fit `content` into `region` (minus padding) and composite it
pub fn paste_image(
    canvas: &mut RgbaImage,
    region: Region,
    content: &RgbaImage,
    options: &PasteOptions,
) -> Result<Placement> {
    region.validate()?;

    let pad2 = options.padding.saturating_mul(2);
    let avail_w = region.width().saturating_sub(pad2).max(1);
    let avail_h = region.height().saturating_sub(pad2).max(1);
    let (src_w, src_h) = content.dimensions();
    if src_w == 0 || src_h == 0 {
        return Ok(Placement {
            x: region.x1 as i64,
            y: region.y1 as i64,
            width: 0,
            height: 0,
        });
    }

    let (width, height) = fit_size(src_w, src_h, avail_w, avail_h, options.allow_upscale);
    let mut scaled = if (width, height) == (src_w, src_h) {
        content.clone()
    } else {
        imageops::resize(content, width, height, FilterType::Lanczos3)
    };
    if !options.keep_alpha {
        for px in scaled.pixels_mut() {
            px[3] = 255;
        }
    }

    let x = region.x1 as i64
        + options.padding.min(region.width()) as i64
        + options.align.offset(width as i64, avail_w as i64);
    let y = region.y1 as i64
        + options.padding.min(region.height()) as i64
        + options.valign.offset(height as i64, avail_h as i64);
    imageops::overlay(canvas, &scaled, x, y);

    debug!(
        "Pasted {}x{} image as {}x{} at ({}, {})",
        src_w, src_h, width, height, x, y
    );
    Ok(Placement {
        x,
        y,
        width,
        height,
    })
}

/// Largest size with the source aspect ratio inside `avail_w` x `avail_h`
fn fit_size(src_w: u32, src_h: u32, avail_w: u32, avail_h: u32, allow_upscale: bool) -> (u32, u32) {
    let mut scale = (avail_w as f64 / src_w as f64).min(avail_h as f64 / src_h as f64);
    if !allow_upscale {
        scale = scale.min(1.0);
    }
    let width = ((src_w as f64 * scale).round() as u32).clamp(1, avail_w.max(1));
    let height = ((src_h as f64 * scale).round() as u32).clamp(1, avail_h.max(1));
    (width, height)
}
