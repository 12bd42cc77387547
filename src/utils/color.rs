//! Color parsing and blending utilities
//!
//! Hex parsing for config values and coverage blending for glyph drawing.

use image::Rgba;

/// Parse 6-digit hex color (e.g., "ff0000" -> (255, 0, 0))
/// Also supports 3-digit short format (e.g., "f00" -> (255, 0, 0))
/// Returns None on invalid input.
pub fn parse_hex_color(hex: &str) -> Option<(u8, u8, u8)> {
    let hex = hex.trim().trim_start_matches('#');
    if !hex.is_ascii() {
        return None;
    }
    match hex.len() {
        6 => {
            let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
            let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
            let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
            Some((r, g, b))
        }
        3 => {
            // Short format: expand F -> FF
            let r = u8::from_str_radix(&hex[0..1], 16).ok()? * 17;
            let g = u8::from_str_radix(&hex[1..2], 16).ok()? * 17;
            let b = u8::from_str_radix(&hex[2..3], 16).ok()? * 17;
            Some((r, g, b))
        }
        _ => None,
    }
}

/// Parse hex color to an opaque RGBA pixel
pub fn parse_hex_rgba(hex: &str) -> Option<Rgba<u8>> {
    parse_hex_color(hex).map(|(r, g, b)| Rgba([r, g, b, 255]))
}

/// Blend a solid color onto a pixel using glyph coverage as alpha.
///
/// # Arguments
/// * `dst` - Canvas pixel, modified in place
/// * `color` - Text color (its own alpha scales the coverage)
/// * `coverage` - Glyph coverage (0 = untouched, 255 = full color)
///
/// Uses straight-alpha "source over" compositing.
pub fn blend_coverage(dst: &mut Rgba<u8>, color: Rgba<u8>, coverage: u8) {
    let alpha = (coverage as f32 / 255.0) * (color[3] as f32 / 255.0);
    if alpha <= 0.0 {
        return;
    }
    let dst_alpha = dst[3] as f32 / 255.0;
    let out_alpha = alpha + dst_alpha * (1.0 - alpha);
    if out_alpha <= 0.0 {
        return;
    }
    for c in 0..3 {
        let src = color[c] as f32;
        let base = dst[c] as f32;
        let value = (src * alpha + base * dst_alpha * (1.0 - alpha)) / out_alpha;
        dst[c] = value.round().clamp(0.0, 255.0) as u8;
    }
    dst[3] = (out_alpha * 255.0).round().clamp(0.0, 255.0) as u8;
}
