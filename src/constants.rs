//! Global constants for textfit
//!
//! Consolidates layout, font and paste defaults
//! to eliminate magic numbers throughout the codebase.

// ============================================================================
// Text Layout Constants
// ============================================================================

/// Default extra line spacing (ratio of ascent + descent)
pub const DEFAULT_LINE_SPACING: f32 = 0.15;

/// Default font size cap (pixels)
pub const DEFAULT_MAX_FONT_HEIGHT: u32 = 64;

/// Smallest font size the search will ever return (pixels)
pub const MIN_FONT_SIZE: u32 = 1;

// ============================================================================
// Combined Layout Constants
// ============================================================================

/// Gap between image and text sub-regions in the left/right split
pub const SPLIT_SPACING: u32 = 10;

/// Upper bound for the text band height in the top/bottom split
pub const TEXT_BAND_MAX_HEIGHT: u32 = 100;

// ============================================================================
// Paste-fit Constants
// ============================================================================

/// Padding kept between a pasted image and its region edges
pub const DEFAULT_PASTE_PADDING: u32 = 12;

// ============================================================================
// Built-in Face Constants
// ============================================================================

/// Ascent of the built-in face as a fraction of pixel size
pub const BUILTIN_ASCENT_RATIO: f32 = 0.8;

/// Descent of the built-in face as a fraction of pixel size
pub const BUILTIN_DESCENT_RATIO: f32 = 0.2;

/// Advance per display column of the built-in face as a fraction of pixel size
pub const BUILTIN_ADVANCE_RATIO: f32 = 0.5;

// ============================================================================
// Bracket Delimiters
// ============================================================================

/// ASCII opening bracket
pub const BRACKET_OPEN: char = '[';

/// ASCII closing bracket
pub const BRACKET_CLOSE: char = ']';

/// Full-width opening bracket (U+3010)
pub const BRACKET_OPEN_WIDE: char = '【';

/// Full-width closing bracket (U+3011)
pub const BRACKET_CLOSE_WIDE: char = '】';

/// Check if character opens a highlighted span
#[inline]
pub const fn is_bracket_open(ch: char) -> bool {
    ch == BRACKET_OPEN || ch == BRACKET_OPEN_WIDE
}

/// Check if character closes a highlighted span
#[inline]
pub const fn is_bracket_close(ch: char) -> bool {
    ch == BRACKET_CLOSE || ch == BRACKET_CLOSE_WIDE
}
