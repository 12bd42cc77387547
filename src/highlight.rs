//! Bracket highlighting
//!
//! Splits a line into colored runs. Brackets (`[` `]` `【` `】`) are drawn
//! in the bracket color and so is everything between them. Whether the
//! scan is inside a bracket is threaded through explicitly, so a span
//! opened on one line continues on the next.

use crate::constants::{is_bracket_close, is_bracket_open};
use image::Rgba;
use smol_str::SmolStr;

/// A run of text drawn in one color
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorSegment {
    pub text: SmolStr,
    pub color: Rgba<u8>,
}

impl ColorSegment {
    fn new(text: &str, color: Rgba<u8>) -> Self {
        Self {
            text: SmolStr::new(text),
            color,
        }
    }
}

/// Colors used by the segmenter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub text: Rgba<u8>,
    pub bracket: Rgba<u8>,
}

/// Split `line` into colored segments.
///
/// `inside` is the bracket state carried from the previous line; the
/// returned flag is the state to carry into the next one. Unmatched
/// brackets are fine: the state simply stays where it is.
pub fn segment_line(line: &str, inside: bool, palette: Palette) -> (Vec<ColorSegment>, bool) {
    let mut segments = Vec::new();
    let mut inside = inside;
    let mut run_start = 0;

    for (idx, ch) in line.char_indices() {
        let opens = is_bracket_open(ch);
        if !opens && !is_bracket_close(ch) {
            continue;
        }
        if run_start < idx {
            segments.push(ColorSegment::new(&line[run_start..idx], run_color(inside, palette)));
        }
        let end = idx + ch.len_utf8();
        segments.push(ColorSegment::new(&line[idx..end], palette.bracket));
        inside = opens;
        run_start = end;
    }

    if run_start < line.len() {
        segments.push(ColorSegment::new(&line[run_start..], run_color(inside, palette)));
    }

    (segments, inside)
}

#[inline]
fn run_color(inside: bool, palette: Palette) -> Rgba<u8> {
    if inside {
        palette.bracket
    } else {
        palette.text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BLACK: Rgba<u8> = Rgba([0, 0, 0, 255]);
    const PURPLE: Rgba<u8> = Rgba([128, 0, 128, 255]);
    const PALETTE: Palette = Palette {
        text: BLACK,
        bracket: PURPLE,
    };

    fn pairs(segments: &[ColorSegment]) -> Vec<(&str, Rgba<u8>)> {
        segments.iter().map(|s| (s.text.as_str(), s.color)).collect()
    }

    #[test]
    fn test_bracket_span() {
        let (segments, inside) = segment_line("普通[强调]普通", false, PALETTE);
        assert_eq!(
            pairs(&segments),
            vec![
                ("普通", BLACK),
                ("[", PURPLE),
                ("强调", PURPLE),
                ("]", PURPLE),
                ("普通", BLACK),
            ]
        );
        assert!(!inside);
    }

    #[test]
    fn test_full_width_brackets() {
        let (segments, inside) = segment_line("说【重点】了", false, PALETTE);
        assert_eq!(
            pairs(&segments),
            vec![
                ("说", BLACK),
                ("【", PURPLE),
                ("重点", PURPLE),
                ("】", PURPLE),
                ("了", BLACK),
            ]
        );
        assert!(!inside);
    }

    #[test]
    fn test_state_carries_across_lines() {
        let (first, inside) = segment_line("abc[de", false, PALETTE);
        assert_eq!(pairs(&first), vec![("abc", BLACK), ("[", PURPLE), ("de", PURPLE)]);
        assert!(inside);

        let (second, inside) = segment_line("fg]hi", inside, PALETTE);
        assert_eq!(pairs(&second), vec![("fg", PURPLE), ("]", PURPLE), ("hi", BLACK)]);
        assert!(!inside);
    }

    #[test]
    fn test_unmatched_brackets() {
        let (segments, inside) = segment_line("open[", false, PALETTE);
        assert_eq!(pairs(&segments), vec![("open", BLACK), ("[", PURPLE)]);
        assert!(inside);

        // A stray close bracket just resets to outside
        let (segments, inside) = segment_line("x]y", false, PALETTE);
        assert_eq!(pairs(&segments), vec![("x", BLACK), ("]", PURPLE), ("y", BLACK)]);
        assert!(!inside);
    }

    #[test]
    fn test_empty_line_keeps_state() {
        let (segments, inside) = segment_line("", true, PALETTE);
        assert!(segments.is_empty());
        assert!(inside);
    }

    #[test]
    fn test_adjacent_brackets() {
        let (segments, inside) = segment_line("[]", false, PALETTE);
        assert_eq!(pairs(&segments), vec![("[", PURPLE), ("]", PURPLE)]);
        assert!(!inside);
    }
}
