//! Line wrap engine
//!
//! Splits text into lines no wider than a pixel budget. Paragraphs that
//! contain a space wrap on words; all others wrap on grapheme clusters,
//! which covers scripts written without word spaces. A word wider than the
//! budget on its own is sub-wrapped by grapheme.

use crate::font::MeasureText;
use unicode_normalization::UnicodeNormalization;
use unicode_segmentation::UnicodeSegmentation;

/// One wrapped line with its own measured width
#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    pub text: String,
    pub width: f32,
}

impl Line {
    fn measured<M: MeasureText>(text: String, font: &M) -> Self {
        let width = font.text_width(&text);
        Self { text, width }
    }

    fn empty() -> Self {
        Self {
            text: String::new(),
            width: 0.0,
        }
    }
}

/// Wrap granularity of one paragraph
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenMode {
    /// Space-delimited words, joined back with a single space
    Word,
    /// Grapheme clusters, joined directly
    Grapheme,
}

impl TokenMode {
    pub fn detect(paragraph: &str) -> Self {
        if paragraph.contains(' ') {
            TokenMode::Word
        } else {
            TokenMode::Grapheme
        }
    }
}

/// Wrap `text` so every line fits in `max_width`.
///
/// Hard line breaks start new paragraphs; empty paragraphs become empty
/// lines and empty input yields exactly one empty line. A single token
/// wider than `max_width` is emitted alone on its line.
pub fn wrap_text<M: MeasureText>(text: &str, font: &M, max_width: f32) -> Vec<Line> {
    let text = compose_clusters(text);
    let mut lines = Vec::new();
    let mut paragraphs = text.lines().peekable();
    if paragraphs.peek().is_none() {
        lines.push(Line::empty());
        return lines;
    }
    for paragraph in paragraphs {
        wrap_paragraph(paragraph, font, max_width, &mut lines);
    }
    lines
}

/// Compose combining sequences without touching lone characters.
///
/// Whole-string NFC also applies canonical singletons (U+F900 becomes
/// U+8C48), which would change the glyph the user typed.
fn compose_clusters(text: &str) -> String {
    let mut composed = String::with_capacity(text.len());
    for cluster in text.graphemes(true) {
        if cluster.chars().nth(1).is_some() {
            composed.extend(cluster.nfc());
        } else {
            composed.push_str(cluster);
        }
    }
    composed
}

fn wrap_paragraph<M: MeasureText>(paragraph: &str, font: &M, max_width: f32, out: &mut Vec<Line>) {
    if paragraph.is_empty() {
        out.push(Line::empty());
        return;
    }

    let buf = match TokenMode::detect(paragraph) {
        TokenMode::Grapheme => wrap_graphemes(paragraph, font, max_width, out),
        TokenMode::Word => {
            let mut buf = String::new();
            for word in paragraph.split(' ') {
                let trial = if buf.is_empty() {
                    word.to_string()
                } else {
                    format!("{} {}", buf, word)
                };
                if font.text_width(&trial) <= max_width {
                    buf = trial;
                    continue;
                }
                if !buf.is_empty() {
                    out.push(Line::measured(std::mem::take(&mut buf), font));
                }
                buf = if font.text_width(word) <= max_width {
                    word.to_string()
                } else {
                    wrap_graphemes(word, font, max_width, out)
                };
            }
            buf
        }
    };

    if !buf.is_empty() {
        out.push(Line::measured(buf, font));
    }
}

/// Greedy grapheme wrap. Full lines go to `out`; the unfinished
/// remainder is returned so the caller can keep appending to it.
fn wrap_graphemes<M: MeasureText>(
    text: &str,
    font: &M,
    max_width: f32,
    out: &mut Vec<Line>,
) -> String {
    let mut buf = String::new();
    for grapheme in text.graphemes(true) {
        let trial = format!("{}{}", buf, grapheme);
        if font.text_width(&trial) <= max_width {
            buf = trial;
            continue;
        }
        if !buf.is_empty() {
            out.push(Line::measured(std::mem::take(&mut buf), font));
        }
        // An over-wide grapheme still starts a line: it is never dropped
        buf = grapheme.to_string();
    }
    buf
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::font::testing::FixedFont;

    fn texts(lines: &[Line]) -> Vec<&str> {
        lines.iter().map(|l| l.text.as_str()).collect()
    }

    #[test]
    fn test_token_mode() {
        assert_eq!(TokenMode::detect("hello world"), TokenMode::Word);
        assert_eq!(TokenMode::detect("你好世界"), TokenMode::Grapheme);
        assert_eq!(TokenMode::detect("single"), TokenMode::Grapheme);
    }

    #[test]
    fn test_empty_input_is_one_empty_line() {
        let font = FixedFont::square(10.0);
        let lines = wrap_text("", &font, 100.0);
        assert_eq!(texts(&lines), vec![""]);
        assert_eq!(lines[0].width, 0.0);
    }

    #[test]
    fn test_character_mode() {
        let font = FixedFont::square(10.0);
        let lines = wrap_text("abcdefg", &font, 35.0);
        assert_eq!(texts(&lines), vec!["abc", "def", "g"]);
        assert_eq!(lines[0].width, 30.0);
        assert_eq!(lines[2].width, 10.0);
    }

    #[test]
    fn test_cjk_wraps_without_spaces() {
        let font = FixedFont::square(10.0);
        let lines = wrap_text("今天天气很好", &font, 40.0);
        assert_eq!(texts(&lines), vec!["今天天气", "很好"]);
    }

    #[test]
    fn test_word_mode() {
        let font = FixedFont::square(10.0);
        let lines = wrap_text("hello world foo", &font, 60.0);
        assert_eq!(texts(&lines), vec!["hello", "world", "foo"]);

        let lines = wrap_text("a b c d", &font, 30.0);
        assert_eq!(texts(&lines), vec!["a b", "c d"]);
    }

    #[test]
    fn test_long_word_sub_wrapped() {
        let font = FixedFont::square(10.0);
        let lines = wrap_text("a verylongword b", &font, 50.0);
        assert_eq!(texts(&lines), vec!["a", "veryl", "ongwo", "rd b"]);
        assert!(lines.iter().all(|l| l.width <= 50.0));
    }

    #[test]
    fn test_blank_lines_preserved() {
        let font = FixedFont::square(10.0);
        let lines = wrap_text("a\n\nb", &font, 100.0);
        assert_eq!(texts(&lines), vec!["a", "", "b"]);

        let lines = wrap_text("a\n\n\nb", &font, 100.0);
        assert_eq!(texts(&lines), vec!["a", "", "", "b"]);

        let lines = wrap_text("a\r\nb", &font, 100.0);
        assert_eq!(texts(&lines), vec!["a", "b"]);
    }

    #[test]
    fn test_over_wide_character_kept_alone() {
        let font = FixedFont::square(10.0);
        let lines = wrap_text("ab", &font, 5.0);
        assert_eq!(texts(&lines), vec!["a", "b"]);

        let lines = wrap_text("x", &font, 5.0);
        assert_eq!(texts(&lines), vec!["x"]);
    }

    #[test]
    fn test_over_wide_lines_hold_one_token() {
        let font = FixedFont::square(10.0);
        let max = 25.0;
        for text in ["abcdef", "ab cdefgh ij", "一二三 四五"] {
            for line in wrap_text(text, &font, max) {
                if line.width > max {
                    assert_eq!(line.text.chars().count(), 1, "line {:?}", line.text);
                }
            }
        }
    }

    #[test]
    fn test_graphemes_never_split() {
        // g + combining diaeresis has no precomposed form
        let font = FixedFont::square(10.0);
        let lines = wrap_text("g\u{308}g\u{308}g\u{308}", &font, 25.0);
        assert_eq!(lines.len(), 3);
        for line in &lines {
            assert_eq!(line.text, "g\u{308}");
        }
    }

    #[test]
    fn test_input_normalized() {
        let font = FixedFont::square(10.0);
        // e + combining acute composes to a single character
        let lines = wrap_text("e\u{301}", &font, 100.0);
        assert_eq!(lines[0].text, "\u{e9}");
        assert_eq!(lines[0].width, 10.0);
    }

    #[test]
    fn test_compatibility_ideograph_kept() {
        let font = FixedFont::square(10.0);
        let lines = wrap_text("\u{F900}\u{8C48}", &font, 100.0);
        assert_eq!(lines[0].text, "\u{F900}\u{8C48}");
        assert_eq!(compose_clusters("a\u{F900}e\u{301}"), "a\u{F900}\u{e9}");
    }
}
