//! Text layout
//!
//! Handles:
//! - Region geometry and validation
//! - Line wrapping (word and grapheme modes)
//! - Block measurement
//! - Font-size search

pub mod measure;
pub mod region;
pub mod search;
pub mod wrap;

pub use measure::{measure_block, pixel_width, BlockMetrics};
pub use region::Region;
pub use search::{fit_text, LayoutResult};
pub use wrap::{wrap_text, Line, TokenMode};

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Horizontal alignment, applied per line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Align {
    Left,
    #[default]
    Center,
    Right,
}

/// Vertical alignment of the whole block
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VAlign {
    Top,
    #[default]
    Middle,
    Bottom,
}

impl Align {
    /// Offset of content of `content` pixels inside `available` pixels.
    /// Negative when the content overflows and is not left-aligned.
    pub fn offset(self, content: i64, available: i64) -> i64 {
        match self {
            Align::Left => 0,
            Align::Center => (available - content).div_euclid(2),
            Align::Right => available - content,
        }
    }
}

impl VAlign {
    /// Same as [`Align::offset`] on the vertical axis
    pub fn offset(self, content: i64, available: i64) -> i64 {
        match self {
            VAlign::Top => 0,
            VAlign::Middle => (available - content).div_euclid(2),
            VAlign::Bottom => available - content,
        }
    }
}

impl FromStr for Align {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "left" => Ok(Align::Left),
            "center" | "centre" => Ok(Align::Center),
            "right" => Ok(Align::Right),
            other => Err(format!("unknown align \"{}\" (left|center|right)", other)),
        }
    }
}

impl FromStr for VAlign {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "top" => Ok(VAlign::Top),
            "middle" | "center" => Ok(VAlign::Middle),
            "bottom" => Ok(VAlign::Bottom),
            other => Err(format!("unknown valign \"{}\" (top|middle|bottom)", other)),
        }
    }
}

impl fmt::Display for Align {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Align::Left => "left",
            Align::Center => "center",
            Align::Right => "right",
        })
    }
}

impl fmt::Display for VAlign {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            VAlign::Top => "top",
            VAlign::Middle => "middle",
            VAlign::Bottom => "bottom",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_align_offset() {
        assert_eq!(Align::Left.offset(30, 100), 0);
        assert_eq!(Align::Center.offset(30, 100), 35);
        assert_eq!(Align::Right.offset(30, 100), 70);
        // Overflow floors like integer division toward -inf
        assert_eq!(Align::Center.offset(105, 100), -3);
    }

    #[test]
    fn test_valign_offset() {
        assert_eq!(VAlign::Top.offset(20, 50), 0);
        assert_eq!(VAlign::Middle.offset(20, 50), 15);
        assert_eq!(VAlign::Bottom.offset(20, 50), 30);
    }

    #[test]
    fn test_parse_align() {
        assert_eq!("Right".parse::<Align>(), Ok(Align::Right));
        assert_eq!("middle".parse::<VAlign>(), Ok(VAlign::Middle));
        assert!("diagonal".parse::<Align>().is_err());
    }
}
