//! Target rectangles in canvas pixel coordinates

use crate::error::{RenderError, Result};

/// Rectangle `(x1, y1)-(x2, y2)`; valid only when `x2 > x1` and `y2 > y1`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Region {
    pub x1: i32,
    pub y1: i32,
    pub x2: i32,
    pub y2: i32,
}

impl Region {
    pub const fn new(x1: i32, y1: i32, x2: i32, y2: i32) -> Self {
        Self { x1, y1, x2, y2 }
    }

    /// Build from top-left and bottom-right corners
    pub const fn from_corners(top_left: (i32, i32), bottom_right: (i32, i32)) -> Self {
        Self::new(top_left.0, top_left.1, bottom_right.0, bottom_right.1)
    }

    /// Fail with [`RenderError::InvalidRegion`] unless width and height are positive
    pub fn validate(&self) -> Result<()> {
        if self.x2 > self.x1 && self.y2 > self.y1 {
            Ok(())
        } else {
            Err(RenderError::InvalidRegion {
                x1: self.x1,
                y1: self.y1,
                x2: self.x2,
                y2: self.y2,
            })
        }
    }

    /// Width in pixels (0 for an invalid region)
    pub fn width(&self) -> u32 {
        (self.x2 as i64 - self.x1 as i64).max(0) as u32
    }

    /// Height in pixels (0 for an invalid region)
    pub fn height(&self) -> u32 {
        (self.y2 as i64 - self.y1 as i64).max(0) as u32
    }

    /// Width / height, used to correct the portrait test for non-square regions
    pub fn aspect_ratio(&self) -> f64 {
        if self.height() == 0 {
            return 1.0;
        }
        self.width() as f64 / self.height() as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate() {
        assert!(Region::new(0, 0, 100, 50).validate().is_ok());
        assert!(matches!(
            Region::new(0, 0, 100, 0).validate(),
            Err(RenderError::InvalidRegion { y2: 0, .. })
        ));
        assert!(Region::new(10, 0, 5, 50).validate().is_err());
    }

    #[test]
    fn test_dimensions() {
        let r = Region::from_corners((119, 450), (398, 625));
        assert_eq!(r.width(), 279);
        assert_eq!(r.height(), 175);
        assert_eq!(Region::new(5, 5, 0, 0).width(), 0);
        assert!((Region::new(0, 0, 200, 100).aspect_ratio() - 2.0).abs() < 1e-9);
    }
}
