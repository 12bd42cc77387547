//! Layout router
//!
//! Splits one region into an image part and a text part when a request
//! carries both.

use crate::constants::{SPLIT_SPACING, TEXT_BAND_MAX_HEIGHT};
use crate::error::Result;
use crate::layout::Region;

/// Which way the region is divided
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SplitOrientation {
    /// Image on the left, text on the right (portrait images)
    LeftRight,
    /// Image above, text band below (landscape and square images)
    TopBottom,
}

/// Sub-regions for the two render passes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SplitLayout {
    pub orientation: SplitOrientation,
    pub image_region: Region,
    pub text_region: Region,
}

/// Portrait test: `height * aspect_ratio > width`.
///
/// `aspect_ratio` corrects for non-square regions; pass 1.0 to compare
/// raw image dimensions.
pub fn is_portrait(width: u32, height: u32, aspect_ratio: f64) -> bool {
    height as f64 * aspect_ratio > width as f64
}

/// Divide `region` for a content image of `image_w` x `image_h`
pub fn plan_split(
    region: Region,
    image_w: u32,
    image_h: u32,
    aspect_ratio: f64,
) -> Result<SplitLayout> {
    region.validate()?;

    let layout = if is_portrait(image_w, image_h, aspect_ratio) {
        let spacing = SPLIT_SPACING as i32;
        let left_width = region.width() as i32 / 2 - spacing / 2;
        let image_right = region.x1 + left_width;
        SplitLayout {
            orientation: SplitOrientation::LeftRight,
            image_region: Region::new(region.x1, region.y1, image_right, region.y2),
            text_region: Region::new(image_right + spacing, region.y1, region.x2, region.y2),
        }
    } else {
        let text_height = (region.height() / 2).min(TEXT_BAND_MAX_HEIGHT) as i32;
        let image_bottom = region.y2 - text_height;
        SplitLayout {
            orientation: SplitOrientation::TopBottom,
            image_region: Region::new(region.x1, region.y1, region.x2, image_bottom),
            text_region: Region::new(region.x1, image_bottom, region.x2, region.y2),
        }
    };

    // Tiny regions can leave one side empty
    layout.image_region.validate()?;
    layout.text_region.validate()?;
    Ok(layout)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RenderError;

    #[test]
    fn test_is_portrait() {
        assert!(is_portrait(100, 200, 1.0));
        assert!(!is_portrait(200, 100, 1.0));
        assert!(!is_portrait(100, 100, 1.0));
        // Wide region makes a square image count as portrait
        assert!(is_portrait(100, 100, 1.5));
    }

    #[test]
    fn test_portrait_splits_left_right() {
        let split = plan_split(Region::new(0, 0, 300, 200), 50, 100, 1.0).unwrap();
        assert_eq!(split.orientation, SplitOrientation::LeftRight);
        assert_eq!(split.image_region, Region::new(0, 0, 145, 200));
        assert_eq!(split.text_region, Region::new(155, 0, 300, 200));
    }

    #[test]
    fn test_landscape_splits_top_bottom() {
        let split = plan_split(Region::new(10, 20, 310, 420), 100, 50, 1.0).unwrap();
        assert_eq!(split.orientation, SplitOrientation::TopBottom);
        // Text band capped at 100px
        assert_eq!(split.image_region, Region::new(10, 20, 310, 320));
        assert_eq!(split.text_region, Region::new(10, 320, 310, 420));
    }

    #[test]
    fn test_short_region_halves() {
        let split = plan_split(Region::new(0, 0, 100, 60), 100, 50, 1.0).unwrap();
        assert_eq!(split.text_region, Region::new(0, 30, 100, 60));
    }

    #[test]
    fn test_too_narrow_for_split() {
        let err = plan_split(Region::new(0, 0, 8, 100), 10, 100, 1.0).unwrap_err();
        assert!(matches!(err, RenderError::InvalidRegion { .. }));
    }
}
