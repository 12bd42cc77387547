//! Compositing entry points
//!
//! Handles:
//! - Text-only renders (fit, draw, overlay, encode)
//! - Image-only renders (paste-fit)
//! - Combined text + image renders (two passes over one canvas)

pub mod canvas;
pub mod paste;
pub mod router;
pub mod text;

pub use canvas::{apply_overlay, encode_png, ImageSource};
pub use paste::{paste_image, PasteOptions, Placement};
pub use router::{is_portrait, plan_split, SplitLayout, SplitOrientation};
pub use text::{draw_text, TextOutcome, TextRequest, TextStyle};

use crate::error::Result;
use crate::layout::Region;
use image::RgbaImage;
use log::{debug, info};

/// Encoded output of one render call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rendered {
    /// 8-bit RGBA PNG
    pub png: Vec<u8>,
    pub width: u32,
    pub height: u32,
    /// Chosen font size; `None` when no text was drawn
    pub font_size: Option<u32>,
    /// Some lines were dropped at the region bottom
    pub truncated: bool,
    /// No font size fitted and the minimum was used
    pub degenerate: bool,
    /// Split used by the combined path
    pub split: Option<SplitOrientation>,
}

impl Rendered {
    fn finish(canvas: &mut RgbaImage, overlay: Option<ImageSource>) -> Result<Self> {
        apply_overlay(canvas, overlay);
        let png = encode_png(canvas)?;
        debug!("Encoded {}x{} canvas ({} bytes)", canvas.width(), canvas.height(), png.len());
        Ok(Self {
            png,
            width: canvas.width(),
            height: canvas.height(),
            font_size: None,
            truncated: false,
            degenerate: false,
            split: None,
        })
    }

    fn with_text(mut self, outcome: TextOutcome) -> Self {
        self.font_size = Some(outcome.font_size);
        self.truncated = outcome.truncated;
        self.degenerate = outcome.degenerate;
        self
    }
}

/// Options for the combined path
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CombinedOptions {
    pub paste: PasteOptions,
    /// Correction for the portrait test, usually the region's width / height
    pub aspect_ratio: f64,
}

impl Default for CombinedOptions {
    fn default() -> Self {
        Self {
            paste: PasteOptions::default(),
            aspect_ratio: 1.0,
        }
    }
}

/// Fit text into `region` on top of `base`
pub fn render_text(
    region: Region,
    base: ImageSource,
    request: &TextRequest<'_>,
    overlay: Option<ImageSource>,
) -> Result<Rendered> {
    region.validate()?;
    let mut canvas = base.load()?;
    let outcome = draw_text(&mut canvas, region, request)?;
    info!(
        "Text rendered at {}px into {}x{} region",
        outcome.font_size,
        region.width(),
        region.height()
    );
    Ok(Rendered::finish(&mut canvas, overlay)?.with_text(outcome))
}

/// Fit a content image into `region` on top of `base`
pub fn render_image(
    region: Region,
    base: ImageSource,
    content: ImageSource,
    options: &PasteOptions,
    overlay: Option<ImageSource>,
) -> Result<Rendered> {
    region.validate()?;
    let content = content.load()?;
    let mut canvas = base.load()?;
    paste_image(&mut canvas, region, &content, options)?;
    Rendered::finish(&mut canvas, overlay)
}

/// Render text and a content image into one region.
///
/// The image is pasted first into its sub-region; the resulting raster is
/// then the base for the text pass, which is the only pass that applies
/// the overlay. Blank text falls back to [`render_image`].
pub fn render_text_and_image(
    region: Region,
    base: ImageSource,
    request: &TextRequest<'_>,
    content: ImageSource,
    options: &CombinedOptions,
    overlay: Option<ImageSource>,
) -> Result<Rendered> {
    region.validate()?;
    if request.text.trim().is_empty() {
        return render_image(region, base, content, &options.paste, overlay);
    }

    let content = content.load()?;
    let split = plan_split(region, content.width(), content.height(), options.aspect_ratio)?;
    info!(
        "Combined layout {:?}: image {:?}, text {:?}",
        split.orientation, split.image_region, split.text_region
    );

    let mut canvas = base.load()?;
    paste_image(&mut canvas, split.image_region, &content, &options.paste)?;

    let mut rendered =
        render_text(split.text_region, ImageSource::Raster(canvas), request, overlay)?;
    rendered.split = Some(split.orientation);
    Ok(rendered)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RenderError;
    use crate::font::FontLoader;
    use image::Rgba;

    const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);

    fn white_base(w: u32, h: u32) -> ImageSource {
        RgbaImage::from_pixel(w, h, WHITE).into()
    }

    #[test]
    fn test_render_text_reports_outcome() {
        let font = FontLoader::builtin();
        let request = TextRequest {
            text: "hello",
            font: &font,
            style: TextStyle::default(),
        };
        let region = Region::new(0, 0, 120, 40);
        let rendered = render_text(region, white_base(160, 60), &request, None).unwrap();
        assert_eq!((rendered.width, rendered.height), (160, 60));
        assert!(rendered.font_size.is_some());
        assert!(!rendered.truncated);
        assert_eq!(rendered.split, None);
    }

    #[test]
    fn test_base_decode_failure_is_fatal() {
        let font = FontLoader::builtin();
        let request = TextRequest {
            text: "hello",
            font: &font,
            style: TextStyle::default(),
        };
        let err = render_text(
            Region::new(0, 0, 10, 10),
            ImageSource::Encoded(b"not an image".to_vec()),
            &request,
            None,
        )
        .unwrap_err();
        assert!(matches!(err, RenderError::ImageDecode { .. }));
    }

    #[test]
    fn test_render_image_has_no_font_size() {
        let content = RgbaImage::from_pixel(4, 4, Rgba([0, 255, 0, 255]));
        let rendered = render_image(
            Region::new(0, 0, 50, 50),
            white_base(50, 50),
            content.into(),
            &PasteOptions::default(),
            None,
        )
        .unwrap();
        assert_eq!(rendered.font_size, None);
        let decoded = image::load_from_memory(&rendered.png).unwrap().to_rgba8();
        assert_eq!(decoded.get_pixel(25, 25), &Rgba([0, 255, 0, 255]));
    }

    #[test]
    fn test_blank_text_falls_back_to_image() {
        let font = FontLoader::builtin();
        let request = TextRequest {
            text: "  ",
            font: &font,
            style: TextStyle::default(),
        };
        let content = RgbaImage::from_pixel(10, 20, Rgba([0, 0, 255, 255]));
        let rendered = render_text_and_image(
            Region::new(0, 0, 100, 100),
            white_base(100, 100),
            &request,
            content.into(),
            &CombinedOptions::default(),
            None,
        )
        .unwrap();
        assert_eq!(rendered.split, None);
        assert_eq!(rendered.font_size, None);
    }

    #[test]
    fn test_combined_draws_both_passes() {
        let font = FontLoader::builtin();
        let request = TextRequest {
            text: "caption",
            font: &font,
            style: TextStyle::default(),
        };
        let content = RgbaImage::from_pixel(40, 20, Rgba([0, 0, 255, 255]));
        let rendered = render_text_and_image(
            Region::new(0, 0, 200, 200),
            white_base(200, 200),
            &request,
            content.into(),
            &CombinedOptions::default(),
            None,
        )
        .unwrap();
        assert_eq!(rendered.split, Some(SplitOrientation::TopBottom));
        let decoded = image::load_from_memory(&rendered.png).unwrap().to_rgba8();
        // Image pass fills the upper half, text pass writes black below it
        assert_eq!(decoded.get_pixel(100, 50), &Rgba([0, 0, 255, 255]));
        let text_ink = (100..200)
            .flat_map(|y| (0..200).map(move |x| (x, y)))
            .any(|(x, y)| *decoded.get_pixel(x, y) == Rgba([0, 0, 0, 255]));
        assert!(text_ink);
    }
}
