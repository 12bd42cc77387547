//! Canvas I/O
//!
//! Loads base, content and overlay rasters, composites the overlay and
//! encodes the final canvas as PNG.

use crate::error::{RenderError, Result};
use image::RgbaImage;
use log::{debug, warn};
use std::path::{Path, PathBuf};

/// Where a raster comes from
#[derive(Debug, Clone)]
pub enum ImageSource {
    /// Image file on disk
    Path(PathBuf),
    /// Encoded image bytes (PNG, JPEG)
    Encoded(Vec<u8>),
    /// Already decoded raster
    Raster(RgbaImage),
}

impl ImageSource {
    /// Short label for logs and errors
    pub fn name(&self) -> String {
        match self {
            ImageSource::Path(path) => path.display().to_string(),
            ImageSource::Encoded(bytes) => format!("<{} encoded bytes>", bytes.len()),
            ImageSource::Raster(img) => format!("<{}x{} raster>", img.width(), img.height()),
        }
    }

    /// Decode into an RGBA raster
    pub fn load(self) -> Result<RgbaImage> {
        let name = self.name();
        let decoded = match self {
            ImageSource::Raster(img) => return Ok(img),
            ImageSource::Path(path) => image::open(&path),
            ImageSource::Encoded(bytes) => image::load_from_memory(&bytes),
        };
        let img = decoded.map_err(|source| RenderError::ImageDecode {
            source_name: name.clone(),
            source,
        })?;
        let rgba = img.to_rgba8();
        debug!("Image loaded: {} ({}x{})", name, rgba.width(), rgba.height());
        Ok(rgba)
    }
}

impl From<RgbaImage> for ImageSource {
    fn from(img: RgbaImage) -> Self {
        ImageSource::Raster(img)
    }
}

impl From<PathBuf> for ImageSource {
    fn from(path: PathBuf) -> Self {
        ImageSource::Path(path)
    }
}

impl From<&Path> for ImageSource {
    fn from(path: &Path) -> Self {
        ImageSource::Path(path.to_path_buf())
    }
}

impl From<Vec<u8>> for ImageSource {
    fn from(bytes: Vec<u8>) -> Self {
        ImageSource::Encoded(bytes)
    }
}

/// Composite `overlay` at the canvas origin using its own alpha.
///
/// A missing or undecodable overlay is logged and skipped.
/// Returns whether the overlay was applied.
pub fn apply_overlay(canvas: &mut RgbaImage, overlay: Option<ImageSource>) -> bool {
    let Some(source) = overlay else {
        return false;
    };
    match source.load() {
        Ok(top) => {
            image::imageops::overlay(canvas, &top, 0, 0);
            true
        }
        Err(e) => {
            warn!("Overlay skipped: {}", e);
            false
        }
    }
}

/// Encode the canvas as 8-bit RGBA PNG
pub fn encode_png(canvas: &RgbaImage) -> Result<Vec<u8>> {
    let mut out = Vec::new();
    {
        let mut encoder = png::Encoder::new(&mut out, canvas.width(), canvas.height());
        encoder.set_color(png::ColorType::Rgba);
        encoder.set_depth(png::BitDepth::Eight);
        let mut writer = encoder.write_header()?;
        writer.write_image_data(canvas.as_raw())?;
        writer.finish()?;
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    #[test]
    fn test_encode_decodes_to_same_size() {
        let canvas = RgbaImage::from_pixel(7, 3, Rgba([1, 2, 3, 255]));
        let png = encode_png(&canvas).unwrap();
        let decoded = image::load_from_memory(&png).unwrap().to_rgba8();
        assert_eq!(decoded.dimensions(), (7, 3));
        assert_eq!(decoded.get_pixel(6, 2), &Rgba([1, 2, 3, 255]));
    }

    #[test]
    fn test_load_encoded_source() {
        let canvas = RgbaImage::from_pixel(4, 5, Rgba([9, 9, 9, 255]));
        let png = encode_png(&canvas).unwrap();
        let loaded = ImageSource::from(png).load().unwrap();
        assert_eq!(loaded, canvas);
    }

    #[test]
    fn test_missing_file_is_decode_error() {
        let err = ImageSource::from(PathBuf::from("/nonexistent/textfit/base.png"))
            .load()
            .unwrap_err();
        assert!(matches!(err, RenderError::ImageDecode { .. }));
    }

    #[test]
    fn test_overlay_alpha_mask() {
        let mut canvas = RgbaImage::from_pixel(2, 1, Rgba([255, 255, 255, 255]));
        let mut top = RgbaImage::from_pixel(2, 1, Rgba([0, 0, 0, 0]));
        top.put_pixel(1, 0, Rgba([255, 0, 0, 255]));
        assert!(apply_overlay(&mut canvas, Some(top.into())));
        assert_eq!(canvas.get_pixel(0, 0), &Rgba([255, 255, 255, 255]));
        assert_eq!(canvas.get_pixel(1, 0), &Rgba([255, 0, 0, 255]));
    }

    #[test]
    fn test_missing_overlay_is_not_fatal() {
        let mut canvas = RgbaImage::from_pixel(2, 2, Rgba([255, 255, 255, 255]));
        let before = canvas.clone();
        let applied = apply_overlay(
            &mut canvas,
            Some(PathBuf::from("/nonexistent/textfit/overlay.png").into()),
        );
        assert!(!applied);
        assert_eq!(canvas, before);
        assert!(!apply_overlay(&mut canvas, None));
    }
}
