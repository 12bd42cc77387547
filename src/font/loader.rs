//! Font resolution
//!
//! Resolves the face once per session so the font-size search only has to
//! build cheap [`SizedFont`] views per candidate size.
//!
//! Resolution order:
//! 1. Configured font file
//! 2. Generic system face (known paths, hardcoded)
//! 3. Built-in box face (never fails)

use super::SizedFont;
use anyhow::{anyhow, Result};
use fontdue::{Font, FontSettings};
use log::{debug, info, warn};
use std::path::{Path, PathBuf};

/// Generic faces tried after the configured font
const GENERIC_FONT_CANDIDATES: &[&str] = &[
    // Linux
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu-sans-fonts/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "/usr/share/fonts/liberation-sans/LiberationSans-Regular.ttf",
    "/usr/share/fonts/truetype/noto/NotoSans-Regular.ttf",
    // macOS
    "/Library/Fonts/Arial.ttf",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
    // Windows
    "C:\\Windows\\Fonts\\arial.ttf",
    // Working directory
    "DejaVuSans.ttf",
];

/// Where the primary face came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FaceOrigin {
    /// Font file named in the config
    Configured(PathBuf),
    /// Generic system face
    Generic(PathBuf),
    /// Built-in box face
    Builtin,
}

/// Primary face
pub(crate) enum Face {
    Outline(Font),
    Builtin,
}

/// Resolved faces, shared by every size the search tries
pub struct FontLoader {
    pub(crate) primary: Face,
    /// Per-glyph fallback for characters missing from the primary face
    pub(crate) cjk: Option<Font>,
    origin: FaceOrigin,
}

impl FontLoader {
    /// Resolve the primary face and the optional CJK fallback face.
    ///
    /// Never fails: every failure falls through to the next step.
    pub fn resolve(configured: Option<&Path>, cjk: Option<&Path>) -> Self {
        let mut loader = Self::resolve_primary(configured);
        loader.cjk = cjk.and_then(|path| match load_face(path) {
            Ok(font) => {
                info!("CJK font loaded: {}", path.display());
                Some(font)
            }
            Err(e) => {
                warn!("Failed to load CJK font (continuing): {}", e);
                None
            }
        });
        loader
    }

    fn resolve_primary(configured: Option<&Path>) -> Self {
        if let Some(path) = configured {
            match load_face(path) {
                Ok(font) => {
                    info!("Font loaded: {}", path.display());
                    return Self::outline(font, FaceOrigin::Configured(path.to_path_buf()));
                }
                Err(e) => warn!("Configured font unavailable, trying generic faces: {}", e),
            }
        }

        for candidate in GENERIC_FONT_CANDIDATES {
            let path = Path::new(candidate);
            if !path.exists() {
                continue;
            }
            match load_face(path) {
                Ok(font) => {
                    info!("Font loaded: {} (generic)", candidate);
                    return Self::outline(font, FaceOrigin::Generic(path.to_path_buf()));
                }
                Err(e) => debug!("Skipping generic face: {}", e),
            }
        }

        warn!("No usable font file found, using built-in box face");
        Self::builtin()
    }

    /// Loader backed only by the built-in face
    pub fn builtin() -> Self {
        Self {
            primary: Face::Builtin,
            cjk: None,
            origin: FaceOrigin::Builtin,
        }
    }

    fn outline(font: Font, origin: FaceOrigin) -> Self {
        Self {
            primary: Face::Outline(font),
            cjk: None,
            origin,
        }
    }

    /// Where the primary face was resolved from
    pub fn origin(&self) -> &FaceOrigin {
        &self.origin
    }

    /// Whether a CJK fallback face is loaded
    pub fn has_cjk_fallback(&self) -> bool {
        self.cjk.is_some()
    }

    /// View of the faces at a pixel size (clamped to at least 1)
    pub fn at_size(&self, size: u32) -> SizedFont<'_> {
        SizedFont::new(self, size.max(1) as f32)
    }
}

/// Read and parse a font file
fn load_face(path: &Path) -> Result<Font> {
    let data = std::fs::read(path)
        .map_err(|e| anyhow!("Failed to read font: {} ({})", path.display(), e))?;
    Font::from_bytes(data, FontSettings::default())
        .map_err(|e| anyhow!("Failed to parse font: {} ({})", path.display(), e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_loader() {
        let loader = FontLoader::builtin();
        assert_eq!(loader.origin(), &FaceOrigin::Builtin);
        assert!(!loader.has_cjk_fallback());
    }

    #[test]
    fn test_missing_configured_font_falls_through() {
        let loader = FontLoader::resolve(
            Some(Path::new("/nonexistent/textfit/font.ttf")),
            Some(Path::new("/nonexistent/textfit/cjk.ttf")),
        );
        // Generic face or built-in, never the missing file
        assert!(!matches!(loader.origin(), FaceOrigin::Configured(_)));
        assert!(!loader.has_cjk_fallback());
    }

    #[test]
    fn test_garbage_font_file_falls_through() {
        let name = format!("textfit-bad-font-{}.ttf", std::process::id());
        let path = std::env::temp_dir().join(name);
        std::fs::write(&path, b"not a font").unwrap();
        let loader = FontLoader::resolve(Some(&path), None);
        assert!(!matches!(loader.origin(), FaceOrigin::Configured(_)));
        let _ = std::fs::remove_file(&path);
    }
}
