//! Configuration file management
//!
//! Loads TOML configuration files and provides render settings.
//! Default config path: ~/.config/textfit/config.toml

use crate::compose::{PasteOptions, TextStyle};
use crate::constants::{DEFAULT_LINE_SPACING, DEFAULT_MAX_FONT_HEIGHT, DEFAULT_PASTE_PADDING};
use crate::layout::{Align, Region, VAlign};
use crate::utils::parse_hex_rgba;
use anyhow::{Context, Result};
use image::Rgba;
use indexmap::IndexMap;
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Application settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Font settings
    pub font: FontConfig,
    /// Text color and alignment
    pub text: TextConfig,
    /// Target region on the base image
    pub region: RegionConfig,
    /// Base image selection and overlay
    pub base: BaseConfig,
    /// Content image placement
    pub paste: PasteConfig,
}

/// Font settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FontConfig {
    /// Font file path (falls back to a system face, then the built-in face)
    pub file: String,
    /// Fallback face for glyphs the main font lacks (empty = none)
    pub cjk: String,
    /// Font size cap in pixels (0 = limited only by region height)
    pub max_height: u32,
    /// Extra line gap as a ratio of ascent + descent
    pub line_spacing: f32,
}

/// Text settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextConfig {
    /// Text color (RRGGBB)
    pub color: String,
    /// Color of bracketed spans (RRGGBB)
    pub bracket_color: String,
    /// Horizontal alignment: "left" | "center" | "right"
    pub align: Align,
    /// Vertical alignment: "top" | "middle" | "bottom"
    pub valign: VAlign,
}

/// Region settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegionConfig {
    /// Top-left corner [x, y]
    pub top_left: [i32; 2],
    /// Bottom-right corner [x, y]
    pub bottom_right: [i32; 2],
}

/// Base image settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BaseConfig {
    /// Base image used when no keyword matches
    pub default: String,
    /// Keyword selected at startup
    pub initial: String,
    /// Keyword -> base image path, matched in file order
    pub mapping: IndexMap<String, String>,
    /// Transparent top layer composited last
    pub overlay: String,
    /// Whether the overlay is applied
    pub use_overlay: bool,
}

/// Paste settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PasteConfig {
    /// Gap between the pasted image and the region edges (pixels)
    pub padding: u32,
    /// Scale small images up to fill the region
    pub allow_upscale: bool,
    /// Keep the pasted image's transparency
    pub keep_alpha: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            font: FontConfig::default(),
            text: TextConfig::default(),
            region: RegionConfig::default(),
            base: BaseConfig::default(),
            paste: PasteConfig::default(),
        }
    }
}

impl Default for FontConfig {
    fn default() -> Self {
        Self {
            file: "font.ttf".to_string(),
            cjk: String::new(),
            max_height: DEFAULT_MAX_FONT_HEIGHT,
            line_spacing: DEFAULT_LINE_SPACING,
        }
    }
}

impl Default for TextConfig {
    fn default() -> Self {
        Self {
            color: "000000".to_string(),
            bracket_color: "800080".to_string(),
            align: Align::Center,
            valign: VAlign::Middle,
        }
    }
}

impl Default for RegionConfig {
    fn default() -> Self {
        Self {
            top_left: [119, 450],
            bottom_right: [398, 625],
        }
    }
}

impl Default for BaseConfig {
    fn default() -> Self {
        let mapping = [
            ("#普通#", "BaseImages/base.png"),
            ("#开心#", "BaseImages/开心.png"),
            ("#生气#", "BaseImages/生气.png"),
            ("#无语#", "BaseImages/无语.png"),
            ("#脸红#", "BaseImages/脸红.png"),
            ("#病娇#", "BaseImages/病娇.png"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

        Self {
            default: "BaseImages/base.png".to_string(),
            initial: "#普通#".to_string(),
            mapping,
            overlay: "BaseImages/base_overlay.png".to_string(),
            use_overlay: true,
        }
    }
}

impl Default for PasteConfig {
    fn default() -> Self {
        Self {
            padding: DEFAULT_PASTE_PADDING,
            allow_upscale: true,
            keep_alpha: true,
        }
    }
}

impl FontConfig {
    /// Configured font file, if any
    pub fn path(&self) -> Option<PathBuf> {
        non_empty_path(&self.file)
    }

    /// Configured fallback face, if any
    pub fn cjk_path(&self) -> Option<PathBuf> {
        non_empty_path(&self.cjk)
    }

    /// Size cap, `None` when disabled
    pub fn max_font_height(&self) -> Option<u32> {
        (self.max_height > 0).then_some(self.max_height)
    }
}

impl BaseConfig {
    /// Base image for a keyword (unknown keywords use the default image)
    pub fn path_for(&self, keyword: &str) -> PathBuf {
        PathBuf::from(self.mapping.get(keyword).unwrap_or(&self.default))
    }

    /// Overlay path when enabled
    pub fn overlay_path(&self) -> Option<PathBuf> {
        if self.use_overlay {
            non_empty_path(&self.overlay)
        } else {
            None
        }
    }
}

impl Config {
    /// Get the path that would be used for loading config
    /// Returns None if using built-in defaults
    pub fn config_path() -> Option<PathBuf> {
        // 1. TEXTFIT_CONFIG environment variable
        if let Ok(path) = std::env::var("TEXTFIT_CONFIG") {
            let p = Path::new(&path);
            if p.exists() {
                return Some(p.to_path_buf());
            }
        }

        // 2. User config: ~/.config/textfit/config.toml
        if let Some(config_dir) = dirs::config_dir() {
            let config_path = config_dir.join("textfit").join("config.toml");
            if config_path.exists() {
                return Some(config_path);
            }
        }

        // 3. Working directory
        let local = Path::new("config.toml");
        if local.exists() {
            return Some(local.to_path_buf());
        }

        None
    }

    /// Load configuration with priority:
    /// 1. TEXTFIT_CONFIG environment variable
    /// 2. ~/.config/textfit/config.toml (user config)
    /// 3. ./config.toml
    /// 4. Built-in defaults
    pub fn load() -> Self {
        if let Some(path) = Self::config_path() {
            match Self::load_from_file(&path) {
                Ok(config) => {
                    info!("Loaded config: {}", path.display());
                    return config;
                }
                Err(e) => {
                    warn!("Failed to load config {}: {:#}", path.display(), e);
                }
            }
        }
        info!("Using built-in default config");
        Self::default()
    }

    /// Load settings from specified path
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        Ok(config)
    }

    /// User config location (~/.config/textfit/config.toml)
    pub fn user_config_path() -> Result<PathBuf> {
        let config_dir =
            dirs::config_dir().ok_or_else(|| anyhow::anyhow!("Config directory not found"))?;
        Ok(config_dir.join("textfit").join("config.toml"))
    }

    /// Write the commented template to the user config path
    pub fn write_default_config(force: bool) -> Result<PathBuf> {
        let config_path = Self::user_config_path()?;
        Self::write_template(&config_path, force)?;
        Ok(config_path)
    }

    /// Write the commented template to `path`, refusing to overwrite unless `force`
    pub fn write_template(path: &Path, force: bool) -> Result<()> {
        if path.exists() && !force {
            anyhow::bail!(
                "Config file already exists: {} (use --force to overwrite)",
                path.display()
            );
        }
        if let Some(dir) = path.parent() {
            if !dir.as_os_str().is_empty() {
                std::fs::create_dir_all(dir)
                    .with_context(|| format!("Failed to create {}", dir.display()))?;
            }
        }
        std::fs::write(path, CONFIG_TEMPLATE)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;
        Ok(())
    }

    /// Target region
    pub fn region(&self) -> Region {
        Region::from_corners(
            (self.region.top_left[0], self.region.top_left[1]),
            (self.region.bottom_right[0], self.region.bottom_right[1]),
        )
    }

    /// Text style with colors parsed (invalid colors fall back to defaults)
    pub fn text_style(&self) -> TextStyle {
        let defaults = TextStyle::default();
        TextStyle {
            color: color_or(&self.text.color, defaults.color, "text.color"),
            bracket_color: color_or(
                &self.text.bracket_color,
                defaults.bracket_color,
                "text.bracket_color",
            ),
            max_font_height: self.font.max_font_height(),
            align: self.text.align,
            valign: self.text.valign,
            line_spacing: self.font.line_spacing.max(0.0),
        }
    }

    /// Placement of content images (always centered)
    pub fn paste_options(&self) -> PasteOptions {
        PasteOptions {
            padding: self.paste.padding,
            allow_upscale: self.paste.allow_upscale,
            keep_alpha: self.paste.keep_alpha,
            ..PasteOptions::default()
        }
    }
}

fn non_empty_path(s: &str) -> Option<PathBuf> {
    let s = s.trim();
    (!s.is_empty()).then(|| PathBuf::from(s))
}

fn color_or(hex: &str, default: Rgba<u8>, field: &str) -> Rgba<u8> {
    parse_hex_rgba(hex).unwrap_or_else(|| {
        warn!("Invalid color for {}: {:?}, using default", field, hex);
        default
    })
}

const CONFIG_TEMPLATE: &str = r##"# textfit configuration
# Location: ~/.config/textfit/config.toml (or set TEXTFIT_CONFIG)

[font]
# Font file (TTF/OTF). Missing files fall back to a system face,
# then to a built-in box face.
file = "font.ttf"
# Fallback face for glyphs the main font lacks, e.g. a CJK font
cjk = ""
# Font size cap in pixels (0 = limited only by region height)
max_height = 64
# Extra line gap as a ratio of ascent + descent
line_spacing = 0.15

[text]
# Colors are RRGGBB (or RGB) hex, '#' optional
color = "000000"
# Spans inside [..] or 【..】 use this color, brackets included
bracket_color = "800080"
# "left" | "center" | "right" (applied to each line)
align = "center"
# "top" | "middle" | "bottom"
valign = "middle"

[region]
# Text/image box on the base image, in pixels
top_left = [119, 450]
bottom_right = [398, 625]

[base]
# Base image used when no keyword matches
default = "BaseImages/base.png"
# Keyword selected at startup
initial = "#普通#"
# Transparent layer composited over the finished image
overlay = "BaseImages/base_overlay.png"
use_overlay = true

# A keyword found in the text selects its base image and is removed
[base.mapping]
"#普通#" = "BaseImages/base.png"
"#开心#" = "BaseImages/开心.png"
"#生气#" = "BaseImages/生气.png"
"#无语#" = "BaseImages/无语.png"
"#脸红#" = "BaseImages/脸红.png"
"#病娇#" = "BaseImages/病娇.png"

[paste]
# Gap between a pasted image and the region edges
padding = 12
allow_upscale = true
keep_alpha = true
"##;
