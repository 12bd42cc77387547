//! Render session
//!
//! Holds everything that outlives a single render: the loaded config, the
//! resolved font and the currently selected base image. Each call to
//! [`Session::generate`] is otherwise self-contained.

use crate::compose::{
    render_image, render_text, render_text_and_image, CombinedOptions, ImageSource, Rendered,
    TextRequest,
};
use crate::config::Config;
use crate::error::Result;
use crate::font::FontLoader;
use log::info;
use std::path::PathBuf;

pub struct Session {
    config: Config,
    font: FontLoader,
    /// Keyword of the selected base image
    current_base: String,
}

impl Session {
    /// Resolve the configured fonts and select the initial base image
    pub fn new(config: Config) -> Self {
        let font = FontLoader::resolve(
            config.font.path().as_deref(),
            config.font.cjk_path().as_deref(),
        );
        Self::with_font(config, font)
    }

    /// Session with an already resolved font
    pub fn with_font(config: Config, font: FontLoader) -> Self {
        let current_base = config.base.initial.clone();
        Self {
            config,
            font,
            current_base,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn font(&self) -> &FontLoader {
        &self.font
    }

    /// Keyword of the selected base image
    pub fn current_base(&self) -> &str {
        &self.current_base
    }

    /// Path of the selected base image
    pub fn base_path(&self) -> PathBuf {
        self.config.base.path_for(&self.current_base)
    }

    /// Switch the base image; unknown keywords resolve to the default image
    pub fn select_base(&mut self, keyword: &str) {
        self.current_base = keyword.to_string();
        info!("Base image: {} ({})", keyword, self.base_path().display());
    }

    /// Strip the first mapped keyword found in `text` and select its base.
    ///
    /// Keywords are tried in the order they appear in the config.
    /// Every occurrence of that keyword is removed and the rest is trimmed.
    /// Text without a keyword is returned unchanged.
    pub fn take_keyword(&mut self, text: &str) -> String {
        let found = self
            .config
            .base
            .mapping
            .keys()
            .find(|keyword| text.contains(keyword.as_str()))
            .cloned();
        match found {
            Some(keyword) => {
                let stripped = text.replace(&keyword, "").trim().to_string();
                self.select_base(&keyword);
                stripped
            }
            None => text.to_string(),
        }
    }

    /// Render `text` and/or `content` onto the selected base image.
    ///
    /// Returns `Ok(None)` when there is nothing to draw.
    pub fn generate(&self, text: &str, content: Option<ImageSource>) -> Result<Option<Rendered>> {
        let region = self.config.region();
        let base = ImageSource::Path(self.base_path());
        let overlay = self.config.base.overlay_path().map(ImageSource::Path);
        let has_text = !text.trim().is_empty();

        let rendered = match (has_text, content) {
            (false, None) => return Ok(None),
            (false, Some(content)) => {
                info!("Rendering content image");
                render_image(region, base, content, &self.config.paste_options(), overlay)?
            }
            (true, None) => {
                info!("Rendering text: {}", text);
                render_text(region, base, &self.request(text), overlay)?
            }
            (true, Some(content)) => {
                info!("Rendering text with content image");
                let options = CombinedOptions {
                    paste: self.config.paste_options(),
                    aspect_ratio: region.aspect_ratio(),
                };
                let request = self.request(text);
                render_text_and_image(region, base, &request, content, &options, overlay)?
            }
        };
        Ok(Some(rendered))
    }

    fn request<'a>(&'a self, text: &'a str) -> TextRequest<'a> {
        TextRequest {
            text,
            font: &self.font,
            style: self.config.text_style(),
        }
    }
}
