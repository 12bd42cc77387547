//! textfit - auto-fit text and image compositor
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────┐
//! │        Session (config, font, base)      │
//! ├──────────────────────────────────────────┤
//! │  Layout Router  (text + content image)   │
//! │                    ↓                     │
//! │  Font-Size Search → Wrap → Measure       │
//! │                    ↓                     │
//! │  Compositor → Color Segmenter → PNG      │
//! └──────────────────────────────────────────┘
//! ```

pub mod compose;
pub mod config;
pub mod constants;
pub mod error;
pub mod font;
pub mod highlight;
pub mod layout;
pub mod session;
pub mod utils;

pub use compose::{
    render_image, render_text, render_text_and_image, CombinedOptions, ImageSource, PasteOptions,
    Rendered, SplitOrientation, TextRequest, TextStyle,
};
pub use config::Config;
pub use error::{RenderError, Result};
pub use font::{FontLoader, MeasureText};
pub use layout::{Align, Region, VAlign};
pub use session::Session;
