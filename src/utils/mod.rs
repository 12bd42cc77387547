//! Utility functions shared across textfit
//!
//! Common helpers that don't fit in specialized modules.

pub mod color;

pub use color::{blend_coverage, parse_hex_color, parse_hex_rgba};
