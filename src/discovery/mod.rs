//! Icon discovery.
//!
//! Finds the PNG files that make up a sprite and separates base icons from
//! their `@2x` retina variants.

mod collector;
mod retina;

pub use collector::{collect, is_png, PNG_EXTENSION};
pub use retina::{classify, find_retina, icon_name, is_retina_file, RETINA_MARKER};
