//! less-sprites - PNG sprite sheet and LESS stylesheet generator
//!
//! Packs a directory of PNG icons into one composite image, pairs icons with
//! their `@2x` retina variants, and writes a LESS mixin per icon with the
//! matching background offsets and sizes.

pub mod builder;
pub mod cli;
pub mod clock;
pub mod config;
pub mod diagnostics;
pub mod discovery;
pub mod error;
pub mod layout;
pub mod output;
pub mod paths;
pub mod render;
pub mod stylesheet;

pub use builder::{BuildReport, SpriteBuilder};
pub use clock::{Clock, FixedClock, SystemClock};
pub use config::{BuildSettings, SpriteConfig, DEFAULT_BORDER};
pub use diagnostics::{Diagnostic, Diagnostics};
pub use error::{Result, SpriteError};
pub use layout::{compute_layout, Direction, IconSpec, Layout, LayoutEntry, RetinaSpec, Size};
pub use render::{Canvas, CompositeOptions, ImageBackend, RasterBackend};
pub use stylesheet::{render as render_stylesheet, SheetImage, StyleOptions};
