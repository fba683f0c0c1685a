//! Image backend interface.
//!
//! The layout code never touches pixels. Everything that decodes or encodes
//! images goes through these traits so that builds can be driven against a
//! real raster backend or a recording fake in tests.

use std::path::Path;

use crate::error::Result;
use crate::layout::{Direction, Size};

/// Options applied when a composite is written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompositeOptions {
    /// Leave the canvas transparent outside the tiles.
    pub background_transparent: bool,
    /// Padding, in pixels, added on every side of every tile.
    pub border: u32,
}

/// A composite under construction.
///
/// Tiles are placed in the order they are appended.
pub trait Canvas {
    /// Append one image file to the end of the stacking axis.
    fn append_tile(&mut self, path: &Path) -> Result<()>;

    /// Write the composite to `dest` and return its pixel size.
    fn write(self, dest: &Path, options: CompositeOptions) -> Result<Size>;
}

/// Source of image dimensions and composites.
pub trait ImageBackend {
    type Canvas: Canvas;

    /// Read the pixel dimensions of an image file.
    fn probe_size(&self, path: &Path) -> Result<Size>;

    /// Start an empty composite stacking along `direction`.
    fn canvas(&self, direction: Direction) -> Self::Canvas;
}
