//! Raster backend built on the `image` crate.
//!
//! Each appended tile occupies `(w + 2 * border) x (h + 2 * border)` pixels
//! and sits at the start of the cross axis, so the offsets produced by
//! `compute_layout` line up with where the pixels land.

use std::path::Path;

use image::{ImageFormat, Rgba, RgbaImage};

use crate::error::{Result, SpriteError};
use crate::layout::{Direction, Size};

use super::backend::{Canvas, CompositeOptions, ImageBackend};

const OPAQUE_WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);

/// Image backend that decodes and encodes PNG files in-process.
#[derive(Debug, Default, Clone, Copy)]
pub struct RasterBackend;

impl RasterBackend {
    pub fn new() -> Self {
        Self
    }
}

impl ImageBackend for RasterBackend {
    type Canvas = RasterCanvas;

    fn probe_size(&self, path: &Path) -> Result<Size> {
        let (width, height) = image::image_dimensions(path).map_err(|e| backend_error(path, e))?;
        Ok(Size::new(width, height))
    }

    fn canvas(&self, direction: Direction) -> RasterCanvas {
        RasterCanvas {
            direction,
            tiles: Vec::new(),
        }
    }
}

/// Decoded tiles waiting to be composited.
pub struct RasterCanvas {
    direction: Direction,
    tiles: Vec<RgbaImage>,
}

impl Canvas for RasterCanvas {
    fn append_tile(&mut self, path: &Path) -> Result<()> {
        let tile = image::open(path)
            .map_err(|e| backend_error(path, e))?
            .to_rgba8();
        self.tiles.push(tile);
        Ok(())
    }

    fn write(self, dest: &Path, options: CompositeOptions) -> Result<Size> {
        if self.tiles.is_empty() {
            return Err(SpriteError::Backend {
                path: dest.to_path_buf(),
                message: "Composite has no tiles".to_string(),
            });
        }

        let pad = 2 * options.border;
        let mut along = 0;
        let mut across = 0;
        for tile in &self.tiles {
            let size = Size::new(tile.width(), tile.height());
            along += self.direction.along(size) + pad;
            across = across.max(self.direction.across(size) + pad);
        }

        let (width, height) = match self.direction {
            Direction::Right => (along, across),
            Direction::Down => (across, along),
        };

        let mut canvas = if options.background_transparent {
            RgbaImage::new(width, height)
        } else {
            RgbaImage::from_pixel(width, height, OPAQUE_WHITE)
        };

        let mut cursor = 0u32;
        for tile in &self.tiles {
            let size = Size::new(tile.width(), tile.height());
            let (x, y) = match self.direction {
                Direction::Right => (cursor + options.border, options.border),
                Direction::Down => (options.border, cursor + options.border),
            };
            image::imageops::replace(&mut canvas, tile, i64::from(x), i64::from(y));
            cursor += self.direction.along(size) + pad;
        }

        canvas
            .save_with_format(dest, ImageFormat::Png)
            .map_err(|e| SpriteError::Write {
                path: dest.to_path_buf(),
                message: format!("Failed to write PNG: {}", e),
            })?;

        Ok(Size::new(width, height))
    }
}

fn backend_error(path: &Path, err: image::ImageError) -> SpriteError {
    SpriteError::Backend {
        path: path.to_path_buf(),
        message: err.to_string(),
    }
}
