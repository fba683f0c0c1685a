//! Composite image rendering.
//!
//! This module defines the image backend interface and the raster
//! implementation that writes sprite sheets to disk.

mod backend;
mod raster;

pub use backend::{Canvas, CompositeOptions, ImageBackend};
pub use raster::{RasterBackend, RasterCanvas};
