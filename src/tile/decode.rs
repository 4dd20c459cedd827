//! Tile blob decoding.
//!
//! Decodes an encoded image blob (PNG, BMP, ...) into a normalized RGBA
//! pixel grid. The grid is transient: it lives only for the duration of
//! one classification.

use crate::error::{Result, VectileError};
use crate::types::Colour;

/// A decoded raster tile with row-major RGBA pixels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RasterTile {
    width: u32,
    height: u32,
    pixels: Vec<Colour>,
}

impl RasterTile {
    /// Create a tile from row-major pixels.
    pub fn new(width: u32, height: u32, pixels: Vec<Colour>) -> Self {
        debug_assert_eq!(pixels.len(), (width * height) as usize);
        Self {
            width,
            height,
            pixels,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// All pixels in row-major scan order (top-to-bottom, left-to-right).
    pub fn pixels(&self) -> &[Colour] {
        &self.pixels
    }

    /// Pixel at (x, y). Panics on out-of-bounds coordinates.
    pub fn pixel(&self, x: u32, y: u32) -> Colour {
        self.pixels[(y * self.width + x) as usize]
    }
}

/// Decode an encoded image blob into a [`RasterTile`].
///
/// All pixels are normalized to carry an explicit alpha channel; sources
/// without one decode as fully opaque. Fails with a decode error when the
/// blob is not a decodable image, which callers treat as non-fatal.
pub fn decode_tile(blob: &[u8]) -> Result<RasterTile> {
    let image = image::load_from_memory(blob).map_err(|e| VectileError::Decode {
        message: format!("not a decodable tile image: {}", e),
    })?;

    let rgba = image.to_rgba8();
    let (width, height) = rgba.dimensions();
    let pixels = rgba
        .pixels()
        .map(|p| Colour::new(p.0[0], p.0[1], p.0[2], p.0[3]))
        .collect();

    Ok(RasterTile::new(width, height, pixels))
}
