//! Tile decoding and per-pixel analysis.

mod decode;
mod histogram;

pub use decode::{decode_tile, RasterTile};
pub use histogram::ColourHistogram;
