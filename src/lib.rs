//! vectile - RasterFill symbol vectorizer
//!
//! A library for converting legacy raster-tile area fills embedded in QGIS
//! QML style documents into equivalent native vector symbol layers.

pub mod classify;
pub mod cli;
pub mod document;
pub mod error;
pub mod output;
pub mod qml;
pub mod synth;
pub mod tile;
pub mod types;

pub use classify::{classify, ContentHash, PatternCache, TileAnalysis};
pub use document::{
    convert, convert_with_cache, ConversionReport, RasterFillRef, SkippedLayer, StyleDocument,
    StyleModel, Symbol, SymbolLayer,
};
pub use error::{Result, VectileError};
pub use qml::{QmlStyle, QGIS_DOCTYPE};
pub use synth::synthesize;
pub use tile::{decode_tile, ColourHistogram, RasterTile};
pub use types::{
    Colour, DominantColours, DotGeometry, HatchGeometry, PatternKind, PatternSignature,
    SymbolLayerSpec, PIXEL_SIZE,
};
