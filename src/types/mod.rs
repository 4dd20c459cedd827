//! Core domain types for vectile.
//!
//! This module contains the fundamental types used throughout the pipeline:
//! - `Colour` - RGBA colour values
//! - `PatternSignature` - classified tile patterns and their geometry
//! - `SymbolLayerSpec` - synthesized vector layer descriptions

mod colour;
mod layer;
mod pattern;

pub use colour::Colour;
pub use layer::SymbolLayerSpec;
pub use pattern::{
    DominantColours, DotGeometry, HatchGeometry, PatternKind, PatternSignature, PIXEL_SIZE,
};
