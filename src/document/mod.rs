//! Style document model.
//!
//! The conversion core never depends on a concrete document representation;
//! it talks to any type implementing [`StyleModel`]. This module provides
//! the trait plus a plain in-memory [`StyleDocument`] implementation. The
//! XML-backed implementation lives in [`crate::qml`].

mod convert;

pub use convert::{convert, convert_with_cache, ConversionReport, SkippedLayer};

use crate::error::{Result, VectileError};
use crate::types::SymbolLayerSpec;

/// One raster-fill layer found in a document: where it sits and its blob.
#[derive(Debug, Clone)]
pub struct RasterFillRef {
    /// Name of the symbol holding the layer.
    pub symbol: String,
    /// Layer position inside the symbol.
    pub layer: usize,
    /// The raw encoded image bytes.
    pub blob: Vec<u8>,
}

/// Interface the conversion core requires of a style document.
///
/// Any representation able to enumerate its raster-fill layers and splice
/// replacement layers in place is sufficient.
pub trait StyleModel {
    /// All raster-fill layers, in document order.
    fn raster_fill_layers(&self) -> Vec<RasterFillRef>;

    /// Replace the layer at `layer` in `symbol` with `replacement`,
    /// preserving the relative order of every other layer.
    fn replace_layer(
        &mut self,
        symbol: &str,
        layer: usize,
        replacement: &[SymbolLayerSpec],
    ) -> Result<()>;
}

/// One layer of an in-memory symbol.
#[derive(Debug, Clone, PartialEq)]
pub enum SymbolLayer {
    /// A raster-fill layer carrying an encoded tile blob.
    Raster { blob: Vec<u8> },
    /// A synthesized vector layer.
    Vector(SymbolLayerSpec),
    /// Any other layer kind, preserved untouched.
    Other { class: String },
}

/// A named, ordered stack of layers.
#[derive(Debug, Clone, PartialEq)]
pub struct Symbol {
    pub name: String,
    pub layers: Vec<SymbolLayer>,
}

impl Symbol {
    pub fn new(name: impl Into<String>, layers: Vec<SymbolLayer>) -> Self {
        Self {
            name: name.into(),
            layers,
        }
    }
}

/// A plain in-memory style document: an ordered collection of named symbols.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StyleDocument {
    symbols: Vec<Symbol>,
}

impl StyleDocument {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_symbol(&mut self, symbol: Symbol) {
        self.symbols.push(symbol);
    }

    pub fn symbols(&self) -> &[Symbol] {
        &self.symbols
    }

    pub fn get_symbol(&self, name: &str) -> Option<&Symbol> {
        self.symbols.iter().find(|s| s.name == name)
    }
}

impl StyleModel for StyleDocument {
    fn raster_fill_layers(&self) -> Vec<RasterFillRef> {
        let mut refs = Vec::new();
        for symbol in &self.symbols {
            for (index, layer) in symbol.layers.iter().enumerate() {
                if let SymbolLayer::Raster { blob } = layer {
                    refs.push(RasterFillRef {
                        symbol: symbol.name.clone(),
                        layer: index,
                        blob: blob.clone(),
                    });
                }
            }
        }
        refs
    }

    fn replace_layer(
        &mut self,
        symbol: &str,
        layer: usize,
        replacement: &[SymbolLayerSpec],
    ) -> Result<()> {
        let target = self
            .symbols
            .iter_mut()
            .find(|s| s.name == symbol)
            .ok_or_else(|| VectileError::Document {
                message: format!("No symbol named '{}'", symbol),
                help: None,
            })?;

        if !matches!(target.layers.get(layer), Some(SymbolLayer::Raster { .. })) {
            return Err(VectileError::Document {
                message: format!(
                    "Layer {} of symbol '{}' is not a raster-fill layer",
                    layer, symbol
                ),
                help: None,
            });
        }

        target.layers.splice(
            layer..layer + 1,
            replacement.iter().cloned().map(SymbolLayer::Vector),
        );
        Ok(())
    }
}
