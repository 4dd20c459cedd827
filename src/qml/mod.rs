//! QGIS QML style documents.
//!
//! This is the XML-backed [`StyleModel`] implementation: it parses a QML
//! file into an element tree, exposes its RasterFill layers (base64
//! `imageFile` options), and splices fully expanded QGIS layer elements in
//! their place. Everything else in the document is carried through
//! untouched.

mod builders;
mod element;

pub use element::{Element, Node};

use std::fs;
use std::path::Path;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;

use crate::document::{RasterFillRef, StyleModel};
use crate::error::{Result, VectileError};
use crate::types::SymbolLayerSpec;

/// DOCTYPE line QGIS expects at the top of a QML file.
pub const QGIS_DOCTYPE: &str = "<!DOCTYPE qgis PUBLIC 'http://mrcc.com/qgis.dtd' 'SYSTEM'>";

/// A parsed QML style document.
#[derive(Debug, Clone, PartialEq)]
pub struct QmlStyle {
    root: Element,
}

impl QmlStyle {
    /// Parse QML source.
    pub fn parse(source: &str) -> Result<Self> {
        let root = element::parse(source)?;
        if root.name != "qgis" {
            return Err(VectileError::Document {
                message: format!("Expected <qgis> root element, found <{}>", root.name),
                help: Some("Is this a QGIS QML style file?".to_string()),
            });
        }
        Ok(Self { root })
    }

    /// Read and parse a QML file.
    pub fn load(path: &Path) -> Result<Self> {
        let source = fs::read_to_string(path).map_err(|e| VectileError::Io {
            path: path.to_path_buf(),
            message: format!("Failed to read QML: {}", e),
        })?;
        Self::parse(&source)
    }

    /// Serialize back to QML, with the QGIS doctype header.
    pub fn to_qml(&self) -> Result<String> {
        Ok(format!(
            "{}\n{}\n",
            QGIS_DOCTYPE,
            element::serialize(&self.root)?
        ))
    }

    /// Write the document to a file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let qml = self.to_qml()?;
        fs::write(path, qml).map_err(|e| VectileError::Io {
            path: path.to_path_buf(),
            message: format!("Failed to write QML: {}", e),
        })
    }

    /// The underlying element tree.
    pub fn root(&self) -> &Element {
        &self.root
    }

    fn symbols(&self) -> Option<&Element> {
        self.root.find_descendant("symbols")
    }
}

/// Extract the decoded image blob of a RasterFill layer, if any.
///
/// Mirrors the QGIS layout: the first `imageFile` entry of the layer's
/// option map decides, and only embedded `base64:` payloads count (file
/// path references are left alone).
fn raster_blob(layer: &Element) -> Option<Vec<u8>> {
    let options = layer.find("Option")?;
    for option in options.child_elements() {
        if option.attr("name") == Some("imageFile") {
            let value = option.attr("value").unwrap_or("");
            let payload = value.strip_prefix("base64:")?;
            return BASE64.decode(payload).ok();
        }
    }
    None
}

impl StyleModel for QmlStyle {
    fn raster_fill_layers(&self) -> Vec<RasterFillRef> {
        let Some(symbols) = self.symbols() else {
            return Vec::new();
        };

        let mut refs = Vec::new();
        for symbol in symbols.child_elements().filter(|el| el.name == "symbol") {
            let name = symbol.attr("name").unwrap_or("");
            for (index, node) in symbol.children.iter().enumerate() {
                let Node::Element(layer) = node else { continue };
                if layer.name != "layer" || layer.attr("class") != Some("RasterFill") {
                    continue;
                }
                if let Some(blob) = raster_blob(layer) {
                    refs.push(RasterFillRef {
                        symbol: name.to_string(),
                        layer: index,
                        blob,
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
        let replacement_elements = builders::build_layers(symbol, replacement);

        let symbols = self
            .root
            .find_descendant_mut("symbols")
            .ok_or_else(|| VectileError::Document {
                message: "No <symbols> element in document".to_string(),
                help: None,
            })?;

        let target = symbols
            .children
            .iter_mut()
            .find_map(|node| match node {
                Node::Element(el) if el.name == "symbol" && el.attr("name") == Some(symbol) => {
                    Some(el)
                }
                _ => None,
            })
            .ok_or_else(|| VectileError::Document {
                message: format!("No symbol named '{}'", symbol),
                help: None,
            })?;

        let is_raster = matches!(
            target.children.get(layer),
            Some(Node::Element(el)) if el.name == "layer" && el.attr("class") == Some("RasterFill")
        );
        if !is_raster {
            return Err(VectileError::Document {
                message: format!(
                    "Layer {} of symbol '{}' is not a RasterFill layer",
                    layer, symbol
                ),
                help: None,
            });
        }

        target.children.splice(
            layer..layer + 1,
            replacement_elements.into_iter().map(Node::Element),
        );
        Ok(())
    }
}
