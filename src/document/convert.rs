//! The conversion entry point.
//!
//! Walks a style document's raster-fill layers, classifies each tile
//! (memoized by content hash), and splices the synthesized vector layers
//! in place. Decode failures are recorded and skipped; they never abort
//! the remaining layers or symbols.

use serde::Serialize;

use crate::classify::PatternCache;
use crate::error::Result;
use crate::synth::synthesize;

use super::StyleModel;

/// A layer left unconverted because its blob could not be decoded.
#[derive(Debug, Clone, Serialize)]
pub struct SkippedLayer {
    pub symbol: String,
    pub layer: usize,
    pub reason: String,
}

/// Outcome of one conversion call over one document.
#[derive(Debug, Default, Serialize)]
pub struct ConversionReport {
    /// Number of raster-fill layers replaced.
    pub layers_converted: usize,
    /// Layers left in place because their tile could not be decoded.
    pub skipped: Vec<SkippedLayer>,
}

impl ConversionReport {
    /// Whether any conversion was performed.
    pub fn converted(&self) -> bool {
        self.layers_converted > 0
    }
}

/// Convert all raster-fill layers of a document, using a fresh cache.
pub fn convert<M: StyleModel>(document: &mut M) -> Result<ConversionReport> {
    let mut cache = PatternCache::new();
    convert_with_cache(document, &mut cache)
}

/// Convert all raster-fill layers of a document.
///
/// The cache must be exclusive to this call; reusing one across documents
/// is sound only for sequential conversions by the same caller. When no
/// raster-fill layers exist the document is returned untouched and the
/// report says so.
pub fn convert_with_cache<M: StyleModel>(
    document: &mut M,
    cache: &mut PatternCache,
) -> Result<ConversionReport> {
    let mut report = ConversionReport::default();

    // Process each symbol's layers highest index first, so splicing a
    // multi-layer replacement never shifts a still-pending index.
    let refs = document.raster_fill_layers();
    for raster in refs.iter().rev() {
        match cache.classify(&raster.blob) {
            Ok(signature) => {
                let replacement = synthesize(signature);
                document.replace_layer(&raster.symbol, raster.layer, &replacement)?;
                report.layers_converted += 1;
            }
            Err(error) => {
                report.skipped.push(SkippedLayer {
                    symbol: raster.symbol.clone(),
                    layer: raster.layer,
                    reason: error.to_string(),
                });
            }
        }
    }
    report.skipped.reverse();

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{StyleDocument, Symbol, SymbolLayer};
    use crate::types::{Colour, SymbolLayerSpec};
    use std::io::Cursor;

    fn png_blob(width: u32, height: u32, rgba: [u8; 4]) -> Vec<u8> {
        let img = image::RgbaImage::from_pixel(width, height, image::Rgba(rgba));
        let mut bytes = Vec::new();
        img.write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)
            .unwrap();
        bytes
    }

    fn raster_symbol(name: &str, blob: Vec<u8>) -> Symbol {
        Symbol::new(name, vec![SymbolLayer::Raster { blob }])
    }

    #[test]
    fn test_converts_raster_layer_in_place() {
        let mut document = StyleDocument::new();
        document.push_symbol(Symbol::new(
            "seagrass",
            vec![
                SymbolLayer::Other {
                    class: "SimpleLine".to_string(),
                },
                SymbolLayer::Raster {
                    blob: png_blob(80, 80, [50, 120, 70, 255]),
                },
            ],
        ));

        let report = convert(&mut document).unwrap();

        assert!(report.converted());
        assert_eq!(report.layers_converted, 1);
        assert!(report.skipped.is_empty());

        // 80x80 is the sparse-pair pattern: fill + point pattern, spliced
        // after the untouched outline layer.
        let layers = &document.get_symbol("seagrass").unwrap().layers;
        assert_eq!(layers.len(), 3);
        assert!(matches!(&layers[0], SymbolLayer::Other { .. }));
        assert!(matches!(
            &layers[1],
            SymbolLayer::Vector(SymbolLayerSpec::SimpleFill { .. })
        ));
        assert!(matches!(
            &layers[2],
            SymbolLayer::Vector(SymbolLayerSpec::PointPatternFill { .. })
        ));
    }

    #[test]
    fn test_document_without_rasters_is_untouched() {
        let mut document = StyleDocument::new();
        document.push_symbol(Symbol::new(
            "plain",
            vec![SymbolLayer::Vector(SymbolLayerSpec::solid_fill(
                Colour::WHITE,
            ))],
        ));
        let before = document.clone();

        let report = convert(&mut document).unwrap();

        assert!(!report.converted());
        assert_eq!(document, before);
    }

    #[test]
    fn test_conversion_is_idempotent() {
        let mut document = StyleDocument::new();
        document.push_symbol(raster_symbol("coral", png_blob(40, 40, [200, 80, 80, 255])));

        let first = convert(&mut document).unwrap();
        assert!(first.converted());

        let after_first = document.clone();
        let second = convert(&mut document).unwrap();

        assert!(!second.converted());
        assert_eq!(document, after_first);
    }

    #[test]
    fn test_identical_blobs_share_one_classification() {
        let blob = png_blob(12, 12, [90, 90, 90, 255]);
        let mut document = StyleDocument::new();
        document.push_symbol(raster_symbol("a", blob.clone()));
        document.push_symbol(raster_symbol("b", blob));

        let mut cache = PatternCache::new();
        let report = convert_with_cache(&mut document, &mut cache).unwrap();

        assert_eq!(report.layers_converted, 2);
        assert_eq!(cache.len(), 1);
        assert_eq!(
            document.get_symbol("a").unwrap().layers,
            document.get_symbol("b").unwrap().layers
        );
    }

    #[test]
    fn test_decode_failure_skips_layer_but_not_siblings() {
        let mut document = StyleDocument::new();
        document.push_symbol(raster_symbol("broken", b"not an image".to_vec()));
        document.push_symbol(raster_symbol("fine", png_blob(40, 40, [10, 10, 10, 255])));

        let report = convert(&mut document).unwrap();

        assert_eq!(report.layers_converted, 1);
        assert_eq!(report.skipped.len(), 1);
        assert_eq!(report.skipped[0].symbol, "broken");
        // The broken layer stays in place, unconverted.
        assert!(matches!(
            document.get_symbol("broken").unwrap().layers[0],
            SymbolLayer::Raster { .. }
        ));
        // The diamond hatch replacement is 3 layers.
        assert_eq!(document.get_symbol("fine").unwrap().layers.len(), 3);
    }

    #[test]
    fn test_multiple_rasters_in_one_symbol() {
        let mut document = StyleDocument::new();
        document.push_symbol(Symbol::new(
            "stacked",
            vec![
                SymbolLayer::Raster {
                    blob: png_blob(80, 80, [1, 2, 3, 255]),
                },
                SymbolLayer::Raster {
                    blob: png_blob(40, 40, [4, 5, 6, 255]),
                },
            ],
        ));

        let report = convert(&mut document).unwrap();

        assert_eq!(report.layers_converted, 2);
        let layers = &document.get_symbol("stacked").unwrap().layers;
        // 2 layers from the sparse pair + 3 from the diamond hatch.
        assert_eq!(layers.len(), 5);
        assert!(layers
            .iter()
            .all(|layer| matches!(layer, SymbolLayer::Vector(_))));
    }
}
