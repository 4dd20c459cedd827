//! Tile pattern classification.
//!
//! Classification is a pure function of the decoded pixel grid: a fixed,
//! ordered list of named matcher predicates is tried until one claims the
//! tile, falling through to a generic dot grid for dimensions nothing
//! recognizes. The order encodes the precedence rules between the special
//! cases, so new matchers must be inserted deliberately, not appended.

mod cache;
mod matchers;

pub use cache::{ContentHash, PatternCache};
pub use matchers::TileAnalysis;

use crate::tile::RasterTile;
use crate::types::PatternSignature;

type Matcher = fn(&TileAnalysis) -> Option<PatternSignature>;

/// Matchers in priority order. The names are used in trace output and tests.
const MATCHERS: &[(&str, Matcher)] = &[
    ("dot-grid", matchers::match_dot_grid),
    ("dot-staggered", matchers::match_dot_staggered),
    ("dot-sparse-rows", matchers::match_dot_sparse_rows),
    ("dot-grid-extra", matchers::match_dot_grid_extra),
    ("dot-density", matchers::match_dot_density),
    ("diamond-hatch", matchers::match_diamond_hatch),
    ("semi-transparent-hatch", matchers::match_semi_transparent_hatch),
    ("tricolour-dot", matchers::match_tricolour_dot),
    ("dot-sparse-pair", matchers::match_dot_sparse_pair),
];

/// Classify a decoded tile into a pattern signature.
///
/// Total over all tile dimensions: unrecognized tiles fall back to a
/// fixed-spacing dot grid rather than failing.
pub fn classify(tile: &RasterTile) -> PatternSignature {
    let analysis = TileAnalysis::of(tile);

    for (_name, matcher) in MATCHERS {
        if let Some(signature) = matcher(&analysis) {
            return signature;
        }
    }

    matchers::fallback_dot_grid(&analysis)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Colour, PatternKind};

    fn solid_tile(width: u32, height: u32) -> RasterTile {
        RasterTile::new(
            width,
            height,
            vec![Colour::rgb(100, 150, 100); (width * height) as usize],
        )
    }

    #[test]
    fn test_classification_is_total() {
        // A selection of shapes, all of which must classify without error.
        for (width, height) in [(12, 12), (40, 40), (64, 64), (80, 80), (1, 1), (33, 7)] {
            let signature = classify(&solid_tile(width, height));
            assert!(!signature.kind.name().is_empty());
        }
    }

    #[test]
    fn test_single_colour_12x12_uses_density() {
        // With one colour, background == foreground and every pixel counts
        // as foreground: density 1 gives the minimum spacing.
        let signature = classify(&solid_tile(12, 12));

        match signature.kind {
            PatternKind::DotGrid { dots } => assert_eq!(dots.distance_x, 0.75),
            other => panic!("expected DotGrid, got {:?}", other),
        }
        assert_eq!(signature.colours.background, signature.colours.foreground);
    }

    #[test]
    fn test_unknown_dimensions_use_fixed_spacing() {
        let signature = classify(&solid_tile(33, 7));

        match signature.kind {
            PatternKind::DotGrid { dots } => {
                assert_eq!(dots.distance_x, 3.0);
                assert_eq!(dots.distance_y, 3.0);
            }
            other => panic!("expected DotGrid, got {:?}", other),
        }
    }

    #[test]
    fn test_precedence_dense_grid_before_stagger() {
        // The dense type A layout also has foreground on all even rows, so
        // it must be claimed by the dot-grid matcher before any stagger
        // matcher gets a chance.
        let bg = Colour::rgb(240, 240, 240);
        let fg = Colour::rgb(20, 20, 20);
        let mut pixels = vec![bg; 144];
        for row in (0..12).step_by(2) {
            for col in (0..12).step_by(2) {
                pixels[row * 12 + col] = fg;
            }
        }
        let signature = classify(&RasterTile::new(12, 12, pixels));

        assert!(matches!(signature.kind, PatternKind::DotGrid { .. }));
    }
}
