//! Pattern matcher predicates.
//!
//! Each matcher inspects a [`TileAnalysis`] and either claims the tile by
//! returning a full [`PatternSignature`] or declines with `None`. Matchers
//! are tried in a fixed priority order (see the parent module); dimension
//! checks live inside each matcher so the order alone defines precedence.

use std::collections::{BTreeSet, HashMap};

use crate::tile::{ColourHistogram, RasterTile};
use crate::types::{
    Colour, DominantColours, DotGeometry, HatchGeometry, PatternKind, PatternSignature, PIXEL_SIZE,
};

/// Row/column indices of the dense 12x12 grid layout.
const EVEN_STEPS: [u32; 6] = [0, 2, 4, 6, 8, 10];
/// First row/column set of the staggered 12x12 layout.
const STAGGER_A: [u32; 3] = [0, 4, 8];
/// Second row/column set of the staggered 12x12 layout.
const STAGGER_B: [u32; 3] = [2, 6, 10];
/// Extra rows of the dense-plus 12x12 layout.
const EXTRA_ROWS: [u32; 3] = [3, 7, 11];

/// Precomputed per-tile facts shared by all matchers.
#[derive(Debug)]
pub struct TileAnalysis {
    width: u32,
    height: u32,
    colours: DominantColours,
    ranked: Vec<(Colour, usize)>,
    /// Columns holding a foreground pixel, per populated row, in scan order
    /// (which for one row means ascending column order).
    row_cols: HashMap<u32, Vec<u32>>,
    fg_rows: BTreeSet<u32>,
    fg_count: usize,
}

impl TileAnalysis {
    pub fn of(tile: &RasterTile) -> Self {
        let histogram = ColourHistogram::of(tile);
        let colours = histogram.dominant();
        let ranked = histogram.ranked();

        let mut row_cols: HashMap<u32, Vec<u32>> = HashMap::new();
        let mut fg_count = 0;
        for y in 0..tile.height() {
            for x in 0..tile.width() {
                if tile.pixel(x, y) == colours.foreground {
                    row_cols.entry(y).or_default().push(x);
                    fg_count += 1;
                }
            }
        }
        let fg_rows = row_cols.keys().copied().collect();

        Self {
            width: tile.width(),
            height: tile.height(),
            colours,
            ranked,
            row_cols,
            fg_rows,
            fg_count,
        }
    }

    fn is(&self, width: u32, height: u32) -> bool {
        self.width == width && self.height == height
    }

    /// Foreground columns of a row; empty when the row holds none.
    fn cols(&self, row: u32) -> &[u32] {
        self.row_cols.get(&row).map_or(&[], Vec::as_slice)
    }

    fn signature(&self, kind: PatternKind) -> PatternSignature {
        PatternSignature {
            colours: self.colours,
            kind,
        }
    }
}

fn row_set(rows: &[u32]) -> BTreeSet<u32> {
    rows.iter().copied().collect()
}

/// 12x12 type A: a dot every 2 pixels on both axes.
pub fn match_dot_grid(analysis: &TileAnalysis) -> Option<PatternSignature> {
    if !analysis.is(12, 12) {
        return None;
    }
    if analysis.fg_rows != row_set(&EVEN_STEPS) {
        return None;
    }
    if !EVEN_STEPS.iter().all(|&row| analysis.cols(row) == EVEN_STEPS) {
        return None;
    }

    Some(analysis.signature(PatternKind::DotGrid {
        dots: DotGeometry::grid(2.0 * PIXEL_SIZE, 2.0 * PIXEL_SIZE),
    }))
}

/// 12x12 type B: two alternating row sets forming a diagonal stagger.
pub fn match_dot_staggered(analysis: &TileAnalysis) -> Option<PatternSignature> {
    if !analysis.is(12, 12) {
        return None;
    }
    let mut expected = row_set(&STAGGER_A);
    expected.extend(STAGGER_B);
    if analysis.fg_rows != expected {
        return None;
    }
    let rows_match = STAGGER_A.iter().all(|&row| analysis.cols(row) == STAGGER_A)
        && STAGGER_B.iter().all(|&row| analysis.cols(row) == STAGGER_B);
    if !rows_match {
        return None;
    }

    Some(analysis.signature(PatternKind::DotStaggered {
        dots: staggered_geometry(),
    }))
}

/// 12x12 type D: a sparse 3-row variant of the stagger, where each row may
/// use either staggered column set. Classified with the same parameters as
/// type B.
pub fn match_dot_sparse_rows(analysis: &TileAnalysis) -> Option<PatternSignature> {
    if !analysis.is(12, 12) {
        return None;
    }
    if analysis.fg_rows != row_set(&STAGGER_B) {
        return None;
    }
    let rows_match = STAGGER_B
        .iter()
        .all(|&row| analysis.cols(row) == STAGGER_A || analysis.cols(row) == STAGGER_B);
    if !rows_match {
        return None;
    }

    Some(analysis.signature(PatternKind::DotStaggered {
        dots: staggered_geometry(),
    }))
}

fn staggered_geometry() -> DotGeometry {
    DotGeometry {
        displacement_x: 2.0 * PIXEL_SIZE,
        ..DotGeometry::grid(4.0 * PIXEL_SIZE, 2.0 * PIXEL_SIZE)
    }
}

/// 12x12 type C: the type A grid on its populated even rows, plus extra
/// populated rows {3, 7, 11}. The extra grid's horizontal spacing is taken
/// from the column gap observed in row 3 (default 4 when indeterminate).
pub fn match_dot_grid_extra(analysis: &TileAnalysis) -> Option<PatternSignature> {
    if !analysis.is(12, 12) {
        return None;
    }
    let base_ok = EVEN_STEPS
        .iter()
        .filter(|row| analysis.fg_rows.contains(*row))
        .all(|&row| analysis.cols(row) == EVEN_STEPS);
    let has_extra = EXTRA_ROWS.iter().all(|row| analysis.fg_rows.contains(row));
    if !base_ok || !has_extra {
        return None;
    }

    let extra_cols = analysis.cols(3);
    let spacing = match extra_cols {
        [first, second, ..] => f64::from(second - first),
        _ => 4.0,
    };
    let offset_x = extra_cols
        .first()
        .map_or(0.0, |&col| f64::from(col) * PIXEL_SIZE);

    Some(analysis.signature(PatternKind::DotGridPlus {
        base: DotGeometry::grid(2.0 * PIXEL_SIZE, 2.0 * PIXEL_SIZE),
        extra: DotGeometry {
            offset_x,
            offset_y: 3.0 * PIXEL_SIZE,
            ..DotGeometry::grid(spacing * PIXEL_SIZE, 4.0 * PIXEL_SIZE)
        },
    }))
}

/// 12x12 fallback: spacing approximated from foreground pixel density.
///
/// This heuristic has no accuracy guarantee; it is kept as-is and should
/// not be strengthened without new reference tiles.
pub fn match_dot_density(analysis: &TileAnalysis) -> Option<PatternSignature> {
    if !analysis.is(12, 12) {
        return None;
    }

    let density = analysis.fg_count as f64 / f64::from(analysis.width * analysis.height);
    let spacing = if density > 0.0 {
        let raw = (1.0 / density.sqrt()) * PIXEL_SIZE;
        (raw * 100.0).round() / 100.0
    } else {
        6.0
    };

    Some(analysis.signature(PatternKind::DotGrid {
        dots: DotGeometry::grid(spacing, spacing),
    }))
}

/// 40x40: always a crossed diamond hatch with fixed geometry.
pub fn match_diamond_hatch(analysis: &TileAnalysis) -> Option<PatternSignature> {
    if !analysis.is(40, 40) {
        return None;
    }

    Some(analysis.signature(PatternKind::DiamondHatch {
        lines: HatchGeometry {
            distance: 5.3,
            width: 2.25,
        },
    }))
}

/// 64x64 with any zero-alpha pixel: a single-direction hatch whose line
/// colour is the first fully-opaque dominant colour.
pub fn match_semi_transparent_hatch(analysis: &TileAnalysis) -> Option<PatternSignature> {
    if !analysis.is(64, 64) {
        return None;
    }
    if !analysis.ranked.iter().any(|(colour, _)| colour.a == 0) {
        return None;
    }

    let line_colour = analysis
        .ranked
        .iter()
        .map(|(colour, _)| *colour)
        .find(|colour| colour.a > 0)
        .unwrap_or(analysis.colours.foreground);

    Some(PatternSignature {
        colours: DominantColours {
            foreground: line_colour,
            ..analysis.colours
        },
        kind: PatternKind::SemiTransparentHatch {
            lines: HatchGeometry {
                distance: 5.0 * PIXEL_SIZE,
                width: PIXEL_SIZE,
            },
        },
    })
}

/// 64x64 without transparency: a dot grid, with a second grid in the
/// tertiary colour synthesized later when one exists.
pub fn match_tricolour_dot(analysis: &TileAnalysis) -> Option<PatternSignature> {
    if !analysis.is(64, 64) {
        return None;
    }

    Some(analysis.signature(PatternKind::TricolourDot {
        dots: DotGeometry {
            displacement_x: 4.0 * PIXEL_SIZE,
            marker_size: 2.0 * PIXEL_SIZE,
            ..DotGeometry::grid(8.0 * PIXEL_SIZE, 8.0 * PIXEL_SIZE)
        },
    }))
}

/// 80x80: always widely spaced dots, independent of content.
pub fn match_dot_sparse_pair(analysis: &TileAnalysis) -> Option<PatternSignature> {
    if !analysis.is(80, 80) {
        return None;
    }

    Some(analysis.signature(PatternKind::DotSparsePair {
        dots: DotGeometry::grid(4.0 * PIXEL_SIZE, 4.0 * PIXEL_SIZE),
    }))
}

/// Generic fallback for unrecognized dimensions: a fixed-spacing dot grid.
pub fn fallback_dot_grid(analysis: &TileAnalysis) -> PatternSignature {
    analysis.signature(PatternKind::DotGrid {
        dots: DotGeometry::grid(3.0, 3.0),
    })
}
