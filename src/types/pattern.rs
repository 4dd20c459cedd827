//! Pattern signatures produced by tile classification.
//!
//! A `PatternSignature` is the complete description of a recognized tile
//! pattern: the dominant colours plus the geometry of the repeating
//! primitive. Signatures are immutable once produced and are what the
//! synthesizer consumes.

use std::fmt;

use super::Colour;

/// Output size of one source pixel, in points.
///
/// The legacy tiles were authored at 0.75pt per pixel, so all synthesized
/// spacings and marker sizes are scaled by this factor.
pub const PIXEL_SIZE: f64 = 0.75;

/// Dominant colours of a tile, in histogram rank order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DominantColours {
    /// Most frequent colour.
    pub background: Colour,
    /// Second most frequent colour (equal to background for single-colour tiles).
    pub foreground: Colour,
    /// Third most frequent colour, when at least three distinct colours exist.
    pub tertiary: Option<Colour>,
}

/// Geometry of a repeating point-marker grid, in points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DotGeometry {
    pub distance_x: f64,
    pub distance_y: f64,
    pub displacement_x: f64,
    pub offset_x: f64,
    pub offset_y: f64,
    pub marker_size: f64,
}

impl DotGeometry {
    /// A plain grid with the given spacing, no displacement or offset,
    /// and a single-pixel marker.
    pub const fn grid(distance_x: f64, distance_y: f64) -> Self {
        Self {
            distance_x,
            distance_y,
            displacement_x: 0.0,
            offset_x: 0.0,
            offset_y: 0.0,
            marker_size: PIXEL_SIZE,
        }
    }
}

/// Geometry of a repeating line hatch, in points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HatchGeometry {
    pub distance: f64,
    pub width: f64,
}

/// The recognized pattern kinds.
///
/// Each variant carries only the geometric parameters it needs; colours
/// live in the enclosing [`PatternSignature`].
#[derive(Debug, Clone, PartialEq)]
pub enum PatternKind {
    /// Dots on a regular grid.
    DotGrid { dots: DotGeometry },
    /// Dots on alternating rows, diagonally staggered.
    DotStaggered { dots: DotGeometry },
    /// A base grid plus a second, offset grid of extra dots.
    DotGridPlus {
        base: DotGeometry,
        extra: DotGeometry,
    },
    /// Crossed 45/135 degree hatch lines.
    DiamondHatch { lines: HatchGeometry },
    /// Single-direction hatch over a transparent base.
    SemiTransparentHatch { lines: HatchGeometry },
    /// Dot grid with an optional second grid in the tertiary colour.
    TricolourDot { dots: DotGeometry },
    /// Widely spaced dots.
    DotSparsePair { dots: DotGeometry },
}

impl PatternKind {
    /// Get the short name for this pattern kind.
    pub fn name(&self) -> &'static str {
        match self {
            PatternKind::DotGrid { .. } => "dot-grid",
            PatternKind::DotStaggered { .. } => "dot-staggered",
            PatternKind::DotGridPlus { .. } => "dot-grid-plus",
            PatternKind::DiamondHatch { .. } => "diamond-hatch",
            PatternKind::SemiTransparentHatch { .. } => "semi-transparent-hatch",
            PatternKind::TricolourDot { .. } => "tricolour-dot",
            PatternKind::DotSparsePair { .. } => "dot-sparse-pair",
        }
    }
}

impl fmt::Display for PatternKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A classified tile pattern: dominant colours plus pattern geometry.
#[derive(Debug, Clone, PartialEq)]
pub struct PatternSignature {
    pub colours: DominantColours,
    pub kind: PatternKind,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_constructor_defaults() {
        let dots = DotGeometry::grid(1.5, 1.5);
        assert_eq!(dots.displacement_x, 0.0);
        assert_eq!(dots.offset_x, 0.0);
        assert_eq!(dots.offset_y, 0.0);
        assert_eq!(dots.marker_size, PIXEL_SIZE);
    }

    #[test]
    fn test_kind_names() {
        let dots = DotGeometry::grid(3.0, 3.0);
        assert_eq!(PatternKind::DotGrid { dots }.name(), "dot-grid");
        assert_eq!(
            PatternKind::DiamondHatch {
                lines: HatchGeometry {
                    distance: 5.3,
                    width: 2.25
                }
            }
            .to_string(),
            "diamond-hatch"
        );
    }
}
