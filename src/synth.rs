//! Symbol layer synthesis.
//!
//! Turns a classified pattern into an ordered list of vector layers. The
//! first layer is normally a solid fill in the background colour; the two
//! hatch patterns invert the roles, since their hatch lines are drawn in
//! what the histogram ranked as the other colour.

use crate::types::{Colour, DotGeometry, PatternKind, PatternSignature, SymbolLayerSpec};

/// Produce the replacement layers for one classified tile, in paint order.
pub fn synthesize(signature: &PatternSignature) -> Vec<SymbolLayerSpec> {
    let background = signature.colours.background;
    let foreground = signature.colours.foreground;

    let mut layers = vec![SymbolLayerSpec::solid_fill(background)];

    match &signature.kind {
        PatternKind::DotGrid { dots }
        | PatternKind::DotStaggered { dots }
        | PatternKind::DotSparsePair { dots } => {
            layers.push(point_pattern(dots, foreground));
        }

        PatternKind::DotGridPlus { base, extra } => {
            layers.push(point_pattern(base, foreground));
            layers.push(point_pattern(extra, foreground));
        }

        PatternKind::TricolourDot { dots } => {
            layers.push(point_pattern(dots, foreground));
            if let Some(tertiary) = signature.colours.tertiary {
                let doubled = DotGeometry {
                    distance_x: dots.distance_x * 2.0,
                    distance_y: dots.distance_y * 2.0,
                    ..*dots
                };
                layers.push(point_pattern(&doubled, tertiary));
            }
        }

        PatternKind::DiamondHatch { lines } => {
            // Hatch lines use the background colour, so the base fill takes
            // the foreground colour instead.
            layers[0] = SymbolLayerSpec::solid_fill(foreground);
            layers.push(line_pattern(45.0, lines.distance, lines.width, background));
            layers.push(line_pattern(135.0, lines.distance, lines.width, background));
        }

        PatternKind::SemiTransparentHatch { lines } => {
            layers[0] = SymbolLayerSpec::SimpleFill {
                colour: Colour::TRANSPARENT,
                filled: false,
                outlined: false,
            };
            layers.push(line_pattern(45.0, lines.distance, lines.width, foreground));
        }
    }

    layers
}

fn point_pattern(dots: &DotGeometry, colour: Colour) -> SymbolLayerSpec {
    SymbolLayerSpec::PointPatternFill {
        distance_x: dots.distance_x,
        distance_y: dots.distance_y,
        displacement_x: dots.displacement_x,
        offset_x: dots.offset_x,
        offset_y: dots.offset_y,
        marker_size: dots.marker_size,
        colour,
    }
}

fn line_pattern(angle: f64, distance: f64, line_width: f64, colour: Colour) -> SymbolLayerSpec {
    SymbolLayerSpec::LinePatternFill {
        angle,
        distance,
        line_width,
        colour,
    }
}
