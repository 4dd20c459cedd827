//! QGIS layer element builders.
//!
//! Expands each [`SymbolLayerSpec`] into the full QGIS layer element,
//! including the map-unit-scale options, data-defined-property stanzas,
//! and marker/line sub-symbols QGIS writes itself. Sub-symbols are named
//! `@<symbol>@<index>` after their position in the replacement stack, and
//! every layer gets a fresh braced UUID id.

use uuid::Uuid;

use crate::types::{Colour, SymbolLayerSpec};

use super::element::Element;

const MAP_UNIT_SCALE: &str = "3x:0,0,0,0,0,0";

/// Build the QGIS layer elements for a replacement layer stack.
pub fn build_layers(symbol: &str, specs: &[SymbolLayerSpec]) -> Vec<Element> {
    specs
        .iter()
        .enumerate()
        .map(|(index, spec)| build_layer(symbol, index, spec))
        .collect()
}

fn build_layer(symbol: &str, index: usize, spec: &SymbolLayerSpec) -> Element {
    match *spec {
        SymbolLayerSpec::SimpleFill {
            colour,
            filled,
            outlined,
        } => simple_fill(colour, filled, outlined),
        SymbolLayerSpec::PointPatternFill {
            distance_x,
            distance_y,
            displacement_x,
            offset_x,
            offset_y,
            marker_size,
            colour,
        } => point_pattern_fill(
            symbol,
            index,
            distance_x,
            distance_y,
            displacement_x,
            offset_x,
            offset_y,
            marker_size,
            colour,
        ),
        SymbolLayerSpec::LinePatternFill {
            angle,
            distance,
            line_width,
            colour,
        } => line_pattern_fill(symbol, index, angle, distance, line_width, colour),
    }
}

fn layer_id() -> String {
    format!("{{{}}}", Uuid::new_v4())
}

fn num(value: f64) -> String {
    format!("{}", value)
}

fn layer_element(class: &str) -> Element {
    Element::new("layer")
        .with_attr("pass", "0")
        .with_attr("locked", "0")
        .with_attr("class", class)
        .with_attr("enabled", "1")
        .with_attr("id", layer_id())
}

fn option(value: &str, name: &str) -> Element {
    Element::new("Option")
        .with_attr("value", value)
        .with_attr("type", "QString")
        .with_attr("name", name)
}

fn option_map(entries: &[(&str, &str)]) -> Element {
    let mut map = Element::new("Option").with_attr("type", "Map");
    for (name, value) in entries {
        map.push(option(value, name));
    }
    map
}

fn data_defined_properties() -> Element {
    let mut map = Element::new("Option").with_attr("type", "Map");
    map.push(option("", "name"));
    map.push(Element::new("Option").with_attr("name", "properties"));
    map.push(option("collection", "type"));

    let mut ddp = Element::new("data_defined_properties");
    ddp.push(map);
    ddp
}

fn simple_fill(colour: Colour, filled: bool, outlined: bool) -> Element {
    let colour_value = colour.to_style_string();
    let options = option_map(&[
        ("border_width_map_unit_scale", MAP_UNIT_SCALE),
        ("color", &colour_value),
        ("joinstyle", "bevel"),
        ("offset", "0,0"),
        ("offset_map_unit_scale", MAP_UNIT_SCALE),
        ("offset_unit", "MM"),
        ("outline_color", "0,0,0,255,rgb:0,0,0,1"),
        ("outline_style", if outlined { "solid" } else { "no" }),
        ("outline_width", "0"),
        ("outline_width_unit", "Point"),
        ("style", if filled { "solid" } else { "no" }),
    ]);

    let mut layer = layer_element("SimpleFill");
    layer.push(options);
    layer.push(data_defined_properties());
    layer
}

#[allow(clippy::too_many_arguments)]
fn point_pattern_fill(
    symbol: &str,
    index: usize,
    distance_x: f64,
    distance_y: f64,
    displacement_x: f64,
    offset_x: f64,
    offset_y: f64,
    marker_size: f64,
    colour: Colour,
) -> Element {
    let options = option_map(&[
        ("angle", "0"),
        ("clip_mode", "0"),
        ("coordinate_reference", "feature"),
        ("displacement_x", &num(displacement_x)),
        ("displacement_x_map_unit_scale", MAP_UNIT_SCALE),
        ("displacement_x_unit", "Point"),
        ("displacement_y", "0"),
        ("displacement_y_map_unit_scale", MAP_UNIT_SCALE),
        ("displacement_y_unit", "Point"),
        ("distance_x", &num(distance_x)),
        ("distance_x_map_unit_scale", MAP_UNIT_SCALE),
        ("distance_x_unit", "Point"),
        ("distance_y", &num(distance_y)),
        ("distance_y_map_unit_scale", MAP_UNIT_SCALE),
        ("distance_y_unit", "Point"),
        ("offset_x", &num(offset_x)),
        ("offset_x_map_unit_scale", MAP_UNIT_SCALE),
        ("offset_x_unit", "Point"),
        ("offset_y", &num(offset_y)),
        ("offset_y_map_unit_scale", MAP_UNIT_SCALE),
        ("offset_y_unit", "Point"),
        ("outline_width_map_unit_scale", MAP_UNIT_SCALE),
        ("outline_width_unit", "Point"),
        ("random_deviation_x", "0"),
        ("random_deviation_x_map_unit_scale", MAP_UNIT_SCALE),
        ("random_deviation_x_unit", "Point"),
        ("random_deviation_y", "0"),
        ("random_deviation_y_map_unit_scale", MAP_UNIT_SCALE),
        ("random_deviation_y_unit", "Point"),
        ("seed", "0"),
    ]);

    let mut layer = layer_element("PointPatternFill");
    layer.push(options);
    layer.push(data_defined_properties());
    layer.push(marker_sub_symbol(symbol, index, marker_size, colour));
    layer
}

fn marker_sub_symbol(symbol: &str, index: usize, marker_size: f64, colour: Colour) -> Element {
    let colour_value = colour.to_style_string();
    let options = option_map(&[
        ("angle", "0"),
        ("cap_style", "square"),
        ("color", &colour_value),
        ("horizontal_anchor_point", "1"),
        ("joinstyle", "bevel"),
        ("name", "square"),
        ("offset", "0,0"),
        ("offset_map_unit_scale", MAP_UNIT_SCALE),
        ("offset_unit", "Point"),
        ("outline_color", &colour_value),
        ("outline_style", "no"),
        ("outline_width", "0"),
        ("outline_width_map_unit_scale", MAP_UNIT_SCALE),
        ("outline_width_unit", "Point"),
        ("scale_method", "diameter"),
        ("size", &num(marker_size)),
        ("size_map_unit_scale", MAP_UNIT_SCALE),
        ("size_unit", "Point"),
        ("vertical_anchor_point", "1"),
    ]);

    let mut marker_layer = layer_element("SimpleMarker");
    marker_layer.push(options);
    marker_layer.push(data_defined_properties());

    let mut sub_symbol = sub_symbol_element(symbol, index, "marker");
    sub_symbol.push(marker_layer);
    sub_symbol
}

fn line_pattern_fill(
    symbol: &str,
    index: usize,
    angle: f64,
    distance: f64,
    line_width: f64,
    colour: Colour,
) -> Element {
    let options = option_map(&[
        ("angle", &num(angle)),
        ("clip_mode", "0"),
        ("coordinate_reference", "feature"),
        ("distance", &num(distance)),
        ("distance_map_unit_scale", MAP_UNIT_SCALE),
        ("distance_unit", "Point"),
        ("line_width", &num(line_width)),
        ("line_width_map_unit_scale", MAP_UNIT_SCALE),
        ("line_width_unit", "Point"),
        ("offset", "0"),
        ("offset_map_unit_scale", MAP_UNIT_SCALE),
        ("offset_unit", "Point"),
    ]);

    let mut layer = layer_element("LinePatternFill");
    layer.push(options);
    layer.push(data_defined_properties());
    layer.push(line_sub_symbol(symbol, index, line_width, colour));
    layer
}

fn line_sub_symbol(symbol: &str, index: usize, line_width: f64, colour: Colour) -> Element {
    let colour_value = colour.to_style_string();
    let options = option_map(&[
        ("align_dash_pattern", "0"),
        ("capstyle", "square"),
        ("customdash", "5;2"),
        ("customdash_map_unit_scale", MAP_UNIT_SCALE),
        ("customdash_unit", "MM"),
        ("dash_pattern_offset", "0"),
        ("dash_pattern_offset_map_unit_scale", MAP_UNIT_SCALE),
        ("dash_pattern_offset_unit", "MM"),
        ("draw_inside_polygon", "0"),
        ("joinstyle", "bevel"),
        ("line_color", &colour_value),
        ("line_style", "solid"),
        ("line_width", &num(line_width)),
        ("line_width_unit", "Point"),
        ("offset", "0"),
        ("offset_map_unit_scale", MAP_UNIT_SCALE),
        ("offset_unit", "MM"),
        ("ring_filter", "0"),
        ("trim_distance_end", "0"),
        ("trim_distance_end_map_unit_scale", MAP_UNIT_SCALE),
        ("trim_distance_end_unit", "MM"),
        ("trim_distance_start", "0"),
        ("trim_distance_start_map_unit_scale", MAP_UNIT_SCALE),
        ("trim_distance_start_unit", "MM"),
        ("tweak_dash_pattern_on_corners", "0"),
        ("use_custom_dash", "0"),
        ("width_map_unit_scale", MAP_UNIT_SCALE),
    ]);

    let mut line_layer = layer_element("SimpleLine");
    line_layer.push(options);
    line_layer.push(data_defined_properties());

    let mut sub_symbol = sub_symbol_element(symbol, index, "line");
    sub_symbol.push(line_layer);
    sub_symbol
}

fn sub_symbol_element(symbol: &str, index: usize, kind: &str) -> Element {
    let mut element = Element::new("symbol")
        .with_attr("force_rhr", "0")
        .with_attr("is_animated", "0")
        .with_attr("type", kind)
        .with_attr("clip_to_extent", "1")
        .with_attr("frame_rate", "10")
        .with_attr("name", format!("@{}@{}", symbol, index))
        .with_attr("alpha", "1");
    element.push(data_defined_properties());
    element
}
