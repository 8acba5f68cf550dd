//! Edge drawing and arrowhead marker generation.

use std::collections::BTreeMap;

use svg::node::element as svg_element;

use crate::{
    apply_stroke,
    color::Color,
    draw::{LayeredOutput, RenderLayer, Text, TextDefinition},
    model::Edge,
    route::EdgeGeometry,
    style::{display_label, resolve_edge_style},
};

/// Draws edges and collects the arrowhead colors they use.
///
/// Markers are colored per edge, so one `<marker>` is generated for every
/// distinct stroke color once all edges are drawn.
#[derive(Debug)]
pub struct EdgeDrawer {
    font_family: String,
    halo: Color,
    markers: BTreeMap<String, Color>,
}

impl EdgeDrawer {
    /// `halo` is the color stroked behind edge labels, normally the background.
    pub fn new(font_family: impl Into<String>, halo: Color) -> Self {
        Self {
            font_family: font_family.into(),
            halo,
            markers: BTreeMap::new(),
        }
    }

    /// Draws the path of `edge` along `geometry`, plus its label if it has one.
    ///
    /// The path goes to the edge layer grouped under `data-edge-id`; the
    /// label goes to the label layer.
    pub fn draw_edge(&mut self, edge: &Edge, geometry: &EdgeGeometry) -> LayeredOutput {
        let style = resolve_edge_style(edge);
        let color = style.stroke.color();
        self.markers.insert(Self::marker_id(color), color);

        let path = svg_element::Path::new()
            .set("d", geometry.path_data())
            .set("fill", "none")
            .set("marker-end", format!("url(#{})", Self::marker_id(color)));
        let path = apply_stroke!(path, &style.stroke);

        let group = svg_element::Group::new()
            .set("class", "edge")
            .set("data-edge-id", edge.id.as_str())
            .set("data-edge-type", edge.edge_type.as_str())
            .add(path);

        let mut output = LayeredOutput::new();
        output.add_to_layer(RenderLayer::Edge, Box::new(group));

        if let Some(label) = display_label(edge) {
            let definition = TextDefinition::new(self.font_family.as_str(), style.font_size)
                .with_color(style.label_color)
                .with_halo(self.halo);
            let lines: Vec<String> = label.lines().map(str::to_string).collect();
            let placement = geometry.label();
            let text = Text::new(&definition, &lines)
                .with_rotation(placement.angle)
                .render(placement.anchor)
                .set("data-edge-id", edge.id.as_str());
            output.add_to_layer(RenderLayer::Label, Box::new(text));
        }

        output
    }

    /// Generates `<defs>` holding one arrowhead per collected color.
    pub fn draw_marker_definitions(&self) -> svg_element::Definitions {
        self.markers
            .iter()
            .fold(svg_element::Definitions::new(), |defs, (id, color)| {
                defs.add(Self::create_arrowhead(id, *color))
            })
    }

    /// Number of distinct arrowhead markers collected so far.
    pub fn marker_count(&self) -> usize {
        self.markers.len()
    }

    fn marker_id(color: Color) -> String {
        format!("arrow-{}", color.to_id_safe_string())
    }

    fn create_arrowhead(id: &str, color: Color) -> svg_element::Marker {
        svg_element::Marker::new()
            .set("id", id)
            .set("viewBox", "0 0 10 10")
            .set("refX", 9)
            .set("refY", 5)
            .set("markerWidth", 6)
            .set("markerHeight", 6)
            .set("orient", "auto")
            .add(
                svg_element::Path::new()
                    .set("d", "M 0 0 L 10 5 L 0 10 z")
                    .set("fill", color.to_string())
                    .set("fill-opacity", color.alpha()),
            )
    }
}
