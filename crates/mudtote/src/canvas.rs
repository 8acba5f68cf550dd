//! Interactive canvas rendering.
//!
//! The canvas is the live editor view of a diagram. It draws the same nodes,
//! edges and labels as the static SVG document, tagged with element ids so
//! an embedding shell can hit-test them, and adds a selection overlay on
//! top. The shell owns the selection; this module only paints it.

use std::collections::BTreeSet;

use log::debug;
use svg::node::element as svg_element;

use mudtote_core::{
    apply_stroke,
    color::Color,
    draw::{EdgeDrawer, LayeredOutput, NodeDrawer, RenderLayer, StrokeDefinition, shape_outline},
    model::Diagram,
    route::compute_edge_geometry,
    shape::{ShapeDescriptor, node_dimensions},
    style::{EDGE_STROKE_WIDTH, effective_shape},
};

use crate::{
    config::SvgConfig,
    export::svg::{render_edges, render_nodes},
};

/// Width of the invisible stroke that makes thin edges easy to hit.
const HIT_AREA_WIDTH: f64 = 12.0;

/// Gap between a selected node's outline and its highlight.
const SELECTION_PADDING: f64 = 4.0;

const SELECTION_COLOR: &str = "#2196f3";

/// Selection state supplied by the embedding editor.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CanvasState {
    selected_nodes: BTreeSet<String>,
    selected_edges: BTreeSet<String>,
}

impl CanvasState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks the node `id` as selected.
    pub fn with_selected_node(mut self, id: impl Into<String>) -> Self {
        self.selected_nodes.insert(id.into());
        self
    }

    /// Marks the edge `id` as selected.
    pub fn with_selected_edge(mut self, id: impl Into<String>) -> Self {
        self.selected_edges.insert(id.into());
        self
    }

    pub fn is_node_selected(&self, id: &str) -> bool {
        self.selected_nodes.contains(id)
    }

    pub fn is_edge_selected(&self, id: &str) -> bool {
        self.selected_edges.contains(id)
    }

    pub fn clear_selection(&mut self) {
        self.selected_nodes.clear();
        self.selected_edges.clear();
    }
}

/// Canvas renderer.
#[derive(Debug, Clone)]
pub struct Canvas {
    font_family: String,
    selection: Color,
}

impl Canvas {
    pub fn new(config: &SvgConfig) -> Self {
        Self {
            font_family: config.font_family().to_string(),
            selection: Color::new(SELECTION_COLOR).unwrap_or_default(),
        }
    }

    /// Renders `diagram` with the selection in `state`.
    ///
    /// The result is a single `<g class="mudtote-canvas">` holding one group
    /// per render layer: edges (with hit areas), nodes, labels and the
    /// selection overlay.
    pub fn render(&self, diagram: &Diagram, state: &CanvasState) -> svg_element::Group {
        let halo = Color::new("white").unwrap_or_default();
        let mut edge_drawer = EdgeDrawer::new(self.font_family.as_str(), halo);

        let mut output = LayeredOutput::new();
        output.merge(render_edges(diagram, &mut edge_drawer));
        output.merge(self.hit_areas_and_edge_selection(diagram, state));
        output.merge(render_nodes(diagram, &NodeDrawer::new(self.font_family.as_str())));
        output.merge(self.node_selection(diagram, state));

        let group = svg_element::Group::new()
            .set("class", "mudtote-canvas")
            .add(edge_drawer.draw_marker_definitions());

        output
            .render()
            .into_iter()
            .fold(group, |group, layer| group.add(layer))
    }

    fn hit_areas_and_edge_selection(&self, diagram: &Diagram, state: &CanvasState) -> LayeredOutput {
        let mut output = LayeredOutput::new();
        let highlight = StrokeDefinition::solid(self.selection, EDGE_STROKE_WIDTH + 4.0);

        for edge in &diagram.edges {
            let Some(geometry) = compute_edge_geometry(edge, &diagram.nodes, &diagram.edges) else {
                continue;
            };
            let path_data = geometry.path_data();

            let hit_area = svg_element::Path::new()
                .set("class", "edge-hit-area")
                .set("d", path_data.as_str())
                .set("fill", "none")
                .set("stroke", "transparent")
                .set("stroke-width", HIT_AREA_WIDTH)
                .set("pointer-events", "stroke")
                .set("data-edge-id", edge.id.as_str());
            output.add_to_layer(RenderLayer::Edge, Box::new(hit_area));

            if state.is_edge_selected(&edge.id) {
                let path = svg_element::Path::new()
                    .set("class", "selection")
                    .set("d", path_data)
                    .set("fill", "none")
                    .set("data-edge-id", edge.id.as_str());
                let path = apply_stroke!(path, &highlight).set("stroke-opacity", 0.4);
                output.add_to_layer(RenderLayer::Selection, Box::new(path));
            }
        }

        output
    }

    fn node_selection(&self, diagram: &Diagram, state: &CanvasState) -> LayeredOutput {
        let mut output = LayeredOutput::new();
        let stroke = StrokeDefinition::dashed(self.selection, 2.0);

        let selected = diagram
            .nodes
            .iter()
            .filter(|node| state.is_node_selected(&node.id));
        for node in selected {
            let dims = node_dimensions(node);
            let enlarged = ShapeDescriptor {
                width: dims.width + 2.0 * SELECTION_PADDING,
                height: dims.height + 2.0 * SELECTION_PADDING,
                radius: dims.radius + SELECTION_PADDING,
            };

            let group = svg_element::Group::new()
                .set("class", "selection")
                .set("data-node-id", node.id.as_str())
                .set("fill", "none")
                .add(shape_outline(effective_shape(node), node.position, enlarged));
            let group = apply_stroke!(group, &stroke);
            output.add_to_layer(RenderLayer::Selection, Box::new(group));
        }

        debug!(
            nodes = state.selected_nodes.len(),
            edges = state.selected_edges.len();
            "Canvas selection drawn"
        );
        output
    }
}

/// Renders the live canvas for `diagram` with the default font.
pub fn render_canvas(diagram: &Diagram, state: &CanvasState) -> svg_element::Group {
    Canvas::new(&SvgConfig::default()).render(diagram, state)
}
