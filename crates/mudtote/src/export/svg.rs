//! Standalone SVG document export.
//!
//! The document uses diagram coordinates directly: the `viewBox` is the
//! diagram extent grown by the configured padding, so every path in the
//! output carries exactly the points the router computed.

use log::{debug, info, trace, warn};
use svg::{self, node::element as svg_element};

use mudtote_core::{
    color::Color,
    draw::{BoundaryKind, EdgeDrawer, LayeredOutput, NodeDrawer, RenderLayer},
    extent::diagram_bounds,
    geometry::{Bounds, Point, format_number},
    model::Diagram,
    route::compute_edge_geometry,
};

use super::{Error, Exporter};
use crate::config::SvgConfig;

/// SVG backend.
#[derive(Debug, Clone)]
pub struct Svg {
    padding: f64,
    background: Option<Color>,
    font_family: String,
}

impl Svg {
    /// Creates the backend from its configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Render`] if the configured background color is invalid.
    pub fn new(config: &SvgConfig) -> Result<Self, Error> {
        let background = config.background_color().map_err(Error::Render)?;
        Ok(Self {
            padding: config.padding(),
            background,
            font_family: config.font_family().to_string(),
        })
    }

    /// Renders `diagram` to an SVG document.
    pub fn render_diagram(&self, diagram: &Diagram) -> svg::Document {
        let bounds = diagram_bounds(diagram)
            .unwrap_or_else(|| Bounds::from_point(Point::default()))
            .expand(self.padding);

        let doc = svg::Document::new()
            .set(
                "viewBox",
                format!(
                    "{} {} {} {}",
                    format_number(bounds.min_x()),
                    format_number(bounds.min_y()),
                    format_number(bounds.width()),
                    format_number(bounds.height())
                ),
            )
            .set("width", format_number(bounds.width()))
            .set("height", format_number(bounds.height()));

        let halo = self
            .background
            .unwrap_or_else(|| Color::new("white").unwrap_or_default());
        let mut edge_drawer = EdgeDrawer::new(self.font_family.as_str(), halo);

        let mut output = LayeredOutput::new();
        if let Some(background) = self.background {
            let rect = svg_element::Rectangle::new()
                .set("x", format_number(bounds.min_x()))
                .set("y", format_number(bounds.min_y()))
                .set("width", format_number(bounds.width()))
                .set("height", format_number(bounds.height()))
                .set("fill", background.to_string())
                .set("fill-opacity", background.alpha());
            output.add_to_layer(RenderLayer::Background, Box::new(rect));
        }

        output.merge(render_edges(diagram, &mut edge_drawer));
        output.merge(render_nodes(diagram, &NodeDrawer::new(self.font_family.as_str())));

        let mut doc = doc.add(edge_drawer.draw_marker_definitions());
        for group in output.render() {
            doc = doc.add(group);
        }
        doc
    }
}

impl Exporter for Svg {
    fn export_diagram(&mut self, diagram: &Diagram) -> Result<String, Error> {
        info!(nodes = diagram.nodes.len(), edges = diagram.edges.len(); "Rendering SVG document");
        Ok(self.render_diagram(diagram).to_string())
    }

    fn file_extension(&self) -> &'static str {
        "svg"
    }
}

/// Draws every routable edge; dangling edges are skipped with a warning.
pub(crate) fn render_edges(diagram: &Diagram, drawer: &mut EdgeDrawer) -> LayeredOutput {
    let mut output = LayeredOutput::new();
    let mut skipped = 0usize;

    for edge in &diagram.edges {
        match compute_edge_geometry(edge, &diagram.nodes, &diagram.edges) {
            Some(geometry) => {
                trace!(edge_id = edge.id.as_str(), path = geometry.path_data(); "Edge geometry");
                output.merge(drawer.draw_edge(edge, &geometry));
            }
            None => {
                warn!(edge_id = edge.id.as_str(); "Skipping edge with unresolved endpoints");
                skipped += 1;
            }
        }
    }

    debug!(drawn = diagram.edges.len() - skipped, skipped; "Edges rendered");
    output
}

/// Draws every node and TOTE entry/exit marker.
pub(crate) fn render_nodes(diagram: &Diagram, drawer: &NodeDrawer) -> LayeredOutput {
    let mut output = LayeredOutput::new();

    for node in &diagram.nodes {
        output.merge(drawer.draw_node(node));
    }
    for entry in &diagram.entry_points {
        output.merge(drawer.draw_boundary_marker(
            BoundaryKind::Entry,
            &entry.id,
            entry.position,
            entry.label.as_deref(),
        ));
    }
    for exit in &diagram.exit_points {
        output.merge(drawer.draw_boundary_marker(
            BoundaryKind::Exit,
            &exit.id,
            exit.position,
            exit.label.as_deref(),
        ));
    }

    output
}

/// Serializes `diagram` to a standalone SVG document.
///
/// An invalid background color in `config` is ignored with a warning; use
/// [`Svg::new`] to reject it instead.
pub fn serialize_svg(diagram: &Diagram, config: &SvgConfig) -> String {
    let svg = Svg::new(config).unwrap_or_else(|err| {
        warn!(err:% = err; "Ignoring invalid SVG configuration");
        Svg {
            padding: config.padding(),
            background: None,
            font_family: config.font_family().to_string(),
        }
    });
    svg.render_diagram(diagram).to_string()
}

#[cfg(test)]
mod tests {
    use mudtote_core::model::{Edge, EdgeType, ExitPoint, Node, NodeType};

    use super::*;

    fn sample() -> Diagram {
        Diagram {
            nodes: vec![
                Node::new("A", NodeType::Practice, Point::new(0.0, 0.0)).with_label("Boil"),
                Node::new("B", NodeType::Vocabulary, Point::new(200.0, 0.0)).with_label("Tea"),
            ],
            edges: vec![Edge::new("e1", "A", "B", EdgeType::Pv)],
            ..Diagram::default()
        }
    }

    #[test]
    fn test_view_box_is_extent_plus_padding() {
        let svg = serialize_svg(&sample(), &SvgConfig::default());
        // Nodes span x -50..250 and y -25..25; the PV label sits at y = -12.
        assert!(svg.contains("viewBox=\"-90 -65 380 130\""), "{svg}");
    }

    #[test]
    fn test_document_structure() {
        let svg = serialize_svg(&sample(), &SvgConfig::default());
        assert!(svg.starts_with("<svg"));
        assert!(svg.contains("<marker"));
        assert!(svg.contains("d=\"M 50 0 L 150 0\""));
        assert!(svg.contains("<rect"));
        assert!(svg.contains("<ellipse"));
        assert!(svg.contains(">Boil<"));
        assert!(svg.contains(">PV<"));

        let edges = svg.find("data-layer=\"edges\"").unwrap();
        let nodes = svg.find("data-layer=\"nodes\"").unwrap();
        let labels = svg.find("data-layer=\"labels\"").unwrap();
        assert!(edges < nodes && nodes < labels);
    }

    #[test]
    fn test_dangling_edge_is_skipped() {
        let mut diagram = sample();
        diagram.edges.push(Edge::new("ghost", "A", "missing", EdgeType::Vp));
        let svg = serialize_svg(&diagram, &SvgConfig::default());
        assert!(!svg.contains("data-edge-id=\"ghost\""));
        assert!(svg.contains("data-edge-id=\"e1\""));
    }

    #[test]
    fn test_empty_diagram() {
        let svg = serialize_svg(&Diagram::default(), &SvgConfig::default());
        assert!(svg.contains("viewBox=\"-40 -40 80 80\""), "{svg}");
    }

    #[test]
    fn test_background_color() {
        let config = SvgConfig::default().with_background_color("white");
        let svg = serialize_svg(&sample(), &config);
        assert!(svg.contains("data-layer=\"background\""));

        let invalid = SvgConfig::default().with_background_color("not-a-color");
        assert!(Svg::new(&invalid).is_err());
        assert!(!serialize_svg(&sample(), &invalid).contains("data-layer=\"background\""));
    }

    #[test]
    fn test_exit_marker() {
        let mut diagram = sample();
        diagram.exit_points.push(ExitPoint {
            id: "out".to_string(),
            position: Point::new(400.0, 0.0),
            label: Some("Exit".to_string()),
        });
        let svg = serialize_svg(&diagram, &SvgConfig::default());
        assert!(svg.contains("data-exit-id=\"out\""));
    }
}
