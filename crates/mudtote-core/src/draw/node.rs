//! Node and entry/exit marker drawing.

use std::f64::consts::PI;

use svg::node::element as svg_element;

use crate::{
    apply_stroke,
    color::Color,
    draw::{LayeredOutput, RenderLayer, StrokeDefinition, Text, TextDefinition},
    geometry::{Point, format_number},
    model::{EdgeType, Node, ShapeKind},
    shape::{BOUNDARY_MARKER_RADIUS, ShapeDescriptor, node_dimensions},
    style::{edge_color, resolve_node_style},
    text::{label_width, wrap_text},
};

/// Corner radius of rectangle nodes, in diagram units.
pub const RECTANGLE_CORNER_RADIUS: f64 = 4.0;
/// Inner corner radius of a star relative to its outer radius.
pub const STAR_INNER_RATIO: f64 = 0.5;

/// Which side of a TOTE cycle a boundary marker belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoundaryKind {
    Entry,
    Exit,
}

impl BoundaryKind {
    fn color(self) -> Color {
        match self {
            Self::Entry => edge_color(EdgeType::Entry),
            Self::Exit => edge_color(EdgeType::Exit),
        }
    }

    fn attribute(self) -> &'static str {
        match self {
            Self::Entry => "data-entry-id",
            Self::Exit => "data-exit-id",
        }
    }
}

/// Builds the outline element of `shape` centered on `center`.
///
/// The same outline serves as the node body (filled) and, enlarged, as the
/// selection highlight on the canvas.
pub fn shape_outline(shape: ShapeKind, center: Point, dims: ShapeDescriptor) -> Box<dyn svg::Node> {
    let (cx, cy) = (center.x(), center.y());
    let (hw, hh) = (dims.width / 2.0, dims.height / 2.0);

    match shape {
        ShapeKind::Ellipse => Box::new(
            svg_element::Ellipse::new()
                .set("cx", format_number(cx))
                .set("cy", format_number(cy))
                .set("rx", format_number(hw))
                .set("ry", format_number(hh)),
        ),
        ShapeKind::Rectangle => Box::new(
            svg_element::Rectangle::new()
                .set("x", format_number(cx - hw))
                .set("y", format_number(cy - hh))
                .set("width", format_number(dims.width))
                .set("height", format_number(dims.height))
                .set("rx", format_number(RECTANGLE_CORNER_RADIUS)),
        ),
        ShapeKind::Diamond => {
            let points = [
                Point::new(cx, cy - hh),
                Point::new(cx + hw, cy),
                Point::new(cx, cy + hh),
                Point::new(cx - hw, cy),
            ];
            Box::new(svg_element::Polygon::new().set("points", polygon_points(&points)))
        }
        ShapeKind::Circle => Box::new(
            svg_element::Circle::new()
                .set("cx", format_number(cx))
                .set("cy", format_number(cy))
                .set("r", format_number(dims.radius)),
        ),
        ShapeKind::Triangle => Box::new(
            svg_element::Polygon::new().set(
                "points",
                polygon_points(&regular_polygon(center, dims.radius, 3)),
            ),
        ),
        ShapeKind::Hexagon => Box::new(
            svg_element::Polygon::new().set(
                "points",
                polygon_points(&regular_polygon(center, dims.radius, 6)),
            ),
        ),
        ShapeKind::Star => Box::new(
            svg_element::Polygon::new()
                .set("points", polygon_points(&star(center, dims.radius, 5))),
        ),
    }
}

/// Vertices of a regular polygon with its first corner straight up.
fn regular_polygon(center: Point, radius: f64, sides: usize) -> Vec<Point> {
    (0..sides)
        .map(|i| {
            let angle = -PI / 2.0 + 2.0 * PI * i as f64 / sides as f64;
            center.add_point(Point::from_angle(angle).scale(radius))
        })
        .collect()
}

/// Vertices of a star, alternating outer and inner corners.
fn star(center: Point, radius: f64, points: usize) -> Vec<Point> {
    (0..points * 2)
        .map(|i| {
            let r = if i % 2 == 0 {
                radius
            } else {
                radius * STAR_INNER_RATIO
            };
            let angle = -PI / 2.0 + PI * i as f64 / points as f64;
            center.add_point(Point::from_angle(angle).scale(r))
        })
        .collect()
}

fn polygon_points(points: &[Point]) -> String {
    points
        .iter()
        .map(|p| format!("{},{}", format_number(p.x()), format_number(p.y())))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Draws nodes and TOTE boundary markers.
#[derive(Debug, Clone)]
pub struct NodeDrawer {
    font_family: String,
}

impl NodeDrawer {
    pub fn new(font_family: impl Into<String>) -> Self {
        Self {
            font_family: font_family.into(),
        }
    }

    /// Draws a node: its filled outline and wrapped label, grouped under
    /// `data-node-id`.
    pub fn draw_node(&self, node: &Node) -> LayeredOutput {
        let style = resolve_node_style(node);
        let dims = node_dimensions(node);

        let outline = shape_outline(style.shape, node.position, dims);
        let outline = svg_element::Group::new()
            .set("fill", style.fill.to_string())
            .set("fill-opacity", style.fill.alpha())
            .add(outline);
        let outline = apply_stroke!(outline, &style.stroke());

        let mut group = svg_element::Group::new()
            .set("class", "node")
            .set("data-node-id", node.id.as_str())
            .set("data-node-type", node.node_type.as_str())
            .add(outline);

        let lines = wrap_text(&node.label, label_width(dims.width), style.font_size);
        if !lines.is_empty() {
            let definition =
                TextDefinition::new(self.font_family.as_str(), style.font_size).with_color(style.text);
            group = group.add(Text::new(&definition, &lines).render(node.position));
        }

        let mut output = LayeredOutput::new();
        output.add_to_layer(RenderLayer::Node, Box::new(group));
        output
    }

    /// Draws an entry or exit marker: a small outlined circle with an
    /// optional caption underneath.
    pub fn draw_boundary_marker(
        &self,
        kind: BoundaryKind,
        id: &str,
        position: Point,
        label: Option<&str>,
    ) -> LayeredOutput {
        let color = kind.color();
        let stroke = StrokeDefinition::solid(color, 2.0);

        let circle = svg_element::Circle::new()
            .set("cx", format_number(position.x()))
            .set("cy", format_number(position.y()))
            .set("r", format_number(BOUNDARY_MARKER_RADIUS))
            .set("fill", "white");
        let circle = apply_stroke!(circle, &stroke);

        let mut group = svg_element::Group::new()
            .set(kind.attribute(), id)
            .add(circle);

        if let Some(label) = label.filter(|label| !label.is_empty()) {
            let definition = TextDefinition::new(self.font_family.as_str(), 11.0).with_color(color);
            let lines = vec![label.to_string()];
            let below = position.add_point(Point::new(0.0, BOUNDARY_MARKER_RADIUS + 10.0));
            group = group.add(Text::new(&definition, &lines).render(below));
        }

        let mut output = LayeredOutput::new();
        output.add_to_layer(RenderLayer::Node, Box::new(group));
        output
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use super::*;
    use crate::model::{NodeStyle, NodeType};

    fn render(output: LayeredOutput) -> String {
        output
            .render()
            .iter()
            .map(|node| node.to_string())
            .collect::<String>()
    }

    #[test]
    fn test_rectangle_outline() {
        let dims = ShapeDescriptor {
            width: 100.0,
            height: 50.0,
            radius: 50.0,
        };
        let svg = shape_outline(ShapeKind::Rectangle, Point::new(0.0, 0.0), dims).to_string();
        assert!(svg.contains("x=\"-50\""), "{svg}");
        assert!(svg.contains("y=\"-25\""), "{svg}");
        assert!(svg.contains("rx=\"4\""), "{svg}");
    }

    #[test]
    fn test_diamond_outline_vertices() {
        let dims = ShapeDescriptor {
            width: 70.0,
            height: 70.0,
            radius: 35.0,
        };
        let svg = shape_outline(ShapeKind::Diamond, Point::new(0.0, 0.0), dims).to_string();
        assert!(svg.contains("points=\"0,-35 35,0 0,35 -35,0\""), "{svg}");
    }

    #[test]
    fn test_regular_polygon_first_vertex_up() {
        let vertices = regular_polygon(Point::new(0.0, 0.0), 40.0, 3);
        assert_eq!(vertices.len(), 3);
        assert_approx_eq!(f64, vertices[0].x(), 0.0, epsilon = 1e-9);
        assert_approx_eq!(f64, vertices[0].y(), -40.0, epsilon = 1e-9);
    }

    #[test]
    fn test_star_alternates_radii() {
        let vertices = star(Point::new(0.0, 0.0), 40.0, 5);
        assert_eq!(vertices.len(), 10);
        assert_approx_eq!(f64, vertices[0].hypot(), 40.0, epsilon = 1e-9);
        assert_approx_eq!(f64, vertices[1].hypot(), 20.0, epsilon = 1e-9);
    }

    #[test]
    fn test_draw_node_uses_resolved_style() {
        let node = Node::new("n1", NodeType::Vocabulary, Point::new(10.0, 10.0))
            .with_label("Boil it")
            .with_style(NodeStyle {
                background_color: Some("#ff0000".to_string()),
                ..NodeStyle::default()
            });
        let svg = render(NodeDrawer::new("Arial").draw_node(&node));

        assert!(svg.contains("data-node-id=\"n1\""));
        assert!(svg.contains("<ellipse"));
        let red = Color::new("#ff0000").unwrap();
        assert!(svg.contains(&format!("fill=\"{red}\"")), "{svg}");
        assert!(svg.contains("Boil it"));
    }

    #[test]
    fn test_draw_node_wraps_label() {
        let node = Node::new("n1", NodeType::Practice, Point::default())
            .with_label("check whether the kettle is boiling");
        let svg = render(NodeDrawer::new("Arial").draw_node(&node));
        assert!(svg.matches("<tspan").count() > 1, "{svg}");
    }

    #[test]
    fn test_empty_label_draws_no_text() {
        let node = Node::new("n1", NodeType::Test, Point::default());
        let svg = render(NodeDrawer::new("Arial").draw_node(&node));
        assert!(!svg.contains("<text"));
    }

    #[test]
    fn test_boundary_marker() {
        let svg = render(NodeDrawer::new("Arial").draw_boundary_marker(
            BoundaryKind::Exit,
            "x1",
            Point::new(5.0, 5.0),
            Some("done"),
        ));
        assert!(svg.contains("data-exit-id=\"x1\""));
        assert!(svg.contains("r=\"10\""));
        assert!(svg.contains("done"));
    }
}
