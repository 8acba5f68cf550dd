//! LaTeX/TikZ document export.
//!
//! Diagram coordinates are mapped into centimetres with the y axis flipped
//! (TikZ grows upward). Everything else is taken unchanged from the
//! geometry engine: node extents, edge endpoints, control points and label
//! anchors are the same values the SVG backend draws, only transformed.

use indexmap::IndexSet;
use log::{debug, info, trace, warn};

use mudtote_core::{
    color::Color,
    draw::{RECTANGLE_CORNER_RADIUS, STAR_INNER_RATIO},
    extent::diagram_bounds,
    geometry::{Bounds, Point, format_number},
    label::LabelPlacement,
    model::{Diagram, EdgeType, Node, ShapeKind},
    route::{EdgeGeometry, compute_edge_geometry},
    shape::{BOUNDARY_MARKER_RADIUS, node_dimensions},
    style::{
        EDGE_STROKE_WIDTH, NODE_STROKE_WIDTH, display_label, edge_color, resolve_edge_style,
        resolve_node_style,
    },
    text::{label_width, line_height, wrap_text},
};

use super::{
    Error, Exporter,
    latex::{escape_label, escape_latex, is_latex_content},
};
use crate::config::{DocumentClass, TikzConfig};

/// TeX points per centimetre.
const PT_PER_CM: f64 = 72.27 / 2.54;

const TIKZ_LIBRARIES: &str = "shapes.geometric, arrows.meta";

/// Maps diagram coordinates onto the TikZ canvas.
///
/// `x' = (x − origin_x) · scale` and `y' = (origin_y − y) · scale`, where
/// the origin is the top-left corner of the diagram extent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TikzTransform {
    origin_x: f64,
    origin_y: f64,
    scale: f64,
}

impl TikzTransform {
    /// Fits `bounds` into the configured page limits.
    ///
    /// The natural scale is `1 / units_per_cm`; it shrinks until the diagram
    /// fits within `max_width_cm × max_height_cm`.
    pub fn new(bounds: Option<Bounds>, config: &TikzConfig) -> Self {
        let natural = 1.0 / config.units_per_cm();
        let Some(bounds) = bounds else {
            return Self {
                origin_x: 0.0,
                origin_y: 0.0,
                scale: natural,
            };
        };

        let scale = natural
            .min(config.max_width_cm() / bounds.width())
            .min(config.max_height_cm() / bounds.height());

        Self {
            origin_x: bounds.min_x(),
            origin_y: bounds.max_y(),
            scale,
        }
    }

    /// Centimetres per diagram unit.
    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Transforms a diagram point to TikZ centimetres.
    pub fn point(&self, point: Point) -> Point {
        Point::new(
            (point.x() - self.origin_x) * self.scale,
            (self.origin_y - point.y()) * self.scale,
        )
    }

    /// Transforms a length to centimetres.
    pub fn length(&self, length: f64) -> f64 {
        length * self.scale
    }

    /// Transforms a length to TeX points.
    pub fn points(&self, length: f64) -> f64 {
        length * self.scale * PT_PER_CM
    }

    /// Rotation angles turn the other way once the y axis is flipped.
    pub fn angle(&self, degrees: Option<f64>) -> Option<f64> {
        degrees.map(|degrees| -degrees)
    }

    /// Formats a diagram point as a TikZ coordinate, e.g. `(1.2, 0.5)`.
    pub fn coordinate(&self, point: Point) -> String {
        let point = self.point(point);
        format!("({}, {})", format_cm(point.x()), format_cm(point.y()))
    }
}

/// Formats centimetres with three decimals, dropping trailing zeros.
fn format_cm(value: f64) -> String {
    let formatted = format!("{value:.3}");
    let trimmed = formatted.trim_end_matches('0').trim_end_matches('.');
    match trimmed {
        "-0" | "" => "0".to_string(),
        other => other.to_string(),
    }
}

/// Named colors used by the picture, in first-use order.
#[derive(Debug, Default)]
struct ColorRegistry {
    colors: IndexSet<String>,
}

impl ColorRegistry {
    /// Returns the xcolor name for `color`, registering it on first use.
    fn name(&mut self, color: Color) -> String {
        let (index, _) = self.colors.insert_full(color.to_hex());
        format!("mudcolor{index}")
    }

    fn definitions(&self) -> impl Iterator<Item = String> + '_ {
        self.colors
            .iter()
            .enumerate()
            .map(|(index, hex)| format!("\\definecolor{{mudcolor{index}}}{{HTML}}{{{hex}}}"))
    }
}

/// TikZ backend.
#[derive(Debug, Clone)]
pub struct Tikz {
    config: TikzConfig,
}

impl Tikz {
    pub fn new(config: &TikzConfig) -> Self {
        Self {
            config: config.clone(),
        }
    }

    /// Renders `diagram` to a complete LaTeX document.
    pub fn render_diagram(&self, diagram: &Diagram) -> String {
        let transform = TikzTransform::new(diagram_bounds(diagram), &self.config);
        debug!(scale = transform.scale(); "TikZ transform computed");

        let mut picture = Picture {
            transform,
            colors: ColorRegistry::default(),
            edges: Vec::new(),
            nodes: Vec::new(),
            labels: Vec::new(),
        };

        for edge in &diagram.edges {
            let Some(geometry) = compute_edge_geometry(edge, &diagram.nodes, &diagram.edges) else {
                warn!(edge_id = edge.id.as_str(); "Skipping edge with unresolved endpoints");
                continue;
            };
            trace!(edge_id = edge.id.as_str(); "Drawing edge");

            let style = resolve_edge_style(edge);
            let color = picture.colors.name(style.stroke.color());
            picture.draw_edge(&geometry, &color, style.stroke.style().to_tikz_value());

            if let Some(label) = display_label(edge) {
                picture.draw_edge_label(geometry.label(), label, &color, style.font_size);
            }
        }

        for node in &diagram.nodes {
            picture.draw_node(node);
        }
        for entry in &diagram.entry_points {
            picture.draw_marker(entry.position, entry.label.as_deref(), edge_color(EdgeType::Entry));
        }
        for exit in &diagram.exit_points {
            picture.draw_marker(exit.position, exit.label.as_deref(), edge_color(EdgeType::Exit));
        }

        picture.into_document(self.config.document_class())
    }
}

impl Exporter for Tikz {
    fn export_diagram(&mut self, diagram: &Diagram) -> Result<String, Error> {
        info!(nodes = diagram.nodes.len(), edges = diagram.edges.len(); "Rendering TikZ document");
        Ok(self.render_diagram(diagram))
    }

    fn file_extension(&self) -> &'static str {
        "tex"
    }
}

/// Serializes `diagram` to a LaTeX document containing one TikZ picture.
pub fn serialize_tikz(diagram: &Diagram, config: &TikzConfig) -> String {
    Tikz::new(config).render_diagram(diagram)
}

/// Picture body under construction.
struct Picture {
    transform: TikzTransform,
    colors: ColorRegistry,
    edges: Vec<String>,
    nodes: Vec<String>,
    labels: Vec<String>,
}

impl Picture {
    fn font(&self, font_size: f64) -> String {
        format!(
            "\\fontsize{{{}}}{{{}}}\\selectfont",
            format_number(self.transform.points(font_size)),
            format_number(self.transform.points(line_height(font_size)))
        )
    }

    fn draw_edge(&mut self, geometry: &EdgeGeometry, color: &str, pattern: &str) {
        let t = self.transform;
        let path = match geometry {
            EdgeGeometry::Straight { start, end, .. } => {
                format!("{} -- {}", t.coordinate(*start), t.coordinate(*end))
            }
            EdgeGeometry::Curve {
                start,
                control,
                end,
                ..
            } => {
                // Exact cubic form of the quadratic curve.
                let c1 = start.add_point(control.sub_point(*start).scale(2.0 / 3.0));
                let c2 = end.add_point(control.sub_point(*end).scale(2.0 / 3.0));
                format!(
                    "{} .. controls {} and {} .. {}",
                    t.coordinate(*start),
                    t.coordinate(c1),
                    t.coordinate(c2),
                    t.coordinate(*end)
                )
            }
            EdgeGeometry::Loop {
                start,
                controls,
                end,
                ..
            } => format!(
                "{} .. controls {} and {} .. {}",
                t.coordinate(*start),
                t.coordinate(controls[0]),
                t.coordinate(controls[1]),
                t.coordinate(*end)
            ),
        };

        self.edges.push(format!(
            "  \\draw[-{{Stealth}}, draw={color}, line width={}pt, {pattern}] {path};",
            format_number(t.points(EDGE_STROKE_WIDTH))
        ));
    }

    fn draw_edge_label(&mut self, placement: LabelPlacement, label: &str, color: &str, font_size: f64) {
        let mut options = vec![
            format!("font={}", self.font(font_size)),
            format!("text={color}"),
            "fill=white".to_string(),
            "inner sep=1pt".to_string(),
            "align=center".to_string(),
        ];
        if let Some(angle) = self.transform.angle(placement.angle) {
            options.push(format!("rotate={}", format_number(angle)));
        }

        self.labels.push(format!(
            "  \\node[{}] at {} {{{}}};",
            options.join(", "),
            self.transform.coordinate(placement.anchor),
            edge_label(label)
        ));
    }

    fn draw_node(&mut self, node: &Node) {
        let style = resolve_node_style(node);
        let dims = node_dimensions(node);
        let t = self.transform;

        let mut options = match style.shape {
            ShapeKind::Ellipse => vec![
                "ellipse".to_string(),
                format!("minimum width={}cm", format_cm(t.length(dims.width))),
                format!("minimum height={}cm", format_cm(t.length(dims.height))),
            ],
            ShapeKind::Rectangle => vec![
                "rectangle".to_string(),
                format!(
                    "rounded corners={}pt",
                    format_number(t.points(RECTANGLE_CORNER_RADIUS))
                ),
                format!("minimum width={}cm", format_cm(t.length(dims.width))),
                format!("minimum height={}cm", format_cm(t.length(dims.height))),
            ],
            ShapeKind::Diamond => vec![
                "diamond".to_string(),
                "aspect=1".to_string(),
                format!("minimum size={}cm", format_cm(t.length(dims.width))),
            ],
            ShapeKind::Circle => vec![
                "circle".to_string(),
                format!("minimum size={}cm", format_cm(t.length(dims.width))),
            ],
            ShapeKind::Triangle => vec![
                "regular polygon".to_string(),
                "regular polygon sides=3".to_string(),
                format!("minimum size={}cm", format_cm(t.length(dims.width))),
            ],
            // TikZ hexagons sit on a side; the SVG outline starts at a top corner.
            ShapeKind::Hexagon => vec![
                "regular polygon".to_string(),
                "regular polygon sides=6".to_string(),
                "shape border rotate=30".to_string(),
                format!("minimum size={}cm", format_cm(t.length(dims.width))),
            ],
            ShapeKind::Star => vec![
                "star".to_string(),
                "star points=5".to_string(),
                format!("star point ratio={}", format_number(1.0 / STAR_INNER_RATIO)),
                format!("minimum size={}cm", format_cm(t.length(dims.width))),
            ],
        };

        let fill = self.colors.name(style.fill);
        let border = self.colors.name(style.border);
        let text = self.colors.name(style.text);
        options.extend([
            format!("draw={border}"),
            format!("fill={fill}"),
            format!("line width={}pt", format_number(t.points(NODE_STROKE_WIDTH))),
            "inner sep=0pt".to_string(),
            "align=center".to_string(),
            format!("text={text}"),
            format!("font={}", self.font(style.font_size)),
        ]);

        self.nodes.push(format!(
            "  \\node[{}] at {} {{{}}};",
            options.join(", "),
            t.coordinate(node.position),
            node_label(node, dims.width, style.font_size)
        ));
    }

    fn draw_marker(&mut self, position: Point, label: Option<&str>, color: Color) {
        let t = self.transform;
        let color = self.colors.name(color);

        self.nodes.push(format!(
            "  \\draw[draw={color}, fill=white, line width={}pt] {} circle ({}cm);",
            format_number(t.points(2.0)),
            t.coordinate(position),
            format_cm(t.length(BOUNDARY_MARKER_RADIUS))
        ));

        if let Some(label) = label.filter(|label| !label.is_empty()) {
            let below = position.add_point(Point::new(0.0, BOUNDARY_MARKER_RADIUS + 10.0));
            self.nodes.push(format!(
                "  \\node[font={}, text={color}] at {} {{{}}};",
                self.font(11.0),
                t.coordinate(below),
                escape_label(label)
            ));
        }
    }

    fn into_document(self, document_class: DocumentClass) -> String {
        let mut lines = vec!["% Generated by mudtote".to_string()];
        lines.push(match document_class {
            DocumentClass::Standalone => "\\documentclass[tikz,border=10pt]{standalone}".to_string(),
            DocumentClass::Article => "\\documentclass{article}".to_string(),
        });
        lines.push("\\usepackage{tikz}".to_string());
        lines.push(format!("\\usetikzlibrary{{{TIKZ_LIBRARIES}}}"));
        lines.extend(self.colors.definitions());
        lines.push("\\begin{document}".to_string());
        if document_class == DocumentClass::Article {
            lines.push("\\begin{figure}[htbp]".to_string());
            lines.push("\\centering".to_string());
        }

        lines.push("\\begin{tikzpicture}".to_string());
        if !self.edges.is_empty() {
            lines.push("  % Edges".to_string());
            lines.extend(self.edges);
        }
        if !self.nodes.is_empty() {
            lines.push("  % Nodes".to_string());
            lines.extend(self.nodes);
        }
        if !self.labels.is_empty() {
            lines.push("  % Edge labels".to_string());
            lines.extend(self.labels);
        }
        lines.push("\\end{tikzpicture}".to_string());

        if document_class == DocumentClass::Article {
            lines.push("\\end{figure}".to_string());
        }
        lines.push("\\end{document}".to_string());

        let mut document = lines.join("\n");
        document.push('\n');
        document
    }
}

/// Node text for TikZ: LaTeX passes through unwrapped, plain text is
/// wrapped like the SVG label and joined with `\\`.
fn node_label(node: &Node, shape_width: f64, font_size: f64) -> String {
    if is_latex_content(&node.label) {
        return escape_label(&node.label);
    }

    wrap_text(&node.label, label_width(shape_width), font_size)
        .iter()
        .map(|line| escape_latex(line))
        .collect::<Vec<_>>()
        .join(" \\\\ ")
}

/// Edge label text: one escaped line per source line, joined with `\\`.
fn edge_label(label: &str) -> String {
    label
        .lines()
        .map(escape_label)
        .collect::<Vec<_>>()
        .join(" \\\\ ")
}
